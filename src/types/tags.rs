//! Tag constants for the standard sections
//!
//! Only the subset of the namespace that the default request, the static
//! capability buffer and per-frame results use is defined here. Field indices
//! are stable; new tags must be appended to their section.

use super::{Section, Tag};

// android.colorCorrection
pub const COLOR_CORRECTION_MODE: Tag = Tag::new(Section::ColorCorrection, 0);
pub const COLOR_CORRECTION_TRANSFORM: Tag = Tag::new(Section::ColorCorrection, 1);

// android.control
pub const CONTROL_AE_ANTIBANDING_MODE: Tag = Tag::new(Section::Control, 0);
pub const CONTROL_AE_EXPOSURE_COMPENSATION: Tag = Tag::new(Section::Control, 1);
pub const CONTROL_AE_MODE: Tag = Tag::new(Section::Control, 2);
pub const CONTROL_AE_REGIONS: Tag = Tag::new(Section::Control, 3);
pub const CONTROL_AE_TARGET_FPS_RANGE: Tag = Tag::new(Section::Control, 4);
pub const CONTROL_AF_MODE: Tag = Tag::new(Section::Control, 5);
pub const CONTROL_AF_REGIONS: Tag = Tag::new(Section::Control, 6);
pub const CONTROL_AWB_MODE: Tag = Tag::new(Section::Control, 7);
pub const CONTROL_AWB_REGIONS: Tag = Tag::new(Section::Control, 8);
pub const CONTROL_CAPTURE_INTENT: Tag = Tag::new(Section::Control, 9);
pub const CONTROL_EFFECT_MODE: Tag = Tag::new(Section::Control, 10);
pub const CONTROL_MODE: Tag = Tag::new(Section::Control, 11);
pub const CONTROL_SCENE_MODE: Tag = Tag::new(Section::Control, 12);
pub const CONTROL_VIDEO_STABILIZATION_MODE: Tag = Tag::new(Section::Control, 13);
pub const CONTROL_AE_AVAILABLE_ANTIBANDING_MODES: Tag = Tag::new(Section::Control, 14);
pub const CONTROL_AE_AVAILABLE_MODES: Tag = Tag::new(Section::Control, 15);
pub const CONTROL_AE_AVAILABLE_TARGET_FPS_RANGES: Tag = Tag::new(Section::Control, 16);
pub const CONTROL_AE_COMPENSATION_RANGE: Tag = Tag::new(Section::Control, 17);
pub const CONTROL_AE_COMPENSATION_STEP: Tag = Tag::new(Section::Control, 18);
pub const CONTROL_AF_AVAILABLE_MODES: Tag = Tag::new(Section::Control, 19);
pub const CONTROL_AVAILABLE_EFFECTS: Tag = Tag::new(Section::Control, 20);
pub const CONTROL_AVAILABLE_SCENE_MODES: Tag = Tag::new(Section::Control, 21);
pub const CONTROL_AVAILABLE_VIDEO_STABILIZATION_MODES: Tag = Tag::new(Section::Control, 22);
pub const CONTROL_AWB_AVAILABLE_MODES: Tag = Tag::new(Section::Control, 23);
pub const CONTROL_MAX_REGIONS: Tag = Tag::new(Section::Control, 24);

// android.demosaic
pub const DEMOSAIC_MODE: Tag = Tag::new(Section::Demosaic, 0);

// android.edge
pub const EDGE_MODE: Tag = Tag::new(Section::Edge, 0);
pub const EDGE_STRENGTH: Tag = Tag::new(Section::Edge, 1);

// android.flash
pub const FLASH_FIRING_POWER: Tag = Tag::new(Section::Flash, 0);
pub const FLASH_FIRING_TIME: Tag = Tag::new(Section::Flash, 1);
pub const FLASH_MODE: Tag = Tag::new(Section::Flash, 2);

// android.flash.info
pub const FLASH_INFO_AVAILABLE: Tag = Tag::new(Section::FlashInfo, 0);
pub const FLASH_INFO_CHARGE_DURATION: Tag = Tag::new(Section::FlashInfo, 1);

// android.geometric
pub const GEOMETRIC_MODE: Tag = Tag::new(Section::Geometric, 0);

// android.hotPixel
pub const HOT_PIXEL_MODE: Tag = Tag::new(Section::HotPixel, 0);

// android.jpeg
pub const JPEG_GPS_COORDINATES: Tag = Tag::new(Section::Jpeg, 0);
pub const JPEG_GPS_PROCESSING_METHOD: Tag = Tag::new(Section::Jpeg, 1);
pub const JPEG_GPS_TIMESTAMP: Tag = Tag::new(Section::Jpeg, 2);
pub const JPEG_ORIENTATION: Tag = Tag::new(Section::Jpeg, 3);
pub const JPEG_QUALITY: Tag = Tag::new(Section::Jpeg, 4);
pub const JPEG_THUMBNAIL_QUALITY: Tag = Tag::new(Section::Jpeg, 5);
pub const JPEG_THUMBNAIL_SIZE: Tag = Tag::new(Section::Jpeg, 6);
pub const JPEG_AVAILABLE_THUMBNAIL_SIZES: Tag = Tag::new(Section::Jpeg, 7);
pub const JPEG_MAX_SIZE: Tag = Tag::new(Section::Jpeg, 8);

// android.lens
pub const LENS_APERTURE: Tag = Tag::new(Section::Lens, 0);
pub const LENS_FILTER_DENSITY: Tag = Tag::new(Section::Lens, 1);
pub const LENS_FOCAL_LENGTH: Tag = Tag::new(Section::Lens, 2);
pub const LENS_FOCUS_DISTANCE: Tag = Tag::new(Section::Lens, 3);
pub const LENS_OPTICAL_STABILIZATION_MODE: Tag = Tag::new(Section::Lens, 4);
pub const LENS_FACING: Tag = Tag::new(Section::Lens, 5);

// android.lens.info
pub const LENS_INFO_AVAILABLE_APERTURES: Tag = Tag::new(Section::LensInfo, 0);
pub const LENS_INFO_AVAILABLE_FILTER_DENSITIES: Tag = Tag::new(Section::LensInfo, 1);
pub const LENS_INFO_AVAILABLE_FOCAL_LENGTHS: Tag = Tag::new(Section::LensInfo, 2);
pub const LENS_INFO_AVAILABLE_OPTICAL_STABILIZATION: Tag = Tag::new(Section::LensInfo, 3);
pub const LENS_INFO_HYPERFOCAL_DISTANCE: Tag = Tag::new(Section::LensInfo, 4);
pub const LENS_INFO_MINIMUM_FOCUS_DISTANCE: Tag = Tag::new(Section::LensInfo, 5);
pub const LENS_INFO_SHADING_MAP_SIZE: Tag = Tag::new(Section::LensInfo, 6);
pub const LENS_INFO_SHADING_MAP: Tag = Tag::new(Section::LensInfo, 7);

// android.noiseReduction
pub const NOISE_REDUCTION_MODE: Tag = Tag::new(Section::NoiseReduction, 0);
pub const NOISE_REDUCTION_STRENGTH: Tag = Tag::new(Section::NoiseReduction, 1);

// android.quirks
pub const QUIRKS_METERING_CROP_REGION: Tag = Tag::new(Section::Quirks, 0);
pub const QUIRKS_TRIGGER_AF_WITH_AUTO: Tag = Tag::new(Section::Quirks, 1);
pub const QUIRKS_USE_ZSL_FORMAT: Tag = Tag::new(Section::Quirks, 2);

// android.request
pub const REQUEST_FRAME_COUNT: Tag = Tag::new(Section::Request, 0);
pub const REQUEST_ID: Tag = Tag::new(Section::Request, 1);
pub const REQUEST_METADATA_MODE: Tag = Tag::new(Section::Request, 2);
pub const REQUEST_OUTPUT_STREAMS: Tag = Tag::new(Section::Request, 3);

// android.scaler
pub const SCALER_AVAILABLE_FORMATS: Tag = Tag::new(Section::Scaler, 0);
pub const SCALER_AVAILABLE_JPEG_MIN_DURATIONS: Tag = Tag::new(Section::Scaler, 1);
pub const SCALER_AVAILABLE_JPEG_SIZES: Tag = Tag::new(Section::Scaler, 2);
pub const SCALER_AVAILABLE_MAX_DIGITAL_ZOOM: Tag = Tag::new(Section::Scaler, 3);
pub const SCALER_AVAILABLE_PROCESSED_MIN_DURATIONS: Tag = Tag::new(Section::Scaler, 4);
pub const SCALER_AVAILABLE_PROCESSED_SIZES: Tag = Tag::new(Section::Scaler, 5);
pub const SCALER_AVAILABLE_RAW_MIN_DURATIONS: Tag = Tag::new(Section::Scaler, 6);
pub const SCALER_AVAILABLE_RAW_SIZES: Tag = Tag::new(Section::Scaler, 7);
pub const SCALER_CROP_REGION: Tag = Tag::new(Section::Scaler, 8);

// android.sensor
pub const SENSOR_FRAME_DURATION: Tag = Tag::new(Section::Sensor, 0);
pub const SENSOR_TIMESTAMP: Tag = Tag::new(Section::Sensor, 1);

// android.sensor.info
pub const SENSOR_INFO_ACTIVE_ARRAY_SIZE: Tag = Tag::new(Section::SensorInfo, 0);
pub const SENSOR_INFO_PHYSICAL_SIZE: Tag = Tag::new(Section::SensorInfo, 1);
pub const SENSOR_INFO_PIXEL_ARRAY_SIZE: Tag = Tag::new(Section::SensorInfo, 2);

// android.shading
pub const SHADING_MODE: Tag = Tag::new(Section::Shading, 0);

// android.statistics
pub const STATISTICS_FACE_DETECT_MODE: Tag = Tag::new(Section::Statistics, 0);
pub const STATISTICS_HISTOGRAM_MODE: Tag = Tag::new(Section::Statistics, 1);
pub const STATISTICS_SHARPNESS_MAP_MODE: Tag = Tag::new(Section::Statistics, 2);

// android.statistics.info
pub const STATISTICS_INFO_AVAILABLE_FACE_DETECT_MODES: Tag = Tag::new(Section::StatisticsInfo, 0);
pub const STATISTICS_INFO_HISTOGRAM_BUCKET_COUNT: Tag = Tag::new(Section::StatisticsInfo, 1);
pub const STATISTICS_INFO_MAX_FACE_COUNT: Tag = Tag::new(Section::StatisticsInfo, 2);
pub const STATISTICS_INFO_MAX_HISTOGRAM_COUNT: Tag = Tag::new(Section::StatisticsInfo, 3);
pub const STATISTICS_INFO_MAX_SHARPNESS_MAP_VALUE: Tag = Tag::new(Section::StatisticsInfo, 4);
pub const STATISTICS_INFO_SHARPNESS_MAP_SIZE: Tag = Tag::new(Section::StatisticsInfo, 5);

// android.tonemap
pub const TONEMAP_CURVE_BLUE: Tag = Tag::new(Section::Tonemap, 0);
pub const TONEMAP_CURVE_GREEN: Tag = Tag::new(Section::Tonemap, 1);
pub const TONEMAP_CURVE_RED: Tag = Tag::new(Section::Tonemap, 2);
pub const TONEMAP_MODE: Tag = Tag::new(Section::Tonemap, 3);
pub const TONEMAP_MAX_CURVE_POINTS: Tag = Tag::new(Section::Tonemap, 4);
