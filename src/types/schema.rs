//! Tag schema: the declared value type of every known tag

use std::collections::HashMap;
use std::sync::LazyLock;

use super::{Tag, ValueType, tags::*};

/// Static description of one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagInfo {
    pub tag: Tag,
    /// Field name within the section (e.g. `"gpsTimestamp"`)
    pub name: &'static str,
    pub value_type: ValueType,
}

impl TagInfo {
    pub const fn new(tag: Tag, name: &'static str, value_type: ValueType) -> Self {
        Self { tag, name, value_type }
    }
}

use ValueType::{Byte, Double, Float, Int32, Int64, Rational};

const STANDARD_TAGS: &[TagInfo] = &[
    TagInfo::new(COLOR_CORRECTION_MODE, "mode", Byte),
    TagInfo::new(COLOR_CORRECTION_TRANSFORM, "transform", Float),
    TagInfo::new(CONTROL_AE_ANTIBANDING_MODE, "aeAntibandingMode", Byte),
    TagInfo::new(CONTROL_AE_EXPOSURE_COMPENSATION, "aeExposureCompensation", Int32),
    TagInfo::new(CONTROL_AE_MODE, "aeMode", Byte),
    TagInfo::new(CONTROL_AE_REGIONS, "aeRegions", Int32),
    TagInfo::new(CONTROL_AE_TARGET_FPS_RANGE, "aeTargetFpsRange", Int32),
    TagInfo::new(CONTROL_AF_MODE, "afMode", Byte),
    TagInfo::new(CONTROL_AF_REGIONS, "afRegions", Int32),
    TagInfo::new(CONTROL_AWB_MODE, "awbMode", Byte),
    TagInfo::new(CONTROL_AWB_REGIONS, "awbRegions", Int32),
    TagInfo::new(CONTROL_CAPTURE_INTENT, "captureIntent", Byte),
    TagInfo::new(CONTROL_EFFECT_MODE, "effectMode", Byte),
    TagInfo::new(CONTROL_MODE, "mode", Byte),
    TagInfo::new(CONTROL_SCENE_MODE, "sceneMode", Byte),
    TagInfo::new(CONTROL_VIDEO_STABILIZATION_MODE, "videoStabilizationMode", Byte),
    TagInfo::new(CONTROL_AE_AVAILABLE_ANTIBANDING_MODES, "aeAvailableAntibandingModes", Byte),
    TagInfo::new(CONTROL_AE_AVAILABLE_MODES, "aeAvailableModes", Byte),
    TagInfo::new(CONTROL_AE_AVAILABLE_TARGET_FPS_RANGES, "aeAvailableTargetFpsRanges", Int32),
    TagInfo::new(CONTROL_AE_COMPENSATION_RANGE, "aeCompensationRange", Int32),
    TagInfo::new(CONTROL_AE_COMPENSATION_STEP, "aeCompensationStep", Rational),
    TagInfo::new(CONTROL_AF_AVAILABLE_MODES, "afAvailableModes", Byte),
    TagInfo::new(CONTROL_AVAILABLE_EFFECTS, "availableEffects", Byte),
    TagInfo::new(CONTROL_AVAILABLE_SCENE_MODES, "availableSceneModes", Byte),
    TagInfo::new(
        CONTROL_AVAILABLE_VIDEO_STABILIZATION_MODES,
        "availableVideoStabilizationModes",
        Byte,
    ),
    TagInfo::new(CONTROL_AWB_AVAILABLE_MODES, "awbAvailableModes", Byte),
    TagInfo::new(CONTROL_MAX_REGIONS, "maxRegions", Int32),
    TagInfo::new(DEMOSAIC_MODE, "mode", Byte),
    TagInfo::new(EDGE_MODE, "mode", Byte),
    TagInfo::new(EDGE_STRENGTH, "strength", Byte),
    TagInfo::new(FLASH_FIRING_POWER, "firingPower", Byte),
    TagInfo::new(FLASH_FIRING_TIME, "firingTime", Int64),
    TagInfo::new(FLASH_MODE, "mode", Byte),
    TagInfo::new(FLASH_INFO_AVAILABLE, "available", Byte),
    TagInfo::new(FLASH_INFO_CHARGE_DURATION, "chargeDuration", Int64),
    TagInfo::new(GEOMETRIC_MODE, "mode", Byte),
    TagInfo::new(HOT_PIXEL_MODE, "mode", Byte),
    TagInfo::new(JPEG_GPS_COORDINATES, "gpsCoordinates", Double),
    TagInfo::new(JPEG_GPS_PROCESSING_METHOD, "gpsProcessingMethod", Byte),
    TagInfo::new(JPEG_GPS_TIMESTAMP, "gpsTimestamp", Int64),
    TagInfo::new(JPEG_ORIENTATION, "orientation", Int32),
    TagInfo::new(JPEG_QUALITY, "quality", Byte),
    TagInfo::new(JPEG_THUMBNAIL_QUALITY, "thumbnailQuality", Byte),
    TagInfo::new(JPEG_THUMBNAIL_SIZE, "thumbnailSize", Int32),
    TagInfo::new(JPEG_AVAILABLE_THUMBNAIL_SIZES, "availableThumbnailSizes", Int32),
    TagInfo::new(JPEG_MAX_SIZE, "maxSize", Int32),
    TagInfo::new(LENS_APERTURE, "aperture", Float),
    TagInfo::new(LENS_FILTER_DENSITY, "filterDensity", Float),
    TagInfo::new(LENS_FOCAL_LENGTH, "focalLength", Float),
    TagInfo::new(LENS_FOCUS_DISTANCE, "focusDistance", Float),
    TagInfo::new(LENS_OPTICAL_STABILIZATION_MODE, "opticalStabilizationMode", Byte),
    TagInfo::new(LENS_FACING, "facing", Byte),
    TagInfo::new(LENS_INFO_AVAILABLE_APERTURES, "availableApertures", Float),
    TagInfo::new(LENS_INFO_AVAILABLE_FILTER_DENSITIES, "availableFilterDensities", Float),
    TagInfo::new(LENS_INFO_AVAILABLE_FOCAL_LENGTHS, "availableFocalLengths", Float),
    TagInfo::new(
        LENS_INFO_AVAILABLE_OPTICAL_STABILIZATION,
        "availableOpticalStabilization",
        Byte,
    ),
    TagInfo::new(LENS_INFO_HYPERFOCAL_DISTANCE, "hyperfocalDistance", Float),
    TagInfo::new(LENS_INFO_MINIMUM_FOCUS_DISTANCE, "minimumFocusDistance", Float),
    TagInfo::new(LENS_INFO_SHADING_MAP_SIZE, "shadingMapSize", Int32),
    TagInfo::new(LENS_INFO_SHADING_MAP, "shadingMap", Float),
    TagInfo::new(NOISE_REDUCTION_MODE, "mode", Byte),
    TagInfo::new(NOISE_REDUCTION_STRENGTH, "strength", Byte),
    TagInfo::new(QUIRKS_METERING_CROP_REGION, "meteringCropRegion", Byte),
    TagInfo::new(QUIRKS_TRIGGER_AF_WITH_AUTO, "triggerAfWithAuto", Byte),
    TagInfo::new(QUIRKS_USE_ZSL_FORMAT, "useZslFormat", Byte),
    TagInfo::new(REQUEST_FRAME_COUNT, "frameCount", Int32),
    TagInfo::new(REQUEST_ID, "id", Int32),
    TagInfo::new(REQUEST_METADATA_MODE, "metadataMode", Byte),
    TagInfo::new(REQUEST_OUTPUT_STREAMS, "outputStreams", Int32),
    TagInfo::new(SCALER_AVAILABLE_FORMATS, "availableFormats", Int32),
    TagInfo::new(SCALER_AVAILABLE_JPEG_MIN_DURATIONS, "availableJpegMinDurations", Int64),
    TagInfo::new(SCALER_AVAILABLE_JPEG_SIZES, "availableJpegSizes", Int32),
    TagInfo::new(SCALER_AVAILABLE_MAX_DIGITAL_ZOOM, "availableMaxDigitalZoom", Float),
    TagInfo::new(
        SCALER_AVAILABLE_PROCESSED_MIN_DURATIONS,
        "availableProcessedMinDurations",
        Int64,
    ),
    TagInfo::new(SCALER_AVAILABLE_PROCESSED_SIZES, "availableProcessedSizes", Int32),
    TagInfo::new(SCALER_AVAILABLE_RAW_MIN_DURATIONS, "availableRawMinDurations", Int64),
    TagInfo::new(SCALER_AVAILABLE_RAW_SIZES, "availableRawSizes", Int32),
    TagInfo::new(SCALER_CROP_REGION, "cropRegion", Int32),
    TagInfo::new(SENSOR_FRAME_DURATION, "frameDuration", Int64),
    TagInfo::new(SENSOR_TIMESTAMP, "timestamp", Int64),
    TagInfo::new(SENSOR_INFO_ACTIVE_ARRAY_SIZE, "activeArraySize", Int32),
    TagInfo::new(SENSOR_INFO_PHYSICAL_SIZE, "physicalSize", Float),
    TagInfo::new(SENSOR_INFO_PIXEL_ARRAY_SIZE, "pixelArraySize", Int32),
    TagInfo::new(SHADING_MODE, "mode", Byte),
    TagInfo::new(STATISTICS_FACE_DETECT_MODE, "faceDetectMode", Byte),
    TagInfo::new(STATISTICS_HISTOGRAM_MODE, "histogramMode", Byte),
    TagInfo::new(STATISTICS_SHARPNESS_MAP_MODE, "sharpnessMapMode", Byte),
    TagInfo::new(STATISTICS_INFO_AVAILABLE_FACE_DETECT_MODES, "availableFaceDetectModes", Byte),
    TagInfo::new(STATISTICS_INFO_HISTOGRAM_BUCKET_COUNT, "histogramBucketCount", Int32),
    TagInfo::new(STATISTICS_INFO_MAX_FACE_COUNT, "maxFaceCount", Int32),
    TagInfo::new(STATISTICS_INFO_MAX_HISTOGRAM_COUNT, "maxHistogramCount", Int32),
    TagInfo::new(STATISTICS_INFO_MAX_SHARPNESS_MAP_VALUE, "maxSharpnessMapValue", Int32),
    TagInfo::new(STATISTICS_INFO_SHARPNESS_MAP_SIZE, "sharpnessMapSize", Int32),
    TagInfo::new(TONEMAP_CURVE_BLUE, "curveBlue", Float),
    TagInfo::new(TONEMAP_CURVE_GREEN, "curveGreen", Float),
    TagInfo::new(TONEMAP_CURVE_RED, "curveRed", Float),
    TagInfo::new(TONEMAP_MODE, "mode", Byte),
    TagInfo::new(TONEMAP_MAX_CURVE_POINTS, "maxCurvePoints", Int32),
];

static STANDARD: LazyLock<TagSchema> = LazyLock::new(|| TagSchema::from_table(STANDARD_TAGS));

/// Lookup table from tag to declared value type (O(1) lookup).
///
/// A buffer never redefines a tag's type: both build passes and every
/// accessor consult the same schema.
#[derive(Debug, Clone)]
pub struct TagSchema {
    tags: HashMap<Tag, TagInfo>,
}

impl TagSchema {
    /// The schema covering every standard tag.
    pub fn standard() -> &'static TagSchema {
        &STANDARD
    }

    fn from_table(table: &[TagInfo]) -> Self {
        Self { tags: table.iter().map(|info| (info.tag, *info)).collect() }
    }

    /// Standard schema extended with vendor tags.
    ///
    /// Vendor tags must lie in the vendor section range and must not collide
    /// with each other.
    pub fn with_vendor_tags(vendor: &[TagInfo]) -> crate::Result<Self> {
        let mut schema = Self::standard().clone();
        for info in vendor {
            if !info.tag.is_vendor() {
                return Err(crate::MetadataError::invalid_argument(format!(
                    "vendor tag {:#010x} ({}) is outside the vendor section range",
                    info.tag.value(),
                    info.name
                )));
            }
            if schema.tags.insert(info.tag, *info).is_some() {
                return Err(crate::MetadataError::invalid_argument(format!(
                    "vendor tag {:#010x} ({}) is registered twice",
                    info.tag.value(),
                    info.name
                )));
            }
        }
        Ok(schema)
    }

    /// Full description of a tag, if known.
    pub fn info(&self, tag: Tag) -> Option<&TagInfo> {
        self.tags.get(&tag)
    }

    /// Declared value type of `tag`.
    pub fn value_type(&self, tag: Tag) -> crate::Result<ValueType> {
        self.info(tag)
            .map(|info| info.value_type)
            .ok_or(crate::MetadataError::InvalidTag { tag })
    }

    /// Pool bytes an entry of `count` elements of `tag` consumes.
    pub fn data_size(&self, tag: Tag, count: usize) -> crate::Result<usize> {
        Ok(self.value_type(tag)?.data_size(count))
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.tags.contains_key(&tag)
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }
}
