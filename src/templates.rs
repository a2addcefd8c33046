//! Default capture request templates
//!
//! Every template carries the same fixed set of entries. Only four groups of
//! values depend on the [`TemplateKind`]: the eight processing-block quality
//! modes, video stabilisation, capture intent and auto-focus mode. Those are
//! resolved by [`TemplateOverrides::for_kind`]; everything else comes from the
//! constants below or from the sensor's pixel array.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::buffer::{BufferAllocator, MetadataBuffer};
use crate::builder::{Accumulator, build_two_phase};
use crate::sensor::SensorDescriptor;
use crate::tags::*;
use crate::types::modes::*;
use crate::types::{Tag, TagSchema};
use crate::Result;

/// Request template requested by the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    Preview,
    StillCapture,
    VideoRecord,
    VideoSnapshot,
    ZeroShutterLag,
    Manual,
    /// Any id the framework defines that has no dedicated defaults
    Custom(i32),
}

impl TemplateKind {
    /// Every named template, in framework id order.
    pub const ALL: [TemplateKind; 6] = [
        TemplateKind::Preview,
        TemplateKind::StillCapture,
        TemplateKind::VideoRecord,
        TemplateKind::VideoSnapshot,
        TemplateKind::ZeroShutterLag,
        TemplateKind::Manual,
    ];

    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            1 => TemplateKind::Preview,
            2 => TemplateKind::StillCapture,
            3 => TemplateKind::VideoRecord,
            4 => TemplateKind::VideoSnapshot,
            5 => TemplateKind::ZeroShutterLag,
            6 => TemplateKind::Manual,
            other => TemplateKind::Custom(other),
        }
    }

    pub const fn raw(self) -> i32 {
        match self {
            TemplateKind::Preview => 1,
            TemplateKind::StillCapture => 2,
            TemplateKind::VideoRecord => 3,
            TemplateKind::VideoSnapshot => 4,
            TemplateKind::ZeroShutterLag => 5,
            TemplateKind::Manual => 6,
            TemplateKind::Custom(raw) => raw,
        }
    }
}

impl From<i32> for TemplateKind {
    fn from(raw: i32) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateKind::Preview => f.write_str("preview"),
            TemplateKind::StillCapture => f.write_str("still capture"),
            TemplateKind::VideoRecord => f.write_str("video record"),
            TemplateKind::VideoSnapshot => f.write_str("video snapshot"),
            TemplateKind::ZeroShutterLag => f.write_str("zero shutter lag"),
            TemplateKind::Manual => f.write_str("manual"),
            TemplateKind::Custom(raw) => write!(f, "custom ({})", raw),
        }
    }
}

/// Values that vary by template kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateOverrides {
    /// Shared by all eight processing blocks
    pub processing: ProcessingMode,
    pub video_stabilization: VideoStabilizationMode,
    pub capture_intent: CaptureIntent,
    pub af_mode: AfMode,
}

impl TemplateOverrides {
    pub const fn for_kind(kind: TemplateKind) -> Self {
        let processing = match kind {
            TemplateKind::ZeroShutterLag => ProcessingMode::HighQuality,
            _ => ProcessingMode::Fast,
        };
        let video_stabilization = match kind {
            TemplateKind::VideoRecord | TemplateKind::VideoSnapshot => VideoStabilizationMode::On,
            _ => VideoStabilizationMode::Off,
        };
        let capture_intent = match kind {
            TemplateKind::Preview => CaptureIntent::Preview,
            TemplateKind::StillCapture => CaptureIntent::StillCapture,
            TemplateKind::VideoRecord => CaptureIntent::VideoRecord,
            TemplateKind::VideoSnapshot => CaptureIntent::VideoSnapshot,
            TemplateKind::ZeroShutterLag => CaptureIntent::ZeroShutterLag,
            TemplateKind::Manual | TemplateKind::Custom(_) => CaptureIntent::Custom,
        };
        let af_mode = match kind {
            TemplateKind::Preview | TemplateKind::StillCapture | TemplateKind::ZeroShutterLag => {
                AfMode::ContinuousPicture
            }
            TemplateKind::VideoRecord | TemplateKind::VideoSnapshot => AfMode::ContinuousVideo,
            TemplateKind::Manual | TemplateKind::Custom(_) => AfMode::Auto,
        };
        Self { processing, video_stabilization, capture_intent, af_mode }
    }
}

/// Tags set to the template's processing quality, in entry order.
pub const PROCESSING_MODE_TAGS: [Tag; 8] = [
    HOT_PIXEL_MODE,
    DEMOSAIC_MODE,
    NOISE_REDUCTION_MODE,
    SHADING_MODE,
    GEOMETRIC_MODE,
    COLOR_CORRECTION_MODE,
    TONEMAP_MODE,
    EDGE_MODE,
];

pub const TONEMAP_CURVE_LEN: usize = 32;

/// Identity tonemap as 16 evenly spaced (in, out) control points.
pub const LINEAR_TONEMAP_CURVE: [f32; TONEMAP_CURVE_LEN] = linear_curve();

const fn linear_curve() -> [f32; TONEMAP_CURVE_LEN] {
    let mut curve = [0.0f32; TONEMAP_CURVE_LEN];
    let points = TONEMAP_CURVE_LEN / 2;
    let mut i = 0;
    while i < points {
        let x = i as f32 / (points - 1) as f32;
        curve[2 * i] = x;
        curve[2 * i + 1] = x;
        i += 1;
    }
    curve
}

pub const IDENTITY_COLOR_TRANSFORM: [f32; 9] = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

/// 1/30 s
pub const DEFAULT_FRAME_DURATION_NS: i64 = 33_333_333;
pub const DEFAULT_APERTURE: f32 = 2.8;
pub const DEFAULT_JPEG_QUALITY: u8 = 100;
pub const DEFAULT_THUMBNAIL_SIZE: [i32; 2] = [160, 120];
pub const DEFAULT_TARGET_FPS_RANGE: [i32; 2] = [15, 30];
pub const REGION_WEIGHT: i32 = 1000;

pub const GPS_PROCESSING_METHOD_LEN: usize = 32;

/// `"None"` NUL-padded to the fixed field width.
pub const DEFAULT_GPS_PROCESSING_METHOD: [u8; GPS_PROCESSING_METHOD_LEN] = {
    let mut method = [0u8; GPS_PROCESSING_METHOD_LEN];
    method[0] = b'N';
    method[1] = b'o';
    method[2] = b'n';
    method[3] = b'e';
    method
};

/// Emit every default request entry for `kind`.
///
/// The call sequence depends only on its arguments, so measuring and writing
/// runs always agree.
pub fn default_request_entries(
    acc: &mut dyn Accumulator,
    kind: TemplateKind,
    sensor: &SensorDescriptor,
) -> Result<()> {
    let overrides = TemplateOverrides::for_kind(kind);
    let [max_width, max_height] = sensor.pixel_array();

    // android.request
    acc.add(REQUEST_METADATA_MODE, &[MetadataMode::None.value()])?;
    acc.add(REQUEST_ID, &[0i32])?;
    acc.add(REQUEST_FRAME_COUNT, &[0i32])?;

    // android.lens
    acc.add(LENS_FOCUS_DISTANCE, &[0.0f32])?;
    acc.add(LENS_APERTURE, &[DEFAULT_APERTURE])?;
    acc.add(LENS_FOCAL_LENGTH, &[sensor.focal_length])?;
    acc.add(LENS_FILTER_DENSITY, &[0.0f32])?;
    acc.add(LENS_OPTICAL_STABILIZATION_MODE, &[OpticalStabilizationMode::Off.value()])?;

    // android.sensor
    acc.add(SENSOR_FRAME_DURATION, &[DEFAULT_FRAME_DURATION_NS])?;

    // android.flash
    acc.add(FLASH_MODE, &[FlashMode::Off.value()])?;
    acc.add(FLASH_FIRING_POWER, &[10u8])?;
    acc.add(FLASH_FIRING_TIME, &[0i64])?;

    // processing blocks
    for tag in PROCESSING_MODE_TAGS {
        acc.add(tag, &[overrides.processing.value()])?;
    }
    acc.add(CONTROL_VIDEO_STABILIZATION_MODE, &[overrides.video_stabilization.value()])?;

    acc.add(NOISE_REDUCTION_STRENGTH, &[5u8])?;
    acc.add(COLOR_CORRECTION_TRANSFORM, &IDENTITY_COLOR_TRANSFORM)?;

    // android.tonemap
    acc.add(TONEMAP_CURVE_RED, &LINEAR_TONEMAP_CURVE)?;
    acc.add(TONEMAP_CURVE_GREEN, &LINEAR_TONEMAP_CURVE)?;
    acc.add(TONEMAP_CURVE_BLUE, &LINEAR_TONEMAP_CURVE)?;

    acc.add(EDGE_STRENGTH, &[5u8])?;
    acc.add(SCALER_CROP_REGION, &[0, 0, max_width, max_height])?;

    // android.jpeg
    acc.add(JPEG_QUALITY, &[DEFAULT_JPEG_QUALITY])?;
    acc.add(JPEG_THUMBNAIL_SIZE, &DEFAULT_THUMBNAIL_SIZE)?;
    acc.add(JPEG_THUMBNAIL_QUALITY, &[DEFAULT_JPEG_QUALITY])?;
    acc.add(JPEG_GPS_COORDINATES, &[0.0f64; 3])?;
    acc.add(JPEG_GPS_PROCESSING_METHOD, &DEFAULT_GPS_PROCESSING_METHOD)?;
    acc.add(JPEG_GPS_TIMESTAMP, &[0i64])?;
    acc.add(JPEG_ORIENTATION, &[0i32])?;

    // android.statistics
    acc.add(STATISTICS_FACE_DETECT_MODE, &[FaceDetectMode::Full.value()])?;
    acc.add(STATISTICS_HISTOGRAM_MODE, &[StatisticsMode::Off.value()])?;
    acc.add(STATISTICS_SHARPNESS_MAP_MODE, &[StatisticsMode::Off.value()])?;

    // android.control
    let regions = [0, 0, max_width, max_height, REGION_WEIGHT];
    acc.add(CONTROL_CAPTURE_INTENT, &[overrides.capture_intent.value()])?;
    acc.add(CONTROL_MODE, &[ControlMode::Auto.value()])?;
    acc.add(CONTROL_EFFECT_MODE, &[EffectMode::Off.value()])?;
    acc.add(CONTROL_SCENE_MODE, &[SceneMode::Unsupported.value()])?;
    acc.add(CONTROL_AE_MODE, &[AeMode::On.value()])?;
    acc.add(CONTROL_AE_REGIONS, &regions)?;
    acc.add(CONTROL_AE_EXPOSURE_COMPENSATION, &[0i32])?;
    acc.add(CONTROL_AE_TARGET_FPS_RANGE, &DEFAULT_TARGET_FPS_RANGE)?;
    acc.add(CONTROL_AE_ANTIBANDING_MODE, &[AeAntibandingMode::Auto.value()])?;
    acc.add(CONTROL_AWB_MODE, &[AwbMode::Auto.value()])?;
    acc.add(CONTROL_AWB_REGIONS, &regions)?;
    acc.add(CONTROL_AF_MODE, &[overrides.af_mode.value()])?;
    acc.add(CONTROL_AF_REGIONS, &regions)?;

    Ok(())
}

/// Build the default request for `kind` with an exact-fit allocation.
pub fn build_default_request(
    kind: TemplateKind,
    sensor: &SensorDescriptor,
    allocator: &dyn BufferAllocator,
) -> Result<MetadataBuffer> {
    let label = format!("request template {}", kind);
    build_two_phase(TagSchema::standard(), allocator, &label, |acc| {
        default_request_entries(acc, kind, sensor)
    })
}
