//! Pixel format codes advertised through `android.scaler.availableFormats`
//!
//! Values below `0x100` are the platform HAL codes. The planar and
//! semi-planar 4:2:0 codes above it are vendor extensions used by the
//! hardware video encoder.

pub const RGBA_8888: i32 = 0x1;
pub const RGBX_8888: i32 = 0x2;
pub const RGB_888: i32 = 0x3;
pub const RGB_565: i32 = 0x4;
pub const BGRA_8888: i32 = 0x5;
/// NV16
pub const YCBCR_422_SP: i32 = 0x10;
/// NV21
pub const YCRCB_420_SP: i32 = 0x11;
/// YUYV
pub const YCBCR_422_I: i32 = 0x14;
pub const RAW_SENSOR: i32 = 0x20;
/// Compressed stream such as JPEG
pub const BLOB: i32 = 0x21;
pub const IMPLEMENTATION_DEFINED: i32 = 0x22;
pub const YV12: i32 = 0x3231_5659;

pub const YCBCR_422_P: i32 = 0x100;
/// I420
pub const YCBCR_420_P: i32 = 0x101;
/// NV12
pub const YCBCR_420_SP: i32 = 0x102;

/// Formats the video encoder accepts, in order of preference.
pub const RECORDING_FORMATS: [i32; 2] = [YCBCR_420_SP, YCBCR_420_P];

/// Formats the still-picture encoder accepts, in order of preference.
pub const PICTURE_FORMATS: [i32; 2] = [YCBCR_420_SP, YCBCR_422_I];

/// Short human-readable name for logging.
pub fn name(format: i32) -> Option<&'static str> {
    Some(match format {
        RGBA_8888 => "RGBA_8888",
        RGBX_8888 => "RGBX_8888",
        RGB_888 => "RGB_888",
        RGB_565 => "RGB_565",
        BGRA_8888 => "BGRA_8888",
        YCBCR_422_SP => "NV16",
        YCRCB_420_SP => "NV21",
        YCBCR_422_I => "YUYV",
        RAW_SENSOR => "RAW_SENSOR",
        BLOB => "BLOB",
        IMPLEMENTATION_DEFINED => "IMPLEMENTATION_DEFINED",
        YV12 => "YV12",
        YCBCR_422_P => "YUV422P",
        YCBCR_420_P => "I420",
        YCBCR_420_SP => "NV12",
        _ => return None,
    })
}
