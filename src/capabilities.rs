//! Static capability descriptor
//!
//! The per-device buffer advertising what the camera supports. Most values
//! are fixed for this hardware family; sizes, formats, durations and the FPS
//! range are copied from the [`SensorDescriptor`].

use tracing::debug;

use crate::buffer::{BufferAllocator, MetadataBuffer};
use crate::builder::{Accumulator, build_two_phase};
use crate::sensor::SensorDescriptor;
use crate::tags::*;
use crate::types::modes::*;
use crate::types::{Rational, TagSchema};
use crate::Result;

pub const AVAILABLE_THUMBNAIL_SIZES: [i32; 6] = [96, 96, 160, 120, 0, 0];
pub const JPEG_MAX_SIZE_BYTES: i32 = 8 * 1024 * 1024;
pub const TONEMAP_MAX_CURVE_POINTS_VALUE: i32 = 128;
pub const MAX_DIGITAL_ZOOM: f32 = 4.0;
pub const AE_COMPENSATION_RANGE: [i32; 2] = [-3, 3];
pub const AE_COMPENSATION_STEP: Rational = Rational::new(1, 1);

const HISTOGRAM_BUCKET_COUNT: i32 = 64;
const MAX_HISTOGRAM_COUNT: i32 = 1000;
const SHARPNESS_MAP_SIZE: [i32; 2] = [64, 64];
const MAX_SHARPNESS_MAP_VALUE: i32 = 1000;

/// Which way the lens faces for a given camera id.
///
/// Odd ids face the user, even ids face away.
pub const fn lens_facing(camera_id: u32) -> LensFacing {
    if camera_id % 2 == 1 { LensFacing::Front } else { LensFacing::Back }
}

/// Emit every static capability entry.
pub fn static_capability_entries(
    acc: &mut dyn Accumulator,
    sensor: &SensorDescriptor,
    camera_id: u32,
) -> Result<()> {
    let pixel_array = sensor.pixel_array();

    // android.lens
    acc.add(LENS_INFO_MINIMUM_FOCUS_DISTANCE, &[0.0f32])?;
    acc.add(LENS_INFO_HYPERFOCAL_DISTANCE, &[0.0f32])?;
    acc.add(LENS_INFO_AVAILABLE_FOCAL_LENGTHS, &[sensor.focal_length])?;
    acc.add(LENS_INFO_AVAILABLE_APERTURES, &[crate::templates::DEFAULT_APERTURE])?;
    acc.add(LENS_INFO_AVAILABLE_FILTER_DENSITIES, &[0.0f32])?;
    acc.add(LENS_INFO_AVAILABLE_OPTICAL_STABILIZATION, &[OpticalStabilizationMode::Off.value()])?;
    acc.add(LENS_INFO_SHADING_MAP_SIZE, &[1i32, 1])?;
    acc.add(LENS_INFO_SHADING_MAP, &[1.0f32, 1.0, 1.0])?;
    acc.add(LENS_FACING, &[lens_facing(camera_id).value()])?;

    // android.sensor
    acc.add(SENSOR_INFO_PHYSICAL_SIZE, &[sensor.physical_width, sensor.physical_height])?;
    acc.add(SENSOR_INFO_PIXEL_ARRAY_SIZE, &pixel_array)?;
    acc.add(SENSOR_INFO_ACTIVE_ARRAY_SIZE, &pixel_array)?;

    // android.flash
    acc.add(FLASH_INFO_AVAILABLE, &[0u8])?;
    acc.add(FLASH_INFO_CHARGE_DURATION, &[0i64])?;

    // android.tonemap
    acc.add(TONEMAP_MAX_CURVE_POINTS, &[TONEMAP_MAX_CURVE_POINTS_VALUE])?;

    // android.scaler
    let min_duration = [sensor.min_frame_duration];
    acc.add(SCALER_AVAILABLE_FORMATS, &sensor.available_formats)?;
    acc.add(SCALER_AVAILABLE_RAW_SIZES, &pixel_array)?;
    acc.add(SCALER_AVAILABLE_RAW_MIN_DURATIONS, &min_duration)?;
    acc.add(SCALER_AVAILABLE_PROCESSED_SIZES, &sensor.preview_resolutions)?;
    acc.add(SCALER_AVAILABLE_JPEG_SIZES, &sensor.picture_resolutions)?;
    acc.add(SCALER_AVAILABLE_PROCESSED_MIN_DURATIONS, &min_duration)?;
    acc.add(SCALER_AVAILABLE_JPEG_MIN_DURATIONS, &min_duration)?;
    acc.add(SCALER_AVAILABLE_MAX_DIGITAL_ZOOM, &[MAX_DIGITAL_ZOOM])?;

    // android.jpeg
    acc.add(JPEG_AVAILABLE_THUMBNAIL_SIZES, &AVAILABLE_THUMBNAIL_SIZES)?;
    acc.add(JPEG_MAX_SIZE, &[JPEG_MAX_SIZE_BYTES])?;

    // android.statistics
    acc.add(STATISTICS_INFO_AVAILABLE_FACE_DETECT_MODES, &[FaceDetectMode::Off.value()])?;
    acc.add(STATISTICS_INFO_MAX_FACE_COUNT, &[0i32])?;
    acc.add(STATISTICS_INFO_HISTOGRAM_BUCKET_COUNT, &[HISTOGRAM_BUCKET_COUNT])?;
    acc.add(STATISTICS_INFO_MAX_HISTOGRAM_COUNT, &[MAX_HISTOGRAM_COUNT])?;
    acc.add(STATISTICS_INFO_SHARPNESS_MAP_SIZE, &SHARPNESS_MAP_SIZE)?;
    acc.add(STATISTICS_INFO_MAX_SHARPNESS_MAP_VALUE, &[MAX_SHARPNESS_MAP_VALUE])?;

    // android.control
    acc.add(
        CONTROL_AVAILABLE_SCENE_MODES,
        &[SceneMode::Portrait.value(), SceneMode::Landscape.value()],
    )?;
    acc.add(CONTROL_AVAILABLE_EFFECTS, &[EffectMode::Off.value()])?;
    acc.add(CONTROL_MAX_REGIONS, &[0i32])?;
    acc.add(CONTROL_AE_AVAILABLE_MODES, &[AeMode::Off.value(), AeMode::On.value()])?;
    acc.add(CONTROL_AE_COMPENSATION_STEP, &[AE_COMPENSATION_STEP])?;
    acc.add(CONTROL_AE_COMPENSATION_RANGE, &AE_COMPENSATION_RANGE)?;
    acc.add(CONTROL_AE_AVAILABLE_TARGET_FPS_RANGES, &sensor.target_fps_range)?;
    acc.add(
        CONTROL_AE_AVAILABLE_ANTIBANDING_MODES,
        &[AeAntibandingMode::Off.value(), AeAntibandingMode::Auto.value()],
    )?;
    acc.add(CONTROL_AWB_AVAILABLE_MODES, &[AwbMode::Off.value(), AwbMode::Auto.value()])?;
    acc.add(CONTROL_AF_AVAILABLE_MODES, &[AfMode::Off.value()])?;
    acc.add(
        CONTROL_AVAILABLE_VIDEO_STABILIZATION_MODES,
        &[VideoStabilizationMode::Off.value()],
    )?;

    // android.quirks
    acc.add(QUIRKS_TRIGGER_AF_WITH_AUTO, &[1u8])?;
    acc.add(QUIRKS_USE_ZSL_FORMAT, &[1u8])?;

    Ok(())
}

/// Build the static capability buffer for `camera_id`.
///
/// Fails with [`crate::MetadataError::InvalidArgument`] when the descriptor
/// does not validate.
pub fn build_static_capabilities(
    sensor: &SensorDescriptor,
    camera_id: u32,
    allocator: &dyn BufferAllocator,
) -> Result<MetadataBuffer> {
    sensor.validate()?;
    debug!(
        "Building static info for camera {} ({} formats, {} still sizes)",
        camera_id,
        sensor.available_formats.len(),
        sensor.picture_resolutions.len() / 2
    );
    build_two_phase(TagSchema::standard(), allocator, "static camera info", |acc| {
        static_capability_entries(acc, sensor, camera_id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetadataError;
    use crate::buffer::HeapAllocator;
    use crate::test_utils::{FailingAllocator, sample_sensor};

    #[test]
    fn facing_follows_id_parity() {
        assert_eq!(lens_facing(0), LensFacing::Back);
        assert_eq!(lens_facing(1), LensFacing::Front);
        assert_eq!(lens_facing(2), LensFacing::Back);
        assert_eq!(lens_facing(7), LensFacing::Front);
    }

    #[test]
    fn sensor_values_are_copied_in() {
        let sensor = sample_sensor();
        let info = build_static_capabilities(&sensor, 0, &HeapAllocator).unwrap();

        assert!(info.is_full());
        assert_eq!(
            info.find(SCALER_AVAILABLE_JPEG_SIZES).unwrap().to_vec::<i32>().unwrap(),
            sensor.picture_resolutions
        );
        assert_eq!(
            info.find(SCALER_AVAILABLE_PROCESSED_SIZES).unwrap().to_vec::<i32>().unwrap(),
            sensor.preview_resolutions
        );
        assert_eq!(
            info.find(SCALER_AVAILABLE_FORMATS).unwrap().to_vec::<i32>().unwrap(),
            sensor.available_formats
        );
        assert_eq!(
            info.find(SENSOR_INFO_ACTIVE_ARRAY_SIZE).unwrap().to_vec::<i32>().unwrap(),
            vec![sensor.max_width, sensor.max_height]
        );
        assert_eq!(
            info.find(SCALER_AVAILABLE_JPEG_MIN_DURATIONS).unwrap().get::<i64>(0).unwrap(),
            sensor.min_frame_duration
        );
        assert_eq!(
            info.find(LENS_FACING).unwrap().get::<u8>(0).unwrap(),
            LensFacing::Back.value()
        );
    }

    #[test]
    fn fixed_limits() {
        let info = build_static_capabilities(&sample_sensor(), 1, &HeapAllocator).unwrap();
        assert_eq!(
            info.find(CONTROL_AE_COMPENSATION_STEP).unwrap().get::<Rational>(0).unwrap(),
            Rational::new(1, 1)
        );
        assert_eq!(info.find(JPEG_MAX_SIZE).unwrap().get::<i32>(0).unwrap(), 8 * 1024 * 1024);
        assert_eq!(
            info.find(JPEG_AVAILABLE_THUMBNAIL_SIZES).unwrap().to_vec::<i32>().unwrap(),
            vec![96, 96, 160, 120, 0, 0]
        );
        assert!(!info.contains(QUIRKS_METERING_CROP_REGION));
    }

    #[test]
    fn invalid_descriptor_is_rejected_before_allocation() {
        let mut sensor = sample_sensor();
        sensor.picture_resolutions.clear();
        let err = build_static_capabilities(&sensor, 0, &FailingAllocator).unwrap_err();
        assert!(matches!(err, MetadataError::InvalidArgument { .. }));
    }

    #[test]
    fn allocation_failure_is_reported() {
        let err = build_static_capabilities(&sample_sensor(), 0, &FailingAllocator).unwrap_err();
        assert!(matches!(err, MetadataError::OutOfMemory { .. }));
    }
}
