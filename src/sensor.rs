//! Sensor descriptor
//!
//! Read-only description of the image sensor supplied by the device layer.
//! Factories copy values out of it; no buffer keeps a reference.

use serde::{Deserialize, Serialize};

use crate::{MetadataError, Result};

/// Static properties of one image sensor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorDescriptor {
    /// Lens focal length in millimetres
    pub focal_length: f32,
    /// Physical sensor width in millimetres
    pub physical_width: f32,
    /// Physical sensor height in millimetres
    pub physical_height: f32,
    /// Pixel array width
    pub max_width: i32,
    /// Pixel array height
    pub max_height: i32,
    /// Still capture resolutions, flattened `[w, h, w, h, ...]`
    pub picture_resolutions: Vec<i32>,
    /// Preview resolutions, flattened `[w, h, w, h, ...]`
    pub preview_resolutions: Vec<i32>,
    /// Pixel format codes (see [`crate::formats`])
    pub available_formats: Vec<i32>,
    /// Shortest frame duration in nanoseconds
    pub min_frame_duration: i64,
    /// Longest frame duration in nanoseconds
    pub max_frame_duration: i64,
    /// Target frame rate range `[min, max]`
    pub target_fps_range: [i32; 2],
}

impl SensorDescriptor {
    /// Pixel array size as `[width, height]`.
    pub fn pixel_array(&self) -> [i32; 2] {
        [self.max_width, self.max_height]
    }

    /// Check the descriptor is usable for building capabilities.
    pub fn validate(&self) -> Result<()> {
        if !(self.focal_length.is_finite() && self.focal_length > 0.0) {
            return Err(MetadataError::invalid_argument(format!(
                "focal length must be positive, got {}",
                self.focal_length
            )));
        }
        if self.max_width <= 0 || self.max_height <= 0 {
            return Err(MetadataError::invalid_argument(format!(
                "pixel array {}x{} is empty",
                self.max_width, self.max_height
            )));
        }
        if self.available_formats.is_empty() {
            return Err(MetadataError::invalid_argument("sensor advertises no pixel formats"));
        }
        for (name, list) in [
            ("picture", &self.picture_resolutions),
            ("preview", &self.preview_resolutions),
        ] {
            if list.is_empty() || list.len() % 2 != 0 {
                return Err(MetadataError::invalid_argument(format!(
                    "{} resolutions must be non-empty width/height pairs, got {} values",
                    name,
                    list.len()
                )));
            }
        }
        if self.min_frame_duration <= 0 || self.min_frame_duration > self.max_frame_duration {
            return Err(MetadataError::invalid_argument(format!(
                "frame duration bounds {}..{} ns are inverted or empty",
                self.min_frame_duration, self.max_frame_duration
            )));
        }
        let [min_fps, max_fps] = self.target_fps_range;
        if min_fps <= 0 || min_fps > max_fps {
            return Err(MetadataError::invalid_argument(format!(
                "target fps range [{}, {}] is invalid",
                min_fps, max_fps
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_sensor;

    #[test]
    fn sample_descriptor_is_valid() {
        sample_sensor().validate().unwrap();
        assert_eq!(sample_sensor().pixel_array(), [2592, 1944]);
    }

    #[test]
    fn odd_resolution_list_is_rejected() {
        let mut sensor = sample_sensor();
        sensor.preview_resolutions.push(320);
        let err = sensor.validate().unwrap_err();
        assert!(err.to_string().contains("preview"));
    }

    #[test]
    fn empty_format_list_is_rejected() {
        let mut sensor = sample_sensor();
        sensor.available_formats.clear();
        assert!(matches!(sensor.validate(), Err(MetadataError::InvalidArgument { .. })));
    }

    #[test]
    fn inverted_fps_range_is_rejected() {
        let mut sensor = sample_sensor();
        sensor.target_fps_range = [30, 15];
        assert!(sensor.validate().is_err());
    }
}
