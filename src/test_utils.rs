//! Shared fixtures for unit tests and benchmarks
//!
//! Compiled only for tests or with the `benchmark` feature.

#![cfg(any(test, feature = "benchmark"))]

use crate::buffer::{BufferAllocator, MetadataBuffer};
use crate::formats;
use crate::sensor::SensorDescriptor;
use crate::{MetadataError, Result};

/// YAML for a 5 MP front camera. Must stay in sync with [`sample_sensor`].
pub const SAMPLE_DEVICE_YAML: &str = "\
camera_id: 1
sensor:
  focal_length: 3.37
  physical_width: 3.6288
  physical_height: 2.7216
  max_width: 2592
  max_height: 1944
  picture_resolutions: [2592, 1944, 1920, 1080, 1280, 720, 640, 480]
  preview_resolutions: [1280, 720, 640, 480, 320, 240]
  available_formats: [258, 257, 20, 33]
  min_frame_duration: 33331760
  max_frame_duration: 300000000
  target_fps_range: [15, 30]
";

/// The sensor described by [`SAMPLE_DEVICE_YAML`].
pub fn sample_sensor() -> SensorDescriptor {
    SensorDescriptor {
        focal_length: 3.37,
        physical_width: 3.6288,
        physical_height: 2.7216,
        max_width: 2592,
        max_height: 1944,
        picture_resolutions: vec![2592, 1944, 1920, 1080, 1280, 720, 640, 480],
        preview_resolutions: vec![1280, 720, 640, 480, 320, 240],
        available_formats: vec![
            formats::YCBCR_420_SP,
            formats::YCBCR_420_P,
            formats::YCBCR_422_I,
            formats::BLOB,
        ],
        min_frame_duration: 33_331_760,
        max_frame_duration: 300_000_000,
        target_fps_range: [15, 30],
    }
}

/// Allocator that always reports exhaustion.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingAllocator;

impl BufferAllocator for FailingAllocator {
    fn allocate(&self, entry_capacity: usize, data_capacity: usize) -> Result<MetadataBuffer> {
        Err(MetadataError::OutOfMemory {
            entries: entry_capacity,
            data_bytes: data_capacity,
            source: None,
        })
    }
}
