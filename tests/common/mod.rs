//! Fixtures shared by the integration tests

#![allow(dead_code)]

use shutter::{BufferAllocator, MetadataBuffer, MetadataError, SensorDescriptor, formats};

pub fn sensor() -> SensorDescriptor {
    SensorDescriptor {
        focal_length: 3.37,
        physical_width: 3.6288,
        physical_height: 2.7216,
        max_width: 2592,
        max_height: 1944,
        picture_resolutions: vec![2592, 1944, 1920, 1080, 1280, 720],
        preview_resolutions: vec![1280, 720, 640, 480],
        available_formats: vec![formats::YCBCR_420_SP, formats::YCBCR_422_I, formats::BLOB],
        min_frame_duration: 33_331_760,
        max_frame_duration: 300_000_000,
        target_fps_range: [15, 30],
    }
}

/// Allocator that refuses every request.
#[derive(Debug)]
pub struct ExhaustedAllocator;

impl BufferAllocator for ExhaustedAllocator {
    fn allocate(&self, entries: usize, data_bytes: usize) -> shutter::Result<MetadataBuffer> {
        Err(MetadataError::OutOfMemory { entries, data_bytes, source: None })
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}
