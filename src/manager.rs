//! Per-camera metadata manager
//!
//! [`MetadataManager`] ties the pieces together for one camera. It:
//!
//! - builds default request templates and the static capability buffer
//! - holds the most recently activated request
//! - answers typed queries against that request
//! - classifies it by request id
//! - stamps per-frame result metadata
//!
//! # Ownership
//!
//! The current request is an owned [`MetadataBuffer`]. [`MetadataManager::activate`]
//! deep-copies the caller's buffer first and only then drops the previous one,
//! so a failed copy leaves the old request in place. Reads borrow the manager,
//! which the borrow checker serialises against activation.

use std::sync::Arc;

use tracing::{debug, error, trace};

use crate::buffer::{BufferAllocator, EntryView, HeapAllocator, MetadataBuffer};
use crate::capabilities::build_static_capabilities;
use crate::classifier::{RequestCategory, RequestClassifier, RequestRanges};
use crate::clock::{MonotonicClock, TimestampSource};
use crate::config::DeviceConfig;
use crate::error::Resource;
use crate::formats;
use crate::sensor::SensorDescriptor;
use crate::tags;
use crate::templates::{TemplateKind, build_default_request};
use crate::types::{MetadataValue, Tag, TagSchema, ValueType};
use crate::{MetadataError, Result};

/// Entries in a per-frame result buffer.
pub const FRAME_METADATA_ENTRIES: usize = 3;

/// Pool bytes a per-frame result buffer needs: request id and frame count are
/// inline, the 8-byte sensor timestamp is pooled.
pub const fn frame_metadata_data_bytes() -> usize {
    ValueType::Int32.data_size(1) * 2 + ValueType::Int64.data_size(1)
}

/// Frame rates reported by [`MetadataManager::frame_rate`].
pub const HIGH_FRAME_RATE: i32 = 30;
pub const LOW_FRAME_RATE: i32 = 15;

/// Metadata state and queries for one camera.
#[derive(Debug)]
pub struct MetadataManager<A = HeapAllocator, C = MonotonicClock> {
    sensor: Arc<SensorDescriptor>,
    camera_id: u32,
    current: Option<MetadataBuffer>,
    classifier: RequestClassifier,
    allocator: A,
    clock: C,
}

impl MetadataManager {
    /// Manager with the heap allocator, a monotonic clock and default id ranges.
    pub fn new(sensor: impl Into<Arc<SensorDescriptor>>, camera_id: u32) -> Self {
        Self {
            sensor: sensor.into(),
            camera_id,
            current: None,
            classifier: RequestClassifier::default(),
            allocator: HeapAllocator,
            clock: MonotonicClock::new(),
        }
    }

    /// Manager for a validated device configuration.
    pub fn from_config(config: DeviceConfig) -> Result<Self> {
        config.validate()?;
        let DeviceConfig { camera_id, sensor, request_ranges } = config;
        Ok(Self::new(sensor, camera_id).with_request_ranges(request_ranges))
    }
}

impl<A: BufferAllocator, C: TimestampSource> MetadataManager<A, C> {
    /// Replace the buffer allocator used for building and activation.
    pub fn with_allocator<B: BufferAllocator>(self, allocator: B) -> MetadataManager<B, C> {
        MetadataManager {
            sensor: self.sensor,
            camera_id: self.camera_id,
            current: self.current,
            classifier: self.classifier,
            allocator,
            clock: self.clock,
        }
    }

    /// Replace the per-frame timestamp source.
    pub fn with_clock<D: TimestampSource>(self, clock: D) -> MetadataManager<A, D> {
        MetadataManager {
            sensor: self.sensor,
            camera_id: self.camera_id,
            current: self.current,
            classifier: self.classifier,
            allocator: self.allocator,
            clock,
        }
    }

    /// Replace the request id ranges. Ranges are fixed for the manager's
    /// lifetime once it is in use.
    pub fn with_request_ranges(mut self, ranges: RequestRanges) -> Self {
        self.classifier = RequestClassifier::new(ranges);
        self
    }

    pub fn camera_id(&self) -> u32 {
        self.camera_id
    }

    pub fn sensor(&self) -> &SensorDescriptor {
        &self.sensor
    }

    pub fn classifier(&self) -> &RequestClassifier {
        &self.classifier
    }

    /// Default request for `kind`.
    pub fn create_default_request(&self, kind: TemplateKind) -> Result<MetadataBuffer> {
        build_default_request(kind, &self.sensor, &self.allocator)
    }

    /// Static capability buffer for this camera.
    pub fn create_static_info(&self) -> Result<MetadataBuffer> {
        build_static_capabilities(&self.sensor, self.camera_id, &self.allocator)
    }

    /// Make a copy of `request` the current request.
    ///
    /// The previous request is released only after the copy succeeds. On
    /// failure it stays current and [`MetadataError::OutOfMemory`] is returned.
    pub fn activate(&mut self, request: &MetadataBuffer) -> Result<()> {
        let copy = request.clone_with(&self.allocator).inspect_err(|e| {
            error!("Unable to activate request ({} entries): {}", request.entry_count(), e);
        })?;
        trace!(
            "Activated request with {} entries, {} data bytes",
            copy.entry_count(),
            copy.data_count()
        );
        self.current = Some(copy);
        Ok(())
    }

    /// The current request, if one has been activated.
    pub fn current_request(&self) -> Option<&MetadataBuffer> {
        self.current.as_ref()
    }

    fn current(&self) -> Result<&MetadataBuffer> {
        self.current
            .as_ref()
            .ok_or_else(|| MetadataError::invalid_argument("no request has been activated"))
    }

    fn lookup(&self, tag: Tag) -> Result<EntryView<'_>> {
        self.current()?
            .find(tag)
            .inspect_err(|_| error!("Error reading {} from the current request", tag))
    }

    fn first<T: MetadataValue>(&self, tag: Tag) -> Result<T> {
        self.lookup(tag)?.get::<T>(0)
    }

    /// Coarse frame rate: 30 when both target FPS bounds exceed 15, else 15.
    pub fn frame_rate(&self) -> Result<i32> {
        let range = self.lookup(tags::CONTROL_AE_TARGET_FPS_RANGE)?;
        let min = range.get::<i32>(0)?;
        let max = range.get::<i32>(1)?;
        Ok(if min > LOW_FRAME_RATE && max > LOW_FRAME_RATE {
            HIGH_FRAME_RATE
        } else {
            LOW_FRAME_RATE
        })
    }

    /// Copy up to `out.len()` GPS coordinates, returning how many were copied.
    pub fn gps_coordinates(&self, out: &mut [f64]) -> Result<usize> {
        self.lookup(tags::JPEG_GPS_COORDINATES)?.copy_into(out)
    }

    pub fn gps_timestamp(&self) -> Result<i64> {
        self.first(tags::JPEG_GPS_TIMESTAMP)
    }

    /// Copy the GPS processing method into `out` and NUL-terminate it.
    ///
    /// At most `out.len() - 1` bytes are copied; the return value excludes
    /// the terminator.
    pub fn gps_processing_method(&self, out: &mut [u8]) -> Result<usize> {
        let entry = self.lookup(tags::JPEG_GPS_PROCESSING_METHOD)?;
        if out.is_empty() {
            return Err(MetadataError::invalid_argument(
                "zero-capacity destination for GPS processing method",
            ));
        }
        let source = entry.as_bytes();
        let copied = source.len().min(out.len() - 1);
        out[..copied].copy_from_slice(&source[..copied]);
        out[copied] = 0;
        Ok(copied)
    }

    pub fn jpeg_orientation(&self) -> Result<i32> {
        self.first(tags::JPEG_ORIENTATION)
    }

    pub fn jpeg_quality(&self) -> Result<i32> {
        Ok(i32::from(self.first::<u8>(tags::JPEG_QUALITY)?))
    }

    pub fn jpeg_thumbnail_quality(&self) -> Result<i32> {
        Ok(i32::from(self.first::<u8>(tags::JPEG_THUMBNAIL_QUALITY)?))
    }

    /// Thumbnail `(width, height)`.
    pub fn jpeg_thumbnail_size(&self) -> Result<(i32, i32)> {
        let size = self.lookup(tags::JPEG_THUMBNAIL_SIZE)?;
        Ok((size.get(0)?, size.get(1)?))
    }

    /// Borrowed view of the requested output stream ids.
    pub fn requested_output_streams(&self) -> Result<EntryView<'_>> {
        self.lookup(tags::REQUEST_OUTPUT_STREAMS)
    }

    /// Focal length of the lens. Device-fixed, so no request is needed.
    pub fn focal_length(&self) -> f32 {
        self.sensor.focal_length
    }

    /// Category of the current request, from its request id.
    pub fn request_category(&self) -> Result<RequestCategory> {
        let id = self.first::<i32>(tags::REQUEST_ID)?;
        self.classifier.classify(id).inspect_err(|_| {
            error!("Invalid request type id: {}", id);
        })
    }

    /// Encoder formats usable for recording, copied into `out`.
    pub fn supported_recording_formats(&self, out: &mut [i32]) -> Result<usize> {
        copy_formats(&formats::RECORDING_FORMATS, out)
    }

    /// Encoder formats usable for still pictures, copied into `out`.
    pub fn supported_picture_formats(&self, out: &mut [i32]) -> Result<usize> {
        copy_formats(&formats::PICTURE_FORMATS, out)
    }

    /// Write the per-frame result entries into `frame`.
    ///
    /// `frame` must have room for [`FRAME_METADATA_ENTRIES`] entries and
    /// [`frame_metadata_data_bytes`] pool bytes. Nothing is written unless all
    /// three entries fit.
    pub fn generate_frame_metadata(&self, frame: &mut MetadataBuffer) -> Result<()> {
        let schema = TagSchema::standard();
        let request_id = self.lookup(tags::REQUEST_ID)?;
        let request_id = request_id.to_vec::<i32>()?;

        for tag in [tags::REQUEST_ID, tags::REQUEST_FRAME_COUNT, tags::SENSOR_TIMESTAMP] {
            if frame.contains(tag) {
                return Err(MetadataError::DuplicateTag { tag });
            }
        }
        let needed_bytes = ValueType::Int32.data_size(request_id.len())
            + ValueType::Int32.data_size(1)
            + ValueType::Int64.data_size(1);
        let (free_entries, free_bytes) = frame.unused_capacity();
        if free_entries < FRAME_METADATA_ENTRIES {
            return Err(MetadataError::CapacityExceeded {
                tag: tags::REQUEST_ID,
                resource: Resource::Entries,
                needed: FRAME_METADATA_ENTRIES,
                available: free_entries,
            });
        }
        if free_bytes < needed_bytes {
            return Err(MetadataError::CapacityExceeded {
                tag: tags::REQUEST_ID,
                resource: Resource::DataBytes,
                needed: needed_bytes,
                available: free_bytes,
            });
        }
        let timestamp = self.clock.now_nanos();

        frame.append(schema, tags::REQUEST_ID, (&request_id).into())?;
        frame.append(schema, tags::REQUEST_FRAME_COUNT, (&[0i32]).into())?;
        frame.append(schema, tags::SENSOR_TIMESTAMP, (&[timestamp]).into())?;
        trace!("Frame metadata for request {:?} at {} ns", request_id, timestamp);
        Ok(())
    }

    /// Allocate an exactly sized buffer and fill it with the per-frame entries.
    pub fn frame_metadata(&self) -> Result<MetadataBuffer> {
        let mut frame =
            self.allocator.allocate(FRAME_METADATA_ENTRIES, frame_metadata_data_bytes())?;
        self.generate_frame_metadata(&mut frame)?;
        debug_assert!(frame.is_full());
        Ok(frame)
    }
}

fn copy_formats(source: &[i32], out: &mut [i32]) -> Result<usize> {
    if out.is_empty() {
        return Err(MetadataError::invalid_argument("zero-capacity format list"));
    }
    let copied = source.len().min(out.len());
    out[..copied].copy_from_slice(&source[..copied]);
    debug!("Reported {} supported formats", copied);
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{Accumulator, build_two_phase};
    use crate::clock::FixedClock;
    use crate::test_utils::{FailingAllocator, sample_sensor};

    fn manager() -> MetadataManager<HeapAllocator, FixedClock> {
        MetadataManager::new(sample_sensor(), 0).with_clock(FixedClock(987_654_321))
    }

    fn request_with(entries: impl Fn(&mut dyn Accumulator) -> Result<()>) -> MetadataBuffer {
        build_two_phase(TagSchema::standard(), &HeapAllocator, "test request", |acc| entries(acc))
            .unwrap()
    }

    #[test]
    fn queries_without_a_request_are_invalid() {
        let manager = manager();
        assert!(manager.current_request().is_none());
        assert!(matches!(manager.frame_rate(), Err(MetadataError::InvalidArgument { .. })));
        assert!(matches!(manager.request_category(), Err(MetadataError::InvalidArgument { .. })));
        assert_eq!(manager.focal_length(), sample_sensor().focal_length);
    }

    #[test]
    fn frame_rate_is_binary() {
        let mut manager = manager();
        for (range, expected) in [([30i32, 30], 30), ([15, 15], 15), ([10, 30], 15), ([16, 60], 30)] {
            let request = request_with(|acc| acc.add(tags::CONTROL_AE_TARGET_FPS_RANGE, &range));
            manager.activate(&request).unwrap();
            assert_eq!(manager.frame_rate().unwrap(), expected, "{:?}", range);
        }
    }

    #[test]
    fn short_fps_range_is_malformed() {
        let mut manager = manager();
        let request = request_with(|acc| acc.add(tags::CONTROL_AE_TARGET_FPS_RANGE, &[30i32]));
        manager.activate(&request).unwrap();
        assert!(matches!(manager.frame_rate(), Err(MetadataError::Malformed { .. })));
    }

    #[test]
    fn processing_method_is_nul_terminated_within_capacity() {
        let mut manager = manager();
        let request = manager.create_default_request(TemplateKind::StillCapture).unwrap();
        manager.activate(&request).unwrap();

        let mut small = [0xffu8; 3];
        assert_eq!(manager.gps_processing_method(&mut small).unwrap(), 2);
        assert_eq!(small, [b'N', b'o', 0]);

        let mut large = [0xffu8; 64];
        assert_eq!(manager.gps_processing_method(&mut large).unwrap(), 32);
        assert_eq!(&large[..5], b"None\0");
        assert_eq!(large[32], 0);
        assert_eq!(large[33], 0xff);

        assert!(matches!(
            manager.gps_processing_method(&mut []),
            Err(MetadataError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn format_lists_copy_up_to_capacity() {
        let manager = manager();
        let mut one = [0i32; 1];
        assert_eq!(manager.supported_recording_formats(&mut one).unwrap(), 1);
        assert_eq!(one, [formats::YCBCR_420_SP]);

        let mut four = [0i32; 4];
        assert_eq!(manager.supported_picture_formats(&mut four).unwrap(), 2);
        assert_eq!(four, [formats::YCBCR_420_SP, formats::YCBCR_422_I, 0, 0]);

        assert!(manager.supported_recording_formats(&mut []).is_err());
    }

    #[test]
    fn output_streams_view_borrows_the_current_request() {
        let mut manager = manager();
        let request = request_with(|acc| acc.add(tags::REQUEST_OUTPUT_STREAMS, &[0i32, 2]));
        manager.activate(&request).unwrap();

        let streams = manager.requested_output_streams().unwrap();
        assert_eq!(streams.to_vec::<i32>().unwrap(), vec![0, 2]);
        let held = manager.current_request().unwrap();
        assert!(std::ptr::eq(
            streams.as_bytes().as_ptr(),
            held.find(tags::REQUEST_OUTPUT_STREAMS).unwrap().as_bytes().as_ptr()
        ));
    }

    #[test]
    fn frame_metadata_copies_id_and_stamps_time() {
        let mut manager = manager();
        let request = request_with(|acc| acc.add(tags::REQUEST_ID, &[20_000_042i32]));
        manager.activate(&request).unwrap();

        let frame = manager.frame_metadata().unwrap();
        assert!(frame.is_full());
        assert_eq!(frame.entry_count(), FRAME_METADATA_ENTRIES);
        assert_eq!(frame.data_count(), 8);
        assert_eq!(frame.find(tags::REQUEST_ID).unwrap().get::<i32>(0).unwrap(), 20_000_042);
        assert_eq!(frame.find(tags::REQUEST_FRAME_COUNT).unwrap().get::<i32>(0).unwrap(), 0);
        assert_eq!(
            frame.find(tags::SENSOR_TIMESTAMP).unwrap().get::<i64>(0).unwrap(),
            987_654_321
        );
        assert_eq!(manager.request_category().unwrap(), RequestCategory::Recording);
    }

    #[test]
    fn undersized_frame_buffer_overflows() {
        let mut manager = manager();
        let request = request_with(|acc| acc.add(tags::REQUEST_ID, &[1i32]));
        manager.activate(&request).unwrap();

        let mut frame = MetadataBuffer::with_capacity(FRAME_METADATA_ENTRIES, 0).unwrap();
        let err = manager.generate_frame_metadata(&mut frame).unwrap_err();
        assert!(matches!(
            err,
            MetadataError::CapacityExceeded { resource: Resource::DataBytes, needed: 8, available: 0, .. }
        ));
        assert!(frame.is_empty());

        let mut frame = MetadataBuffer::with_capacity(2, 8).unwrap();
        let err = manager.generate_frame_metadata(&mut frame).unwrap_err();
        assert!(matches!(err, MetadataError::CapacityExceeded { resource: Resource::Entries, .. }));
        assert!(frame.is_empty());
    }

    #[test]
    fn frame_already_holding_an_entry_is_left_alone() {
        let mut manager = manager();
        let request = request_with(|acc| acc.add(tags::REQUEST_ID, &[1i32]));
        manager.activate(&request).unwrap();

        let mut frame = MetadataBuffer::with_capacity(FRAME_METADATA_ENTRIES + 1, 8).unwrap();
        frame.append(TagSchema::standard(), tags::SENSOR_TIMESTAMP, (&[5i64]).into()).unwrap();
        let err = manager.generate_frame_metadata(&mut frame).unwrap_err();
        assert!(matches!(err, MetadataError::DuplicateTag { .. }));
        assert_eq!(frame.entry_count(), 1);
    }

    #[test]
    fn failed_activation_keeps_previous_request() {
        let mut manager = manager();
        let first = manager.create_default_request(TemplateKind::Preview).unwrap();
        manager.activate(&first).unwrap();
        let before = manager.current_request().unwrap().entries.as_ptr();

        let mut manager = manager.with_allocator(FailingAllocator);
        let second = request_with(|acc| acc.add(tags::REQUEST_ID, &[30_000_000i32]));
        let err = manager.activate(&second).unwrap_err();

        assert!(matches!(err, MetadataError::OutOfMemory { .. }));
        let after = manager.current_request().unwrap();
        assert_eq!(after, &first);
        assert_eq!(after.entries.as_ptr(), before);
    }
}
