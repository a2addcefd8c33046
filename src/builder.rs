//! Two-phase size-then-fill construction
//!
//! A builder routine is written once as a sequence of [`Accumulator::add`]
//! calls. [`build_two_phase`] runs it twice: first against a [`Measure`]
//! accumulator that only totals entries and pool bytes, then against a
//! [`Write`] accumulator that appends into a buffer allocated to exactly those
//! totals. Both accumulators validate every call the same way, so a routine
//! that measures cleanly can only fail to write if it behaves differently on
//! the second run. Accumulators do not reveal which pass they belong to.
//!
//! ```rust
//! use shutter::builder::{Accumulator, build_two_phase};
//! use shutter::buffer::HeapAllocator;
//! use shutter::types::TagSchema;
//! use shutter::tags;
//!
//! let buffer = build_two_phase(TagSchema::standard(), &HeapAllocator, "example", |acc| {
//!     acc.add(tags::REQUEST_ID, &[7i32])?;
//!     acc.add(tags::JPEG_GPS_COORDINATES, &[51.5f64, -0.12, 11.0])?;
//!     Ok(())
//! })?;
//!
//! assert!(buffer.is_full());
//! assert_eq!(buffer.entry_count(), 2);
//! assert_eq!(buffer.data_count(), 24);
//! # Ok::<(), shutter::MetadataError>(())
//! ```

use std::collections::HashSet;

use tracing::{debug, error};

use crate::buffer::{BufferAllocator, MetadataBuffer};
use crate::types::{Tag, TagSchema, Values};
use crate::{MetadataError, Result};

/// Receiver for the entries a builder routine produces.
pub trait Accumulator {
    /// Account for (or store) one entry.
    fn accept(&mut self, tag: Tag, values: Values<'_>) -> Result<()>;
}

impl dyn Accumulator + '_ {
    /// Convenience wrapper over [`measure_or_write`] accepting any slice or
    /// array of a supported element type.
    pub fn add<'v>(&mut self, tag: Tag, values: impl Into<Values<'v>>) -> Result<()> {
        measure_or_write(self, tag, values.into())
    }
}

/// The single primitive every builder routine goes through.
pub fn measure_or_write(
    accumulator: &mut (dyn Accumulator + '_),
    tag: Tag,
    values: Values<'_>,
) -> Result<()> {
    accumulator.accept(tag, values)
}

/// Validates entries against the schema and totals their footprint.
#[derive(Debug)]
pub struct Measure<'s> {
    schema: &'s TagSchema,
    entry_count: usize,
    data_count: usize,
    seen: HashSet<Tag>,
}

impl<'s> Measure<'s> {
    pub fn new(schema: &'s TagSchema) -> Self {
        Self { schema, entry_count: 0, data_count: 0, seen: HashSet::new() }
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn data_count(&self) -> usize {
        self.data_count
    }
}

impl Accumulator for Measure<'_> {
    fn accept(&mut self, tag: Tag, values: Values<'_>) -> Result<()> {
        let declared = self.schema.value_type(tag)?;
        if declared != values.value_type() {
            return Err(MetadataError::TypeMismatch {
                tag,
                expected: declared,
                found: values.value_type(),
            });
        }
        if !self.seen.insert(tag) {
            return Err(MetadataError::DuplicateTag { tag });
        }
        self.entry_count += 1;
        self.data_count += declared.data_size(values.len());
        Ok(())
    }
}

/// Appends entries into a pre-sized buffer.
#[derive(Debug)]
pub struct Write<'s, 'b> {
    schema: &'s TagSchema,
    buffer: &'b mut MetadataBuffer,
}

impl<'s, 'b> Write<'s, 'b> {
    pub fn new(schema: &'s TagSchema, buffer: &'b mut MetadataBuffer) -> Self {
        Self { schema, buffer }
    }
}

impl Accumulator for Write<'_, '_> {
    fn accept(&mut self, tag: Tag, values: Values<'_>) -> Result<()> {
        self.buffer.append(self.schema, tag, values)
    }
}

/// Run `routine` in measuring mode, allocate exactly, then run it again in
/// writing mode.
///
/// `label` only appears in log output and in [`MetadataError::CapacityMismatch`].
/// Any failure aborts the build and no buffer is returned. The returned
/// buffer is always exactly full.
pub fn build_two_phase<F>(
    schema: &TagSchema,
    allocator: &dyn BufferAllocator,
    label: &str,
    mut routine: F,
) -> Result<MetadataBuffer>
where
    F: FnMut(&mut dyn Accumulator) -> Result<()>,
{
    let mut measure = Measure::new(schema);
    routine(&mut measure)?;

    let (entries, data_bytes) = (measure.entry_count(), measure.data_count());
    debug!("Allocating {} entries, {} extra bytes for {}", entries, data_bytes, label);

    let mut buffer = allocator.allocate(entries, data_bytes).inspect_err(|_| {
        error!(
            "Unable to allocate {} ({} entries, {} bytes extra data)",
            label, entries, data_bytes
        );
    })?;

    routine(&mut Write::new(schema, &mut buffer))?;

    let (unused_entries, unused_bytes) = buffer.unused_capacity();
    if unused_entries != 0 || unused_bytes != 0 {
        return Err(MetadataError::CapacityMismatch {
            label: label.to_string(),
            unused_entries,
            unused_bytes,
        });
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::HeapAllocator;
    use crate::error::Resource;
    use crate::tags;
    use crate::test_utils::FailingAllocator;

    fn schema() -> &'static TagSchema {
        TagSchema::standard()
    }

    #[test]
    fn measure_totals_match_written_footprint() {
        let mut measure = Measure::new(schema());
        let acc: &mut dyn Accumulator = &mut measure;
        acc.add(tags::JPEG_QUALITY, &[90u8]).unwrap();
        acc.add(tags::JPEG_GPS_PROCESSING_METHOD, &[0u8; 32]).unwrap();
        acc.add(tags::CONTROL_AE_REGIONS, &[0i32, 0, 1, 1, 1000]).unwrap();
        assert_eq!(measure.entry_count(), 3);
        assert_eq!(measure.data_count(), 32 + 24);
    }

    #[test]
    fn measure_rejects_what_write_would_reject() {
        let mut measure = Measure::new(schema());
        let acc: &mut dyn Accumulator = &mut measure;

        let err = acc.add(Tag(0x00ff_0000), &[1u8]).unwrap_err();
        assert!(matches!(err, MetadataError::InvalidTag { .. }));

        let err = acc.add(tags::LENS_APERTURE, &[2.8f64]).unwrap_err();
        assert!(matches!(err, MetadataError::TypeMismatch { .. }));

        acc.add(tags::LENS_APERTURE, &[2.8f32]).unwrap();
        let err = acc.add(tags::LENS_APERTURE, &[4.0f32]).unwrap_err();
        assert!(matches!(err, MetadataError::DuplicateTag { .. }));
    }

    #[test]
    fn build_produces_exactly_full_buffer() {
        let buffer = build_two_phase(schema(), &HeapAllocator, "test", |acc| {
            acc.add(tags::REQUEST_ID, &[1i32])?;
            acc.add(tags::SENSOR_TIMESTAMP, &[5i64])?;
            acc.add(tags::TONEMAP_CURVE_RED, &[0.5f32; 32])?;
            Ok(())
        })
        .unwrap();
        assert!(buffer.is_full());
        assert_eq!(buffer.entry_count(), 3);
        assert_eq!(buffer.data_count(), 8 + 128);
    }

    #[test]
    fn diverging_passes_overflow_on_write() {
        let mut runs = 0;
        let err = build_two_phase(schema(), &HeapAllocator, "divergent", |acc| {
            runs += 1;
            acc.add(tags::REQUEST_ID, &[1i32])?;
            if runs == 2 {
                acc.add(tags::REQUEST_FRAME_COUNT, &[0i32])?;
            }
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            MetadataError::CapacityExceeded { resource: Resource::Entries, .. }
        ));
        assert!(err.is_programming_defect());
    }

    #[test]
    fn diverging_passes_underfill_is_detected() {
        let mut runs = 0;
        let err = build_two_phase(schema(), &HeapAllocator, "short write", |acc| {
            runs += 1;
            acc.add(tags::REQUEST_ID, &[1i32])?;
            if runs == 1 {
                acc.add(tags::REQUEST_FRAME_COUNT, &[0i32])?;
            }
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            MetadataError::CapacityMismatch { unused_entries: 1, unused_bytes: 0, .. }
        ));
    }

    #[test]
    fn allocation_failure_aborts_the_build() {
        let mut runs = 0;
        let err = build_two_phase(schema(), &FailingAllocator, "doomed", |acc| {
            runs += 1;
            acc.add(tags::REQUEST_ID, &[1i32])
        })
        .unwrap_err();
        assert!(matches!(err, MetadataError::OutOfMemory { entries: 1, data_bytes: 0, .. }));
        assert_eq!(runs, 1);
    }

    #[test]
    fn routine_errors_propagate_from_either_pass() {
        let err = build_two_phase(schema(), &HeapAllocator, "bad tag", |acc| {
            acc.add(Tag::vendor(1, 1), &[1u8])
        })
        .unwrap_err();
        assert!(matches!(err, MetadataError::InvalidTag { .. }));
    }
}
