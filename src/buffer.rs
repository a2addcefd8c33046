//! Fixed-capacity metadata buffer
//!
//! A [`MetadataBuffer`] is allocated once with an exact entry and data-pool
//! capacity and then populated in place. It never grows: appending beyond the
//! reserved space fails with [`MetadataError::CapacityExceeded`].
//!
//! Entry payloads of at most [`INLINE_CAPACITY`] bytes are stored inside the
//! entry record. Larger payloads are appended to the pool, each starting on a
//! [`DATA_ALIGNMENT`] boundary, and the entry records their offset.

use tracing::trace;

use crate::error::Resource;
use crate::types::{INLINE_CAPACITY, MetadataValue, Tag, TagSchema, ValueType, Values};
use crate::{MetadataError, Result};

/// Where an entry's payload lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Payload {
    Inline([u8; INLINE_CAPACITY]),
    Pooled { offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EntryRecord {
    pub(crate) tag: Tag,
    pub(crate) value_type: ValueType,
    pub(crate) count: usize,
    pub(crate) payload: Payload,
}

impl EntryRecord {
    pub(crate) fn payload_len(&self) -> usize {
        self.value_type.size() * self.count
    }
}

/// Exclusively owned container of tagged metadata entries.
///
/// Entries keep insertion order and tags are unique. The buffer does not
/// implement `Clone`: copies go through [`MetadataBuffer::clone_with`] so that
/// allocation failure is reported instead of aborting.
#[derive(Debug, PartialEq)]
pub struct MetadataBuffer {
    pub(crate) entries: Vec<EntryRecord>,
    pub(crate) data: Vec<u8>,
    pub(crate) entry_capacity: usize,
    pub(crate) data_capacity: usize,
}

impl MetadataBuffer {
    /// Allocate an empty buffer with exactly the given capacities.
    pub fn with_capacity(entry_capacity: usize, data_capacity: usize) -> Result<Self> {
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(entry_capacity)
            .map_err(|e| MetadataError::out_of_memory(entry_capacity, data_capacity, e))?;

        let mut data = Vec::new();
        data.try_reserve_exact(data_capacity)
            .map_err(|e| MetadataError::out_of_memory(entry_capacity, data_capacity, e))?;

        Ok(Self { entries, data, entry_capacity, data_capacity })
    }

    /// Number of entries present.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Pool bytes consumed.
    pub fn data_count(&self) -> usize {
        self.data.len()
    }

    pub fn entry_capacity(&self) -> usize {
        self.entry_capacity
    }

    pub fn data_capacity(&self) -> usize {
        self.data_capacity
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reserved but unused (entries, pool bytes).
    pub fn unused_capacity(&self) -> (usize, usize) {
        (self.entry_capacity - self.entries.len(), self.data_capacity - self.data.len())
    }

    /// Whether every reserved entry slot and pool byte is in use.
    pub fn is_full(&self) -> bool {
        self.unused_capacity() == (0, 0)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.entries.iter().any(|entry| entry.tag == tag)
    }

    /// Look up the entry for `tag`.
    pub fn find(&self, tag: Tag) -> Result<EntryView<'_>> {
        self.entries
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| self.view(entry))
            .ok_or(MetadataError::TagNotFound { tag })
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = EntryView<'_>> + '_ {
        self.entries.iter().map(|entry| self.view(entry))
    }

    fn view<'a>(&'a self, entry: &'a EntryRecord) -> EntryView<'a> {
        let len = entry.payload_len();
        let bytes = match &entry.payload {
            Payload::Inline(inline) => &inline[..len],
            Payload::Pooled { offset } => &self.data[*offset..*offset + len],
        };
        EntryView { tag: entry.tag, value_type: entry.value_type, count: entry.count, bytes }
    }

    /// Append an entry, checking it against `schema` and the reserved capacity.
    ///
    /// On error the buffer is left unchanged.
    pub fn append(&mut self, schema: &TagSchema, tag: Tag, values: Values<'_>) -> Result<()> {
        let declared = schema.value_type(tag)?;
        if declared != values.value_type() {
            return Err(MetadataError::TypeMismatch {
                tag,
                expected: declared,
                found: values.value_type(),
            });
        }
        if self.contains(tag) {
            return Err(MetadataError::DuplicateTag { tag });
        }
        if self.entries.len() >= self.entry_capacity {
            return Err(MetadataError::CapacityExceeded {
                tag,
                resource: Resource::Entries,
                needed: self.entries.len() + 1,
                available: self.entry_capacity,
            });
        }

        let count = values.len();
        let data_size = declared.data_size(count);
        let available = self.data_capacity - self.data.len();
        if data_size > available {
            return Err(MetadataError::CapacityExceeded {
                tag,
                resource: Resource::DataBytes,
                needed: data_size,
                available,
            });
        }

        let payload_len = declared.size() * count;
        let payload = if data_size == 0 {
            let mut inline = [0u8; INLINE_CAPACITY];
            values.encode_into(&mut inline[..payload_len]);
            Payload::Inline(inline)
        } else {
            let offset = self.data.len();
            // Stays within the reserved capacity, so this never reallocates.
            self.data.resize(offset + data_size, 0);
            values.encode_into(&mut self.data[offset..offset + payload_len]);
            Payload::Pooled { offset }
        };

        trace!("Appended {} ({} x {:?}, {} pool bytes)", tag, count, declared, data_size);
        self.entries.push(EntryRecord { tag, value_type: declared, count, payload });
        Ok(())
    }

    /// Deep copy into a buffer obtained from `allocator`, preserving capacities.
    pub fn clone_with(&self, allocator: &dyn BufferAllocator) -> Result<Self> {
        let mut copy = allocator.allocate(self.entry_capacity, self.data_capacity)?;
        if copy.entry_capacity < self.entries.len() || copy.data_capacity < self.data.len() {
            return Err(MetadataError::invalid_argument(
                "allocator returned a buffer smaller than requested",
            ));
        }
        copy.entries.extend_from_slice(&self.entries);
        copy.data.extend_from_slice(&self.data);
        Ok(copy)
    }

    /// Deep copy using the heap allocator.
    pub fn try_clone(&self) -> Result<Self> {
        self.clone_with(&HeapAllocator)
    }
}

/// Borrowed view of one entry. Reading through it copies nothing until asked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryView<'a> {
    tag: Tag,
    value_type: ValueType,
    count: usize,
    bytes: &'a [u8],
}

impl<'a> EntryView<'a> {
    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Raw little-endian payload.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    fn check_type<T: MetadataValue>(&self) -> Result<()> {
        if T::VALUE_TYPE != self.value_type {
            return Err(MetadataError::TypeMismatch {
                tag: self.tag,
                expected: self.value_type,
                found: T::VALUE_TYPE,
            });
        }
        Ok(())
    }

    /// Element at `index`.
    pub fn get<T: MetadataValue>(&self, index: usize) -> Result<T> {
        self.check_type::<T>()?;
        if index >= self.count {
            return Err(MetadataError::malformed(
                self.tag.to_string(),
                format!("element {} requested but entry holds {}", index, self.count),
            ));
        }
        let size = self.value_type.size();
        Ok(T::read_le(&self.bytes[index * size..(index + 1) * size]))
    }

    /// Typed iterator over all elements.
    pub fn iter<T: MetadataValue>(&self) -> Result<impl Iterator<Item = T> + 'a> {
        self.check_type::<T>()?;
        Ok(self.bytes.chunks_exact(self.value_type.size()).map(T::read_le))
    }

    /// All elements as an owned vector.
    pub fn to_vec<T: MetadataValue>(&self) -> Result<Vec<T>> {
        Ok(self.iter::<T>()?.collect())
    }

    /// Copy up to `out.len()` elements into `out`, returning how many were copied.
    pub fn copy_into<T: MetadataValue>(&self, out: &mut [T]) -> Result<usize> {
        if out.is_empty() {
            return Err(MetadataError::invalid_argument(format!(
                "zero-capacity destination for {}",
                self.tag
            )));
        }
        let mut copied = 0;
        for (slot, value) in out.iter_mut().zip(self.iter::<T>()?) {
            *slot = value;
            copied += 1;
        }
        Ok(copied)
    }
}

/// Source of exact-size buffers for the build and clone paths.
pub trait BufferAllocator {
    /// Allocate an empty buffer with exactly these capacities, or report
    /// [`MetadataError::OutOfMemory`].
    fn allocate(&self, entry_capacity: usize, data_capacity: usize) -> Result<MetadataBuffer>;
}

/// Allocates from the global heap, reporting failure instead of aborting.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapAllocator;

impl BufferAllocator for HeapAllocator {
    fn allocate(&self, entry_capacity: usize, data_capacity: usize) -> Result<MetadataBuffer> {
        MetadataBuffer::with_capacity(entry_capacity, data_capacity)
    }
}

impl<A: BufferAllocator + ?Sized> BufferAllocator for &A {
    fn allocate(&self, entry_capacity: usize, data_capacity: usize) -> Result<MetadataBuffer> {
        (**self).allocate(entry_capacity, data_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags;
    use crate::types::Rational;

    fn schema() -> &'static TagSchema {
        TagSchema::standard()
    }

    #[test]
    fn small_payloads_stay_inline() {
        let mut buffer = MetadataBuffer::with_capacity(2, 0).unwrap();
        buffer.append(schema(), tags::JPEG_QUALITY, (&[95u8]).into()).unwrap();
        buffer.append(schema(), tags::JPEG_ORIENTATION, (&[90i32]).into()).unwrap();

        assert_eq!(buffer.data_count(), 0);
        assert!(buffer.is_full());
        assert_eq!(buffer.find(tags::JPEG_QUALITY).unwrap().get::<u8>(0).unwrap(), 95);
        assert_eq!(buffer.find(tags::JPEG_ORIENTATION).unwrap().get::<i32>(0).unwrap(), 90);
    }

    #[test]
    fn large_payloads_are_pooled_and_aligned() {
        let mut buffer = MetadataBuffer::with_capacity(2, 32).unwrap();
        // 5 x i32 = 20 bytes, padded to 24
        buffer.append(schema(), tags::CONTROL_AE_REGIONS, (&[0i32, 0, 640, 480, 1000]).into()).unwrap();
        buffer.append(schema(), tags::JPEG_GPS_TIMESTAMP, (&[1_700_000_000i64]).into()).unwrap();

        assert_eq!(buffer.data_count(), 32);
        let regions = buffer.find(tags::CONTROL_AE_REGIONS).unwrap();
        assert_eq!(regions.to_vec::<i32>().unwrap(), vec![0, 0, 640, 480, 1000]);
        assert_eq!(
            buffer.find(tags::JPEG_GPS_TIMESTAMP).unwrap().get::<i64>(0).unwrap(),
            1_700_000_000
        );
    }

    #[test]
    fn append_rejects_overflow_without_mutating() {
        let mut buffer = MetadataBuffer::with_capacity(1, 8).unwrap();
        let err = buffer
            .append(schema(), tags::JPEG_GPS_COORDINATES, (&[1.0f64, 2.0, 3.0]).into())
            .unwrap_err();
        assert!(matches!(
            err,
            MetadataError::CapacityExceeded { resource: Resource::DataBytes, needed: 24, available: 8, .. }
        ));
        assert!(buffer.is_empty());
        assert_eq!(buffer.data_count(), 0);

        buffer.append(schema(), tags::JPEG_QUALITY, (&[1u8]).into()).unwrap();
        let err = buffer.append(schema(), tags::JPEG_THUMBNAIL_QUALITY, (&[1u8]).into()).unwrap_err();
        assert!(matches!(err, MetadataError::CapacityExceeded { resource: Resource::Entries, .. }));
    }

    #[test]
    fn append_checks_schema_type_and_uniqueness() {
        let mut buffer = MetadataBuffer::with_capacity(4, 16).unwrap();
        let err = buffer.append(schema(), tags::JPEG_QUALITY, (&[100i32]).into()).unwrap_err();
        assert!(matches!(err, MetadataError::TypeMismatch { .. }));

        let err = buffer.append(schema(), Tag(0x0042_0042), (&[1u8]).into()).unwrap_err();
        assert!(matches!(err, MetadataError::InvalidTag { .. }));

        buffer.append(schema(), tags::REQUEST_ID, (&[7i32]).into()).unwrap();
        let err = buffer.append(schema(), tags::REQUEST_ID, (&[8i32]).into()).unwrap_err();
        assert!(matches!(err, MetadataError::DuplicateTag { .. }));
        assert_eq!(buffer.entry_count(), 1);
    }

    #[test]
    fn views_enforce_element_type_and_bounds() {
        let mut buffer = MetadataBuffer::with_capacity(1, 0).unwrap();
        buffer
            .append(schema(), tags::CONTROL_AE_COMPENSATION_STEP, (&[Rational::new(1, 3)]).into())
            .unwrap_err();

        let mut buffer = MetadataBuffer::with_capacity(1, 8).unwrap();
        buffer
            .append(schema(), tags::CONTROL_AE_COMPENSATION_STEP, (&[Rational::new(1, 3)]).into())
            .unwrap();
        let view = buffer.find(tags::CONTROL_AE_COMPENSATION_STEP).unwrap();
        assert_eq!(view.get::<Rational>(0).unwrap(), Rational::new(1, 3));
        assert!(matches!(view.get::<i32>(0), Err(MetadataError::TypeMismatch { .. })));
        assert!(matches!(view.get::<Rational>(1), Err(MetadataError::Malformed { .. })));
    }

    #[test]
    fn copy_into_is_bounded_by_destination() {
        let mut buffer = MetadataBuffer::with_capacity(1, 24).unwrap();
        buffer.append(schema(), tags::JPEG_GPS_COORDINATES, (&[1.5f64, -2.5, 30.0]).into()).unwrap();
        let view = buffer.find(tags::JPEG_GPS_COORDINATES).unwrap();

        let mut two = [0.0f64; 2];
        assert_eq!(view.copy_into(&mut two).unwrap(), 2);
        assert_eq!(two, [1.5, -2.5]);

        let mut five = [0.0f64; 5];
        assert_eq!(view.copy_into(&mut five).unwrap(), 3);
        assert_eq!(five, [1.5, -2.5, 30.0, 0.0, 0.0]);

        let mut none: [f64; 0] = [];
        assert!(matches!(view.copy_into(&mut none), Err(MetadataError::InvalidArgument { .. })));
    }

    #[test]
    fn typed_iterator_outlives_the_view() {
        let mut buffer = MetadataBuffer::with_capacity(1, 24).unwrap();
        buffer.append(schema(), tags::CONTROL_AE_REGIONS, (&[1i32, 2, 3, 4, 5]).into()).unwrap();

        let values = {
            let view = buffer.find(tags::CONTROL_AE_REGIONS).unwrap();
            view.iter::<i32>().unwrap()
        };
        assert_eq!(values.sum::<i32>(), 15);
        assert!(buffer.find(tags::CONTROL_AE_REGIONS).unwrap().iter::<f32>().is_err());
    }

    #[test]
    fn clone_is_deep_and_keeps_capacity() {
        let mut buffer = MetadataBuffer::with_capacity(3, 16).unwrap();
        buffer.append(schema(), tags::REQUEST_ID, (&[42i32]).into()).unwrap();
        buffer.append(schema(), tags::SENSOR_TIMESTAMP, (&[99i64]).into()).unwrap();

        let copy = buffer.try_clone().unwrap();
        assert_eq!(copy, buffer);
        assert_eq!(copy.unused_capacity(), (1, 8));
        assert_ne!(copy.data.as_ptr(), buffer.data.as_ptr());
    }

    #[test]
    fn missing_tag_is_reported() {
        let buffer = MetadataBuffer::with_capacity(0, 0).unwrap();
        assert!(matches!(
            buffer.find(tags::REQUEST_ID),
            Err(MetadataError::TagNotFound { tag }) if tag == tags::REQUEST_ID
        ));
    }

    #[test]
    fn oversized_allocation_reports_out_of_memory() {
        let err = MetadataBuffer::with_capacity(0, usize::MAX).unwrap_err();
        assert!(matches!(err, MetadataError::OutOfMemory { .. }));
    }
}
