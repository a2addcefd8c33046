//! Contiguous wire image of a [`MetadataBuffer`]
//!
//! # Layout
//!
//! All integers are little-endian.
//!
//! ```text
//! header (24 bytes)
//!   0  magic          b"CMDB"
//!   4  version        u32 (1)
//!   8  entry_count    u32
//!  12  entry_capacity u32
//!  16  data_count     u32
//!  20  data_capacity  u32
//! entries (16 bytes each, entry_count of them)
//!   0  tag            u32
//!   4  value type     u8
//!   5  padding        3 bytes, zero
//!   8  count          u32
//!  12  payload        4 inline bytes, or u32 pool offset
//! data pool (data_count bytes)
//! ```
//!
//! Unused capacity is recorded in the header but not transmitted, so decoding
//! reproduces a buffer with the same capacities. Spare capacity is limited to
//! [`MAX_SPARE_ENTRIES`] and [`MAX_SPARE_DATA_BYTES`] so the allocation a header
//! can demand stays proportional to the image length.

use crate::buffer::{BufferAllocator, EntryRecord, HeapAllocator, MetadataBuffer, Payload};
use crate::types::{DATA_ALIGNMENT, INLINE_CAPACITY, Tag, TagSchema, ValueType, align_to};
use crate::{MetadataError, Result};

pub const MAGIC: [u8; 4] = *b"CMDB";
pub const VERSION: u32 = 1;
pub const HEADER_SIZE: usize = 24;
pub const ENTRY_SIZE: usize = 16;

/// Largest `entry_capacity - entry_count` an image may carry.
pub const MAX_SPARE_ENTRIES: usize = 256;
/// Largest `data_capacity - data_count` an image may carry.
pub const MAX_SPARE_DATA_BYTES: usize = 64 * 1024;

fn parse_u32_le(data: &[u8], offset: usize, context: &str) -> Result<u32> {
    if offset + 4 > data.len() {
        return Err(MetadataError::malformed(
            context,
            format!(
                "Insufficient data for u32 at offset {} (need 4 bytes, have {})",
                offset,
                data.len().saturating_sub(offset)
            ),
        ));
    }
    Ok(u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]))
}

fn to_wire_u32(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        MetadataError::invalid_argument(format!("{} {} does not fit the wire format", what, value))
    })
}

impl MetadataBuffer {
    /// Size of the wire image [`MetadataBuffer::to_bytes`] produces.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + ENTRY_SIZE * self.entries.len() + self.data.len()
    }

    /// Serialize into the contiguous wire image.
    ///
    /// Fails with [`MetadataError::InvalidArgument`] when the buffer has more
    /// spare capacity than a wire image may describe.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let (spare_entries, spare_bytes) = self.unused_capacity();
        if spare_entries > MAX_SPARE_ENTRIES || spare_bytes > MAX_SPARE_DATA_BYTES {
            return Err(MetadataError::invalid_argument(format!(
                "{} spare entries and {} spare bytes exceed the wire limits ({}, {})",
                spare_entries, spare_bytes, MAX_SPARE_ENTRIES, MAX_SPARE_DATA_BYTES
            )));
        }
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        for (value, what) in [
            (self.entries.len(), "entry count"),
            (self.entry_capacity, "entry capacity"),
            (self.data.len(), "data count"),
            (self.data_capacity, "data capacity"),
        ] {
            out.extend_from_slice(&to_wire_u32(value, what)?.to_le_bytes());
        }

        for entry in &self.entries {
            out.extend_from_slice(&entry.tag.value().to_le_bytes());
            out.extend_from_slice(&[entry.value_type as u8, 0, 0, 0]);
            out.extend_from_slice(&to_wire_u32(entry.count, "element count")?.to_le_bytes());
            match entry.payload {
                Payload::Inline(bytes) => out.extend_from_slice(&bytes),
                Payload::Pooled { offset } => {
                    out.extend_from_slice(&to_wire_u32(offset, "pool offset")?.to_le_bytes())
                }
            }
        }

        out.extend_from_slice(&self.data);
        Ok(out)
    }

    /// Decode a wire image, checking it against the standard schema.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with(bytes, TagSchema::standard(), &HeapAllocator)
    }

    /// Decode a wire image against `schema`, allocating through `allocator`.
    ///
    /// Every entry is checked: known tag, declared type, no duplicates,
    /// inline/pooled placement consistent with its size, and pool offsets laid
    /// out contiguously in entry order.
    pub fn from_bytes_with(
        bytes: &[u8],
        schema: &TagSchema,
        allocator: &dyn BufferAllocator,
    ) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(MetadataError::malformed(
                "header",
                format!("need {} bytes, have {}", HEADER_SIZE, bytes.len()),
            ));
        }
        if bytes[0..4] != MAGIC {
            return Err(MetadataError::malformed(
                "header",
                format!("bad magic {:02x?}", &bytes[0..4]),
            ));
        }
        let version = parse_u32_le(bytes, 4, "header")?;
        if version != VERSION {
            return Err(MetadataError::malformed(
                "header",
                format!("unsupported version {} (expected {})", version, VERSION),
            ));
        }
        let entry_count = parse_u32_le(bytes, 8, "header")? as usize;
        let entry_capacity = parse_u32_le(bytes, 12, "header")? as usize;
        let data_count = parse_u32_le(bytes, 16, "header")? as usize;
        let data_capacity = parse_u32_le(bytes, 20, "header")? as usize;

        if entry_count > entry_capacity || data_count > data_capacity {
            return Err(MetadataError::malformed(
                "header",
                format!(
                    "counts exceed capacity ({}/{} entries, {}/{} bytes)",
                    entry_count, entry_capacity, data_count, data_capacity
                ),
            ));
        }
        if entry_capacity - entry_count > MAX_SPARE_ENTRIES
            || data_capacity - data_count > MAX_SPARE_DATA_BYTES
        {
            return Err(MetadataError::malformed(
                "header",
                format!(
                    "spare capacity of {} entries, {} bytes exceeds limits of {}, {}",
                    entry_capacity - entry_count,
                    data_capacity - data_count,
                    MAX_SPARE_ENTRIES,
                    MAX_SPARE_DATA_BYTES
                ),
            ));
        }
        let expected_len = HEADER_SIZE + ENTRY_SIZE * entry_count + data_count;
        if bytes.len() != expected_len {
            return Err(MetadataError::malformed(
                "header",
                format!("image is {} bytes, header describes {}", bytes.len(), expected_len),
            ));
        }

        let mut records: Vec<EntryRecord> = Vec::with_capacity(entry_count);
        let pool_start = HEADER_SIZE + ENTRY_SIZE * entry_count;
        let mut next_offset = 0usize;

        for index in 0..entry_count {
            let base = HEADER_SIZE + ENTRY_SIZE * index;
            let context = format!("entry {}", index);
            let tag = Tag(parse_u32_le(bytes, base, &context)?);

            let value_type = ValueType::from_raw(bytes[base + 4]).ok_or_else(|| {
                MetadataError::malformed(&context, format!("unknown value type {}", bytes[base + 4]))
            })?;
            if bytes[base + 5..base + 8] != [0, 0, 0] {
                return Err(MetadataError::malformed(&context, "non-zero padding"));
            }
            let declared = schema
                .value_type(tag)
                .map_err(|_| MetadataError::malformed(&context, format!("unknown tag {}", tag)))?;
            if declared != value_type {
                return Err(MetadataError::malformed(
                    &context,
                    format!("{} declared {:?}, image says {:?}", tag, declared, value_type),
                ));
            }
            if records.iter().any(|record| record.tag == tag) {
                return Err(MetadataError::malformed(&context, format!("duplicate tag {}", tag)));
            }

            let count = parse_u32_le(bytes, base + 8, &context)? as usize;
            let payload_len = value_type.size() * count;
            let data_size = value_type.data_size(count);
            let payload = if data_size == 0 {
                let mut inline = [0u8; INLINE_CAPACITY];
                inline[..payload_len].copy_from_slice(&bytes[base + 12..base + 12 + payload_len]);
                Payload::Inline(inline)
            } else {
                let offset = parse_u32_le(bytes, base + 12, &context)? as usize;
                if offset != next_offset || offset % DATA_ALIGNMENT != 0 {
                    return Err(MetadataError::malformed(
                        &context,
                        format!("pool offset {} (expected {})", offset, next_offset),
                    ));
                }
                if offset + data_size > data_count {
                    return Err(MetadataError::malformed(
                        &context,
                        format!(
                            "payload {}..{} runs past pool of {} bytes",
                            offset,
                            offset + data_size,
                            data_count
                        ),
                    ));
                }
                next_offset = align_to(offset + payload_len, DATA_ALIGNMENT);
                Payload::Pooled { offset }
            };

            records.push(EntryRecord { tag, value_type, count, payload });
        }

        if next_offset != data_count {
            return Err(MetadataError::malformed(
                "data pool",
                format!("entries reference {} bytes, header says {}", next_offset, data_count),
            ));
        }

        let mut buffer = allocator.allocate(entry_capacity, data_capacity)?;
        buffer.entries.extend(records);
        buffer.data.extend_from_slice(&bytes[pool_start..]);
        Ok(buffer)
    }
}
