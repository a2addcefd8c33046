//! Metadata value type definitions

use serde::{Deserialize, Serialize};

/// Payloads up to this many bytes live inside the entry record itself.
pub const INLINE_CAPACITY: usize = 4;

/// Pooled payloads start on this boundary.
pub const DATA_ALIGNMENT: usize = 8;

/// Element types a metadata entry can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ValueType {
    /// Unsigned 8-bit integer; also used for enums and byte strings
    Byte = 0,
    /// Signed 32-bit integer
    Int32 = 1,
    /// 32-bit IEEE float
    Float = 2,
    /// Signed 64-bit integer; timestamps and durations in nanoseconds
    Int64 = 3,
    /// 64-bit IEEE float
    Double = 4,
    /// Pair of signed 32-bit integers (numerator, denominator)
    Rational = 5,
}

impl ValueType {
    /// Returns the size in bytes of one element of this type.
    pub const fn size(&self) -> usize {
        match self {
            ValueType::Byte => 1,
            ValueType::Int32 | ValueType::Float => 4,
            ValueType::Int64 | ValueType::Double | ValueType::Rational => 8,
        }
    }

    /// Bytes of extra-data pool an entry of `count` elements consumes.
    ///
    /// Zero when the payload fits inline, otherwise the payload size rounded
    /// up to [`DATA_ALIGNMENT`]. Both build passes rely on this function, so
    /// it must stay pure.
    pub const fn data_size(&self, count: usize) -> usize {
        let bytes = self.size() * count;
        if bytes <= INLINE_CAPACITY { 0 } else { align_to(bytes, DATA_ALIGNMENT) }
    }

    /// Decode the on-wire type discriminant.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(ValueType::Byte),
            1 => Some(ValueType::Int32),
            2 => Some(ValueType::Float),
            3 => Some(ValueType::Int64),
            4 => Some(ValueType::Double),
            5 => Some(ValueType::Rational),
            _ => None,
        }
    }
}

pub(crate) const fn align_to(value: usize, alignment: usize) -> usize {
    value.div_ceil(alignment) * alignment
}
