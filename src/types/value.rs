//! Typed element encoding for metadata payloads
//!
//! Payloads are stored little-endian regardless of host byte order so that a
//! buffer's wire image is portable.

use serde::{Deserialize, Serialize};

use super::ValueType;

/// Numerator/denominator pair stored as two little-endian `i32`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rational {
    pub numerator: i32,
    pub denominator: i32,
}

impl Rational {
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self { numerator, denominator }
    }
}

/// Element types that can be stored in a metadata entry.
pub trait MetadataValue: Copy + 'static {
    /// Schema type this Rust type encodes.
    const VALUE_TYPE: ValueType;

    /// Encode into `out`, which is exactly `VALUE_TYPE.size()` bytes long.
    fn write_le(&self, out: &mut [u8]);

    /// Decode from `bytes`, which is exactly `VALUE_TYPE.size()` bytes long.
    fn read_le(bytes: &[u8]) -> Self;
}

impl MetadataValue for u8 {
    const VALUE_TYPE: ValueType = ValueType::Byte;

    fn write_le(&self, out: &mut [u8]) {
        out[0] = *self;
    }

    fn read_le(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl MetadataValue for i32 {
    const VALUE_TYPE: ValueType = ValueType::Int32;

    fn write_le(&self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

impl MetadataValue for f32 {
    const VALUE_TYPE: ValueType = ValueType::Float;

    fn write_le(&self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

impl MetadataValue for i64 {
    const VALUE_TYPE: ValueType = ValueType::Int64;

    fn write_le(&self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        i64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ])
    }
}

impl MetadataValue for f64 {
    const VALUE_TYPE: ValueType = ValueType::Double;

    fn write_le(&self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        f64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ])
    }
}

impl MetadataValue for Rational {
    const VALUE_TYPE: ValueType = ValueType::Rational;

    fn write_le(&self, out: &mut [u8]) {
        self.numerator.write_le(&mut out[0..4]);
        self.denominator.write_le(&mut out[4..8]);
    }

    fn read_le(bytes: &[u8]) -> Self {
        Rational { numerator: i32::read_le(&bytes[0..4]), denominator: i32::read_le(&bytes[4..8]) }
    }
}

/// A borrowed, typed run of values to store under one tag.
///
/// This is what builder routines hand to an accumulator. It keeps the
/// accumulator interface object-safe while preserving the element type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Values<'a> {
    Byte(&'a [u8]),
    Int32(&'a [i32]),
    Float(&'a [f32]),
    Int64(&'a [i64]),
    Double(&'a [f64]),
    Rational(&'a [Rational]),
}

impl Values<'_> {
    pub fn value_type(&self) -> ValueType {
        match self {
            Values::Byte(_) => ValueType::Byte,
            Values::Int32(_) => ValueType::Int32,
            Values::Float(_) => ValueType::Float,
            Values::Int64(_) => ValueType::Int64,
            Values::Double(_) => ValueType::Double,
            Values::Rational(_) => ValueType::Rational,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Values::Byte(v) => v.len(),
            Values::Int32(v) => v.len(),
            Values::Float(v) => v.len(),
            Values::Int64(v) => v.len(),
            Values::Double(v) => v.len(),
            Values::Rational(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encode every element into `out`, which must hold `len() * size` bytes.
    pub(crate) fn encode_into(&self, out: &mut [u8]) {
        match self {
            Values::Byte(v) => encode(v, out),
            Values::Int32(v) => encode(v, out),
            Values::Float(v) => encode(v, out),
            Values::Int64(v) => encode(v, out),
            Values::Double(v) => encode(v, out),
            Values::Rational(v) => encode(v, out),
        }
    }
}

fn encode<T: MetadataValue>(values: &[T], out: &mut [u8]) {
    for (chunk, value) in out.chunks_exact_mut(T::VALUE_TYPE.size()).zip(values) {
        value.write_le(chunk);
    }
}

macro_rules! impl_values_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a [$ty]> for Values<'a> {
                fn from(values: &'a [$ty]) -> Self {
                    Values::$variant(values)
                }
            }

            impl<'a, const N: usize> From<&'a [$ty; N]> for Values<'a> {
                fn from(values: &'a [$ty; N]) -> Self {
                    Values::$variant(values.as_slice())
                }
            }

            impl<'a> From<&'a Vec<$ty>> for Values<'a> {
                fn from(values: &'a Vec<$ty>) -> Self {
                    Values::$variant(values.as_slice())
                }
            }
        )*
    };
}

impl_values_from! {
    u8 => Byte,
    i32 => Int32,
    f32 => Float,
    i64 => Int64,
    f64 => Double,
    Rational => Rational,
}
