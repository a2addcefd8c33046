//! Core types for the metadata tag namespace and value encoding.
//!
//! ## Architecture
//!
//! - [`Tag`] is a 32-bit identifier: section in the high half, field index in the low half
//! - [`TagSchema`] maps each tag to its declared [`ValueType`] with O(1) lookup
//! - [`ValueType::data_size`] is the size function both build passes share
//! - [`MetadataValue`] encodes and decodes individual elements little-endian
//! - [`Values`] carries a typed slice from a builder routine to an accumulator
//! - [`modes`] holds the enumerated byte values used by control tags
//!
//! ## Usage Example
//!
//! ```rust
//! use shutter::types::{TagSchema, ValueType};
//! use shutter::tags;
//!
//! let schema = TagSchema::standard();
//! assert_eq!(schema.value_type(tags::JPEG_GPS_COORDINATES).unwrap(), ValueType::Double);
//!
//! // Three doubles do not fit inline, so they take 24 pool bytes.
//! assert_eq!(schema.data_size(tags::JPEG_GPS_COORDINATES, 3).unwrap(), 24);
//! // A single byte is stored inline.
//! assert_eq!(schema.data_size(tags::JPEG_QUALITY, 1).unwrap(), 0);
//! ```

pub mod modes;
mod schema;
mod tag;
pub mod tags;
mod value;
mod value_type;

pub use schema::{TagInfo, TagSchema};
pub use tag::{Section, Tag, VENDOR_SECTION_START};
pub use value::{MetadataValue, Rational, Values};
pub use value_type::{DATA_ALIGNMENT, INLINE_CAPACITY, ValueType};

pub(crate) use value_type::align_to;

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn arb_value_type() -> impl Strategy<Value = ValueType> {
        prop::sample::select(vec![
            ValueType::Byte,
            ValueType::Int32,
            ValueType::Float,
            ValueType::Int64,
            ValueType::Double,
            ValueType::Rational,
        ])
    }

    proptest! {
        #[test]
        fn prop_data_size_is_zero_inline_and_aligned_otherwise(
            value_type in arb_value_type(),
            count in 0usize..512
        ) {
            let payload = value_type.size() * count;
            let pooled = value_type.data_size(count);

            if payload <= INLINE_CAPACITY {
                prop_assert_eq!(pooled, 0);
            } else {
                prop_assert_eq!(pooled % DATA_ALIGNMENT, 0);
                prop_assert!(pooled >= payload);
                prop_assert!(pooled - payload < DATA_ALIGNMENT);
            }
        }

        #[test]
        fn prop_tag_composition_preserves_parts(section in 0u16..21, index in any::<u16>()) {
            let section = Section::from_index(section).unwrap();
            let tag = Tag::new(section, index);
            prop_assert_eq!(tag.section(), Some(section));
            prop_assert_eq!(tag.index(), index);
            prop_assert!(!tag.is_vendor());
        }

        #[test]
        fn prop_rational_encoding_is_lossless(numerator in any::<i32>(), denominator in any::<i32>()) {
            let value = Rational::new(numerator, denominator);
            let mut bytes = [0u8; 8];
            value.write_le(&mut bytes);
            prop_assert_eq!(Rational::read_le(&bytes), value);
        }
    }

    #[test]
    fn value_type_sizes() {
        assert_eq!(ValueType::Byte.size(), 1);
        assert_eq!(ValueType::Int32.size(), 4);
        assert_eq!(ValueType::Float.size(), 4);
        assert_eq!(ValueType::Int64.size(), 8);
        assert_eq!(ValueType::Double.size(), 8);
        assert_eq!(ValueType::Rational.size(), 8);
    }

    #[test]
    fn value_type_raw_discriminants_round_trip() {
        for raw in 0u8..6 {
            let value_type = ValueType::from_raw(raw).unwrap();
            assert_eq!(value_type as u8, raw);
        }
        assert_eq!(ValueType::from_raw(6), None);
    }

    #[test]
    fn vendor_tags_sit_above_the_standard_range() {
        let tag = Tag::vendor(2, 7);
        assert!(tag.is_vendor());
        assert_eq!(tag.section_index(), VENDOR_SECTION_START | 2);
        assert_eq!(tag.section(), None);
        assert_eq!(tag.to_string(), "0x80020007");
    }

    #[test]
    fn tags_display_their_dotted_name() {
        assert_eq!(tags::CONTROL_AE_TARGET_FPS_RANGE.to_string(), "android.control.aeTargetFpsRange");
        assert_eq!(tags::LENS_INFO_SHADING_MAP.to_string(), "android.lens.info.shadingMap");
    }

    #[test]
    fn values_report_type_and_length() {
        let values: Values = (&[1i32, 2, 3]).into();
        assert_eq!(values.value_type(), ValueType::Int32);
        assert_eq!(values.len(), 3);

        let empty: Values = (&[] as &[f64]).into();
        assert!(empty.is_empty());
    }

    #[test]
    fn mode_enums_convert_from_wire_values() {
        use modes::*;
        assert_eq!(CaptureIntent::try_from(5), Ok(CaptureIntent::ZeroShutterLag));
        assert_eq!(AfMode::try_from(4), Ok(AfMode::ContinuousPicture));
        assert_eq!(ProcessingMode::try_from(9), Err(9));
        assert_eq!(ProcessingMode::HighQuality.value(), 2);
    }
}
