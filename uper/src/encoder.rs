//! Unaligned PER encoding.

use bitstream::BitWrite;

use crate::error::{UperError, UperResult};
use crate::types::{AsnType, IntegerRange, Size};
use crate::value::AsnValue;

/// Largest length a single length determinant can carry without fragmentation.
pub(crate) const MAX_UNFRAGMENTED_LEN: usize = 16 * 1024;

/// Largest upper bound for which a size constraint is PER-visible as a bit field.
pub(crate) const MAX_CONSTRAINED_LEN: usize = 64 * 1024;

pub(crate) fn encode_value<W: BitWrite>(
    ty: &AsnType,
    value: &AsnValue,
    writer: &mut W,
) -> UperResult<()> {
    match (ty, value) {
        (AsnType::Null, AsnValue::Null) => Ok(()),
        (AsnType::Boolean, AsnValue::Boolean(v)) => Ok(writer.write_bit(*v)?),
        (AsnType::Integer(range), AsnValue::Integer(v)) => encode_integer(*range, *v, writer),
        (AsnType::Enumerated { root, extensible }, AsnValue::Enumerated(index)) => {
            if *index >= *root {
                return Err(UperError::IndexOutOfRange {
                    index: *index,
                    count: *root,
                });
            }
            if *extensible {
                writer.write_bit(false)?;
            }
            write_constrained(i64::from(*index), 0, i64::from(*root) - 1, writer)
        }
        (AsnType::OctetString(size), AsnValue::OctetString(bytes)) => {
            encode_length(*size, bytes.len(), writer)?;
            Ok(writer.write_bytes(bytes)?)
        }
        (AsnType::Sequence { fields, extensible }, AsnValue::Sequence(slots)) => {
            if slots.len() != fields.len() {
                return Err(UperError::ComponentCount {
                    expected: fields.len(),
                    actual: slots.len(),
                });
            }
            if *extensible {
                writer.write_bit(false)?;
            }
            for (field, slot) in fields.iter().zip(slots) {
                if field.optional {
                    writer.write_bit(slot.is_some())?;
                } else if slot.is_none() {
                    return Err(UperError::MissingComponent { name: field.name });
                }
            }
            for (field, slot) in fields.iter().zip(slots) {
                if let Some(component) = slot {
                    encode_value(field.ty, component, writer)?;
                }
            }
            Ok(())
        }
        (AsnType::SequenceOf { size, element }, AsnValue::SequenceOf(items)) => {
            encode_length(*size, items.len(), writer)?;
            for item in items {
                encode_value(element, item, writer)?;
            }
            Ok(())
        }
        (
            AsnType::Choice {
                alternatives,
                extensible,
            },
            AsnValue::Choice { index, value },
        ) => {
            let count = alternatives.len() as u32;
            let alternative = alternatives
                .get(*index as usize)
                .ok_or(UperError::IndexOutOfRange {
                    index: *index,
                    count,
                })?;
            let alt_ty = alternative
                .ty
                .ok_or(UperError::ReservedAlternative {
                    index: *index,
                    count,
                })?;
            if *extensible {
                writer.write_bit(false)?;
            }
            write_constrained(i64::from(*index), 0, i64::from(count) - 1, writer)?;
            encode_value(alt_ty, value, writer)
        }
        (AsnType::Open, AsnValue::Open(bytes)) => {
            write_length_determinant(bytes.len(), writer)?;
            Ok(writer.write_bytes(bytes)?)
        }
        _ => Err(UperError::mismatch(ty, value)),
    }
}

fn encode_integer<W: BitWrite>(range: IntegerRange, value: i64, writer: &mut W) -> UperResult<()> {
    if range.contains(value) {
        if range.extensible {
            writer.write_bit(false)?;
        }
        return write_constrained(value, range.lower, range.upper, writer);
    }
    if !range.extensible {
        return Err(UperError::IntegerOutOfRange {
            value,
            lower: range.lower,
            upper: range.upper,
        });
    }
    writer.write_bit(true)?;
    let octets = twos_complement_octets(value);
    write_length_determinant(octets.len(), writer)?;
    Ok(writer.write_bytes(&octets)?)
}

/// Number of bits of a constrained whole number over `lower..=upper`.
pub(crate) fn range_bits(lower: i64, upper: i64) -> u8 {
    let span = (i128::from(upper) - i128::from(lower)).max(0) as u128;
    if span == 0 {
        0
    } else {
        (128 - span.leading_zeros()) as u8
    }
}

fn write_constrained<W: BitWrite>(
    value: i64,
    lower: i64,
    upper: i64,
    writer: &mut W,
) -> UperResult<()> {
    let offset = (i128::from(value) - i128::from(lower)) as u64;
    Ok(writer.write_bits(offset, range_bits(lower, upper))?)
}

fn encode_length<W: BitWrite>(size: Size, len: usize, writer: &mut W) -> UperResult<()> {
    if !size.allows(len) {
        return Err(UperError::SizeOutOfRange {
            len,
            min: size.min,
            max: size.max,
        });
    }
    match size.max {
        Some(max) if max < MAX_CONSTRAINED_LEN => {
            write_constrained(len as i64, size.min as i64, max as i64, writer)
        }
        _ => write_length_determinant(len, writer),
    }
}

fn write_length_determinant<W: BitWrite>(len: usize, writer: &mut W) -> UperResult<()> {
    if len < 128 {
        writer.write_bits(len as u64, 8)?;
    } else if len < MAX_UNFRAGMENTED_LEN {
        writer.write_bits(0b10, 2)?;
        writer.write_bits(len as u64, 14)?;
    } else {
        return Err(UperError::LengthTooLarge { len });
    }
    Ok(())
}

/// Minimal two's-complement big-endian octets of `value`.
fn twos_complement_octets(value: i64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitstream::BitVecWriter;

    fn encode(ty: &AsnType, value: &AsnValue) -> UperResult<Vec<u8>> {
        let mut writer = BitVecWriter::new();
        encode_value(ty, value, &mut writer)?;
        Ok(writer.finish())
    }

    #[test]
    fn range_bits_matches_minimum_width() {
        assert_eq!(range_bits(0, 0), 0);
        assert_eq!(range_bits(0, 1), 1);
        assert_eq!(range_bits(0, 7), 3);
        assert_eq!(range_bits(0, 8), 4);
        assert_eq!(range_bits(-128, 127), 8);
        assert_eq!(range_bits(-900_000_000, 900_000_001), 31);
        assert_eq!(range_bits(-1_799_999_999, 1_800_000_001), 32);
    }

    #[test]
    fn twos_complement_is_minimal() {
        assert_eq!(twos_complement_octets(0), vec![0x00]);
        assert_eq!(twos_complement_octets(127), vec![0x7F]);
        assert_eq!(twos_complement_octets(128), vec![0x00, 0x80]);
        assert_eq!(twos_complement_octets(-1), vec![0xFF]);
        assert_eq!(twos_complement_octets(-129), vec![0xFF, 0x7F]);
    }

    #[test]
    fn signed_integer_is_offset_from_lower_bound() {
        let bytes = encode(&AsnType::integer(-128, 127), &AsnValue::Integer(-1)).unwrap();
        assert_eq!(bytes, vec![0x7F]);
    }

    #[test]
    fn out_of_root_integer_uses_extension_bit() {
        let ty = AsnType::Integer(IntegerRange::extensible(0, 3));
        let bytes = encode(&ty, &AsnValue::Integer(200)).unwrap();
        // 1 | len 00000010 | 0x00 0xC8, then padding
        assert_eq!(bytes, vec![0x81, 0x00, 0x64, 0x00]);
    }

    #[test]
    fn non_extensible_integer_rejects_out_of_range() {
        let err = encode(&AsnType::integer(0, 15), &AsnValue::Integer(16)).unwrap_err();
        assert!(matches!(err, UperError::IntegerOutOfRange { value: 16, .. }));
    }

    #[test]
    fn long_length_determinant_uses_two_octets() {
        let ty = AsnType::OctetString(Size::UNCONSTRAINED);
        let bytes = encode(&ty, &AsnValue::OctetString(vec![0xAA; 200])).unwrap();
        assert_eq!(&bytes[..2], &[0x80, 0xC8]);
        assert_eq!(bytes.len(), 202);
    }

    #[test]
    fn fragmented_lengths_are_rejected() {
        let ty = AsnType::OctetString(Size::UNCONSTRAINED);
        let err = encode(&ty, &AsnValue::OctetString(vec![0; 16_384])).unwrap_err();
        assert_eq!(err, UperError::LengthTooLarge { len: 16_384 });
    }

    #[test]
    fn value_shape_must_match_type() {
        let err = encode(&AsnType::Boolean, &AsnValue::Null).unwrap_err();
        assert!(matches!(err, UperError::TypeMismatch { .. }));
    }
}
