//! Unaligned PER decoding.

use bitstream::BitReader;

use crate::encoder::{range_bits, MAX_CONSTRAINED_LEN};
use crate::error::{UperError, UperResult};
use crate::types::{AsnType, IntegerRange, Size};
use crate::value::AsnValue;

pub(crate) fn decode_value(ty: &AsnType, reader: &mut BitReader<'_>) -> UperResult<AsnValue> {
    match ty {
        AsnType::Null => Ok(AsnValue::Null),
        AsnType::Boolean => Ok(AsnValue::Boolean(reader.read_bit()?)),
        AsnType::Integer(range) => decode_integer(*range, reader).map(AsnValue::Integer),
        AsnType::Enumerated { root, extensible } => {
            if *extensible && reader.read_bit()? {
                return Err(UperError::ExtensionNotSupported { kind: "ENUMERATED" });
            }
            let index = read_index(*root, reader)?;
            Ok(AsnValue::Enumerated(index))
        }
        AsnType::OctetString(size) => {
            let len = decode_length(*size, reader)?;
            Ok(AsnValue::OctetString(reader.read_bytes(len)?))
        }
        AsnType::Sequence { fields, extensible } => {
            if *extensible && reader.read_bit()? {
                return Err(UperError::ExtensionNotSupported { kind: "SEQUENCE" });
            }
            let mut present = Vec::with_capacity(fields.len());
            for field in *fields {
                present.push(!field.optional || reader.read_bit()?);
            }
            let mut slots = Vec::with_capacity(fields.len());
            for (field, present) in fields.iter().zip(present) {
                slots.push(if present {
                    Some(decode_value(field.ty, reader)?)
                } else {
                    None
                });
            }
            Ok(AsnValue::Sequence(slots))
        }
        AsnType::SequenceOf { size, element } => {
            let count = decode_length(*size, reader)?;
            // Every element consumes at least one bit unless it is NULL-like,
            // so cap the preallocation by what the input can hold.
            let mut items = Vec::with_capacity(count.min(reader.bits_remaining()));
            for _ in 0..count {
                items.push(decode_value(element, reader)?);
            }
            Ok(AsnValue::SequenceOf(items))
        }
        AsnType::Choice {
            alternatives,
            extensible,
        } => {
            if *extensible && reader.read_bit()? {
                return Err(UperError::ExtensionNotSupported { kind: "CHOICE" });
            }
            let count = alternatives.len() as u32;
            let index = read_index(count, reader)?;
            let alt_ty = alternatives[index as usize]
                .ty
                .ok_or(UperError::ReservedAlternative { index, count })?;
            Ok(AsnValue::choice(index, decode_value(alt_ty, reader)?))
        }
        AsnType::Open => {
            let len = read_length_determinant(reader)?;
            Ok(AsnValue::Open(reader.read_bytes(len)?))
        }
    }
}

fn decode_integer(range: IntegerRange, reader: &mut BitReader<'_>) -> UperResult<i64> {
    if range.extensible && reader.read_bit()? {
        let octets = read_length_determinant(reader)?;
        if octets == 0 || octets > 8 {
            return Err(UperError::IntegerTooWide { octets });
        }
        let bytes = reader.read_bytes(octets)?;
        let mut value: i64 = if bytes[0] & 0x80 != 0 { -1 } else { 0 };
        for byte in bytes {
            value = (value << 8) | i64::from(byte);
        }
        return Ok(value);
    }
    read_constrained(range.lower, range.upper, reader)
}

fn read_constrained(lower: i64, upper: i64, reader: &mut BitReader<'_>) -> UperResult<i64> {
    let offset = reader.read_bits(range_bits(lower, upper))?;
    let value = i128::from(lower) + i128::from(offset);
    if value > i128::from(upper) {
        return Err(UperError::IntegerOutOfRange {
            value: value as i64,
            lower,
            upper,
        });
    }
    Ok(value as i64)
}

fn read_index(count: u32, reader: &mut BitReader<'_>) -> UperResult<u32> {
    let raw = reader.read_bits(range_bits(0, i64::from(count) - 1))?;
    if raw >= u64::from(count) {
        return Err(UperError::IndexOutOfRange {
            index: raw as u32,
            count,
        });
    }
    Ok(raw as u32)
}

fn decode_length(size: Size, reader: &mut BitReader<'_>) -> UperResult<usize> {
    let len = match size.max {
        Some(max) if max < MAX_CONSTRAINED_LEN => {
            let offset = reader.read_bits(range_bits(size.min as i64, max as i64))?;
            size.min + offset as usize
        }
        _ => read_length_determinant(reader)?,
    };
    if !size.allows(len) {
        return Err(UperError::SizeOutOfRange {
            len,
            min: size.min,
            max: size.max,
        });
    }
    Ok(len)
}

fn read_length_determinant(reader: &mut BitReader<'_>) -> UperResult<usize> {
    if !reader.read_bit()? {
        return Ok(reader.read_bits(7)? as usize);
    }
    if !reader.read_bit()? {
        return Ok(reader.read_bits(14)? as usize);
    }
    Err(UperError::LengthTooLarge {
        len: crate::encoder::MAX_UNFRAGMENTED_LEN,
    })
}
