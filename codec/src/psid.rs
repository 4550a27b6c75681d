//! PSID p-encoding.
//!
//! A PSID is carried in one to four octets. The leading bits of the first
//! octet say how many follow and each wider form starts where the previous
//! one ends:
//!
//! | octets | prefix | range                       |
//! |--------|--------|-----------------------------|
//! | 1      | `0`    | 0 ..= 127                   |
//! | 2      | `10`   | 128 ..= 16 511              |
//! | 3      | `110`  | 16 512 ..= 2 113 663        |
//! | 4      | `1110` | 2 113 664 ..= 270 549 119   |
//!
//! Inside WSMs and WSAs the same scheme appears as the nested
//! `VarLengthNumber` choice; [`psid_to_value`] and [`psid_from_value`] map
//! between the two views.

use uper::AsnValue;

use crate::error::{CodecError, CodecResult, ParamKind};
use crate::types::Psid;

const ONE_OCTET_MAX: u32 = 127;
const TWO_OCTET_MAX: u32 = 16_511;
const THREE_OCTET_MAX: u32 = 2_113_663;

const TWO_OCTET_BASE: u32 = ONE_OCTET_MAX + 1;
const THREE_OCTET_BASE: u32 = TWO_OCTET_MAX + 1;
const FOUR_OCTET_BASE: u32 = THREE_OCTET_MAX + 1;

const CONTENT: u32 = 0;
const EXTENSION: u32 = 1;

fn invalid(psid: Psid) -> CodecError {
    CodecError::InvalidParam {
        kind: ParamKind::Psid,
        value: i64::from(psid.raw()),
    }
}

/// Number of octets in the p-encoding of `psid`.
pub fn encoded_psid_len(psid: Psid) -> CodecResult<usize> {
    match psid.raw() {
        0..=ONE_OCTET_MAX => Ok(1),
        TWO_OCTET_BASE..=TWO_OCTET_MAX => Ok(2),
        THREE_OCTET_BASE..=THREE_OCTET_MAX => Ok(3),
        FOUR_OCTET_BASE..=Psid::MAX => Ok(4),
        _ => Err(invalid(psid)),
    }
}

/// Encodes `psid` in its shortest p-encoding.
pub fn encode_psid(psid: Psid) -> CodecResult<Vec<u8>> {
    let raw = psid.raw();
    let bytes = match encoded_psid_len(psid)? {
        1 => vec![raw as u8],
        2 => (0x8000 | (raw - TWO_OCTET_BASE) as u16).to_be_bytes().to_vec(),
        3 => {
            let v = 0x00C0_0000 | (raw - THREE_OCTET_BASE);
            v.to_be_bytes()[1..].to_vec()
        }
        _ => (0xE000_0000 | (raw - FOUR_OCTET_BASE)).to_be_bytes().to_vec(),
    };
    Ok(bytes)
}

/// Decodes a p-encoded PSID from the start of `bytes`.
///
/// Returns the PSID and the number of octets consumed.
pub fn decode_psid(bytes: &[u8]) -> CodecResult<(Psid, usize)> {
    let first = *bytes.first().ok_or(CodecError::InvalidPsidFormat)?;
    let len = match first.leading_ones() {
        0 => 1,
        1 => 2,
        2 => 3,
        3 => 4,
        _ => return Err(CodecError::InvalidPsidFormat),
    };
    let octets = bytes.get(..len).ok_or(CodecError::InvalidPsidFormat)?;
    let value = octets
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
    let raw = match len {
        1 => value,
        2 => (value & 0x3FFF) + TWO_OCTET_BASE,
        3 => (value & 0x1F_FFFF) + THREE_OCTET_BASE,
        _ => (value & 0x0FFF_FFFF) + FOUR_OCTET_BASE,
    };
    Ok((Psid::new(raw), len))
}

/// Builds the nested `VarLengthNumber` value for `psid`.
pub fn psid_to_value(psid: Psid) -> CodecResult<AsnValue> {
    let content = AsnValue::Integer(i64::from(psid.raw()));
    let value = match encoded_psid_len(psid)? {
        1 => AsnValue::choice(CONTENT, content),
        2 => AsnValue::choice(EXTENSION, AsnValue::choice(CONTENT, content)),
        3 => AsnValue::choice(
            EXTENSION,
            AsnValue::choice(EXTENSION, AsnValue::choice(CONTENT, content)),
        ),
        _ => AsnValue::choice(
            EXTENSION,
            AsnValue::choice(EXTENSION, AsnValue::choice(EXTENSION, content)),
        ),
    };
    Ok(value)
}

/// Reads a PSID back out of a `VarLengthNumber` value.
///
/// A value whose nesting does not follow the scheme is a format error; a
/// well-formed value that is out of range is an invalid PSID.
pub fn psid_from_value(value: &AsnValue) -> CodecResult<Psid> {
    let mut level = value;
    let mut depth = 0;
    let content = loop {
        if depth == 3 {
            break level.as_integer().ok_or(CodecError::InvalidPsidFormat)?;
        }
        match level.as_choice() {
            Some((CONTENT, inner)) => {
                break inner.as_integer().ok_or(CodecError::InvalidPsidFormat)?;
            }
            Some((EXTENSION, inner)) => {
                level = inner;
                depth += 1;
            }
            _ => return Err(CodecError::InvalidPsidFormat),
        }
    };

    let (lower, upper) = match depth {
        0 => (0, ONE_OCTET_MAX),
        1 => (TWO_OCTET_BASE, TWO_OCTET_MAX),
        2 => (THREE_OCTET_BASE, THREE_OCTET_MAX),
        _ => (FOUR_OCTET_BASE, Psid::MAX),
    };
    let raw = u32::try_from(content).map_err(|_| CodecError::InvalidParam {
        kind: ParamKind::Psid,
        value: content,
    })?;
    if raw < lower || raw > upper {
        return Err(CodecError::InvalidParam {
            kind: ParamKind::Psid,
            value: content,
        });
    }
    Ok(Psid::new(raw))
}
