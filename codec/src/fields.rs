//! Typed access to decoded abstract values.
//!
//! The engine guarantees that a decoded value mirrors its descriptor, so any
//! shape mismatch here is reported as an abnormal codec operation.

use uper::AsnValue;

use crate::error::{CodecError, CodecResult};

fn abnormal(what: &'static str) -> CodecError {
    CodecError::AbnormalCodec { what }
}

pub(crate) fn sequence<'a>(
    value: &'a AsnValue,
    what: &'static str,
) -> CodecResult<&'a [Option<AsnValue>]> {
    value.as_sequence().ok_or_else(|| abnormal(what))
}

pub(crate) fn required<'a>(
    slots: &'a [Option<AsnValue>],
    index: usize,
    what: &'static str,
) -> CodecResult<&'a AsnValue> {
    slots
        .get(index)
        .and_then(Option::as_ref)
        .ok_or_else(|| abnormal(what))
}

pub(crate) fn optional(slots: &[Option<AsnValue>], index: usize) -> Option<&AsnValue> {
    slots.get(index).and_then(Option::as_ref)
}

pub(crate) fn integer<T: TryFrom<i64>>(value: &AsnValue, what: &'static str) -> CodecResult<T> {
    value
        .as_integer()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| abnormal(what))
}

pub(crate) fn boolean(value: &AsnValue, what: &'static str) -> CodecResult<bool> {
    value.as_bool().ok_or_else(|| abnormal(what))
}

pub(crate) fn octets<'a>(value: &'a AsnValue, what: &'static str) -> CodecResult<&'a [u8]> {
    value.as_octets().ok_or_else(|| abnormal(what))
}

pub(crate) fn fixed_octets<const N: usize>(
    value: &AsnValue,
    what: &'static str,
) -> CodecResult<[u8; N]> {
    octets(value, what)?
        .try_into()
        .map_err(|_| abnormal(what))
}

pub(crate) fn list<'a>(value: &'a AsnValue, what: &'static str) -> CodecResult<&'a [AsnValue]> {
    value.as_sequence_of().ok_or_else(|| abnormal(what))
}

pub(crate) fn int(value: impl Into<i64>) -> AsnValue {
    AsnValue::Integer(value.into())
}

pub(crate) fn bytes(value: &[u8]) -> AsnValue {
    AsnValue::OctetString(value.to_vec())
}
