//! Error types for the PER engine.

use std::fmt;

/// Result type for encode/decode operations.
pub type UperResult<T> = Result<T, UperError>;

/// Errors reported by a [`UperCodec`](crate::UperCodec).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UperError {
    /// Bitstream error (truncated input, output capacity exceeded).
    Bitstream(bitstream::BitError),

    /// The value's shape does not match its type descriptor.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Integer outside its (non-extensible) constraint.
    IntegerOutOfRange { value: i64, lower: i64, upper: i64 },

    /// String or list length violates its size constraint.
    SizeOutOfRange {
        len: usize,
        min: usize,
        max: Option<usize>,
    },

    /// A `SEQUENCE` value has the wrong number of component slots.
    ComponentCount { expected: usize, actual: usize },

    /// A mandatory `SEQUENCE` component is absent.
    MissingComponent { name: &'static str },

    /// `CHOICE` or `ENUMERATED` index outside the root.
    IndexOutOfRange { index: u32, count: u32 },

    /// A reserved `CHOICE` alternative was selected; `count` is the size of
    /// the root that holds it.
    ReservedAlternative { index: u32, count: u32 },

    /// Extension additions are present in the encoding.
    ExtensionNotSupported { kind: &'static str },

    /// Lengths of 16K and above need fragmentation, which is not supported.
    LengthTooLarge { len: usize },

    /// An out-of-root integer needs more than 8 octets.
    IntegerTooWide { octets: usize },

    /// Bits left over after the outermost value was decoded.
    TrailingData { bits: usize },
}

impl UperError {
    pub(crate) fn mismatch(expected: &crate::AsnType, found: &crate::AsnValue) -> Self {
        Self::TypeMismatch {
            expected: expected.kind_name(),
            found: value_kind(found),
        }
    }
}

const fn value_kind(value: &crate::AsnValue) -> &'static str {
    use crate::AsnValue;
    match value {
        AsnValue::Null => "NULL",
        AsnValue::Boolean(_) => "BOOLEAN",
        AsnValue::Integer(_) => "INTEGER",
        AsnValue::Enumerated(_) => "ENUMERATED",
        AsnValue::OctetString(_) => "OCTET STRING",
        AsnValue::Sequence(_) => "SEQUENCE",
        AsnValue::SequenceOf(_) => "SEQUENCE OF",
        AsnValue::Choice { .. } => "CHOICE",
        AsnValue::Open(_) => "open type",
    }
}

impl fmt::Display for UperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitstream(e) => write!(f, "bitstream error: {e}"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            Self::IntegerOutOfRange {
                value,
                lower,
                upper,
            } => {
                write!(f, "integer {value} outside [{lower}, {upper}]")
            }
            Self::SizeOutOfRange { len, min, max } => match max {
                Some(max) => write!(f, "size {len} outside [{min}, {max}]"),
                None => write!(f, "size {len} below minimum {min}"),
            },
            Self::ComponentCount { expected, actual } => {
                write!(f, "expected {expected} sequence components, got {actual}")
            }
            Self::MissingComponent { name } => {
                write!(f, "mandatory component `{name}` is absent")
            }
            Self::IndexOutOfRange { index, count } => {
                write!(f, "index {index} outside root of {count} entries")
            }
            Self::ReservedAlternative { index, count } => {
                write!(f, "alternative {index} of {count} is reserved")
            }
            Self::ExtensionNotSupported { kind } => {
                write!(f, "{kind} extension additions are not supported")
            }
            Self::LengthTooLarge { len } => {
                write!(f, "length {len} requires fragmentation")
            }
            Self::IntegerTooWide { octets } => {
                write!(f, "integer of {octets} octets does not fit in 64 bits")
            }
            Self::TrailingData { bits } => {
                write!(f, "{bits} trailing bits after decoded value")
            }
        }
    }
}

impl std::error::Error for UperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bitstream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bitstream::BitError> for UperError {
    fn from(err: bitstream::BitError) -> Self {
        Self::Bitstream(err)
    }
}
