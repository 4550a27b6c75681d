//! Bitstream errors.

use std::fmt;

/// Result type for bitstream operations.
pub type BitResult<T> = Result<T, BitError>;

/// Failure of a single bit-level read or write. Positions and sizes are in bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitError {
    /// A read needed more bits than the input holds.
    UnexpectedEof { requested: usize, available: usize },

    /// A write would grow the output past its capacity.
    BufferOverflow { attempted: usize, capacity: usize },

    /// A field wider than the 64-bit accumulator was requested.
    InvalidBitCount { bits: u8, max_bits: u8 },

    /// The value has set bits above the field width.
    ValueOutOfRange { value: u64, bits: u8 },
}

impl fmt::Display for BitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => write!(
                f,
                "input exhausted: read of {requested} bits with {available} bits left"
            ),
            Self::BufferOverflow {
                attempted,
                capacity,
            } => write!(
                f,
                "output full: write would reach {attempted} bits, capacity {capacity} bits"
            ),
            Self::InvalidBitCount { bits, max_bits } => {
                write!(f, "field width {bits} exceeds {max_bits} bits")
            }
            Self::ValueOutOfRange { value, bits } => {
                write!(f, "value {value} does not fit a {bits}-bit field")
            }
        }
    }
}

impl std::error::Error for BitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_both_sizes() {
        let eof = BitError::UnexpectedEof {
            requested: 14,
            available: 3,
        };
        assert_eq!(
            eof.to_string(),
            "input exhausted: read of 14 bits with 3 bits left"
        );
        let full = BitError::BufferOverflow {
            attempted: 8193,
            capacity: 8192,
        };
        assert!(full.to_string().contains("8193"));
        assert!(full.to_string().contains("8192"));
    }

    #[test]
    fn display_field_errors() {
        let width = BitError::InvalidBitCount {
            bits: 65,
            max_bits: 64,
        };
        assert_eq!(width.to_string(), "field width 65 exceeds 64 bits");
        let range = BitError::ValueOutOfRange { value: 16, bits: 4 };
        assert_eq!(range.to_string(), "value 16 does not fit a 4-bit field");
    }
}
