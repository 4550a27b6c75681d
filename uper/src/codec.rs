//! The codec boundary used by message builders and parsers.

use bitstream::{BitReader, BitVecWriter, BitWrite};

use crate::decoder::decode_value;
use crate::encoder::encode_value;
use crate::error::{UperError, UperResult};
use crate::types::AsnType;
use crate::value::AsnValue;

/// Encodes and decodes abstract values to and from complete encodings.
///
/// A complete encoding is octet aligned; an encoding with no bits becomes a
/// single zero octet.
pub trait UperCodec {
    fn encode(&self, ty: &AsnType, value: &AsnValue) -> UperResult<Vec<u8>>;

    fn decode(&self, ty: &AsnType, bytes: &[u8]) -> UperResult<AsnValue>;

    /// Encodes `value` and wraps the result as an open-type value.
    fn encode_open(&self, ty: &AsnType, value: &AsnValue) -> UperResult<AsnValue> {
        self.encode(ty, value).map(AsnValue::Open)
    }

    /// Decodes the contents of an open-type value as `ty`.
    fn decode_open(&self, ty: &AsnType, value: &AsnValue) -> UperResult<AsnValue> {
        match value {
            AsnValue::Open(bytes) => self.decode(ty, bytes),
            other => Err(UperError::mismatch(&AsnType::Open, other)),
        }
    }
}

/// Unaligned PER codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerCodec {
    max_output: Option<usize>,
}

impl PerCodec {
    #[must_use]
    pub const fn new() -> Self {
        Self { max_output: None }
    }

    /// Codec whose encodings fail with a buffer overflow past `max_bytes`.
    #[must_use]
    pub const fn with_output_limit(max_bytes: usize) -> Self {
        Self {
            max_output: Some(max_bytes),
        }
    }

    #[must_use]
    pub const fn output_limit(&self) -> Option<usize> {
        self.max_output
    }
}

impl UperCodec for PerCodec {
    fn encode(&self, ty: &AsnType, value: &AsnValue) -> UperResult<Vec<u8>> {
        let mut writer = match self.max_output {
            Some(limit) => BitVecWriter::bounded(limit),
            None => BitVecWriter::new(),
        };
        encode_value(ty, value, &mut writer)?;
        if writer.bits_written() == 0 {
            writer.write_bits(0, 8)?;
        }
        Ok(writer.finish())
    }

    fn decode(&self, ty: &AsnType, bytes: &[u8]) -> UperResult<AsnValue> {
        let mut reader = BitReader::new(bytes);
        let value = decode_value(ty, &mut reader)?;
        let allowed = if reader.bit_position() == 0 { 8 } else { 7 };
        let remaining = reader.bits_remaining();
        if remaining > allowed {
            return Err(UperError::TrailingData { bits: remaining });
        }
        Ok(value)
    }
}
