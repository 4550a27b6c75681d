//! Bounds-checked reader over packed input.

use crate::error::{BitError, BitResult};

/// Reads an unaligned bit stream, most significant bit first.
///
/// Every read checks the remaining input before consuming anything, so a
/// failed read leaves the position unchanged.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    #[must_use]
    pub const fn bits_remaining(&self) -> usize {
        self.data
            .len()
            .saturating_mul(8)
            .saturating_sub(self.bit_pos)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }

    #[must_use]
    pub const fn bit_position(&self) -> usize {
        self.bit_pos
    }

    /// True when the position is on an octet boundary.
    #[must_use]
    pub const fn is_aligned(&self) -> bool {
        self.bit_pos % 8 == 0
    }

    pub fn read_bit(&mut self) -> BitResult<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    /// Reads a `bits`-wide unsigned field (at most 64 bits).
    pub fn read_bits(&mut self, bits: u8) -> BitResult<u64> {
        let value = self.peek_bits(bits)?;
        self.bit_pos += usize::from(bits);
        Ok(value)
    }

    /// Returns the next `bits` bits without consuming them.
    pub fn peek_bits(&self, bits: u8) -> BitResult<u64> {
        if bits > 64 {
            return Err(BitError::InvalidBitCount { bits, max_bits: 64 });
        }
        self.ensure_bits(usize::from(bits))?;

        let mut value = 0u64;
        let mut pos = self.bit_pos;
        let mut left = usize::from(bits);
        while left > 0 {
            let offset = pos % 8;
            let take = (8 - offset).min(left);
            let byte = self.data[pos / 8];
            let chunk = (byte >> (8 - offset - take)) & (0xFF >> (8 - take));
            value = (value << take) | u64::from(chunk);
            pos += take;
            left -= take;
        }
        Ok(value)
    }

    /// Reads `len` octets from the current position, which need not be aligned.
    pub fn read_bytes(&mut self, len: usize) -> BitResult<Vec<u8>> {
        self.ensure_bits(len.saturating_mul(8))?;
        if self.is_aligned() {
            let start = self.bit_pos / 8;
            self.bit_pos += len * 8;
            return Ok(self.data[start..start + len].to_vec());
        }
        (0..len).map(|_| self.read_bits(8).map(|b| b as u8)).collect()
    }

    /// Skips the padding up to the next octet boundary.
    pub fn align_to_byte(&mut self) -> BitResult<()> {
        let pad = (8 - self.bit_pos % 8) % 8;
        self.ensure_bits(pad)?;
        self.bit_pos += pad;
        Ok(())
    }

    fn ensure_bits(&self, bits: usize) -> BitResult<()> {
        let available = self.bits_remaining();
        if bits > available {
            return Err(BitError::UnexpectedEof {
                requested: bits,
                available,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        let mut reader = BitReader::new(&[]);
        assert!(reader.is_empty());
        assert!(matches!(
            reader.read_bit(),
            Err(BitError::UnexpectedEof {
                requested: 1,
                available: 0
            })
        ));
    }

    #[test]
    fn fields_straddle_octets() {
        // 0011 | 0 | 011 | 0000_0000: a WSMP leading octet then one more
        let mut reader = BitReader::new(&[0x33, 0x00]);
        assert_eq!(reader.read_bits(4).unwrap(), 3);
        assert!(!reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(3).unwrap(), 3);
        assert!(reader.is_aligned());

        let mut reader = BitReader::new(&[0b1111_0000, 0b0000_1111]);
        assert_eq!(reader.read_bits(2).unwrap(), 0b11);
        assert_eq!(reader.read_bits(12).unwrap(), 0b11_0000_0000_11);
        assert_eq!(reader.bits_remaining(), 2);
    }

    #[test]
    fn peek_does_not_consume() {
        let reader = BitReader::new(&[0xB0, 0x00]);
        assert_eq!(reader.peek_bits(1).unwrap(), 1);
        assert_eq!(reader.peek_bits(4).unwrap(), 0b1011);
        assert_eq!(reader.bit_position(), 0);
    }

    #[test]
    fn failed_read_keeps_position() {
        let mut reader = BitReader::new(&[0xAB]);
        reader.read_bits(3).unwrap();
        assert_eq!(
            reader.read_bits(6).unwrap_err(),
            BitError::UnexpectedEof {
                requested: 6,
                available: 5
            }
        );
        assert_eq!(reader.bit_position(), 3);
    }

    #[test]
    fn octets_aligned_and_unaligned() {
        let mut reader = BitReader::new(&[0x12, 0x34, 0xFF, 0x80, 0x00]);
        assert_eq!(reader.read_bytes(2).unwrap(), vec![0x12, 0x34]);
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_bytes(2).unwrap(), vec![0xFF, 0x00]);
        assert_eq!(reader.bits_remaining(), 7);
    }

    #[test]
    fn align_skips_padding_only_when_needed() {
        let mut reader = BitReader::new(&[0b1010_0000, 0x42]);
        reader.align_to_byte().unwrap();
        assert_eq!(reader.bit_position(), 0);
        reader.read_bits(3).unwrap();
        reader.align_to_byte().unwrap();
        assert_eq!(reader.read_bits(8).unwrap(), 0x42);
    }

    #[test]
    fn wide_fields() {
        let mut reader = BitReader::new(&[0xFF; 9]);
        assert_eq!(reader.read_bits(64).unwrap(), u64::MAX);
        assert!(matches!(
            reader.peek_bits(65),
            Err(BitError::InvalidBitCount { bits: 65, .. })
        ));
    }
}
