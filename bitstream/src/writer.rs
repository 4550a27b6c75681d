//! Bit-level writers for encoding packed binary data.
//!
//! Bits are written most-significant first, which is the order used by the
//! ASN.1 packed encoding rules.

use crate::error::{BitError, BitResult};

/// Common interface of the bounded and growable writers.
pub trait BitWrite {
    /// Returns the number of bits written so far.
    fn bits_written(&self) -> usize;

    /// Writes a single bit.
    fn write_bit(&mut self, value: bool) -> BitResult<()>;

    /// Writes the low `bits` bits of `value`, most significant bit first.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::InvalidBitCount`] if `bits > 64`.
    /// Returns [`BitError::ValueOutOfRange`] if `value` doesn't fit in `bits`.
    fn write_bits(&mut self, value: u64, bits: u8) -> BitResult<()> {
        if bits > 64 {
            return Err(BitError::InvalidBitCount { bits, max_bits: 64 });
        }
        if bits < 64 && value >> bits != 0 {
            return Err(BitError::ValueOutOfRange { value, bits });
        }
        for i in (0..bits).rev() {
            self.write_bit((value >> i) & 1 == 1)?;
        }
        Ok(())
    }

    /// Writes whole octets starting at the current (possibly unaligned) position.
    fn write_bytes(&mut self, bytes: &[u8]) -> BitResult<()> {
        for byte in bytes {
            self.write_bits(u64::from(*byte), 8)?;
        }
        Ok(())
    }

    /// Pads with zero bits up to the next byte boundary.
    fn align_to_byte(&mut self) -> BitResult<()> {
        while self.bits_written() % 8 != 0 {
            self.write_bit(false)?;
        }
        Ok(())
    }
}

/// A bit writer over a caller-provided, fixed-size buffer.
///
/// Writes past the end of the buffer fail with [`BitError::BufferOverflow`]
/// and leave the already written bits untouched.
#[derive(Debug)]
pub struct BitWriter<'a> {
    buf: &'a mut [u8],
    bit_pos: usize,
}

impl<'a> BitWriter<'a> {
    /// Creates a writer that fills `buf` from the start.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, bit_pos: 0 }
    }

    /// Returns the capacity of the underlying buffer in bits.
    #[must_use]
    pub fn capacity_bits(&self) -> usize {
        self.buf.len() * 8
    }

    /// Finishes writing and returns the number of bytes used (last byte zero padded).
    #[must_use]
    pub fn finish(self) -> usize {
        self.bit_pos.div_ceil(8)
    }
}

impl BitWrite for BitWriter<'_> {
    fn bits_written(&self) -> usize {
        self.bit_pos
    }

    fn write_bit(&mut self, value: bool) -> BitResult<()> {
        if self.bit_pos >= self.capacity_bits() {
            return Err(BitError::BufferOverflow {
                attempted: self.bit_pos + 1,
                capacity: self.capacity_bits(),
            });
        }
        let byte_idx = self.bit_pos / 8;
        let shift = 7 - (self.bit_pos % 8);
        if shift == 7 {
            self.buf[byte_idx] = 0;
        }
        self.buf[byte_idx] |= u8::from(value) << shift;
        self.bit_pos += 1;
        Ok(())
    }
}

/// A growable bit writer backed by a `Vec<u8>`.
///
/// An optional limit turns it into a bounded writer that reports
/// [`BitError::BufferOverflow`] once the limit is crossed.
#[derive(Debug, Default)]
pub struct BitVecWriter {
    /// The accumulated bytes.
    bytes: Vec<u8>,
    /// Current byte being written (not yet pushed to bytes).
    current_byte: u8,
    /// Number of bits written to `current_byte` (0-7).
    bit_count: u8,
    /// Maximum number of bits accepted, if bounded.
    limit_bits: Option<usize>,
}

impl BitVecWriter {
    /// Creates a new empty, unbounded writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new writer with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Creates a writer that refuses to grow beyond `max_bytes`.
    #[must_use]
    pub fn bounded(max_bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(max_bytes),
            limit_bits: Some(max_bytes.saturating_mul(8)),
            ..Self::default()
        }
    }

    /// Finishes writing and returns the byte buffer.
    ///
    /// If the last byte is incomplete, it is padded with zeros on the right.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.current_byte <<= 8 - self.bit_count;
            self.bytes.push(self.current_byte);
        }
        self.bytes
    }
}

impl BitWrite for BitVecWriter {
    fn bits_written(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    fn write_bit(&mut self, value: bool) -> BitResult<()> {
        if let Some(limit) = self.limit_bits {
            if self.bits_written() >= limit {
                return Err(BitError::BufferOverflow {
                    attempted: self.bits_written() + 1,
                    capacity: limit,
                });
            }
        }
        self.current_byte = (self.current_byte << 1) | u8::from(value);
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.current_byte);
            self.current_byte = 0;
            self.bit_count = 0;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = BitVecWriter::new();
        assert_eq!(writer.bits_written(), 0);
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn write_single_bit_true() {
        let mut writer = BitVecWriter::new();
        writer.write_bit(true).unwrap();
        assert_eq!(writer.bits_written(), 1);
        // Single bit 1, padded with 7 zeros
        assert_eq!(writer.finish(), vec![0b1000_0000]);
    }

    #[test]
    fn write_partial_byte_with_padding() {
        let mut writer = BitVecWriter::new();
        for bit in [true, true, false, true, false] {
            writer.write_bit(bit).unwrap();
        }
        assert_eq!(writer.finish(), vec![0b1101_0000]);
    }

    #[test]
    fn write_bits_zero_width() {
        let mut writer = BitVecWriter::new();
        writer.write_bits(0, 0).unwrap();
        assert_eq!(writer.bits_written(), 0);
    }

    #[test]
    fn write_bits_across_byte_boundary() {
        let mut writer = BitVecWriter::new();
        writer.write_bits(0b1111, 4).unwrap();
        writer.write_bits(0b1010_1010, 8).unwrap();
        assert_eq!(writer.finish(), vec![0b1111_1010, 0b1010_0000]);
    }

    #[test]
    fn write_bits_invalid_count() {
        let mut writer = BitVecWriter::new();
        let result = writer.write_bits(0, 65);
        assert!(matches!(
            result,
            Err(BitError::InvalidBitCount {
                bits: 65,
                max_bits: 64
            })
        ));
    }

    #[test]
    fn write_bits_value_out_of_range() {
        let mut writer = BitVecWriter::new();
        let result = writer.write_bits(256, 8);
        assert!(matches!(
            result,
            Err(BitError::ValueOutOfRange {
                value: 256,
                bits: 8
            })
        ));
    }

    #[test]
    fn write_bits_64_bits() {
        let mut writer = BitVecWriter::new();
        writer.write_bits(u64::MAX, 64).unwrap();
        assert_eq!(writer.finish(), vec![0xFF; 8]);
    }

    #[test]
    fn write_bytes_unaligned() {
        let mut writer = BitVecWriter::new();
        writer.write_bit(true).unwrap();
        writer.write_bytes(&[0xFF, 0x00]).unwrap();
        assert_eq!(writer.finish(), vec![0xFF, 0x80, 0x00]);
    }

    #[test]
    fn align_to_byte_pads_zeros() {
        let mut writer = BitVecWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.align_to_byte().unwrap();
        assert_eq!(writer.bits_written(), 8);
        writer.align_to_byte().unwrap();
        assert_eq!(writer.bits_written(), 8);
        assert_eq!(writer.finish(), vec![0b1010_0000]);
    }

    #[test]
    fn bounded_vec_writer_overflows() {
        let mut writer = BitVecWriter::bounded(1);
        writer.write_bits(0xAB, 8).unwrap();
        let err = writer.write_bit(true).unwrap_err();
        assert_eq!(
            err,
            BitError::BufferOverflow {
                attempted: 9,
                capacity: 8
            }
        );
    }

    #[test]
    fn slice_writer_clears_stale_bytes() {
        let mut buf = [0xFFu8; 2];
        let mut writer = BitWriter::new(&mut buf);
        writer.write_bits(0b1, 1).unwrap();
        assert_eq!(writer.finish(), 1);
        assert_eq!(buf, [0b1000_0000, 0xFF]);
    }

    #[test]
    fn slice_writer_overflow() {
        let mut buf = [0u8; 1];
        let mut writer = BitWriter::new(&mut buf);
        writer.write_bits(0x7F, 7).unwrap();
        let err = writer.write_bits(0b11, 2).unwrap_err();
        assert!(matches!(err, BitError::BufferOverflow { capacity: 8, .. }));
    }
}
