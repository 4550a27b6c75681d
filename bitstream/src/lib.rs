//! Low-level bit packing primitives for the dot3 codec stack.
//!
//! This crate provides [`BitWriter`], [`BitVecWriter`] and [`BitReader`] for
//! bit-level encoding and decoding, most significant bit first.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads/writes are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about ASN.1 or WAVE messages.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bitstream::{BitReader, BitVecWriter, BitWrite};
//!
//! let mut writer = BitVecWriter::new();
//! writer.write_bit(true).unwrap();
//! writer.write_bits(42, 7).unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bit().unwrap(), true);
//! assert_eq!(reader.read_bits(7).unwrap(), 42);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{BitError, BitResult};
pub use reader::BitReader;
pub use writer::{BitVecWriter, BitWrite, BitWriter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_written_is_nothing_read() {
        let bytes = BitVecWriter::new().finish();
        assert!(bytes.is_empty());
        assert!(BitReader::new(&bytes).is_empty());
    }

    #[test]
    fn wsa_preamble_layout() {
        // messageID (1 bit), version (3), body bitmap (4), saID (4), contentCount (4)
        let mut writer = BitVecWriter::new();
        writer.write_bit(false).unwrap();
        writer.write_bits(3, 3).unwrap();
        writer.write_bits(0, 4).unwrap();
        writer.write_bits(0, 4).unwrap();
        writer.write_bits(0, 4).unwrap();
        let bytes = writer.finish();
        assert_eq!(bytes, vec![0x30, 0x00]);

        let mut reader = BitReader::new(&bytes);
        assert!(!reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(3).unwrap(), 3);
        assert_eq!(reader.bits_remaining(), 12);
    }

    #[test]
    fn octets_after_odd_prefix() {
        let mut writer = BitVecWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bytes(&[0xFF, 0x01]).unwrap();
        writer.write_bits(42, 7).unwrap();
        let bytes = writer.finish();
        // 3 + 16 + 7 bits pad out to four octets
        assert_eq!(bytes.len(), 4);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bytes(2).unwrap(), vec![0xFF, 0x01]);
        assert_eq!(reader.read_bits(7).unwrap(), 42);
    }

    #[test]
    fn slice_and_vec_writers_agree() {
        let mut buf = [0u8; 4];
        let mut bounded = BitWriter::new(&mut buf);
        let mut growable = BitVecWriter::new();
        for writer in [&mut bounded as &mut dyn BitWrite, &mut growable] {
            writer.write_bits(0b110, 3).unwrap();
            writer.write_bytes(&[0x5A]).unwrap();
            writer.align_to_byte().unwrap();
        }
        let used = bounded.finish();
        assert_eq!(&buf[..used], growable.finish().as_slice());
    }
}
