//! Unaligned Packed Encoding Rules for the dot3 message codecs.
//!
//! Abstract syntax is declared with [`AsnType`] descriptors (usually as
//! `static` tables), values are built as [`AsnValue`] trees, and a
//! [`UperCodec`] turns one into a complete octet-aligned encoding.
//!
//! Only the subset WAVE messages need is supported: constrained and
//! extensible integers, enumerations, octet strings, sequences, lists,
//! choices and open types. Extension additions and fragmented lengths are
//! rejected.
//!
//! # Example
//!
//! ```
//! use uper::{AsnType, AsnValue, PerCodec, UperCodec};
//!
//! static VERSION: AsnType = AsnType::integer(0, 7);
//!
//! let codec = PerCodec::new();
//! let bytes = codec.encode(&VERSION, &AsnValue::Integer(3)).unwrap();
//! assert_eq!(bytes, vec![0b0110_0000]);
//! assert_eq!(codec.decode(&VERSION, &bytes).unwrap(), AsnValue::Integer(3));
//! ```

mod codec;
mod decoder;
mod encoder;
mod error;
mod types;
mod value;

pub use codec::{PerCodec, UperCodec};
pub use error::{UperError, UperResult};
pub use types::{Alternative, AsnType, Field, IntegerRange, Size};
pub use value::AsnValue;
