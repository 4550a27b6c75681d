//! 802.11 MAC and LLC framing for the dot3 codec.
//!
//! This crate handles the fixed-layout envelope that wraps every WAVE Short
//! Message on the air: the QoS-Data MAC header and the LLC Ethertype. It does
//! not know about WSMP headers or message bodies, only the frame around them.
//!
//! # Design Principles
//!
//! - **Structured bit fields** - Frame control and QoS control are records with pack/unpack.
//! - **Bounded decoding** - Frame length is validated against limits before any field is read.
//! - **No domain knowledge** - This crate handles framing, not services or channels.

mod envelope;
mod error;
mod header;
mod limits;
mod mac;

pub use envelope::{construct_envelope, parse_envelope, EnvelopeParams, MAX_USER_PRIORITY};
pub use error::{EncodeError, EnvelopeError, WireResult};
pub use header::{
    AckPolicy, FrameControl, QosControl, ENVELOPE_LEN, FRAME_SUBTYPE_QOS_DATA, FRAME_TYPE_DATA,
    LLC_HEADER_LEN, MAC_HEADER_LEN, MAX_MPDU_LEN, MAX_MPDU_LEN_WITH_CRC, MAX_MSDU_LEN,
    MAX_WSM_BODY_LEN, MAX_WSM_BODY_LEN_ALL_EXTENSIONS, MIN_MPDU_LEN, WILDCARD_BSSID,
    WSMP_ETHERTYPE, WSMP_HEADER_MAX_LEN, WSMP_HEADER_MIN_LEN,
};
pub use limits::Limits;
pub use mac::{MacAddress, MacParseError};
