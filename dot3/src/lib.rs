//! IEEE 1609.3 WAVE message layer.
//!
//! [`Dot3`] is the entry point: it owns the provider registry (PSR table and
//! PCI table) and builds and parses WSM and WSA MPDUs against it.
//!
//! ```
//! use dot3::{Dot3, Dot3Config};
//! use dot3::codec::{Psid, WsmTxParams};
//!
//! let dot3 = Dot3::new(&Dot3Config::default()).unwrap();
//! let params = WsmTxParams { psid: Psid::new(0x20), ..WsmTxParams::default() };
//! let mut mpdu = [0u8; 64];
//! let len = dot3.construct_wsm_mpdu(&params, Some(b"hello"), &mut mpdu).unwrap();
//!
//! let mut body = [0u8; 16];
//! let received = dot3.parse_wsm_mpdu(&mpdu[..len], &mut body).unwrap();
//! assert_eq!(&body[..received.payload_len], b"hello");
//! ```

mod config;
mod context;
mod error;

pub use config::{init_logging, Dot3Config, LimitsConfig, LogFormat, LoggingConfig};
pub use context::{Dot3, Received, WsaTxParams, WsmReceived};
pub use error::{Dot3Error, Dot3Result};

pub use codec;
