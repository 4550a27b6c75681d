//! WSM and WSA construction and parsing for the dot3 message layer.
//!
//! This crate ties the UPER engine and the MAC/LLC envelope together into the
//! IEEE 1609.3 message codecs, and holds the provider registry that WSAs are
//! synthesized from.
//!
//! # Features
//!
//! - PSID p-encoding
//! - WSM build/parse with N-Header extensions
//! - WSA build/parse with per-list tagged extensions
//! - Provider service request registry with Channel-Info deduplication
//!
//! # Design Principles
//!
//! - **Validate first** - Every builder and registry mutator checks its inputs before touching state.
//! - **Caller-provided buffers** - Output is written only once it is known to fit.
//! - **Deterministic** - The same registry contents produce the same WSA bytes.
//! - **Swappable engine** - Every codec call goes through [`uper::UperCodec`].

pub mod asn;
mod error;
pub mod ext;
mod fields;
mod limits;
mod mpdu;
mod pci;
mod psid;
mod psr;
mod types;
pub mod validate;
mod wsa;
mod wsm;

pub use error::{CodecError, CodecResult, ExtContext, ParamKind, RegistryError, SizeKind};
pub use ext::{ChannelInfoExt, Extension, NHeaderExt, RoutingExt, ServiceInfoExt, WsaHeaderExt};
pub use limits::CodecLimits;
pub use mpdu::{construct_wsm_mpdu, parse_wsm_mpdu};
pub use pci::{PciTable, DEFAULT_EIRP, FIRST_CHANNEL, LAST_CHANNEL};
pub use psid::{decode_psid, encode_psid, encoded_psid_len, psid_from_value, psid_to_value};
pub use psr::{ProviderRegistry, PsrTable, WsaLists};
pub use types::{
    ChannelAccess, EdcaParameterRecord, EdcaParameterSet, IpService, Location2D, Location3D,
    ParsedWsa, PciEntry, Psid, PsrEntry, PsrOptions, RoutingAdvertisement, WsaChannelInfo,
    WsaHeader, WsaMessage, WsaServiceInfo, WsmRxParams, WsmTxParams, WsmpHeader,
};
pub use uper::{PerCodec, UperCodec};
pub use wire::{Limits as WireLimits, MacAddress};
pub use wsa::{construct_wsa, encode_wsa, parse_wsa, MAX_WSA_LEN, WSA_VERSION};
pub use wsm::{construct_wsm, parse_wsm, MAX_WSM_LEN, WSMP_VERSION};
