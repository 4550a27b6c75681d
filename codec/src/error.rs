//! Error types for codec operations.

use std::fmt;

use crate::types::Psid;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while building or parsing WSMs and WSAs, or while
/// mutating the provider registry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodecError {
    /// A parameter is outside its domain.
    InvalidParam { kind: ParamKind, value: i64 },

    /// A PSID value has a nesting shape the varint scheme does not produce.
    InvalidPsidFormat,

    /// Encoded or decoded item exceeds its protocol maximum.
    TooLong { kind: SizeKind, len: usize, max: usize },

    /// Encoded or decoded item is below its protocol minimum.
    TooShort { kind: SizeKind, len: usize, min: usize },

    /// Caller-provided output buffer is too small.
    BufferTooSmall { needed: usize, available: usize },

    /// The UPER engine failed to encode or decode.
    Uper(uper::UperError),

    /// The engine produced a value whose shape the protocol rules out.
    AbnormalCodec { what: &'static str },

    /// Received envelope is not a WSMP frame.
    Envelope(wire::EnvelopeError),

    /// Envelope could not be written.
    EnvelopeEncode(wire::EncodeError),

    /// WSMP subtype other than null networking.
    UnsupportedSubtype { index: u32 },

    /// WSMP transport other than broadcast.
    UnsupportedTransport { index: u32 },

    /// WSMP or WSA version other than the supported one.
    UnsupportedVersion { found: u8 },

    /// WSA message id other than `saMessage`.
    InvalidMessageType { found: u32 },

    /// Extension tag outside the table of its context.
    UnknownExtension { context: ExtContext, tag: u8 },

    /// More extensions than the context allows.
    TooManyExtensions {
        context: ExtContext,
        count: usize,
        max: usize,
    },

    /// Provider registry rejected the operation.
    Registry(RegistryError),

    /// The operation is not supported yet.
    NotSupported { operation: &'static str },
}

/// Parameter families checked by the validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Psid,
    Priority,
    ChannelNumber,
    DataRate,
    TxPower,
    Latitude,
    Longitude,
    Elevation,
    PscLength,
    WsaId,
    ContentCount,
    AdvertiserIdLength,
    PrefixLength,
    WsaCountThresholdInterval,
    ChannelIndex,
    ChannelAccess,
}

/// Items whose size is bounded by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    Payload,
    Wsm,
    Wsa,
}

/// Extension tag spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtContext {
    NHeader,
    THeader,
    WsaHeader,
    ServiceInfo,
    ChannelInfo,
    RoutingAdvertisement,
}

/// Provider registry failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The PSR table already holds `capacity` entries.
    TableFull { capacity: usize },

    /// An entry with this PSID is already registered.
    DuplicatePsid { psid: Psid },

    /// No entry with this PSID.
    NotFound { psid: Psid },

    /// No PCI entry for the requested service channel.
    NoRelatedChannelInfo { channel: u8 },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParam { kind, value } => write!(f, "invalid {kind}: {value}"),
            Self::InvalidPsidFormat => write!(f, "invalid PSID format"),
            Self::TooLong { kind, len, max } => {
                write!(f, "{kind} too long: {len} bytes, max {max}")
            }
            Self::TooShort { kind, len, min } => {
                write!(f, "{kind} too short: {len} bytes, min {min}")
            }
            Self::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {needed}, have {available}")
            }
            Self::Uper(e) => write!(f, "UPER codec error: {e}"),
            Self::AbnormalCodec { what } => {
                write!(f, "abnormal codec operation: unexpected {what}")
            }
            Self::Envelope(e) => write!(f, "envelope error: {e}"),
            Self::EnvelopeEncode(e) => write!(f, "envelope encode error: {e}"),
            Self::UnsupportedSubtype { index } => {
                write!(f, "unsupported WSMP subtype {index}")
            }
            Self::UnsupportedTransport { index } => {
                write!(f, "unsupported WSMP transport {index}")
            }
            Self::UnsupportedVersion { found } => write!(f, "unsupported version {found}"),
            Self::InvalidMessageType { found } => {
                write!(f, "invalid WSA message type {found}")
            }
            Self::UnknownExtension { context, tag } => {
                write!(f, "unknown {context} extension {tag}")
            }
            Self::TooManyExtensions {
                context,
                count,
                max,
            } => {
                write!(f, "too many {context} extensions: {count} > {max}")
            }
            Self::Registry(e) => write!(f, "registry error: {e}"),
            Self::NotSupported { operation } => write!(f, "{operation} is not supported"),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Psid => "PSID",
            Self::Priority => "priority",
            Self::ChannelNumber => "channel number",
            Self::DataRate => "data rate",
            Self::TxPower => "transmit power",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Elevation => "elevation",
            Self::PscLength => "PSC length",
            Self::WsaId => "WSA id",
            Self::ContentCount => "content count",
            Self::AdvertiserIdLength => "advertiser id length",
            Self::PrefixLength => "IPv6 prefix length",
            Self::WsaCountThresholdInterval => "WSA count threshold interval",
            Self::ChannelIndex => "channel index",
            Self::ChannelAccess => "channel access",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for SizeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Payload => "payload",
            Self::Wsm => "WSM",
            Self::Wsa => "WSA",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for ExtContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NHeader => "N-Header",
            Self::THeader => "T-Header",
            Self::WsaHeader => "WSA header",
            Self::ServiceInfo => "Service-Info",
            Self::ChannelInfo => "Channel-Info",
            Self::RoutingAdvertisement => "Routing-Advertisement",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableFull { capacity } => write!(f, "PSR table full ({capacity} entries)"),
            Self::DuplicatePsid { psid } => write!(f, "PSID {psid} already registered"),
            Self::NotFound { psid } => write!(f, "PSID {psid} not registered"),
            Self::NoRelatedChannelInfo { channel } => {
                write!(f, "no channel info for channel {channel}")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Uper(e) => Some(e),
            Self::Envelope(e) => Some(e),
            Self::EnvelopeEncode(e) => Some(e),
            Self::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<uper::UperError> for CodecError {
    fn from(err: uper::UperError) -> Self {
        Self::Uper(err)
    }
}

impl From<wire::EnvelopeError> for CodecError {
    fn from(err: wire::EnvelopeError) -> Self {
        Self::Envelope(err)
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        Self::EnvelopeEncode(err)
    }
}

impl From<RegistryError> for CodecError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}
