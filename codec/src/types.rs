//! Core types for the codec.

use std::fmt;
use std::net::Ipv6Addr;

use wire::MacAddress;

/// A Provider Service Identifier.
///
/// Valid identifiers are `0..=Psid::MAX`; out-of-range values can be held
/// but are rejected by every encoder and registry operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Psid(u32);

impl Psid {
    /// Largest identifier representable in the four-octet p-encoding.
    pub const MAX: u32 = 270_549_119;

    /// PSID reserved for WAVE Service Advertisements.
    pub const WSA: Self = Self(0x87);

    /// Creates a new PSID.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw PSID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns `true` if the identifier is within the encodable range.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 <= Self::MAX
    }
}

impl From<u32> for Psid {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<Psid> for u32 {
    fn from(psid: Psid) -> Self {
        psid.0
    }
}

impl fmt::Display for Psid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Parameters of a WSM to transmit.
///
/// N-Header extensions are emitted only when set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WsmTxParams {
    pub dest: MacAddress,
    pub src: MacAddress,
    /// User priority, 0..=7.
    pub priority: u8,
    pub psid: Psid,
    pub channel_number: Option<u8>,
    /// Data rate in 500 kb/s units.
    pub data_rate: Option<u8>,
    /// Transmit power used, dBm.
    pub tx_power: Option<i8>,
    /// Channel load. Not defined for transmission; a request carrying it fails.
    pub channel_load: Option<u8>,
}

/// Header fields of a received WSMP header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WsmpHeader {
    pub version: u8,
    pub psid: Psid,
    /// `None` when the sender did not include the extension.
    pub channel_number: Option<u8>,
    pub data_rate: Option<u8>,
    pub tx_power: Option<i8>,
}

/// Parameters of a received WSM: envelope fields plus the WSMP header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WsmRxParams {
    pub dest: MacAddress,
    pub src: MacAddress,
    pub priority: u8,
    pub version: u8,
    pub psid: Psid,
    pub channel_number: Option<u8>,
    pub data_rate: Option<u8>,
    pub tx_power: Option<i8>,
}

impl WsmRxParams {
    #[must_use]
    pub const fn new(envelope: wire::EnvelopeParams, header: WsmpHeader) -> Self {
        Self {
            dest: envelope.dest,
            src: envelope.src,
            priority: envelope.priority,
            version: header.version,
            psid: header.psid,
            channel_number: header.channel_number,
            data_rate: header.data_rate,
            tx_power: header.tx_power,
        }
    }
}

/// How a provider accesses its service channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelAccess {
    #[default]
    Continuous,
    AlternatingSch,
    AlternatingCch,
}

impl ChannelAccess {
    #[must_use]
    pub const fn raw(self) -> u8 {
        match self {
            Self::Continuous => 0,
            Self::AlternatingSch => 1,
            Self::AlternatingCch => 2,
        }
    }

    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Continuous),
            1 => Some(Self::AlternatingSch),
            2 => Some(Self::AlternatingCch),
            _ => None,
        }
    }
}

/// An IP service offered by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpService {
    pub address: Ipv6Addr,
    pub port: u16,
}

/// Optional block of a provider service request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PsrOptions {
    /// Provider service context, at most 31 octets.
    pub psc: Option<Vec<u8>>,
    pub ip_service: Option<IpService>,
    pub provider_mac: Option<MacAddress>,
    pub rcpi_threshold: Option<u8>,
    pub wsa_count_threshold: Option<u8>,
    /// Interval in 100 ms units, at least 1.
    pub wsa_count_threshold_interval: Option<u8>,
}

/// A registered intent to advertise a service.
///
/// The PCI entry is referenced by `service_channel` and resolved against the
/// PCI table when needed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PsrEntry {
    pub wsa_id: u8,
    pub psid: Psid,
    pub service_channel: u8,
    pub channel_access: ChannelAccess,
    pub options: PsrOptions,
}

/// Radio parameters of one channel of the supported band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PciEntry {
    pub operating_class: u8,
    pub channel: u8,
    /// EIRP limit, dBm.
    pub eirp: i8,
    /// Nominal data rate in 500 kb/s units.
    pub data_rate: u8,
    pub adaptable: bool,
}

/// Latitude and longitude in 1/10 micro degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location2D {
    pub latitude: i32,
    pub longitude: i32,
}

/// Position with elevation in decimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location3D {
    pub latitude: i32,
    pub longitude: i32,
    pub elevation: i32,
}

/// WSA header. The protocol version is fixed and not carried here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WsaHeader {
    pub wsa_id: u8,
    pub content_count: u8,
    pub repeat_rate: Option<u8>,
    pub location_2d: Option<Location2D>,
    pub location_3d: Option<Location3D>,
    /// 1..=32 bytes of UTF-8.
    pub advertiser_id: Option<String>,
}

/// One entry of a WSA Service-Info list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WsaServiceInfo {
    pub psid: Psid,
    /// 1-based position in the Channel-Info list.
    pub channel_index: u8,
    pub psc: Option<Vec<u8>>,
    pub ipv6_address: Option<Ipv6Addr>,
    pub service_port: Option<u16>,
    pub provider_mac: Option<MacAddress>,
    pub rcpi_threshold: Option<u8>,
    pub wsa_count_threshold: Option<u8>,
    pub wsa_count_threshold_interval: Option<u8>,
}

/// EDCA parameters of one access category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdcaParameterRecord {
    pub res: u8,
    pub aci: u8,
    pub acm: u8,
    pub aifsn: u8,
    pub ecw_max: u8,
    pub ecw_min: u8,
    pub txop_limit: u16,
}

/// EDCA parameters for AC_BE, AC_BK, AC_VI and AC_VO, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdcaParameterSet {
    pub records: [EdcaParameterRecord; 4],
}

/// One entry of a WSA Channel-Info list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsaChannelInfo {
    pub operating_class: u8,
    pub channel: u8,
    pub power_level: i8,
    pub data_rate: u8,
    pub adaptable: bool,
    pub edca: Option<EdcaParameterSet>,
    pub channel_access: Option<ChannelAccess>,
}

impl WsaChannelInfo {
    /// Channel-Info advertising `pci` with no extensions.
    #[must_use]
    pub const fn from_pci(pci: &PciEntry) -> Self {
        Self {
            operating_class: pci.operating_class,
            channel: pci.channel,
            power_level: pci.eirp,
            data_rate: pci.data_rate,
            adaptable: pci.adaptable,
            edca: None,
            channel_access: None,
        }
    }
}

/// WAVE Routing Advertisement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoutingAdvertisement {
    /// Router lifetime, seconds.
    pub lifetime: u16,
    pub ip_prefix: Ipv6Addr,
    pub prefix_len: u8,
    pub default_gateway: Ipv6Addr,
    pub primary_dns: Ipv6Addr,
    pub secondary_dns: Option<Ipv6Addr>,
    pub gateway_mac: Option<MacAddress>,
}

/// A complete WSA body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WsaMessage {
    pub header: WsaHeader,
    pub service_infos: Vec<WsaServiceInfo>,
    pub channel_infos: Vec<WsaChannelInfo>,
    pub routing: Option<RoutingAdvertisement>,
}

/// Result of parsing a received WSA.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedWsa {
    pub version: u8,
    /// Lists are truncated at the configured caps.
    pub message: WsaMessage,
    /// Service-Info entries on the wire, including those past the cap.
    pub total_service_infos: usize,
    /// Channel-Info entries on the wire, including those past the cap.
    pub total_channel_infos: usize,
}
