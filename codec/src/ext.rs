//! Tagged extensions.
//!
//! Every extension list on the wire is a `SEQUENCE OF { extensionId, value }`
//! where `value` is an open type whose syntax depends on the id and on the
//! list it appears in. Each list context has its own closed set of variants;
//! a tag outside that set is an [`CodecError::UnknownExtension`].

use std::net::Ipv6Addr;

use uper::{AsnType, AsnValue, UperCodec};
use wire::MacAddress;

use crate::asn;
use crate::error::{CodecError, CodecResult, ExtContext, ParamKind};
use crate::fields::{bytes, fixed_octets, int, integer, list, octets, required, sequence};
use crate::types::{
    ChannelAccess, EdcaParameterRecord, EdcaParameterSet, Location2D, Location3D,
    RoutingAdvertisement, WsaChannelInfo, WsaHeader, WsaServiceInfo, WsmTxParams, WsmpHeader,
};

pub const TAG_TX_POWER: u8 = 4;
pub const TAG_LOCATION_2D: u8 = 5;
pub const TAG_LOCATION_3D: u8 = 6;
pub const TAG_ADVERTISER_ID: u8 = 7;
pub const TAG_PSC: u8 = 8;
pub const TAG_IPV6_ADDRESS: u8 = 9;
pub const TAG_SERVICE_PORT: u8 = 10;
pub const TAG_PROVIDER_MAC: u8 = 11;
pub const TAG_EDCA: u8 = 12;
pub const TAG_SECONDARY_DNS: u8 = 13;
pub const TAG_GATEWAY_MAC: u8 = 14;
pub const TAG_CHANNEL_NUMBER: u8 = 15;
pub const TAG_DATA_RATE: u8 = 16;
pub const TAG_REPEAT_RATE: u8 = 17;
pub const TAG_RCPI_THRESHOLD: u8 = 19;
pub const TAG_WSA_COUNT_THRESHOLD: u8 = 20;
pub const TAG_CHANNEL_ACCESS: u8 = 21;
pub const TAG_WSA_COUNT_THRESHOLD_INTERVAL: u8 = 22;
/// Channel load. Defined by the standard but not accepted in any list here.
pub const TAG_CHANNEL_LOAD: u8 = 23;

/// A closed set of extensions valid in one list context.
pub trait Extension: Sized {
    const CONTEXT: ExtContext;

    fn tag(&self) -> u8;

    /// Builds the open-type value carried after the tag.
    fn to_open(&self, codec: &dyn UperCodec) -> CodecResult<AsnValue>;

    /// Reads the open-type value of a received extension with `tag`.
    fn from_open(codec: &dyn UperCodec, tag: u8, value: &AsnValue) -> CodecResult<Self>;
}

fn open(codec: &dyn UperCodec, ty: &AsnType, value: AsnValue) -> CodecResult<AsnValue> {
    Ok(codec.encode_open(ty, &value)?)
}

fn unopen(codec: &dyn UperCodec, ty: &AsnType, value: &AsnValue) -> CodecResult<AsnValue> {
    Ok(codec.decode_open(ty, value)?)
}

/// Builds an extension list value, or `None` when `exts` is empty so the
/// optional component is left out.
pub fn encode_extensions<E: Extension>(
    codec: &dyn UperCodec,
    exts: &[E],
) -> CodecResult<Option<AsnValue>> {
    if exts.is_empty() {
        return Ok(None);
    }
    let items = exts
        .iter()
        .map(|ext| {
            Ok(AsnValue::Sequence(vec![
                Some(int(ext.tag())),
                Some(ext.to_open(codec)?),
            ]))
        })
        .collect::<CodecResult<Vec<_>>>()?;
    Ok(Some(AsnValue::SequenceOf(items)))
}

fn entry(item: &AsnValue) -> CodecResult<(u8, &AsnValue)> {
    let slots = sequence(item, "extension")?;
    let tag = integer(required(slots, asn::EXT_ID, "extension id")?, "extension id")?;
    let value = required(slots, asn::EXT_VALUE, "extension value")?;
    Ok((tag, value))
}

/// Reads a received extension list. An absent list yields no extensions.
pub fn decode_extensions<E: Extension>(
    codec: &dyn UperCodec,
    value: Option<&AsnValue>,
) -> CodecResult<Vec<E>> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    list(value, "extension list")?
        .iter()
        .map(|item| {
            let (tag, value) = entry(item)?;
            E::from_open(codec, tag, value)
        })
        .collect()
}

/// Fails on the first extension of a list whose context defines none.
pub fn reject_extensions(context: ExtContext, value: Option<&AsnValue>) -> CodecResult<()> {
    let Some(value) = value else {
        return Ok(());
    };
    match list(value, "extension list")?.first() {
        Some(item) => {
            let (tag, _) = entry(item)?;
            Err(CodecError::UnknownExtension { context, tag })
        }
        None => Ok(()),
    }
}

fn unknown<E: Extension>(tag: u8) -> CodecError {
    CodecError::UnknownExtension {
        context: E::CONTEXT,
        tag,
    }
}

fn ipv6(value: &AsnValue, what: &'static str) -> CodecResult<Ipv6Addr> {
    fixed_octets::<16>(value, what).map(Ipv6Addr::from)
}

fn mac(value: &AsnValue, what: &'static str) -> CodecResult<MacAddress> {
    fixed_octets::<6>(value, what).map(MacAddress::new)
}

// N-Header

/// WSMP N-Header extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NHeaderExt {
    ChannelNumber(u8),
    DataRate(u8),
    TxPower(i8),
}

impl NHeaderExt {
    /// Most extensions a received N-Header may carry.
    pub const MAX_COUNT: usize = 3;

    /// Present extensions of `params`, in transmit order.
    #[must_use]
    pub fn from_tx_params(params: &WsmTxParams) -> Vec<Self> {
        let mut exts = Vec::with_capacity(Self::MAX_COUNT);
        if let Some(channel) = params.channel_number {
            exts.push(Self::ChannelNumber(channel));
        }
        if let Some(rate) = params.data_rate {
            exts.push(Self::DataRate(rate));
        }
        if let Some(power) = params.tx_power {
            exts.push(Self::TxPower(power));
        }
        exts
    }

    pub fn apply(self, header: &mut WsmpHeader) {
        match self {
            Self::ChannelNumber(v) => header.channel_number = Some(v),
            Self::DataRate(v) => header.data_rate = Some(v),
            Self::TxPower(v) => header.tx_power = Some(v),
        }
    }
}

impl Extension for NHeaderExt {
    const CONTEXT: ExtContext = ExtContext::NHeader;

    fn tag(&self) -> u8 {
        match self {
            Self::ChannelNumber(_) => TAG_CHANNEL_NUMBER,
            Self::DataRate(_) => TAG_DATA_RATE,
            Self::TxPower(_) => TAG_TX_POWER,
        }
    }

    fn to_open(&self, codec: &dyn UperCodec) -> CodecResult<AsnValue> {
        match *self {
            Self::ChannelNumber(v) => open(codec, &asn::CHANNEL_NUMBER, int(v)),
            Self::DataRate(v) => open(codec, &asn::DATA_RATE, int(v)),
            Self::TxPower(v) => open(codec, &asn::TX_POWER_USED, int(v)),
        }
    }

    fn from_open(codec: &dyn UperCodec, tag: u8, value: &AsnValue) -> CodecResult<Self> {
        match tag {
            TAG_CHANNEL_NUMBER => {
                let v = unopen(codec, &asn::CHANNEL_NUMBER, value)?;
                Ok(Self::ChannelNumber(integer(&v, "channel number")?))
            }
            TAG_DATA_RATE => {
                let v = unopen(codec, &asn::DATA_RATE, value)?;
                Ok(Self::DataRate(integer(&v, "data rate")?))
            }
            TAG_TX_POWER => {
                let v = unopen(codec, &asn::TX_POWER_USED, value)?;
                Ok(Self::TxPower(integer(&v, "transmit power")?))
            }
            _ => Err(unknown::<Self>(tag)),
        }
    }
}

// WSA header

/// WSA header extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsaHeaderExt {
    RepeatRate(u8),
    Location2D(Location2D),
    Location3D(Location3D),
    AdvertiserId(String),
}

impl WsaHeaderExt {
    #[must_use]
    pub fn from_header(header: &WsaHeader) -> Vec<Self> {
        let mut exts = Vec::new();
        if let Some(rate) = header.repeat_rate {
            exts.push(Self::RepeatRate(rate));
        }
        if let Some(location) = header.location_2d {
            exts.push(Self::Location2D(location));
        }
        if let Some(location) = header.location_3d {
            exts.push(Self::Location3D(location));
        }
        if let Some(id) = &header.advertiser_id {
            exts.push(Self::AdvertiserId(id.clone()));
        }
        exts
    }

    pub fn apply(self, header: &mut WsaHeader) {
        match self {
            Self::RepeatRate(v) => header.repeat_rate = Some(v),
            Self::Location2D(v) => header.location_2d = Some(v),
            Self::Location3D(v) => header.location_3d = Some(v),
            Self::AdvertiserId(v) => header.advertiser_id = Some(v),
        }
    }
}

impl Extension for WsaHeaderExt {
    const CONTEXT: ExtContext = ExtContext::WsaHeader;

    fn tag(&self) -> u8 {
        match self {
            Self::RepeatRate(_) => TAG_REPEAT_RATE,
            Self::Location2D(_) => TAG_LOCATION_2D,
            Self::Location3D(_) => TAG_LOCATION_3D,
            Self::AdvertiserId(_) => TAG_ADVERTISER_ID,
        }
    }

    fn to_open(&self, codec: &dyn UperCodec) -> CodecResult<AsnValue> {
        match self {
            Self::RepeatRate(v) => open(codec, &asn::REPEAT_RATE, int(*v)),
            Self::Location2D(loc) => open(
                codec,
                &asn::TWO_D_LOCATION,
                AsnValue::Sequence(vec![Some(int(loc.latitude)), Some(int(loc.longitude))]),
            ),
            Self::Location3D(loc) => open(
                codec,
                &asn::THREE_D_LOCATION,
                AsnValue::Sequence(vec![
                    Some(int(loc.latitude)),
                    Some(int(loc.longitude)),
                    Some(int(loc.elevation)),
                ]),
            ),
            Self::AdvertiserId(id) => open(codec, &asn::ADVERTISER_IDENTIFIER, bytes(id.as_bytes())),
        }
    }

    fn from_open(codec: &dyn UperCodec, tag: u8, value: &AsnValue) -> CodecResult<Self> {
        match tag {
            TAG_REPEAT_RATE => {
                let v = unopen(codec, &asn::REPEAT_RATE, value)?;
                Ok(Self::RepeatRate(integer(&v, "repeat rate")?))
            }
            TAG_LOCATION_2D => {
                let v = unopen(codec, &asn::TWO_D_LOCATION, value)?;
                let slots = sequence(&v, "2D location")?;
                Ok(Self::Location2D(Location2D {
                    latitude: integer(required(slots, asn::LOC_LATITUDE, "latitude")?, "latitude")?,
                    longitude: integer(
                        required(slots, asn::LOC_LONGITUDE, "longitude")?,
                        "longitude",
                    )?,
                }))
            }
            TAG_LOCATION_3D => {
                let v = unopen(codec, &asn::THREE_D_LOCATION, value)?;
                let slots = sequence(&v, "3D location")?;
                Ok(Self::Location3D(Location3D {
                    latitude: integer(required(slots, asn::LOC_LATITUDE, "latitude")?, "latitude")?,
                    longitude: integer(
                        required(slots, asn::LOC_LONGITUDE, "longitude")?,
                        "longitude",
                    )?,
                    elevation: integer(
                        required(slots, asn::LOC_ELEVATION, "elevation")?,
                        "elevation",
                    )?,
                }))
            }
            TAG_ADVERTISER_ID => {
                let v = unopen(codec, &asn::ADVERTISER_IDENTIFIER, value)?;
                let raw = octets(&v, "advertiser id")?;
                Ok(Self::AdvertiserId(String::from_utf8_lossy(raw).into_owned()))
            }
            _ => Err(unknown::<Self>(tag)),
        }
    }
}

// Service-Info

/// Service-Info extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceInfoExt {
    Psc(Vec<u8>),
    Ipv6Address(Ipv6Addr),
    ServicePort(u16),
    ProviderMac(MacAddress),
    RcpiThreshold(u8),
    WsaCountThreshold(u8),
    WsaCountThresholdInterval(u8),
}

impl ServiceInfoExt {
    #[must_use]
    pub fn from_service_info(info: &WsaServiceInfo) -> Vec<Self> {
        let mut exts = Vec::new();
        if let Some(psc) = &info.psc {
            exts.push(Self::Psc(psc.clone()));
        }
        if let Some(address) = info.ipv6_address {
            exts.push(Self::Ipv6Address(address));
        }
        if let Some(port) = info.service_port {
            exts.push(Self::ServicePort(port));
        }
        if let Some(mac) = info.provider_mac {
            exts.push(Self::ProviderMac(mac));
        }
        if let Some(v) = info.rcpi_threshold {
            exts.push(Self::RcpiThreshold(v));
        }
        if let Some(v) = info.wsa_count_threshold {
            exts.push(Self::WsaCountThreshold(v));
        }
        if let Some(v) = info.wsa_count_threshold_interval {
            exts.push(Self::WsaCountThresholdInterval(v));
        }
        exts
    }

    pub fn apply(self, info: &mut WsaServiceInfo) {
        match self {
            Self::Psc(v) => info.psc = Some(v),
            Self::Ipv6Address(v) => info.ipv6_address = Some(v),
            Self::ServicePort(v) => info.service_port = Some(v),
            Self::ProviderMac(v) => info.provider_mac = Some(v),
            Self::RcpiThreshold(v) => info.rcpi_threshold = Some(v),
            Self::WsaCountThreshold(v) => info.wsa_count_threshold = Some(v),
            Self::WsaCountThresholdInterval(v) => info.wsa_count_threshold_interval = Some(v),
        }
    }
}

impl Extension for ServiceInfoExt {
    const CONTEXT: ExtContext = ExtContext::ServiceInfo;

    fn tag(&self) -> u8 {
        match self {
            Self::Psc(_) => TAG_PSC,
            Self::Ipv6Address(_) => TAG_IPV6_ADDRESS,
            Self::ServicePort(_) => TAG_SERVICE_PORT,
            Self::ProviderMac(_) => TAG_PROVIDER_MAC,
            Self::RcpiThreshold(_) => TAG_RCPI_THRESHOLD,
            Self::WsaCountThreshold(_) => TAG_WSA_COUNT_THRESHOLD,
            Self::WsaCountThresholdInterval(_) => TAG_WSA_COUNT_THRESHOLD_INTERVAL,
        }
    }

    fn to_open(&self, codec: &dyn UperCodec) -> CodecResult<AsnValue> {
        match self {
            // Fill bits are always zero.
            Self::Psc(psc) => open(
                codec,
                &asn::PROVIDER_SERVICE_CONTEXT,
                AsnValue::Sequence(vec![Some(int(0)), Some(bytes(psc))]),
            ),
            Self::Ipv6Address(address) => {
                open(codec, &asn::IPV6_ADDRESS, bytes(&address.octets()))
            }
            Self::ServicePort(port) => open(codec, &asn::SERVICE_PORT, int(*port)),
            Self::ProviderMac(mac) => open(codec, &asn::MAC_ADDRESS, bytes(mac.as_ref())),
            Self::RcpiThreshold(v) => open(codec, &asn::RCPI_THRESHOLD, int(*v)),
            Self::WsaCountThreshold(v) => open(codec, &asn::WSA_COUNT_THRESHOLD, int(*v)),
            Self::WsaCountThresholdInterval(v) => {
                open(codec, &asn::WSA_COUNT_THRESHOLD_INTERVAL, int(*v))
            }
        }
    }

    fn from_open(codec: &dyn UperCodec, tag: u8, value: &AsnValue) -> CodecResult<Self> {
        match tag {
            TAG_PSC => {
                let v = unopen(codec, &asn::PROVIDER_SERVICE_CONTEXT, value)?;
                let slots = sequence(&v, "provider service context")?;
                let psc = octets(required(slots, asn::PSC_VALUE, "PSC")?, "PSC")?;
                Ok(Self::Psc(psc.to_vec()))
            }
            TAG_IPV6_ADDRESS => {
                let v = unopen(codec, &asn::IPV6_ADDRESS, value)?;
                Ok(Self::Ipv6Address(ipv6(&v, "IPv6 address")?))
            }
            TAG_SERVICE_PORT => {
                let v = unopen(codec, &asn::SERVICE_PORT, value)?;
                Ok(Self::ServicePort(integer(&v, "service port")?))
            }
            TAG_PROVIDER_MAC => {
                let v = unopen(codec, &asn::MAC_ADDRESS, value)?;
                Ok(Self::ProviderMac(mac(&v, "provider MAC address")?))
            }
            TAG_RCPI_THRESHOLD => {
                let v = unopen(codec, &asn::RCPI_THRESHOLD, value)?;
                Ok(Self::RcpiThreshold(integer(&v, "RCPI threshold")?))
            }
            TAG_WSA_COUNT_THRESHOLD => {
                let v = unopen(codec, &asn::WSA_COUNT_THRESHOLD, value)?;
                Ok(Self::WsaCountThreshold(integer(&v, "WSA count threshold")?))
            }
            TAG_WSA_COUNT_THRESHOLD_INTERVAL => {
                let v = unopen(codec, &asn::WSA_COUNT_THRESHOLD_INTERVAL, value)?;
                Ok(Self::WsaCountThresholdInterval(integer(
                    &v,
                    "WSA count threshold interval",
                )?))
            }
            _ => Err(unknown::<Self>(tag)),
        }
    }
}

// Channel-Info

/// Channel-Info extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelInfoExt {
    Edca(EdcaParameterSet),
    ChannelAccess(ChannelAccess),
}

impl ChannelInfoExt {
    #[must_use]
    pub fn from_channel_info(info: &WsaChannelInfo) -> Vec<Self> {
        let mut exts = Vec::new();
        if let Some(edca) = info.edca {
            exts.push(Self::Edca(edca));
        }
        if let Some(access) = info.channel_access {
            exts.push(Self::ChannelAccess(access));
        }
        exts
    }

    pub fn apply(self, info: &mut WsaChannelInfo) {
        match self {
            Self::Edca(v) => info.edca = Some(v),
            Self::ChannelAccess(v) => info.channel_access = Some(v),
        }
    }
}

fn edca_record_value(record: &EdcaParameterRecord) -> AsnValue {
    AsnValue::Sequence(vec![
        Some(int(record.res)),
        Some(int(record.aci)),
        Some(int(record.acm)),
        Some(int(record.aifsn)),
        Some(int(record.ecw_max)),
        Some(int(record.ecw_min)),
        Some(int(record.txop_limit)),
    ])
}

fn edca_field(slots: &[Option<AsnValue>], index: usize, what: &'static str) -> CodecResult<u8> {
    integer(required(slots, index, what)?, what)
}

fn edca_record_from_value(value: &AsnValue) -> CodecResult<EdcaParameterRecord> {
    let slots = sequence(value, "EDCA record")?;
    Ok(EdcaParameterRecord {
        res: edca_field(slots, asn::EDCA_RES, "EDCA res")?,
        aci: edca_field(slots, asn::EDCA_ACI, "EDCA aci")?,
        acm: edca_field(slots, asn::EDCA_ACM, "EDCA acm")?,
        aifsn: edca_field(slots, asn::EDCA_AIFSN, "EDCA aifsn")?,
        ecw_max: edca_field(slots, asn::EDCA_ECW_MAX, "EDCA ecwMax")?,
        ecw_min: edca_field(slots, asn::EDCA_ECW_MIN, "EDCA ecwMin")?,
        txop_limit: integer(
            required(slots, asn::EDCA_TXOP_LIMIT, "EDCA txopLimit")?,
            "EDCA txopLimit",
        )?,
    })
}

impl Extension for ChannelInfoExt {
    const CONTEXT: ExtContext = ExtContext::ChannelInfo;

    fn tag(&self) -> u8 {
        match self {
            Self::Edca(_) => TAG_EDCA,
            Self::ChannelAccess(_) => TAG_CHANNEL_ACCESS,
        }
    }

    fn to_open(&self, codec: &dyn UperCodec) -> CodecResult<AsnValue> {
        match self {
            Self::Edca(set) => open(
                codec,
                &asn::EDCA_PARAMETER_SET,
                AsnValue::Sequence(
                    set.records
                        .iter()
                        .map(|record| Some(edca_record_value(record)))
                        .collect(),
                ),
            ),
            Self::ChannelAccess(access) => open(codec, &asn::CHANNEL_ACCESS, int(access.raw())),
        }
    }

    fn from_open(codec: &dyn UperCodec, tag: u8, value: &AsnValue) -> CodecResult<Self> {
        match tag {
            TAG_EDCA => {
                let v = unopen(codec, &asn::EDCA_PARAMETER_SET, value)?;
                let slots = sequence(&v, "EDCA parameter set")?;
                let mut set = EdcaParameterSet::default();
                for (index, record) in set.records.iter_mut().enumerate() {
                    *record = edca_record_from_value(required(slots, index, "EDCA record")?)?;
                }
                Ok(Self::Edca(set))
            }
            TAG_CHANNEL_ACCESS => {
                let v = unopen(codec, &asn::CHANNEL_ACCESS, value)?;
                let raw: u8 = integer(&v, "channel access")?;
                let access = ChannelAccess::from_raw(raw).ok_or(CodecError::InvalidParam {
                    kind: ParamKind::ChannelAccess,
                    value: i64::from(raw),
                })?;
                Ok(Self::ChannelAccess(access))
            }
            _ => Err(unknown::<Self>(tag)),
        }
    }
}

// Routing Advertisement

/// WAVE Routing Advertisement extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingExt {
    SecondaryDns(Ipv6Addr),
    GatewayMac(MacAddress),
}

impl RoutingExt {
    #[must_use]
    pub fn from_routing(routing: &RoutingAdvertisement) -> Vec<Self> {
        let mut exts = Vec::new();
        if let Some(dns) = routing.secondary_dns {
            exts.push(Self::SecondaryDns(dns));
        }
        if let Some(mac) = routing.gateway_mac {
            exts.push(Self::GatewayMac(mac));
        }
        exts
    }

    pub fn apply(self, routing: &mut RoutingAdvertisement) {
        match self {
            Self::SecondaryDns(v) => routing.secondary_dns = Some(v),
            Self::GatewayMac(v) => routing.gateway_mac = Some(v),
        }
    }
}

impl Extension for RoutingExt {
    const CONTEXT: ExtContext = ExtContext::RoutingAdvertisement;

    fn tag(&self) -> u8 {
        match self {
            Self::SecondaryDns(_) => TAG_SECONDARY_DNS,
            Self::GatewayMac(_) => TAG_GATEWAY_MAC,
        }
    }

    fn to_open(&self, codec: &dyn UperCodec) -> CodecResult<AsnValue> {
        match self {
            Self::SecondaryDns(dns) => open(codec, &asn::IPV6_ADDRESS, bytes(&dns.octets())),
            Self::GatewayMac(mac) => open(codec, &asn::MAC_ADDRESS, bytes(mac.as_ref())),
        }
    }

    fn from_open(codec: &dyn UperCodec, tag: u8, value: &AsnValue) -> CodecResult<Self> {
        match tag {
            TAG_SECONDARY_DNS => {
                let v = unopen(codec, &asn::IPV6_ADDRESS, value)?;
                Ok(Self::SecondaryDns(ipv6(&v, "secondary DNS")?))
            }
            TAG_GATEWAY_MAC => {
                let v = unopen(codec, &asn::MAC_ADDRESS, value)?;
                Ok(Self::GatewayMac(mac(&v, "gateway MAC address")?))
            }
            _ => Err(unknown::<Self>(tag)),
        }
    }
}
