//! Library side of `dot3-tools`: MPDU inspection and JSON decoding.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use codec::{
    ChannelAccess, ParsedWsa, Psid, RoutingAdvertisement, WsaChannelInfo, WsaServiceInfo,
    WsmRxParams, WsmTxParams,
};
use dot3::{Dot3, Received};
use serde::Serialize;

/// Largest body any WSM can carry.
const PAYLOAD_BUF_LEN: usize = codec::MAX_WSM_LEN;

/// Sizes and addressing of one MPDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub mpdu_len: usize,
    pub envelope_len: usize,
    pub wsm_header_len: usize,
    pub payload_len: usize,
    pub params: WsmRxParams,
    pub wsa: Option<WsaSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WsaSummary {
    pub wsa_id: u8,
    pub content_count: u8,
    pub service_infos: usize,
    pub channel_infos: usize,
    pub has_routing: bool,
}

impl WsaSummary {
    fn new(wsa: &ParsedWsa) -> Self {
        Self {
            wsa_id: wsa.message.header.wsa_id,
            content_count: wsa.message.header.content_count,
            service_infos: wsa.total_service_infos,
            channel_infos: wsa.total_channel_infos,
            has_routing: wsa.message.routing.is_some(),
        }
    }
}

pub fn inspect_mpdu(bytes: &[u8], dot3: &Dot3) -> Result<InspectReport> {
    let mut payload = vec![0u8; PAYLOAD_BUF_LEN];
    let (params, payload_len, wsa) = match dot3.parse_mpdu(bytes, &mut payload)? {
        Received::Wsm(received) => (received.params, received.payload_len, None),
        Received::Wsa {
            params,
            wsa_len,
            wsa,
        } => (params, wsa_len, Some(WsaSummary::new(&wsa))),
    };
    Ok(InspectReport {
        mpdu_len: bytes.len(),
        envelope_len: wire::ENVELOPE_LEN,
        wsm_header_len: bytes.len() - wire::ENVELOPE_LEN - payload_len,
        payload_len,
        params,
        wsa,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedMpdu {
    pub dest: String,
    pub src: String,
    pub priority: u8,
    pub wsmp_version: u8,
    pub psid: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_number: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_rate: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_power: Option<i8>,
    pub body: DecodedBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodedBody {
    Wsm { payload_hex: String },
    Wsa(DecodedWsa),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedWsa {
    pub version: u8,
    pub wsa_id: u8,
    pub content_count: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_rate: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertiser_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<[i32; 3]>,
    pub services: Vec<DecodedService>,
    pub channels: Vec<DecodedChannel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing: Option<DecodedRouting>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedService {
    pub psid: u32,
    pub channel_index: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psc_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_mac: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedChannel {
    pub operating_class: u8,
    pub channel: u8,
    pub power_level: i8,
    pub data_rate: u8,
    pub adaptable: bool,
    pub edca: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_access: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedRouting {
    pub lifetime: u16,
    pub prefix: String,
    pub default_gateway: String,
    pub primary_dns: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_dns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_mac: Option<String>,
}

pub fn decode_mpdu(bytes: &[u8], dot3: &Dot3) -> Result<DecodedMpdu> {
    let mut payload = vec![0u8; PAYLOAD_BUF_LEN];
    let (params, body) = match dot3.parse_mpdu(bytes, &mut payload)? {
        Received::Wsm(received) => (
            received.params,
            DecodedBody::Wsm {
                payload_hex: hex(&payload[..received.payload_len]),
            },
        ),
        Received::Wsa { params, wsa, .. } => (params, DecodedBody::Wsa(decoded_wsa(&wsa))),
    };
    Ok(DecodedMpdu {
        dest: params.dest.to_string(),
        src: params.src.to_string(),
        priority: params.priority,
        wsmp_version: params.version,
        psid: params.psid.raw(),
        channel_number: params.channel_number,
        data_rate: params.data_rate,
        tx_power: params.tx_power,
        body,
    })
}

fn decoded_wsa(wsa: &ParsedWsa) -> DecodedWsa {
    let header = &wsa.message.header;
    let location = header
        .location_3d
        .map(|loc| [loc.latitude, loc.longitude, loc.elevation])
        .or_else(|| {
            header
                .location_2d
                .map(|loc| [loc.latitude, loc.longitude, 0])
        });
    DecodedWsa {
        version: wsa.version,
        wsa_id: header.wsa_id,
        content_count: header.content_count,
        repeat_rate: header.repeat_rate,
        advertiser_id: header.advertiser_id.clone(),
        location,
        services: wsa.message.service_infos.iter().map(decoded_service).collect(),
        channels: wsa.message.channel_infos.iter().map(decoded_channel).collect(),
        routing: wsa.message.routing.as_ref().map(decoded_routing),
    }
}

fn decoded_service(info: &WsaServiceInfo) -> DecodedService {
    DecodedService {
        psid: info.psid.raw(),
        channel_index: info.channel_index,
        psc_hex: info.psc.as_deref().map(hex),
        ipv6_address: info.ipv6_address.map(|addr| addr.to_string()),
        service_port: info.service_port,
        provider_mac: info.provider_mac.map(|mac| mac.to_string()),
    }
}

fn decoded_channel(info: &WsaChannelInfo) -> DecodedChannel {
    DecodedChannel {
        operating_class: info.operating_class,
        channel: info.channel,
        power_level: info.power_level,
        data_rate: info.data_rate,
        adaptable: info.adaptable,
        edca: info.edca.is_some(),
        channel_access: info.channel_access.map(access_name),
    }
}

fn decoded_routing(routing: &RoutingAdvertisement) -> DecodedRouting {
    DecodedRouting {
        lifetime: routing.lifetime,
        prefix: format!("{}/{}", routing.ip_prefix, routing.prefix_len),
        default_gateway: routing.default_gateway.to_string(),
        primary_dns: routing.primary_dns.to_string(),
        secondary_dns: routing.secondary_dns.map(|addr| addr.to_string()),
        gateway_mac: routing.gateway_mac.map(|mac| mac.to_string()),
    }
}

const fn access_name(access: ChannelAccess) -> &'static str {
    match access {
        ChannelAccess::Continuous => "continuous",
        ChannelAccess::AlternatingSch => "alternating_sch",
        ChannelAccess::AlternatingCch => "alternating_cch",
    }
}

#[must_use]
pub fn format_decode_pretty(decoded: &DecodedMpdu) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} -> {} priority {} WSMP v{} psid {}",
        decoded.src,
        decoded.dest,
        decoded.priority,
        decoded.wsmp_version,
        Psid::new(decoded.psid)
    );
    if let Some(channel) = decoded.channel_number {
        let _ = writeln!(out, "  channel: {channel}");
    }
    if let Some(rate) = decoded.data_rate {
        let _ = writeln!(out, "  data rate: {rate}");
    }
    if let Some(power) = decoded.tx_power {
        let _ = writeln!(out, "  tx power: {power} dBm");
    }
    match &decoded.body {
        DecodedBody::Wsm { payload_hex } => {
            let _ = writeln!(out, "  payload: {payload_hex}");
        }
        DecodedBody::Wsa(wsa) => {
            let _ = writeln!(
                out,
                "  WSA v{} id {} content {}",
                wsa.version, wsa.wsa_id, wsa.content_count
            );
            if let Some(advertiser) = &wsa.advertiser_id {
                let _ = writeln!(out, "  advertiser: {advertiser}");
            }
            for service in &wsa.services {
                let _ = writeln!(
                    out,
                    "    service {} on channel #{}",
                    Psid::new(service.psid),
                    service.channel_index
                );
            }
            for channel in &wsa.channels {
                let _ = writeln!(
                    out,
                    "    channel {} class {} power {} rate {}",
                    channel.channel, channel.operating_class, channel.power_level, channel.data_rate
                );
            }
            if let Some(routing) = &wsa.routing {
                let _ = writeln!(
                    out,
                    "    route {} via {} ({}s)",
                    routing.prefix, routing.default_gateway, routing.lifetime
                );
            }
        }
    }
    out
}

/// Builds an MPDU carrying `payload` with the given WSMP parameters.
pub fn build_wsm(dot3: &Dot3, params: &WsmTxParams, payload: &[u8]) -> Result<Vec<u8>> {
    let mut out = vec![0u8; codec::MAX_WSM_LEN + wire::ENVELOPE_LEN];
    let len = dot3
        .construct_wsm_mpdu(params, Some(payload), &mut out)
        .context("construct WSM MPDU")?;
    out.truncate(len);
    Ok(out)
}

#[must_use]
pub fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Parses hex text, ignoring whitespace.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|byte| !byte.is_ascii_whitespace())
        .collect();
    anyhow::ensure!(digits.len() % 2 == 0, "odd number of hex digits");
    digits
        .chunks(2)
        .map(|pair| {
            let text = std::str::from_utf8(pair).context("hex digits")?;
            u8::from_str_radix(text, 16).with_context(|| format!("invalid hex byte {text:?}"))
        })
        .collect()
}
