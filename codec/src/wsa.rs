//! WAVE Service Advertisements.

use std::net::Ipv6Addr;

use tracing::trace;
use uper::{AsnValue, UperCodec};

use crate::asn;
use crate::error::{CodecError, CodecResult, SizeKind};
use crate::ext::{
    decode_extensions, encode_extensions, ChannelInfoExt, RoutingExt, ServiceInfoExt,
    WsaHeaderExt,
};
use crate::fields::{boolean, bytes, fixed_octets, int, integer, list, optional, required, sequence};
use crate::limits::CodecLimits;
use crate::psid::{psid_from_value, psid_to_value};
use crate::psr::ProviderRegistry;
use crate::types::{
    ParsedWsa, RoutingAdvertisement, WsaChannelInfo, WsaHeader, WsaMessage, WsaServiceInfo,
};
use crate::validate::{check_channel_info, check_routing, check_service_info, check_wsa_header};

/// WSA protocol version written and accepted.
pub const WSA_VERSION: u8 = 3;

/// Largest WSA that still fits a WSM whose header carries every extension.
pub const MAX_WSA_LEN: usize = wire::MAX_WSM_BODY_LEN_ALL_EXTENSIONS;

/// Encodes an assembled WSA.
///
/// Empty lists are left out of the message.
pub fn encode_wsa(codec: &dyn UperCodec, message: &WsaMessage) -> CodecResult<Vec<u8>> {
    check_wsa_header(&message.header)?;
    for info in &message.service_infos {
        check_service_info(info)?;
    }
    for info in &message.channel_infos {
        check_channel_info(info)?;
    }
    if let Some(routing) = &message.routing {
        check_routing(routing)?;
    }

    let header = &message.header;
    let version = AsnValue::Sequence(vec![
        Some(AsnValue::Enumerated(asn::MESSAGE_ID_SA_MESSAGE)),
        Some(int(WSA_VERSION)),
    ]);
    let change_count = AsnValue::Sequence(vec![
        Some(int(header.wsa_id)),
        Some(int(header.content_count)),
    ]);
    let service_infos = non_empty(
        message
            .service_infos
            .iter()
            .map(|info| service_info_value(codec, info))
            .collect::<CodecResult<Vec<_>>>()?,
    );
    let channel_infos = non_empty(
        message
            .channel_infos
            .iter()
            .map(|info| channel_info_value(codec, info))
            .collect::<CodecResult<Vec<_>>>()?,
    );
    let routing = message
        .routing
        .as_ref()
        .map(|routing| routing_value(codec, routing))
        .transpose()?;

    let body = AsnValue::Sequence(vec![
        Some(change_count),
        encode_extensions(codec, &WsaHeaderExt::from_header(header))?,
        service_infos,
        channel_infos,
        routing,
    ]);
    let msg = AsnValue::Sequence(vec![Some(version), Some(body)]);

    let encoded = codec.encode(&asn::SRV_ADV_MSG, &msg)?;
    if encoded.len() > MAX_WSA_LEN {
        return Err(CodecError::TooLong {
            kind: SizeKind::Wsa,
            len: encoded.len(),
            max: MAX_WSA_LEN,
        });
    }
    trace!(
        wsa_id = header.wsa_id,
        services = message.service_infos.len(),
        channels = message.channel_infos.len(),
        len = encoded.len(),
        "WSA encoded"
    );
    Ok(encoded)
}

/// Builds a WSA for `header.wsa_id` from the registered PSRs and writes it
/// into `out`, returning its length.
pub fn construct_wsa(
    codec: &dyn UperCodec,
    registry: &ProviderRegistry,
    header: &WsaHeader,
    routing: Option<&RoutingAdvertisement>,
    out: &mut [u8],
) -> CodecResult<usize> {
    check_wsa_header(header)?;
    if let Some(routing) = routing {
        check_routing(routing)?;
    }
    let lists = registry.wsa_lists(header.wsa_id)?;
    let message = WsaMessage {
        header: header.clone(),
        service_infos: lists.service_infos,
        channel_infos: lists.channel_infos,
        routing: routing.copied(),
    };

    let encoded = encode_wsa(codec, &message)?;
    let available = out.len();
    let dst = out
        .get_mut(..encoded.len())
        .ok_or(CodecError::BufferTooSmall {
            needed: encoded.len(),
            available,
        })?;
    dst.copy_from_slice(&encoded);
    Ok(encoded.len())
}

/// Decodes a received WSA.
///
/// Service-Info and Channel-Info lists are truncated at the caps in
/// `limits`; the totals on the wire are reported alongside.
pub fn parse_wsa(
    codec: &dyn UperCodec,
    bytes: &[u8],
    limits: &CodecLimits,
) -> CodecResult<ParsedWsa> {
    if bytes.len() > MAX_WSA_LEN {
        return Err(CodecError::TooLong {
            kind: SizeKind::Wsa,
            len: bytes.len(),
            max: MAX_WSA_LEN,
        });
    }
    let msg = codec.decode(&asn::SRV_ADV_MSG, bytes)?;
    let slots = sequence(&msg, "WSA")?;

    let version = sequence(required(slots, asn::MSG_VERSION, "WSA version")?, "WSA version")?;
    let message_id = required(version, asn::VERSION_MESSAGE_ID, "WSA message id")?
        .as_enumerated()
        .ok_or(CodecError::AbnormalCodec {
            what: "WSA message id",
        })?;
    if message_id != asn::MESSAGE_ID_SA_MESSAGE {
        return Err(CodecError::InvalidMessageType { found: message_id });
    }
    let version: u8 = integer(
        required(version, asn::VERSION_NUMBER, "WSA version")?,
        "WSA version",
    )?;
    if version != WSA_VERSION {
        return Err(CodecError::UnsupportedVersion { found: version });
    }

    let body = sequence(required(slots, asn::MSG_BODY, "WSA body")?, "WSA body")?;
    let change = sequence(
        required(body, asn::BODY_CHANGE_COUNT, "WSA change count")?,
        "WSA change count",
    )?;
    let mut header = WsaHeader {
        wsa_id: integer(required(change, asn::CHANGE_SA_ID, "WSA id")?, "WSA id")?,
        content_count: integer(
            required(change, asn::CHANGE_CONTENT_COUNT, "content count")?,
            "content count",
        )?,
        ..WsaHeader::default()
    };
    for ext in decode_extensions::<WsaHeaderExt>(codec, optional(body, asn::BODY_EXTENSIONS))? {
        ext.apply(&mut header);
    }

    let mut parsed = ParsedWsa {
        version,
        ..ParsedWsa::default()
    };

    if let Some(infos) = optional(body, asn::BODY_SERVICE_INFOS) {
        let infos = list(infos, "Service-Info list")?;
        parsed.total_service_infos = infos.len();
        parsed.message.service_infos = infos
            .iter()
            .take(limits.max_service_infos)
            .map(|info| parse_service_info(codec, info))
            .collect::<CodecResult<_>>()?;
    }
    if let Some(infos) = optional(body, asn::BODY_CHANNEL_INFOS) {
        let infos = list(infos, "Channel-Info list")?;
        parsed.total_channel_infos = infos.len();
        parsed.message.channel_infos = infos
            .iter()
            .take(limits.max_channel_infos)
            .map(|info| parse_channel_info(codec, info))
            .collect::<CodecResult<_>>()?;
    }
    if let Some(routing) = optional(body, asn::BODY_ROUTING) {
        parsed.message.routing = Some(parse_routing(codec, routing)?);
    }
    parsed.message.header = header;

    trace!(
        wsa_id = parsed.message.header.wsa_id,
        services = parsed.total_service_infos,
        channels = parsed.total_channel_infos,
        "WSA decoded"
    );
    Ok(parsed)
}

fn non_empty(items: Vec<AsnValue>) -> Option<AsnValue> {
    (!items.is_empty()).then(|| AsnValue::SequenceOf(items))
}

fn service_info_value(codec: &dyn UperCodec, info: &WsaServiceInfo) -> CodecResult<AsnValue> {
    Ok(AsnValue::Sequence(vec![
        Some(psid_to_value(info.psid)?),
        Some(int(info.channel_index)),
        encode_extensions(codec, &ServiceInfoExt::from_service_info(info))?,
    ]))
}

fn parse_service_info(codec: &dyn UperCodec, value: &AsnValue) -> CodecResult<WsaServiceInfo> {
    let slots = sequence(value, "Service-Info")?;
    let mut info = WsaServiceInfo {
        psid: psid_from_value(required(slots, asn::SI_SERVICE_ID, "service id")?)?,
        channel_index: integer(
            required(slots, asn::SI_CHANNEL_INDEX, "channel index")?,
            "channel index",
        )?,
        ..WsaServiceInfo::default()
    };
    for ext in decode_extensions::<ServiceInfoExt>(codec, optional(slots, asn::SI_EXTENSIONS))? {
        ext.apply(&mut info);
    }
    Ok(info)
}

fn channel_info_value(codec: &dyn UperCodec, info: &WsaChannelInfo) -> CodecResult<AsnValue> {
    let data_rate = AsnValue::Sequence(vec![
        Some(AsnValue::Boolean(info.adaptable)),
        Some(int(info.data_rate)),
    ]);
    Ok(AsnValue::Sequence(vec![
        Some(int(info.operating_class)),
        Some(int(info.channel)),
        Some(int(info.power_level)),
        Some(data_rate),
        encode_extensions(codec, &ChannelInfoExt::from_channel_info(info))?,
    ]))
}

fn parse_channel_info(codec: &dyn UperCodec, value: &AsnValue) -> CodecResult<WsaChannelInfo> {
    let slots = sequence(value, "Channel-Info")?;
    let rate = sequence(
        required(slots, asn::CI_DATA_RATE, "Channel-Info data rate")?,
        "Channel-Info data rate",
    )?;
    let mut info = WsaChannelInfo {
        operating_class: integer(
            required(slots, asn::CI_OPERATING_CLASS, "operating class")?,
            "operating class",
        )?,
        channel: integer(
            required(slots, asn::CI_CHANNEL_NUMBER, "channel number")?,
            "channel number",
        )?,
        power_level: integer(
            required(slots, asn::CI_POWER_LEVEL, "power level")?,
            "power level",
        )?,
        data_rate: integer(required(rate, asn::RATE_VALUE, "data rate")?, "data rate")?,
        adaptable: boolean(
            required(rate, asn::RATE_ADAPTABLE, "adaptable flag")?,
            "adaptable flag",
        )?,
        edca: None,
        channel_access: None,
    };
    for ext in decode_extensions::<ChannelInfoExt>(codec, optional(slots, asn::CI_EXTENSIONS))? {
        ext.apply(&mut info);
    }
    Ok(info)
}

fn routing_value(codec: &dyn UperCodec, routing: &RoutingAdvertisement) -> CodecResult<AsnValue> {
    Ok(AsnValue::Sequence(vec![
        Some(int(routing.lifetime)),
        Some(bytes(&routing.ip_prefix.octets())),
        Some(int(routing.prefix_len)),
        Some(bytes(&routing.default_gateway.octets())),
        Some(bytes(&routing.primary_dns.octets())),
        encode_extensions(codec, &RoutingExt::from_routing(routing))?,
    ]))
}

fn parse_routing(codec: &dyn UperCodec, value: &AsnValue) -> CodecResult<RoutingAdvertisement> {
    let slots = sequence(value, "Routing-Advertisement")?;
    let address = |index: usize, what: &'static str| -> CodecResult<Ipv6Addr> {
        fixed_octets::<16>(required(slots, index, what)?, what).map(Into::into)
    };
    let mut routing = RoutingAdvertisement {
        lifetime: integer(
            required(slots, asn::RA_LIFETIME, "router lifetime")?,
            "router lifetime",
        )?,
        ip_prefix: address(asn::RA_IP_PREFIX, "IPv6 prefix")?,
        prefix_len: integer(
            required(slots, asn::RA_PREFIX_LEN, "IPv6 prefix length")?,
            "IPv6 prefix length",
        )?,
        default_gateway: address(asn::RA_DEFAULT_GATEWAY, "default gateway")?,
        primary_dns: address(asn::RA_PRIMARY_DNS, "primary DNS")?,
        secondary_dns: None,
        gateway_mac: None,
    };
    for ext in decode_extensions::<RoutingExt>(codec, optional(slots, asn::RA_EXTENSIONS))? {
        ext.apply(&mut routing);
    }
    Ok(routing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtContext, ParamKind};
    use crate::types::{ChannelAccess, EdcaParameterSet, Location3D, PsrEntry, PsrOptions, Psid};
    use uper::PerCodec;
    use wire::MacAddress;

    fn psr(psid: u32, channel: u8) -> PsrEntry {
        PsrEntry {
            psid: Psid::new(psid),
            service_channel: channel,
            ..PsrEntry::default()
        }
    }

    #[test]
    fn empty_registry_gives_two_octets() {
        let registry = ProviderRegistry::default();
        let mut out = [0u8; 64];
        let len = construct_wsa(
            &PerCodec::new(),
            &registry,
            &WsaHeader::default(),
            None,
            &mut out,
        )
        .unwrap();
        assert_eq!(&out[..len], &[0x30, 0x00]);
    }

    #[test]
    fn construct_and_parse() {
        let codec = PerCodec::new();
        let registry = ProviderRegistry::default();
        registry.add_psr(psr(0x20, 172)).unwrap();
        let mut with_options = psr(0x8003, 176);
        with_options.options = PsrOptions {
            psc: Some(b"parking".to_vec()),
            wsa_count_threshold: Some(2),
            ..PsrOptions::default()
        };
        registry.add_psr(with_options).unwrap();
        registry.add_psr(psr(0x21, 172)).unwrap();

        let header = WsaHeader {
            wsa_id: 0,
            content_count: 4,
            repeat_rate: Some(10),
            location_3d: Some(Location3D {
                latitude: 10,
                longitude: -10,
                elevation: 100,
            }),
            advertiser_id: Some("roadside".to_string()),
            ..WsaHeader::default()
        };
        let routing = RoutingAdvertisement {
            lifetime: 600,
            ip_prefix: Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0),
            prefix_len: 64,
            default_gateway: Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1),
            primary_dns: Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 53),
            secondary_dns: None,
            gateway_mac: Some(MacAddress::new([2, 0, 0, 0, 0, 1])),
        };
        let mut out = [0u8; 512];
        let len = construct_wsa(&codec, &registry, &header, Some(&routing), &mut out).unwrap();

        let parsed = parse_wsa(&codec, &out[..len], &CodecLimits::default()).unwrap();
        assert_eq!(parsed.version, WSA_VERSION);
        assert_eq!(parsed.message.header, header);
        assert_eq!(parsed.total_service_infos, 3);
        assert_eq!(parsed.total_channel_infos, 2);
        let indices: Vec<u8> = parsed
            .message
            .service_infos
            .iter()
            .map(|s| s.channel_index)
            .collect();
        assert_eq!(indices, vec![1, 2, 1]);
        assert_eq!(
            parsed.message.service_infos[1].psc.as_deref(),
            Some(&b"parking"[..])
        );
        assert_eq!(parsed.message.channel_infos[1].channel, 176);
        assert_eq!(parsed.message.routing, Some(routing));
    }

    #[test]
    fn edca_channel_info_roundtrip() {
        let codec = PerCodec::new();
        let mut set = EdcaParameterSet::default();
        set.records[3].aifsn = 2;
        set.records[3].txop_limit = 47;
        let message = WsaMessage {
            header: WsaHeader {
                wsa_id: 5,
                ..WsaHeader::default()
            },
            service_infos: vec![WsaServiceInfo {
                psid: Psid::new(0x10),
                channel_index: 1,
                ..WsaServiceInfo::default()
            }],
            channel_infos: vec![WsaChannelInfo {
                operating_class: 17,
                channel: 178,
                power_level: 23,
                data_rate: 12,
                adaptable: false,
                edca: Some(set),
                channel_access: Some(ChannelAccess::AlternatingCch),
            }],
            routing: None,
        };
        let bytes = encode_wsa(&codec, &message).unwrap();
        let parsed = parse_wsa(&codec, &bytes, &CodecLimits::default()).unwrap();
        assert_eq!(parsed.message, message);
    }

    #[test]
    fn parse_truncates_at_caps_and_counts_rest() {
        let codec = PerCodec::new();
        let message = WsaMessage {
            service_infos: (1..=6)
                .map(|psid| WsaServiceInfo {
                    psid: Psid::new(psid),
                    channel_index: 1,
                    ..WsaServiceInfo::default()
                })
                .collect(),
            ..WsaMessage::default()
        };
        let bytes = encode_wsa(&codec, &message).unwrap();
        let parsed = parse_wsa(&codec, &bytes, &CodecLimits::for_testing()).unwrap();
        assert_eq!(parsed.message.service_infos.len(), 4);
        assert_eq!(parsed.total_service_infos, 6);
        assert_eq!(parsed.message.service_infos[3].psid, Psid::new(4));
    }

    #[test]
    fn parse_rejects_message_type_and_version() {
        let codec = PerCodec::new();
        // messageID `sa` (1), version 3
        assert_eq!(
            parse_wsa(&codec, &[0xB0, 0x00], &CodecLimits::default()),
            Err(CodecError::InvalidMessageType { found: 1 })
        );
        // version 2
        assert_eq!(
            parse_wsa(&codec, &[0x20, 0x00], &CodecLimits::default()),
            Err(CodecError::UnsupportedVersion { found: 2 })
        );
    }

    #[test]
    fn parse_rejects_unknown_header_tag() {
        let codec = PerCodec::new();
        let exts = encode_extensions(
            &codec,
            &[ChannelInfoExt::ChannelAccess(ChannelAccess::Continuous)],
        )
        .unwrap();
        let msg = AsnValue::Sequence(vec![
            Some(AsnValue::Sequence(vec![
                Some(AsnValue::Enumerated(asn::MESSAGE_ID_SA_MESSAGE)),
                Some(int(WSA_VERSION)),
            ])),
            Some(AsnValue::Sequence(vec![
                Some(AsnValue::Sequence(vec![Some(int(0)), Some(int(0))])),
                exts,
                None,
                None,
                None,
            ])),
        ]);
        let bytes = codec.encode(&asn::SRV_ADV_MSG, &msg).unwrap();
        assert_eq!(
            parse_wsa(&codec, &bytes, &CodecLimits::default()),
            Err(CodecError::UnknownExtension {
                context: ExtContext::WsaHeader,
                tag: crate::ext::TAG_CHANNEL_ACCESS
            })
        );
    }

    #[test]
    fn encode_validates_header() {
        let message = WsaMessage {
            header: WsaHeader {
                advertiser_id: Some(String::new()),
                ..WsaHeader::default()
            },
            ..WsaMessage::default()
        };
        assert!(matches!(
            encode_wsa(&PerCodec::new(), &message),
            Err(CodecError::InvalidParam {
                kind: ParamKind::AdvertiserIdLength,
                value: 0
            })
        ));
    }

    #[test]
    fn oversized_wsa_is_rejected() {
        let codec = PerCodec::new();
        let message = WsaMessage {
            service_infos: (0..20)
                .map(|psid| WsaServiceInfo {
                    psid: Psid::new(psid),
                    channel_index: 1,
                    psc: Some(vec![b'p'; 31]),
                    ipv6_address: Some(Ipv6Addr::LOCALHOST),
                    service_port: Some(1),
                    provider_mac: Some(MacAddress::BROADCAST),
                    rcpi_threshold: Some(1),
                    wsa_count_threshold: Some(1),
                    wsa_count_threshold_interval: Some(1),
                })
                .collect(),
            ..WsaMessage::default()
        };
        // 76 octets per entry
        assert!(encode_wsa(&codec, &message).is_ok());

        let mut big = message.clone();
        big.service_infos
            .extend(message.service_infos.iter().cloned());
        assert!(matches!(
            encode_wsa(&codec, &big),
            Err(CodecError::TooLong {
                kind: SizeKind::Wsa,
                ..
            })
        ));
    }

    #[test]
    fn small_output_buffer() {
        let registry = ProviderRegistry::default();
        let mut out = [0u8; 1];
        assert_eq!(
            construct_wsa(
                &PerCodec::new(),
                &registry,
                &WsaHeader::default(),
                None,
                &mut out
            ),
            Err(CodecError::BufferTooSmall {
                needed: 2,
                available: 1
            })
        );
    }
}
