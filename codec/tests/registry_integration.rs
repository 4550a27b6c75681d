use codec::{
    construct_wsa, parse_wsa, ChannelAccess, CodecError, CodecLimits, PerCodec, ProviderRegistry,
    Psid, PsrEntry, RegistryError, WsaHeader, MAX_WSA_LEN,
};

fn psr(psid: u32, channel: u8) -> PsrEntry {
    PsrEntry {
        psid: Psid::new(psid),
        service_channel: channel,
        ..PsrEntry::default()
    }
}

fn build(registry: &ProviderRegistry, header: &WsaHeader) -> Vec<u8> {
    let mut out = vec![0u8; MAX_WSA_LEN];
    let len = construct_wsa(&PerCodec::new(), registry, header, None, &mut out).unwrap();
    out.truncate(len);
    out
}

#[test]
fn table_holds_exactly_its_capacity() {
    let registry = ProviderRegistry::default();
    for psid in 0..128 {
        let channel = 172 + (psid % 13) as u8;
        assert_eq!(registry.add_psr(psr(psid, channel)).unwrap(), psid as usize + 1);
    }
    assert_eq!(
        registry.add_psr(psr(1000, 172)),
        Err(CodecError::Registry(RegistryError::TableFull { capacity: 128 }))
    );
    assert_eq!(registry.psr_count(), 128);
}

#[test]
fn duplicate_and_unknown_channel_are_rejected() {
    let registry = ProviderRegistry::default();
    registry.add_psr(psr(0x87, 178)).unwrap();
    assert!(matches!(
        registry.add_psr(psr(0x87, 172)),
        Err(CodecError::Registry(RegistryError::DuplicatePsid { .. }))
    ));
    assert!(matches!(
        registry.add_psr(psr(0x88, 186)),
        Err(CodecError::Registry(RegistryError::NoRelatedChannelInfo { channel: 186 }))
    ));
}

#[test]
fn empty_registry_wsa_is_header_only() {
    let registry = ProviderRegistry::default();
    assert_eq!(build(&registry, &WsaHeader::default()), vec![0x30, 0x00]);
}

#[test]
fn channel_infos_are_deduplicated() {
    let codec = PerCodec::new();
    let registry = ProviderRegistry::default();
    let channels = [172u8, 176, 172, 180, 176, 172, 180];
    for (psid, channel) in channels.iter().enumerate() {
        registry.add_psr(psr(0x40 + psid as u32, *channel)).unwrap();
    }

    let bytes = build(&registry, &WsaHeader::default());
    let parsed = parse_wsa(&codec, &bytes, &CodecLimits::default()).unwrap();
    let message = parsed.message;
    assert_eq!(message.channel_infos.len(), 3);
    assert_eq!(message.service_infos.len(), channels.len());

    for (info, channel) in message.service_infos.iter().zip(channels) {
        let slot = &message.channel_infos[usize::from(info.channel_index) - 1];
        assert_eq!(slot.channel, channel);
    }
}

#[test]
fn channel_access_comes_from_first_psr_on_channel() {
    let codec = PerCodec::new();
    let registry = ProviderRegistry::default();
    let mut alternating = psr(1, 174);
    alternating.channel_access = ChannelAccess::AlternatingSch;
    registry.add_psr(alternating).unwrap();
    registry.add_psr(psr(2, 174)).unwrap();
    registry.add_psr(psr(3, 182)).unwrap();

    let bytes = build(&registry, &WsaHeader::default());
    let parsed = parse_wsa(&codec, &bytes, &CodecLimits::default()).unwrap();
    let channels = parsed.message.channel_infos;
    assert_eq!(channels[0].channel_access, Some(ChannelAccess::AlternatingSch));
    assert_eq!(channels[1].channel_access, None);
}

#[test]
fn service_cap_drops_later_registrations() {
    let codec = PerCodec::new();
    let registry = ProviderRegistry::default();
    for psid in 0..40 {
        registry.add_psr(psr(psid, 172)).unwrap();
    }
    let bytes = build(&registry, &WsaHeader::default());
    let parsed = parse_wsa(&codec, &bytes, &CodecLimits::default()).unwrap();
    assert_eq!(parsed.total_service_infos, 31);
    assert_eq!(parsed.message.service_infos.last().unwrap().psid, Psid::new(30));
}

#[test]
fn delete_all_then_readd_is_deterministic() {
    let registry = ProviderRegistry::default();
    let header = WsaHeader {
        wsa_id: 2,
        content_count: 9,
        repeat_rate: Some(20),
        ..WsaHeader::default()
    };
    let entries: Vec<PsrEntry> = (0..128)
        .map(|i| {
            let mut entry = psr(0x1000 + i * 97, 172 + (i % 13) as u8);
            entry.wsa_id = 2;
            entry
        })
        .collect();

    for entry in &entries {
        registry.add_psr(entry.clone()).unwrap();
    }
    let first = build(&registry, &header);

    registry.delete_all_psrs();
    assert_eq!(registry.psr_count(), 0);
    for entry in &entries {
        registry.add_psr(entry.clone()).unwrap();
    }
    assert_eq!(build(&registry, &header), first);
}

#[test]
fn registry_is_shared_across_threads() {
    let registry = std::sync::Arc::new(ProviderRegistry::default());
    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let registry = std::sync::Arc::clone(&registry);
            std::thread::spawn(move || {
                for i in 0..20 {
                    registry.add_psr(psr(t * 100 + i, 172)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(registry.psr_count(), 80);
}
