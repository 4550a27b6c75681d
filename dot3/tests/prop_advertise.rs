use dot3::codec::{ChannelAccess, Psid, PsrEntry, WsaHeader, FIRST_CHANNEL, LAST_CHANNEL};
use dot3::{Dot3, Dot3Config, Received, WsaTxParams};
use proptest::prelude::*;

fn access(raw: u8) -> ChannelAccess {
    ChannelAccess::from_raw(raw % 3).unwrap_or_default()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn advertised_services_match_registry(
        psrs in prop::collection::btree_map(
            0u32..0x4000,
            (FIRST_CHANNEL..=LAST_CHANNEL, any::<u8>()),
            0..40,
        )
    ) {
        let dot3 = Dot3::new(&Dot3Config::default()).unwrap();
        for (psid, (channel, raw_access)) in &psrs {
            dot3.add_psr(PsrEntry {
                psid: Psid::new(*psid),
                service_channel: *channel,
                channel_access: access(*raw_access),
                ..PsrEntry::default()
            })
            .unwrap();
        }

        let header = WsaHeader { content_count: 3, ..WsaHeader::default() };
        let mut mpdu = vec![0u8; 2400];
        let len = dot3
            .construct_wsa_mpdu(&WsaTxParams::default(), &header, None, &mut mpdu)
            .unwrap();
        let mut body = vec![0u8; 2400];
        let Received::Wsa { wsa, .. } = dot3.parse_mpdu(&mpdu[..len], &mut body).unwrap() else {
            panic!("expected a WSA");
        };

        let services = &wsa.message.service_infos;
        let channels = &wsa.message.channel_infos;
        prop_assert_eq!(services.len(), psrs.len().min(31));
        prop_assert!(channels.len() <= 13);
        for (service, (psid, (channel, _))) in services.iter().zip(&psrs) {
            prop_assert_eq!(service.psid, Psid::new(*psid));
            let info = &channels[usize::from(service.channel_index) - 1];
            prop_assert_eq!(info.channel, *channel);
        }
        for (i, a) in channels.iter().enumerate() {
            prop_assert!(channels[i + 1..].iter().all(|b| b.channel != a.channel));
        }
    }
}
