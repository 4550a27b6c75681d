use proptest::prelude::*;
use wire::{
    construct_envelope, parse_envelope, AckPolicy, EnvelopeParams, FrameControl, Limits,
    MacAddress, QosControl, ENVELOPE_LEN,
};

fn mac_strategy() -> impl Strategy<Value = MacAddress> {
    any::<[u8; 6]>().prop_map(MacAddress::new)
}

proptest! {
    #[test]
    fn frame_control_unpack_pack_is_identity(raw in any::<u16>()) {
        prop_assert_eq!(FrameControl::unpack(raw).pack(), raw);
    }

    #[test]
    fn qos_control_unpack_pack_is_identity(raw in any::<u16>()) {
        prop_assert_eq!(QosControl::unpack(raw).pack(), raw);
    }

    #[test]
    fn envelope_roundtrip(dest in mac_strategy(), src in mac_strategy(), priority in 0u8..=7) {
        let sent = EnvelopeParams { dest, src, priority };
        let mut frame = vec![0xA5u8; ENVELOPE_LEN + 4];
        construct_envelope(&sent, &mut frame).unwrap();

        let qos = QosControl::unpack(u16::from_le_bytes([frame[24], frame[25]]));
        let expected = if dest.is_group() { AckPolicy::NoAck } else { AckPolicy::Normal };
        prop_assert_eq!(qos.ack_policy, expected);

        let (len, received) = parse_envelope(&frame, &Limits::default()).unwrap();
        prop_assert_eq!(len, ENVELOPE_LEN);
        prop_assert_eq!(received, sent);
    }

    #[test]
    fn parse_never_panics(frame in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = parse_envelope(&frame, &Limits::default());
    }
}
