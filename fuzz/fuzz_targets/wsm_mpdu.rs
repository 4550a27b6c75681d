#![no_main]

use codec::{construct_wsm_mpdu, parse_wsm_mpdu, PerCodec, WsmTxParams};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let codec = PerCodec::new();
    let limits = wire::Limits::default();
    let mut payload = vec![0u8; codec::MAX_WSM_LEN];

    let Ok((len, rx)) = parse_wsm_mpdu(&codec, data, &limits, &mut payload) else {
        return;
    };

    // Anything accepted must rebuild into an MPDU that parses back the same.
    let tx = WsmTxParams {
        dest: rx.dest,
        src: rx.src,
        priority: rx.priority,
        psid: rx.psid,
        channel_number: rx.channel_number,
        data_rate: rx.data_rate,
        tx_power: rx.tx_power,
        channel_load: None,
    };
    let mut mpdu = vec![0u8; codec::MAX_WSM_LEN + wire::ENVELOPE_LEN];
    let Ok(built) = construct_wsm_mpdu(&codec, &tx, Some(&payload[..len]), &mut mpdu) else {
        return;
    };
    let mut again = vec![0u8; codec::MAX_WSM_LEN];
    let (again_len, again_rx) = parse_wsm_mpdu(&codec, &mpdu[..built], &limits, &mut again)
        .expect("rebuilt MPDU parses");
    assert_eq!(again_rx, rx);
    assert_eq!(&again[..again_len], &payload[..len]);
});
