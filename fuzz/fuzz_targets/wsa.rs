#![no_main]

use codec::{encode_wsa, parse_wsa, CodecLimits, PerCodec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let codec = PerCodec::new();
    let limits = CodecLimits::default();
    let Ok(parsed) = parse_wsa(&codec, data, &limits) else {
        return;
    };
    if parsed.total_service_infos != parsed.message.service_infos.len()
        || parsed.total_channel_infos != parsed.message.channel_infos.len()
    {
        return;
    }
    // Re-encoding may fail validation, but must never panic.
    let _ = encode_wsa(&codec, &parsed.message);
});
