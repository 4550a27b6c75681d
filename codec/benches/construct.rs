use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use codec::{
    construct_wsa, construct_wsm_mpdu, parse_wsa, parse_wsm_mpdu, CodecLimits, MacAddress,
    PerCodec, ProviderRegistry, Psid, PsrEntry, WireLimits, WsaHeader, WsmTxParams,
};

fn tx_params() -> WsmTxParams {
    WsmTxParams {
        dest: MacAddress::BROADCAST,
        src: MacAddress::new([0x02, 0, 0, 0, 0, 0x01]),
        priority: 3,
        psid: Psid::new(0x20),
        channel_number: Some(172),
        data_rate: Some(12),
        tx_power: Some(20),
        ..WsmTxParams::default()
    }
}

fn bench_wsm(c: &mut Criterion) {
    let mut group = c.benchmark_group("wsm_mpdu");
    let codec = PerCodec::new();
    let params = tx_params();

    for size in [0usize, 64, 512, 2048] {
        let payload = vec![0xA5; size];
        let mut mpdu = vec![0u8; 2400];
        let len = construct_wsm_mpdu(&codec, &params, Some(&payload), &mut mpdu).unwrap();
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("construct", size), &payload, |b, payload| {
            b.iter(|| {
                construct_wsm_mpdu(&codec, &params, Some(black_box(payload)), &mut mpdu).unwrap()
            });
        });

        let frame = mpdu[..len].to_vec();
        let mut body = vec![0u8; 2400];
        group.bench_with_input(BenchmarkId::new("parse", size), &frame, |b, frame| {
            b.iter(|| {
                parse_wsm_mpdu(&codec, black_box(frame), &WireLimits::default(), &mut body)
                    .unwrap()
            });
        });
    }
    group.finish();
}

fn bench_wsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("wsa");
    let codec = PerCodec::new();

    for services in [1u32, 8, 31] {
        let registry = ProviderRegistry::new(CodecLimits::default());
        for psid in 0..services {
            registry
                .add_psr(PsrEntry {
                    psid: Psid::new(0x100 + psid),
                    service_channel: 172 + (psid % 13) as u8,
                    ..PsrEntry::default()
                })
                .unwrap();
        }
        let header = WsaHeader::default();
        let mut out = vec![0u8; 2400];

        group.bench_function(BenchmarkId::new("construct", services), |b| {
            b.iter(|| construct_wsa(&codec, &registry, black_box(&header), None, &mut out).unwrap());
        });

        let len = construct_wsa(&codec, &registry, &header, None, &mut out).unwrap();
        let bytes = out[..len].to_vec();
        group.bench_function(BenchmarkId::new("parse", services), |b| {
            b.iter(|| parse_wsa(&codec, black_box(&bytes), &CodecLimits::default()).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_wsm, bench_wsa);
criterion_main!(benches);
