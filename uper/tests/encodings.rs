//! Byte-exact encodings of small WAVE-shaped structures.

use uper::{Alternative, AsnType, AsnValue, Field, PerCodec, Size, UperCodec, UperError};

static VERSION: AsnType = AsnType::integer(0, 7);
static PSID_CONTENT: AsnType = AsnType::integer(0, 127);
static PSID_ALTS: [Alternative; 1] = [Alternative::new("content", &PSID_CONTENT)];
static PSID: AsnType = AsnType::Choice {
    alternatives: &PSID_ALTS,
    extensible: false,
};
static BODY: AsnType = AsnType::OctetString(Size::UNCONSTRAINED);
static MAC: AsnType = AsnType::OctetString(Size::fixed(6));
static HEADER_FIELDS: [Field; 4] = [
    Field::mandatory("version", &VERSION),
    Field::mandatory("psid", &PSID),
    Field::optional("mac", &MAC),
    Field::mandatory("body", &BODY),
];
static HEADER: AsnType = AsnType::Sequence {
    fields: &HEADER_FIELDS,
    extensible: true,
};
static FLAG: AsnType = AsnType::Enumerated {
    root: 2,
    extensible: false,
};

fn header(mac: Option<[u8; 6]>, body: &[u8]) -> AsnValue {
    AsnValue::Sequence(vec![
        Some(AsnValue::Integer(3)),
        Some(AsnValue::choice(0, AsnValue::Integer(0x20))),
        mac.map(|m| AsnValue::OctetString(m.to_vec())),
        Some(AsnValue::OctetString(body.to_vec())),
    ])
}

#[test]
fn header_without_optional() {
    let codec = PerCodec::new();
    let bytes = codec.encode(&HEADER, &header(None, &[0xAB])).unwrap();
    // ext 0 | mac 0 | version 011 | psid 0100000 | len 00000001 | 0xAB
    assert_eq!(bytes, vec![0x1A, 0x00, 0x1A, 0xB0]);
    assert_eq!(codec.decode(&HEADER, &bytes).unwrap(), header(None, &[0xAB]));
}

#[test]
fn header_with_fixed_size_mac() {
    let codec = PerCodec::new();
    let value = header(Some([1, 2, 3, 4, 5, 6]), &[]);
    let bytes = codec.encode(&HEADER, &value).unwrap();
    // 2 + 7 + 3 bits, 48 bits of MAC without a length, 8 bits of length
    assert_eq!(bytes.len(), 9);
    assert_eq!(codec.decode(&HEADER, &bytes).unwrap(), value);
}

#[test]
fn wrong_fixed_size_is_rejected() {
    let codec = PerCodec::new();
    let value = AsnValue::OctetString(vec![0; 5]);
    let err = codec.encode(&MAC, &value).unwrap_err();
    assert!(matches!(err, UperError::SizeOutOfRange { len: 5, .. }));
}

#[test]
fn extension_bit_in_sequence_is_rejected() {
    let codec = PerCodec::new();
    let err = codec.decode(&HEADER, &[0x9A, 0x00, 0x1A, 0xB0]).unwrap_err();
    assert_eq!(err, UperError::ExtensionNotSupported { kind: "SEQUENCE" });
}

#[test]
fn enumerated_uses_index_width() {
    let codec = PerCodec::new();
    assert_eq!(codec.encode(&FLAG, &AsnValue::Enumerated(1)).unwrap(), vec![0x80]);
    let err = codec.encode(&FLAG, &AsnValue::Enumerated(2)).unwrap_err();
    assert_eq!(err, UperError::IndexOutOfRange { index: 2, count: 2 });
}

#[test]
fn missing_mandatory_component() {
    let codec = PerCodec::new();
    let value = AsnValue::Sequence(vec![
        Some(AsnValue::Integer(3)),
        None,
        None,
        Some(AsnValue::OctetString(vec![])),
    ]);
    let err = codec.encode(&HEADER, &value).unwrap_err();
    assert_eq!(err, UperError::MissingComponent { name: "psid" });
}

#[test]
fn truncated_input_is_a_bitstream_error() {
    let codec = PerCodec::new();
    let err = codec.decode(&HEADER, &[0x1A, 0x00, 0x1A]).unwrap_err();
    assert!(matches!(err, UperError::Bitstream(_)));
}
