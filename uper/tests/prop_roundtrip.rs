use proptest::prelude::*;
use uper::{Alternative, AsnType, AsnValue, Field, IntegerRange, PerCodec, Size, UperCodec};

static LAT: AsnType = AsnType::integer(-900_000_000, 900_000_001);
static EXT_TAIL: AsnType = AsnType::Integer(IntegerRange::extensible(2_113_664, 270_549_119));
static SMALL: AsnType = AsnType::integer(0, 15);
static BYTES: AsnType = AsnType::OctetString(Size::range(0, 31));
static LIST: AsnType = AsnType::SequenceOf {
    size: Size::UNCONSTRAINED,
    element: &SMALL,
};
static RECORD_FIELDS: [Field; 3] = [
    Field::mandatory("id", &SMALL),
    Field::optional("data", &BYTES),
    Field::optional("items", &LIST),
];
static RECORD: AsnType = AsnType::Sequence {
    fields: &RECORD_FIELDS,
    extensible: false,
};
static CHOICE_ALTS: [Alternative; 3] = [
    Alternative::new("small", &SMALL),
    Alternative::new("record", &RECORD),
    Alternative::new("open", &AsnType::Open),
];
static TOP: AsnType = AsnType::Choice {
    alternatives: &CHOICE_ALTS,
    extensible: true,
};

fn record_strategy() -> impl Strategy<Value = AsnValue> {
    (
        0i64..=15,
        prop::option::of(prop::collection::vec(any::<u8>(), 0..=31)),
        prop::option::of(prop::collection::vec(0i64..=15, 0..200)),
    )
        .prop_map(|(id, data, items)| {
            AsnValue::Sequence(vec![
                Some(AsnValue::Integer(id)),
                data.map(AsnValue::OctetString),
                items.map(|items| {
                    AsnValue::SequenceOf(items.into_iter().map(AsnValue::Integer).collect())
                }),
            ])
        })
}

fn top_strategy() -> impl Strategy<Value = AsnValue> {
    prop_oneof![
        (0i64..=15).prop_map(|v| AsnValue::choice(0, AsnValue::Integer(v))),
        record_strategy().prop_map(|v| AsnValue::choice(1, v)),
        prop::collection::vec(any::<u8>(), 0..300)
            .prop_map(|bytes| AsnValue::choice(2, AsnValue::Open(bytes))),
    ]
}

proptest! {
    #[test]
    fn constrained_integer_roundtrip(value in -900_000_000i64..=900_000_001) {
        let codec = PerCodec::new();
        let bytes = codec.encode(&LAT, &AsnValue::Integer(value)).unwrap();
        prop_assert_eq!(bytes.len(), 4);
        prop_assert_eq!(codec.decode(&LAT, &bytes).unwrap(), AsnValue::Integer(value));
    }

    #[test]
    fn extensible_integer_roundtrip(value in any::<i64>()) {
        let codec = PerCodec::new();
        let bytes = codec.encode(&EXT_TAIL, &AsnValue::Integer(value)).unwrap();
        prop_assert_eq!(codec.decode(&EXT_TAIL, &bytes).unwrap(), AsnValue::Integer(value));
    }

    #[test]
    fn nested_value_roundtrip(value in top_strategy()) {
        let codec = PerCodec::new();
        let bytes = codec.encode(&TOP, &value).unwrap();
        prop_assert_eq!(codec.decode(&TOP, &bytes).unwrap(), value);
    }

    #[test]
    fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = PerCodec::new().decode(&TOP, &bytes);
    }
}
