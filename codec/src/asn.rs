//! Abstract syntax of WSMP and WSA messages.
//!
//! Component order inside each `SEQUENCE` is fixed by the field index
//! constants; values are built and read through them.

use uper::{Alternative, AsnType, Field, IntegerRange, Size};

const fn first_then_reserved<const N: usize>(first: Alternative) -> [Alternative; N] {
    let mut alternatives = [Alternative::RESERVED; N];
    alternatives[0] = first;
    alternatives
}

// Shared primitives.

pub static UINT3: AsnType = AsnType::integer(0, 7);
pub static UINT4: AsnType = AsnType::integer(0, 15);
pub static UINT8: AsnType = AsnType::integer(0, 255);
pub static UINT16: AsnType = AsnType::integer(0, 65_535);
pub static INT8: AsnType = AsnType::integer(-128, 127);
pub static BOOLEAN: AsnType = AsnType::Boolean;
pub static IPV6_ADDRESS: AsnType = AsnType::OctetString(Size::fixed(16));
pub static MAC_ADDRESS: AsnType = AsnType::OctetString(Size::fixed(6));

// VarLengthNumber (p-encoded PSID).

pub static VLN_CONTENT1: AsnType = AsnType::integer(0, 127);
pub static VLN_CONTENT2: AsnType = AsnType::integer(128, 16_511);
pub static VLN_CONTENT3: AsnType = AsnType::integer(16_512, 2_113_663);
pub static VLN_EXT3: AsnType = AsnType::Integer(IntegerRange::extensible(2_113_664, 270_549_119));

static VLN_EXT2_ALTS: [Alternative; 2] = [
    Alternative::new("content", &VLN_CONTENT3),
    Alternative::new("extension", &VLN_EXT3),
];
pub static VLN_EXT2: AsnType = AsnType::Choice {
    alternatives: &VLN_EXT2_ALTS,
    extensible: false,
};

static VLN_EXT1_ALTS: [Alternative; 2] = [
    Alternative::new("content", &VLN_CONTENT2),
    Alternative::new("extension", &VLN_EXT2),
];
pub static VLN_EXT1: AsnType = AsnType::Choice {
    alternatives: &VLN_EXT1_ALTS,
    extensible: false,
};

static VLN_ALTS: [Alternative; 2] = [
    Alternative::new("content", &VLN_CONTENT1),
    Alternative::new("extension", &VLN_EXT1),
];
pub static VAR_LENGTH_NUMBER: AsnType = AsnType::Choice {
    alternatives: &VLN_ALTS,
    extensible: false,
};

// Extension { extensionId, value }.

static OPEN: AsnType = AsnType::Open;

pub const EXT_ID: usize = 0;
pub const EXT_VALUE: usize = 1;

static EXTENSION_FIELDS: [Field; 2] = [
    Field::mandatory("extensionId", &UINT8),
    Field::mandatory("value", &OPEN),
];
pub static EXTENSION: AsnType = AsnType::Sequence {
    fields: &EXTENSION_FIELDS,
    extensible: false,
};
pub static EXTENSION_LIST: AsnType = AsnType::SequenceOf {
    size: Size::range(0, 255),
    element: &EXTENSION,
};

// WSMP.

pub const NN_VERSION: usize = 0;
pub const NN_EXTENSIONS: usize = 1;

static NULL_NETWORKING_FIELDS: [Field; 2] = [
    Field::mandatory("version", &UINT3),
    Field::optional("nExtensions", &EXTENSION_LIST),
];
pub static NULL_NETWORKING: AsnType = AsnType::Sequence {
    fields: &NULL_NETWORKING_FIELDS,
    extensible: false,
};

pub const SUBTYPE_NULL_NETWORKING: u32 = 0;
/// Root size of `ShortMsgSubtype`.
pub const SUBTYPE_COUNT: u32 = 16;

static SUBTYPE_ALTS: [Alternative; SUBTYPE_COUNT as usize] =
    first_then_reserved(Alternative::new("nullNetworking", &NULL_NETWORKING));
pub static SHORT_MSG_SUBTYPE: AsnType = AsnType::Choice {
    alternatives: &SUBTYPE_ALTS,
    extensible: false,
};

pub const BC_DEST_ADDRESS: usize = 0;
pub const BC_EXTENSIONS: usize = 1;

static BC_PDU_FIELDS: [Field; 2] = [
    Field::mandatory("destAddress", &VAR_LENGTH_NUMBER),
    Field::optional("tExtensions", &EXTENSION_LIST),
];
pub static SHORT_MSG_BC_PDU: AsnType = AsnType::Sequence {
    fields: &BC_PDU_FIELDS,
    extensible: false,
};

pub const TRANSPORT_BC_MODE: u32 = 0;
/// Root size of `ShortMsgTpdus`.
pub const TRANSPORT_COUNT: u32 = 64;

static TPDU_ALTS: [Alternative; TRANSPORT_COUNT as usize] =
    first_then_reserved(Alternative::new("bcMode", &SHORT_MSG_BC_PDU));
pub static SHORT_MSG_TPDUS: AsnType = AsnType::Choice {
    alternatives: &TPDU_ALTS,
    extensible: true,
};

pub const NPDU_SUBTYPE: usize = 0;
pub const NPDU_TRANSPORT: usize = 1;
pub const NPDU_BODY: usize = 2;

static WSM_BODY: AsnType = AsnType::OctetString(Size::UNCONSTRAINED);

static NPDU_FIELDS: [Field; 3] = [
    Field::mandatory("subtype", &SHORT_MSG_SUBTYPE),
    Field::mandatory("transport", &SHORT_MSG_TPDUS),
    Field::mandatory("body", &WSM_BODY),
];
pub static SHORT_MSG_NPDU: AsnType = AsnType::Sequence {
    fields: &NPDU_FIELDS,
    extensible: false,
};

// WSA.

pub const MESSAGE_ID_SA_MESSAGE: u32 = 0;

pub const VERSION_MESSAGE_ID: usize = 0;
pub const VERSION_NUMBER: usize = 1;

static MESSAGE_ID: AsnType = AsnType::Enumerated {
    root: 2,
    extensible: false,
};

static SRV_ADV_VERSION_FIELDS: [Field; 2] = [
    Field::mandatory("messageID", &MESSAGE_ID),
    Field::mandatory("rsvAdvPrtVersion", &UINT3),
];
pub static SRV_ADV_PRT_VERSION: AsnType = AsnType::Sequence {
    fields: &SRV_ADV_VERSION_FIELDS,
    extensible: false,
};

pub const CHANGE_SA_ID: usize = 0;
pub const CHANGE_CONTENT_COUNT: usize = 1;

static CHANGE_COUNT_FIELDS: [Field; 2] = [
    Field::mandatory("saID", &UINT4),
    Field::mandatory("contentCount", &UINT4),
];
pub static SRV_ADV_CHANGE_COUNT: AsnType = AsnType::Sequence {
    fields: &CHANGE_COUNT_FIELDS,
    extensible: false,
};

pub const SI_SERVICE_ID: usize = 0;
pub const SI_CHANNEL_INDEX: usize = 1;
pub const SI_EXTENSIONS: usize = 2;

static CHANNEL_INDEX: AsnType = AsnType::integer(0, 31);

static SERVICE_INFO_FIELDS: [Field; 3] = [
    Field::mandatory("serviceID", &VAR_LENGTH_NUMBER),
    Field::mandatory("channelIndex", &CHANNEL_INDEX),
    Field::optional("chOptions", &EXTENSION_LIST),
];
pub static SERVICE_INFO: AsnType = AsnType::Sequence {
    fields: &SERVICE_INFO_FIELDS,
    extensible: false,
};

pub const RATE_ADAPTABLE: usize = 0;
pub const RATE_VALUE: usize = 1;

static RATE: AsnType = AsnType::integer(0, 127);

static DATA_RATE_FIELDS: [Field; 2] = [
    Field::mandatory("adaptable", &BOOLEAN),
    Field::mandatory("dataRate", &RATE),
];
pub static WSA_CHINFO_DATA_RATE: AsnType = AsnType::Sequence {
    fields: &DATA_RATE_FIELDS,
    extensible: false,
};

pub const CI_OPERATING_CLASS: usize = 0;
pub const CI_CHANNEL_NUMBER: usize = 1;
pub const CI_POWER_LEVEL: usize = 2;
pub const CI_DATA_RATE: usize = 3;
pub const CI_EXTENSIONS: usize = 4;

static CHANNEL_INFO_FIELDS: [Field; 5] = [
    Field::mandatory("operatingClass", &UINT8),
    Field::mandatory("channelNumber", &UINT8),
    Field::mandatory("powerLevel", &INT8),
    Field::mandatory("dataRate", &WSA_CHINFO_DATA_RATE),
    Field::optional("extensions", &EXTENSION_LIST),
];
pub static CHANNEL_INFO: AsnType = AsnType::Sequence {
    fields: &CHANNEL_INFO_FIELDS,
    extensible: false,
};

pub const RA_LIFETIME: usize = 0;
pub const RA_IP_PREFIX: usize = 1;
pub const RA_PREFIX_LEN: usize = 2;
pub const RA_DEFAULT_GATEWAY: usize = 3;
pub const RA_PRIMARY_DNS: usize = 4;
pub const RA_EXTENSIONS: usize = 5;

static ROUTING_FIELDS: [Field; 6] = [
    Field::mandatory("lifetime", &UINT16),
    Field::mandatory("ipPrefix", &IPV6_ADDRESS),
    Field::mandatory("ipPrefixLength", &UINT8),
    Field::mandatory("defaultGateway", &IPV6_ADDRESS),
    Field::mandatory("primaryDns", &IPV6_ADDRESS),
    Field::optional("extensions", &EXTENSION_LIST),
];
pub static ROUTING_ADVERTISEMENT: AsnType = AsnType::Sequence {
    fields: &ROUTING_FIELDS,
    extensible: false,
};

pub const BODY_CHANGE_COUNT: usize = 0;
pub const BODY_EXTENSIONS: usize = 1;
pub const BODY_SERVICE_INFOS: usize = 2;
pub const BODY_CHANNEL_INFOS: usize = 3;
pub const BODY_ROUTING: usize = 4;

static SERVICE_INFOS: AsnType = AsnType::SequenceOf {
    size: Size::UNCONSTRAINED,
    element: &SERVICE_INFO,
};
static CHANNEL_INFOS: AsnType = AsnType::SequenceOf {
    size: Size::UNCONSTRAINED,
    element: &CHANNEL_INFO,
};

static BODY_FIELDS: [Field; 5] = [
    Field::mandatory("changeCount", &SRV_ADV_CHANGE_COUNT),
    Field::optional("extensions", &EXTENSION_LIST),
    Field::optional("serviceInfos", &SERVICE_INFOS),
    Field::optional("channelInfos", &CHANNEL_INFOS),
    Field::optional("routingAdvertisement", &ROUTING_ADVERTISEMENT),
];
pub static SRV_ADV_BODY: AsnType = AsnType::Sequence {
    fields: &BODY_FIELDS,
    extensible: false,
};

pub const MSG_VERSION: usize = 0;
pub const MSG_BODY: usize = 1;

static MSG_FIELDS: [Field; 2] = [
    Field::mandatory("version", &SRV_ADV_PRT_VERSION),
    Field::mandatory("body", &SRV_ADV_BODY),
];
pub static SRV_ADV_MSG: AsnType = AsnType::Sequence {
    fields: &MSG_FIELDS,
    extensible: false,
};

// Extension value types.

pub static REPEAT_RATE: AsnType = AsnType::integer(0, 255);

pub const LOC_LATITUDE: usize = 0;
pub const LOC_LONGITUDE: usize = 1;
pub const LOC_ELEVATION: usize = 2;

pub static LATITUDE: AsnType = AsnType::integer(-900_000_000, 900_000_001);
pub static LONGITUDE: AsnType = AsnType::integer(-1_799_999_999, 1_800_000_001);
pub static ELEVATION: AsnType = AsnType::integer(-4096, 61_439);

static TWO_D_FIELDS: [Field; 2] = [
    Field::mandatory("latitude", &LATITUDE),
    Field::mandatory("longitude", &LONGITUDE),
];
pub static TWO_D_LOCATION: AsnType = AsnType::Sequence {
    fields: &TWO_D_FIELDS,
    extensible: false,
};

static THREE_D_FIELDS: [Field; 3] = [
    Field::mandatory("latitude", &LATITUDE),
    Field::mandatory("longitude", &LONGITUDE),
    Field::mandatory("elevation", &ELEVATION),
];
pub static THREE_D_LOCATION: AsnType = AsnType::Sequence {
    fields: &THREE_D_FIELDS,
    extensible: false,
};

pub static ADVERTISER_IDENTIFIER: AsnType = AsnType::OctetString(Size::range(1, 32));

pub const PSC_FILL_BITS: usize = 0;
pub const PSC_VALUE: usize = 1;

static PSC_STRING: AsnType = AsnType::OctetString(Size::range(0, 31));

static PSC_FIELDS: [Field; 2] = [
    Field::mandatory("fillBit", &UINT3),
    Field::mandatory("psc", &PSC_STRING),
];
pub static PROVIDER_SERVICE_CONTEXT: AsnType = AsnType::Sequence {
    fields: &PSC_FIELDS,
    extensible: false,
};

pub static SERVICE_PORT: AsnType = AsnType::integer(0, 65_535);
pub static RCPI_THRESHOLD: AsnType = AsnType::integer(0, 255);
pub static WSA_COUNT_THRESHOLD: AsnType = AsnType::integer(0, 255);
pub static WSA_COUNT_THRESHOLD_INTERVAL: AsnType = AsnType::integer(1, 255);
pub static CHANNEL_ACCESS: AsnType = AsnType::integer(0, 255);
pub static CHANNEL_NUMBER: AsnType = AsnType::integer(0, 255);
pub static DATA_RATE: AsnType = AsnType::integer(0, 255);
pub static TX_POWER_USED: AsnType = AsnType::integer(-128, 127);

pub const EDCA_RES: usize = 0;
pub const EDCA_ACI: usize = 1;
pub const EDCA_ACM: usize = 2;
pub const EDCA_AIFSN: usize = 3;
pub const EDCA_ECW_MAX: usize = 4;
pub const EDCA_ECW_MIN: usize = 5;
pub const EDCA_TXOP_LIMIT: usize = 6;

static BIT: AsnType = AsnType::integer(0, 1);
static UINT2: AsnType = AsnType::integer(0, 3);

static EDCA_RECORD_FIELDS: [Field; 7] = [
    Field::mandatory("res", &BIT),
    Field::mandatory("aci", &UINT2),
    Field::mandatory("acm", &BIT),
    Field::mandatory("aifsn", &UINT4),
    Field::mandatory("ecwMax", &UINT4),
    Field::mandatory("ecwMin", &UINT4),
    Field::mandatory("txopLimit", &UINT16),
];
pub static EDCA_PARAMETER_RECORD: AsnType = AsnType::Sequence {
    fields: &EDCA_RECORD_FIELDS,
    extensible: false,
};

static EDCA_SET_FIELDS: [Field; 4] = [
    Field::mandatory("acbeRecord", &EDCA_PARAMETER_RECORD),
    Field::mandatory("acbkRecord", &EDCA_PARAMETER_RECORD),
    Field::mandatory("acviRecord", &EDCA_PARAMETER_RECORD),
    Field::mandatory("acvoRecord", &EDCA_PARAMETER_RECORD),
];
pub static EDCA_PARAMETER_SET: AsnType = AsnType::Sequence {
    fields: &EDCA_SET_FIELDS,
    extensible: false,
};
