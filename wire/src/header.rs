//! 802.11 header fields and wire constants.

use crate::mac::MacAddress;

/// Length of the QoS-Data MAC header in bytes.
pub const MAC_HEADER_LEN: usize = 26;

/// Length of the LLC header (Ethertype only) in bytes.
pub const LLC_HEADER_LEN: usize = 2;

/// MAC header plus LLC header.
pub const ENVELOPE_LEN: usize = MAC_HEADER_LEN + LLC_HEADER_LEN;

/// Ethertype identifying WSMP.
pub const WSMP_ETHERTYPE: u16 = 0x88DC;

/// BSSID used outside the context of a BSS.
pub const WILDCARD_BSSID: MacAddress = MacAddress::BROADCAST;

/// Shortest WSMP header (N-Header + T-Header) in bytes.
pub const WSMP_HEADER_MIN_LEN: usize = 4;

/// Longest WSMP header, with every N-Header extension present.
pub const WSMP_HEADER_MAX_LEN: usize = 18;

/// Largest MSDU (LLC header + WSMP header + body).
pub const MAX_MSDU_LEN: usize = 2304;

/// Largest WSM body. A body this long needs a two-octet length, so the
/// WSMP header is five octets.
pub const MAX_WSM_BODY_LEN: usize = MAX_MSDU_LEN - LLC_HEADER_LEN - 5;

/// Largest WSM body when the WSMP header carries every extension.
pub const MAX_WSM_BODY_LEN_ALL_EXTENSIONS: usize =
    MAX_MSDU_LEN - LLC_HEADER_LEN - WSMP_HEADER_MAX_LEN;

/// Largest MPDU without the trailing CRC.
pub const MAX_MPDU_LEN: usize = MAC_HEADER_LEN + MAX_MSDU_LEN;

/// Largest MPDU including the 4-byte CRC.
pub const MAX_MPDU_LEN_WITH_CRC: usize = MAX_MPDU_LEN + 4;

/// Smallest MPDU: envelope plus the shortest WSMP header.
pub const MIN_MPDU_LEN: usize = ENVELOPE_LEN + WSMP_HEADER_MIN_LEN;

/// 802.11 frame types.
pub const FRAME_TYPE_DATA: u8 = 2;

/// 802.11 data frame subtypes.
pub const FRAME_SUBTYPE_QOS_DATA: u8 = 8;

/// 802.11 frame control field.
///
/// Packed little-endian into two octets:
///
/// | bits  | field            |
/// |-------|------------------|
/// | 0-1   | protocol version |
/// | 2-3   | type             |
/// | 4-7   | subtype          |
/// | 8..15 | flags            |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameControl {
    pub protocol_version: u8,
    pub frame_type: u8,
    pub subtype: u8,
    pub to_ds: bool,
    pub from_ds: bool,
    pub more_fragments: bool,
    pub retry: bool,
    pub power_management: bool,
    pub more_data: bool,
    pub protected: bool,
    pub order: bool,
}

impl FrameControl {
    /// Frame control of an outgoing QoS-Data frame outside a BSS.
    #[must_use]
    pub const fn qos_data() -> Self {
        Self {
            protocol_version: 0,
            frame_type: FRAME_TYPE_DATA,
            subtype: FRAME_SUBTYPE_QOS_DATA,
            to_ds: false,
            from_ds: false,
            more_fragments: false,
            retry: false,
            power_management: false,
            more_data: false,
            protected: false,
            order: false,
        }
    }

    /// Packs the fields; sub-fields wider than their slot are truncated.
    #[must_use]
    pub const fn pack(self) -> u16 {
        (self.protocol_version as u16 & 0x3)
            | (self.frame_type as u16 & 0x3) << 2
            | (self.subtype as u16 & 0xF) << 4
            | (self.to_ds as u16) << 8
            | (self.from_ds as u16) << 9
            | (self.more_fragments as u16) << 10
            | (self.retry as u16) << 11
            | (self.power_management as u16) << 12
            | (self.more_data as u16) << 13
            | (self.protected as u16) << 14
            | (self.order as u16) << 15
    }

    #[must_use]
    pub const fn unpack(raw: u16) -> Self {
        Self {
            protocol_version: (raw & 0x3) as u8,
            frame_type: ((raw >> 2) & 0x3) as u8,
            subtype: ((raw >> 4) & 0xF) as u8,
            to_ds: raw & (1 << 8) != 0,
            from_ds: raw & (1 << 9) != 0,
            more_fragments: raw & (1 << 10) != 0,
            retry: raw & (1 << 11) != 0,
            power_management: raw & (1 << 12) != 0,
            more_data: raw & (1 << 13) != 0,
            protected: raw & (1 << 14) != 0,
            order: raw & (1 << 15) != 0,
        }
    }
}

/// QoS-control ack policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AckPolicy {
    #[default]
    Normal,
    NoAck,
    NoExplicitAck,
    BlockAck,
}

impl AckPolicy {
    /// Policy for a destination: group-addressed frames are never acknowledged.
    #[must_use]
    pub const fn for_destination(dest: MacAddress) -> Self {
        if dest.is_group() {
            Self::NoAck
        } else {
            Self::Normal
        }
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::NoAck => 1,
            Self::NoExplicitAck => 2,
            Self::BlockAck => 3,
        }
    }

    /// Decodes the low two bits of `bits`.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0 => Self::Normal,
            1 => Self::NoAck,
            2 => Self::NoExplicitAck,
            _ => Self::BlockAck,
        }
    }
}

/// 802.11 QoS control field.
///
/// Packed little-endian: TID (bits 0-3), EOSP (4), ack policy (5-6),
/// A-MSDU present (7), TXOP limit / queue size (8-15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QosControl {
    pub tid: u8,
    pub eosp: bool,
    pub ack_policy: AckPolicy,
    pub amsdu_present: bool,
    pub txop: u8,
}

impl QosControl {
    /// QoS control for a WSM with user priority `priority`.
    #[must_use]
    pub const fn for_priority(priority: u8, dest: MacAddress) -> Self {
        Self {
            tid: priority,
            eosp: false,
            ack_policy: AckPolicy::for_destination(dest),
            amsdu_present: false,
            txop: 0,
        }
    }

    #[must_use]
    pub const fn pack(self) -> u16 {
        (self.tid as u16 & 0xF)
            | (self.eosp as u16) << 4
            | (self.ack_policy.bits() as u16) << 5
            | (self.amsdu_present as u16) << 7
            | (self.txop as u16) << 8
    }

    #[must_use]
    pub const fn unpack(raw: u16) -> Self {
        Self {
            tid: (raw & 0xF) as u8,
            eosp: raw & (1 << 4) != 0,
            ack_policy: AckPolicy::from_bits((raw >> 5) as u8),
            amsdu_present: raw & (1 << 7) != 0,
            txop: (raw >> 8) as u8,
        }
    }
}
