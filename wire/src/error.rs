//! Error types for envelope operations.

use std::fmt;

use crate::mac::MacAddress;

/// Result type for envelope parsing.
pub type WireResult<T> = Result<T, EnvelopeError>;

/// A received frame is not a WSMP-carrying QoS-Data frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EnvelopeError {
    /// Frame is too small to hold the envelope and a WSMP header.
    FrameTooShort { actual: usize, required: usize },

    /// Frame exceeds the configured MPDU limit.
    FrameTooLong { actual: usize, limit: usize },

    /// 802.11 protocol version is not 0.
    InvalidProtocolVersion { found: u8 },

    /// Frame type is not Data.
    InvalidFrameType { found: u8 },

    /// Frame subtype is not QoS-Data.
    InvalidFrameSubtype { found: u8 },

    /// Address 3 is not the wildcard BSSID.
    InvalidBssid { found: MacAddress },

    /// QoS TID is not a user priority (0..=7).
    InvalidTrafficId { found: u8 },

    /// LLC Ethertype is not WSMP.
    InvalidEthertype { found: u16 },
}

/// Errors that can occur while writing an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    BufferTooSmall { needed: usize, available: usize },
    InvalidPriority { priority: u8 },
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameTooShort { actual, required } => {
                write!(f, "frame too short: {actual} bytes, need at least {required}")
            }
            Self::FrameTooLong { actual, limit } => {
                write!(f, "frame too long: {actual} bytes, limit {limit}")
            }
            Self::InvalidProtocolVersion { found } => {
                write!(f, "invalid lower-layer protocol version: {found}")
            }
            Self::InvalidFrameType { found } => {
                write!(f, "invalid lower-layer frame type: {found}")
            }
            Self::InvalidFrameSubtype { found } => {
                write!(f, "invalid lower-layer frame subtype: {found}")
            }
            Self::InvalidBssid { found } => {
                write!(f, "invalid lower-layer BSSID: {found}")
            }
            Self::InvalidTrafficId { found } => {
                write!(f, "invalid lower-layer traffic id: {found}")
            }
            Self::InvalidEthertype { found } => {
                write!(f, "invalid lower-layer Ethertype: 0x{found:04X}")
            }
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { needed, available } => {
                write!(f, "buffer too small: need {needed}, have {available}")
            }
            Self::InvalidPriority { priority } => {
                write!(f, "invalid user priority: {priority}")
            }
        }
    }
}

impl std::error::Error for EnvelopeError {}

impl std::error::Error for EncodeError {}
