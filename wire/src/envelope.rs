//! The MAC + LLC envelope around every WSM.
//!
//! Layout (26 + 2 bytes):
//!
//! ```text
//! frame control (LE) | duration | addr1 = dest | addr2 = src | addr3 = wildcard BSSID
//! | sequence control | QoS control (LE) | Ethertype 0x88DC (BE)
//! ```

use crate::error::{EncodeError, EnvelopeError, WireResult};
use crate::header::{
    FrameControl, QosControl, ENVELOPE_LEN, FRAME_SUBTYPE_QOS_DATA, FRAME_TYPE_DATA,
    MAC_HEADER_LEN, WILDCARD_BSSID, WSMP_ETHERTYPE,
};
use crate::limits::Limits;
use crate::mac::MacAddress;

const FC: usize = 0;
const DURATION: usize = 2;
const ADDR1: usize = 4;
const ADDR2: usize = 10;
const ADDR3: usize = 16;
const SEQ_CTRL: usize = 22;
const QOS_CTRL: usize = 24;

/// Highest 802.11 user priority.
pub const MAX_USER_PRIORITY: u8 = 7;

/// Addressing and priority carried by the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EnvelopeParams {
    pub dest: MacAddress,
    pub src: MacAddress,
    /// User priority, 0..=7.
    pub priority: u8,
}

/// Writes the envelope into the start of `out`, returning [`ENVELOPE_LEN`].
pub fn construct_envelope(params: &EnvelopeParams, out: &mut [u8]) -> Result<usize, EncodeError> {
    if params.priority > MAX_USER_PRIORITY {
        return Err(EncodeError::InvalidPriority {
            priority: params.priority,
        });
    }
    if out.len() < ENVELOPE_LEN {
        return Err(EncodeError::BufferTooSmall {
            needed: ENVELOPE_LEN,
            available: out.len(),
        });
    }

    let qos = QosControl::for_priority(params.priority, params.dest);
    out[FC..DURATION].copy_from_slice(&FrameControl::qos_data().pack().to_le_bytes());
    out[DURATION..ADDR1].fill(0);
    out[ADDR1..ADDR2].copy_from_slice(&params.dest.octets());
    out[ADDR2..ADDR3].copy_from_slice(&params.src.octets());
    out[ADDR3..SEQ_CTRL].copy_from_slice(&WILDCARD_BSSID.octets());
    // The lower MAC assigns the sequence number.
    out[SEQ_CTRL..QOS_CTRL].fill(0);
    out[QOS_CTRL..MAC_HEADER_LEN].copy_from_slice(&qos.pack().to_le_bytes());
    out[MAC_HEADER_LEN..ENVELOPE_LEN].copy_from_slice(&WSMP_ETHERTYPE.to_be_bytes());

    Ok(ENVELOPE_LEN)
}

/// Validates the envelope of a received MPDU.
///
/// Returns the envelope length (the WSMP starts at that offset) and the
/// addressing fields.
pub fn parse_envelope(frame: &[u8], limits: &Limits) -> WireResult<(usize, EnvelopeParams)> {
    let required = limits.min_mpdu_bytes.max(ENVELOPE_LEN);
    if frame.len() < required {
        return Err(EnvelopeError::FrameTooShort {
            actual: frame.len(),
            required,
        });
    }
    if frame.len() > limits.max_mpdu_bytes {
        return Err(EnvelopeError::FrameTooLong {
            actual: frame.len(),
            limit: limits.max_mpdu_bytes,
        });
    }

    let fc = FrameControl::unpack(read_u16_le(frame, FC));
    if fc.protocol_version != 0 {
        return Err(EnvelopeError::InvalidProtocolVersion {
            found: fc.protocol_version,
        });
    }
    if fc.frame_type != FRAME_TYPE_DATA {
        return Err(EnvelopeError::InvalidFrameType {
            found: fc.frame_type,
        });
    }
    if fc.subtype != FRAME_SUBTYPE_QOS_DATA {
        return Err(EnvelopeError::InvalidFrameSubtype { found: fc.subtype });
    }

    let bssid = read_mac(frame, ADDR3);
    if bssid != WILDCARD_BSSID {
        return Err(EnvelopeError::InvalidBssid { found: bssid });
    }

    let qos = QosControl::unpack(read_u16_le(frame, QOS_CTRL));
    if qos.tid > MAX_USER_PRIORITY {
        return Err(EnvelopeError::InvalidTrafficId { found: qos.tid });
    }

    let ethertype = u16::from_be_bytes([frame[MAC_HEADER_LEN], frame[MAC_HEADER_LEN + 1]]);
    if ethertype != WSMP_ETHERTYPE {
        return Err(EnvelopeError::InvalidEthertype { found: ethertype });
    }

    Ok((
        ENVELOPE_LEN,
        EnvelopeParams {
            dest: read_mac(frame, ADDR1),
            src: read_mac(frame, ADDR2),
            priority: qos.tid,
        },
    ))
}

fn read_u16_le(frame: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([frame[at], frame[at + 1]])
}

fn read_mac(frame: &[u8], at: usize) -> MacAddress {
    let mut octets = [0u8; 6];
    octets.copy_from_slice(&frame[at..at + MacAddress::LEN]);
    MacAddress::new(octets)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: MacAddress = MacAddress::new([0x02, 0x11, 0x22, 0x33, 0x44, 0x55]);

    fn params(dest: MacAddress, priority: u8) -> EnvelopeParams {
        EnvelopeParams {
            dest,
            src: SRC,
            priority,
        }
    }

    fn frame(params: &EnvelopeParams) -> Vec<u8> {
        let mut buf = vec![0u8; 32];
        let len = construct_envelope(params, &mut buf).unwrap();
        assert_eq!(len, ENVELOPE_LEN);
        buf
    }

    #[test]
    fn broadcast_envelope_bytes() {
        let buf = frame(&params(MacAddress::BROADCAST, 3));
        assert_eq!(&buf[0..4], &[0x88, 0x00, 0x00, 0x00]);
        assert_eq!(&buf[4..10], &[0xFF; 6]);
        assert_eq!(&buf[10..16], &SRC.octets());
        assert_eq!(&buf[16..22], &[0xFF; 6]);
        assert_eq!(&buf[22..24], &[0x00, 0x00]);
        // TID 3, no-ack
        assert_eq!(&buf[24..26], &[0x23, 0x00]);
        assert_eq!(&buf[26..28], &[0x88, 0xDC]);
    }

    #[test]
    fn roundtrip_individual_destination() {
        let dest = MacAddress::new([0x00, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E]);
        let sent = params(dest, 6);
        let buf = frame(&sent);
        assert_eq!(&buf[24..26], &[0x06, 0x00]);
        let (len, received) = parse_envelope(&buf, &Limits::default()).unwrap();
        assert_eq!(len, ENVELOPE_LEN);
        assert_eq!(received, sent);
    }

    #[test]
    fn rejects_priority_above_seven() {
        let mut buf = [0u8; 32];
        let err = construct_envelope(&params(MacAddress::BROADCAST, 8), &mut buf).unwrap_err();
        assert_eq!(err, EncodeError::InvalidPriority { priority: 8 });
    }

    #[test]
    fn rejects_small_output_buffer() {
        let mut buf = [0u8; 27];
        let err = construct_envelope(&params(MacAddress::BROADCAST, 0), &mut buf).unwrap_err();
        assert!(matches!(err, EncodeError::BufferTooSmall { needed: 28, .. }));
    }

    #[test]
    fn rejects_non_wildcard_bssid() {
        let mut buf = frame(&params(MacAddress::BROADCAST, 0));
        buf[21] = 0xFE;
        let err = parse_envelope(&buf, &Limits::default()).unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidBssid { .. }));
    }

    #[test]
    fn rejects_foreign_ethertype() {
        let mut buf = frame(&params(MacAddress::BROADCAST, 0));
        buf[26..28].copy_from_slice(&0x0800u16.to_be_bytes());
        let err = parse_envelope(&buf, &Limits::default()).unwrap_err();
        assert_eq!(err, EnvelopeError::InvalidEthertype { found: 0x0800 });
    }

    #[test]
    fn rejects_wrong_frame_control() {
        let mut buf = frame(&params(MacAddress::BROADCAST, 0));
        buf[0] = 0x08; // plain Data
        let err = parse_envelope(&buf, &Limits::default()).unwrap_err();
        assert_eq!(err, EnvelopeError::InvalidFrameSubtype { found: 0 });

        buf[0] = 0x80; // management beacon
        let err = parse_envelope(&buf, &Limits::default()).unwrap_err();
        assert_eq!(err, EnvelopeError::InvalidFrameType { found: 0 });

        buf[0] = 0x89; // version 1
        let err = parse_envelope(&buf, &Limits::default()).unwrap_err();
        assert_eq!(err, EnvelopeError::InvalidProtocolVersion { found: 1 });
    }

    #[test]
    fn rejects_short_and_long_frames() {
        let err = parse_envelope(&[0x88; 31], &Limits::default()).unwrap_err();
        assert_eq!(
            err,
            EnvelopeError::FrameTooShort {
                actual: 31,
                required: 32
            }
        );
        let long = vec![0u8; 257];
        let err = parse_envelope(&long, &Limits::for_testing()).unwrap_err();
        assert!(matches!(err, EnvelopeError::FrameTooLong { limit: 256, .. }));
    }
}
