//! WSMP header and body.
//!
//! A WSM is a `ShortMsgNpdu`: the N-Header (null-networking subtype, version
//! and optional extensions), the T-Header (broadcast transport with the
//! destination PSID) and the body.

use tracing::trace;
use uper::{AsnValue, UperCodec, UperError};

use crate::asn;
use crate::error::{CodecError, CodecResult, ExtContext, SizeKind};
use crate::ext::{decode_extensions, encode_extensions, reject_extensions, NHeaderExt};
use crate::fields::{integer, list, octets, required, sequence};
use crate::psid::{psid_from_value, psid_to_value};
use crate::types::{WsmTxParams, WsmpHeader};
use crate::validate::check_tx_params;

/// WSMP version written and accepted.
pub const WSMP_VERSION: u8 = 3;

/// Largest WSM (headers plus body) that fits an MSDU after the LLC header.
pub const MAX_WSM_LEN: usize = wire::MAX_MSDU_LEN - wire::LLC_HEADER_LEN;

/// Encodes a WSM into `out` and returns its length.
///
/// N-Header extensions are written for the optional parameters that are set,
/// in the order channel number, data rate, transmit power. A missing payload
/// is an empty body.
pub fn construct_wsm(
    codec: &dyn UperCodec,
    params: &WsmTxParams,
    payload: Option<&[u8]>,
    out: &mut [u8],
) -> CodecResult<usize> {
    check_tx_params(params)?;
    let body = payload.unwrap_or_default();
    if body.len() > wire::MAX_WSM_BODY_LEN {
        return Err(CodecError::TooLong {
            kind: SizeKind::Payload,
            len: body.len(),
            max: wire::MAX_WSM_BODY_LEN,
        });
    }

    let n_extensions = encode_extensions(codec, &NHeaderExt::from_tx_params(params))?;
    let subtype = AsnValue::choice(
        asn::SUBTYPE_NULL_NETWORKING,
        AsnValue::Sequence(vec![
            Some(AsnValue::Integer(i64::from(WSMP_VERSION))),
            n_extensions,
        ]),
    );
    let transport = AsnValue::choice(
        asn::TRANSPORT_BC_MODE,
        AsnValue::Sequence(vec![Some(psid_to_value(params.psid)?), None]),
    );
    let npdu = AsnValue::Sequence(vec![
        Some(subtype),
        Some(transport),
        Some(AsnValue::OctetString(body.to_vec())),
    ]);

    let encoded = codec.encode(&asn::SHORT_MSG_NPDU, &npdu)?;
    check_wsm_len(encoded.len())?;
    let available = out.len();
    let dst = out
        .get_mut(..encoded.len())
        .ok_or(CodecError::BufferTooSmall {
            needed: encoded.len(),
            available,
        })?;
    dst.copy_from_slice(&encoded);

    trace!(psid = %params.psid, len = encoded.len(), "WSM encoded");
    Ok(encoded.len())
}

/// Decodes a WSM, copying its body into `payload_out`.
///
/// Returns the body length and the header fields. Extensions the sender left
/// out are `None` in the header.
pub fn parse_wsm(
    codec: &dyn UperCodec,
    bytes: &[u8],
    payload_out: &mut [u8],
) -> CodecResult<(usize, WsmpHeader)> {
    check_wsm_len(bytes.len())?;

    let npdu = codec
        .decode(&asn::SHORT_MSG_NPDU, bytes)
        .map_err(reserved_to_unsupported)?;
    let slots = sequence(&npdu, "WSMP NPDU")?;

    let (subtype, null_networking) = required(slots, asn::NPDU_SUBTYPE, "WSMP subtype")?
        .as_choice()
        .ok_or(CodecError::AbnormalCodec {
            what: "WSMP subtype",
        })?;
    if subtype != asn::SUBTYPE_NULL_NETWORKING {
        return Err(CodecError::UnsupportedSubtype { index: subtype });
    }
    let nn = sequence(null_networking, "null networking header")?;
    let version = integer::<u8>(required(nn, asn::NN_VERSION, "WSMP version")?, "WSMP version")?;
    if version != WSMP_VERSION {
        return Err(CodecError::UnsupportedVersion { found: version });
    }

    let mut header = WsmpHeader {
        version,
        ..WsmpHeader::default()
    };
    let n_extensions = nn.get(asn::NN_EXTENSIONS).and_then(Option::as_ref);
    if let Some(exts) = n_extensions {
        let count = list(exts, "N-Header extensions")?.len();
        if count > NHeaderExt::MAX_COUNT {
            return Err(CodecError::TooManyExtensions {
                context: ExtContext::NHeader,
                count,
                max: NHeaderExt::MAX_COUNT,
            });
        }
    }
    for ext in decode_extensions::<NHeaderExt>(codec, n_extensions)? {
        ext.apply(&mut header);
    }

    let (transport, bc_pdu) = required(slots, asn::NPDU_TRANSPORT, "WSMP transport")?
        .as_choice()
        .ok_or(CodecError::AbnormalCodec {
            what: "WSMP transport",
        })?;
    if transport != asn::TRANSPORT_BC_MODE {
        return Err(CodecError::UnsupportedTransport { index: transport });
    }
    let bc = sequence(bc_pdu, "broadcast T-Header")?;
    reject_extensions(
        ExtContext::THeader,
        bc.get(asn::BC_EXTENSIONS).and_then(Option::as_ref),
    )?;
    header.psid = psid_from_value(required(bc, asn::BC_DEST_ADDRESS, "destination PSID")?)?;

    let body = octets(required(slots, asn::NPDU_BODY, "WSM body")?, "WSM body")?;
    if body.len() > wire::MAX_WSM_BODY_LEN {
        return Err(CodecError::TooLong {
            kind: SizeKind::Payload,
            len: body.len(),
            max: wire::MAX_WSM_BODY_LEN,
        });
    }
    let available = payload_out.len();
    let dst = payload_out
        .get_mut(..body.len())
        .ok_or(CodecError::BufferTooSmall {
            needed: body.len(),
            available,
        })?;
    dst.copy_from_slice(body);

    trace!(psid = %header.psid, len = body.len(), "WSM decoded");
    Ok((body.len(), header))
}

/// Engines refuse reserved alternatives while decoding; the size of the
/// refusing root tells the subtype and transport CHOICEs apart.
fn reserved_to_unsupported(err: UperError) -> CodecError {
    match err {
        UperError::ReservedAlternative { index, count } if count == asn::SUBTYPE_COUNT => {
            CodecError::UnsupportedSubtype { index }
        }
        UperError::ReservedAlternative { index, count } if count == asn::TRANSPORT_COUNT => {
            CodecError::UnsupportedTransport { index }
        }
        other => CodecError::Uper(other),
    }
}

fn check_wsm_len(len: usize) -> CodecResult<()> {
    if len > MAX_WSM_LEN {
        return Err(CodecError::TooLong {
            kind: SizeKind::Wsm,
            len,
            max: MAX_WSM_LEN,
        });
    }
    if len < wire::WSMP_HEADER_MIN_LEN {
        return Err(CodecError::TooShort {
            kind: SizeKind::Wsm,
            len,
            min: wire::WSMP_HEADER_MIN_LEN,
        });
    }
    Ok(())
}
