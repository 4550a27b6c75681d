//! Complete MPDUs: envelope followed by a WSM.

use uper::UperCodec;

use crate::error::{CodecError, CodecResult};
use crate::types::{WsmRxParams, WsmTxParams};
use crate::validate::check_tx_params;
use crate::wsm::{construct_wsm, parse_wsm};

/// Writes the envelope and the WSM into `out`, returning the MPDU length.
///
/// Nothing is written unless the whole MPDU fits.
pub fn construct_wsm_mpdu(
    codec: &dyn UperCodec,
    params: &WsmTxParams,
    payload: Option<&[u8]>,
    out: &mut [u8],
) -> CodecResult<usize> {
    check_tx_params(params)?;
    if out.len() < wire::ENVELOPE_LEN {
        return Err(CodecError::BufferTooSmall {
            needed: wire::ENVELOPE_LEN,
            available: out.len(),
        });
    }

    let wsm_len = construct_wsm(codec, params, payload, &mut out[wire::ENVELOPE_LEN..])
        .map_err(|err| match err {
            CodecError::BufferTooSmall { needed, available } => CodecError::BufferTooSmall {
                needed: needed + wire::ENVELOPE_LEN,
                available: available + wire::ENVELOPE_LEN,
            },
            other => other,
        })?;
    let envelope = wire::EnvelopeParams {
        dest: params.dest,
        src: params.src,
        priority: params.priority,
    };
    let header_len = wire::construct_envelope(&envelope, out)?;
    Ok(header_len + wsm_len)
}

/// Parses an MPDU carrying a WSM, copying the body into `payload_out`.
pub fn parse_wsm_mpdu(
    codec: &dyn UperCodec,
    mpdu: &[u8],
    limits: &wire::Limits,
    payload_out: &mut [u8],
) -> CodecResult<(usize, WsmRxParams)> {
    let (header_len, envelope) = wire::parse_envelope(mpdu, limits)?;
    let (payload_len, header) = parse_wsm(codec, &mpdu[header_len..], payload_out)?;
    Ok((payload_len, WsmRxParams::new(envelope, header)))
}
