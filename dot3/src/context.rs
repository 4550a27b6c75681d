//! The message-layer context object.

use tracing::{debug, trace};

use codec::{
    CodecLimits, ParsedWsa, PerCodec, ProviderRegistry, Psid, PsrEntry, RoutingAdvertisement,
    UperCodec, WsaHeader, WsmRxParams, WsmTxParams, MAX_WSA_LEN,
};

use crate::config::{init_logging, Dot3Config};
use crate::error::Dot3Result;

/// A received WSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WsmReceived {
    /// Bytes of body copied into the caller's buffer.
    pub payload_len: usize,
    pub params: WsmRxParams,
    /// Whether a local user registered interest in the PSID. There is no
    /// interest registry, so this is always `true`.
    pub wsr_registered: bool,
}

/// What [`Dot3::parse_mpdu`] found in an MPDU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    /// A WSM for any PSID other than the WSA one; the body is in the
    /// caller's buffer.
    Wsm(WsmReceived),
    /// A WSA carried in a WSM. The encoded WSA is left in the caller's
    /// buffer, `wsa_len` bytes long.
    Wsa {
        params: WsmRxParams,
        wsa_len: usize,
        wsa: ParsedWsa,
    },
}

/// Envelope fields of a WSA transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WsaTxParams {
    pub dest: wire::MacAddress,
    pub src: wire::MacAddress,
    pub priority: u8,
}

/// Owns the provider registry and the limits every call runs against.
///
/// Safe to share between threads; registry access is serialized internally.
#[derive(Debug)]
pub struct Dot3<C = PerCodec> {
    codec: C,
    registry: ProviderRegistry,
    codec_limits: CodecLimits,
    wire_limits: wire::Limits,
}

impl Dot3<PerCodec> {
    /// Installs logging from `config` and builds the context.
    pub fn init(config: &Dot3Config) -> Dot3Result<Self> {
        init_logging(&config.logging)?;
        Self::new(config)
    }

    /// Builds the context with the default UPER engine. Seeds the PCI table.
    pub fn new(config: &Dot3Config) -> Dot3Result<Self> {
        Self::with_codec(config, PerCodec::new())
    }
}

impl<C: UperCodec> Dot3<C> {
    /// Builds the context around a specific UPER engine.
    pub fn with_codec(config: &Dot3Config, codec: C) -> Dot3Result<Self> {
        config.validate()?;
        let codec_limits = config.limits.codec_limits();
        let registry = ProviderRegistry::new(codec_limits.clone());
        debug!(
            channels = registry.pci().len(),
            max_psrs = codec_limits.max_psrs,
            "dot3 initialised"
        );
        Ok(Self {
            codec,
            registry,
            codec_limits,
            wire_limits: config.limits.wire_limits(),
        })
    }

    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Builds an MPDU carrying a WSM and returns its length.
    pub fn construct_wsm_mpdu(
        &self,
        params: &WsmTxParams,
        payload: Option<&[u8]>,
        out: &mut [u8],
    ) -> Dot3Result<usize> {
        Ok(codec::construct_wsm_mpdu(&self.codec, params, payload, out)?)
    }

    /// Parses an MPDU carrying a WSM, copying the body into `payload_out`.
    pub fn parse_wsm_mpdu(&self, mpdu: &[u8], payload_out: &mut [u8]) -> Dot3Result<WsmReceived> {
        let (payload_len, params) =
            codec::parse_wsm_mpdu(&self.codec, mpdu, &self.wire_limits, payload_out)?;
        Ok(WsmReceived {
            payload_len,
            params,
            wsr_registered: true,
        })
    }

    pub fn add_psr(&self, psr: PsrEntry) -> Dot3Result<usize> {
        Ok(self.registry.add_psr(psr)?)
    }

    pub fn delete_psr(&self, psid: Psid) -> Dot3Result<usize> {
        Ok(self.registry.delete_psr(psid)?)
    }

    pub fn delete_all_psrs(&self) {
        self.registry.delete_all_psrs();
    }

    pub fn get_psr(&self, psid: Psid) -> Dot3Result<PsrEntry> {
        Ok(self.registry.get_psr(psid)?)
    }

    #[must_use]
    pub fn psr_count(&self) -> usize {
        self.registry.psr_count()
    }

    #[must_use]
    pub fn get_all_psrs(&self, capacity: usize) -> Vec<PsrEntry> {
        self.registry.get_all_psrs(capacity)
    }

    pub fn update_psc(&self, psid: Psid, psc: &[u8]) -> Dot3Result<usize> {
        Ok(self.registry.update_psc(psid, psc)?)
    }

    /// Builds a WSA from the registered PSRs and returns its length.
    pub fn construct_wsa(
        &self,
        header: &WsaHeader,
        routing: Option<&RoutingAdvertisement>,
        out: &mut [u8],
    ) -> Dot3Result<usize> {
        Ok(codec::construct_wsa(
            &self.codec,
            &self.registry,
            header,
            routing,
            out,
        )?)
    }

    pub fn parse_wsa(&self, bytes: &[u8]) -> Dot3Result<ParsedWsa> {
        Ok(codec::parse_wsa(&self.codec, bytes, &self.codec_limits)?)
    }

    /// Builds a WSA and sends it as the body of a WSM for the WSA PSID.
    pub fn construct_wsa_mpdu(
        &self,
        params: &WsaTxParams,
        header: &WsaHeader,
        routing: Option<&RoutingAdvertisement>,
        out: &mut [u8],
    ) -> Dot3Result<usize> {
        let mut wsa = vec![0u8; MAX_WSA_LEN];
        let wsa_len = self.construct_wsa(header, routing, &mut wsa)?;
        let tx = WsmTxParams {
            dest: params.dest,
            src: params.src,
            priority: params.priority,
            psid: Psid::WSA,
            ..WsmTxParams::default()
        };
        self.construct_wsm_mpdu(&tx, Some(&wsa[..wsa_len]), out)
    }

    /// Parses any WSMP MPDU, decoding the body as a WSA when it is addressed
    /// to the WSA PSID.
    pub fn parse_mpdu(&self, mpdu: &[u8], payload_out: &mut [u8]) -> Dot3Result<Received> {
        let received = self.parse_wsm_mpdu(mpdu, payload_out)?;
        if received.params.psid != Psid::WSA {
            return Ok(Received::Wsm(received));
        }
        trace!(len = received.payload_len, "WSA received");
        let wsa = self.parse_wsa(&payload_out[..received.payload_len])?;
        Ok(Received::Wsa {
            params: received.params,
            wsa_len: received.payload_len,
            wsa,
        })
    }
}
