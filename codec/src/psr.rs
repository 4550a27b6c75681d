//! Provider service requests and the registry that advertises them.

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::{CodecError, CodecResult, RegistryError};
use crate::limits::CodecLimits;
use crate::pci::PciTable;
use crate::types::{ChannelAccess, PsrEntry, Psid, WsaChannelInfo, WsaServiceInfo};
use crate::validate::{check_psid, check_psr};

/// Ordered, capacity-bounded table of provider service requests.
///
/// Entries keep registration order; PSIDs are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsrTable {
    entries: Vec<PsrEntry>,
    capacity: usize,
}

impl PsrTable {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, psid: Psid) -> Option<&PsrEntry> {
        self.entries.iter().find(|entry| entry.psid == psid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PsrEntry> {
        self.entries.iter()
    }

    /// Appends `psr` and returns the new count.
    pub fn insert(&mut self, psr: PsrEntry) -> Result<usize, RegistryError> {
        if self.entries.len() >= self.capacity {
            return Err(RegistryError::TableFull {
                capacity: self.capacity,
            });
        }
        if self.get(psr.psid).is_some() {
            return Err(RegistryError::DuplicatePsid { psid: psr.psid });
        }
        self.entries.push(psr);
        Ok(self.entries.len())
    }

    /// Removes the entry for `psid`, keeping the order of the rest.
    pub fn remove(&mut self, psid: Psid) -> Result<usize, RegistryError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.psid == psid)
            .ok_or(RegistryError::NotFound { psid })?;
        self.entries.remove(index);
        Ok(self.entries.len())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Service-Info and Channel-Info lists synthesized from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WsaLists {
    pub service_infos: Vec<WsaServiceInfo>,
    pub channel_infos: Vec<WsaChannelInfo>,
}

/// PCI table plus the lock-guarded PSR table.
///
/// This is the state every registry and WSA construction call runs against.
/// The PCI table is immutable and read without the lock.
#[derive(Debug)]
pub struct ProviderRegistry {
    pci: PciTable,
    psrs: Mutex<PsrTable>,
    limits: CodecLimits,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new(limits: CodecLimits) -> Self {
        Self {
            pci: PciTable::init(),
            psrs: Mutex::new(PsrTable::new(limits.max_psrs)),
            limits,
        }
    }

    #[must_use]
    pub fn pci(&self) -> &PciTable {
        &self.pci
    }

    #[must_use]
    pub fn limits(&self) -> &CodecLimits {
        &self.limits
    }

    /// Registers `psr` and returns the new number of entries.
    ///
    /// The service channel must have a PCI entry; capacity and duplicate
    /// checks belong to the table.
    pub fn add_psr(&self, psr: PsrEntry) -> CodecResult<usize> {
        check_psr(&psr)?;
        let psid = psr.psid;
        let channel = psr.service_channel;
        if self.pci.get(channel).is_none() {
            return Err(RegistryError::NoRelatedChannelInfo { channel }.into());
        }

        let count = self.psrs.lock().insert(psr)?;

        debug!(%psid, channel, count, "PSR added");
        Ok(count)
    }

    /// Removes the entry for `psid` and returns the new number of entries.
    pub fn delete_psr(&self, psid: Psid) -> CodecResult<usize> {
        check_psid(psid)?;
        let count = self.psrs.lock().remove(psid)?;
        debug!(%psid, count, "PSR deleted");
        Ok(count)
    }

    pub fn delete_all_psrs(&self) {
        self.psrs.lock().clear();
        debug!("all PSRs deleted");
    }

    pub fn get_psr(&self, psid: Psid) -> CodecResult<PsrEntry> {
        check_psid(psid)?;
        self.psrs
            .lock()
            .get(psid)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound { psid }.into())
    }

    #[must_use]
    pub fn psr_count(&self) -> usize {
        self.psrs.lock().len()
    }

    /// Copies at most `capacity` entries in registration order.
    #[must_use]
    pub fn get_all_psrs(&self, capacity: usize) -> Vec<PsrEntry> {
        self.psrs.lock().iter().take(capacity).cloned().collect()
    }

    /// Changing the PSC of a registered PSR.
    pub fn update_psc(&self, psid: Psid, _psc: &[u8]) -> CodecResult<usize> {
        check_psid(psid)?;
        Err(CodecError::NotSupported {
            operation: "PSC update",
        })
    }

    /// Builds the Service-Info and Channel-Info lists for `wsa_id`.
    ///
    /// Entries are taken in registration order. Each PSR adds one Service-Info;
    /// its channel reuses an existing Channel-Info slot when one advertises the
    /// same channel and appends a new slot otherwise. Synthesis stops at the
    /// first PSR that finds the Service-Info list full or needs a slot in a
    /// full Channel-Info list; that PSR and every later one are dropped.
    pub fn wsa_lists(&self, wsa_id: u8) -> CodecResult<WsaLists> {
        let mut lists = WsaLists::default();
        let psrs = self.psrs.lock();
        let mut candidates = psrs.iter().filter(|psr| psr.wsa_id == wsa_id);
        let mut full = None;

        for psr in candidates.by_ref() {
            if lists.service_infos.len() >= self.limits.max_service_infos {
                full = Some("Service-Info");
                break;
            }
            let pci = self.pci.get(psr.service_channel).ok_or(
                RegistryError::NoRelatedChannelInfo {
                    channel: psr.service_channel,
                },
            )?;

            let slot = match lists
                .channel_infos
                .iter()
                .position(|info| info.channel == pci.channel)
            {
                Some(slot) => slot,
                None if lists.channel_infos.len() >= self.limits.max_channel_infos => {
                    full = Some("Channel-Info");
                    break;
                }
                None => {
                    let mut info = WsaChannelInfo::from_pci(pci);
                    if psr.channel_access != ChannelAccess::Continuous {
                        info.channel_access = Some(psr.channel_access);
                    }
                    lists.channel_infos.push(info);
                    lists.channel_infos.len() - 1
                }
            };

            lists.service_infos.push(service_info(psr, slot));
        }

        if let Some(list) = full {
            // the PSR that hit the cap was consumed by the loop
            let dropped = candidates.by_ref().count() + 1;
            warn!(wsa_id, dropped, list, "WSA list full, services not advertised");
        }
        drop(candidates);
        drop(psrs);
        Ok(lists)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new(CodecLimits::default())
    }
}

fn service_info(psr: &PsrEntry, slot: usize) -> WsaServiceInfo {
    let options = &psr.options;
    WsaServiceInfo {
        psid: psr.psid,
        // slot is below the Channel-Info cap, which fits the 5-bit index
        channel_index: (slot + 1) as u8,
        psc: options.psc.clone(),
        ipv6_address: options.ip_service.map(|ip| ip.address),
        service_port: options.ip_service.map(|ip| ip.port),
        provider_mac: options.provider_mac,
        rcpi_threshold: options.rcpi_threshold,
        wsa_count_threshold: options.wsa_count_threshold,
        wsa_count_threshold_interval: options.wsa_count_threshold_interval,
    }
}
