//! Provider channel information for the supported band.

use crate::types::PciEntry;

/// First channel of the 5.9 GHz band.
pub const FIRST_CHANNEL: u8 = 172;
/// Last channel of the 5.9 GHz band.
pub const LAST_CHANNEL: u8 = 184;
/// EIRP limit advertised for every channel, dBm.
pub const DEFAULT_EIRP: i8 = 20;

const CLASS_10MHZ: u8 = 17;
const CLASS_20MHZ: u8 = 18;
const RATE_10MHZ: u8 = 12;
const RATE_20MHZ: u8 = 24;

/// Fixed table of channel parameters, one entry per band channel.
///
/// Built once and never mutated, so it can be read without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PciTable {
    entries: Vec<PciEntry>,
}

impl PciTable {
    /// Builds the table for channels 172 through 184.
    ///
    /// Even channels are 10 MHz wide, odd channels 20 MHz.
    #[must_use]
    pub fn init() -> Self {
        let entries = (FIRST_CHANNEL..=LAST_CHANNEL)
            .map(|channel| {
                let (operating_class, data_rate) = if channel % 2 == 0 {
                    (CLASS_10MHZ, RATE_10MHZ)
                } else {
                    (CLASS_20MHZ, RATE_20MHZ)
                };
                PciEntry {
                    operating_class,
                    channel,
                    eirp: DEFAULT_EIRP,
                    data_rate,
                    adaptable: true,
                }
            })
            .collect();
        Self { entries }
    }

    /// Entry for `channel`, if it belongs to the band.
    #[must_use]
    pub fn get(&self, channel: u8) -> Option<&PciEntry> {
        self.entries.iter().find(|entry| entry.channel == channel)
    }

    #[must_use]
    pub fn entries(&self) -> &[PciEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PciEntry> {
        self.entries.iter()
    }
}

impl Default for PciTable {
    fn default() -> Self {
        Self::init()
    }
}
