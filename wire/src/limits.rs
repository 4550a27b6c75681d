//! Configurable limits for bounded envelope parsing.

use crate::header::{MAX_MPDU_LEN, MIN_MPDU_LEN};

/// Envelope-level limits on received MPDUs.
///
/// Checked before any header field is read. WSMP body limits belong to the
/// codec layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum MPDU size in bytes (CRC already stripped).
    pub max_mpdu_bytes: usize,

    /// Minimum MPDU size in bytes.
    pub min_mpdu_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_mpdu_bytes: MAX_MPDU_LEN,
            min_mpdu_bytes: MIN_MPDU_LEN,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_mpdu_bytes: 256,
            min_mpdu_bytes: MIN_MPDU_LEN,
        }
    }

    /// Creates limits with no upper bound (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_mpdu_bytes: usize::MAX,
            min_mpdu_bytes: 0,
        }
    }
}
