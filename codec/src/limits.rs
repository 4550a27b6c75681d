//! Registry and list caps.

/// Caps on the provider registry and on WSA lists.
///
/// WSA lists longer than the caps are truncated on construction and on
/// parsing; the PSR table refuses entries past `max_psrs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum number of registered provider service requests.
    pub max_psrs: usize,
    /// Maximum number of Service-Info entries in a WSA.
    pub max_service_infos: usize,
    /// Maximum number of Channel-Info entries in a WSA.
    pub max_channel_infos: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_psrs: 128,
            max_service_infos: 31,
            max_channel_infos: 13,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_psrs: 8,
            max_service_infos: 4,
            max_channel_infos: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_match_deployment() {
        let limits = CodecLimits::default();
        assert_eq!(limits.max_psrs, 128);
        assert_eq!(limits.max_service_infos, 31);
        assert_eq!(limits.max_channel_infos, 13);
    }

    #[test]
    fn testing_limits_smaller() {
        let test_limits = CodecLimits::for_testing();
        let default_limits = CodecLimits::default();

        assert!(test_limits.max_psrs < default_limits.max_psrs);
        assert!(test_limits.max_service_infos < default_limits.max_service_infos);
        assert!(test_limits.max_channel_infos < default_limits.max_channel_infos);
    }

    #[test]
    fn limits_const_constructible() {
        const LIMITS: CodecLimits = CodecLimits::for_testing();
        assert_eq!(LIMITS.max_psrs, 8);
    }
}
