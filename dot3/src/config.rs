//! Configuration for the message layer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use codec::CodecLimits;

use crate::error::{Dot3Error, Dot3Result};

/// Most Channel-Info entries a Service-Info channel index can refer to.
const MAX_CHANNEL_INDEX: usize = 31;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dot3Config {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Registry, WSA list and MPDU size limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Dot3Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Dot3Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Dot3Error::Config(format!("failed to read config: {e}")))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Dot3Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Dot3Error::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration as TOML.
    pub fn to_toml(&self) -> Dot3Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Dot3Error::Config(format!("failed to serialize config: {e}")))
    }

    /// Validate configuration.
    pub fn validate(&self) -> Dot3Result<()> {
        let limits = &self.limits;
        if limits.max_psrs == 0 {
            return Err(Dot3Error::InvalidConfig(
                "max_psrs must be at least 1".into(),
            ));
        }
        if limits.max_channel_infos > MAX_CHANNEL_INDEX {
            return Err(Dot3Error::InvalidConfig(format!(
                "max_channel_infos {} exceeds the channel index range ({MAX_CHANNEL_INDEX})",
                limits.max_channel_infos
            )));
        }
        if limits.min_mpdu_bytes > limits.max_mpdu_bytes {
            return Err(Dot3Error::InvalidConfig(format!(
                "min_mpdu_bytes {} is above max_mpdu_bytes {}",
                limits.min_mpdu_bytes, limits.max_mpdu_bytes
            )));
        }
        Ok(())
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive. `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (text or json).
    #[serde(default)]
    pub format: LogFormat,

    /// Enable colored output.
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_color() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            color: default_color(),
        }
    }
}

/// Size limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Capacity of the PSR table.
    #[serde(default = "default_max_psrs")]
    pub max_psrs: usize,

    /// Service-Info entries kept in a WSA, built or parsed.
    #[serde(default = "default_max_service_infos")]
    pub max_service_infos: usize,

    /// Channel-Info entries kept in a WSA, built or parsed.
    #[serde(default = "default_max_channel_infos")]
    pub max_channel_infos: usize,

    /// Largest MPDU accepted on receive.
    #[serde(default = "default_max_mpdu_bytes")]
    pub max_mpdu_bytes: usize,

    /// Smallest MPDU accepted on receive.
    #[serde(default = "default_min_mpdu_bytes")]
    pub min_mpdu_bytes: usize,
}

fn default_max_psrs() -> usize {
    CodecLimits::default().max_psrs
}
fn default_max_service_infos() -> usize {
    CodecLimits::default().max_service_infos
}
fn default_max_channel_infos() -> usize {
    CodecLimits::default().max_channel_infos
}
fn default_max_mpdu_bytes() -> usize {
    wire::Limits::default().max_mpdu_bytes
}
fn default_min_mpdu_bytes() -> usize {
    wire::Limits::default().min_mpdu_bytes
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_psrs: default_max_psrs(),
            max_service_infos: default_max_service_infos(),
            max_channel_infos: default_max_channel_infos(),
            max_mpdu_bytes: default_max_mpdu_bytes(),
            min_mpdu_bytes: default_min_mpdu_bytes(),
        }
    }
}

impl LimitsConfig {
    #[must_use]
    pub fn codec_limits(&self) -> CodecLimits {
        CodecLimits {
            max_psrs: self.max_psrs,
            max_service_infos: self.max_service_infos,
            max_channel_infos: self.max_channel_infos,
        }
    }

    #[must_use]
    pub fn wire_limits(&self) -> wire::Limits {
        wire::Limits {
            max_mpdu_bytes: self.max_mpdu_bytes,
            min_mpdu_bytes: self.min_mpdu_bytes,
        }
    }
}

/// Install the global tracing subscriber.
///
/// A second call fails instead of replacing the first subscriber.
pub fn init_logging(config: &LoggingConfig) -> Dot3Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => subscriber
            .with(fmt::layer().json())
            .try_init()
            .map_err(|e| Dot3Error::Logging(e.to_string())),
        LogFormat::Text => subscriber
            .with(fmt::layer().with_ansi(config.color))
            .try_init()
            .map_err(|e| Dot3Error::Logging(e.to_string())),
    }
}
