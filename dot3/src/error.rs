//! Error type of the facade.

use std::fmt;

use codec::{CodecError, RegistryError};

/// Result type for facade operations.
pub type Dot3Result<T> = Result<T, Dot3Error>;

/// Errors returned by [`Dot3`](crate::Dot3) and the configuration helpers.
#[derive(Debug)]
pub enum Dot3Error {
    /// A message or registry operation failed.
    Codec(CodecError),

    /// The configuration file could not be read or parsed.
    Config(String),

    /// The configuration parsed but is not usable.
    InvalidConfig(String),

    /// The tracing subscriber could not be installed.
    Logging(String),
}

impl Dot3Error {
    /// Returns the codec error, if this is one.
    #[must_use]
    pub const fn as_codec(&self) -> Option<&CodecError> {
        match self {
            Self::Codec(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Dot3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Codec(e) => write!(f, "{e}"),
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Logging(msg) => write!(f, "failed to initialise logging: {msg}"),
        }
    }
}

impl std::error::Error for Dot3Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodecError> for Dot3Error {
    fn from(err: CodecError) -> Self {
        Self::Codec(err)
    }
}

impl From<RegistryError> for Dot3Error {
    fn from(err: RegistryError) -> Self {
        Self::Codec(err.into())
    }
}
