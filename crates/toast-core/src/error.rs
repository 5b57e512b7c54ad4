//! Reset error types

use thiserror::Error;
use toast_scope::ScopeError;

#[derive(Error, Debug)]
pub enum ResetError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),

    #[error("No active tab")]
    NoActiveContext,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ScopeError> for ResetError {
    fn from(err: ScopeError) -> Self {
        match err {
            ScopeError::InvalidUrl(url) => ResetError::InvalidUrl(url),
            ScopeError::UnsupportedScheme(scheme) => ResetError::UnsupportedUrl(scheme),
            ScopeError::MissingHost(url) => ResetError::UnsupportedUrl(url),
        }
    }
}
