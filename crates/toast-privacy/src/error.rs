//! Privacy error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrivacyError {
    #[error("Host API error: {0}")]
    Host(String),
}
