//! Cookie error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CookieError {
    #[error("Cookie store error: {0}")]
    Host(String),
}
