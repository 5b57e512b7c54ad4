//! Site Toast Core
//!
//! Orchestrates a site reset: derive the target origins, then purge cookies,
//! site data and permissions through the host browser, and report what ran.
//! The host is reached only through the traits in [`HostApis`]; badges, icons
//! and settings persistence belong to the caller.

mod bridge;
mod config;
mod error;
mod host;
mod locks;
mod report;
mod request;
mod resetter;

pub use bridge::{site_settings_url, Message, RESET_COMMAND, RESET_NOW};
pub use config::Config;
pub use error::ResetError;
pub use host::{BrowsingContext, BrowsingContexts, HostApis};
pub use locks::{site_key, SiteLocks};
pub use report::{CategoryReport, CookieReport, PermissionReport, PurgeReport, ResetResponse};
pub use request::{ResetLevel, ResetPayload, ResetRequest};
pub use resetter::SiteResetter;

// Re-export component types callers need to implement the host traits
pub use toast_cookies::{CookieError, CookieRecord, CookieStore};
pub use toast_privacy::{
    BrowsingData, ContentSettings, DataKinds, PermissionState, PermissionType, PrivacyError,
};
pub use toast_scope::{Origin, OriginSet, Scope};

pub type Result<T> = std::result::Result<T, ResetError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
