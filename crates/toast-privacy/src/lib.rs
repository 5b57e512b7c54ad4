//! Site Toast Privacy
//!
//! Site data removal and permission reset for a set of origins.
//!
//! Site data categories removed per origin:
//! - IndexedDB, localStorage, Cache Storage, WebSQL, file systems
//! - Service worker registrations
//!
//! Permissions reset to "ask" per origin pattern:
//! - Location, Camera, Microphone, Notifications

mod error;
mod permissions;
mod site_data;

pub use error::PrivacyError;
pub use permissions::{
    ContentSettings, PermissionOutcome, PermissionResetter, PermissionState, PermissionType,
};
pub use site_data::{BrowsingData, DataKinds, SiteDataFlags, SiteDataOutcome, SiteDataPurger};

pub type Result<T> = std::result::Result<T, PrivacyError>;
