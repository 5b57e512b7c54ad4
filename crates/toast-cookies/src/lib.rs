//! Site Toast Cookies
//!
//! Enumerates the cookies visible to a set of origins, merges duplicates and
//! removes each unique cookie through the host cookie store.
//!
//! Enumeration and removal are best-effort: a failure for one origin or one
//! cookie lowers the counts but never aborts the purge.

mod error;
mod purger;
mod record;
mod store;

pub use error::CookieError;
pub use purger::{CookiePurgeStats, CookiePurger};
pub use record::{removal_url, CookieKey, CookieRecord};
pub use store::CookieStore;

pub type Result<T> = std::result::Result<T, CookieError>;
