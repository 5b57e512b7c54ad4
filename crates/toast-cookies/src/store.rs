//! Host cookie store abstraction

use async_trait::async_trait;

use crate::record::CookieRecord;
use crate::Result;

/// Cookie jar of the host browser.
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// All cookies the host would send to `url`.
    async fn get_all(&self, url: &str) -> Result<Vec<CookieRecord>>;

    /// Remove the cookie `name` that matches `url` in `store_id`.
    ///
    /// Returns `Ok(false)` when the host reports that nothing was removed.
    async fn remove(&self, url: &str, name: &str, store_id: Option<&str>) -> Result<bool>;
}
