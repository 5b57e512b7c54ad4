//! Per-site reset serialization

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Key under which resets of `host` are serialized: its base domain, or the
/// host itself when it has none. A reset of `mail.proton.me` and a family
/// reset of `proton.me` share the key `proton.me`.
pub fn site_key(host: &str) -> String {
    toast_scope::base_domain(host)
        .unwrap_or(host)
        .to_lowercase()
}

#[derive(Default)]
pub struct SiteLocks {
    sites: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SiteLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other reset holds `site`
    pub async fn lock(&self, site: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut sites = self.sites.lock();
            // Entries only referenced by the map are idle
            sites.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(sites.entry(site.to_string()).or_default())
        };

        if lock.try_lock().is_err() {
            tracing::debug!(site = %site, "Waiting for running reset of the same site");
        }

        lock.lock_owned().await
    }
}
