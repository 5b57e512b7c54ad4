//! Cookie purge pass

use std::collections::HashMap;
use std::sync::Arc;

use toast_scope::{Origin, OriginSet};

use crate::record::{removal_url, CookieKey, CookieRecord};
use crate::store::CookieStore;

/// Counts from one purge pass.
///
/// `before` is the raw enumeration count: a cookie visible under two target
/// origins counts twice. Removal works on the `unique` set, so
/// `cleared + failed == unique <= before`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CookiePurgeStats {
    pub before: usize,
    pub unique: usize,
    pub cleared: usize,
    pub failed: usize,
}

pub struct CookiePurger {
    store: Arc<dyn CookieStore>,
}

struct Discovered {
    cookie: CookieRecord,
    origin: Origin,
}

impl CookiePurger {
    pub fn new(store: Arc<dyn CookieStore>) -> Self {
        Self { store }
    }

    /// Remove every cookie visible to `origins`
    pub async fn purge(&self, origins: &OriginSet) -> CookiePurgeStats {
        let (before, discovered) = self.collect(origins).await;

        let mut stats = CookiePurgeStats {
            before,
            unique: discovered.len(),
            ..Default::default()
        };

        for Discovered { cookie, origin } in &discovered {
            let url = removal_url(cookie, origin);
            match self
                .store
                .remove(&url, &cookie.name, cookie.store_id.as_deref())
                .await
            {
                Ok(true) => stats.cleared += 1,
                Ok(false) => {
                    stats.failed += 1;
                    tracing::debug!(url = %url, name = %cookie.name, "Cookie was not removed");
                }
                Err(e) => {
                    stats.failed += 1;
                    tracing::debug!(url = %url, name = %cookie.name, error = %e, "Cookie removal failed");
                }
            }
        }

        tracing::info!(
            origins = origins.len(),
            before = stats.before,
            unique = stats.unique,
            cleared = stats.cleared,
            failed = stats.failed,
            "Purged cookies"
        );

        stats
    }

    /// Enumerate per origin and merge by cookie identity.
    ///
    /// Returns the raw enumeration count and the unique cookies in first-seen
    /// order. A later sighting replaces the origin the cookie was found under.
    async fn collect(&self, origins: &OriginSet) -> (usize, Vec<Discovered>) {
        let mut raw_count = 0;
        let mut index: HashMap<CookieKey, usize> = HashMap::new();
        let mut discovered: Vec<Discovered> = Vec::new();

        for origin in origins {
            let cookies = match self.store.get_all(&origin.to_string()).await {
                Ok(cookies) => cookies,
                Err(e) => {
                    tracing::debug!(origin = %origin, error = %e, "Cookie enumeration failed");
                    Vec::new()
                }
            };

            raw_count += cookies.len();

            for cookie in cookies {
                let key = cookie.key();
                let entry = Discovered {
                    cookie,
                    origin: origin.clone(),
                };
                match index.get(&key).copied() {
                    Some(i) => discovered[i] = entry,
                    None => {
                        index.insert(key, discovered.len());
                        discovered.push(entry);
                    }
                }
            }
        }

        (raw_count, discovered)
    }
}
