//! Storage and service worker removal

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use toast_scope::{Origin, OriginSet};

use crate::Result;

/// Data categories of one browsing-data removal call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataKinds {
    #[serde(rename = "indexedDB")]
    pub indexed_db: bool,
    pub local_storage: bool,
    pub cache_storage: bool,
    #[serde(rename = "webSQL")]
    pub web_sql: bool,
    pub file_systems: bool,
    pub service_workers: bool,
}

impl DataKinds {
    pub fn for_flags(flags: SiteDataFlags) -> Self {
        Self {
            indexed_db: flags.storage,
            local_storage: flags.storage,
            cache_storage: flags.storage,
            web_sql: flags.storage,
            file_systems: flags.storage,
            service_workers: flags.service_workers,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.indexed_db
            || self.local_storage
            || self.cache_storage
            || self.web_sql
            || self.file_systems
            || self.service_workers)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteDataFlags {
    pub storage: bool,
    pub service_workers: bool,
}

/// Whether each category was requested for at least one origin.
/// The host reports no per-category counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteDataOutcome {
    pub storage_cleared: bool,
    pub service_workers_cleared: bool,
}

/// Browsing-data removal of the host browser.
#[async_trait]
pub trait BrowsingData: Send + Sync {
    /// Remove `kinds` for `origin` only. Irreversible.
    async fn remove(&self, origin: &Origin, kinds: &DataKinds) -> Result<()>;
}

pub struct SiteDataPurger {
    browsing_data: Arc<dyn BrowsingData>,
}

impl SiteDataPurger {
    pub fn new(browsing_data: Arc<dyn BrowsingData>) -> Self {
        Self { browsing_data }
    }

    pub async fn purge(&self, origins: &OriginSet, flags: SiteDataFlags) -> SiteDataOutcome {
        let kinds = DataKinds::for_flags(flags);
        let mut outcome = SiteDataOutcome::default();

        if kinds.is_empty() {
            return outcome;
        }

        for origin in origins {
            // Host gives no success signal; an error here is logged only
            if let Err(e) = self.browsing_data.remove(origin, &kinds).await {
                tracing::warn!(origin = %origin, error = %e, "Site data removal failed");
            }

            outcome.storage_cleared |= flags.storage;
            outcome.service_workers_cleared |= flags.service_workers;
        }

        tracing::info!(
            origins = origins.len(),
            storage = flags.storage,
            service_workers = flags.service_workers,
            "Removed site data"
        );

        outcome
    }
}
