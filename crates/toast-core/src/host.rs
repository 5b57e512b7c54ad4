//! Host browser capabilities consumed by the resetter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use toast_cookies::CookieStore;
use toast_privacy::{BrowsingData, ContentSettings};

/// The tab (or equivalent) a reset applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsingContext {
    pub id: String,
    pub url: Option<String>,
}

#[async_trait]
pub trait BrowsingContexts: Send + Sync {
    /// The active context of the current window, if any
    async fn active_context(&self) -> Option<BrowsingContext>;
}

#[derive(Clone)]
pub struct HostApis {
    pub contexts: Arc<dyn BrowsingContexts>,
    pub cookies: Arc<dyn CookieStore>,
    pub browsing_data: Arc<dyn BrowsingData>,
    pub content_settings: Arc<dyn ContentSettings>,
}
