//! Site reset orchestration

use std::sync::Arc;

use toast_cookies::CookiePurger;
use toast_privacy::{PermissionResetter, SiteDataFlags, SiteDataPurger};
use toast_scope::OriginScopeBuilder;

use crate::config::Config;
use crate::error::ResetError;
use crate::host::{BrowsingContexts, HostApis};
use crate::locks::{site_key, SiteLocks};
use crate::report::{CategoryReport, CookieReport, PermissionReport, PurgeReport};
use crate::request::{ResetPayload, ResetRequest};
use crate::Result;

/// Resets a site's cookies, storage, service workers and permissions.
///
/// Components run in a fixed order (cookies, then site data, then
/// permissions). There are no timeouts: a host call that never completes
/// stalls the reset.
pub struct SiteResetter {
    config: Config,
    scope_builder: OriginScopeBuilder,
    contexts: Arc<dyn BrowsingContexts>,
    cookies: CookiePurger,
    site_data: SiteDataPurger,
    permissions: PermissionResetter,
    locks: SiteLocks,
}

impl SiteResetter {
    pub fn new(config: Config, host: HostApis) -> Self {
        Self {
            scope_builder: config.scope_builder(),
            config,
            contexts: host.contexts,
            cookies: CookiePurger::new(host.cookies),
            site_data: SiteDataPurger::new(host.browsing_data),
            permissions: PermissionResetter::new(host.content_settings),
            locks: SiteLocks::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reset the site of `request.target_url()`.
    ///
    /// URL validation happens before any host call, so an unsupported page
    /// is never partially reset.
    pub async fn reset(&self, request: &ResetRequest) -> Result<PurgeReport> {
        let url = self.scope_builder.parse(request.target_url())?;
        self.scope_builder.check_eligible(&url)?;

        let hostname = url
            .host_str()
            .ok_or_else(|| ResetError::UnsupportedUrl(request.target_url().to_string()))?
            .to_string();

        let _guard = if self.config.serialize_same_site {
            Some(self.locks.lock(&site_key(&hostname)).await)
        } else {
            None
        };

        let origins = self.scope_builder.build_from_url(&url, request.scope())?;

        tracing::info!(
            hostname = %hostname,
            scope = %request.scope(),
            origins = origins.len(),
            cookies = request.wipe_cookies(),
            storage = request.wipe_storage(),
            service_workers = request.wipe_service_workers(),
            permissions = request.wipe_permissions(),
            "Resetting site"
        );

        let mut cookies = CookieReport {
            ran: request.wipe_cookies(),
            ..Default::default()
        };
        if request.wipe_cookies() {
            let stats = self.cookies.purge(&origins).await;
            cookies.before = stats.before;
            cookies.cleared = stats.cleared;
        }

        let site_data = self
            .site_data
            .purge(
                &origins,
                SiteDataFlags {
                    storage: request.wipe_storage(),
                    service_workers: request.wipe_service_workers(),
                },
            )
            .await;

        let mut permissions = PermissionReport {
            ran: request.wipe_permissions(),
            reset: false,
        };
        if request.wipe_permissions() {
            permissions.reset = self.permissions.reset(&origins).await.reset;
        }

        let report = PurgeReport {
            origin_touched: url.origin().ascii_serialization(),
            hostname,
            scope_used: request.scope(),
            cookies,
            storage: CategoryReport {
                ran: request.wipe_storage(),
                cleared: site_data.storage_cleared,
            },
            service_workers: CategoryReport {
                ran: request.wipe_service_workers(),
                cleared: site_data.service_workers_cleared,
            },
            permissions,
        };

        tracing::info!(
            origin = %report.origin_touched,
            cookies_before = report.cookies.before,
            cookies_cleared = report.cookies.cleared,
            "Site reset complete"
        );

        Ok(report)
    }

    /// Reset the site shown in the host's active browsing context
    pub async fn reset_active(&self, payload: ResetPayload) -> Result<PurgeReport> {
        let context = self
            .contexts
            .active_context()
            .await
            .ok_or(ResetError::NoActiveContext)?;

        let url = context
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or(ResetError::NoActiveContext)?;

        tracing::debug!(context_id = %context.id, url = %url, "Resolved active context");

        let request = payload.into_request(url, self.config.default_scope);
        self.reset(&request).await
    }
}
