//! Purge reports and bridge responses

use serde::{Deserialize, Serialize};

use toast_scope::Scope;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieReport {
    pub ran: bool,
    /// Cookies seen during enumeration, counted once per origin they showed up under
    pub before: usize,
    pub cleared: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub ran: bool,
    pub cleared: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionReport {
    pub ran: bool,
    pub reset: bool,
}

/// Outcome of one reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurgeReport {
    pub origin_touched: String,
    pub hostname: String,
    pub scope_used: Scope,
    pub cookies: CookieReport,
    pub storage: CategoryReport,
    pub service_workers: CategoryReport,
    pub permissions: PermissionReport,
}

/// Reply to a `RESET_NOW` message: `{ok: true, ...report}` or `{ok: false, error}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub report: Option<PurgeReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResetResponse {
    pub fn success(report: PurgeReport) -> Self {
        Self {
            ok: true,
            report: Some(report),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            report: None,
            error: Some(error.into()),
        }
    }
}
