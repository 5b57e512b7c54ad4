//! Reset requests and presets

use serde::{Deserialize, Serialize};

use toast_scope::Scope;

/// Popup presets
///
/// | Level  | Cookies | Storage | Service workers | Permissions |
/// | Light  | yes     |         |                 |             |
/// | Medium | yes     | yes     |                 |             |
/// | Dark   | yes     | yes     | yes             | yes         |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetLevel {
    #[default]
    Light,
    Medium,
    Dark,
}

impl ResetLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResetLevel::Light => "light",
            ResetLevel::Medium => "medium",
            ResetLevel::Dark => "dark",
        }
    }
}

impl std::fmt::Display for ResetLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResetLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ResetLevel::Light),
            "medium" => Ok(ResetLevel::Medium),
            "dark" => Ok(ResetLevel::Dark),
            _ => Err(format!("Unknown reset level: {}", s)),
        }
    }
}

/// Flags as sent by the popup. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wipe_cookies: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wipe_storage: Option<bool>,
    #[serde(default, alias = "wipeSW", skip_serializing_if = "Option::is_none")]
    pub wipe_service_workers: Option<bool>,
    #[serde(default, alias = "wipePerms", skip_serializing_if = "Option::is_none")]
    pub wipe_permissions: Option<bool>,
}

impl ResetPayload {
    pub fn from_level(level: ResetLevel, scope: Scope) -> Self {
        let (cookies, storage, service_workers, permissions) = match level {
            ResetLevel::Light => (true, false, false, false),
            ResetLevel::Medium => (true, true, false, false),
            ResetLevel::Dark => (true, true, true, true),
        };

        Self {
            scope: Some(scope),
            wipe_cookies: Some(cookies),
            wipe_storage: Some(storage),
            wipe_service_workers: Some(service_workers),
            wipe_permissions: Some(permissions),
        }
    }

    /// Resolve defaults: missing scope falls back to `default_scope`,
    /// missing flags are off.
    pub fn into_request(self, target_url: impl Into<String>, default_scope: Scope) -> ResetRequest {
        ResetRequest {
            target_url: target_url.into(),
            scope: self.scope.unwrap_or(default_scope),
            wipe_cookies: self.wipe_cookies.unwrap_or(false),
            wipe_storage: self.wipe_storage.unwrap_or(false),
            wipe_service_workers: self.wipe_service_workers.unwrap_or(false),
            wipe_permissions: self.wipe_permissions.unwrap_or(false),
        }
    }
}

/// A fully resolved reset request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    target_url: String,
    scope: Scope,
    wipe_cookies: bool,
    wipe_storage: bool,
    wipe_service_workers: bool,
    wipe_permissions: bool,
}

impl ResetRequest {
    /// Request for `target_url` with every wipe turned off
    pub fn new(target_url: impl Into<String>, scope: Scope) -> Self {
        ResetPayload::default().into_request(target_url, scope)
    }

    pub fn with_level(target_url: impl Into<String>, scope: Scope, level: ResetLevel) -> Self {
        ResetPayload::from_level(level, scope).into_request(target_url, scope)
    }

    pub fn with_cookies(mut self, wipe: bool) -> Self {
        self.wipe_cookies = wipe;
        self
    }

    pub fn with_storage(mut self, wipe: bool) -> Self {
        self.wipe_storage = wipe;
        self
    }

    pub fn with_service_workers(mut self, wipe: bool) -> Self {
        self.wipe_service_workers = wipe;
        self
    }

    pub fn with_permissions(mut self, wipe: bool) -> Self {
        self.wipe_permissions = wipe;
        self
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn wipe_cookies(&self) -> bool {
        self.wipe_cookies
    }

    pub fn wipe_storage(&self) -> bool {
        self.wipe_storage
    }

    pub fn wipe_service_workers(&self) -> bool {
        self.wipe_service_workers
    }

    pub fn wipe_permissions(&self) -> bool {
        self.wipe_permissions
    }
}
