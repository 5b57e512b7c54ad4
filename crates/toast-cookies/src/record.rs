//! Cookie records as reported by the host

use serde::{Deserialize, Serialize};

use toast_scope::Origin;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
    pub name: String,
    #[serde(default)]
    pub value: String,
    /// Cookie domain; a leading dot marks a domain (wildcard) cookie
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub host_only: bool,
}

impl CookieRecord {
    pub fn new(name: impl Into<String>, domain: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    /// Identity of this cookie in the host's jar
    pub fn key(&self) -> CookieKey {
        CookieKey {
            domain: self.domain.clone(),
            path: self.path.clone(),
            name: self.name.clone(),
            store_id: self.store_id.clone().unwrap_or_default(),
        }
    }

    /// Domain without the leading wildcard marker
    pub fn bare_domain(&self) -> &str {
        self.domain.strip_prefix('.').unwrap_or(&self.domain)
    }

    /// Cookie path, `/` when the host reported none
    pub fn effective_path(&self) -> &str {
        if self.path.is_empty() {
            "/"
        } else {
            &self.path
        }
    }
}

/// `(domain, path, name, store_id)`; a missing store id compares equal to an empty one
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CookieKey {
    pub domain: String,
    pub path: String,
    pub name: String,
    pub store_id: String,
}

/// URL handed to the host when removing `cookie` found under `discovered_under`.
///
/// The host is taken from the cookie's own domain so that domain cookies set
/// by a sibling are removed too; only the scheme comes from the origin.
pub fn removal_url(cookie: &CookieRecord, discovered_under: &Origin) -> String {
    let host = cookie.bare_domain();
    let path = cookie.effective_path();

    if host.is_empty() {
        return discovered_under.join_path(path);
    }

    Origin::new(discovered_under.scheme(), host).join_path(path)
}
