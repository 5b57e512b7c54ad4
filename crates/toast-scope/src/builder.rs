//! Origin set derivation

use std::net::IpAddr;
use url::{Host, Url};

use crate::error::ScopeError;
use crate::origin::{Origin, OriginSet, Scope};
use crate::Result;

/// Subdomains tried next to the base domain in family scope.
/// Most of them won't exist for a given site; removal on them is a no-op.
pub const DEFAULT_SIBLING_PREFIXES: &[&str] = &["www", "mail", "account", "auth", "login"];

/// Scheme prefixes of internal browser pages whose data must never be touched.
/// Matched with `starts_with`, so `chrome` also covers `chrome-extension`.
pub const DEFAULT_UNSUPPORTED_SCHEMES: &[&str] = &[
    "chrome",
    "edge",
    "brave",
    "opera",
    "about",
    "devtools",
    "view-source",
];

pub struct OriginScopeBuilder {
    sibling_prefixes: Vec<String>,
    unsupported_schemes: Vec<String>,
}

impl OriginScopeBuilder {
    pub fn new() -> Self {
        Self {
            sibling_prefixes: DEFAULT_SIBLING_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            unsupported_schemes: DEFAULT_UNSUPPORTED_SCHEMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn with_sibling_prefixes<I>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.sibling_prefixes = prefixes
            .into_iter()
            .map(|p| p.trim().trim_matches('.').to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        self
    }

    pub fn with_unsupported_schemes<I>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.unsupported_schemes = schemes
            .into_iter()
            .map(|s| s.trim().trim_end_matches(':').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    /// Parse a target URL
    pub fn parse(&self, url: &str) -> Result<Url> {
        Url::parse(url.trim()).map_err(|e| ScopeError::InvalidUrl(format!("{}: {}", url, e)))
    }

    /// Reject internal pages and URLs without a host
    pub fn check_eligible(&self, url: &Url) -> Result<()> {
        let scheme = url.scheme();
        if self
            .unsupported_schemes
            .iter()
            .any(|prefix| scheme.starts_with(prefix.as_str()))
        {
            return Err(ScopeError::UnsupportedScheme(scheme.to_string()));
        }

        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(()),
            _ => Err(ScopeError::MissingHost(url.to_string())),
        }
    }

    /// Exact `scheme://hostname` origin of an eligible URL
    pub fn exact_origin(&self, url: &Url) -> Result<Origin> {
        self.check_eligible(url)?;
        let host = url
            .host_str()
            .ok_or_else(|| ScopeError::MissingHost(url.to_string()))?;
        Ok(Origin::new(url.scheme(), host))
    }

    /// Parse `url` and derive the origins covered by `scope`
    pub fn build(&self, url: &str, scope: Scope) -> Result<OriginSet> {
        let parsed = self.parse(url)?;
        self.build_from_url(&parsed, scope)
    }

    pub fn build_from_url(&self, url: &Url, scope: Scope) -> Result<OriginSet> {
        let exact = self.exact_origin(url)?;
        let scheme = exact.scheme().to_string();

        let mut origins = OriginSet::new();
        origins.insert(exact);

        if scope == Scope::Family {
            let base = match url.host() {
                Some(Host::Domain(domain)) => base_domain(domain),
                _ => None,
            };

            if let Some(base) = base {
                origins.insert(Origin::new(scheme.as_str(), base));
                for prefix in &self.sibling_prefixes {
                    origins.insert(Origin::new(scheme.as_str(), format!("{}.{}", prefix, base)));
                }
            }
        }

        tracing::debug!(
            url = %url,
            scope = %scope,
            origin_count = origins.len(),
            "Built target origins"
        );

        Ok(origins)
    }
}

impl Default for OriginScopeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Last two dot-separated labels of `host`.
///
/// Returns `None` for IP literals and single-label hosts such as `localhost`,
/// which have no family. A plain last-two-labels split would return
/// `localhost` itself and a family reset would then also target
/// `www.localhost`, `mail.localhost` and the other siblings; here such a reset
/// covers the exact origin only.
///
/// Multi-label public suffixes are not recognised: `app.example.co.uk`
/// yields `co.uk`.
pub fn base_domain(host: &str) -> Option<&str> {
    let host = host.trim_end_matches('.');
    if host.is_empty() || host.starts_with('[') || host.parse::<IpAddr>().is_ok() {
        return None;
    }

    let mut dots = host.rmatch_indices('.');
    dots.next()?;

    let base = match dots.next() {
        Some((idx, _)) => &host[idx + 1..],
        None => host,
    };

    if base.starts_with('.') || base.ends_with('.') {
        None
    } else {
        Some(base)
    }
}
