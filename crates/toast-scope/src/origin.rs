//! Origin and origin set types

use serde::{Deserialize, Serialize};
use std::fmt;

/// How far a reset reaches beyond the page's own origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// The exact origin of the page
    #[default]
    Origin,
    /// The exact origin plus base domain and common sibling subdomains
    Family,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Origin => "origin",
            Scope::Family => "family",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "origin" => Ok(Scope::Origin),
            "family" => Ok(Scope::Family),
            _ => Err(format!("Unknown scope: {}", s)),
        }
    }
}

/// A `scheme://host` pair identifying a storage partition.
///
/// Ports and paths are deliberately not part of it: the host APIs key site
/// data by scheme and hostname.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
}

impl Origin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into().to_lowercase(),
            host: host.into().to_lowercase(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Content-settings pattern matching every URL under this origin
    pub fn pattern(&self) -> String {
        format!("{}/*", self)
    }

    /// Absolute URL for `path` under this origin (`/` when empty)
    pub fn join_path(&self, path: &str) -> String {
        if path.is_empty() {
            format!("{}/", self)
        } else if path.starts_with('/') {
            format!("{}{}", self, path)
        } else {
            format!("{}/{}", self, path)
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

/// Insertion-ordered set of origins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginSet {
    origins: Vec<Origin>,
}

impl OriginSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an origin, returning false if it was already present
    pub fn insert(&mut self, origin: Origin) -> bool {
        if self.origins.contains(&origin) {
            return false;
        }
        self.origins.push(origin);
        true
    }

    pub fn contains(&self, origin: &Origin) -> bool {
        self.origins.contains(origin)
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// The page's own origin (always inserted first)
    pub fn exact(&self) -> Option<&Origin> {
        self.origins.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Origin> {
        self.origins.iter()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.origins.iter().map(|o| o.to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a OriginSet {
    type Item = &'a Origin;
    type IntoIter = std::slice::Iter<'a, Origin>;

    fn into_iter(self) -> Self::IntoIter {
        self.origins.iter()
    }
}
