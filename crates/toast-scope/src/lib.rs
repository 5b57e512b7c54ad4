//! Site Toast Scope
//!
//! Derives the set of origins a site reset is allowed to touch.
//!
//! - `Scope::Origin`: the exact origin of the page only
//! - `Scope::Family`: the exact origin, its base domain and a handful of
//!   common sibling subdomains (`www`, `mail`, `account`, `auth`, `login`)
//!
//! The base domain is the last two labels of the hostname. This is a rough
//! heuristic and is wrong for multi-label public suffixes such as `co.uk`.

mod builder;
mod error;
mod origin;

pub use builder::{
    base_domain, OriginScopeBuilder, DEFAULT_SIBLING_PREFIXES, DEFAULT_UNSUPPORTED_SCHEMES,
};
pub use error::ScopeError;
pub use origin::{Origin, OriginSet, Scope};

pub type Result<T> = std::result::Result<T, ScopeError>;
