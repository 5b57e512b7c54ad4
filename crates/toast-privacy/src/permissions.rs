//! Permission reset
//!
//! | Capability    | Reset to |
//! | Location      | Ask      |
//! | Camera        | Ask      |
//! | Microphone    | Ask      |
//! | Notifications | Ask      |
//!
//! Resetting overwrites whatever allow/deny decision the user made before.

use async_trait::async_trait;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use toast_scope::OriginSet;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionType {
    Location,
    Camera,
    Microphone,
    Notifications,
}

impl PermissionType {
    /// Every category a site reset puts back to "ask"
    pub const RESETTABLE: [PermissionType; 4] = [
        PermissionType::Location,
        PermissionType::Camera,
        PermissionType::Microphone,
        PermissionType::Notifications,
    ];

    /// Content-settings key used by the host
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionType::Location => "location",
            PermissionType::Camera => "camera",
            PermissionType::Microphone => "microphone",
            PermissionType::Notifications => "notifications",
        }
    }
}

impl std::fmt::Display for PermissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Prompt user when requested
    Ask,
    /// Always allow
    Allow,
    /// Always deny
    Deny,
}

/// Per-site content settings of the host browser.
#[async_trait]
pub trait ContentSettings: Send + Sync {
    /// Set the rule for `permission` on URLs matching `pattern`
    async fn set(
        &self,
        permission: PermissionType,
        pattern: &str,
        state: PermissionState,
    ) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionOutcome {
    /// At least one origin was processed
    pub reset: bool,
    /// Individual rules the host accepted
    pub applied: usize,
    /// Individual rules the host rejected
    pub failed: usize,
}

pub struct PermissionResetter {
    settings: Arc<dyn ContentSettings>,
}

impl PermissionResetter {
    pub fn new(settings: Arc<dyn ContentSettings>) -> Self {
        Self { settings }
    }

    /// Put every resettable permission of every origin back to "ask".
    ///
    /// Origins are handled one after another; the categories of a single
    /// origin are requested together.
    pub async fn reset(&self, origins: &OriginSet) -> PermissionOutcome {
        let mut outcome = PermissionOutcome::default();

        for origin in origins {
            let pattern = origin.pattern();

            let results = join_all(PermissionType::RESETTABLE.iter().map(|&permission| {
                let pattern = pattern.as_str();
                async move {
                    let result = self
                        .settings
                        .set(permission, pattern, PermissionState::Ask)
                        .await;
                    (permission, result)
                }
            }))
            .await;

            for (permission, result) in results {
                match result {
                    Ok(()) => outcome.applied += 1,
                    Err(e) => {
                        outcome.failed += 1;
                        tracing::debug!(
                            pattern = %pattern,
                            permission = %permission,
                            error = %e,
                            "Permission reset failed"
                        );
                    }
                }
            }

            outcome.reset = true;
        }

        tracing::info!(
            origins = origins.len(),
            applied = outcome.applied,
            failed = outcome.failed,
            "Reset permissions"
        );

        outcome
    }
}
