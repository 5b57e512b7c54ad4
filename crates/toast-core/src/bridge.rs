//! Inbound surfaces: popup messages and the keyboard shortcut

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::report::ResetResponse;
use crate::request::ResetPayload;
use crate::resetter::SiteResetter;
use crate::Result;

/// Message type sent by the popup
pub const RESET_NOW: &str = "RESET_NOW";

/// Keyboard command name
pub const RESET_COMMAND: &str = "reset-current-site";

/// Envelope of an inbound message. The payload stays raw until the type is
/// known, so messages meant for other listeners never fail to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Message {
    pub fn reset_now(payload: ResetPayload) -> Self {
        Self {
            kind: RESET_NOW.to_string(),
            payload: serde_json::to_value(payload).ok(),
        }
    }

    /// Decode the payload of a `RESET_NOW` message; absent or `null` means defaults
    fn reset_payload(&self) -> Result<ResetPayload> {
        match &self.payload {
            None | Some(Value::Null) => Ok(ResetPayload::default()),
            Some(value) => Ok(ResetPayload::deserialize(value)?),
        }
    }
}

impl SiteResetter {
    /// Answer a popup message. Returns `None` for message types this
    /// resetter does not handle.
    pub async fn handle_message(&self, message: Message) -> Option<ResetResponse> {
        if message.kind != RESET_NOW {
            return None;
        }

        let payload = match message.reset_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected reset payload");
                return Some(ResetResponse::failure(e.to_string()));
            }
        };

        let response = match self.reset_active(payload).await {
            Ok(report) => ResetResponse::success(report),
            Err(e) => {
                tracing::warn!(error = %e, "Reset failed");
                ResetResponse::failure(e.to_string())
            }
        };

        Some(response)
    }

    /// `handle_message` on raw JSON
    pub async fn handle_json(&self, raw: &str) -> Result<Option<String>> {
        let message: Message = serde_json::from_str(raw)?;
        match self.handle_message(message).await {
            Some(response) => Ok(Some(serde_json::to_string(&response)?)),
            None => Ok(None),
        }
    }

    /// Handle a keyboard command. Returns whether the command was recognised;
    /// reset errors are logged and dropped.
    pub async fn run_command(&self, command: &str) -> bool {
        if command != RESET_COMMAND {
            return false;
        }

        let payload = ResetPayload::from_level(
            self.config().shortcut_level,
            self.config().shortcut_scope,
        );

        match self.reset_active(payload).await {
            Ok(report) => tracing::info!(
                hostname = %report.hostname,
                cookies_cleared = report.cookies.cleared,
                "Shortcut reset complete"
            ),
            Err(e) => tracing::debug!(error = %e, "Shortcut reset skipped"),
        }

        true
    }
}

/// Browser page listing the per-site settings of `target_url`
pub fn site_settings_url(target_url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target_url.as_bytes()).collect();
    format!("chrome://settings/content/siteDetails?site={}", encoded)
}
