//! The flat configuration record persisted between runs.
//!
//! The record is stored as an indented JSON document, by default
//! `wifi_config.json` in the working directory:
//!
//! ```json
//! {
//!     "target_ssid": "Example_WIFI",
//!     "login_page_url": "http://10.0.0.1/login",
//!     "username": "login",
//!     "password": "password",
//!     "status_url": "http://10.0.0.1/status",
//!     "debug_mode": false
//! }
//! ```
//!
//! The four credential/network fields are required and must be non-empty.
//! `status_url` may be `null` (or an empty string, which means the same).
//! `debug_mode` defaults to `false` when absent.  `browser_path` is never
//! prompted for and only appears in the file when a user adds it by hand.
//!
//! There is no schema version: a document is read in full or regenerated in
//! full.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name used when no explicit configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "wifi_config.json";

/// A required field of [`PortalConfig`] was empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field `{0}` is empty")]
    EmptyField(&'static str),
}

/// Everything a run needs to know: which network to join and how to sign in
/// to its captive portal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortalConfig {
    /// SSID (and stored profile name) of the network to auto-join.
    pub target_ssid: String,
    /// Captive-portal entry page.
    pub login_page_url: String,
    pub username: String,
    pub password: String,
    /// Address prefix that indicates an authenticated session.
    #[serde(default)]
    pub status_url: Option<String>,
    /// Shows the browser window and pauses before exit.
    #[serde(default)]
    pub debug_mode: bool,
    /// Explicit Chrome/Chromium executable.  Auto-detected when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_path: Option<PathBuf>,
}

impl PortalConfig {
    /// Checks that every required field holds a non-blank value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] naming the first blank field,
    /// in declaration order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("target_ssid", &self.target_ssid),
            ("login_page_url", &self.login_page_url),
            ("username", &self.username),
            ("password", &self.password),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(ValidationError::EmptyField(*name)),
            None => Ok(()),
        }
    }

    /// The configured status prefix, treating an empty string as absent.
    pub fn status_prefix(&self) -> Option<&str> {
        self.status_url
            .as_deref()
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty())
    }

    /// Returns `true` when `current_url` starts with the configured status
    /// prefix.  Always `false` without a prefix.
    pub fn is_status_page(&self, current_url: &str) -> bool {
        self.status_prefix()
            .is_some_and(|prefix| current_url.starts_with(prefix))
    }

    /// The browser should be hidden unless debugging.
    pub fn headless(&self) -> bool {
        !self.debug_mode
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
