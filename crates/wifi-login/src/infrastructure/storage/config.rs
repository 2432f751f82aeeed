//! JSON configuration persistence.
//!
//! Reads and writes [`PortalConfig`] to a single file, by default
//! `wifi_config.json` in the working directory.  The document is written
//! with a 4-space indent so it stays easy to edit by hand.
//!
//! # First run
//!
//! When the file does not exist, [`ConfigStore::load_or_create`] asks for
//! every field through a [`Prompt`], saves the answers, and returns them.
//! Required answers are asked again until they are non-empty.  The optional
//! status URL may be left blank, and the debug flag is `yes`/`no`.
//!
//! # Later runs
//!
//! The file is parsed and validated.  A malformed document or a blank
//! required field is fatal; nothing is repaired or regenerated.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;
use tracing::info;
use wifi_login_core::{PortalConfig, ValidationError, DEFAULT_CONFIG_FILE};

use super::prompt::Prompt;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The JSON content could not be parsed.
    #[error("failed to parse config JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The config could not be serialized to JSON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The document parsed but a required field is blank.
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),

    /// The console failed while asking a question.
    #[error("failed to read configuration answer: {0}")]
    Prompt(#[source] io::Error),

    /// Input ended before every required question was answered.
    #[error("input closed before the configuration was complete")]
    InputClosed,
}

const REQUIRED_MESSAGE: &str = "This field is required. Please enter a valid value.";

/// Loads, creates, and saves the configuration file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration, creating it interactively if the file does
    /// not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`] for a bad
    /// document, [`ConfigError::Io`] for file-system failures, and
    /// [`ConfigError::InputClosed`] / [`ConfigError::Prompt`] when the
    /// first-run questions cannot be answered.
    pub fn load_or_create(&self, prompt: &mut dyn Prompt) -> Result<PortalConfig, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => parse_config(&content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let name = self.file_name();
                prompt
                    .notify(&format!(
                        "Configuration file not found. Creating a new \"{name}\" file. Please enter configuration details:"
                    ))
                    .map_err(ConfigError::Prompt)?;
                let config = create_interactively(prompt)?;
                self.save(&config)?;
                info!("Configuration file \"{name}\" successfully created.");
                Ok(config)
            }
            Err(source) => Err(ConfigError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Writes `config` as an indented JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] or [`ConfigError::Io`].
    pub fn save(&self, config: &PortalConfig) -> Result<(), ConfigError> {
        let content = to_pretty_json(config)?;
        std::fs::write(&self.path, content).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

/// Parses and validates a configuration document.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed JSON and
/// [`ConfigError::Invalid`] when a required field is blank.
pub fn parse_config(content: &str) -> Result<PortalConfig, ConfigError> {
    let config: PortalConfig = serde_json::from_str(content).map_err(ConfigError::Parse)?;
    config.validate()?;
    Ok(config)
}

fn to_pretty_json(config: &PortalConfig) -> Result<String, ConfigError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    config
        .serialize(&mut serializer)
        .map_err(ConfigError::Serialize)?;
    buf.push(b'\n');
    // serde_json only emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Asks for every field of a new [`PortalConfig`].
///
/// # Errors
///
/// Returns [`ConfigError::InputClosed`] if input ends while a required field
/// is still blank.
pub fn create_interactively(prompt: &mut dyn Prompt) -> Result<PortalConfig, ConfigError> {
    let target_ssid = ask_required(prompt, "Enter Wi-Fi network name (Example_WIFI): ")?;
    let login_page_url = ask_required(prompt, "Enter login page URL (http://123.456.7.8/login): ")?;
    let username = ask_required(prompt, "Enter username (login): ")?;
    let password = ask_required(prompt, "Enter password (password): ")?;
    let status_url = ask_optional(
        prompt,
        "Enter status check URL (http://123.456.7.8/status (not required)): ",
    )?;
    let debug_mode = ask_optional(prompt, "Enable debug mode? (yes/no): ")?
        .is_some_and(|answer| is_yes(&answer));

    Ok(PortalConfig {
        target_ssid,
        login_page_url,
        username,
        password,
        status_url,
        debug_mode,
        browser_path: None,
    })
}

fn ask_required(prompt: &mut dyn Prompt, message: &str) -> Result<String, ConfigError> {
    loop {
        match prompt.ask(message).map_err(ConfigError::Prompt)? {
            None => return Err(ConfigError::InputClosed),
            Some(answer) if !answer.trim().is_empty() => return Ok(answer.trim().to_string()),
            Some(_) => prompt.notify(REQUIRED_MESSAGE).map_err(ConfigError::Prompt)?,
        }
    }
}

/// Blank answers and end of input both mean "not set".
fn ask_optional(prompt: &mut dyn Prompt, message: &str) -> Result<Option<String>, ConfigError> {
    let answer = prompt.ask(message).map_err(ConfigError::Prompt)?;
    Ok(answer
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty()))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "yes" | "y")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
