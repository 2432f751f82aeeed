//! PortalLoginFlow: signs in to a captive portal through a browser session.
//!
//! The flow drives a [`PortalBrowser`] capability rather than a concrete
//! browser, so the state machine below is tested against
//! `infrastructure::browser::mock` and only the Chrome adapter talks to a real
//! browser.
//!
//! # States
//!
//! ```text
//! probe ── online ──► NotRequired (no browser launched)
//!   │ offline
//!   ▼
//! launch ─► navigate ─► settle ─► on status page? ── yes ──► AlreadyAuthenticated
//!                                        │ no
//!                                        ▼
//!                        fill username ─► fill password ─► submit ─► settle
//!                                                                      │
//!                    status page? ─► RedirectedToStatusPage            │
//!                    probe online? ─► InternetAvailable   ◄────────────┘
//!                    otherwise     ─► Failed
//! ```
//!
//! The session is closed on every path out of the flow, including errors.
//! A credential field that never becomes visible is fatal; a missing or
//! failing submit control is not.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};
use wifi_login_core::{
    selectors::{PASSWORD_FIELD, SUBMIT_CONTROLS, USERNAME_FIELD},
    LoginOutcome, PortalConfig, SubmitOutcome,
};

use super::reconnect::{ConnectivityProbe, PortalLogin};

/// Error raised by a browser automation primitive.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The browser process could not be started.
    #[error("failed to launch browser: {0}")]
    Launch(String),

    /// Navigating to a page failed outright (DNS, refused connection, ...).
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// A selector did not match a visible element before the timeout.
    #[error("element `{selector}` did not become visible: {reason}")]
    NotVisible { selector: String, reason: String },

    /// Any other DevTools or runtime failure.
    #[error("browser automation error: {0}")]
    Automation(String),
}

/// Error type for the login flow.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    Browser(#[from] BrowserError),
}

/// How the browser should be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSettings {
    /// Hide the browser window.
    pub headless: bool,
    /// Explicit executable; `None` lets the adapter locate an installed one.
    pub executable: Option<PathBuf>,
}

impl LaunchSettings {
    pub fn from_config(config: &PortalConfig) -> Self {
        Self {
            headless: config.headless(),
            executable: config.browser_path.clone(),
        }
    }
}

/// Capabilities the login flow needs from one browser session.
///
/// Every wait is bounded by the implementation's own default timeout.
#[async_trait]
pub trait PortalBrowser: Send {
    /// Opens `url` in the session's page.
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Waits until the current navigation has finished loading.
    async fn wait_idle(&mut self) -> Result<(), BrowserError>;

    /// Address of the page currently shown.
    async fn current_url(&mut self) -> Result<String, BrowserError>;

    /// Waits for `selector` to match a visible element.
    async fn wait_visible(&mut self, selector: &str) -> Result<(), BrowserError>;

    /// Replaces the value of the input matched by `selector`.
    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), BrowserError>;

    /// Clicks the first candidate present on the page, in order.
    ///
    /// Returns the selector that was clicked, or `None` when no candidate
    /// matched anything.
    async fn click_first(&mut self, candidates: &[&str]) -> Result<Option<String>, BrowserError>;

    /// Ends the session and releases the browser process.
    async fn close(&mut self) -> Result<(), BrowserError>;
}

/// Starts browser sessions.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self, settings: &LaunchSettings) -> Result<Box<dyn PortalBrowser>, BrowserError>;
}

/// The captive-portal login use case.
pub struct PortalLoginFlow {
    launcher: Arc<dyn BrowserLauncher>,
    probe: Arc<dyn ConnectivityProbe>,
}

impl PortalLoginFlow {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self { launcher, probe }
    }

    async fn drive(
        &self,
        browser: &mut dyn PortalBrowser,
        config: &PortalConfig,
    ) -> Result<LoginOutcome, LoginError> {
        browser.navigate(&config.login_page_url).await?;
        browser.wait_idle().await?;

        let landing = browser.current_url().await?;
        debug!("login page settled at {landing}");
        if config.is_status_page(&landing) {
            info!("Already logged in. No further actions required.");
            return Ok(LoginOutcome::AlreadyAuthenticated);
        }

        info!("Filling in username...");
        browser.wait_visible(USERNAME_FIELD).await?;
        browser.fill(USERNAME_FIELD, &config.username).await?;

        info!("Filling in password...");
        browser.wait_visible(PASSWORD_FIELD).await?;
        browser.fill(PASSWORD_FIELD, &config.password).await?;

        info!("Submitting form...");
        let submit = submit_form(browser).await;

        // The outcome is evaluated even if the page never settles.
        if let Err(e) = browser.wait_idle().await {
            warn!("page did not settle after submitting: {e}");
        }

        Ok(self.evaluate(browser, config, submit).await)
    }

    async fn evaluate(
        &self,
        browser: &mut dyn PortalBrowser,
        config: &PortalConfig,
        submit: SubmitOutcome,
    ) -> LoginOutcome {
        let on_status_page = match browser.current_url().await {
            Ok(url) => {
                debug!("page after submit: {url}");
                config.is_status_page(&url)
            }
            Err(e) => {
                warn!("could not read the page address after submitting: {e}");
                false
            }
        };

        let outcome = if on_status_page {
            LoginOutcome::RedirectedToStatusPage { submit }
        } else if self.probe.is_internet_available().await {
            LoginOutcome::InternetAvailable { submit }
        } else {
            LoginOutcome::Failed { submit }
        };

        match &outcome {
            LoginOutcome::Failed { .. } => warn!("Login failed; internet is still unavailable or no redirect occurred."),
            LoginOutcome::RedirectedToStatusPage { .. } => info!("Login successful; redirected to status page."),
            _ => info!("Login successful; internet is now available."),
        }
        outcome
    }
}

/// Clicks the first submit control present.  Never fails the flow.
async fn submit_form(browser: &mut dyn PortalBrowser) -> SubmitOutcome {
    match browser.click_first(&SUBMIT_CONTROLS).await {
        Ok(Some(selector)) => {
            info!("Clicked on {selector}");
            SubmitOutcome::Clicked { selector }
        }
        Ok(None) => {
            info!("No submit button found on the page.");
            SubmitOutcome::NoControl
        }
        Err(e) => {
            warn!("Failed to click the submit button: {e}");
            SubmitOutcome::ClickFailed {
                reason: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl PortalLogin for PortalLoginFlow {
    async fn login(&self, config: &PortalConfig) -> Result<LoginOutcome, LoginError> {
        if self.probe.is_internet_available().await {
            info!("Internet is available. No login required.");
            return Ok(LoginOutcome::NotRequired);
        }

        info!("Opening browser for login at {}...", config.login_page_url);
        let mut browser = self
            .launcher
            .launch(&LaunchSettings::from_config(config))
            .await?;

        let result = self.drive(browser.as_mut(), config).await;

        if let Err(e) = browser.close().await {
            warn!("failed to close browser: {e}");
        }
        result
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
