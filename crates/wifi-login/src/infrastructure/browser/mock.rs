//! Scripted browser for unit and integration testing.
//!
//! Allows tests to describe a portal page (where the login page lands, which
//! selectors are present, where a submit click leads) and to inspect every
//! call the login flow made, without launching Chrome.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::login_portal::{BrowserError, BrowserLauncher, LaunchSettings, PortalBrowser};

/// One recorded call on a [`ScriptedBrowser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserCall {
    Navigate(String),
    WaitIdle,
    CurrentUrl,
    WaitVisible(String),
    Fill(String, String),
    ClickFirst(Vec<String>),
    Close,
}

/// Description of the page a scripted session serves.
#[derive(Debug, Clone, Default)]
pub struct PageScript {
    /// Address reported after navigation.  Falls back to the requested URL.
    pub landing_url: Option<String>,
    /// Address reported after a successful submit click.
    pub after_submit_url: Option<String>,
    /// Selectors that match a visible element.
    pub present: Vec<String>,
    /// If set, clicking a present control fails with this message.
    pub click_error: Option<String>,
    /// If set, launching fails with this message.
    pub launch_error: Option<String>,
}

impl PageScript {
    /// A page at `url` with no elements.
    pub fn login_form(url: &str) -> Self {
        Self {
            landing_url: Some(url.to_string()),
            ..Self::default()
        }
    }

    /// Adds visible elements matched by `selectors`.
    pub fn with_controls(mut self, selectors: &[&str]) -> Self {
        self.present
            .extend(selectors.iter().map(|s| s.to_string()));
        self
    }

    /// The login page redirects to `url` on load.
    pub fn redirecting_to(mut self, url: &str) -> Self {
        self.landing_url = Some(url.to_string());
        self
    }

    /// A submit click navigates to `url`.
    pub fn after_submit(mut self, url: &str) -> Self {
        self.after_submit_url = Some(url.to_string());
        self
    }

    /// Clicking a submit control raises `reason`.
    pub fn failing_click(mut self, reason: &str) -> Self {
        self.click_error = Some(reason.to_string());
        self
    }

    /// Launching the browser fails with `reason`.
    pub fn failing_launch(mut self, reason: &str) -> Self {
        self.launch_error = Some(reason.to_string());
        self
    }

    fn has(&self, selector: &str) -> bool {
        self.present.iter().any(|s| s == selector)
    }
}

/// A [`BrowserLauncher`] whose sessions all serve the same [`PageScript`] and
/// record into one shared call log.
pub struct ScriptedLauncher {
    script: PageScript,
    calls: Arc<Mutex<Vec<BrowserCall>>>,
    launches: Mutex<Vec<LaunchSettings>>,
}

impl ScriptedLauncher {
    pub fn new(script: PageScript) -> Self {
        Self {
            script,
            calls: Arc::new(Mutex::new(Vec::new())),
            launches: Mutex::new(Vec::new()),
        }
    }

    /// Every call made on sessions from this launcher, in order.
    pub fn calls(&self) -> Vec<BrowserCall> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    /// Settings of every launch attempt, in order.
    pub fn launches(&self) -> Vec<LaunchSettings> {
        self.launches.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl BrowserLauncher for ScriptedLauncher {
    async fn launch(&self, settings: &LaunchSettings) -> Result<Box<dyn PortalBrowser>, BrowserError> {
        self.launches
            .lock()
            .expect("lock poisoned")
            .push(settings.clone());
        if let Some(reason) = &self.script.launch_error {
            return Err(BrowserError::Launch(reason.clone()));
        }
        Ok(Box::new(ScriptedBrowser {
            script: self.script.clone(),
            url: "about:blank".to_string(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

/// A [`PortalBrowser`] session that follows a [`PageScript`].
pub struct ScriptedBrowser {
    script: PageScript,
    url: String,
    calls: Arc<Mutex<Vec<BrowserCall>>>,
}

impl ScriptedBrowser {
    fn record(&self, call: BrowserCall) {
        self.calls.lock().expect("lock poisoned").push(call);
    }

    fn not_visible(selector: &str) -> BrowserError {
        BrowserError::NotVisible {
            selector: selector.to_string(),
            reason: "timed out".to_string(),
        }
    }
}

#[async_trait]
impl PortalBrowser for ScriptedBrowser {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.record(BrowserCall::Navigate(url.to_string()));
        self.url = self
            .script
            .landing_url
            .clone()
            .unwrap_or_else(|| url.to_string());
        Ok(())
    }

    async fn wait_idle(&mut self) -> Result<(), BrowserError> {
        self.record(BrowserCall::WaitIdle);
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String, BrowserError> {
        self.record(BrowserCall::CurrentUrl);
        Ok(self.url.clone())
    }

    async fn wait_visible(&mut self, selector: &str) -> Result<(), BrowserError> {
        self.record(BrowserCall::WaitVisible(selector.to_string()));
        if self.script.has(selector) {
            Ok(())
        } else {
            Err(Self::not_visible(selector))
        }
    }

    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), BrowserError> {
        if !self.script.has(selector) {
            return Err(Self::not_visible(selector));
        }
        self.record(BrowserCall::Fill(selector.to_string(), value.to_string()));
        Ok(())
    }

    async fn click_first(&mut self, candidates: &[&str]) -> Result<Option<String>, BrowserError> {
        self.record(BrowserCall::ClickFirst(
            candidates.iter().map(|c| c.to_string()).collect(),
        ));
        let Some(selector) = candidates.iter().find(|c| self.script.has(c)) else {
            return Ok(None);
        };
        if let Some(reason) = &self.script.click_error {
            return Err(BrowserError::Automation(reason.clone()));
        }
        if let Some(next) = &self.script.after_submit_url {
            self.url = next.clone();
        }
        Ok(Some(selector.to_string()))
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.record(BrowserCall::Close);
        Ok(())
    }
}
