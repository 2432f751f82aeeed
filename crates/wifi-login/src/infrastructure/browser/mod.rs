//! Chrome adapter for the login flow.
//!
//! Implements [`BrowserLauncher`] and [`PortalBrowser`] on top of the
//! `headless_chrome` DevTools driver.  The driver is blocking, so every call
//! runs on tokio's blocking pool and the flow awaits it; only one call is ever
//! in flight.
//!
//! | Capability       | DevTools usage                                            |
//! |------------------|-----------------------------------------------------------|
//! | `navigate`       | `Tab::navigate_to`                                        |
//! | `wait_idle`      | quiet period, `Tab::wait_until_navigated`, `readyState`   |
//! | `wait_visible`   | poll `find_element` + computed-style visibility check     |
//! | `fill`           | set `value`, dispatch `input`/`change` events             |
//! | `click_first`    | first `find_element` hit, `Element::click`                |
//! | `close`          | `Tab::close`, then drop the browser (kills the process)   |
//!
//! A [`ScriptedLauncher`](mock::ScriptedLauncher) is always compiled so tests
//! on any platform can drive the flow without Chrome installed.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use serde_json::Value;
use tracing::debug;

use crate::application::login_portal::{BrowserError, BrowserLauncher, LaunchSettings, PortalBrowser};

pub mod mock;

/// Default timeout for every wait issued to the browser.
pub const AUTOMATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Quiet period before checking that a page finished loading.  Gives a
/// click-triggered navigation time to start.
const SETTLE_QUIET: Duration = Duration::from_millis(500);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Keeps the DevTools connection open across long waits and the debug pause.
const IDLE_BROWSER_TIMEOUT: Duration = Duration::from_secs(300);

const IS_VISIBLE_JS: &str = "function() {
    const style = window.getComputedStyle(this);
    const rect = this.getBoundingClientRect();
    return style.visibility !== 'hidden' && style.display !== 'none'
        && rect.width > 0 && rect.height > 0;
}";

const FILL_JS: &str = "function(value) {
    this.focus();
    this.value = value;
    this.dispatchEvent(new Event('input', { bubbles: true }));
    this.dispatchEvent(new Event('change', { bubbles: true }));
}";

fn automation(e: impl std::fmt::Display) -> BrowserError {
    BrowserError::Automation(e.to_string())
}

/// Launches Chrome/Chromium through `headless_chrome`.
#[derive(Debug, Default)]
pub struct ChromeLauncher;

impl ChromeLauncher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn launch(&self, settings: &LaunchSettings) -> Result<Box<dyn PortalBrowser>, BrowserError> {
        let settings = settings.clone();
        let (browser, tab) = tokio::task::spawn_blocking(move || start_browser(&settings))
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))??;
        Ok(Box::new(ChromeSession {
            browser: Some(browser),
            tab,
        }))
    }
}

fn start_browser(settings: &LaunchSettings) -> Result<(Browser, Arc<Tab>), BrowserError> {
    debug!(
        headless = settings.headless,
        executable = ?settings.executable,
        "starting browser"
    );
    let options = LaunchOptions {
        headless: settings.headless,
        path: settings.executable.clone(),
        idle_browser_timeout: IDLE_BROWSER_TIMEOUT,
        ..LaunchOptions::default()
    };
    let browser = Browser::new(options).map_err(|e| BrowserError::Launch(e.to_string()))?;
    let tab = browser
        .new_tab()
        .map_err(|e| BrowserError::Launch(e.to_string()))?;
    tab.set_default_timeout(AUTOMATION_TIMEOUT);
    Ok((browser, tab))
}

/// One Chrome tab driven by the login flow.
pub struct ChromeSession {
    browser: Option<Browser>,
    tab: Arc<Tab>,
}

/// Runs a blocking DevTools operation on the blocking pool.
async fn on_tab<T, F>(tab: &Arc<Tab>, op: F) -> Result<T, BrowserError>
where
    T: Send + 'static,
    F: FnOnce(&Tab) -> Result<T, BrowserError> + Send + 'static,
{
    let tab = Arc::clone(tab);
    tokio::task::spawn_blocking(move || op(&tab))
        .await
        .map_err(automation)?
}

fn is_visible(element: &Element<'_>) -> bool {
    element
        .call_js_fn(IS_VISIBLE_JS, Vec::new(), false)
        .ok()
        .and_then(|result| result.value)
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

fn document_complete(tab: &Tab) -> bool {
    tab.evaluate("document.readyState", false)
        .ok()
        .and_then(|result| result.value)
        .is_some_and(|state| state == Value::String("complete".to_string()))
}

/// Polls until `ready` holds or [`AUTOMATION_TIMEOUT`] elapses.
fn poll_until(mut ready: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + AUTOMATION_TIMEOUT;
    loop {
        if ready() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

#[async_trait]
impl PortalBrowser for ChromeSession {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        let url = url.to_string();
        on_tab(&self.tab, move |tab| {
            tab.navigate_to(&url)
                .map(|_| ())
                .map_err(|e| BrowserError::Navigation {
                    url: url.clone(),
                    reason: e.to_string(),
                })
        })
        .await
    }

    async fn wait_idle(&mut self) -> Result<(), BrowserError> {
        on_tab(&self.tab, |tab| {
            std::thread::sleep(SETTLE_QUIET);
            tab.wait_until_navigated().map_err(automation)?;
            if poll_until(|| document_complete(tab)) {
                Ok(())
            } else {
                Err(automation("page did not finish loading"))
            }
        })
        .await
    }

    async fn current_url(&mut self) -> Result<String, BrowserError> {
        on_tab(&self.tab, |tab| Ok(tab.get_url())).await
    }

    async fn wait_visible(&mut self, selector: &str) -> Result<(), BrowserError> {
        let selector = selector.to_string();
        on_tab(&self.tab, move |tab| {
            let visible = poll_until(|| {
                tab.find_element(&selector)
                    .map(|element| is_visible(&element))
                    .unwrap_or(false)
            });
            if visible {
                Ok(())
            } else {
                Err(BrowserError::NotVisible {
                    selector,
                    reason: format!("timed out after {}s", AUTOMATION_TIMEOUT.as_secs()),
                })
            }
        })
        .await
    }

    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), BrowserError> {
        let selector = selector.to_string();
        let value = value.to_string();
        on_tab(&self.tab, move |tab| {
            let element = tab.find_element(&selector).map_err(automation)?;
            element
                .call_js_fn(FILL_JS, vec![Value::String(value)], false)
                .map_err(automation)?;
            Ok(())
        })
        .await
    }

    async fn click_first(&mut self, candidates: &[&str]) -> Result<Option<String>, BrowserError> {
        let candidates: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
        on_tab(&self.tab, move |tab| {
            for selector in candidates {
                let Ok(element) = tab.find_element(&selector) else {
                    debug!("submit candidate `{selector}` not present");
                    continue;
                };
                element.click().map_err(automation)?;
                return Ok(Some(selector));
            }
            Ok(None)
        })
        .await
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        let Some(browser) = self.browser.take() else {
            return Ok(());
        };
        let tab = Arc::clone(&self.tab);
        tokio::task::spawn_blocking(move || {
            let closed = tab.close(true).map(|_| ()).map_err(automation);
            drop(browser);
            closed
        })
        .await
        .map_err(automation)?
    }
}
