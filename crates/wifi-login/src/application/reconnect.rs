//! ReconnectUseCase: the top-level sequence of a run.
//!
//! ```text
//! internet reachable? ── yes ──► AlreadyOnline
//!        │ no
//!        ▼
//! current SSID == target? ── yes ─────────────────► login flow
//!        │ no                                          ▲
//!        ▼                                             │
//! netsh connect target ── ok ──────────────────────────┘
//!        │ failed
//!        ▼
//! ConnectFailed
//! ```
//!
//! Every collaborator is a trait object injected at construction time.  The
//! production adapters live in `infrastructure`; tests use `mockall` doubles.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use wifi_login_core::{LoginOutcome, PortalConfig, RunOutcome};

use super::login_portal::LoginError;

/// Single-shot internet reachability check.
///
/// Implementations swallow every probe error and report it as `false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Returns `true` if the probe target answered.
    async fn is_internet_available(&self) -> bool;
}

/// OS wireless association commands.
///
/// Failures are logged by the implementation and surfaced as `None` /
/// `false`; they never abort a run.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WirelessNetwork: Send + Sync {
    /// Name of the network the wireless interface is associated with.
    async fn current_network(&self) -> Option<String>;

    /// Joins `ssid` using its stored OS profile.  Returns `true` if the OS
    /// accepted the request; association may still be in progress.
    async fn connect(&self, ssid: &str) -> bool;
}

/// The captive-portal login step, as seen by the orchestrator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortalLogin: Send + Sync {
    /// Signs in to the portal described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError`] when the flow cannot run to completion (browser
    /// launch failure, credential field never appears, ...).
    async fn login(&self, config: &PortalConfig) -> Result<LoginOutcome, LoginError>;
}

/// Sequences the connectivity check, network association, and portal login.
pub struct ReconnectUseCase {
    probe: Arc<dyn ConnectivityProbe>,
    wlan: Arc<dyn WirelessNetwork>,
    portal: Arc<dyn PortalLogin>,
}

impl ReconnectUseCase {
    pub fn new(
        probe: Arc<dyn ConnectivityProbe>,
        wlan: Arc<dyn WirelessNetwork>,
        portal: Arc<dyn PortalLogin>,
    ) -> Self {
        Self {
            probe,
            wlan,
            portal,
        }
    }

    /// Runs one reconnect attempt.
    ///
    /// # Errors
    ///
    /// Propagates [`LoginError`] from the login flow.  Connectivity and
    /// association failures are not errors; they select a [`RunOutcome`].
    pub async fn run(&self, config: &PortalConfig) -> Result<RunOutcome, LoginError> {
        if self.probe.is_internet_available().await {
            info!("Internet is available. Nothing to do.");
            return Ok(RunOutcome::AlreadyOnline);
        }

        let target = config.target_ssid.as_str();
        let current = self.wlan.current_network().await;

        if current.as_deref() == Some(target) {
            info!("You are already connected to the Wi-Fi network: {target}");
        } else {
            info!("You are not connected to the network {target}. Connecting to network {target}...");
            if !self.wlan.connect(target).await {
                return Ok(RunOutcome::ConnectFailed {
                    ssid: target.to_string(),
                });
            }
        }

        let outcome = self.portal.login(config).await?;
        Ok(RunOutcome::Login(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::login_portal::BrowserError;
    use wifi_login_core::SubmitOutcome;

    fn config() -> PortalConfig {
        PortalConfig {
            target_ssid: "Example_WIFI".to_string(),
            login_page_url: "http://10.0.0.1/login".to_string(),
            username: "login".to_string(),
            password: "password".to_string(),
            status_url: Some("http://10.0.0.1/status".to_string()),
            debug_mode: false,
            browser_path: None,
        }
    }

    fn probe_returning(available: bool) -> MockConnectivityProbe {
        let mut probe = MockConnectivityProbe::new();
        probe
            .expect_is_internet_available()
            .times(1)
            .return_const(available);
        probe
    }

    fn use_case(
        probe: MockConnectivityProbe,
        wlan: MockWirelessNetwork,
        portal: MockPortalLogin,
    ) -> ReconnectUseCase {
        ReconnectUseCase::new(Arc::new(probe), Arc::new(wlan), Arc::new(portal))
    }

    #[tokio::test]
    async fn test_online_at_start_touches_neither_wlan_nor_portal() {
        // Arrange: no expectations on wlan/portal, so any call panics
        let uc = use_case(
            probe_returning(true),
            MockWirelessNetwork::new(),
            MockPortalLogin::new(),
        );

        // Act
        let outcome = uc.run(&config()).await.expect("run");

        // Assert
        assert_eq!(outcome, RunOutcome::AlreadyOnline);
    }

    #[tokio::test]
    async fn test_already_on_target_network_logs_in_without_connecting() {
        // Arrange
        let mut wlan = MockWirelessNetwork::new();
        wlan.expect_current_network()
            .times(1)
            .returning(|| Some("Example_WIFI".to_string()));
        wlan.expect_connect().never();

        let mut portal = MockPortalLogin::new();
        portal
            .expect_login()
            .times(1)
            .returning(|_| Ok(LoginOutcome::AlreadyAuthenticated));

        let uc = use_case(probe_returning(false), wlan, portal);

        // Act
        let outcome = uc.run(&config()).await.expect("run");

        // Assert
        assert_eq!(outcome, RunOutcome::Login(LoginOutcome::AlreadyAuthenticated));
    }

    #[tokio::test]
    async fn test_other_network_connects_to_target_then_logs_in() {
        // Arrange
        let mut wlan = MockWirelessNetwork::new();
        wlan.expect_current_network()
            .times(1)
            .returning(|| Some("Neighbour".to_string()));
        wlan.expect_connect()
            .withf(|ssid| ssid == "Example_WIFI")
            .times(1)
            .return_const(true);

        let mut portal = MockPortalLogin::new();
        portal.expect_login().times(1).returning(|_| {
            Ok(LoginOutcome::InternetAvailable {
                submit: SubmitOutcome::Clicked {
                    selector: "input[type=\"submit\"]".to_string(),
                },
            })
        });

        let uc = use_case(probe_returning(false), wlan, portal);

        // Act
        let outcome = uc.run(&config()).await.expect("run");

        // Assert
        assert!(matches!(
            outcome,
            RunOutcome::Login(LoginOutcome::InternetAvailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_no_association_connects_to_target() {
        let mut wlan = MockWirelessNetwork::new();
        wlan.expect_current_network().times(1).returning(|| None);
        wlan.expect_connect()
            .withf(|ssid| ssid == "Example_WIFI")
            .times(1)
            .return_const(true);

        let mut portal = MockPortalLogin::new();
        portal
            .expect_login()
            .times(1)
            .returning(|_| Ok(LoginOutcome::NotRequired));

        let uc = use_case(probe_returning(false), wlan, portal);

        let outcome = uc.run(&config()).await.expect("run");

        assert_eq!(outcome, RunOutcome::Login(LoginOutcome::NotRequired));
    }

    #[tokio::test]
    async fn test_failed_connect_skips_login() {
        // Arrange
        let mut wlan = MockWirelessNetwork::new();
        wlan.expect_current_network()
            .times(1)
            .returning(|| Some("Neighbour".to_string()));
        wlan.expect_connect().times(1).return_const(false);

        let mut portal = MockPortalLogin::new();
        portal.expect_login().never();

        let uc = use_case(probe_returning(false), wlan, portal);

        // Act
        let outcome = uc.run(&config()).await.expect("run");

        // Assert
        assert_eq!(
            outcome,
            RunOutcome::ConnectFailed {
                ssid: "Example_WIFI".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_login_error_propagates() {
        let mut wlan = MockWirelessNetwork::new();
        wlan.expect_current_network()
            .returning(|| Some("Example_WIFI".to_string()));

        let mut portal = MockPortalLogin::new();
        portal.expect_login().times(1).returning(|_| {
            Err(LoginError::Browser(BrowserError::Launch(
                "chrome not found".to_string(),
            )))
        });

        let uc = use_case(probe_returning(false), wlan, portal);

        let result = uc.run(&config()).await;

        assert!(matches!(
            result,
            Err(LoginError::Browser(BrowserError::Launch(_)))
        ));
    }
}
