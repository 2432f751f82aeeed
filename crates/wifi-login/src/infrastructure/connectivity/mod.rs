//! Internet reachability probe.
//!
//! Sends one ICMP echo request through the system `ping` command rather than
//! a raw socket, which would need administrator rights on Windows.
//!
//! | OS      | Command                        |
//! |---------|--------------------------------|
//! | Windows | `ping -n 1 -w 1500 8.8.8.8`    |
//! | other   | `ping -c 1 -W 2 8.8.8.8`       |
//!
//! The probe answers `true` only when `ping` exits successfully *and* prints
//! an echo reply; see [`ping_reply_received`].

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};
use wifi_login_core::ping_reply_received;

use crate::application::reconnect::ConnectivityProbe;

/// Well-known public address that answers ICMP echo.
pub const DEFAULT_TARGET: &str = "8.8.8.8";

/// How long `ping` waits for the reply.
pub const REPLY_TIMEOUT: Duration = Duration::from_millis(1500);

/// Upper bound on the whole `ping` process, spawn included.
const PROCESS_TIMEOUT: Duration = Duration::from_secs(5);

/// [`ConnectivityProbe`] backed by the system `ping` command.
#[derive(Debug, Clone)]
pub struct PingProbe {
    target: String,
    reply_timeout: Duration,
}

impl PingProbe {
    pub fn new(target: impl Into<String>, reply_timeout: Duration) -> Self {
        Self {
            target: target.into(),
            reply_timeout,
        }
    }

    /// Builds the `ping` argument list for the current OS.
    fn args(&self) -> Vec<String> {
        if cfg!(windows) {
            vec![
                "-n".to_string(),
                "1".to_string(),
                "-w".to_string(),
                self.reply_timeout.as_millis().to_string(),
                self.target.clone(),
            ]
        } else {
            // `-W` takes whole seconds on Linux and macOS.
            let secs = self.reply_timeout.as_millis().div_ceil(1000).max(1);
            vec![
                "-c".to_string(),
                "1".to_string(),
                "-W".to_string(),
                secs.to_string(),
                self.target.clone(),
            ]
        }
    }

    async fn probe(&self) -> Result<bool, String> {
        let output = tokio::time::timeout(
            PROCESS_TIMEOUT,
            Command::new("ping").args(self.args()).kill_on_drop(true).output(),
        )
        .await
        .map_err(|_| format!("ping did not finish within {}s", PROCESS_TIMEOUT.as_secs()))?
        .map_err(|e| format!("failed to run ping: {e}"))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("ping output: {}", stdout.trim());
        Ok(output.status.success() && ping_reply_received(&stdout))
    }
}

impl Default for PingProbe {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET, REPLY_TIMEOUT)
    }
}

#[async_trait]
impl ConnectivityProbe for PingProbe {
    async fn is_internet_available(&self) -> bool {
        info!("Checking internet connection with ping...");
        match self.probe().await {
            Ok(true) => {
                info!("Internet is available.");
                true
            }
            Ok(false) => {
                info!("Internet is not available.");
                false
            }
            Err(e) => {
                warn!("An error occurred: {e}");
                false
            }
        }
    }
}
