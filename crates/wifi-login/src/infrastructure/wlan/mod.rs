//! `netsh wlan` adapter for [`WirelessNetwork`].
//!
//! - `netsh wlan show interfaces` reports the associated SSID.
//! - `netsh wlan connect name=<profile>` joins a network through a profile
//!   that Windows has already stored; no profile is ever created here.
//!
//! Both commands are single-shot.  `connect` returns as soon as Windows
//! accepts the request and does not wait for association to finish.
//!
//! Only Windows ships `netsh wlan`.  Elsewhere the commands fail to spawn,
//! which is logged and reported as "no network" / "connect failed".

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};
use wifi_login_core::parse_current_ssid;

use crate::application::reconnect::WirelessNetwork;

/// [`WirelessNetwork`] backed by `netsh wlan`.
#[derive(Debug, Clone)]
pub struct NetshWlan {
    program: String,
}

impl NetshWlan {
    pub fn new() -> Self {
        Self::with_program("netsh")
    }

    /// Uses `program` instead of `netsh`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs the command and returns its stdout when it exits successfully.
    async fn run(&self, args: &[&str]) -> Result<String, String> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| format!("failed to run {} {}: {e}", self.program, args.join(" ")))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            Ok(stdout)
        } else {
            Err(format!(
                "{} {} exited with {}: {}",
                self.program,
                args.join(" "),
                output.status,
                stdout.trim()
            ))
        }
    }
}

impl Default for NetshWlan {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the `netsh wlan connect` arguments for a stored profile.
fn connect_args(ssid: &str) -> [String; 3] {
    ["wlan".to_string(), "connect".to_string(), format!("name={ssid}")]
}

#[async_trait]
impl WirelessNetwork for NetshWlan {
    async fn current_network(&self) -> Option<String> {
        info!("Checking current connection...");
        match self.run(&["wlan", "show", "interfaces"]).await {
            Ok(output) => {
                debug!("netsh output: {}", output.trim());
                let ssid = parse_current_ssid(&output);
                match &ssid {
                    Some(name) => info!("Current connection: {name}"),
                    None => info!("No active connection."),
                }
                ssid
            }
            Err(e) => {
                warn!("Error checking connection: {e}");
                None
            }
        }
    }

    async fn connect(&self, ssid: &str) -> bool {
        info!("Attempting to connect to Wi-Fi network: {ssid}...");
        let args = connect_args(ssid);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match self.run(&args).await {
            Ok(_) => {
                info!("Successfully connected to Wi-Fi network: {ssid}");
                true
            }
            Err(e) => {
                warn!("Error connecting: {e}");
                false
            }
        }
    }
}
