//! Wi-Fi reconnect and captive-portal login, entry point.
//!
//! One run, then exit:
//!
//! ```text
//! main()
//!  └─ ConfigStore::load_or_create()   -- asks for settings on first run
//!  └─ ReconnectUseCase::run()
//!       ├─ PingProbe        (online already? stop)
//!       ├─ NetshWlan        (join the target network if needed)
//!       └─ PortalLoginFlow  (ChromeLauncher fills and submits the portal form)
//! ```
//!
//! # Usage
//!
//! ```text
//! wifi-login [OPTIONS]
//!
//! Options:
//!   --config  <PATH>  Configuration file [default: wifi_config.json]
//!   --browser <PATH>  Chrome/Chromium executable to drive
//! ```
//!
//! | Variable             | Description                        |
//! |----------------------|------------------------------------|
//! | `WIFI_LOGIN_CONFIG`  | Same as `--config`                 |
//! | `WIFI_LOGIN_BROWSER` | Same as `--browser`                |
//! | `RUST_LOG`           | Log filter, `info` when unset      |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use wifi_login::application::login_portal::PortalLoginFlow;
use wifi_login::application::reconnect::ReconnectUseCase;
use wifi_login::infrastructure::browser::ChromeLauncher;
use wifi_login::infrastructure::connectivity::PingProbe;
use wifi_login::infrastructure::console::pause_on_console;
use wifi_login::infrastructure::storage::config::ConfigStore;
use wifi_login::infrastructure::storage::prompt::ConsolePrompt;
use wifi_login::infrastructure::wlan::NetshWlan;
use wifi_login_core::{PortalConfig, RunOutcome, DEFAULT_CONFIG_FILE};

/// Reconnects to a known Wi-Fi network and signs in to its captive portal.
#[derive(Debug, Parser)]
#[command(name = "wifi-login", version)]
struct Cli {
    /// Configuration file; created interactively when missing.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, env = "WIFI_LOGIN_CONFIG")]
    config: PathBuf,

    /// Browser executable.  Overrides `browser_path` from the config file.
    #[arg(long, env = "WIFI_LOGIN_BROWSER")]
    browser: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let store = ConfigStore::new(&cli.config);
    let mut config = store
        .load_or_create(&mut ConsolePrompt::stdio())
        .with_context(|| format!("failed to load configuration from {}", store.path().display()))?;
    if let Some(browser) = cli.browser {
        config.browser_path = Some(browser);
    }

    let result = run(&config).await;
    if let Err(e) = &result {
        error!("{e:#}");
    }

    if config.debug_mode {
        if let Err(e) = pause_on_console() {
            warn!("failed to wait for Enter: {e}");
        }
    }

    result.map(|_| ())
}

async fn run(config: &PortalConfig) -> anyhow::Result<RunOutcome> {
    let probe = Arc::new(PingProbe::default());
    let portal = PortalLoginFlow::new(Arc::new(ChromeLauncher::new()), probe.clone());
    let use_case = ReconnectUseCase::new(probe, Arc::new(NetshWlan::new()), Arc::new(portal));

    let outcome = use_case.run(config).await.context("portal login failed")?;
    if outcome.is_success() {
        info!("Finished: {outcome}");
    } else {
        warn!("Finished: {outcome}");
    }
    Ok(outcome)
}
