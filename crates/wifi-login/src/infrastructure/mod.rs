//! Infrastructure layer.
//!
//! Contains OS-facing adapters: the configuration file and console prompts,
//! the `ping` reachability probe, `netsh` Wi-Fi commands, and the headless
//! Chrome session.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `wifi_login_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.
//!
//! # Sub-modules
//!
//! - **`storage`** – Loads `wifi_config.json`, or creates it by prompting
//!   through an injectable [`storage::prompt::Prompt`].
//!
//! - **`connectivity`** – [`connectivity::PingProbe`], one ICMP echo via the
//!   system `ping` command.
//!
//! - **`wlan`** – [`wlan::NetshWlan`], the `netsh wlan` adapter.
//!
//! - **`browser`** – [`browser::ChromeLauncher`] built on `headless_chrome`,
//!   plus a scripted double in `browser::mock` for tests.
//!
//! - **`console`** – The end-of-run pause used in debug mode.

pub mod browser;
pub mod connectivity;
pub mod console;
pub mod storage;
pub mod wlan;
