//! wifi-login library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does wifi-login do?
//!
//! 1. Pings a public address.  If it answers, the run ends.
//! 2. Asks `netsh` which Wi-Fi network the host is associated with, and joins
//!    the configured one if it is not the current one.
//! 3. Opens the captive-portal login page in Chrome, fills the username and
//!    password fields, submits the form, and checks whether the browser was
//!    redirected to the status page or the internet became reachable.

/// Application layer: the login flow and the reconnect orchestrator.
pub mod application;

/// Infrastructure layer: config file, ping, netsh, and Chrome adapters.
pub mod infrastructure;
