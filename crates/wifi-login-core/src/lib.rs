//! # wifi-login-core
//!
//! Shared library for wifi-login containing the configuration record, the
//! outcome types reported by the login flow, the DOM selectors used to find
//! the portal form, and the text parsers for OS command output.
//!
//! This crate has zero dependencies on OS APIs, browsers, or processes.
//!
//! # Architecture overview
//!
//! wifi-login reconnects a Windows host to a known Wi-Fi network and signs in
//! to the network's captive portal when the internet is unreachable.  This
//! crate is the pure foundation:
//!
//! - **`domain`** – The persisted [`PortalConfig`] record with its validation
//!   rules, and the outcome enums ([`LoginOutcome`], [`SubmitOutcome`],
//!   [`RunOutcome`]) produced by the use cases.
//!
//! - **`parse`** – Line-oriented parsers for `netsh wlan show interfaces` and
//!   `ping` output.  Kept free of process invocation so they can be tested
//!   against captured text.
//!
//! - **`selectors`** – The CSS selectors that locate the credential fields and
//!   the submit control on a portal page.

pub mod domain;
pub mod parse;
pub mod selectors;

pub use domain::config::{PortalConfig, ValidationError, DEFAULT_CONFIG_FILE};
pub use domain::outcome::{LoginOutcome, RunOutcome, SubmitOutcome};
pub use parse::{find_marked_value, parse_current_ssid, ping_reply_received};
