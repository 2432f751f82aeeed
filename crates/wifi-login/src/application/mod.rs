//! Application layer use cases.
//!
//! Use cases in this layer orchestrate domain types to fulfil a goal and
//! depend on traits rather than concrete adapters, so every branch can be
//! tested without a Wi-Fi card, a network, or a browser.
//!
//! # Sub-modules
//!
//! - **`login_portal`** – The captive-portal state machine: navigate, detect
//!   an existing session, fill the credentials, submit, evaluate the result.
//!
//! - **`reconnect`** – The top-level sequence: connectivity check, network
//!   association, then the login flow.

pub mod login_portal;
pub mod reconnect;
