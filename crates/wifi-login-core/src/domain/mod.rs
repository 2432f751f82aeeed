//! Domain entities for wifi-login.
//!
//! This module contains plain data types and the rules attached to them.  No
//! file access, no process spawning, no browser: everything here can be unit
//! tested on any platform without setup.

/// The persisted configuration record.
pub mod config;

/// Results reported by the login flow and the reconnect orchestrator.
pub mod outcome;
