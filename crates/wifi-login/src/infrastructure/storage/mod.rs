//! Storage infrastructure: configuration file persistence.
//!
//! - `config` reads `wifi_config.json`, or creates it on first run by asking
//!   the user for each field.
//! - `prompt` is the input source those questions go through.  Production
//!   uses the console; tests feed canned answers from memory.

pub mod config;
pub mod prompt;
