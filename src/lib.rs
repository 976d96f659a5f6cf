//! Yui Bootstrap — keeps the Yui bot running.
//!
//! Downloads the bot jar when it is missing, launches it, and treats the
//! bot's exit code as an instruction: restart, update then restart, or stop.

pub mod config;
pub mod error;
pub mod fetch;
pub mod supervisor;
pub mod types;
