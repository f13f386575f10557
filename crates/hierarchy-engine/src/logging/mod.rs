//! Logging utilities.
//!
//! Centralizes logger initialization. Code everywhere else talks to the
//! `log` facade only.

mod init;

pub use init::{init_logging, LoggingConfig};
