//! Logging utilities.
//!
//! Centralizes logger initialization. Library code only uses the `log` facade;
//! `env_logger` is installed once by the binary.

mod init;

pub use init::{DEFAULT_FILTER, LoggingConfig, init_logging};
