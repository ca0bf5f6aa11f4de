//! Logging setup.
//!
//! The crate logs through the `log` facade only. Applications that have no
//! logger of their own can call [`init_logging`] to get an `env_logger`.

mod init;

pub use init::{init_logging, LoggingConfig, LOG_ENV_VAR};
