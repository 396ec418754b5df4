//! Error types for the pst CLI.
//!
//! Uses thiserror for derive macros. The instance lock itself never produces
//! these errors; it reports outcomes and the shell maps a failed acquisition
//! to [`ToolkitError::AlreadyRunning`].

use crate::exit_codes;
use thiserror::Error;

/// Main error type for pst operations.
#[derive(Error, Debug)]
pub enum ToolkitError {
    /// User provided invalid arguments or the session is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// Settings could not be read, parsed, imported or written.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Another live instance owns the instance lock.
    #[error("{0} is already running. Only one instance is allowed.")]
    AlreadyRunning(String),

    /// A filesystem operation failed (data directory, settings file, export).
    #[error("I/O failure: {0}")]
    IoError(String),
}

impl ToolkitError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolkitError::UserError(_) => exit_codes::USER_ERROR,
            ToolkitError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
            ToolkitError::AlreadyRunning(_) => exit_codes::ALREADY_RUNNING,
            ToolkitError::IoError(_) => exit_codes::IO_FAILURE,
        }
    }
}

/// Result type alias for pst operations.
pub type Result<T> = std::result::Result<T, ToolkitError>;
