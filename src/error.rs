//! # Error Handling
//!
//! This module defines the error type shared by every provisioning step.
//! It uses `thiserror` to give each failure mode a descriptive message.
//!
//! Only fatal failures travel through [`Error`]. Steps whose failures are
//! recoverable (a missing manifest, an unreachable container engine) log
//! the problem and report it through their own outcome types instead, so
//! the caller decides explicitly what aborts the run.

use thiserror::Error;

/// Main error type for provisioning operations
#[derive(Error, Debug)]
pub enum Error {
    /// An external tool could not be started at all (not installed, not on
    /// `PATH`, permission denied).
    #[error("Failed to start '{program}': {message}")]
    Spawn { program: String, message: String },

    /// An external tool ran but exited unsuccessfully.
    ///
    /// `code` is `None` when the process was terminated by a signal.
    #[error("Command failed ({}): {command}{}", code.map(|c| format!("exit code {}", c)).unwrap_or_else(|| "terminated".to_string()), if stderr.is_empty() { String::new() } else { format!("\n  stderr: {}", stderr) })]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// A template could not be rendered.
    ///
    /// Carries the placeholder that caused the failure when there is one.
    #[error("Template processing error: {message}{}", variable.as_ref().map(|v| format!(" (variable: {})", v)).unwrap_or_default())]
    Template {
        message: String,
        variable: Option<String>,
    },

    /// The operating system did not return a usable hostname.
    #[error("Invalid hostname: {message}")]
    Hostname { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
