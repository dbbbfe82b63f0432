//! Error types for the certvalet library.
//!
//! This module defines all error types used throughout the library.
//! All errors implement `std::error::Error` and are designed to provide
//! clear, actionable error messages.

use thiserror::Error;

/// The main error type for certvalet operations.
///
/// This enum covers all possible errors that can occur during CA bootstrap,
/// certificate issuance, template rendering, and storage operations.
#[derive(Error, Debug)]
pub enum CertValetError {
    /// The crypto backend process failed or could not be invoked.
    ///
    /// Carries the rendered command line, the exit status (or `"not started"`
    /// when the process could not be spawned), and the captured stderr.
    #[error("Backend error: `{command}` ({status}): {stderr}")]
    BackendError {
        /// The command line that was attempted
        command: String,
        /// Exit status, or "not started" if the process could not be spawned
        status: String,
        /// Trimmed stderr output
        stderr: String,
    },

    /// Storage I/O error
    #[error("Storage I/O error: {0}")]
    StorageError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The requested domain string is not usable as an artifact key
    #[error("Invalid domain: {0}")]
    InvalidDomainError(String),

    /// Extension template missing or malformed
    #[error("Template error: {0}")]
    TemplateError(String),

    /// Configuration file problem
    #[error("Config error: {0}")]
    ConfigError(String),
}

/// A specialized Result type for certvalet operations.
pub type Result<T> = std::result::Result<T, CertValetError>;
