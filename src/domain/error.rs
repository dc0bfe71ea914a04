//! Error types for the zest plugin.
//!
//! This module defines the centralized error type [`ZestError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for zest plugin operations.
///
/// This enum consolidates all error conditions that can occur during plugin
/// execution, from catalog loading to I/O failures and configuration issues.
/// Most variants wrap underlying errors from external crates using `#[from]`
/// for automatic conversion.
#[derive(Debug, Error)]
pub enum ZestError {
    /// Catalog operation failed.
    ///
    /// Occurs when the recipe catalog cannot be loaded or queried. The string
    /// contains a description of what went wrong.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    ///
    /// Occurs when the plugin cannot parse or apply the configured theme.
    /// The string contains a description of what went wrong.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    ///
    /// Occurs when the plugin cannot communicate with its background worker
    /// thread, typically during catalog loading. The string contains details
    /// about the communication failure.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for zest operations.
///
/// This is a type alias for `std::result::Result<T, ZestError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, ZestError>;
