//! Composition error types.
//!
//! Domain-specific errors for fragment registration, resolution, composition,
//! placeholder expansion and workspace manifest loading.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while building or composing a workspace.
///
/// Configuration errors are never transient, so none of these are retried.
/// Every operation that fails with one of these errors returns no partial
/// result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompositionError {
    /// A fragment with the same name was already registered.
    ///
    /// Raised while populating a registry; aborts workspace startup.
    #[error("Fragment '{name}' is already registered")]
    DuplicateName { name: String },

    /// A module referenced a fragment that was never registered.
    #[error("Unknown fragment: '{name}'")]
    UnknownFragment { name: String },

    /// A fragment is malformed (empty name, key or plugin id, or a non-finite number).
    #[error("Invalid fragment '{name}': {reason}")]
    InvalidFragment { name: String, reason: String },

    #[error("Unknown module: '{name}'")]
    UnknownModule { name: String },

    #[error("Module '{name}' is declared more than once")]
    DuplicateModule { name: String },

    #[error("Invalid module '{name}': {reason}")]
    InvalidModule { name: String, reason: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to access configuration file: {path} - {reason}")]
    FileAccessError { path: String, reason: String },

    #[error("Failed to parse configuration: {reason}")]
    ParseError { reason: String },

    /// A placeholder in a string value could not be expanded.
    #[error("Failed to expand placeholders in '{key}': {reason}")]
    InterpolationFailed { key: String, reason: String },
}

/// Result type alias for composition operations.
pub type CompositionResult<T> = Result<T, CompositionError>;
