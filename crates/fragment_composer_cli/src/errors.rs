use fragment_composer::CompositionError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the fragment-composer CLI application.
///
/// Library failures are wrapped unchanged; the remaining variants cover
/// CLI configuration, arguments and output.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or saving `composer.toml`.
    ///
    /// Returned for missing or unreadable files, invalid TOML, and unknown
    /// configuration keys.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Loading the workspace or composing a module failed.
    #[error(transparent)]
    Composition(#[from] CompositionError),

    /// A project or report could not be serialized for output.
    #[error("Failed to serialize output: {0}")]
    Serialization(String),

    /// Workspace validation reported errors.
    #[error("Workspace validation failed with {error_count} error(s)")]
    ValidationFailed { error_count: usize },

    /// The dependency audit found pre-release versions.
    #[error("Found {count} unstable dependency version(s)")]
    UnstableDependencies { count: usize },
}
