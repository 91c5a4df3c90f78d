//! Configuration management for the fragment-composer CLI.
//!
//! The CLI reads an optional `composer.toml` from the current directory (or
//! from the path given with `--config`). It names the workspace manifest,
//! the default output format and the activation properties applied to every
//! composition. Command-line flags take precedence over these values.

use std::{
    fs,
    path::{Path, PathBuf},
};

use fragment_composer::{ActivationProperties, DEFAULT_MANIFEST_FILENAME};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "composer.toml";

/// Default output format for composed projects
pub const DEFAULT_OUTPUT_FORMAT: &str = "toml";

/// Output formats understood by the `--format` flag and `output.format`.
pub const SUPPORTED_FORMATS: &[&str] = &["toml", "json", "pretty"];

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the fragment-composer CLI.
///
/// # Example TOML Configuration
///
/// ```toml
/// manifest = "workspace.toml"
///
/// [output]
/// format = "toml"
///
/// [activation]
/// properties = ["native"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace manifest, relative to the working directory.
    #[serde(default = "AppConfig::default_manifest")]
    pub manifest: String,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub activation: ActivationConfig,
}

impl AppConfig {
    fn default_manifest() -> String {
        DEFAULT_MANIFEST_FILENAME.to_string()
    }

    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or
    /// does not match the configuration schema.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads the configuration if the file exists, otherwise returns the defaults.
    ///
    /// A file that exists but is malformed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, Error> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(
                message = "No configuration file, using defaults",
                path = ?path
            );
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the specified path.
    ///
    /// Parent directories are created if they don't exist and an existing
    /// file is overwritten.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
            }
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Checks values that the TOML schema alone cannot express.
    pub fn validate(&self) -> Result<(), Error> {
        if self.manifest.trim().is_empty() {
            return Err(Error::Config("'manifest' must not be empty".to_string()));
        }

        validate_format(&self.output.format).map_err(|_| {
            Error::Config(format!(
                "Unsupported output format '{}', expected one of: {}",
                self.output.format,
                SUPPORTED_FORMATS.join(", ")
            ))
        })?;

        if let Some(blank) = self.activation.properties.iter().find(|p| p.trim().is_empty()) {
            return Err(Error::Config(format!(
                "Activation property names must not be blank, found {:?}",
                blank
            )));
        }

        Ok(())
    }

    /// The configured activation properties plus the ones given on the
    /// command line.
    pub fn activation_properties(&self, extra: &[String]) -> ActivationProperties {
        self.activation
            .properties
            .iter()
            .chain(extra.iter())
            .cloned()
            .collect()
    }

    /// The manifest path, with a command-line override taking precedence.
    pub fn manifest_path(&self, manifest_override: Option<&str>) -> PathBuf {
        PathBuf::from(manifest_override.unwrap_or(&self.manifest))
    }

    /// The output format, with a command-line override taking precedence.
    pub fn output_format<'a>(&'a self, format_override: Option<&'a str>) -> &'a str {
        format_override.unwrap_or(&self.output.format)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            manifest: Self::default_manifest(),
            output: OutputConfig::default(),
            activation: ActivationConfig::default(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// One of `toml`, `json` or `pretty`.
    #[serde(default = "OutputConfig::default_format")]
    pub format: String,
}

impl OutputConfig {
    fn default_format() -> String {
        DEFAULT_OUTPUT_FORMAT.to_string()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputConfig::default_format(),
        }
    }
}

/// Activation properties applied to every composition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivationConfig {
    #[serde(default)]
    pub properties: Vec<String>,
}

/// Checks that `format` is one of the supported output formats.
pub fn validate_format(format: &str) -> Result<(), Error> {
    if SUPPORTED_FORMATS.contains(&format) {
        Ok(())
    } else {
        Err(Error::InvalidArguments(format!(
            "Unsupported format '{}'. Use one of: {}",
            format,
            SUPPORTED_FORMATS.join(", ")
        )))
    }
}

/// Resolves the path to the configuration file.
///
/// Uses `config_path` when given, otherwise `composer.toml` in the current
/// directory.
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
