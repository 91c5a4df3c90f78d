use clap::Subcommand;
use tracing::{debug, error, info, instrument};

use crate::config::{get_config_path, validate_format, AppConfig};
use crate::errors::Error;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Subcommands for the config command
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Create initial configuration file
    Init {
        /// Path to save the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Check configuration syntax and values
    Validate {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Show current configuration
    Get {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,

        /// Configuration key to get (e.g., "output.format")
        key: Option<String>,
    },

    /// Update configuration values
    Set {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,

        /// Configuration key to set (e.g., "activation.properties")
        key: String,

        /// Value to set; lists are comma-separated
        value: String,
    },
}

/// Execute the config command
#[instrument]
pub fn execute(cmd: &ConfigCommands) -> Result<(), Error> {
    match cmd {
        ConfigCommands::Init { path } => init_config(path.as_deref()),
        ConfigCommands::Validate { path } => validate_config(path.as_deref()),
        ConfigCommands::Get { path, key } => get_config(path.as_deref(), key.as_deref()),
        ConfigCommands::Set { path, key, value } => set_config(path.as_deref(), key, value),
    }
}

/// Initialize a new configuration file
#[instrument]
fn init_config(path: Option<&str>) -> Result<(), Error> {
    let config_path = get_config_path(path);
    debug!(message = "Initializing configuration", path = ?config_path);

    if config_path.exists() {
        let err = Error::Config(format!(
            "Configuration file already exists at {:?}",
            config_path
        ));
        error!(
            message = "Configuration file already exists",
            path = ?config_path,
            error = ?err
        );
        return Err(err);
    }

    AppConfig::default().save(&config_path)?;

    info!(message = "Configuration initialized", path = ?config_path);
    println!("Configuration initialized at {:?}", config_path);
    Ok(())
}

/// Validate a configuration file
#[instrument]
fn validate_config(path: Option<&str>) -> Result<(), Error> {
    let config_path = get_config_path(path);
    debug!(message = "Validating configuration", path = ?config_path);

    let result = AppConfig::load(&config_path).and_then(|config| config.validate());
    match result {
        Ok(()) => {
            info!(message = "Configuration is valid", path = ?config_path);
            println!("Configuration is valid");
            Ok(())
        }
        Err(e) => {
            error!(
                message = "Configuration is invalid",
                path = ?config_path,
                error = ?e
            );
            Err(e)
        }
    }
}

/// Get a configuration value
#[instrument]
fn get_config(path: Option<&str>, key: Option<&str>) -> Result<(), Error> {
    let config_path = get_config_path(path);
    debug!(message = "Getting configuration", path = ?config_path, key = ?key);

    let config = AppConfig::load(&config_path)?;

    if let Some(key) = key {
        let value = get_config_value(&config, key)?;
        println!("{}: {}", key, value);
    } else {
        let config_str = toml::to_string_pretty(&config)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;
        println!("{}", config_str);
    }

    Ok(())
}

/// Set a configuration value
#[instrument]
fn set_config(path: Option<&str>, key: &str, value: &str) -> Result<(), Error> {
    let config_path = get_config_path(path);
    debug!(
        message = "Setting configuration",
        path = ?config_path,
        key = key,
        value = value
    );

    let mut config = AppConfig::load_or_default(&config_path)?;

    if let Err(e) = set_config_value(&mut config, key, value) {
        error!(message = "Failed to set configuration value", key = key, value = value, error = ?e);
        return Err(e);
    }

    config.save(&config_path)?;

    info!(message = "Configuration updated", key = key, value = value);
    println!("Configuration updated: {} = {}", key, value);
    Ok(())
}

fn invalid_key(key: &str) -> Error {
    Error::InvalidArguments(format!("Invalid configuration key: {}", key))
}

/// Get a value from the configuration by key path
fn get_config_value(config: &AppConfig, key: &str) -> Result<String, Error> {
    match key {
        "manifest" => Ok(config.manifest.clone()),
        "output.format" => Ok(config.output.format.clone()),
        "activation.properties" => Ok(config.activation.properties.join(",")),
        _ => Err(invalid_key(key)),
    }
}

/// Set a value in the configuration by key path
fn set_config_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), Error> {
    match key {
        "manifest" => {
            if value.trim().is_empty() {
                return Err(Error::InvalidArguments(
                    "'manifest' must not be empty".to_string(),
                ));
            }
            config.manifest = value.to_string();
        }
        "output.format" => {
            validate_format(value)?;
            config.output.format = value.to_string();
        }
        "activation.properties" => {
            config.activation.properties = value
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
        }
        _ => return Err(invalid_key(key)),
    }

    Ok(())
}
