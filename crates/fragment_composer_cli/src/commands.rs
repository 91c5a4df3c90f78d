//! Command modules for the fragment-composer CLI.
//!
//! - `compose_cmd`: composes one module or every module of a workspace
//! - `inspect_cmd`: lists, validates and audits a workspace
//! - `config_cmd`: manages the `composer.toml` configuration file

use clap::Args;
use fragment_composer::Workspace;
use tracing::info;

use crate::config::{get_config_path, AppConfig};
use crate::errors::Error;

pub mod compose_cmd;
pub mod config_cmd;
pub mod inspect_cmd;

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

/// Options shared by every command that reads a workspace.
#[derive(Args, Debug, Clone, Default)]
pub struct WorkspaceArgs {
    /// Path to the CLI configuration file (defaults to ./composer.toml).
    #[arg(long)]
    pub config: Option<String>,

    /// Path to the workspace manifest, overriding the configured one.
    #[arg(long)]
    pub manifest: Option<String>,
}

impl WorkspaceArgs {
    /// Loads and checks `composer.toml`, falling back to defaults when the
    /// file does not exist.
    pub fn load_config(&self) -> Result<AppConfig, Error> {
        let config_path = get_config_path(self.config.as_deref());
        let config = AppConfig::load_or_default(&config_path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the workspace named by `--manifest` or by the configuration.
    pub fn load_workspace(&self, config: &AppConfig) -> Result<Workspace, Error> {
        let manifest_path = config.manifest_path(self.manifest.as_deref());
        info!(message = "Loading workspace", manifest = ?manifest_path);

        Ok(Workspace::load(&manifest_path)?)
    }
}
