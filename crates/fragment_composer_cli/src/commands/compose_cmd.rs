//! The `compose` command.
//!
//! Composes one module (or every module with `--all`) and writes the
//! effective configuration to stdout.

use clap::Args;
use fragment_composer::Workspace;
use tracing::{debug, info, instrument};

use crate::commands::WorkspaceArgs;
use crate::config::{validate_format, AppConfig};
use crate::errors::Error;
use crate::output::{format_project, format_projects};

#[cfg(test)]
#[path = "compose_cmd_tests.rs"]
mod tests;

/// Arguments for the compose command
#[derive(Args, Debug, Clone, Default)]
pub struct ComposeArgs {
    /// Module to compose.
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub module: Option<String>,

    /// Compose every module of the workspace, in manifest order.
    #[arg(long)]
    pub all: bool,

    /// Activation property enabling conditional fragments (repeatable).
    #[arg(short = 'P', long = "property", value_name = "PROPERTY")]
    pub properties: Vec<String>,

    /// Output format (toml, json or pretty). Defaults to the configured format.
    #[arg(long)]
    pub format: Option<String>,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,
}

/// Execute the compose command
#[instrument]
pub fn execute(args: &ComposeArgs) -> Result<(), Error> {
    let config = args.workspace.load_config()?;
    let workspace = args.workspace.load_workspace(&config)?;

    let output = compose_output(&workspace, &config, args)?;
    println!("{}", output);

    Ok(())
}

/// Composes the requested module(s) and renders them in the chosen format.
pub fn compose_output(
    workspace: &Workspace,
    config: &AppConfig,
    args: &ComposeArgs,
) -> Result<String, Error> {
    let format = config.output_format(args.format.as_deref());
    validate_format(format)?;

    let properties = config.activation_properties(&args.properties);
    debug!(
        message = "Composing",
        workspace = workspace.name(),
        module = ?args.module,
        all = args.all,
        properties = ?properties,
        format = format
    );

    match (&args.module, args.all) {
        (Some(_), true) => Err(Error::InvalidArguments(
            "a module name cannot be combined with --all".to_string(),
        )),
        (None, false) => Err(Error::InvalidArguments(
            "a module name or --all is required".to_string(),
        )),
        (None, true) => {
            let projects = workspace.compose_all(&properties)?;
            info!(message = "Composed workspace", modules = projects.len());
            format_projects(&projects, format)
        }
        (Some(module), false) => {
            let project = workspace.compose_module(module, &properties)?;
            info!(
                message = "Composed module",
                module = module.as_str(),
                fragments = project.applied_fragments().len()
            );
            format_project(&project, format)
        }
    }
}
