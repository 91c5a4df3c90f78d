//! Workspace inspection commands: `list`, `validate` and `audit`.
//!
//! Each command has a pure `*_output` function that builds the rendered text
//! from a loaded workspace, and an `execute_*` wrapper that loads the
//! workspace, prints the text and maps findings to an error exit.

use clap::Args;
use colored::Colorize;
use fragment_composer::{
    version_policy, ActivationProperties, BasicWorkspaceValidator, UnstableCoordinate,
    ValidationResult, Workspace, WorkspaceValidator,
};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::commands::WorkspaceArgs;
use crate::errors::Error;
use crate::output::to_json;

#[cfg(test)]
#[path = "inspect_cmd_tests.rs"]
mod tests;

/// Arguments for the list command
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Output format (json or pretty).
    #[arg(long, default_value = "pretty")]
    pub format: String,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,
}

/// Arguments for the validate command
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Output format (json or pretty).
    #[arg(long, default_value = "pretty")]
    pub format: String,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,
}

/// Arguments for the audit command
#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// Module whose dependencies are audited.
    pub module: String,

    /// Activation property enabling conditional fragments (repeatable).
    #[arg(short = 'P', long = "property", value_name = "PROPERTY")]
    pub properties: Vec<String>,

    /// Output format (json or pretty).
    #[arg(long, default_value = "pretty")]
    pub format: String,

    #[command(flatten)]
    pub workspace: WorkspaceArgs,
}

/// Summary of a workspace's fragments and modules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceListing {
    pub workspace: String,
    pub fragments: Vec<FragmentSummary>,
    pub modules: Vec<ModuleSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentSummary {
    pub name: String,
    pub description: Option<String>,
    pub plugins: usize,
    pub scalars: usize,
    pub lists: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSummary {
    pub name: String,
    pub fragments: Vec<String>,
    pub conditional: Vec<ConditionalSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalSummary {
    pub property: String,
    pub fragments: Vec<String>,
}

/// Result of auditing one module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub module: String,
    pub unstable: Vec<UnstableCoordinate>,
}

/// Builds the listing of a workspace.
pub fn workspace_listing(workspace: &Workspace) -> WorkspaceListing {
    let fragments = workspace
        .registry()
        .iter()
        .map(|fragment| FragmentSummary {
            name: fragment.name().to_string(),
            description: fragment.description().map(str::to_string),
            plugins: fragment.plugin_refs().len(),
            scalars: fragment.scalar_options().len(),
            lists: fragment.list_options().len(),
        })
        .collect();

    let modules = workspace
        .modules()
        .iter()
        .map(|module| ModuleSummary {
            name: module.name.clone(),
            fragments: module.fragments.clone(),
            conditional: module
                .conditional
                .iter()
                .map(|group| ConditionalSummary {
                    property: group.property.clone(),
                    fragments: group.fragments.clone(),
                })
                .collect(),
        })
        .collect();

    WorkspaceListing {
        workspace: workspace.name().to_string(),
        fragments,
        modules,
    }
}

/// Renders the workspace listing.
pub fn list_output(workspace: &Workspace, format: &str) -> Result<String, Error> {
    let listing = workspace_listing(workspace);
    match format {
        "json" => to_json(&listing),
        "pretty" => Ok(format_listing_pretty(&listing)),
        _ => Err(invalid_format(format)),
    }
}

/// Validates the workspace and renders the report.
///
/// Returns the rendered report together with the raw result so the caller
/// can decide on the exit status.
pub fn validate_output(
    workspace: &Workspace,
    format: &str,
) -> Result<(String, ValidationResult), Error> {
    let result = BasicWorkspaceValidator::new().validate_workspace(workspace);
    debug!(
        message = "Workspace validated",
        errors = result.errors.len(),
        warnings = result.warnings.len()
    );

    let output = match format {
        "json" => to_json(&result)?,
        "pretty" => format_validation_pretty(workspace.name(), &result),
        _ => return Err(invalid_format(format)),
    };

    Ok((output, result))
}

/// Composes a module and reports its pre-release dependency versions.
pub fn audit_output(
    workspace: &Workspace,
    module: &str,
    properties: &ActivationProperties,
    format: &str,
) -> Result<(String, AuditReport), Error> {
    let project = workspace.compose_module(module, properties)?;
    let report = AuditReport {
        module: module.to_string(),
        unstable: version_policy::find_unstable_coordinates(&project),
    };

    let output = match format {
        "json" => to_json(&report)?,
        "pretty" => format_audit_pretty(&report),
        _ => return Err(invalid_format(format)),
    };

    Ok((output, report))
}

/// Execute the list command
#[instrument]
pub fn execute_list(args: &ListArgs) -> Result<(), Error> {
    let config = args.workspace.load_config()?;
    let workspace = args.workspace.load_workspace(&config)?;

    println!("{}", list_output(&workspace, &args.format)?);
    Ok(())
}

/// Execute the validate command
///
/// Fails with `Error::ValidationFailed` after printing the report when the
/// workspace has errors. Warnings alone do not fail.
#[instrument]
pub fn execute_validate(args: &ValidateArgs) -> Result<(), Error> {
    let config = args.workspace.load_config()?;
    let workspace = args.workspace.load_workspace(&config)?;

    let (output, result) = validate_output(&workspace, &args.format)?;
    println!("{}", output);

    if !result.is_valid() {
        return Err(Error::ValidationFailed {
            error_count: result.errors.len(),
        });
    }

    info!(message = "Workspace is valid", workspace = workspace.name());
    Ok(())
}

/// Execute the audit command
///
/// Fails with `Error::UnstableDependencies` after printing the report when
/// any pre-release version is found.
#[instrument]
pub fn execute_audit(args: &AuditArgs) -> Result<(), Error> {
    let config = args.workspace.load_config()?;
    let workspace = args.workspace.load_workspace(&config)?;
    let properties = config.activation_properties(&args.properties);

    let (output, report) = audit_output(&workspace, &args.module, &properties, &args.format)?;
    println!("{}", output);

    if !report.unstable.is_empty() {
        return Err(Error::UnstableDependencies {
            count: report.unstable.len(),
        });
    }

    Ok(())
}

fn invalid_format(format: &str) -> Error {
    Error::InvalidArguments(format!(
        "Invalid format: '{}'. Use 'json' or 'pretty'.",
        format
    ))
}

fn format_listing_pretty(listing: &WorkspaceListing) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", listing.workspace.bold().bright_cyan()));

    output.push_str(&format!(
        "\n{} ({}):\n",
        "Fragments".bold(),
        listing.fragments.len()
    ));
    if listing.fragments.is_empty() {
        output.push_str(&format!("  {}\n", "(none defined)".dimmed()));
    }
    for fragment in &listing.fragments {
        output.push_str(&format!("  {} {}\n", "•".blue(), fragment.name.bold()));
        if let Some(ref description) = fragment.description {
            output.push_str(&format!("    {}\n", description));
        }
        output.push_str(&format!(
            "    {}\n",
            format!(
                "{} plugin(s), {} scalar(s), {} list(s)",
                fragment.plugins, fragment.scalars, fragment.lists
            )
            .dimmed()
        ));
    }

    output.push_str(&format!(
        "\n{} ({}):\n",
        "Modules".bold(),
        listing.modules.len()
    ));
    if listing.modules.is_empty() {
        output.push_str(&format!("  {}\n", "(none defined)".dimmed()));
    }
    for module in &listing.modules {
        output.push_str(&format!(
            "  {} {}: {}\n",
            "•".blue(),
            module.name.bold(),
            module.fragments.join(", ")
        ));
        for group in &module.conditional {
            output.push_str(&format!(
                "    {} {}: {}\n",
                "when".dimmed(),
                format!("-P{}", group.property).yellow(),
                group.fragments.join(", ")
            ));
        }
    }

    output
}

fn format_validation_pretty(workspace: &str, result: &ValidationResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} {}\n\n",
        "Validating workspace:".bold(),
        workspace.bright_cyan()
    ));

    if result.is_valid() {
        output.push_str(&format!("{}\n\n", "✓ Workspace is VALID".green().bold()));
    } else {
        output.push_str(&format!(
            "{}\n\n",
            "✗ Workspace validation FAILED".red().bold()
        ));
    }

    if !result.errors.is_empty() {
        output.push_str(&format!("{}:\n", "Errors".red().bold()));
        for error in &result.errors {
            output.push_str(&format!(
                "  {} {}: {}\n",
                "✗".red(),
                error.field_path.dimmed(),
                error.message
            ));
            if let Some(ref suggestion) = error.suggestion {
                output.push_str(&format!("    {}\n", suggestion.dimmed()));
            }
        }
        output.push('\n');
    }

    if !result.warnings.is_empty() {
        output.push_str(&format!(
            "{} ({}):\n",
            "Warnings".yellow().bold(),
            result.warnings.len()
        ));
        for warning in &result.warnings {
            output.push_str(&format!(
                "  {} {}: {}\n",
                "⚠".yellow(),
                warning.field_path.dimmed(),
                warning.message
            ));
            if let Some(ref recommendation) = warning.recommendation {
                output.push_str(&format!("    {}\n", recommendation.dimmed()));
            }
        }
        output.push('\n');
    }

    output
}

fn format_audit_pretty(report: &AuditReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{} {}\n\n",
        "Auditing module:".bold(),
        report.module.bright_cyan()
    ));

    if report.unstable.is_empty() {
        output.push_str(&format!(
            "{}\n",
            "✓ All dependency versions are stable".green().bold()
        ));
        return output;
    }

    output.push_str(&format!(
        "{} ({}):\n",
        "Unstable versions".red().bold(),
        report.unstable.len()
    ));
    for finding in &report.unstable {
        output.push_str(&format!(
            "  {} {} {}\n",
            "✗".red(),
            finding.coordinate.to_string().bold(),
            format!("(lists.{})", finding.list_key).dimmed()
        ));
    }

    output
}
