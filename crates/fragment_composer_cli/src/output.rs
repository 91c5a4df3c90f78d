//! Rendering of composed projects for stdout.
//!
//! `toml` and `json` are stable, machine-readable formats. `pretty` is a
//! coloured summary meant for people and may change between releases.

use colored::Colorize;
use fragment_composer::{OptionValue, Project};
use serde::Serialize;

use crate::errors::Error;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

/// Several projects in one TOML document, as `[[projects]]` tables.
#[derive(Serialize)]
struct ProjectSet<'a> {
    projects: &'a [Project],
}

/// Formats a single composed project.
pub fn format_project(project: &Project, format: &str) -> Result<String, Error> {
    match format {
        "toml" => Ok(project.to_toml_string()?),
        "json" => Ok(project.to_json_string()?),
        "pretty" => Ok(format_project_pretty(project)),
        _ => Err(invalid_format(format)),
    }
}

/// Formats every composed project of a workspace.
///
/// TOML output is a single document with one `[[projects]]` table per
/// module and JSON output is an array, so both stay parseable as a whole.
pub fn format_projects(projects: &[Project], format: &str) -> Result<String, Error> {
    match format {
        "toml" => toml::to_string_pretty(&ProjectSet { projects })
            .map_err(|e| Error::Serialization(format!("Failed to serialize to TOML: {}", e))),
        "json" => serde_json::to_string_pretty(projects)
            .map_err(|e| Error::Serialization(format!("Failed to serialize to JSON: {}", e))),
        "pretty" => Ok(projects
            .iter()
            .map(format_project_pretty)
            .collect::<Vec<_>>()
            .join("\n")),
        _ => Err(invalid_format(format)),
    }
}

/// Serializes a report as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Error::Serialization(format!("Failed to serialize to JSON: {}", e)))
}

fn invalid_format(format: &str) -> Error {
    Error::InvalidArguments(format!(
        "Invalid format: '{}'. Use 'toml', 'json' or 'pretty'.",
        format
    ))
}

fn format_value(value: &OptionValue) -> String {
    match value {
        OptionValue::String(s) => format!("{:?}", s),
        other => other.to_string(),
    }
}

fn format_project_pretty(project: &Project) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{}\n\n", project.name().bold().bright_cyan()));

    if project.applied_fragments().is_empty() {
        output.push_str(&format!("{}: {}\n", "Fragments".bold(), "(none)".dimmed()));
    } else {
        output.push_str(&format!(
            "{}: {}\n",
            "Fragments".bold(),
            project.applied_fragments().join(" → ")
        ));
    }

    output.push_str(&format!("\n{}\n", "Plugins:".bold()));
    if project.plugins().is_empty() {
        output.push_str(&format!("  {}\n", "(none)".dimmed()));
    }
    for plugin in project.plugins() {
        let source = project
            .source_of(&format!("plugins.{}", plugin))
            .map(|s| s.to_string())
            .unwrap_or_default();
        output.push_str(&format!(
            "  {} {} {}\n",
            "✓".green(),
            plugin.green(),
            format!("({})", source).dimmed()
        ));
    }

    output.push_str(&format!("\n{}\n", "Scalars:".bold()));
    if project.scalars().is_empty() {
        output.push_str(&format!("  {}\n", "(none)".dimmed()));
    }
    for (key, value) in project.scalars() {
        let source = project
            .source_of(&format!("scalars.{}", key))
            .map(|s| s.to_string())
            .unwrap_or_default();
        output.push_str(&format!(
            "  {} = {} {}\n",
            key.bold(),
            format_value(value),
            format!("({})", source).dimmed()
        ));
    }

    output.push_str(&format!("\n{}\n", "Lists:".bold()));
    if project.lists().is_empty() {
        output.push_str(&format!("  {}\n", "(none)".dimmed()));
    }
    for (key, values) in project.lists() {
        output.push_str(&format!("  {}:\n", key.bold()));
        for value in values {
            output.push_str(&format!("    - {}\n", format_value(value)));
        }
    }

    output
}
