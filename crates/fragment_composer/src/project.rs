//! Materialized module configuration.
//!
//! A [`Project`] is the result of composing a module's fragments and its
//! local overrides. It owns copies of every value, so nothing a caller does
//! with it can reach back into the shared fragments that produced it.
//!
//! # Source Tracing
//!
//! Every project carries a [`ConfigurationSourceTrace`] recording which
//! fragment (or the module override) supplied each effective scalar option
//! and each plugin reference. Paths have the form `scalars.<key>` and
//! `plugins.<id>`.

use crate::{
    errors::{CompositionError, CompositionResult},
    value::OptionValue,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;

/// The effective configuration of one module.
///
/// Projects are only produced by the [`Composer`](crate::Composer) and the
/// [`PlaceholderResolver`](crate::PlaceholderResolver); their contents are
/// read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    name: String,

    #[serde(rename = "fragments")]
    applied_fragments: Vec<String>,

    #[serde(rename = "plugins")]
    plugin_refs: BTreeSet<String>,

    #[serde(rename = "scalars")]
    scalar_options: BTreeMap<String, OptionValue>,

    #[serde(rename = "lists")]
    list_options: BTreeMap<String, Vec<OptionValue>>,

    #[serde(rename = "sources")]
    source_trace: ConfigurationSourceTrace,
}

impl Project {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            applied_fragments: Vec::new(),
            plugin_refs: BTreeSet::new(),
            scalar_options: BTreeMap::new(),
            list_options: BTreeMap::new(),
            source_trace: ConfigurationSourceTrace::new(),
        }
    }

    /// Module name; taken from the overrides fragment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the shared fragments merged into this project, in order.
    pub fn applied_fragments(&self) -> &[String] {
        &self.applied_fragments
    }

    pub fn scalar(&self, key: &str) -> Option<&OptionValue> {
        self.scalar_options.get(key)
    }

    pub fn scalars(&self) -> &BTreeMap<String, OptionValue> {
        &self.scalar_options
    }

    pub fn list(&self, key: &str) -> Option<&[OptionValue]> {
        self.list_options.get(key).map(|v| v.as_slice())
    }

    pub fn lists(&self) -> &BTreeMap<String, Vec<OptionValue>> {
        &self.list_options
    }

    pub fn plugins(&self) -> &BTreeSet<String> {
        &self.plugin_refs
    }

    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugin_refs.contains(plugin_id)
    }

    /// Returns the source that supplied a setting.
    ///
    /// # Arguments
    ///
    /// * `field_path` - `scalars.<key>` or `plugins.<id>`
    pub fn source_of(&self, field_path: &str) -> Option<&ConfigurationSource> {
        self.source_trace.get_source(field_path)
    }

    pub fn source_trace(&self) -> &ConfigurationSourceTrace {
        &self.source_trace
    }

    /// Serializes the project as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::ParseError` if the TOML serializer rejects
    /// the content.
    pub fn to_toml_string(&self) -> CompositionResult<String> {
        toml::to_string_pretty(self).map_err(|e| CompositionError::ParseError {
            reason: format!("Failed to serialize project '{}' to TOML: {}", self.name, e),
        })
    }

    /// Serializes the project as pretty JSON.
    pub fn to_json_string(&self) -> CompositionResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CompositionError::ParseError {
            reason: format!("Failed to serialize project '{}' to JSON: {}", self.name, e),
        })
    }

    pub(crate) fn push_applied_fragment(&mut self, name: &str) {
        self.applied_fragments.push(name.to_string());
    }

    pub(crate) fn set_scalar(&mut self, key: &str, value: OptionValue, source: ConfigurationSource) {
        self.scalar_options.insert(key.to_string(), value);
        self.source_trace
            .add_source(&format!("scalars.{}", key), source);
    }

    /// Appends values to a list, skipping any already present.
    pub(crate) fn extend_list(&mut self, key: &str, values: &[OptionValue]) {
        let list = self.list_options.entry(key.to_string()).or_default();
        for value in values {
            if !list.contains(value) {
                list.push(value.clone());
            }
        }
    }

    /// Adds a plugin; the first contributor stays recorded as its source.
    pub(crate) fn add_plugin(&mut self, plugin_id: &str, source: ConfigurationSource) {
        if self.plugin_refs.insert(plugin_id.to_string()) {
            self.source_trace
                .add_source(&format!("plugins.{}", plugin_id), source);
        }
    }

    pub(crate) fn scalar_options_mut(&mut self) -> &mut BTreeMap<String, OptionValue> {
        &mut self.scalar_options
    }

    pub(crate) fn list_options_mut(&mut self) -> &mut BTreeMap<String, Vec<OptionValue>> {
        &mut self.list_options
    }
}

/// Tracks which source provided each setting of a project.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ConfigurationSourceTrace {
    sources: BTreeMap<String, ConfigurationSource>,
}

impl ConfigurationSourceTrace {
    pub fn new() -> Self {
        Self {
            sources: BTreeMap::new(),
        }
    }

    /// Records the source of a setting, replacing any earlier record.
    pub fn add_source(&mut self, field_path: &str, source: ConfigurationSource) {
        self.sources.insert(field_path.to_string(), source);
    }

    pub fn get_source(&self, field_path: &str) -> Option<&ConfigurationSource> {
        self.sources.get(field_path)
    }

    /// Returns all traced field paths in sorted order.
    pub fn configured_fields(&self) -> Vec<&str> {
        self.sources.keys().map(|s| s.as_str()).collect()
    }

    pub fn field_count(&self) -> usize {
        self.sources.len()
    }
}

/// Where an effective setting came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ConfigurationSource {
    /// A shared fragment, by name.
    Fragment(String),

    /// The module-local overrides (highest precedence).
    Override,
}

impl fmt::Display for ConfigurationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationSource::Fragment(name) => write!(f, "fragment '{}'", name),
            ConfigurationSource::Override => write!(f, "module override"),
        }
    }
}
