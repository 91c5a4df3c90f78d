//! Named configuration fragments.
//!
//! A [`ConfigFragment`] is an immutable bundle of settings contributed by one
//! source: a shared convention (for example "code-formatting") or the
//! module-local overrides of a single module.
//!
//! # TOML Format
//!
//! ```toml
//! name = "quality-assurance"
//! description = "Coverage reports"
//! plugins = ["org.jetbrains.kotlinx.kover"]
//!
//! [scalars]
//! "kover.html.on_check" = false
//!
//! [lists]
//! test_dependencies = ["org.jetbrains.kotlin:kotlin-test-junit5"]
//! ```

use crate::{
    errors::{CompositionError, CompositionResult},
    value::OptionValue,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[cfg(test)]
#[path = "fragment_tests.rs"]
mod tests;

/// An immutable named bundle of configuration settings.
///
/// Fragments are built with the consuming `with_*` methods and are read-only
/// afterwards. All collections are ordered so that anything derived from a
/// fragment serializes identically on every run.
///
/// # Examples
///
/// ```rust
/// use fragment_composer::ConfigFragment;
///
/// let fragment = ConfigFragment::new("security-maintenance")
///     .with_scalar("fail_build_on_cvss", 7.0)
///     .with_list("reject_versions", ["alpha", "beta"])
///     .with_plugin("org.owasp.dependencycheck");
///
/// assert_eq!(fragment.name(), "security-maintenance");
/// assert!(fragment.plugin_refs().contains("org.owasp.dependencycheck"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFragment {
    name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(default, rename = "plugins")]
    plugin_refs: BTreeSet<String>,

    #[serde(default, rename = "scalars")]
    scalar_options: BTreeMap<String, OptionValue>,

    #[serde(default, rename = "lists")]
    list_options: BTreeMap<String, Vec<OptionValue>>,
}

impl ConfigFragment {
    /// Creates an empty fragment with the given name.
    ///
    /// The name is not checked here; malformed fragments are rejected when they
    /// are registered or composed.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            plugin_refs: BTreeSet::new(),
            scalar_options: BTreeMap::new(),
            list_options: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a scalar option, replacing any previous value for the key.
    pub fn with_scalar(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.scalar_options.insert(key.into(), value.into());
        self
    }

    /// Appends values to a list option.
    pub fn with_list<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<OptionValue>,
    {
        self.list_options
            .entry(key.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_plugin(mut self, plugin_id: impl Into<String>) -> Self {
        self.plugin_refs.insert(plugin_id.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn scalar_options(&self) -> &BTreeMap<String, OptionValue> {
        &self.scalar_options
    }

    pub fn list_options(&self) -> &BTreeMap<String, Vec<OptionValue>> {
        &self.list_options
    }

    pub fn plugin_refs(&self) -> &BTreeSet<String> {
        &self.plugin_refs
    }

    /// Returns `true` if the fragment carries no settings at all.
    pub fn is_empty(&self) -> bool {
        self.scalar_options.is_empty() && self.list_options.is_empty() && self.plugin_refs.is_empty()
    }

    /// Checks that the fragment is well formed.
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InvalidFragment` if:
    /// - The name is empty, blank, or has surrounding whitespace
    /// - Any scalar or list option key is empty
    /// - Any plugin identifier is empty
    /// - Any float value is NaN or infinite
    pub fn validate(&self) -> CompositionResult<()> {
        if self.name.trim().is_empty() {
            return Err(self.invalid("Fragment name cannot be empty"));
        }

        if self.name.trim() != self.name {
            return Err(self.invalid(format!(
                "Fragment name '{}' has leading or trailing whitespace",
                self.name
            )));
        }

        if self.scalar_options.keys().any(|k| k.trim().is_empty()) {
            return Err(self.invalid("Scalar option keys cannot be empty"));
        }

        if self.list_options.keys().any(|k| k.trim().is_empty()) {
            return Err(self.invalid("List option keys cannot be empty"));
        }

        if self.plugin_refs.iter().any(|p| p.trim().is_empty()) {
            return Err(self.invalid("Plugin identifiers cannot be empty"));
        }

        if let Some(key) = self
            .scalar_options
            .iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(key, _)| key)
        {
            return Err(self.invalid(format!("Scalar option '{}' is not a finite number", key)));
        }

        if let Some(key) = self
            .list_options
            .iter()
            .find(|(_, values)| values.iter().any(|v| !v.is_finite()))
            .map(|(key, _)| key)
        {
            return Err(self.invalid(format!("List option '{}' contains a non-finite number", key)));
        }

        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> CompositionError {
        CompositionError::InvalidFragment {
            name: self.name.clone(),
            reason: reason.into(),
        }
    }
}
