//! Activation properties.
//!
//! Named switches, set on the command line (`-P native`) or in the CLI
//! configuration, that enable a module's conditional fragments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[cfg(test)]
#[path = "activation_tests.rs"]
mod tests;

/// The set of active property names.
///
/// # Examples
///
/// ```rust
/// use fragment_composer::ActivationProperties;
///
/// let properties: ActivationProperties = ["native"].into_iter().collect();
/// assert!(properties.is_active("native"));
/// assert!(!properties.is_active("debug"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationProperties(BTreeSet<String>);

impl ActivationProperties {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn activate(&mut self, property: impl Into<String>) {
        self.0.insert(property.into());
    }

    pub fn is_active(&self, property: &str) -> bool {
        self.0.contains(property)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|p| p.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ActivationProperties {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for ActivationProperties {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}
