//! Fragment registry.
//!
//! The registry owns every shared fragment of a workspace. It is populated
//! once while the workspace starts up and only read afterwards: population
//! goes through `&mut self`, composition borrows it through `&self`.

use crate::{
    errors::{CompositionError, CompositionResult},
    fragment::ConfigFragment,
};
use std::collections::BTreeMap;
use tracing::debug;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

/// Stores fragments by name and resolves ordered name lists.
///
/// # Examples
///
/// ```rust
/// use fragment_composer::{ConfigFragment, FragmentRegistry};
///
/// let mut registry = FragmentRegistry::new();
/// registry.register(ConfigFragment::new("kotlin-library"))?;
/// registry.register(ConfigFragment::new("code-formatting"))?;
///
/// let resolved = registry.resolve(&["code-formatting", "kotlin-library"])?;
/// assert_eq!(resolved[0].name(), "code-formatting");
/// # Ok::<(), fragment_composer::CompositionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FragmentRegistry {
    fragments: BTreeMap<String, ConfigFragment>,
}

impl FragmentRegistry {
    pub fn new() -> Self {
        Self {
            fragments: BTreeMap::new(),
        }
    }

    /// Registers a fragment under its own name.
    ///
    /// # Errors
    ///
    /// - `CompositionError::InvalidFragment` if the fragment is malformed
    /// - `CompositionError::DuplicateName` if the name is already taken; the
    ///   registry is left unchanged
    pub fn register(&mut self, fragment: ConfigFragment) -> CompositionResult<()> {
        fragment.validate()?;

        if self.fragments.contains_key(fragment.name()) {
            return Err(CompositionError::DuplicateName {
                name: fragment.name().to_string(),
            });
        }

        debug!(message = "Registered fragment", fragment = fragment.name());
        self.fragments.insert(fragment.name().to_string(), fragment);
        Ok(())
    }

    /// Resolves names to fragments, keeping the requested order.
    ///
    /// A name requested twice is returned twice.
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::UnknownFragment` naming the first name that
    /// is not registered. No partial result is returned.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> CompositionResult<Vec<&ConfigFragment>> {
        let resolved = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.fragments
                    .get(name)
                    .ok_or_else(|| CompositionError::UnknownFragment {
                        name: name.to_string(),
                    })
            })
            .collect::<CompositionResult<Vec<_>>>()?;

        debug!(
            message = "Resolved fragments",
            count = resolved.len(),
            names = ?resolved.iter().map(|f| f.name()).collect::<Vec<_>>()
        );
        Ok(resolved)
    }

    pub fn get(&self, name: &str) -> Option<&ConfigFragment> {
        self.fragments.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    /// Registered fragment names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.fragments.keys().map(|k| k.as_str()).collect()
    }

    /// Iterates over registered fragments in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigFragment> {
        self.fragments.values()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
