//! Fragment composition engine.
//!
//! Merges an ordered list of shared fragments, then a module's local
//! overrides, into one [`Project`].
//!
//! # Merge Rules
//!
//! Applied to each fragment in order, then to the overrides:
//! - **Scalar options**: a later fragment replaces the value of an existing key
//! - **List options**: values are appended; a value already present is skipped,
//!   so each list keeps the order of first occurrence
//! - **Plugin references**: unioned
//!
//! Because the overrides are applied last with the same rules, module-local
//! settings always win over shared fragments.
//!
//! # Examples
//!
//! ```rust
//! use fragment_composer::{Composer, ConfigFragment, OptionValue};
//!
//! let a = ConfigFragment::new("a").with_scalar("x", 1).with_list("deps", ["p", "q"]);
//! let b = ConfigFragment::new("b").with_scalar("x", 2).with_list("deps", ["q", "r"]);
//! let overrides = ConfigFragment::new("app");
//!
//! let project = Composer::new().compose(&[&a, &b], &overrides)?;
//!
//! assert_eq!(project.scalar("x"), Some(&OptionValue::from(2)));
//! let deps: Vec<String> = project.list("deps").unwrap().iter().map(|v| v.to_string()).collect();
//! assert_eq!(deps, vec!["p", "q", "r"]);
//! # Ok::<(), fragment_composer::CompositionError>(())
//! ```

use crate::{
    errors::CompositionResult,
    fragment::ConfigFragment,
    project::{ConfigurationSource, Project},
};
use tracing::debug;

#[cfg(test)]
#[path = "composer_tests.rs"]
mod tests;

/// Composition engine.
///
/// Stateless: it takes fragments and produces a project without keeping or
/// mutating anything, so one instance can serve any number of callers.
#[derive(Debug, Clone, Default)]
pub struct Composer {}

impl Composer {
    pub fn new() -> Self {
        Self {}
    }

    /// Composes fragments in order and applies the overrides last.
    ///
    /// # Arguments
    ///
    /// * `fragments` - Shared fragments in application order
    /// * `overrides` - Module-local settings; its name becomes the project name
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InvalidFragment` if any input fragment or the
    /// overrides are malformed. All inputs are checked before merging starts,
    /// so no partial project is ever produced.
    pub fn compose(
        &self,
        fragments: &[&ConfigFragment],
        overrides: &ConfigFragment,
    ) -> CompositionResult<Project> {
        for fragment in fragments {
            fragment.validate()?;
        }
        overrides.validate()?;

        let mut project = Project::new(overrides.name());

        for fragment in fragments {
            debug!(
                message = "Applying fragment",
                project = overrides.name(),
                fragment = fragment.name()
            );
            project.push_applied_fragment(fragment.name());
            self.apply(
                &mut project,
                fragment,
                ConfigurationSource::Fragment(fragment.name().to_string()),
            );
        }

        debug!(message = "Applying module overrides", project = overrides.name());
        self.apply(&mut project, overrides, ConfigurationSource::Override);

        Ok(project)
    }

    fn apply(&self, project: &mut Project, fragment: &ConfigFragment, source: ConfigurationSource) {
        for (key, value) in fragment.scalar_options() {
            project.set_scalar(key, value.clone(), source.clone());
        }

        for (key, values) in fragment.list_options() {
            project.extend_list(key, values);
        }

        for plugin_id in fragment.plugin_refs() {
            project.add_plugin(plugin_id, source.clone());
        }
    }
}
