//! Placeholder expansion for composed projects.
//!
//! String values may reference the project's own settings with Handlebars
//! placeholders, for example an image name built from the group, name and
//! version of the project:
//!
//! ```toml
//! [scalars]
//! group = "com.template"
//! version = "0.0.1-SNAPSHOT"
//! image_name = "{{project.group}}/{{project.name}}:{{project.version}}"
//! ```
//!
//! The context exposes `project.name` plus every scalar option under its key.
//! Keys containing dots are addressed with a segment literal:
//! `{{project.[image.tag]}}`.

use crate::{
    errors::{CompositionError, CompositionResult},
    project::Project,
    value::OptionValue,
};
use handlebars::Handlebars;
use serde_json::{json, Map, Value};
use std::fmt;
use tracing::debug;

#[cfg(test)]
#[path = "interpolation_tests.rs"]
mod tests;

/// Expands placeholders in a project's string values.
///
/// Rendering is strict: a placeholder that names an undefined setting is an
/// error rather than an empty string. Output is never HTML-escaped.
///
/// # Examples
///
/// ```rust
/// use fragment_composer::{Composer, ConfigFragment, OptionValue, PlaceholderResolver};
///
/// let overrides = ConfigFragment::new("app")
///     .with_scalar("group", "com.template")
///     .with_scalar("image", "{{project.group}}/{{project.name}}");
/// let project = Composer::new().compose(&[], &overrides)?;
///
/// let resolved = PlaceholderResolver::new().interpolate(&project)?;
/// assert_eq!(resolved.scalar("image"), Some(&OptionValue::from("com.template/app")));
/// # Ok::<(), fragment_composer::CompositionError>(())
/// ```
pub struct PlaceholderResolver {
    handlebars: Handlebars<'static>,
}

impl PlaceholderResolver {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self { handlebars }
    }

    /// Returns a copy of the project with every placeholder expanded.
    ///
    /// Scalars are rendered against the unexpanded scalar values, so a
    /// placeholder resolves to the text of the referenced option as declared.
    /// Lists are de-duplicated again after rendering.
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::InterpolationFailed` naming the option whose
    /// value could not be rendered. No partially expanded project is returned.
    pub fn interpolate(&self, project: &Project) -> CompositionResult<Project> {
        let context = Self::build_context(project);
        let mut resolved = project.clone();

        for (key, value) in resolved.scalar_options_mut().iter_mut() {
            *value = self.render_value(&format!("scalars.{}", key), value, &context)?;
        }

        for (key, values) in resolved.list_options_mut().iter_mut() {
            let mut rendered: Vec<OptionValue> = Vec::with_capacity(values.len());
            for value in values.iter() {
                let value = self.render_value(&format!("lists.{}", key), value, &context)?;
                if !rendered.contains(&value) {
                    rendered.push(value);
                }
            }
            *values = rendered;
        }

        debug!(message = "Expanded placeholders", project = project.name());
        Ok(resolved)
    }

    /// Renders a single template string against a project.
    pub fn render(&self, template: &str, project: &Project) -> CompositionResult<String> {
        let context = Self::build_context(project);
        self.render_str("template", template, &context)
    }

    fn render_value(
        &self,
        key: &str,
        value: &OptionValue,
        context: &Value,
    ) -> CompositionResult<OptionValue> {
        match value {
            OptionValue::String(text) => {
                Ok(OptionValue::String(self.render_str(key, text, context)?))
            }
            other => Ok(other.clone()),
        }
    }

    fn render_str(&self, key: &str, template: &str, context: &Value) -> CompositionResult<String> {
        if !template.contains("{{") {
            return Ok(template.to_string());
        }

        self.handlebars
            .render_template(template, context)
            .map_err(|e| CompositionError::InterpolationFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn build_context(project: &Project) -> Value {
        let mut fields = Map::new();
        for (key, value) in project.scalars() {
            fields.insert(key.clone(), value.to_json());
        }
        fields.insert("name".to_string(), Value::String(project.name().to_string()));

        json!({ "project": Value::Object(fields) })
    }
}

impl fmt::Debug for PlaceholderResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderResolver").finish_non_exhaustive()
    }
}

impl Default for PlaceholderResolver {
    fn default() -> Self {
        Self::new()
    }
}
