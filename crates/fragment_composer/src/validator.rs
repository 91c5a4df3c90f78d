//! Workspace validation.
//!
//! Checks a whole workspace up front, reporting every problem at once
//! instead of stopping at the first module that fails to compose.
//!
//! # Examples
//!
//! ```rust
//! use fragment_composer::{ValidationResult, ValidationError, ValidationErrorType};
//!
//! let mut result = ValidationResult::new();
//!
//! result.add_error(ValidationError {
//!     error_type: ValidationErrorType::UnknownFragment,
//!     field_path: "modules.app.fragments".to_string(),
//!     message: "Fragment 'native-image' is not registered".to_string(),
//!     suggestion: None,
//! });
//!
//! assert!(!result.is_valid());
//! ```

use crate::{
    activation::ActivationProperties,
    composer::Composer,
    fragment::ConfigFragment,
    manifest::ModuleDeclaration,
    workspace::Workspace,
};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use tracing::warn;

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

/// Outcome of validating a workspace.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns `true` when there are no errors; warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub error_type: ValidationErrorType,

    /// Dot-separated location, e.g. `modules.app.fragments`.
    pub field_path: String,

    pub message: String,

    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValidationErrorType {
    /// A module references a fragment that is not registered.
    UnknownFragment,

    /// A module has no fragments and no overrides.
    EmptyModule,

    /// A value is malformed.
    InvalidValue,
}

impl fmt::Display for ValidationErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFragment => write!(f, "UnknownFragment"),
            Self::EmptyModule => write!(f, "EmptyModule"),
            Self::InvalidValue => write!(f, "InvalidValue"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub field_path: String,
    pub message: String,
    pub recommendation: Option<String>,
}

/// Validates workspaces.
pub trait WorkspaceValidator {
    fn validate_workspace(&self, workspace: &Workspace) -> ValidationResult;
}

/// Standard workspace checks.
///
/// Errors:
/// - unknown fragment references, in base and conditional lists
/// - modules with neither fragments nor overrides
/// - malformed module overrides or empty conditional property names
///
/// Warnings:
/// - registered fragments that no module references
/// - module scalars that repeat the value their base fragments already give
#[derive(Debug, Clone, Default)]
pub struct BasicWorkspaceValidator {
    composer: Composer,
}

impl BasicWorkspaceValidator {
    pub fn new() -> Self {
        Self {
            composer: Composer::new(),
        }
    }

    fn check_module(
        &self,
        workspace: &Workspace,
        module: &ModuleDeclaration,
        result: &mut ValidationResult,
    ) {
        let base_path = format!("modules.{}", module.name);

        if module.fragments.is_empty() && module.conditional.is_empty() && !module.has_overrides() {
            result.add_error(ValidationError {
                error_type: ValidationErrorType::EmptyModule,
                field_path: base_path.clone(),
                message: format!("Module '{}' has no fragments and no overrides", module.name),
                suggestion: Some("Add fragments or remove the module".to_string()),
            });
        }

        if let Err(e) = module.overrides().validate() {
            result.add_error(ValidationError {
                error_type: ValidationErrorType::InvalidValue,
                field_path: base_path.clone(),
                message: e.to_string(),
                suggestion: None,
            });
        }

        for name in &module.fragments {
            if !workspace.registry().contains(name) {
                result.add_error(unknown_fragment(&format!("{}.fragments", base_path), name));
            }
        }

        for (index, group) in module.conditional.iter().enumerate() {
            let group_path = format!("{}.conditional[{}]", base_path, index);
            if group.property.trim().is_empty() {
                result.add_error(ValidationError {
                    error_type: ValidationErrorType::InvalidValue,
                    field_path: format!("{}.property", group_path),
                    message: "Conditional property name cannot be empty".to_string(),
                    suggestion: None,
                });
            }
            for name in &group.fragments {
                if !workspace.registry().contains(name) {
                    result.add_error(unknown_fragment(&format!("{}.fragments", group_path), name));
                }
            }
        }

        self.check_redundant_overrides(workspace, module, &base_path, result);
    }

    fn check_redundant_overrides(
        &self,
        workspace: &Workspace,
        module: &ModuleDeclaration,
        base_path: &str,
        result: &mut ValidationResult,
    ) {
        let requested = module.requested_fragments(&ActivationProperties::new());
        let Ok(fragments) = workspace.registry().resolve(&requested) else {
            return;
        };
        let Ok(base) = self
            .composer
            .compose(&fragments, &ConfigFragment::new(&module.name))
        else {
            return;
        };

        for (key, value) in &module.scalars {
            if base.scalar(key) == Some(value) {
                let source = base
                    .source_of(&format!("scalars.{}", key))
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                result.add_warning(ValidationWarning {
                    field_path: format!("{}.scalars.{}", base_path, key),
                    message: format!(
                        "Override of '{}' repeats the value already set by {}",
                        key, source
                    ),
                    recommendation: Some(format!("Remove '{}' from the module overrides", key)),
                });
            }
        }
    }
}

impl WorkspaceValidator for BasicWorkspaceValidator {
    fn validate_workspace(&self, workspace: &Workspace) -> ValidationResult {
        let mut result = ValidationResult::new();

        for module in workspace.modules() {
            self.check_module(workspace, module, &mut result);
        }

        let referenced: BTreeSet<&str> = workspace
            .modules()
            .iter()
            .flat_map(|m| m.referenced_fragments())
            .collect();
        for name in workspace.registry().names() {
            if !referenced.contains(name) {
                result.add_warning(ValidationWarning {
                    field_path: format!("fragments.{}", name),
                    message: format!("Fragment '{}' is not used by any module", name),
                    recommendation: None,
                });
            }
        }

        for warning in &result.warnings {
            warn!(message = "Validation warning", field = %warning.field_path, detail = %warning.message);
        }

        result
    }
}

fn unknown_fragment(field_path: &str, name: &str) -> ValidationError {
    ValidationError {
        error_type: ValidationErrorType::UnknownFragment,
        field_path: field_path.to_string(),
        message: format!("Fragment '{}' is not registered", name),
        suggestion: Some(format!(
            "Declare a fragment named '{}' or remove the reference",
            name
        )),
    }
}
