//! Composition of reusable configuration fragments across workspace modules.
//!
//! A workspace declares shared fragments (conventions such as
//! "kotlin-library" or "code-formatting") and modules that list the
//! fragments they are built from, plus their own local overrides. Composing
//! a module merges its fragments in declared order, applies the overrides
//! last, expands placeholders, and yields a [`Project`] for downstream
//! packaging, testing and analysis tools.
//!
//! # Merge Rules
//!
//! - Scalar options: the later fragment wins on a key collision
//! - List options: concatenated, duplicates removed, first occurrence kept
//! - Plugin references: unioned
//! - Module overrides are applied after every shared fragment
//!
//! # Examples
//!
//! ```rust
//! use fragment_composer::{Composer, ConfigFragment, FragmentRegistry, OptionValue};
//!
//! let mut registry = FragmentRegistry::new();
//! registry.register(ConfigFragment::new("a").with_scalar("x", 1))?;
//! registry.register(ConfigFragment::new("b").with_scalar("x", 2))?;
//!
//! let fragments = registry.resolve(&["a", "b"])?;
//! let project = Composer::new().compose(&fragments, &ConfigFragment::new("app"))?;
//!
//! assert_eq!(project.scalar("x"), Some(&OptionValue::from(2)));
//! # Ok::<(), fragment_composer::CompositionError>(())
//! ```

pub mod activation;
pub mod composer;
pub mod errors;
pub mod fragment;
pub mod interpolation;
pub mod manifest;
pub mod project;
pub mod registry;
pub mod validator;
pub mod value;
pub mod version_policy;
pub mod workspace;


pub use activation::ActivationProperties;
pub use composer::Composer;
pub use errors::{CompositionError, CompositionResult};
pub use fragment::ConfigFragment;
pub use interpolation::PlaceholderResolver;
pub use manifest::{
    ConditionalFragments, ModuleDeclaration, WorkspaceManifest, DEFAULT_MANIFEST_FILENAME,
};
pub use project::{ConfigurationSource, ConfigurationSourceTrace, Project};
pub use registry::FragmentRegistry;
pub use validator::{
    BasicWorkspaceValidator, ValidationError, ValidationErrorType, ValidationResult,
    ValidationWarning, WorkspaceValidator,
};
pub use value::OptionValue;
pub use version_policy::{DependencyCoordinate, UnstableCoordinate};
pub use workspace::Workspace;
