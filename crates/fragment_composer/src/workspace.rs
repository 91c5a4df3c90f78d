//! Workspace: a populated registry plus its module declarations.
//!
//! Loading a workspace is the startup phase: every fragment is registered
//! once, and a duplicate name aborts loading. After that the workspace is
//! only read, and any number of modules can be composed from it.

use crate::{
    activation::ActivationProperties,
    composer::Composer,
    errors::{CompositionError, CompositionResult},
    interpolation::PlaceholderResolver,
    manifest::{load_fragment_dir, ModuleDeclaration, WorkspaceManifest},
    project::Project,
    registry::FragmentRegistry,
};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;

/// A loaded workspace ready for composition.
///
/// # Examples
///
/// ```rust
/// use fragment_composer::{ActivationProperties, Workspace, WorkspaceManifest};
///
/// let manifest = WorkspaceManifest::from_toml_str(r#"
///     [workspace]
///     name = "demo"
///
///     [[fragments]]
///     name = "kotlin-library"
///     plugins = ["org.jetbrains.kotlin.jvm"]
///
///     [[modules]]
///     name = "domain"
///     fragments = ["kotlin-library"]
/// "#)?;
///
/// let workspace = Workspace::from_manifest(manifest, None)?;
/// let project = workspace.compose_module("domain", &ActivationProperties::new())?;
/// assert!(project.has_plugin("org.jetbrains.kotlin.jvm"));
/// # Ok::<(), fragment_composer::CompositionError>(())
/// ```
#[derive(Debug)]
pub struct Workspace {
    name: String,
    registry: FragmentRegistry,
    modules: Vec<ModuleDeclaration>,
    composer: Composer,
    resolver: PlaceholderResolver,
}

impl Workspace {
    /// Reads a manifest file and builds the workspace.
    ///
    /// Fragment directories are resolved relative to the manifest's directory.
    pub fn load(path: &Path) -> CompositionResult<Self> {
        let manifest = WorkspaceManifest::load(path)?;
        Self::from_manifest(manifest, path.parent())
    }

    /// Builds a workspace from a parsed manifest.
    ///
    /// Inline fragments are registered first, then each fragment directory in
    /// manifest order.
    ///
    /// # Arguments
    ///
    /// * `manifest` - Parsed manifest
    /// * `base_dir` - Directory that relative fragment directories are
    ///   resolved against; `None` uses them as given
    ///
    /// # Errors
    ///
    /// - `CompositionError::DuplicateName` if two fragments share a name
    /// - `CompositionError::InvalidFragment` if a fragment is malformed
    /// - `CompositionError::DuplicateModule` if two modules share a name
    /// - `CompositionError::InvalidModule` if a module name is empty or blank
    /// - Any file error from reading fragment directories
    pub fn from_manifest(
        manifest: WorkspaceManifest,
        base_dir: Option<&Path>,
    ) -> CompositionResult<Self> {
        let mut registry = FragmentRegistry::new();

        for fragment in manifest.fragments {
            registry.register(fragment)?;
        }

        for dir in &manifest.workspace.fragment_dirs {
            let dir = match base_dir {
                Some(base) => base.join(dir),
                None => dir.clone(),
            };
            for fragment in load_fragment_dir(&dir)? {
                registry.register(fragment)?;
            }
        }

        let mut seen = HashSet::new();
        for module in &manifest.modules {
            if module.name.trim().is_empty() {
                return Err(CompositionError::InvalidModule {
                    name: module.name.clone(),
                    reason: "Module name cannot be empty".to_string(),
                });
            }
            if !seen.insert(module.name.as_str()) {
                return Err(CompositionError::DuplicateModule {
                    name: module.name.clone(),
                });
            }
        }

        info!(
            message = "Workspace loaded",
            workspace = %manifest.workspace.name,
            fragments = registry.len(),
            modules = manifest.modules.len()
        );

        Ok(Self {
            name: manifest.workspace.name,
            registry,
            modules: manifest.modules,
            composer: Composer::new(),
            resolver: PlaceholderResolver::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &FragmentRegistry {
        &self.registry
    }

    /// Module declarations in manifest order.
    pub fn modules(&self) -> &[ModuleDeclaration] {
        &self.modules
    }

    pub fn module(&self, name: &str) -> Option<&ModuleDeclaration> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Composes one module and expands its placeholders.
    ///
    /// # Errors
    ///
    /// - `CompositionError::UnknownModule` if no module has that name
    /// - `CompositionError::UnknownFragment` naming the first fragment the
    ///   module requests that is not registered
    /// - `CompositionError::InvalidFragment` if the module overrides are malformed
    /// - `CompositionError::InterpolationFailed` if a placeholder cannot be expanded
    pub fn compose_module(
        &self,
        name: &str,
        properties: &ActivationProperties,
    ) -> CompositionResult<Project> {
        let module = self
            .module(name)
            .ok_or_else(|| CompositionError::UnknownModule {
                name: name.to_string(),
            })?;

        self.compose_declaration(module, properties)
    }

    /// Composes every module in manifest order; the first failure aborts.
    pub fn compose_all(&self, properties: &ActivationProperties) -> CompositionResult<Vec<Project>> {
        self.modules
            .iter()
            .map(|module| self.compose_declaration(module, properties))
            .collect()
    }

    fn compose_declaration(
        &self,
        module: &ModuleDeclaration,
        properties: &ActivationProperties,
    ) -> CompositionResult<Project> {
        let requested = module.requested_fragments(properties);
        debug!(
            message = "Composing module",
            module = %module.name,
            fragments = ?requested
        );

        let fragments = self.registry.resolve(&requested)?;
        let project = self.composer.compose(&fragments, &module.overrides())?;
        let project = self.resolver.interpolate(&project)?;

        info!(
            message = "Module composed",
            module = %module.name,
            fragments = project.applied_fragments().len(),
            plugins = project.plugins().len()
        );
        Ok(project)
    }
}
