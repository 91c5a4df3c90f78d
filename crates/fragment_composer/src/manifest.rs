//! Workspace manifest loading.
//!
//! A manifest describes a multi-module workspace: its shared fragments
//! (inline or one file per fragment in fragment directories) and the modules
//! that compose them.
//!
//! # TOML Format
//!
//! ```toml
//! [workspace]
//! name = "kotlin-spring-boot-gradle-starter"
//! fragment_dirs = ["conventions"]
//!
//! [[fragments]]
//! name = "code-formatting"
//! plugins = ["com.diffplug.spotless", "org.jlleitschuh.gradle.ktlint"]
//!
//! [[modules]]
//! name = "app"
//! fragments = ["spring-boot-application", "code-formatting"]
//!
//! [[modules.conditional]]
//! property = "native"
//! fragments = ["native-image"]
//!
//! [modules.scalars]
//! pull_policy = "IF_NOT_PRESENT"
//! ```

use crate::{
    activation::ActivationProperties,
    errors::{CompositionError, CompositionResult},
    fragment::ConfigFragment,
    value::OptionValue,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;

/// Default manifest file name.
pub const DEFAULT_MANIFEST_FILENAME: &str = "workspace.toml";

/// Parsed workspace manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceManifest {
    pub workspace: WorkspaceSection,

    /// Fragments declared inline.
    #[serde(default)]
    pub fragments: Vec<ConfigFragment>,

    /// Modules in declaration order.
    #[serde(default)]
    pub modules: Vec<ModuleDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceSection {
    pub name: String,

    /// Directories holding one fragment per `*.toml` file, relative to the
    /// manifest.
    #[serde(default)]
    pub fragment_dirs: Vec<PathBuf>,
}

/// A module and the fragments it is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDeclaration {
    pub name: String,

    /// Shared fragments, in application order.
    #[serde(default)]
    pub fragments: Vec<String>,

    /// Fragments applied after the base list when a property is active.
    #[serde(default)]
    pub conditional: Vec<ConditionalFragments>,

    #[serde(default)]
    pub plugins: BTreeSet<String>,

    #[serde(default)]
    pub scalars: BTreeMap<String, OptionValue>,

    #[serde(default)]
    pub lists: BTreeMap<String, Vec<OptionValue>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionalFragments {
    pub property: String,
    pub fragments: Vec<String>,
}

impl ModuleDeclaration {
    /// Fragment names to apply for the given activation properties.
    ///
    /// The base list comes first, followed by every conditional group whose
    /// property is active, in declaration order.
    pub fn requested_fragments(&self, properties: &ActivationProperties) -> Vec<&str> {
        let conditional = self
            .conditional
            .iter()
            .filter(|group| properties.is_active(&group.property))
            .flat_map(|group| group.fragments.iter());

        self.fragments
            .iter()
            .chain(conditional)
            .map(|name| name.as_str())
            .collect()
    }

    /// Every fragment name the module can reference, active or not.
    pub fn referenced_fragments(&self) -> Vec<&str> {
        self.fragments
            .iter()
            .chain(self.conditional.iter().flat_map(|g| g.fragments.iter()))
            .map(|name| name.as_str())
            .collect()
    }

    /// Builds the module-local overrides fragment, named after the module.
    pub fn overrides(&self) -> ConfigFragment {
        let fragment = self
            .scalars
            .iter()
            .fold(ConfigFragment::new(&self.name), |f, (k, v)| {
                f.with_scalar(k, v.clone())
            });
        let fragment = self
            .lists
            .iter()
            .fold(fragment, |f, (k, v)| f.with_list(k, v.iter().cloned()));
        self.plugins
            .iter()
            .fold(fragment, |f, p| f.with_plugin(p))
    }

    pub fn has_overrides(&self) -> bool {
        !self.scalars.is_empty() || !self.lists.is_empty() || !self.plugins.is_empty()
    }
}

/// A fragment file; the name defaults to the file stem.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct FragmentDocument {
    name: Option<String>,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    plugins: BTreeSet<String>,

    #[serde(default)]
    scalars: BTreeMap<String, OptionValue>,

    #[serde(default)]
    lists: BTreeMap<String, Vec<OptionValue>>,
}

impl FragmentDocument {
    fn into_fragment(self, default_name: &str) -> ConfigFragment {
        let name = self.name.unwrap_or_else(|| default_name.to_string());
        let mut fragment = ConfigFragment::new(name);
        if let Some(description) = self.description {
            fragment = fragment.with_description(description);
        }
        for (key, value) in self.scalars {
            fragment = fragment.with_scalar(key, value);
        }
        for (key, values) in self.lists {
            fragment = fragment.with_list(key, values);
        }
        for plugin in self.plugins {
            fragment = fragment.with_plugin(plugin);
        }
        fragment
    }
}

impl WorkspaceManifest {
    /// Parses a manifest from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `CompositionError::ParseError` if the TOML is malformed or does
    /// not match the manifest structure.
    pub fn from_toml_str(content: &str) -> CompositionResult<Self> {
        toml::from_str(content).map_err(|e| CompositionError::ParseError {
            reason: format!("Invalid workspace manifest: {}", e),
        })
    }

    /// Reads and parses a manifest file.
    ///
    /// # Errors
    ///
    /// - `CompositionError::FileNotFound` if the file does not exist
    /// - `CompositionError::FileAccessError` if it cannot be read
    /// - `CompositionError::ParseError` if it is not a valid manifest
    pub fn load(path: &Path) -> CompositionResult<Self> {
        debug!(message = "Loading workspace manifest", path = ?path);
        let content = read_file(path)?;
        Self::from_toml_str(&content)
    }
}

/// Loads every `*.toml` file of a directory as a fragment.
///
/// Files are read in sorted path order so registration order, and with it
/// any duplicate-name error, is the same on every run.
///
/// # Errors
///
/// - `CompositionError::FileNotFound` if the directory does not exist
/// - `CompositionError::FileAccessError` if it or a file cannot be read
/// - `CompositionError::ParseError` naming the file that failed to parse
pub fn load_fragment_dir(dir: &Path) -> CompositionResult<Vec<ConfigFragment>> {
    if !dir.is_dir() {
        return Err(CompositionError::FileNotFound {
            path: dir.display().to_string(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|e| CompositionError::FileAccessError {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CompositionError::FileAccessError {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut fragments = Vec::with_capacity(paths.len());
    for path in paths {
        let content = read_file(&path)?;
        let document: FragmentDocument =
            toml::from_str(&content).map_err(|e| CompositionError::ParseError {
                reason: format!("Invalid fragment file {}: {}", path.display(), e),
            })?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!(message = "Loaded fragment file", path = ?path);
        fragments.push(document.into_fragment(&stem));
    }

    Ok(fragments)
}

fn read_file(path: &Path) -> CompositionResult<String> {
    if !path.exists() {
        return Err(CompositionError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    fs::read_to_string(path).map_err(|e| CompositionError::FileAccessError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
