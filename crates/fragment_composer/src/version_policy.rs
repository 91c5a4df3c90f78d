//! Dependency version hygiene.
//!
//! Classifies dependency versions as stable or pre-release and finds
//! pre-release dependency coordinates in a composed project. Upgrade
//! tooling uses [`should_reject_upgrade`] to avoid proposing a pre-release
//! to a module that currently tracks a stable release.

use crate::project::Project;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

#[cfg(test)]
#[path = "version_policy_tests.rs"]
mod tests;

const STABLE_KEYWORDS: [&str; 3] = ["RELEASE", "FINAL", "GA"];

fn numeric_version() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9,.v-]+(-r)?$").expect("numeric version pattern is valid")
    })
}

/// Returns `true` if a version string denotes a pre-release.
///
/// A version is stable when it contains one of `RELEASE`, `FINAL` or `GA`
/// (case-insensitive), or consists only of digits, dots, commas, `v` and
/// hyphens with an optional `-r` suffix.
///
/// # Examples
///
/// ```rust
/// use fragment_composer::version_policy::is_non_stable;
///
/// assert!(!is_non_stable("1.14.5"));
/// assert!(!is_non_stable("2.0.0.RELEASE"));
/// assert!(is_non_stable("2.1.0-M1"));
/// assert!(is_non_stable("4.0.0-rc.1"));
/// ```
pub fn is_non_stable(version: &str) -> bool {
    let upper = version.to_uppercase();
    let has_stable_keyword = STABLE_KEYWORDS.iter().any(|k| upper.contains(k));
    let is_stable = has_stable_keyword || numeric_version().is_match(version);
    !is_stable
}

/// Returns `true` if an upgrade from `current` to `candidate` should be skipped.
///
/// Pre-release candidates are rejected unless the module already tracks a
/// pre-release.
pub fn should_reject_upgrade(current: &str, candidate: &str) -> bool {
    is_non_stable(candidate) && !is_non_stable(current)
}

/// A `group:artifact[:version[:classifier]]` dependency coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyCoordinate {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl DependencyCoordinate {
    /// Parses a coordinate; returns `None` for anything else.
    ///
    /// Versionless coordinates (managed by a platform or BOM) parse with
    /// `version = None`.
    pub fn parse(text: &str) -> Option<Self> {
        let parts: Vec<&str> = text.trim().split(':').collect();
        if parts.iter().any(|p| p.is_empty() || p.contains(char::is_whitespace)) {
            return None;
        }

        match parts.as_slice() {
            [group, artifact] => Some(Self {
                group: group.to_string(),
                artifact: artifact.to_string(),
                version: None,
                classifier: None,
            }),
            [group, artifact, version] => Some(Self {
                group: group.to_string(),
                artifact: artifact.to_string(),
                version: Some(version.to_string()),
                classifier: None,
            }),
            [group, artifact, version, classifier] => Some(Self {
                group: group.to_string(),
                artifact: artifact.to_string(),
                version: Some(version.to_string()),
                classifier: Some(classifier.to_string()),
            }),
            _ => None,
        }
    }

    pub fn is_non_stable(&self) -> bool {
        self.version.as_deref().map(is_non_stable).unwrap_or(false)
    }
}

impl fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        Ok(())
    }
}

/// A pre-release coordinate found in one of a project's list options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnstableCoordinate {
    pub list_key: String,
    pub coordinate: DependencyCoordinate,
}

/// Finds every pre-release dependency coordinate in a project's lists.
///
/// Results are ordered by list key, then by position within the list.
pub fn find_unstable_coordinates(project: &Project) -> Vec<UnstableCoordinate> {
    project
        .lists()
        .iter()
        .flat_map(|(key, values)| {
            values
                .iter()
                .filter_map(|value| value.as_str())
                .filter_map(DependencyCoordinate::parse)
                .filter(|coordinate| coordinate.is_non_stable())
                .map(move |coordinate| UnstableCoordinate {
                    list_key: key.clone(),
                    coordinate,
                })
        })
        .collect()
}
