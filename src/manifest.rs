//! # Dependency Table
//!
//! This module defines [`DependencyEntry`], one row of the table of sibling
//! repositories a project depends on, and the two ways a table is obtained:
//!
//! - [`builtin_table`]: the table compiled into the binary.
//! - [`parse`] / [`from_file`]: a YAML manifest that replaces it.
//!
//! ## Manifest Format
//!
//! ```yaml
//! dependencies:
//!   - name: QtCommon
//!     path: ../../QtCommon
//!     revision: 98855c857a8af01ebc2501ffd3a1747aac279db2
//!     internal-revision: 5b8f9d6dab2d2bc667b092dc4f0e949861920dcf
//!   - name: common-lib-amd-ADL.git
//!     path: ../../Common/Lib/AMD/ADL
//! ```
//!
//! `revision` and `internal-revision` are optional. An entry with no pin
//! follows the tip of the default branch.
//!
//! Tables are validated on construction: names must be non-empty and
//! unique, since the name is both the key and the remote URL suffix.

use crate::error::{Error, Result};
use crate::remote::HostFlavor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One sibling repository to materialize next to the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyEntry {
    /// Repository name, appended to the remote root to form its URL.
    pub name: String,
    /// Checkout location relative to the table's anchor directory.
    #[serde(rename = "path")]
    pub local_path: String,
    /// Commit or branch to check out.
    #[serde(rename = "revision", default, skip_serializing_if = "Option::is_none")]
    pub pinned_revision: Option<String>,
    /// Pin used instead of `revision` when fetching from an internal server.
    #[serde(
        rename = "internal-revision",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub internal_revision: Option<String>,
}

impl DependencyEntry {
    pub fn new(name: impl Into<String>, local_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local_path: local_path.into(),
            pinned_revision: None,
            internal_revision: None,
        }
    }

    pub fn pinned(mut self, revision: impl Into<String>) -> Self {
        self.pinned_revision = Some(revision.into());
        self
    }

    pub fn pinned_internal(mut self, revision: impl Into<String>) -> Self {
        self.internal_revision = Some(revision.into());
        self
    }

    /// The pin that applies on a host of the given flavor, if any.
    pub fn pin_for(&self, flavor: HostFlavor) -> Option<&str> {
        match flavor {
            HostFlavor::Public => self.pinned_revision.as_deref(),
            HostFlavor::Internal => self
                .internal_revision
                .as_deref()
                .or(self.pinned_revision.as_deref()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    dependencies: Vec<DependencyEntry>,
}

/// The dependency table compiled into the binary.
pub fn builtin_table() -> Vec<DependencyEntry> {
    vec![
        DependencyEntry::new("common-lib-amd-ADL.git", "../../Common/Lib/AMD/ADL")
            .pinned("master")
            .pinned_internal("master"),
        DependencyEntry::new("QtCommon", "../../QtCommon")
            .pinned("98855c857a8af01ebc2501ffd3a1747aac279db2")
            .pinned_internal("5b8f9d6dab2d2bc667b092dc4f0e949861920dcf"),
    ]
}

/// Parse a YAML manifest into a validated table.
pub fn parse(yaml: &str) -> Result<Vec<DependencyEntry>> {
    let manifest: Manifest = serde_yaml::from_str(yaml)?;
    validate(&manifest.dependencies)?;
    Ok(manifest.dependencies)
}

/// Read and parse a YAML manifest from disk.
pub fn from_file(path: &Path) -> Result<Vec<DependencyEntry>> {
    if !path.is_file() {
        return Err(Error::MissingPath {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Check the table invariants.
pub fn validate(entries: &[DependencyEntry]) -> Result<()> {
    let mut seen = HashSet::new();

    for entry in entries {
        if entry.name.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "dependency with an empty name".to_string(),
                hint: Some("Set 'name:' to the repository name on the server".to_string()),
            });
        }
        if entry.local_path.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: format!("dependency '{}' has an empty path", entry.name),
                hint: Some("Set 'path:' relative to the manifest directory".to_string()),
            });
        }
        if !seen.insert(entry.name.as_str()) {
            return Err(Error::ConfigParse {
                message: format!("duplicate dependency '{}'", entry.name),
                hint: Some("Each repository name may appear only once".to_string()),
            });
        }
    }

    Ok(())
}
