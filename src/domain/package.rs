//! Package domain types
//!
//! Identity, policy properties and the result of a successful build.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::resource::ResourcePath;
use crate::error::{Result, package::invalid_identity};

pub const DEFAULT_PACKAGE_NAME: &str = "query";
pub const DEFAULT_PACKAGE_GROUP: &str = "Query";
pub const DEFAULT_PACKAGE_VERSION: &str = "1.0.0";
pub const DEFAULT_PACKAGE_DESCRIPTION: &str =
    "Query package initially defined by a querypack packager configuration.";

/// Name, group and version of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageIdentity {
    pub name: String,
    pub group: String,
    pub version: String,
}

impl Default for PackageIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_PACKAGE_NAME.to_string(),
            group: DEFAULT_PACKAGE_GROUP.to_string(),
            version: DEFAULT_PACKAGE_VERSION.to_string(),
        }
    }
}

impl PackageIdentity {
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            version: version.into(),
        }
    }

    /// Same identity stamped with another version
    #[must_use]
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..self.clone()
        }
    }

    /// Name and version end up in archive file names, the group in the
    /// package store's directory layout.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("group", &self.group),
            ("version", &self.version),
        ] {
            if value.trim().is_empty() {
                return Err(invalid_identity(format!("package {field} cannot be empty")));
            }
        }

        for (field, value) in [("name", &self.name), ("version", &self.version)] {
            if value.contains(['/', '\\']) {
                return Err(invalid_identity(format!(
                    "package {field} '{value}' cannot contain path separators"
                )));
            }
        }

        // The group is joined onto the package directory and must stay below it
        if self.group.starts_with(['/', '\\']) || self.group.contains(':') {
            return Err(invalid_identity(format!(
                "package group '{}' must be a relative path",
                self.group
            )));
        }
        if self
            .group
            .split(['/', '\\'])
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(invalid_identity(format!(
                "package group '{}' cannot contain empty, '.' or '..' segments",
                self.group
            )));
        }

        Ok(())
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}-{}", self.group, self.name, self.version)
    }
}

/// How access-control entries of packaged nodes are applied on install
///
/// Only recorded in the package definition, never interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AclHandling {
    #[serde(alias = "Ignore", alias = "ignore")]
    Ignore,
    #[default]
    #[serde(alias = "Overwrite", alias = "overwrite")]
    Overwrite,
    #[serde(alias = "Merge", alias = "merge")]
    Merge,
    #[serde(alias = "MergePreserve", alias = "merge_preserve")]
    MergePreserve,
    #[serde(alias = "Clear", alias = "clear")]
    Clear,
}

impl AclHandling {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "IGNORE",
            Self::Overwrite => "OVERWRITE",
            Self::Merge => "MERGE",
            Self::MergePreserve => "MERGE_PRESERVE",
            Self::Clear => "CLEAR",
        }
    }
}

impl fmt::Display for AclHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AclHandling {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "ignore" => Ok(Self::Ignore),
            "overwrite" => Ok(Self::Overwrite),
            "merge" => Ok(Self::Merge),
            "mergepreserve" => Ok(Self::MergePreserve),
            "clear" => Ok(Self::Clear),
            _ => Err(format!(
                "unknown ACL handling '{s}' (expected IGNORE, OVERWRITE, MERGE, MERGE_PRESERVE or CLEAR)"
            )),
        }
    }
}

/// What to do when a package with the same group and name already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConflictResolution {
    /// Refuse to build over an existing package
    #[serde(alias = "none")]
    None,
    #[serde(alias = "replace")]
    Replace,
    #[default]
    #[serde(alias = "increment_version")]
    IncrementVersion,
}

impl fmt::Display for ConflictResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "None",
            Self::Replace => "Replace",
            Self::IncrementVersion => "IncrementVersion",
        })
    }
}

impl FromStr for ConflictResolution {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "none" => Ok(Self::None),
            "replace" => Ok(Self::Replace),
            "incrementversion" => Ok(Self::IncrementVersion),
            _ => Err(format!(
                "unknown conflict resolution '{s}' (expected None, Replace or IncrementVersion)"
            )),
        }
    }
}

fn normalize_variant(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect::<String>()
        .to_lowercase()
}

/// Policy properties stamped onto a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageProperties {
    #[serde(rename = "acHandling")]
    pub acl_handling: AclHandling,
    pub description: String,
    pub conflict_resolution: ConflictResolution,
}

impl Default for PackageProperties {
    fn default() -> Self {
        Self {
            acl_handling: AclHandling::default(),
            description: DEFAULT_PACKAGE_DESCRIPTION.to_string(),
            conflict_resolution: ConflictResolution::default(),
        }
    }
}

/// One filter root of a package: a node path and how it is imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterEntry {
    pub root_path: String,
    pub import_mode: String,
}

impl FilterEntry {
    pub fn replace(path: &ResourcePath) -> Self {
        Self {
            root_path: path.to_string(),
            import_mode: "replace".to_string(),
        }
    }
}

/// A package that was built and persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltPackage {
    #[serde(flatten)]
    pub identity: PackageIdentity,
    #[serde(flatten)]
    pub properties: PackageProperties,
    pub path: PathBuf,
    pub checksum: String,
    pub filter_sets: Vec<FilterEntry>,
    pub thumbnail_attached: bool,
}
