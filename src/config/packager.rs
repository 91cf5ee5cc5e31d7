//! Packager configuration (querypack.yaml) data structures
//!
//! Every key is optional; unset keys fall back to the package defaults when
//! the configuration is turned into a [`PackageRequest`].
//!
//! ```yaml
//! queryLanguage: glob
//! query: content/site/*
//! relPath: meta
//! packageName: site-meta
//! packageGroupName: exports
//! packageVersion: 2.0.0
//! packageDescription: Metadata of every site
//! packageACLHandling: MERGE_PRESERVE
//! conflictResolution: IncrementVersion
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::query::DEFAULT_QUERY_LANGUAGE;
use crate::domain::{
    AclHandling, ConflictResolution, PackageIdentity, PackageProperties, QuerySpec,
};
use crate::error::{QueryPackError, Result, config};
use crate::operations::PackageRequest;

/// File looked up in the working directory when no configuration is named
pub const DEFAULT_CONFIG_FILE: &str = "querypack.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_group_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_description: Option<String>,

    #[serde(
        rename = "packageACLHandling",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub package_acl_handling: Option<AclHandling>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_resolution: Option<ConflictResolution>,
}

impl PackagerConfig {
    /// Parse packager configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration from `path`, which must exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(config::not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;

        Self::from_yaml(&content).map_err(|e| match e {
            QueryPackError::ConfigParseFailed { reason, .. } => {
                config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Load the named configuration, or the default file in `dir`
    ///
    /// Only a missing *default* file is tolerated; it yields an empty
    /// configuration.
    pub fn load_or_default(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let path: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            debug!(path = %path.display(), "Loading packager configuration");
            Self::load(&path)
        } else {
            warn!(
                path = %path.display(),
                "No packager configuration found, using defaults"
            );
            Ok(Self::default())
        }
    }

    /// Overlay every key set in `overrides` onto this configuration
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            query_language: overrides.query_language.or(self.query_language),
            query: overrides.query.or(self.query),
            rel_path: overrides.rel_path.or(self.rel_path),
            package_name: overrides.package_name.or(self.package_name),
            package_group_name: overrides.package_group_name.or(self.package_group_name),
            package_version: overrides.package_version.or(self.package_version),
            package_description: overrides.package_description.or(self.package_description),
            package_acl_handling: overrides.package_acl_handling.or(self.package_acl_handling),
            conflict_resolution: overrides.conflict_resolution.or(self.conflict_resolution),
        }
    }

    /// Resolve defaults and build the request the engine runs
    pub fn into_request(self, preview: bool) -> PackageRequest {
        let defaults = PackageIdentity::default();
        let default_properties = PackageProperties::default();

        let mut query = QuerySpec::new(self.query.unwrap_or_default()).with_language(
            self.query_language
                .unwrap_or_else(|| DEFAULT_QUERY_LANGUAGE.to_string()),
        );
        if let Some(rel_path) = self.rel_path {
            query = query.with_relative_path(rel_path);
        }

        PackageRequest {
            query,
            preview,
            identity: PackageIdentity::new(
                self.package_name.unwrap_or(defaults.name),
                self.package_group_name.unwrap_or(defaults.group),
                self.package_version.unwrap_or(defaults.version),
            ),
            properties: PackageProperties {
                acl_handling: self
                    .package_acl_handling
                    .unwrap_or(default_properties.acl_handling),
                description: self
                    .package_description
                    .unwrap_or(default_properties.description),
                conflict_resolution: self
                    .conflict_resolution
                    .unwrap_or(default_properties.conflict_resolution),
            },
        }
    }
}
