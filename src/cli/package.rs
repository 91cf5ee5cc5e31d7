use clap::Parser;
use std::path::PathBuf;

use crate::config::PackagerConfig;
use crate::domain::{AclHandling, ConflictResolution};
use crate::error::{Result, config};

/// Arguments for the package command
#[derive(Parser, Debug, Default)]
#[command(after_help = "EXAMPLES:\n  \
                  Build from ./querypack.yaml:\n    querypack package\n\n\
                  Preview without building:\n    querypack package --preview\n\n\
                  Package the meta child of every site:\n    querypack package --query 'content/site/*' --rel-path meta\n\n\
                  Package an explicit list of paths:\n    querypack package --language list --query '/content/a'\n\n\
                  Machine-readable result:\n    querypack package --json")]
pub struct PackageArgs {
    /// Packager configuration file (defaults to ./querypack.yaml if present)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Content store root (defaults to current directory)
    #[arg(long, short = 's', env = "QUERYPACK_STORE")]
    pub store: Option<PathBuf>,

    /// Directory packages are written to
    #[arg(long, short = 'p', env = "QUERYPACK_PACKAGES")]
    pub packages: Option<PathBuf>,

    /// List what would be packaged without building anything
    #[arg(long)]
    pub preview: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Query statement
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Query language (glob, list)
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Package this child of every match instead of the match itself
    #[arg(long)]
    pub rel_path: Option<String>,

    /// Package name
    #[arg(long)]
    pub name: Option<String>,

    /// Package group
    #[arg(long)]
    pub group: Option<String>,

    /// Package version
    #[arg(long = "pkg-version")]
    pub pkg_version: Option<String>,

    /// Package description
    #[arg(long)]
    pub description: Option<String>,

    /// ACL handling recorded in the package (IGNORE, OVERWRITE, MERGE, MERGE_PRESERVE, CLEAR)
    #[arg(long)]
    pub acl_handling: Option<String>,

    /// What to do when the package already exists (None, Replace, IncrementVersion)
    #[arg(long)]
    pub conflict_resolution: Option<String>,
}

impl PackageArgs {
    /// Configuration keys set on the command line
    pub fn overrides(&self) -> Result<PackagerConfig> {
        let package_acl_handling = self
            .acl_handling
            .as_deref()
            .map(str::parse::<AclHandling>)
            .transpose()
            .map_err(config::invalid)?;
        let conflict_resolution = self
            .conflict_resolution
            .as_deref()
            .map(str::parse::<ConflictResolution>)
            .transpose()
            .map_err(config::invalid)?;

        Ok(PackagerConfig {
            query_language: self.language.clone(),
            query: self.query.clone(),
            rel_path: self.rel_path.clone(),
            package_name: self.name.clone(),
            package_group_name: self.group.clone(),
            package_version: self.pkg_version.clone(),
            package_description: self.description.clone(),
            package_acl_handling,
            conflict_resolution,
        })
    }
}
