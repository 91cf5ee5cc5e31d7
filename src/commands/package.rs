//! Package command implementation
//!
//! Plays the transport role: turns configuration and flags into one
//! [`PackageRequest`], runs it and prints the single resulting outcome.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{debug, error};

use crate::cli::PackageArgs;
use crate::config::PackagerConfig;
use crate::error::{Result, config};
use crate::operations::{Outcome, PackageOperation, PackageRequest};
use crate::package::TarArchiveBuilder;
use crate::store::FsContentStore;
use crate::ui;

pub fn run(args: PackageArgs) -> Result<ExitCode> {
    let current_dir = std::env::current_dir()?;

    let outcome = match prepare(&args, &current_dir) {
        Ok((request, store_root, packages_dir)) => {
            debug!(
                store = %store_root.display(),
                packages = %packages_dir.display(),
                preview = request.preview,
                "Handling package request"
            );
            let store = FsContentStore::new(store_root);
            let archive = TarArchiveBuilder::new(packages_dir);
            PackageOperation::new(&store, &archive).handle(&request)
        }
        Err(e) => {
            error!(error = %e, "Invalid package request");
            Outcome::from(e)
        }
    };

    if args.json {
        println!("{}", ui::render_json(&outcome)?);
    } else if outcome.is_error() {
        eprint!("{}", ui::display::format_outcome(&outcome));
    } else {
        print!("{}", ui::display::format_outcome(&outcome));
    }

    Ok(if outcome.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Resolve configuration, flags and locations into a request
fn prepare(args: &PackageArgs, current_dir: &Path) -> Result<(PackageRequest, PathBuf, PathBuf)> {
    let request = PackagerConfig::load_or_default(args.config.as_deref(), current_dir)?
        .merge(args.overrides()?)
        .into_request(args.preview);

    let store_root = args
        .store
        .clone()
        .unwrap_or_else(|| current_dir.to_path_buf());
    let packages_dir = match &args.packages {
        Some(dir) => dir.clone(),
        None => default_packages_dir()?,
    };

    Ok((request, store_root, packages_dir))
}

/// `<data-local-dir>/querypack/packages`
fn default_packages_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join("querypack").join("packages"))
        .ok_or_else(|| {
            config::invalid("cannot determine a data directory, pass --packages instead")
        })
}
