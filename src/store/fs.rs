//! Filesystem-backed content store
//!
//! A directory tree is the hierarchical store: every file and directory below
//! the root is a node, addressed by its `/`-rooted path relative to the root.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ContentStore, QueryExecutor, ResourceResolver, query};
use crate::domain::{Resource, ResourcePath};
use crate::error::{Result, query::store_unavailable};

/// Content store rooted at a directory
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentStore for FsContentStore {
    type Session = FsSession;

    fn open_session(&self) -> Result<FsSession> {
        if !self.root.is_dir() {
            return Err(store_unavailable(&self.root, "not a directory"));
        }
        let root = dunce::canonicalize(&self.root).map_err(|e| store_unavailable(&self.root, e))?;

        debug!(root = %root.display(), "Opened content store session");
        Ok(FsSession { root })
    }
}

/// Session over a filesystem content store
///
/// Holds the canonical root for the lifetime of one request.
#[derive(Debug)]
pub struct FsSession {
    root: PathBuf,
}

impl FsSession {
    fn location_of(&self, path: &ResourcePath) -> PathBuf {
        if path.is_root() {
            self.root.clone()
        } else {
            self.root.join(path.relative())
        }
    }
}

impl FsSession {
    /// The node itself may be a link, the directories leading to it may not leave the root
    fn parent_within_root(&self, location: &Path) -> bool {
        location
            .parent()
            .and_then(|parent| dunce::canonicalize(parent).ok())
            .is_some_and(|parent| parent.starts_with(&self.root))
    }
}

impl QueryExecutor for FsSession {
    fn execute(&self, language: &str, statement: &str) -> Result<Vec<ResourcePath>> {
        query::execute(&self.root, language, statement)
    }
}

impl ResourceResolver for FsSession {
    fn resolve(&self, path: &ResourcePath) -> Option<Resource> {
        let location = self.location_of(path);
        location.symlink_metadata().ok()?;

        if !path.is_root() && !self.parent_within_root(&location) {
            debug!(%path, "Skipping node reached through a link out of the store");
            return None;
        }
        Some(Resource::new(path.clone(), location))
    }
}

impl Drop for FsSession {
    fn drop(&mut self) {
        debug!(root = %self.root.display(), "Released content store session");
    }
}
