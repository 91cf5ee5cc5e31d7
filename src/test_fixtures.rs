//! Test fixtures and utilities for reducing test setup duplication.
//!
//! Provides scratch content trees on disk plus in-memory collaborators for
//! exercising the engine without a filesystem store or real archives:
//!
//! ```ignore
//! use crate::test_fixtures::{MemoryStore, RecordingArchiveBuilder};
//!
//! let store = MemoryStore::new(&["/a", "/a/meta"]).with_matches(&["/a", "/a"]);
//! let archive = RecordingArchiveBuilder::new();
//! ```

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::TempDir;

use crate::domain::{PackageIdentity, PackageProperties, Resource, ResourcePath, ResourceSet};
use crate::error::{Result, package::thumbnail_failed, query::failed};
use crate::package::archive::{ArchiveBuilder, ArchiveHandle};
use crate::store::{ContentStore, QueryExecutor, ResourceResolver};

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Create files (and their parent directories) below `root`
///
/// Each file's content is its own relative path.
///
/// # Panics
///
/// Panics if a file cannot be written.
pub fn create_content_tree(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, file).expect("Failed to write file");
    }
}

/// In-memory content store
///
/// Every query returns the configured matches regardless of statement, or
/// fails when configured to.
pub struct MemoryStore {
    nodes: BTreeSet<ResourcePath>,
    matches: Vec<ResourcePath>,
    failure: Option<String>,
    opened: Cell<usize>,
    released: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new(nodes: &[&str]) -> Self {
        Self {
            nodes: nodes.iter().map(|n| ResourcePath::new(n)).collect(),
            matches: Vec::new(),
            failure: None,
            opened: Cell::new(0),
            released: Rc::new(Cell::new(0)),
        }
    }

    #[must_use]
    pub fn with_matches(mut self, matches: &[&str]) -> Self {
        self.matches = matches.iter().map(|m| ResourcePath::new(m)).collect();
        self
    }

    #[must_use]
    pub fn failing(mut self, reason: &str) -> Self {
        self.failure = Some(reason.to_string());
        self
    }

    pub fn sessions_opened(&self) -> usize {
        self.opened.get()
    }

    pub fn sessions_released(&self) -> usize {
        self.released.get()
    }

    /// A session without going through the open/release counters
    pub fn session(&self) -> MemorySession {
        MemorySession {
            nodes: self.nodes.clone(),
            matches: self.matches.clone(),
            failure: self.failure.clone(),
            released: Rc::new(Cell::new(0)),
        }
    }
}

impl ContentStore for MemoryStore {
    type Session = MemorySession;

    fn open_session(&self) -> Result<MemorySession> {
        self.opened.set(self.opened.get() + 1);
        Ok(MemorySession {
            nodes: self.nodes.clone(),
            matches: self.matches.clone(),
            failure: self.failure.clone(),
            released: Rc::clone(&self.released),
        })
    }
}

pub struct MemorySession {
    nodes: BTreeSet<ResourcePath>,
    matches: Vec<ResourcePath>,
    failure: Option<String>,
    released: Rc<Cell<usize>>,
}

impl QueryExecutor for MemorySession {
    fn execute(&self, language: &str, _statement: &str) -> Result<Vec<ResourcePath>> {
        match &self.failure {
            Some(reason) => Err(failed(language, reason)),
            None => Ok(self.matches.clone()),
        }
    }
}

impl ResourceResolver for MemorySession {
    fn resolve(&self, path: &ResourcePath) -> Option<Resource> {
        self.nodes
            .contains(path)
            .then(|| Resource::new(path.clone(), PathBuf::from(format!("/memory{path}"))))
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

/// Archive builder that records calls instead of writing archives
#[derive(Default)]
pub struct RecordingArchiveBuilder {
    pub builds: RefCell<Vec<(Vec<ResourcePath>, PackageIdentity, PackageProperties)>>,
    pub thumbnails: RefCell<Vec<ResourcePath>>,
    fail_thumbnail: bool,
}

impl RecordingArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder whose thumbnail attachment always fails
    pub fn failing_thumbnail() -> Self {
        Self {
            fail_thumbnail: true,
            ..Self::default()
        }
    }

    pub fn build_count(&self) -> usize {
        self.builds.borrow().len()
    }
}

impl ArchiveBuilder for RecordingArchiveBuilder {
    fn build(
        &self,
        resources: &ResourceSet,
        identity: &PackageIdentity,
        properties: &PackageProperties,
    ) -> Result<ArchiveHandle> {
        self.builds
            .borrow_mut()
            .push((
                resources.iter().map(|r| r.path().clone()).collect(),
                identity.clone(),
                properties.clone(),
            ));

        Ok(ArchiveHandle {
            identity: identity.clone(),
            location: PathBuf::from(format!(
                "/packages/{}/{}-{}.tar.gz",
                identity.group, identity.name, identity.version
            )),
            checksum: "blake3:recorded".to_string(),
        })
    }

    fn attach_thumbnail(&self, _handle: &mut ArchiveHandle, thumbnail: &Resource) -> Result<()> {
        if self.fail_thumbnail {
            return Err(thumbnail_failed("thumbnail rejected"));
        }
        self.thumbnails.borrow_mut().push(thumbnail.path().clone());
        Ok(())
    }
}
