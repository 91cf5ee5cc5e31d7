//! Resource domain types
//!
//! A resource is identified by its canonical path in the content store. Two
//! resources with the same canonical path are the same resource, whatever
//! backing location the store handed out for them.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Canonical, `/`-rooted path of a node in the content store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// Canonicalize a raw path
    ///
    /// Repeated separators and `.` segments are dropped, `..` pops a segment
    /// (never above the root) and the result always starts with `/`.
    pub fn new(raw: &str) -> Self {
        let unified = raw.replace('\\', "/");
        let mut segments: Vec<&str> = Vec::new();

        for segment in unified.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }

        Self(format!("/{}", segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path without the leading `/`, empty for the root
    pub fn relative(&self) -> &str {
        &self.0[1..]
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Resolve `relative` below this path
    pub fn join(&self, relative: &str) -> Self {
        Self::new(&format!("{}/{}", self.0, relative))
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle on a node in the content store
///
/// `location` is whatever the store needs to read the node's data back;
/// for the filesystem store it is the node's file or directory.
#[derive(Debug, Clone)]
pub struct Resource {
    path: ResourcePath,
    location: PathBuf,
}

impl Resource {
    pub fn new(path: ResourcePath, location: impl Into<PathBuf>) -> Self {
        Self {
            path,
            location: location.into(),
        }
    }

    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    pub fn location(&self) -> &Path {
        &self.location
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// Deduplicated set of resources, ordered by path
#[derive(Debug, Clone, Default)]
pub struct ResourceSet {
    resources: BTreeMap<ResourcePath, Resource>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource, returning `false` if its path was already present.
    /// The first resource inserted for a path is kept.
    pub fn insert(&mut self, resource: Resource) -> bool {
        if self.contains(resource.path()) {
            return false;
        }
        self.resources.insert(resource.path().clone(), resource);
        true
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn contains(&self, path: &ResourcePath) -> bool {
        self.resources.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }
}

impl FromIterator<Resource> for ResourceSet {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut set = Self::new();
        for resource in iter {
            set.insert(resource);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ResourceSet {
    type Item = &'a Resource;
    type IntoIter = std::collections::btree_map::Values<'a, ResourcePath, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.values()
    }
}
