//! Content store collaborators
//!
//! The packaging engine never touches storage directly. It talks to a
//! [`Session`] opened from a [`ContentStore`] for the duration of one request:
//! - [`QueryExecutor`]: runs a query and yields matched node paths
//! - [`ResourceResolver`]: turns paths into resources, with child lookup
//!
//! Sessions are released when dropped, so every exit path of a request
//! gives its session back.

pub mod fs;
pub mod query;

pub use fs::FsContentStore;

use crate::domain::{Resource, ResourcePath};
use crate::error::Result;

/// Executes queries against the content store
pub trait QueryExecutor {
    /// Run `statement` in `language`, returning the matched node paths in
    /// store order. Paths may repeat and may no longer resolve.
    fn execute(&self, language: &str, statement: &str) -> Result<Vec<ResourcePath>>;
}

/// Resolves node paths to resources
pub trait ResourceResolver {
    fn resolve(&self, path: &ResourcePath) -> Option<Resource>;

    /// Look up the node at `relative` below `resource`
    fn child_of(&self, resource: &Resource, relative: &str) -> Option<Resource> {
        self.resolve(&resource.path().join(relative))
    }
}

/// A request-scoped view of the content store
pub trait Session: QueryExecutor + ResourceResolver {}

impl<T: QueryExecutor + ResourceResolver> Session for T {}

/// Source of sessions
pub trait ContentStore {
    type Session: Session;

    fn open_session(&self) -> Result<Self::Session>;
}
