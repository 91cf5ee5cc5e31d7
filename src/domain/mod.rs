//! Domain models for querypack
//!
//! This module contains pure domain objects representing core business entities.
//! These types carry no knowledge of the content store or archive format and
//! hold the invariants the engine relies on.

pub mod package;
pub mod query;
pub mod resource;

pub use package::{
    AclHandling, BuiltPackage, ConflictResolution, FilterEntry, PackageIdentity,
    PackageProperties,
};
pub use query::QuerySpec;
pub use resource::{Resource, ResourcePath, ResourceSet};
