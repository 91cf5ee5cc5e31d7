//! Package assembly
//!
//! Turns a resolved resource set into a persisted package through an
//! [`ArchiveBuilder`], then attaches the packager thumbnail if the content
//! store has one.

use tracing::{debug, info, warn};

use super::archive::{ArchiveBuilder, ArchiveHandle};
use crate::domain::{
    BuiltPackage, FilterEntry, PackageIdentity, PackageProperties, ResourcePath, ResourceSet,
};
use crate::error::{QueryPackError, Result};
use crate::store::ResourceResolver;

/// Well-known content store path of the package thumbnail
pub const THUMBNAIL_PATH: &str = "/apps/querypack/packager/definition/package-thumbnail.png";

pub struct PackageAssembler<'a, B: ArchiveBuilder + ?Sized> {
    archive: &'a B,
}

impl<'a, B: ArchiveBuilder + ?Sized> PackageAssembler<'a, B> {
    pub fn new(archive: &'a B) -> Self {
        Self { archive }
    }

    /// Build a package holding exactly `resources`
    ///
    /// Empty sets are refused without touching the archive builder; empty
    /// packages only clutter the package store.
    pub fn build<R: ResourceResolver + ?Sized>(
        &self,
        resolver: &R,
        resources: &ResourceSet,
        identity: &PackageIdentity,
        properties: &PackageProperties,
    ) -> Result<BuiltPackage> {
        if resources.is_empty() {
            return Err(QueryPackError::EmptyPackageRefused);
        }

        let mut handle = self.archive.build(resources, identity, properties)?;
        let thumbnail_attached = self.attach_thumbnail(resolver, &mut handle);

        info!(
            package = %handle.identity,
            resources = resources.len(),
            path = %handle.location.display(),
            "Successfully created package"
        );

        Ok(BuiltPackage {
            identity: handle.identity,
            properties: properties.clone(),
            path: handle.location,
            checksum: handle.checksum,
            filter_sets: resources
                .iter()
                .map(|r| FilterEntry::replace(r.path()))
                .collect(),
            thumbnail_attached,
        })
    }

    /// Best effort: a missing or unattachable thumbnail never fails the build
    fn attach_thumbnail<R: ResourceResolver + ?Sized>(
        &self,
        resolver: &R,
        handle: &mut ArchiveHandle,
    ) -> bool {
        let Some(thumbnail) = resolver.resolve(&ResourcePath::new(THUMBNAIL_PATH)) else {
            debug!(path = THUMBNAIL_PATH, "No package thumbnail in content store");
            return false;
        };

        match self.archive.attach_thumbnail(handle, &thumbnail) {
            Ok(()) => true,
            Err(e) => {
                warn!(package = %handle.identity, error = %e, "Skipping package thumbnail");
                false
            }
        }
    }
}
