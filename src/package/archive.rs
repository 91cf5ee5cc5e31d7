//! Package archives
//!
//! [`ArchiveBuilder`] is the collaborator the assembler hands a resolved
//! resource set to. [`TarArchiveBuilder`] is the implementation shipped with
//! querypack: gzip-compressed tarballs in a package store directory laid out
//! as `<packages>/<group>/<name>-<version>.tar.gz`.
//!
//! Archive layout:
//! - `META-INF/querypack/definition.json`: identity, properties and filters
//! - `META-INF/querypack/thumbnail.png`: optional thumbnail
//! - `jcr_root/<node path>`: packaged content, directories recursively
//!
//! Archives are written to a temporary file next to their final location and
//! renamed into place, so a failed build never leaves a partial package.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::version;
use crate::domain::{
    ConflictResolution, FilterEntry, PackageIdentity, PackageProperties, Resource, ResourceSet,
};
use crate::error::{
    QueryPackError, Result,
    fs::not_found,
    package::{archive_failed, invalid_archive, thumbnail_failed},
};
use crate::hash::hash_file;

pub const ARCHIVE_EXTENSION: &str = ".tar.gz";
pub const DEFINITION_ENTRY: &str = "META-INF/querypack/definition.json";
pub const THUMBNAIL_ENTRY: &str = "META-INF/querypack/thumbnail.png";
pub const CONTENT_ROOT: &str = "jcr_root";

/// Handle on a persisted archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveHandle {
    /// Identity actually stamped, after conflict resolution
    pub identity: PackageIdentity,
    pub location: PathBuf,
    pub checksum: String,
}

/// Builds and persists package archives
pub trait ArchiveBuilder {
    /// Build an archive holding exactly `resources`
    ///
    /// `properties.conflict_resolution` decides what happens when a package
    /// with the same group and name already exists.
    fn build(
        &self,
        resources: &ResourceSet,
        identity: &PackageIdentity,
        properties: &PackageProperties,
    ) -> Result<ArchiveHandle>;

    /// Add `thumbnail` to an archive returned by [`ArchiveBuilder::build`]
    fn attach_thumbnail(&self, handle: &mut ArchiveHandle, thumbnail: &Resource) -> Result<()>;
}

/// Package definition stored inside every archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDefinition {
    #[serde(flatten)]
    pub identity: PackageIdentity,
    #[serde(flatten)]
    pub properties: PackageProperties,
    pub filters: Vec<FilterEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl PackageDefinition {
    pub fn new(
        identity: PackageIdentity,
        properties: PackageProperties,
        resources: &ResourceSet,
    ) -> Self {
        Self {
            identity,
            properties,
            filters: resources
                .iter()
                .map(|r| FilterEntry::replace(r.path()))
                .collect(),
            thumbnail: None,
        }
    }
}

/// Definition and entry names of an archive on disk
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub definition: PackageDefinition,
    pub entries: Vec<String>,
}

/// File name of the archive for `identity`
pub fn archive_file_name(identity: &PackageIdentity) -> String {
    format!("{}-{}{}", identity.name, identity.version, ARCHIVE_EXTENSION)
}

/// Archive builder writing gzip tarballs into a package store directory
#[derive(Debug, Clone)]
pub struct TarArchiveBuilder {
    packages_dir: PathBuf,
}

impl TarArchiveBuilder {
    pub fn new(packages_dir: impl Into<PathBuf>) -> Self {
        Self {
            packages_dir: packages_dir.into(),
        }
    }

    fn group_dir(&self, group: &str) -> PathBuf {
        self.packages_dir.join(group)
    }

    /// Pick the identity to stamp given what already exists in `group_dir`
    fn resolve_conflict(
        &self,
        group_dir: &Path,
        identity: &PackageIdentity,
        mode: ConflictResolution,
    ) -> Result<PackageIdentity> {
        let target = group_dir.join(archive_file_name(identity));
        if !target.exists() {
            return Ok(identity.clone());
        }

        match mode {
            ConflictResolution::None => Err(QueryPackError::PackageExists {
                group: identity.group.clone(),
                name: identity.name.clone(),
                version: identity.version.clone(),
            }),
            ConflictResolution::Replace => {
                debug!(package = %identity, "Replacing existing package");
                Ok(identity.clone())
            }
            ConflictResolution::IncrementVersion => {
                let existing = existing_versions(group_dir, &identity.name)?;
                let next = version::next_version(&identity.version, &existing);
                info!(
                    package = %identity,
                    version = %next,
                    "Package exists, incrementing version"
                );
                Ok(identity.with_version(next))
            }
        }
    }
}

impl ArchiveBuilder for TarArchiveBuilder {
    fn build(
        &self,
        resources: &ResourceSet,
        identity: &PackageIdentity,
        properties: &PackageProperties,
    ) -> Result<ArchiveHandle> {
        identity.validate()?;

        let group_dir = self.group_dir(&identity.group);
        fs::create_dir_all(&group_dir).map_err(|e| archive_failed(&group_dir, e))?;

        let identity =
            self.resolve_conflict(&group_dir, identity, properties.conflict_resolution)?;
        let target = group_dir.join(archive_file_name(&identity));
        let definition = PackageDefinition::new(identity.clone(), properties.clone(), resources);

        let staged = NamedTempFile::new_in(&group_dir).map_err(|e| archive_failed(&target, e))?;
        write_archive(staged.as_file(), &definition, resources)
            .map_err(|e| archive_failed(&target, e))?;

        if properties.conflict_resolution == ConflictResolution::None {
            staged.persist_noclobber(&target).map_err(|e| {
                if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                    QueryPackError::PackageExists {
                        group: identity.group.clone(),
                        name: identity.name.clone(),
                        version: identity.version.clone(),
                    }
                } else {
                    archive_failed(&target, e.error)
                }
            })?;
        } else {
            staged
                .persist(&target)
                .map_err(|e| archive_failed(&target, e.error))?;
        }

        let checksum = hash_file(&target)?;
        debug!(path = %target.display(), %checksum, "Wrote package archive");

        Ok(ArchiveHandle {
            identity,
            location: target,
            checksum,
        })
    }

    fn attach_thumbnail(&self, handle: &mut ArchiveHandle, thumbnail: &Resource) -> Result<()> {
        let is_regular_file = fs::symlink_metadata(thumbnail.location())
            .map(|meta| meta.file_type().is_file())
            .unwrap_or(false);
        if !is_regular_file {
            return Err(thumbnail_failed(format!(
                "{} is not a file",
                thumbnail.path()
            )));
        }

        let mut definition = read_definition(&handle.location).map_err(thumbnail_failed)?;
        definition.thumbnail = Some(THUMBNAIL_ENTRY.to_string());

        let dir = handle
            .location
            .parent()
            .ok_or_else(|| thumbnail_failed("archive has no parent directory"))?;
        let staged = NamedTempFile::new_in(dir).map_err(thumbnail_failed)?;

        rewrite_with_thumbnail(
            &handle.location,
            staged.as_file(),
            &definition,
            thumbnail.location(),
        )
        .map_err(thumbnail_failed)?;

        let checksum = hash_file(staged.path()).map_err(thumbnail_failed)?;
        staged
            .persist(&handle.location)
            .map_err(|e| thumbnail_failed(e.error))?;
        handle.checksum = checksum;

        Ok(())
    }
}

/// Versions of `name` already present in `group_dir`
fn existing_versions(group_dir: &Path, name: &str) -> Result<Vec<String>> {
    let prefix = format!("{name}-");
    let entries = fs::read_dir(group_dir).map_err(|e| archive_failed(group_dir, e))?;

    let mut versions = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| archive_failed(group_dir, e))?;
        let file_name = entry.file_name().to_string_lossy().to_string();

        let Some(version) = file_name
            .strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(ARCHIVE_EXTENSION))
        else {
            continue;
        };

        // "query-extra-1.0.0" belongs to package "query-extra", not "query"
        if version.starts_with(|c: char| c.is_ascii_digit()) {
            versions.push(version.to_string());
        }
    }

    Ok(versions)
}

fn write_archive<W: Write>(
    writer: W,
    definition: &PackageDefinition,
    resources: &ResourceSet,
) -> Result<()> {
    let encoder = GzEncoder::new(writer, Compression::default());
    let mut archive = tar::Builder::new(encoder);
    // Links are stored as links, their targets may live outside the store
    archive.follow_symlinks(false);

    append_definition(&mut archive, definition)?;

    for resource in resources {
        append_resource(&mut archive, resource)?;
    }

    let encoder = archive.into_inner()?;
    encoder.finish()?;
    Ok(())
}

fn append_definition<W: Write>(
    archive: &mut tar::Builder<W>,
    definition: &PackageDefinition,
) -> Result<()> {
    let content = serde_json::to_vec_pretty(definition)?;

    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Regular);
    header.set_mode(0o644);
    header.set_size(content.len() as u64);
    header.set_cksum();
    archive.append_data(&mut header, DEFINITION_ENTRY, content.as_slice())?;
    Ok(())
}

fn append_resource<W: Write>(archive: &mut tar::Builder<W>, resource: &Resource) -> Result<()> {
    let base = format!("{}{}", CONTENT_ROOT, resource.path());
    let location = resource.location();

    let metadata = fs::symlink_metadata(location).map_err(|e| archive_failed(location, e))?;
    if !metadata.is_dir() {
        archive.append_path_with_name(location, &base)?;
        return Ok(());
    }

    for entry in WalkDir::new(location).sort_by_file_name() {
        let entry = entry.map_err(|e| archive_failed(location, e))?;
        let relative = entry
            .path()
            .strip_prefix(location)
            .map_err(|e| archive_failed(entry.path(), e))?
            .to_string_lossy()
            .replace('\\', "/");

        let name = if relative.is_empty() {
            base.clone()
        } else {
            format!("{base}/{relative}")
        };

        if entry.file_type().is_dir() {
            archive.append_dir(&name, entry.path())?;
        } else {
            archive.append_path_with_name(entry.path(), &name)?;
        }
    }

    Ok(())
}

fn rewrite_with_thumbnail(
    source: &Path,
    target: &File,
    definition: &PackageDefinition,
    thumbnail: &Path,
) -> Result<()> {
    let mut original = tar::Archive::new(GzDecoder::new(File::open(source)?));

    let encoder = GzEncoder::new(target, Compression::default());
    let mut archive = tar::Builder::new(encoder);
    archive.follow_symlinks(false);

    append_definition(&mut archive, definition)?;
    archive.append_path_with_name(thumbnail, THUMBNAIL_ENTRY)?;

    for entry in original.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.to_string_lossy().to_string();
        if path == DEFINITION_ENTRY || path == THUMBNAIL_ENTRY {
            continue;
        }

        let mut header = entry.header().clone();
        archive.append_data(&mut header, &path, &mut entry)?;
    }

    let encoder = archive.into_inner()?;
    encoder.finish()?;
    Ok(())
}

/// Read the definition stored in the archive at `path`
pub fn read_definition(path: &Path) -> Result<PackageDefinition> {
    Ok(inspect(path)?.definition)
}

/// Read definition and entry names of the archive at `path`
pub fn inspect(path: &Path) -> Result<ArchiveSummary> {
    if !path.is_file() {
        return Err(not_found(path));
    }

    let file = File::open(path).map_err(|e| invalid_archive(path, e))?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));

    let mut definition = None;
    let mut entries = Vec::new();

    for entry in archive.entries().map_err(|e| invalid_archive(path, e))? {
        let mut entry = entry.map_err(|e| invalid_archive(path, e))?;
        let name = entry
            .path()
            .map_err(|e| invalid_archive(path, e))?
            .to_string_lossy()
            .to_string();

        if name == DEFINITION_ENTRY {
            let mut content = Vec::new();
            entry
                .read_to_end(&mut content)
                .map_err(|e| invalid_archive(path, e))?;
            let parsed: PackageDefinition =
                serde_json::from_slice(&content).map_err(|e| invalid_archive(path, e))?;
            definition = Some(parsed);
        }

        entries.push(name);
    }

    let definition =
        definition.ok_or_else(|| invalid_archive(path, "missing package definition"))?;

    Ok(ArchiveSummary {
        definition,
        entries,
    })
}
