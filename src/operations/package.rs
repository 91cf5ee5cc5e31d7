//! Package operation module
//!
//! Handles one packaging request from session acquisition to outcome.

use serde::Serialize;
use tracing::{debug, error};

use crate::domain::{BuiltPackage, PackageIdentity, PackageProperties, QuerySpec};
use crate::error::{ErrorKind, QueryPackError, Result};
use crate::package::{ArchiveBuilder, PackageAssembler, PreviewDescription, PreviewRenderer};
use crate::resource_set::ResourceSetBuilder;
use crate::store::ContentStore;

/// Everything needed to preview or build one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    pub query: QuerySpec,
    pub preview: bool,
    pub identity: PackageIdentity,
    pub properties: PackageProperties,
}

/// Error outcome payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    #[serde(rename = "msg")]
    pub message: String,
}

impl From<&QueryPackError> for ErrorResponse {
    fn from(err: &QueryPackError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// The single result of a packaging request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Success(BuiltPackage),
    Preview(PreviewDescription),
    Error(ErrorResponse),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<QueryPackError> for Outcome {
    fn from(err: QueryPackError) -> Self {
        Self::Error(ErrorResponse::from(&err))
    }
}

/// High-level packaging operation
pub struct PackageOperation<'a, C: ContentStore + ?Sized, B: ArchiveBuilder + ?Sized> {
    store: &'a C,
    archive: &'a B,
}

impl<'a, C: ContentStore + ?Sized, B: ArchiveBuilder + ?Sized> PackageOperation<'a, C, B> {
    pub fn new(store: &'a C, archive: &'a B) -> Self {
        Self { store, archive }
    }

    /// Preview or build the package described by `request`
    ///
    /// Never fails: errors become [`Outcome::Error`].
    pub fn handle(&self, request: &PackageRequest) -> Outcome {
        match self.execute(request) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(kind = ?e.kind(), error = %e, "Package request failed");
                Outcome::from(e)
            }
        }
    }

    fn execute(&self, request: &PackageRequest) -> Result<Outcome> {
        // Released on drop, on every path out of this function
        let session = self.store.open_session()?;

        let resources = ResourceSetBuilder::new(&session).resolve(&request.query)?;

        if request.preview {
            debug!(resources = resources.len(), "Preview requested, skipping build");
            return Ok(Outcome::Preview(PreviewRenderer.render(&resources)));
        }

        let package = PackageAssembler::new(self.archive).build(
            &session,
            &resources,
            &request.identity,
            &request.properties,
        )?;

        Ok(Outcome::Success(package))
    }
}
