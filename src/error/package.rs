//! Package assembly errors

use std::path::Path;

use super::QueryPackError;

/// Creates an archive build failed error
pub fn archive_failed(path: &Path, reason: impl ToString) -> QueryPackError {
    QueryPackError::ArchiveBuildFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an invalid package identity error
pub fn invalid_identity(message: impl Into<String>) -> QueryPackError {
    QueryPackError::InvalidPackageIdentity {
        message: message.into(),
    }
}

/// Creates a thumbnail attach failed error
pub fn thumbnail_failed(reason: impl ToString) -> QueryPackError {
    QueryPackError::ThumbnailAttachFailed {
        reason: reason.to_string(),
    }
}

/// Creates an invalid package archive error
pub fn invalid_archive(path: &Path, reason: impl ToString) -> QueryPackError {
    QueryPackError::InvalidPackageArchive {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
