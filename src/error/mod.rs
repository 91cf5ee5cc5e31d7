//! Error types and handling for querypack
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`query`]: Query and resource resolution errors
//! - [`package`]: Package assembly and archive errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors
//!
//! Every error also belongs to exactly one [`ErrorKind`], which is what the
//! error outcome reports to callers.

pub mod config;
pub mod fs;
pub mod package;
pub mod query;

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// Main error type for querypack operations
#[derive(Error, Diagnostic, Debug)]
pub enum QueryPackError {
    // Query errors
    #[error("No query statement configured")]
    #[diagnostic(
        code(querypack::query::missing),
        help("Set `query` in the packager configuration or pass --query")
    )]
    QueryMissing,

    #[error("Query failed ({language}): {reason}")]
    #[diagnostic(code(querypack::query::failed))]
    QueryFailed { language: String, reason: String },

    #[error("Unsupported query language: {language}")]
    #[diagnostic(
        code(querypack::query::unsupported_language),
        help("Supported query languages: glob, list")
    )]
    UnsupportedQueryLanguage { language: String },

    #[error("Invalid relative path '{path}': {reason}")]
    #[diagnostic(
        code(querypack::query::invalid_relative_path),
        help("Relative paths must not start with '/' or contain '..' segments")
    )]
    InvalidRelativePath { path: String, reason: String },

    // Content store errors
    #[error("Content store unavailable at '{path}': {reason}")]
    #[diagnostic(
        code(querypack::store::unavailable),
        help("Check that --store points to an existing directory")
    )]
    RepositoryUnavailable { path: String, reason: String },

    // Package errors
    #[error("Refusing to create a package with no filter set rules")]
    #[diagnostic(
        code(querypack::package::empty),
        help("The query matched no resources; run with --preview to inspect the result set")
    )]
    EmptyPackageRefused,

    #[error("Invalid package identity: {message}")]
    #[diagnostic(code(querypack::package::invalid_identity))]
    InvalidPackageIdentity { message: String },

    #[error("Package {group}/{name}-{version} already exists")]
    #[diagnostic(
        code(querypack::package::exists),
        help("Use conflictResolution IncrementVersion or Replace to build over an existing package")
    )]
    PackageExists {
        group: String,
        name: String,
        version: String,
    },

    #[error("Failed to build package archive '{path}': {reason}")]
    #[diagnostic(code(querypack::package::archive_failed))]
    ArchiveBuildFailed { path: String, reason: String },

    #[error("Failed to attach package thumbnail: {reason}")]
    #[diagnostic(code(querypack::package::thumbnail_failed))]
    ThumbnailAttachFailed { reason: String },

    #[error("Invalid package archive '{path}': {reason}")]
    #[diagnostic(code(querypack::package::invalid_archive))]
    InvalidPackageArchive { path: String, reason: String },

    #[error("Failed to serialize result: {reason}")]
    #[diagnostic(code(querypack::package::serialization_failed))]
    SerializationFailed { reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(querypack::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(querypack::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(querypack::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(querypack::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(querypack::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(querypack::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(querypack::fs::io_error))]
    IoError { message: String },
}

/// Category reported in error outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    QueryFailure,
    RepositoryFailure,
    EmptyPackageRefused,
    ArchiveBuildFailure,
    SerializationFailure,
    Configuration,
    Io,
}

impl QueryPackError {
    /// The outcome category this error is reported under
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::QueryMissing
            | Self::QueryFailed { .. }
            | Self::UnsupportedQueryLanguage { .. }
            | Self::InvalidRelativePath { .. } => ErrorKind::QueryFailure,
            Self::RepositoryUnavailable { .. } => ErrorKind::RepositoryFailure,
            Self::EmptyPackageRefused => ErrorKind::EmptyPackageRefused,
            Self::PackageExists { .. }
            | Self::ArchiveBuildFailed { .. }
            | Self::ThumbnailAttachFailed { .. }
            | Self::InvalidPackageArchive { .. } => ErrorKind::ArchiveBuildFailure,
            Self::SerializationFailed { .. } => ErrorKind::SerializationFailure,
            Self::InvalidPackageIdentity { .. }
            | Self::ConfigNotFound { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigReadFailed { .. }
            | Self::ConfigInvalid { .. } => ErrorKind::Configuration,
            Self::FileNotFound { .. }
            | Self::FileReadFailed { .. }
            | Self::IoError { .. } => ErrorKind::Io,
        }
    }
}

impl From<std::io::Error> for QueryPackError {
    fn from(err: std::io::Error) -> Self {
        QueryPackError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for QueryPackError {
    fn from(err: serde_yaml::Error) -> Self {
        QueryPackError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for QueryPackError {
    fn from(err: serde_json::Error) -> Self {
        QueryPackError::SerializationFailed {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, QueryPackError>;
