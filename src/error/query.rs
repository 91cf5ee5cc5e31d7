//! Query and content store errors

use std::path::Path;

use super::QueryPackError;

/// Creates a query failed error
pub fn failed(language: impl Into<String>, reason: impl ToString) -> QueryPackError {
    QueryPackError::QueryFailed {
        language: language.into(),
        reason: reason.to_string(),
    }
}

/// Creates an unsupported query language error
pub fn unsupported_language(language: impl Into<String>) -> QueryPackError {
    QueryPackError::UnsupportedQueryLanguage {
        language: language.into(),
    }
}

/// Creates an invalid relative path error
pub fn invalid_relative_path(path: impl Into<String>, reason: impl Into<String>) -> QueryPackError {
    QueryPackError::InvalidRelativePath {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a content store unavailable error
pub fn store_unavailable(path: &Path, reason: impl ToString) -> QueryPackError {
    QueryPackError::RepositoryUnavailable {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
