//! File system errors

use std::path::Path;

use super::QueryPackError;

/// Creates a file not found error
pub fn not_found(path: &Path) -> QueryPackError {
    QueryPackError::FileNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a file read failed error
pub fn read_failed(path: &Path, reason: impl ToString) -> QueryPackError {
    QueryPackError::FileReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
