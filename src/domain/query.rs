//! Query specification
//!
//! Describes which nodes to select and, optionally, which named child of each
//! match to package instead of the match itself.

use crate::error::{QueryPackError, Result, query::invalid_relative_path};

/// Glob patterns matched against node paths
pub const GLOB_LANGUAGE: &str = "glob";

/// Literal node paths, one per line
pub const LIST_LANGUAGE: &str = "list";

/// Language used when the configuration does not name one
pub const DEFAULT_QUERY_LANGUAGE: &str = GLOB_LANGUAGE;

/// A query plus its optional relative-path projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub language: String,
    pub statement: String,
    pub relative_path: Option<String>,
}

impl QuerySpec {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            language: DEFAULT_QUERY_LANGUAGE.to_string(),
            statement: statement.into(),
            relative_path: None,
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_relative_path(mut self, relative_path: impl Into<String>) -> Self {
        self.relative_path = Some(relative_path.into());
        self
    }

    /// The projection to apply to each match, if any
    ///
    /// A blank relative path means no projection.
    pub fn projection(&self) -> Option<&str> {
        self.relative_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if self.statement.trim().is_empty() {
            return Err(QueryPackError::QueryMissing);
        }

        if let Some(relative) = self.projection() {
            if relative.starts_with('/') || relative.starts_with('\\') {
                return Err(invalid_relative_path(relative, "must not start at the root"));
            }
            if relative.split(['/', '\\']).any(|segment| segment == "..") {
                return Err(invalid_relative_path(
                    relative,
                    "must stay below the matched resource",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_language() {
        let spec = QuerySpec::new("/content/*");
        assert_eq!(spec.language, "glob");
        assert_eq!(spec.relative_path, None);
    }

    #[test]
    fn test_projection_blank_is_none() {
        assert_eq!(QuerySpec::new("q").with_relative_path("   ").projection(), None);
        assert_eq!(QuerySpec::new("q").with_relative_path("").projection(), None);
        assert_eq!(QuerySpec::new("q").projection(), None);
    }

    #[test]
    fn test_projection_trims() {
        let spec = QuerySpec::new("q").with_relative_path(" meta ");
        assert_eq!(spec.projection(), Some("meta"));
    }

    #[test]
    fn test_validate_empty_statement() {
        let err = QuerySpec::new("  ").validate().unwrap_err();
        assert!(matches!(err, QueryPackError::QueryMissing));
    }

    #[test]
    fn test_validate_rooted_relative_path() {
        let err = QuerySpec::new("q")
            .with_relative_path("/meta")
            .validate()
            .unwrap_err();
        assert!(matches!(err, QueryPackError::InvalidRelativePath { .. }));
    }

    #[test]
    fn test_validate_escaping_relative_path() {
        let err = QuerySpec::new("q")
            .with_relative_path("meta/../../other")
            .validate()
            .unwrap_err();
        assert!(matches!(err, QueryPackError::InvalidRelativePath { .. }));
    }

    #[test]
    fn test_validate_nested_relative_path() {
        let spec = QuerySpec::new("q").with_relative_path("jcr:content/image");
        assert!(spec.validate().is_ok());
    }
}
