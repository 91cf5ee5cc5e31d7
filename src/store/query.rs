//! Query languages understood by the filesystem content store
//!
//! - `glob`: a wax glob matched against every node path below the store root
//!   (`content/**/page`, a leading `/` is allowed)
//! - `list`: one node path per line; blank lines and `#` comments are ignored

use std::path::Path;

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::domain::ResourcePath;
use crate::domain::query::{GLOB_LANGUAGE, LIST_LANGUAGE};
use crate::error::{Result, query::failed, query::unsupported_language};

/// Run `statement` in `language` against the tree at `root`
pub fn execute(root: &Path, language: &str, statement: &str) -> Result<Vec<ResourcePath>> {
    match language.trim().to_lowercase().as_str() {
        GLOB_LANGUAGE => glob_query(root, statement),
        LIST_LANGUAGE => Ok(list_query(statement)),
        _ => Err(unsupported_language(language)),
    }
}

fn glob_query(root: &Path, statement: &str) -> Result<Vec<ResourcePath>> {
    let pattern = statement.trim().trim_start_matches('/');
    let glob = Glob::new(pattern).map_err(|e| failed(GLOB_LANGUAGE, e))?;

    let mut matches = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| failed(GLOB_LANGUAGE, e))?;
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        // Match on forward slashes regardless of platform
        let node_path = relative.to_string_lossy().replace('\\', "/");
        if glob.matched(&CandidatePath::from(node_path.as_str())).is_some() {
            matches.push(ResourcePath::new(&node_path));
        }
    }

    Ok(matches)
}

fn list_query(statement: &str) -> Vec<ResourcePath> {
    statement
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ResourcePath::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryPackError;
    use crate::test_fixtures::{create_content_tree, create_temp_dir};

    fn strings(paths: &[ResourcePath]) -> Vec<String> {
        paths.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_glob_matches_single_level() {
        let temp = create_temp_dir();
        create_content_tree(temp.path(), &["content/a/meta/x.txt", "content/b/y.txt"]);

        let matches = execute(temp.path(), "glob", "/content/*").unwrap();
        assert_eq!(strings(&matches), vec!["/content/a", "/content/b"]);
    }

    #[test]
    fn test_glob_matches_recursively() {
        let temp = create_temp_dir();
        create_content_tree(
            temp.path(),
            &["content/a/meta/x.txt", "content/b/c/meta/y.txt", "other/meta/z.txt"],
        );

        let matches = execute(temp.path(), "glob", "content/**/meta").unwrap();
        assert_eq!(strings(&matches), vec!["/content/a/meta", "/content/b/c/meta"]);
    }

    #[test]
    fn test_glob_no_matches_is_empty() {
        let temp = create_temp_dir();
        create_content_tree(temp.path(), &["content/a.txt"]);

        let matches = execute(temp.path(), "glob", "nothing/**").unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_glob_invalid_pattern() {
        let temp = create_temp_dir();
        let err = execute(temp.path(), "glob", "content/[").unwrap_err();
        assert!(matches!(err, QueryPackError::QueryFailed { .. }));
    }

    #[test]
    fn test_language_is_case_insensitive() {
        let temp = create_temp_dir();
        create_content_tree(temp.path(), &["a.txt"]);

        let matches = execute(temp.path(), "GLOB", "*.txt").unwrap();
        assert_eq!(strings(&matches), vec!["/a.txt"]);
    }

    #[test]
    fn test_list_keeps_order_and_duplicates() {
        let temp = create_temp_dir();
        let matches = execute(temp.path(), "list", "/a\n\n# comment\n/b\n /a \n").unwrap();
        assert_eq!(strings(&matches), vec!["/a", "/b", "/a"]);
    }

    #[test]
    fn test_unsupported_language() {
        let temp = create_temp_dir();
        let err = execute(temp.path(), "JCR-SQL2", "SELECT * FROM [nt:base]").unwrap_err();
        assert!(matches!(err, QueryPackError::UnsupportedQueryLanguage { .. }));
    }
}
