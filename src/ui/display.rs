//! Display functions for outcomes and package definitions
//!
//! Everything renders into a `String` so callers decide where it goes.
//! Styling is dropped automatically when stdout is not a terminal.

use std::fmt::Write;

use console::Style;

use crate::domain::{BuiltPackage, FilterEntry};
use crate::operations::{ErrorResponse, Outcome};
use crate::package::PreviewDescription;
use crate::package::archive::ArchiveSummary;

macro_rules! field {
    ($out:expr, $label:expr, $value:expr) => {
        let _ = writeln!($out, "  {} {}", Style::new().bold().apply_to($label), $value);
    };
}

/// Human-readable text for an outcome
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success(package) => format_success(package),
        Outcome::Preview(preview) => format_preview(preview),
        Outcome::Error(error) => format_error(error),
    }
}

fn format_success(package: &BuiltPackage) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        Style::new().green().bold().apply_to("Created package"),
        Style::new().bold().yellow().apply_to(&package.identity)
    );
    field!(out, "Path:", package.path.display());
    field!(out, "Checksum:", package.checksum);
    field!(out, "ACL handling:", package.properties.acl_handling);
    field!(out, "Conflict resolution:", package.properties.conflict_resolution);
    field!(
        out,
        "Thumbnail:",
        if package.thumbnail_attached {
            "attached"
        } else {
            "none"
        }
    );
    format_filters(&mut out, &package.filter_sets);
    out
}

fn format_preview(preview: &PreviewDescription) -> String {
    let mut out = String::new();
    if preview.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            Style::new().yellow().apply_to("Preview: no resources match the query")
        );
        return out;
    }

    let _ = writeln!(
        out,
        "{} {} {}",
        Style::new().cyan().bold().apply_to("Preview:"),
        preview.len(),
        resources_label(preview.len())
    );
    for filter in &preview.filter_sets {
        let _ = writeln!(out, "  {}", filter.root_path);
    }
    out
}

fn format_error(error: &ErrorResponse) -> String {
    format!(
        "{} {}\n",
        Style::new().red().bold().apply_to("Error:"),
        error.message
    )
}

/// Human-readable text for an archived package
pub fn format_archive(summary: &ArchiveSummary, list_files: bool) -> String {
    let definition = &summary.definition;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        Style::new().bold().yellow().apply_to(&definition.identity)
    );
    field!(out, "Description:", definition.properties.description);
    field!(out, "ACL handling:", definition.properties.acl_handling);
    field!(
        out,
        "Conflict resolution:",
        definition.properties.conflict_resolution
    );
    if let Some(ref thumbnail) = definition.thumbnail {
        field!(out, "Thumbnail:", thumbnail);
    }
    format_filters(&mut out, &definition.filters);

    if list_files {
        let _ = writeln!(
            out,
            "  {} ({})",
            Style::new().bold().apply_to("Entries:"),
            summary.entries.len()
        );
        for entry in &summary.entries {
            let _ = writeln!(out, "    {}", Style::new().dim().apply_to(entry));
        }
    }

    out
}

fn format_filters(out: &mut String, filters: &[FilterEntry]) {
    let _ = writeln!(
        out,
        "  {} ({} {})",
        Style::new().bold().apply_to("Filters:"),
        filters.len(),
        resources_label(filters.len())
    );
    for filter in filters {
        let _ = writeln!(
            out,
            "    {} {}",
            filter.root_path,
            Style::new().dim().apply_to(format!("[{}]", filter.import_mode))
        );
    }
}

fn resources_label(n: usize) -> &'static str {
    if n == 1 { "resource" } else { "resources" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PackageIdentity, PackageProperties, ResourcePath};
    use crate::error::ErrorKind;
    use crate::package::archive::PackageDefinition;
    use std::path::PathBuf;

    fn plain(text: String) -> String {
        console::strip_ansi_codes(&text).to_string()
    }

    #[test]
    fn test_format_success() {
        let package = BuiltPackage {
            identity: PackageIdentity::default(),
            properties: PackageProperties::default(),
            path: PathBuf::from("/packages/Query/query-1.0.0.tar.gz"),
            checksum: "blake3:abc".to_string(),
            filter_sets: vec![FilterEntry::replace(&ResourcePath::new("/a"))],
            thumbnail_attached: false,
        };

        let text = plain(format_outcome(&Outcome::Success(package)));
        assert!(text.contains("Created package Query/query-1.0.0"));
        assert!(text.contains("Checksum: blake3:abc"));
        assert!(text.contains("Filters: (1 resource)"));
        assert!(text.contains("/a [replace]"));
        assert!(text.contains("Thumbnail: none"));
    }

    #[test]
    fn test_format_preview() {
        let preview = PreviewDescription {
            filter_sets: vec![
                FilterEntry::replace(&ResourcePath::new("/a")),
                FilterEntry::replace(&ResourcePath::new("/b")),
            ],
        };

        let text = plain(format_outcome(&Outcome::Preview(preview)));
        assert!(text.starts_with("Preview: 2 resources"));
        assert!(text.contains("  /a\n"));
        assert!(text.contains("  /b\n"));
    }

    #[test]
    fn test_format_empty_preview() {
        let text = plain(format_outcome(&Outcome::Preview(PreviewDescription {
            filter_sets: Vec::new(),
        })));
        assert!(text.contains("no resources match"));
    }

    #[test]
    fn test_format_error() {
        let text = plain(format_outcome(&Outcome::Error(ErrorResponse {
            kind: ErrorKind::EmptyPackageRefused,
            message: "Refusing to create a package with no filter set rules".to_string(),
        })));
        assert_eq!(
            text,
            "Error: Refusing to create a package with no filter set rules\n"
        );
    }

    #[test]
    fn test_format_archive_with_entries() {
        let summary = ArchiveSummary {
            definition: PackageDefinition {
                identity: PackageIdentity::new("site", "exports", "2.0"),
                properties: PackageProperties::default(),
                filters: vec![FilterEntry::replace(&ResourcePath::new("/content/a"))],
                thumbnail: None,
            },
            entries: vec!["jcr_root/content/a".to_string()],
        };

        let text = plain(format_archive(&summary, true));
        assert!(text.starts_with("exports/site-2.0"));
        assert!(text.contains("ACL handling: OVERWRITE"));
        assert!(text.contains("Entries: (1)"));
        assert!(text.contains("jcr_root/content/a"));

        let without_entries = plain(format_archive(&summary, false));
        assert!(!without_entries.contains("Entries:"));
    }
}
