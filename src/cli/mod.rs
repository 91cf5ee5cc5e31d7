//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - package: Package command arguments
//! - show: Show command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod package;
pub mod show;

pub use completions::CompletionsArgs;
pub use package::PackageArgs;
pub use show::ShowArgs;

/// querypack - query-driven content packager
///
/// Resolve a query against a content tree and package the matches.
#[derive(Parser, Debug)]
#[command(
    name = "querypack",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Package the results of a content query into versioned archives",
    long_about = "querypack resolves a query against a hierarchical content store, \
                  deduplicates the matches into a resource set and assembles them into \
                  a versioned package archive with ACL handling and conflict resolution policy.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  querypack package                          \x1b[90m# Build from ./querypack.yaml\x1b[0m\n   \
                  querypack package --preview                \x1b[90m# List what would be packaged\x1b[0m\n   \
                  querypack package --query 'content/*'      \x1b[90m# Override the query\x1b[0m\n   \
                  querypack show Query/query-1.0.0.tar.gz    \x1b[90m# Show a built package\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build or preview a package from a query
    Package(PackageArgs),

    /// Show a built package's definition
    Show(ShowArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parsing_package_defaults() {
        let cli = Cli::try_parse_from(["querypack", "package"]).unwrap();
        match cli.command {
            Commands::Package(args) => {
                assert!(!args.preview);
                assert!(!args.json);
                assert_eq!(args.config, None);
                assert_eq!(args.query, None);
            }
            _ => panic!("Expected Package command"),
        }
    }

    #[test]
    fn test_cli_parsing_package_overrides() {
        let cli = Cli::try_parse_from([
            "querypack",
            "package",
            "--preview",
            "--json",
            "--query",
            "content/*",
            "--rel-path",
            "meta",
            "--name",
            "nightly",
            "--pkg-version",
            "2.0.0",
            "--config",
            "custom.yaml",
        ])
        .unwrap();
        match cli.command {
            Commands::Package(args) => {
                assert!(args.preview);
                assert!(args.json);
                assert_eq!(args.query.as_deref(), Some("content/*"));
                assert_eq!(args.rel_path.as_deref(), Some("meta"));
                assert_eq!(args.name.as_deref(), Some("nightly"));
                assert_eq!(args.pkg_version.as_deref(), Some("2.0.0"));
                assert_eq!(args.config, Some(PathBuf::from("custom.yaml")));
            }
            _ => panic!("Expected Package command"),
        }
    }

    #[test]
    fn test_cli_parsing_show() {
        let cli = Cli::try_parse_from(["querypack", "show", "pkg.tar.gz", "--json"]).unwrap();
        match cli.command {
            Commands::Show(args) => {
                assert_eq!(args.archive, PathBuf::from("pkg.tar.gz"));
                assert!(args.json);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_cli_show_requires_archive() {
        assert!(Cli::try_parse_from(["querypack", "show"]).is_err());
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["querypack", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_global_verbose() {
        let cli = Cli::try_parse_from(["querypack", "package", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["querypack", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => {
                assert_eq!(args.shell, "bash");
            }
            _ => panic!("Expected Completions command"),
        }
    }
}
