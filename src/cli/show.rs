use clap::Parser;
use std::path::PathBuf;

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show a package definition:\n    querypack show Query/query-1.0.0.tar.gz\n\n\
                  Include every archived entry:\n    querypack show Query/query-1.0.0.tar.gz --files\n\n\
                  Print the definition as JSON:\n    querypack show Query/query-1.0.0.tar.gz --json")]
pub struct ShowArgs {
    /// Package archive to inspect
    pub archive: PathBuf,

    /// List every entry in the archive
    #[arg(long)]
    pub files: bool,

    /// Print the definition as JSON
    #[arg(long)]
    pub json: bool,
}
