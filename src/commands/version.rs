//! Version command implementation

use crate::config::packager::DEFAULT_CONFIG_FILE;
use crate::domain::query::{GLOB_LANGUAGE, LIST_LANGUAGE};
use crate::error::Result;
use crate::package::archive::{ARCHIVE_EXTENSION, DEFINITION_ENTRY};

pub fn run() -> Result<()> {
    print!("{}", version_text());
    Ok(())
}

fn version_text() -> String {
    let profile = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };

    format!(
        "querypack {version}\n\n\
         Build info:\n  \
         Query languages: {GLOB_LANGUAGE}, {LIST_LANGUAGE}\n  \
         Package format: *{ARCHIVE_EXTENSION} with {DEFINITION_ENTRY}\n  \
         Config file: {DEFAULT_CONFIG_FILE}\n  \
         Minimum Rust: {rust} ({profile} build)\n",
        version = env!("CARGO_PKG_VERSION"),
        rust = env!("CARGO_PKG_RUST_VERSION"),
    )
}
