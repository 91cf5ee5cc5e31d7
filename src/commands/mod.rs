//! Command implementations for querypack CLI

pub mod completions;
pub mod package;
pub mod show;
pub mod version;
