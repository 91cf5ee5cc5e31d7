//! Configuration file handling for querypack
//!
//! - `querypack.yaml`: packager configuration (query, package identity and
//!   policy), overridable from the command line

pub mod packager;

pub use packager::PackagerConfig;
