//! Package assembly and preview
//!
//! - [`assembler`]: builds packages from resource sets
//! - [`preview`]: describes what a build would contain
//! - [`archive`]: the archive builder collaborator and its tarball implementation
//! - [`version`]: version comparison for conflict resolution

pub mod archive;
pub mod assembler;
pub mod preview;
pub mod version;

pub use archive::{ArchiveBuilder, TarArchiveBuilder};
pub use assembler::PackageAssembler;
pub use preview::{PreviewDescription, PreviewRenderer};
