//! Operations module for packaging requests
//!
//! [`PackageOperation`] is the single entry point transports call. It
//! coordinates:
//! - Content store: one session per request (from store module)
//! - ResourceSetBuilder: query resolution (from resource_set module)
//! - PreviewRenderer / PackageAssembler: preview or commit (from package module)
//!
//! Whatever happens, a request produces exactly one [`Outcome`].

pub mod package;

pub use package::{ErrorResponse, Outcome, PackageOperation, PackageRequest};
