//! Result presentation layer
//!
//! Every command prints exactly one result, either as JSON for machines or
//! as styled text for people:
//! - [`render_json`]: `status`-tagged JSON of an [`Outcome`]
//! - [`display`]: console-styled text for outcomes and package definitions
//!
//! Logging goes to stderr, so stdout carries nothing but the result.

pub mod display;

use serde::Serialize;

use crate::error::{QueryPackError, Result};
use crate::operations::Outcome;

/// Pretty-printed JSON of an outcome
pub fn render_json(outcome: &Outcome) -> Result<String> {
    to_json(outcome)
}

/// Pretty-printed JSON of any serializable value
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| QueryPackError::SerializationFailed {
        reason: e.to_string(),
    })
}
