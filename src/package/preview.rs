//! Preview of what a package would contain

use serde::Serialize;

use crate::domain::{FilterEntry, ResourceSet};

/// Side-effect-free listing of the resources a build would package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewDescription {
    pub filter_sets: Vec<FilterEntry>,
}

impl PreviewDescription {
    pub fn len(&self) -> usize {
        self.filter_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filter_sets.is_empty()
    }
}

/// Renders resource sets into previews
///
/// Never touches storage; the same set always renders the same description.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewRenderer;

impl PreviewRenderer {
    pub fn render(self, resources: &ResourceSet) -> PreviewDescription {
        PreviewDescription {
            filter_sets: resources
                .iter()
                .map(|r| FilterEntry::replace(r.path()))
                .collect(),
        }
    }
}
