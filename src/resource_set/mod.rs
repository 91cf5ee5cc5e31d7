//! Resource set resolution
//!
//! Runs a [`QuerySpec`] against a session and turns the matched node paths
//! into a deduplicated [`ResourceSet`]:
//!
//! 1. validate the query
//! 2. execute it through the session's query executor
//! 3. resolve every match, skipping paths that no longer resolve
//! 4. project onto the relative path when one is given
//!
//! An empty result is a valid outcome, distinct from a failed query.

use tracing::debug;

use crate::domain::{QuerySpec, ResourceSet};
use crate::error::Result;
use crate::store::Session;


pub struct ResourceSetBuilder<'s, S: Session + ?Sized> {
    session: &'s S,
}

impl<'s, S: Session + ?Sized> ResourceSetBuilder<'s, S> {
    pub fn new(session: &'s S) -> Self {
        Self { session }
    }

    pub fn resolve(&self, query: &QuerySpec) -> Result<ResourceSet> {
        query.validate()?;

        let matches = self.session.execute(&query.language, &query.statement)?;
        debug!(
            language = %query.language,
            matches = matches.len(),
            "Query executed"
        );

        let projection = query.projection();
        let mut resources = ResourceSet::new();

        for path in matches {
            let Some(resource) = self.session.resolve(&path) else {
                debug!(path = %path, "Skipping match that no longer resolves");
                continue;
            };

            let resource = match projection {
                Some(relative) => match self.session.child_of(&resource, relative) {
                    Some(child) => child,
                    None => {
                        debug!(path = %path, relative, "Skipping match without relative child");
                        continue;
                    }
                },
                None => resource,
            };

            if !resources.insert(resource) {
                debug!(path = %path, "Duplicate match collapsed");
            }
        }

        Ok(resources)
    }
}
