//! # Content Resolution
//!
//! [`ContentResolver`] is the seam between the query layer and storage: it
//! turns uris into content. Storage-backed resolvers live elsewhere; this
//! crate ships [`InMemoryContentResolver`], which also runs
//! [`ContentQuery`](crate::criteria::ContentQuery)s with the in-memory
//! evaluator.

pub mod memory;

pub use memory::InMemoryContentResolver;

use crate::error::Result;
use crate::model::Content;

/// Resolves uris to content.
pub trait ContentResolver {
    /// Content whose canonical uri is one of `uris`.
    fn find_by_canonical_uris(&self, uris: &[&str]) -> Result<ResolvedContent>;

    /// Content known by one of `uris`, canonical or alias.
    fn find_by_uris(&self, uris: &[&str]) -> Result<ResolvedContent>;
}

/// The outcome of a resolution, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedContent {
    resolved: Vec<(String, Content)>,
    unresolved: Vec<String>,
}

impl ResolvedContent {
    pub fn builder() -> ResolvedContentBuilder {
        ResolvedContentBuilder::default()
    }

    pub fn get(&self, uri: &str) -> Option<&Content> {
        self.resolved
            .iter()
            .find(|(u, _)| u == uri)
            .map(|(_, content)| content)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.get(uri).is_some()
    }

    /// Resolved `(requested uri, content)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Content)> {
        self.resolved.iter().map(|(u, c)| (u.as_str(), c))
    }

    pub fn contents(&self) -> impl Iterator<Item = &Content> {
        self.resolved.iter().map(|(_, c)| c)
    }

    /// Requested uris with no content.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ResolvedContentBuilder {
    inner: ResolvedContent,
}

impl ResolvedContentBuilder {
    /// Records `uri`. Only the first record of a uri counts.
    pub fn put(mut self, uri: impl Into<String>, content: Option<Content>) -> Self {
        let uri = uri.into();
        let seen = self.inner.contains(&uri) || self.inner.unresolved.contains(&uri);
        if !seen {
            match content {
                Some(content) => self.inner.resolved.push((uri, content)),
                None => self.inner.unresolved.push(uri),
            }
        }
        self
    }

    pub fn build(self) -> ResolvedContent {
        self.inner
    }
}
