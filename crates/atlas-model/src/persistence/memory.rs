use super::{ContentResolver, ResolvedContent};
use crate::criteria::ContentQuery;
use crate::error::Result;
use crate::model::Content;
use tracing::trace;

/// Content held in a `Vec`, for tests and small fixtures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentResolver {
    contents: Vec<Content>,
}

impl InMemoryContentResolver {
    pub fn new(contents: impl IntoIterator<Item = Content>) -> Self {
        Self {
            contents: contents.into_iter().collect(),
        }
    }

    /// Adds `content`, replacing any entry with the same canonical uri.
    pub fn insert(&mut self, content: Content) {
        match self
            .contents
            .iter_mut()
            .find(|c| c.canonical_uri == content.canonical_uri)
        {
            Some(existing) => *existing = content,
            None => self.contents.push(content),
        }
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Content satisfying `query`, in insertion order, windowed by its selection.
    pub fn find_matching(&self, query: &ContentQuery) -> Vec<&Content> {
        let matching: Vec<&Content> = self.contents.iter().filter(|c| query.matches(*c)).collect();
        trace!(
            candidates = self.contents.len(),
            matched = matching.len(),
            "evaluated content query"
        );
        query.selection().apply(&matching).to_vec()
    }

    fn resolve<F>(&self, uris: &[&str], known_as: F) -> ResolvedContent
    where
        F: Fn(&Content, &str) -> bool,
    {
        uris.iter()
            .fold(ResolvedContent::builder(), |builder, uri| {
                let found = self.contents.iter().find(|c| known_as(c, *uri)).cloned();
                builder.put(*uri, found)
            })
            .build()
    }
}

impl ContentResolver for InMemoryContentResolver {
    fn find_by_canonical_uris(&self, uris: &[&str]) -> Result<ResolvedContent> {
        Ok(self.resolve(uris, |c, uri| c.canonical_uri == uri))
    }

    fn find_by_uris(&self, uris: &[&str]) -> Result<ResolvedContent> {
        Ok(self.resolve(uris, Content::is_known_as))
    }
}
