//! Result paging.

use crate::query_string::QueryStringParameters;

/// An offset and an optional limit over an ordered result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    offset: u32,
    limit: Option<u32>,
}

impl Selection {
    /// Everything, from the start.
    pub const ALL: Selection = Selection {
        offset: 0,
        limit: None,
    };

    pub const fn limited(limit: u32) -> Self {
        Self {
            offset: 0,
            limit: Some(limit),
        }
    }

    pub const fn new(offset: u32, limit: Option<u32>) -> Self {
        Self { offset, limit }
    }

    pub const fn with_offset(self, offset: u32) -> Self {
        Self { offset, ..self }
    }

    pub const fn with_limit(self, limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn has_limit(&self) -> bool {
        self.limit.is_some()
    }

    /// Fills in `default` when no limit was asked for and caps the limit at `max`.
    pub fn with_default_limit(self, default: u32, max: u32) -> Self {
        Self {
            limit: Some(self.limit.unwrap_or(default).min(max)),
            ..self
        }
    }

    /// The selected window of `items`.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.offset as usize).min(items.len());
        let end = match self.limit {
            Some(limit) => start.saturating_add(limit as usize).min(items.len()),
            None => items.len(),
        };
        &items[start..end]
    }

    /// `limit` then `offset`; a zero offset and a missing limit are left out.
    pub fn as_query_string_parameters(&self) -> QueryStringParameters {
        let mut params = QueryStringParameters::new();
        if let Some(limit) = self.limit {
            params.add("limit", limit.to_string());
        }
        if self.offset > 0 {
            params.add("offset", self.offset.to_string());
        }
        params
    }
}
