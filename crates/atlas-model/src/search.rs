//! # Search Requests
//!
//! [`SearchQuery`] is what the API sends to the search service. Its wire form
//! is a fixed, ordered parameter list produced by
//! [`SearchQuery::to_query_string_parameters`]; names and encodings must not
//! change, since the search service parses them literally.
//!
//! [`SearchResults`] is what comes back: entity ids in rank order.

use crate::criteria::Selection;
use crate::model::Id;
use crate::publisher::Publisher;
use crate::query_string::QueryStringParameters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sent in place of the specialization list when faking one. The search
/// service hides some results unless a specialization filter is present.
pub const FAKE_SPECIALIZATION: &str = "fakeSpecialization";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Specialization {
    Tv,
    Radio,
    Film,
    Music,
}

impl Specialization {
    pub const ALL: [Specialization; 4] = [
        Specialization::Tv,
        Specialization::Radio,
        Specialization::Film,
        Specialization::Music,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Specialization::Tv => "TV",
            Specialization::Radio => "RADIO",
            Specialization::Film => "FILM",
            Specialization::Music => "MUSIC",
        }
    }

    pub fn from_name(name: &str) -> Option<Specialization> {
        Self::ALL.into_iter().find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    term: String,
    selection: Selection,
    specializations: Vec<Specialization>,
    fake_specialization: bool,
    publishers: Vec<Publisher>,
    title_weighting: f32,
    broadcast_weighting: f32,
    catchup_weighting: f32,
    priority_channel_weighting: f32,
    content_type: Option<String>,
    top_level_only: Option<bool>,
    current_broadcasts_only: Option<bool>,
}

impl SearchQuery {
    pub fn builder(term: impl Into<String>) -> SearchQueryBuilder {
        SearchQueryBuilder::new(term)
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn specializations(&self) -> &[Specialization] {
        &self.specializations
    }

    pub fn uses_fake_specialization(&self) -> bool {
        self.fake_specialization
    }

    pub fn publishers(&self) -> &[Publisher] {
        &self.publishers
    }

    pub fn title_weighting(&self) -> f32 {
        self.title_weighting
    }

    pub fn broadcast_weighting(&self) -> f32 {
        self.broadcast_weighting
    }

    pub fn catchup_weighting(&self) -> f32 {
        self.catchup_weighting
    }

    pub fn priority_channel_weighting(&self) -> f32 {
        self.priority_channel_weighting
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn top_level_only(&self) -> Option<bool> {
        self.top_level_only
    }

    pub fn current_broadcasts_only(&self) -> Option<bool> {
        self.current_broadcasts_only
    }

    /// The request parameters, in wire order. Optional flags are only
    /// present when set.
    pub fn to_query_string_parameters(&self) -> QueryStringParameters {
        let specializations = if self.fake_specialization {
            FAKE_SPECIALIZATION.to_string()
        } else {
            csv(self.specializations.iter().map(|s| s.name()))
        };

        let mut params = QueryStringParameters::new();
        params
            .add("title", self.term.as_str())
            .add_all(self.selection.as_query_string_parameters())
            .add("specializations", specializations)
            .add("publishers", csv(self.publishers.iter().map(|p| p.key())))
            .add("titleWeighting", weighting(self.title_weighting))
            .add("broadcastWeighting", weighting(self.broadcast_weighting))
            .add(
                "priorityChannelWeighting",
                weighting(self.priority_channel_weighting),
            )
            .add("catchupWeighting", weighting(self.catchup_weighting));

        if let Some(top_level_only) = self.top_level_only {
            params.add("topLevelOnly", top_level_only.to_string());
        }
        if let Some(content_type) = &self.content_type {
            params.add("type", content_type.as_str());
        }
        if let Some(current) = self.current_broadcasts_only {
            params.add("currentBroadcastsOnly", current.to_string());
        }
        params
    }

    pub fn to_query_string(&self) -> String {
        self.to_query_string_parameters().to_query_string()
    }
}

fn csv<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.collect::<Vec<_>>().join(",")
}

// Debug formatting keeps the fractional part: 1.0 renders as "1.0".
fn weighting(value: f32) -> String {
    format!("{value:?}")
}

fn push_distinct<T: PartialEq>(target: &mut Vec<T>, values: impl IntoIterator<Item = T>) {
    target.clear();
    for value in values {
        if !target.contains(&value) {
            target.push(value);
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchQueryBuilder {
    inner: SearchQuery,
}

impl SearchQueryBuilder {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            inner: SearchQuery {
                term: term.into(),
                selection: Selection::ALL,
                specializations: Vec::new(),
                fake_specialization: false,
                publishers: Vec::new(),
                title_weighting: 0.0,
                broadcast_weighting: 0.0,
                catchup_weighting: 0.0,
                priority_channel_weighting: 1.0,
                content_type: None,
                top_level_only: None,
                current_broadcasts_only: None,
            },
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.inner.selection = selection;
        self
    }

    pub fn with_specializations(
        mut self,
        specializations: impl IntoIterator<Item = Specialization>,
    ) -> Self {
        push_distinct(&mut self.inner.specializations, specializations);
        self
    }

    /// Overrides any specializations on the wire with the fake one.
    pub fn with_fake_specialization(mut self, fake: bool) -> Self {
        self.inner.fake_specialization = fake;
        self
    }

    pub fn with_publishers(mut self, publishers: impl IntoIterator<Item = Publisher>) -> Self {
        push_distinct(&mut self.inner.publishers, publishers);
        self
    }

    pub fn with_title_weighting(mut self, weighting: f32) -> Self {
        self.inner.title_weighting = weighting;
        self
    }

    pub fn with_broadcast_weighting(mut self, weighting: f32) -> Self {
        self.inner.broadcast_weighting = weighting;
        self
    }

    pub fn with_catchup_weighting(mut self, weighting: f32) -> Self {
        self.inner.catchup_weighting = weighting;
        self
    }

    pub fn with_priority_channel_weighting(mut self, weighting: f32) -> Self {
        self.inner.priority_channel_weighting = weighting;
        self
    }

    pub fn with_type(mut self, content_type: impl Into<String>) -> Self {
        self.inner.content_type = Some(content_type.into());
        self
    }

    pub fn top_level_only(mut self, top_level_only: bool) -> Self {
        self.inner.top_level_only = Some(top_level_only);
        self
    }

    pub fn current_broadcasts_only(mut self, current: bool) -> Self {
        self.inner.current_broadcasts_only = Some(current);
        self
    }

    pub fn build(self) -> SearchQuery {
        self.inner
    }
}

/// Ranked ids returned by a search. Duplicates keep their first position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    ids: Vec<Id>,
}

impl SearchResults {
    pub fn new(ids: impl IntoIterator<Item = Id>) -> Self {
        let mut results = Self::default();
        push_distinct(&mut results.ids, ids);
        results
    }

    pub fn from_values(ids: impl IntoIterator<Item = u64>) -> Self {
        Self::new(ids.into_iter().map(Id::new))
    }

    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<'a> IntoIterator for &'a SearchResults {
    type Item = &'a Id;
    type IntoIter = std::slice::Iter<'a, Id>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
