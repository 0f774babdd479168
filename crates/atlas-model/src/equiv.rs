//! # Equivalence
//!
//! Content from different publishers judged to describe the same asset is
//! *equivalent*. An [`EquivalenceSummary`] records the outcome of that
//! judgement for one subject. When equivalent content is shown as one
//! record, each field is taken from the highest ranked publisher that has a
//! value for it, under the requesting application's precedence:
//!
//! - [`order_by_precedence`] ranks the candidates,
//! - [`merge_field`] picks a field from the ranked list,
//! - [`select_winner`] picks the record the merged result is based on,
//! - [`select_image`] picks the image, ranking by image precedence when the
//!   application has it switched on.
//!
//! Content from publishers the application has not enabled never wins.

use crate::application::{ApplicationConfiguration, PublisherOrdering};
use crate::model::{Content, Image};
use crate::publisher::Publisher;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A pointer to content by uri.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRef {
    pub canonical_uri: String,
    pub publisher: Publisher,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_uri: Option<String>,
}

impl ContentRef {
    pub fn new(
        canonical_uri: impl Into<String>,
        publisher: Publisher,
        parent_uri: Option<String>,
    ) -> Self {
        Self {
            canonical_uri: canonical_uri.into(),
            publisher,
            parent_uri,
        }
    }
}

impl From<&Content> for ContentRef {
    fn from(content: &Content) -> Self {
        Self::new(content.canonical_uri.clone(), content.publisher, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceSummary {
    subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
    #[serde(default)]
    candidates: Vec<String>,
    #[serde(default)]
    equivalents: BTreeMap<Publisher, ContentRef>,
}

impl EquivalenceSummary {
    pub fn new(
        subject: impl Into<String>,
        parent: Option<String>,
        candidates: impl IntoIterator<Item = String>,
        equivalents: BTreeMap<Publisher, ContentRef>,
    ) -> Self {
        Self {
            subject: subject.into(),
            parent,
            candidates: candidates.into_iter().collect(),
            equivalents,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn equivalents(&self) -> &BTreeMap<Publisher, ContentRef> {
        &self.equivalents
    }

    pub fn equivalent_from(&self, publisher: Publisher) -> Option<&ContentRef> {
        self.equivalents.get(&publisher)
    }
}

fn enabled_in_order<'a>(
    contents: &'a [Content],
    config: &ApplicationConfiguration,
    ordering: &PublisherOrdering,
) -> Vec<&'a Content> {
    let mut ranked: Vec<&Content> = contents
        .iter()
        .filter(|c| config.is_enabled(c.publisher))
        .collect();
    ordering.sort_by_key(&mut ranked, |c| c.publisher);
    ranked
}

/// Content from enabled publishers, highest precedence first. Content from
/// the same publisher keeps its input order.
pub fn order_by_precedence<'a>(
    contents: &'a [Content],
    config: &ApplicationConfiguration,
) -> Vec<&'a Content> {
    enabled_in_order(contents, config, config.publisher_precedence_ordering())
}

/// The first value `field` yields along `ranked`.
pub fn merge_field<'a, T, F>(ranked: &[&'a Content], field: F) -> Option<T>
where
    F: Fn(&'a Content) -> Option<T>,
{
    ranked.iter().find_map(|c| field(*c))
}

pub fn select_winner<'a>(
    contents: &'a [Content],
    config: &ApplicationConfiguration,
) -> Option<&'a Content> {
    config
        .publisher_precedence_ordering()
        .min_by_key(contents.iter().filter(|c| config.is_enabled(c.publisher)), |c| c.publisher)
}

pub fn select_image<'a>(
    contents: &'a [Content],
    config: &ApplicationConfiguration,
) -> Option<&'a Image> {
    let ordering = if config.image_precedence_enabled() {
        config.image_precedence_ordering()
    } else {
        config.publisher_precedence_ordering()
    };
    let ranked = enabled_in_order(contents, config, ordering);
    merge_field(&ranked, |c| c.image.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::SourceStatus;
    use crate::model::EntityType;

    fn content(
        uri: &str,
        publisher: Publisher,
        title: Option<&str>,
        image: Option<&str>,
    ) -> Content {
        let mut content = Content::new(uri, publisher, EntityType::Item);
        content.title = title.map(str::to_string);
        content.image = image.map(Image::new);
        content
    }

    fn equivalents() -> Vec<Content> {
        vec![
            content("http://bbc/1", Publisher::Bbc, None, Some("bbc.png")),
            content("http://pa/1", Publisher::Pa, Some("PA Title"), Some("pa.png")),
            content("http://c4/1", Publisher::C4, Some("C4 Title"), None),
        ]
    }

    fn config() -> ApplicationConfiguration {
        ApplicationConfiguration::default_configuration()
            .with_source(Publisher::Pa, SourceStatus::AVAILABLE_ENABLED)
            .copy_with_precedence([Publisher::C4, Publisher::Bbc, Publisher::Pa])
    }

    #[test]
    fn ranks_by_precedence() {
        let contents = equivalents();
        let ranked: Vec<_> = order_by_precedence(&contents, &config())
            .into_iter()
            .map(|c| c.publisher)
            .collect();
        assert_eq!(ranked, vec![Publisher::C4, Publisher::Bbc, Publisher::Pa]);
    }

    #[test]
    fn disabled_publishers_are_dropped() {
        let contents = equivalents();
        let config = config().disable(Publisher::C4).unwrap();
        assert_eq!(order_by_precedence(&contents, &config).len(), 2);
        assert_eq!(select_winner(&contents, &config).map(|c| c.publisher), Some(Publisher::Bbc));
    }

    #[test]
    fn field_comes_from_first_ranked_value() {
        let contents = equivalents();
        let config = config().copy_with_precedence([Publisher::Bbc, Publisher::Pa, Publisher::C4]);
        let ranked = order_by_precedence(&contents, &config);
        assert_eq!(merge_field(&ranked, |c| c.title.as_deref()), Some("PA Title"));
    }

    #[test]
    fn image_uses_image_precedence_when_enabled() {
        let contents = equivalents();
        let image = select_image(&contents, &config()).map(|i| i.uri.as_str());
        assert_eq!(image, Some("pa.png"));

        let config = config().copy_with_image_precedence_enabled(false);
        let image = select_image(&contents, &config).map(|i| i.uri.as_str());
        assert_eq!(image, Some("bbc.png"));
    }

    #[test]
    fn summary_serializes_with_defaults() {
        let summary: EquivalenceSummary =
            serde_json::from_str(r#"{"subject":"http://bbc/1"}"#).unwrap();
        assert_eq!(summary.subject(), "http://bbc/1");
        assert!(summary.candidates().is_empty());
        assert!(summary.equivalents().is_empty());
        assert_eq!(summary.parent(), None);
    }

    #[test]
    fn summary_equivalents_by_publisher() {
        let contents = equivalents();
        let equivalents = contents.iter().map(|c| (c.publisher, ContentRef::from(c))).collect();
        let summary = EquivalenceSummary::new(
            "http://bbc/1",
            None,
            vec!["http://pa/1".to_string()],
            equivalents,
        );
        assert_eq!(
            summary.equivalent_from(Publisher::Pa).map(|r| r.canonical_uri.as_str()),
            Some("http://pa/1")
        );
    }
}
