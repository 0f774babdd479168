//! # Application Configuration
//!
//! Which sources an application may read, which it may write, and in what
//! order their data wins when equivalent content is merged.
//!
//! ## Functional Updates
//!
//! [`ApplicationConfiguration`] has no setters. Every operation (`enable`,
//! `approve`, `copy_with_precedence`, …) returns a new configuration and leaves
//! the receiver untouched, so a configuration can be shared freely between
//! threads and request handlers.
//!
//! ## Derived State
//!
//! Statuses are stored sparsely: a publisher with no recorded status reports
//! [`Publisher::default_source_status`]. The enabled set is derived from the
//! statuses on every construction and is never patched incrementally, so
//! `enabled_sources() == { p | status_of(p).is_enabled() }` always holds.
//!
//! ## Precedence
//!
//! - `precedence = None`: precedence disabled, [`ordered_publishers`] falls
//!   back to declaration order.
//! - `precedence = Some(list)`: the list is completed on construction (see
//!   [`complete_precedence`](super::complete_precedence)); an empty list is
//!   *enabled* precedence in natural order, not the same as `None`.
//!
//! Image and people precedence are independent orderings seeded from
//! [`DEFAULT_IMAGE_PRECEDENCE`] and [`DEFAULT_PEOPLE_PRECEDENCE`] unless the
//! [`AtlasConfig`] overrides them.
//!
//! [`ordered_publishers`]: ApplicationConfiguration::ordered_publishers

use super::precedence::PublisherOrdering;
use super::source_status::SourceStatus;
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::publisher::Publisher;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub const DEFAULT_IMAGE_PRECEDENCE: [Publisher; 3] = [Publisher::Pa, Publisher::Bbc, Publisher::C4];

pub const DEFAULT_PEOPLE_PRECEDENCE: [Publisher; 5] = [
    Publisher::RadioTimes,
    Publisher::Pa,
    Publisher::Bbc,
    Publisher::C4,
    Publisher::Itv,
];

static DEFAULT_CONFIGURATION: Lazy<ApplicationConfiguration> =
    Lazy::new(|| ApplicationConfiguration::new(BTreeMap::new(), None));

static NO_API_KEY_CONFIGURATION: Lazy<ApplicationConfiguration> = Lazy::new(|| {
    DEFAULT_CONFIGURATION.copy_with_source_statuses(
        Publisher::ALL
            .into_iter()
            .map(|p| {
                let status = if p.enabled_with_no_api_key() {
                    SourceStatus::AVAILABLE_ENABLED
                } else {
                    SourceStatus::UNAVAILABLE
                };
                (p, status)
            })
            .collect(),
    )
});

static NATURAL_ORDERING: Lazy<PublisherOrdering> = Lazy::new(PublisherOrdering::natural);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationConfiguration {
    source_statuses: BTreeMap<Publisher, SourceStatus>,
    enabled_sources: BTreeSet<Publisher>,
    precedence: Option<PublisherOrdering>,
    writable_sources: BTreeSet<Publisher>,
    image_precedence_enabled: Option<bool>,
    image_precedence: PublisherOrdering,
    people_precedence: PublisherOrdering,
}

impl ApplicationConfiguration {
    /// A configuration with the given statuses and precedence and nothing else.
    pub fn new(
        source_statuses: BTreeMap<Publisher, SourceStatus>,
        precedence: Option<Vec<Publisher>>,
    ) -> Self {
        Self {
            enabled_sources: enabled_publishers(&source_statuses),
            source_statuses,
            precedence: precedence.map(PublisherOrdering::explicit),
            writable_sources: BTreeSet::new(),
            image_precedence_enabled: None,
            image_precedence: PublisherOrdering::explicit(DEFAULT_IMAGE_PRECEDENCE),
            people_precedence: PublisherOrdering::explicit(DEFAULT_PEOPLE_PRECEDENCE),
        }
    }

    /// No recorded statuses and no explicit precedence.
    pub fn default_configuration() -> &'static ApplicationConfiguration {
        &DEFAULT_CONFIGURATION
    }

    /// The configuration applied to requests made without an API key.
    pub fn for_no_api_key() -> &'static ApplicationConfiguration {
        &NO_API_KEY_CONFIGURATION
    }

    /// The default configuration with precedence lists taken from `config`.
    pub fn from_config(config: &AtlasConfig) -> Result<Self> {
        Ok(Self::default_configuration()
            .copy_with_image_precedence(config.image_precedence()?)
            .copy_with_people_precedence(config.people_precedence()?))
    }

    // --- Source statuses ---

    pub fn status_of(&self, source: Publisher) -> SourceStatus {
        self.source_statuses
            .get(&source)
            .copied()
            .unwrap_or_else(|| source.default_source_status())
    }

    /// Status of every publisher, defaults filled in.
    pub fn source_statuses(&self) -> BTreeMap<Publisher, SourceStatus> {
        Publisher::ALL
            .into_iter()
            .map(|p| (p, self.status_of(p)))
            .collect()
    }

    pub fn is_enabled(&self, source: Publisher) -> bool {
        self.enabled_sources.contains(&source)
    }

    pub fn enabled_sources(&self) -> &BTreeSet<Publisher> {
        &self.enabled_sources
    }

    pub fn enable(&self, source: Publisher) -> Result<Self> {
        self.transition(source, "enable", SourceStatus::enable)
    }

    pub fn disable(&self, source: Publisher) -> Result<Self> {
        self.transition(source, "disable", |status| Ok(status.disable()))
    }

    pub fn request(&self, source: Publisher) -> Result<Self> {
        self.transition(source, "request", SourceStatus::request)
    }

    pub fn deny(&self, source: Publisher) -> Result<Self> {
        self.transition(source, "deny", SourceStatus::deny)
    }

    pub fn revoke(&self, source: Publisher) -> Result<Self> {
        self.transition(source, "revoke", SourceStatus::revoke)
    }

    /// Grants a requested source. Licensed sources need `agree_licence` first.
    pub fn approve(&self, source: Publisher) -> Result<Self> {
        self.transition(source, "approve", |status| {
            let approved = status.approve()?;
            if source.requires_licence() && !status.is_licence_agreed() {
                return Err(AtlasError::LicenceRequired(source));
            }
            Ok(approved)
        })
    }

    pub fn agree_licence(&self, source: Publisher) -> Result<Self> {
        self.transition(source, "agree licence", |status| Ok(status.agree_licence()))
    }

    pub fn reset(&self, source: Publisher) -> Result<Self> {
        self.transition(source, "reset", |status| Ok(status.reset(source)))
    }

    fn transition<F>(&self, source: Publisher, action: &'static str, apply: F) -> Result<Self>
    where
        F: FnOnce(SourceStatus) -> Result<SourceStatus>,
    {
        let current = self.status_of(source);
        let next = apply(current)?;
        debug!(
            publisher = %source,
            action,
            from = %current.state(),
            to = %next.state(),
            enabled = next.is_enabled(),
            "source status transition"
        );
        Ok(self.with_source(source, next))
    }

    pub fn with_source(&self, source: Publisher, status: SourceStatus) -> Self {
        let mut statuses = self.source_statuses.clone();
        statuses.insert(source, status);
        self.rebuild(statuses)
    }

    /// Merges `statuses` over the recorded ones.
    pub fn with_sources(&self, statuses: &BTreeMap<Publisher, SourceStatus>) -> Self {
        let mut merged = self.source_statuses.clone();
        merged.extend(statuses.iter().map(|(p, s)| (*p, *s)));
        self.rebuild(merged)
    }

    /// Replaces the recorded statuses wholesale.
    pub fn copy_with_source_statuses(&self, statuses: BTreeMap<Publisher, SourceStatus>) -> Self {
        self.rebuild(statuses)
    }

    fn rebuild(&self, source_statuses: BTreeMap<Publisher, SourceStatus>) -> Self {
        Self {
            enabled_sources: enabled_publishers(&source_statuses),
            source_statuses,
            ..self.clone()
        }
    }

    // --- Writes ---

    pub fn copy_with_writable_sources<I>(&self, writable: I) -> Self
    where
        I: IntoIterator<Item = Publisher>,
    {
        Self {
            writable_sources: writable.into_iter().collect(),
            ..self.clone()
        }
    }

    pub fn can_write(&self, source: Publisher) -> bool {
        self.writable_sources.contains(&source)
    }

    pub fn writable_sources(&self) -> &BTreeSet<Publisher> {
        &self.writable_sources
    }

    // --- Precedence ---

    pub fn copy_with_precedence<I>(&self, publishers: I) -> Self
    where
        I: IntoIterator<Item = Publisher>,
    {
        Self {
            precedence: Some(PublisherOrdering::explicit(publishers)),
            ..self.clone()
        }
    }

    pub fn copy_with_null_precedence(&self) -> Self {
        Self {
            precedence: None,
            ..self.clone()
        }
    }

    pub fn precedence_enabled(&self) -> bool {
        self.precedence.is_some()
    }

    /// The completed explicit precedence, or `None` when precedence is disabled.
    pub fn precedence(&self) -> Option<&[Publisher]> {
        self.precedence.as_ref().map(PublisherOrdering::publishers)
    }

    /// Explicit precedence when enabled, declaration order otherwise.
    pub fn publisher_precedence_ordering(&self) -> &PublisherOrdering {
        self.precedence.as_ref().unwrap_or(&NATURAL_ORDERING)
    }

    pub fn ordered_publishers(&self) -> &[Publisher] {
        self.publisher_precedence_ordering().publishers()
    }

    pub fn copy_with_image_precedence_enabled(&self, enabled: bool) -> Self {
        Self {
            image_precedence_enabled: Some(enabled),
            ..self.clone()
        }
    }

    /// Image precedence applies unless explicitly switched off.
    pub fn image_precedence_enabled(&self) -> bool {
        self.image_precedence_enabled != Some(false)
    }

    pub fn copy_with_image_precedence<I>(&self, publishers: I) -> Self
    where
        I: IntoIterator<Item = Publisher>,
    {
        Self {
            image_precedence: PublisherOrdering::explicit(publishers),
            ..self.clone()
        }
    }

    pub fn image_precedence_ordering(&self) -> &PublisherOrdering {
        &self.image_precedence
    }

    pub fn copy_with_people_precedence<I>(&self, publishers: I) -> Self
    where
        I: IntoIterator<Item = Publisher>,
    {
        Self {
            people_precedence: PublisherOrdering::explicit(publishers),
            ..self.clone()
        }
    }

    pub fn people_precedence_ordering(&self) -> &PublisherOrdering {
        &self.people_precedence
    }
}

impl Default for ApplicationConfiguration {
    fn default() -> Self {
        DEFAULT_CONFIGURATION.clone()
    }
}

fn enabled_publishers(statuses: &BTreeMap<Publisher, SourceStatus>) -> BTreeSet<Publisher> {
    Publisher::ALL
        .into_iter()
        .filter(|p| {
            statuses
                .get(p)
                .copied()
                .unwrap_or_else(|| p.default_source_status())
                .is_enabled()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::SourceState;

    fn config() -> ApplicationConfiguration {
        ApplicationConfiguration::default()
    }

    #[test]
    fn missing_status_falls_back_to_default() {
        for publisher in Publisher::ALL {
            assert_eq!(
                config().status_of(publisher),
                publisher.default_source_status()
            );
        }
    }

    #[test]
    fn default_enabled_set_matches_defaults() {
        let config = config();
        for publisher in Publisher::ALL {
            assert_eq!(
                config.is_enabled(publisher),
                publisher.default_source_status().is_enabled()
            );
        }
    }

    #[test]
    fn with_source_records_status_and_updates_enabled_set() {
        let updated = config().with_source(Publisher::Pa, SourceStatus::AVAILABLE_ENABLED);
        assert_eq!(updated.status_of(Publisher::Pa), SourceStatus::AVAILABLE_ENABLED);
        assert!(updated.is_enabled(Publisher::Pa));

        let disabled = updated.with_source(Publisher::Pa, SourceStatus::AVAILABLE_DISABLED);
        assert!(!disabled.is_enabled(Publisher::Pa));
    }

    #[test]
    fn updates_leave_receiver_untouched() {
        let original = config();
        let _updated = original.with_source(Publisher::Pa, SourceStatus::AVAILABLE_ENABLED);
        assert!(!original.is_enabled(Publisher::Pa));
    }

    #[test]
    fn enable_disable_round_trip() {
        let enabled = config().enable(Publisher::Youtube).unwrap();
        assert!(enabled.is_enabled(Publisher::Youtube));
        let disabled = enabled.disable(Publisher::Youtube).unwrap();
        assert!(!disabled.is_enabled(Publisher::Youtube));
        assert_eq!(
            disabled.status_of(Publisher::Youtube).state(),
            SourceState::Available
        );
    }

    #[test]
    fn enable_unavailable_source_fails() {
        let err = config().enable(Publisher::BbcRedux).unwrap_err();
        assert!(matches!(err, AtlasError::IllegalTransition { .. }));
    }

    #[test]
    fn licensed_source_needs_agreement_before_approval() {
        let requested = config().request(Publisher::Pa).unwrap();
        let err = requested.approve(Publisher::Pa).unwrap_err();
        assert!(matches!(err, AtlasError::LicenceRequired(Publisher::Pa)));

        let approved = requested
            .agree_licence(Publisher::Pa)
            .and_then(|c| c.approve(Publisher::Pa))
            .and_then(|c| c.enable(Publisher::Pa))
            .unwrap();
        assert!(approved.is_enabled(Publisher::Pa));
    }

    #[test]
    fn unlicensed_source_approves_directly() {
        let approved = config()
            .request(Publisher::BbcRedux)
            .and_then(|c| c.approve(Publisher::BbcRedux))
            .unwrap();
        assert_eq!(
            approved.status_of(Publisher::BbcRedux),
            SourceStatus::AVAILABLE_DISABLED
        );
    }

    #[test]
    fn reset_restores_default() {
        let revoked = config().revoke(Publisher::Bbc).unwrap();
        assert!(!revoked.is_enabled(Publisher::Bbc));
        let reset = revoked.reset(Publisher::Bbc).unwrap();
        assert!(reset.is_enabled(Publisher::Bbc));
    }

    #[test]
    fn with_sources_merges_and_keeps_other_settings() {
        let base = config()
            .copy_with_writable_sources([Publisher::Metabroadcast])
            .copy_with_image_precedence_enabled(false);
        let statuses = BTreeMap::from([
            (Publisher::Bbc, SourceStatus::AVAILABLE_DISABLED),
            (Publisher::Netflix, SourceStatus::AVAILABLE_ENABLED),
        ]);
        let merged = base.with_sources(&statuses);
        assert!(!merged.is_enabled(Publisher::Bbc));
        assert!(merged.is_enabled(Publisher::Netflix));
        assert!(merged.can_write(Publisher::Metabroadcast));
        assert!(!merged.image_precedence_enabled());
    }

    #[test]
    fn null_precedence_uses_declaration_order() {
        let config = config();
        assert!(!config.precedence_enabled());
        assert_eq!(config.precedence(), None);
        assert_eq!(config.ordered_publishers(), &Publisher::ALL);
    }

    #[test]
    fn empty_precedence_is_enabled_and_complete() {
        let config = config().copy_with_precedence([]);
        assert!(config.precedence_enabled());
        assert_eq!(config.precedence().map(<[Publisher]>::len), Some(Publisher::COUNT));
    }

    #[test]
    fn explicit_precedence_is_completed() {
        let config = config().copy_with_precedence([Publisher::Itv, Publisher::Pa]);
        let precedence = config.precedence().unwrap();
        assert_eq!(precedence.len(), Publisher::COUNT);
        assert_eq!(&precedence[..2], &[Publisher::Itv, Publisher::Pa]);
        assert_eq!(precedence[2], Publisher::Bbc);

        let disabled = config.copy_with_null_precedence();
        assert!(!disabled.precedence_enabled());
    }

    #[test]
    fn precedence_survives_status_updates() {
        let config = config()
            .copy_with_precedence([Publisher::Five])
            .enable(Publisher::Youtube)
            .unwrap();
        assert_eq!(config.ordered_publishers()[0], Publisher::Five);
    }

    #[test]
    fn image_and_people_precedence_defaults() {
        let config = config();
        assert!(config.image_precedence_enabled());
        assert_eq!(
            &config.image_precedence_ordering().publishers()[..3],
            &DEFAULT_IMAGE_PRECEDENCE
        );
        assert_eq!(
            &config.people_precedence_ordering().publishers()[..5],
            &DEFAULT_PEOPLE_PRECEDENCE
        );
        assert_eq!(
            config.image_precedence_ordering().publishers().len(),
            Publisher::COUNT
        );
    }

    #[test]
    fn no_api_key_configuration() {
        let config = ApplicationConfiguration::for_no_api_key();
        for publisher in Publisher::ALL {
            assert_eq!(config.is_enabled(publisher), publisher.enabled_with_no_api_key());
        }
        assert_eq!(
            config.status_of(Publisher::Youtube),
            SourceStatus::UNAVAILABLE
        );
    }

    #[test]
    fn writable_sources() {
        let config = config().copy_with_writable_sources([Publisher::Metabroadcast]);
        assert!(config.can_write(Publisher::Metabroadcast));
        assert!(!config.can_write(Publisher::Bbc));
    }
}
