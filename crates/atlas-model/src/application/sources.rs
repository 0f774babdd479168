//! Application records and their source lists.
//!
//! [`ApplicationSources`] is the persisted shape of an application's source
//! configuration: an ordered list of read entries (the order *is* the
//! precedence when precedence is switched on) plus the publishers it may
//! write. [`ApplicationSources::to_configuration`] turns it into the
//! [`ApplicationConfiguration`] consulted at request time.

use super::configuration::ApplicationConfiguration;
use super::precedence::PublisherOrdering;
use super::source_status::SourceStatus;
use crate::error::{AtlasError, Result};
use crate::model::Id;
use crate::publisher::Publisher;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static EMPTY_SOURCES: Lazy<ApplicationSources> =
    Lazy::new(|| ApplicationSources::builder().build());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReadEntry {
    pub publisher: Publisher,
    pub status: SourceStatus,
}

impl SourceReadEntry {
    pub fn new(publisher: Publisher, status: SourceStatus) -> Self {
        Self { publisher, status }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSources {
    precedence: bool,
    reads: Vec<SourceReadEntry>,
    writes: Vec<Publisher>,
}

impl ApplicationSources {
    pub fn empty() -> &'static ApplicationSources {
        &EMPTY_SOURCES
    }

    pub fn builder() -> ApplicationSourcesBuilder {
        ApplicationSourcesBuilder::default()
    }

    /// A builder pre-filled with this value's fields.
    pub fn copy(&self) -> ApplicationSourcesBuilder {
        ApplicationSourcesBuilder {
            precedence: self.precedence,
            reads: self.reads.clone(),
            writes: self.writes.clone(),
        }
    }

    pub fn is_precedence_enabled(&self) -> bool {
        self.precedence
    }

    pub fn reads(&self) -> &[SourceReadEntry] {
        &self.reads
    }

    pub fn writes(&self) -> &[Publisher] {
        &self.writes
    }

    /// Read order, completed to cover every publisher.
    pub fn publisher_precedence_ordering(&self) -> PublisherOrdering {
        PublisherOrdering::explicit(self.reads.iter().map(|entry| entry.publisher))
    }

    pub fn enabled_read_sources(&self) -> Vec<Publisher> {
        self.reads
            .iter()
            .filter(|entry| entry.status.is_enabled())
            .map(|entry| entry.publisher)
            .collect()
    }

    pub fn to_configuration(&self) -> ApplicationConfiguration {
        let statuses = self
            .reads
            .iter()
            .map(|entry| (entry.publisher, entry.status))
            .collect();
        let precedence = self
            .precedence
            .then(|| self.reads.iter().map(|entry| entry.publisher).collect());
        ApplicationConfiguration::new(statuses, precedence)
            .copy_with_writable_sources(self.writes.iter().copied())
    }
}

#[derive(Debug, Default)]
pub struct ApplicationSourcesBuilder {
    precedence: bool,
    reads: Vec<SourceReadEntry>,
    writes: Vec<Publisher>,
}

impl ApplicationSourcesBuilder {
    pub fn with_precedence(mut self, precedence: bool) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn with_reads(mut self, reads: Vec<SourceReadEntry>) -> Self {
        self.reads = reads;
        self
    }

    pub fn with_read(mut self, publisher: Publisher, status: SourceStatus) -> Self {
        self.reads.push(SourceReadEntry::new(publisher, status));
        self
    }

    pub fn with_writes(mut self, writes: Vec<Publisher>) -> Self {
        self.writes = writes;
        self
    }

    /// Later read entries and writes for an already-listed publisher are
    /// dropped.
    pub fn build(self) -> ApplicationSources {
        let mut reads: Vec<SourceReadEntry> = Vec::with_capacity(self.reads.len());
        for entry in self.reads {
            if !reads.iter().any(|r| r.publisher == entry.publisher) {
                reads.push(entry);
            }
        }
        let mut writes: Vec<Publisher> = Vec::with_capacity(self.writes.len());
        for publisher in self.writes {
            if !writes.contains(&publisher) {
                writes.push(publisher);
            }
        }
        ApplicationSources {
            precedence: self.precedence,
            reads,
            writes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCredentials {
    pub api_key: String,
}

impl ApplicationCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Fresh credentials with a random key.
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4().simple().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    id: Option<Id>,
    /// Short unique name the application is addressed by.
    slug: String,
    title: String,
    created: DateTime<Utc>,
    credentials: ApplicationCredentials,
    sources: ApplicationSources,
}

impl Application {
    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::default()
    }

    pub fn copy(&self) -> ApplicationBuilder {
        ApplicationBuilder {
            id: self.id,
            slug: Some(self.slug.clone()),
            title: Some(self.title.clone()),
            created: Some(self.created),
            credentials: Some(self.credentials.clone()),
            sources: Some(self.sources.clone()),
        }
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn credentials(&self) -> &ApplicationCredentials {
        &self.credentials
    }

    pub fn sources(&self) -> &ApplicationSources {
        &self.sources
    }

    pub fn configuration(&self) -> ApplicationConfiguration {
        self.sources.to_configuration()
    }
}

#[derive(Debug, Default)]
pub struct ApplicationBuilder {
    id: Option<Id>,
    slug: Option<String>,
    title: Option<String>,
    created: Option<DateTime<Utc>>,
    credentials: Option<ApplicationCredentials>,
    sources: Option<ApplicationSources>,
}

impl ApplicationBuilder {
    pub fn with_id(mut self, id: Id) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn with_credentials(mut self, credentials: ApplicationCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_sources(mut self, sources: ApplicationSources) -> Self {
        self.sources = Some(sources);
        self
    }

    /// A slug is required. The title defaults to the slug, credentials are
    /// generated and sources start empty.
    pub fn build(self) -> Result<Application> {
        let slug = self
            .slug
            .filter(|s| !s.trim().is_empty())
            .ok_or(AtlasError::MissingField("slug"))?;
        Ok(Application {
            id: self.id,
            title: self.title.unwrap_or_else(|| slug.clone()),
            slug,
            created: self.created.unwrap_or_else(Utc::now),
            credentials: self.credentials.unwrap_or_else(ApplicationCredentials::generate),
            sources: self
                .sources
                .unwrap_or_else(|| ApplicationSources::empty().clone()),
        })
    }
}
