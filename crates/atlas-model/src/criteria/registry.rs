//! The attribute registry.
//!
//! Every queryable attribute is declared here as a `const`, and
//! [`ALL_ATTRIBUTES`] lists the ones reachable by name. The lookup table is
//! built from that list the first time it is used and is read-only afterwards.
//!
//! ## Lookup
//!
//! [`AttributeRegistry::lookup`] resolves, in order:
//!
//! 1. an external name (`item.title`) or alias (`transmissionTime`),
//! 2. for an unqualified name, `<context>.<name>` where `context` is the
//!    entity type being queried (`title` while querying items is `item.title`).
//!
//! A miss is `None`; whether that is an error is the caller's decision.
//!
//! ## Collisions
//!
//! Two attributes with the same external name, or an alias shared by two
//! attributes, make [`AttributeRegistry::new`] fail. The static registry
//! treats that as a startup bug and panics.

use super::attribute::Attribute;
use crate::error::{AtlasError, Result};
use crate::model::{EntityType, TransportType};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::debug;

// Titles
pub const ITEM_TITLE: Attribute = Attribute::string("title", EntityType::Item);
pub const PLAYLIST_TITLE: Attribute = Attribute::string("title", EntityType::Playlist);
pub const BRAND_TITLE: Attribute = Attribute::string("title", EntityType::Brand);

// Uris
pub const DESCRIPTION_URI: Attribute =
    Attribute::string("uri", EntityType::Description).with_field("canonicalUri");
pub const ITEM_URI: Attribute =
    Attribute::string("uri", EntityType::Item).with_field("canonicalUri");
pub const PLAYLIST_URI: Attribute =
    Attribute::string("uri", EntityType::Playlist).with_field("canonicalUri");
pub const EPISODE_URI: Attribute =
    Attribute::string("uri", EntityType::Episode).with_field("canonicalUri");
pub const BRAND_URI: Attribute =
    Attribute::string("uri", EntityType::Brand).with_field("canonicalUri");
pub const LOCATION_URI: Attribute = Attribute::string("uri", EntityType::Location);

pub const CONTENT_ID: Attribute = Attribute::id("id", EntityType::Description);

pub const ITEM_IS_LONG_FORM: Attribute =
    Attribute::boolean("isLongForm", EntityType::Item).allow_short_matches();

// Publishers, compared by key
pub const ITEM_PUBLISHER: Attribute = Attribute::string("publisher", EntityType::Item);
pub const PLAYLIST_PUBLISHER: Attribute = Attribute::string("publisher", EntityType::Playlist);
pub const BRAND_PUBLISHER: Attribute = Attribute::string("publisher", EntityType::Brand);

pub const ENCODING_DATA_CONTAINER_FORMAT: Attribute =
    Attribute::string("dataContainerFormat", EntityType::Encoding).allow_short_matches();

// Lists of strings
pub const ITEM_GENRE: Attribute = Attribute::string("genre", EntityType::Item).collection();
pub const ITEM_TAG: Attribute = Attribute::string("tag", EntityType::Item).collection();
pub const PLAYLIST_GENRE: Attribute = Attribute::string("genre", EntityType::Playlist).collection();
pub const PLAYLIST_TAG: Attribute = Attribute::string("tag", EntityType::Playlist).collection();
pub const BRAND_GENRE: Attribute = Attribute::string("genre", EntityType::Brand).collection();
pub const BRAND_TAG: Attribute = Attribute::string("tag", EntityType::Brand).collection();

pub const LOCATION_TRANSPORT_TYPE: Attribute =
    Attribute::enumerated("transportType", EntityType::Location, TransportType::KEYS)
        .allow_short_matches();

// Integers
pub const EPISODE_POSITION: Attribute = Attribute::integer("position", EntityType::Episode)
    .with_field("episodeNumber")
    .allow_short_matches();
pub const EPISODE_SEASON_POSITION: Attribute =
    Attribute::integer("seasonPosition", EntityType::Episode)
        .with_field("seriesNumber")
        .allow_short_matches();
pub const VERSION_DURATION: Attribute =
    Attribute::integer("duration", EntityType::Version).allow_short_matches();

// Broadcasts
pub const BROADCAST_TRANSMISSION_TIME: Attribute =
    Attribute::date_time("transmissionTime", EntityType::Broadcast).allow_short_matches();
pub const BROADCAST_TRANSMISSION_END_TIME: Attribute =
    Attribute::date_time("transmissionEndTime", EntityType::Broadcast).allow_short_matches();
pub const BROADCAST_ON: Attribute =
    Attribute::string("broadcastOn", EntityType::Broadcast).allow_short_matches();

pub const LOCATION_AVAILABLE: Attribute =
    Attribute::boolean("available", EntityType::Location).allow_short_matches();

/// Every attribute reachable through [`lookup`].
pub const ALL_ATTRIBUTES: &[Attribute] = &[
    ITEM_TITLE,
    BRAND_TITLE,
    PLAYLIST_TITLE,
    DESCRIPTION_URI,
    ITEM_URI,
    BRAND_URI,
    PLAYLIST_URI,
    EPISODE_URI,
    LOCATION_URI,
    CONTENT_ID,
    ITEM_GENRE,
    ITEM_TAG,
    PLAYLIST_TAG,
    PLAYLIST_GENRE,
    BRAND_TAG,
    BRAND_GENRE,
    ITEM_PUBLISHER,
    BRAND_PUBLISHER,
    PLAYLIST_PUBLISHER,
    VERSION_DURATION,
    BROADCAST_TRANSMISSION_TIME,
    BROADCAST_TRANSMISSION_END_TIME,
    BROADCAST_ON,
    LOCATION_TRANSPORT_TYPE,
    EPISODE_POSITION,
    EPISODE_SEASON_POSITION,
    LOCATION_AVAILABLE,
    ENCODING_DATA_CONTAINER_FORMAT,
    ITEM_IS_LONG_FORM,
];

static REGISTRY: Lazy<AttributeRegistry> =
    Lazy::new(|| match AttributeRegistry::new(ALL_ATTRIBUTES) {
        Ok(registry) => registry,
        Err(err) => panic!("invalid attribute registry: {err}"),
    });

/// The process-wide registry built from [`ALL_ATTRIBUTES`].
pub fn registry() -> &'static AttributeRegistry {
    &REGISTRY
}

/// Looks `name` up in the process-wide registry.
pub fn lookup(name: &str, context: EntityType) -> Option<&'static Attribute> {
    REGISTRY.lookup(name, context)
}

#[derive(Debug, Clone)]
pub struct AttributeRegistry {
    attributes: Vec<Attribute>,
    table: HashMap<String, usize>,
}

impl AttributeRegistry {
    pub fn new(attributes: &[Attribute]) -> Result<Self> {
        let mut table = HashMap::new();
        for (index, attribute) in attributes.iter().enumerate() {
            let external = attribute.external_name();
            if table.insert(external.clone(), index).is_some() {
                return Err(AtlasError::DuplicateAttribute(external));
            }
            if let Some(alias) = attribute.alias {
                if table.insert(alias.to_string(), index).is_some() {
                    return Err(AtlasError::DuplicateAttribute(alias.to_string()));
                }
            }
        }
        debug!(
            attributes = attributes.len(),
            keys = table.len(),
            "built attribute registry"
        );
        Ok(Self {
            attributes: attributes.to_vec(),
            table,
        })
    }

    /// Exact match on an external name or alias.
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.table.get(name).map(|&index| &self.attributes[index])
    }

    pub fn lookup(&self, name: &str, context: EntityType) -> Option<&Attribute> {
        self.get(name).or_else(|| {
            if name.contains('.') {
                None
            } else {
                self.get(&format!("{}.{}", context.key(), name))
            }
        })
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
