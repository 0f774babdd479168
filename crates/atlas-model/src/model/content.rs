//! Content and the components content is assembled from.
//!
//! Only the fields the attribute registry can query are modelled. Field names
//! in [`Queryable::values_of`] are the registry's `field_name`s, so an
//! attribute with `field_name = "episodeNumber"` reads [`Content::episode_number`].

use super::{EntityType, Id};
use crate::criteria::{Attribute, Queryable, Value};
use crate::publisher::Publisher;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a location delivers its media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    Link,
    Embed,
    Download,
    Stub,
    Bittorrent,
    Reference,
    Application,
}

impl TransportType {
    pub const KEYS: &'static [&'static str] = &[
        "link",
        "embed",
        "download",
        "stub",
        "bittorrent",
        "reference",
        "application",
    ];

    pub const fn key(self) -> &'static str {
        match self {
            TransportType::Link => "link",
            TransportType::Embed => "embed",
            TransportType::Download => "download",
            TransportType::Stub => "stub",
            TransportType::Bittorrent => "bittorrent",
            TransportType::Reference => "reference",
            TransportType::Application => "application",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageTheme {
    LightOpaque,
    LightTransparent,
    DarkOpaque,
    DarkTransparent,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Image {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ImageTheme>,
}

impl Image {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            theme: None,
        }
    }

    pub fn with_theme(mut self, theme: ImageTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Light opaque images are the ones shown by default.
    pub fn is_primary(&self) -> bool {
        self.theme == Some(ImageTheme::LightOpaque)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    /// Uri of the channel the broadcast is on.
    pub broadcast_on: String,
    pub transmission_time: DateTime<Utc>,
    pub transmission_end_time: DateTime<Utc>,
}

impl Broadcast {
    pub fn new(
        broadcast_on: impl Into<String>,
        transmission_time: DateTime<Utc>,
        transmission_end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            broadcast_on: broadcast_on.into(),
            transmission_time,
            transmission_end_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub uri: String,
    pub transport_type: TransportType,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encoding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_container_format: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    pub canonical_uri: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub publisher: Publisher,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_long_form: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_number: Option<i64>,
    /// Duration of the primary version, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub broadcasts: Vec<Broadcast>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub encodings: Vec<Encoding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
}

impl Content {
    pub fn new(
        canonical_uri: impl Into<String>,
        publisher: Publisher,
        entity_type: EntityType,
    ) -> Self {
        Self {
            id: None,
            canonical_uri: canonical_uri.into(),
            aliases: Vec::new(),
            publisher,
            entity_type,
            title: None,
            genres: Vec::new(),
            tags: Vec::new(),
            is_long_form: false,
            episode_number: None,
            series_number: None,
            duration: None,
            broadcasts: Vec::new(),
            encodings: Vec::new(),
            image: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Whether `uri` is the canonical uri or one of the aliases.
    pub fn is_known_as(&self, uri: &str) -> bool {
        self.canonical_uri == uri || self.aliases.iter().any(|a| a == uri)
    }

    fn locations(&self) -> impl Iterator<Item = &Location> {
        self.encodings.iter().flat_map(|e| e.locations.iter())
    }
}

impl Queryable for Content {
    fn values_of(&self, attribute: &Attribute) -> Vec<Value> {
        match attribute.target {
            EntityType::Broadcast => self
                .broadcasts
                .iter()
                .filter_map(|b| match attribute.field_name {
                    "transmissionTime" => Some(Value::DateTime(b.transmission_time)),
                    "transmissionEndTime" => Some(Value::DateTime(b.transmission_end_time)),
                    "broadcastOn" => Some(Value::String(b.broadcast_on.clone())),
                    _ => None,
                })
                .collect(),
            EntityType::Location => self
                .locations()
                .filter_map(|l| match attribute.field_name {
                    "uri" => Some(Value::String(l.uri.clone())),
                    "transportType" => Some(Value::Enum(l.transport_type.key().to_string())),
                    "available" => Some(Value::Boolean(l.available)),
                    _ => None,
                })
                .collect(),
            EntityType::Encoding => match attribute.field_name {
                "dataContainerFormat" => self
                    .encodings
                    .iter()
                    .filter_map(|e| e.data_container_format.clone())
                    .map(Value::String)
                    .collect(),
                _ => Vec::new(),
            },
            EntityType::Version => match attribute.field_name {
                "duration" => self.duration.map(Value::Integer).into_iter().collect(),
                _ => Vec::new(),
            },
            target if target.applies_to(self.entity_type) => match attribute.field_name {
                "id" => self.id.map(Value::Id).into_iter().collect(),
                "canonicalUri" => vec![Value::String(self.canonical_uri.clone())],
                "title" => self.title.clone().map(Value::String).into_iter().collect(),
                "publisher" => vec![Value::String(self.publisher.key().to_string())],
                "genre" => self.genres.iter().cloned().map(Value::String).collect(),
                "tag" => self.tags.iter().cloned().map(Value::String).collect(),
                "isLongForm" => vec![Value::Boolean(self.is_long_form)],
                "episodeNumber" => self.episode_number.map(Value::Integer).into_iter().collect(),
                "seriesNumber" => self.series_number.map(Value::Integer).into_iter().collect(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }
}
