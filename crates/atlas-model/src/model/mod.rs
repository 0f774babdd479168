//! # Entity Layer
//!
//! The catalogue's entities, kept deliberately thin: only the fields the
//! query, precedence and temporal-resolution code reads are modelled.
//!
//! - [`Id`]: Numeric entity identifier
//! - [`EntityType`]: The kinds of entity an [`Attribute`](crate::criteria::Attribute)
//!   can target, with the lowercase key used in qualified attribute names
//! - [`content`]: [`Content`] with its broadcasts, encodings and locations,
//!   and [`Image`]
//! - [`temporal`]: [`TemporalField`] and date-window resolution
//! - [`channel`]: [`Channel`], whose titles and images are temporal

pub mod channel;
pub mod content;
pub mod temporal;

pub use channel::{Channel, ChannelBuilder};
pub use content::{Broadcast, Content, Encoding, Image, ImageTheme, Location, TransportType};
pub use temporal::TemporalField;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(u64);

impl Id {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for Id {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The entity kinds known to the catalogue.
///
/// Top-level content (items, episodes, films, brands, series) sits next to
/// the components content is built from (versions, broadcasts, encodings,
/// locations) and the standalone entities (channels, topics, people).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Fields shared by every piece of content.
    Description,
    Item,
    Episode,
    Film,
    Brand,
    Series,
    Playlist,
    Version,
    Broadcast,
    Encoding,
    Location,
    Channel,
    Topic,
    Person,
}

impl EntityType {
    pub const ALL: [EntityType; 14] = [
        EntityType::Description,
        EntityType::Item,
        EntityType::Episode,
        EntityType::Film,
        EntityType::Brand,
        EntityType::Series,
        EntityType::Playlist,
        EntityType::Version,
        EntityType::Broadcast,
        EntityType::Encoding,
        EntityType::Location,
        EntityType::Channel,
        EntityType::Topic,
        EntityType::Person,
    ];

    /// Lowercase key, used as the prefix of qualified attribute names.
    pub const fn key(self) -> &'static str {
        match self {
            EntityType::Description => "description",
            EntityType::Item => "item",
            EntityType::Episode => "episode",
            EntityType::Film => "film",
            EntityType::Brand => "brand",
            EntityType::Series => "series",
            EntityType::Playlist => "playlist",
            EntityType::Version => "version",
            EntityType::Broadcast => "broadcast",
            EntityType::Encoding => "encoding",
            EntityType::Location => "location",
            EntityType::Channel => "channel",
            EntityType::Topic => "topic",
            EntityType::Person => "person",
        }
    }

    pub fn from_key(key: &str) -> Option<EntityType> {
        EntityType::ALL.into_iter().find(|t| t.key() == key)
    }

    /// Episodes and films are items.
    pub const fn is_item(self) -> bool {
        matches!(
            self,
            EntityType::Item | EntityType::Episode | EntityType::Film
        )
    }

    /// Brands, series and playlists group other content.
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            EntityType::Brand | EntityType::Series | EntityType::Playlist
        )
    }

    pub const fn is_content(self) -> bool {
        self.is_item() || self.is_container()
    }

    /// Whether an attribute declared on `self` applies to an entity of type
    /// `entity`. Description attributes apply to all content, item attributes
    /// to episodes and films, brand attributes to series.
    pub const fn applies_to(self, entity: EntityType) -> bool {
        match self {
            EntityType::Description => entity.is_content(),
            EntityType::Item => entity.is_item(),
            EntityType::Brand => matches!(entity, EntityType::Brand | EntityType::Series),
            other => other as u8 == entity as u8,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for entity in EntityType::ALL {
            assert_eq!(EntityType::from_key(entity.key()), Some(entity));
        }
        assert_eq!(EntityType::from_key("gadget"), None);
    }

    #[test]
    fn item_attributes_apply_to_episodes() {
        assert!(EntityType::Item.applies_to(EntityType::Episode));
        assert!(EntityType::Item.applies_to(EntityType::Film));
        assert!(!EntityType::Item.applies_to(EntityType::Brand));
    }

    #[test]
    fn description_applies_to_all_content() {
        assert!(EntityType::Description.applies_to(EntityType::Brand));
        assert!(EntityType::Description.applies_to(EntityType::Episode));
        assert!(!EntityType::Description.applies_to(EntityType::Channel));
    }

    #[test]
    fn component_types_only_apply_to_themselves() {
        assert!(EntityType::Broadcast.applies_to(EntityType::Broadcast));
        assert!(!EntityType::Broadcast.applies_to(EntityType::Location));
    }

    #[test]
    fn id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Id::new(42)).unwrap(), "42");
    }
}
