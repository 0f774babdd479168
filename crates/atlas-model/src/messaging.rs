//! # Change Messages
//!
//! Messages tell downstream workers that an entity changed. Every message
//! carries its own id and timestamp plus the identity of the entity: id,
//! type and source publisher.
//!
//! A [`ReplayMessage`] re-sends exactly one earlier [`EntityUpdatedMessage`];
//! replays never nest. On the wire messages are JSON objects tagged by
//! `"type"`:
//!
//! ```json
//! {"type":"entityUpdated","messageId":"…","timestamp":"…","entityId":"…",
//!  "entityType":"item","entitySource":"bbc.co.uk"}
//! ```

use crate::error::Result;
use crate::model::EntityType;
use crate::publisher::Publisher;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

pub trait Message {
    fn message_id(&self) -> &str;
    fn timestamp(&self) -> DateTime<Utc>;
    fn entity_id(&self) -> &str;
    fn entity_type(&self) -> EntityType;
    fn entity_source(&self) -> Publisher;

    /// Hands the message to the `worker` method for its type.
    fn dispatch_to(&self, worker: &mut dyn Worker) -> Result<()>;
}

/// Receives messages by type.
pub trait Worker {
    fn process_entity_updated(&mut self, message: &EntityUpdatedMessage) -> Result<()>;

    /// Replays are processed as their original unless overridden.
    fn process_replay(&mut self, message: &ReplayMessage) -> Result<()> {
        self.process_entity_updated(message.original())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityUpdatedMessage {
    message_id: String,
    timestamp: DateTime<Utc>,
    entity_id: String,
    entity_type: EntityType,
    entity_source: Publisher,
}

impl EntityUpdatedMessage {
    /// A message stamped with a fresh id and the current time.
    pub fn new(
        entity_id: impl Into<String>,
        entity_type: EntityType,
        entity_source: Publisher,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4().to_string(),
            Utc::now(),
            entity_id,
            entity_type,
            entity_source,
        )
    }

    pub fn with_id(
        message_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        entity_id: impl Into<String>,
        entity_type: EntityType,
        entity_source: Publisher,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            timestamp,
            entity_id: entity_id.into(),
            entity_type,
            entity_source,
        }
    }
}

impl Message for EntityUpdatedMessage {
    fn message_id(&self) -> &str {
        &self.message_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn entity_id(&self) -> &str {
        &self.entity_id
    }

    fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    fn entity_source(&self) -> Publisher {
        self.entity_source
    }

    fn dispatch_to(&self, worker: &mut dyn Worker) -> Result<()> {
        trace!(message_id = %self.message_id, "dispatching entity update");
        worker.process_entity_updated(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayMessage {
    message_id: String,
    timestamp: DateTime<Utc>,
    original: EntityUpdatedMessage,
}

impl ReplayMessage {
    /// A replay of `original`, stamped with a fresh id and the current time.
    pub fn of(original: EntityUpdatedMessage) -> Self {
        Self {
            message_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            original,
        }
    }

    pub fn original(&self) -> &EntityUpdatedMessage {
        &self.original
    }
}

impl Message for ReplayMessage {
    fn message_id(&self) -> &str {
        &self.message_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn entity_id(&self) -> &str {
        self.original.entity_id()
    }

    fn entity_type(&self) -> EntityType {
        self.original.entity_type()
    }

    fn entity_source(&self) -> Publisher {
        self.original.entity_source()
    }

    fn dispatch_to(&self, worker: &mut dyn Worker) -> Result<()> {
        trace!(
            message_id = %self.message_id,
            original = %self.original.message_id,
            "dispatching replay"
        );
        worker.process_replay(self)
    }
}

/// Any message, as read from or written to the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnyMessage {
    EntityUpdated(EntityUpdatedMessage),
    Replay(ReplayMessage),
}

impl AnyMessage {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn as_message(&self) -> &dyn Message {
        match self {
            AnyMessage::EntityUpdated(m) => m,
            AnyMessage::Replay(m) => m,
        }
    }

    pub fn dispatch_to(&self, worker: &mut dyn Worker) -> Result<()> {
        self.as_message().dispatch_to(worker)
    }
}

impl From<EntityUpdatedMessage> for AnyMessage {
    fn from(message: EntityUpdatedMessage) -> Self {
        AnyMessage::EntityUpdated(message)
    }
}

impl From<ReplayMessage> for AnyMessage {
    fn from(message: ReplayMessage) -> Self {
        AnyMessage::Replay(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AtlasError;
    use chrono::TimeZone;

    #[derive(Default)]
    struct Recorder {
        updates: Vec<String>,
        replays: usize,
    }

    impl Worker for Recorder {
        fn process_entity_updated(&mut self, message: &EntityUpdatedMessage) -> Result<()> {
            self.updates.push(message.entity_id().to_string());
            Ok(())
        }
    }

    struct ReplayCounter(Recorder);

    impl Worker for ReplayCounter {
        fn process_entity_updated(&mut self, message: &EntityUpdatedMessage) -> Result<()> {
            self.0.process_entity_updated(message)
        }

        fn process_replay(&mut self, _message: &ReplayMessage) -> Result<()> {
            self.0.replays += 1;
            Ok(())
        }
    }

    fn update() -> EntityUpdatedMessage {
        EntityUpdatedMessage::with_id(
            "m1",
            Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap(),
            "cyp",
            EntityType::Item,
            Publisher::Bbc,
        )
    }

    #[test]
    fn replay_exposes_original_identity() {
        let replay = ReplayMessage::of(update());
        assert_ne!(replay.message_id(), "m1");
        assert_eq!(replay.entity_id(), "cyp");
        assert_eq!(replay.entity_type(), EntityType::Item);
        assert_eq!(replay.entity_source(), Publisher::Bbc);
    }

    #[test]
    fn dispatch_reaches_the_right_method() {
        let mut recorder = Recorder::default();
        update().dispatch_to(&mut recorder).unwrap();
        ReplayMessage::of(update()).dispatch_to(&mut recorder).unwrap();
        assert_eq!(recorder.updates, vec!["cyp", "cyp"]);

        let mut counter = ReplayCounter(Recorder::default());
        AnyMessage::from(ReplayMessage::of(update()))
            .dispatch_to(&mut counter)
            .unwrap();
        assert_eq!(counter.0.replays, 1);
        assert!(counter.0.updates.is_empty());
    }

    #[test]
    fn wire_form_is_tagged() {
        let json = AnyMessage::from(update()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "entityUpdated");
        assert_eq!(value["messageId"], "m1");
        assert_eq!(value["entityType"], "item");
        assert_eq!(value["entitySource"], "bbc.co.uk");
    }

    #[test]
    fn replay_survives_the_wire() {
        let message = AnyMessage::from(ReplayMessage::of(update()));
        let decoded = AnyMessage::from_json(&message.to_json().unwrap()).unwrap();
        assert_eq!(decoded, message);
        assert_eq!(decoded.as_message().entity_id(), "cyp");
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = AnyMessage::from_json(r#"{"type":"deleted"}"#).unwrap_err();
        assert!(matches!(err, AtlasError::Serialization(_)));
    }
}
