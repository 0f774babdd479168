//! Attribute value types and runtime values.
//!
//! [`ValueKind`] is the declared type of an attribute; [`Value`] is one
//! operand or one value read off an entity. Enumerated attributes carry their
//! allowed keys in the kind, so checking an operand never needs the Rust enum
//! the keys came from.

use crate::model::Id;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// The declared value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Integer,
    DateTime,
    Boolean,
    /// One of a fixed set of lowercase keys.
    Enum(&'static [&'static str]),
    Id,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::String => f.write_str("string"),
            ValueKind::Integer => f.write_str("integer"),
            ValueKind::DateTime => f.write_str("date-time"),
            ValueKind::Boolean => f.write_str("boolean"),
            ValueKind::Enum(keys) => write!(f, "enum [{}]", keys.join(", ")),
            ValueKind::Id => f.write_str("id"),
        }
    }
}

/// Runtime representation of an operand or entity value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    String(String),
    Integer(i64),
    DateTime(DateTime<Utc>),
    Boolean(bool),
    Enum(String),
    Id(Id),
}

impl Value {
    /// Parses `raw` as a value of `kind`. Dates accept RFC 3339 or a bare
    /// `YYYY-MM-DD`, read as midnight UTC.
    pub fn parse(kind: ValueKind, raw: &str) -> Option<Value> {
        let raw = raw.trim();
        match kind {
            ValueKind::String => Some(Value::String(raw.to_string())),
            ValueKind::Integer => raw.parse().ok().map(Value::Integer),
            ValueKind::Boolean => raw.parse().ok().map(Value::Boolean),
            ValueKind::Id => raw.parse().ok().map(|id| Value::Id(Id::new(id))),
            ValueKind::Enum(keys) => {
                let lowered = raw.to_lowercase();
                keys.contains(&lowered.as_str()).then_some(Value::Enum(lowered))
            }
            ValueKind::DateTime => DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|dt| dt.and_utc())
                })
                .map(Value::DateTime),
        }
    }

    /// Whether this value can be an operand of an attribute of `kind`.
    pub fn fits(&self, kind: ValueKind) -> bool {
        match (self, kind) {
            (Value::String(_), ValueKind::String)
            | (Value::Integer(_), ValueKind::Integer)
            | (Value::DateTime(_), ValueKind::DateTime)
            | (Value::Boolean(_), ValueKind::Boolean)
            | (Value::Id(_), ValueKind::Id) => true,
            (Value::Enum(key), ValueKind::Enum(keys)) => keys.contains(&key.as_str()),
            _ => false,
        }
    }

    /// Converts into `kind` where that is lossless: a string naming an allowed
    /// enum key, or an integer used as an id.
    pub(crate) fn coerce(self, kind: ValueKind) -> std::result::Result<Value, Value> {
        if self.fits(kind) {
            return Ok(self);
        }
        match (self, kind) {
            (Value::String(s), ValueKind::Enum(keys)) if keys.contains(&s.as_str()) => {
                Ok(Value::Enum(s))
            }
            (Value::Integer(i), ValueKind::Id) if i >= 0 => Ok(Value::Id(Id::new(i as u64))),
            (other, _) => Err(other),
        }
    }

    /// The text of a string or enum value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Id(id) => i64::try_from(id.value()).ok(),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) | Value::Enum(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{i}"),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Id> for Value {
    fn from(value: Id) -> Self {
        Value::Id(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const TRANSPORTS: &[&str] = &["link", "embed"];

    #[test]
    fn parse_integer_and_boolean() {
        assert_eq!(Value::parse(ValueKind::Integer, " 42 "), Some(Value::Integer(42)));
        assert_eq!(Value::parse(ValueKind::Integer, "forty"), None);
        assert_eq!(Value::parse(ValueKind::Boolean, "true"), Some(Value::Boolean(true)));
        assert_eq!(Value::parse(ValueKind::Boolean, "yes"), None);
    }

    #[test]
    fn parse_date_time_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(
            Value::parse(ValueKind::DateTime, "2024-03-01"),
            Some(Value::DateTime(midnight))
        );
        assert_eq!(
            Value::parse(ValueKind::DateTime, "2024-03-01T01:00:00+01:00"),
            Some(Value::DateTime(midnight))
        );
        assert_eq!(Value::parse(ValueKind::DateTime, "March"), None);
    }

    #[test]
    fn parse_enum_checks_allowed_keys() {
        assert_eq!(
            Value::parse(ValueKind::Enum(TRANSPORTS), "LINK"),
            Some(Value::Enum("link".into()))
        );
        assert_eq!(Value::parse(ValueKind::Enum(TRANSPORTS), "stub"), None);
    }

    #[test]
    fn coerce_string_into_enum() {
        let kind = ValueKind::Enum(TRANSPORTS);
        assert_eq!(Value::from("embed").coerce(kind), Ok(Value::Enum("embed".into())));
        assert!(Value::from("carrier-pigeon").coerce(kind).is_err());
    }

    #[test]
    fn coerce_integer_into_id() {
        assert_eq!(Value::from(7i64).coerce(ValueKind::Id), Ok(Value::Id(Id::new(7))));
        assert!(Value::from(-1i64).coerce(ValueKind::Id).is_err());
    }

    #[test]
    fn fits_rejects_foreign_kinds() {
        assert!(!Value::from("x").fits(ValueKind::Integer));
        assert!(!Value::from(true).fits(ValueKind::String));
        assert!(Value::from(true).fits(ValueKind::Boolean));
    }
}
