use crate::application::SourceState;
use crate::criteria::{Operator, ValueKind};
use crate::publisher::Publisher;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Operator {operator} cannot be applied to {attribute} ({kind} valued)")]
    InvalidOperator {
        attribute: String,
        operator: Operator,
        kind: ValueKind,
    },

    #[error("Value {value} is not assignable to {attribute} ({kind} valued)")]
    InvalidValue {
        attribute: String,
        value: String,
        kind: ValueKind,
    },

    #[error("Duplicate attribute name: {0}")]
    DuplicateAttribute(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Cannot {action} a source that is {from}")]
    IllegalTransition {
        action: &'static str,
        from: SourceState,
    },

    #[error("Licence for {0} must be agreed before access is approved")]
    LicenceRequired(Publisher),

    #[error("Unknown publisher: {0}")]
    UnknownPublisher(String),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
