//! Bound attribute queries.
//!
//! An [`AttributeQuery`] is one predicate: "attribute OP one-of(values)". It is
//! a closed enum over the value types, and each variant carries the operator
//! narrowed to that type, so a consumer compiling queries to a storage filter
//! matches exhaustively on both:
//!
//! ```ignore
//! match query {
//!     AttributeQuery::DateTime(q) => match q.operator() {
//!         DateTimeOperator::Before => ...,
//!         DateTimeOperator::After => ...,
//!         DateTimeOperator::Equals => ...,
//!     },
//!     ...
//! }
//! ```
//!
//! Queries are only built through [`Attribute::create_query`], which enforces
//! the operator and value types.

use super::attribute::Attribute;
use super::operator::{
    BooleanOperator, DateTimeOperator, EnumOperator, IntegerOperator, Operator, StringOperator,
};
use super::value::Value;
use crate::model::Id;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypedQuery<O, V> {
    attribute: Attribute,
    operator: O,
    values: Vec<V>,
}

impl<O: Copy, V> TypedQuery<O, V> {
    pub(crate) fn new(attribute: Attribute, operator: O, values: Vec<V>) -> Self {
        Self {
            attribute,
            operator,
            values,
        }
    }

    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }

    pub fn operator(&self) -> O {
        self.operator
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }
}

pub type StringAttributeQuery = TypedQuery<StringOperator, String>;
pub type IntegerAttributeQuery = TypedQuery<IntegerOperator, i64>;
pub type DateTimeAttributeQuery = TypedQuery<DateTimeOperator, DateTime<Utc>>;
pub type BooleanAttributeQuery = TypedQuery<BooleanOperator, bool>;
pub type EnumAttributeQuery = TypedQuery<EnumOperator, String>;
pub type IdAttributeQuery = TypedQuery<IntegerOperator, Id>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeQuery {
    String(StringAttributeQuery),
    Integer(IntegerAttributeQuery),
    DateTime(DateTimeAttributeQuery),
    Boolean(BooleanAttributeQuery),
    Enum(EnumAttributeQuery),
    Id(IdAttributeQuery),
}

impl AttributeQuery {
    pub fn attribute(&self) -> &Attribute {
        match self {
            AttributeQuery::String(q) => q.attribute(),
            AttributeQuery::Integer(q) => q.attribute(),
            AttributeQuery::DateTime(q) => q.attribute(),
            AttributeQuery::Boolean(q) => q.attribute(),
            AttributeQuery::Enum(q) => q.attribute(),
            AttributeQuery::Id(q) => q.attribute(),
        }
    }

    pub fn operator(&self) -> Operator {
        match self {
            AttributeQuery::String(q) => q.operator().into(),
            AttributeQuery::Integer(q) => q.operator().into(),
            AttributeQuery::DateTime(q) => q.operator().into(),
            AttributeQuery::Boolean(q) => q.operator().into(),
            AttributeQuery::Enum(q) => q.operator().into(),
            AttributeQuery::Id(q) => q.operator().into(),
        }
    }

    /// The operands, widened back to [`Value`]s.
    pub fn values(&self) -> Vec<Value> {
        match self {
            AttributeQuery::String(q) => q.values().iter().cloned().map(Value::String).collect(),
            AttributeQuery::Integer(q) => q.values().iter().copied().map(Value::Integer).collect(),
            AttributeQuery::DateTime(q) => {
                q.values().iter().copied().map(Value::DateTime).collect()
            }
            AttributeQuery::Boolean(q) => q.values().iter().copied().map(Value::Boolean).collect(),
            AttributeQuery::Enum(q) => q.values().iter().cloned().map(Value::Enum).collect(),
            AttributeQuery::Id(q) => q.values().iter().copied().map(Value::Id).collect(),
        }
    }
}

impl fmt::Display for AttributeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.values().iter().map(Value::to_string).collect();
        write!(
            f,
            "{} {} [{}]",
            self.attribute(),
            self.operator(),
            values.join(", ")
        )
    }
}
