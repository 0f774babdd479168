//! Attribute descriptors.
//!
//! An [`Attribute`] names one queryable field of one entity type and
//! declares the type of its values. Attributes are `const`-built, so the
//! whole registry is static data:
//!
//! ```ignore
//! pub const EPISODE_POSITION: Attribute =
//!     Attribute::integer("position", EntityType::Episode)
//!         .with_field("episodeNumber")
//!         .allow_short_matches();
//! ```
//!
//! Two attributes are the same attribute when they share a name and target;
//! the remaining fields are descriptive.

use super::operator::{
    BooleanOperator, DateTimeOperator, EnumOperator, IntegerOperator, Operator, StringOperator,
};
use super::query::{AttributeQuery, TypedQuery};
use super::value::{Value, ValueKind};
use crate::error::{AtlasError, Result};
use crate::model::EntityType;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy)]
pub struct Attribute {
    /// Short name, qualified by the target to form the external name.
    pub name: &'static str,

    /// Name of the entity field holding the values. Defaults to `name`.
    pub field_name: &'static str,

    pub target: EntityType,

    pub kind: ValueKind,

    /// Whether the entity holds a list of values for this attribute.
    pub collection: bool,

    /// Extra lookup key, usually the unqualified name.
    pub alias: Option<&'static str>,
}

impl Attribute {
    pub const fn new(name: &'static str, target: EntityType, kind: ValueKind) -> Self {
        Self {
            name,
            field_name: name,
            target,
            kind,
            collection: false,
            alias: None,
        }
    }

    pub const fn string(name: &'static str, target: EntityType) -> Self {
        Self::new(name, target, ValueKind::String)
    }

    pub const fn integer(name: &'static str, target: EntityType) -> Self {
        Self::new(name, target, ValueKind::Integer)
    }

    pub const fn date_time(name: &'static str, target: EntityType) -> Self {
        Self::new(name, target, ValueKind::DateTime)
    }

    pub const fn boolean(name: &'static str, target: EntityType) -> Self {
        Self::new(name, target, ValueKind::Boolean)
    }

    pub const fn enumerated(
        name: &'static str,
        target: EntityType,
        keys: &'static [&'static str],
    ) -> Self {
        Self::new(name, target, ValueKind::Enum(keys))
    }

    pub const fn id(name: &'static str, target: EntityType) -> Self {
        Self::new(name, target, ValueKind::Id)
    }

    /// Mark the attribute as list-valued.
    pub const fn collection(mut self) -> Self {
        self.collection = true;
        self
    }

    pub const fn with_field(mut self, field_name: &'static str) -> Self {
        self.field_name = field_name;
        self
    }

    /// Make the attribute reachable by its unqualified name.
    pub const fn allow_short_matches(mut self) -> Self {
        self.alias = Some(self.name);
        self
    }

    pub const fn with_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// `<target>.<name>`, e.g. `item.title`.
    pub fn external_name(&self) -> String {
        format!("{}.{}", self.target.key(), self.name)
    }

    pub fn accepts(&self, op: Operator) -> bool {
        op.applies_to(self.kind)
    }

    /// Binds `op` and `values` to this attribute.
    ///
    /// Fails with [`AtlasError::InvalidOperator`] when `op` is not one of
    /// this attribute's value type's operators, and with
    /// [`AtlasError::InvalidValue`] for any value of the wrong type. Strings
    /// naming an allowed key are accepted for enumerated attributes, and
    /// non-negative integers for id attributes. Repeated values are dropped;
    /// order is otherwise kept.
    pub fn create_query<I, V>(&self, op: Operator, values: I) -> Result<AttributeQuery>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let query = match self.kind {
            ValueKind::String => AttributeQuery::String(TypedQuery::new(
                *self,
                self.narrow::<StringOperator>(op)?,
                self.operands(values, |v| match v {
                    Value::String(s) => Ok(s),
                    other => Err(other),
                })?,
            )),
            ValueKind::Integer => AttributeQuery::Integer(TypedQuery::new(
                *self,
                self.narrow::<IntegerOperator>(op)?,
                self.operands(values, |v| match v {
                    Value::Integer(i) => Ok(i),
                    other => Err(other),
                })?,
            )),
            ValueKind::DateTime => AttributeQuery::DateTime(TypedQuery::new(
                *self,
                self.narrow::<DateTimeOperator>(op)?,
                self.operands(values, |v| match v {
                    Value::DateTime(dt) => Ok(dt),
                    other => Err(other),
                })?,
            )),
            ValueKind::Boolean => AttributeQuery::Boolean(TypedQuery::new(
                *self,
                self.narrow::<BooleanOperator>(op)?,
                self.operands(values, |v| match v {
                    Value::Boolean(b) => Ok(b),
                    other => Err(other),
                })?,
            )),
            ValueKind::Enum(_) => AttributeQuery::Enum(TypedQuery::new(
                *self,
                self.narrow::<EnumOperator>(op)?,
                self.operands(values, |v| match v {
                    Value::Enum(key) => Ok(key),
                    other => Err(other),
                })?,
            )),
            ValueKind::Id => AttributeQuery::Id(TypedQuery::new(
                *self,
                self.narrow::<IntegerOperator>(op)?,
                self.operands(values, |v| match v {
                    Value::Id(id) => Ok(id),
                    other => Err(other),
                })?,
            )),
        };
        Ok(query)
    }

    fn narrow<O>(&self, op: Operator) -> Result<O>
    where
        O: TryFrom<Operator>,
    {
        O::try_from(op).map_err(|_| AtlasError::InvalidOperator {
            attribute: self.external_name(),
            operator: op,
            kind: self.kind,
        })
    }

    fn operands<T, I, V>(
        &self,
        values: I,
        extract: fn(Value) -> std::result::Result<T, Value>,
    ) -> Result<Vec<T>>
    where
        T: PartialEq,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut operands = Vec::new();
        for value in values {
            let operand = value
                .into()
                .coerce(self.kind)
                .and_then(extract)
                .map_err(|rejected| AtlasError::InvalidValue {
                    attribute: self.external_name(),
                    value: rejected.to_string(),
                    kind: self.kind,
                })?;
            if !operands.contains(&operand) {
                operands.push(operand);
            }
        }
        Ok(operands)
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.target == other.target
    }
}

impl Eq for Attribute {}

impl Hash for Attribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.target.hash(state);
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target.key(), self.name)
    }
}
