//! In-memory evaluation of queries.
//!
//! Anything that can report the values it holds for an attribute is
//! [`Queryable`]. A predicate holds when at least one of the entity's values
//! satisfies the operator against at least one operand, so a predicate with
//! no operands never holds. String search is a case-insensitive substring
//! match.

use super::attribute::Attribute;
use super::content_query::{ContentQuery, QueryConstraint};
use super::operator::{DateTimeOperator, IntegerOperator, StringOperator};
use super::query::AttributeQuery;
use super::value::Value;

pub trait Queryable {
    /// The values held for `attribute`; empty when the attribute does not
    /// apply or has no value.
    fn values_of(&self, attribute: &Attribute) -> Vec<Value>;
}

fn any_pair<A, C, F>(actual: &[A], operands: &[C], test: F) -> bool
where
    F: Fn(&A, &C) -> bool,
{
    actual
        .iter()
        .any(|a| operands.iter().any(|c| test(a, c)))
}

fn compare_strings(op: StringOperator, actual: &str, operand: &str) -> bool {
    match op {
        StringOperator::Equals => actual == operand,
        StringOperator::Beginning => actual.starts_with(operand),
        StringOperator::Search => actual.to_lowercase().contains(&operand.to_lowercase()),
    }
}

fn compare_ordered<T: Ord>(op: IntegerOperator, actual: &T, operand: &T) -> bool {
    match op {
        IntegerOperator::Equals => actual == operand,
        IntegerOperator::GreaterThan => actual > operand,
        IntegerOperator::LessThan => actual < operand,
    }
}

impl AttributeQuery {
    pub fn matches<Q: Queryable + ?Sized>(&self, entity: &Q) -> bool {
        let actual = entity.values_of(self.attribute());
        match self {
            AttributeQuery::String(q) => {
                let actual: Vec<&str> = actual.iter().filter_map(Value::as_str).collect();
                any_pair(&actual, q.values(), |a, c| compare_strings(q.operator(), a, c))
            }
            AttributeQuery::Integer(q) => {
                let actual: Vec<i64> = actual.iter().filter_map(Value::as_integer).collect();
                any_pair(&actual, q.values(), |a, c| compare_ordered(q.operator(), a, c))
            }
            AttributeQuery::DateTime(q) => {
                let actual: Vec<_> = actual.iter().filter_map(Value::as_date_time).collect();
                any_pair(&actual, q.values(), |a, c| match q.operator() {
                    DateTimeOperator::Equals => a == c,
                    DateTimeOperator::Before => a < c,
                    DateTimeOperator::After => a > c,
                })
            }
            AttributeQuery::Boolean(q) => {
                let actual: Vec<bool> = actual.iter().filter_map(Value::as_bool).collect();
                any_pair(&actual, q.values(), |a, c| a == c)
            }
            AttributeQuery::Enum(q) => {
                let actual: Vec<&str> = actual
                    .iter()
                    .filter_map(|v| match v {
                        Value::Enum(key) => Some(key.as_str()),
                        _ => None,
                    })
                    .collect();
                any_pair(&actual, q.values(), |a, c| *a == c.as_str())
            }
            AttributeQuery::Id(q) => {
                let actual: Vec<_> = actual
                    .iter()
                    .filter_map(|v| match v {
                        Value::Id(id) => Some(*id),
                        _ => None,
                    })
                    .collect();
                any_pair(&actual, q.values(), |a, c| compare_ordered(q.operator(), a, c))
            }
        }
    }
}

impl ContentQuery {
    /// Whether `entity` satisfies every predicate. Selection is not applied.
    pub fn matches<Q: Queryable + ?Sized>(&self, entity: &Q) -> bool {
        match self.constraint() {
            QueryConstraint::Unsatisfiable => false,
            QueryConstraint::Conjunction(operands) => operands.iter().all(|q| q.matches(entity)),
        }
    }
}
