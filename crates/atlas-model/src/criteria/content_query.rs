//! Content queries and their builder.
//!
//! A [`ContentQuery`] is a conjunction of [`AttributeQuery`] predicates plus a
//! [`Selection`]. Its constraint is a tagged value: either the predicate list
//! or [`QueryConstraint::Unsatisfiable`]. An empty conjunction matches
//! everything. Adding [`AtomicQuery::MatchesNothing`] anywhere collapses the
//! whole query to `Unsatisfiable` at construction, so consumers never scan
//! for a sentinel.
//!
//! Predicate order is significant for equality and hashing: two queries built
//! from the same predicates in a different order are different queries.

use super::attribute::Attribute;
use super::operator::Operator;
use super::query::AttributeQuery;
use super::selection::Selection;
use super::value::Value;
use crate::error::{AtlasError, Result};

/// One element of a query under construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AtomicQuery {
    Attribute(AttributeQuery),
    MatchesNothing,
}

impl From<AttributeQuery> for AtomicQuery {
    fn from(query: AttributeQuery) -> Self {
        AtomicQuery::Attribute(query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryConstraint {
    /// All predicates must hold. Empty means no constraint.
    Conjunction(Vec<AttributeQuery>),
    Unsatisfiable,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentQuery {
    constraint: QueryConstraint,
    selection: Selection,
}

impl ContentQuery {
    pub fn new<I>(queries: I, selection: Selection) -> Self
    where
        I: IntoIterator<Item = AtomicQuery>,
    {
        let mut operands = Vec::new();
        for query in queries {
            match query {
                AtomicQuery::Attribute(q) => operands.push(q),
                AtomicQuery::MatchesNothing => {
                    return Self {
                        constraint: QueryConstraint::Unsatisfiable,
                        selection,
                    }
                }
            }
        }
        Self {
            constraint: QueryConstraint::Conjunction(operands),
            selection,
        }
    }

    pub fn matches_everything() -> Self {
        Self::new(std::iter::empty(), Selection::ALL)
    }

    pub fn matches_nothing() -> Self {
        Self {
            constraint: QueryConstraint::Unsatisfiable,
            selection: Selection::ALL,
        }
    }

    pub fn builder() -> ContentQueryBuilder {
        ContentQueryBuilder::query()
    }

    pub fn constraint(&self) -> &QueryConstraint {
        &self.constraint
    }

    pub fn is_satisfiable(&self) -> bool {
        !matches!(self.constraint, QueryConstraint::Unsatisfiable)
    }

    /// The predicates; empty for an unsatisfiable query.
    pub fn operands(&self) -> &[AttributeQuery] {
        match &self.constraint {
            QueryConstraint::Conjunction(operands) => operands,
            QueryConstraint::Unsatisfiable => &[],
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn copy_with_selection(&self, selection: Selection) -> Self {
        Self {
            constraint: self.constraint.clone(),
            selection,
        }
    }

    /// Same selection, new predicates.
    pub fn copy_with_operands<I>(&self, operands: I) -> Self
    where
        I: IntoIterator<Item = AtomicQuery>,
    {
        Self::new(operands, self.selection)
    }
}

impl Default for ContentQuery {
    fn default() -> Self {
        Self::matches_everything()
    }
}

/// Accumulates predicates for a [`ContentQuery`].
///
/// Each convenience method calls [`Attribute::create_query`] with a fixed
/// operator. The first failure is kept and returned from [`build`](Self::build);
/// later calls are ignored once a failure is recorded.
#[derive(Debug, Default)]
pub struct ContentQueryBuilder {
    queries: Vec<AtomicQuery>,
    selection: Option<Selection>,
    error: Option<AtlasError>,
}

impl ContentQueryBuilder {
    pub fn query() -> Self {
        Self::default()
    }

    pub fn from_queries<I>(queries: I) -> Self
    where
        I: IntoIterator<Item = AtomicQuery>,
    {
        Self {
            queries: queries.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn equal_to<I, V>(self, attribute: &Attribute, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with(attribute, Operator::Equals, values)
    }

    pub fn search_for<I, V>(self, attribute: &Attribute, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with(attribute, Operator::Search, values)
    }

    pub fn beginning<I, V>(self, attribute: &Attribute, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with(attribute, Operator::Beginning, values)
    }

    pub fn greater_than<I, V>(self, attribute: &Attribute, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with(attribute, Operator::GreaterThan, values)
    }

    pub fn less_than<I, V>(self, attribute: &Attribute, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with(attribute, Operator::LessThan, values)
    }

    pub fn before<I, V>(self, attribute: &Attribute, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with(attribute, Operator::Before, values)
    }

    pub fn after<I, V>(self, attribute: &Attribute, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with(attribute, Operator::After, values)
    }

    pub fn matches_nothing(mut self) -> Self {
        self.queries.push(AtomicQuery::MatchesNothing);
        self
    }

    /// Adds `attribute op values`.
    pub fn with<I, V>(mut self, attribute: &Attribute, op: Operator, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        if self.error.is_some() {
            return self;
        }
        match attribute.create_query(op, values) {
            Ok(query) => self.queries.push(AtomicQuery::Attribute(query)),
            Err(err) => self.error = Some(err),
        }
        self
    }

    pub fn add(mut self, query: AtomicQuery) -> Self {
        self.queries.push(query);
        self
    }

    pub fn build(self) -> Result<ContentQuery> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(ContentQuery::new(
            self.queries,
            self.selection.unwrap_or(Selection::ALL),
        ))
    }
}
