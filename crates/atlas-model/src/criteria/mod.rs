//! # Content Criteria
//!
//! A small typed predicate language over catalogue entities.
//!
//! ```text
//! "item.title" ──lookup──▶ Attribute ──create_query(op, values)──▶ AttributeQuery
//!                                                                       │
//!                 ContentQueryBuilder ◀──── equal_to / after / ... ─────┘
//!                         │
//!                         ▼
//!                   ContentQuery { Conjunction([..]) | Unsatisfiable, Selection }
//! ```
//!
//! Type safety is enforced when a query is built, not when it is run: an
//! attribute rejects operators foreign to its value type
//! ([`AtlasError::InvalidOperator`](crate::AtlasError::InvalidOperator)) and
//! values it cannot hold.
//!
//! Queries and operators are closed enums. Consumers, such as a compiler to a
//! storage filter or the in-memory evaluator in [`evaluate`], match on them
//! exhaustively.
//!
//! ## Modules
//!
//! - [`value`]: [`ValueKind`] and [`Value`]
//! - [`operator`]: [`Operator`] and the per-type operator enums
//! - [`attribute`]: [`Attribute`] descriptors
//! - [`query`]: [`AttributeQuery`]
//! - [`content_query`]: [`ContentQuery`] and [`ContentQueryBuilder`]
//! - [`selection`]: [`Selection`] paging
//! - [`registry`]: The static attribute table and name lookup
//! - [`params`]: Query parameters to [`ContentQuery`]
//! - [`evaluate`]: [`Queryable`] and in-memory matching

pub mod attribute;
pub mod content_query;
pub mod evaluate;
pub mod operator;
pub mod params;
pub mod query;
pub mod registry;
pub mod selection;
pub mod value;

pub use attribute::Attribute;
pub use content_query::{AtomicQuery, ContentQuery, ContentQueryBuilder, QueryConstraint};
pub use evaluate::Queryable;
pub use operator::{
    BooleanOperator, DateTimeOperator, EnumOperator, IntegerOperator, Operator, StringOperator,
};
pub use params::{QueryParameterParser, RESERVED_PARAMETERS};
pub use query::{
    AttributeQuery, BooleanAttributeQuery, DateTimeAttributeQuery, EnumAttributeQuery,
    IdAttributeQuery, IntegerAttributeQuery, StringAttributeQuery, TypedQuery,
};
pub use registry::{lookup, registry, AttributeRegistry, ALL_ATTRIBUTES};
pub use selection::Selection;
pub use value::{Value, ValueKind};
