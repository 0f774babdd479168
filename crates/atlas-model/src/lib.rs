//! # Atlas Model Architecture
//!
//! Atlas is a media metadata catalogue: content, channels, broadcasts and the
//! publishers that supply them. This crate is the **domain layer** behind the
//! Atlas API. It holds no storage engine and no HTTP surface; it defines the
//! values those layers exchange and the few pieces of real logic they share.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Query Layer (criteria/)                                    │
//! │  - Attribute registry: external name → typed descriptor     │
//! │  - Operators, attribute queries, ContentQuery builder       │
//! │  - Request parameter parsing, in-memory evaluation          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Resolution Layer (persistence/, equiv)                     │
//! │  - ContentResolver trait (storage lives elsewhere)          │
//! │  - Precedence-driven selection among equivalent content     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Application Layer (application/)                           │
//! │  - Per-application source statuses (enable, request, …)     │
//! │  - Publisher precedence orderings                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Values, Not Objects
//!
//! Every type here is either immutable after construction ([`criteria::Attribute`],
//! [`criteria::ContentQuery`]) or updated functionally
//! ([`application::ApplicationConfiguration`]: every mutator returns a new value).
//! Nothing blocks and nothing performs I/O apart from [`config::AtlasConfig::load`].
//! The one piece of shared state, the attribute registry, is built once behind a
//! [`once_cell::sync::Lazy`] barrier and is read-only afterwards.
//!
//! ## Module Overview
//!
//! - [`criteria`]: Attribute registry, operators and the content query DSL
//! - [`application`]: Source statuses, application configuration, precedence
//! - [`publisher`]: The closed universe of content sources
//! - [`model`]: Thin entity layer (content, broadcasts, channels, temporal fields)
//! - [`persistence`]: Content resolution contract and an in-memory resolver
//! - [`equiv`]: Equivalence summaries and precedence-driven merging
//! - [`messaging`]: Change-event messages for downstream workers
//! - [`search`]: Search request wire contract
//! - [`query_string`]: Ordered query string parameters
//! - [`config`]: Layered configuration
//! - [`error`]: Error types

pub mod application;
pub mod config;
pub mod criteria;
pub mod equiv;
pub mod error;
pub mod messaging;
pub mod model;
pub mod persistence;
pub mod publisher;
pub mod query_string;
pub mod search;

pub use error::{AtlasError, Result};
pub use publisher::Publisher;
