//! # Applications and Source Precedence
//!
//! An application is an API client. For every [`Publisher`](crate::Publisher)
//! it holds a [`SourceStatus`] (may it read this source, and is the source
//! switched on?) and, optionally, an explicit precedence order used to pick
//! the winning publisher when equivalent content is merged.
//!
//! - [`source_status`]: The per-publisher access state machine
//! - [`configuration`]: [`ApplicationConfiguration`], the request-time view
//! - [`precedence`]: [`PublisherOrdering`] and list completion
//! - [`sources`]: [`Application`] records and their [`ApplicationSources`]

pub mod configuration;
pub mod precedence;
pub mod source_status;
pub mod sources;

pub use configuration::{
    ApplicationConfiguration, DEFAULT_IMAGE_PRECEDENCE, DEFAULT_PEOPLE_PRECEDENCE,
};
pub use precedence::{complete_precedence, PublisherOrdering};
pub use source_status::{SourceState, SourceStatus};
pub use sources::{
    Application, ApplicationBuilder, ApplicationCredentials, ApplicationSources,
    ApplicationSourcesBuilder, SourceReadEntry,
};
