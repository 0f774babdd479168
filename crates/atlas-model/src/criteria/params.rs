//! Query parameters to content queries.
//!
//! Keys name an attribute, optionally followed by `-<operator>`:
//!
//! ```text
//! title=Eastenders,Casualty          item.title equals one of two values
//! transmissionTime-after=2024-01-01  broadcast.transmissionTime after midnight
//! position-greaterThan=3             episode.position greater than 3
//! limit=20&offset=40                 selection
//! ```
//!
//! Values are comma separated and parsed as the attribute's value type.
//! Reserved keys ([`RESERVED_PARAMETERS`]) are skipped. Keys naming no
//! attribute are ignored with a warning, or rejected when the parser is
//! strict.

use super::content_query::{AtomicQuery, ContentQuery};
use super::operator::Operator;
use super::registry::{self, AttributeRegistry};
use super::selection::Selection;
use super::value::Value;
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::model::EntityType;
use tracing::{trace, warn};

/// Keys that carry request options rather than predicates.
pub const RESERVED_PARAMETERS: &[&str] = &["apiKey", "annotations", "callback", "format", "jsonp"];

const LIMIT: &str = "limit";
const OFFSET: &str = "offset";

#[derive(Debug, Clone)]
pub struct QueryParameterParser<'r> {
    registry: &'r AttributeRegistry,
    context: EntityType,
    strict: bool,
    limits: Option<(u32, u32)>,
}

impl QueryParameterParser<'static> {
    /// A lenient parser over the process-wide registry.
    pub fn new(context: EntityType) -> Self {
        Self::with_registry(registry::registry(), context)
    }

    /// A parser over the process-wide registry configured from `config`.
    pub fn from_config(config: &AtlasConfig, context: EntityType) -> Self {
        Self::new(context)
            .strict(config.strict_parameters)
            .with_limits(config.default_limit(), config.max_limit)
    }
}

impl<'r> QueryParameterParser<'r> {
    pub fn with_registry(registry: &'r AttributeRegistry, context: EntityType) -> Self {
        Self {
            registry,
            context,
            strict: false,
            limits: None,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Apply `default` when no limit is given and cap limits at `max`.
    pub fn with_limits(mut self, default: u32, max: u32) -> Self {
        self.limits = Some((default, max));
        self
    }

    /// Parses `(key, value)` pairs in order.
    pub fn parse<I, K, V>(&self, params: I) -> Result<ContentQuery>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut queries = Vec::new();
        let mut selection = Selection::ALL;

        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                LIMIT => selection = selection.with_limit(parse_count(key, value)?),
                OFFSET => selection = selection.with_offset(parse_count(key, value)?),
                _ if RESERVED_PARAMETERS.contains(&key) => {
                    trace!(parameter = key, "skipping reserved parameter");
                }
                _ => {
                    if let Some(query) = self.parse_predicate(key, value)? {
                        queries.push(query);
                    }
                }
            }
        }

        if let Some((default, max)) = self.limits {
            selection = selection.with_default_limit(default, max);
        }
        Ok(ContentQuery::new(queries, selection))
    }

    fn parse_predicate(&self, key: &str, value: &str) -> Result<Option<AtomicQuery>> {
        let (name, suffix) = match key.rsplit_once('-') {
            None => (key, None),
            Some((name, suffix)) => (name, Some(suffix)),
        };
        let op = match suffix {
            None => Some(Operator::Equals),
            Some(suffix) => Operator::from_name(suffix),
        };
        let Some(attribute) = self.registry.lookup(name, self.context) else {
            // Without a recognised operator the whole key is the unknown name.
            let unknown = if op.is_some() { name } else { key };
            return self.unknown_parameter(key, unknown);
        };
        let Some(op) = op else {
            return Err(AtlasError::InvalidParameter {
                name: key.to_string(),
                reason: format!("unknown operator {}", suffix.unwrap_or_default()),
            });
        };

        let values = value
            .split(',')
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                Value::parse(attribute.kind, raw).ok_or_else(|| AtlasError::InvalidValue {
                    attribute: attribute.external_name(),
                    value: raw.to_string(),
                    kind: attribute.kind,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(attribute.create_query(op, values)?.into()))
    }

    fn unknown_parameter(&self, key: &str, unknown: &str) -> Result<Option<AtomicQuery>> {
        if self.strict {
            return Err(AtlasError::UnknownAttribute(unknown.to_string()));
        }
        warn!(parameter = key, context = %self.context, "ignoring unknown query parameter");
        Ok(None)
    }
}
