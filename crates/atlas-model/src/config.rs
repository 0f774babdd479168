//! # Configuration
//!
//! [`AtlasConfig`] is loaded with [`confique`] in layers, highest priority
//! first:
//!
//! 1. **Environment variables**: `ATLAS_DEFAULT_LIMIT`, `ATLAS_MAX_LIMIT`,
//!    `ATLAS_STRICT_PARAMETERS`.
//! 2. **TOML file**: optional, passed to [`AtlasConfig::load`].
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `default_limit` | `50` | Page size for queries without an explicit `limit` |
//! | `max_limit` | `5000` | Upper bound applied to any requested `limit` |
//! | `strict_parameters` | `false` | Unknown query parameters are errors |
//! | `image_precedence` | `["pressassociation.com", "bbc.co.uk", "channel4.com"]` | Publisher keys ranking images |
//! | `people_precedence` | `["radiotimes.com", "pressassociation.com", "bbc.co.uk", "channel4.com", "itv.com"]` | Publisher keys ranking people |

use crate::application::{DEFAULT_IMAGE_PRECEDENCE, DEFAULT_PEOPLE_PRECEDENCE};
use crate::error::{AtlasError, Result};
use crate::publisher::Publisher;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_LIMIT: u32 = 50;
pub const MAX_LIMIT: u32 = 5000;

/// Configuration for the query and precedence layers, stored in `atlas.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Page size applied when a query does not ask for one.
    #[config(default = 50, env = "ATLAS_DEFAULT_LIMIT")]
    pub default_limit: u32,

    /// Requested limits above this are clamped.
    #[config(default = 5000, env = "ATLAS_MAX_LIMIT")]
    pub max_limit: u32,

    /// Reject unknown query parameters instead of ignoring them.
    #[config(default = false, env = "ATLAS_STRICT_PARAMETERS")]
    pub strict_parameters: bool,

    /// Publisher keys ranking image sources. When absent, the built-in
    /// ordering is used.
    pub image_precedence: Option<Vec<String>>,

    /// Publisher keys ranking people sources.
    pub people_precedence: Option<Vec<String>>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
            strict_parameters: false,
            image_precedence: None,
            people_precedence: None,
        }
    }
}

impl AtlasConfig {
    /// Loads environment overrides on top of `path` (if given) on top of
    /// defaults. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        let config = builder.load()?;
        debug!(
            default_limit = config.default_limit,
            max_limit = config.max_limit,
            strict = config.strict_parameters,
            "loaded configuration"
        );
        Ok(config)
    }

    /// The default limit, never above `max_limit`.
    pub fn default_limit(&self) -> u32 {
        self.default_limit.min(self.max_limit)
    }

    pub fn image_precedence(&self) -> Result<Vec<Publisher>> {
        resolve_publishers(self.image_precedence.as_deref(), &DEFAULT_IMAGE_PRECEDENCE)
    }

    pub fn people_precedence(&self) -> Result<Vec<Publisher>> {
        resolve_publishers(self.people_precedence.as_deref(), &DEFAULT_PEOPLE_PRECEDENCE)
    }
}

fn resolve_publishers(keys: Option<&[String]>, fallback: &[Publisher]) -> Result<Vec<Publisher>> {
    match keys {
        None => Ok(fallback.to_vec()),
        Some(keys) => keys
            .iter()
            .map(|key| {
                Publisher::from_key(key).ok_or_else(|| AtlasError::UnknownPublisher(key.clone()))
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AtlasConfig::default();
        assert_eq!(config.default_limit(), 50);
        assert_eq!(config.max_limit, 5000);
        assert!(!config.strict_parameters);
    }

    #[test]
    fn test_precedence_defaults_when_none() {
        let config = AtlasConfig::default();
        assert_eq!(
            config.image_precedence().unwrap(),
            vec![Publisher::Pa, Publisher::Bbc, Publisher::C4]
        );
        assert_eq!(
            config.people_precedence().unwrap()[0],
            Publisher::RadioTimes
        );
    }

    #[test]
    fn test_custom_image_precedence() {
        let config = AtlasConfig {
            image_precedence: Some(vec!["itv.com".to_string(), "bbc.co.uk".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            config.image_precedence().unwrap(),
            vec![Publisher::Itv, Publisher::Bbc]
        );
    }

    #[test]
    fn test_unknown_publisher_key() {
        let config = AtlasConfig {
            people_precedence: Some(vec!["nowhere.example".to_string()]),
            ..Default::default()
        };
        let err = config.people_precedence().unwrap_err();
        assert!(matches!(err, AtlasError::UnknownPublisher(key) if key == "nowhere.example"));
    }

    #[test]
    fn test_default_limit_is_clamped() {
        let config = AtlasConfig {
            default_limit: 10_000,
            max_limit: 100,
            ..Default::default()
        };
        assert_eq!(config.default_limit(), 100);
    }
}
