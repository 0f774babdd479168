//! The closed universe of content sources.
//!
//! Every precedence structure in the crate is keyed by [`Publisher`] and
//! assumes [`Publisher::ALL`] is complete and stable: declaration order is the
//! "natural" order used whenever no explicit precedence has been configured.

use crate::application::SourceStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Publisher {
    #[serde(rename = "bbc.co.uk")]
    Bbc,
    #[serde(rename = "channel4.com")]
    C4,
    #[serde(rename = "pressassociation.com")]
    Pa,
    #[serde(rename = "itv.com")]
    Itv,
    #[serde(rename = "five.tv")]
    Five,
    #[serde(rename = "radiotimes.com")]
    RadioTimes,
    #[serde(rename = "bbcredux")]
    BbcRedux,
    #[serde(rename = "youtube.com")]
    Youtube,
    #[serde(rename = "netflix.com")]
    Netflix,
    #[serde(rename = "metabroadcast.com")]
    Metabroadcast,
}

impl Publisher {
    pub const COUNT: usize = 10;

    /// Every publisher, in declaration order.
    pub const ALL: [Publisher; Publisher::COUNT] = [
        Publisher::Bbc,
        Publisher::C4,
        Publisher::Pa,
        Publisher::Itv,
        Publisher::Five,
        Publisher::RadioTimes,
        Publisher::BbcRedux,
        Publisher::Youtube,
        Publisher::Netflix,
        Publisher::Metabroadcast,
    ];

    /// Position in [`Publisher::ALL`], used to index fixed-size tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn key(self) -> &'static str {
        match self {
            Publisher::Bbc => "bbc.co.uk",
            Publisher::C4 => "channel4.com",
            Publisher::Pa => "pressassociation.com",
            Publisher::Itv => "itv.com",
            Publisher::Five => "five.tv",
            Publisher::RadioTimes => "radiotimes.com",
            Publisher::BbcRedux => "bbcredux",
            Publisher::Youtube => "youtube.com",
            Publisher::Netflix => "netflix.com",
            Publisher::Metabroadcast => "metabroadcast.com",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Publisher::Bbc => "BBC",
            Publisher::C4 => "Channel 4",
            Publisher::Pa => "PA",
            Publisher::Itv => "ITV",
            Publisher::Five => "Channel 5",
            Publisher::RadioTimes => "Radio Times",
            Publisher::BbcRedux => "BBC Redux",
            Publisher::Youtube => "YouTube",
            Publisher::Netflix => "Netflix",
            Publisher::Metabroadcast => "MetaBroadcast",
        }
    }

    /// Status an application sees for this source until it records its own.
    pub const fn default_source_status(self) -> SourceStatus {
        match self {
            Publisher::Bbc
            | Publisher::C4
            | Publisher::Itv
            | Publisher::Five
            | Publisher::Metabroadcast => SourceStatus::AVAILABLE_ENABLED,
            Publisher::Youtube | Publisher::Netflix => SourceStatus::AVAILABLE_DISABLED,
            Publisher::Pa | Publisher::RadioTimes | Publisher::BbcRedux => {
                SourceStatus::UNAVAILABLE
            }
        }
    }

    /// Whether anonymous (no API key) requests may read this source.
    pub const fn enabled_with_no_api_key(self) -> bool {
        matches!(
            self,
            Publisher::Bbc
                | Publisher::C4
                | Publisher::Itv
                | Publisher::Five
                | Publisher::Metabroadcast
        )
    }

    /// Whether access approval is conditional on a signed licence.
    pub const fn requires_licence(self) -> bool {
        matches!(self, Publisher::Pa | Publisher::RadioTimes)
    }

    pub fn from_key(key: &str) -> Option<Publisher> {
        Publisher::ALL.into_iter().find(|p| p.key() == key)
    }
}

impl fmt::Display for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_declaration_order() {
        for (position, publisher) in Publisher::ALL.iter().enumerate() {
            assert_eq!(publisher.index(), position);
        }
    }

    #[test]
    fn keys_round_trip() {
        for publisher in Publisher::ALL {
            assert_eq!(Publisher::from_key(publisher.key()), Some(publisher));
        }
        assert_eq!(Publisher::from_key("nope.com"), None);
    }

    #[test]
    fn serializes_as_key() {
        let json = serde_json::to_string(&Publisher::Pa).unwrap();
        assert_eq!(json, "\"pressassociation.com\"");
        let back: Publisher = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Publisher::Pa);
    }

    #[test]
    fn licensed_sources_start_unavailable() {
        for publisher in Publisher::ALL.into_iter().filter(|p| p.requires_licence()) {
            assert!(!publisher.default_source_status().is_enabled());
            assert!(!publisher.enabled_with_no_api_key());
        }
    }
}
