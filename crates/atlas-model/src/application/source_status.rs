//! Per-publisher access state for an application.
//!
//! ```text
//!              request              approve
//! Unavailable ────────▶ Requested ─────────▶ Available ◀──┐ enable / disable
//!     ▲                  │   ▲                 │     └─────┘
//!     │             deny │   │ request         │ revoke
//!     │                  ▼   │                 ▼
//!     │                 Denied              Revoked ── request ──▶ Requested
//!     └──────────── reset (publisher default) from any state
//! ```
//!
//! Only an `Available` source can be enabled. Transitions are pure: each one
//! returns a new [`SourceStatus`] or an [`AtlasError::IllegalTransition`].

use crate::error::{AtlasError, Result};
use crate::publisher::Publisher;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceState {
    Unavailable,
    Requested,
    Available,
    Denied,
    Revoked,
}

impl fmt::Display for SourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceState::Unavailable => "unavailable",
            SourceState::Requested => "requested",
            SourceState::Available => "available",
            SourceState::Denied => "denied",
            SourceState::Revoked => "revoked",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceStatus {
    state: SourceState,
    enabled: bool,
    #[serde(default)]
    licence_agreed: bool,
}

impl SourceStatus {
    pub const UNAVAILABLE: SourceStatus = SourceStatus::new(SourceState::Unavailable, false);
    pub const REQUESTED: SourceStatus = SourceStatus::new(SourceState::Requested, false);
    pub const AVAILABLE_ENABLED: SourceStatus = SourceStatus::new(SourceState::Available, true);
    pub const AVAILABLE_DISABLED: SourceStatus = SourceStatus::new(SourceState::Available, false);
    pub const DENIED: SourceStatus = SourceStatus::new(SourceState::Denied, false);
    pub const REVOKED: SourceStatus = SourceStatus::new(SourceState::Revoked, false);

    const fn new(state: SourceState, enabled: bool) -> Self {
        Self {
            state,
            enabled,
            licence_agreed: false,
        }
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_licence_agreed(&self) -> bool {
        self.licence_agreed
    }

    pub fn enable(self) -> Result<Self> {
        match self.state {
            SourceState::Available => Ok(Self {
                enabled: true,
                ..self
            }),
            from => Err(AtlasError::IllegalTransition {
                action: "enable",
                from,
            }),
        }
    }

    /// Disabling never fails: a source that is not available is already disabled.
    pub fn disable(self) -> Self {
        Self {
            enabled: false,
            ..self
        }
    }

    pub fn request(self) -> Result<Self> {
        match self.state {
            SourceState::Unavailable | SourceState::Denied | SourceState::Revoked => Ok(Self {
                state: SourceState::Requested,
                enabled: false,
                ..self
            }),
            SourceState::Requested => Ok(self),
            from => Err(AtlasError::IllegalTransition {
                action: "request",
                from,
            }),
        }
    }

    pub fn approve(self) -> Result<Self> {
        match self.state {
            SourceState::Requested => Ok(Self {
                state: SourceState::Available,
                enabled: false,
                ..self
            }),
            from => Err(AtlasError::IllegalTransition {
                action: "approve",
                from,
            }),
        }
    }

    pub fn deny(self) -> Result<Self> {
        match self.state {
            SourceState::Requested => Ok(Self {
                state: SourceState::Denied,
                enabled: false,
                ..self
            }),
            from => Err(AtlasError::IllegalTransition {
                action: "deny",
                from,
            }),
        }
    }

    pub fn revoke(self) -> Result<Self> {
        match self.state {
            SourceState::Available => Ok(Self {
                state: SourceState::Revoked,
                enabled: false,
                ..self
            }),
            from => Err(AtlasError::IllegalTransition {
                action: "revoke",
                from,
            }),
        }
    }

    pub fn agree_licence(self) -> Self {
        Self {
            licence_agreed: true,
            ..self
        }
    }

    pub fn reset(self, source: Publisher) -> Self {
        source.default_source_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_approve_enable_path() {
        let status = SourceStatus::UNAVAILABLE
            .request()
            .and_then(SourceStatus::approve)
            .and_then(SourceStatus::enable)
            .unwrap();
        assert_eq!(status, SourceStatus::AVAILABLE_ENABLED);
    }

    #[test]
    fn cannot_enable_unavailable_source() {
        let err = SourceStatus::UNAVAILABLE.enable().unwrap_err();
        assert!(matches!(
            err,
            AtlasError::IllegalTransition {
                action: "enable",
                from: SourceState::Unavailable
            }
        ));
    }

    #[test]
    fn enable_is_idempotent() {
        let status = SourceStatus::AVAILABLE_ENABLED.enable().unwrap();
        assert_eq!(status, SourceStatus::AVAILABLE_ENABLED);
    }

    #[test]
    fn disable_keeps_state() {
        assert_eq!(
            SourceStatus::AVAILABLE_ENABLED.disable(),
            SourceStatus::AVAILABLE_DISABLED
        );
        assert_eq!(SourceStatus::REQUESTED.disable(), SourceStatus::REQUESTED);
    }

    #[test]
    fn deny_only_from_requested() {
        assert_eq!(SourceStatus::REQUESTED.deny().unwrap(), SourceStatus::DENIED);
        assert!(SourceStatus::AVAILABLE_ENABLED.deny().is_err());
    }

    #[test]
    fn denied_source_can_request_again() {
        assert_eq!(
            SourceStatus::DENIED.request().unwrap(),
            SourceStatus::REQUESTED
        );
    }

    #[test]
    fn revoke_disables() {
        let revoked = SourceStatus::AVAILABLE_ENABLED.revoke().unwrap();
        assert_eq!(revoked, SourceStatus::REVOKED);
        assert!(!revoked.is_enabled());
        assert!(SourceStatus::UNAVAILABLE.revoke().is_err());
    }

    #[test]
    fn requesting_an_available_source_is_illegal() {
        assert!(SourceStatus::AVAILABLE_DISABLED.request().is_err());
    }

    #[test]
    fn licence_survives_transitions() {
        let status = SourceStatus::UNAVAILABLE
            .agree_licence()
            .request()
            .and_then(SourceStatus::approve)
            .unwrap();
        assert!(status.is_licence_agreed());
        assert_eq!(status.state(), SourceState::Available);
    }

    #[test]
    fn reset_returns_publisher_default() {
        let status = SourceStatus::REVOKED.reset(Publisher::Bbc);
        assert_eq!(status, Publisher::Bbc.default_source_status());
    }

    #[test]
    fn deserializes_without_licence_flag() {
        let status: SourceStatus =
            serde_json::from_str(r#"{"state":"available","enabled":true}"#).unwrap();
        assert_eq!(status, SourceStatus::AVAILABLE_ENABLED);
    }
}
