//! Opaque admin sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use promodeck_core::AdminId;

/// Opaque bearer token identifying a session.
///
/// The routing layer only ever checks presence/absence of a valid token; it
/// never inspects the contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Mint a fresh, unguessable token.
    pub fn mint() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A live admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: SessionToken,
    pub admin_id: AdminId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session has expired")]
    Expired,

    #[error("invalid session time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate a session against a clock.
///
/// Lookup (does the token exist at all?) is the store's concern; this checks
/// only the time window.
pub fn validate_session(session: &Session, now: DateTime<Utc>) -> Result<(), SessionError> {
    if session.expires_at <= session.issued_at {
        return Err(SessionError::InvalidTimeWindow);
    }
    if now >= session.expires_at {
        return Err(SessionError::Expired);
    }
    Ok(())
}
