//! Tenant identity.

use serde::{Deserialize, Serialize};

/// One of the independently branded storefronts served from this deployment
/// (e.g. `site-a`, `site-b`).
///
/// A tenant is resolved once per request from a path prefix or hostname and is
/// immutable for the lifetime of that request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tenant(String);

impl Tenant {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path prefix this tenant owns, e.g. `/site-a`.
    pub fn path_prefix(&self) -> String {
        format!("/{}", self.0)
    }
}

impl core::fmt::Display for Tenant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tenant {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Tenant {
    fn from(s: String) -> Self {
        Self(s)
    }
}
