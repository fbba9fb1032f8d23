//! URL slug value object.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A URL-safe slug: lowercase ASCII letters, digits, and interior hyphens.
///
/// Slugs identify categories in storefront URLs
/// (`/site-a/categories/{slug}`), so the shape is enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::validation("slug must not be empty"));
        }
        if raw.starts_with('-') || raw.ends_with('-') {
            return Err(DomainError::validation(
                "slug must not start or end with a hyphen",
            ));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(DomainError::validation(format!(
                "slug may only contain lowercase letters, digits and hyphens: {raw:?}"
            )));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Slug {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Slug {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_slugs() {
        for ok in ["deals", "summer-2024", "a", "x1-y2"] {
            assert!(Slug::new(ok).is_ok(), "{ok} should be valid");
        }
    }

    #[test]
    fn rejects_bad_shapes() {
        for bad in ["", "Deals", "summer deals", "-deals", "deals-", "caf\u{e9}"] {
            assert!(Slug::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn serde_round_trips_through_string() {
        let slug = Slug::new("top-offers").unwrap();
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"top-offers\"");
        let back: Slug = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slug);
    }
}
