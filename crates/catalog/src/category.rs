//! Category records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use promodeck_core::{CategoryId, DomainError, DomainResult, Slug};

/// The caller-supplied fields of a category.
///
/// The admin edit form always submits the full field set, so updates replace
/// all fields rather than patching individual ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFields {
    pub name: String,
    pub slug: Slug,
    /// Free-form description; the original table allows NULL here.
    pub description: Option<String>,
}

/// A storefront category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: Slug,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(id: CategoryId, fields: CategoryFields, now: DateTime<Utc>) -> DomainResult<Self> {
        validate(&fields)?;
        Ok(Self {
            id,
            name: fields.name,
            slug: fields.slug,
            description: fields.description,
            created_at: now,
        })
    }

    /// Replace all editable fields, keeping id and creation time.
    pub fn with_fields(self, fields: CategoryFields) -> DomainResult<Self> {
        validate(&fields)?;
        Ok(Self {
            name: fields.name,
            slug: fields.slug,
            description: fields.description,
            ..self
        })
    }
}

fn validate(fields: &CategoryFields) -> DomainResult<()> {
    if fields.name.trim().is_empty() {
        return Err(DomainError::validation("category name must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, slug: &str) -> CategoryFields {
        CategoryFields {
            name: name.to_string(),
            slug: Slug::new(slug).unwrap(),
            description: None,
        }
    }

    #[test]
    fn creates_with_valid_fields() {
        let cat = Category::new(CategoryId::new(), fields("Deals", "deals"), Utc::now()).unwrap();
        assert_eq!(cat.name, "Deals");
        assert_eq!(cat.slug.as_str(), "deals");
        assert!(cat.description.is_none());
    }

    #[test]
    fn rejects_blank_name() {
        let err = Category::new(CategoryId::new(), fields("  ", "deals"), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_keeps_id_and_created_at() {
        let now = Utc::now();
        let cat = Category::new(CategoryId::new(), fields("Deals", "deals"), now).unwrap();
        let id = cat.id;
        let updated = cat.with_fields(fields("Top Deals", "top-deals")).unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, now);
        assert_eq!(updated.slug.as_str(), "top-deals");
    }
}
