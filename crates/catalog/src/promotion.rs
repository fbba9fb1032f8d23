//! Promotion records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use promodeck_core::{CategoryId, DomainError, DomainResult, PromotionId};

/// Publication status of a promotion.
///
/// Storefronts only ever show `active` promotions; `inactive` and `draft`
/// exist for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionStatus {
    Active,
    Inactive,
    Draft,
}

impl PromotionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PromotionStatus::Active => "active",
            PromotionStatus::Inactive => "inactive",
            PromotionStatus::Draft => "draft",
        }
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "active" => Ok(PromotionStatus::Active),
            "inactive" => Ok(PromotionStatus::Inactive),
            "draft" => Ok(PromotionStatus::Draft),
            other => Err(DomainError::validation(format!(
                "status must be one of: active, inactive, draft (got {other:?})"
            ))),
        }
    }
}

/// The caller-supplied fields of a promotion.
///
/// Nullable columns in the original table are explicit `Option`s here; the
/// admin edit form submits the full set, so updates replace all fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionFields {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub category_id: CategoryId,
    /// Outbound offer link; storefront cards fall back to `#` when absent.
    pub url: Option<String>,
    /// Percentage in `0.0..=100.0`.
    pub commission_rate: Option<f64>,
    pub status: PromotionStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

/// A marketing promotion, owned by exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: PromotionId,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub category_id: CategoryId,
    pub url: Option<String>,
    pub commission_rate: Option<f64>,
    pub status: PromotionStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Promotion {
    pub fn new(id: PromotionId, fields: PromotionFields, now: DateTime<Utc>) -> DomainResult<Self> {
        validate(&fields)?;
        Ok(Self {
            id,
            title: fields.title,
            description: fields.description,
            content: fields.content,
            category_id: fields.category_id,
            url: fields.url,
            commission_rate: fields.commission_rate,
            status: fields.status,
            start_date: fields.start_date,
            end_date: fields.end_date,
            meta_title: fields.meta_title,
            meta_description: fields.meta_description,
            created_at: now,
        })
    }

    /// Replace all editable fields, keeping id and creation time.
    pub fn with_fields(self, fields: PromotionFields) -> DomainResult<Self> {
        validate(&fields)?;
        Ok(Self {
            title: fields.title,
            description: fields.description,
            content: fields.content,
            category_id: fields.category_id,
            url: fields.url,
            commission_rate: fields.commission_rate,
            status: fields.status,
            start_date: fields.start_date,
            end_date: fields.end_date,
            meta_title: fields.meta_title,
            meta_description: fields.meta_description,
            ..self
        })
    }
}

fn validate(fields: &PromotionFields) -> DomainResult<()> {
    if fields.title.trim().is_empty() {
        return Err(DomainError::validation("promotion title must not be empty"));
    }
    if fields.content.trim().is_empty() {
        return Err(DomainError::validation(
            "promotion content must not be empty",
        ));
    }
    if let Some(rate) = fields.commission_rate {
        if !(0.0..=100.0).contains(&rate) {
            return Err(DomainError::validation(format!(
                "commission rate must be between 0 and 100 (got {rate})"
            )));
        }
    }
    if let (Some(start), Some(end)) = (fields.start_date, fields.end_date) {
        if end < start {
            return Err(DomainError::validation(
                "promotion end date must not precede its start date",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn fields(category_id: CategoryId) -> PromotionFields {
        PromotionFields {
            title: "Summer cashback".to_string(),
            description: Some("Up to 12% back".to_string()),
            content: "Long-form landing copy".to_string(),
            category_id,
            url: Some("https://example.com/offer".to_string()),
            commission_rate: Some(12.5),
            status: PromotionStatus::Active,
            start_date: None,
            end_date: None,
            meta_title: None,
            meta_description: None,
        }
    }

    #[test]
    fn creates_with_valid_fields() {
        let promo = Promotion::new(PromotionId::new(), fields(CategoryId::new()), Utc::now());
        assert!(promo.is_ok());
    }

    #[test]
    fn rejects_out_of_range_commission() {
        for rate in [-1.0, 100.5, f64::NAN] {
            let mut f = fields(CategoryId::new());
            f.commission_rate = Some(rate);
            let err = Promotion::new(PromotionId::new(), f, Utc::now()).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "rate {rate}");
        }
    }

    #[test]
    fn rejects_inverted_date_window() {
        let now = Utc::now();
        let mut f = fields(CategoryId::new());
        f.start_date = Some(now);
        f.end_date = Some(now - Duration::days(1));
        assert!(Promotion::new(PromotionId::new(), f, now).is_err());
    }

    #[test]
    fn equal_start_and_end_is_allowed() {
        let now = Utc::now();
        let mut f = fields(CategoryId::new());
        f.start_date = Some(now);
        f.end_date = Some(now);
        assert!(Promotion::new(PromotionId::new(), f, now).is_ok());
    }

    #[test]
    fn status_parses_lowercase_names() {
        assert_eq!(PromotionStatus::parse("active").unwrap(), PromotionStatus::Active);
        assert_eq!(PromotionStatus::parse("draft").unwrap(), PromotionStatus::Draft);
        assert!(PromotionStatus::parse("Active").is_err());
    }
}
