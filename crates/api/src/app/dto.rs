use chrono::{DateTime, Utc};
use serde::Deserialize;

use promodeck_auth::{AdminAccount, Session};
use promodeck_catalog::Category;
use promodeck_core::CategoryId;
use promodeck_store::PromotionRecord;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterAdminRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Full category field set. The admin form always submits everything, so the
/// same DTO serves create and update.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// Full promotion field set, likewise shared by create and update.
#[derive(Debug, Deserialize)]
pub struct PromotionRequest {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub category_id: CategoryId,
    pub url: Option<String>,
    pub commission_rate: Option<f64>,
    /// One of `active`, `inactive`, `draft`.
    pub status: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn category_to_json(category: &Category) -> serde_json::Value {
    serde_json::json!({
        "id": category.id.to_string(),
        "name": category.name,
        "slug": category.slug.as_str(),
        "description": category.description,
        "created_at": category.created_at.to_rfc3339(),
    })
}

pub fn promotion_to_json(record: &PromotionRecord) -> serde_json::Value {
    let p = &record.promotion;
    serde_json::json!({
        "id": p.id.to_string(),
        "title": p.title,
        "description": p.description,
        "content": p.content,
        "category_id": p.category_id.to_string(),
        "category": { "name": record.category_name },
        "url": p.url,
        "commission_rate": p.commission_rate,
        "status": p.status.as_str(),
        "start_date": p.start_date.map(|d| d.to_rfc3339()),
        "end_date": p.end_date.map(|d| d.to_rfc3339()),
        "meta_title": p.meta_title,
        "meta_description": p.meta_description,
        "created_at": p.created_at.to_rfc3339(),
    })
}

pub fn admin_to_json(account: &AdminAccount) -> serde_json::Value {
    serde_json::json!({
        "id": account.id.to_string(),
        "email": account.email,
        "display_name": account.display_name,
        "created_at": account.created_at.to_rfc3339(),
    })
}

pub fn session_to_json(session: &Session) -> serde_json::Value {
    serde_json::json!({
        "token": session.token.as_str(),
        "expires_at": session.expires_at.to_rfc3339(),
    })
}
