//! Public storefront pages (read-only, per tenant).
//!
//! Both storefronts read the same shared catalog; the tenant only changes the
//! branding context echoed back to the caller. Handlers rely on the routing
//! middleware to have resolved a tenant before they run.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use promodeck_store::{CategoryOrder, PromotionQuery};

use crate::app::{dto, errors, AppServices};
use crate::context::TenantContext;

/// GET /{tenant} — active promotions (newest first, capped) plus the category
/// navigation.
pub async fn home(
    Extension(services): Extension<Arc<AppServices>>,
    tenant: Option<Extension<TenantContext>>,
) -> axum::response::Response {
    // Exempt paths (e.g. `/favicon.ico`) can land here without a resolved
    // tenant; they are not storefront pages.
    let Some(Extension(tenant)) = tenant else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "unknown tenant");
    };

    let categories = match services.catalog.list_categories(CategoryOrder::NameAsc).await {
        Ok(items) => items,
        Err(e) => return errors::store_error_to_response(e),
    };

    let promotions = match services
        .catalog
        .list_promotions(&PromotionQuery::storefront())
        .await
    {
        Ok(items) => items,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "tenant": tenant.tenant().as_str(),
            "categories": categories.iter().map(dto::category_to_json).collect::<Vec<_>>(),
            "promotions": promotions.iter().map(dto::promotion_to_json).collect::<Vec<_>>(),
        })),
    )
        .into_response()
}

/// GET /{tenant}/categories/{slug} — active promotions within one category.
pub async fn category_page(
    Extension(services): Extension<Arc<AppServices>>,
    tenant: Option<Extension<TenantContext>>,
    Path((_tenant, slug)): Path<(String, String)>,
) -> axum::response::Response {
    let Some(Extension(tenant)) = tenant else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "unknown tenant");
    };

    let category = match services.catalog.category_by_slug(&slug).await {
        Ok(Some(category)) => category,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "category not found")
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    let query = PromotionQuery {
        status: Some(promodeck_catalog::PromotionStatus::Active),
        category_id: Some(category.id),
        limit: None,
    };
    let promotions = match services.catalog.list_promotions(&query).await {
        Ok(items) => items,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "tenant": tenant.tenant().as_str(),
            "category": dto::category_to_json(&category),
            "promotions": promotions.iter().map(dto::promotion_to_json).collect::<Vec<_>>(),
        })),
    )
        .into_response()
}
