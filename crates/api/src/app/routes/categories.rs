//! Admin category management (session-gated by the routing middleware).

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use promodeck_catalog::{Category, CategoryFields};
use promodeck_core::{CategoryId, Slug};
use promodeck_store::CategoryOrder;

use crate::app::{dto, errors, AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            axum::routing::put(update_category).delete(delete_category),
        )
}

fn fields_from_request(body: dto::CategoryRequest) -> Result<CategoryFields, axum::response::Response> {
    let slug = Slug::new(body.slug).map_err(errors::domain_error_to_response)?;
    Ok(CategoryFields {
        name: body.name,
        slug,
        description: body.description,
    })
}

/// GET /admin/categories — newest first, as the admin page lists them.
pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services
        .catalog
        .list_categories(CategoryOrder::NewestFirst)
        .await
    {
        Ok(items) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "items": items.iter().map(dto::category_to_json).collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// POST /admin/categories
pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CategoryRequest>,
) -> axum::response::Response {
    let fields = match fields_from_request(body) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };

    let category = match Category::new(CategoryId::new(), fields, Utc::now()) {
        Ok(category) => category,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.catalog.insert_category(category.clone()).await {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::CREATED,
        Json(dto::category_to_json(&category)),
    )
        .into_response()
}

/// PUT /admin/categories/{id} — full-field replacement.
pub async fn update_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CategoryRequest>,
) -> axum::response::Response {
    let id: CategoryId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid category id"),
    };

    let fields = match fields_from_request(body) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };

    let existing = match services.catalog.get_category(id).await {
        Ok(Some(category)) => category,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "category not found")
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    let updated = match existing.with_fields(fields) {
        Ok(category) => category,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.catalog.update_category(updated.clone()).await {
        return errors::store_error_to_response(e);
    }

    (StatusCode::OK, Json(dto::category_to_json(&updated))).into_response()
}

/// DELETE /admin/categories/{id}
pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid category id"),
    };

    match services.catalog.delete_category(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
