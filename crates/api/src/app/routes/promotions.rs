//! Admin promotion management (session-gated by the routing middleware).

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use promodeck_catalog::{Promotion, PromotionFields, PromotionStatus};
use promodeck_core::PromotionId;
use promodeck_store::PromotionQuery;

use crate::app::{dto, errors, AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_promotions).post(create_promotion))
        .route(
            "/:id",
            axum::routing::put(update_promotion).delete(delete_promotion),
        )
}

fn fields_from_request(
    body: dto::PromotionRequest,
) -> Result<PromotionFields, axum::response::Response> {
    let status =
        PromotionStatus::parse(&body.status).map_err(errors::domain_error_to_response)?;
    Ok(PromotionFields {
        title: body.title,
        description: body.description,
        content: body.content,
        category_id: body.category_id,
        url: body.url,
        commission_rate: body.commission_rate,
        status,
        start_date: body.start_date,
        end_date: body.end_date,
        meta_title: body.meta_title,
        meta_description: body.meta_description,
    })
}

/// GET /admin/promotions — all statuses, newest first, category name joined.
pub async fn list_promotions(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services
        .catalog
        .list_promotions(&PromotionQuery::default())
        .await
    {
        Ok(items) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "items": items.iter().map(dto::promotion_to_json).collect::<Vec<_>>(),
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// POST /admin/promotions
pub async fn create_promotion(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::PromotionRequest>,
) -> axum::response::Response {
    let fields = match fields_from_request(body) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };

    let promotion = match Promotion::new(PromotionId::new(), fields, Utc::now()) {
        Ok(promotion) => promotion,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.catalog.insert_promotion(promotion.clone()).await {
        return errors::store_error_to_response(e);
    }

    // Echo the joined shape listings use.
    match services.catalog.get_promotion(promotion.id).await {
        Ok(Some(record)) => {
            (StatusCode::CREATED, Json(dto::promotion_to_json(&record))).into_response()
        }
        Ok(None) => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            "promotion vanished after insert",
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// PUT /admin/promotions/{id} — full-field replacement.
pub async fn update_promotion(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::PromotionRequest>,
) -> axum::response::Response {
    let id: PromotionId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid promotion id")
        }
    };

    let fields = match fields_from_request(body) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };

    let existing = match services.catalog.get_promotion(id).await {
        Ok(Some(record)) => record.promotion,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "promotion not found")
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    let updated = match existing.with_fields(fields) {
        Ok(promotion) => promotion,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.catalog.update_promotion(updated.clone()).await {
        return errors::store_error_to_response(e);
    }

    match services.catalog.get_promotion(updated.id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(dto::promotion_to_json(&record))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "promotion not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// DELETE /admin/promotions/{id}
pub async fn delete_promotion(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PromotionId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid promotion id")
        }
    };

    match services.catalog.delete_promotion(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
