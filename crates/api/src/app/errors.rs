use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use promodeck_core::DomainError;
use promodeck_store::StoreError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::Unauthorized => json_error(StatusCode::FORBIDDEN, "unauthorized", "unauthorized"),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::DuplicateSlug(slug) => json_error(
            StatusCode::CONFLICT,
            "duplicate_slug",
            format!("slug {slug:?} is already in use"),
        ),
        StoreError::DuplicateEmail(email) => json_error(
            StatusCode::CONFLICT,
            "duplicate_email",
            format!("an admin with email {email:?} already exists"),
        ),
        StoreError::CategoryInUse(id) => json_error(
            StatusCode::CONFLICT,
            "category_in_use",
            format!("category {id} still owns promotions"),
        ),
        StoreError::UnknownCategory(id) => json_error(
            StatusCode::BAD_REQUEST,
            "unknown_category",
            format!("category {id} does not exist"),
        ),
        StoreError::Backend(msg) => {
            tracing::error!(error = %msg, "store backend failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}
