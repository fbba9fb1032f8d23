//! Admin identity endpoints: registration, login/logout, dashboard.
//!
//! `/admin/login` and `/admin/register` are the two admin paths the routing
//! middleware leaves open; everything else here only runs with a live
//! session.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use promodeck_auth::{check_password_policy, AdminAccount};
use promodeck_catalog::PromotionStatus;
use promodeck_core::AdminId;

use crate::app::{dto, errors, AppServices};
use crate::middleware::extract_session_token;

/// POST /admin/register — create an admin account.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterAdminRequest>,
) -> axum::response::Response {
    if let Err(e) = check_password_policy(&body.password) {
        return errors::domain_error_to_response(e);
    }

    let account = match AdminAccount::register(AdminId::new(), body.email, Utc::now()) {
        Ok(account) => account,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services
        .identity
        .register_admin(account.clone(), &body.password)
        .await
    {
        return errors::store_error_to_response(e);
    }

    tracing::info!(admin = %account.id, "admin account registered");
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "admin": dto::admin_to_json(&account) })),
    )
        .into_response()
}

/// POST /admin/login — verify credentials and open a session.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let admin_id = match services
        .identity
        .verify_credentials(&body.email, &body.password)
        .await
    {
        Ok(Some(id)) => id,
        Ok(None) => {
            return errors::json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "email or password is incorrect",
            )
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    let session = match services
        .identity
        .open_session(admin_id, services.session_ttl, Utc::now())
        .await
    {
        Ok(session) => session,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(dto::session_to_json(&session)),
    )
        .into_response()
}

/// POST /admin/logout — drop the current session, if any.
pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    if let Some(token) = extract_session_token(&headers) {
        if let Err(e) = services.identity.close_session(&token).await {
            return errors::store_error_to_response(e);
        }
    }
    StatusCode::NO_CONTENT.into_response()
}

/// GET /admin/dashboard — headline stats for the signed-in admin.
pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    // The middleware already gated this path; re-resolving the account keeps
    // the handler honest if it is ever mounted elsewhere.
    let account = match resolve_admin(&services, &headers).await {
        Ok(account) => account,
        Err(resp) => return resp,
    };

    let active = match services
        .catalog
        .count_promotions(PromotionStatus::Active)
        .await
    {
        Ok(n) => n,
        Err(e) => return errors::store_error_to_response(e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "admin": dto::admin_to_json(&account),
            "stats": { "active_promotions": active },
        })),
    )
        .into_response()
}

async fn resolve_admin(
    services: &AppServices,
    headers: &HeaderMap,
) -> Result<AdminAccount, axum::response::Response> {
    let Some(token) = extract_session_token(headers) else {
        return Err(errors::json_error(
            StatusCode::UNAUTHORIZED,
            "no_session",
            "no session token on request",
        ));
    };
    match services.identity.admin_for_session(&token, Utc::now()).await {
        Ok(Some(account)) => Ok(account),
        Ok(None) => Err(errors::json_error(
            StatusCode::UNAUTHORIZED,
            "no_session",
            "session is missing or expired",
        )),
        Err(e) => Err(errors::store_error_to_response(e)),
    }
}
