//! Tenant routing middleware.
//!
//! Evaluates the pure routing decision from `promodeck-router` once per
//! request and applies it to the transport: pass-through, internal URI
//! rewrite, or redirect to the admin login page.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

use promodeck_auth::SessionToken;
use promodeck_router::{route, RequestFacts, RouteDecision, RouterConfig};
use promodeck_store::IdentityStore;

use crate::app::errors;
use crate::context::TenantContext;

#[derive(Clone)]
pub struct RouterState {
    pub config: Arc<RouterConfig>,
    pub identity: Arc<dyn IdentityStore>,
}

pub async fn tenant_router_middleware(
    State(state): State<RouterState>,
    mut req: axum::http::Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let session_present = match extract_session_token(req.headers()) {
        Some(token) => match state.identity.session_present(&token, Utc::now()).await {
            Ok(present) => present,
            Err(e) => {
                // The router itself is total; a failing session lookup just
                // means no usable session for this request.
                tracing::warn!(error = %e, "session lookup failed; treating as absent");
                false
            }
        },
        None => false,
    };

    let facts = RequestFacts {
        path: &path,
        host: host.as_deref(),
        session_present,
    };

    match route(&state.config, &facts) {
        RouteDecision::Pass => {
            if let Some(tenant) = state.config.tenant_for_path(&path) {
                req.extensions_mut()
                    .insert(TenantContext::new(tenant.clone()));
            }
            next.run(req).await
        }
        RouteDecision::RewriteToTenant { tenant, path: rewritten } => {
            tracing::debug!(tenant = %tenant, from = %path, to = %rewritten, "tenant rewrite");
            if let Err(resp) = rewrite_request_path(&mut req, &rewritten) {
                return resp;
            }
            req.extensions_mut().insert(TenantContext::new(tenant));
            next.run(req).await
        }
        RouteDecision::RedirectToLogin => {
            Redirect::temporary(&state.config.login_path()).into_response()
        }
    }
}

/// Swap the request's path in place, preserving the query string. The client
/// never sees the internal path.
fn rewrite_request_path(
    req: &mut axum::http::Request<Body>,
    new_path: &str,
) -> Result<(), Response> {
    let path_and_query = match req.uri().query() {
        Some(q) => format!("{new_path}?{q}"),
        None => new_path.to_string(),
    };

    let mut parts = req.uri().clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse().map_err(|_| bad_path(new_path))?);
    *req.uri_mut() = Uri::from_parts(parts).map_err(|_| bad_path(new_path))?;
    Ok(())
}

fn bad_path(path: &str) -> Response {
    errors::json_error(
        StatusCode::BAD_REQUEST,
        "bad_path",
        format!("cannot rewrite request to {path:?}"),
    )
}

/// Pull the opaque session token off a request: `Authorization: Bearer` for
/// API clients, `session` cookie for browsers.
pub fn extract_session_token(headers: &HeaderMap) -> Option<SessionToken> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Some(SessionToken::from_raw(token));
            }
        }
    }

    let cookies = headers.get(header::COOKIE).and_then(|h| h.to_str().ok())?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|kv| kv.strip_prefix("session="))
        .filter(|v| !v.is_empty())
        .map(SessionToken::from_raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer tok-a"),
        );
        headers.insert(header::COOKIE, HeaderValue::from_static("session=tok-b"));
        assert_eq!(
            extract_session_token(&headers),
            Some(SessionToken::from_raw("tok-a"))
        );
    }

    #[test]
    fn session_cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=tok-c; lang=en"),
        );
        assert_eq!(
            extract_session_token(&headers),
            Some(SessionToken::from_raw("tok-c"))
        );
    }

    #[test]
    fn empty_or_missing_tokens_are_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        headers.insert(header::COOKIE, HeaderValue::from_static("session="));
        assert_eq!(extract_session_token(&headers), None);
    }
}
