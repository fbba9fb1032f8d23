//! HTTP application wiring (Axum router + injected stores).
//!
//! Layout:
//! - `routes/`: handlers, one file per surface (storefront, admin, catalog)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use promodeck_store::{CatalogStore, IdentityStore};

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Injected collaborators shared by all handlers.
///
/// Constructed once at startup and passed in; handlers never build their own
/// store clients.
pub struct AppServices {
    pub catalog: Arc<dyn CatalogStore>,
    pub identity: Arc<dyn IdentityStore>,
    pub session_ttl: chrono::Duration,
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(
    config: &AppConfig,
    catalog: Arc<dyn CatalogStore>,
    identity: Arc<dyn IdentityStore>,
) -> Router {
    let services = Arc::new(AppServices {
        catalog,
        identity: identity.clone(),
        session_ttl: config.session_ttl,
    });

    let router_state = middleware::RouterState {
        config: Arc::new(config.router.clone()),
        identity,
    };

    let inner = Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services));

    // Outermost: the tenant router sees every request before matching, so its
    // URI rewrites re-route. `Router::layer` runs after matching, which would
    // make rewrites land on the 404 fallback; wrapping the whole route tree
    // and mounting it as the fallback service runs the middleware first.
    Router::new().fallback_service(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                router_state,
                middleware::tenant_router_middleware,
            ))
            .service(inner),
    )
}
