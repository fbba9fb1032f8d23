use axum::{
    routing::{get, post},
    Router,
};

pub mod admin;
pub mod categories;
pub mod promotions;
pub mod storefront;
pub mod system;

/// Router for everything below the root: the admin dashboard surface and the
/// tenant-scoped storefronts. Session gating for `/admin` happens in the
/// tenant routing middleware, not here.
pub fn router() -> Router {
    Router::new()
        .nest("/admin", admin_router())
        .route("/:tenant", get(storefront::home))
        // Rewriting the bare root produces a trailing slash (`/site-a/`).
        .route("/:tenant/", get(storefront::home))
        .route("/:tenant/categories/:slug", get(storefront::category_page))
}

fn admin_router() -> Router {
    Router::new()
        .route("/register", post(admin::register))
        .route("/login", post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/dashboard", get(admin::dashboard))
        .nest("/categories", categories::router())
        .nest("/promotions", promotions::router())
}
