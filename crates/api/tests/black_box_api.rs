use std::sync::Arc;

use reqwest::{header, StatusCode};
use serde_json::json;

use promodeck_api::config::AppConfig;
use promodeck_router::{Environment, Tenant};
use promodeck_store::{InMemoryCatalogStore, InMemoryIdentityStore};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(config: AppConfig) -> Self {
        // Same router as prod, bound to an ephemeral port with in-memory stores.
        let catalog = Arc::new(InMemoryCatalogStore::new());
        let identity = Arc::new(InMemoryIdentityStore::new());
        let app = promodeck_api::app::build_app(&config, catalog, identity);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn spawn_default() -> Self {
        Self::spawn(AppConfig::default()).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Client that surfaces 3xx responses instead of following them.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

async fn register_and_login(client: &reqwest::Client, base_url: &str) -> String {
    let res = client
        .post(format!("{base_url}/admin/register"))
        .json(&json!({ "email": "ops@site-a.com", "password": "hunter2!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{base_url}/admin/login"))
        .json(&json!({ "email": "ops@site-a.com", "password": "hunter2!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_exempt_from_tenant_routing() {
    let server = TestServer::spawn_default().await;
    let res = client()
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn root_is_rewritten_to_the_default_storefront() {
    let server = TestServer::spawn_default().await;
    let res = client()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["tenant"], "site-a");
}

#[tokio::test]
async fn tenant_prefixed_paths_pass_through() {
    let server = TestServer::spawn_default().await;
    let res = client()
        .get(format!("{}/site-b", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["tenant"], "site-b");
}

#[tokio::test]
async fn admin_without_session_redirects_to_login() {
    let server = TestServer::spawn_default().await;
    let res = client()
        .get(format!("{}/admin/dashboard", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        res.headers().get(header::LOCATION).unwrap(),
        "/admin/login"
    );
}

#[tokio::test]
async fn login_path_is_open_without_a_session() {
    let server = TestServer::spawn_default().await;
    // Wrong credentials reach the handler (401), not the redirect (307).
    let res = client()
        .post(format!("{}/admin/login", server.base_url))
        .json(&json!({ "email": "ops@site-a.com", "password": "wrong-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let server = TestServer::spawn_default().await;
    let client = client();
    register_and_login(&client, &server.base_url).await;

    let res = client
        .post(format!("{}/admin/register", server.base_url))
        .json(&json!({ "email": "ops@site-a.com", "password": "hunter2!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn admin_crud_flows_through_to_the_storefront() {
    let server = TestServer::spawn_default().await;
    let client = client();
    let token = register_and_login(&client, &server.base_url).await;

    // Dashboard starts with zero active promotions.
    let res = client
        .get(format!("{}/admin/dashboard", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["stats"]["active_promotions"], 0);
    assert_eq!(body["admin"]["email"], "ops@site-a.com");

    // Create a category.
    let res = client
        .post(format!("{}/admin/categories", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Deals", "slug": "deals", "description": "Best offers" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let category: serde_json::Value = res.json().await.unwrap();
    let category_id = category["id"].as_str().unwrap().to_string();

    // Create an active promotion in it.
    let res = client
        .post(format!("{}/admin/promotions", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Summer cashback",
            "description": "Up to 12% back",
            "content": "Long-form landing copy",
            "category_id": category_id,
            "url": "https://example.com/offer",
            "commission_rate": 12.5,
            "status": "active",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let promotion: serde_json::Value = res.json().await.unwrap();
    assert_eq!(promotion["category"]["name"], "Deals");

    // Dashboard stat follows.
    let res = client
        .get(format!("{}/admin/dashboard", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["stats"]["active_promotions"], 1);

    // The storefront home shows it, category name joined.
    let res = client
        .get(format!("{}/site-a", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["promotions"][0]["title"], "Summer cashback");
    assert_eq!(body["promotions"][0]["category"]["name"], "Deals");

    // An unprefixed category page is rewritten onto the default tenant.
    let res = client
        .get(format!("{}/categories/deals", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["tenant"], "site-a");
    assert_eq!(body["category"]["slug"], "deals");
    assert_eq!(body["promotions"][0]["title"], "Summer cashback");

    // Logout drops the session; the dashboard gate closes again.
    let res = client
        .post(format!("{}/admin/logout", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/admin/dashboard", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn category_deletion_conflicts_while_promotions_remain() {
    let server = TestServer::spawn_default().await;
    let client = client();
    let token = register_and_login(&client, &server.base_url).await;

    let res = client
        .post(format!("{}/admin/categories", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Apps", "slug": "apps" }))
        .send()
        .await
        .unwrap();
    let category: serde_json::Value = res.json().await.unwrap();
    let category_id = category["id"].as_str().unwrap().to_string();

    let res = client
        .post(format!("{}/admin/promotions", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Install bonus",
            "content": "copy",
            "category_id": category_id,
            "status": "draft",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let promotion: serde_json::Value = res.json().await.unwrap();
    let promotion_id = promotion["id"].as_str().unwrap().to_string();

    let res = client
        .delete(format!("{}/admin/categories/{category_id}", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = client
        .delete(format!("{}/admin/promotions/{promotion_id}", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .delete(format!("{}/admin/categories/{category_id}", server.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn production_host_mapping_selects_the_tenant() {
    let mut config = AppConfig::default();
    config.router.environment = Environment::Production;
    config.router.hosts = vec![("site-b.com".to_string(), Tenant::new("site-b"))];
    let server = TestServer::spawn(config).await;
    let client = client();

    let res = client
        .get(format!("{}/", server.base_url))
        .header(header::HOST, "site-b.com")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["tenant"], "site-b");

    // Unmapped hosts keep the launch behavior: default tenant.
    let res = client
        .get(format!("{}/", server.base_url))
        .header(header::HOST, "unmapped.example")
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["tenant"], "site-a");
}
