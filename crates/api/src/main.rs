use std::sync::Arc;

use promodeck_api::config::AppConfig;
use promodeck_store::{CatalogStore, IdentityStore, InMemoryCatalogStore, InMemoryIdentityStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    promodeck_observability::init();

    let config = AppConfig::from_env();
    let catalog = build_catalog_store(&config).await?;

    // Session presence is the only identity fact the router consumes;
    // production deployments swap this for an external identity provider.
    let identity: Arc<dyn IdentityStore> = Arc::new(InMemoryIdentityStore::new());

    let app = promodeck_api::app::build_app(&config, catalog, identity);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(feature = "postgres")]
async fn build_catalog_store(config: &AppConfig) -> anyhow::Result<Arc<dyn CatalogStore>> {
    use anyhow::Context;

    if config.use_persistent_store {
        let url = config
            .database_url
            .as_deref()
            .context("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")?;
        let pool = sqlx::PgPool::connect(url)
            .await
            .context("failed to connect to Postgres")?;
        return Ok(Arc::new(promodeck_store::PostgresCatalogStore::new(pool)));
    }
    Ok(Arc::new(InMemoryCatalogStore::new()))
}

#[cfg(not(feature = "postgres"))]
async fn build_catalog_store(config: &AppConfig) -> anyhow::Result<Arc<dyn CatalogStore>> {
    if config.use_persistent_store {
        tracing::warn!(
            "USE_PERSISTENT_STORES=true but postgres feature not enabled, using in-memory store"
        );
    }
    Ok(Arc::new(InMemoryCatalogStore::new()))
}
