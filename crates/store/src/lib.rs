//! `promodeck-store` — data access behind trait boundaries.
//!
//! Handlers receive these traits by injection; nothing in the application
//! constructs ambient global clients. Two catalog backends exist: an
//! in-memory one for development and tests, and a Postgres one (feature
//! `postgres`) for deployments. The identity store only ships in-memory —
//! production delegates credential checks to an external identity provider.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use promodeck_auth::{AdminAccount, Session, SessionToken};
use promodeck_catalog::{Category, Promotion, PromotionStatus};
use promodeck_core::{AdminId, CategoryId, PromotionId};

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::{InMemoryCatalogStore, InMemoryIdentityStore};
#[cfg(feature = "postgres")]
pub use postgres::PostgresCatalogStore;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-boundary error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("a category with slug {0:?} already exists")]
    DuplicateSlug(String),

    #[error("an admin with email {0:?} already exists")]
    DuplicateEmail(String),

    #[error("category {0} still owns promotions")]
    CategoryInUse(CategoryId),

    #[error("category {0} does not exist")]
    UnknownCategory(CategoryId),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Sort order for category listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryOrder {
    /// Storefront navigation order.
    #[default]
    NameAsc,
    /// Admin listing order.
    NewestFirst,
}

/// Equality filters, ordering and limit for promotion listings.
///
/// Results are always newest-first, matching the original queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromotionQuery {
    pub status: Option<PromotionStatus>,
    pub category_id: Option<CategoryId>,
    pub limit: Option<usize>,
}

impl PromotionQuery {
    /// The storefront home query: active promotions, newest first, capped.
    pub fn storefront() -> Self {
        Self {
            status: Some(PromotionStatus::Active),
            category_id: None,
            limit: Some(12),
        }
    }
}

/// A promotion joined with its owning category's name, as listings render it.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionRecord {
    pub promotion: Promotion,
    pub category_name: String,
}

/// Query and mutation interface over the catalog collections.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_categories(&self, order: CategoryOrder) -> StoreResult<Vec<Category>>;
    async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>>;
    async fn category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>>;
    async fn insert_category(&self, category: Category) -> StoreResult<()>;
    async fn update_category(&self, category: Category) -> StoreResult<()>;
    /// Fails with [`StoreError::CategoryInUse`] while promotions reference it.
    async fn delete_category(&self, id: CategoryId) -> StoreResult<()>;

    async fn list_promotions(&self, query: &PromotionQuery) -> StoreResult<Vec<PromotionRecord>>;
    async fn get_promotion(&self, id: PromotionId) -> StoreResult<Option<PromotionRecord>>;
    async fn insert_promotion(&self, promotion: Promotion) -> StoreResult<()>;
    async fn update_promotion(&self, promotion: Promotion) -> StoreResult<()>;
    async fn delete_promotion(&self, id: PromotionId) -> StoreResult<()>;

    /// Dashboard stat: number of promotions in the given status.
    async fn count_promotions(&self, status: PromotionStatus) -> StoreResult<u64>;
}

/// Admin directory and session registry.
///
/// The tenant router only ever calls [`IdentityStore::session_present`]; the
/// rest backs the login/register/logout endpoints.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn register_admin(&self, account: AdminAccount, password: &str) -> StoreResult<()>;
    async fn verify_credentials(&self, email: &str, password: &str)
        -> StoreResult<Option<AdminId>>;
    async fn open_session(
        &self,
        admin_id: AdminId,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> StoreResult<Session>;
    async fn session_present(&self, token: &SessionToken, now: DateTime<Utc>)
        -> StoreResult<bool>;
    async fn admin_for_session(
        &self,
        token: &SessionToken,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<AdminAccount>>;
    async fn close_session(&self, token: &SessionToken) -> StoreResult<()>;
}
