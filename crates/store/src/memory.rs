//! In-memory store implementations (development and tests).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use promodeck_auth::{validate_session, AdminAccount, Session, SessionToken};
use promodeck_catalog::{Category, Promotion, PromotionStatus};
use promodeck_core::{AdminId, CategoryId, PromotionId};

use crate::{
    CatalogStore, CategoryOrder, IdentityStore, PromotionQuery, PromotionRecord, StoreError,
    StoreResult,
};

/// In-memory catalog backend.
///
/// A coarse mutex over both collections is plenty here: requests touch small
/// maps and hold the lock for microseconds.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: Mutex<CatalogState>,
}

#[derive(Debug, Default)]
struct CatalogState {
    categories: HashMap<CategoryId, Category>,
    promotions: HashMap<PromotionId, Promotion>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogState {
    fn slug_taken(&self, slug: &str, except: Option<CategoryId>) -> bool {
        self.categories
            .values()
            .any(|c| c.slug.as_str() == slug && Some(c.id) != except)
    }

    fn join(&self, promotion: &Promotion) -> PromotionRecord {
        let category_name = self
            .categories
            .get(&promotion.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        PromotionRecord {
            promotion: promotion.clone(),
            category_name,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    // Lock poisoning only happens if a holder panicked; propagate the panic.
    mutex.lock().expect("in-memory store mutex poisoned")
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn list_categories(&self, order: CategoryOrder) -> StoreResult<Vec<Category>> {
        let state = lock(&self.inner);
        let mut items: Vec<Category> = state.categories.values().cloned().collect();
        match order {
            CategoryOrder::NameAsc => items.sort_by(|a, b| a.name.cmp(&b.name)),
            CategoryOrder::NewestFirst => {
                items.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)))
            }
        }
        Ok(items)
    }

    async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        Ok(lock(&self.inner).categories.get(&id).cloned())
    }

    async fn category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        Ok(lock(&self.inner)
            .categories
            .values()
            .find(|c| c.slug.as_str() == slug)
            .cloned())
    }

    async fn insert_category(&self, category: Category) -> StoreResult<()> {
        let mut state = lock(&self.inner);
        if state.slug_taken(category.slug.as_str(), None) {
            return Err(StoreError::DuplicateSlug(category.slug.to_string()));
        }
        state.categories.insert(category.id, category);
        Ok(())
    }

    async fn update_category(&self, category: Category) -> StoreResult<()> {
        let mut state = lock(&self.inner);
        if !state.categories.contains_key(&category.id) {
            return Err(StoreError::NotFound);
        }
        if state.slug_taken(category.slug.as_str(), Some(category.id)) {
            return Err(StoreError::DuplicateSlug(category.slug.to_string()));
        }
        state.categories.insert(category.id, category);
        Ok(())
    }

    async fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        let mut state = lock(&self.inner);
        if !state.categories.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if state.promotions.values().any(|p| p.category_id == id) {
            return Err(StoreError::CategoryInUse(id));
        }
        state.categories.remove(&id);
        Ok(())
    }

    async fn list_promotions(&self, query: &PromotionQuery) -> StoreResult<Vec<PromotionRecord>> {
        let state = lock(&self.inner);
        let mut items: Vec<&Promotion> = state
            .promotions
            .values()
            .filter(|p| query.status.is_none_or(|s| p.status == s))
            .filter(|p| query.category_id.is_none_or(|c| p.category_id == c))
            .collect();
        items.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        if let Some(limit) = query.limit {
            items.truncate(limit);
        }
        Ok(items.into_iter().map(|p| state.join(p)).collect())
    }

    async fn get_promotion(&self, id: PromotionId) -> StoreResult<Option<PromotionRecord>> {
        let state = lock(&self.inner);
        Ok(state.promotions.get(&id).map(|p| state.join(p)))
    }

    async fn insert_promotion(&self, promotion: Promotion) -> StoreResult<()> {
        let mut state = lock(&self.inner);
        if !state.categories.contains_key(&promotion.category_id) {
            return Err(StoreError::UnknownCategory(promotion.category_id));
        }
        state.promotions.insert(promotion.id, promotion);
        Ok(())
    }

    async fn update_promotion(&self, promotion: Promotion) -> StoreResult<()> {
        let mut state = lock(&self.inner);
        if !state.promotions.contains_key(&promotion.id) {
            return Err(StoreError::NotFound);
        }
        if !state.categories.contains_key(&promotion.category_id) {
            return Err(StoreError::UnknownCategory(promotion.category_id));
        }
        state.promotions.insert(promotion.id, promotion);
        Ok(())
    }

    async fn delete_promotion(&self, id: PromotionId) -> StoreResult<()> {
        lock(&self.inner)
            .promotions
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn count_promotions(&self, status: PromotionStatus) -> StoreResult<u64> {
        Ok(lock(&self.inner)
            .promotions
            .values()
            .filter(|p| p.status == status)
            .count() as u64)
    }
}

/// In-memory admin directory and session registry.
///
/// Dev-grade: passwords are stored verbatim. Production deployments delegate
/// credential verification to an external identity provider instead.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    inner: Mutex<IdentityState>,
}

#[derive(Debug, Default)]
struct IdentityState {
    admins: HashMap<AdminId, (AdminAccount, String)>,
    sessions: HashMap<String, Session>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityState {
    fn live_session(&self, token: &SessionToken, now: DateTime<Utc>) -> Option<&Session> {
        self.sessions
            .get(token.as_str())
            .filter(|s| validate_session(s, now).is_ok())
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn register_admin(&self, account: AdminAccount, password: &str) -> StoreResult<()> {
        let mut state = lock(&self.inner);
        if state.admins.values().any(|(a, _)| a.email == account.email) {
            return Err(StoreError::DuplicateEmail(account.email.clone()));
        }
        state
            .admins
            .insert(account.id, (account, password.to_string()));
        Ok(())
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> StoreResult<Option<AdminId>> {
        let state = lock(&self.inner);
        Ok(state
            .admins
            .values()
            .find(|(a, stored)| a.email == email && stored == password)
            .map(|(a, _)| a.id))
    }

    async fn open_session(
        &self,
        admin_id: AdminId,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> StoreResult<Session> {
        let mut state = lock(&self.inner);
        if !state.admins.contains_key(&admin_id) {
            return Err(StoreError::NotFound);
        }
        let session = Session {
            token: SessionToken::mint(),
            admin_id,
            issued_at: now,
            expires_at: now + ttl,
        };
        state
            .sessions
            .insert(session.token.as_str().to_string(), session.clone());
        Ok(session)
    }

    async fn session_present(
        &self,
        token: &SessionToken,
        now: DateTime<Utc>,
    ) -> StoreResult<bool> {
        Ok(lock(&self.inner).live_session(token, now).is_some())
    }

    async fn admin_for_session(
        &self,
        token: &SessionToken,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<AdminAccount>> {
        let state = lock(&self.inner);
        Ok(state
            .live_session(token, now)
            .and_then(|s| state.admins.get(&s.admin_id))
            .map(|(a, _)| a.clone()))
    }

    async fn close_session(&self, token: &SessionToken) -> StoreResult<()> {
        lock(&self.inner).sessions.remove(token.as_str());
        Ok(())
    }
}
