//! Postgres-backed catalog store.
//!
//! Thin adapter over the hosted database. Schema ownership (migrations,
//! indexes) stays outside this crate; the queries here assume `categories`
//! and `promotions` tables shaped like the original hosted store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use promodeck_catalog::{Category, Promotion, PromotionStatus};
use promodeck_core::{CategoryId, PromotionId, Slug};

use crate::{
    CatalogStore, CategoryOrder, PromotionQuery, PromotionRecord, StoreError, StoreResult,
};

/// Catalog store over a shared `sqlx` connection pool.
///
/// The pool is internally reference-counted; clones of this store share it.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn category_from_row(row: &PgRow) -> StoreResult<Category> {
    let slug: String = row.try_get("slug")?;
    Ok(Category {
        id: CategoryId::from_uuid(row.try_get::<Uuid, _>("id")?),
        name: row.try_get("name")?,
        slug: Slug::new(slug).map_err(|e| StoreError::Backend(format!("corrupt slug: {e}")))?,
        description: row.try_get("description")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

fn promotion_from_row(row: &PgRow) -> StoreResult<PromotionRecord> {
    let status: String = row.try_get("status")?;
    let promotion = Promotion {
        id: PromotionId::from_uuid(row.try_get::<Uuid, _>("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        content: row.try_get("content")?,
        category_id: CategoryId::from_uuid(row.try_get::<Uuid, _>("category_id")?),
        url: row.try_get("url")?,
        commission_rate: row.try_get("commission_rate")?,
        status: PromotionStatus::parse(&status)
            .map_err(|e| StoreError::Backend(format!("corrupt status: {e}")))?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        meta_title: row.try_get("meta_title")?,
        meta_description: row.try_get("meta_description")?,
        created_at: row.try_get("created_at")?,
    };
    Ok(PromotionRecord {
        promotion,
        category_name: row.try_get("category_name")?,
    })
}

const PROMOTION_SELECT: &str = "SELECT p.id, p.title, p.description, p.content, p.category_id, \
     p.url, p.commission_rate, p.status, p.start_date, p.end_date, \
     p.meta_title, p.meta_description, p.created_at, \
     COALESCE(c.name, '') AS category_name \
     FROM promotions p LEFT JOIN categories c ON c.id = p.category_id";

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn list_categories(&self, order: CategoryOrder) -> StoreResult<Vec<Category>> {
        let order_by = match order {
            CategoryOrder::NameAsc => "name ASC",
            CategoryOrder::NewestFirst => "created_at DESC, id DESC",
        };
        let sql = format!(
            "SELECT id, name, slug, description, created_at FROM categories ORDER BY {order_by}"
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(category_from_row).collect()
    }

    async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        let row = sqlx::query(
            "SELECT id, name, slug, description, created_at FROM categories WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(category_from_row).transpose()
    }

    async fn category_by_slug(&self, slug: &str) -> StoreResult<Option<Category>> {
        let row = sqlx::query(
            "SELECT id, name, slug, description, created_at FROM categories WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(category_from_row).transpose()
    }

    async fn insert_category(&self, category: Category) -> StoreResult<()> {
        let taken =
            sqlx::query("SELECT 1 AS one FROM categories WHERE slug = $1 AND id <> $2 LIMIT 1")
                .bind(category.slug.as_str())
                .bind(category.id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
        if taken.is_some() {
            return Err(StoreError::DuplicateSlug(category.slug.to_string()));
        }
        sqlx::query(
            "INSERT INTO categories (id, name, slug, description, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(category.slug.as_str())
        .bind(&category.description)
        .bind(category.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_category(&self, category: Category) -> StoreResult<()> {
        let taken =
            sqlx::query("SELECT 1 AS one FROM categories WHERE slug = $1 AND id <> $2 LIMIT 1")
                .bind(category.slug.as_str())
                .bind(category.id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
        if taken.is_some() {
            return Err(StoreError::DuplicateSlug(category.slug.to_string()));
        }
        let result = sqlx::query(
            "UPDATE categories SET name = $2, slug = $3, description = $4 WHERE id = $1",
        )
        .bind(category.id.as_uuid())
        .bind(&category.name)
        .bind(category.slug.as_str())
        .bind(&category.description)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_category(&self, id: CategoryId) -> StoreResult<()> {
        let in_use = sqlx::query("SELECT 1 AS one FROM promotions WHERE category_id = $1 LIMIT 1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        if in_use.is_some() {
            return Err(StoreError::CategoryInUse(id));
        }
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_promotions(&self, query: &PromotionQuery) -> StoreResult<Vec<PromotionRecord>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(PROMOTION_SELECT);
        let mut first = true;
        let mut clause = |builder: &mut QueryBuilder<Postgres>| {
            builder.push(if first { " WHERE " } else { " AND " });
            first = false;
        };
        if let Some(status) = query.status {
            clause(&mut builder);
            builder.push("p.status = ").push_bind(status.as_str());
        }
        if let Some(category_id) = query.category_id {
            clause(&mut builder);
            builder
                .push("p.category_id = ")
                .push_bind(*category_id.as_uuid());
        }
        builder.push(" ORDER BY p.created_at DESC, p.id DESC");
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit as i64);
        }
        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(promotion_from_row).collect()
    }

    async fn get_promotion(&self, id: PromotionId) -> StoreResult<Option<PromotionRecord>> {
        let sql = format!("{PROMOTION_SELECT} WHERE p.id = $1");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(promotion_from_row).transpose()
    }

    async fn insert_promotion(&self, promotion: Promotion) -> StoreResult<()> {
        let exists = sqlx::query("SELECT 1 AS one FROM categories WHERE id = $1")
            .bind(promotion.category_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(StoreError::UnknownCategory(promotion.category_id));
        }
        sqlx::query(
            "INSERT INTO promotions (id, title, description, content, category_id, url, \
             commission_rate, status, start_date, end_date, meta_title, meta_description, \
             created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(promotion.id.as_uuid())
        .bind(&promotion.title)
        .bind(&promotion.description)
        .bind(&promotion.content)
        .bind(promotion.category_id.as_uuid())
        .bind(&promotion.url)
        .bind(promotion.commission_rate)
        .bind(promotion.status.as_str())
        .bind(promotion.start_date)
        .bind(promotion.end_date)
        .bind(&promotion.meta_title)
        .bind(&promotion.meta_description)
        .bind(promotion.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_promotion(&self, promotion: Promotion) -> StoreResult<()> {
        let exists = sqlx::query("SELECT 1 AS one FROM categories WHERE id = $1")
            .bind(promotion.category_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(StoreError::UnknownCategory(promotion.category_id));
        }
        let result = sqlx::query(
            "UPDATE promotions SET title = $2, description = $3, content = $4, category_id = $5, \
             url = $6, commission_rate = $7, status = $8, start_date = $9, end_date = $10, \
             meta_title = $11, meta_description = $12 WHERE id = $1",
        )
        .bind(promotion.id.as_uuid())
        .bind(&promotion.title)
        .bind(&promotion.description)
        .bind(&promotion.content)
        .bind(promotion.category_id.as_uuid())
        .bind(&promotion.url)
        .bind(promotion.commission_rate)
        .bind(promotion.status.as_str())
        .bind(promotion.start_date)
        .bind(promotion.end_date)
        .bind(&promotion.meta_title)
        .bind(&promotion.meta_description)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_promotion(&self, id: PromotionId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM promotions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn count_promotions(&self, status: PromotionStatus) -> StoreResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM promotions WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.try_get("n")?;
        Ok(n as u64)
    }
}
