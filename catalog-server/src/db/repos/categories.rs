//! Category repository
//!
//! Plain CRUD over the `categories` table. Deletion is rejected while any
//! product still references the category, keeping every product's 2-or-3
//! association invariant intact.

use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::{EntityName, Pagination};

/// Category record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a single category by id.
    pub async fn get(&self, id: i64) -> Result<Category, DbError> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(DbError::NotFound {
                resource: "category",
                id,
            })
    }

    /// List categories in id order, one page at a time.
    pub async fn list(&self, page: Pagination) -> Result<Vec<Category>, DbError> {
        let items = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Create a category, returning the record with its assigned id.
    pub async fn create(&self, name: EntityName) -> Result<Category, DbError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES (?) RETURNING id, name",
        )
        .bind(name.as_str())
        .fetch_one(self.pool)
        .await?;

        tracing::info!(id = category.id, "Category created");
        Ok(category)
    }

    /// Overwrite a category's name.
    pub async fn update(&self, id: i64, name: EntityName) -> Result<Category, DbError> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = ? WHERE id = ? RETURNING id, name",
        )
        .bind(name.as_str())
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "category",
            id,
        })
    }

    /// Delete a category, returning the pre-delete snapshot.
    ///
    /// Rejected with `CategoryInUse` while any product still references
    /// the category. The existence check, reference count, and delete run
    /// in one transaction so the count cannot go stale mid-operation.
    pub async fn delete(&self, id: i64) -> Result<Category, DbError> {
        let mut tx = self.pool.begin().await?;

        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(DbError::NotFound {
            resource: "category",
            id,
        })?;

        let (products,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM product_categories WHERE category_id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if products > 0 {
            return Err(DbError::CategoryInUse { id, products });
        }

        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(id, "Category deleted");
        Ok(category)
    }
}
