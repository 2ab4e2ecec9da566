//! Product repository and association management
//!
//! The association set (the product's 2 or 3 categories) is replaced
//! wholesale, never edited incrementally. Every multi-step write runs in
//! a single transaction: category resolution, the product row, and the
//! join rows commit together or not at all, so a partially-applied link
//! set is never observable.

use sqlx::{Row, SqliteConnection, SqlitePool};

use super::{Category, DbError};
use crate::models::{CategoryIds, EntityName, Pagination};

/// Product with its joined category set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductWithCategories {
    pub id: i64,
    pub name: String,
    /// Associated categories, ordered by category id
    pub categories: Vec<Category>,
}

/// Product repository
pub struct ProductRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a single product with its category set.
    pub async fn get(&self, id: i64) -> Result<ProductWithCategories, DbError> {
        let mut conn = self.pool.acquire().await?;
        fetch_product(&mut *conn, id).await
    }

    /// List products with their category sets, one page at a time.
    ///
    /// Pagination applies to products, so the page window is taken in a
    /// subquery before joining the categories in (single query, no N+1).
    pub async fn list(&self, page: Pagination) -> Result<Vec<ProductWithCategories>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.name, c.id AS category_id, c.name AS category_name
            FROM (
                SELECT id, name FROM products
                ORDER BY id
                LIMIT ? OFFSET ?
            ) p
            JOIN product_categories pc ON pc.product_id = p.id
            JOIN categories c ON c.id = pc.category_id
            ORDER BY p.id, c.id
            "#,
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let mut products: Vec<ProductWithCategories> = Vec::new();
        for row in rows {
            let id: i64 = row.get("id");
            let category = Category {
                id: row.get("category_id"),
                name: row.get("category_name"),
            };

            match products.last_mut() {
                Some(p) if p.id == id => p.categories.push(category),
                _ => products.push(ProductWithCategories {
                    id,
                    name: row.get("name"),
                    categories: vec![category],
                }),
            }
        }

        Ok(products)
    }

    /// Create a product with its initial category set (all-or-nothing).
    ///
    /// Resolution of the requested ids happens inside the transaction;
    /// an unknown id aborts before the product row is written.
    pub async fn create(
        &self,
        name: EntityName,
        category_ids: CategoryIds,
    ) -> Result<ProductWithCategories, DbError> {
        let mut tx = self.pool.begin().await?;

        let categories = resolve_categories(&mut *tx, category_ids.as_slice()).await?;

        let row = sqlx::query("INSERT INTO products (name) VALUES (?) RETURNING id, name")
            .bind(name.as_str())
            .fetch_one(&mut *tx)
            .await?;
        let id: i64 = row.get("id");

        insert_links(&mut *tx, id, &categories).await?;

        tx.commit().await?;
        tracing::info!(id, "Product created");

        Ok(ProductWithCategories {
            id,
            name: row.get("name"),
            categories,
        })
    }

    /// Overwrite a product's name, returning the record with its
    /// current categories.
    pub async fn update_name(
        &self,
        id: i64,
        name: EntityName,
    ) -> Result<ProductWithCategories, DbError> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("UPDATE products SET name = ? WHERE id = ?")
            .bind(name.as_str())
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "product",
                id,
            });
        }

        fetch_product(&mut *conn, id).await
    }

    /// Replace a product's entire category set (all-or-nothing).
    ///
    /// Clears the existing links and re-adds one per resolved category
    /// inside a single transaction; a failed resolution rolls back, so
    /// the prior set survives any failure.
    pub async fn update_categories(
        &self,
        id: i64,
        category_ids: CategoryIds,
    ) -> Result<ProductWithCategories, DbError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT name FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::NotFound {
                resource: "product",
                id,
            })?;
        let name: String = row.get("name");

        let categories = resolve_categories(&mut *tx, category_ids.as_slice()).await?;

        sqlx::query("DELETE FROM product_categories WHERE product_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_links(&mut *tx, id, &categories).await?;

        tx.commit().await?;
        tracing::info!(id, "Product categories replaced");

        Ok(ProductWithCategories {
            id,
            name,
            categories,
        })
    }

    /// Delete a product, returning the pre-delete snapshot.
    ///
    /// The join rows go with it via `ON DELETE CASCADE`; the referenced
    /// categories are untouched.
    pub async fn delete(&self, id: i64) -> Result<ProductWithCategories, DbError> {
        let mut tx = self.pool.begin().await?;

        let product = fetch_product(&mut *tx, id).await?;

        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(id, "Product deleted");
        Ok(product)
    }
}

/// Fetch a product and its category set over an existing connection.
async fn fetch_product(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<ProductWithCategories, DbError> {
    let row = sqlx::query("SELECT id, name FROM products WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(DbError::NotFound {
            resource: "product",
            id,
        })?;

    let categories = sqlx::query_as::<_, Category>(
        r#"
        SELECT c.id, c.name
        FROM product_categories pc
        JOIN categories c ON c.id = pc.category_id
        WHERE pc.product_id = ?
        ORDER BY c.id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(ProductWithCategories {
        id: row.get("id"),
        name: row.get("name"),
        categories,
    })
}

/// Resolve requested category ids against the store.
///
/// `CategoryIds` already rules out duplicates, so a short result means
/// some ids do not exist; those are reported in the error.
async fn resolve_categories(
    conn: &mut SqliteConnection,
    ids: &[i64],
) -> Result<Vec<Category>, DbError> {
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql =
        format!("SELECT id, name FROM categories WHERE id IN ({placeholders}) ORDER BY id");

    let mut query = sqlx::query_as::<_, Category>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let found = query.fetch_all(&mut *conn).await?;

    if found.len() != ids.len() {
        let missing = ids
            .iter()
            .copied()
            .filter(|id| !found.iter().any(|c| c.id == *id))
            .collect();
        return Err(DbError::CategoryNotFound { ids: missing });
    }

    Ok(found)
}

/// Insert one join row per resolved category.
async fn insert_links(
    conn: &mut SqliteConnection,
    product_id: i64,
    categories: &[Category],
) -> Result<(), DbError> {
    for category in categories {
        sqlx::query("INSERT INTO product_categories (product_id, category_id) VALUES (?, ?)")
            .bind(product_id)
            .bind(category.id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool_with_options;
    use crate::db::repos::CategoryRepo;
    use crate::db::schema;

    async fn test_pool() -> SqlitePool {
        let pool = create_pool_with_options("sqlite::memory:", 1)
            .await
            .expect("pool");
        schema::ensure(&pool).await.expect("schema");
        pool
    }

    /// Seed `n` categories, returning their ids.
    async fn seed_categories(pool: &SqlitePool, n: usize) -> Vec<i64> {
        let repo = CategoryRepo::new(pool);
        let mut ids = Vec::with_capacity(n);
        for i in 1..=n {
            let name = EntityName::new("category name", &format!("Category {i}")).unwrap();
            ids.push(repo.create(name).await.expect("seed category").id);
        }
        ids
    }

    fn name(s: &str) -> EntityName {
        EntityName::new("product name", s).expect("valid name")
    }

    fn ids(v: Vec<i64>) -> CategoryIds {
        CategoryIds::new(v).expect("valid id set")
    }

    #[tokio::test]
    async fn create_links_resolved_categories() {
        let pool = test_pool().await;
        let cats = seed_categories(&pool, 3).await;
        let repo = ProductRepo::new(&pool);

        let product = repo
            .create(name("Widget"), ids(vec![cats[0], cats[1]]))
            .await
            .expect("create");

        assert_eq!(product.name, "Widget");
        let got: Vec<i64> = product.categories.iter().map(|c| c.id).collect();
        assert_eq!(got, vec![cats[0], cats[1]]);
    }

    #[tokio::test]
    async fn create_with_unknown_category_persists_nothing() {
        let pool = test_pool().await;
        let cats = seed_categories(&pool, 2).await;
        let repo = ProductRepo::new(&pool);

        let err = repo
            .create(name("Widget"), ids(vec![cats[0], 999]))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::CategoryNotFound { ref ids } if ids == &[999]));

        // Rolled back: no product row, no orphaned links
        assert!(repo.list(Pagination::default()).await.unwrap().is_empty());
        let (links,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM product_categories")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(links, 0);
    }

    #[tokio::test]
    async fn update_categories_replaces_wholesale() {
        let pool = test_pool().await;
        let cats = seed_categories(&pool, 4).await;
        let repo = ProductRepo::new(&pool);

        let product = repo
            .create(name("Widget"), ids(vec![cats[0], cats[1]]))
            .await
            .expect("create");

        let updated = repo
            .update_categories(product.id, ids(vec![cats[1], cats[2], cats[3]]))
            .await
            .expect("update");

        let got: Vec<i64> = updated.categories.iter().map(|c| c.id).collect();
        assert_eq!(got, vec![cats[1], cats[2], cats[3]]);
    }

    #[tokio::test]
    async fn failed_update_leaves_prior_set_unchanged() {
        let pool = test_pool().await;
        let cats = seed_categories(&pool, 2).await;
        let repo = ProductRepo::new(&pool);

        let product = repo
            .create(name("Widget"), ids(vec![cats[0], cats[1]]))
            .await
            .expect("create");

        let err = repo
            .update_categories(product.id, ids(vec![cats[0], 999]))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::CategoryNotFound { .. }));

        // Rolled back mid-replacement: the old set is intact
        let after = repo.get(product.id).await.expect("get");
        let got: Vec<i64> = after.categories.iter().map(|c| c.id).collect();
        assert_eq!(got, vec![cats[0], cats[1]]);
    }

    #[tokio::test]
    async fn update_categories_missing_product_is_not_found() {
        let pool = test_pool().await;
        let cats = seed_categories(&pool, 2).await;

        let err = ProductRepo::new(&pool)
            .update_categories(42, ids(vec![cats[0], cats[1]]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::NotFound {
                resource: "product",
                id: 42
            }
        ));
    }

    #[tokio::test]
    async fn update_name_keeps_categories() {
        let pool = test_pool().await;
        let cats = seed_categories(&pool, 2).await;
        let repo = ProductRepo::new(&pool);

        let product = repo
            .create(name("Wdiget"), ids(vec![cats[0], cats[1]]))
            .await
            .expect("create");

        let updated = repo
            .update_name(product.id, name("Widget"))
            .await
            .expect("update");

        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.categories, product.categories);
    }

    #[tokio::test]
    async fn delete_cascades_links_but_not_categories() {
        let pool = test_pool().await;
        let cats = seed_categories(&pool, 2).await;
        let repo = ProductRepo::new(&pool);

        let product = repo
            .create(name("Widget"), ids(vec![cats[0], cats[1]]))
            .await
            .expect("create");

        let deleted = repo.delete(product.id).await.expect("delete");
        assert_eq!(deleted, product);

        let (links,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM product_categories")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(links, 0);

        // Referenced categories survive
        CategoryRepo::new(&pool).get(cats[0]).await.expect("category kept");
    }

    #[tokio::test]
    async fn delete_referenced_category_is_rejected() {
        let pool = test_pool().await;
        let cats = seed_categories(&pool, 2).await;
        let products = ProductRepo::new(&pool);
        let categories = CategoryRepo::new(&pool);

        let product = products
            .create(name("Widget"), ids(vec![cats[0], cats[1]]))
            .await
            .expect("create");

        let err = categories.delete(cats[0]).await.unwrap_err();
        assert!(matches!(err, DbError::CategoryInUse { products: 1, .. }));

        // Once the product is gone the category can be deleted
        products.delete(product.id).await.expect("delete product");
        categories.delete(cats[0]).await.expect("delete category");
    }

    #[tokio::test]
    async fn list_pages_products_with_full_category_sets() {
        let pool = test_pool().await;
        let cats = seed_categories(&pool, 3).await;
        let repo = ProductRepo::new(&pool);

        for i in 1..=15 {
            repo.create(name(&format!("Product {i}")), ids(vec![cats[0], cats[1]]))
                .await
                .expect("create");
        }

        let page = repo.list(Pagination::new(2, 10)).await.expect("list");
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].name, "Product 11");
        assert_eq!(page[4].name, "Product 15");
        for product in &page {
            assert_eq!(product.categories.len(), 2);
        }
    }
}
