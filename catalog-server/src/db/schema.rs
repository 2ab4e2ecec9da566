//! Schema bootstrap for the catalog tables
//!
//! Idempotent `CREATE TABLE IF NOT EXISTS` statements run at startup.
//! `product_categories` cascades on product deletion and restricts on
//! category deletion; the restrict rule backs up the application-level
//! in-use check in `CategoryRepo::delete`.

use sqlx::SqlitePool;

/// Create the catalog tables if they do not exist.
pub async fn ensure(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring catalog schema");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(name) <= 100)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(name) <= 100)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS product_categories (
            product_id  INTEGER NOT NULL REFERENCES products(id)   ON DELETE CASCADE,
            category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE RESTRICT,
            PRIMARY KEY (product_id, category_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
