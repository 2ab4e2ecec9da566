//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Uses transactions for multi-step writes; an early return drops the
//!   transaction and rolls back, so association replacement is
//!   all-or-nothing
//! - Reports absence and rule violations as tagged `DbError` variants,
//!   never as sentinel records

pub mod categories;
pub mod products;

pub use categories::{Category, CategoryRepo};
pub use products::{ProductRepo, ProductWithCategories};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} with id {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("unknown category ids: {ids:?}")]
    CategoryNotFound { ids: Vec<i64> },

    #[error("category {id} is referenced by {products} product(s)")]
    CategoryInUse { id: i64, products: i64 },
}
