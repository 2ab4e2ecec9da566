//! Persistence layer: SQLite pool, schema bootstrap, repositories

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::{Category, CategoryRepo, DbError, ProductRepo, ProductWithCategories};
