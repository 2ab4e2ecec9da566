//! catalog-server: CRUD service for Products and Categories
//!
//! Products carry a mandatory association set of 2 or 3 Categories,
//! maintained through a join table. The invariant is enforced at the
//! validation layer (`models::CategoryIds`) and association writes are
//! transactional, so a partially-updated link set is never observable.

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, AppState, ServerConfig};
