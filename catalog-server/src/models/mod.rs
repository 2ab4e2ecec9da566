//! Domain models and validation
//!
//! Request data crosses into the repositories only through these types,
//! so a `CategoryIds` in hand is already a well-formed association set.

pub mod category_set;
pub mod name;
pub mod pagination;
pub mod validation;

pub use category_set::{CategoryIds, MAX_CATEGORIES, MIN_CATEGORIES};
pub use name::EntityName;
pub use pagination::{Pagination, PaginationParams};
pub use validation::ValidationError;
