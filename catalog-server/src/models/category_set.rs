//! The 2-or-3-category cardinality rule
//!
//! Every product must reference exactly 2 or 3 distinct categories. The
//! rule is enforced here, at construction, so repositories never see an
//! association request with a bad count or duplicate ids.

use std::collections::HashSet;

use super::ValidationError;

/// Minimum categories per product
pub const MIN_CATEGORIES: usize = 2;

/// Maximum categories per product
pub const MAX_CATEGORIES: usize = 3;

/// Validated set of category ids for a product association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryIds(Vec<i64>);

impl CategoryIds {
    /// Validate a requested category id set.
    ///
    /// # Rules
    /// - Count must be 2 or 3
    /// - No duplicate ids
    ///
    /// Existence of the ids is checked later, inside the repository
    /// transaction that applies the association.
    pub fn new(ids: Vec<i64>) -> Result<Self, ValidationError> {
        if !(MIN_CATEGORIES..=MAX_CATEGORIES).contains(&ids.len()) {
            return Err(ValidationError::CategoryCount { got: ids.len() });
        }

        let mut seen = HashSet::with_capacity(ids.len());
        for &id in &ids {
            if !seen.insert(id) {
                return Err(ValidationError::DuplicateCategory { id });
            }
        }

        Ok(Self(ids))
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }
}
