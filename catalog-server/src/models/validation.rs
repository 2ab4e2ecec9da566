//! Validation error types

use std::fmt;

use crate::models::{MAX_CATEGORIES, MIN_CATEGORIES};

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Association set size outside the allowed 2..=3 range
    CategoryCount { got: usize },

    /// Same category id given more than once
    DuplicateCategory { id: i64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::CategoryCount { got } => write!(
                f,
                "product must have {} or {} categories, got {}",
                MIN_CATEGORIES, MAX_CATEGORIES, got
            ),
            Self::DuplicateCategory { id } => {
                write!(f, "category id {} given more than once", id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "name exceeds maximum length of 100 characters"
        );

        let err = ValidationError::CategoryCount { got: 5 };
        assert_eq!(err.to_string(), "product must have 2 or 3 categories, got 5");
    }
}
