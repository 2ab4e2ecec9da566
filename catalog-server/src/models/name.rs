//! Name validation for catalog entities
//!
//! Both products and categories carry a required name of at most 100
//! characters, matching the `CHECK (length(name) <= 100)` column constraint.

use super::ValidationError;

/// Maximum length for entity names
const MAX_NAME_LEN: usize = 100;

/// Validated entity name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityName(String);

impl EntityName {
    /// Create a validated name.
    ///
    /// `field` labels the error ("category name", "product name") so the
    /// message points at the offending request field.
    pub fn new(field: &'static str, value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
