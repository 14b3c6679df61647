//! Person Name Value Object
//!
//! First and last names. Stored as given; only emptiness and length are
//! checked.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum stored name length
pub const PERSON_NAME_MAX_LENGTH: usize = 32;

/// A first or last name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName(String);

impl PersonName {
    /// Validate a name. `field` is used in error messages ("First name").
    pub fn new(field: &str, name: impl Into<String>) -> AppResult<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(AppError::bad_request(format!("{field} must not be empty")));
        }

        if name.chars().count() > PERSON_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "{field} must be at most {PERSON_NAME_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(name))
    }

    pub fn first(name: impl Into<String>) -> AppResult<Self> {
        Self::new("First name", name)
    }

    pub fn last(name: impl Into<String>) -> AppResult<Self> {
        Self::new("Last name", name)
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
