//! City name validation - runs before any network activity

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shortest accepted city name, in characters.
pub const MIN_CITY_LEN: usize = 2;

/// Characters that never appear in a city name.
pub const FORBIDDEN_CHARS: [char; 7] = ['<', '>', '{', '}', '[', ']', '\\'];

/// Why a raw input was rejected
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a city name.")]
    EmptyInput,
    #[error("City name must be at least 2 characters long.")]
    TooShort,
    #[error("City name contains invalid characters.")]
    InvalidCharacters,
}

/// A trimmed city name that passed validation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate raw user input.
///
/// The input is trimmed first; checks run in order empty, too short,
/// forbidden characters, and the first failing check wins.
pub fn validate_city(raw: &str) -> Result<SearchQuery, ValidationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    if trimmed.chars().count() < MIN_CITY_LEN {
        return Err(ValidationError::TooShort);
    }
    if trimmed.contains(&FORBIDDEN_CHARS[..]) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(SearchQuery(trimmed.to_string()))
}
