//! Username Value Object
//!
//! The public handle a user logs in and is displayed under.
//!
//! ## Invariants
//! - 3 to 30 characters after NFKC normalization
//! - ASCII letters, digits and `_ . -` only
//! - Starts and ends with a letter, digit or `_`
//! - Contains at least one letter or digit
//! - Not a reserved word

use derive_more::Display;
use serde::Serialize;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for a username (in characters)
pub const USERNAME_MIN_LENGTH: usize = 3;

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 30;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// Names that collide with routes or system accounts
const RESERVED_WORDS: &[&str] = &[
    "admin",
    "administrator",
    "root",
    "system",
    "support",
    "api",
    "auth",
    "login",
    "logout",
    "register",
    "password",
    "reset",
    "user",
    "users",
    "portfolio",
    "portfolios",
    "transactions",
    "assets",
    "me",
    "anonymous",
    "null",
    "undefined",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("Username must be at least {USERNAME_MIN_LENGTH} characters")]
    TooShort,

    #[error("Username must be at most {USERNAME_MAX_LENGTH} characters")]
    TooLong,

    #[error("Username contains invalid characters")]
    InvalidCharacter,

    #[error("Username must start and end with a letter, digit or underscore")]
    InvalidBoundary,

    #[error("Username must contain at least one letter or digit")]
    NoAlphanumeric,

    #[error("This username is reserved")]
    Reserved,
}

/// Validated username
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate and construct a username from user input.
    pub fn new(raw: &str) -> Result<Self, UsernameError> {
        let normalized: String = raw.trim().nfkc().collect();

        let char_count = normalized.chars().count();
        if char_count < USERNAME_MIN_LENGTH {
            return Err(UsernameError::TooShort);
        }
        if char_count > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong);
        }

        for ch in normalized.chars() {
            if !ch.is_ascii_alphanumeric() && !ALLOWED_SPECIAL_CHARS.contains(&ch) {
                return Err(UsernameError::InvalidCharacter);
            }
        }

        let first = normalized.chars().next().unwrap_or(' ');
        let last = normalized.chars().next_back().unwrap_or(' ');
        let boundary_ok = |c: char| c.is_ascii_alphanumeric() || c == '_';
        if !boundary_ok(first) || !boundary_ok(last) {
            return Err(UsernameError::InvalidBoundary);
        }

        if !normalized.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(UsernameError::NoAlphanumeric);
        }

        if RESERVED_WORDS.contains(&normalized.to_ascii_lowercase().as_str()) {
            return Err(UsernameError::Reserved);
        }

        Ok(Self(normalized))
    }

    /// Rehydrate from storage. Data was validated on the way in.
    pub fn restore(stored: String) -> Self {
        Self(stored)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(Username::new("alice").is_ok());
        assert!(Username::new("bob_42").is_ok());
        assert!(Username::new("carol.d-e").is_ok());
        assert!(Username::new("  trimmed  ").is_ok());
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(Username::new("ab"), Err(UsernameError::TooShort));
        let long = "a".repeat(USERNAME_MAX_LENGTH + 1);
        assert_eq!(Username::new(&long), Err(UsernameError::TooLong));
        let max = "a".repeat(USERNAME_MAX_LENGTH);
        assert!(Username::new(&max).is_ok());
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(Username::new("has space"), Err(UsernameError::InvalidCharacter));
        assert_eq!(Username::new("emoji😀"), Err(UsernameError::InvalidCharacter));
        assert_eq!(Username::new("semi;colon"), Err(UsernameError::InvalidCharacter));
    }

    #[test]
    fn test_boundary_rules() {
        assert_eq!(Username::new(".alice"), Err(UsernameError::InvalidBoundary));
        assert_eq!(Username::new("alice-"), Err(UsernameError::InvalidBoundary));
        assert!(Username::new("_alice_").is_ok());
    }

    #[test]
    fn test_reserved_words() {
        assert_eq!(Username::new("admin"), Err(UsernameError::Reserved));
        assert_eq!(Username::new("Admin"), Err(UsernameError::Reserved));
        assert_eq!(Username::new("api"), Err(UsernameError::Reserved));
    }

    #[test]
    fn test_all_symbols_rejected() {
        assert!(Username::new("_-._").is_err());
    }
}
