//! Email Value Object
//!
//! Lightweight structural validation only: one `@`, a non-empty local
//! part, a dotted domain. Deliverability is not checked here.

use derive_more::Display;
use serde::Serialize;
use thiserror::Error;

/// Maximum total length (RFC 5321 path limit)
pub const EMAIL_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email address is empty")]
    Empty,

    #[error("Email address is too long")]
    TooLong,

    #[error("Email address is malformed")]
    Malformed,
}

/// Validated email address, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self, EmailError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.chars().count() > EMAIL_MAX_LENGTH {
            return Err(EmailError::TooLong);
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(EmailError::Malformed);
        }

        let (local, domain) = trimmed.split_once('@').ok_or(EmailError::Malformed)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(EmailError::Malformed);
        }
        // Domain needs a dot with something on both sides
        let (name, tld) = domain.rsplit_once('.').ok_or(EmailError::Malformed)?;
        if name.is_empty() || tld.is_empty() {
            return Err(EmailError::Malformed);
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
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
    fn test_valid_emails() {
        assert!(Email::new("a@b.co").is_ok());
        assert!(Email::new("user.name+tag@example.org").is_ok());
    }

    #[test]
    fn test_lowercased() {
        let email = Email::new("Alice@Example.COM").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_malformed() {
        assert_eq!(Email::new(""), Err(EmailError::Empty));
        assert_eq!(Email::new("no-at-sign"), Err(EmailError::Malformed));
        assert_eq!(Email::new("@example.com"), Err(EmailError::Malformed));
        assert_eq!(Email::new("user@"), Err(EmailError::Malformed));
        assert_eq!(Email::new("user@nodot"), Err(EmailError::Malformed));
        assert_eq!(Email::new("user@domain."), Err(EmailError::Malformed));
        assert_eq!(Email::new("a b@example.com"), Err(EmailError::Malformed));
        assert_eq!(Email::new("a@b@example.com"), Err(EmailError::Malformed));
    }
}
