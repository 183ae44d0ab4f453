//! Reset Token Entity
//!
//! Single-use password reset token bound to an email address.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// A password reset token. Consumed (deleted) on first use.
#[derive(Debug, Clone)]
pub struct ResetToken {
    /// Opaque token string sent to the user (primary key)
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl ResetToken {
    /// Mint a new token for the given email with the given TTL.
    pub fn new(email: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token: Uuid::new_v4().to_string(),
            email,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_valid() {
        let token = ResetToken::new("alice@example.com".to_string(), Duration::hours(1));
        assert!(!token.is_expired());
        assert_eq!(token.email, "alice@example.com");
        // uuid-shaped
        assert!(Uuid::parse_str(&token.token).is_ok());
    }

    #[test]
    fn test_expired_token() {
        let mut token = ResetToken::new("alice@example.com".to_string(), Duration::hours(1));
        token.expires_at = Utc::now() - Duration::seconds(1);
        assert!(token.is_expired());
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = ResetToken::new("a@example.com".to_string(), Duration::hours(1));
        let b = ResetToken::new("a@example.com".to_string(), Duration::hours(1));
        assert_ne!(a.token, b.token);
    }
}
