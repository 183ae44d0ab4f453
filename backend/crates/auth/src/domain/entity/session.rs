//! Session Entity
//!
//! Server-side authenticated state. The client only ever holds the
//! opaque signed token that references a row here; deleting the row is
//! what logout and expiry mean.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use uuid::Uuid;

/// An authenticated session
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Owning user
    pub user_id: UserId,
    /// Expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session with the given TTL.
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update the last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_not_expired() {
        let session = Session::new(UserId::from_i64(1), Duration::hours(24));
        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 0);
    }

    #[test]
    fn test_expired_session() {
        let mut session = Session::new(UserId::from_i64(1), Duration::hours(24));
        session.expires_at_ms = Utc::now().timestamp_millis() - 1000;
        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }

    #[test]
    fn test_touch_advances_activity() {
        let mut session = Session::new(UserId::from_i64(1), Duration::hours(24));
        let before = session.last_activity_at;
        std::thread::sleep(std::time::Duration::from_millis(5));
        session.touch();
        assert!(session.last_activity_at > before);
    }
}
