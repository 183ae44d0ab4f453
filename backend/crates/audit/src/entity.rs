//! Activity Log Entity

use chrono::{DateTime, Utc};
use kernel::id::{ActivityLogId, UserId};
use serde::Serialize;

/// Well-known action names.
///
/// Kept as constants so log consumers can filter on exact strings.
pub mod actions {
    pub const USER_REGISTERED: &str = "user_registered";
    pub const USER_LOGIN: &str = "user_login";
    pub const USER_LOGOUT: &str = "user_logout";
    pub const THEME_CHANGED: &str = "theme_changed";
    pub const ADMIN_USER_UPDATED: &str = "admin_user_updated";
    pub const PASSWORD_RESET_REQUESTED: &str = "password_reset_requested";
    pub const PASSWORD_RESET_COMPLETED: &str = "password_reset_completed";
}

/// A persisted audit record. Immutable once written.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: ActivityLogId,
    /// None for system events
    pub user_id: Option<UserId>,
    pub action: String,
    pub details: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// An audit record about to be written.
#[derive(Debug, Clone)]
pub struct NewActivityLog {
    pub user_id: Option<UserId>,
    pub action: String,
    pub details: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl NewActivityLog {
    pub fn new(user_id: Option<UserId>, action: &str) -> Self {
        Self {
            user_id,
            action: action.to_string(),
            details: serde_json::Value::Object(Default::default()),
            ip_address: None,
            user_agent: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    pub fn with_client(mut self, ip: Option<String>, user_agent: Option<String>) -> Self {
        self.ip_address = ip;
        self.user_agent = user_agent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let entry = NewActivityLog::new(None, actions::USER_LOGIN);
        assert_eq!(entry.action, "user_login");
        assert!(entry.user_id.is_none());
        assert_eq!(entry.details, serde_json::json!({}));
        assert!(entry.ip_address.is_none());
    }

    #[test]
    fn test_builder_with_details_and_client() {
        let entry = NewActivityLog::new(Some(UserId::from_i64(3)), actions::THEME_CHANGED)
            .with_details(serde_json::json!({"themePreference": "light"}))
            .with_client(Some("203.0.113.7".to_string()), Some("curl/8".to_string()));

        assert_eq!(entry.user_id, Some(UserId::from_i64(3)));
        assert_eq!(entry.details["themePreference"], "light");
        assert_eq!(entry.ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(entry.user_agent.as_deref(), Some("curl/8"));
    }
}
