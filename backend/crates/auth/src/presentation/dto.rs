//! Request/Response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::user::User;

/// Register request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Theme update request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeUpdateRequest {
    pub theme_preference: String,
}

/// Password reset request (step 1)
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

/// Password reset confirmation (step 2)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetConfirmRequest {
    pub token: String,
    pub new_password: String,
}

/// Admin user update request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateUserRequest {
    pub is_admin: bool,
}

/// Public user representation. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub theme_preference: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.value(),
            uuid: user.uuid,
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            is_admin: user.is_admin,
            theme_preference: user.theme_preference.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

/// Plain message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{email::Email, theme::Theme, username::Username};
    use kernel::id::UserId;
    use platform::password::ClearTextPassword;

    fn sample_user() -> User {
        User {
            id: UserId::from_i64(7),
            uuid: Uuid::new_v4(),
            username: Username::new("alice").unwrap(),
            email: Email::new("alice@example.com").unwrap(),
            password: ClearTextPassword::new("a-strong-password".to_string())
                .unwrap()
                .hash(None)
                .unwrap(),
            is_admin: false,
            theme_preference: Theme::Dark,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_response_omits_password() {
        let user = sample_user();
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();

        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["username"], "alice");
        assert_eq!(json["themePreference"], "dark");
        assert_eq!(json["isAdmin"], false);
    }

    #[test]
    fn test_register_request_camel_case() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "pw-longenough",
            "confirmPassword": "pw-longenough"
        }))
        .unwrap();

        assert_eq!(req.confirm_password, "pw-longenough");
    }
}
