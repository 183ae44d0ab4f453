//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use uuid::Uuid;

use crate::domain::value_object::{email::Email, theme::Theme, username::Username};

/// A registered user.
///
/// The integer id is the storage key; the `uuid` is a stable public
/// identifier that survives database migrations.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    /// Public-facing identifier
    pub uuid: Uuid,
    pub username: Username,
    pub email: Email,
    /// Argon2id PHC string (salt and hash in one field)
    pub password: HashedPassword,
    pub is_admin: bool,
    pub theme_preference: Theme,
    pub created_at: DateTime<Utc>,
}

/// A user about to be inserted. The database assigns id, uuid and
/// created_at.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub password: HashedPassword,
    pub is_admin: bool,
    pub theme_preference: Theme,
}

impl NewUser {
    pub fn new(username: Username, email: Email, password: HashedPassword) -> Self {
        Self {
            username,
            email,
            password,
            is_admin: false,
            theme_preference: Theme::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    #[test]
    fn test_new_user_defaults() {
        let password = ClearTextPassword::new("a-strong-password".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        let user = NewUser::new(
            Username::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            password,
        );

        assert!(!user.is_admin);
        assert_eq!(user.theme_preference, Theme::Dark);
    }
}
