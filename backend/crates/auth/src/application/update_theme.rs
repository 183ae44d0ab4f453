//! Update Theme Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::theme::Theme;
use crate::error::{AuthError, AuthResult};

/// Update theme use case
pub struct UpdateThemeUseCase<U>
where
    U: UserRepository,
{
    users: Arc<U>,
}

impl<U> UpdateThemeUseCase<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, user_id: UserId, theme: &str) -> AuthResult<User> {
        let theme = Theme::parse(theme)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        self.users.update_theme(user_id, theme).await
    }
}
