//! Password Reset Use Cases
//!
//! Two-step flow: `request` mints a short-lived single-use token for a
//! known email, `confirm` consumes the token and replaces the password.
//! The request step answers identically whether or not the email
//! exists, so it cannot be used to probe for accounts.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::reset_token::ResetToken;
use crate::domain::repository::{ResetTokenRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Password reset use case
pub struct PasswordResetUseCase<U, R>
where
    U: UserRepository,
    R: ResetTokenRepository,
{
    users: Arc<U>,
    tokens: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<U, R> PasswordResetUseCase<U, R>
where
    U: UserRepository,
    R: ResetTokenRepository,
{
    pub fn new(users: Arc<U>, tokens: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            users,
            tokens,
            config,
        }
    }

    /// Start a reset for the given email.
    ///
    /// Returns the minted token only when the email belongs to an
    /// account; the HTTP layer reports success either way and never
    /// includes the token in the response.
    pub async fn request(&self, email: &str) -> AuthResult<Option<ResetToken>> {
        let email = email.trim().to_lowercase();

        let Some(user) = self.users.find_by_email(&email).await? else {
            tracing::info!("Password reset requested for unknown email");
            return Ok(None);
        };

        let reset_token = ResetToken::new(
            user.email.as_str().to_string(),
            self.config.reset_token_ttl_chrono(),
        );
        self.tokens.create(&reset_token).await?;

        tracing::info!(user_uuid = %user.uuid, "Password reset token minted");

        Ok(Some(reset_token))
    }

    /// Consume a token and set the new password.
    pub async fn confirm(&self, token: &str, new_password: String) -> AuthResult<()> {
        let reset_token = self
            .tokens
            .find(token)
            .await?
            .ok_or(AuthError::ResetTokenInvalid)?;

        if reset_token.is_expired() {
            self.tokens.delete(token).await?;
            return Err(AuthError::ResetTokenInvalid);
        }

        let user = self
            .users
            .find_by_email(&reset_token.email)
            .await?
            .ok_or(AuthError::ResetTokenInvalid)?;

        let password = ClearTextPassword::new(new_password)?;
        let password_hash = password.hash(self.config.pepper())?;
        self.users.update_password(user.id, &password_hash).await?;

        // Single use
        self.tokens.delete(token).await?;

        tracing::info!(user_uuid = %user.uuid, "Password reset completed");

        Ok(())
    }
}
