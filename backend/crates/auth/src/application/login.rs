//! Login Use Case
//!
//! Verifies credentials behind a per-client lockout: the attempt
//! counter is consulted before the password is ever checked, so a
//! locked-out client is rejected even with the correct password.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::rate_limit::{AttemptCheck, LoginAttemptTracker};

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::session::Session;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
    /// Rate-limit key for this client (normally its IP address)
    pub client_key: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub session_token: String,
}

/// Login use case
pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    users: Arc<U>,
    sessions: Arc<S>,
    tracker: Arc<LoginAttemptTracker>,
    config: Arc<AuthConfig>,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub fn new(
        users: Arc<U>,
        sessions: Arc<S>,
        tracker: Arc<LoginAttemptTracker>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            users,
            sessions,
            tracker,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Lockout check comes first, before any credential work
        let check = self.tracker.check(&input.client_key);
        if matches!(check, AttemptCheck::LockedOut { .. }) {
            tracing::warn!(
                client = %input.client_key,
                "Login rejected, client locked out"
            );
            return Err(AuthError::LockedOut {
                minutes: check.minutes_remaining(),
            });
        }

        let user = match self.users.find_by_username(&input.username).await? {
            Some(user) => user,
            None => {
                self.tracker.record_failure(&input.client_key);
                return Err(AuthError::InvalidCredentials);
            }
        };

        // A password that fails policy can never match a stored hash
        let verified = ClearTextPassword::new(input.password)
            .map(|password| user.password.verify(&password, self.config.pepper()))
            .unwrap_or(false);
        if !verified {
            self.tracker.record_failure(&input.client_key);
            return Err(AuthError::InvalidCredentials);
        }

        self.tracker.reset(&input.client_key);

        let session = Session::new(user.id, self.config.session_ttl_chrono());
        self.sessions.create(&session).await?;
        let session_token = token::sign(session.session_id, &self.config.session_secret);

        tracing::info!(
            user_uuid = %user.uuid,
            username = %user.username,
            "User logged in"
        );

        Ok(LoginOutput {
            user,
            session_token,
        })
    }
}
