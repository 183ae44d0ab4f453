//! Check Session Use Case
//!
//! Resolves a cookie token to a live session and its user. Expired
//! sessions are deleted on sight; live ones get their last-activity
//! timestamp refreshed off the request path.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::session::Session;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    users: Arc<U>,
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

// The session touch is persisted on a spawned task, so the store must
// be shareable across threads.
impl<U, S> CheckSessionUseCase<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    pub fn new(users: Arc<U>, sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            users,
            sessions,
            config,
        }
    }

    /// Resolve a cookie token to its session.
    pub async fn get_session(&self, session_token: &str) -> AuthResult<Session> {
        let session_id = token::verify(session_token, &self.config.session_secret)?;

        let mut session = self
            .sessions
            .find(session_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.sessions.delete(session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        session.touch();
        let sessions = Arc::clone(&self.sessions);
        let touched = session.clone();
        tokio::spawn(async move {
            if let Err(error) = sessions.touch(&touched).await {
                tracing::warn!(
                    session_id = %touched.session_id,
                    error = %error,
                    "Failed to persist session activity"
                );
            }
        });

        Ok(session)
    }

    /// Resolve a cookie token all the way to the authenticated user.
    pub async fn current_user(&self, session_token: &str) -> AuthResult<User> {
        let session = self.get_session(session_token).await?;
        self.users
            .find_by_id(session.user_id)
            .await?
            .ok_or(AuthError::SessionInvalid)
    }
}
