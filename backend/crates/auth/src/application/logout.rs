//! Logout Use Case

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::repository::SessionStore;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: SessionStore,
{
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { sessions, config }
    }

    /// Delete the session behind the given cookie token.
    ///
    /// An invalid or unknown token is not an error; logout is
    /// idempotent and the cookie gets cleared either way.
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        if let Ok(session_id) = token::verify(session_token, &self.config.session_secret) {
            self.sessions.delete(session_id).await?;
            tracing::info!(session_id = %session_id, "Session deleted");
        }
        Ok(())
    }
}
