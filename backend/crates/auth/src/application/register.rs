//! Register Use Case
//!
//! Creates a new user account, provisions the default portfolio and
//! signs the user in immediately.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::session::Session;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{PortfolioProvisioner, SessionStore, UserRepository};
use crate::domain::value_object::{email::Email, username::Username};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user: User,
    /// Session token for the cookie (registration signs the user in)
    pub session_token: String,
}

/// Register use case
pub struct RegisterUseCase<U, S, P>
where
    U: UserRepository,
    S: SessionStore,
    P: PortfolioProvisioner,
{
    users: Arc<U>,
    sessions: Arc<S>,
    portfolios: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<U, S, P> RegisterUseCase<U, S, P>
where
    U: UserRepository,
    S: SessionStore,
    P: PortfolioProvisioner,
{
    pub fn new(users: Arc<U>, sessions: Arc<S>, portfolios: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self {
            users,
            sessions,
            portfolios,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let username = Username::new(&input.username)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(&input.email)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        if input.password != input.confirm_password {
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }

        // Uniqueness pre-checks; the unique indexes are the backstop
        if self.users.find_by_username(username.as_str()).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }
        if self.users.find_by_email(email.as_str()).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password = ClearTextPassword::new(input.password)?;
        let password_hash = password.hash(self.config.pepper())?;

        let user = self
            .users
            .create(&NewUser::new(username, email, password_hash))
            .await?;

        // Every account starts with a default portfolio
        self.portfolios
            .provision_default(user.id)
            .await
            .map_err(AuthError::from)?;

        // Sign the new user in
        let session = Session::new(user.id, self.config.session_ttl_chrono());
        self.sessions.create(&session).await?;
        let session_token = token::sign(session.session_id, &self.config.session_secret);

        tracing::info!(
            user_uuid = %user.uuid,
            username = %user.username,
            "User registered"
        );

        Ok(RegisterOutput {
            user,
            session_token,
        })
    }
}
