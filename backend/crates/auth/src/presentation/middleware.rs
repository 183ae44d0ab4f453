//! Auth Guards
//!
//! Route-layer middleware for protected routes. `require_auth` resolves
//! the session cookie to a user and stores it as a `CurrentUser`
//! request extension; `require_admin` additionally checks the admin
//! flag. Failures short-circuit with 401 or 403.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionStore, UserRepository};
use crate::error::AuthError;

/// The authenticated user, inserted by `require_auth` for handlers to
/// extract.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// State shared by the auth guards
pub struct AuthGateState<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
}

impl<U, S> Clone for AuthGateState<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            sessions: Arc::clone(&self.sessions),
            config: Arc::clone(&self.config),
        }
    }
}

impl<U, S> AuthGateState<U, S>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    // Takes only the headers so the guard futures stay Send; the
    // request body must not be borrowed across the session lookup.
    async fn resolve_user(&self, headers: &HeaderMap) -> Result<User, AuthError> {
        let token = platform::cookie::extract_cookie(headers, &self.config.session_cookie_name)
            .ok_or(AuthError::NotAuthenticated)?;

        let use_case = CheckSessionUseCase::new(
            Arc::clone(&self.users),
            Arc::clone(&self.sessions),
            Arc::clone(&self.config),
        );

        use_case
            .current_user(&token)
            .await
            .map_err(|_| AuthError::NotAuthenticated)
    }
}

/// Guard that requires a valid session
pub async fn require_auth<U, S>(
    state: AuthGateState<U, S>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let user = state
        .resolve_user(req.headers())
        .await
        .map_err(|e| e.into_response())?;

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

/// Guard that requires a valid session belonging to an admin
pub async fn require_admin<U, S>(
    state: AuthGateState<U, S>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let user = state
        .resolve_user(req.headers())
        .await
        .map_err(|e| e.into_response())?;

    if !user.is_admin {
        return Err(AuthError::AdminRequired.into_response());
    }

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}
