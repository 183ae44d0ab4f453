//! Auth Routers

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::domain::repository::{
    PortfolioProvisioner, ResetTokenRepository, SessionStore, UserRepository,
};
use crate::presentation::handlers::{self, AdminAppState, AuthAppState};
use crate::presentation::middleware::{AuthGateState, require_admin, require_auth};

/// Routes mounted under `/api`
pub fn auth_router<R, S, P>(state: AuthAppState<R, S, P>) -> Router
where
    R: UserRepository + ResetTokenRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: PortfolioProvisioner + Send + Sync + 'static,
{
    let gate = AuthGateState {
        users: Arc::clone(&state.repo),
        sessions: Arc::clone(&state.sessions),
        config: Arc::clone(&state.config),
    };

    let protected = Router::new()
        .route("/user", get(handlers::current_user))
        .route("/user/theme", put(handlers::update_theme::<R, S, P>))
        .route_layer(axum::middleware::from_fn(move |req, next| {
            require_auth(gate.clone(), req, next)
        }));

    Router::new()
        .route("/register", post(handlers::register::<R, S, P>))
        .route("/login", post(handlers::login::<R, S, P>))
        .route("/logout", post(handlers::logout::<R, S, P>))
        .route(
            "/password-reset/request",
            post(handlers::password_reset_request::<R, S, P>),
        )
        .route(
            "/password-reset/confirm",
            post(handlers::password_reset_confirm::<R, S, P>),
        )
        .merge(protected)
        .with_state(state)
}

/// Routes mounted under `/api/admin`, all behind the admin gate
pub fn admin_router<U, S>(state: AdminAppState<U, S>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let gate = AuthGateState {
        users: Arc::clone(&state.users),
        sessions: Arc::clone(&state.sessions),
        config: Arc::clone(&state.config),
    };

    Router::new()
        .route("/users", get(handlers::admin_list_users::<U, S>))
        .route("/users/{id}", put(handlers::admin_update_user::<U, S>))
        .route("/logs", get(handlers::admin_list_logs::<U, S>))
        .route_layer(axum::middleware::from_fn(move |req, next| {
            require_admin(gate.clone(), req, next)
        }))
        .with_state(state)
}
