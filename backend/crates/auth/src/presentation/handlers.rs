//! HTTP Handlers

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{ConnectInfo, Extension, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;

use audit::{ActivityLog, ActivityLogRepository, ActivityRecorder, NewActivityLog, actions};
use platform::client::{ClientInfo, extract_client_info};
use platform::rate_limit::LoginAttemptTracker;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, PasswordResetUseCase, RegisterInput, RegisterUseCase,
    UpdateThemeUseCase,
};
use crate::domain::repository::{
    PortfolioProvisioner, ResetTokenRepository, SessionStore, UserRepository,
};
use crate::error::AuthResult;
use crate::presentation::dto::{
    AdminUpdateUserRequest, LoginRequest, MessageResponse, RegisterRequest, ResetConfirmRequest,
    ResetRequest, ThemeUpdateRequest, UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for the auth handlers
pub struct AuthAppState<R, S, P>
where
    R: UserRepository + ResetTokenRepository,
    S: SessionStore,
    P: PortfolioProvisioner,
{
    pub repo: Arc<R>,
    pub sessions: Arc<S>,
    pub portfolios: Arc<P>,
    pub tracker: Arc<LoginAttemptTracker>,
    /// None in test setups without a database
    pub recorder: Option<ActivityRecorder>,
    pub config: Arc<AuthConfig>,
}

impl<R, S, P> Clone for AuthAppState<R, S, P>
where
    R: UserRepository + ResetTokenRepository,
    S: SessionStore,
    P: PortfolioProvisioner,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            sessions: Arc::clone(&self.sessions),
            portfolios: Arc::clone(&self.portfolios),
            tracker: Arc::clone(&self.tracker),
            recorder: self.recorder.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R, S, P> AuthAppState<R, S, P>
where
    R: UserRepository + ResetTokenRepository,
    S: SessionStore,
    P: PortfolioProvisioner,
{
    fn record(&self, entry: NewActivityLog) {
        if let Some(recorder) = &self.recorder {
            recorder.record(entry);
        }
    }
}

fn client_of(headers: &HeaderMap, addr: SocketAddr) -> ClientInfo {
    extract_client_info(headers, Some(addr.ip()))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/register
pub async fn register<R, S, P>(
    State(state): State<AuthAppState<R, S, P>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + ResetTokenRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: PortfolioProvisioner + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        Arc::clone(&state.repo),
        Arc::clone(&state.sessions),
        Arc::clone(&state.portfolios),
        Arc::clone(&state.config),
    );

    let output = use_case
        .execute(RegisterInput {
            username: req.username,
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
        })
        .await?;

    let client = client_of(&headers, addr);
    state.record(
        NewActivityLog::new(Some(output.user.id), actions::USER_REGISTERED)
            .with_details(serde_json::json!({ "username": output.user.username.as_str() }))
            .with_client(client.ip_string(), client.user_agent),
    );

    let cookie = state.config.cookie_config().build_set_cookie(&output.session_token);

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&output.user)),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<R, S, P>(
    State(state): State<AuthAppState<R, S, P>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + ResetTokenRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: PortfolioProvisioner + Send + Sync + 'static,
{
    let client = client_of(&headers, addr);

    let use_case = LoginUseCase::new(
        Arc::clone(&state.repo),
        Arc::clone(&state.sessions),
        Arc::clone(&state.tracker),
        Arc::clone(&state.config),
    );

    let output = use_case
        .execute(LoginInput {
            username: req.username,
            password: req.password,
            client_key: client.rate_limit_key(),
        })
        .await?;

    state.record(
        NewActivityLog::new(Some(output.user.id), actions::USER_LOGIN)
            .with_client(client.ip_string(), client.user_agent),
    );

    let cookie = state.config.cookie_config().build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&output.user)),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/logout
pub async fn logout<R, S, P>(
    State(state): State<AuthAppState<R, S, P>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + ResetTokenRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: PortfolioProvisioner + Send + Sync + 'static,
{
    let token =
        platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = &token {
        // Resolve the user before deleting the session, for the audit
        // record. Failures here never block logout.
        let check = crate::application::CheckSessionUseCase::new(
            Arc::clone(&state.repo),
            Arc::clone(&state.sessions),
            Arc::clone(&state.config),
        );
        let user_id = check.current_user(token).await.ok().map(|u| u.id);

        let use_case = LogoutUseCase::new(Arc::clone(&state.sessions), Arc::clone(&state.config));
        use_case.execute(token).await?;

        let client = client_of(&headers, addr);
        state.record(
            NewActivityLog::new(user_id, actions::USER_LOGOUT)
                .with_client(client.ip_string(), client.user_agent),
        );
    }

    let cookie = state.config.cookie_config().build_delete_cookie();

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse::new("Logged out successfully")),
    ))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/user
pub async fn current_user(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

// ============================================================================
// Theme Preference
// ============================================================================

/// PUT /api/user/theme
pub async fn update_theme<R, S, P>(
    State(state): State<AuthAppState<R, S, P>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<ThemeUpdateRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + ResetTokenRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: PortfolioProvisioner + Send + Sync + 'static,
{
    let use_case = UpdateThemeUseCase::new(Arc::clone(&state.repo));
    let updated = use_case.execute(user.id, &req.theme_preference).await?;

    let client = client_of(&headers, addr);
    state.record(
        NewActivityLog::new(Some(updated.id), actions::THEME_CHANGED)
            .with_details(serde_json::json!({
                "themePreference": updated.theme_preference.as_str()
            }))
            .with_client(client.ip_string(), client.user_agent),
    );

    Ok(Json(UserResponse::from(&updated)))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/password-reset/request
pub async fn password_reset_request<R, S, P>(
    State(state): State<AuthAppState<R, S, P>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<ResetRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + ResetTokenRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: PortfolioProvisioner + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(
        Arc::clone(&state.repo),
        Arc::clone(&state.repo),
        Arc::clone(&state.config),
    );

    if use_case.request(&req.email).await?.is_some() {
        let client = client_of(&headers, addr);
        state.record(
            NewActivityLog::new(None, actions::PASSWORD_RESET_REQUESTED)
                .with_client(client.ip_string(), client.user_agent),
        );
    }

    // Identical response whether or not the email exists
    Ok(Json(MessageResponse::new(
        "If the email is registered, a reset token has been issued",
    )))
}

/// POST /api/password-reset/confirm
pub async fn password_reset_confirm<R, S, P>(
    State(state): State<AuthAppState<R, S, P>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<ResetConfirmRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + ResetTokenRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
    P: PortfolioProvisioner + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(
        Arc::clone(&state.repo),
        Arc::clone(&state.repo),
        Arc::clone(&state.config),
    );

    use_case.confirm(&req.token, req.new_password).await?;

    let client = client_of(&headers, addr);
    state.record(
        NewActivityLog::new(None, actions::PASSWORD_RESET_COMPLETED)
            .with_client(client.ip_string(), client.user_agent),
    );

    Ok(Json(MessageResponse::new("Password has been reset")))
}

// ============================================================================
// Admin
// ============================================================================

/// Shared state for the admin handlers
pub struct AdminAppState<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub users: Arc<U>,
    pub sessions: Arc<S>,
    pub logs: audit::PgActivityLogRepository,
    pub recorder: Option<ActivityRecorder>,
    pub config: Arc<AuthConfig>,
}

impl<U, S> Clone for AdminAppState<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            sessions: Arc::clone(&self.sessions),
            logs: self.logs.clone(),
            recorder: self.recorder.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

/// GET /api/admin/users
pub async fn admin_list_users<U, S>(
    State(state): State<AdminAppState<U, S>>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let users = state.users.all().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// PUT /api/admin/users/{id}
pub async fn admin_update_user<U, S>(
    State(state): State<AdminAppState<U, S>>,
    Extension(CurrentUser(admin)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<AdminUpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let updated = state
        .users
        .update_admin(kernel::id::UserId::from_i64(id), req.is_admin)
        .await?;

    if let Some(recorder) = &state.recorder {
        let client = client_of(&headers, addr);
        recorder.record(
            NewActivityLog::new(Some(admin.id), actions::ADMIN_USER_UPDATED)
                .with_details(serde_json::json!({
                    "targetUserId": updated.id.value(),
                    "isAdmin": updated.is_admin
                }))
                .with_client(client.ip_string(), client.user_agent),
        );
    }

    Ok(Json(UserResponse::from(&updated)))
}

/// GET /api/admin/logs
pub async fn admin_list_logs<U, S>(
    State(state): State<AdminAppState<U, S>>,
) -> AuthResult<Json<Vec<ActivityLog>>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let logs = state.logs.list().await?;
    Ok(Json(logs))
}
