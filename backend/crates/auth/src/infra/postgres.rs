//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    reset_token::ResetToken,
    session::Session,
    user::{NewUser, User},
};
use crate::domain::repository::{ResetTokenRepository, SessionStore, UserRepository};
use crate::domain::value_object::{email::Email, theme::Theme, username::Username};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

const USER_COLUMNS: &str = r#"
    id,
    uuid,
    username,
    email,
    password_hash,
    is_admin,
    theme_preference,
    created_at
"#;

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (
                username,
                email,
                password_hash,
                is_admin,
                theme_preference
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id,
                uuid,
                username,
                email,
                password_hash,
                is_admin,
                theme_preference,
                created_at
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.is_admin)
        .bind(user.theme_preference.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.into_user()
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update_theme(&self, id: UserId, theme: Theme) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET theme_preference = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id.value())
        .bind(theme.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn update_admin(&self, id: UserId, is_admin: bool) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET is_admin = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id.value())
        .bind(is_admin)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(AuthError::UserNotFound)?.into_user()
    }

    async fn update_password(&self, id: UserId, password: &HashedPassword) -> AuthResult<()> {
        let updated = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id.value())
            .bind(password.as_phc_string())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    async fn all(&self) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }
}

// ============================================================================
// Session Store Implementation
// ============================================================================

impl SessionStore for PgAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                session_id,
                user_id,
                expires_at_ms,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id.value())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                expires_at_ms,
                created_at,
                last_activity_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_session()))
    }

    async fn touch(&self, session: &Session) -> AuthResult<()> {
        sqlx::query("UPDATE sessions SET last_activity_at = $2 WHERE session_id = $1")
            .bind(session.session_id)
            .bind(session.last_activity_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Reset Token Repository Implementation
// ============================================================================

impl ResetTokenRepository for PgAuthRepository {
    async fn create(&self, token: &ResetToken) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reset_tokens (
                token,
                email,
                expires_at,
                created_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&token.token)
        .bind(&token.email)
        .bind(token.expires_at)
        .bind(token.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, token: &str) -> AuthResult<Option<ResetToken>> {
        let row = sqlx::query_as::<_, ResetTokenRow>(
            r#"
            SELECT
                token,
                email,
                expires_at,
                created_at
            FROM reset_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_token()))
    }

    async fn delete(&self, token: &str) -> AuthResult<()> {
        sqlx::query("DELETE FROM reset_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM reset_tokens WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(tokens_deleted = deleted, "Cleaned up expired reset tokens");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    uuid: Uuid,
    username: String,
    email: String,
    password_hash: String,
    is_admin: bool,
    theme_preference: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid stored password hash: {}", e)))?;

        let theme_preference = Theme::parse(&self.theme_preference)
            .map_err(|_| {
                AuthError::Internal(format!("Invalid stored theme: {}", self.theme_preference))
            })?;

        Ok(User {
            id: UserId::from_i64(self.id),
            uuid: self.uuid,
            username: Username::restore(self.username),
            email: Email::restore(self.email),
            password,
            is_admin: self.is_admin,
            theme_preference,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: i64,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: self.session_id,
            user_id: UserId::from_i64(self.user_id),
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ResetTokenRow {
    token: String,
    email: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl ResetTokenRow {
    fn into_token(self) -> ResetToken {
        ResetToken {
            token: self.token,
            email: self.email,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}
