//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer. Only the session store has two production
//! implementations (in-memory for development, Postgres for
//! production); the others are Postgres-only, with in-memory doubles
//! living in tests.

use kernel::error::app_error::AppResult;
use kernel::id::UserId;
use platform::password::HashedPassword;
use uuid::Uuid;

use crate::domain::entity::{reset_token::ResetToken, session::Session, user::{NewUser, User}};
use crate::domain::value_object::theme::Theme;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user; the database assigns id, uuid and created_at
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by storage id
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Find user by username (exact match)
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    /// Find user by email (stored lowercase)
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    /// Update theme preference, returning the updated user
    async fn update_theme(&self, id: UserId, theme: Theme) -> AuthResult<User>;

    /// Update the admin flag, returning the updated user
    async fn update_admin(&self, id: UserId, is_admin: bool) -> AuthResult<User>;

    /// Replace the stored password hash
    async fn update_password(&self, id: UserId, password: &HashedPassword) -> AuthResult<()>;

    /// All users (admin listing)
    async fn all(&self) -> AuthResult<Vec<User>>;
}

/// Session store trait, the pluggable backing store for login state.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Persist a new session
    async fn create(&self, session: &Session) -> AuthResult<()>;

    /// Find a session by ID
    async fn find(&self, session_id: Uuid) -> AuthResult<Option<Session>>;

    /// Persist an updated last-activity timestamp
    async fn touch(&self, session: &Session) -> AuthResult<()>;

    /// Delete a session (logout / expiry)
    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;

    /// Remove expired sessions, returning how many were deleted
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// Reset token repository trait
#[trait_variant::make(ResetTokenRepository: Send)]
pub trait LocalResetTokenRepository {
    /// Persist a freshly minted token
    async fn create(&self, token: &ResetToken) -> AuthResult<()>;

    /// Look up a token by its string
    async fn find(&self, token: &str) -> AuthResult<Option<ResetToken>>;

    /// Delete a token (single-use consumption)
    async fn delete(&self, token: &str) -> AuthResult<()>;

    /// Remove expired tokens, returning how many were deleted
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// Hook for registration to provision a user's starting resources.
///
/// Implemented by the portfolio crate (default "My Portfolio"); defined
/// here so registration does not depend on portfolio internals.
#[trait_variant::make(PortfolioProvisioner: Send)]
pub trait LocalPortfolioProvisioner {
    /// Create the default portfolio for a freshly registered user
    async fn provision_default(&self, owner: UserId) -> AppResult<()>;
}
