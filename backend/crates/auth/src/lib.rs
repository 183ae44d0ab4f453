//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, guards
//!
//! ## Features
//! - Register/login/logout with username + password
//! - Server-side sessions referenced by an HMAC-signed cookie token
//! - Login lockout after repeated failures (per client IP)
//! - Theme preference, password reset tokens
//! - Admin user management and activity log access
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never stored in plaintext
//! - HttpOnly SameSite=Strict session cookie
//! - Generic 401 on credential failure (no user enumeration); only the
//!   lockout path reveals the remaining wait time
//! - Session state machine: Anonymous -> Authenticated -> Anonymous

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::repository::{
    PortfolioProvisioner, ResetTokenRepository, SessionStore, UserRepository,
};
pub use error::{AuthError, AuthResult};
pub use infra::memory::MemorySessionStore;
pub use infra::postgres::PgAuthRepository;
pub use presentation::handlers::{AdminAppState, AuthAppState};
pub use presentation::middleware::{AuthGateState, CurrentUser};
pub use presentation::router::{admin_router, auth_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
