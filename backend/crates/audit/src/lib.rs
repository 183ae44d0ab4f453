//! Audit Trail Module
//!
//! Append-only activity log of security and administrative events
//! (registration, login, logout, theme change, admin actions).
//!
//! ## Design
//! - Entries are immutable once written; there is no update or delete
//!   surface on the repository.
//! - Recording is fire-and-forget: the insert runs on a spawned task
//!   and failures are logged and dropped, so the audit trail can never
//!   block or fail the request that triggered it.

pub mod entity;
pub mod postgres;
pub mod recorder;
pub mod repository;

pub use entity::{ActivityLog, NewActivityLog, actions};
pub use postgres::PgActivityLogRepository;
pub use recorder::ActivityRecorder;
pub use repository::ActivityLogRepository;
