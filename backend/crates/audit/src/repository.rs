//! Repository Trait
//!
//! Interface for audit persistence. Implementation is in `postgres.rs`.

use kernel::error::app_error::AppResult;

use crate::entity::{ActivityLog, NewActivityLog};

/// Activity log repository trait (append + read only)
#[trait_variant::make(ActivityLogRepository: Send)]
pub trait LocalActivityLogRepository {
    /// Append an audit record
    async fn insert(&self, entry: &NewActivityLog) -> AppResult<()>;

    /// All records, newest first
    async fn list(&self) -> AppResult<Vec<ActivityLog>>;
}
