//! Activity Recorder
//!
//! Fire-and-forget audit writes. The insert runs on a spawned task and
//! a failure is logged at warn level and dropped: the primary request
//! must never fail or wait because the audit trail is unavailable.

use crate::entity::NewActivityLog;
use crate::postgres::PgActivityLogRepository;
use crate::repository::ActivityLogRepository;

/// Handle used by request handlers to append audit records.
#[derive(Clone)]
pub struct ActivityRecorder {
    repo: PgActivityLogRepository,
}

impl ActivityRecorder {
    pub fn new(repo: PgActivityLogRepository) -> Self {
        Self { repo }
    }

    /// Append an audit record without awaiting the write.
    pub fn record(&self, entry: NewActivityLog) {
        let repo = self.repo.clone();
        let action = entry.action.clone();

        tokio::spawn(async move {
            if let Err(e) = repo.insert(&entry).await {
                tracing::warn!(error = %e, action = %action, "Failed to record activity");
            }
        });
    }
}
