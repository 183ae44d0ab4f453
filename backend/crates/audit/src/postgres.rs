//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use kernel::id::{ActivityLogId, UserId};
use sqlx::PgPool;

use crate::entity::{ActivityLog, NewActivityLog};
use crate::repository::ActivityLogRepository;

/// PostgreSQL-backed activity log repository
#[derive(Clone)]
pub struct PgActivityLogRepository {
    pool: PgPool,
}

impl PgActivityLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ActivityLogRow {
    id: i64,
    user_id: Option<i64>,
    action: String,
    details: Option<serde_json::Value>,
    ip_address: Option<String>,
    user_agent: Option<String>,
    timestamp: DateTime<Utc>,
}

impl ActivityLogRow {
    fn into_log(self) -> ActivityLog {
        ActivityLog {
            id: ActivityLogId::from_i64(self.id),
            user_id: self.user_id.map(UserId::from_i64),
            action: self.action,
            details: self.details.unwrap_or(serde_json::Value::Null),
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            timestamp: self.timestamp,
        }
    }
}

impl ActivityLogRepository for PgActivityLogRepository {
    async fn insert(&self, entry: &NewActivityLog) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_logs (
                user_id,
                action,
                details,
                ip_address,
                user_agent
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.user_id.map(|id| id.value()))
        .bind(&entry.action)
        .bind(&entry.details)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<ActivityLog>> {
        let rows = sqlx::query_as::<_, ActivityLogRow>(
            r#"
            SELECT
                id,
                user_id,
                action,
                details,
                ip_address,
                user_agent,
                timestamp
            FROM activity_logs
            ORDER BY timestamp DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_log()).collect())
    }
}
