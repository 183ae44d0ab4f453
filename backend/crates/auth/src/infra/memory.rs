//! In-Memory Session Store
//!
//! Process-local session backend for development and tests. Sessions
//! do not survive a restart and are not shared between instances.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::session::Session;
use crate::domain::repository::SessionStore;
use crate::error::AuthResult;

/// Session store backed by a process-local map
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently held (expired included)
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        Ok(self.sessions.read().await.get(&session_id).cloned())
    }

    async fn touch(&self, session: &Session) -> AuthResult<()> {
        if let Some(stored) = self.sessions.write().await.get_mut(&session.session_id) {
            stored.last_activity_at = session.last_activity_at;
        }
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        self.sessions.write().await.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());
        Ok((before - sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use kernel::id::UserId;

    #[tokio::test]
    async fn test_create_find_delete() {
        let store = MemorySessionStore::new();
        let session = Session::new(UserId::from_i64(1), Duration::hours(24));

        store.create(&session).await.unwrap();
        let found = store.find(session.session_id).await.unwrap().unwrap();
        assert_eq!(found.user_id, session.user_id);

        store.delete(session.session_id).await.unwrap();
        assert!(store.find(session.session_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_touch_updates_activity() {
        let store = MemorySessionStore::new();
        let mut session = Session::new(UserId::from_i64(1), Duration::hours(24));
        store.create(&session).await.unwrap();

        session.last_activity_at = Utc::now() + Duration::minutes(5);
        store.touch(&session).await.unwrap();

        let found = store.find(session.session_id).await.unwrap().unwrap();
        assert_eq!(found.last_activity_at, session.last_activity_at);
    }

    #[tokio::test]
    async fn test_cleanup_removes_only_expired() {
        let store = MemorySessionStore::new();

        let live = Session::new(UserId::from_i64(1), Duration::hours(24));
        let mut dead = Session::new(UserId::from_i64(2), Duration::hours(24));
        dead.expires_at_ms = Utc::now().timestamp_millis() - 1000;

        store.create(&live).await.unwrap();
        store.create(&dead).await.unwrap();

        assert_eq!(store.cleanup_expired().await.unwrap(), 1);
        assert!(store.find(live.session_id).await.unwrap().is_some());
        assert!(store.find(dead.session_id).await.unwrap().is_none());
    }
}
