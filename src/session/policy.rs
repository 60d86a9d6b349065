//! Expiration policy layered over a session store.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::session::store::{SessionStore, SessionStoreError};

/// Decorates a [`SessionStore`] with time-based invalidation, so the same
/// rule applies whether records live in memory or in the database. The store
/// stays ignorant of time; the policy never caches records between calls.
///
/// The configured duration is fixed at construction. Zero or negative
/// disables expiry.
pub struct SessionPolicy {
    store: Arc<dyn SessionStore>,
    duration_secs: i64,
}

impl SessionPolicy {
    pub fn new(store: Arc<dyn SessionStore>, duration_secs: i64) -> Self {
        Self {
            store,
            duration_secs,
        }
    }

    pub fn duration_secs(&self) -> i64 {
        self.duration_secs
    }

    /// Issues a session for `user_id`. The store stamps the creation time.
    pub async fn create(&self, user_id: &str) -> Result<Option<String>, SessionStoreError> {
        self.store.create(user_id).await
    }

    /// Resolves a session id to its owning user id, treating expired
    /// records as absent. Expired records are not deleted here; they simply
    /// become unreachable through this call.
    pub async fn resolve(&self, session_id: &str) -> Result<Option<String>, SessionStoreError> {
        if session_id.is_empty() {
            return Ok(None);
        }

        let Some(record) = self.store.lookup(session_id).await? else {
            return Ok(None);
        };

        if self.duration_secs <= 0 {
            return Ok(Some(record.user_id));
        }

        // With expiry enabled a record must carry its creation time.
        let Some(created_at) = record.created_at else {
            return Ok(None);
        };

        if expired(created_at, self.duration_secs, Utc::now()) {
            return Ok(None);
        }

        Ok(Some(record.user_id))
    }

    /// Removes the session from the underlying store.
    pub async fn destroy(&self, session_id: &str) -> Result<bool, SessionStoreError> {
        self.store.destroy(session_id).await
    }
}

/// A session expires strictly after `created_at + duration`: a query at the
/// exact expiry instant is still valid.
fn expired(created_at: DateTime<Utc>, duration_secs: i64, now: DateTime<Utc>) -> bool {
    now > created_at + Duration::seconds(duration_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionRecord;
    use crate::session::store::MemorySessionStore;
    use async_trait::async_trait;

    /// Store stub returning one fixed record, for exercising the time rule
    /// without sleeping.
    struct FixedStore {
        record: SessionRecord,
    }

    #[async_trait]
    impl SessionStore for FixedStore {
        async fn create(&self, _user_id: &str) -> Result<Option<String>, SessionStoreError> {
            Ok(Some(self.record.session_id.clone()))
        }

        async fn lookup(
            &self,
            session_id: &str,
        ) -> Result<Option<SessionRecord>, SessionStoreError> {
            if session_id == self.record.session_id {
                Ok(Some(self.record.clone()))
            } else {
                Ok(None)
            }
        }

        async fn destroy(&self, _session_id: &str) -> Result<bool, SessionStoreError> {
            Ok(false)
        }
    }

    fn policy_with_record(record: SessionRecord, duration_secs: i64) -> SessionPolicy {
        SessionPolicy::new(Arc::new(FixedStore { record }), duration_secs)
    }

    fn record_created_secs_ago(age_secs: i64) -> SessionRecord {
        SessionRecord {
            session_id: "sid".into(),
            user_id: "user-1".into(),
            created_at: Some(Utc::now() - Duration::seconds(age_secs)),
        }
    }

    #[tokio::test]
    async fn create_then_resolve_roundtrips() {
        let policy = SessionPolicy::new(Arc::new(MemorySessionStore::new()), 60);
        let session_id = policy.create("user-1").await.unwrap().expect("session id");
        let resolved = policy.resolve(&session_id).await.unwrap();
        assert_eq!(resolved.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn resolve_rejects_empty_and_unknown_ids() {
        let policy = SessionPolicy::new(Arc::new(MemorySessionStore::new()), 0);
        assert!(policy.resolve("").await.unwrap().is_none());
        assert!(policy.resolve("never-issued").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn zero_duration_disables_expiry() {
        // A record created long ago still resolves when expiry is off.
        let policy = policy_with_record(record_created_secs_ago(10_000_000), 0);
        assert_eq!(policy.resolve("sid").await.unwrap().as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn fresh_session_resolves_within_window() {
        let policy = policy_with_record(record_created_secs_ago(30), 60);
        assert_eq!(policy.resolve("sid").await.unwrap().as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn stale_session_is_absent_but_not_deleted() {
        let record = record_created_secs_ago(120);
        let store = Arc::new(FixedStore {
            record: record.clone(),
        });
        let policy = SessionPolicy::new(Arc::clone(&store) as Arc<dyn SessionStore>, 60);

        assert!(policy.resolve("sid").await.unwrap().is_none());
        // The record is still physically present in the store.
        assert!(store.lookup("sid").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn record_without_timestamp_is_absent_when_expiry_enabled() {
        let record = SessionRecord {
            session_id: "sid".into(),
            user_id: "user-1".into(),
            created_at: None,
        };
        let policy = policy_with_record(record.clone(), 60);
        assert!(policy.resolve("sid").await.unwrap().is_none());

        // With expiry disabled the same record resolves.
        let policy = policy_with_record(record, 0);
        assert_eq!(policy.resolve("sid").await.unwrap().as_deref(), Some("user-1"));
    }

    #[test]
    fn expiry_comparison_is_strict() {
        let created_at = Utc::now();
        let exactly = created_at + Duration::seconds(60);
        let after = exactly + Duration::milliseconds(1);

        assert!(!expired(created_at, 60, created_at));
        assert!(!expired(created_at, 60, exactly));
        assert!(expired(created_at, 60, after));
    }
}
