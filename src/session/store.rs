//! Session store contract and the process-local implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::session::SessionRecord;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session persistence failure: {0}")]
    Persistence(#[source] sqlx::Error),
}

/// Mapping from session identifier to session record.
///
/// Validation failures and missing entries collapse to `None`/`false`;
/// `Err` is reserved for persistence faults. `destroy` of an id that is
/// already gone is a `false` no-op, never an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Issues a fresh session for `user_id`. Returns `None` for a blank
    /// identity. The record is durable (where the store is durable) before
    /// this returns.
    async fn create(&self, user_id: &str) -> Result<Option<String>, SessionStoreError>;

    /// Re-reads the source of truth and returns the record, if any.
    async fn lookup(&self, session_id: &str) -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Removes the record. `true` only if something was actually removed.
    async fn destroy(&self, session_id: &str) -> Result<bool, SessionStoreError>;
}

/// Process-local transient store. All access is serialized by the lock;
/// the map is owned by the instance, never ambient.
#[derive(Default)]
pub struct MemorySessionStore {
    records: Mutex<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("session map poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: &str) -> Result<Option<String>, SessionStoreError> {
        if user_id.trim().is_empty() {
            return Ok(None);
        }
        let record = SessionRecord::issue(user_id);
        let session_id = record.session_id.clone();
        self.records
            .lock()
            .expect("session map poisoned")
            .insert(session_id.clone(), record);
        Ok(Some(session_id))
    }

    async fn lookup(&self, session_id: &str) -> Result<Option<SessionRecord>, SessionStoreError> {
        if session_id.is_empty() {
            return Ok(None);
        }
        let records = self.records.lock().expect("session map poisoned");
        Ok(records.get(session_id).cloned())
    }

    async fn destroy(&self, session_id: &str) -> Result<bool, SessionStoreError> {
        if session_id.is_empty() {
            return Ok(false);
        }
        let mut records = self.records.lock().expect("session map poisoned");
        Ok(records.remove(session_id).is_some())
    }
}
