//! Durable session store backed by PostgreSQL.

use async_trait::async_trait;

use crate::db::connection::DbPool;
use crate::models::session::SessionRecord;
use crate::repositories::session as session_repo;
use crate::session::store::{SessionStore, SessionStoreError};

/// Durable store. Lookups are row-level transactional reads against the live
/// connection, so every call observes the current source of truth; nothing is
/// cached between calls. A restart of this process resolves previously issued
/// sessions as long as the rows survive.
pub struct PgSessionStore {
    pool: DbPool,
}

impl PgSessionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, user_id: &str) -> Result<Option<String>, SessionStoreError> {
        if user_id.trim().is_empty() {
            return Ok(None);
        }
        let record = SessionRecord::issue(user_id);
        // A failed insert is a failed create: no session id escapes without
        // a committed row behind it.
        session_repo::insert_session(&self.pool, &record)
            .await
            .map_err(SessionStoreError::Persistence)?;
        Ok(Some(record.session_id))
    }

    async fn lookup(&self, session_id: &str) -> Result<Option<SessionRecord>, SessionStoreError> {
        if session_id.is_empty() {
            return Ok(None);
        }
        session_repo::find_session_by_id(&self.pool, session_id)
            .await
            .map_err(SessionStoreError::Persistence)
    }

    async fn destroy(&self, session_id: &str) -> Result<bool, SessionStoreError> {
        if session_id.is_empty() {
            return Ok(false);
        }
        // A storage fault surfaces as "not destroyed" so the caller can
        // retry; the row stays intact.
        match session_repo::delete_session_by_id(&self.pool, session_id).await {
            Ok(removed) => Ok(removed),
            Err(err) => {
                tracing::warn!(error = %err, "failed to delete session row");
                Ok(false)
            }
        }
    }
}
