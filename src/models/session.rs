//! Model for one active login session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// One active login. `session_id` is unique across all live records and is
/// never reused once destroyed.
pub struct SessionRecord {
    /// Opaque token handed to the client (UUIDv4 rendered as text).
    pub session_id: String,
    /// Identity owning the session.
    pub user_id: String,
    /// Set at creation. Expiration-aware callers treat a missing timestamp
    /// as an unresolvable session.
    pub created_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Issues a fresh record for `user_id`, stamped with the current time.
    /// Collision resistance comes from the 122 random bits of a v4 UUID;
    /// no collision check is performed against existing records.
    pub fn issue(user_id: &str) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_stamps_creation_time_and_distinct_ids() {
        let a = SessionRecord::issue("user-1");
        let b = SessionRecord::issue("user-1");
        assert_ne!(a.session_id, b.session_id);
        assert!(a.created_at.is_some());
        assert_eq!(a.user_id, "user-1");
    }
}
