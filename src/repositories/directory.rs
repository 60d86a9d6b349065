//! User lookup seam consumed by the authenticators.
//!
//! The trait exists so the session core can resolve identities without
//! knowing about the database; tests substitute a mock.

use async_trait::async_trait;

use crate::db::connection::DbPool;
use crate::error::AppError;
use crate::models::user::User;
use crate::repositories::user as user_repo;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by primary identifier.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Find a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

pub struct PgUserDirectory {
    pool: DbPool,
}

impl PgUserDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        if id.trim().is_empty() {
            return Ok(None);
        }
        user_repo::find_user_by_id(&self.pool, id)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        if email.trim().is_empty() {
            return Ok(None);
        }
        user_repo::find_user_by_email(&self.pool, email)
            .await
            .map_err(AppError::from)
    }
}
