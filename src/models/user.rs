//! Models that represent user accounts and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// Database representation of a registered account.
pub struct User {
    /// Unique identifier for the user (UUID rendered as text).
    pub id: String,
    /// Email address used for login. Unique.
    pub email: String,
    /// Argon2 hash of the user's password.
    pub hashed_password: String,
    /// Outstanding password-reset token, if one was issued.
    pub reset_token: Option<String>,
    /// Creation timestamp for auditing.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp for auditing.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Constructs a new user with a freshly generated identifier.
    pub fn new(email: String, hashed_password: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            hashed_password,
            reset_token: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form payload for account registration.
pub struct RegisterForm {
    #[validate(email(message = "email invalid"))]
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
/// Form payload submitted by a user attempting to log in.
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
/// Form payload requesting a password-reset token.
pub struct ResetRequestForm {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
/// Form payload applying a password reset.
pub struct ResetUpdateForm {
    pub email: Option<String>,
    pub reset_token: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
/// Public-facing representation of a user returned by the API.
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
