//! HTTP Basic authentication backend.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::AppError;
use crate::models::user::User;
use crate::repositories::UserDirectory;
use crate::session::RequestAuthenticator;
use crate::utils::password::verify_password;

/// Extracts the base64 payload from a `Basic ` authorization header.
pub fn extract_base64_authorization(header: &str) -> Option<&str> {
    header.strip_prefix("Basic ")
}

/// Decodes the base64 payload to UTF-8, tolerating any decode failure.
pub fn decode_base64_authorization(payload: &str) -> Option<String> {
    let bytes = BASE64.decode(payload).ok()?;
    String::from_utf8(bytes).ok()
}

/// Splits decoded credentials on the first `:`; the password may itself
/// contain colons.
pub fn extract_user_credentials(decoded: &str) -> Option<(String, String)> {
    let (email, password) = decoded.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

/// Stateless authenticator resolving identities from the `Authorization`
/// header on every request.
pub struct BasicAuthenticator {
    users: Arc<dyn UserDirectory>,
}

impl BasicAuthenticator {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    async fn user_from_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Ok(None);
        };
        let matches = verify_password(password, &user.hashed_password)
            .map_err(AppError::InternalServerError)?;
        Ok(matches.then_some(user))
    }
}

#[async_trait]
impl RequestAuthenticator for BasicAuthenticator {
    async fn current_user(&self, headers: &HeaderMap) -> Result<Option<User>, AppError> {
        let Some(header) = self.authorization_header(headers) else {
            return Ok(None);
        };
        let Some(decoded) =
            extract_base64_authorization(&header).and_then(decode_base64_authorization)
        else {
            return Ok(None);
        };
        let Some((email, password)) = extract_user_credentials(&decoded) else {
            return Ok(None);
        };
        self.user_from_credentials(&email, &password).await
    }
}
