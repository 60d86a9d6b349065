//! Cookie-based session authenticator.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};

use crate::error::AppError;
use crate::models::user::User;
use crate::repositories::UserDirectory;
use crate::session::policy::SessionPolicy;
use crate::session::store::SessionStoreError;
use crate::session::RequestAuthenticator;

/// Façade used by request handling: resolves the requesting identity from
/// the session cookie, and exposes create/destroy to the login and logout
/// flows. Owns no session state itself; everything goes through the policy.
pub struct SessionAuthenticator {
    policy: SessionPolicy,
    cookie_name: Option<String>,
    users: Arc<dyn UserDirectory>,
}

impl SessionAuthenticator {
    pub fn new(
        policy: SessionPolicy,
        cookie_name: Option<String>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            policy,
            cookie_name,
            users,
        }
    }

    pub fn cookie_name(&self) -> Option<&str> {
        self.cookie_name.as_deref()
    }

    /// Issues a session for an authenticated user. `None` means the identity
    /// was not acceptable; persistence faults surface as errors.
    pub async fn create_session(
        &self,
        user_id: &str,
    ) -> Result<Option<String>, SessionStoreError> {
        self.policy.create(user_id).await
    }

    /// Destroys the session named by the request's cookie.
    ///
    /// Requires a resolvable cookie and a resolvable owner; any missing
    /// precondition is `false` with no side effects. `true` only when the
    /// store actually removed the record: a store that keeps the row (or a
    /// record that vanished between resolve and destroy) reports `false`,
    /// leaving the caller free to retry.
    pub async fn destroy_session(&self, headers: &HeaderMap) -> Result<bool, AppError> {
        let Some(session_id) = self.session_cookie(headers) else {
            return Ok(false);
        };
        if self.policy.resolve(&session_id).await?.is_none() {
            return Ok(false);
        }
        Ok(self.policy.destroy(&session_id).await?)
    }
}

#[async_trait]
impl RequestAuthenticator for SessionAuthenticator {
    fn session_cookie(&self, headers: &HeaderMap) -> Option<String> {
        let name = self.cookie_name.as_deref()?;
        let raw = headers.get(header::COOKIE)?.to_str().ok()?;
        crate::utils::cookies::extract_cookie_value(raw, name)
    }

    async fn current_user(&self, headers: &HeaderMap) -> Result<Option<User>, AppError> {
        let Some(session_id) = self.session_cookie(headers) else {
            return Ok(None);
        };
        let Some(user_id) = self.policy.resolve(&session_id).await? else {
            return Ok(None);
        };
        // A dangling session (owner deleted) is unauthenticated, not an
        // error.
        self.users.find_by_id(&user_id).await
    }
}
