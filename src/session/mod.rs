//! Session-authentication core: stores, expiry policy, authenticators, and
//! the path guard.

pub mod authenticator;
pub mod basic;
pub mod guard;
pub mod pg_store;
pub mod policy;
pub mod store;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};

use crate::error::AppError;
use crate::models::user::User;

/// How the auth middleware resolves "who is making this request".
///
/// Implemented by both the cookie-based and the Basic authenticator, so the
/// middleware stays ignorant of which credential carrier is configured.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestAuthenticator: Send + Sync {
    /// Raw value of the `Authorization` header, if present and readable.
    fn authorization_header(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }

    /// Value of the configured session cookie. Backends without a cookie
    /// (and deployments with no cookie name configured) report none.
    fn session_cookie(&self, headers: &HeaderMap) -> Option<String> {
        let _ = headers;
        None
    }

    /// Resolves the requesting identity, or `None` when the request carries
    /// no usable credential. Only infrastructure faults surface as errors.
    async fn current_user(&self, headers: &HeaderMap) -> Result<Option<User>, AppError>;
}
