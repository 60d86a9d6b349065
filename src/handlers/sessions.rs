//! Login, logout, and profile endpoints for cookie sessions.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::user::LoginForm;
use crate::repositories::user as user_repo;
use crate::session::RequestAuthenticator;
use crate::state::AppState;
use crate::utils::cookies::{build_clear_cookie, build_session_cookie, CookieOptions};
use crate::utils::password::verify_password;
use crate::utils::pii::mask_email;

/// `POST /sessions`: authenticates form credentials and issues a session
/// cookie.
pub async fn login(
    State(state): State<AppState>,
    Form(payload): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = payload
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("email missing".to_string()))?;
    let password = payload
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("password missing".to_string()))?;

    let user = user_repo::find_user_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            tracing::info!(email = %mask_email(&email), "login rejected: unknown email");
            AppError::Unauthorized("Invalid email or password".to_string())
        })?;

    let matches =
        verify_password(&password, &user.hashed_password).map_err(AppError::InternalServerError)?;
    if !matches {
        tracing::info!(email = %mask_email(&email), "login rejected: wrong password");
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let session_id = state
        .sessions
        .create_session(&user.id)
        .await?
        .ok_or_else(|| {
            AppError::InternalServerError(anyhow::anyhow!("session id was not issued"))
        })?;

    tracing::info!(email = %mask_email(&email), "login succeeded");

    let body = Json(json!({ "email": user.email, "message": "logged in" }));
    match state.sessions.cookie_name() {
        Some(name) => {
            let max_age = (state.config.session_duration_secs > 0)
                .then_some(state.config.session_duration_secs);
            let cookie = build_session_cookie(name, &session_id, max_age, CookieOptions::default());
            Ok(([(header::SET_COOKIE, cookie)], body).into_response())
        }
        None => Ok(body.into_response()),
    }
}

/// `DELETE /sessions`: destroys the session named by the request cookie.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let destroyed = state.sessions.destroy_session(&headers).await?;
    if !destroyed {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    let body = Json(json!({ "message": "logged out" }));
    match state.sessions.cookie_name() {
        Some(name) => {
            let cookie = build_clear_cookie(name, CookieOptions::default());
            Ok((
                StatusCode::OK,
                [(header::SET_COOKIE, cookie)],
                body,
            )
                .into_response())
        }
        None => Ok(body.into_response()),
    }
}

/// `GET /profile`: the email of whoever owns the session cookie.
pub async fn profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    let user = state
        .sessions
        .current_user(&headers)
        .await?
        .ok_or_else(|| AppError::Forbidden("Forbidden".to_string()))?;

    Ok(Json(json!({ "email": user.email })))
}
