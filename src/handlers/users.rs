//! User registration and the authenticated profile endpoint.

use axum::{extract::State, http::StatusCode, Extension, Form, Json};
use serde_json::{json, Value};
use validator::Validate;

use crate::error::AppError;
use crate::models::user::{RegisterForm, User, UserResponse};
use crate::repositories::user as user_repo;
use crate::state::AppState;
use crate::utils::password::hash_password;
use crate::utils::pii::{mask_email, mask_pii_json};

/// `POST /users`: registers a new account from form credentials.
pub async fn register(
    State(state): State<AppState>,
    Form(payload): Form<RegisterForm>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let email = payload
        .email
        .clone()
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("email missing".to_string()))?;
    let password = payload
        .password
        .clone()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("password missing".to_string()))?;
    payload.validate()?;

    if user_repo::find_user_by_email(&state.pool, &email)
        .await?
        .is_some()
    {
        tracing::info!(email = %mask_email(&email), "registration rejected: duplicate email");
        return Err(AppError::BadRequest("email already registered".to_string()));
    }

    let hashed = hash_password(&password).map_err(AppError::InternalServerError)?;
    let user = User::new(email, hashed);
    user_repo::create_user(&state.pool, &user).await?;

    tracing::info!(email = %mask_email(&user.email), "user registered");
    if let Ok(row) = serde_json::to_value(&user) {
        tracing::debug!(user = %mask_pii_json(&row), "stored user record");
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({ "email": user.email, "message": "user created" })),
    ))
}

/// `GET /users/me`: the user the auth middleware resolved for this request.
pub async fn me(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
