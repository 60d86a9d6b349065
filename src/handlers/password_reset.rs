//! Password reset: token issuance and password replacement.

use axum::{extract::State, Form, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::user::{ResetRequestForm, ResetUpdateForm};
use crate::repositories::user as user_repo;
use crate::state::AppState;
use crate::utils::password::hash_password;
use crate::utils::pii::mask_email;

/// `POST /reset_password`: issues a reset token for a registered email.
///
/// Unknown emails are rejected with 403 rather than 404 so the endpoint
/// does not confirm which addresses exist.
pub async fn request_reset(
    State(state): State<AppState>,
    Form(payload): Form<ResetRequestForm>,
) -> Result<Json<Value>, AppError> {
    let email = payload
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("email missing".to_string()))?;

    let user = user_repo::find_user_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Forbidden("Forbidden".to_string()))?;

    let token = Uuid::new_v4().to_string();
    let updated = user_repo::set_reset_token(&state.pool, &user.id, &token).await?;
    if !updated {
        return Err(AppError::InternalServerError(anyhow::anyhow!(
            "reset token was not stored"
        )));
    }

    tracing::info!(email = %mask_email(&user.email), "reset token issued");

    Ok(Json(json!({ "email": user.email, "reset_token": token })))
}

/// `PUT /reset_password`: replaces the password named by a valid reset token.
pub async fn update_password(
    State(state): State<AppState>,
    Form(payload): Form<ResetUpdateForm>,
) -> Result<Json<Value>, AppError> {
    let token = payload
        .reset_token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("reset_token missing".to_string()))?;
    let new_password = payload
        .new_password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("new_password missing".to_string()))?;

    let user = user_repo::find_user_by_reset_token(&state.pool, &token)
        .await?
        .ok_or_else(|| AppError::Forbidden("Forbidden".to_string()))?;

    let hashed = hash_password(&new_password).map_err(AppError::InternalServerError)?;
    user_repo::update_password(&state.pool, &user.id, &hashed).await?;

    tracing::info!(email = %mask_email(&user.email), "password updated via reset token");

    Ok(Json(json!({ "email": user.email, "message": "Password updated" })))
}
