//! Auth routes — credential check and account registration.
//!
//! The browser keeps its own session flag and role; these endpoints only
//! confirm credentials and hand back a bearer token for backend calls.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use client::state::session::Role;
use serde::{Deserialize, Serialize};

use crate::services::accounts::AccountError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LoginReply {
    pub token: String,
    pub role: Role,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RegisterReply {
    pub ok: bool,
}

impl AccountError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        (self.status(), Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login` — verify email, password and role.
///
/// # Errors
///
/// 401 with `{"detail": "Invalid credentials"}` on any mismatch.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginBody>) -> Result<Json<LoginReply>, AccountError> {
    let grant = state.accounts.read().await.login(&body.email, &body.password, body.role);
    match grant {
        Ok(grant) => {
            tracing::info!(role = %grant.role, "login accepted");
            Ok(Json(LoginReply { token: grant.token, role: grant.role, name: grant.name }))
        }
        Err(e) => {
            tracing::warn!(role = %body.role, "login rejected");
            Err(e)
        }
    }
}

/// `POST /api/auth/register` — create an account for one role.
///
/// # Errors
///
/// 422 for malformed fields, 409 when the email is already registered.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<RegisterReply>), AccountError> {
    let mut accounts = state.accounts.write().await;
    let account = accounts.register(&body.name, &body.email, &body.password, body.role)?;
    tracing::info!(role = %account.role, "account registered");
    Ok((StatusCode::CREATED, Json(RegisterReply { ok: true })))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
