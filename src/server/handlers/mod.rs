//! Request handlers.
//!
//! Handlers translate between HTTP and the library: bearer-token auth,
//! `SlidesmithError` to status-code mapping, JSON in and out. No
//! business logic lives here.

pub mod drafts;
pub mod presentations;
pub mod themes;
pub mod users;

use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde_json::{json, Value};

use crate::account::User;
use crate::error::SlidesmithError;
use crate::server::state::AppState;

/// Uniform error payload: a status code plus `{"error": "..."}`.
pub(crate) type ApiError = (StatusCode, Json<Value>);

pub(crate) fn error_response(e: SlidesmithError) -> ApiError {
    let status = match &e {
        SlidesmithError::NotFound(_) => StatusCode::NOT_FOUND,
        SlidesmithError::QuotaExceeded(_) | SlidesmithError::PremiumRequired(_) => {
            StatusCode::FORBIDDEN
        }
        SlidesmithError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() })))
}

fn unauthorized() -> ApiError {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Missing or invalid bearer token" })),
    )
}

/// Resolve the `Authorization: Bearer <token>` header to a user.
pub(crate) async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(unauthorized)?;
    state.users.by_token(token).await.ok_or_else(unauthorized)
}
