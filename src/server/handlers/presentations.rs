//! Completed-presentation handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use uuid::Uuid;

use crate::assemble::Presentation;
use crate::server::state::AppState;

use super::{authenticate, error_response, ApiError};

/// GET /api/presentations
pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Presentation>>, ApiError> {
    let user = authenticate(&state, &headers).await?;
    Ok(Json(state.presentations.list(user.id).await))
}

/// GET /api/presentations/:id
pub async fn get(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Presentation>, ApiError> {
    let user = authenticate(&state, &headers).await?;
    state
        .presentations
        .get(user.id, id)
        .await
        .map(Json)
        .map_err(error_response)
}
