//! Theme listing handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::server::state::AppState;
use crate::theme::ThemeDescriptor;

use super::ApiError;

/// Listing entry: everything except the layout bodies, which clients
/// don't need for a theme picker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_premium: bool,
    pub preview_image_url: Option<String>,
}

impl From<&ThemeDescriptor> for ThemeSummary {
    fn from(theme: &ThemeDescriptor) -> Self {
        Self {
            id: theme.id.clone(),
            name: theme.name.clone(),
            description: theme.description.clone(),
            is_premium: theme.is_premium,
            preview_image_url: theme.preview_image_url.clone(),
        }
    }
}

/// GET /api/themes
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<ThemeSummary>> {
    Json(state.themes.all().iter().map(ThemeSummary::from).collect())
}

/// GET /api/themes/:slug — the full descriptor, layouts included.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ThemeDescriptor>, ApiError> {
    state
        .themes
        .by_slug(&slug)
        .cloned()
        .map(Json)
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Theme not found" })),
        ))
}
