//! Draft CRUD, slide editing, and export handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::assemble::Presentation;
use crate::draft::{
    DraftSummary, PresentationDraft, Slide, SlidePatch, SlideType,
};
use crate::server::state::AppState;

use super::{authenticate, error_response, ApiError};

fn default_language() -> String {
    "English".to_string()
}

fn default_slide_count() -> usize {
    8
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftRequest {
    pub topic: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_slide_count")]
    pub slide_count: usize,
    #[serde(default)]
    pub theme_id: Option<String>,
}

/// POST /api/drafts — generate an outline and create a draft from it.
/// Never fails for generation reasons; the outline degrades to the
/// fixed fallback structure.
pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateDraftRequest>,
) -> Result<(StatusCode, Json<PresentationDraft>), ApiError> {
    let user = authenticate(&state, &headers).await?;
    if req.topic.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Topic must not be empty" })),
        ));
    }

    let theme_slug = req.theme_id.unwrap_or_else(|| "executive".to_string());
    if state.themes.by_slug(&theme_slug).is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Theme not found" })),
        ));
    }

    let outline = state
        .outline
        .generate(&req.topic, &req.language, req.slide_count)
        .await;
    let draft = PresentationDraft::new(
        user.id,
        outline.title,
        req.topic,
        req.language,
        theme_slug,
        outline.slides,
    );
    state.drafts.insert(draft.clone()).await;
    Ok((StatusCode::CREATED, Json(draft)))
}

/// GET /api/drafts
pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<DraftSummary>>, ApiError> {
    let user = authenticate(&state, &headers).await?;
    Ok(Json(state.drafts.list(user.id).await))
}

/// GET /api/drafts/:id
pub async fn get(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<PresentationDraft>, ApiError> {
    let user = authenticate(&state, &headers).await?;
    state
        .drafts
        .get(user.id, draft_id)
        .await
        .map(Json)
        .map_err(error_response)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDraftRequest {
    pub title: Option<String>,
    pub slides: Option<Vec<Slide>>,
}

/// PUT /api/drafts/:id
pub async fn update(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(draft_id): Path<Uuid>,
    Json(req): Json<UpdateDraftRequest>,
) -> Result<Json<PresentationDraft>, ApiError> {
    let user = authenticate(&state, &headers).await?;
    state
        .drafts
        .mutate(user.id, draft_id, |d| {
            d.update(req.title, req.slides)?;
            Ok(d.clone())
        })
        .await
        .map(Json)
        .map_err(error_response)
}

/// DELETE /api/drafts/:id
pub async fn delete(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = authenticate(&state, &headers).await?;
    state
        .drafts
        .delete(user.id, draft_id)
        .await
        .map_err(error_response)?;
    Ok(Json(json!({ "deleted": draft_id })))
}

/// POST /api/drafts/:id/duplicate
pub async fn duplicate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(draft_id): Path<Uuid>,
) -> Result<(StatusCode, Json<PresentationDraft>), ApiError> {
    let user = authenticate(&state, &headers).await?;
    let original = state
        .drafts
        .get(user.id, draft_id)
        .await
        .map_err(error_response)?;
    let copy = original.duplicate();
    state.drafts.insert(copy.clone()).await;
    Ok((StatusCode::CREATED, Json(copy)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSlideRequest {
    #[serde(rename = "type")]
    pub slide_type: Option<SlideType>,
    pub position: Option<usize>,
}

/// POST /api/drafts/:id/slides
pub async fn add_slide(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(draft_id): Path<Uuid>,
    Json(req): Json<AddSlideRequest>,
) -> Result<(StatusCode, Json<Slide>), ApiError> {
    let user = authenticate(&state, &headers).await?;
    state
        .drafts
        .mutate(user.id, draft_id, |d| {
            Ok(d.add_slide(req.slide_type, req.position))
        })
        .await
        .map(|slide| (StatusCode::CREATED, Json(slide)))
        .map_err(error_response)
}

/// PUT /api/drafts/:id/slides/:slide_id
pub async fn update_slide(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((draft_id, slide_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<SlidePatch>,
) -> Result<Json<Slide>, ApiError> {
    let user = authenticate(&state, &headers).await?;
    state
        .drafts
        .mutate(user.id, draft_id, |d| {
            d.update_slide(slide_id, patch).map(Slide::clone)
        })
        .await
        .map(Json)
        .map_err(error_response)
}

/// DELETE /api/drafts/:id/slides/:slide_id
pub async fn delete_slide(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((draft_id, slide_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = authenticate(&state, &headers).await?;
    state
        .drafts
        .mutate(user.id, draft_id, |d| d.delete_slide(slide_id))
        .await
        .map_err(error_response)?;
    Ok(Json(json!({ "deleted": slide_id })))
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<Uuid>,
}

/// PUT /api/drafts/:id/reorder
pub async fn reorder(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(draft_id): Path<Uuid>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<PresentationDraft>, ApiError> {
    let user = authenticate(&state, &headers).await?;
    state
        .drafts
        .mutate(user.id, draft_id, |d| {
            d.reorder(&req.order);
            Ok(d.clone())
        })
        .await
        .map(Json)
        .map_err(error_response)
}

/// POST /api/drafts/:id/export — run the full export pipeline.
pub async fn export(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(draft_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Presentation>), ApiError> {
    let user = authenticate(&state, &headers).await?;
    state
        .exporter()
        .export(user.id, draft_id)
        .await
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(error_response)
}
