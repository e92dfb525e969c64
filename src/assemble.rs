//! # Document Assembly
//!
//! The export pipeline: gate, render, encode, upload, record. This is
//! where the draft status state machine lives and where every side
//! effect of a successful export happens exactly once.
//!
//! ```text
//! draft ──► quota/premium gates ──► Generating
//!       ──► render (per-slide isolation) ──► encode ──► upload
//!       ──► edit-version check ──► record + counter ──► Completed
//! ```
//!
//! Failure handling is asymmetric on purpose: render problems are
//! absorbed per slide and never fail an export, while storage failures
//! and concurrent edits mark the draft `Failed` with the error
//! retained for the user.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::account::UserStore;
use crate::draft::{DraftStatus, DraftStore, PresentationDraft};
use crate::encode::{DocumentEncoder, RenderedDeck, RenderedSlide};
use crate::error::SlidesmithError;
use crate::render::{render_slide_safe, PageSize};
use crate::storage::ObjectStorage;
use crate::theme::{ThemeDescriptor, ThemeRegistry};
use crate::thumbnail::{self, SlideRasterizer};

/// Listing cap for completed presentations.
pub const PRESENTATION_PAGE_SIZE: usize = 20;

/// An immutable record of one completed export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub draft_id: Uuid,
    pub title: String,
    pub topic: String,
    pub language: String,
    pub theme_slug: String,
    pub url: String,
    pub slide_count: usize,
    pub size_bytes: u64,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub completed_at: DateTime<Utc>,
}

/// Append-only store of completed exports. Records are never edited
/// after insertion.
#[derive(Clone, Default)]
pub struct PresentationStore {
    records: Arc<RwLock<HashMap<Uuid, Presentation>>>,
}

impl PresentationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, record: Presentation) {
        self.records.write().await.insert(record.id, record);
    }

    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Presentation, SlidesmithError> {
        self.records
            .read()
            .await
            .get(&id)
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .ok_or_else(|| SlidesmithError::NotFound("Presentation not found".into()))
    }

    /// An owner's records, most recent first, capped at
    /// [`PRESENTATION_PAGE_SIZE`].
    pub async fn list(&self, owner_id: Uuid) -> Vec<Presentation> {
        let records = self.records.read().await;
        let mut out: Vec<Presentation> = records
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        out.truncate(PRESENTATION_PAGE_SIZE);
        out
    }

    pub async fn count(&self, owner_id: Uuid) -> usize {
        self.records
            .read()
            .await
            .values()
            .filter(|p| p.owner_id == owner_id)
            .count()
    }
}

/// The export driver with all collaborators injected.
pub struct Exporter {
    pub drafts: DraftStore,
    pub users: UserStore,
    pub presentations: PresentationStore,
    pub themes: Arc<ThemeRegistry>,
    pub encoder: Arc<dyn DocumentEncoder>,
    pub storage: Arc<dyn ObjectStorage>,
    pub rasterizer: Arc<dyn SlideRasterizer>,
}

impl Exporter {
    /// Run a full export for an owned draft.
    pub async fn export(
        &self,
        owner_id: Uuid,
        draft_id: Uuid,
    ) -> Result<Presentation, SlidesmithError> {
        let draft = self.drafts.get(owner_id, draft_id).await?;
        self.users.check_quota(owner_id).await?;

        let theme = self.resolve_theme(owner_id, &draft).await?;

        // Enter Generating and pin the edit version we are exporting.
        let exported_version = draft.edit_version;
        self.drafts
            .mutate(owner_id, draft_id, |d| {
                d.status = DraftStatus::Generating;
                Ok(())
            })
            .await?;
        println!(
            "[export] draft {draft_id} v{exported_version}: {} slides, theme '{}'",
            draft.slides.len(),
            theme.id
        );

        let deck = render_deck(&draft, &theme);
        // Every failure past this point must leave the draft in
        // Failed, never stuck in Generating.
        let bytes = match self.encoder.encode(&deck) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.fail(owner_id, draft_id, &e).await;
                return Err(e);
            }
        };

        let file_name = format!("deck.{}", self.encoder.file_extension());
        let stored = match self.storage.upload(bytes, "decks", &file_name).await {
            Ok(stored) => stored,
            Err(e) => {
                self.fail(owner_id, draft_id, &e).await;
                return Err(e);
            }
        };

        // The draft may have been edited while we rendered. Publishing
        // a deck that no longer matches the saved draft is worse than
        // failing, so a version mismatch fails the export.
        let current = self.drafts.get(owner_id, draft_id).await?;
        if current.edit_version != exported_version {
            let e = SlidesmithError::Validation(format!(
                "draft changed during export (v{} -> v{})",
                exported_version, current.edit_version
            ));
            self.fail(owner_id, draft_id, &e).await;
            return Err(e);
        }

        let thumbnail_url = match draft.slides.iter().min_by_key(|s| s.position) {
            Some(first) => Some(
                thumbnail::generate(first, &theme, self.rasterizer.as_ref(), self.storage.as_ref())
                    .await,
            ),
            None => None,
        };

        let record = Presentation {
            id: Uuid::new_v4(),
            owner_id,
            draft_id,
            title: draft.title.clone(),
            topic: draft.topic.clone(),
            language: draft.language.clone(),
            theme_slug: theme.id.clone(),
            url: stored.url,
            slide_count: deck.slide_count(),
            size_bytes: stored.size_bytes,
            thumbnail_url,
            completed_at: Utc::now(),
        };
        self.presentations.insert(record.clone()).await;
        self.users.record_export(owner_id).await?;
        self.drafts
            .mutate(owner_id, draft_id, |d| {
                d.status = DraftStatus::Completed;
                Ok(())
            })
            .await?;
        println!(
            "[export] draft {draft_id} completed: {} bytes at {}",
            record.size_bytes, record.url
        );
        Ok(record)
    }

    async fn resolve_theme(
        &self,
        owner_id: Uuid,
        draft: &PresentationDraft,
    ) -> Result<ThemeDescriptor, SlidesmithError> {
        let theme = self
            .themes
            .by_slug(&draft.theme_slug)
            .ok_or_else(|| SlidesmithError::NotFound("Theme not found".into()))?;
        if theme.is_premium {
            let user = self.users.get(owner_id).await?;
            if !user.is_premium {
                return Err(SlidesmithError::PremiumRequired(format!(
                    "theme '{}' requires a premium subscription",
                    theme.id
                )));
            }
        }
        Ok(theme.clone())
    }

    /// Record a failed export on the draft. Best effort: if the draft
    /// vanished meanwhile there is nothing left to mark.
    async fn fail(&self, owner_id: Uuid, draft_id: Uuid, error: &SlidesmithError) {
        eprintln!("[export] draft {draft_id} failed: {error}");
        let message = error.to_string();
        let _ = self
            .drafts
            .mutate(owner_id, draft_id, move |d| {
                d.status = DraftStatus::Failed(message);
                Ok(())
            })
            .await;
    }
}

/// Render every slide of a draft, in position order, with per-slide
/// isolation. Always yields exactly one rendered slide per draft
/// slide.
pub fn render_deck(draft: &PresentationDraft, theme: &ThemeDescriptor) -> RenderedDeck {
    let mut slides: Vec<&crate::draft::Slide> = draft.slides.iter().collect();
    slides.sort_by_key(|s| s.position);

    RenderedDeck {
        title: draft.title.clone(),
        page: PageSize::default(),
        slides: slides
            .into_iter()
            .map(|slide| RenderedSlide {
                slide_id: slide.id,
                slide_type: slide.slide_type,
                ops: render_slide_safe(slide, theme),
            })
            .collect(),
    }
}
