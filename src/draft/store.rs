//! Owner-scoped in-memory draft store.
//!
//! Every lookup is scoped by the owning user. A draft that exists but
//! belongs to someone else is reported exactly like one that does not
//! exist — always `NotFound`, never `Forbidden`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DraftSummary, PresentationDraft};
use crate::error::SlidesmithError;

/// Fixed page size for draft listings.
pub const LIST_PAGE_SIZE: usize = 50;

/// Shared draft store keyed by draft id.
#[derive(Clone, Default)]
pub struct DraftStore {
    drafts: Arc<RwLock<HashMap<Uuid, PresentationDraft>>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a new or replaced draft.
    pub async fn insert(&self, draft: PresentationDraft) {
        self.drafts.write().await.insert(draft.id, draft);
    }

    /// Fetch a draft for an owner. Missing and not-yours are
    /// indistinguishable by design.
    pub async fn get(
        &self,
        owner_id: Uuid,
        draft_id: Uuid,
    ) -> Result<PresentationDraft, SlidesmithError> {
        self.drafts
            .read()
            .await
            .get(&draft_id)
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .ok_or_else(|| SlidesmithError::NotFound("Draft not found".into()))
    }

    /// Apply a mutation to an owned draft and return a value from it.
    pub async fn mutate<T>(
        &self,
        owner_id: Uuid,
        draft_id: Uuid,
        f: impl FnOnce(&mut PresentationDraft) -> Result<T, SlidesmithError>,
    ) -> Result<T, SlidesmithError> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts
            .get_mut(&draft_id)
            .filter(|d| d.owner_id == owner_id)
            .ok_or_else(|| SlidesmithError::NotFound("Draft not found".into()))?;
        f(draft)
    }

    /// List an owner's drafts as summaries, most recently edited
    /// first, capped at [`LIST_PAGE_SIZE`].
    pub async fn list(&self, owner_id: Uuid) -> Vec<DraftSummary> {
        let drafts = self.drafts.read().await;
        let mut summaries: Vec<DraftSummary> = drafts
            .values()
            .filter(|d| d.owner_id == owner_id)
            .map(DraftSummary::from)
            .collect();
        summaries.sort_by(|a, b| b.last_edited_at.cmp(&a.last_edited_at));
        summaries.truncate(LIST_PAGE_SIZE);
        summaries
    }

    /// Delete an owned draft.
    pub async fn delete(&self, owner_id: Uuid, draft_id: Uuid) -> Result<(), SlidesmithError> {
        let mut drafts = self.drafts.write().await;
        match drafts.get(&draft_id) {
            Some(d) if d.owner_id == owner_id => {
                drafts.remove(&draft_id);
                Ok(())
            }
            _ => Err(SlidesmithError::NotFound("Draft not found".into())),
        }
    }
}
