//! # Slide Draft Model
//!
//! The mutable, user-editable content unit: a [`PresentationDraft`]
//! exclusively owns an ordered list of [`Slide`]s and maintains
//! positional integrity — after any mutating operation, `position`
//! values are a contiguous `0..n-1` permutation in display order.
//!
//! The same types serve as the Rust API and the JSON API: everything
//! here derives `Serialize + Deserialize`.

pub mod store;

pub use store::DraftStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SlidesmithError;

/// Closed set of slide-type tags a theme's layouts may key on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SlideType {
    Title,
    Plan,
    Content,
    TwoColumn,
    Timeline,
    Comparison,
    Cards,
    Stats,
    Chart,
    Quote,
    Closing,
}

impl SlideType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlideType::Title => "title",
            SlideType::Plan => "plan",
            SlideType::Content => "content",
            SlideType::TwoColumn => "twoColumn",
            SlideType::Timeline => "timeline",
            SlideType::Comparison => "comparison",
            SlideType::Cards => "cards",
            SlideType::Stats => "stats",
            SlideType::Chart => "chart",
            SlideType::Quote => "quote",
            SlideType::Closing => "closing",
        }
    }
}

/// Display-variant hint, independent of the slide type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutHint {
    #[default]
    Default,
    Centered,
    Split,
}

/// One stat card entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Quoted text with attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// One chart data point as received from generation. Either field may
/// be missing in malformed model output; the renderer filters points
/// down to those with both present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

impl ChartPoint {
    /// A point is renderable only with both a label and a value.
    pub fn is_valid(&self) -> bool {
        self.label.as_deref().is_some_and(|l| !l.is_empty()) && self.value.is_some()
    }
}

fn default_slide_content() -> Vec<String> {
    vec!["Add your content here".to_string()]
}

/// A single slide within a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Unique within the owning draft.
    pub id: Uuid,
    #[serde(rename = "type")]
    pub slide_type: SlideType,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Ordered content strings; semantics depend on the slide type
    /// (bullet items, paragraphs, two-column cells, timeline steps).
    #[serde(default)]
    pub content: Vec<String>,
    /// Dense zero-based display order within the draft.
    pub position: usize,
    #[serde(default)]
    pub layout: LayoutHint,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub chart_data: Vec<ChartPoint>,
    #[serde(default)]
    pub quote: Option<Quote>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Slide {
    /// A fresh content slide with placeholder text.
    pub fn new_default(slide_type: SlideType, position: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            slide_type,
            title: "New Slide".to_string(),
            subtitle: None,
            content: default_slide_content(),
            position,
            layout: LayoutHint::Default,
            stats: Vec::new(),
            chart_data: Vec::new(),
            quote: None,
            notes: None,
        }
    }
}

/// Partial slide update: every field optional, merged shallowly over
/// the existing slide.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlidePatch {
    #[serde(rename = "type")]
    pub slide_type: Option<SlideType>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<Vec<String>>,
    pub layout: Option<LayoutHint>,
    pub stats: Option<Vec<Stat>>,
    pub chart_data: Option<Vec<ChartPoint>>,
    pub quote: Option<Quote>,
    pub notes: Option<String>,
}

/// Draft lifecycle state.
///
/// `Failed` retains the export error for user display; there is no
/// automatic retry — a failed export is re-triggered by a fresh
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "error")]
pub enum DraftStatus {
    Draft,
    Generating,
    Completed,
    Failed(String),
}

/// A user-editable slide deck, pre-export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationDraft {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub topic: String,
    pub language: String,
    /// Foreign reference to a theme, resolved at export time.
    pub theme_slug: String,
    pub slides: Vec<Slide>,
    pub status: DraftStatus,
    /// Monotonic edit counter, bumped by every mutating operation.
    /// Captured at export start and compared at completion.
    pub edit_version: u64,
    pub last_edited_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PresentationDraft {
    /// Create a draft from an externally-produced outline. Slides take
    /// `position = index` in plan order.
    pub fn new(
        owner_id: Uuid,
        title: String,
        topic: String,
        language: String,
        theme_slug: String,
        mut slides: Vec<Slide>,
    ) -> Self {
        for (index, slide) in slides.iter_mut().enumerate() {
            slide.position = index;
        }
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title,
            topic,
            language,
            theme_slug,
            slides,
            status: DraftStatus::Draft,
            edit_version: 0,
            last_edited_at: now,
            created_at: now,
        }
    }

    /// Stamp a mutation: bump the edit counter and refresh the edit
    /// timestamp. Every mutating operation routes through this.
    fn touch(&mut self) {
        self.edit_version += 1;
        self.last_edited_at = Utc::now();
    }

    /// Renumber positions to stay dense (0..n-1) while preserving
    /// relative order.
    fn renumber(&mut self) {
        for (index, slide) in self.slides.iter_mut().enumerate() {
            slide.position = index;
        }
    }

    /// Replace title and/or slide list wholesale.
    ///
    /// A replacement list with duplicate slide ids is rejected: id
    /// uniqueness is what makes per-slide updates and deletes
    /// unambiguous.
    pub fn update(
        &mut self,
        title: Option<String>,
        slides: Option<Vec<Slide>>,
    ) -> Result<(), SlidesmithError> {
        if let Some(slides) = &slides {
            let mut seen = std::collections::HashSet::with_capacity(slides.len());
            if !slides.iter().all(|s| seen.insert(s.id)) {
                return Err(SlidesmithError::Validation(
                    "slide ids must be unique within a draft".into(),
                ));
            }
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(slides) = slides {
            self.slides = slides;
            self.renumber();
        }
        self.touch();
        Ok(())
    }

    /// Merge a patch over the slide with the given id.
    pub fn update_slide(&mut self, slide_id: Uuid, patch: SlidePatch) -> Result<&Slide, SlidesmithError> {
        let slide = self
            .slides
            .iter_mut()
            .find(|s| s.id == slide_id)
            .ok_or_else(|| SlidesmithError::NotFound("Slide not found".into()))?;

        if let Some(slide_type) = patch.slide_type {
            slide.slide_type = slide_type;
        }
        if let Some(title) = patch.title {
            slide.title = title;
        }
        if let Some(subtitle) = patch.subtitle {
            slide.subtitle = Some(subtitle);
        }
        if let Some(content) = patch.content {
            slide.content = content;
        }
        if let Some(layout) = patch.layout {
            slide.layout = layout;
        }
        if let Some(stats) = patch.stats {
            slide.stats = stats;
        }
        if let Some(chart_data) = patch.chart_data {
            slide.chart_data = chart_data;
        }
        if let Some(quote) = patch.quote {
            slide.quote = Some(quote);
        }
        if let Some(notes) = patch.notes {
            slide.notes = Some(notes);
        }
        let id = slide.id;
        self.touch();
        Ok(self.slides.iter().find(|s| s.id == id).unwrap())
    }

    /// Insert a new slide at `position` (default: end) and renumber.
    pub fn add_slide(&mut self, slide_type: Option<SlideType>, position: Option<usize>) -> Slide {
        let position = position.unwrap_or(self.slides.len()).min(self.slides.len());
        let slide = Slide::new_default(slide_type.unwrap_or(SlideType::Content), position);
        self.slides.insert(position, slide.clone());
        self.renumber();
        self.touch();
        // Return the stored copy so the caller sees the final position.
        self.slides[position].clone()
    }

    /// Remove a slide by id and renumber the remainder.
    pub fn delete_slide(&mut self, slide_id: Uuid) -> Result<(), SlidesmithError> {
        let before = self.slides.len();
        self.slides.retain(|s| s.id != slide_id);
        if self.slides.len() == before {
            return Err(SlidesmithError::NotFound("Slide not found".into()));
        }
        self.renumber();
        self.touch();
        Ok(())
    }

    /// Rebuild the slide list in the exact order given.
    ///
    /// The order list is authoritative: ids present in the draft but
    /// absent from the list silently disappear; ids in the list that
    /// match no slide are ignored.
    pub fn reorder(&mut self, order: &[Uuid]) {
        let mut reordered = Vec::with_capacity(order.len());
        for id in order {
            if let Some(index) = self.slides.iter().position(|s| s.id == *id) {
                reordered.push(self.slides.remove(index));
            }
        }
        self.slides = reordered;
        self.renumber();
        self.touch();
    }

    /// Deep-copy the draft with fresh slide ids, a "(Copy)" title
    /// suffix, and status reset to `Draft`.
    pub fn duplicate(&self) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: self.owner_id,
            title: format!("{} (Copy)", self.title),
            topic: self.topic.clone(),
            language: self.language.clone(),
            theme_slug: self.theme_slug.clone(),
            slides: self
                .slides
                .iter()
                .map(|slide| Slide {
                    id: Uuid::new_v4(),
                    ..slide.clone()
                })
                .collect(),
            status: DraftStatus::Draft,
            edit_version: 0,
            last_edited_at: now,
            created_at: now,
        }
    }
}

/// Lightweight listing entry (no slide content).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSummary {
    pub id: Uuid,
    pub title: String,
    pub topic: String,
    pub theme_slug: String,
    pub slide_count: usize,
    pub status: DraftStatus,
    pub last_edited_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&PresentationDraft> for DraftSummary {
    fn from(draft: &PresentationDraft) -> Self {
        Self {
            id: draft.id,
            title: draft.title.clone(),
            topic: draft.topic.clone(),
            theme_slug: draft.theme_slug.clone(),
            slide_count: draft.slides.len(),
            status: draft.status.clone(),
            last_edited_at: draft.last_edited_at,
            created_at: draft.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draft_with(n: usize) -> PresentationDraft {
        let slides = (0..n)
            .map(|i| {
                let mut s = Slide::new_default(SlideType::Content, i);
                s.title = format!("Slide {i}");
                s
            })
            .collect();
        PresentationDraft::new(
            Uuid::new_v4(),
            "Deck".into(),
            "Topic".into(),
            "en".into(),
            "executive".into(),
            slides,
        )
    }

    fn positions(draft: &PresentationDraft) -> Vec<usize> {
        draft.slides.iter().map(|s| s.position).collect()
    }

    #[test]
    fn test_new_assigns_dense_positions() {
        let draft = draft_with(4);
        assert_eq!(positions(&draft), vec![0, 1, 2, 3]);
        assert_eq!(draft.status, DraftStatus::Draft);
    }

    #[test]
    fn test_delete_middle_renumbers() {
        let mut draft = draft_with(3);
        let middle = draft.slides[1].id;
        draft.delete_slide(middle).unwrap();
        assert_eq!(draft.slides.len(), 2);
        assert_eq!(positions(&draft), vec![0, 1]);
        assert_eq!(draft.slides[0].title, "Slide 0");
        assert_eq!(draft.slides[1].title, "Slide 2");
    }

    #[test]
    fn test_delete_unknown_slide_is_not_found() {
        let mut draft = draft_with(2);
        assert!(matches!(
            draft.delete_slide(Uuid::new_v4()),
            Err(SlidesmithError::NotFound(_))
        ));
    }

    #[test]
    fn test_reorder_drops_omitted_ids() {
        let mut draft = draft_with(3);
        let (a, b, c) = (draft.slides[0].id, draft.slides[1].id, draft.slides[2].id);
        draft.reorder(&[c, a]);
        assert_eq!(draft.slides.len(), 2);
        assert_eq!(draft.slides[0].id, c);
        assert_eq!(draft.slides[1].id, a);
        assert_eq!(positions(&draft), vec![0, 1]);
        assert!(!draft.slides.iter().any(|s| s.id == b));
    }

    #[test]
    fn test_reorder_ignores_unknown_ids() {
        let mut draft = draft_with(2);
        let (a, b) = (draft.slides[0].id, draft.slides[1].id);
        draft.reorder(&[b, Uuid::new_v4(), a]);
        assert_eq!(draft.slides.len(), 2);
        assert_eq!(draft.slides[0].id, b);
        assert_eq!(draft.slides[1].id, a);
    }

    #[test]
    fn test_add_slide_default_at_end() {
        let mut draft = draft_with(2);
        let slide = draft.add_slide(None, None);
        assert_eq!(slide.position, 2);
        assert_eq!(slide.slide_type, SlideType::Content);
        assert_eq!(slide.content, vec!["Add your content here".to_string()]);
        assert_eq!(positions(&draft), vec![0, 1, 2]);
    }

    #[test]
    fn test_add_slide_at_position_renumbers() {
        let mut draft = draft_with(2);
        let slide = draft.add_slide(Some(SlideType::Stats), Some(1));
        assert_eq!(slide.position, 1);
        assert_eq!(positions(&draft), vec![0, 1, 2]);
        assert_eq!(draft.slides[1].slide_type, SlideType::Stats);
    }

    #[test]
    fn test_update_slide_merges_patch() {
        let mut draft = draft_with(1);
        let id = draft.slides[0].id;
        let updated = draft
            .update_slide(
                id,
                SlidePatch {
                    title: Some("Renamed".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        // Unpatched fields survive the merge.
        assert_eq!(updated.content, vec!["Add your content here".to_string()]);
    }

    #[test]
    fn test_update_slide_unknown_id() {
        let mut draft = draft_with(1);
        assert!(draft
            .update_slide(Uuid::new_v4(), SlidePatch::default())
            .is_err());
    }

    #[test]
    fn test_duplicate_fresh_ids_and_copy_suffix() {
        let mut draft = draft_with(2);
        draft.status = DraftStatus::Completed;
        let copy = draft.duplicate();
        assert_eq!(copy.title, "Deck (Copy)");
        assert_eq!(copy.status, DraftStatus::Draft);
        assert_eq!(copy.slides.len(), 2);
        for (original, copied) in draft.slides.iter().zip(&copy.slides) {
            assert_ne!(original.id, copied.id);
            assert_eq!(original.title, copied.title);
        }
    }

    #[test]
    fn test_update_replaces_slides_and_renumbers() {
        let mut draft = draft_with(2);
        let replacement = vec![
            Slide::new_default(SlideType::Title, 7),
            Slide::new_default(SlideType::Closing, 7),
        ];
        draft.update(Some("Renamed".into()), Some(replacement)).unwrap();
        assert_eq!(draft.title, "Renamed");
        assert_eq!(positions(&draft), vec![0, 1]);
    }

    #[test]
    fn test_update_rejects_duplicate_slide_ids() {
        let mut draft = draft_with(2);
        let v0 = draft.edit_version;
        let dup = Slide::new_default(SlideType::Content, 0);
        let mut twin = Slide::new_default(SlideType::Content, 1);
        twin.id = dup.id;

        assert!(matches!(
            draft.update(None, Some(vec![dup, twin])),
            Err(SlidesmithError::Validation(_))
        ));
        // The draft is untouched by the rejected replacement.
        assert_eq!(draft.slides.len(), 2);
        assert_eq!(draft.edit_version, v0);
    }

    #[test]
    fn test_mutations_bump_edit_version() {
        let mut draft = draft_with(2);
        let v0 = draft.edit_version;
        draft.add_slide(None, None);
        let v1 = draft.edit_version;
        draft.reorder(&[draft.slides[0].id]);
        let v2 = draft.edit_version;
        assert!(v0 < v1 && v1 < v2);
    }

    #[test]
    fn test_chart_point_validity() {
        assert!(ChartPoint {
            label: Some("Q1".into()),
            value: Some(40.0)
        }
        .is_valid());
        assert!(!ChartPoint {
            label: Some("Q1".into()),
            value: None
        }
        .is_valid());
        assert!(!ChartPoint {
            label: None,
            value: Some(1.0)
        }
        .is_valid());
        assert!(!ChartPoint {
            label: Some("".into()),
            value: Some(1.0)
        }
        .is_valid());
    }
}
