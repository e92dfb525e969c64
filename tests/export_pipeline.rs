//! # Export Pipeline Tests
//!
//! End-to-end coverage of draft creation through encoded output:
//! outline fallback, editing invariants across the store, the full
//! export state machine, and the decoded container contents.

use std::io::Read;
use std::sync::Arc;

use flate2::read::ZlibDecoder;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use slidesmith::account::{User, UserStore};
use slidesmith::assemble::{render_deck, Exporter, PresentationStore};
use slidesmith::draft::{DraftStatus, DraftStore, PresentationDraft, Slide, SlideType};
use slidesmith::encode::{DeckEncoder, DocumentEncoder, RenderedSlide, MAGIC};
use slidesmith::outline::{FallbackGenerator, OutlineGenerator};
use slidesmith::storage::MemoryStorage;
use slidesmith::theme::ThemeRegistry;
use slidesmith::thumbnail::NullRasterizer;

fn exporter() -> Exporter {
    Exporter {
        drafts: DraftStore::new(),
        users: UserStore::new(),
        presentations: PresentationStore::new(),
        themes: Arc::new(ThemeRegistry::with_builtin()),
        encoder: Arc::new(DeckEncoder),
        storage: Arc::new(MemoryStorage::new()),
        rasterizer: Arc::new(NullRasterizer { fail: false }),
    }
}

/// A five-slide draft covering distinct layout kinds.
fn five_slide_draft(owner: Uuid) -> PresentationDraft {
    let types = [
        SlideType::Title,
        SlideType::Plan,
        SlideType::Content,
        SlideType::Stats,
        SlideType::Closing,
    ];
    let slides = types
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let mut s = Slide::new_default(*t, i);
            s.title = format!("Slide {i}");
            s
        })
        .collect();
    PresentationDraft::new(
        owner,
        "Quarterly Review".into(),
        "Q3 results".into(),
        "en".into(),
        "executive".into(),
        slides,
    )
}

#[tokio::test]
async fn five_slide_export_end_to_end() {
    let exporter = exporter();
    let user = User::new("Ada", "ada@example.com");
    let owner = user.id;
    exporter.users.register(user).await;

    let draft = five_slide_draft(owner);
    let draft_id = draft.id;
    exporter.drafts.insert(draft).await;

    let record = exporter.export(owner, draft_id).await.unwrap();

    // Exactly n rendered slides for an n-slide draft.
    assert_eq!(record.slide_count, 5);
    // Counter moved by exactly one.
    assert_eq!(exporter.users.get(owner).await.unwrap().presentations_count, 1);
    // Draft reached Completed.
    assert_eq!(
        exporter.drafts.get(owner, draft_id).await.unwrap().status,
        DraftStatus::Completed
    );
    // The record is listed for its owner.
    let listed = exporter.presentations.list(owner).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, record.id);
}

#[tokio::test]
async fn encoded_container_holds_all_slides_in_order() {
    let theme = ThemeRegistry::with_builtin()
        .by_slug("executive")
        .unwrap()
        .clone();
    let draft = five_slide_draft(Uuid::new_v4());
    let deck = render_deck(&draft, &theme);
    let bytes = DeckEncoder.encode(&deck).unwrap();

    assert_eq!(&bytes[0..4], MAGIC);

    let mut json = Vec::new();
    ZlibDecoder::new(&bytes[26..]).read_to_end(&mut json).unwrap();
    let slides: Vec<RenderedSlide> = serde_json::from_slice(&json).unwrap();

    assert_eq!(slides.len(), 5);
    let expected: Vec<Uuid> = draft.slides.iter().map(|s| s.id).collect();
    let decoded: Vec<Uuid> = slides.iter().map(|s| s.slide_id).collect();
    assert_eq!(decoded, expected);
    // Every slide rendered to something.
    assert!(slides.iter().all(|s| !s.ops.is_empty()));
}

#[tokio::test]
async fn reorder_then_export_follows_new_order() {
    let exporter = exporter();
    let user = User::new("Ada", "ada@example.com");
    let owner = user.id;
    exporter.users.register(user).await;

    let draft = five_slide_draft(owner);
    let draft_id = draft.id;
    let ids: Vec<Uuid> = draft.slides.iter().map(|s| s.id).collect();
    exporter.drafts.insert(draft).await;

    // Move the closing slide to the front and drop the stats slide.
    let new_order = vec![ids[4], ids[0], ids[1], ids[2]];
    exporter
        .drafts
        .mutate(owner, draft_id, |d| {
            d.reorder(&new_order);
            Ok(())
        })
        .await
        .unwrap();

    let record = exporter.export(owner, draft_id).await.unwrap();
    assert_eq!(record.slide_count, 4);

    let draft = exporter.drafts.get(owner, draft_id).await.unwrap();
    let positions: Vec<usize> = draft.slides.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);
    assert_eq!(draft.slides[0].id, ids[4]);
}

#[tokio::test]
async fn outline_created_draft_is_exportable() {
    let exporter = exporter();
    let user = User::new("Ada", "ada@example.com");
    let owner = user.id;
    exporter.users.register(user).await;

    // FallbackGenerator stands in for the model; creation never fails.
    let outline = FallbackGenerator.generate("Rust at the Edge", "en", 8).await;
    assert_eq!(outline.slides.len(), 3);

    let draft = PresentationDraft::new(
        owner,
        outline.title.clone(),
        "Rust at the Edge".into(),
        "en".into(),
        "executive".into(),
        outline.slides,
    );
    let draft_id = draft.id;
    exporter.drafts.insert(draft).await;

    let record = exporter.export(owner, draft_id).await.unwrap();
    assert_eq!(record.slide_count, 3);
    assert_eq!(record.title, "Rust at the Edge");
}

#[tokio::test]
async fn failed_export_is_retriable() {
    let failing = Exporter {
        storage: Arc::new(MemoryStorage::failing("bucket unavailable")),
        ..exporter()
    };
    let user = User::new("Ada", "ada@example.com");
    let owner = user.id;
    failing.users.register(user).await;
    let draft = five_slide_draft(owner);
    let draft_id = draft.id;
    failing.drafts.insert(draft).await;

    assert!(failing.export(owner, draft_id).await.is_err());
    let status = failing.drafts.get(owner, draft_id).await.unwrap().status;
    assert!(matches!(status, DraftStatus::Failed(_)));

    // A fresh request against working storage succeeds; no automatic
    // retry happened in between.
    let retry = Exporter {
        drafts: failing.drafts.clone(),
        users: failing.users.clone(),
        presentations: failing.presentations.clone(),
        ..exporter()
    };
    let record = retry.export(owner, draft_id).await.unwrap();
    assert_eq!(record.slide_count, 5);
    assert_eq!(retry.users.get(owner).await.unwrap().presentations_count, 1);
}

#[tokio::test]
async fn duplicate_draft_exports_independently() {
    let exporter = exporter();
    let mut user = User::new("Ada", "ada@example.com");
    user.is_premium = true;
    let owner = user.id;
    exporter.users.register(user).await;

    let draft = five_slide_draft(owner);
    let draft_id = draft.id;
    exporter.drafts.insert(draft.clone()).await;
    let copy = draft.duplicate();
    let copy_id = copy.id;
    exporter.drafts.insert(copy).await;

    let first = exporter.export(owner, draft_id).await.unwrap();
    let second = exporter.export(owner, copy_id).await.unwrap();
    assert_eq!(first.title, "Quarterly Review");
    assert_eq!(second.title, "Quarterly Review (Copy)");
    assert_eq!(exporter.presentations.count(owner).await, 2);
}
