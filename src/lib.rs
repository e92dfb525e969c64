//! # Slidesmith - Presentation Authoring Backend
//!
//! Slidesmith turns a topic into an editable slide deck and renders it
//! into a downloadable document. It provides:
//!
//! - **Theme descriptors**: named palettes, fonts, and per-slide-type
//!   layout directives, validated at load time
//! - **Draft model**: positional slide editing with dense renumbering
//! - **Layout renderer**: pure slide-to-draw-ops rendering
//! - **Assembly**: the export pipeline with quota gates, status state
//!   machine, and append-only presentation records
//!
//! ## Quick Start
//!
//! ```
//! use slidesmith::draft::{Slide, SlideType};
//! use slidesmith::render::render_slide;
//! use slidesmith::theme::ThemeRegistry;
//!
//! let registry = ThemeRegistry::with_builtin();
//! let theme = registry.by_slug("executive").unwrap();
//!
//! let mut slide = Slide::new_default(SlideType::Content, 0);
//! slide.title = "Why Rust".to_string();
//! slide.content = vec!["Fearless concurrency".to_string()];
//!
//! let ops = render_slide(&slide, theme);
//! assert!(!ops.is_empty());
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`theme`] | Theme descriptors, layout directives, built-in themes |
//! | [`draft`] | Slides, drafts, editing operations, draft store |
//! | [`render`] | Layout renderer and draw-op IR |
//! | [`encode`] | Deck encoding to the binary container |
//! | [`assemble`] | Export pipeline and presentation records |
//! | [`outline`] | AI outline generation with fixed fallback |
//! | [`account`] | Users, tokens, export quota |
//! | [`storage`] | Object storage backends |
//! | [`thumbnail`] | Slide preview approximation |
//! | [`server`] | Axum HTTP surface |
//! | [`error`] | Error types |

pub mod account;
pub mod assemble;
pub mod draft;
pub mod encode;
pub mod error;
pub mod outline;
pub mod render;
pub mod server;
pub mod storage;
pub mod theme;
pub mod thumbnail;

// Re-exports for convenience
pub use error::SlidesmithError;
pub use render::render_slide;
pub use theme::{ThemeDescriptor, ThemeRegistry};
