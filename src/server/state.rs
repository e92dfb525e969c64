//! Server state and configuration.

use std::sync::Arc;

use crate::account::UserStore;
use crate::assemble::{Exporter, PresentationStore};
use crate::draft::DraftStore;
use crate::encode::DeckEncoder;
use crate::outline::{FallbackGenerator, GeminiOutlineGenerator, OutlineGenerator};
use crate::storage::{LocalDiskStorage, ObjectStorage};
use crate::theme::ThemeRegistry;
use crate::thumbnail::{NullRasterizer, SlideRasterizer};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Directory exported decks and thumbnails are written to.
    pub uploads_dir: String,
    /// Public base URL the uploads directory is served under.
    pub base_url: String,
    /// Gemini API key; without one, outline generation uses the fixed
    /// fallback outline.
    pub gemini_api_key: Option<String>,
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub users: UserStore,
    pub drafts: DraftStore,
    pub presentations: PresentationStore,
    pub themes: Arc<ThemeRegistry>,
    pub outline: Arc<dyn OutlineGenerator>,
    pub storage: Arc<dyn ObjectStorage>,
    pub rasterizer: Arc<dyn SlideRasterizer>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let outline: Arc<dyn OutlineGenerator> = match &config.gemini_api_key {
            Some(key) => {
                let client = reqwest::Client::builder()
                    .user_agent("slidesmith/0.1")
                    .build()
                    .expect("default TLS backend available");
                Arc::new(GeminiOutlineGenerator::new(client, key.clone()))
            }
            None => {
                println!("[server] no Gemini API key, outlines use the fallback structure");
                Arc::new(FallbackGenerator)
            }
        };
        Self {
            storage: Arc::new(LocalDiskStorage::new(
                config.uploads_dir.clone(),
                config.base_url.clone(),
            )),
            rasterizer: Arc::new(NullRasterizer { fail: true }),
            outline,
            users: UserStore::new(),
            drafts: DraftStore::new(),
            presentations: PresentationStore::new(),
            themes: Arc::new(ThemeRegistry::with_builtin()),
            config,
        }
    }

    /// Assemble an exporter over this state's stores and collaborators.
    pub fn exporter(&self) -> Exporter {
        Exporter {
            drafts: self.drafts.clone(),
            users: self.users.clone(),
            presentations: self.presentations.clone(),
            themes: self.themes.clone(),
            encoder: Arc::new(DeckEncoder),
            storage: self.storage.clone(),
            rasterizer: self.rasterizer.clone(),
        }
    }
}
