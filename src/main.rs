//! # Slidesmith CLI
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! slidesmith serve --listen 0.0.0.0:8080 --uploads ./uploads
//!
//! # List built-in themes
//! slidesmith themes
//!
//! # Render and encode a draft file offline
//! slidesmith export --draft draft.json --theme executive --out deck.sldk
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use slidesmith::assemble::render_deck;
use slidesmith::draft::PresentationDraft;
use slidesmith::encode::{DeckEncoder, DocumentEncoder};
use slidesmith::server::{serve, ServerConfig};
use slidesmith::theme::ThemeRegistry;
use slidesmith::SlidesmithError;

/// Slidesmith - presentation authoring backend
#[derive(Parser, Debug)]
#[command(name = "slidesmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Directory exported files are written to
        #[arg(long, default_value = "./uploads")]
        uploads: String,

        /// Public base URL the uploads directory is served under
        #[arg(long, default_value = "http://localhost:8080/uploads")]
        base_url: String,

        /// Gemini API key (falls back to $GEMINI_API_KEY; without
        /// either, outlines use the fixed fallback structure)
        #[arg(long)]
        gemini_key: Option<String>,
    },

    /// List built-in themes
    Themes,

    /// Render a draft file and encode it, without the server
    Export {
        /// Path to a draft JSON file
        #[arg(long)]
        draft: PathBuf,

        /// Theme slug to render with (overrides the draft's theme)
        #[arg(long)]
        theme: Option<String>,

        /// Output file
        #[arg(long, default_value = "deck.sldk")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), SlidesmithError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            uploads,
            base_url,
            gemini_key,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                uploads_dir: uploads,
                base_url,
                gemini_api_key: gemini_key.or_else(|| std::env::var("GEMINI_API_KEY").ok()),
            };
            serve(config).await
        }

        Commands::Themes => {
            let registry = ThemeRegistry::with_builtin();
            for theme in registry.all() {
                let tier = if theme.is_premium { "premium" } else { "free" };
                println!(
                    "{:<12} {:<14} {tier:<8} {}",
                    theme.id,
                    theme.name,
                    theme.description.as_deref().unwrap_or("")
                );
            }
            Ok(())
        }

        Commands::Export { draft, theme, out } => {
            let raw = std::fs::read_to_string(&draft)?;
            let draft: PresentationDraft = serde_json::from_str(&raw)
                .map_err(|e| SlidesmithError::Validation(format!("draft did not parse: {e}")))?;

            let registry = ThemeRegistry::with_builtin();
            let slug = theme.as_deref().unwrap_or(&draft.theme_slug);
            let descriptor = registry
                .by_slug(slug)
                .ok_or_else(|| SlidesmithError::NotFound(format!("theme '{slug}' not found")))?;

            let deck = render_deck(&draft, descriptor);
            let bytes = DeckEncoder.encode(&deck)?;
            std::fs::write(&out, &bytes)?;
            println!(
                "Wrote {} slides ({} bytes) to {}",
                deck.slide_count(),
                bytes.len(),
                out.display()
            );
            Ok(())
        }
    }
}
