//! # HTTP Server
//!
//! REST surface over the draft stores and the export pipeline.
//!
//! ## Usage
//!
//! ```bash
//! slidesmith serve --listen 0.0.0.0:8080 --uploads ./uploads
//! ```
//!
//! All draft and presentation routes require an
//! `Authorization: Bearer <token>` header obtained from
//! `/api/users/register` or `/api/users/login`. Theme routes are
//! public.

mod handlers;
mod state;

pub use state::{AppState, ServerConfig};

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::SlidesmithError;

/// Build the application router over shared state. Split out from
/// [`serve`] so tests can drive the router without binding a socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Accounts
        .route("/api/users/register", post(handlers::users::register))
        .route("/api/users/login", post(handlers::users::login))
        .route("/api/users/me", get(handlers::users::me))
        // Themes
        .route("/api/themes", get(handlers::themes::list))
        .route("/api/themes/:slug", get(handlers::themes::get))
        // Drafts
        .route(
            "/api/drafts",
            post(handlers::drafts::create).get(handlers::drafts::list),
        )
        .route(
            "/api/drafts/:id",
            get(handlers::drafts::get)
                .put(handlers::drafts::update)
                .delete(handlers::drafts::delete),
        )
        .route("/api/drafts/:id/duplicate", post(handlers::drafts::duplicate))
        .route("/api/drafts/:id/reorder", put(handlers::drafts::reorder))
        .route("/api/drafts/:id/slides", post(handlers::drafts::add_slide))
        .route(
            "/api/drafts/:id/slides/:slide_id",
            put(handlers::drafts::update_slide).delete(handlers::drafts::delete_slide),
        )
        .route("/api/drafts/:id/export", post(handlers::drafts::export))
        // Presentations
        .route("/api/presentations", get(handlers::presentations::list))
        .route("/api/presentations/:id", get(handlers::presentations::get))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: ServerConfig) -> Result<(), SlidesmithError> {
    let listen_addr = config.listen_addr.clone();
    let state = Arc::new(AppState::new(config));
    let app = router(state);

    println!("Slidesmith HTTP server starting...");
    println!("Listening on: {listen_addr}");

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| SlidesmithError::Io(std::io::Error::other(format!("server error: {e}"))))?;

    Ok(())
}
