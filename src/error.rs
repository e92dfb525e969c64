//! # Error Types
//!
//! This module defines error types used throughout the slidesmith library.
//!
//! The taxonomy follows the recovery policy of the export pipeline:
//! generation and per-slide render problems are absorbed with local
//! fallbacks and never reach the caller, while storage, quota, and
//! lookup failures always propagate.

use thiserror::Error;

/// Main error type for slidesmith operations
#[derive(Debug, Error)]
pub enum SlidesmithError {
    /// Draft, slide, or theme reference does not resolve for the caller.
    /// Deliberately does not distinguish "exists but not yours" from
    /// "does not exist".
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-premium user at or above the free generation limit.
    #[error("Free limit reached: {0}")]
    QuotaExceeded(String),

    /// Theme gated behind a premium subscription.
    #[error("Premium required: {0}")]
    PremiumRequired(String),

    /// AI outline step failed. Recovered locally via the fallback
    /// outline; only carried internally.
    #[error("Generation error: {0}")]
    Generation(String),

    /// The rendered document could not be produced. Slide-level
    /// problems degrade to fallback ops instead of raising this.
    #[error("Render error: {0}")]
    Render(String),

    /// Upload to external storage failed after a successful render.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Malformed input or theme data.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Theme descriptor failed load-time validation.
    #[error("Theme error: {0}")]
    Theme(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
