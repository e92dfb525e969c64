//! Slide thumbnails.
//!
//! A thumbnail is a best-effort preview: we build a small HTML
//! approximation of the slide, hand it to an injected
//! [`SlideRasterizer`], and upload the image. Every failure along that
//! path degrades to a deterministic placeholder URL derived from the
//! slide title and the theme's primary color. [`generate`] never
//! returns an error.

use async_trait::async_trait;

use crate::draft::Slide;
use crate::error::SlidesmithError;
use crate::storage::ObjectStorage;
use crate::theme::ThemeDescriptor;

/// Renders an HTML snippet to image bytes. Implementations typically
/// wrap a headless browser; tests use a stub.
#[async_trait]
pub trait SlideRasterizer: Send + Sync {
    /// Rasterize HTML at the given pixel size, returning PNG bytes.
    async fn rasterize(&self, html: &str, width: u32, height: u32)
        -> Result<Vec<u8>, SlidesmithError>;
}

/// Thumbnail pixel size (16:9).
pub const THUMB_W: u32 = 640;
pub const THUMB_H: u32 = 360;

/// Generate a thumbnail URL for a slide. Infallible by contract:
/// rasterizer or upload failures fall back to [`placeholder_url`].
pub async fn generate(
    slide: &Slide,
    theme: &ThemeDescriptor,
    rasterizer: &dyn SlideRasterizer,
    storage: &dyn ObjectStorage,
) -> String {
    let html = slide_html(slide, theme);
    let attempt = async {
        let png = rasterizer.rasterize(&html, THUMB_W, THUMB_H).await?;
        storage.upload(png, "thumbnails", "slide.png").await
    };
    match attempt.await {
        Ok(stored) => stored.url,
        Err(e) => {
            eprintln!("[thumbnail] falling back to placeholder: {e}");
            placeholder_url(&slide.title, &theme.resolve_color("primary"))
        }
    }
}

/// Rough HTML rendering of a slide: background, title, and up to four
/// content lines. This is an approximation for preview purposes, not a
/// faithful re-render.
pub fn slide_html(slide: &Slide, theme: &ThemeDescriptor) -> String {
    let background = theme.resolve_color("background");
    let heading = theme.resolve_color("textDark");
    let accent = theme.resolve_color("primary");
    let heading_font = &theme.fonts.heading.family;
    let body_font = &theme.fonts.body.family;

    let mut body = String::new();
    for line in slide.content.iter().take(4) {
        body.push_str(&format!(
            "<li style=\"margin-bottom:4px\">{}</li>",
            escape_html(line)
        ));
    }

    format!(
        "<div style=\"width:{THUMB_W}px;height:{THUMB_H}px;background:{background};\
         padding:24px;box-sizing:border-box;overflow:hidden\">\
         <div style=\"height:4px;background:{accent};margin-bottom:16px\"></div>\
         <h1 style=\"font-family:'{heading_font}',sans-serif;color:{heading};\
         font-size:28px;margin:0 0 12px\">{}</h1>\
         <ul style=\"font-family:'{body_font}',sans-serif;color:{heading};\
         font-size:14px;padding-left:20px;margin:0\">{body}</ul></div>",
        escape_html(&slide.title)
    )
}

/// Deterministic fallback thumbnail. Same title and color always yield
/// the same URL.
pub fn placeholder_url(title: &str, primary_color: &str) -> String {
    let color = primary_color.trim_start_matches('#');
    let text = percent_encode(if title.is_empty() { "Slide" } else { title });
    format!("https://placehold.co/{THUMB_W}x{THUMB_H}/{color}/FFFFFF?text={text}")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn percent_encode(text: &str) -> String {
    let mut out = String::new();
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Rasterizer stub returning a fixed buffer, for tests and for running
/// without a browser attached.
pub struct NullRasterizer {
    /// When true, every rasterize call fails.
    pub fail: bool,
}

#[async_trait]
impl SlideRasterizer for NullRasterizer {
    async fn rasterize(
        &self,
        _html: &str,
        _width: u32,
        _height: u32,
    ) -> Result<Vec<u8>, SlidesmithError> {
        if self.fail {
            Err(SlidesmithError::Render("no rasterizer attached".into()))
        } else {
            // Minimal valid PNG signature; enough for pipeline tests.
            Ok(vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'])
        }
    }
}
