//! AI outline generation.
//!
//! Draft creation asks an [`OutlineGenerator`] for an initial slide
//! structure. The production implementation calls a Gemini-style
//! JSON-over-HTTP endpoint; model output is treated as hostile input:
//! code fences are stripped, the outermost JSON object is extracted,
//! parsing is lenient, and the slide list is truncated to the
//! requested count. Any failure at any step falls back to a fixed
//! three-slide outline, so creating a draft never fails because a
//! model had a bad day.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::draft::{ChartPoint, LayoutHint, Quote, Slide, SlideType, Stat};
use crate::error::SlidesmithError;

/// Requested slide counts are clamped into this range.
pub const MIN_SLIDES: usize = 5;
pub const MAX_SLIDES: usize = 25;

/// A generated presentation structure, ready to seed a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub title: String,
    pub subtitle: Option<String>,
    pub slides: Vec<Slide>,
}

#[async_trait]
pub trait OutlineGenerator: Send + Sync {
    /// Produce an outline for a topic. Implementations must not fail
    /// for content reasons; degrade to [`fallback_outline`] instead.
    async fn generate(&self, topic: &str, language: &str, slide_count: usize) -> Outline;
}

/// The fixed outline used whenever generation cannot produce one:
/// title, introduction, closing.
pub fn fallback_outline(topic: &str) -> Outline {
    let slides = vec![
        raw_slide(SlideType::Title, topic, Some("An Overview"), &[]),
        raw_slide(
            SlideType::Content,
            "Introduction",
            None,
            &[
                "Welcome to this presentation",
                "Overview of key topics",
                "What you'll learn today",
            ],
        ),
        raw_slide(SlideType::Closing, "Thank You", None, &["Questions?"]),
    ];
    Outline {
        title: topic.to_string(),
        subtitle: Some("A Professional Presentation".to_string()),
        slides,
    }
}

fn raw_slide(slide_type: SlideType, title: &str, subtitle: Option<&str>, content: &[&str]) -> Slide {
    Slide {
        id: Uuid::new_v4(),
        slide_type,
        title: title.to_string(),
        subtitle: subtitle.map(str::to_string),
        content: content.iter().map(|c| c.to_string()).collect(),
        position: 0,
        layout: LayoutHint::Default,
        stats: Vec::new(),
        chart_data: Vec::new(),
        quote: None,
        notes: None,
    }
}

/// Lenient mirror of the model's JSON. Everything except the title is
/// optional; unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RawOutline {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    slides: Vec<RawSlide>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSlide {
    #[serde(rename = "type", default)]
    slide_type: Option<SlideType>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    content: Vec<String>,
    #[serde(default)]
    stats: Vec<Stat>,
    #[serde(default)]
    chart_data: Vec<ChartPoint>,
    #[serde(default)]
    quote: Option<Quote>,
    #[serde(default)]
    notes: Option<String>,
}

impl RawSlide {
    fn into_slide(self) -> Slide {
        Slide {
            id: Uuid::new_v4(),
            slide_type: self.slide_type.unwrap_or(SlideType::Content),
            title: self.title.unwrap_or_else(|| "New Slide".to_string()),
            subtitle: self.subtitle,
            content: self.content,
            position: 0,
            layout: LayoutHint::Default,
            stats: self.stats,
            chart_data: self.chart_data,
            quote: self.quote,
            notes: self.notes,
        }
    }
}

/// Strip markdown code fences and cut the text down to the outermost
/// JSON object. Models wrap their JSON in prose more often than not.
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse model output into an outline.
fn parse_outline(text: &str, topic: &str, slide_count: usize) -> Result<Outline, SlidesmithError> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let body = extract_json(cleaned.trim())
        .ok_or_else(|| SlidesmithError::Generation("no JSON object in model output".into()))?;
    let raw: RawOutline = serde_json::from_str(body)
        .map_err(|e| SlidesmithError::Generation(format!("model JSON did not parse: {e}")))?;

    if raw.slides.is_empty() {
        return Err(SlidesmithError::Generation("model returned no slides".into()));
    }

    let slides: Vec<Slide> = raw
        .slides
        .into_iter()
        .take(slide_count)
        .map(RawSlide::into_slide)
        .collect();

    Ok(Outline {
        title: raw.title.filter(|t| !t.is_empty()).unwrap_or_else(|| topic.to_string()),
        subtitle: raw.subtitle,
        slides,
    })
}

fn build_prompt(topic: &str, language: &str, slide_count: usize) -> String {
    let density = if slide_count <= 10 {
        "Each slide must include 4-8 detailed bullet points (max 15 words each)."
    } else {
        "Each slide must include 2-5 concise bullet points (max 8 words each)."
    };
    format!(
        "You are an expert presentation planner and content creator.\n\n\
         Task: Create an engaging, informative presentation about \"{topic}\" \
         in {language} language.\n\n\
         Target slide count: {slide_count}\n\n\
         {density}\n\n\
         Follow this structure strictly:\n\
         1. Title slide (always first)\n\
         2. 2-4 informative content slides\n\
         3. 1-2 stats, timeline, or chart slides if relevant\n\
         4. 1 quote or inspirational slide (optional)\n\
         5. Closing slide (always last)\n\n\
         Rules:\n\
         - Avoid generic titles; make each slide specific.\n\
         - Ensure logical flow across slides.\n\
         - Response must be valid JSON only (no markdown or explanations), \
         with keys: title, subtitle, slides[{{type, title, subtitle, content}}]."
    )
}

/// Gemini-backed generator. The HTTP client is built once by the
/// caller and injected.
pub struct GeminiOutlineGenerator {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GeminiOutlineGenerator {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent".to_string(),
        }
    }

    /// Override the endpoint, e.g. for a local mock server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn call_model(&self, prompt: &str) -> Result<String, SlidesmithError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": 0.7 },
        });
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| SlidesmithError::Generation(format!("model request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(SlidesmithError::Generation(format!(
                "model returned HTTP {}",
                response.status()
            )));
        }
        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SlidesmithError::Generation(format!("model response unreadable: {e}")))?;
        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| SlidesmithError::Generation("model response had no text part".into()))
    }
}

#[async_trait]
impl OutlineGenerator for GeminiOutlineGenerator {
    async fn generate(&self, topic: &str, language: &str, slide_count: usize) -> Outline {
        let slide_count = slide_count.clamp(MIN_SLIDES, MAX_SLIDES);
        let prompt = build_prompt(topic, language, slide_count);
        let attempt = async {
            let text = self.call_model(&prompt).await?;
            parse_outline(&text, topic, slide_count)
        };
        match attempt.await {
            Ok(outline) => {
                println!("[outline] generated {} slides for '{topic}'", outline.slides.len());
                outline
            }
            Err(e) => {
                eprintln!("[outline] generation failed ({e}), using fallback");
                fallback_outline(topic)
            }
        }
    }
}

/// Offline generator that always returns the fallback outline. Used by
/// the CLI when no API key is configured, and by tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGenerator;

#[async_trait]
impl OutlineGenerator for FallbackGenerator {
    async fn generate(&self, topic: &str, _language: &str, _slide_count: usize) -> Outline {
        fallback_outline(topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fallback_is_three_slides() {
        let outline = fallback_outline("Rust in Production");
        assert_eq!(outline.title, "Rust in Production");
        assert_eq!(outline.slides.len(), 3);
        assert_eq!(outline.slides[0].slide_type, SlideType::Title);
        assert_eq!(outline.slides[1].title, "Introduction");
        assert_eq!(outline.slides[2].slide_type, SlideType::Closing);
    }

    #[test]
    fn test_parse_strips_fences_and_prose() {
        let text = "Sure! Here's your deck:\n```json\n{\"title\": \"AI Today\", \
                    \"slides\": [{\"type\": \"title\", \"title\": \"AI Today\"}]}\n``` hope it helps";
        let outline = parse_outline(text, "fallback topic", 10).unwrap();
        assert_eq!(outline.title, "AI Today");
        assert_eq!(outline.slides.len(), 1);
    }

    #[test]
    fn test_parse_truncates_to_requested_count() {
        let slides: Vec<String> = (0..8)
            .map(|i| format!("{{\"type\": \"content\", \"title\": \"S{i}\"}}"))
            .collect();
        let text = format!("{{\"title\": \"T\", \"slides\": [{}]}}", slides.join(","));
        let outline = parse_outline(&text, "t", 5).unwrap();
        assert_eq!(outline.slides.len(), 5);
    }

    #[test]
    fn test_parse_fills_missing_title_from_topic() {
        let text = "{\"slides\": [{\"title\": \"Only slide\"}]}";
        let outline = parse_outline(text, "Deep Sea Mining", 10).unwrap();
        assert_eq!(outline.title, "Deep Sea Mining");
        // Missing type defaults to content.
        assert_eq!(outline.slides[0].slide_type, SlideType::Content);
    }

    #[test]
    fn test_parse_rejects_no_slides() {
        assert!(parse_outline("{\"title\": \"T\", \"slides\": []}", "t", 5).is_err());
        assert!(parse_outline("no json here at all", "t", 5).is_err());
    }

    #[test]
    fn test_extract_outermost_braces() {
        assert_eq!(extract_json("x {\"a\": {\"b\": 1}} y"), Some("{\"a\": {\"b\": 1}}"));
        assert_eq!(extract_json("} {"), None);
    }

    #[tokio::test]
    async fn test_generator_slides_get_fresh_ids() {
        let outline = FallbackGenerator.generate("Topic", "en", 5).await;
        let other = FallbackGenerator.generate("Topic", "en", 5).await;
        assert_ne!(outline.slides[0].id, other.slides[0].id);
    }
}
