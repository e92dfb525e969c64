//! # Theme Descriptors
//!
//! A theme is a named bundle of colors, fonts, and per-slide-type
//! layout directives. Themes are pure lookup structures: the renderer
//! consults them, never mutates them, so a loaded theme is safely
//! shared across concurrent exports.
//!
//! Colors are referenced symbolically everywhere else in the system
//! ("color keys"); only [`ThemeDescriptor::resolve_color`] turns a key
//! into a concrete value, falling back to the theme's default text
//! color for unknown keys.

pub mod builtin;
pub mod layout;

pub use layout::LayoutConfig;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::draft::SlideType;
use crate::error::SlidesmithError;
use crate::render::ops::ResolvedFont;
use layout::FontType;

/// Color keys every theme must define.
const REQUIRED_COLORS: &[&str] = &[
    "primary",
    "secondary",
    "accent",
    "background",
    "textDark",
    "textLight",
];

/// One theme font: family plus optional named weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    #[serde(default)]
    pub weight: Option<String>,
}

/// Heading and body font pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeFonts {
    pub heading: FontSpec,
    pub body: FontSpec,
}

/// A complete theme descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDescriptor {
    /// Unique slug, e.g. "executive".
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    /// Named palette. Keys are referenced symbolically by layouts.
    pub colors: BTreeMap<String, String>,
    pub fonts: ThemeFonts,
    /// Slide-type tag → layout directives.
    pub layouts: BTreeMap<SlideType, LayoutConfig>,
    #[serde(default)]
    pub preview_image_url: Option<String>,
}

impl ThemeDescriptor {
    /// Validate a theme at load time. An empty `layouts` map is fatal:
    /// nothing would be renderable.
    pub fn validate(&self) -> Result<(), SlidesmithError> {
        if self.id.is_empty() {
            return Err(SlidesmithError::Theme("theme id must not be empty".into()));
        }
        if self.layouts.is_empty() {
            return Err(SlidesmithError::Theme(format!(
                "theme '{}' has no layouts, nothing is renderable",
                self.id
            )));
        }
        for key in REQUIRED_COLORS {
            if !self.colors.contains_key(*key) {
                return Err(SlidesmithError::Theme(format!(
                    "theme '{}' is missing required color '{}'",
                    self.id, key
                )));
            }
        }
        for (slide_type, config) in &self.layouts {
            config.validate(slide_type.as_str())?;
        }
        Ok(())
    }

    /// Layout directives for a slide type, if the theme defines them.
    pub fn layout(&self, slide_type: SlideType) -> Option<&LayoutConfig> {
        self.layouts.get(&slide_type)
    }

    /// Resolve a symbolic color key to a concrete value. Unknown keys
    /// fall back to the theme's default text color.
    pub fn resolve_color(&self, key: &str) -> String {
        self.colors
            .get(key)
            .cloned()
            .unwrap_or_else(|| self.default_text_color())
    }

    /// The theme's default text color ("textDark", with a hard black
    /// fallback if even that is absent).
    pub fn default_text_color(&self) -> String {
        self.colors
            .get("textDark")
            .cloned()
            .unwrap_or_else(|| "#000000".to_string())
    }

    /// Resolve a font reference to a concrete family/weight pair.
    pub fn resolve_font(&self, font_type: FontType) -> ResolvedFont {
        let spec = match font_type {
            FontType::Heading => &self.fonts.heading,
            FontType::Body => &self.fonts.body,
        };
        ResolvedFont {
            family: spec.family.clone(),
            weight: spec.weight.clone(),
        }
    }
}

/// In-memory theme registry seeded at startup.
///
/// Read-only after construction, so it is shared across handlers
/// without locking.
pub struct ThemeRegistry {
    themes: Vec<ThemeDescriptor>,
}

impl ThemeRegistry {
    /// Build a registry from descriptors, validating each one.
    pub fn new(themes: Vec<ThemeDescriptor>) -> Result<Self, SlidesmithError> {
        for theme in &themes {
            theme.validate()?;
        }
        Ok(Self { themes })
    }

    /// Registry seeded with the built-in themes.
    pub fn with_builtin() -> Self {
        // Built-in themes are validated by tests; a failure here is a
        // programming error, not a runtime condition.
        Self::new(builtin::builtin_themes()).expect("built-in themes must validate")
    }

    /// Look up a theme by slug.
    pub fn by_slug(&self, slug: &str) -> Option<&ThemeDescriptor> {
        self.themes.iter().find(|t| t.id == slug)
    }

    /// All registered themes.
    pub fn all(&self) -> &[ThemeDescriptor] {
        &self.themes
    }
}
