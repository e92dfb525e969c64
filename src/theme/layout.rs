//! Per-slide-type layout configuration.
//!
//! A [`LayoutConfig`] is an ordered bundle of typed directives — shapes,
//! text bindings, bullet lists, column splits, grids — that the renderer
//! applies independently. Directives are plain serde data validated at
//! theme load time, so malformed theme files fail fast instead of being
//! silently skipped mid-render.
//!
//! Template substitution is deliberately closed: each directive kind has
//! its own small formatting function (`bullet_prefix`, `plan_line`,
//! `stat_text`) rather than a generic string-template engine.

use serde::{Deserialize, Serialize};

use crate::draft::Stat;
use crate::error::SlidesmithError;
use crate::render::ops::ShapeKind;

/// Which theme font a directive renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontType {
    Heading,
    #[default]
    Body,
}

/// Symbolic binding from a text directive to a slide field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextSource {
    #[serde(rename = "slide.title")]
    SlideTitle,
    #[serde(rename = "slide.subtitle")]
    SlideSubtitle,
}

/// Stroke description using a symbolic color key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    /// Color key resolved against the theme palette.
    pub color: String,
    #[serde(default = "default_line_width")]
    pub width: f64,
    /// "solid" (default) or "dash".
    #[serde(default)]
    pub dash: Option<String>,
}

fn default_line_width() -> f64 {
    1.0
}

/// A positioned shape. Fill and line colors are symbolic keys so a
/// theme swap re-colors every slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeSpec {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub line: Option<LineSpec>,
    #[serde(default)]
    pub rotate: f64,
    #[serde(default)]
    pub radius: f64,
}

/// A text box bound to a named slide field with a literal fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpec {
    pub source: TextSource,
    #[serde(default)]
    pub fallback: Option<String>,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(default)]
    pub font_type: FontType,
    pub font_size: f64,
    /// "bold" selects the heading bold weight.
    #[serde(default)]
    pub font_weight: Option<String>,
    pub color: String,
    #[serde(default)]
    pub align: crate::render::ops::Align,
    #[serde(default)]
    pub valign: crate::render::ops::VAlign,
}

impl TextSpec {
    pub fn is_bold(&self) -> bool {
        self.font_weight.as_deref() == Some("bold")
    }
}

/// Bullet list marker style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletKind {
    #[default]
    Bullet,
    Number,
    Dash,
}

/// How bullet rows are prefixed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BulletStyle {
    #[serde(rename = "type", default)]
    pub kind: BulletKind,
    /// Literal prefix for `bullet`/`dash`; for `number` an optional
    /// template that may contain `${number}`.
    #[serde(default)]
    pub prefix: Option<String>,
}

/// Z-order of a bullet row decoration relative to its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZIndex {
    #[default]
    Back,
    Front,
}

/// Background chip drawn behind (or over) each bullet row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDecoration {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub z_index: ZIndex,
    #[serde(rename = "type", default = "default_decoration_kind")]
    pub kind: ShapeKind,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub line: Option<LineSpec>,
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub padding: f64,
}

fn default_decoration_kind() -> ShapeKind {
    ShapeKind::Rect
}

/// List rendering of `slide.content` with an even vertical rhythm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletSpec {
    pub start_x: f64,
    pub start_y: f64,
    pub spacing_y: f64,
    pub w: f64,
    pub font_size: f64,
    #[serde(default)]
    pub font_type: FontType,
    pub color: String,
    #[serde(default)]
    pub style: BulletStyle,
    #[serde(default)]
    pub item_decoration: Option<ItemDecoration>,
}

/// Marker style for outline (plan) slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    #[default]
    Numbered,
    Dash,
    Icon,
}

/// Plan line formatting: a `format` template with `${number}` and
/// `${text}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStyle {
    #[serde(rename = "type", default)]
    pub kind: PlanKind,
    #[serde(default = "default_plan_format")]
    pub format: String,
    /// For `numbered`: marker template whose non-digit suffix carries
    /// over, e.g. "1)" yields markers 1), 2), 3).
    #[serde(default)]
    pub number_format: Option<String>,
    /// For `icon`: the literal marker glyph.
    #[serde(default)]
    pub icon: Option<String>,
}

fn default_plan_format() -> String {
    "${number} ${text}".to_string()
}

impl Default for PlanStyle {
    fn default() -> Self {
        Self {
            kind: PlanKind::Numbered,
            format: default_plan_format(),
            number_format: None,
            icon: None,
        }
    }
}

/// A differently-styled list renderer for outline slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSpec {
    pub start_x: f64,
    pub start_y: f64,
    pub spacing_y: f64,
    pub w: f64,
    pub font_size: f64,
    #[serde(default)]
    pub font_type: FontType,
    pub color: String,
    #[serde(default)]
    pub style: PlanStyle,
}

/// One side of a two-column content split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub start_x: f64,
    pub start_y: f64,
    pub spacing_y: f64,
    pub w: f64,
    pub font_size: f64,
    #[serde(default)]
    pub font_type: FontType,
    pub color: String,
    #[serde(default)]
    pub style: BulletStyle,
}

/// Stat-card / idea-card grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    pub columns: usize,
    pub base_x: f64,
    pub base_y: f64,
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub cell_w: f64,
    pub cell_h: f64,
    #[serde(default = "default_grid_shape")]
    pub shape: ShapeKind,
    #[serde(default)]
    pub shape_fill: Option<String>,
    pub font_size: f64,
    #[serde(default)]
    pub font_type: FontType,
    pub color: String,
    /// Template with `${label}`, `${value}`, `${description}` for stat
    /// cards. Defaults to "label\nvalue".
    #[serde(default)]
    pub text_format: Option<String>,
}

fn default_grid_shape() -> ShapeKind {
    ShapeKind::RoundRect
}

/// Position and color of the chart frame on chart slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Series color key; defaults to the theme primary.
    #[serde(default)]
    pub color: Option<String>,
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 1.5,
            w: 9.0,
            h: 4.0,
            color: None,
        }
    }
}

/// Step-flow rendering for timeline slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSpec {
    pub start_x: f64,
    pub y: f64,
    pub step_w: f64,
    pub step_h: f64,
    #[serde(default = "default_timeline_shape")]
    pub shape: ShapeKind,
    #[serde(default)]
    pub shape_fill: Option<String>,
    pub title_size: f64,
    pub desc_size: f64,
    #[serde(default)]
    pub font_type: FontType,
    pub title_color: String,
    pub desc_color: String,
}

fn default_timeline_shape() -> ShapeKind {
    ShapeKind::Pentagon
}

impl Default for TimelineSpec {
    fn default() -> Self {
        Self {
            start_x: 0.5,
            y: 2.8,
            step_w: 2.2,
            step_h: 1.0,
            shape: ShapeKind::Pentagon,
            shape_fill: None,
            title_size: 16.0,
            desc_size: 11.0,
            font_type: FontType::Body,
            title_color: "textDark".into(),
            desc_color: "textLight".into(),
        }
    }
}

/// The full directive bundle for one slide type.
///
/// Any subset of directives may be present; the renderer applies each
/// present directive independently, in a fixed order. Absence of a
/// directive is not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub shapes: Vec<ShapeSpec>,
    #[serde(default)]
    pub decorations: Vec<ShapeSpec>,
    #[serde(default)]
    pub title_text: Option<TextSpec>,
    #[serde(default)]
    pub subtitle_text: Option<TextSpec>,
    #[serde(default)]
    pub bullets: Option<BulletSpec>,
    #[serde(default)]
    pub plan: Option<PlanSpec>,
    #[serde(default)]
    pub left_column: Option<ColumnSpec>,
    #[serde(default)]
    pub right_column: Option<ColumnSpec>,
    #[serde(default)]
    pub grid: Option<GridSpec>,
    #[serde(default)]
    pub chart: Option<ChartSpec>,
    #[serde(default)]
    pub timeline: Option<TimelineSpec>,
}

impl LayoutConfig {
    /// Load-time validation so malformed theme data fails fast instead
    /// of being skipped at render time.
    pub fn validate(&self, slide_type: &str) -> Result<(), SlidesmithError> {
        if let Some(grid) = &self.grid {
            if grid.columns == 0 {
                return Err(SlidesmithError::Theme(format!(
                    "layout '{slide_type}': grid.columns must be at least 1"
                )));
            }
        }
        if let Some(bullets) = &self.bullets {
            if bullets.spacing_y <= 0.0 {
                return Err(SlidesmithError::Theme(format!(
                    "layout '{slide_type}': bullets.spacingY must be positive"
                )));
            }
        }
        if let Some(plan) = &self.plan {
            if !plan.style.format.contains("${text}") {
                return Err(SlidesmithError::Theme(format!(
                    "layout '{slide_type}': plan format must contain ${{text}}"
                )));
            }
        }
        for (name, col) in [("leftColumn", &self.left_column), ("rightColumn", &self.right_column)]
        {
            if let Some(col) = col {
                if col.spacing_y <= 0.0 {
                    return Err(SlidesmithError::Theme(format!(
                        "layout '{slide_type}': {name}.spacingY must be positive"
                    )));
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// FORMATTING HELPERS
// ============================================================================
//
// The substitution set is closed by design: one small function per
// directive kind, no generic templating.

/// Prefix for the bullet row at `index` (0-based).
pub fn bullet_prefix(style: &BulletStyle, index: usize) -> String {
    match style.kind {
        BulletKind::Bullet => style.prefix.clone().unwrap_or_else(|| "• ".to_string()),
        BulletKind::Dash => style.prefix.clone().unwrap_or_else(|| "- ".to_string()),
        BulletKind::Number => {
            let n = (index + 1).to_string();
            match &style.prefix {
                Some(template) if template.contains("${number}") => {
                    template.replace("${number}", &n)
                }
                Some(literal) => literal.clone(),
                None => format!("{n}. "),
            }
        }
    }
}

/// Marker for the plan row at `index` (0-based).
///
/// Numbered markers reuse the non-digit suffix of `numberFormat`, so a
/// format of "1)" yields 1), 2), 3).
pub fn plan_marker(style: &PlanStyle, index: usize) -> String {
    match style.kind {
        PlanKind::Numbered => {
            let suffix: String = style
                .number_format
                .as_deref()
                .unwrap_or("1.")
                .chars()
                .skip_while(|c| c.is_ascii_digit())
                .collect();
            format!("{}{}", index + 1, suffix)
        }
        PlanKind::Dash => "-".to_string(),
        PlanKind::Icon => style.icon.clone().unwrap_or_else(|| "→".to_string()),
    }
}

/// Substitute `${number}` and `${text}` in a plan format template.
pub fn plan_line(format: &str, marker: &str, text: &str) -> String {
    format.replace("${number}", marker).replace("${text}", text)
}

/// Text for one stat card, via `${label}`/`${value}`/`${description}`
/// substitution. Without a template: "label\nvalue".
pub fn stat_text(format: Option<&str>, stat: &Stat) -> String {
    match format {
        Some(template) => template
            .replace("${label}", &stat.label)
            .replace("${value}", &stat.value)
            .replace("${description}", stat.description.as_deref().unwrap_or("")),
        None => format!("{}\n{}", stat.label, stat.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_number_prefix_third_item() {
        let style = BulletStyle {
            kind: BulletKind::Number,
            prefix: None,
        };
        assert_eq!(bullet_prefix(&style, 2), "3. ");
    }

    #[test]
    fn test_number_prefix_template_override() {
        let style = BulletStyle {
            kind: BulletKind::Number,
            prefix: Some("${number}) ".into()),
        };
        assert_eq!(bullet_prefix(&style, 0), "1) ");
    }

    #[test]
    fn test_bullet_and_dash_prefixes() {
        let bullet = BulletStyle::default();
        assert_eq!(bullet_prefix(&bullet, 5), "• ");
        let dash = BulletStyle {
            kind: BulletKind::Dash,
            prefix: Some("– ".into()),
        };
        assert_eq!(bullet_prefix(&dash, 0), "– ");
    }

    #[test]
    fn test_plan_marker_number_format_suffix() {
        let style = PlanStyle {
            kind: PlanKind::Numbered,
            number_format: Some("1)".into()),
            ..Default::default()
        };
        assert_eq!(plan_marker(&style, 0), "1)");
        assert_eq!(plan_marker(&style, 2), "3)");
    }

    #[test]
    fn test_plan_line_substitution() {
        let line = plan_line("${number} — ${text}", "2.", "Key insights");
        assert_eq!(line, "2. — Key insights");
    }

    #[test]
    fn test_stat_text_default_and_template() {
        let stat = Stat {
            label: "Growth".into(),
            value: "45%".into(),
            description: Some("Year over year".into()),
            icon: None,
        };
        assert_eq!(stat_text(None, &stat), "Growth\n45%");
        assert_eq!(
            stat_text(Some("${value} ${label}: ${description}"), &stat),
            "45% Growth: Year over year"
        );
    }

    #[test]
    fn test_validate_rejects_zero_columns() {
        let config = LayoutConfig {
            grid: Some(GridSpec {
                columns: 0,
                base_x: 0.0,
                base_y: 0.0,
                spacing_x: 1.0,
                spacing_y: 1.0,
                cell_w: 1.0,
                cell_h: 1.0,
                shape: ShapeKind::Rect,
                shape_fill: None,
                font_size: 12.0,
                font_type: FontType::Body,
                color: "textDark".into(),
                text_format: None,
            }),
            ..Default::default()
        };
        assert!(config.validate("stats").is_err());
    }

    #[test]
    fn test_layout_config_json_roundtrip() {
        let json = r#"{
            "background": "background",
            "shapes": [{"type": "rect", "x": 8.5, "y": 0, "w": 1.5, "h": 1.5, "fill": "primary"}],
            "titleText": {
                "source": "slide.title", "x": 0.5, "y": 0.8, "w": 9, "h": 0.7,
                "fontType": "heading", "fontSize": 32, "fontWeight": "bold", "color": "textDark"
            },
            "bullets": {
                "startX": 1, "startY": 2, "spacingY": 0.5, "w": 8.5,
                "fontSize": 18, "color": "textDark",
                "style": {"type": "bullet", "prefix": "• "}
            }
        }"#;
        let config: LayoutConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate("content").is_ok());
        assert_eq!(config.shapes.len(), 1);
        assert!(config.title_text.as_ref().unwrap().is_bold());
        assert_eq!(config.bullets.as_ref().unwrap().style.kind, BulletKind::Bullet);
    }
}
