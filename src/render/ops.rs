//! # Draw Operations
//!
//! This module defines the intermediate representation emitted by the
//! layout renderer. A rendered slide is a sequence of draw operations
//! that can be inspected, tested, and compiled to an output document.
//!
//! ## Design Philosophy
//!
//! The ops sit between declarative theme layouts and the binary
//! document encoder:
//!
//! ```text
//! Slide + LayoutConfig → DrawOps (inspectable) → Encoder → Bytes
//! ```
//!
//! Ops are encoder-agnostic: they assume only that shape, text, and
//! chart primitives exist, never a specific output format.

use serde::{Deserialize, Serialize};

/// Slide width in slide units (16:9 page).
pub const PAGE_W: f64 = 10.0;
/// Slide height in slide units (16:9 page).
pub const PAGE_H: f64 = 5.625;

/// Page geometry handed to the encoder alongside the ops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl Default for PageSize {
    fn default() -> Self {
        Self {
            width: PAGE_W,
            height: PAGE_H,
        }
    }
}

/// Geometric shape kinds a theme may place on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Rect,
    RoundRect,
    Ellipse,
    Triangle,
    Line,
    Diamond,
    Pentagon,
    Hexagon,
    Star,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Stroke applied to a shape outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Resolved color value (e.g. "#1F2937").
    pub color: String,
    pub width: f64,
    /// Dash style: "solid" or "dash".
    #[serde(default)]
    pub dash: Option<String>,
}

/// Font resolved from the theme (family plus optional weight name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFont {
    pub family: String,
    #[serde(default)]
    pub weight: Option<String>,
}

/// One point of a rendered chart series. Both fields are guaranteed
/// present: the renderer filters out incomplete points before emitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// A single abstract drawing instruction.
///
/// All positions and sizes are in slide units on a [`PageSize`] page.
/// Colors are concrete resolved values; symbolic color keys never
/// escape the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Place a filled and/or stroked shape.
    Shape {
        kind: ShapeKind,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        #[serde(default)]
        fill: Option<String>,
        #[serde(default)]
        line: Option<Stroke>,
        #[serde(default)]
        rotate: f64,
        /// Corner radius for rounded shapes.
        #[serde(default)]
        radius: f64,
    },

    /// Place a text box.
    Text {
        text: String,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        font: ResolvedFont,
        size: f64,
        #[serde(default)]
        bold: bool,
        color: String,
        #[serde(default)]
        align: Align,
        #[serde(default)]
        valign: VAlign,
    },

    /// Place a single-series bar chart. Never emitted with an empty
    /// point list.
    Chart {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        points: Vec<SeriesPoint>,
        color: String,
    },
}

impl DrawOp {
    /// Whether this op places visible text.
    pub fn is_text(&self) -> bool {
        matches!(self, DrawOp::Text { .. })
    }

    /// The text content, if this is a text op.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_is_16_by_9() {
        let page = PageSize::default();
        assert!((page.width / page.height - 16.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_op_serde_tagging() {
        let op = DrawOp::Shape {
            kind: ShapeKind::Rect,
            x: 0.0,
            y: 0.0,
            w: 1.0,
            h: 1.0,
            fill: Some("#FFFFFF".into()),
            line: None,
            rotate: 0.0,
            radius: 0.0,
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], "shape");
        assert_eq!(json["kind"], "rect");
        let back: DrawOp = serde_json::from_value(json).unwrap();
        assert_eq!(back, op);
    }

    #[test]
    fn test_text_content_helper() {
        let op = DrawOp::Text {
            text: "Hello".into(),
            x: 0.0,
            y: 0.0,
            w: 1.0,
            h: 1.0,
            font: ResolvedFont {
                family: "Arial".into(),
                weight: None,
            },
            size: 12.0,
            bold: false,
            color: "#000000".into(),
            align: Align::Left,
            valign: VAlign::Top,
        };
        assert!(op.is_text());
        assert_eq!(op.text_content(), Some("Hello"));
    }
}
