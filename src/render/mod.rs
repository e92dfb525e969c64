//! # Layout Renderer
//!
//! Turns one abstract slide plus the theme's matching [`LayoutConfig`]
//! into an ordered list of [`DrawOp`]s. This is a pure function: no
//! I/O, no hidden state, structurally identical output for identical
//! input.
//!
//! Directives are applied in a fixed order — background, base shapes,
//! decorations, title/subtitle text, bullets, plan, column split,
//! grid, chart, timeline. Each step only runs when the directive is
//! present; absence is never an error.
//!
//! A slide whose type has no layout entry falls back to rendering its
//! title alone; a slide that renders to nothing at all is substituted
//! by [`fallback_slide_ops`] so one malformed slide never leaves a
//! hole in the document.

pub mod ops;

pub use ops::{Align, DrawOp, PageSize, ResolvedFont, SeriesPoint, ShapeKind, Stroke, VAlign};

use crate::draft::{Slide, SlideType};
use crate::theme::layout::{
    bullet_prefix, plan_line, plan_marker, stat_text, BulletSpec, ColumnSpec, FontType,
    GridSpec, ItemDecoration, LayoutConfig, PlanSpec, ShapeSpec, TextSource, TextSpec,
    TimelineSpec, ZIndex,
};
use crate::theme::ThemeDescriptor;

/// Render one slide against a theme. Infallible: themes are validated
/// at load time, and every directive tolerates whatever slide data it
/// is given, so there is no failure left to report here.
pub fn render_slide(slide: &Slide, theme: &ThemeDescriptor) -> Vec<DrawOp> {
    match theme.layout(slide.slide_type) {
        Some(config) => apply_layout(slide, config, theme),
        None => unknown_type_fallback(slide, theme),
    }
}

/// Render with a non-empty guarantee: a slide that renders to nothing
/// (a layout whose every directive skipped) is substituted by
/// [`fallback_slide_ops`] so the document never contains a blank
/// slide entry.
pub fn render_slide_safe(slide: &Slide, theme: &ThemeDescriptor) -> Vec<DrawOp> {
    let ops = render_slide(slide, theme);
    if ops.is_empty() {
        fallback_slide_ops(slide, theme)
    } else {
        ops
    }
}

fn apply_layout(slide: &Slide, config: &LayoutConfig, theme: &ThemeDescriptor) -> Vec<DrawOp> {
    let mut out = Vec::new();

    // 1. Background fill.
    if let Some(key) = &config.background {
        out.push(DrawOp::Shape {
            kind: ShapeKind::Rect,
            x: 0.0,
            y: 0.0,
            w: ops::PAGE_W,
            h: ops::PAGE_H,
            fill: Some(theme.resolve_color(key)),
            line: None,
            rotate: 0.0,
            radius: 0.0,
        });
    }

    // 2. Base shapes, then decorations, before any text.
    for spec in config.shapes.iter().chain(&config.decorations) {
        out.push(shape_op(spec, theme));
    }

    // 3. Title, then subtitle.
    if let Some(spec) = &config.title_text {
        emit_bound_text(&mut out, spec, slide, theme);
    }
    if let Some(spec) = &config.subtitle_text {
        emit_bound_text(&mut out, spec, slide, theme);
    }

    // 4. Bullet list over slide.content.
    if let Some(spec) = &config.bullets {
        emit_bullets(&mut out, spec, &slide.content, theme);
    }

    // 5. Plan list.
    if let Some(spec) = &config.plan {
        emit_plan(&mut out, spec, &slide.content, theme);
    }

    // 6. Two-column split: only when both columns are configured.
    if let (Some(left), Some(right)) = (&config.left_column, &config.right_column) {
        let mid = slide.content.len().div_ceil(2);
        emit_column(&mut out, left, &slide.content[..mid], theme);
        emit_column(&mut out, right, &slide.content[mid..], theme);
    }

    // 7. Grid of stat or idea cards.
    if let Some(spec) = &config.grid {
        emit_grid(&mut out, spec, slide, theme);
    }

    // 8. Chart, with fallback to plain content when no point survives
    //    validation.
    if slide.slide_type == SlideType::Chart || config.chart.is_some() {
        emit_chart(&mut out, config, slide, theme);
    }

    // 9. Timeline steps.
    if let Some(spec) = &config.timeline {
        emit_timeline(&mut out, spec, &slide.content, theme);
    }

    out
}

fn shape_op(spec: &ShapeSpec, theme: &ThemeDescriptor) -> DrawOp {
    DrawOp::Shape {
        kind: spec.kind,
        x: spec.x,
        y: spec.y,
        w: spec.w,
        h: spec.h,
        fill: spec.fill.as_deref().map(|key| theme.resolve_color(key)),
        line: spec.line.as_ref().map(|l| Stroke {
            color: theme.resolve_color(&l.color),
            width: l.width,
            dash: l.dash.clone(),
        }),
        rotate: spec.rotate,
        radius: spec.radius,
    }
}

/// Resolve a text directive's symbolic source against the slide,
/// falling back to the literal default, skipping silently when both
/// are empty. Empty text boxes are never emitted.
fn emit_bound_text(out: &mut Vec<DrawOp>, spec: &TextSpec, slide: &Slide, theme: &ThemeDescriptor) {
    let bound = match spec.source {
        TextSource::SlideTitle => Some(slide.title.as_str()).filter(|t| !t.is_empty()),
        TextSource::SlideSubtitle => slide.subtitle.as_deref().filter(|t| !t.is_empty()),
    };
    let text = match bound.or(spec.fallback.as_deref()) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => return,
    };
    out.push(DrawOp::Text {
        text,
        x: spec.x,
        y: spec.y,
        w: spec.w,
        h: spec.h,
        font: theme.resolve_font(spec.font_type),
        size: spec.font_size,
        bold: spec.is_bold(),
        color: theme.resolve_color(&spec.color),
        align: spec.align,
        valign: spec.valign,
    });
}

fn decoration_op(
    decoration: &ItemDecoration,
    x: f64,
    y: f64,
    theme: &ThemeDescriptor,
) -> DrawOp {
    DrawOp::Shape {
        kind: decoration.kind,
        x: x + decoration.offset_x,
        y: y + decoration.offset_y,
        w: decoration.width,
        h: decoration.height,
        fill: decoration
            .fill
            .as_deref()
            .map(|key| theme.resolve_color(key)),
        line: decoration.line.as_ref().map(|l| Stroke {
            color: theme.resolve_color(&l.color),
            width: l.width,
            dash: l.dash.clone(),
        }),
        rotate: 0.0,
        radius: decoration.radius,
    }
}

fn emit_bullets(out: &mut Vec<DrawOp>, spec: &BulletSpec, items: &[String], theme: &ThemeDescriptor) {
    let decoration = spec
        .item_decoration
        .as_ref()
        .filter(|d| d.enabled);

    for (index, item) in items.iter().enumerate() {
        let y = spec.start_y + index as f64 * spec.spacing_y;

        if let Some(d) = decoration {
            if d.z_index == ZIndex::Back {
                out.push(decoration_op(d, spec.start_x, y, theme));
            }
        }

        out.push(DrawOp::Text {
            text: format!("{}{}", bullet_prefix(&spec.style, index), item),
            x: spec.start_x,
            y,
            w: spec.w,
            h: spec.spacing_y,
            font: theme.resolve_font(spec.font_type),
            size: spec.font_size,
            bold: false,
            color: theme.resolve_color(&spec.color),
            align: Align::Left,
            valign: VAlign::Top,
        });

        if let Some(d) = decoration {
            if d.z_index == ZIndex::Front {
                out.push(decoration_op(d, spec.start_x, y, theme));
            }
        }
    }
}

fn emit_plan(out: &mut Vec<DrawOp>, spec: &PlanSpec, items: &[String], theme: &ThemeDescriptor) {
    for (index, item) in items.iter().enumerate() {
        let marker = plan_marker(&spec.style, index);
        out.push(DrawOp::Text {
            text: plan_line(&spec.style.format, &marker, item),
            x: spec.start_x,
            y: spec.start_y + index as f64 * spec.spacing_y,
            w: spec.w,
            h: spec.spacing_y,
            font: theme.resolve_font(spec.font_type),
            size: spec.font_size,
            bold: false,
            color: theme.resolve_color(&spec.color),
            align: Align::Left,
            valign: VAlign::Top,
        });
    }
}

fn emit_column(out: &mut Vec<DrawOp>, spec: &ColumnSpec, items: &[String], theme: &ThemeDescriptor) {
    for (index, item) in items.iter().enumerate() {
        out.push(DrawOp::Text {
            text: format!("{}{}", bullet_prefix(&spec.style, index), item),
            x: spec.start_x,
            y: spec.start_y + index as f64 * spec.spacing_y,
            w: spec.w,
            h: spec.spacing_y,
            font: theme.resolve_font(spec.font_type),
            size: spec.font_size,
            bold: false,
            color: theme.resolve_color(&spec.color),
            align: Align::Left,
            valign: VAlign::Top,
        });
    }
}

fn emit_grid(out: &mut Vec<DrawOp>, spec: &GridSpec, slide: &Slide, theme: &ThemeDescriptor) {
    // Stats drive the grid when present; plain content otherwise.
    let use_stats = !slide.stats.is_empty();
    let count = if use_stats {
        slide.stats.len()
    } else {
        slide.content.len()
    };

    for index in 0..count {
        let column = index % spec.columns;
        let row = index / spec.columns;
        let x = spec.base_x + column as f64 * spec.spacing_x;
        let y = spec.base_y + row as f64 * spec.spacing_y;

        out.push(DrawOp::Shape {
            kind: spec.shape,
            x,
            y,
            w: spec.cell_w,
            h: spec.cell_h,
            fill: spec
                .shape_fill
                .as_deref()
                .map(|key| theme.resolve_color(key)),
            line: None,
            rotate: 0.0,
            radius: 0.0,
        });

        let text = if use_stats {
            stat_text(spec.text_format.as_deref(), &slide.stats[index])
        } else {
            slide.content[index].clone()
        };
        out.push(DrawOp::Text {
            text,
            x,
            y,
            w: spec.cell_w,
            h: spec.cell_h,
            font: theme.resolve_font(spec.font_type),
            size: spec.font_size,
            bold: false,
            color: theme.resolve_color(&spec.color),
            align: Align::Center,
            valign: VAlign::Middle,
        });
    }
}

fn emit_chart(out: &mut Vec<DrawOp>, config: &LayoutConfig, slide: &Slide, theme: &ThemeDescriptor) {
    let spec = config.chart.clone().unwrap_or_default();
    let points: Vec<SeriesPoint> = slide
        .chart_data
        .iter()
        .filter(|p| p.is_valid())
        .map(|p| SeriesPoint {
            label: p.label.clone().unwrap(),
            value: p.value.unwrap(),
        })
        .collect();

    if points.is_empty() {
        // Never emit a chart with zero series points: degrade to a
        // plain bulleted-content rendering instead.
        let bullets = config.bullets.clone().unwrap_or_else(default_bullets);
        emit_bullets(out, &bullets, &slide.content, theme);
        return;
    }

    out.push(DrawOp::Chart {
        x: spec.x,
        y: spec.y,
        w: spec.w,
        h: spec.h,
        points,
        color: theme.resolve_color(spec.color.as_deref().unwrap_or("primary")),
    });
}

fn emit_timeline(
    out: &mut Vec<DrawOp>,
    spec: &TimelineSpec,
    items: &[String],
    theme: &ThemeDescriptor,
) {
    for (index, item) in items.iter().enumerate() {
        // Only the first ':' matters; the rest stays in the description.
        let (step_title, step_desc) = match item.split_once(':') {
            Some((t, d)) => (t.trim(), d.trim()),
            None => (item.as_str(), ""),
        };
        let x = spec.start_x + index as f64 * spec.step_w;

        out.push(DrawOp::Shape {
            kind: spec.shape,
            x,
            y: spec.y,
            w: spec.step_w,
            h: spec.step_h,
            fill: spec
                .shape_fill
                .as_deref()
                .map(|key| theme.resolve_color(key)),
            line: None,
            rotate: 0.0,
            radius: 0.0,
        });
        out.push(DrawOp::Text {
            text: (index + 1).to_string(),
            x: x + 0.3,
            y: spec.y + 0.2,
            w: 0.5,
            h: 0.5,
            font: theme.resolve_font(FontType::Heading),
            size: spec.title_size * 2.0,
            bold: true,
            color: theme.resolve_color("background"),
            align: Align::Center,
            valign: VAlign::Middle,
        });
        out.push(DrawOp::Text {
            text: step_title.to_string(),
            x,
            y: spec.y + spec.step_h + 0.2,
            w: spec.step_w,
            h: 0.4,
            font: theme.resolve_font(FontType::Heading),
            size: spec.title_size,
            bold: true,
            color: theme.resolve_color(&spec.title_color),
            align: Align::Left,
            valign: VAlign::Top,
        });
        if !step_desc.is_empty() {
            out.push(DrawOp::Text {
                text: step_desc.to_string(),
                x,
                y: spec.y + spec.step_h + 0.7,
                w: spec.step_w,
                h: 1.0,
                font: theme.resolve_font(spec.font_type),
                size: spec.desc_size,
                bold: false,
                color: theme.resolve_color(&spec.desc_color),
                align: Align::Left,
                valign: VAlign::Top,
            });
        }
    }
}

/// Neutral bullet rendering used when a chart degrades to content and
/// the layout defines no bullet directive of its own.
fn default_bullets() -> BulletSpec {
    BulletSpec {
        start_x: 1.0,
        start_y: 2.0,
        spacing_y: 0.5,
        w: 8.5,
        font_size: 18.0,
        font_type: FontType::Body,
        color: "textDark".into(),
        style: Default::default(),
        item_decoration: None,
    }
}

/// Rendering for a slide type the theme does not know: the title
/// alone, in a neutral position, using the theme's default text color.
fn unknown_type_fallback(slide: &Slide, theme: &ThemeDescriptor) -> Vec<DrawOp> {
    vec![DrawOp::Text {
        text: if slide.title.is_empty() {
            "Untitled slide".to_string()
        } else {
            slide.title.clone()
        },
        x: 0.5,
        y: 0.5,
        w: 9.0,
        h: 1.0,
        font: theme.resolve_font(FontType::Heading),
        size: 32.0,
        bold: true,
        color: theme.default_text_color(),
        align: Align::Left,
        valign: VAlign::Top,
    }]
}

/// Minimal substitute for a slide whose rendering failed: title plus
/// raw content as plain text, or an error marker when there is no
/// content either.
pub fn fallback_slide_ops(slide: &Slide, theme: &ThemeDescriptor) -> Vec<DrawOp> {
    let mut out = unknown_type_fallback(slide, theme);
    let body = if slide.content.is_empty() {
        vec!["Error loading slide content".to_string()]
    } else {
        slide.content.clone()
    };
    for (index, line) in body.iter().enumerate() {
        out.push(DrawOp::Text {
            text: line.clone(),
            x: 1.0,
            y: 2.0 + index as f64 * 0.5,
            w: 8.5,
            h: 0.5,
            font: theme.resolve_font(FontType::Body),
            size: 18.0,
            bold: false,
            color: theme.default_text_color(),
            align: Align::Left,
            valign: VAlign::Top,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{ChartPoint, Slide, SlideType, Stat};
    use crate::theme::ThemeRegistry;
    use pretty_assertions::assert_eq;

    fn theme() -> ThemeDescriptor {
        ThemeRegistry::with_builtin()
            .by_slug("executive")
            .unwrap()
            .clone()
    }

    fn slide(slide_type: SlideType, content: &[&str]) -> Slide {
        let mut s = Slide::new_default(slide_type, 0);
        s.title = "Sample".into();
        s.content = content.iter().map(|c| c.to_string()).collect();
        s
    }

    fn texts(ops: &[DrawOp]) -> Vec<&str> {
        ops.iter().filter_map(|op| op.text_content()).collect()
    }

    #[test]
    fn test_render_is_idempotent() {
        let theme = theme();
        let s = slide(SlideType::Content, &["One", "Two", "Three"]);
        let first = render_slide(&s, &theme);
        let second = render_slide(&s, &theme);
        assert_eq!(first, second);
    }

    #[test]
    fn test_shapes_precede_text() {
        let theme = theme();
        let s = slide(SlideType::Content, &["One"]);
        let ops = render_slide(&s, &theme);
        let first_text = ops.iter().position(DrawOp::is_text).unwrap();
        assert!(
            ops[..first_text]
                .iter()
                .all(|op| matches!(op, DrawOp::Shape { .. })),
            "all shapes must be drawn before the first text op"
        );
    }

    #[test]
    fn test_bullet_rows_spaced_by_index() {
        let theme = theme();
        let s = slide(SlideType::Content, &["A", "B", "C"]);
        let ops = render_slide(&s, &theme);
        let bullets = theme
            .layout(SlideType::Content)
            .unwrap()
            .bullets
            .clone()
            .unwrap();
        let ys: Vec<f64> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, y, .. } if text.ends_with('A') || text.ends_with('B') || text.ends_with('C') => {
                    Some(*y)
                }
                _ => None,
            })
            .collect();
        assert_eq!(ys.len(), 3);
        assert!((ys[1] - ys[0] - bullets.spacing_y).abs() < 1e-9);
        assert!((ys[2] - ys[1] - bullets.spacing_y).abs() < 1e-9);
    }

    #[test]
    fn test_two_column_split_ceil() {
        let theme = theme();
        let s = slide(SlideType::TwoColumn, &["A", "B", "C", "D"]);
        let config = theme.layout(SlideType::TwoColumn).unwrap();
        let left_x = config.left_column.as_ref().unwrap().start_x;
        let right_x = config.right_column.as_ref().unwrap().start_x;

        let ops = render_slide(&s, &theme);
        let column_items = |x_want: f64| -> Vec<String> {
            ops.iter()
                .filter_map(|op| match op {
                    DrawOp::Text { text, x, .. } if (*x - x_want).abs() < 1e-9 => {
                        Some(text.chars().last().unwrap().to_string())
                    }
                    _ => None,
                })
                .collect()
        };
        assert_eq!(column_items(left_x), vec!["A", "B"]);
        assert_eq!(column_items(right_x), vec!["C", "D"]);
    }

    #[test]
    fn test_two_column_odd_split() {
        let theme = theme();
        let s = slide(SlideType::TwoColumn, &["A", "B", "C", "D", "E"]);
        let config = theme.layout(SlideType::TwoColumn).unwrap();
        let left_x = config.left_column.as_ref().unwrap().start_x;
        let ops = render_slide(&s, &theme);
        let left_count = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { x, .. } if (*x - left_x).abs() < 1e-9))
            .count();
        // ceil(5/2) = 3 items on the left.
        assert_eq!(left_count, 3);
    }

    #[test]
    fn test_grid_placement_row_and_column() {
        let theme = theme();
        let mut s = slide(SlideType::Stats, &[]);
        s.stats = (0..5)
            .map(|i| Stat {
                label: format!("L{i}"),
                value: format!("{i}0%"),
                description: None,
                icon: None,
            })
            .collect();
        let grid = theme.layout(SlideType::Stats).unwrap().grid.clone().unwrap();
        assert_eq!(grid.columns, 3);

        let ops = render_slide(&s, &theme);
        // Item index 4 with 3 columns lands at column 1, row 1.
        let cell = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { text, x, y, .. } if text.contains("L4") => Some((*x, *y)),
                _ => None,
            })
            .unwrap();
        assert!((cell.0 - (grid.base_x + grid.spacing_x)).abs() < 1e-9);
        assert!((cell.1 - (grid.base_y + grid.spacing_y)).abs() < 1e-9);
    }

    #[test]
    fn test_grid_uses_content_when_no_stats() {
        let theme = theme();
        let s = slide(SlideType::Stats, &["Idea one", "Idea two"]);
        let ops = render_slide(&s, &theme);
        assert!(texts(&ops).contains(&"Idea one"));
    }

    #[test]
    fn test_chart_with_valid_points() {
        let theme = theme();
        let mut s = slide(SlideType::Chart, &[]);
        s.chart_data = vec![
            ChartPoint {
                label: Some("Q1".into()),
                value: Some(30.0),
            },
            ChartPoint {
                label: None,
                value: Some(99.0),
            },
        ];
        let ops = render_slide(&s, &theme);
        let chart = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Chart { points, .. } => Some(points.clone()),
                _ => None,
            })
            .unwrap();
        // The point without a label is filtered out.
        assert_eq!(chart.len(), 1);
        assert_eq!(chart[0].label, "Q1");
    }

    #[test]
    fn test_chart_all_invalid_falls_back_to_content() {
        let theme = theme();
        let mut s = slide(SlideType::Chart, &["First point", "Second point"]);
        s.chart_data = vec![
            ChartPoint {
                label: Some("Q1".into()),
                value: None,
            },
            ChartPoint {
                label: Some("Q2".into()),
                value: None,
            },
        ];
        let ops = render_slide(&s, &theme);
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Chart { .. })));
        assert!(texts(&ops).iter().any(|t| t.contains("First point")));
    }

    #[test]
    fn test_timeline_splits_on_first_colon() {
        let theme = theme();
        let s = slide(
            SlideType::Timeline,
            &["Phase one: kickoff: with details", "Phase two"],
        );
        let ops = render_slide(&s, &theme);
        let all = texts(&ops);
        assert!(all.contains(&"Phase one"));
        // Everything after the first colon is one description.
        assert!(all.contains(&"kickoff: with details"));
        assert!(all.contains(&"Phase two"));
        // Step numbers come from the index.
        assert!(all.contains(&"1"));
        assert!(all.contains(&"2"));
    }

    #[test]
    fn test_unknown_type_renders_title_only() {
        let theme = theme();
        let mut no_comparison = theme.clone();
        no_comparison.layouts.remove(&SlideType::Comparison);
        let s = slide(SlideType::Comparison, &["ignored"]);
        let ops = render_slide(&s, &no_comparison);
        assert!(!ops.is_empty());
        assert_eq!(texts(&ops), vec!["Sample"]);
    }

    #[test]
    fn test_empty_title_and_subtitle_skipped() {
        let theme = theme();
        let mut s = slide(SlideType::Title, &[]);
        s.title = String::new();
        s.subtitle = None;
        let ops = render_slide(&s, &theme);
        let config = theme.layout(SlideType::Title).unwrap();
        // The title directive has a fallback, so its text still shows;
        // the subtitle directive has none and is skipped silently.
        if let Some(fb) = config.title_text.as_ref().and_then(|t| t.fallback.clone()) {
            assert!(texts(&ops).contains(&fb.as_str()));
        }
        assert!(ops.iter().filter(|op| op.is_text()).count() <= 1);
    }

    #[test]
    fn test_fallback_slide_ops_with_empty_content() {
        let theme = theme();
        let mut s = slide(SlideType::Content, &[]);
        s.content.clear();
        let ops = fallback_slide_ops(&s, &theme);
        assert!(texts(&ops).contains(&"Error loading slide content"));
    }

    #[test]
    fn test_empty_layout_substituted_with_fallback() {
        // A layout with no directives renders to nothing; the safe
        // variant must substitute the error slide instead.
        let mut custom = theme();
        custom
            .layouts
            .insert(SlideType::Content, LayoutConfig::default());
        let mut s = slide(SlideType::Content, &[]);
        s.title = String::new();
        assert!(render_slide(&s, &custom).is_empty());

        let ops = render_slide_safe(&s, &custom);
        assert!(texts(&ops).contains(&"Error loading slide content"));
    }

    #[test]
    fn test_item_decoration_back_precedes_text() {
        let theme = theme();
        let config = theme.layout(SlideType::Plan);
        // The builtin plan layout uses a plan directive, not decorated
        // bullets; build a decorated layout by hand instead.
        assert!(config.is_some());
        let mut custom = theme.clone();
        let layout = custom.layouts.get_mut(&SlideType::Content).unwrap();
        let bullets = layout.bullets.as_mut().unwrap();
        bullets.item_decoration = Some(crate::theme::layout::ItemDecoration {
            enabled: true,
            z_index: ZIndex::Back,
            kind: ShapeKind::RoundRect,
            offset_x: -0.2,
            offset_y: -0.05,
            width: 8.9,
            height: 0.45,
            fill: Some("secondary".into()),
            line: None,
            radius: 0.1,
            padding: 0.1,
        });

        let s = slide(SlideType::Content, &["Row"]);
        let ops = render_slide(&s, &custom);
        let row_text = ops
            .iter()
            .position(|op| op.text_content().is_some_and(|t| t.ends_with("Row")))
            .unwrap();
        assert!(
            matches!(ops[row_text - 1], DrawOp::Shape { kind: ShapeKind::RoundRect, .. }),
            "decoration chip must be drawn directly behind its row"
        );
    }
}
