//! Built-in theme seed data.
//!
//! Two themes ship with the binary: "executive" (free) and
//! "freshtones" (premium). Both share the same layout geometry; a
//! theme swap only changes palette, fonts, and decoration accents,
//! which is exactly what symbolic color keys buy us.

use std::collections::BTreeMap;

use crate::draft::SlideType;
use crate::render::ops::{Align, ShapeKind, VAlign};

use super::layout::{
    BulletKind, BulletSpec, BulletStyle, ChartSpec, ColumnSpec, FontType, GridSpec,
    ItemDecoration, LayoutConfig, PlanKind, PlanSpec, PlanStyle, ShapeSpec, TextSource, TextSpec,
    TimelineSpec, ZIndex,
};
use super::{FontSpec, ThemeDescriptor, ThemeFonts};

pub fn builtin_themes() -> Vec<ThemeDescriptor> {
    vec![executive(), freshtones()]
}

fn palette(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn executive() -> ThemeDescriptor {
    ThemeDescriptor {
        id: "executive".into(),
        name: "Executive".into(),
        description: Some("Deep purple and gold, built for board rooms".into()),
        is_premium: false,
        colors: palette(&[
            ("primary", "#3D2E5C"),
            ("secondary", "#FFD700"),
            ("accent", "#FF6B6B"),
            ("background", "#FFFFFF"),
            ("surface", "#F4F1FA"),
            ("textDark", "#1F2937"),
            ("textLight", "#6B7280"),
        ]),
        fonts: ThemeFonts {
            heading: FontSpec {
                family: "Montserrat".into(),
                weight: Some("bold".into()),
            },
            body: FontSpec {
                family: "Open Sans".into(),
                weight: None,
            },
        },
        layouts: standard_layouts(),
        preview_image_url: None,
    }
}

fn freshtones() -> ThemeDescriptor {
    let mut layouts = standard_layouts();
    // Rounded chips behind content rows set this theme apart.
    if let Some(bullets) = layouts
        .get_mut(&SlideType::Content)
        .and_then(|l| l.bullets.as_mut())
    {
        bullets.item_decoration = Some(ItemDecoration {
            enabled: true,
            z_index: ZIndex::Back,
            kind: ShapeKind::RoundRect,
            offset_x: -0.2,
            offset_y: -0.08,
            width: 8.9,
            height: 0.45,
            fill: Some("surface".into()),
            line: None,
            radius: 0.12,
            padding: 0.1,
        });
    }
    ThemeDescriptor {
        id: "freshtones".into(),
        name: "Fresh Tones".into(),
        description: Some("Teal and coral with soft card surfaces".into()),
        is_premium: true,
        colors: palette(&[
            ("primary", "#0D9488"),
            ("secondary", "#F97316"),
            ("accent", "#FB7185"),
            ("background", "#FAFAF9"),
            ("surface", "#E7F5F3"),
            ("textDark", "#134E4A"),
            ("textLight", "#5EEAD4"),
        ]),
        fonts: ThemeFonts {
            heading: FontSpec {
                family: "Poppins".into(),
                weight: Some("bold".into()),
            },
            body: FontSpec {
                family: "Lato".into(),
                weight: None,
            },
        },
        layouts,
        preview_image_url: None,
    }
}

fn heading(source: TextSource, fallback: Option<&str>, y: f64, size: f64) -> TextSpec {
    TextSpec {
        source,
        fallback: fallback.map(str::to_string),
        x: 0.5,
        y,
        w: 9.0,
        h: 0.8,
        font_type: FontType::Heading,
        font_size: size,
        font_weight: Some("bold".into()),
        color: "textDark".into(),
        align: Align::Left,
        valign: VAlign::Top,
    }
}

fn body_bullets(start_y: f64) -> BulletSpec {
    BulletSpec {
        start_x: 1.0,
        start_y,
        spacing_y: 0.55,
        w: 8.5,
        font_size: 18.0,
        font_type: FontType::Body,
        color: "textDark".into(),
        style: BulletStyle {
            kind: BulletKind::Bullet,
            prefix: Some("• ".into()),
        },
        item_decoration: None,
    }
}

fn column(start_x: f64) -> ColumnSpec {
    ColumnSpec {
        start_x,
        start_y: 2.0,
        spacing_y: 0.55,
        w: 4.1,
        font_size: 16.0,
        font_type: FontType::Body,
        color: "textDark".into(),
        style: BulletStyle {
            kind: BulletKind::Bullet,
            prefix: Some("• ".into()),
        },
    }
}

fn card_grid(columns: usize, text_format: Option<&str>) -> GridSpec {
    GridSpec {
        columns,
        base_x: 0.6,
        base_y: 1.9,
        spacing_x: 3.1,
        spacing_y: 1.8,
        cell_w: 2.8,
        cell_h: 1.5,
        shape: ShapeKind::RoundRect,
        shape_fill: Some("surface".into()),
        font_size: 14.0,
        font_type: FontType::Body,
        color: "textDark".into(),
        text_format: text_format.map(str::to_string),
    }
}

fn corner_accent() -> ShapeSpec {
    ShapeSpec {
        kind: ShapeKind::Rect,
        x: 0.0,
        y: 0.0,
        w: 10.0,
        h: 0.18,
        fill: Some("primary".into()),
        line: None,
        rotate: 0.0,
        radius: 0.0,
    }
}

fn standard_layouts() -> BTreeMap<SlideType, LayoutConfig> {
    let mut layouts = BTreeMap::new();

    layouts.insert(
        SlideType::Title,
        LayoutConfig {
            background: Some("primary".into()),
            decorations: vec![ShapeSpec {
                kind: ShapeKind::Rect,
                x: 0.5,
                y: 3.1,
                w: 2.0,
                h: 0.08,
                fill: Some("secondary".into()),
                line: None,
                rotate: 0.0,
                radius: 0.0,
            }],
            title_text: Some(TextSpec {
                source: TextSource::SlideTitle,
                fallback: Some("Untitled Presentation".into()),
                x: 0.5,
                y: 2.0,
                w: 9.0,
                h: 1.0,
                font_type: FontType::Heading,
                font_size: 44.0,
                font_weight: Some("bold".into()),
                color: "background".into(),
                align: Align::Left,
                valign: VAlign::Top,
            }),
            subtitle_text: Some(TextSpec {
                source: TextSource::SlideSubtitle,
                fallback: None,
                x: 0.5,
                y: 3.4,
                w: 9.0,
                h: 0.6,
                font_type: FontType::Body,
                font_size: 20.0,
                font_weight: None,
                color: "textLight".into(),
                align: Align::Left,
                valign: VAlign::Top,
            }),
            ..Default::default()
        },
    );

    layouts.insert(
        SlideType::Plan,
        LayoutConfig {
            background: Some("background".into()),
            shapes: vec![corner_accent()],
            title_text: Some(heading(TextSource::SlideTitle, Some("Agenda"), 0.7, 32.0)),
            plan: Some(PlanSpec {
                start_x: 1.2,
                start_y: 1.9,
                spacing_y: 0.65,
                w: 8.0,
                font_size: 20.0,
                font_type: FontType::Body,
                color: "textDark".into(),
                style: PlanStyle {
                    kind: PlanKind::Numbered,
                    format: "${number} ${text}".into(),
                    number_format: Some("1.".into()),
                    icon: None,
                },
            }),
            ..Default::default()
        },
    );

    layouts.insert(
        SlideType::Content,
        LayoutConfig {
            background: Some("background".into()),
            shapes: vec![corner_accent()],
            title_text: Some(heading(TextSource::SlideTitle, None, 0.7, 32.0)),
            bullets: Some(body_bullets(1.9)),
            ..Default::default()
        },
    );

    layouts.insert(
        SlideType::TwoColumn,
        LayoutConfig {
            background: Some("background".into()),
            shapes: vec![
                corner_accent(),
                ShapeSpec {
                    kind: ShapeKind::Line,
                    x: 5.0,
                    y: 1.9,
                    w: 0.0,
                    h: 3.2,
                    fill: None,
                    line: Some(super::layout::LineSpec {
                        color: "textLight".into(),
                        width: 1.0,
                        dash: None,
                    }),
                    rotate: 0.0,
                    radius: 0.0,
                },
            ],
            title_text: Some(heading(TextSource::SlideTitle, None, 0.7, 32.0)),
            left_column: Some(column(0.6)),
            right_column: Some(column(5.3)),
            ..Default::default()
        },
    );

    layouts.insert(
        SlideType::Timeline,
        LayoutConfig {
            background: Some("background".into()),
            title_text: Some(heading(TextSource::SlideTitle, None, 0.7, 32.0)),
            timeline: Some(TimelineSpec {
                start_x: 0.5,
                y: 2.3,
                step_w: 2.2,
                step_h: 1.0,
                shape: ShapeKind::Pentagon,
                shape_fill: Some("primary".into()),
                title_size: 16.0,
                desc_size: 11.0,
                font_type: FontType::Body,
                title_color: "textDark".into(),
                desc_color: "textLight".into(),
            }),
            ..Default::default()
        },
    );

    layouts.insert(
        SlideType::Comparison,
        LayoutConfig {
            background: Some("background".into()),
            shapes: vec![
                ShapeSpec {
                    kind: ShapeKind::RoundRect,
                    x: 0.5,
                    y: 1.7,
                    w: 4.3,
                    h: 3.5,
                    fill: Some("surface".into()),
                    line: None,
                    rotate: 0.0,
                    radius: 0.15,
                },
                ShapeSpec {
                    kind: ShapeKind::RoundRect,
                    x: 5.2,
                    y: 1.7,
                    w: 4.3,
                    h: 3.5,
                    fill: Some("surface".into()),
                    line: None,
                    rotate: 0.0,
                    radius: 0.15,
                },
            ],
            title_text: Some(heading(TextSource::SlideTitle, None, 0.7, 32.0)),
            left_column: Some(column(0.8)),
            right_column: Some(column(5.5)),
            ..Default::default()
        },
    );

    layouts.insert(
        SlideType::Cards,
        LayoutConfig {
            background: Some("background".into()),
            title_text: Some(heading(TextSource::SlideTitle, None, 0.7, 32.0)),
            grid: Some(card_grid(2, None)),
            ..Default::default()
        },
    );

    layouts.insert(
        SlideType::Stats,
        LayoutConfig {
            background: Some("background".into()),
            title_text: Some(heading(TextSource::SlideTitle, None, 0.7, 32.0)),
            grid: Some(card_grid(3, Some("${value}\n${label}"))),
            ..Default::default()
        },
    );

    layouts.insert(
        SlideType::Chart,
        LayoutConfig {
            background: Some("background".into()),
            title_text: Some(heading(TextSource::SlideTitle, None, 0.5, 28.0)),
            chart: Some(ChartSpec {
                x: 0.7,
                y: 1.5,
                w: 8.6,
                h: 3.7,
                color: Some("primary".into()),
            }),
            ..Default::default()
        },
    );

    layouts.insert(
        SlideType::Quote,
        LayoutConfig {
            background: Some("primary".into()),
            decorations: vec![ShapeSpec {
                kind: ShapeKind::Rect,
                x: 1.0,
                y: 1.6,
                w: 0.08,
                h: 2.4,
                fill: Some("secondary".into()),
                line: None,
                rotate: 0.0,
                radius: 0.0,
            }],
            title_text: Some(TextSpec {
                source: TextSource::SlideTitle,
                fallback: None,
                x: 1.4,
                y: 1.8,
                w: 7.6,
                h: 2.0,
                font_type: FontType::Heading,
                font_size: 28.0,
                font_weight: None,
                color: "background".into(),
                align: Align::Left,
                valign: VAlign::Middle,
            }),
            subtitle_text: Some(TextSpec {
                source: TextSource::SlideSubtitle,
                fallback: None,
                x: 1.4,
                y: 4.0,
                w: 7.6,
                h: 0.5,
                font_type: FontType::Body,
                font_size: 16.0,
                font_weight: None,
                color: "textLight".into(),
                align: Align::Left,
                valign: VAlign::Top,
            }),
            ..Default::default()
        },
    );

    layouts.insert(
        SlideType::Closing,
        LayoutConfig {
            background: Some("primary".into()),
            title_text: Some(TextSpec {
                source: TextSource::SlideTitle,
                fallback: Some("Thank You".into()),
                x: 0.5,
                y: 2.2,
                w: 9.0,
                h: 1.0,
                font_type: FontType::Heading,
                font_size: 40.0,
                font_weight: Some("bold".into()),
                color: "background".into(),
                align: Align::Center,
                valign: VAlign::Middle,
            }),
            subtitle_text: Some(TextSpec {
                source: TextSource::SlideSubtitle,
                fallback: None,
                x: 0.5,
                y: 3.4,
                w: 9.0,
                h: 0.5,
                font_type: FontType::Body,
                font_size: 18.0,
                font_weight: None,
                color: "textLight".into(),
                align: Align::Center,
                valign: VAlign::Top,
            }),
            ..Default::default()
        },
    );

    layouts
}
