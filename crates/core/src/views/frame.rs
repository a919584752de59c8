//! Chart chrome shared by every view: background, title, legend.

use eeg_cloud_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

pub const TITLE_FONT_SIZE: f64 = 14.0;
pub const LEGEND_FONT_SIZE: f64 = 11.0;
const TITLE_Y: f64 = 18.0;
const LEGEND_Y: f64 = 40.0;
const SWATCH_W: f64 = 28.0;
const SWATCH_H: f64 = 10.0;
const LEGEND_GAP: f64 = 14.0;

/// Height taken by title + legend rows.
pub const HEADER_HEIGHT: f64 = 56.0;

/// Rough proportional-font width; good enough for layout decisions.
pub fn approx_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.55
}

pub fn background(viewport: &Viewport) -> RenderCommand {
    RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, viewport.width, viewport.height),
        color: ThemeToken::ChartBackground,
        border_color: None,
        label: None,
        hit_id: None,
    }
}

pub fn title(viewport: &Viewport, text: &str) -> RenderCommand {
    RenderCommand::DrawText {
        position: Point::new(viewport.width / 2.0, TITLE_Y),
        text: text.to_string(),
        color: ThemeToken::TextPrimary,
        font_size: TITLE_FONT_SIZE,
        align: TextAlign::Center,
    }
}

/// One legend entry: swatch fill, swatch border, text.
pub struct LegendEntry<'a> {
    pub label: &'a str,
    pub fill: ThemeToken,
    pub stroke: ThemeToken,
}

/// A centred legend row under the title.
pub fn legend(viewport: &Viewport, entries: &[LegendEntry<'_>]) -> Vec<RenderCommand> {
    let entry_width = |e: &LegendEntry<'_>| {
        SWATCH_W + 6.0 + approx_text_width(e.label, LEGEND_FONT_SIZE) + LEGEND_GAP
    };
    let total: f64 = entries.iter().map(entry_width).sum::<f64>() - LEGEND_GAP;
    let mut x = ((viewport.width - total) / 2.0).max(4.0);

    let mut commands = Vec::with_capacity(entries.len() * 2 + 2);
    commands.push(RenderCommand::BeginGroup {
        id: "legend".into(),
        label: None,
    });
    for entry in entries {
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, LEGEND_Y - SWATCH_H / 2.0, SWATCH_W, SWATCH_H),
            color: entry.fill,
            border_color: Some(entry.stroke),
            label: Some(entry.label.to_string()),
            hit_id: None,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x + SWATCH_W + 6.0, LEGEND_Y),
            text: entry.label.to_string(),
            color: ThemeToken::TextPrimary,
            font_size: LEGEND_FONT_SIZE,
            align: TextAlign::Left,
        });
        x += entry_width(entry);
    }
    commands.push(RenderCommand::EndGroup);
    commands
}

/// Plot rectangle inside `viewport` after the header and the given margins.
pub fn plot_rect(viewport: &Viewport, left: f64, right: f64, bottom: f64) -> Rect {
    let top = HEADER_HEIGHT + 8.0;
    Rect::new(
        left,
        top,
        (viewport.width - left - right).max(0.0),
        (viewport.height - top - bottom).max(0.0),
    )
}
