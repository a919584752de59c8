use eeg_cloud_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::axis::{nice_ticks, render_category_labels, render_value_axis};
use super::frame::{self, LegendEntry};
use crate::history::{Granularity, HistoryPanel};

pub const SERIES_LABEL: &str = "Score";

const LEFT_MARGIN: f64 = 48.0;
const RIGHT_MARGIN: f64 = 16.0;
const BOTTOM_MARGIN: f64 = 32.0;
const BAR_FILL_RATIO: f64 = 0.7;
const Y_TICK_TARGET: usize = 5;

/// Render the history panel's current buckets as a category bar chart.
///
/// Every bar's `hit_id` is its index, so a click maps straight back to
/// [`HistoryPanel::click`].
pub fn render_history(panel: &HistoryPanel, viewport: &Viewport) -> Vec<RenderCommand> {
    let bars = panel.bars();
    if bars.is_empty() || !viewport.is_drawable() {
        return Vec::new();
    }

    let plot = frame::plot_rect(viewport, LEFT_MARGIN, RIGHT_MARGIN, BOTTOM_MARGIN);
    // Scores live in [0, 100); keep the scale fixed so drill-downs compare.
    let ticks = nice_ticks(0.0, 100.0, Y_TICK_TARGET);
    let slot = plot.w / bars.len() as f64;
    let bar_w = slot * BAR_FILL_RATIO;
    let highlight = match panel.granularity() {
        Granularity::Day => panel.selected_bar(),
        _ => None,
    };

    let mut commands = Vec::with_capacity(bars.len() * 2 + ticks.len() * 2 + 12);
    commands.push(RenderCommand::BeginGroup {
        id: "history".into(),
        label: Some(format!("History ({})", panel.granularity())),
    });
    commands.push(frame::background(viewport));
    commands.extend(frame::legend(
        viewport,
        &[LegendEntry {
            label: SERIES_LABEL,
            fill: ThemeToken::BarFill,
            stroke: ThemeToken::BarFill,
        }],
    ));
    commands.extend(render_value_axis(plot, &ticks));
    commands.push(RenderCommand::DrawText {
        position: Point::new(8.0, plot.y - 8.0),
        text: SERIES_LABEL.into(),
        color: ThemeToken::TextPrimary,
        font_size: 11.0,
        align: TextAlign::Left,
    });

    let mut centers = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let h = f64::from(bar.score).min(100.0) / 100.0 * plot.h;
        let cx = plot.x + slot * (i as f64 + 0.5);
        centers.push(cx);
        let color = if highlight == Some(i) {
            ThemeToken::BarSelected
        } else {
            ThemeToken::BarFill
        };
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(cx - bar_w / 2.0, plot.bottom() - h, bar_w, h),
            color,
            border_color: None,
            label: Some(format!("{}: {}", bar.label, bar.score)),
            hit_id: Some(i as u64),
        });
    }

    commands.push(RenderCommand::DrawLine {
        from: Point::new(plot.x, plot.bottom()),
        to: Point::new(plot.right(), plot.bottom()),
        color: ThemeToken::AxisLine,
        width: 1.0,
    });
    let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
    commands.extend(render_category_labels(plot, &centers, &labels));

    commands.push(RenderCommand::EndGroup);
    commands
}

/// Index of the bar whose column contains `point`, for renderers without
/// retained hit regions.
pub fn bar_at(panel: &HistoryPanel, viewport: &Viewport, point: Point) -> Option<usize> {
    let n = panel.bars().len();
    let plot = frame::plot_rect(viewport, LEFT_MARGIN, RIGHT_MARGIN, BOTTOM_MARGIN);
    if n == 0 || !plot.contains(point) {
        return None;
    }
    let slot = plot.w / n as f64;
    Some((((point.x - plot.x) / slot) as usize).min(n - 1))
}
