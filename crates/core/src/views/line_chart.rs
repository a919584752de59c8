use eeg_cloud_protocol::{Point, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::axis::{nice_ticks, render_category_labels, render_value_axis};
use super::frame::{self, LegendEntry};
use crate::data::palette;
use crate::model::{EegData, SampleRange};

pub const TITLE: &str = "EEG Metrics";
pub const X_TITLE: &str = "Time (s)";
pub const Y_TITLE: &str = "Value";

const LEFT_MARGIN: f64 = 56.0;
const RIGHT_MARGIN: f64 = 16.0;
const BOTTOM_MARGIN: f64 = 44.0;
const POINT_RADIUS: f64 = 2.0;
const AXIS_FONT_SIZE: f64 = 11.0;
const Y_TICK_TARGET: usize = 6;

/// Render every channel of `data` over `range` as a multi-series line chart.
///
/// Out-of-bounds parts of `range` are clamped to the recording.
pub fn render_line_chart(
    data: &EegData,
    range: SampleRange,
    viewport: &Viewport,
) -> Vec<RenderCommand> {
    if data.is_empty()
        || data.channels().is_empty()
        || range.is_empty()
        || !viewport.is_drawable()
    {
        return Vec::new();
    }
    let labels_all = data.time_labels();
    let labels = range.slice(&labels_all);
    let n = labels.len();
    if n == 0 {
        return Vec::new();
    }

    let plot = frame::plot_rect(viewport, LEFT_MARGIN, RIGHT_MARGIN, BOTTOM_MARGIN);

    let (lo, hi) = data
        .channels()
        .iter()
        .flat_map(|c| range.slice(&c.samples).iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let ticks = nice_ticks(lo, hi, Y_TICK_TARGET);
    let (y_lo, y_hi) = match (ticks.first(), ticks.last()) {
        (Some(&a), Some(&b)) if b > a => (a, b),
        _ => return Vec::new(),
    };

    let x_at = |i: usize| {
        if n == 1 {
            plot.x + plot.w / 2.0
        } else {
            plot.x + i as f64 * plot.w / (n - 1) as f64
        }
    };
    let y_at = |v: f64| plot.bottom() - (v - y_lo) / (y_hi - y_lo) * plot.h;

    let mut commands = Vec::with_capacity(data.channels().len() * (n + 2) + ticks.len() * 2 + 16);
    commands.push(RenderCommand::BeginGroup {
        id: "line-chart".into(),
        label: Some(TITLE.into()),
    });
    commands.push(frame::background(viewport));
    commands.push(frame::title(viewport, TITLE));

    let entries: Vec<LegendEntry<'_>> = data
        .channels()
        .iter()
        .map(|c| LegendEntry {
            label: &c.name,
            fill: palette::fill_token(&c.name),
            stroke: palette::stroke_token(&c.name),
        })
        .collect();
    commands.extend(frame::legend(viewport, &entries));

    commands.extend(render_value_axis(plot, &ticks));
    commands.push(RenderCommand::DrawLine {
        from: Point::new(plot.x, plot.bottom()),
        to: Point::new(plot.right(), plot.bottom()),
        color: ThemeToken::AxisLine,
        width: 1.0,
    });
    let xs: Vec<f64> = (0..n).map(x_at).collect();
    commands.extend(render_category_labels(plot, &xs, labels));

    commands.push(RenderCommand::DrawText {
        position: Point::new(plot.x + plot.w / 2.0, viewport.height - 10.0),
        text: X_TITLE.into(),
        color: ThemeToken::TextPrimary,
        font_size: AXIS_FONT_SIZE,
        align: TextAlign::Center,
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(8.0, plot.y - 8.0),
        text: Y_TITLE.into(),
        color: ThemeToken::TextPrimary,
        font_size: AXIS_FONT_SIZE,
        align: TextAlign::Left,
    });

    commands.push(RenderCommand::SetClip { rect: plot });
    for channel in data.channels() {
        let stroke = palette::stroke_token(&channel.name);
        let points: Vec<Point> = range
            .slice(&channel.samples)
            .iter()
            .enumerate()
            .map(|(i, &v)| Point::new(x_at(i), y_at(v)))
            .collect();
        for p in &points {
            commands.push(RenderCommand::DrawCircle {
                center: *p,
                radius: POINT_RADIUS,
                fill: Some(palette::fill_token(&channel.name)),
                stroke: Some(stroke),
                width: 1.0,
            });
        }
        commands.push(RenderCommand::DrawPolyline {
            points,
            color: stroke,
            width: 1.0,
        });
    }
    commands.push(RenderCommand::ClearClip);
    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MockPreset, generate};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mock() -> EegData {
        generate(MockPreset::FourChannel, &mut StdRng::seed_from_u64(5)).expect("mock")
    }

    fn polylines(cmds: &[RenderCommand]) -> Vec<&Vec<Point>> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::DrawPolyline { points, .. } => Some(points),
                _ => None,
            })
            .collect()
    }

    fn texts(cmds: &[RenderCommand]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn channelless_recording_draws_nothing() {
        let data = crate::data::buffer_to_columnar::<&str>(&[vec![], vec![]], 1.0, &[])
            .expect("columnar");
        assert_eq!(data.len(), 2);
        let cmds = render_line_chart(&data, SampleRange::full(2), &Viewport::sized(600.0, 400.0));
        assert!(cmds.is_empty());
    }

    #[test]
    fn unbounded_values_draw_nothing() {
        let vp = Viewport::sized(600.0, 400.0);
        let infinite = crate::data::buffer_to_columnar(
            &[vec![1.0], vec![f64::INFINITY]],
            1.0,
            &["valence"],
        )
        .expect("columnar");
        assert!(render_line_chart(&infinite, SampleRange::full(2), &vp).is_empty());

        let rows: Vec<Vec<f64>> = serde_json::from_str("[[1e308],[-1e308]]").expect("rows");
        let huge = crate::data::buffer_to_columnar(&rows, 1.0, &["valence"]).expect("columnar");
        assert!(render_line_chart(&huge, SampleRange::full(2), &vp).is_empty());
    }

    #[test]
    fn one_series_per_channel_over_range() {
        let data = mock();
        let vp = Viewport::sized(800.0, 500.0);
        let cmds = render_line_chart(&data, SampleRange { start: 10, end: 20 }, &vp);
        let lines = polylines(&cmds);
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|pts| pts.len() == 10));

        let t = texts(&cmds);
        assert!(t.contains(&TITLE));
        assert!(t.contains(&X_TITLE));
        assert!(t.contains(&"excitement"));
        assert!(t.contains(&"10.0s"));
        assert!(!t.contains(&"20.0s"));
    }

    #[test]
    fn points_stay_inside_plot() {
        let data = mock();
        let vp = Viewport::sized(640.0, 400.0);
        let cmds = render_line_chart(&data, SampleRange::full(data.len()), &vp);
        let plot = frame::plot_rect(&vp, LEFT_MARGIN, RIGHT_MARGIN, BOTTOM_MARGIN);
        for pts in polylines(&cmds) {
            for p in pts {
                assert!(p.x >= plot.x - 1e-9 && p.x <= plot.right() + 1e-9);
                assert!(p.y >= plot.y - 1e-9 && p.y <= plot.bottom() + 1e-9);
            }
        }
    }

    #[test]
    fn single_sample_is_centred() {
        let data = mock();
        let vp = Viewport::sized(400.0, 300.0);
        let cmds = render_line_chart(&data, SampleRange { start: 3, end: 4 }, &vp);
        let plot = frame::plot_rect(&vp, LEFT_MARGIN, RIGHT_MARGIN, BOTTOM_MARGIN);
        let first = polylines(&cmds)[0][0];
        assert!((first.x - (plot.x + plot.w / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs_render_nothing() {
        let data = mock();
        let vp = Viewport::sized(400.0, 300.0);
        assert!(render_line_chart(&data, SampleRange { start: 5, end: 5 }, &vp).is_empty());
        assert!(render_line_chart(&data, SampleRange::full(60), &Viewport::sized(0.0, 0.0)).is_empty());
    }
}
