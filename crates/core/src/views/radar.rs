use std::f64::consts::{FRAC_PI_2, TAU};

use eeg_cloud_protocol::{Point, RenderCommand, TextAlign, ThemeToken, Viewport};

use super::axis::nice_ceiling;
use super::frame::{self, LegendEntry};
use crate::model::{ChannelSelection, EegData};

const GRID_LEVELS: usize = 5;
const LABEL_OFFSET: f64 = 14.0;
const LABEL_MARGIN: f64 = 40.0;
const VERTEX_RADIUS: f64 = 3.0;
const FONT_SIZE: f64 = 11.0;

pub fn title(second: usize) -> String {
    format!("EEG Spectrum at {second}s")
}

pub fn dataset_label(second: usize) -> String {
    format!("Values at {second}s")
}

/// `(channel, value)` pairs plotted for `second`, in channel order.
pub fn radar_values(
    data: &EegData,
    selection: &ChannelSelection,
    second: usize,
) -> Vec<(String, f64)> {
    data.channels()
        .iter()
        .filter(|c| selection.is_selected(&c.name))
        .filter_map(|c| c.samples.get(second).map(|v| (c.name.clone(), *v)))
        .collect()
}

/// Spoke angle of axis `i` of `n`, starting straight up and going clockwise.
pub fn spoke_angle(i: usize, n: usize) -> f64 {
    -FRAC_PI_2 + i as f64 * TAU / n as f64
}

/// Render the polygon (radar) chart of the selected channels at `second`.
pub fn render_radar(
    data: &EegData,
    selection: &ChannelSelection,
    second: usize,
    viewport: &Viewport,
) -> Vec<RenderCommand> {
    let values = radar_values(data, selection, second);
    let n = values.len();
    if n == 0 || !viewport.is_drawable() {
        return Vec::new();
    }

    let area_top = frame::HEADER_HEIGHT;
    let center = Point::new(
        viewport.width / 2.0,
        area_top + (viewport.height - area_top) / 2.0,
    );
    let radius = ((viewport.width.min(viewport.height - area_top)) / 2.0 - LABEL_MARGIN).max(0.0);
    let scale_max = nice_ceiling(values.iter().map(|(_, v)| *v).fold(0.0, f64::max));

    let mut commands = Vec::with_capacity(n * 4 + GRID_LEVELS + 12);
    commands.push(RenderCommand::BeginGroup {
        id: "radar".into(),
        label: Some(title(second)),
    });
    commands.push(frame::background(viewport));
    commands.push(frame::title(viewport, &title(second)));
    let label = dataset_label(second);
    commands.extend(frame::legend(
        viewport,
        &[LegendEntry {
            label: &label,
            fill: ThemeToken::PolygonFill,
            stroke: ThemeToken::PolygonStroke,
        }],
    ));

    // Concentric grid polygons.
    for level in 1..=GRID_LEVELS {
        let r = radius * level as f64 / GRID_LEVELS as f64;
        let ring: Vec<Point> = (0..n).map(|i| center.polar(r, spoke_angle(i, n))).collect();
        commands.push(RenderCommand::DrawPolygon {
            points: ring,
            fill: None,
            stroke: Some(ThemeToken::GridLine),
            width: 1.0,
        });
    }

    for (i, (name, _)) in values.iter().enumerate() {
        let angle = spoke_angle(i, n);
        commands.push(RenderCommand::DrawLine {
            from: center,
            to: center.polar(radius, angle),
            color: ThemeToken::SpokeLine,
            width: 1.0,
        });
        let cos = angle.cos();
        let align = if cos > 0.1 {
            TextAlign::Left
        } else if cos < -0.1 {
            TextAlign::Right
        } else {
            TextAlign::Center
        };
        commands.push(RenderCommand::DrawText {
            position: center.polar(radius + LABEL_OFFSET, angle),
            text: name.clone(),
            color: ThemeToken::TextPrimary,
            font_size: FONT_SIZE,
            align,
        });
    }

    let vertices: Vec<Point> = values
        .iter()
        .enumerate()
        .map(|(i, (_, v))| {
            let r = (v / scale_max).clamp(0.0, 1.0) * radius;
            center.polar(r, spoke_angle(i, n))
        })
        .collect();
    commands.push(RenderCommand::DrawPolygon {
        points: vertices.clone(),
        fill: Some(ThemeToken::PolygonFill),
        stroke: Some(ThemeToken::PolygonStroke),
        width: 2.0,
    });
    for p in &vertices {
        commands.push(RenderCommand::DrawCircle {
            center: *p,
            radius: VERTEX_RADIUS,
            fill: Some(ThemeToken::PolygonStroke),
            stroke: None,
            width: 0.0,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
