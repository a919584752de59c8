use eeg_cloud_protocol::{Point, RenderCommand, TextAlign, ThemeToken, Viewport};
use serde::{Deserialize, Serialize};

use super::radar::spoke_angle;
use crate::model::EegData;

const GRID_RINGS: usize = 5;
const RADIUS_FRACTION: f64 = 0.8;
const LABEL_OFFSET: f64 = 12.0;
const VERTEX_RADIUS: f64 = 4.0;
const FONT_SIZE: f64 = 12.0;
/// Above this many dims only every n-th spoke gets a label.
const MAX_LABELS: usize = 24;

/// A star ("petal") glyph: one spoke per dimension, vertex distance
/// proportional to the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarGlyph {
    pub dims: Vec<String>,
    pub values: Vec<f64>,
}

/// Resolved glyph geometry for a square of side `size`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphLayout {
    pub center: Point,
    pub radius: f64,
    pub axis_ends: Vec<Point>,
    pub vertices: Vec<Point>,
    pub label_positions: Vec<Point>,
    pub rings: Vec<f64>,
}

impl StarGlyph {
    /// One channel across time: a spoke per sample, labelled with its time.
    pub fn from_series(data: &EegData, channel: &str) -> Option<Self> {
        let channel = data.channel(channel)?;
        Some(Self {
            dims: data.time_labels(),
            values: channel.samples.clone(),
        })
    }

    /// Every channel at one sample: a spoke per channel.
    pub fn from_sample(data: &EegData, index: usize) -> Option<Self> {
        Some(Self {
            dims: data.channel_names().map(str::to_string).collect(),
            values: data.sample(index)?,
        })
    }

    /// Keep only the named dims, in the order given. Unknown names are
    /// skipped; an empty subset keeps everything.
    pub fn with_channels<S: AsRef<str>>(self, subset: &[S]) -> Self {
        if subset.is_empty() {
            return self;
        }
        let (dims, values) = subset
            .iter()
            .filter_map(|name| {
                let i = self.dims.iter().position(|d| d == name.as_ref())?;
                Some((self.dims[i].clone(), *self.values.get(i)?))
            })
            .unzip();
        Self { dims, values }
    }

    /// Divide every value by `max_value` so the largest lands on the rim.
    pub fn normalized(mut self, max_value: f64) -> Self {
        if max_value > 0.0 && max_value.is_finite() {
            for v in &mut self.values {
                *v /= max_value;
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.dims.len().min(self.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Geometry for a `size × size` square. Values are taken as fractions of
    /// the radius.
    pub fn layout(&self, size: f64) -> GlyphLayout {
        let n = self.len();
        let c = size / 2.0;
        let center = Point::new(c, c);
        let radius = c * RADIUS_FRACTION;
        let angles: Vec<f64> = (0..n).map(|i| spoke_angle(i, n)).collect();
        GlyphLayout {
            center,
            radius,
            axis_ends: angles.iter().map(|&a| center.polar(radius, a)).collect(),
            vertices: angles
                .iter()
                .zip(&self.values)
                .map(|(&a, &v)| center.polar(v * radius, a))
                .collect(),
            label_positions: angles
                .iter()
                .map(|&a| center.polar(radius + LABEL_OFFSET, a))
                .collect(),
            rings: (1..=GRID_RINGS)
                .map(|k| k as f64 / GRID_RINGS as f64 * radius)
                .collect(),
        }
    }
}

/// Render the glyph centred in `viewport`, sized to its shorter side.
pub fn render_star_glyph(glyph: &StarGlyph, viewport: &Viewport) -> Vec<RenderCommand> {
    if glyph.is_empty() || !viewport.is_drawable() {
        return Vec::new();
    }
    let size = viewport.width.min(viewport.height);
    let dx = (viewport.width - size) / 2.0;
    let dy = (viewport.height - size) / 2.0;
    let shift = |p: Point| Point::new(p.x + dx, p.y + dy);
    let layout = glyph.layout(size);
    let center = shift(layout.center);
    let label_stride = glyph.len().div_ceil(MAX_LABELS).max(1);

    let mut commands = Vec::with_capacity(glyph.len() * 4 + GRID_RINGS + 4);
    commands.push(RenderCommand::BeginGroup {
        id: "star-glyph".into(),
        label: None,
    });

    for &r in &layout.rings {
        commands.push(RenderCommand::DrawCircle {
            center,
            radius: r,
            fill: None,
            stroke: Some(ThemeToken::GlyphGrid),
            width: 1.0,
        });
    }
    for end in &layout.axis_ends {
        commands.push(RenderCommand::DrawLine {
            from: center,
            to: shift(*end),
            color: ThemeToken::SpokeLine,
            width: 1.0,
        });
    }
    for (i, (pos, dim)) in layout.label_positions.iter().zip(&glyph.dims).enumerate() {
        if i % label_stride != 0 {
            continue;
        }
        commands.push(RenderCommand::DrawText {
            position: shift(*pos),
            text: dim.clone(),
            color: ThemeToken::TextSecondary,
            font_size: FONT_SIZE,
            align: TextAlign::Center,
        });
    }

    let vertices: Vec<Point> = layout.vertices.iter().map(|p| shift(*p)).collect();
    commands.push(RenderCommand::DrawPolygon {
        points: vertices.clone(),
        fill: Some(ThemeToken::PolygonFill),
        stroke: Some(ThemeToken::PolygonStroke),
        width: 2.0,
    });
    for p in vertices {
        commands.push(RenderCommand::DrawCircle {
            center: p,
            radius: VERTEX_RADIUS,
            fill: Some(ThemeToken::PolygonStroke),
            stroke: None,
            width: 0.0,
        });
    }

    commands.push(RenderCommand::EndGroup);
    commands
}
