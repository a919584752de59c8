use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// Chart views emit a `Vec<RenderCommand>`. Renderers (egui, SVG, terminal)
/// consume the list sequentially; each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally with a tooltip label and a hit id
    /// (bar index for click-through).
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        label: Option<String>,
        hit_id: Option<u64>,
    },

    /// Draw a text string anchored at a position.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Draw an open path through `points`.
    DrawPolyline {
        points: Vec<Point>,
        color: ThemeToken,
        width: f64,
    },

    /// Draw a closed polygon. Either `fill` or `stroke` may be absent.
    DrawPolygon {
        points: Vec<Point>,
        fill: Option<ThemeToken>,
        stroke: Option<ThemeToken>,
        width: f64,
    },

    /// Draw a circle (grid rings, point markers).
    DrawCircle {
        center: Point,
        radius: f64,
        fill: Option<ThemeToken>,
        stroke: Option<ThemeToken>,
        width: f64,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Begin a logical group (a chart, a legend). Renderers may ignore it.
    BeginGroup { id: String, label: Option<String> },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl RenderCommand {
    /// Hit id carried by this command, if any.
    pub fn hit_id(&self) -> Option<u64> {
        match self {
            Self::DrawRect { hit_id, .. } => *hit_id,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_survive_json_boundary() {
        let cmd = RenderCommand::DrawPolygon {
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 8.0)],
            fill: Some(ThemeToken::PolygonFill),
            stroke: Some(ThemeToken::PolygonStroke),
            width: 2.0,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("DrawPolygon"));
        let back: RenderCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn only_rects_carry_hit_ids() {
        let rect = RenderCommand::DrawRect {
            rect: Rect::new(0.0, 0.0, 4.0, 4.0),
            color: ThemeToken::BarFill,
            border_color: None,
            label: None,
            hit_id: Some(3),
        };
        assert_eq!(rect.hit_id(), Some(3));
        assert_eq!(RenderCommand::EndGroup.hit_id(), None);
    }
}
