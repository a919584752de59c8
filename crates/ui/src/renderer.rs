use egui::epaint::{Mesh, Vertex, WHITE_UV};
use egui::{Align2, Color32, CornerRadius, FontId, Pos2, Rect, Shape, Stroke, StrokeKind};
use eeg_cloud_protocol::{Point, RenderCommand, TextAlign};

use crate::theme::{self, ThemeMode};

/// A clickable region produced by a command with a hit id.
pub struct HitRegion {
    pub rect: Rect,
    pub hit_id: u64,
    pub label: Option<String>,
}

/// Result of rendering a command list: includes hit regions for interaction.
pub struct RenderResult {
    pub hit_regions: Vec<HitRegion>,
}

impl RenderResult {
    /// Topmost region under `pos`.
    pub fn hit_at(&self, pos: Pos2) -> Option<&HitRegion> {
        self.hit_regions.iter().rev().find(|r| r.rect.contains(pos))
    }
}

/// Render a list of `RenderCommand` into an egui `Painter`.
///
/// `offset` is the top-left pixel position of the chart area.
pub fn render_commands(
    painter: &mut egui::Painter,
    commands: &[RenderCommand],
    offset: Pos2,
    mode: ThemeMode,
) -> RenderResult {
    let to_pos = |p: &Point| Pos2::new(p.x as f32 + offset.x, p.y as f32 + offset.y);
    let mut clip_stack: Vec<Rect> = Vec::new();
    let mut hit_regions: Vec<HitRegion> = Vec::new();

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
                hit_id,
            } => {
                let egui_rect = Rect::from_min_size(
                    Pos2::new(rect.x as f32 + offset.x, rect.y as f32 + offset.y),
                    egui::vec2(rect.w as f32, rect.h as f32),
                );
                if !painter.clip_rect().intersects(egui_rect) {
                    continue;
                }
                painter.rect_filled(egui_rect, CornerRadius::ZERO, theme::resolve(*color, mode));
                if let Some(bc) = border_color {
                    painter.rect_stroke(
                        egui_rect,
                        CornerRadius::ZERO,
                        Stroke::new(1.0, theme::resolve(*bc, mode)),
                        StrokeKind::Inside,
                    );
                }
                if let Some(id) = hit_id {
                    hit_regions.push(HitRegion {
                        rect: egui_rect,
                        hit_id: *id,
                        label: label.clone(),
                    });
                }
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
            } => {
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_CENTER,
                    TextAlign::Center => Align2::CENTER_CENTER,
                    TextAlign::Right => Align2::RIGHT_CENTER,
                };
                painter.text(
                    to_pos(position),
                    anchor,
                    text,
                    FontId::proportional(*font_size as f32),
                    theme::resolve(*color, mode),
                );
            }

            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
            } => {
                painter.line_segment(
                    [to_pos(from), to_pos(to)],
                    Stroke::new(*width as f32, theme::resolve(*color, mode)),
                );
            }

            RenderCommand::DrawPolyline {
                points,
                color,
                width,
            } => {
                if points.len() < 2 {
                    continue;
                }
                painter.add(Shape::line(
                    points.iter().map(to_pos).collect(),
                    Stroke::new(*width as f32, theme::resolve(*color, mode)),
                ));
            }

            RenderCommand::DrawPolygon {
                points,
                fill,
                stroke,
                width,
            } => {
                let pts: Vec<Pos2> = points.iter().map(to_pos).collect();
                if pts.len() < 3 {
                    continue;
                }
                if let Some(fill) = fill {
                    painter.add(fan_mesh(&pts, theme::resolve(*fill, mode)));
                }
                if let Some(stroke) = stroke {
                    painter.add(Shape::closed_line(
                        pts,
                        Stroke::new(*width as f32, theme::resolve(*stroke, mode)),
                    ));
                }
            }

            RenderCommand::DrawCircle {
                center,
                radius,
                fill,
                stroke,
                width,
            } => {
                let c = to_pos(center);
                let r = *radius as f32;
                if let Some(fill) = fill {
                    painter.circle_filled(c, r, theme::resolve(*fill, mode));
                }
                if let Some(stroke) = stroke {
                    painter.circle_stroke(
                        c,
                        r,
                        Stroke::new(*width as f32, theme::resolve(*stroke, mode)),
                    );
                }
            }

            RenderCommand::SetClip { rect } => {
                let clip_rect = Rect::from_min_size(
                    Pos2::new(rect.x as f32 + offset.x, rect.y as f32 + offset.y),
                    egui::vec2(rect.w as f32, rect.h as f32),
                );
                clip_stack.push(painter.clip_rect());
                let intersected = painter.clip_rect().intersect(clip_rect);
                painter.set_clip_rect(intersected);
            }

            RenderCommand::ClearClip => {
                if let Some(prev) = clip_stack.pop() {
                    painter.set_clip_rect(prev);
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }

    // Leave the painter as we found it even if a view forgot a ClearClip.
    if let Some(first) = clip_stack.into_iter().next() {
        painter.set_clip_rect(first);
    }

    RenderResult { hit_regions }
}

/// Fill a polygon as a triangle fan around its vertex mean.
///
/// Radar and glyph shapes are star-shaped around their centre, which egui's
/// convex fill would get wrong.
fn fan_mesh(points: &[Pos2], color: Color32) -> Shape {
    let n = points.len() as f32;
    let mean = points
        .iter()
        .fold(egui::Vec2::ZERO, |acc, p| acc + p.to_vec2())
        / n;
    let mut mesh = Mesh::default();
    mesh.vertices.push(Vertex {
        pos: mean.to_pos2(),
        uv: WHITE_UV,
        color,
    });
    for p in points {
        mesh.vertices.push(Vertex {
            pos: *p,
            uv: WHITE_UV,
            color,
        });
    }
    let count = points.len() as u32;
    for i in 0..count {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % count);
    }
    Shape::mesh(mesh)
}
