//! SVG renderer: turns a `RenderCommand` list into a standalone SVG document.

use std::fmt::Write as _;

use eeg_cloud_protocol::{ChannelHue, Point, RenderCommand, TextAlign, ThemeToken};

/// Render `commands` as an SVG document of `width × height`.
///
/// `dark` picks the palette. Clip commands become nested `<g clip-path>`
/// groups; logical groups become `<g>` elements carrying the group id.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 120 + 256);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    );
    let _ = write!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        resolve_color(ThemeToken::Background, dark),
    );

    let mut clip_count = 0usize;
    let mut clip_open = false;
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
                ..
            } => {
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"{}>"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    resolve_color(*color, dark),
                    stroke_attr(*border_color, 1.0, dark),
                );
                if let Some(label) = label {
                    let _ = write!(svg, "<title>{}</title>", escape_xml(label));
                }
                svg.push_str("</rect>");
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
            } => {
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{width}"/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    resolve_color(*color, dark),
                );
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
            } => {
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{}" font-size="{font_size}" text-anchor="{anchor}" dominant-baseline="middle">{}</text>"#,
                    position.x,
                    position.y,
                    resolve_color(*color, dark),
                    escape_xml(text),
                );
            }
            RenderCommand::DrawPolyline {
                points,
                color,
                width,
            } => {
                let _ = write!(
                    svg,
                    r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{width}"/>"#,
                    points_attr(points),
                    resolve_color(*color, dark),
                );
            }
            RenderCommand::DrawPolygon {
                points,
                fill,
                stroke,
                width,
            } => {
                let fill = fill.map_or("none", |t| resolve_color(t, dark));
                let _ = write!(
                    svg,
                    r#"<polygon points="{}" fill="{fill}"{}/>"#,
                    points_attr(points),
                    stroke_attr(*stroke, *width, dark),
                );
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                fill,
                stroke,
                width,
            } => {
                let fill = fill.map_or("none", |t| resolve_color(t, dark));
                let _ = write!(
                    svg,
                    r#"<circle cx="{}" cy="{}" r="{radius}" fill="{fill}"{}/>"#,
                    center.x,
                    center.y,
                    stroke_attr(*stroke, *width, dark),
                );
            }
            RenderCommand::SetClip { rect } => {
                if clip_open {
                    svg.push_str("</g>");
                }
                clip_count += 1;
                let _ = write!(
                    svg,
                    r#"<clipPath id="clip{clip_count}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{clip_count})">"#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                clip_open = true;
            }
            RenderCommand::ClearClip => {
                if clip_open {
                    svg.push_str("</g>");
                    clip_open = false;
                }
            }
            RenderCommand::BeginGroup { id, .. } => {
                let _ = write!(svg, r#"<g id="{}">"#, escape_xml(id));
            }
            RenderCommand::EndGroup => svg.push_str("</g>"),
        }
    }
    if clip_open {
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

fn points_attr(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", p.x, p.y);
    }
    out
}

fn stroke_attr(token: Option<ThemeToken>, width: f64, dark: bool) -> String {
    match token {
        Some(t) => format!(
            r#" stroke="{}" stroke-width="{width}""#,
            resolve_color(t, dark)
        ),
        None => String::new(),
    }
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    match token {
        ThemeToken::ChannelStroke(hue) => match hue {
            ChannelHue::Excitement => "rgb(255,99,132)",
            ChannelHue::Valence => "rgb(54,162,235)",
            ChannelHue::Arousal => "rgb(75,192,192)",
            ChannelHue::Expectation => "rgb(255,205,86)",
            ChannelHue::Neutral => "#888888",
        },
        ThemeToken::ChannelFill(hue) => match hue {
            ChannelHue::Excitement => "rgba(255,99,132,0.5)",
            ChannelHue::Valence => "rgba(54,162,235,0.5)",
            ChannelHue::Arousal => "rgba(75,192,192,0.5)",
            ChannelHue::Expectation => "rgba(255,205,86,0.5)",
            ChannelHue::Neutral => "rgba(136,136,136,0.5)",
        },
        ThemeToken::PolygonFill => "rgba(75,192,75,0.3)",
        ThemeToken::PolygonStroke => "rgb(75,192,75)",
        ThemeToken::BarFill => "#5470c6",
        ThemeToken::BarSelected => "#ee6666",
        ThemeToken::Error => "#e53935",
        _ if dark => match token {
            ThemeToken::ChartBackground | ThemeToken::Background => "#181818",
            ThemeToken::PlotBackground | ThemeToken::Surface => "#202020",
            ThemeToken::GridLine | ThemeToken::GlyphGrid => "#3a3a3a",
            ThemeToken::AxisLine | ThemeToken::SpokeLine | ThemeToken::Border => "#616161",
            ThemeToken::TextPrimary => "#ececec",
            ThemeToken::TextSecondary | ThemeToken::TextMuted => "#9e9e9e",
            ThemeToken::HoverHighlight => "#448aff",
            _ => "#616161",
        },
        _ => match token {
            ThemeToken::ChartBackground | ThemeToken::Background => "#ffffff",
            ThemeToken::PlotBackground | ThemeToken::Surface => "#f8f9fa",
            ThemeToken::GridLine | ThemeToken::GlyphGrid => "#e0e0e0",
            ThemeToken::AxisLine | ThemeToken::SpokeLine | ThemeToken::Border => "#999999",
            ThemeToken::TextPrimary => "#1a1a2e",
            ThemeToken::TextSecondary | ThemeToken::TextMuted => "#666677",
            ThemeToken::HoverHighlight => "#ffd60a",
            _ => "#999999",
        },
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use eeg_cloud_protocol::Rect;

    #[test]
    fn basic_svg_output() {
        let commands = vec![
            RenderCommand::DrawRect {
                rect: Rect::new(10.0, 20.0, 100.0, 18.0),
                color: ThemeToken::BarFill,
                border_color: None,
                label: Some("Jan: 42".into()),
                hit_id: Some(0),
            },
            RenderCommand::DrawPolyline {
                points: vec![Point::new(0.0, 0.0), Point::new(5.0, 2.5)],
                color: ThemeToken::ChannelStroke(ChannelHue::Valence),
                width: 1.0,
            },
        ];
        let svg = render_svg(&commands, 800.0, 400.0, true);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("<title>Jan: 42</title>"));
        assert!(svg.contains(r#"points="0,0 5,2.5""#));
        assert!(svg.contains("rgb(54,162,235)"));
    }

    #[test]
    fn escapes_xml_entities() {
        let commands = vec![RenderCommand::DrawText {
            position: Point::new(0.0, 0.0),
            text: "a<b & \"c\"".into(),
            color: ThemeToken::TextPrimary,
            font_size: 11.0,
            align: TextAlign::Right,
        }];
        let svg = render_svg(&commands, 400.0, 100.0, false);
        assert!(svg.contains("a&lt;b &amp; &quot;c&quot;"));
        assert!(svg.contains(r#"text-anchor="end""#));
    }

    #[test]
    fn clip_groups_are_balanced() {
        let commands = vec![
            RenderCommand::BeginGroup {
                id: "line-chart".into(),
                label: None,
            },
            RenderCommand::SetClip {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            },
            RenderCommand::DrawCircle {
                center: Point::new(1.0, 1.0),
                radius: 2.0,
                fill: None,
                stroke: Some(ThemeToken::GlyphGrid),
                width: 1.0,
            },
            RenderCommand::ClearClip,
            RenderCommand::EndGroup,
        ];
        let svg = render_svg(&commands, 10.0, 10.0, false);
        assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
        assert!(svg.contains(r##"fill="none" stroke="#e0e0e0""##));
    }
}
