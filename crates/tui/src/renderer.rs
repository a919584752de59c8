use std::io::stdout;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eeg_cloud_protocol::{ChannelHue, Point, RenderCommand, TextAlign, ThemeToken, Viewport};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};

use crate::state::TuiState;

/// Layout units per terminal cell. Views lay out in these units, then get
/// scaled down to cells.
const CELL_W: f64 = 8.0;
const CELL_H: f64 = 16.0;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::ChannelStroke(hue) | ThemeToken::ChannelFill(hue) => match hue {
            ChannelHue::Excitement => Color::Rgb(255, 99, 132),
            ChannelHue::Valence => Color::Rgb(54, 162, 235),
            ChannelHue::Arousal => Color::Rgb(75, 192, 192),
            ChannelHue::Expectation => Color::Rgb(255, 205, 86),
            ChannelHue::Neutral => Color::Gray,
        },
        ThemeToken::PolygonFill | ThemeToken::PolygonStroke => Color::Rgb(75, 192, 75),
        ThemeToken::BarFill => Color::Rgb(0x54, 0x70, 0xc6),
        ThemeToken::BarSelected => Color::Rgb(0xee, 0x66, 0x66),
        ThemeToken::ChartBackground
        | ThemeToken::PlotBackground
        | ThemeToken::Background
        | ThemeToken::Surface => Color::Black,
        ThemeToken::GridLine | ThemeToken::GlyphGrid | ThemeToken::Border => Color::DarkGray,
        ThemeToken::AxisLine | ThemeToken::SpokeLine => Color::Gray,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::HoverHighlight => Color::LightYellow,
        ThemeToken::Error => Color::LightRed,
    }
}

/// The layout viewport for a cell area.
pub fn viewport_for(area: Rect) -> Viewport {
    Viewport::sized(f64::from(area.width) * CELL_W, f64::from(area.height) * CELL_H)
}

/// Maps layout coordinates to cells of `area` and writes into `buf`.
struct CellCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    clip: Rect,
}

impl CellCanvas<'_> {
    fn cell_of(&self, p: Point) -> Option<(u16, u16)> {
        let col = (p.x / CELL_W).floor();
        let row = (p.y / CELL_H).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let x = self.area.x.checked_add(col as u16)?;
        let y = self.area.y.checked_add(row as u16)?;
        let inside = x >= self.clip.x
            && x < self.clip.right()
            && y >= self.clip.y
            && y < self.clip.bottom();
        inside.then_some((x, y))
    }

    fn put(&mut self, p: Point, ch: char, color: Color) {
        if let Some(pos) = self.cell_of(p)
            && let Some(cell) = self.buf.cell_mut(pos)
        {
            cell.set_char(ch).set_fg(color);
        }
    }

    fn line(&mut self, from: Point, to: Point, ch: char, color: Color) {
        let steps = ((to.x - from.x).abs() / CELL_W)
            .max((to.y - from.y).abs() / CELL_H)
            .ceil()
            .max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let p = Point::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            self.put(p, ch, color);
        }
    }

    fn text(&mut self, position: Point, text: &str, align: TextAlign, color: Color) {
        let width = text.chars().count() as f64 * CELL_W;
        let start_x = match align {
            TextAlign::Left => position.x,
            TextAlign::Center => position.x - width / 2.0,
            TextAlign::Right => position.x - width,
        };
        for (i, ch) in text.chars().enumerate() {
            self.put(Point::new(start_x + i as f64 * CELL_W, position.y), ch, color);
        }
    }

    fn clip_to(&mut self, rect: eeg_cloud_protocol::Rect) {
        let x0 = self.area.x.saturating_add((rect.x / CELL_W).max(0.0) as u16);
        let y0 = self.area.y.saturating_add((rect.y / CELL_H).max(0.0) as u16);
        let x1 = self.area.x.saturating_add((rect.right() / CELL_W).ceil().max(0.0) as u16);
        let y1 = self.area.y.saturating_add((rect.bottom() / CELL_H).ceil().max(0.0) as u16);
        self.clip = Rect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
            .intersection(self.area);
    }
}

/// Rasterize `commands` into the cells of `area`.
///
/// Backgrounds are skipped, filled shapes are drawn as outlines, and markers
/// collapse to a single cell.
pub fn rasterize(commands: &[RenderCommand], area: Rect, buf: &mut Buffer) {
    let mut canvas = CellCanvas {
        buf,
        area,
        clip: area,
    };
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect, color, hit_id, ..
            } => {
                if matches!(
                    color,
                    ThemeToken::ChartBackground | ThemeToken::PlotBackground | ThemeToken::Background
                ) {
                    continue;
                }
                let fg = theme_to_color(*color);
                let ch = if hit_id.is_some() { '█' } else { '▪' };
                let mut y = rect.y + CELL_H / 2.0;
                loop {
                    let mut x = rect.x + CELL_W / 2.0;
                    loop {
                        canvas.put(Point::new(x, y), ch, fg);
                        x += CELL_W;
                        if x > rect.right() {
                            break;
                        }
                    }
                    y += CELL_H;
                    if y > rect.bottom() {
                        break;
                    }
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                ..
            } => canvas.text(*position, text, *align, theme_to_color(*color)),
            RenderCommand::DrawLine {
                from, to, color, ..
            } => canvas.line(*from, *to, '·', theme_to_color(*color)),
            RenderCommand::DrawPolyline { points, color, .. } => {
                let fg = theme_to_color(*color);
                for pair in points.windows(2) {
                    canvas.line(pair[0], pair[1], '•', fg);
                }
            }
            RenderCommand::DrawPolygon {
                points,
                fill,
                stroke,
                ..
            } => {
                let Some(token) = stroke.or(*fill) else {
                    continue;
                };
                let fg = theme_to_color(token);
                let ch = if fill.is_some() { '•' } else { '·' };
                for (i, p) in points.iter().enumerate() {
                    canvas.line(*p, points[(i + 1) % points.len()], ch, fg);
                }
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                fill,
                stroke,
                ..
            } => {
                let Some(token) = fill.or(*stroke) else {
                    continue;
                };
                let fg = theme_to_color(token);
                if *radius < CELL_W {
                    canvas.put(*center, '●', fg);
                    continue;
                }
                let steps = ((radius * std::f64::consts::TAU) / CELL_W).ceil().max(8.0) as usize;
                for i in 0..steps {
                    let angle = i as f64 / steps as f64 * std::f64::consts::TAU;
                    canvas.put(center.polar(*radius, angle), '·', fg);
                }
            }
            RenderCommand::SetClip { rect } => canvas.clip_to(*rect),
            RenderCommand::ClearClip => canvas.clip = area,
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }
}

pub fn run(state: &mut TuiState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut TuiState,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let header = Block::default()
                .title(format!(
                    " EEG Cloud | {} | Tab view | {} | q quit ",
                    state.view,
                    state.key_hint()
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let status_area = Rect::new(0, area.height.saturating_sub(1), area.width, 1);
            let content_area = Rect::new(0, 1, area.width, area.height.saturating_sub(2));
            frame.render_widget(Block::default().style(Style::default().bg(Color::Black)), content_area);

            let commands = state.commands(&viewport_for(content_area));
            rasterize(&commands, content_area, frame.buffer_mut());

            let status = Block::default()
                .title(state.status_line())
                .style(Style::default().fg(Color::Gray).bg(Color::Black));
            frame.render_widget(status, status_area);
        })?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Tab => state.next_view(),
                KeyCode::Char(c @ '1'..='9') => {
                    state.click_bar(c as usize - '1' as usize);
                }
                KeyCode::Char('0') => state.click_bar(9),
                KeyCode::Enter => state.click_cursor(),
                KeyCode::Backspace => state.back_to_year(),
                KeyCode::Left => state.step(-1),
                KeyCode::Right => state.step(1),
                KeyCode::Char('r') => state.reshuffle(),
                _ => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn text_lands_in_its_cell_row() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        let cmds = vec![RenderCommand::DrawText {
            position: Point::new(2.0 * CELL_W, 1.5 * CELL_H),
            text: "Score".into(),
            color: ThemeToken::TextPrimary,
            font_size: 11.0,
            align: TextAlign::Left,
        }];
        rasterize(&cmds, area, &mut buf);
        assert_eq!(&row_text(&buf, 1)[2..7], "Score");
    }

    #[test]
    fn clip_hides_outside_points() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        let cmds = vec![
            RenderCommand::SetClip {
                rect: eeg_cloud_protocol::Rect::new(0.0, 0.0, 3.0 * CELL_W, 2.0 * CELL_H),
            },
            RenderCommand::DrawLine {
                from: Point::new(0.0, 0.5 * CELL_H),
                to: Point::new(9.5 * CELL_W, 0.5 * CELL_H),
                color: ThemeToken::AxisLine,
                width: 1.0,
            },
            RenderCommand::ClearClip,
        ];
        rasterize(&cmds, area, &mut buf);
        let row = row_text(&buf, 0);
        assert!(row.starts_with("···"));
        assert_eq!(row.chars().filter(|c| *c == '·').count(), 3);
    }

    #[test]
    fn bars_fill_cells() {
        let area = Rect::new(0, 0, 4, 4);
        let mut buf = Buffer::empty(area);
        let cmds = vec![RenderCommand::DrawRect {
            rect: eeg_cloud_protocol::Rect::new(CELL_W, 2.0 * CELL_H, CELL_W, 2.0 * CELL_H),
            color: ThemeToken::BarFill,
            border_color: None,
            label: None,
            hit_id: Some(0),
        }];
        rasterize(&cmds, area, &mut buf);
        assert_eq!(buf[(1, 2)].symbol(), "█");
        assert_eq!(buf[(1, 3)].symbol(), "█");
        assert_eq!(buf[(1, 1)].symbol(), " ");
    }
}
