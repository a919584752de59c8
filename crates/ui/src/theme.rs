use egui::Color32;
use eeg_cloud_protocol::{ChannelHue, ThemeToken};

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> Color32 {
    resolve_rgba(token, mode).to_color32()
}

/// Channel colours are shared by both modes so a trace keeps its identity
/// when the theme flips.
fn channel(hue: ChannelHue, alpha: u8) -> ResolvedColor {
    match hue {
        ChannelHue::Excitement => ResolvedColor::rgba(255, 99, 132, alpha),
        ChannelHue::Valence => ResolvedColor::rgba(54, 162, 235, alpha),
        ChannelHue::Arousal => ResolvedColor::rgba(75, 192, 192, alpha),
        ChannelHue::Expectation => ResolvedColor::rgba(255, 205, 86, alpha),
        ChannelHue::Neutral => ResolvedColor::rgba(0x88, 0x88, 0x88, alpha),
    }
}

pub fn resolve_rgba(token: ThemeToken, mode: ThemeMode) -> ResolvedColor {
    use ThemeToken::*;
    match (token, mode) {
        (ChannelStroke(hue), _) => channel(hue, 255),
        (ChannelFill(hue), _) => channel(hue, 128),
        (PolygonFill, _) => ResolvedColor::rgba(75, 192, 75, 77),
        (PolygonStroke, _) => ResolvedColor::rgb(75, 192, 75),
        (BarFill, _) => ResolvedColor::rgb(0x54, 0x70, 0xc6),
        (BarSelected, _) => ResolvedColor::rgb(0xee, 0x66, 0x66),

        // Catppuccin Mocha
        (ChartBackground, ThemeMode::Dark) => ResolvedColor::rgb(0x1e, 0x1e, 0x2e), // Base
        (PlotBackground, ThemeMode::Dark) => ResolvedColor::rgb(0x18, 0x18, 0x25),  // Mantle
        (GridLine | GlyphGrid, ThemeMode::Dark) => ResolvedColor::rgb(0x31, 0x32, 0x44), // Surface0
        (AxisLine | SpokeLine, ThemeMode::Dark) => ResolvedColor::rgb(0x6c, 0x70, 0x86), // Overlay0
        (TextPrimary, ThemeMode::Dark) => ResolvedColor::rgb(0xcd, 0xd6, 0xf4),
        (TextSecondary, ThemeMode::Dark) => ResolvedColor::rgb(0xba, 0xc2, 0xde),
        (TextMuted, ThemeMode::Dark) => ResolvedColor::rgb(0xa6, 0xad, 0xc8),
        (HoverHighlight, ThemeMode::Dark) => ResolvedColor::rgba(0xcd, 0xd6, 0xf4, 25),
        (Background, ThemeMode::Dark) => ResolvedColor::rgb(0x11, 0x11, 0x1b), // Crust
        (Surface, ThemeMode::Dark) => ResolvedColor::rgb(0x18, 0x18, 0x25),
        (Border, ThemeMode::Dark) => ResolvedColor::rgb(0x31, 0x32, 0x44),
        (Error, ThemeMode::Dark) => ResolvedColor::rgb(0xf3, 0x8b, 0xa8), // Red

        (ChartBackground, ThemeMode::Light) => ResolvedColor::rgb(255, 255, 255),
        (PlotBackground, ThemeMode::Light) => ResolvedColor::rgb(250, 250, 252),
        (GridLine | GlyphGrid, ThemeMode::Light) => ResolvedColor::rgb(224, 224, 230),
        (AxisLine | SpokeLine, ThemeMode::Light) => ResolvedColor::rgb(150, 150, 160),
        (TextPrimary, ThemeMode::Light) => ResolvedColor::rgb(20, 20, 30),
        (TextSecondary, ThemeMode::Light) => ResolvedColor::rgb(80, 80, 100),
        (TextMuted, ThemeMode::Light) => ResolvedColor::rgb(100, 100, 110),
        (HoverHighlight, ThemeMode::Light) => ResolvedColor::rgba(0, 0, 0, 15),
        (Background, ThemeMode::Light) => ResolvedColor::rgb(255, 255, 255),
        (Surface, ThemeMode::Light) => ResolvedColor::rgb(245, 245, 248),
        (Border, ThemeMode::Light) => ResolvedColor::rgb(210, 210, 220),
        (Error, ThemeMode::Light) => ResolvedColor::rgb(211, 47, 47),
    }
}

// ── Typography scale ───────────────────────────────────────────────────────

pub const FONT_DISPLAY: f32 = 28.0;
pub const FONT_TITLE: f32 = 18.0;
pub const FONT_BODY: f32 = 13.0;
pub const FONT_CAPTION: f32 = 11.0;

// ── egui visual presets ────────────────────────────────────────────────────

pub fn visuals(mode: ThemeMode) -> egui::Visuals {
    let accent = match mode {
        ThemeMode::Dark => Color32::from_rgb(0x89, 0xb4, 0xfa),
        ThemeMode::Light => Color32::from_rgb(50, 110, 220),
    };
    let mut v = match mode {
        ThemeMode::Dark => {
            let mut v = egui::Visuals::dark();
            v.panel_fill = Color32::from_rgb(0x18, 0x18, 0x25);
            v.window_fill = Color32::from_rgb(0x1e, 0x1e, 0x2e);
            v.extreme_bg_color = Color32::from_rgb(0x11, 0x11, 0x1b);
            v.widgets.inactive.bg_fill = Color32::from_rgb(0x45, 0x47, 0x5a);
            v.widgets.hovered.bg_fill = Color32::from_rgb(0x58, 0x5b, 0x70);
            v.error_fg_color = Color32::from_rgb(0xf3, 0x8b, 0xa8);
            v
        }
        ThemeMode::Light => {
            let mut v = egui::Visuals::light();
            v.panel_fill = Color32::from_rgb(250, 250, 252);
            v.window_fill = Color32::WHITE;
            v.widgets.inactive.bg_fill = Color32::from_rgb(230, 230, 235);
            v.widgets.hovered.bg_fill = Color32::from_rgb(220, 220, 228);
            v.error_fg_color = Color32::from_rgb(211, 47, 47);
            v
        }
    };
    v.selection.bg_fill = accent.gamma_multiply(0.3);
    v.selection.stroke = egui::Stroke::new(1.0, accent);
    v.hyperlink_color = accent;
    v.window_corner_radius = egui::CornerRadius::same(6);
    v.widgets.inactive.corner_radius = egui::CornerRadius::same(5);
    v.widgets.hovered.corner_radius = egui::CornerRadius::same(5);
    v.widgets.active.corner_radius = egui::CornerRadius::same(5);
    v
}

pub fn apply_typography(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    for (text_style, font) in [
        (egui::TextStyle::Heading, egui::FontId::proportional(FONT_TITLE)),
        (egui::TextStyle::Body, egui::FontId::proportional(FONT_BODY)),
        (egui::TextStyle::Button, egui::FontId::proportional(FONT_BODY)),
        (egui::TextStyle::Small, egui::FontId::proportional(FONT_CAPTION)),
        (egui::TextStyle::Monospace, egui::FontId::monospace(FONT_CAPTION)),
    ] {
        style.text_styles.insert(text_style, font);
    }
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_colours_ignore_mode() {
        let token = ThemeToken::ChannelStroke(ChannelHue::Excitement);
        assert_eq!(
            resolve_rgba(token, ThemeMode::Dark),
            resolve_rgba(token, ThemeMode::Light)
        );
        assert_eq!(
            resolve_rgba(token, ThemeMode::Dark),
            ResolvedColor::rgb(255, 99, 132)
        );
    }

    #[test]
    fn toggle_flips() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert!(!ThemeMode::Light.is_dark());
    }
}
