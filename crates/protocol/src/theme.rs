use serde::{Deserialize, Serialize};

/// Per-channel colour family. Renderers map each hue to a concrete colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelHue {
    Excitement,
    Valence,
    Arousal,
    Expectation,
    Neutral,
}

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    /// Opaque channel colour (line strokes, legend swatches).
    ChannelStroke(ChannelHue),
    /// Translucent channel colour.
    ChannelFill(ChannelHue),

    ChartBackground,
    PlotBackground,
    GridLine,
    AxisLine,

    TextPrimary,
    TextSecondary,
    TextMuted,

    // Radar / star glyph
    PolygonFill,
    PolygonStroke,
    SpokeLine,
    GlyphGrid,

    // History bars
    BarFill,
    BarSelected,
    HoverHighlight,

    Background,
    Surface,
    Border,
    Error,
}
