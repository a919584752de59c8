pub mod axis;
pub mod frame;
pub mod history_bars;
pub mod line_chart;
pub mod radar;
pub mod star_glyph;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use history_bars::render_history;
pub use line_chart::render_line_chart;
pub use radar::render_radar;
pub use star_glyph::{StarGlyph, render_star_glyph};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view: {0}")]
pub struct UnknownView(pub String);

/// The chart views every front-end can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    #[default]
    Line,
    Radar,
    StarGlyph,
    History,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [Self::Line, Self::Radar, Self::StarGlyph, Self::History];

    pub fn label(self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Radar => "Polygon",
            Self::StarGlyph => "Star glyph",
            Self::History => "History",
        }
    }

    /// The next view in tab order, wrapping around.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|v| *v == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewKind {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "radar" | "polygon" => Ok(Self::Radar),
            "glyph" | "star" | "star-glyph" => Ok(Self::StarGlyph),
            "history" => Ok(Self::History),
            _ => Err(UnknownView(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("polygon".parse::<ViewKind>(), Ok(ViewKind::Radar));
        assert_eq!("Glyph".parse::<ViewKind>(), Ok(ViewKind::StarGlyph));
        assert_eq!(
            "pie".parse::<ViewKind>(),
            Err(UnknownView("pie".into()))
        );
        assert_eq!(
            UnknownView("pie".into()).to_string(),
            "unknown view: pie"
        );
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(ViewKind::Line.next(), ViewKind::Radar);
        assert_eq!(ViewKind::History.next(), ViewKind::Line);
    }
}
