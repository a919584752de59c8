use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::HistoryError;

/// Drill-down level of the history panel, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Year,
    Month,
    Week,
    Day,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [Self::Year, Self::Month, Self::Week, Self::Day];

    /// The next finer level, or `None` at `Day`.
    pub fn drill_down(self) -> Option<Self> {
        match self {
            Self::Year => Some(Self::Month),
            Self::Month => Some(Self::Week),
            Self::Week => Some(Self::Day),
            Self::Day => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::Month => "Month",
            Self::Week => "Week",
            Self::Day => "Day",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Granularity {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            "day" => Ok(Self::Day),
            _ => Err(HistoryError::UnknownGranularity(s.to_string())),
        }
    }
}
