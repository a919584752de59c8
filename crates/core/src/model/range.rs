use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported input, please re-enter.")]
pub struct RangeError;

/// Half-open sample window `[start, end)` for the line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRange {
    pub start: usize,
    pub end: usize,
}

impl SampleRange {
    /// The whole recording.
    pub fn full(len: usize) -> Self {
        Self { start: 0, end: len }
    }

    /// Validate the start/end text fields.
    ///
    /// Both must be integers with `0 <= start < end <= max`.
    pub fn parse(start: &str, end: &str, max: usize) -> Result<Self, RangeError> {
        let s = parse_integer(start)?;
        let e = parse_integer(end)?;
        if s < 0 || e > max as i64 || s >= e {
            return Err(RangeError);
        }
        Ok(Self {
            start: s as usize,
            end: e as usize,
        })
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Slice `values` to this window, clamped to its length.
    pub fn slice<'a, T>(&self, values: &'a [T]) -> &'a [T] {
        let end = self.end.min(values.len());
        let start = self.start.min(end);
        &values[start..end]
    }
}

fn parse_integer(text: &str) -> Result<i64, RangeError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(RangeError);
    }
    // Accept "5" and "5.0" like a numeric input would, reject "5.5".
    if let Ok(v) = text.parse::<i64>() {
        return Ok(v);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
        _ => Err(RangeError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_window() {
        assert_eq!(
            SampleRange::parse("10", "20", 60),
            Ok(SampleRange { start: 10, end: 20 })
        );
        assert_eq!(SampleRange::parse("0", "60", 60), Ok(SampleRange::full(60)));
        assert_eq!(SampleRange::parse("3.0", "4", 60).map(|r| r.len()), Ok(1));
    }

    #[test]
    fn rejects_bad_input() {
        for (s, e) in [
            ("", "10"),
            ("0", ""),
            ("abc", "10"),
            ("1.5", "10"),
            ("-1", "10"),
            ("0", "61"),
            ("10", "10"),
            ("20", "10"),
            ("NaN", "10"),
        ] {
            assert_eq!(SampleRange::parse(s, e, 60), Err(RangeError), "{s}..{e}");
        }
        assert_eq!(RangeError.to_string(), "Unsupported input, please re-enter.");
    }

    #[test]
    fn slice_clamps() {
        let values = [1, 2, 3, 4];
        assert_eq!(SampleRange { start: 1, end: 3 }.slice(&values), &[2, 3]);
        assert_eq!(SampleRange { start: 2, end: 9 }.slice(&values), &[3, 4]);
    }
}
