use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("channel `{name}` has {actual} samples, time axis has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("duplicate channel name `{0}`")]
    DuplicateChannel(String),
    #[error("sampling rate must be positive and finite, got {0}")]
    InvalidRate(f64),
}

/// One named EEG channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub samples: Vec<f64>,
}

impl Channel {
    pub fn new(name: impl Into<String>, samples: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }
}

/// Columnar EEG data: a time axis in seconds plus named channels of the same
/// length, in insertion order.
///
/// Immutable once built. The shape invariant is checked on construction and
/// on deserialization, so every accessor can index channels by time index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEegData", into = "RawEegData")]
pub struct EegData {
    time: Vec<f64>,
    channels: Vec<Channel>,
    sampling_rate: f64,
}

#[derive(Serialize, Deserialize)]
struct RawEegData {
    time: Vec<f64>,
    channels: Vec<Channel>,
    sampling_rate: f64,
}

impl TryFrom<RawEegData> for EegData {
    type Error = ShapeError;

    fn try_from(raw: RawEegData) -> Result<Self, Self::Error> {
        Self::new(raw.time, raw.channels, raw.sampling_rate)
    }
}

impl From<EegData> for RawEegData {
    fn from(data: EegData) -> Self {
        Self {
            time: data.time,
            channels: data.channels,
            sampling_rate: data.sampling_rate,
        }
    }
}

impl Default for EegData {
    /// No samples, no channels, 1 Hz.
    fn default() -> Self {
        Self {
            time: Vec::new(),
            channels: Vec::new(),
            sampling_rate: 1.0,
        }
    }
}

impl EegData {
    pub fn new(
        time: Vec<f64>,
        channels: Vec<Channel>,
        sampling_rate: f64,
    ) -> Result<Self, ShapeError> {
        if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
            return Err(ShapeError::InvalidRate(sampling_rate));
        }
        for (i, ch) in channels.iter().enumerate() {
            if ch.samples.len() != time.len() {
                return Err(ShapeError::LengthMismatch {
                    name: ch.name.clone(),
                    expected: time.len(),
                    actual: ch.samples.len(),
                });
            }
            if channels[..i].iter().any(|c| c.name == ch.name) {
                return Err(ShapeError::DuplicateChannel(ch.name.clone()));
            }
        }
        Ok(Self {
            time,
            channels,
            sampling_rate,
        })
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|c| c.name.as_str())
    }

    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// Number of samples on the time axis.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Per-channel values at time index `index`, in channel order.
    pub fn sample(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.len() {
            return None;
        }
        Some(self.channels.iter().map(|c| c.samples[index]).collect())
    }

    /// Axis labels, one per sample (`"12.0s"`).
    pub fn time_labels(&self) -> Vec<String> {
        self.time.iter().map(|t| format!("{t:.1}s")).collect()
    }

    /// Largest value across all channels, or `None` when there are no samples.
    pub fn max_value(&self) -> Option<f64> {
        self.channels
            .iter()
            .flat_map(|c| c.samples.iter().copied())
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_channels() -> EegData {
        EegData::new(
            vec![0.0, 1.0, 2.0],
            vec![
                Channel::new("valence", vec![1.0, 2.0, 3.0]),
                Channel::new("arousal", vec![0.5, 0.25, 9.0]),
            ],
            1.0,
        )
        .expect("valid shape")
    }

    #[test]
    fn rejects_ragged_channels() {
        let err = EegData::new(
            vec![0.0, 1.0],
            vec![Channel::new("valence", vec![1.0])],
            1.0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ShapeError::LengthMismatch {
                name: "valence".into(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = EegData::new(
            vec![0.0],
            vec![Channel::new("E", vec![1.0]), Channel::new("E", vec![2.0])],
            1.0,
        )
        .unwrap_err();
        assert_eq!(err, ShapeError::DuplicateChannel("E".into()));
    }

    #[test]
    fn sample_reads_across_channels() {
        let data = two_channels();
        assert_eq!(data.sample(2), Some(vec![3.0, 9.0]));
        assert_eq!(data.sample(3), None);
        assert_eq!(data.max_value(), Some(9.0));
    }

    #[test]
    fn time_labels_use_one_decimal() {
        let labels = two_channels().time_labels();
        assert_eq!(labels, vec!["0.0s", "1.0s", "2.0s"]);
    }

    #[test]
    fn deserialization_enforces_shape() {
        let bad = r#"{"time":[0.0,1.0],"channels":[{"name":"a","samples":[1.0]}],"sampling_rate":1.0}"#;
        assert!(serde_json::from_str::<EegData>(bad).is_err());

        let json = serde_json::to_string(&two_channels()).expect("serialize");
        let back: EegData = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.channel_names().collect::<Vec<_>>(), vec!["valence", "arousal"]);
    }
}
