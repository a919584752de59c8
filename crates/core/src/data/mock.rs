use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::columnar::{ColumnarError, buffer_to_columnar};
use crate::model::EegData;

/// The four metrics every preset carries, in display order.
pub const CORE_CHANNELS: [&str; 4] = ["excitement", "valence", "arousal", "expectation"];

/// Placeholder names for the two extra dimensions of the six-channel presets.
pub const EXTRA_CHANNELS: [&str; 2] = ["E", "F"];

/// Canned synthetic recordings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MockPreset {
    /// Four metrics in `[0, 100)`; feeds the line plot.
    FourChannel,
    /// Four metrics plus `E`/`F` in `[0, 1)`; feeds the polygon chart and star glyph.
    SixChannel,
    /// Six channels in `[0, 10)`.
    Realtime,
}

impl MockPreset {
    pub fn spec(self, rows: usize, sampling_rate_hz: f64) -> MockSpec {
        let (channels, range) = match self {
            Self::FourChannel => (CORE_CHANNELS.to_vec(), 0.0..100.0),
            Self::SixChannel => (six_channels(), 0.0..1.0),
            Self::Realtime => (six_channels(), 0.0..10.0),
        };
        MockSpec {
            rows,
            sampling_rate_hz,
            channels: channels.into_iter().map(str::to_string).collect(),
            range,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "four-channel" | "4" => Some(Self::FourChannel),
            "six-channel" | "6" => Some(Self::SixChannel),
            "realtime" => Some(Self::Realtime),
            _ => None,
        }
    }
}

fn six_channels() -> Vec<&'static str> {
    CORE_CHANNELS.iter().chain(EXTRA_CHANNELS.iter()).copied().collect()
}

/// Shape of a synthetic recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockSpec {
    pub rows: usize,
    pub sampling_rate_hz: f64,
    pub channels: Vec<String>,
    pub range: Range<f64>,
}

/// Default preset shape: 60 one-second samples.
pub fn generate(preset: MockPreset, rng: &mut impl Rng) -> Result<EegData, ColumnarError> {
    generate_with(&preset.spec(60, 1.0), rng)
}

/// Fill a `rows × channels` buffer with uniform values and convert it.
pub fn generate_with(spec: &MockSpec, rng: &mut impl Rng) -> Result<EegData, ColumnarError> {
    let Range { start, end } = spec.range;
    let span = (end - start).max(0.0);
    let rows: Vec<Vec<f64>> = (0..spec.rows)
        .map(|_| {
            (0..spec.channels.len())
                .map(|_| start + rng.r#gen::<f64>() * span)
                .collect()
        })
        .collect();

    log::debug!(
        "generated {} rows x {} channels in [{start}, {end})",
        spec.rows,
        spec.channels.len()
    );
    buffer_to_columnar(&rows, spec.sampling_rate_hz, &spec.channels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn presets_have_expected_shape_and_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for (preset, width, hi) in [
            (MockPreset::FourChannel, 4, 100.0),
            (MockPreset::SixChannel, 6, 1.0),
            (MockPreset::Realtime, 6, 10.0),
        ] {
            let data = generate(preset, &mut rng).expect("mock data");
            assert_eq!(data.len(), 60);
            assert_eq!(data.channels().len(), width);
            assert!((data.time()[59] - 59.0).abs() < f64::EPSILON);
            for ch in data.channels() {
                assert!(ch.samples.iter().all(|v| (0.0..hi).contains(v)), "{preset:?}");
            }
        }
    }

    #[test]
    fn six_channel_names_in_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = generate(MockPreset::SixChannel, &mut rng).expect("mock data");
        assert_eq!(
            data.channel_names().collect::<Vec<_>>(),
            vec!["excitement", "valence", "arousal", "expectation", "E", "F"]
        );
    }

    #[test]
    fn same_seed_same_data() {
        let a = generate(MockPreset::FourChannel, &mut StdRng::seed_from_u64(42));
        let b = generate(MockPreset::FourChannel, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn custom_spec_respects_rows_and_rate() {
        let spec = MockPreset::FourChannel.spec(10, 4.0);
        let data = generate_with(&spec, &mut StdRng::seed_from_u64(3)).expect("mock data");
        assert_eq!(data.len(), 10);
        assert!((data.time()[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn parses_preset_names() {
        assert_eq!(MockPreset::parse("six-channel"), Some(MockPreset::SixChannel));
        assert_eq!(MockPreset::parse("bogus"), None);
    }
}
