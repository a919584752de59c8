//! Integration test: load a recording, drive every chart view through the SVG
//! renderer, and walk the history panel from a year down to a single session.

use chrono::NaiveDate;
use eeg_cloud_core::data::{MockPreset, generate};
use eeg_cloud_core::history::{ClickOutcome, Granularity, HistoryPanel};
use eeg_cloud_core::model::{ChannelSelection, EegData, SampleRange, clamp_second};
use eeg_cloud_core::protocol::{RenderCommand, Viewport};
use eeg_cloud_core::svg::render_svg;
use eeg_cloud_core::views::{StarGlyph, render_history, render_line_chart, render_radar, render_star_glyph};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn recording() -> EegData {
    let bytes = include_str!("fixtures/recording.json");
    serde_json::from_str(bytes).expect("fixture should parse")
}

fn texts(commands: &[RenderCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|c| match c {
            RenderCommand::DrawText { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn fixture_drives_every_chart() {
    let data = recording();
    assert_eq!(data.len(), 5);
    assert_eq!(data.channels().len(), 6);

    let vp = Viewport::sized(900.0, 600.0);
    let range = SampleRange::parse("1", "4", data.len()).expect("valid range");
    let line = render_line_chart(&data, range, &vp);
    let line_svg = render_svg(&line, vp.width, vp.height, false);
    assert!(line_svg.contains("EEG Metrics"));
    assert!(line_svg.contains("Time (s)"));
    assert_eq!(line_svg.matches("<polyline").count(), 6);

    let mut selection = ChannelSelection::all(data.channel_names());
    selection.toggle("F").expect("six selected, one may go");
    let second = clamp_second(99, data.len());
    assert_eq!(second, 4);
    let radar = render_radar(&data, &selection, second, &vp);
    let labels = texts(&radar);
    assert!(labels.iter().any(|t| t == "EEG Spectrum at 4s"));
    assert!(!labels.iter().any(|t| t == "F"));

    let glyph = StarGlyph::from_series(&data, "valence").expect("channel present");
    let glyph_cmds = render_star_glyph(&glyph, &Viewport::sized(500.0, 500.0));
    let glyph_svg = render_svg(&glyph_cmds, 500.0, 500.0, true);
    assert!(glyph_svg.contains("<polygon"));
    assert!(glyph_svg.contains("4.0s"));
}

#[test]
fn ragged_recording_is_rejected() {
    let json = r#"{"time":[0.0,1.0],"channels":[{"name":"a","samples":[1.0]}],"sampling_rate":1.0}"#;
    let err = serde_json::from_str::<EegData>(json).unwrap_err();
    assert!(err.to_string().contains("has 1 samples"));
}

#[test]
fn bad_range_input_keeps_message() {
    let err = SampleRange::parse("ten", "20", 60).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported input, please re-enter.");
}

#[test]
fn mock_presets_render() {
    let mut rng = StdRng::seed_from_u64(2025);
    let data = generate(MockPreset::SixChannel, &mut rng).expect("mock");
    let vp = Viewport::sized(640.0, 480.0);
    let selection = ChannelSelection::all(data.channel_names());
    assert!(!render_line_chart(&data, SampleRange::full(data.len()), &vp).is_empty());
    assert!(!render_radar(&data, &selection, 0, &vp).is_empty());
    let glyph = StarGlyph::from_sample(&data, 10).expect("sample").normalized(1.0);
    assert_eq!(glyph.len(), 6);
}

#[test]
fn history_drills_to_a_session() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 27).expect("date");
    let mut panel = HistoryPanel::with_seed(today, 42);
    let vp = Viewport::sized(800.0, 400.0);

    let year_bars = render_history(&panel, &vp)
        .iter()
        .filter(|c| c.hit_id().is_some())
        .count();
    assert_eq!(year_bars, 12);

    let outcome = panel.click(5).expect("june");
    assert_eq!(
        outcome,
        ClickOutcome::DrilledDown {
            granularity: Granularity::Month,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).expect("date"),
        }
    );
    panel.click(0).expect("first week");
    assert_eq!(panel.granularity(), Granularity::Week);
    panel.click(0).expect("first day");
    assert_eq!(panel.granularity(), Granularity::Day);

    let ClickOutcome::SessionSelected(session) = panel.click(0).expect("session") else {
        panic!("day view should select a session");
    };
    let summary = panel.session_summary().expect("summary");
    assert!(summary.starts_with(&panel.date().format("%Y-%m-%d").to_string()));
    assert!(summary.ends_with(&format!("Game 1 - Score: {}", session.score)));

    let svg = render_svg(&render_history(&panel, &vp), vp.width, vp.height, false);
    assert!(svg.contains("#ee6666"));
}
