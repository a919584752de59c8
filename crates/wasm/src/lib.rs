//! JS bridge: datasets and history panels live in handle tables, views come
//! back as JSON render-command lists.

use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use eeg_cloud_core::auth::{self, LoginRequest};
use eeg_cloud_core::data::{MockPreset, buffer_to_columnar, generate_with};
use eeg_cloud_core::history::{Granularity, HistoryPanel};
use eeg_cloud_core::model::{ChannelSelection, EegData, SampleRange, clamp_second};
use eeg_cloud_core::views::{self, StarGlyph, ViewKind};
use eeg_cloud_protocol::{RenderCommand, Viewport};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

static DATASETS: Mutex<Vec<EegData>> = Mutex::new(Vec::new());
static PANELS: Mutex<Vec<HistoryPanel>> = Mutex::new(Vec::new());

const DEFAULT_ROWS: usize = 60;

fn lock<T>(table: &Mutex<T>) -> MutexGuard<'_, T> {
    table.lock().unwrap_or_else(|e| e.into_inner())
}

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(js_err)
}

fn push<T>(table: &Mutex<Vec<T>>, value: T) -> usize {
    let mut items = lock(table);
    items.push(value);
    items.len() - 1
}

fn with_dataset<R>(
    handle: usize,
    f: impl FnOnce(&EegData) -> Result<R, JsError>,
) -> Result<R, JsError> {
    let datasets = lock(&DATASETS);
    let data = datasets
        .get(handle)
        .ok_or_else(|| JsError::new("invalid dataset handle"))?;
    f(data)
}

fn with_panel<R>(
    handle: usize,
    f: impl FnOnce(&mut HistoryPanel) -> Result<R, JsError>,
) -> Result<R, JsError> {
    let mut panels = lock(&PANELS);
    let panel = panels
        .get_mut(handle)
        .ok_or_else(|| JsError::new("invalid history handle"))?;
    f(panel)
}

fn rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

fn commands_json(commands: &[RenderCommand]) -> Result<String, JsError> {
    to_json(commands)
}

/// Generate a mock recording (`four-channel`, `six-channel` or `realtime`).
/// Returns a dataset handle.
#[wasm_bindgen]
pub fn generate_dataset(
    preset: &str,
    rows: Option<usize>,
    seed: Option<u64>,
) -> Result<usize, JsError> {
    let preset =
        MockPreset::parse(preset).ok_or_else(|| JsError::new(&format!("unknown preset: {preset}")))?;
    let spec = preset.spec(rows.unwrap_or(DEFAULT_ROWS), 1.0);
    let data = generate_with(&spec, &mut rng(seed)).map_err(js_err)?;
    log::debug!("generated {preset:?} dataset with {} samples", data.len());
    Ok(push(&DATASETS, data))
}

/// Ingest a row-major buffer (JSON array of sample rows) as a dataset.
#[wasm_bindgen]
#[allow(clippy::needless_pass_by_value)]
pub fn load_rows(
    rows_json: &str,
    sampling_rate_hz: f64,
    channel_names: Vec<String>,
) -> Result<usize, JsError> {
    let rows: Vec<Vec<f64>> = serde_json::from_str(rows_json).map_err(js_err)?;
    let data = buffer_to_columnar(&rows, sampling_rate_hz, &channel_names).map_err(js_err)?;
    Ok(push(&DATASETS, data))
}

/// The columnar recording behind `handle`, as JSON.
#[wasm_bindgen]
pub fn dataset_json(handle: usize) -> Result<String, JsError> {
    with_dataset(handle, to_json)
}

/// Render `view` over the whole dataset with default controls: full range,
/// last second with every channel, glyph of the first channel.
/// `history` is not a dataset view; use [`history_render`].
#[wasm_bindgen]
pub fn render_view(handle: usize, view: &str, width: f64, height: f64) -> Result<String, JsError> {
    let view: ViewKind = view.parse().map_err(js_err)?;
    let viewport = Viewport::sized(width, height);
    with_dataset(handle, |data| {
        let commands = match view {
            ViewKind::Line => {
                views::render_line_chart(data, SampleRange::full(data.len()), &viewport)
            }
            ViewKind::Radar => views::render_radar(
                data,
                &ChannelSelection::all(data.channel_names()),
                data.len().saturating_sub(1),
                &viewport,
            ),
            ViewKind::StarGlyph => {
                let max = data.max_value().unwrap_or(1.0).max(1.0);
                data.channel_names()
                    .next()
                    .and_then(|name| StarGlyph::from_series(data, name))
                    .map(|g| views::render_star_glyph(&g.normalized(max), &viewport))
                    .unwrap_or_default()
            }
            ViewKind::History => {
                return Err(JsError::new("history is rendered with history_render"));
            }
        };
        commands_json(&commands)
    })
}

/// Line chart over the `start`/`end` text inputs.
#[wasm_bindgen]
pub fn render_line(
    handle: usize,
    start: &str,
    end: &str,
    width: f64,
    height: f64,
) -> Result<String, JsError> {
    with_dataset(handle, |data| {
        let range = SampleRange::parse(start, end, data.len()).map_err(js_err)?;
        commands_json(&views::render_line_chart(
            data,
            range,
            &Viewport::sized(width, height),
        ))
    })
}

/// Polygon chart at `second` (clamped). `channels` empty means the default
/// selection.
#[wasm_bindgen]
#[allow(clippy::needless_pass_by_value)]
pub fn render_radar(
    handle: usize,
    second: i64,
    channels: Vec<String>,
    width: f64,
    height: f64,
) -> Result<String, JsError> {
    with_dataset(handle, |data| {
        let selection = if channels.is_empty() {
            ChannelSelection::all(data.channel_names())
        } else {
            ChannelSelection::with_selected(data.channel_names(), &channels).map_err(js_err)?
        };
        let second = clamp_second(second, data.len());
        commands_json(&views::render_radar(
            data,
            &selection,
            second,
            &Viewport::sized(width, height),
        ))
    })
}

/// Star glyph of one channel over time (`mode = "series"`, `key` a channel
/// name) or of every channel at one sample (`mode = "sample"`, `key` an index).
#[wasm_bindgen]
pub fn render_star_glyph(
    handle: usize,
    mode: &str,
    key: &str,
    size: f64,
) -> Result<String, JsError> {
    with_dataset(handle, |data| {
        let glyph = match mode {
            "series" => StarGlyph::from_series(data, key),
            "sample" => {
                let index = key.trim().parse::<usize>().map_err(js_err)?;
                StarGlyph::from_sample(data, index)
            }
            other => return Err(JsError::new(&format!("unknown glyph mode: {other}"))),
        }
        .ok_or_else(|| JsError::new(&format!("nothing to draw for {key}")))?;
        let max = data.max_value().unwrap_or(1.0).max(1.0);
        commands_json(&views::render_star_glyph(
            &glyph.normalized(max),
            &Viewport::sized(size, size),
        ))
    })
}

/// Convert a render-command JSON list to a standalone SVG document.
#[wasm_bindgen]
pub fn commands_to_svg(
    commands_json: &str,
    width: f64,
    height: f64,
    dark: bool,
) -> Result<String, JsError> {
    let commands: Vec<RenderCommand> = serde_json::from_str(commands_json).map_err(js_err)?;
    Ok(eeg_cloud_core::svg::render_svg(&commands, width, height, dark))
}

/// The login endpoint. Always returns JSON: the session on success, an
/// `{error, status}` body otherwise.
#[wasm_bindgen]
pub fn login(identifier: &str, password: &str) -> Result<String, JsError> {
    let request = LoginRequest {
        identifier: identifier.to_string(),
        password: password.to_string(),
    };
    match auth::authenticate(&request) {
        Ok(response) => to_json(&response),
        Err(e) => to_json(&e.to_body()),
    }
}

/// New history panel on `today` (`YYYY-MM-DD`), Year view. Returns a handle.
#[wasm_bindgen]
pub fn history_new(today: &str, seed: Option<u64>) -> Result<usize, JsError> {
    let today = NaiveDate::parse_from_str(today.trim(), "%Y-%m-%d").map_err(js_err)?;
    Ok(push(&PANELS, HistoryPanel::with_rng(today, rng(seed))))
}

/// Current bars, selection and session summary as JSON.
#[wasm_bindgen]
pub fn history_snapshot(handle: usize) -> Result<String, JsError> {
    with_panel(handle, |panel| to_json(&panel.snapshot()))
}

/// Click the `index`-th bar; returns the new snapshot.
#[wasm_bindgen]
pub fn history_click(handle: usize, index: usize) -> Result<String, JsError> {
    with_panel(handle, |panel| {
        panel.click(index).map_err(js_err)?;
        to_json(&panel.snapshot())
    })
}

#[wasm_bindgen]
pub fn history_set_granularity(handle: usize, granularity: &str) -> Result<String, JsError> {
    let granularity: Granularity = granularity.parse().map_err(js_err)?;
    with_panel(handle, |panel| {
        panel.set_granularity(granularity);
        to_json(&panel.snapshot())
    })
}

#[wasm_bindgen]
pub fn history_set_date(handle: usize, date: &str) -> Result<String, JsError> {
    with_panel(handle, |panel| {
        panel.set_date_str(date).map_err(js_err)?;
        to_json(&panel.snapshot())
    })
}

#[wasm_bindgen]
pub fn history_reshuffle(handle: usize) -> Result<String, JsError> {
    with_panel(handle, |panel| {
        panel.reshuffle();
        to_json(&panel.snapshot())
    })
}

#[wasm_bindgen]
pub fn history_render(handle: usize, width: f64, height: f64) -> Result<String, JsError> {
    with_panel(handle, |panel| {
        commands_json(&views::render_history(panel, &Viewport::sized(width, height)))
    })
}
