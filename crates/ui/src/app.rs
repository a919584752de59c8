use chrono::{Datelike, NaiveDate};
use eframe::egui;
use eeg_cloud_core::auth::{AccountDirectory, SignupForm, UserInfo};
use eeg_cloud_core::config::{AppConfig, ThemePreference};
use eeg_cloud_core::data::{MockPreset, generate_with};
use eeg_cloud_core::history::{ClickOutcome, Granularity, HistoryPanel};
use eeg_cloud_core::model::{ChannelSelection, EegData, SampleRange};
use eeg_cloud_core::protocol::{RenderCommand, Viewport};
use eeg_cloud_core::views::{self, StarGlyph};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::renderer;
use crate::theme::{self, ThemeMode};

const LINE_HEIGHT: f32 = 420.0;
const RADAR_HEIGHT: f32 = 460.0;
const HISTORY_HEIGHT: f32 = 380.0;

/// Screens of the demo flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Page {
    Welcome,
    Login,
    Signup,
    Participant,
    Charts,
    StarGlyph,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GlyphSource {
    /// One channel across time.
    Series,
    /// Every channel at one sample.
    Sample,
}

#[derive(Default)]
pub(crate) struct LoginState {
    pub identifier: String,
    pub password: String,
    pub use_demo_account: bool,
    pub error: Option<String>,
}

#[derive(Default)]
pub(crate) struct SignupState {
    pub form: SignupForm,
    pub email_error: Option<String>,
    pub username_error: Option<String>,
    pub submit_error: Option<String>,
}

pub(crate) struct ParticipantState {
    pub info: UserInfo,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub gender: eeg_cloud_core::auth::Gender,
    pub error: Option<String>,
    pub saved: bool,
}

/// Start/end text of the line chart, validated on every edit.
pub(crate) struct RangeInput {
    pub start: String,
    pub end: String,
    range: Result<SampleRange, String>,
}

impl RangeInput {
    pub(crate) fn full(len: usize) -> Self {
        Self {
            start: "0".into(),
            end: len.to_string(),
            range: Ok(SampleRange::full(len)),
        }
    }

    /// Re-validate the text against a recording of `len` samples.
    pub(crate) fn revalidate(&mut self, len: usize) {
        self.range = SampleRange::parse(&self.start, &self.end, len)
            .map_err(|e| e.to_string());
    }

    /// The range to draw, or `None` while the input is invalid.
    pub(crate) fn range(&self) -> Option<SampleRange> {
        self.range.as_ref().ok().copied()
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.range.as_ref().err().map(String::as_str)
    }
}

pub(crate) struct HistoryControls {
    pub year: i32,
    pub month: u32,
    pub week: u32,
    pub date_text: String,
    pub error: Option<String>,
}

/// Main application state.
pub struct EegCloudApp {
    pub(crate) config: AppConfig,
    pub(crate) theme_mode: ThemeMode,
    pub(crate) page: Page,
    pub(crate) user: Option<String>,

    pub(crate) line_data: EegData,
    pub(crate) range: RangeInput,

    pub(crate) radar_data: EegData,
    pub(crate) selection: ChannelSelection,
    pub(crate) second_input: String,
    pub(crate) second: usize,

    pub(crate) glyph_source: GlyphSource,
    pub(crate) glyph_channel: String,
    pub(crate) glyph_sample: usize,
    pub(crate) glyph_dims: Vec<(String, bool)>,

    pub(crate) history: HistoryPanel,
    pub(crate) history_controls: HistoryControls,

    pub(crate) login: LoginState,
    pub(crate) signup: SignupState,
    pub(crate) directory: AccountDirectory,
    pub(crate) participant: ParticipantState,

    /// Commands of the chart drawn last frame, for SVG export.
    pub(crate) last_chart: Option<(Vec<RenderCommand>, f64, f64)>,
    pub(crate) status: Option<String>,
    pub(crate) error: Option<String>,
}

impl EegCloudApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let theme_mode = match config.theme {
            ThemePreference::Dark => ThemeMode::Dark,
            ThemePreference::Light => ThemeMode::Light,
        };
        cc.egui_ctx.set_visuals(theme::visuals(theme_mode));
        theme::apply_typography(&cc.egui_ctx);

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let today = chrono::Local::now().date_naive();
        let history_seed: u64 = rand::Rng::r#gen(&mut rng);
        let history = HistoryPanel::with_rng(today, StdRng::seed_from_u64(history_seed));

        let mut error = None;
        let mut load = |preset: MockPreset| {
            let spec = preset.spec(config.sample_count, config.sampling_rate_hz);
            generate_with(&spec, &mut rng).unwrap_or_else(|e| {
                log::error!("mock generation failed: {e}");
                error = Some(e.to_string());
                EegData::default()
            })
        };
        let line_data = load(MockPreset::FourChannel);
        let radar_data = load(MockPreset::SixChannel);

        let selection = ChannelSelection::all(radar_data.channel_names());
        let second = radar_data.len().saturating_sub(1);
        let glyph_channel = radar_data
            .channel_names()
            .next()
            .unwrap_or_default()
            .to_string();
        let glyph_dims = radar_data
            .channel_names()
            .map(|n| (n.to_string(), true))
            .collect();
        log::info!(
            "generated {} + {} samples (seed {:?})",
            line_data.len(),
            radar_data.len(),
            config.seed
        );

        Self {
            theme_mode,
            page: Page::Welcome,
            user: None,
            range: RangeInput::full(line_data.len()),
            line_data,
            selection,
            second_input: second.to_string(),
            second,
            radar_data,
            glyph_source: GlyphSource::Series,
            glyph_channel,
            glyph_sample: 0,
            glyph_dims,
            history_controls: HistoryControls {
                year: today.year(),
                month: today.month(),
                week: today.iso_week().week(),
                date_text: today.format("%Y-%m-%d").to_string(),
                error: None,
            },
            history,
            login: LoginState::default(),
            signup: SignupState::default(),
            directory: AccountDirectory::new(),
            participant: ParticipantState {
                info: UserInfo::default(),
                first_name: String::new(),
                last_name: String::new(),
                birth_date: String::new(),
                gender: Default::default(),
                error: None,
                saved: false,
            },
            last_chart: None,
            status: None,
            error,
            config,
        }
    }

    pub(crate) fn go(&mut self, page: Page) {
        if self.page != page {
            log::debug!("page {:?} -> {page:?}", self.page);
            self.page = page;
            self.last_chart = None;
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme_mode = self.theme_mode.toggled();
        ctx.set_visuals(theme::visuals(self.theme_mode));
    }

    fn export_svg(&mut self, ctx: &egui::Context) {
        let Some((commands, w, h)) = &self.last_chart else {
            self.error = Some("No chart on this page to export".into());
            return;
        };
        let svg = eeg_cloud_core::svg::render_svg(commands, *w, *h, self.theme_mode.is_dark());

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = ctx;
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("SVG", &["svg"])
                .set_file_name("eeg-chart.svg")
                .save_file()
            {
                match std::fs::write(&path, svg) {
                    Ok(()) => {
                        log::info!("exported chart to {}", path.display());
                        self.status = Some(format!("Saved {}", path.display()));
                    }
                    Err(e) => self.error = Some(format!("Failed to write SVG: {e}")),
                }
            }
        }
        #[cfg(target_arch = "wasm32")]
        {
            ctx.copy_text(svg);
            self.status = Some("SVG copied to clipboard".into());
        }
    }

    /// Paint `commands` into a fresh `height`-tall strip and report the clicked
    /// hit id, if any.
    pub(crate) fn paint_chart(
        &mut self,
        ui: &mut egui::Ui,
        height: f32,
        build: impl FnOnce(&Viewport) -> Vec<RenderCommand>,
    ) -> Option<u64> {
        let width = ui.available_width().max(200.0);
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::click());
        let viewport = Viewport::sized(width as f64, height as f64);
        let commands = build(&viewport);

        let mut painter = ui.painter_at(rect);
        let result = renderer::render_commands(&mut painter, &commands, rect.min, self.theme_mode);

        let mut clicked = None;
        if let Some(hit) = response.hover_pos().and_then(|pos| result.hit_at(pos)) {
            if let Some(label) = &hit.label {
                response.clone().on_hover_text_at_pointer(label.as_str());
            }
            if response.clicked() {
                clicked = Some(hit.hit_id);
            }
        }
        self.last_chart = Some((commands, viewport.width, viewport.height));
        clicked
    }

    pub(crate) fn line_chart(&mut self, ui: &mut egui::Ui) {
        let edited = ui
            .horizontal(|ui| {
                ui.label("Start");
                let start = ui
                    .add(egui::TextEdit::singleline(&mut self.range.start).desired_width(60.0));
                ui.label("End");
                let end =
                    ui.add(egui::TextEdit::singleline(&mut self.range.end).desired_width(60.0));
                start.changed() || end.changed()
            })
            .inner;
        if edited {
            self.range.revalidate(self.line_data.len());
        }
        let Some(range) = self.range.range() else {
            if let Some(err) = self.range.error() {
                ui.colored_label(ui.visuals().error_fg_color, err);
            }
            return;
        };
        let data = self.line_data.clone();
        self.paint_chart(ui, LINE_HEIGHT, |vp| views::render_line_chart(&data, range, vp));
    }

    pub(crate) fn radar_chart(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Second");
            let resp =
                ui.add(egui::TextEdit::singleline(&mut self.second_input).desired_width(60.0));
            if resp.changed() {
                if let Ok(v) = self.second_input.trim().parse::<i64>() {
                    self.second =
                        eeg_cloud_core::model::clamp_second(v, self.radar_data.len());
                }
            }
            if resp.lost_focus() {
                self.second_input = self.second.to_string();
            }
        });
        ui.horizontal_wrapped(|ui| {
            let entries: Vec<(String, bool)> = self
                .selection
                .entries()
                .map(|(n, s)| (n.to_string(), s))
                .collect();
            for (name, selected) in entries {
                let mut checked = selected;
                let enabled = self.selection.can_toggle(&name);
                if ui
                    .add_enabled(enabled, egui::Checkbox::new(&mut checked, name.as_str()))
                    .changed()
                {
                    if let Err(e) = self.selection.toggle(&name) {
                        log::warn!("channel toggle refused: {e}");
                    }
                }
            }
        });
        let data = self.radar_data.clone();
        let selection = self.selection.clone();
        let second = self.second;
        self.paint_chart(ui, RADAR_HEIGHT, |vp| {
            views::render_radar(&data, &selection, second, vp)
        });
    }

    pub(crate) fn glyph(&self) -> Option<StarGlyph> {
        let glyph = match self.glyph_source {
            GlyphSource::Series => StarGlyph::from_series(&self.radar_data, &self.glyph_channel)?,
            GlyphSource::Sample => StarGlyph::from_sample(&self.radar_data, self.glyph_sample)?
                .with_channels(
                    &self
                        .glyph_dims
                        .iter()
                        .filter(|(_, on)| *on)
                        .map(|(n, _)| n.as_str())
                        .collect::<Vec<_>>(),
                ),
        };
        let max = self.radar_data.max_value().unwrap_or(1.0).max(1.0);
        Some(glyph.normalized(max))
    }

    pub(crate) fn history_chart(&mut self, ui: &mut egui::Ui) {
        let panel = self.history.clone();
        let clicked = self.paint_chart(ui, HISTORY_HEIGHT, |vp| views::render_history(&panel, vp));
        if let Some(index) = clicked {
            match self.history.click(index as usize) {
                Ok(ClickOutcome::DrilledDown { date, .. }) => {
                    self.sync_history_controls(date);
                }
                Ok(ClickOutcome::SessionSelected(_)) => {}
                Err(e) => self.history_controls.error = Some(e.to_string()),
            }
        }
    }

    pub(crate) fn sync_history_controls(&mut self, date: NaiveDate) {
        let c = &mut self.history_controls;
        c.year = date.year();
        c.month = date.month();
        c.week = date.iso_week().week();
        c.date_text = date.format("%Y-%m-%d").to_string();
        c.error = None;
    }

    pub(crate) fn set_granularity(&mut self, granularity: Granularity) {
        self.history.set_granularity(granularity);
        self.history_controls.error = None;
    }
}

impl eframe::App for EegCloudApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("EEG Cloud");
                ui.separator();
                if self.user.is_some() {
                    for (page, label) in [
                        (Page::Charts, "Charts"),
                        (Page::StarGlyph, "Star glyph"),
                        (Page::History, "History"),
                        (Page::Participant, "Participant"),
                    ] {
                        if ui.selectable_label(self.page == page, label).clicked() {
                            self.go(page);
                        }
                    }
                    ui.separator();
                }

                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "Dark",
                    ThemeMode::Light => "Light",
                };
                if ui.button(theme_label).clicked() {
                    self.toggle_theme(ctx);
                }
                if self.last_chart.is_some() && ui.button("Export SVG").clicked() {
                    self.export_svg(ctx);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(user) = self.user.clone() {
                        if ui.button("Log out").clicked() {
                            log::info!("{user} logged out");
                            self.user = None;
                            self.go(Page::Welcome);
                        }
                        ui.label(user);
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(err) = &self.error {
                    ui.colored_label(ui.visuals().error_fg_color, err);
                    if ui.small_button("Dismiss").clicked() {
                        self.error = None;
                    }
                } else if let Some(status) = &self.status {
                    ui.label(status);
                } else {
                    ui.label(format!(
                        "{} samples at {} Hz | {} channels selected",
                        self.line_data.len(),
                        self.line_data.sampling_rate(),
                        self.selection.selected_count(),
                    ));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.page {
                Page::Welcome => self.welcome_page(ui),
                Page::Login => self.login_page(ui),
                Page::Signup => self.signup_page(ui),
                Page::Participant => self.participant_page(ui),
                Page::Charts => self.charts_page(ui),
                Page::StarGlyph => self.glyph_page(ui),
                Page::History => self.history_page(ui),
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_input_hides_chart_while_invalid() {
        let mut input = RangeInput::full(60);
        assert_eq!(input.range(), Some(SampleRange::full(60)));

        input.end = "abc".into();
        input.revalidate(60);
        assert!(input.range().is_none());
        assert!(input.error().is_some());

        input.start = "10".into();
        input.end = "20".into();
        input.revalidate(60);
        assert_eq!(input.range().map(|r| SampleRange::len(&r)), Some(10));
        assert!(input.error().is_none());
    }
}
