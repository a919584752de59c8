use eeg_cloud_core::config::AppConfig;
use eeg_cloud_core::data::{MockPreset, generate_with};
use eeg_cloud_core::history::{ClickOutcome, Granularity, HistoryPanel};
use eeg_cloud_core::model::{ChannelSelection, EegData, SampleRange};
use eeg_cloud_core::views::{self, StarGlyph, ViewKind};
use eeg_cloud_protocol::{RenderCommand, Viewport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Everything the terminal front-end draws from.
pub struct TuiState {
    pub view: ViewKind,
    line_data: EegData,
    radar_data: EegData,
    selection: ChannelSelection,
    second: usize,
    glyph_channel: usize,
    history: HistoryPanel,
    /// Highlighted history bar, clicked with Enter.
    cursor: usize,
    message: Option<String>,
}

impl TuiState {
    pub fn new(config: &AppConfig, view: ViewKind) -> anyhow::Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let line_data = generate_with(
            &MockPreset::FourChannel.spec(config.sample_count, config.sampling_rate_hz),
            &mut rng,
        )?;
        let radar_data = generate_with(
            &MockPreset::SixChannel.spec(config.sample_count, config.sampling_rate_hz),
            &mut rng,
        )?;
        let today = chrono::Local::now().date_naive();
        let history = HistoryPanel::with_seed(today, rng.r#gen());
        log::info!(
            "tui started on {view} with {} samples (seed {:?})",
            line_data.len(),
            config.seed
        );

        Ok(Self {
            view,
            selection: ChannelSelection::all(radar_data.channel_names()),
            second: radar_data.len().saturating_sub(1),
            glyph_channel: 0,
            line_data,
            radar_data,
            history,
            cursor: 0,
            message: None,
        })
    }

    pub fn commands(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        match self.view {
            ViewKind::Line => views::render_line_chart(
                &self.line_data,
                SampleRange::full(self.line_data.len()),
                viewport,
            ),
            ViewKind::Radar => {
                views::render_radar(&self.radar_data, &self.selection, self.second, viewport)
            }
            ViewKind::StarGlyph => self
                .glyph()
                .map(|g| views::render_star_glyph(&g, viewport))
                .unwrap_or_default(),
            ViewKind::History => views::render_history(&self.history, viewport),
        }
    }

    fn glyph(&self) -> Option<StarGlyph> {
        let name = self.radar_data.channel_names().nth(self.glyph_channel)?;
        let max = self.radar_data.max_value().unwrap_or(1.0).max(1.0);
        Some(StarGlyph::from_series(&self.radar_data, name)?.normalized(max))
    }

    pub fn key_hint(&self) -> &'static str {
        match self.view {
            ViewKind::Line => "",
            ViewKind::Radar => "←/→ second",
            ViewKind::StarGlyph => "←/→ channel",
            ViewKind::History => "←/→ ⏎ or 1-0 drill, ⌫ year, r reshuffle",
        }
    }

    pub fn status_line(&self) -> String {
        if let Some(msg) = &self.message {
            return format!(" {msg} ");
        }
        match self.view {
            ViewKind::Line => format!(
                " {} samples at {} Hz ",
                self.line_data.len(),
                self.line_data.sampling_rate()
            ),
            ViewKind::Radar => format!(" second {} ", self.second),
            ViewKind::StarGlyph => format!(
                " channel {} ",
                self.radar_data
                    .channel_names()
                    .nth(self.glyph_channel)
                    .unwrap_or("-")
            ),
            ViewKind::History => {
                let cursor = self
                    .history
                    .bars()
                    .get(self.cursor)
                    .map(|bar| format!("▶ {}: {}", bar.label, bar.score))
                    .unwrap_or_default();
                match self.history.session_summary() {
                    Some(summary) => format!(" {cursor} | {summary} "),
                    None => format!(
                        " {cursor} | {} of {} ",
                        self.history.granularity().label(),
                        self.history.date()
                    ),
                }
            }
        }
    }

    pub fn next_view(&mut self) {
        self.view = self.view.next();
        self.message = None;
    }

    /// Click the `index`-th history bar.
    pub fn click_bar(&mut self, index: usize) {
        if self.view != ViewKind::History {
            return;
        }
        self.message = match self.history.click(index) {
            Ok(ClickOutcome::DrilledDown { granularity, date }) => {
                log::debug!("drilled to {} at {date}", granularity.label());
                self.cursor = 0;
                None
            }
            Ok(ClickOutcome::SessionSelected(_)) => {
                self.cursor = index;
                None
            }
            Err(e) => Some(e.to_string()),
        };
    }

    pub fn back_to_year(&mut self) {
        if self.view == ViewKind::History {
            self.history.set_granularity(Granularity::Year);
            self.cursor = 0;
            self.message = None;
        }
    }

    pub fn reshuffle(&mut self) {
        if self.view == ViewKind::History {
            self.history.reshuffle();
        }
    }

    /// Click the bar under the history cursor.
    pub fn click_cursor(&mut self) {
        self.click_bar(self.cursor);
    }

    /// Move the radar second, the glyph channel or the history cursor by
    /// `delta`.
    pub fn step(&mut self, delta: i64) {
        match self.view {
            ViewKind::Radar => {
                self.second = eeg_cloud_core::model::clamp_second(
                    self.second as i64 + delta,
                    self.radar_data.len(),
                );
            }
            ViewKind::StarGlyph => {
                let count = self.radar_data.channels().len();
                if count > 0 {
                    self.glyph_channel =
                        (self.glyph_channel as i64 + delta).rem_euclid(count as i64) as usize;
                }
            }
            ViewKind::History => {
                let last = self.history.bars().len().saturating_sub(1) as i64;
                self.cursor = (self.cursor as i64 + delta).clamp(0, last) as usize;
            }
            ViewKind::Line => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(view: ViewKind) -> TuiState {
        let config = AppConfig {
            seed: Some(7),
            sample_count: 20,
            ..AppConfig::default()
        };
        TuiState::new(&config, view).expect("state")
    }

    #[test]
    fn every_view_draws() {
        let vp = Viewport::sized(640.0, 320.0);
        let mut s = state(ViewKind::Line);
        for _ in 0..ViewKind::ALL.len() {
            assert!(!s.commands(&vp).is_empty(), "{} drew nothing", s.view);
            s.next_view();
        }
        assert_eq!(s.view, ViewKind::Line);
    }

    #[test]
    fn radar_second_is_clamped() {
        let mut s = state(ViewKind::Radar);
        s.step(5);
        assert_eq!(s.second, 19);
        for _ in 0..30 {
            s.step(-1);
        }
        assert_eq!(s.second, 0);
    }

    #[test]
    fn glyph_channel_wraps() {
        let mut s = state(ViewKind::StarGlyph);
        s.step(-1);
        assert_eq!(s.glyph_channel, 5);
    }

    #[test]
    fn history_drills_and_returns() {
        let mut s = state(ViewKind::History);
        s.click_bar(0);
        assert_eq!(s.history.granularity(), Granularity::Month);
        s.back_to_year();
        assert_eq!(s.history.granularity(), Granularity::Year);
    }

    #[test]
    fn cursor_reaches_the_last_month() {
        let mut s = state(ViewKind::History);
        for _ in 0..20 {
            s.step(1);
        }
        assert_eq!(s.cursor, 11);
        assert!(s.status_line().contains("▶ Dec"), "{}", s.status_line());
        s.click_cursor();
        assert_eq!(s.history.granularity(), Granularity::Month);
        assert_eq!(chrono::Datelike::month(&s.history.date()), 12);
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn bar_clicks_ignored_off_history() {
        let mut s = state(ViewKind::Line);
        s.click_bar(0);
        assert_eq!(s.history.granularity(), Granularity::Year);
    }
}
