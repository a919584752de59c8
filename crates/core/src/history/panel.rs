use chrono::{Datelike, NaiveDate, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::calendar::{self, MONTH_ABBREVS};
use super::{Granularity, HistoryError};

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

/// One category bar of the history chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub score: u32,
}

/// One play session inside a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub label: String,
    pub score: u32,
    pub time: NaiveTime,
}

/// What a bar click did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    DrilledDown {
        granularity: Granularity,
        date: NaiveDate,
    },
    SessionSelected(SessionRecord),
}

/// Serializable view of the panel for the JS bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub granularity: Granularity,
    pub date: NaiveDate,
    pub bars: Vec<Bar>,
    pub selected_bar: Option<usize>,
    pub session_summary: Option<String>,
}

/// Drill-down history of randomly generated scores.
///
/// Year → Month → Week → Day, by clicking bars. Buckets are redrawn only when
/// the granularity or date changes; selecting a session in the Day view keeps
/// the scores stable.
#[derive(Debug, Clone)]
pub struct HistoryPanel {
    granularity: Granularity,
    date: NaiveDate,
    bars: Vec<Bar>,
    sessions: Vec<SessionRecord>,
    selected_bar: Option<usize>,
    rng: StdRng,
}

impl HistoryPanel {
    /// Year view of `today`, scores drawn from entropy.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_rng(today, StdRng::from_entropy())
    }

    pub fn with_seed(today: NaiveDate, seed: u64) -> Self {
        Self::with_rng(today, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(today: NaiveDate, rng: StdRng) -> Self {
        let mut panel = Self {
            granularity: Granularity::Year,
            date: today,
            bars: Vec::new(),
            sessions: Vec::new(),
            selected_bar: None,
            rng,
        };
        panel.regenerate();
        panel
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Sessions of the current day (empty outside the Day view).
    pub fn sessions(&self) -> &[SessionRecord] {
        &self.sessions
    }

    pub fn selected_bar(&self) -> Option<usize> {
        self.selected_bar
    }

    pub fn selected_session(&self) -> Option<&SessionRecord> {
        if self.granularity != Granularity::Day {
            return None;
        }
        self.selected_bar.and_then(|i| self.sessions.get(i))
    }

    /// `"2025-06-27 (14:35) Game 2 - Score: 71"` for the selected session.
    pub fn session_summary(&self) -> Option<String> {
        self.selected_session().map(|s| {
            format!(
                "{} ({}) {} - Score: {}",
                self.date.format("%Y-%m-%d"),
                s.time.format("%H:%M"),
                s.label,
                s.score
            )
        })
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            granularity: self.granularity,
            date: self.date,
            bars: self.bars.clone(),
            selected_bar: self.selected_bar,
            session_summary: self.session_summary(),
        }
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        if granularity != self.granularity {
            self.granularity = granularity;
            self.regenerate();
        }
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        if date != self.date {
            self.date = date;
            self.regenerate();
        }
    }

    /// Parse an ISO `YYYY-MM-DD` date and jump to it.
    pub fn set_date_str(&mut self, text: &str) -> Result<(), HistoryError> {
        let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map_err(|_| HistoryError::InvalidDate(text.to_string()))?;
        self.set_date(date);
        Ok(())
    }

    /// Year control: jumps to January 1st.
    pub fn set_year(&mut self, year: i32) -> Result<(), HistoryError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(HistoryError::YearOutOfRange(year));
        }
        self.set_date(calendar::month_start(year, 1)?);
        Ok(())
    }

    /// Month control: jumps to the 1st of the month.
    pub fn set_month(&mut self, year: i32, month: u32) -> Result<(), HistoryError> {
        self.set_date(calendar::month_start(year, month)?);
        Ok(())
    }

    /// Week control: jumps to the Monday of the ISO week.
    pub fn set_iso_week(&mut self, year: i32, week: u32) -> Result<(), HistoryError> {
        self.set_date(calendar::iso_week_start(year, week)?);
        Ok(())
    }

    /// Handle a click on bar `index`.
    ///
    /// Coarse levels drill into the clicked bucket; the Day view selects the
    /// clicked session instead.
    pub fn click(&mut self, index: usize) -> Result<ClickOutcome, HistoryError> {
        if index >= self.bars.len() {
            return Err(HistoryError::IndexOutOfRange {
                index,
                len: self.bars.len(),
            });
        }

        let target = match self.granularity {
            Granularity::Day => {
                self.selected_bar = Some(index);
                let session = self.sessions[index].clone();
                log::debug!("history: selected {} on {}", session.label, self.date);
                return Ok(ClickOutcome::SessionSelected(session));
            }
            Granularity::Year => calendar::month_start(self.date.year(), index as u32 + 1)?,
            Granularity::Month => {
                calendar::month_week_start(self.date.year(), self.date.month(), index)?
            }
            Granularity::Week => calendar::add_days(calendar::monday_of(self.date)?, index as u64)?,
        };

        let from = self.granularity;
        let Some(next) = from.drill_down() else {
            return Err(HistoryError::DateOutOfRange);
        };
        log::info!("history: {from} -> {next} at {target}");
        self.granularity = next;
        self.date = target;
        self.regenerate();
        Ok(ClickOutcome::DrilledDown {
            granularity: next,
            date: target,
        })
    }

    /// Draw fresh scores for the current view.
    pub fn reshuffle(&mut self) {
        self.regenerate();
    }

    fn regenerate(&mut self) {
        self.selected_bar = None;
        self.sessions.clear();
        let labels: Vec<String> = match self.granularity {
            Granularity::Year => MONTH_ABBREVS.iter().map(|m| (*m).to_string()).collect(),
            Granularity::Month => {
                let weeks =
                    calendar::weeks_in_month(self.date.year(), self.date.month()).unwrap_or(0);
                (1..=weeks).map(|i| format!("Week {i}")).collect()
            }
            Granularity::Week => match calendar::monday_of(self.date) {
                Ok(monday) => monday
                    .iter_days()
                    .take(7)
                    .map(calendar::weekday_label)
                    .collect(),
                Err(_) => Vec::new(),
            },
            Granularity::Day => {
                let count = self.rng.gen_range(3..8);
                self.sessions = (1..=count)
                    .map(|i| SessionRecord {
                        label: format!("Game {i}"),
                        score: self.rng.gen_range(0..100),
                        time: random_time(&mut self.rng),
                    })
                    .collect();
                self.bars = self
                    .sessions
                    .iter()
                    .map(|s| Bar {
                        label: s.label.clone(),
                        score: s.score,
                    })
                    .collect();
                return;
            }
        };
        self.bars = labels
            .into_iter()
            .map(|label| Bar {
                label,
                score: self.rng.gen_range(0..100),
            })
            .collect();
    }
}

fn random_time(rng: &mut impl Rng) -> NaiveTime {
    let hour = rng.gen_range(8..23);
    let minute = rng.gen_range(0..59);
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn panel() -> HistoryPanel {
        HistoryPanel::with_seed(ymd(2025, 6, 27), 11)
    }

    #[test]
    fn year_view_has_twelve_months() {
        let p = panel();
        assert_eq!(p.granularity(), Granularity::Year);
        assert_eq!(p.bars().len(), 12);
        assert_eq!(p.bars()[0].label, "Jan");
        assert_eq!(p.bars()[11].label, "Dec");
        assert!(p.bars().iter().all(|b| b.score < 100));
    }

    #[test]
    fn drill_year_to_month_to_week_to_day() {
        let mut p = panel();
        let out = p.click(5).expect("year click");
        assert_eq!(
            out,
            ClickOutcome::DrilledDown {
                granularity: Granularity::Month,
                date: ymd(2025, 6, 1)
            }
        );
        assert_eq!(p.bars().len(), 5);
        assert_eq!(p.bars()[4].label, "Week 5");

        p.click(1).expect("month click");
        assert_eq!(p.granularity(), Granularity::Week);
        assert_eq!(p.date(), ymd(2025, 6, 2));
        let labels: Vec<_> = p.bars().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels[0], "Mon 2");
        assert_eq!(labels[6], "Sun 8");

        p.click(3).expect("week click");
        assert_eq!(p.granularity(), Granularity::Day);
        assert_eq!(p.date(), ymd(2025, 6, 5));
        let n = p.bars().len();
        assert!((3..8).contains(&n), "{n} sessions");
        assert_eq!(p.sessions().len(), n);
        assert_eq!(p.bars()[0].label, "Game 1");
    }

    #[test]
    fn day_click_selects_session_without_reshuffling() {
        let mut p = panel();
        p.set_granularity(Granularity::Day);
        let before = p.bars().to_vec();
        let out = p.click(1).expect("day click");
        let ClickOutcome::SessionSelected(session) = out else {
            unreachable!("day click must select a session")
        };
        assert_eq!(p.bars(), before.as_slice());
        assert_eq!(p.selected_bar(), Some(1));
        assert_eq!(p.selected_session(), Some(&session));
        let hour = session.time.format("%H").to_string();
        assert!(("08".."23").contains(&hour.as_str()));

        let summary = p.session_summary().expect("summary");
        assert!(summary.starts_with("2025-06-27 ("), "{summary}");
        assert!(summary.ends_with(&format!("Game 2 - Score: {}", session.score)));
    }

    #[test]
    fn leaving_day_clears_selection() {
        let mut p = panel();
        p.set_granularity(Granularity::Day);
        p.click(0).expect("day click");
        p.set_granularity(Granularity::Week);
        assert_eq!(p.selected_bar(), None);
        assert!(p.selected_session().is_none());
        assert!(p.session_summary().is_none());
    }

    #[test]
    fn out_of_range_click_is_rejected() {
        let mut p = panel();
        assert_eq!(
            p.click(12),
            Err(HistoryError::IndexOutOfRange { index: 12, len: 12 })
        );
        assert_eq!(p.granularity(), Granularity::Year);
    }

    #[test]
    fn date_controls() {
        let mut p = panel();
        assert_eq!(p.set_year(1999), Err(HistoryError::YearOutOfRange(1999)));
        p.set_year(2030).expect("year");
        assert_eq!(p.date(), ymd(2030, 1, 1));
        p.set_month(2024, 2).expect("month");
        assert_eq!(p.date(), ymd(2024, 2, 1));
        p.set_iso_week(2025, 27).expect("week");
        assert_eq!(p.date(), ymd(2025, 6, 30));
        assert!(p.set_date_str("2025-13-01").is_err());
        p.set_date_str("2025-01-15").expect("date");
        assert_eq!(p.date(), ymd(2025, 1, 15));
    }

    #[test]
    fn snapshot_serializes() {
        let p = panel();
        let json = serde_json::to_string(&p.snapshot()).expect("json");
        assert!(json.contains("\"granularity\":\"year\""));
        assert!(json.contains("\"date\":\"2025-06-27\""));
    }
}
