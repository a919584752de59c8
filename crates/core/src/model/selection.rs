use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest channels the polygon chart will draw.
pub const MIN_SELECTED: usize = 3;
/// Most channels the polygon chart will draw.
pub const MAX_SELECTED: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("at least {MIN_SELECTED} channels must stay selected")]
    TooFew,
    #[error("at most {MAX_SELECTED} channels can be selected")]
    TooMany,
    #[error("unknown channel `{0}`")]
    UnknownChannel(String),
}

/// Which channels the polygon chart plots.
///
/// Starts with the first [`MAX_SELECTED`] channels selected. Toggles that
/// would leave fewer than [`MIN_SELECTED`] or more than [`MAX_SELECTED`]
/// channels are refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSelection {
    entries: Vec<(String, bool)>,
}

impl ChannelSelection {
    pub fn all<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            entries: names
                .into_iter()
                .enumerate()
                .map(|(i, n)| (n.to_string(), i < MAX_SELECTED))
                .collect(),
        }
    }

    /// Select exactly `selected` out of `names`.
    pub fn with_selected<'a, S: AsRef<str>>(
        names: impl IntoIterator<Item = &'a str>,
        selected: &[S],
    ) -> Result<Self, SelectionError> {
        let entries: Vec<(String, bool)> = names
            .into_iter()
            .map(|n| (n.to_string(), selected.iter().any(|s| s.as_ref() == n)))
            .collect();
        if let Some(unknown) = selected
            .iter()
            .find(|s| !entries.iter().any(|(n, _)| n == s.as_ref()))
        {
            return Err(SelectionError::UnknownChannel(unknown.as_ref().to_string()));
        }
        let sel = Self { entries };
        match sel.selected_count() {
            n if n < MIN_SELECTED => Err(SelectionError::TooFew),
            n if n > MAX_SELECTED => Err(SelectionError::TooMany),
            _ => Ok(sel),
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, on)| n == name && *on)
    }

    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|(_, on)| *on).count()
    }

    /// Selected channel names in channel order.
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, on)| *on)
            .map(|(n, _)| n.as_str())
    }

    /// All channel names with their state, in channel order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(n, on)| (n.as_str(), *on))
    }

    /// Whether toggling `name` would be accepted (checkbox enabled state).
    pub fn can_toggle(&self, name: &str) -> bool {
        self.check_toggle(name).is_ok()
    }

    pub fn toggle(&mut self, name: &str) -> Result<bool, SelectionError> {
        self.check_toggle(name)?;
        let entry = self
            .entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .ok_or_else(|| SelectionError::UnknownChannel(name.to_string()))?;
        entry.1 = !entry.1;
        Ok(entry.1)
    }

    fn check_toggle(&self, name: &str) -> Result<(), SelectionError> {
        let on = self
            .entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, on)| *on)
            .ok_or_else(|| SelectionError::UnknownChannel(name.to_string()))?;
        let count = self.selected_count();
        if on && count <= MIN_SELECTED {
            return Err(SelectionError::TooFew);
        }
        if !on && count >= MAX_SELECTED {
            return Err(SelectionError::TooMany);
        }
        Ok(())
    }
}

/// Clamp a requested second index into `0..=len-1` (0 for empty data).
pub fn clamp_second(requested: i64, len: usize) -> usize {
    let max = len.saturating_sub(1) as i64;
    requested.clamp(0, max) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIX: [&str; 6] = ["excitement", "valence", "arousal", "expectation", "E", "F"];

    #[test]
    fn starts_fully_selected() {
        let sel = ChannelSelection::all(SIX);
        assert_eq!(sel.selected_count(), 6);
        assert!(!sel.can_toggle("Z"));
    }

    #[test]
    fn extra_channels_start_unselected() {
        let sel = ChannelSelection::all(SIX.into_iter().chain(["G"]));
        assert_eq!(sel.selected_count(), MAX_SELECTED);
        assert!(!sel.is_selected("G"));
        assert!(!sel.can_toggle("G"));
    }

    #[test]
    fn explicit_selection_is_bounded() {
        let sel = ChannelSelection::with_selected(SIX.into_iter().chain(["G"]), &["G", "E", "F"])
            .expect("three channels");
        assert_eq!(sel.selected().collect::<Vec<_>>(), ["E", "F", "G"]);
        assert_eq!(
            ChannelSelection::with_selected(SIX, &["E", "F"]),
            Err(SelectionError::TooFew)
        );
        assert_eq!(
            ChannelSelection::with_selected(SIX, &["E", "F", "Z"]),
            Err(SelectionError::UnknownChannel("Z".into()))
        );
    }

    #[test]
    fn cannot_drop_below_three() {
        let mut sel = ChannelSelection::all(SIX);
        assert_eq!(sel.toggle("E"), Ok(false));
        assert_eq!(sel.toggle("F"), Ok(false));
        assert_eq!(sel.toggle("arousal"), Ok(false));
        assert_eq!(sel.selected_count(), 3);
        assert!(!sel.can_toggle("valence"));
        assert_eq!(sel.toggle("valence"), Err(SelectionError::TooFew));
        assert!(sel.is_selected("valence"));
        // Re-selecting is still allowed.
        assert!(sel.can_toggle("E"));
    }

    #[test]
    fn cannot_exceed_six() {
        let names = ["a", "b", "c", "d", "e", "f", "g"];
        let mut sel = ChannelSelection::all(names);
        sel.entries[6].1 = false;
        assert_eq!(sel.toggle("g"), Err(SelectionError::TooMany));
        assert_eq!(sel.toggle("a"), Ok(false));
        assert_eq!(sel.toggle("g"), Ok(true));
        assert_eq!(
            sel.selected().collect::<Vec<_>>(),
            vec!["b", "c", "d", "e", "f", "g"]
        );
    }

    #[test]
    fn clamps_second() {
        assert_eq!(clamp_second(-4, 60), 0);
        assert_eq!(clamp_second(75, 60), 59);
        assert_eq!(clamp_second(12, 60), 12);
        assert_eq!(clamp_second(3, 0), 0);
    }
}
