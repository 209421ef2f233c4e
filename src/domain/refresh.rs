// Refresh state domain model

use super::visualization::Visualization;

pub const MIN_INTERVAL_SECS: u64 = 1;
pub const MAX_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Clamp a requested refresh interval to the supported [1, 30] second range.
pub fn clamp_interval(secs: u64) -> u64 {
    secs.clamp(MIN_INTERVAL_SECS, MAX_INTERVAL_SECS)
}

/// The only mutable loop state: current selection, refresh interval, and a
/// monotonically increasing tick counter used to derive unique display keys.
/// Selection and interval are updated by the control endpoint between ticks;
/// the loop reads them at the start of each tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshState {
    pub selection: Visualization,
    pub interval_secs: u64,
    pub tick: u64,
}

impl RefreshState {
    pub fn new(selection: Visualization, interval_secs: u64) -> Self {
        Self {
            selection,
            interval_secs: clamp_interval(interval_secs),
            tick: 0,
        }
    }

    /// Display key for the current tick. Unique per iteration so the UI
    /// shell replaces the previous chart instead of diffing it in place.
    pub fn display_key(&self) -> String {
        format!("plot{}", self.tick)
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn set_selection(&mut self, selection: Visualization) {
        self.selection = selection;
    }

    pub fn set_interval(&mut self, secs: u64) {
        self.interval_secs = clamp_interval(secs);
    }
}
