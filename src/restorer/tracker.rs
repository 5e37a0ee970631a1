use std::collections::HashMap;

/// Continuity state for one engine run.
///
/// Anchors are keyed by (month, column) and always hold the most recent full
/// value seen or restored in that column. Baselines hold the first full value
/// recorded on day 1 of each month.
#[derive(Debug, Clone, Default)]
pub struct ContinuityTracker {
    baselines: HashMap<u32, f64>,
    anchors: HashMap<(u32, u32), f64>,
}

impl ContinuityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reading that was already complete in the sheet.
    pub fn record_full(&mut self, month: u32, col: u32, day: u32, value: f64) {
        if day == 1 {
            // First day-1 value wins
            self.baselines.entry(month).or_insert(value);
        }
        self.anchors.insert((month, col), value);
    }

    /// Record a reading the engine reconstructed.
    pub fn record_restored(&mut self, month: u32, col: u32, value: f64) {
        self.anchors.insert((month, col), value);
    }

    /// Anchor for a truncated reading: the previous value in the column, or on
    /// day 1 the month's baseline.
    pub fn anchor_for(&self, month: u32, col: u32, day: u32) -> Option<f64> {
        self.previous(month, col).or_else(|| {
            if day == 1 {
                self.baseline(month)
            } else {
                None
            }
        })
    }

    pub fn previous(&self, month: u32, col: u32) -> Option<f64> {
        self.anchors.get(&(month, col)).copied()
    }

    pub fn baseline(&self, month: u32) -> Option<f64> {
        self.baselines.get(&month).copied()
    }
}
