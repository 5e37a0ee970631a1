use std::collections::BTreeMap;

use serde::Serialize;

use crate::region::cell_address;
use crate::restorer::classifier::CellOutcome;

/// Counts and error log produced by one or more engine runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingOutcome {
    pub processed: usize,
    pub skipped: usize,
    /// Every recoverable error, in the order encountered
    pub errors: Vec<String>,
    /// Skipped cells by cause
    pub skip_reasons: BTreeMap<&'static str, usize>,
}

impl ProcessingOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one cell. Each cell is recorded exactly once.
    pub fn record(&mut self, row: u32, col: u32, outcome: &CellOutcome) {
        if outcome.is_restored() {
            self.processed += 1;
            return;
        }

        self.skipped += 1;
        *self.skip_reasons.entry(outcome.label()).or_insert(0) += 1;

        let address = cell_address(row, col);
        match outcome {
            CellOutcome::OutOfBounds => {
                self.errors
                    .push(format!("Cell {address} [{row},{col}] is outside the worksheet"));
            }
            CellOutcome::InvalidDate { month, day } => {
                self.errors.push(format!(
                    "Cell {address} [{row},{col}] has an invalid date: month {month}, day {day}"
                ));
            }
            CellOutcome::Failed { message } => {
                self.errors
                    .push(format!("Error processing cell {address} [{row},{col}]: {message}"));
            }
            _ => {}
        }
    }

    pub fn total(&self) -> usize {
        self.processed + self.skipped
    }

    /// Fold another outcome into this one: counts add up, errors are appended.
    pub fn merge(&mut self, other: &ProcessingOutcome) {
        self.processed += other.processed;
        self.skipped += other.skipped;
        self.errors.extend(other.errors.iter().cloned());
        for (reason, count) in &other.skip_reasons {
            *self.skip_reasons.entry(*reason).or_insert(0) += *count;
        }
    }

    /// Human readable summary listing at most `max_displayed` errors.
    pub fn error_summary(&self, max_displayed: usize) -> String {
        if self.errors.is_empty() {
            return "No errors".to_string();
        }

        let mut summary = format!("Found {} errors:\n", self.errors.len());
        for error in self.errors.iter().take(max_displayed) {
            summary.push_str(&format!("- {error}\n"));
        }

        let hidden = self.errors.len().saturating_sub(max_displayed);
        if hidden > 0 {
            summary.push_str(&format!("... {hidden} more errors not shown\n"));
        }
        summary
    }
}
