use tracing::{debug, info, instrument};

use crate::config::RestorerConfig;
use crate::grid::Grid;
use crate::region::{cell_address, Region};
use crate::restorer::classifier::{classify, reconstruct, CellOutcome, CellText};
use crate::restorer::coordinates::{day_of, month_of};
use crate::restorer::error::RestoreError;
use crate::restorer::outcome::ProcessingOutcome;
use crate::restorer::tracker::ContinuityTracker;

/// Restores truncated water level readings in one region of a grid.
///
/// The restorer holds configuration only. Continuity state lives in a
/// [`ContinuityTracker`] scoped to a call, so one instance can be reused for
/// any number of regions.
#[derive(Debug, Clone, Default)]
pub struct WaterLevelRestorer {
    config: RestorerConfig,
}

impl WaterLevelRestorer {
    pub fn new(config: RestorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RestorerConfig {
        &self.config
    }

    /// Restore every cell of `region` with fresh continuity state.
    pub fn restore<G: Grid + ?Sized>(
        &self,
        grid: &mut G,
        region: &Region,
    ) -> Result<ProcessingOutcome, RestoreError> {
        let mut tracker = ContinuityTracker::new();
        self.restore_with_tracker(grid, region, &mut tracker)
    }

    /// Restore `region` using caller-owned continuity state.
    ///
    /// Anchors already in `tracker` are honoured and anchors established here are
    /// left in it afterward.
    #[instrument(skip(self, grid, region, tracker), fields(region = %region))]
    pub fn restore_with_tracker<G: Grid + ?Sized>(
        &self,
        grid: &mut G,
        region: &Region,
        tracker: &mut ContinuityTracker,
    ) -> Result<ProcessingOutcome, RestoreError> {
        self.validate_region(region)?;

        let dimensions = grid.dimensions();
        debug!(
            "Grid extent {}x{}, region has {} cells",
            dimensions.0,
            dimensions.1,
            region.cell_count()
        );

        let mut outcome = ProcessingOutcome::new();
        for (row, col) in region.cells() {
            let cell = self.restore_cell(grid, region, row, col, dimensions, tracker);
            outcome.record(row, col, &cell);
        }

        info!(
            "Restored {} cells, skipped {} cells in {}",
            outcome.processed, outcome.skipped, region
        );
        Ok(outcome)
    }

    /// Reject regions that are inverted or exceed the size guard.
    pub fn validate_region(&self, region: &Region) -> Result<(), RestoreError> {
        if !region.is_well_formed() {
            return Err(RestoreError::InvalidRegion { region: *region });
        }

        let rows = region.row_count();
        let cols = region.col_count();
        if rows > self.config.max_region_rows || cols > self.config.max_region_cols {
            return Err(RestoreError::RegionTooLarge {
                region: *region,
                rows,
                cols,
                max_rows: self.config.max_region_rows,
                max_cols: self.config.max_region_cols,
            });
        }
        Ok(())
    }

    fn restore_cell<G: Grid + ?Sized>(
        &self,
        grid: &mut G,
        region: &Region,
        row: u32,
        col: u32,
        (max_row, max_col): (u32, u32),
        tracker: &mut ContinuityTracker,
    ) -> CellOutcome {
        if row > max_row || col > max_col {
            return CellOutcome::OutOfBounds;
        }

        let month = month_of(col, region);
        let day = day_of(row, region);
        match self.config.calendar.days_in_month(month) {
            Some(days) if day >= 1 && day <= days => {}
            _ => return CellOutcome::InvalidDate { month, day },
        }

        let text = match grid.read_text(row, col) {
            Ok(text) => text,
            Err(e) => {
                return CellOutcome::Failed {
                    message: e.to_string(),
                }
            }
        };

        match classify(&text, &self.config) {
            CellText::Empty => CellOutcome::Empty,
            CellText::Oversized => CellOutcome::Oversized,
            CellText::Malformed => {
                debug!("Unparseable text {:?} at {}", text, cell_address(row, col));
                CellOutcome::Malformed
            }
            CellText::OutOfRange => {
                debug!("Value {:?} at {} is out of range", text, cell_address(row, col));
                CellOutcome::OutOfRange
            }
            CellText::Full(value) => {
                tracker.record_full(month, col, day, value);
                CellOutcome::AlreadyComplete { value }
            }
            CellText::Truncated(fraction) => {
                let Some(anchor) = tracker.anchor_for(month, col, day) else {
                    debug!("No anchor for {} (month {}, day {})", cell_address(row, col), month, day);
                    return CellOutcome::NoAnchor;
                };

                let restored = reconstruct(anchor, fraction);
                if !self.config.is_valid_level(restored) {
                    debug!(
                        "Restored value {} at {} is out of range",
                        restored,
                        cell_address(row, col)
                    );
                    return CellOutcome::OutOfRange;
                }

                if let Err(e) = grid.write_number(row, col, restored) {
                    return CellOutcome::Failed {
                        message: e.to_string(),
                    };
                }
                tracker.record_restored(month, col, restored);
                CellOutcome::Restored { value: restored }
            }
        }
    }
}
