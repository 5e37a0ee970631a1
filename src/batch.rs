//! Running the restorer over several regions of one grid

use serde::Serialize;
use tracing::{info, instrument};

use crate::grid::Grid;
use crate::region::Region;
use crate::restorer::{ProcessingOutcome, RestoreError, WaterLevelRestorer};

/// Outcome of one region within a batch
#[derive(Debug, Clone, Serialize)]
pub struct RegionReport {
    pub region: String,
    pub outcome: ProcessingOutcome,
}

/// Per-region outcomes plus their explicit aggregate
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub regions: Vec<RegionReport>,
    pub total: ProcessingOutcome,
}

impl BatchReport {
    pub fn push(&mut self, region: &Region, outcome: ProcessingOutcome) {
        self.total.merge(&outcome);
        self.regions.push(RegionReport {
            region: region.to_string(),
            outcome,
        });
    }
}

/// Applies a [`WaterLevelRestorer`] to a list of regions.
///
/// Each region gets fresh continuity state. Counts and errors are summed into
/// [`BatchReport::total`] rather than lost between runs.
pub struct BatchRestorer {
    restorer: WaterLevelRestorer,
}

impl BatchRestorer {
    pub fn new(restorer: WaterLevelRestorer) -> Self {
        Self { restorer }
    }

    /// Check every region up front so a bad one aborts before any cell is written.
    pub fn validate(&self, regions: &[Region]) -> Result<(), RestoreError> {
        regions
            .iter()
            .try_for_each(|region| self.restorer.validate_region(region))
    }

    pub fn run<G: Grid + ?Sized>(
        &self,
        grid: &mut G,
        regions: &[Region],
    ) -> Result<BatchReport, RestoreError> {
        self.run_with_progress(grid, regions, |_, _| {})
    }

    /// Like [`run`](Self::run), calling `on_region` after each region completes.
    #[instrument(skip_all, fields(regions = regions.len()))]
    pub fn run_with_progress<G, F>(
        &self,
        grid: &mut G,
        regions: &[Region],
        mut on_region: F,
    ) -> Result<BatchReport, RestoreError>
    where
        G: Grid + ?Sized,
        F: FnMut(&Region, &ProcessingOutcome),
    {
        self.validate(regions)?;

        let mut report = BatchReport::default();
        for region in regions {
            let outcome = self.restorer.restore(grid, region)?;
            on_region(region, &outcome);
            report.push(region, outcome);
        }

        info!(
            "Batch complete: {} regions, {} restored, {} skipped, {} errors",
            report.regions.len(),
            report.total.processed,
            report.total.skipped,
            report.total.errors.len()
        );
        Ok(report)
    }
}
