use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use tracing::{debug, info};
use umya_spreadsheet::Worksheet;

use crate::region::{column_letters, Region};
use crate::restorer::WaterLevelRestorer;
use crate::workbook::display::cell_text;
use crate::workbook::{WorkbookError, WorkbookSession};

/// Display text of every cell in a region, row by row.
#[derive(Debug, Clone)]
pub struct RegionPreview {
    pub region: Region,
    pub rows: Vec<Vec<String>>,
}

impl RegionPreview {
    /// Read `region` from `sheet` using the same cell text the restorer sees.
    pub fn from_sheet(sheet: &Worksheet, region: &Region) -> Self {
        let rows = (region.start_row..=region.end_row)
            .map(|row| {
                (region.start_col..=region.end_col)
                    .map(|col| cell_text(sheet, row, col))
                    .collect()
            })
            .collect();
        Self {
            region: *region,
            rows,
        }
    }

    /// Render as a plain text table headed by column letters, one line per row.
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = (self.region.start_col..=self.region.end_col)
            .map(|col| column_letters(col).len())
            .collect();
        for row in &self.rows {
            for (i, text) in row.iter().enumerate() {
                widths[i] = widths[i].max(text.chars().count());
            }
        }
        let label_width = self.region.end_row.to_string().len();

        let mut out = format!("{:>label_width$}", "");
        for (i, col) in (self.region.start_col..=self.region.end_col).enumerate() {
            out.push_str(&format!(" | {:>width$}", column_letters(col), width = widths[i]));
        }
        out.push('\n');

        for (offset, row) in self.rows.iter().enumerate() {
            out.push_str(&format!(
                "{:>label_width$}",
                self.region.start_row + offset as u32
            ));
            for (i, text) in row.iter().enumerate() {
                out.push_str(&format!(" | {:>width$}", text, width = widths[i]));
            }
            out.push('\n');
        }
        out
    }
}

/// Names of all worksheets, in workbook order.
pub fn list_sheets(path: impl AsRef<Path>) -> Result<Vec<String>, WorkbookError> {
    let path = path.as_ref();
    let workbook = open_workbook_auto(path).map_err(|e| WorkbookError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(workbook.sheet_names())
}

/// Read a region without modifying anything. Empty or missing cells read as "".
///
/// The region must pass the restorer's validation, so preview is bounded by
/// the same size guard as a restore.
pub fn preview_region(
    path: impl AsRef<Path>,
    sheet: &str,
    region: &Region,
    restorer: &WaterLevelRestorer,
) -> Result<RegionPreview, WorkbookError> {
    restorer.validate_region(region)?;
    info!("Previewing {} on sheet {}", region, sheet);

    let session = WorkbookSession::open(path)?;
    let worksheet = session.sheet(sheet)?;
    debug!(
        "Sheet {} extent {:?}",
        sheet,
        worksheet.get_highest_column_and_row()
    );
    Ok(RegionPreview::from_sheet(worksheet, region))
}
