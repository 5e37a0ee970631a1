use std::path::Path;

use tracing::{debug, info};
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::grid::{Grid, GridError};
use crate::region::cell_address;
use crate::workbook::display::cell_text;
use crate::workbook::WorkbookError;

/// An `.xlsx` workbook opened for repair.
///
/// The whole workbook is held in memory; nothing touches disk until
/// [`save_as`](Self::save_as).
pub struct WorkbookSession {
    book: Spreadsheet,
}

impl WorkbookSession {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WorkbookError> {
        let path = path.as_ref();
        info!("Opening workbook: {:?}", path);

        let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| WorkbookError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!("Workbook has {} sheets", book.get_sheet_collection().len());
        Ok(Self { book })
    }

    /// Wrap an already loaded spreadsheet.
    pub fn from_spreadsheet(book: Spreadsheet) -> Self {
        Self { book }
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.book
            .get_sheet_collection()
            .iter()
            .map(|sheet| sheet.get_name().to_string())
            .collect()
    }

    pub fn first_sheet_name(&self) -> Result<String, WorkbookError> {
        self.sheet_names()
            .into_iter()
            .next()
            .ok_or(WorkbookError::NoSheets)
    }

    /// Read-only access to one worksheet.
    pub fn sheet(&self, name: &str) -> Result<&Worksheet, WorkbookError> {
        self.book
            .get_sheet_by_name(name)
            .ok_or_else(|| WorkbookError::SheetNotFound(name.to_string()))
    }

    /// Borrow one worksheet as a [`Grid`] for the restorer.
    pub fn grid(&mut self, sheet: &str) -> Result<SheetGrid<'_>, WorkbookError> {
        let worksheet = self
            .book
            .get_sheet_by_name_mut(sheet)
            .ok_or_else(|| WorkbookError::SheetNotFound(sheet.to_string()))?;
        Ok(SheetGrid::new(worksheet))
    }

    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<(), WorkbookError> {
        let path = path.as_ref();
        umya_spreadsheet::writer::xlsx::write(&self.book, path).map_err(|e| {
            WorkbookError::Save {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        info!("Saved workbook to {:?}", path);
        Ok(())
    }
}

/// One worksheet seen through the [`Grid`] interface.
///
/// Text is the cell's display value as rendered by
/// [`display_text`](crate::workbook::display::display_text). umya addresses
/// cells as (col, row).
pub struct SheetGrid<'a> {
    sheet: &'a mut Worksheet,
    max_row: u32,
    max_col: u32,
}

impl<'a> SheetGrid<'a> {
    pub fn new(sheet: &'a mut Worksheet) -> Self {
        let (max_col, max_row) = sheet.get_highest_column_and_row();
        Self {
            sheet,
            max_row,
            max_col,
        }
    }

    fn check_bounds(&self, row: u32, col: u32) -> Result<(), GridError> {
        if row == 0 || col == 0 || row > self.max_row || col > self.max_col {
            return Err(GridError::OutOfBounds {
                address: cell_address(row, col),
                max_row: self.max_row,
                max_col: self.max_col,
            });
        }
        Ok(())
    }
}

impl Grid for SheetGrid<'_> {
    fn read_text(&self, row: u32, col: u32) -> Result<String, GridError> {
        self.check_bounds(row, col)?;
        Ok(cell_text(&*self.sheet, row, col))
    }

    fn write_number(&mut self, row: u32, col: u32, value: f64) -> Result<(), GridError> {
        self.check_bounds(row, col)?;
        self.sheet.get_cell_mut((col, row)).set_value_number(value);
        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.max_row, self.max_col)
    }
}
