// Shared helpers for integration tests
#![allow(dead_code)]

use std::path::Path;

use water_level_restorer::grid::MemoryGrid;
use water_level_restorer::region::Region;

pub fn approx_eq(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

/// Grid with the given rows placed at (1, 1), plus the region covering them.
pub fn grid_and_region(rows: &[&[&str]]) -> (MemoryGrid, Region) {
    let grid = MemoryGrid::from_rows(rows.iter().map(|row| row.iter().copied()));
    let width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
    let region = Region::new(1, 1, rows.len() as u32, width);
    (grid, region)
}

/// Write an .xlsx whose "Levels" sheet holds `cells` as (row, col, text) string cells.
pub fn write_levels_workbook(path: &Path, cells: &[(u32, u32, &str)]) {
    let mut book = umya_spreadsheet::new_file();
    book.get_sheet_by_name_mut("Sheet1")
        .expect("new workbook has Sheet1")
        .set_name("Levels");
    let sheet = book
        .get_sheet_by_name_mut("Levels")
        .expect("renamed sheet exists");
    for (row, col, text) in cells {
        sheet.get_cell_mut((*col, *row)).set_value_string(*text);
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).expect("Failed to write test workbook");
}

/// Write an .xlsx whose "Levels" sheet holds numeric cells as (row, col, value,
/// number format). `None` leaves the cell on the General format.
pub fn write_numeric_levels_workbook(path: &Path, cells: &[(u32, u32, f64, Option<&str>)]) {
    let mut book = umya_spreadsheet::new_file();
    book.get_sheet_by_name_mut("Sheet1")
        .expect("new workbook has Sheet1")
        .set_name("Levels");
    let sheet = book
        .get_sheet_by_name_mut("Levels")
        .expect("renamed sheet exists");
    for (row, col, value, format) in cells {
        sheet.get_cell_mut((*col, *row)).set_value_number(*value);
        if let Some(code) = format {
            sheet
                .get_style_mut((*col, *row))
                .get_number_format_mut()
                .set_format_code(*code);
        }
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).expect("Failed to write test workbook");
}
