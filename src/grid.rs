//! The narrow grid interface consumed by the reconstruction engine

use std::collections::BTreeMap;

use thiserror::Error;

use crate::region::cell_address;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("cell {address} is outside the grid ({max_row} rows x {max_col} columns)")]
    OutOfBounds {
        address: String,
        max_row: u32,
        max_col: u32,
    },

    #[error("cell access failed: {0}")]
    Access(String),
}

/// A mutable table of cells addressed by 1-based (row, col).
///
/// The grid owns cell storage. The engine only reads display text and
/// overwrites cells with numbers; it never restructures the grid.
pub trait Grid {
    /// Raw display text of a cell, empty when the cell holds nothing.
    fn read_text(&self, row: u32, col: u32) -> Result<String, GridError>;

    /// Overwrite a cell with a numeric value.
    fn write_number(&mut self, row: u32, col: u32, value: f64) -> Result<(), GridError>;

    /// Physical extent as (max_row, max_col).
    fn dimensions(&self) -> (u32, u32);
}

/// A cell held by [`MemoryGrid`].
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryCell {
    Text(String),
    Number(f64),
}

/// In-memory grid used by tests and by callers that already hold their data.
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    cells: BTreeMap<(u32, u32), MemoryCell>,
    max_row: u32,
    max_col: u32,
}

impl MemoryGrid {
    /// An empty grid with a fixed physical extent.
    pub fn with_dimensions(max_row: u32, max_col: u32) -> Self {
        Self {
            cells: BTreeMap::new(),
            max_row,
            max_col,
        }
    }

    /// Build a grid whose top-left cell is (1, 1) from rows of text.
    pub fn from_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut grid = Self::default();
        for (r, row) in rows.into_iter().enumerate() {
            for (c, text) in row.into_iter().enumerate() {
                grid.set_text(r as u32 + 1, c as u32 + 1, text);
            }
        }
        grid
    }

    /// Store text at (row, col), growing the extent if needed.
    pub fn set_text(&mut self, row: u32, col: u32, text: impl Into<String>) {
        self.cells.insert((row, col), MemoryCell::Text(text.into()));
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&MemoryCell> {
        self.cells.get(&(row, col))
    }

    /// The numeric value at (row, col) if the cell has been written as a number.
    pub fn number(&self, row: u32, col: u32) -> Option<f64> {
        match self.cells.get(&(row, col)) {
            Some(MemoryCell::Number(n)) => Some(*n),
            _ => None,
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

impl Grid for MemoryGrid {
    fn read_text(&self, row: u32, col: u32) -> Result<String, GridError> {
        self.check_bounds(row, col)?;
        Ok(match self.cells.get(&(row, col)) {
            Some(MemoryCell::Text(text)) => text.clone(),
            Some(MemoryCell::Number(n)) => n.to_string(),
            None => String::new(),
        })
    }

    fn write_number(&mut self, row: u32, col: u32, value: f64) -> Result<(), GridError> {
        self.check_bounds(row, col)?;
        self.cells.insert((row, col), MemoryCell::Number(value));
        Ok(())
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.max_row, self.max_col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_sets_extent() {
        let grid = MemoryGrid::from_rows([["a", "b", "c"], ["d", "e", "f"]]);
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.read_text(2, 3).unwrap(), "f");
    }

    #[test]
    fn test_missing_cell_reads_empty() {
        let grid = MemoryGrid::with_dimensions(5, 5);
        assert_eq!(grid.read_text(3, 3).unwrap(), "");
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = MemoryGrid::with_dimensions(2, 2);
        match grid.read_text(3, 1) {
            Err(GridError::OutOfBounds { address, .. }) => assert_eq!(address, "A3"),
            other => panic!("Expected OutOfBounds, got {other:?}"),
        }
        assert!(grid.write_number(1, 3, 1.0).is_err());
    }

    #[test]
    fn test_write_number_replaces_text() {
        let mut grid = MemoryGrid::from_rows([["56"]]);
        grid.write_number(1, 1, 12.56).unwrap();
        assert_eq!(grid.number(1, 1), Some(12.56));
    }
}
