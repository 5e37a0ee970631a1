//! Rectangular cell regions and A1-style range parsing

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegionParseError {
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("No ranges specified")]
    EmptyRangeList,
}

/// A rectangle of a worksheet, 1-based and inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl Region {
    pub fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    /// True when both starts are at least 1 and neither axis is inverted.
    pub fn is_well_formed(&self) -> bool {
        self.start_row >= 1
            && self.start_col >= 1
            && self.start_row <= self.end_row
            && self.start_col <= self.end_col
    }

    /// Zero for an inverted range.
    pub fn row_count(&self) -> u32 {
        span(self.start_row, self.end_row)
    }

    pub fn col_count(&self) -> u32 {
        span(self.start_col, self.end_col)
    }

    pub fn cell_count(&self) -> u64 {
        u64::from(self.row_count()) * u64::from(self.col_count())
    }

    /// Every (row, col) pair in row-major ascending order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        let Region {
            start_row,
            start_col,
            end_row,
            end_col,
        } = *self;
        (start_row..=end_row).flat_map(move |row| (start_col..=end_col).map(move |col| (row, col)))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = cell_address(self.start_row, self.start_col);
        if self.start_row == self.end_row && self.start_col == self.end_col {
            return write!(f, "{start}");
        }
        write!(f, "{start}:{}", cell_address(self.end_row, self.end_col))
    }
}

fn span(start: u32, end: u32) -> u32 {
    if end < start {
        0
    } else {
        end - start + 1
    }
}

/// Format a 1-based (row, col) as an A1 reference, e.g. (6, 3) -> "C6".
pub fn cell_address(row: u32, col: u32) -> String {
    format!("{}{}", column_letters(col), row)
}

/// Convert a 1-based column number to letters: 1 -> "A", 27 -> "AA".
pub fn column_letters(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

fn column_number(letters: &str) -> u32 {
    letters
        .bytes()
        .fold(0, |acc, b| acc * 26 + u32::from(b.to_ascii_uppercase() - b'A' + 1))
}

fn cell_ref_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\$?([A-Za-z]{1,3})\$?([0-9]{1,7})$").expect("valid regex"))
}

/// Parse a single A1 reference such as "C6" or "$C$6" into 1-based (row, col).
pub fn parse_cell_ref(value: &str) -> Result<(u32, u32), RegionParseError> {
    let trimmed = value.trim();
    let caps = cell_ref_regex()
        .captures(trimmed)
        .ok_or_else(|| RegionParseError::InvalidReference(value.to_string()))?;

    let col = column_number(&caps[1]);
    let row: u32 = caps[2]
        .parse()
        .map_err(|_| RegionParseError::InvalidReference(value.to_string()))?;
    if row == 0 {
        return Err(RegionParseError::InvalidReference(value.to_string()));
    }
    Ok((row, col))
}

/// Parse "C6:N36" (or a single cell "C6") into a region.
///
/// Bounds are taken as written; an inverted range is left for the engine to reject.
pub fn parse_region(value: &str) -> Result<Region, RegionParseError> {
    let trimmed = value.trim();
    match trimmed.split_once(':') {
        Some((start, end)) => {
            let (start_row, start_col) = parse_cell_ref(start)?;
            let (end_row, end_col) = parse_cell_ref(end)?;
            Ok(Region::new(start_row, start_col, end_row, end_col))
        }
        None => {
            let (row, col) = parse_cell_ref(trimmed)?;
            Ok(Region::new(row, col, row, col))
        }
    }
}

/// Parse a comma separated list of ranges, e.g. "B4:M34,B46:M76".
///
/// Both the ASCII comma and the full-width comma (U+FF0C) separate entries;
/// blank entries are dropped.
pub fn parse_region_list(value: &str) -> Result<Vec<Region>, RegionParseError> {
    let regions = value
        .split([',', '，'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_region)
        .collect::<Result<Vec<_>, _>>()?;

    if regions.is_empty() {
        return Err(RegionParseError::EmptyRangeList);
    }
    Ok(regions)
}
