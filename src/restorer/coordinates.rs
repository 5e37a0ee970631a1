use crate::region::Region;

/// Month for a column: the region's first column is January, clamped to 1-12.
pub fn month_of(col: u32, region: &Region) -> u32 {
    let offset = i64::from(col) - i64::from(region.start_col) + 1;
    offset.clamp(1, 12) as u32
}

/// Day for a row: the region's first row is day 1. Never below 1; the upper
/// bound is checked against the month length by the caller.
pub fn day_of(row: u32, region: &Region) -> u32 {
    let offset = i64::from(row) - i64::from(region.start_row) + 1;
    offset.clamp(1, i64::from(u32::MAX)) as u32
}
