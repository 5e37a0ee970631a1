use crate::region::Region;

/// Fatal errors: the whole call is rejected before any cell is touched.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RestoreError {
    #[error("Invalid region {region:?}: start must not exceed end and both start at 1 or more")]
    InvalidRegion { region: Region },

    #[error("Region {region} is too large: {rows} rows x {cols} columns (limit {max_rows} x {max_cols})")]
    RegionTooLarge {
        region: Region,
        rows: u32,
        cols: u32,
        max_rows: u32,
        max_cols: u32,
    },
}
