//! Excel workbook access around the restorer: editing, preview and output naming

pub mod display;
pub mod output_path;
pub mod preview;
pub mod session;

use std::path::PathBuf;

use thiserror::Error;

use crate::restorer::RestoreError;

// Re-export commonly used items
pub use output_path::output_path_for;
pub use preview::{list_sheets, preview_region, RegionPreview};
pub use session::{SheetGrid, WorkbookSession};

#[derive(Error, Debug)]
pub enum WorkbookError {
    #[error("Failed to open workbook {path:?}: {message}")]
    Open { path: PathBuf, message: String },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Workbook has no worksheets")]
    NoSheets,

    #[error("Failed to save workbook {path:?}: {message}")]
    Save { path: PathBuf, message: String },

    #[error("Invalid region: {0}")]
    Region(#[from] RestoreError),
}
