pub mod batch;
pub mod config;
pub mod grid;
pub mod region;
pub mod restorer;
pub mod workbook;
