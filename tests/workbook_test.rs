// Tests for restoring readings inside real .xlsx files

mod common;

use common::{approx_eq, write_levels_workbook, write_numeric_levels_workbook};
use water_level_restorer::batch::BatchRestorer;
use water_level_restorer::grid::Grid;
use water_level_restorer::region::{parse_region_list, Region};
use water_level_restorer::restorer::{RestoreError, WaterLevelRestorer};
use water_level_restorer::workbook::{
    list_sheets, output_path_for, preview_region, WorkbookError, WorkbookSession,
};

/// Two months (C and D) of four days starting at row 6, as in the usual C6:N36 layout.
fn sample_cells() -> Vec<(u32, u32, &'static str)> {
    vec![
        (5, 3, "Jan"),
        (5, 4, "Feb"),
        (6, 3, "12.34"),
        (6, 4, "30.10"),
        (7, 3, "56"),
        (7, 4, "25"),
        (8, 3, "7"),
        (8, 4, ""),
        (9, 3, "abc"),
        (9, 4, "5"),
    ]
}

#[test]
fn test_open_missing_workbook() {
    let result = WorkbookSession::open("/nonexistent/path/to/levels.xlsx");
    assert!(matches!(result, Err(WorkbookError::Open { .. })));
}

#[test]
fn test_list_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("levels.xlsx");
    write_levels_workbook(&path, &sample_cells());

    assert_eq!(list_sheets(&path).unwrap(), vec!["Levels".to_string()]);
}

#[test]
fn test_preview_reads_display_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("levels.xlsx");
    write_levels_workbook(&path, &sample_cells());

    let region = parse_region_list("C6:D9").unwrap()[0];
    let preview = preview_region(&path, "Levels", &region, &WaterLevelRestorer::default()).unwrap();

    assert_eq!(preview.rows.len(), 4);
    assert_eq!(preview.rows[0], vec!["12.34".to_string(), "30.10".to_string()]);
    assert_eq!(preview.rows[2][1], "");
}

#[test]
fn test_preview_missing_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("levels.xlsx");
    write_levels_workbook(&path, &sample_cells());

    let region = parse_region_list("C6:D9").unwrap()[0];
    match preview_region(&path, "Nope", &region, &WaterLevelRestorer::default()) {
        Err(WorkbookError::SheetNotFound(sheet)) => assert_eq!(sheet, "Nope"),
        other => panic!("Expected SheetNotFound, got {other:?}"),
    }
}

#[test]
fn test_restore_and_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("levels.xlsx");
    write_levels_workbook(&input, &sample_cells());

    let regions = parse_region_list("C6:D9").unwrap();
    let batch = BatchRestorer::new(WaterLevelRestorer::default());

    let mut session = WorkbookSession::open(&input).unwrap();
    let report = {
        let mut grid = session.grid("Levels").unwrap();
        batch.run(&mut grid, &regions).unwrap()
    };

    assert_eq!(report.total.processed, 4);
    assert_eq!(report.total.skipped, 4);
    assert!(report.total.errors.is_empty());

    let output = output_path_for(&input);
    session.save_as(&output).unwrap();
    assert_eq!(output, dir.path().join("levels_restored.xlsx"));

    // Read the saved copy back
    let mut saved = WorkbookSession::open(&output).unwrap();
    let grid = saved.grid("Levels").unwrap();
    let number = |row, col| -> f64 { grid.read_text(row, col).unwrap().parse().unwrap() };

    assert!(approx_eq(number(7, 3), 12.56));
    assert!(approx_eq(number(8, 3), 12.07));
    assert!(approx_eq(number(7, 4), 30.25));
    assert!(approx_eq(number(9, 4), 30.05));
    assert_eq!(grid.read_text(9, 3).unwrap(), "abc");
    assert_eq!(grid.read_text(5, 3).unwrap(), "Jan");

    // The input is left as it was
    let mut original = WorkbookSession::open(&input).unwrap();
    let grid = original.grid("Levels").unwrap();
    assert_eq!(grid.read_text(7, 3).unwrap(), "56");
}

#[test]
fn test_second_output_gets_counter() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("levels.xlsx");
    write_levels_workbook(&input, &sample_cells());

    let session = WorkbookSession::open(&input).unwrap();
    session.save_as(output_path_for(&input)).unwrap();

    assert_eq!(
        output_path_for(&input),
        dir.path().join("levels_restored1.xlsx")
    );
}

#[test]
fn test_formatted_numbers_are_full_readings() {
    // Full readings stored as numbers with a two decimal format, truncated
    // readings as plain numbers, all in one January column
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("numeric.xlsx");
    write_numeric_levels_workbook(
        &input,
        &[
            (1, 1, 30.1, Some("0.00")),
            (2, 1, 25.0, None),
            (3, 1, 12.34, Some("0.00")),
            (4, 1, 56.0, None),
            (5, 1, 12.3, Some("0.00")),
            (6, 1, 7.0, None),
        ],
    );

    let mut session = WorkbookSession::open(&input).unwrap();
    let mut grid = session.grid("Levels").unwrap();
    let texts: Vec<String> = (1..=6).map(|row| grid.read_text(row, 1).unwrap()).collect();
    assert_eq!(texts, vec!["30.10", "25", "12.34", "56", "12.30", "7"]);

    let outcome = WaterLevelRestorer::default()
        .restore(&mut grid, &Region::new(1, 1, 6, 1))
        .unwrap();

    assert_eq!(outcome.processed, 3);
    assert_eq!(outcome.skipped, 3);
    assert_eq!(outcome.skip_reasons.get("already_complete"), Some(&3));
    let number = |row| -> f64 { grid.read_text(row, 1).unwrap().parse().unwrap() };
    assert!(approx_eq(number(2), 30.25));
    assert!(approx_eq(number(4), 12.56));
    assert!(approx_eq(number(6), 12.07));
}

#[test]
fn test_preview_shows_engine_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("numeric.xlsx");
    write_numeric_levels_workbook(
        &path,
        &[(1, 1, 5.0, Some("0.00")), (2, 1, 30.1, Some("0.00")), (3, 1, 7.0, None)],
    );

    let region = Region::new(1, 1, 3, 1);
    let preview = preview_region(&path, "Levels", &region, &WaterLevelRestorer::default()).unwrap();

    let mut session = WorkbookSession::open(&path).unwrap();
    let grid = session.grid("Levels").unwrap();
    let engine_text: Vec<Vec<String>> = (1..=3)
        .map(|row| vec![grid.read_text(row, 1).unwrap()])
        .collect();

    assert_eq!(preview.rows, engine_text);
    assert_eq!(preview.rows[0][0], "5.00");
    assert_eq!(preview.rows[1][0], "30.10");
}

#[test]
fn test_preview_rejects_oversized_region() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("levels.xlsx");
    write_levels_workbook(&path, &sample_cells());

    let region = parse_region_list("A1:ZZZ9999999").unwrap()[0];
    match preview_region(&path, "Levels", &region, &WaterLevelRestorer::default()) {
        Err(WorkbookError::Region(RestoreError::RegionTooLarge { rows, .. })) => {
            assert_eq!(rows, 9_999_999)
        }
        other => panic!("Expected RegionTooLarge, got {other:?}"),
    }
}

#[test]
fn test_preview_rejects_inverted_region() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("levels.xlsx");
    write_levels_workbook(&path, &sample_cells());

    let region = parse_region_list("N36:C6").unwrap()[0];
    let result = preview_region(&path, "Levels", &region, &WaterLevelRestorer::default());
    assert!(matches!(
        result,
        Err(WorkbookError::Region(RestoreError::InvalidRegion { .. }))
    ));
}
