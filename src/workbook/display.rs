use umya_spreadsheet::{Cell, CellRawValue, NumberingFormat, Worksheet};

/// Text a user sees in a cell, the same string the restorer classifies and
/// preview prints. Missing cells read as "".
pub fn cell_text(sheet: &Worksheet, row: u32, col: u32) -> String {
    sheet
        .get_cell((col, row))
        .map(display_text)
        .unwrap_or_default()
}

/// Render one cell. Numbers follow the decimal places of their number format;
/// text is returned as stored.
pub fn display_text(cell: &Cell) -> String {
    match cell.get_raw_value() {
        CellRawValue::Numeric(n) => number_text(*n, format_code(cell)),
        CellRawValue::Lazy(s) => match s.trim().parse::<f64>() {
            Ok(n) => number_text(n, format_code(cell)),
            Err(_) => s.to_string(),
        },
        CellRawValue::String(s) => s.to_string(),
        CellRawValue::RichText(rt) => rt.get_text().to_string(),
        CellRawValue::Empty => String::new(),
        _ => cell.get_formatted_value(),
    }
}

fn format_code(cell: &Cell) -> &str {
    cell.get_style()
        .get_number_format()
        .map(|format| format.get_format_code())
        .unwrap_or(NumberingFormat::FORMAT_GENERAL)
}

/// Format a number with a plain numeric format code such as `0`, `0.00`,
/// `#,##0.0` or `0.0#`. Codes with anything else (dates, percents, literals)
/// are not ours to interpret and fall back to the shortest representation.
pub fn number_text(value: f64, format_code: &str) -> String {
    let section = format_code.split(';').next().unwrap_or_default().trim();
    if section.is_empty()
        || section.eq_ignore_ascii_case(NumberingFormat::FORMAT_GENERAL)
        || !section.chars().all(|c| matches!(c, '0' | '#' | '.' | ','))
    {
        return value.to_string();
    }

    let decimals = section.split_once('.').map(|(_, d)| d).unwrap_or_default();
    let required = decimals.chars().filter(|c| *c == '0').count();
    let optional = decimals.chars().filter(|c| *c == '#').count();

    let mut text = format!("{:.*}", required + optional, value);
    if optional > 0 {
        // Drop trailing zeros the format marks optional, never below `required`
        let point = text.find('.').map(|i| i + 1).unwrap_or(text.len());
        while text.len() > point + required && text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}
