use crate::config::RestorerConfig;

/// Truncated readings always carry two fractional digits, so "7" means .07.
const TRUNCATED_DIVISOR: f64 = 100.0;

/// What a cell's trimmed text looks like before any continuity is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellText {
    Empty,
    /// Longer than the configured maximum; not a reading we recognise
    Oversized,
    /// Contains a decimal point and parses into the valid level range
    Full(f64),
    /// No decimal point; the value holds only the fractional digits
    Truncated(f64),
    OutOfRange,
    Malformed,
}

/// Result of processing one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellOutcome {
    Restored { value: f64 },
    AlreadyComplete { value: f64 },
    Empty,
    Oversized,
    OutOfRange,
    NoAnchor,
    Malformed,
    InvalidDate { month: u32, day: u32 },
    OutOfBounds,
    Failed { message: String },
}

impl CellOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, CellOutcome::Restored { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            CellOutcome::Restored { .. } => "restored",
            CellOutcome::AlreadyComplete { .. } => "already_complete",
            CellOutcome::Empty => "empty",
            CellOutcome::Oversized => "oversized",
            CellOutcome::OutOfRange => "out_of_range",
            CellOutcome::NoAnchor => "no_anchor",
            CellOutcome::Malformed => "malformed",
            CellOutcome::InvalidDate { .. } => "invalid_date",
            CellOutcome::OutOfBounds => "out_of_bounds",
            CellOutcome::Failed { .. } => "failed",
        }
    }
}

/// Classify the raw text of a cell.
///
/// Text containing `.` is a full reading. Anything else that parses as a whole
/// number is a truncated reading. A full reading outside the level range is
/// rejected outright and never reinterpreted as truncated.
pub fn classify(text: &str, config: &RestorerConfig) -> CellText {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return CellText::Empty;
    }
    if trimmed.chars().count() > config.max_text_len {
        return CellText::Oversized;
    }

    let parsed = match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return CellText::Malformed,
    };

    if trimmed.contains('.') {
        if config.is_valid_level(parsed) {
            CellText::Full(parsed)
        } else {
            CellText::OutOfRange
        }
    } else if parsed.fract() != 0.0 {
        // e.g. "5e-1"
        CellText::Malformed
    } else if parsed < 0.0 || parsed > config.max_truncated {
        CellText::OutOfRange
    } else {
        CellText::Truncated(parsed)
    }
}

/// Combine the integer part of `anchor` with the fractional digits of a truncated reading.
pub fn reconstruct(anchor: f64, truncated: f64) -> f64 {
    anchor.floor() + truncated / TRUNCATED_DIVISOR
}
