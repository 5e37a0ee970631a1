use std::env;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// How many days each month has when validating the day derived from a row.
///
/// Grids carry no year, so February's length is a configuration decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthCalendar {
    /// Every month at its longest; February has 29 days.
    #[default]
    LeapFebruary,
    /// Month lengths of a concrete calendar year.
    Year(i32),
}

impl MonthCalendar {
    /// Number of days in `month` (1-12). Returns `None` for an invalid month.
    pub fn days_in_month(&self, month: u32) -> Option<u32> {
        if !(1..=12).contains(&month) {
            return None;
        }
        match self {
            MonthCalendar::LeapFebruary => Some(match month {
                2 => 29,
                4 | 6 | 9 | 11 => 30,
                _ => 31,
            }),
            MonthCalendar::Year(year) => {
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(*year + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(*year, month + 1, 1)?
                };
                // Last day of the month is its length
                Some(next.pred_opt()?.day())
            }
        }
    }
}

/// Limits and calendar used by the reconstruction engine.
#[derive(Debug, Clone)]
pub struct RestorerConfig {
    pub min_level: f64,
    pub max_level: f64,
    /// Longer trimmed text is ignored outright
    pub max_text_len: usize,
    /// Upper bound for the numeric value of a truncated reading
    pub max_truncated: f64,
    pub max_region_rows: u32,
    pub max_region_cols: u32,
    pub error_display_limit: usize,
    pub calendar: MonthCalendar,
}

impl Default for RestorerConfig {
    fn default() -> Self {
        Self {
            min_level: 0.0,
            max_level: 100.0,
            max_text_len: 5,
            max_truncated: 999.0,
            max_region_rows: 1000,
            max_region_cols: 100,
            error_display_limit: 10,
            calendar: MonthCalendar::LeapFebruary,
        }
    }
}

impl RestorerConfig {
    /// Load configuration from `WLR_*` environment variables, falling back to defaults
    /// for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(RestorerConfig {
            min_level: env_or("WLR_MIN_LEVEL", defaults.min_level)?,
            max_level: env_or("WLR_MAX_LEVEL", defaults.max_level)?,
            max_text_len: env_or("WLR_MAX_TEXT_LEN", defaults.max_text_len)?,
            max_truncated: env_or("WLR_MAX_TRUNCATED", defaults.max_truncated)?,
            max_region_rows: env_or("WLR_MAX_REGION_ROWS", defaults.max_region_rows)?,
            max_region_cols: env_or("WLR_MAX_REGION_COLS", defaults.max_region_cols)?,
            error_display_limit: env_or("WLR_ERROR_DISPLAY_LIMIT", defaults.error_display_limit)?,
            calendar: match env::var("WLR_REFERENCE_YEAR") {
                Ok(value) => MonthCalendar::Year(parse_var("WLR_REFERENCE_YEAR", &value)?),
                Err(_) => MonthCalendar::LeapFebruary,
            },
        })
    }

    pub fn is_valid_level(&self, value: f64) -> bool {
        value >= self.min_level && value <= self.max_level
    }
}

fn env_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => parse_var(var, &value),
        Err(_) => Ok(default),
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        })
}
