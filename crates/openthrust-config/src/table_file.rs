//! Calibration-table file ingestion.
//!
//! Table files are CSV-like text, one `effort,pwm` pair per line:
//!
//! ```text
//! # Blue Robotics T500, 24 V supply
//! -10.00,1100
//! 0.00,1500
//! 10.00,1900
//! ```
//!
//! Blank lines and `#` comments are skipped. Rows must already be sorted
//! by effort; ordering and row-count invariants are enforced by
//! [`PwmTable::new`].

use std::fs;
use std::path::Path;

use openthrust_pwm::{PwmTable, TableRow};

use crate::{ConfigError, ConfigResult};

/// Parses calibration-table text into a validated table.
pub fn parse_pwm_table(text: &str) -> ConfigResult<PwmTable> {
    let mut rows = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = parse_row(line).map_err(|reason| ConfigError::MalformedRow {
            line: index + 1,
            reason,
        })?;
        rows.push(row);
    }

    Ok(PwmTable::new(rows)?)
}

/// Reads a calibration-table file and parses it.
pub fn load_pwm_table(path: impl AsRef<Path>) -> ConfigResult<PwmTable> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_pwm_table(&text)
}

fn parse_row(line: &str) -> Result<TableRow, String> {
    let Some((effort_field, pwm_field)) = line.split_once(',') else {
        return Err(format!("expected 'effort,pwm', got '{line}'"));
    };

    let effort: f32 = effort_field
        .trim()
        .parse()
        .map_err(|_| format!("invalid effort value '{}'", effort_field.trim()))?;
    let pwm: u16 = pwm_field
        .trim()
        .parse()
        .map_err(|_| format!("invalid PWM value '{}'", pwm_field.trim()))?;

    Ok(TableRow::new(effort, pwm))
}
