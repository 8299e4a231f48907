//! The effort→PWM calibration table.

use serde::{Deserialize, Serialize};

use crate::{TableError, TableResult};

/// One calibration measurement: the PWM width that produces an effort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Commanded effort (thruster domain unit, e.g. kgf).
    pub effort: f32,
    /// PWM pulse width in microseconds producing that effort.
    pub pwm: u16,
}

impl TableRow {
    /// Creates a row from an effort value and its measured PWM width.
    pub fn new(effort: f32, pwm: u16) -> Self {
        Self { effort, pwm }
    }
}

/// Ordered effort→PWM mapping, queried by linear interpolation.
///
/// Rows are strictly increasing in effort. The first row is the
/// saturation floor and the last the saturation ceiling: efforts outside
/// the table range clamp to the corresponding edge PWM instead of
/// extrapolating.
///
/// Construction validates the row invariants once; [`lookup`](Self::lookup)
/// can then assume them and stays allocation-free.
///
/// # Example
///
/// ```
/// use openthrust_pwm::{PwmTable, TableRow};
///
/// let table = PwmTable::new(vec![
///     TableRow::new(-10.0, 1100),
///     TableRow::new(0.0, 1500),
///     TableRow::new(10.0, 1900),
/// ])?;
///
/// assert_eq!(table.lookup(-20.0), 1100); // saturates low
/// assert_eq!(table.lookup(5.0), 1700); // interpolates
/// # Ok::<(), openthrust_pwm::TableError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TableRow>", into = "Vec<TableRow>")]
pub struct PwmTable {
    rows: Vec<TableRow>,
}

impl PwmTable {
    /// Builds a table from calibration rows, validating the invariants:
    /// at least two rows, all efforts finite and strictly increasing.
    pub fn new(rows: Vec<TableRow>) -> TableResult<Self> {
        if rows.len() < 2 {
            return Err(TableError::TooFewRows { found: rows.len() });
        }
        for (i, row) in rows.iter().enumerate() {
            if !row.effort.is_finite() {
                return Err(TableError::NonFiniteEffort { row: i });
            }
        }
        for (i, pair) in rows.windows(2).enumerate() {
            if let [lower, upper] = pair
                && upper.effort <= lower.effort
            {
                return Err(TableError::NonMonotonicEffort { row: i + 1 });
            }
        }
        Ok(Self { rows })
    }

    /// The validated calibration rows, in effort order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Number of calibration rows (always at least two).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; kept for slice-like API symmetry.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Smallest calibrated effort (the saturation floor).
    pub fn min_effort(&self) -> f32 {
        self.rows.first().map(|row| row.effort).unwrap_or_default()
    }

    /// Largest calibrated effort (the saturation ceiling).
    pub fn max_effort(&self) -> f32 {
        self.rows.last().map(|row| row.effort).unwrap_or_default()
    }

    /// PWM width of the saturation floor row.
    pub fn min_pwm(&self) -> u16 {
        self.rows.first().map(|row| row.pwm).unwrap_or_default()
    }

    /// PWM width of the saturation ceiling row.
    pub fn max_pwm(&self) -> u16 {
        self.rows.last().map(|row| row.pwm).unwrap_or_default()
    }

    /// True if the PWM column never decreases as effort increases.
    ///
    /// Not an invariant (a table may encode a sentinel dead band), but
    /// lookup output is only monotonic in effort when this holds.
    pub fn is_monotonic_pwm(&self) -> bool {
        self.rows
            .windows(2)
            .all(|pair| matches!(pair, [lower, upper] if upper.pwm >= lower.pwm))
    }

    /// Converts an effort to a PWM width.
    ///
    /// Out-of-range efforts saturate to the edge rows. In-range efforts
    /// interpolate linearly between the two straddling rows, rounded
    /// half-away-from-zero to the nearest integer width. Non-finite
    /// efforts clamp to the nearest edge (NaN to the floor).
    #[inline]
    pub fn lookup(&self, effort: f32) -> u16 {
        match self.rows.as_slice() {
            // one-or-zero-row tables are unconstructible, arms kept total
            [] => 0,
            [only] => only.pwm,
            [first, .., last] => {
                if effort.is_nan() || effort <= first.effort {
                    return first.pwm;
                }
                if effort >= last.effort {
                    return last.pwm;
                }
                let upper_idx = self.rows.partition_point(|row| row.effort < effort);
                match (
                    upper_idx
                        .checked_sub(1)
                        .and_then(|i| self.rows.get(i)),
                    self.rows.get(upper_idx),
                ) {
                    (Some(lower), Some(upper)) => interpolate(lower, upper, effort),
                    // interior efforts always have both neighbors
                    _ => last.pwm,
                }
            }
        }
    }
}

impl From<PwmTable> for Vec<TableRow> {
    fn from(table: PwmTable) -> Self {
        table.rows
    }
}

impl TryFrom<Vec<TableRow>> for PwmTable {
    type Error = TableError;

    fn try_from(rows: Vec<TableRow>) -> TableResult<Self> {
        Self::new(rows)
    }
}

fn interpolate(lower: &TableRow, upper: &TableRow, effort: f32) -> u16 {
    let ratio = (effort - lower.effort) / (upper.effort - lower.effort);
    let width = f32::from(lower.pwm) + ratio * (f32::from(upper.pwm) - f32::from(lower.pwm));
    width.round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must(result: TableResult<PwmTable>) -> PwmTable {
        match result {
            Ok(table) => table,
            Err(e) => panic!("unexpected table error: {e:?}"),
        }
    }

    fn t500_like() -> PwmTable {
        must(PwmTable::new(vec![
            TableRow::new(-10.0, 1100),
            TableRow::new(-5.0, 1300),
            TableRow::new(0.0, 1500),
            TableRow::new(5.0, 1700),
            TableRow::new(10.0, 1900),
        ]))
    }

    #[test]
    fn test_rejects_too_few_rows() {
        assert_eq!(
            PwmTable::new(vec![]),
            Err(TableError::TooFewRows { found: 0 })
        );
        assert_eq!(
            PwmTable::new(vec![TableRow::new(0.0, 1500)]),
            Err(TableError::TooFewRows { found: 1 })
        );
    }

    #[test]
    fn test_rejects_non_monotonic_effort() {
        let result = PwmTable::new(vec![
            TableRow::new(-1.0, 1400),
            TableRow::new(1.0, 1600),
            TableRow::new(1.0, 1700),
        ]);
        assert_eq!(result, Err(TableError::NonMonotonicEffort { row: 2 }));

        let result = PwmTable::new(vec![TableRow::new(1.0, 1600), TableRow::new(-1.0, 1400)]);
        assert_eq!(result, Err(TableError::NonMonotonicEffort { row: 1 }));
    }

    #[test]
    fn test_rejects_non_finite_effort() {
        let result = PwmTable::new(vec![
            TableRow::new(f32::NAN, 1400),
            TableRow::new(1.0, 1600),
        ]);
        assert_eq!(result, Err(TableError::NonFiniteEffort { row: 0 }));

        let result = PwmTable::new(vec![
            TableRow::new(-1.0, 1400),
            TableRow::new(f32::INFINITY, 1600),
        ]);
        assert_eq!(result, Err(TableError::NonFiniteEffort { row: 1 }));
    }

    #[test]
    fn test_saturates_at_edges() {
        let table = t500_like();
        assert_eq!(table.lookup(-10.32), 1100);
        assert_eq!(table.lookup(-100.0), 1100);
        assert_eq!(table.lookup(16.45), 1900);
        assert_eq!(table.lookup(f32::INFINITY), 1900);
        assert_eq!(table.lookup(f32::NEG_INFINITY), 1100);
    }

    #[test]
    fn test_exact_row_lookup() {
        let table = t500_like();
        assert_eq!(table.lookup(-10.0), 1100);
        assert_eq!(table.lookup(-5.0), 1300);
        assert_eq!(table.lookup(0.0), 1500);
        assert_eq!(table.lookup(10.0), 1900);
    }

    #[test]
    fn test_interpolates_between_rows() {
        let table = t500_like();
        assert_eq!(table.lookup(2.5), 1600);
        assert_eq!(table.lookup(-2.5), 1400);
        assert_eq!(table.lookup(7.5), 1800);
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // 1500 + 0.5 * 1 = 1500.5 -> 1501
        let table = must(PwmTable::new(vec![
            TableRow::new(0.0, 1500),
            TableRow::new(1.0, 1501),
        ]));
        assert_eq!(table.lookup(0.5), 1501);

        // descending PWM column: 1500 - 0.5 = 1499.5 -> 1500
        let table = must(PwmTable::new(vec![
            TableRow::new(0.0, 1500),
            TableRow::new(1.0, 1499),
        ]));
        assert_eq!(table.lookup(0.5), 1500);
    }

    #[test]
    fn test_nan_lookup_clamps_to_floor() {
        let table = t500_like();
        assert_eq!(table.lookup(f32::NAN), 1100);
    }

    #[test]
    fn test_min_max_accessors() {
        let table = t500_like();
        approx::assert_relative_eq!(table.min_effort(), -10.0);
        approx::assert_relative_eq!(table.max_effort(), 10.0);
        assert_eq!(table.min_pwm(), 1100);
        assert_eq!(table.max_pwm(), 1900);
        assert_eq!(table.len(), 5);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_is_monotonic_pwm() {
        assert!(t500_like().is_monotonic_pwm());

        let sentinel_band = must(PwmTable::new(vec![
            TableRow::new(-1.0, 1400),
            TableRow::new(-0.2, 42),
            TableRow::new(0.2, 42),
            TableRow::new(1.0, 1600),
        ]));
        assert!(!sentinel_band.is_monotonic_pwm());
    }

    #[test]
    fn test_serde_rejects_invalid_table() {
        let json = r#"[{"effort": 1.0, "pwm": 1600}, {"effort": -1.0, "pwm": 1400}]"#;
        let result: Result<PwmTable, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let table = t500_like();
        let json = serde_json::to_string(&table).expect("serialization failed");
        let parsed: PwmTable = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(parsed, table);
    }
}
