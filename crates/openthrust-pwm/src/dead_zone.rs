//! Dead-zone span handling.

use serde::{Deserialize, Serialize};

use crate::table::PwmTable;

/// Inclusive effort span mapped to the no-actuation PWM width.
///
/// Thrusters do not spin below a minimum effort magnitude; commanding the
/// interpolated width inside that band just heats the ESC. Efforts inside
/// the span (and exact zero, always) are substituted with the configured
/// no-actuation width instead of being interpolated.
///
/// The span is an explicit configuration parameter. For calibration
/// tables that encode the band structurally (a run of rows mapped to the
/// no-actuation width itself), [`from_flat_run`](Self::from_flat_run)
/// recovers the span from the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeadZone {
    /// Most-negative effort inside the band.
    pub min: f32,
    /// Most-positive effort inside the band.
    pub max: f32,
}

impl DeadZone {
    /// Creates a span from its inclusive bounds.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// True if the effort falls inside the span, bounds included.
    #[inline]
    pub fn contains(&self, effort: f32) -> bool {
        effort >= self.min && effort <= self.max
    }

    /// True if the bounds are finite and ordered.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Derives the span from rows mapped to the no-actuation width.
    ///
    /// Returns the span between the outermost table rows whose PWM equals
    /// `no_actuation_pwm`, or `None` if no row does.
    pub fn from_flat_run(table: &PwmTable, no_actuation_pwm: u16) -> Option<Self> {
        let mut span: Option<(f32, f32)> = None;
        for row in table.rows() {
            if row.pwm == no_actuation_pwm {
                span = Some(match span {
                    None => (row.effort, row.effort),
                    Some((min, _)) => (min, row.effort),
                });
            }
        }
        span.map(|(min, max)| Self { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableRow;

    fn sentinel_table() -> PwmTable {
        match PwmTable::new(vec![
            TableRow::new(-10.0, 1100),
            TableRow::new(-0.17, 42),
            TableRow::new(0.26, 42),
            TableRow::new(10.0, 1900),
        ]) {
            Ok(table) => table,
            Err(e) => panic!("unexpected table error: {e:?}"),
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let zone = DeadZone::new(-0.2, 0.3);
        assert!(zone.contains(-0.2));
        assert!(zone.contains(0.3));
        assert!(zone.contains(0.0));
        assert!(!zone.contains(-0.21));
        assert!(!zone.contains(0.31));
    }

    #[test]
    fn test_contains_rejects_nan() {
        let zone = DeadZone::new(-0.2, 0.3);
        assert!(!zone.contains(f32::NAN));
    }

    #[test]
    fn test_is_valid() {
        assert!(DeadZone::new(-0.2, 0.3).is_valid());
        assert!(DeadZone::new(0.0, 0.0).is_valid());
        assert!(!DeadZone::new(0.3, -0.2).is_valid());
        assert!(!DeadZone::new(f32::NAN, 0.3).is_valid());
        assert!(!DeadZone::new(-0.2, f32::INFINITY).is_valid());
    }

    #[test]
    fn test_from_flat_run() {
        let zone = DeadZone::from_flat_run(&sentinel_table(), 42);
        assert_eq!(zone, Some(DeadZone::new(-0.17, 0.26)));
    }

    #[test]
    fn test_from_flat_run_single_row() {
        let table = match PwmTable::new(vec![
            TableRow::new(-1.0, 1400),
            TableRow::new(0.0, 42),
            TableRow::new(1.0, 1600),
        ]) {
            Ok(table) => table,
            Err(e) => panic!("unexpected table error: {e:?}"),
        };
        assert_eq!(
            DeadZone::from_flat_run(&table, 42),
            Some(DeadZone::new(0.0, 0.0))
        );
    }

    #[test]
    fn test_from_flat_run_absent() {
        assert_eq!(DeadZone::from_flat_run(&sentinel_table(), 1500), None);
    }
}
