//! Conversion orchestration.

use openthrust_pwm::{DeadZone, PwmTable};
use openthrust_types::{ControlMode, HelixAlignment, JointCommand, PwmCommand};

use crate::ConvertResult;
use crate::validate::validate_command;

/// Converts per-joint effort commands into PWM duty-cycle commands.
///
/// Holds the configuration captured at driver-configure time: the
/// calibrated table, one propeller alignment per joint slot, the
/// no-actuation width and the optional dead-zone span. All of it is
/// immutable for the lifetime of the converter, which makes
/// [`convert`](Self::convert) a pure function: same command in, same
/// command out.
///
/// # Example
///
/// ```
/// use openthrust_converter::ThrusterConverter;
/// use openthrust_pwm::{PwmTable, TableRow};
/// use openthrust_types::{HelixAlignment, JointCommand, JointState, Timestamp};
///
/// let table = PwmTable::new(vec![
///     TableRow::new(-10.0, 1100),
///     TableRow::new(0.0, 1500),
///     TableRow::new(10.0, 1900),
/// ])?;
/// let converter = ThrusterConverter::new(table, vec![HelixAlignment::Normal], 1500);
///
/// let cmd = JointCommand::new(Timestamp::from_micros(1))
///     .with_joint("stern", JointState::effort(5.0));
/// let pwm = converter.convert(&cmd)?;
/// assert_eq!(pwm.duty_cycles, [1700]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ThrusterConverter {
    table: PwmTable,
    alignments: Vec<HelixAlignment>,
    no_actuation_pwm: u16,
    dead_zone: Option<DeadZone>,
    mode: ControlMode,
}

impl ThrusterConverter {
    /// Creates a converter for effort commands.
    ///
    /// `alignments` has one entry per expected joint slot; commands are
    /// checked against its length. The dead zone defaults to "exact zero
    /// only"; widen it with [`with_dead_zone`](Self::with_dead_zone).
    pub fn new(table: PwmTable, alignments: Vec<HelixAlignment>, no_actuation_pwm: u16) -> Self {
        Self {
            table,
            alignments,
            no_actuation_pwm,
            dead_zone: None,
            mode: ControlMode::Effort,
        }
    }

    /// Sets the inclusive effort span substituted with the no-actuation
    /// width.
    #[must_use]
    pub fn with_dead_zone(mut self, dead_zone: DeadZone) -> Self {
        self.dead_zone = Some(dead_zone);
        self
    }

    /// The configured per-slot propeller alignments.
    pub fn alignments(&self) -> &[HelixAlignment] {
        &self.alignments
    }

    /// The configured no-actuation width.
    pub fn no_actuation_pwm(&self) -> u16 {
        self.no_actuation_pwm
    }

    /// The calibration table lookups go through.
    pub fn table(&self) -> &PwmTable {
        &self.table
    }

    /// Converts one joint command into one PWM command.
    ///
    /// Validates the command shape, then for each joint in input order:
    /// applies the slot's alignment, substitutes the no-actuation width
    /// for dead-zone efforts, and otherwise interpolates through the
    /// table. The output carries one duty cycle per input joint in input
    /// order and the input command's timestamp. On rejection no output is
    /// produced at all.
    pub fn convert(&self, command: &JointCommand) -> ConvertResult<PwmCommand> {
        validate_command(command, self.mode, self.alignments.len())?;

        let mut duty_cycles = Vec::with_capacity(command.len());
        for (entry, alignment) in command.joints().iter().zip(&self.alignments) {
            let effective = alignment.apply(entry.state.value);
            duty_cycles.push(self.duty_cycle_for(effective));
        }

        Ok(PwmCommand {
            timestamp: command.timestamp(),
            duty_cycles,
        })
    }

    /// Maps one polarity-corrected effort to a duty-cycle width.
    ///
    /// Dead-zone policy takes precedence over interpolation; a non-finite
    /// effort also commands no actuation rather than an edge width.
    fn duty_cycle_for(&self, effort: f32) -> u16 {
        if !effort.is_finite() {
            return self.no_actuation_pwm;
        }
        if effort == 0.0 || self.dead_zone.is_some_and(|zone| zone.contains(effort)) {
            return self.no_actuation_pwm;
        }
        self.table.lookup(effort)
    }
}
