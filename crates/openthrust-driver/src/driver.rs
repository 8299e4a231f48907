//! The driver lifecycle shell.

use openthrust_config::{DriverConfig, load_pwm_table};
use openthrust_converter::ThrusterConverter;
use openthrust_pwm::{DeadZone, PwmTable};
use openthrust_types::{JointCommand, PwmCommand};

use crate::state::DriverState;
use crate::{DriverError, DriverResult};

/// Owns the conversion core and its lifecycle.
///
/// The driver serializes all access to the lifecycle flag; the conversion
/// path itself is pure and holds no mutable state. Command rejection is
/// treated as a structural contract violation between producer and
/// configuration: the driver latches [`DriverState::Faulted`] and refuses
/// further commands until [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct ThrusterDriver {
    state: DriverState,
    converter: Option<ThrusterConverter>,
}

impl ThrusterDriver {
    /// Creates an unconfigured driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Captures configuration, loading the calibration table from the
    /// configured file path.
    ///
    /// Legal from `Unconfigured`, `Configured` and `Stopped`.
    /// Reconfiguring a running or faulted driver is rejected; those
    /// states require [`stop`](Self::stop) or [`reset`](Self::reset)
    /// first.
    pub fn configure(&mut self, config: &DriverConfig) -> DriverResult<()> {
        self.check_configurable()?;
        let table = load_pwm_table(&config.command_to_pwm_table_path)?;
        self.install(config, table)
    }

    /// Captures configuration with an already-loaded table.
    ///
    /// For callers that obtain the table elsewhere (embedded fixtures,
    /// a remote parameter store); same transition rules as
    /// [`configure`](Self::configure).
    pub fn configure_with_table(
        &mut self,
        config: &DriverConfig,
        table: PwmTable,
    ) -> DriverResult<()> {
        self.check_configurable()?;
        self.install(config, table)
    }

    /// Starts processing commands. Legal from `Configured` and `Stopped`.
    pub fn start(&mut self) -> DriverResult<()> {
        match self.state {
            DriverState::Configured | DriverState::Stopped => {
                self.state = DriverState::Running;
                tracing::info!("driver started");
                Ok(())
            }
            state => Err(DriverError::InvalidTransition {
                state,
                operation: "start",
            }),
        }
    }

    /// Converts one joint command, latching the faulted state on
    /// rejection.
    ///
    /// The returned error carries the specific rejection kind; the state
    /// transition to `Faulted` is the accompanying fatal signal for the
    /// surrounding system.
    pub fn process(&mut self, command: &JointCommand) -> DriverResult<PwmCommand> {
        if !self.state.is_running() {
            return Err(DriverError::NotRunning { state: self.state });
        }
        let Some(converter) = self.converter.as_ref() else {
            return Err(DriverError::NotRunning { state: self.state });
        };

        match converter.convert(command) {
            Ok(output) => Ok(output),
            Err(fault) => {
                self.state = DriverState::Faulted;
                tracing::error!(error = %fault, "command rejected, driver faulted");
                Err(DriverError::CommandFault(fault))
            }
        }
    }

    /// Stops processing. Legal from `Running`; restart with
    /// [`start`](Self::start).
    pub fn stop(&mut self) -> DriverResult<()> {
        match self.state {
            DriverState::Running => {
                self.state = DriverState::Stopped;
                tracing::info!("driver stopped");
                Ok(())
            }
            state => Err(DriverError::InvalidTransition {
                state,
                operation: "stop",
            }),
        }
    }

    /// Drops the configuration and returns to `Unconfigured`.
    ///
    /// Legal from every state; the only way out of `Faulted`.
    pub fn reset(&mut self) {
        if self.state.is_faulted() {
            tracing::warn!("driver reset clears a latched fault");
        }
        self.state = DriverState::Unconfigured;
        self.converter = None;
    }

    fn check_configurable(&self) -> DriverResult<()> {
        match self.state {
            DriverState::Unconfigured | DriverState::Configured | DriverState::Stopped => Ok(()),
            state => Err(DriverError::InvalidTransition {
                state,
                operation: "configure",
            }),
        }
    }

    fn install(&mut self, config: &DriverConfig, table: PwmTable) -> DriverResult<()> {
        config.validate()?;

        let dead_zone = config
            .dead_zone
            .or_else(|| DeadZone::from_flat_run(&table, config.no_actuation_pwm));

        let mut converter =
            ThrusterConverter::new(table, config.alignments.clone(), config.no_actuation_pwm);
        if let Some(zone) = dead_zone {
            converter = converter.with_dead_zone(zone);
        }

        self.converter = Some(converter);
        self.state = DriverState::Configured;
        tracing::info!(
            joints = config.alignments.len(),
            no_actuation_pwm = config.no_actuation_pwm,
            dead_zone = ?dead_zone,
            "driver configured"
        );
        Ok(())
    }
}
