//! Driver configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use openthrust_pwm::DeadZone;
use openthrust_types::HelixAlignment;

use crate::{ConfigError, ConfigResult};

/// Everything a thruster driver consumes at configure time.
///
/// Captured once before the first command is processed and immutable for
/// the rest of the run; reconfiguring requires a full driver reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Path of the `effort,pwm` calibration table file.
    pub command_to_pwm_table_path: PathBuf,

    /// Pulse width commanded when a joint should not actuate.
    pub no_actuation_pwm: u16,

    /// Propeller alignment per joint slot, in command order. The length
    /// of this list is the expected joint count of every command.
    pub alignments: Vec<HelixAlignment>,

    /// Inclusive effort span substituted with `no_actuation_pwm`. When
    /// absent, the driver derives the span from a flat no-actuation run
    /// in the table, if the table encodes one.
    #[serde(default)]
    pub dead_zone: Option<DeadZone>,
}

impl DriverConfig {
    /// Creates a config for the given table file and joint slots.
    pub fn new(
        table_path: impl Into<PathBuf>,
        no_actuation_pwm: u16,
        alignments: Vec<HelixAlignment>,
    ) -> Self {
        Self {
            command_to_pwm_table_path: table_path.into(),
            no_actuation_pwm,
            alignments,
            dead_zone: None,
        }
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> DriverConfigBuilder {
        DriverConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the alignment list is empty or the dead-zone
    /// span is unordered or non-finite. Table-file problems surface
    /// later, when the table is loaded.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.alignments.is_empty() {
            return Err(ConfigError::EmptyAlignments);
        }
        if let Some(zone) = self.dead_zone
            && !zone.is_valid()
        {
            return Err(ConfigError::InvalidDeadZone {
                min: zone.min,
                max: zone.max,
            });
        }
        Ok(())
    }
}

/// Builder for [`DriverConfig`].
#[derive(Debug, Default)]
pub struct DriverConfigBuilder {
    table_path: PathBuf,
    no_actuation_pwm: u16,
    alignments: Vec<HelixAlignment>,
    dead_zone: Option<DeadZone>,
}

impl DriverConfigBuilder {
    /// Set the calibration table file path.
    #[must_use]
    pub fn table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.table_path = path.into();
        self
    }

    /// Set the no-actuation pulse width.
    #[must_use]
    pub fn no_actuation_pwm(mut self, pwm: u16) -> Self {
        self.no_actuation_pwm = pwm;
        self
    }

    /// Set the per-slot propeller alignments.
    #[must_use]
    pub fn alignments(mut self, alignments: Vec<HelixAlignment>) -> Self {
        self.alignments = alignments;
        self
    }

    /// Set the dead-zone span.
    #[must_use]
    pub fn dead_zone(mut self, dead_zone: DeadZone) -> Self {
        self.dead_zone = Some(dead_zone);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> DriverConfig {
        DriverConfig {
            command_to_pwm_table_path: self.table_path,
            no_actuation_pwm: self.no_actuation_pwm,
            alignments: self.alignments,
            dead_zone: self.dead_zone,
        }
    }
}
