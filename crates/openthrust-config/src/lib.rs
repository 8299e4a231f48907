//! Driver configuration and calibration-table loading for OpenThrust
//!
//! This crate owns everything a thruster driver consumes at configure
//! time: the [`DriverConfig`] struct with its validation rules, and the
//! CSV-like calibration-table ingestion that turns an `effort,pwm` file
//! into a validated [`openthrust_pwm::PwmTable`].
//!
//! File syntax errors, numeric parse failures and table invariant
//! violations all surface as [`ConfigError`] before the driver leaves the
//! unconfigured state; nothing here runs per command.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod table_file;

pub use config::{DriverConfig, DriverConfigBuilder};
pub use table_file::{load_pwm_table, parse_pwm_table};

use std::path::PathBuf;

use openthrust_pwm::TableError;
use thiserror::Error;

/// Configuration and calibration-loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The calibration table file could not be read.
    #[error("could not read calibration table {path}: {source}")]
    Io {
        /// Path of the table file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A table row did not parse as an `effort,pwm` pair.
    #[error("calibration table line {line}: {reason}")]
    MalformedRow {
        /// One-based line number in the table file.
        line: usize,
        /// What went wrong on that line.
        reason: String,
    },

    /// The parsed rows violate a table invariant.
    #[error(transparent)]
    Table(#[from] TableError),

    /// The per-joint alignment list has no entries.
    #[error("alignment list is empty, need one entry per joint slot")]
    EmptyAlignments,

    /// The configured dead-zone bounds are unordered or non-finite.
    #[error("dead zone span [{min}, {max}] is not a valid range")]
    InvalidDeadZone {
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },
}

/// A specialized `Result` for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
