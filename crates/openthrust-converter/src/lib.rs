//! Effort-command to PWM-command conversion for OpenThrust
//!
//! This crate turns a validated per-joint effort command into a PWM
//! duty-cycle command: each joint's effort is polarity-corrected for its
//! propeller alignment, checked against the dead zone, and converted
//! through the calibrated lookup table. Output order mirrors input order
//! and the input timestamp is carried over.
//!
//! Conversion is a pure function over configuration fixed at construction
//! time; a [`ThrusterConverter`] holds no mutable state and may be shared
//! across threads.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod converter;
pub mod validate;

pub use converter::ThrusterConverter;
pub use validate::validate_command;

use openthrust_types::ControlMode;
use thiserror::Error;

/// Command rejection reasons.
///
/// Both variants signal a structural contract violation between the
/// command producer and the driver configuration, not a transient
/// condition: the surrounding lifecycle treats any of them as fatal for
/// the run. No partial output is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// A command element carries a setpoint kind other than the
    /// configured operating mode.
    #[error("joint '{joint}' carries a {found} setpoint, expected {expected}")]
    InvalidCommandMode {
        /// Name of the offending joint.
        joint: String,
        /// The configured operating mode.
        expected: ControlMode,
        /// The mode actually found.
        found: ControlMode,
    },

    /// The command's joint count does not match the configured
    /// alignment list.
    #[error("command has {actual} joints, expected {expected}")]
    InvalidCommandSize {
        /// Configured joint count.
        expected: usize,
        /// Joint count found in the command.
        actual: usize,
    },
}

/// A specialized `Result` for command conversion.
pub type ConvertResult<T> = Result<T, ConvertError>;
