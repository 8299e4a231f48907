//! Thruster driver lifecycle shell for OpenThrust
//!
//! [`ThrusterDriver`] wraps the conversion core in the driver lifecycle:
//! configuration capture, the running state, and fault latching. A
//! rejected command is fatal for the run: the driver latches the faulted
//! state and refuses further commands until it is reset and reconfigured.
//!
//! ```
//! use openthrust_config::DriverConfig;
//! use openthrust_driver::ThrusterDriver;
//! use openthrust_pwm::{PwmTable, TableRow};
//! use openthrust_types::{HelixAlignment, JointCommand, JointState, Timestamp};
//!
//! let table = PwmTable::new(vec![
//!     TableRow::new(-10.0, 1100),
//!     TableRow::new(0.0, 1500),
//!     TableRow::new(10.0, 1900),
//! ])?;
//! let config = DriverConfig::new("unused.csv", 1500, vec![HelixAlignment::Normal]);
//!
//! let mut driver = ThrusterDriver::new();
//! driver.configure_with_table(&config, table)?;
//! driver.start()?;
//!
//! let cmd = JointCommand::new(Timestamp::now())
//!     .with_joint("stern", JointState::effort(5.0));
//! let pwm = driver.process(&cmd)?;
//! assert_eq!(pwm.duty_cycles, [1700]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod driver;
pub mod state;

pub use driver::ThrusterDriver;
pub use state::DriverState;

use openthrust_config::ConfigError;
use openthrust_converter::ConvertError;
use thiserror::Error;

/// Driver lifecycle and command-processing errors.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The requested operation is not legal in the current state.
    #[error("cannot {operation} while {state}")]
    InvalidTransition {
        /// State the driver was in.
        state: DriverState,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// A command arrived while the driver was not running.
    #[error("driver is not running (currently {state})")]
    NotRunning {
        /// State the driver was in.
        state: DriverState,
    },

    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A command was rejected; the driver has latched the faulted state.
    #[error("command rejected: {0}")]
    CommandFault(#[from] ConvertError),
}

/// A specialized `Result` for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_transition() {
        let err = DriverError::InvalidTransition {
            state: DriverState::Running,
            operation: "configure",
        };
        let msg = err.to_string();
        assert!(msg.contains("configure"));
        assert!(msg.contains("running"));
    }

    #[test]
    fn test_command_fault_keeps_the_kind() {
        let err: DriverError = ConvertError::InvalidCommandSize {
            expected: 2,
            actual: 3,
        }
        .into();
        assert!(matches!(
            err,
            DriverError::CommandFault(ConvertError::InvalidCommandSize { .. })
        ));
    }
}
