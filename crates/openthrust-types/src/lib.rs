//! Command and actuator data model for OpenThrust
//!
//! This crate defines the types exchanged between the command pipeline and
//! thruster drivers: per-joint setpoint commands, the PWM duty-cycle
//! commands derived from them, and the per-thruster propeller alignment.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod command;
pub mod time;

pub use command::{ControlMode, HelixAlignment, JointCommand, JointEntry, JointState, PwmCommand};
pub use time::Timestamp;
