//! Joint commands, PWM commands, and per-thruster alignment.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Which field of a joint setpoint a command element carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    /// Torque/force-like setpoint, the unit preceding PWM conversion.
    Effort,
    /// Raw actuator value, forwarded untouched by whatever consumes it.
    Raw,
    /// Angular velocity setpoint.
    Speed,
    /// Position setpoint.
    Position,
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlMode::Effort => write!(f, "effort"),
            ControlMode::Raw => write!(f, "raw"),
            ControlMode::Speed => write!(f, "speed"),
            ControlMode::Position => write!(f, "position"),
        }
    }
}

/// A single joint setpoint: the mode it is expressed in plus its value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointState {
    /// Which setpoint field this element carries.
    pub mode: ControlMode,
    /// Setpoint value in the unit implied by `mode`.
    pub value: f32,
}

impl JointState {
    /// Creates an effort setpoint.
    pub fn effort(value: f32) -> Self {
        Self {
            mode: ControlMode::Effort,
            value,
        }
    }

    /// Creates a raw setpoint.
    pub fn raw(value: f32) -> Self {
        Self {
            mode: ControlMode::Raw,
            value,
        }
    }

    /// Creates a speed setpoint.
    pub fn speed(value: f32) -> Self {
        Self {
            mode: ControlMode::Speed,
            value,
        }
    }

    /// Creates a position setpoint.
    pub fn position(value: f32) -> Self {
        Self {
            mode: ControlMode::Position,
            value,
        }
    }
}

/// A named element of a joint command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointEntry {
    /// Joint name, unique within a command.
    pub name: String,
    /// The setpoint for this joint.
    pub state: JointState,
}

/// An ordered set of per-joint setpoints.
///
/// Insertion order is the joint ordering and is preserved end-to-end:
/// the i-th entry of a derived command refers to the i-th joint here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JointCommand {
    timestamp: Timestamp,
    joints: Vec<JointEntry>,
}

impl JointCommand {
    /// Creates an empty command with the given timestamp.
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            joints: Vec::new(),
        }
    }

    /// Appends a joint setpoint, keeping insertion order.
    pub fn push(&mut self, name: impl Into<String>, state: JointState) {
        self.joints.push(JointEntry {
            name: name.into(),
            state,
        });
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with_joint(mut self, name: impl Into<String>, state: JointState) -> Self {
        self.push(name, state);
        self
    }

    /// The joint entries in insertion order.
    pub fn joints(&self) -> &[JointEntry] {
        &self.joints
    }

    /// Joint names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.joints.iter().map(|entry| entry.name.as_str())
    }

    /// Number of joints in the command.
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// True if the command carries no joints.
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// The command's timestamp.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// PWM duty-cycle command derived from a [`JointCommand`].
///
/// `duty_cycles[i]` is the pulse width in microseconds for the i-th joint
/// of the source command; `timestamp` is copied from the source command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PwmCommand {
    /// Timestamp of the joint command this was derived from.
    pub timestamp: Timestamp,
    /// One duty-cycle width per source joint, in source order.
    pub duty_cycles: Vec<u16>,
}

/// Rotational polarity of a thruster's propeller.
///
/// Thrusters mounted with an inverted propeller produce thrust opposite
/// to the commanded sign; their effort is negated before table lookup.
/// Fixed at configuration time, one entry per joint slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelixAlignment {
    /// Propeller spins the commanded direction.
    #[default]
    Normal,
    /// Propeller is mounted inverted; effort sign flips before lookup.
    Inverted,
}

impl HelixAlignment {
    /// Applies this alignment to a raw effort value.
    #[inline]
    pub fn apply(self, effort: f32) -> f32 {
        match self {
            HelixAlignment::Normal => effort,
            HelixAlignment::Inverted => -effort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_preserves_insertion_order() {
        let cmd = JointCommand::new(Timestamp::from_micros(7))
            .with_joint("starboard", JointState::effort(1.0))
            .with_joint("port", JointState::effort(-1.0))
            .with_joint("vertical", JointState::effort(0.5));

        let names: Vec<&str> = cmd.names().collect();
        assert_eq!(names, ["starboard", "port", "vertical"]);
        assert_eq!(cmd.len(), 3);
        assert_eq!(cmd.timestamp(), Timestamp::from_micros(7));
    }

    #[test]
    fn test_joint_state_constructors() {
        assert_eq!(JointState::effort(2.5).mode, ControlMode::Effort);
        assert_eq!(JointState::raw(3.0).mode, ControlMode::Raw);
        assert_eq!(JointState::speed(1.0).mode, ControlMode::Speed);
        assert_eq!(JointState::position(0.0).mode, ControlMode::Position);
    }

    #[test]
    fn test_alignment_apply() {
        assert_eq!(HelixAlignment::Normal.apply(2.5), 2.5);
        assert_eq!(HelixAlignment::Inverted.apply(2.5), -2.5);
        assert_eq!(HelixAlignment::Inverted.apply(-2.5), 2.5);
    }

    #[test]
    fn test_control_mode_display() {
        assert_eq!(ControlMode::Effort.to_string(), "effort");
        assert_eq!(ControlMode::Raw.to_string(), "raw");
    }

    #[test]
    fn test_alignment_serde() {
        let json = serde_json::to_string(&vec![HelixAlignment::Normal, HelixAlignment::Inverted])
            .expect("serialization failed");
        assert_eq!(json, r#"["normal","inverted"]"#);

        let parsed: Vec<HelixAlignment> =
            serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(parsed, [HelixAlignment::Normal, HelixAlignment::Inverted]);
    }

    #[test]
    fn test_empty_command() {
        let cmd = JointCommand::new(Timestamp::from_micros(0));
        assert!(cmd.is_empty());
        assert_eq!(cmd.joints().len(), 0);
    }
}
