//! Command shape validation.

use openthrust_types::{ControlMode, JointCommand};

use crate::{ConvertError, ConvertResult};

/// Checks a command's shape against the driver configuration.
///
/// Every element must carry the configured operating mode, and the joint
/// count must match the configured slot count. Mode is checked first: a
/// foreign setpoint kind anywhere in the command reports
/// [`ConvertError::InvalidCommandMode`] even when the size is also wrong,
/// since a mode mismatch points at a mis-wired producer rather than a
/// truncated command.
pub fn validate_command(
    command: &JointCommand,
    expected_mode: ControlMode,
    expected_joints: usize,
) -> ConvertResult<()> {
    for entry in command.joints() {
        if entry.state.mode != expected_mode {
            return Err(ConvertError::InvalidCommandMode {
                joint: entry.name.clone(),
                expected: expected_mode,
                found: entry.state.mode,
            });
        }
    }

    if command.len() != expected_joints {
        return Err(ConvertError::InvalidCommandSize {
            expected: expected_joints,
            actual: command.len(),
        });
    }

    Ok(())
}
