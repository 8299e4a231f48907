//! Driver lifecycle states.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a thruster driver.
///
/// ```text
/// Unconfigured -> Configured -> Running -> Stopped
///                                  |          ^
///                                  v          | (start)
///                               Faulted       |
///                                  |      Configured
///                                  v
///                          (reset) Unconfigured
/// ```
///
/// `Faulted` is terminal: only [`reset`](crate::ThrusterDriver::reset)
/// leaves it, dropping the configuration on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverState {
    /// No configuration captured yet.
    #[default]
    Unconfigured,
    /// Configuration captured and validated, not yet processing.
    Configured,
    /// Processing commands.
    Running,
    /// Stopped by request; restartable without reconfiguring.
    Stopped,
    /// A command was rejected; requires a reset.
    Faulted,
}

impl DriverState {
    /// True if commands are accepted in this state.
    pub fn is_running(self) -> bool {
        self == DriverState::Running
    }

    /// True if only a reset can make progress from this state.
    pub fn is_faulted(self) -> bool {
        self == DriverState::Faulted
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverState::Unconfigured => write!(f, "unconfigured"),
            DriverState::Configured => write!(f, "configured"),
            DriverState::Running => write!(f, "running"),
            DriverState::Stopped => write!(f, "stopped"),
            DriverState::Faulted => write!(f, "faulted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconfigured() {
        assert_eq!(DriverState::default(), DriverState::Unconfigured);
    }

    #[test]
    fn test_predicates() {
        assert!(DriverState::Running.is_running());
        assert!(!DriverState::Faulted.is_running());
        assert!(DriverState::Faulted.is_faulted());
        assert!(!DriverState::Stopped.is_faulted());
    }

    #[test]
    fn test_display() {
        assert_eq!(DriverState::Unconfigured.to_string(), "unconfigured");
        assert_eq!(DriverState::Faulted.to_string(), "faulted");
    }
}
