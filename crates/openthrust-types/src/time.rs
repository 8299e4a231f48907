//! Command timestamps.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Microsecond-resolution timestamp carried by commands.
///
/// A derived command (e.g. a PWM command computed from a joint command)
/// carries the timestamp of the command it was derived from, so the
/// consumer can correlate setpoints across the pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from microseconds since the Unix epoch.
    pub fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Microseconds since the Unix epoch.
    pub fn as_micros(self) -> u64 {
        self.0
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        // microseconds since the epoch stay within u64 range
        Self(elapsed.as_micros() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_roundtrip() {
        let ts = Timestamp::from_micros(1_234_567);
        assert_eq!(ts.as_micros(), 1_234_567);
    }

    #[test]
    fn test_timestamp_ordering() {
        assert!(Timestamp::from_micros(1) < Timestamp::from_micros(2));
    }

    #[test]
    fn test_timestamp_now_is_nonzero() {
        assert!(Timestamp::now().as_micros() > 0);
    }
}
