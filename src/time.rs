//! Event timestamps.
//!
//! Events carry the instant they were raised as microseconds since the Unix
//! epoch. Microsecond precision is enough to order events produced by
//! concurrent publishers while keeping the representation a plain `u64`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Microsecond-precision instant an event was raised
///
/// Always UTC, always non-negative; the zero value is the Unix epoch.
/// Comparable and orderable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventTime(u64);

impl EventTime {
    /// The Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: EventTime = EventTime(0);

    /// Capture the current instant
    ///
    /// Falls back to the epoch if the system clock reads before 1970.
    pub fn now() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        EventTime(elapsed.as_micros() as u64)
    }

    /// Create from microseconds since the epoch
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        EventTime(micros)
    }

    /// Create from seconds since the epoch
    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        EventTime(secs.saturating_mul(1_000_000))
    }

    /// Microseconds since the epoch
    #[inline]
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Seconds since the epoch (truncates)
    #[inline]
    pub const fn as_secs(&self) -> u64 {
        self.0 / 1_000_000
    }
}

impl Default for EventTime {
    fn default() -> Self {
        EventTime::EPOCH
    }
}

impl fmt::Display for EventTime {
    /// Renders as `seconds.microseconds`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06}", self.0 / 1_000_000, self.0 % 1_000_000)
    }
}

impl From<u64> for EventTime {
    fn from(micros: u64) -> Self {
        EventTime::from_micros(micros)
    }
}

impl From<EventTime> for u64 {
    fn from(time: EventTime) -> Self {
        time.0
    }
}
