//! How often a subscription hands packets to its consumer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delivery rate requested by a subscriber.
///
/// The game sends at a rate set in its telemetry menu (`source_hz`). A
/// subscriber can take every packet or cap delivery at a lower rate, in which
/// case it sees the most recent packet of each period.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum UpdateRate {
    /// No cap: one item per datagram received.
    #[default]
    Native,

    /// At most this many items per second. `Max(0)` means no cap.
    Max(u32),
}

impl UpdateRate {
    /// Resolve against the game's send rate.
    ///
    /// A cap of zero, or one the game never exceeds, collapses to `Native`.
    pub fn normalize(self, source_hz: f64) -> Self {
        match self {
            Self::Max(hz) if hz > 0 && f64::from(hz) < source_hz => self,
            _ => Self::Native,
        }
    }

    pub fn needs_throttle(self, source_hz: f64) -> bool {
        self.normalize(source_hz) != Self::Native
    }

    /// Period between deliveries, or `None` when every packet passes through.
    pub fn throttle_interval(self, source_hz: f64) -> Option<Duration> {
        match self.normalize(source_hz) {
            Self::Max(hz) => Some(Duration::from_secs_f64(f64::from(hz).recip())),
            Self::Native => None,
        }
    }
}
