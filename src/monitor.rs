//! Main-loop helpers for consuming the tracked position.
//!
//! The tracker only exposes an absolute count. Most consumers want "how far
//! did the knob move since I last looked", which is what [`PositionDelta`]
//! computes.

/// Configuration for `position_monitor_task` (feature `task`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// How often the tracker is polled, in Hz. Default: 100.
    pub poll_frequency_hz: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_frequency_hz: 100,
        }
    }
}

impl MonitorConfig {
    /// Convert the configured frequency to a timer period in milliseconds.
    ///
    /// Formula: `1000 / poll_frequency_hz`, never less than 1 ms. A zero
    /// frequency is treated as 1 Hz.
    pub fn poll_period_ms(&self) -> u64 {
        let hz = self.poll_frequency_hz.max(1) as u64;
        (1000 / hz).max(1)
    }
}

/// Tracks the last observed position and reports the change to each new
/// reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionDelta {
    previous: i32,
}

impl PositionDelta {
    /// Start from an explicit baseline, usually the first
    /// [`read_position`](crate::QuadratureTracker::read_position).
    pub const fn new(baseline: i32) -> Self {
        Self { previous: baseline }
    }

    /// Record `position` and return the signed change since the previous
    /// reading, or `None` if it did not move.
    ///
    /// The difference wraps, so a counter that crossed `i32::MAX` still
    /// yields a small delta.
    pub fn update(&mut self, position: i32) -> Option<i32> {
        let delta = position.wrapping_sub(self.previous);
        // Update baseline unconditionally.
        self.previous = position;
        if delta == 0 {
            None
        } else {
            Some(delta)
        }
    }

    /// Last recorded position.
    pub fn baseline(&self) -> i32 {
        self.previous
    }
}
