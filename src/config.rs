//! Tracker configuration.

use crate::decoder::Channel;
use crate::pin::Edge;

/// Electrical level that counts as "high" in the decoder table.
///
/// The decoder was designed for encoders wired with pull-downs, where both
/// channels idle low and a detent is reached when both read high. Boards
/// that idle high (pull-ups, contacts to ground) must opt into
/// [`ActiveLow`](Polarity::ActiveLow) explicitly; the tracker never guesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Channels idle low. Rising edges are tracked.
    #[default]
    ActiveHigh,
    /// Channels idle high. The table is mirrored and falling edges are tracked.
    ActiveLow,
}

impl Polarity {
    /// Edge on which a channel becomes asserted.
    pub const fn asserting_edge(self) -> Edge {
        match self {
            Polarity::ActiveHigh => Edge::Rising,
            Polarity::ActiveLow => Edge::Falling,
        }
    }

    /// Map an electrical `is_high` reading to the logical level.
    pub const fn is_asserted(self, is_high: bool) -> bool {
        match self {
            Polarity::ActiveHigh => is_high,
            Polarity::ActiveLow => !is_high,
        }
    }
}

/// Which rotation counts as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Channel A leading channel B increments the position.
    #[default]
    Normal,
    /// The roles of channels A and B are swapped, negating every step.
    Reversed,
}

impl Direction {
    /// Decoder channel that a physical pin's edge is fed to.
    pub const fn map(self, channel: Channel) -> Channel {
        match self {
            Direction::Normal => channel,
            Direction::Reversed => channel.other(),
        }
    }
}

/// Configuration applied by
/// [`initialize_with`](crate::QuadratureTracker::initialize_with).
///
/// [`TrackerConfig::default()`] reproduces the original wiring assumption:
/// idle-low channels, A leading B counts up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackerConfig {
    /// Channel polarity. Default: [`Polarity::ActiveHigh`].
    pub polarity: Polarity,
    /// Counting direction. Default: [`Direction::Normal`].
    pub direction: Direction,
}

impl TrackerConfig {
    /// Default configuration, usable in `const` context.
    pub const fn new() -> Self {
        Self {
            polarity: Polarity::ActiveHigh,
            direction: Direction::Normal,
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new()
    }
}
