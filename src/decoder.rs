//! Two-flag quadrature state machine.
//!
//! Each channel carries an "armed" flag meaning "the other channel rose
//! first, so the next rising edge here completes a step". A step is only
//! counted at the detent, when both channels read high, and only on the
//! channel that was armed. That gives direction detection plus contact
//! bounce rejection without a full Gray-code transition table.
//!
//! ```text
//!            forward (+1)                 reverse (-1)
//!   A  ___/‾‾‾‾‾‾‾‾‾‾             A  _______/‾‾‾‾‾‾
//!   B  _______/‾‾‾‾‾‾             B  ___/‾‾‾‾‾‾‾‾‾‾
//!         ^   ^                          ^   ^
//!         |   B edge, flag-B set:        |   A edge, flag-A set:
//!         |   count +1, clear both       |   count -1, clear both
//!         A edge: arm flag-B             B edge: arm flag-A
//! ```
//!
//! The decoder is pure: it takes logical pin levels sampled by the caller
//! and has no notion of hardware or synchronisation. See
//! [`QuadratureTracker`](crate::QuadratureTracker) for the interrupt-safe
//! wrapper.

/// One of the two encoder channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    A,
    B,
}

impl Channel {
    /// The paired channel.
    pub const fn other(self) -> Self {
        match self {
            Channel::A => Channel::B,
            Channel::B => Channel::A,
        }
    }
}

/// Outcome of a single edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// A led, B followed. Position incremented.
    Forward,
    /// B led, A followed. Position decremented.
    Reverse,
    /// The given channel's flag was set; the next qualifying edge on that
    /// channel completes a step.
    Armed(Channel),
    /// Edge was sampled with its own channel low (bounce). Nothing changed.
    Idle,
}

impl Step {
    /// Position change caused by this step.
    pub const fn delta(self) -> i32 {
        match self {
            Step::Forward => 1,
            Step::Reverse => -1,
            Step::Armed(_) | Step::Idle => 0,
        }
    }
}

/// Copy of the decoder state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderState {
    /// Net detent count since the last reset.
    pub position: i32,
    /// Flag-A: the next qualifying A edge completes a reverse step.
    pub armed_a: bool,
    /// Flag-B: the next qualifying B edge completes a forward step.
    pub armed_b: bool,
}

impl DecoderState {
    /// Both flags set: an edge was missed and the direction is ambiguous.
    ///
    /// This is a tolerated transient. The next qualifying edge counts
    /// exactly once and clears both flags.
    pub const fn is_ambiguous(&self) -> bool {
        self.armed_a && self.armed_b
    }
}

/// Quadrature decoder holding the two armed flags and the position counter.
///
/// The counter wraps on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuadratureDecoder {
    state: DecoderState,
}

impl QuadratureDecoder {
    /// Decoder at position 0 with both flags clear.
    pub const fn new() -> Self {
        Self {
            state: DecoderState {
                position: 0,
                armed_a: false,
                armed_b: false,
            },
        }
    }

    /// Decoder resumed from a previously captured state.
    pub const fn from_state(state: DecoderState) -> Self {
        Self { state }
    }

    /// Apply a rising edge on `channel`.
    ///
    /// `a_high` and `b_high` are the live logical levels of both channels,
    /// sampled when the edge is serviced (not when it occurred).
    ///
    /// Channel A:
    /// - A high, B high, flag-A set → position −1, clear both flags.
    /// - otherwise A high → set flag-B.
    /// - otherwise no change.
    ///
    /// Channel B is symmetric with +1 and flag-A.
    pub fn rising_edge(&mut self, channel: Channel, a_high: bool, b_high: bool) -> Step {
        let s = &mut self.state;
        match channel {
            Channel::A => {
                if a_high && b_high && s.armed_a {
                    s.position = s.position.wrapping_sub(1);
                    s.armed_a = false;
                    s.armed_b = false;
                    Step::Reverse
                } else if a_high {
                    s.armed_b = true;
                    Step::Armed(Channel::B)
                } else {
                    Step::Idle
                }
            }
            Channel::B => {
                if a_high && b_high && s.armed_b {
                    s.position = s.position.wrapping_add(1);
                    s.armed_a = false;
                    s.armed_b = false;
                    Step::Forward
                } else if b_high {
                    s.armed_a = true;
                    Step::Armed(Channel::A)
                } else {
                    Step::Idle
                }
            }
        }
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> i32 {
        self.state.position
    }

    /// Whether `channel`'s flag is set.
    #[inline]
    pub fn is_armed(&self, channel: Channel) -> bool {
        match channel {
            Channel::A => self.state.armed_a,
            Channel::B => self.state.armed_b,
        }
    }

    /// Copy of the current state.
    #[inline]
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Zero the position and clear both flags.
    pub fn reset(&mut self) {
        self.state = DecoderState::default();
    }
}
