//! Interrupt-safe position tracker.
//!
//! [`QuadratureTracker`] owns both channel pins and a [`QuadratureDecoder`]
//! behind one [`critical_section::Mutex`]. The edge handlers (interrupt
//! context) and [`read_position`](QuadratureTracker::read_position) (main
//! loop) all take the same critical section, so the flags, the counter and
//! the sampled pin levels are always observed as one consistent unit.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::config::{Direction, TrackerConfig};
use crate::decoder::{Channel, DecoderState, QuadratureDecoder, Step};
use crate::error::TrackerError;
use crate::pin::EdgePin;

struct ChannelPins<P> {
    a: P,
    b: P,
}

impl<P> ChannelPins<P> {
    fn get_mut(&mut self, channel: Channel) -> &mut P {
        match channel {
            Channel::A => &mut self.a,
            Channel::B => &mut self.b,
        }
    }
}

struct TrackerState<P> {
    /// `None` until `initialize`, and again after `release`.
    pins: Option<ChannelPins<P>>,
    decoder: QuadratureDecoder,
    config: TrackerConfig,
}

/// Quadrature encoder position tracker.
///
/// Construct it in a `static` so the GPIO interrupt vector can reach it:
///
/// ```ignore
/// static ENCODER: QuadratureTracker<ErasedPin> = QuadratureTracker::new();
///
/// #[interrupt]
/// fn IO_IRQ_BANK0() {
///     if pin_a_pending() {
///         let _ = ENCODER.on_edge_a();
///     }
///     if pin_b_pending() {
///         let _ = ENCODER.on_edge_b();
///     }
/// }
/// ```
///
/// Every tracker is independent, so several encoders can be tracked by
/// declaring several trackers.
///
/// On single-core targets the critical section masks interrupts, which is
/// what serialises the two edge handlers against each other and against the
/// reader. The `critical-section` implementation is chosen by the firmware
/// (e.g. `cortex-m/critical-section-single-core`).
pub struct QuadratureTracker<P> {
    state: Mutex<RefCell<TrackerState<P>>>,
}

impl<P> Default for QuadratureTracker<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> QuadratureTracker<P> {
    /// Create an uninitialized tracker at position 0.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(TrackerState {
                pins: None,
                decoder: QuadratureDecoder::new(),
                config: TrackerConfig::new(),
            })),
        }
    }

    // -----------------------------------------------------------------------
    // Reader side
    // -----------------------------------------------------------------------

    /// Net detent count since initialization.
    ///
    /// Safe to call from the main loop at any time. The read happens inside
    /// the critical section, so the value is never torn even where a 32-bit
    /// load is not atomic. Returns 0 before [`initialize`](Self::initialize)
    /// and the last tracked value after [`release`](Self::release).
    pub fn read_position(&self) -> i32 {
        critical_section::with(|cs| self.state.borrow_ref(cs).decoder.position())
    }

    /// Position and both armed flags, captured atomically.
    pub fn snapshot(&self) -> DecoderState {
        critical_section::with(|cs| self.state.borrow_ref(cs).decoder.state())
    }

    /// Returns `true` while the tracker owns its pins.
    pub fn is_initialized(&self) -> bool {
        critical_section::with(|cs| self.state.borrow_ref(cs).pins.is_some())
    }
}

impl<P> QuadratureTracker<P>
where
    P: EdgePin,
{
    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Take ownership of the channel pins and start tracking from zero.
    ///
    /// Uses [`TrackerConfig::default()`]. See
    /// [`initialize_with`](Self::initialize_with).
    pub fn initialize(&self, pin_a: P, pin_b: P) -> Result<(), TrackerError<P::Error>> {
        self.initialize_with(pin_a, pin_b, TrackerConfig::default())
    }

    /// Take ownership of the channel pins with an explicit configuration.
    ///
    /// Configures both pins as inputs, enables their edge interrupts on the
    /// asserting edge for `config.polarity`, and zeroes the position and
    /// flags. Runs inside a single critical section, so an edge that fires
    /// meanwhile is serviced only after tracking has started.
    ///
    /// Call this before the GPIO interrupt is unmasked in the NVIC.
    ///
    /// # Errors
    /// * [`TrackerError::AlreadyInitialized`] if the tracker already owns
    ///   pins. The running state is left untouched.
    /// * [`TrackerError::Pin`] if configuring either pin fails. The tracker
    ///   stays uninitialized and no interrupt is left enabled.
    pub fn initialize_with(
        &self,
        mut pin_a: P,
        mut pin_b: P,
        config: TrackerConfig,
    ) -> Result<(), TrackerError<P::Error>> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if state.pins.is_some() {
                return Err(TrackerError::AlreadyInitialized);
            }

            let edge = config.polarity.asserting_edge();

            pin_a.configure_input()?;
            pin_b.configure_input()?;
            pin_a.enable_edge_interrupt(edge)?;
            if let Err(e) = pin_b.enable_edge_interrupt(edge) {
                // Don't leave channel A firing into an uninitialized tracker.
                let _ = pin_a.disable_edge_interrupt();
                return Err(TrackerError::Pin(e));
            }

            state.decoder.reset();
            state.config = config;
            state.pins = Some(ChannelPins { a: pin_a, b: pin_b });

            #[cfg(feature = "defmt")]
            defmt::info!("Quadrature tracker initialized ({})", config);

            Ok(())
        })
    }

    /// Disable both edge interrupts and hand the pins back.
    ///
    /// The last position stays readable. A later
    /// [`initialize`](Self::initialize) starts again from zero.
    ///
    /// # Errors
    /// * [`TrackerError::NotInitialized`] if the tracker holds no pins.
    /// * [`TrackerError::Pin`] if masking either interrupt fails. The
    ///   tracker keeps its pins and keeps tracking: a channel that was
    ///   already masked is unmasked again before returning.
    pub fn release(&self) -> Result<(P, P), TrackerError<P::Error>> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            let Some(mut pins) = state.pins.take() else {
                return Err(TrackerError::NotInitialized);
            };

            let result_a = pins.a.disable_edge_interrupt();
            let result_b = pins.b.disable_edge_interrupt();

            match (result_a, result_b) {
                (Ok(()), Ok(())) => {
                    #[cfg(feature = "defmt")]
                    defmt::info!(
                        "Quadrature tracker released at position {}",
                        state.decoder.position()
                    );
                    Ok((pins.a, pins.b))
                }
                (Err(e), Err(_)) => {
                    state.pins = Some(pins);
                    Err(TrackerError::Pin(e))
                }
                (Ok(()), Err(e)) => {
                    // Channel A is already masked; unmask it again so both
                    // channels keep reaching the handlers.
                    let _ = pins.a.enable_edge_interrupt(state.config.polarity.asserting_edge());
                    state.pins = Some(pins);
                    Err(TrackerError::Pin(e))
                }
                (Err(e), Ok(())) => {
                    let _ = pins.b.enable_edge_interrupt(state.config.polarity.asserting_edge());
                    state.pins = Some(pins);
                    Err(TrackerError::Pin(e))
                }
            }
        })
    }

    // -----------------------------------------------------------------------
    // Interrupt side
    // -----------------------------------------------------------------------

    /// Edge handler for channel A. Call from the pin's interrupt vector.
    #[inline]
    pub fn on_edge_a(&self) -> Result<Step, TrackerError<P::Error>> {
        self.on_edge(Channel::A)
    }

    /// Edge handler for channel B. Call from the pin's interrupt vector.
    #[inline]
    pub fn on_edge_b(&self) -> Result<Step, TrackerError<P::Error>> {
        self.on_edge(Channel::B)
    }

    /// Edge handler for the pin wired to `channel`.
    ///
    /// Acknowledges the pending edge, samples the live level of both pins
    /// and applies the decoder table. Never blocks.
    ///
    /// # Errors
    /// * [`TrackerError::NotInitialized`] before [`initialize`](Self::initialize).
    /// * [`TrackerError::Pin`] if the pending edge cannot be acknowledged
    ///   or a pin cannot be read. Position and flags are unchanged.
    pub fn on_edge(&self, channel: Channel) -> Result<Step, TrackerError<P::Error>> {
        critical_section::with(|cs| {
            let mut guard = self.state.borrow_ref_mut(cs);
            let state = &mut *guard;
            let Some(pins) = state.pins.as_mut() else {
                return Err(TrackerError::NotInitialized);
            };

            pins.get_mut(channel).clear_edge_interrupt()?;

            let polarity = state.config.polarity;
            let a_high = polarity.is_asserted(pins.a.is_high()?);
            let b_high = polarity.is_asserted(pins.b.is_high()?);

            let direction = state.config.direction;
            let (a_high, b_high) = match direction {
                Direction::Normal => (a_high, b_high),
                Direction::Reversed => (b_high, a_high),
            };

            #[cfg(feature = "defmt")]
            if state.decoder.state().is_ambiguous() {
                defmt::trace!("Both channels armed; missed edge before {}", channel);
            }

            let step = state
                .decoder
                .rising_edge(direction.map(channel), a_high, b_high);

            #[cfg(feature = "defmt")]
            defmt::trace!(
                "Edge {}: {} -> {}",
                channel,
                step,
                state.decoder.position()
            );

            Ok(step)
        })
    }
}
