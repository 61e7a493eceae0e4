//! GPIO collaborator trait implemented by the firmware.
//!
//! The tracker never touches registers itself. The firmware wraps its HAL
//! pin type in something that implements [`EdgePin`], and routes the GPIO
//! interrupt vector to [`QuadratureTracker::on_edge`](crate::QuadratureTracker::on_edge).

use embedded_hal::digital::InputPin;

/// Signal edge that triggers a pin interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low-to-high transition.
    Rising,
    /// High-to-low transition.
    Falling,
}

/// An encoder channel input with edge-interrupt control.
///
/// Level reads come from [`InputPin`]. The remaining methods cover the
/// configuration the tracker performs during
/// [`initialize`](crate::QuadratureTracker::initialize) and
/// [`release`](crate::QuadratureTracker::release).
///
/// All methods are called from inside a critical section and must not
/// block.
pub trait EdgePin: InputPin {
    /// Put the pin into digital input mode.
    ///
    /// HALs that encode the pin mode in the type can implement this as a
    /// no-op returning `Ok(())`.
    fn configure_input(&mut self) -> Result<(), Self::Error>;

    /// Unmask the interrupt for `edge` on this pin.
    fn enable_edge_interrupt(&mut self, edge: Edge) -> Result<(), Self::Error>;

    /// Mask the interrupt for this pin.
    fn disable_edge_interrupt(&mut self) -> Result<(), Self::Error>;

    /// Acknowledge a pending edge so the interrupt does not fire again.
    fn clear_edge_interrupt(&mut self) -> Result<(), Self::Error>;
}
