//! Error types for the position tracker.

use core::fmt;

/// Errors that can occur when driving the tracker.
///
/// `E` is the error type of the encoder pins ([`embedded_hal::digital::ErrorType`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerError<E> {
    /// Underlying GPIO error (configuration, level read or interrupt control).
    Pin(E),

    /// [`initialize`](crate::QuadratureTracker::initialize) was called while
    /// the tracker already owns a pair of pins.
    AlreadyInitialized,

    /// An edge handler or [`release`](crate::QuadratureTracker::release) ran
    /// before the tracker was initialized.
    NotInitialized,
}

// Allow ergonomic `?` propagation from raw pin errors.
impl<E> From<E> for TrackerError<E> {
    fn from(error: E) -> Self {
        TrackerError::Pin(error)
    }
}

impl<E: fmt::Debug> fmt::Display for TrackerError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrackerError::Pin(e) => write!(f, "GPIO error: {:?}", e),
            TrackerError::AlreadyInitialized => write!(f, "Tracker already initialized"),
            TrackerError::NotInitialized => write!(f, "Tracker not initialized"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for TrackerError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            TrackerError::Pin(e) => defmt::write!(f, "GPIO error: {}", e),
            TrackerError::AlreadyInitialized => defmt::write!(f, "Tracker already initialized"),
            TrackerError::NotInitialized => defmt::write!(f, "Tracker not initialized"),
        }
    }
}
