//! Interrupt-driven quadrature rotary encoder tracking for `no_std` firmware.
//!
//! This crate turns the rising edges of an encoder's two channels into a
//! signed detent count that the main loop can read at any time.
//!
//! # Architecture
//!
//! The crate is split into layers, leaves first:
//!
//! - **[`pin`]**: The [`EdgePin`] trait the firmware implements for its GPIO
//!   pins (input configuration, level reads, edge-interrupt control).
//! - **[`decoder`]**: [`QuadratureDecoder`], the pure two-flag state machine
//!   with no hardware or synchronisation concerns.
//! - **[`QuadratureTracker`]**: Owns the pins and the decoder behind a
//!   single [`critical_section::Mutex`], and exposes the edge handlers and
//!   the position accessor.
//! - **[`monitor`]**: Main-loop helpers that turn successive readings into
//!   deltas.
//!
//! # Quick start
//!
//! ```ignore
//! use quadrature_tracker::QuadratureTracker;
//!
//! static ENCODER: QuadratureTracker<MyPin> = QuadratureTracker::new();
//!
//! // Before interrupts are unmasked:
//! ENCODER.initialize(pin_a, pin_b)?;
//!
//! // In the GPIO interrupt vector(s):
//! let _ = ENCODER.on_edge_a();
//! let _ = ENCODER.on_edge_b();
//!
//! // Anywhere in the main loop:
//! let position = ENCODER.read_position();
//! ```
//!
//! # Features
//!
//! - **`defmt`**: Enable [`defmt::Format`] implementations and structured
//!   logging for embedded targets.
//! - **`task`**: Enable `position_monitor_task`, an Embassy-timer driven
//!   polling loop.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod monitor;
#[cfg(feature = "task")]
pub mod monitor_task;
pub mod pin;
pub mod tracker;

#[cfg(test)]
mod mock;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use config::{Direction, Polarity, TrackerConfig};
pub use decoder::{Channel, DecoderState, QuadratureDecoder, Step};
pub use error::TrackerError;
pub use monitor::{MonitorConfig, PositionDelta};
#[cfg(feature = "task")]
pub use monitor_task::position_monitor_task;
pub use pin::{Edge, EdgePin};
pub use tracker::QuadratureTracker;
