//! Periodic position monitor for Embassy firmware.

use embassy_time::{Duration, Timer};

use crate::monitor::{MonitorConfig, PositionDelta};
use crate::tracker::QuadratureTracker;

/// Poll `tracker` forever and report every movement.
///
/// This is a regular `async fn`, **not** an Embassy `#[task]`. Callers
/// should create a thin, concrete task wrapper, since Embassy tasks cannot
/// be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn knob_task(tracker: &'static QuadratureTracker<MyPin>) {
///     position_monitor_task(tracker, MonitorConfig::default(), |position, delta| {
///         info!("position={} delta={}", position, delta);
///     })
///     .await;
/// }
/// ```
///
/// `on_change(position, delta)` runs in task context, outside the critical
/// section, once per poll in which the position moved. Several detents
/// between two polls are reported as one larger delta.
pub async fn position_monitor_task<P, F>(
    tracker: &'static QuadratureTracker<P>,
    config: MonitorConfig,
    mut on_change: F,
)
where
    F: FnMut(i32, i32),
{
    let period = Duration::from_millis(config.poll_period_ms());

    // Establish a baseline so the first report is a real movement.
    let mut delta = PositionDelta::new(tracker.read_position());

    #[cfg(feature = "defmt")]
    defmt::info!(
        "Position monitor started at {} ({} ms period)",
        delta.baseline(),
        config.poll_period_ms()
    );

    loop {
        Timer::after(period).await;

        let position = tracker.read_position();
        if let Some(d) = delta.update(position) {
            #[cfg(feature = "defmt")]
            defmt::debug!("Encoder moved: delta={}, position={}", d, position);
            on_change(position, d);
        }
    }
}
