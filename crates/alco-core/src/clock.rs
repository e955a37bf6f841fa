//! Monotonic time source

use embassy_time::Instant;

/// Source of the current monotonic time.
///
/// The control loop asks the clock instead of calling `Instant::now()` so
/// that tests and the simulator can drive time themselves.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Clock backed by the embassy time driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}
