//! Control loop configuration
//!
//! All timing and threshold constants of the detector live here so the
//! firmware and the simulator run with identical semantics.

use embassy_time::Duration;

/// Threshold used from power-on until the first calibration.
pub const DEFAULT_THRESHOLD: i32 = 400;

/// Minimum spacing between two display refreshes.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(200);

/// Number of sensor readings averaged by a calibration run.
pub const CALIBRATION_SAMPLES: u16 = 10;

/// Pause after each calibration reading.
pub const CALIBRATION_SAMPLE_DELAY: Duration = Duration::from_millis(100);

/// Margin added on top of the averaged clean-air reading.
pub const CALIBRATION_OFFSET: i32 = 50;

/// How long the "New Threshold" screen stays visible.
pub const CALIBRATION_HOLD: Duration = Duration::from_millis(2000);

/// How long the welcome screen stays visible after boot.
pub const WELCOME_HOLD: Duration = Duration::from_millis(2000);

/// Milliseconds for a `DelayNs::delay_ms` call, saturating at `u32::MAX`.
pub fn delay_ms(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

/// Runtime configuration for a [`Monitor`](crate::Monitor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Threshold before any calibration has run
    pub initial_threshold: i32,
    /// Display rate limit
    pub refresh_interval: Duration,
    /// Readings taken per calibration (0 is treated as 1)
    pub calibration_samples: u16,
    /// Delay after each calibration reading
    pub calibration_sample_delay: Duration,
    /// Added to the average to form the new threshold
    pub calibration_offset: i32,
    /// Time the result screen is held
    pub calibration_hold: Duration,
    /// Time the welcome screen is held
    pub welcome_hold: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorConfig {
    /// Configuration matching the reference MQ-3 detector.
    pub const fn new() -> Self {
        Self {
            initial_threshold: DEFAULT_THRESHOLD,
            refresh_interval: REFRESH_INTERVAL,
            calibration_samples: CALIBRATION_SAMPLES,
            calibration_sample_delay: CALIBRATION_SAMPLE_DELAY,
            calibration_offset: CALIBRATION_OFFSET,
            calibration_hold: CALIBRATION_HOLD,
            welcome_hold: WELCOME_HOLD,
        }
    }

    pub const fn with_initial_threshold(mut self, threshold: i32) -> Self {
        self.initial_threshold = threshold;
        self
    }

    pub const fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub const fn with_calibration_samples(mut self, samples: u16) -> Self {
        self.calibration_samples = samples;
        self
    }

    pub const fn with_calibration_sample_delay(mut self, delay: Duration) -> Self {
        self.calibration_sample_delay = delay;
        self
    }

    pub const fn with_calibration_offset(mut self, offset: i32) -> Self {
        self.calibration_offset = offset;
        self
    }

    pub const fn with_calibration_hold(mut self, hold: Duration) -> Self {
        self.calibration_hold = hold;
        self
    }

    pub const fn with_welcome_hold(mut self, hold: Duration) -> Self {
        self.welcome_hold = hold;
        self
    }

    /// Sample count actually used by calibration, never zero.
    pub const fn effective_samples(&self) -> u16 {
        if self.calibration_samples == 0 {
            1
        } else {
            self.calibration_samples
        }
    }
}
