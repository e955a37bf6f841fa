//! Button-triggered threshold recalibration
//!
//! A falling edge on the calibration button latches a request. The main loop
//! consumes it at the top of the next tick and runs [`Calibrator::run`] to
//! completion before doing anything else: alert, display and log are all
//! frozen for the ~1s of sampling plus the result hold time.
//!
//! ```text
//!   Idle ──(request consumed)──▶ Sampling ──(threshold written)──▶ Idle
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;
use log::{debug, info};

use crate::config::{self, MonitorConfig};
use crate::display::{TextDisplay, clear_or_warn, format_int, show_screen_or_warn};
use crate::sensors::GasSensor;
use crate::threshold::ThresholdStore;

const TITLE: &str = "Calibration Mode";
const SAMPLING: &str = "Reading...";
const RESULT_TITLE: &str = "New Threshold:";

/// Latched calibration request shared between the button and the main loop.
///
/// Backed by a single-slot [`Signal`]: any number of requests before the
/// loop looks collapse into one, and once taken a new edge is needed.
/// Safe to call from an interrupt handler or another task.
pub struct CalibrationTrigger {
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl Default for CalibrationTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationTrigger {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    /// Latch a request (button edge).
    #[inline]
    pub fn request(&self) {
        self.signal.signal(());
    }

    /// Consume the pending request, if any.
    #[inline]
    pub fn take(&self) -> bool {
        self.signal.try_take().is_some()
    }

    /// Whether a request is waiting, without consuming it.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.signal.signaled()
    }
}

/// Calibration routine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalibrationState {
    #[default]
    Idle,
    Sampling,
}

/// New threshold from a reading sum: truncating average plus offset.
///
/// `samples` of zero is treated as one.
#[inline]
pub const fn compute_threshold(sum: i32, samples: u16, offset: i32) -> i32 {
    let samples = if samples == 0 { 1 } else { samples as i32 };
    sum / samples + offset
}

/// Runs the blocking calibration sequence.
#[derive(Debug)]
pub struct Calibrator {
    config: MonitorConfig,
    state: CalibrationState,
}

impl Calibrator {
    pub const fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            state: CalibrationState::Idle,
        }
    }

    pub fn state(&self) -> CalibrationState {
        self.state
    }

    /// Sample the sensor, derive and store a new threshold, and show it.
    ///
    /// Always runs to completion and always ends in [`CalibrationState::Idle`].
    /// Returns the threshold that was written.
    pub async fn run<S, D, W>(
        &mut self,
        sensor: &mut S,
        display: &mut D,
        delay: &mut W,
        store: &mut ThresholdStore,
    ) -> i32
    where
        S: GasSensor,
        D: TextDisplay,
        W: DelayNs,
    {
        self.state = CalibrationState::Sampling;
        info!("Calibration started");

        show_screen_or_warn(display, TITLE, SAMPLING).await;

        let samples = self.config.effective_samples();
        let sample_delay_ms = config::delay_ms(self.config.calibration_sample_delay);

        let mut sum: i32 = 0;
        for i in 0..samples {
            let reading = sensor.read().await;
            debug!("Calibration sample {}/{}: {}", i + 1, samples, reading);
            sum = sum.saturating_add(reading as i32);
            delay.delay_ms(sample_delay_ms).await;
        }

        let threshold = compute_threshold(sum, samples, self.config.calibration_offset);
        store.set(threshold);
        info!("Calibration complete: new threshold {}", threshold);

        show_screen_or_warn(display, RESULT_TITLE, &format_int(threshold)).await;
        delay
            .delay_ms(config::delay_ms(self.config.calibration_hold))
            .await;
        clear_or_warn(display).await;

        self.state = CalibrationState::Idle;
        threshold
    }
}
