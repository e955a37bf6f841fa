//! Main control loop
//!
//! The [`Monitor`] owns every piece of state the detector has (threshold,
//! calibration state, display timestamp) together with the hardware it
//! drives. Each [`tick`](Monitor::tick) runs the same fixed sequence:
//!
//! 1. run a pending calibration to completion
//! 2. read the sensor
//! 3. drive LED and buzzer
//! 4. refresh the display (rate limited)
//! 5. write the serial status line
//!
//! The only state shared with the outside is the [`CalibrationTrigger`],
//! which the button edge sets from another task or interrupt.

use embassy_futures::yield_now;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use log::info;

use crate::alert::{AlertActuator, AlertStatus};
use crate::calibration::{CalibrationState, CalibrationTrigger, Calibrator};
use crate::clock::Clock;
use crate::config::{self, MonitorConfig};
use crate::display::{DisplayUpdater, TextDisplay, clear_or_warn, show_screen_or_warn};
use crate::log_sink::{self, LogSink};
use crate::sensors::GasSensor;
use crate::threshold::ThresholdStore;

const WELCOME_TITLE: &str = "Alcohol System";
const WELCOME_SUBTITLE: &str = "Initializing...";

/// Hardware the monitor drives
pub struct MonitorHardware<S, D, LED, BUZZER, L> {
    pub sensor: S,
    pub display: D,
    pub led: LED,
    pub buzzer: BUZZER,
    pub log: L,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Sensor value read in step 2
    pub reading: i32,
    /// Threshold the reading was compared against
    pub threshold: i32,
    pub status: AlertStatus,
    /// Whether the display was redrawn
    pub rendered: bool,
    /// New threshold if a calibration ran at the start of the tick
    pub calibrated: Option<i32>,
}

/// The alcohol detector control loop.
pub struct Monitor<'a, S, D, LED, BUZZER, L, C, W> {
    config: MonitorConfig,
    trigger: &'a CalibrationTrigger,
    threshold: ThresholdStore,
    calibrator: Calibrator,
    updater: DisplayUpdater,
    actuator: AlertActuator<LED, BUZZER>,
    sensor: S,
    display: D,
    log: L,
    clock: C,
    delay: W,
    ticks: u64,
}

impl<'a, S, D, LED, BUZZER, L, C, W> Monitor<'a, S, D, LED, BUZZER, L, C, W>
where
    S: GasSensor,
    D: TextDisplay,
    LED: OutputPin,
    BUZZER: OutputPin,
    L: LogSink,
    C: Clock,
    W: DelayNs,
{
    pub fn new(
        config: MonitorConfig,
        trigger: &'a CalibrationTrigger,
        hardware: MonitorHardware<S, D, LED, BUZZER, L>,
        clock: C,
        delay: W,
    ) -> Self {
        Self {
            config,
            trigger,
            threshold: ThresholdStore::new(config.initial_threshold),
            calibrator: Calibrator::new(config),
            updater: DisplayUpdater::new(config.refresh_interval),
            actuator: AlertActuator::new(hardware.led, hardware.buzzer),
            sensor: hardware.sensor,
            display: hardware.display,
            log: hardware.log,
            clock,
            delay,
            ticks: 0,
        }
    }

    /// Show the welcome screen for the configured hold time, then clear it.
    pub async fn startup(&mut self) {
        info!(
            "Starting with threshold {}, display refresh every {}ms",
            self.threshold.get(),
            self.config.refresh_interval.as_millis()
        );

        show_screen_or_warn(&mut self.display, WELCOME_TITLE, WELCOME_SUBTITLE).await;
        self.delay
            .delay_ms(config::delay_ms(self.config.welcome_hold))
            .await;
        clear_or_warn(&mut self.display).await;
    }

    /// Run one iteration of the control loop.
    pub async fn tick(&mut self) -> TickReport {
        self.ticks = self.ticks.wrapping_add(1);

        let calibrated = if self.trigger.take() {
            let threshold = self
                .calibrator
                .run(
                    &mut self.sensor,
                    &mut self.display,
                    &mut self.delay,
                    &mut self.threshold,
                )
                .await;
            Some(threshold)
        } else {
            None
        };

        let reading = self.sensor.read().await as i32;
        let threshold = self.threshold.get();

        let status = self.actuator.apply(reading, threshold, &mut self.log);

        let now = self.clock.now();
        let rendered = self
            .updater
            .refresh(&mut self.display, reading, threshold, now)
            .await;

        log_sink::emit(&mut self.log, reading, threshold);

        TickReport {
            reading,
            threshold,
            status,
            rendered,
            calibrated,
        }
    }

    /// Tick forever.
    ///
    /// There is no delay between ticks; the loop only yields so that other
    /// tasks on the same executor (the button watcher) get polled.
    pub async fn run(&mut self) -> ! {
        loop {
            self.tick().await;
            yield_now().await;
        }
    }

    pub fn threshold(&self) -> i32 {
        self.threshold.get()
    }

    pub fn calibration_state(&self) -> CalibrationState {
        self.calibrator.state()
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn log_sink(&self) -> &L {
        &self.log
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }
}
