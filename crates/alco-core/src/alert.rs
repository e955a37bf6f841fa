//! Alert assessment and LED/buzzer actuation

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::log_sink::{ALERT_LINE, LogSink};

/// Result of comparing a reading against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    /// Reading at or below the threshold
    Normal,
    /// Reading strictly above the threshold
    Alert,
}

impl AlertStatus {
    /// Compare a reading against the threshold.
    ///
    /// The comparison is strict: a reading equal to the threshold is Normal.
    #[inline]
    pub const fn assess(reading: i32, threshold: i32) -> Self {
        if reading > threshold {
            Self::Alert
        } else {
            Self::Normal
        }
    }

    #[inline]
    pub const fn is_alert(self) -> bool {
        matches!(self, Self::Alert)
    }

    /// Tag used in the serial log line
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Alert => "ALERT",
        }
    }
}

/// Drives the LED and buzzer outputs (both active-high).
///
/// The actuator is level-triggered: every call re-drives both pins and, while
/// alerting, re-emits the alert line. Nothing is remembered between ticks.
pub struct AlertActuator<LED, BUZZER> {
    led: LED,
    buzzer: BUZZER,
}

impl<LED, BUZZER> AlertActuator<LED, BUZZER>
where
    LED: OutputPin,
    BUZZER: OutputPin,
{
    pub const fn new(led: LED, buzzer: BUZZER) -> Self {
        Self { led, buzzer }
    }

    /// Apply the comparison result for one tick.
    pub fn apply<L: LogSink>(&mut self, reading: i32, threshold: i32, log: &mut L) -> AlertStatus {
        let status = AlertStatus::assess(reading, threshold);

        if status.is_alert() {
            if let Err(e) = self.led.set_high() {
                warn!("LED on failed: {:?}", e);
            }
            if let Err(e) = self.buzzer.set_high() {
                warn!("Buzzer on failed: {:?}", e);
            }
            log.write_line(ALERT_LINE);
        } else {
            if let Err(e) = self.led.set_low() {
                warn!("LED off failed: {:?}", e);
            }
            if let Err(e) = self.buzzer.set_low() {
                warn!("Buzzer off failed: {:?}", e);
            }
        }

        status
    }

    pub fn led(&self) -> &LED {
        &self.led
    }

    pub fn buzzer(&self) -> &BUZZER {
        &self.buzzer
    }
}
