//! Hardware-independent core library for alco-rs
//!
//! This crate contains all platform-agnostic logic for the alcohol detector:
//! the threshold comparison that drives the LED and buzzer, the rate-limited
//! character display, the per-tick serial log line, and the blocking
//! recalibration routine triggered by the button.
//!
//! Hardware is reached only through `embedded-hal` traits and the small
//! traits defined here ([`GasSensor`], [`TextDisplay`], [`LogSink`],
//! [`Clock`]), so it compiles on both the ESP32-S3 and desktop hosts (for
//! the simulator and tests).

#![cfg_attr(not(test), no_std)]

pub mod alert;
pub mod calibration;
pub mod clock;
pub mod config;
pub mod display;
pub mod log_sink;
pub mod monitor;
pub mod sensors;
pub mod threshold;

#[cfg(test)]
pub(crate) mod testing;

pub use alert::{AlertActuator, AlertStatus};
pub use calibration::{CalibrationState, CalibrationTrigger, Calibrator};
pub use clock::{Clock, EmbassyClock};
pub use config::MonitorConfig;
pub use display::{CharBuffer, DisplayUpdater, Hd44780, LcdError, TextDisplay};
pub use log_sink::{LogSink, SerialLog};
pub use monitor::{Monitor, MonitorHardware, TickReport};
pub use sensors::{GasSensor, MAX_ADC};
pub use threshold::ThresholdStore;
