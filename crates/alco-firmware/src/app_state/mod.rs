//! Firmware application state and error types for alco-rs

mod hardware;

pub use hardware::*;

use alco_core::{EmbassyClock, Hd44780, LcdError, Monitor, SerialLog};
use embassy_time::Delay;
use esp_hal::Blocking;
use esp_hal::gpio::Output;
use esp_hal::uart::Uart;
use thiserror_no_std::Error;

use crate::mq3::Mq3Sensor;

/// The 16x2 LCD as wired on the board
pub type BoardLcd = Hd44780<Output<'static>, Delay>;

/// Serial log sink on UART0
pub type BoardLog = SerialLog<Uart<'static, Blocking>>;

/// Fully wired control loop
pub type BoardMonitor = Monitor<
    'static,
    Mq3Sensor,
    BoardLcd,
    Output<'static>,
    Output<'static>,
    BoardLog,
    EmbassyClock,
    Delay,
>;

/// Bring-up failures. The control loop itself has no error path.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("UART configuration failed: {0:?}")]
    Uart(esp_hal::uart::ConfigError),
    #[error("LCD initialisation failed: {0}")]
    Display(LcdError),
}

impl From<LcdError> for AppError {
    fn from(e: LcdError) -> Self {
        Self::Display(e)
    }
}
