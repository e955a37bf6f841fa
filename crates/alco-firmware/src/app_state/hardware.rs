//! Hardware initialization for the detector board
//!
//! This module provides functions for setting up every peripheral the
//! control loop drives, in the order `main` needs them.

use alco_core::{Hd44780, SerialLog};
use embassy_time::Delay;
use esp_hal::analog::adc::{Adc, AdcConfig, Attenuation};
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::peripherals::{ADC1, GPIO1, GPIO43, GPIO44, UART0};
use esp_hal::uart::{Config as UartConfig, Uart};
use log::info;

use super::{AppError, BoardLcd, BoardLog};
use crate::board;
use crate::mq3::Mq3Sensor;

/// Output pins of the LCD's 4-bit bus
pub struct LcdPins {
    pub rs: Output<'static>,
    pub en: Output<'static>,
    pub d4: Output<'static>,
    pub d5: Output<'static>,
    pub d6: Output<'static>,
    pub d7: Output<'static>,
}

/// Configure a push-pull output that starts low (inactive).
pub fn output_low(pin: impl esp_hal::gpio::OutputPin + 'static) -> Output<'static> {
    Output::new(pin, Level::Low, OutputConfig::default())
}

/// Configure the calibration button input with its pull-up.
///
/// Pressing the button pulls the line low, so a press is a falling edge.
pub fn button_input(pin: impl esp_hal::gpio::InputPin + 'static) -> Input<'static> {
    Input::new(pin, InputConfig::default().with_pull(Pull::Up))
}

/// Initialize the MQ-3 ADC channel
///
/// 11 dB attenuation gives the full 0-3.1 V swing of the sensor module.
pub fn init_sensor(adc1: ADC1<'static>, pin: GPIO1<'static>) -> Mq3Sensor {
    let mut config = AdcConfig::new();
    let pin = config.enable_pin(pin, Attenuation::_11dB);
    let adc = Adc::new(adc1, config);

    info!("MQ-3 sensor on GPIO{}", board::SENSOR_GPIO);
    Mq3Sensor::new(adc, pin)
}

/// Initialize the serial log UART
pub fn init_log_uart(
    uart0: UART0<'static>,
    tx: GPIO43<'static>,
    rx: GPIO44<'static>,
) -> Result<BoardLog, AppError> {
    let uart = Uart::new(
        uart0,
        UartConfig::default().with_baudrate(board::LOG_BAUD_RATE),
    )
    .map_err(AppError::Uart)?
    .with_tx(tx)
    .with_rx(rx);

    info!(
        "Serial log at {} baud (TX GPIO{}, RX GPIO{})",
        board::LOG_BAUD_RATE,
        board::LOG_TX_GPIO,
        board::LOG_RX_GPIO
    );
    Ok(SerialLog::new(uart))
}

/// Initialize the HD44780 LCD
///
/// Runs the controller's power-on sequence, so the display is ready for the
/// welcome screen when this returns.
pub async fn init_lcd(pins: LcdPins) -> Result<BoardLcd, AppError> {
    let mut lcd = Hd44780::new(pins.rs, pins.en, pins.d4, pins.d5, pins.d6, pins.d7, Delay);
    lcd.init().await?;

    info!(
        "LCD ready (RS GPIO{}, EN GPIO{}, D4-D7 GPIO{}/{}/{}/{})",
        board::LCD_RS_GPIO,
        board::LCD_EN_GPIO,
        board::LCD_D4_GPIO,
        board::LCD_D5_GPIO,
        board::LCD_D6_GPIO,
        board::LCD_D7_GPIO
    );
    Ok(lcd)
}
