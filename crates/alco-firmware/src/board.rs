//! Board wiring
//!
//! GPIO assignments for the detector carrier board. The pin singletons
//! themselves are moved out of `Peripherals` in `main`; these constants
//! document the wiring and are what the bring-up logs print.

/// MQ-3 analog output (ADC1 channel 0)
pub const SENSOR_GPIO: u8 = 1;
/// Calibration push button, active low with internal pull-up
pub const BUTTON_GPIO: u8 = 7;
/// Alert LED, active high
pub const LED_GPIO: u8 = 13;
/// Piezo buzzer driver, active high
pub const BUZZER_GPIO: u8 = 8;

// HD44780 character LCD, 4-bit bus, R/W tied low
pub const LCD_RS_GPIO: u8 = 12;
pub const LCD_EN_GPIO: u8 = 11;
pub const LCD_D4_GPIO: u8 = 5;
pub const LCD_D5_GPIO: u8 = 4;
pub const LCD_D6_GPIO: u8 = 3;
pub const LCD_D7_GPIO: u8 = 2;

/// Serial log on UART0 (USB-UART bridge)
pub const LOG_BAUD_RATE: u32 = 9600;
pub const LOG_TX_GPIO: u8 = 43;
pub const LOG_RX_GPIO: u8 = 44;

/// Heap handed to esp-alloc for the RTOS
pub const HEAP_SIZE: usize = 32 * 1024;
