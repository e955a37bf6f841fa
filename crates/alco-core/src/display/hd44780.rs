//! HD44780 character LCD driver (4-bit parallel mode)
//!
//! Drives the common 16x2 LCD module over six GPIOs (RS, EN, D4-D7). The
//! R/W line is tied to ground on the board, so the busy flag is never read
//! and every command is followed by its worst-case execution time instead.

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal_async::delay::DelayNs;
use log::{debug, error};
use thiserror_no_std::Error;

use super::{COLUMNS, ROWS, TextDisplay};

// =============================================================================
// Commands
// =============================================================================

const CMD_CLEAR_DISPLAY: u8 = 0x01;
const CMD_ENTRY_MODE_SET: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_DDRAM_ADDR: u8 = 0x80;

// Entry mode flags
const ENTRY_LEFT: u8 = 0x02;

// Display control flags
const DISPLAY_ON: u8 = 0x04;

// Function set flags (4-bit bus, 5x8 font)
const TWO_LINE: u8 = 0x08;

/// DDRAM start address of each row
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

// =============================================================================
// Timing (microseconds)
// =============================================================================

const POWER_ON_DELAY_US: u32 = 50_000;
const INIT_LONG_DELAY_US: u32 = 4_500;
const INIT_SHORT_DELAY_US: u32 = 150;
const ENABLE_PULSE_US: u32 = 1;
const COMMAND_SETTLE_US: u32 = 100;
const CLEAR_DELAY_US: u32 = 2_000;

/// Errors reported by the LCD driver
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcdError {
    #[error("LCD {pin} pin write failed")]
    Pin { pin: &'static str },
    #[error("cursor ({col}, {row}) is outside the display")]
    CursorOutOfBounds { col: u8, row: u8 },
}

/// HD44780 in 4-bit mode.
///
/// All six control pins share one type, which is what a HAL `Output` gives.
pub struct Hd44780<P, D> {
    rs: P,
    en: P,
    data: [P; 4],
    delay: D,
}

impl<P, D> Hd44780<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create the driver. Call [`init`](Self::init) before writing text.
    pub fn new(rs: P, en: P, d4: P, d5: P, d6: P, d7: P, delay: D) -> Self {
        Self {
            rs,
            en,
            data: [d4, d5, d6, d7],
            delay,
        }
    }

    /// Run the power-on initialisation sequence for 4-bit mode.
    ///
    /// The controller may come up in 8-bit mode, so the function-set nibble
    /// is sent three times before switching the bus width down to 4 bits.
    pub async fn init(&mut self) -> Result<(), LcdError> {
        self.delay.delay_us(POWER_ON_DELAY_US).await;

        self.set_pin_rs(false)?;
        self.set_pin_en(false)?;

        self.write_nibble(0x03).await?;
        self.delay.delay_us(INIT_LONG_DELAY_US).await;
        self.write_nibble(0x03).await?;
        self.delay.delay_us(INIT_LONG_DELAY_US).await;
        self.write_nibble(0x03).await?;
        self.delay.delay_us(INIT_SHORT_DELAY_US).await;
        self.write_nibble(0x02).await?;

        self.command(CMD_FUNCTION_SET | TWO_LINE).await?;
        self.command(CMD_DISPLAY_CONTROL | DISPLAY_ON).await?;
        self.clear_display().await?;
        self.command(CMD_ENTRY_MODE_SET | ENTRY_LEFT).await?;

        debug!("HD44780 initialised");
        Ok(())
    }

    async fn clear_display(&mut self) -> Result<(), LcdError> {
        self.command(CMD_CLEAR_DISPLAY).await?;
        self.delay.delay_us(CLEAR_DELAY_US).await;
        Ok(())
    }

    async fn command(&mut self, value: u8) -> Result<(), LcdError> {
        self.write_byte(value, false).await
    }

    async fn write_byte(&mut self, value: u8, is_data: bool) -> Result<(), LcdError> {
        self.set_pin_rs(is_data)?;
        self.write_nibble(value >> 4).await?;
        self.write_nibble(value & 0x0F).await
    }

    async fn write_nibble(&mut self, nibble: u8) -> Result<(), LcdError> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            let level = PinState::from((nibble >> bit) & 0x01 == 0x01);
            pin.set_state(level).map_err(|e| {
                error!("HD44780 D{} write failed: {:?}", bit + 4, e);
                LcdError::Pin { pin: "data" }
            })?;
        }
        self.pulse_enable().await
    }

    /// Latch the data lines on the falling edge of EN.
    async fn pulse_enable(&mut self) -> Result<(), LcdError> {
        self.set_pin_en(false)?;
        self.delay.delay_us(ENABLE_PULSE_US).await;
        self.set_pin_en(true)?;
        self.delay.delay_us(ENABLE_PULSE_US).await;
        self.set_pin_en(false)?;
        self.delay.delay_us(COMMAND_SETTLE_US).await;
        Ok(())
    }

    fn set_pin_rs(&mut self, high: bool) -> Result<(), LcdError> {
        self.rs.set_state(PinState::from(high)).map_err(|e| {
            error!("HD44780 RS write failed: {:?}", e);
            LcdError::Pin { pin: "RS" }
        })
    }

    fn set_pin_en(&mut self, high: bool) -> Result<(), LcdError> {
        self.en.set_state(PinState::from(high)).map_err(|e| {
            error!("HD44780 EN write failed: {:?}", e);
            LcdError::Pin { pin: "EN" }
        })
    }
}

impl<P, D> TextDisplay for Hd44780<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    type Error = LcdError;

    async fn clear(&mut self) -> Result<(), Self::Error> {
        self.clear_display().await
    }

    async fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        if col >= COLUMNS || row >= ROWS {
            return Err(LcdError::CursorOutOfBounds { col, row });
        }
        self.command(CMD_SET_DDRAM_ADDR | (ROW_OFFSETS[row as usize] + col))
            .await
    }

    async fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        for byte in text.bytes() {
            // The character ROM only maps ASCII sensibly
            let byte = if byte.is_ascii() { byte } else { b'?' };
            self.write_byte(byte, true).await?;
        }
        Ok(())
    }
}
