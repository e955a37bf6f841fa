//! Character display handling
//!
//! The detector uses a 16x2 character LCD. Everything above the driver talks
//! to it through [`TextDisplay`], so the same rendering code targets the
//! HD44780 on the device and an in-RAM [`CharBuffer`] on the host.

mod buffer;
mod hd44780;
mod updater;

pub use buffer::CharBuffer;
pub use hd44780::{Hd44780, LcdError};
pub use updater::DisplayUpdater;

use core::fmt::Write;

use heapless::String;
use log::warn;

/// Number of character columns on the display.
pub const COLUMNS: u8 = 16;

/// Number of character rows on the display.
pub const ROWS: u8 = 2;

/// Text-mode display with a fixed character grid.
pub trait TextDisplay {
    type Error: core::fmt::Debug;

    /// Blank the whole screen and home the cursor.
    fn clear(&mut self) -> impl Future<Output = Result<(), Self::Error>>;

    /// Move the cursor to `col`, `row` (zero based).
    fn set_cursor(&mut self, col: u8, row: u8) -> impl Future<Output = Result<(), Self::Error>>;

    /// Write text at the cursor, advancing it.
    fn print(&mut self, text: &str) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Format an integer for printing on the display.
pub fn format_int(value: i32) -> String<12> {
    let mut s = String::new();
    // i32::MIN is 11 characters
    let _ = write!(s, "{}", value);
    s
}

/// Write `text` at the start of `row`.
pub async fn print_at<D: TextDisplay>(
    display: &mut D,
    row: u8,
    text: &str,
) -> Result<(), D::Error> {
    display.set_cursor(0, row).await?;
    display.print(text).await
}

/// Clear the screen and show two lines of text.
pub async fn show_screen<D: TextDisplay>(
    display: &mut D,
    top: &str,
    bottom: &str,
) -> Result<(), D::Error> {
    display.clear().await?;
    print_at(display, 0, top).await?;
    print_at(display, 1, bottom).await
}

/// Clear the screen, logging instead of propagating a failure.
pub async fn clear_or_warn<D: TextDisplay>(display: &mut D) {
    if let Err(e) = display.clear().await {
        warn!("Display clear failed: {:?}", e);
    }
}

/// Show a two-line screen, logging instead of propagating a failure.
pub async fn show_screen_or_warn<D: TextDisplay>(display: &mut D, top: &str, bottom: &str) {
    if let Err(e) = show_screen(display, top, bottom).await {
        warn!("Display write failed: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_format_int_extremes() {
        assert_eq!(format_int(0).as_str(), "0");
        assert_eq!(format_int(-42).as_str(), "-42");
        assert_eq!(format_int(i32::MIN).as_str(), "-2147483648");
    }

    #[test]
    fn test_show_screen_replaces_content() {
        let mut display = CharBuffer::new();
        block_on(show_screen(&mut display, "Alcohol System", "Initializing...")).unwrap();
        assert_eq!(display.row_text(0), "Alcohol System  ");
        assert_eq!(display.row_text(1), "Initializing... ");

        block_on(show_screen(&mut display, "New Threshold:", "350")).unwrap();
        assert_eq!(display.row_text(0), "New Threshold:  ");
        assert_eq!(display.row_text(1), "350             ");
    }
}
