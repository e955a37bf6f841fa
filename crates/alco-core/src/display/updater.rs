//! Rate-limited status screen

use embassy_time::{Duration, Instant};
use heapless::String;
use log::warn;

use super::{TextDisplay, format_int};
use crate::alert::AlertStatus;

const LEVEL_PREFIX: &str = "Level: ";

/// Trailing blanks that wipe digits left over from a longer previous value.
const LEVEL_PADDING: &str = "   ";

const STATUS_ALERT: &str = "Status: ALERT  ";
const STATUS_NORMAL: &str = "Status: Normal ";

/// Refreshes the live reading screen at most once per interval.
#[derive(Debug, Clone, Copy)]
pub struct DisplayUpdater {
    interval: Duration,
    last_update: Option<Instant>,
}

impl DisplayUpdater {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_update: None,
        }
    }

    /// Time of the last render, if any.
    pub fn last_update(&self) -> Option<Instant> {
        self.last_update
    }

    /// Whether a refresh at `now` would render.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_update {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Render the reading and status if the interval has elapsed.
    ///
    /// Returns `true` when the screen was written. The timestamp advances only
    /// on a render, and a failed write still counts as one so a broken display
    /// is not hammered every tick.
    pub async fn refresh<D: TextDisplay>(
        &mut self,
        display: &mut D,
        reading: i32,
        threshold: i32,
        now: Instant,
    ) -> bool {
        if !self.is_due(now) {
            return false;
        }

        let status = AlertStatus::assess(reading, threshold);
        if let Err(e) = render(display, reading, status).await {
            warn!("Display refresh failed: {:?}", e);
        }

        self.last_update = Some(now);
        true
    }
}

/// `Level: {reading}` with padding, at most 7 + 11 + 3 characters.
fn level_line(reading: i32) -> String<24> {
    let mut line = String::new();
    // Capacity covers the widest i32 plus prefix and padding
    let _ = line.push_str(LEVEL_PREFIX);
    let _ = line.push_str(&format_int(reading));
    let _ = line.push_str(LEVEL_PADDING);
    line
}

async fn render<D: TextDisplay>(
    display: &mut D,
    reading: i32,
    status: AlertStatus,
) -> Result<(), D::Error> {
    display.set_cursor(0, 0).await?;
    display.print(&level_line(reading)).await?;

    display.set_cursor(0, 1).await?;
    let status_line = if status.is_alert() {
        STATUS_ALERT
    } else {
        STATUS_NORMAL
    };
    display.print(status_line).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::CharBuffer;
    use embassy_futures::block_on;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_first_refresh_always_renders() {
        let mut updater = DisplayUpdater::new(Duration::from_millis(200));
        let mut display = CharBuffer::new();

        assert!(block_on(updater.refresh(&mut display, 123, 400, at(0))));
        assert_eq!(display.row_text(0), "Level: 123      ");
        assert_eq!(display.row_text(1), "Status: Normal  ");
        assert_eq!(updater.last_update(), Some(at(0)));
    }

    #[test]
    fn test_rate_limit() {
        let mut updater = DisplayUpdater::new(Duration::from_millis(200));
        let mut display = CharBuffer::new();

        assert!(block_on(updater.refresh(&mut display, 100, 400, at(1000))));
        // Within 200ms: skipped, screen untouched
        assert!(!block_on(updater.refresh(&mut display, 999, 400, at(1199))));
        assert_eq!(display.row_text(0), "Level: 100      ");
        assert_eq!(updater.last_update(), Some(at(1000)));

        // Exactly 200ms later renders again
        assert!(block_on(updater.refresh(&mut display, 999, 400, at(1200))));
        assert_eq!(display.row_text(0), "Level: 999      ");
        assert_eq!(display.row_text(1), "Status: ALERT   ");
        assert_eq!(updater.last_update(), Some(at(1200)));
    }

    #[test]
    fn test_padding_erases_stale_digits() {
        let mut updater = DisplayUpdater::new(Duration::from_millis(200));
        let mut display = CharBuffer::new();

        block_on(updater.refresh(&mut display, 1023, 400, at(0)));
        assert_eq!(display.row_text(0), "Level: 1023     ");

        block_on(updater.refresh(&mut display, 7, 400, at(200)));
        assert_eq!(display.row_text(0), "Level: 7        ");
    }

    #[test]
    fn test_equal_reading_shows_normal() {
        let mut updater = DisplayUpdater::new(Duration::from_millis(200));
        let mut display = CharBuffer::new();

        block_on(updater.refresh(&mut display, 400, 400, at(0)));
        assert_eq!(display.row_text(1), "Status: Normal  ");
    }
}
