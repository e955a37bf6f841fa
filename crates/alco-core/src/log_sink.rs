//! Line-oriented serial log
//!
//! This is the device's functional output (one status line per tick plus
//! alert lines), distinct from the `log` facade used for diagnostics.

use core::fmt::Write;

use heapless::String;
use log::warn;

use crate::alert::AlertStatus;

/// Capacity of a single formatted log line.
pub const LINE_CAPACITY: usize = 96;

/// Line emitted on every tick while the reading is above the threshold.
pub const ALERT_LINE: &str = "ALERT: Alcohol Detected!";

/// Sink for complete log lines.
pub trait LogSink {
    /// Emit one line. The sink appends its own line terminator.
    fn write_line(&mut self, line: &str);
}

impl<T: LogSink + ?Sized> LogSink for &mut T {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }
}

/// [`LogSink`] over any `core::fmt::Write` byte stream (e.g. a UART).
///
/// Lines are terminated with `\r\n` like a serial monitor expects. A
/// failing write is reported through the `log` facade and dropped.
pub struct SerialLog<W> {
    writer: W,
}

impl<W: Write> SerialLog<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LogSink for SerialLog<W> {
    fn write_line(&mut self, line: &str) {
        if self
            .writer
            .write_str(line)
            .and_then(|_| self.writer.write_str("\r\n"))
            .is_err()
        {
            warn!("Serial log write failed");
        }
    }
}

/// Format the per-tick status line.
///
/// `Sensor Value: {reading} | Threshold: {threshold} | Status: {ALERT|Normal}`
pub fn format_status_line(
    reading: i32,
    threshold: i32,
    status: AlertStatus,
) -> String<LINE_CAPACITY> {
    let mut line = String::new();
    // Two i32s and the fixed text always fit in LINE_CAPACITY
    let _ = write!(
        line,
        "Sensor Value: {} | Threshold: {} | Status: {}",
        reading,
        threshold,
        status.label()
    );
    line
}

/// Emit the status line for one tick.
pub fn emit<L: LogSink>(sink: &mut L, reading: i32, threshold: i32) {
    let status = AlertStatus::assess(reading, threshold);
    sink.write_line(&format_status_line(reading, threshold, status));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingLog;

    #[test]
    fn test_status_line_format() {
        let line = format_status_line(450, 400, AlertStatus::Alert);
        assert_eq!(
            line.as_str(),
            "Sensor Value: 450 | Threshold: 400 | Status: ALERT"
        );

        let line = format_status_line(400, 400, AlertStatus::Normal);
        assert_eq!(
            line.as_str(),
            "Sensor Value: 400 | Threshold: 400 | Status: Normal"
        );
    }

    #[test]
    fn test_extreme_values_fit() {
        let line = format_status_line(i32::MIN, i32::MIN, AlertStatus::Normal);
        assert!(line.ends_with("Status: Normal"));
    }

    #[test]
    fn test_emit_uses_strict_comparison() {
        let mut log = RecordingLog::default();
        emit(&mut log, 401, 400);
        emit(&mut log, 400, 400);

        assert_eq!(log.lines.len(), 2);
        assert!(log.lines[0].ends_with("Status: ALERT"));
        assert!(log.lines[1].ends_with("Status: Normal"));
    }

    #[test]
    fn test_serial_log_terminates_lines() {
        let mut serial = SerialLog::new(std::string::String::new());
        serial.write_line("first");
        serial.write_line("second");
        assert_eq!(serial.into_inner(), "first\r\nsecond\r\n");
    }
}
