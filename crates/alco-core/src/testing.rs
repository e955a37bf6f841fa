//! Host-side fakes shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use core::convert::Infallible;

use embassy_time::Instant;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use embedded_hal_async::delay::DelayNs;

use crate::clock::Clock;
use crate::display::{CharBuffer, TextDisplay};
use crate::log_sink::LogSink;
use crate::sensors::GasSensor;

/// Output pin whose level can be observed through any clone.
#[derive(Debug, Clone, Default)]
pub struct TestPin {
    high: Rc<Cell<bool>>,
}

impl TestPin {
    pub fn is_high(&self) -> bool {
        self.high.get()
    }
}

impl ErrorType for TestPin {
    type Error = Infallible;
}

impl OutputPin for TestPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high.set(true);
        Ok(())
    }
}

/// Output pin that rejects every write.
#[derive(Debug, Clone, Copy)]
pub struct FailingPin;

impl ErrorType for FailingPin {
    type Error = ErrorKind;
}

impl OutputPin for FailingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

/// Delay that returns immediately.
#[derive(Debug, Clone, Copy)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    async fn delay_ns(&mut self, _ns: u32) {}
}

/// Log sink collecting lines in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingLog {
    pub lines: Vec<String>,
}

impl LogSink for RecordingLog {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Sensor replaying a fixed sequence; the last value repeats once exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedSensor {
    values: Vec<u16>,
    reads: usize,
}

impl ScriptedSensor {
    pub fn new(values: &[u16]) -> Self {
        assert!(!values.is_empty(), "script needs at least one value");
        Self {
            values: values.to_vec(),
            reads: 0,
        }
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl GasSensor for ScriptedSensor {
    async fn read(&mut self) -> u16 {
        let idx = self.reads.min(self.values.len() - 1);
        self.reads += 1;
        self.values[idx]
    }
}

/// Manually driven clock; its delays advance time instantly.
#[derive(Debug, Clone, Default)]
pub struct FakeTime {
    now_us: Rc<Cell<u64>>,
    delays_ms: Rc<RefCell<Vec<u32>>>,
}

impl FakeTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(&self) -> FakeDelay {
        FakeDelay { time: self.clone() }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_us.set(self.now_us.get() + ms * 1_000);
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.now_us.get() / 1_000
    }

    /// Every `delay_ms` call made so far
    pub fn delays_ms(&self) -> Vec<u32> {
        self.delays_ms.borrow().clone()
    }
}

impl Clock for FakeTime {
    fn now(&self) -> Instant {
        Instant::from_micros(self.now_us.get())
    }
}

/// Delay half of [`FakeTime`].
#[derive(Debug, Clone)]
pub struct FakeDelay {
    time: FakeTime,
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        let now = self.time.now_us.get();
        self.time.now_us.set(now + (ns as u64).div_ceil(1_000));
    }

    async fn delay_us(&mut self, us: u32) {
        let now = self.time.now_us.get();
        self.time.now_us.set(now + us as u64);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.time.delays_ms.borrow_mut().push(ms);
        self.time.advance_ms(ms as u64);
    }
}

/// [`CharBuffer`] that remembers what was on screen before every clear.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    pub buffer: CharBuffer,
    pub cleared_screens: Vec<(String, String)>,
}

impl TextDisplay for RecordingDisplay {
    type Error = Infallible;

    async fn clear(&mut self) -> Result<(), Self::Error> {
        self.cleared_screens.push((
            self.buffer.row_text(0).to_string(),
            self.buffer.row_text(1).to_string(),
        ));
        self.buffer.clear().await
    }

    async fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        self.buffer.set_cursor(col, row).await
    }

    async fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        self.buffer.print(text).await
    }
}
