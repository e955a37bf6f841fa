//! Desktop simulator for the alco-rs alcohol detector.
//!
//! Runs the real `alco_core::Monitor` against a synthetic MQ-3 signal and
//! shows the 16x2 character LCD in an SDL2 window via
//! `embedded-graphics-simulator`. The window is repainted from inside the
//! display path, so the welcome and calibration screens are visible while
//! the loop is blocked on them. Serial log lines go to stdout and LED/buzzer
//! transitions are reported through the logger.
//!
//! # Key bindings
//!
//! | Key       | Action                          |
//! |-----------|---------------------------------|
//! | C         | Press the calibration button    |
//! | + / Up    | Raise the alcohol level by 100  |
//! | - / Down  | Lower the alcohol level by 100  |
//! | Q / Esc   | Quit                            |

use core::convert::Infallible;

use embassy_time::{Delay, Duration, Instant, Timer};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use embedded_hal::digital::{ErrorType, OutputPin};
use log::info;

use alco_core::display::{COLUMNS, ROWS};
use alco_core::{
    CalibrationTrigger, CharBuffer, EmbassyClock, GasSensor, LogSink, MAX_ADC, Monitor,
    MonitorConfig, MonitorHardware, TextDisplay,
};

// ---------------------------------------------------------------------------
// Simulation constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Glyph cell of `FONT_10X20`.
const CHAR_WIDTH_PX: u32 = 10;
const CHAR_HEIGHT_PX: u32 = 20;

/// Bezel around the character area.
const MARGIN_PX: u32 = 8;

const LCD_BACKGROUND: Rgb565 = Rgb565::new(0, 14, 28);
const LCD_TEXT: Rgb565 = Rgb565::WHITE;

/// Pause between ticks so the window stays responsive.
const TICK_PACING: Duration = Duration::from_millis(50);

/// Clean-air reading the synthetic signal starts from.
const BASELINE_LEVEL: i32 = 250;

/// Step applied by the raise / lower keys.
const LEVEL_STEP: i32 = 100;

static CALIBRATION_TRIGGER: CalibrationTrigger = CalibrationTrigger::new();

// ---------------------------------------------------------------------------
// Simulated hardware
// ---------------------------------------------------------------------------

/// Synthetic MQ-3 signal: a controllable level plus slow ripple.
struct SimSensor {
    level: i32,
    start: Instant,
}

impl SimSensor {
    fn new(level: i32) -> Self {
        Self {
            level,
            start: Instant::now(),
        }
    }

    /// Move the base level, returning the new value.
    fn shift(&mut self, delta: i32) -> i32 {
        self.level = self.level.saturating_add(delta);
        self.level
    }
}

impl GasSensor for SimSensor {
    async fn read(&mut self) -> u16 {
        let t = self.start.elapsed().as_millis() as f64 / 1000.0;
        let ripple = 15.0 * (t / 3.0).sin() + 5.0 * (t * 1.7).cos();
        let value = self.level as f64 + ripple;
        value.clamp(0.0, MAX_ADC as f64) as u16
    }
}

/// Output pin that reports level changes.
struct SimPin {
    name: &'static str,
    high: bool,
}

impl SimPin {
    fn new(name: &'static str) -> Self {
        Self { name, high: false }
    }

    fn set(&mut self, high: bool) {
        if self.high != high {
            self.high = high;
            info!("{} {}", self.name, if high { "ON" } else { "OFF" });
        }
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

/// Serial monitor stand-in.
struct StdoutLog;

impl LogSink for StdoutLog {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }
}

// ---------------------------------------------------------------------------
// LCD
// ---------------------------------------------------------------------------

/// Something that can show the 16x2 character grid.
trait Panel {
    fn show(&mut self, buffer: &CharBuffer);
}

/// Character LCD that repaints its panel as soon as the text changes.
struct LcdWindow<P> {
    buffer: CharBuffer,
    panel: P,
}

impl<P: Panel> LcdWindow<P> {
    fn new(panel: P) -> Self {
        Self {
            buffer: CharBuffer::new(),
            panel,
        }
    }

    fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    fn present(&mut self) {
        if self.buffer.take_dirty() {
            self.panel.show(&self.buffer);
        }
    }
}

impl<P: Panel> TextDisplay for LcdWindow<P> {
    type Error = Infallible;

    async fn clear(&mut self) -> Result<(), Self::Error> {
        self.buffer.clear().await?;
        self.present();
        Ok(())
    }

    async fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        self.buffer.set_cursor(col, row).await
    }

    async fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        self.buffer.print(text).await?;
        self.present();
        Ok(())
    }
}

/// User input mapped from window events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Calibrate,
    Raise,
    Lower,
    Quit,
}

fn keycode_to_command(keycode: Keycode) -> Option<Command> {
    match keycode {
        Keycode::C => Some(Command::Calibrate),
        Keycode::Plus | Keycode::Equals | Keycode::KpPlus | Keycode::Up => Some(Command::Raise),
        Keycode::Minus | Keycode::KpMinus | Keycode::Down => Some(Command::Lower),
        Keycode::Q | Keycode::Escape => Some(Command::Quit),
        _ => None,
    }
}

/// SDL2 window rendering the LCD.
struct SdlPanel {
    display: SimulatorDisplay<Rgb565>,
    window: Window,
}

impl SdlPanel {
    fn new() -> Self {
        let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
            COLUMNS as u32 * CHAR_WIDTH_PX + 2 * MARGIN_PX,
            ROWS as u32 * CHAR_HEIGHT_PX + 2 * MARGIN_PX,
        ));
        let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
        let mut window = Window::new("Alcohol Detector", &output_settings);

        // The SDL window is created on the first `update()`, which must
        // happen before `events()` is called.
        let _ = display.clear(LCD_BACKGROUND);
        window.update(&display);

        Self { display, window }
    }

    /// Drain pending window events into commands.
    fn commands(&mut self) -> Vec<Command> {
        self.window
            .events()
            .filter_map(|event| match event {
                SimulatorEvent::Quit => Some(Command::Quit),
                SimulatorEvent::KeyDown { keycode, .. } => keycode_to_command(keycode),
                _ => None,
            })
            .collect()
    }
}

impl Panel for SdlPanel {
    fn show(&mut self, buffer: &CharBuffer) {
        let _ = self.display.clear(LCD_BACKGROUND);

        let style = MonoTextStyle::new(&FONT_10X20, LCD_TEXT);
        for row in 0..ROWS as u32 {
            let origin = Point::new(MARGIN_PX as i32, (MARGIN_PX + row * CHAR_HEIGHT_PX) as i32);
            let text = buffer.row_text(row as usize);
            let _ = Text::with_baseline(text, origin, style, Baseline::Top).draw(&mut self.display);
        }

        self.window.update(&self.display);
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting alco-rs simulator");
    info!("Keys: C=Calibrate  +=More alcohol  -=Less alcohol  Q=Quit");

    let hardware = MonitorHardware {
        sensor: SimSensor::new(BASELINE_LEVEL),
        display: LcdWindow::new(SdlPanel::new()),
        led: SimPin::new("LED"),
        buzzer: SimPin::new("Buzzer"),
        log: StdoutLog,
    };
    let mut monitor = Monitor::new(
        MonitorConfig::default(),
        &CALIBRATION_TRIGGER,
        hardware,
        EmbassyClock,
        Delay,
    );

    embassy_futures::block_on(async {
        monitor.startup().await;

        'running: loop {
            for command in monitor.display_mut().panel_mut().commands() {
                match command {
                    Command::Calibrate => {
                        info!("Calibration button pressed");
                        CALIBRATION_TRIGGER.request();
                    }
                    Command::Raise => {
                        let level = monitor.sensor_mut().shift(LEVEL_STEP);
                        info!("Alcohol level raised to {}", level);
                    }
                    Command::Lower => {
                        let level = monitor.sensor_mut().shift(-LEVEL_STEP);
                        info!("Alcohol level lowered to {}", level);
                    }
                    Command::Quit => break 'running,
                }
            }

            let report = monitor.tick().await;
            if let Some(threshold) = report.calibrated {
                info!("Threshold is now {}", threshold);
            }

            Timer::after(TICK_PACING).await;
        }
    });

    info!("Simulator exiting after {} ticks", monitor.ticks());
}
