#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use alco_core::{CalibrationTrigger, EmbassyClock, MonitorConfig, MonitorHardware};
use alco_firmware::app_state::{
    BoardMonitor, LcdPins, button_input, init_lcd, init_log_uart, init_sensor, output_low,
};
use alco_firmware::board;
use alco_firmware::button::button_task;
use embassy_executor::Spawner;
use embassy_time::Delay;
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use log::info;
use static_cell::StaticCell;

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

/// Latched by the button task, consumed by the control loop
static CALIBRATION_TRIGGER: CalibrationTrigger = CalibrationTrigger::new();

static MONITOR: StaticCell<BoardMonitor> = StaticCell::new();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: board::HEAP_SIZE);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Embassy initialized!");

    let sensor = init_sensor(peripherals.ADC1, peripherals.GPIO1);
    let log = init_log_uart(peripherals.UART0, peripherals.GPIO43, peripherals.GPIO44)
        .expect("Failed to initialize serial log");

    let led = output_low(peripherals.GPIO13);
    let buzzer = output_low(peripherals.GPIO8);
    info!(
        "LED on GPIO{}, buzzer on GPIO{}",
        board::LED_GPIO,
        board::BUZZER_GPIO
    );

    let lcd = init_lcd(LcdPins {
        rs: output_low(peripherals.GPIO12),
        en: output_low(peripherals.GPIO11),
        d4: output_low(peripherals.GPIO5),
        d5: output_low(peripherals.GPIO4),
        d6: output_low(peripherals.GPIO3),
        d7: output_low(peripherals.GPIO2),
    })
    .await
    .expect("Failed to initialize display");

    let monitor = MONITOR.init(BoardMonitor::new(
        MonitorConfig::default(),
        &CALIBRATION_TRIGGER,
        MonitorHardware {
            sensor,
            display: lcd,
            led,
            buzzer,
            log,
        },
        EmbassyClock,
        Delay,
    ));

    monitor.startup().await;

    let button = button_input(peripherals.GPIO7);
    spawner.spawn(button_task(button, &CALIBRATION_TRIGGER).expect("button task"));
    info!("Calibration button on GPIO{}", board::BUTTON_GPIO);

    monitor.run().await
}
