//! Calibration button watcher
//!
//! Stands in for a falling-edge interrupt: the task sleeps until the GPIO
//! edge fires and then latches a calibration request. There is no software
//! debounce; contact bounce can latch several requests, which the trigger
//! collapses into one unless the main loop consumes one in between.

use alco_core::CalibrationTrigger;
use esp_hal::gpio::Input;
use log::info;

#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>, trigger: &'static CalibrationTrigger) -> ! {
    loop {
        button.wait_for_falling_edge().await;
        info!("Calibration button pressed");
        trigger.request();
    }
}
