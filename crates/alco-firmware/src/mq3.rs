//! MQ-3 alcohol sensor on the ESP32-S3 ADC

use alco_core::GasSensor;
use alco_core::sensors::from_12_bit;
use esp_hal::Blocking;
use esp_hal::analog::adc::{Adc, AdcPin};
use esp_hal::peripherals::{ADC1, GPIO1};

/// ADC1 driver type used by the board
pub type SensorAdc = Adc<'static, ADC1<'static>, Blocking>;

/// ADC pin type the MQ-3 is wired to
pub type SensorPin = AdcPin<GPIO1<'static>, ADC1<'static>>;

/// One-shot ADC reads of the MQ-3 analog output.
///
/// The ESP32-S3 converts at 12 bits; readings are scaled down to the 10-bit
/// range the thresholds are defined in.
pub struct Mq3Sensor {
    adc: SensorAdc,
    pin: SensorPin,
}

impl Mq3Sensor {
    pub fn new(adc: SensorAdc, pin: SensorPin) -> Self {
        Self { adc, pin }
    }
}

impl GasSensor for Mq3Sensor {
    async fn read(&mut self) -> u16 {
        // A one-shot conversion takes a few microseconds; spin until it is done
        loop {
            if let Ok(raw) = self.adc.read_oneshot(&mut self.pin) {
                return from_12_bit(raw);
            }
        }
    }
}
