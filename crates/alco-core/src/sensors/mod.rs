//! Gas sensor abstraction
//!
//! The MQ-3 is a plain analog sensor: one ADC channel, one integer per read.
//! Platform adapters rescale their native ADC width to the 10-bit range the
//! thresholds are expressed in.

/// Largest value a [`GasSensor`] may return (10-bit ADC).
pub const MAX_ADC: u16 = 1023;

/// Trait for the analog gas sensor.
///
/// Reads never fail: an ADC one-shot conversion always yields the last
/// sampled voltage, so there is no error path and no retry.
pub trait GasSensor {
    /// Sample the sensor once. The result is in `0..=MAX_ADC`.
    fn read(&mut self) -> impl Future<Output = u16>;
}

/// Convert a 12-bit ADC sample to the 10-bit reference range.
#[inline]
pub const fn from_12_bit(raw: u16) -> u16 {
    let scaled = raw >> 2;
    if scaled > MAX_ADC { MAX_ADC } else { scaled }
}
