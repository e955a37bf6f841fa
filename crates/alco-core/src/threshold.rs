//! Alert threshold storage

/// Holds the current alert threshold.
///
/// Only calibration writes it. Any value is accepted as-is: a very clean or
/// very polluted calibration environment can push it negative or beyond
/// [`MAX_ADC`](crate::MAX_ADC), which makes the alert permanently on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdStore {
    value: i32,
}

impl ThresholdStore {
    pub const fn new(initial: i32) -> Self {
        Self { value: initial }
    }

    #[inline]
    pub const fn get(&self) -> i32 {
        self.value
    }

    #[inline]
    pub fn set(&mut self, value: i32) {
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_any_value() {
        let mut store = ThresholdStore::new(400);
        assert_eq!(store.get(), 400);

        store.set(-25);
        assert_eq!(store.get(), -25);

        store.set(5000);
        assert_eq!(store.get(), 5000);
    }
}
