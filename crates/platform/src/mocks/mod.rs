//! Mock implementations for testing
//!
//! Recording stand-ins for every platform output trait, for use in unit and
//! integration tests of the sequencer.

#![cfg(any(test, feature = "std"))]

use crate::delay::{delay_nanos, DelayUnits};
use crate::gpio::{OutputPin, PinState};
use crate::pwm::PwmOutput;

/// Number of compare writes kept in [`MockPwm::history`].
pub const PWM_HISTORY: usize = 4096;

/// Mock PWM output
pub struct MockPwm {
    writes: usize,
    last: Option<u8>,
    history: heapless::Vec<u8, PWM_HISTORY>,
}

impl MockPwm {
    /// Create new mock PWM output
    pub fn new() -> Self {
        Self {
            writes: 0,
            last: None,
            history: heapless::Vec::new(),
        }
    }

    /// Total compare writes
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Last compare value written
    pub fn last(&self) -> Option<u8> {
        self.last
    }

    /// First [`PWM_HISTORY`] compare values written
    pub fn history(&self) -> &[u8] {
        &self.history
    }

    /// Forget everything written so far
    pub fn clear(&mut self) {
        self.writes = 0;
        self.last = None;
        self.history.clear();
    }
}

impl Default for MockPwm {
    fn default() -> Self {
        Self::new()
    }
}

impl PwmOutput for MockPwm {
    type Error = core::convert::Infallible;

    fn set_compare(&mut self, sample: u8) -> Result<(), Self::Error> {
        self.writes = self.writes.saturating_add(1);
        self.last = Some(sample);
        // Store writes for verification
        if self.history.len() < self.history.capacity() {
            let _ = self.history.push(sample);
        }
        Ok(())
    }
}

/// Mock output pin
pub struct MockPin {
    state: PinState,
    toggles: usize,
    writes: usize,
}

impl MockPin {
    /// Create new mock pin, initially low
    pub fn new() -> Self {
        Self {
            state: PinState::Low,
            toggles: 0,
            writes: 0,
        }
    }

    /// Current level
    pub fn state(&self) -> PinState {
        self.state
    }

    /// Number of toggles
    pub fn toggles(&self) -> usize {
        self.toggles
    }

    /// Number of explicit high/low writes
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Default for MockPin {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPin for MockPin {
    type Error = core::convert::Infallible;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.writes = self.writes.saturating_add(1);
        self.state = PinState::High;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.writes = self.writes.saturating_add(1);
        self.state = PinState::Low;
        Ok(())
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.toggles = self.toggles.saturating_add(1);
        self.state = match self.state {
            PinState::High => PinState::Low,
            PinState::Low => PinState::High,
        };
        Ok(())
    }
}

/// Mock delay: records requested waits without blocking
pub struct MockDelay {
    calls: usize,
    total_nanos: u64,
    last: Option<(u32, u32)>,
}

impl MockDelay {
    /// Create new mock delay
    pub fn new() -> Self {
        Self {
            calls: 0,
            total_nanos: 0,
            last: None,
        }
    }

    /// Number of delay requests
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Sum of requested delays under the calibrated timing model
    pub fn total_nanos(&self) -> u64 {
        self.total_nanos
    }

    /// Last `(units, ticks_per_unit)` requested
    pub fn last(&self) -> Option<(u32, u32)> {
        self.last
    }
}

impl Default for MockDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayUnits for MockDelay {
    fn delay_units(&mut self, units: u32, ticks_per_unit: u32) {
        self.calls = self.calls.saturating_add(1);
        self.total_nanos = self
            .total_nanos
            .saturating_add(delay_nanos(units, ticks_per_unit));
        self.last = Some((units, ticks_per_unit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::{SAMP, TENTH_MS};

    #[test]
    fn test_mock_pwm() {
        let mut pwm = MockPwm::new();

        pwm.set_compare(0x8a).unwrap();
        pwm.set_compare(0xb1).unwrap();
        assert_eq!(pwm.writes(), 2);
        assert_eq!(pwm.last(), Some(0xb1));
        assert_eq!(pwm.history(), &[0x8a, 0xb1]);

        pwm.clear();
        assert_eq!(pwm.writes(), 0);
        assert!(pwm.history().is_empty());
    }

    #[test]
    fn test_mock_pin() {
        let mut pin = MockPin::new();
        assert_eq!(pin.state(), PinState::Low);

        pin.toggle().unwrap();
        assert_eq!(pin.state(), PinState::High);
        pin.toggle().unwrap();
        assert_eq!(pin.state(), PinState::Low);
        assert_eq!(pin.toggles(), 2);

        pin.set_state(PinState::High).unwrap();
        assert_eq!(pin.writes(), 1);
        assert_eq!(pin.toggles(), 2);
    }

    #[test]
    fn test_mock_delay() {
        let mut delay = MockDelay::new();

        delay.delay_units(10, TENTH_MS);
        delay.delay_units(100, SAMP);
        assert_eq!(delay.calls(), 2);
        assert_eq!(delay.last(), Some((100, SAMP)));
        assert_eq!(
            delay.total_nanos(),
            delay_nanos(10, TENTH_MS) + delay_nanos(100, SAMP)
        );
    }
}
