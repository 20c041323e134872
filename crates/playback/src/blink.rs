//! Whole-bank LED blinking.
//!
//! Used outside the tone loop (the firmware blinks once at power-on). Inside
//! the loop LEDs are toggled inline by the sequencer instead.

use platform::delay::DelayUnits;
use platform::gpio::LedBank;

use crate::PlaybackError;

/// On/off blink timing, every field in tenths of a millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkPattern {
    /// Total time budget
    pub total: u32,
    /// Time all LEDs are lit per period
    pub on: u32,
    /// Time all LEDs are dark per period
    pub off: u32,
}

impl BlinkPattern {
    /// Build a pattern.
    #[must_use]
    pub const fn new(total: u32, on: u32, off: u32) -> Self {
        Self { total, on, off }
    }

    /// Length of one on+off period.
    #[must_use]
    pub const fn period(&self) -> u32 {
        self.on.saturating_add(self.off)
    }

    /// Whole periods that fit in `total`.
    ///
    /// A remainder shorter than one period is dropped; a zero-length period
    /// plays nothing.
    #[must_use]
    pub const fn periods(&self) -> u32 {
        match self.total.checked_div(self.period()) {
            Some(n) => n,
            None => 0,
        }
    }
}

/// Blink every LED of `leds` according to `pattern`.
///
/// Each period lights the bank for `on` then clears it for `off`. Blocks for
/// `periods() * period()` tenths of a millisecond.
///
/// # Errors
///
/// [`PlaybackError::Leds`] if an LED write fails; blinking stops there.
pub fn blink_leds<L, D>(
    leds: &mut L,
    delay: &mut D,
    pattern: BlinkPattern,
) -> Result<(), PlaybackError>
where
    L: LedBank,
    D: DelayUnits,
{
    for _ in 0..pattern.periods() {
        leds.set_all(true).map_err(|_| PlaybackError::Leds)?;
        delay.delay_tenth_ms(pattern.on);
        leds.set_all(false).map_err(|_| PlaybackError::Leds)?;
        delay.delay_tenth_ms(pattern.off);
    }
    Ok(())
}
