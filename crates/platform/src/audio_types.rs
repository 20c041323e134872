//! Audio domain newtypes for compile-time safety.
//!
//! These zero-cost abstractions prevent common errors:
//! - `PitchRate`: playback rate 1–255, zero is reserved for the table sentinel
//! - `scale_sample`: maps an 8-bit waveform sample onto a wider PWM period

use core::num::NonZeroU8;

use thiserror::Error;

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("value {value} outside {min}..={max}")]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

// ── PitchRate ────────────────────────────────────────────────────────────────

/// Waveform playback rate read from a pitch-table entry.
///
/// The rate is the per-sample delay in units of the sample tick
/// ([`crate::delay::SAMP`]), so a *smaller* rate replays the waveform faster
/// and sounds *higher*. Zero is not a rate: it marks the end of a pitch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PitchRate(NonZeroU8);

impl PitchRate {
    /// Highest pitch (fastest playback).
    pub const FASTEST: Self = Self(NonZeroU8::MIN);

    /// Lowest pitch (slowest playback).
    pub const SLOWEST: Self = Self(NonZeroU8::MAX);

    /// Create a `PitchRate`, returning `None` for the sentinel value 0.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        match NonZeroU8::new(value) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Create a `PitchRate`, returning an error for 0.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value == 0`.
    pub fn try_new(value: u8) -> Result<Self, OutOfRangeError> {
        Self::new(value).ok_or(OutOfRangeError {
            value: u32::from(value),
            min: 1,
            max: 255,
        })
    }

    /// Return the raw rate (1–255).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// `true` if the rate is a whole multiple of `divisor`.
    ///
    /// A zero divisor never divides anything.
    #[must_use]
    pub const fn is_multiple_of(self, divisor: u8) -> bool {
        match self.0.get().checked_rem(divisor) {
            Some(rem) => rem == 0,
            None => false,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PitchRate {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PitchRate({=u8})", self.get());
    }
}

// ── PWM sample scaling ───────────────────────────────────────────────────────

/// Full-scale value of a waveform sample.
pub const SAMPLE_FULL_SCALE: u8 = u8::MAX;

/// Map an 8-bit waveform sample onto a PWM compare value in `0..=max_duty`.
///
/// On an 8-bit timer (`max_duty == 255`) this is the identity: the sample *is*
/// the compare value. Wider timers scale linearly so 0 stays fully off and
/// 255 reaches `max_duty`.
///
/// Formula: `duty = sample * max_duty / 255`
#[must_use]
pub fn scale_sample(sample: u8, max_duty: u16) -> u16 {
    // u8 * u16 fits in u32 (max 255 * 65535 = 16_711_425)
    let scaled = u32::from(sample)
        .saturating_mul(u32::from(max_duty))
        .checked_div(u32::from(SAMPLE_FULL_SCALE))
        .unwrap_or(0);
    u16::try_from(scaled).unwrap_or(max_duty)
}
