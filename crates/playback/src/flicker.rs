//! LED flicker rules applied at each waveform wraparound.

use platform::audio_types::PitchRate;

/// Which LEDs flip when the waveform index wraps back to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WrapToggles {
    /// Flip the red LED
    pub red: bool,
    /// Flip the green LED
    pub green: bool,
}

impl WrapToggles {
    /// Neither LED flips.
    pub const NONE: Self = Self {
        red: false,
        green: false,
    };

    /// `true` if at least one LED flips.
    #[must_use]
    pub const fn any(self) -> bool {
        self.red || self.green
    }
}

/// Flicker decision for one wraparound at `rate`.
///
/// - red: rate is a multiple of 50 or of 20
/// - green: rate is a multiple of 40 or of 10
///
/// The conditions overlap (every multiple of 40 is a multiple of 10, every
/// multiple of 20 is a multiple of 10) and must stay that way: the irregular,
/// pitch-correlated flicker is the intended look.
#[must_use]
pub const fn wrap_toggles(rate: PitchRate) -> WrapToggles {
    WrapToggles {
        red: rate.is_multiple_of(50) || rate.is_multiple_of(20),
        green: rate.is_multiple_of(40) || rate.is_multiple_of(10),
    }
}
