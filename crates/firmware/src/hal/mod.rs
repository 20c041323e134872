//! Board adapters binding embassy-stm32 peripherals to the platform traits.
//!
//! The sequencer only sees [`platform::PwmOutput`], [`platform::LedBank`] and
//! [`platform::DelayUnits`]. This module names the concrete types the
//! hardware binary plugs in, so `main.rs` stays a list of steps.

use platform::gpio::{PinState, Polarity};

use crate::boot::LED_POLARITY;

/// Pin level that leaves an LED dark under `polarity`.
pub const fn dark_level(polarity: Polarity) -> PinState {
    polarity.level(false)
}

/// Initial level for every LED pin on this board.
pub const LED_INITIAL_LEVEL: PinState = dark_level(LED_POLARITY);

#[cfg(feature = "hardware")]
pub use hardware::*;

#[cfg(feature = "hardware")]
mod hardware {
    use embassy_stm32::gpio::{AnyPin, Level, Output, Pin, Speed};
    use platform::gpio::{HalPin, PinState, RgbLeds};
    use platform::{MonotonicDelay, Polarity};
    use playback::Outputs;

    use crate::audio::SpeakerPwm;

    /// One LED output pin.
    pub type LedPin<'d> = HalPin<Output<'d, AnyPin>>;

    /// The red/green/blue bank.
    pub type BoardLeds<'d> = RgbLeds<LedPin<'d>, LedPin<'d>, LedPin<'d>>;

    /// Everything the sequencer drives on this board.
    pub type BoardOutputs<'d> = Outputs<SpeakerPwm<'d>, BoardLeds<'d>, MonotonicDelay>;

    const fn level(state: PinState) -> Level {
        match state {
            PinState::High => Level::High,
            PinState::Low => Level::Low,
        }
    }

    /// Configure an LED pin as a slow push-pull output at `initial`.
    pub fn led_pin<P: Pin>(pin: P, initial: PinState) -> LedPin<'static> {
        HalPin(Output::new(pin, level(initial), Speed::Low).degrade())
    }

    /// Bundle the three LED pins into a bank.
    pub fn board_leds(
        red: LedPin<'static>,
        green: LedPin<'static>,
        blue: LedPin<'static>,
        polarity: Polarity,
    ) -> BoardLeds<'static> {
        RgbLeds::new(red, green, blue, polarity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_high_board_starts_low() {
        assert_eq!(dark_level(Polarity::ActiveHigh), PinState::Low);
    }

    #[test]
    fn active_low_board_starts_high() {
        assert_eq!(dark_level(Polarity::ActiveLow), PinState::High);
    }

    #[test]
    fn nucleo_leds_start_dark() {
        assert_eq!(LED_INITIAL_LEVEL, PinState::Low);
    }
}
