//! GPIO and LED abstraction layer
//!
//! Provides output pin control and the tri-colour LED bank driven by the
//! sequencer.

/// Output pin operations
pub trait OutputPin {
    /// Error type
    type Error: core::fmt::Debug;

    /// Set pin high
    fn set_high(&mut self) -> Result<(), Self::Error>;

    /// Set pin low
    fn set_low(&mut self) -> Result<(), Self::Error>;

    /// Set pin state
    fn set_state(&mut self, state: PinState) -> Result<(), Self::Error> {
        match state {
            PinState::High => self.set_high(),
            PinState::Low => self.set_low(),
        }
    }

    /// Toggle pin state
    fn toggle(&mut self) -> Result<(), Self::Error>;
}

/// Pin state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// High (logic 1)
    High,
    /// Low (logic 0)
    Low,
}

impl From<bool> for PinState {
    fn from(value: bool) -> Self {
        if value {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl From<PinState> for bool {
    fn from(value: PinState) -> Self {
        matches!(value, PinState::High)
    }
}

/// Which pin level lights an LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// LED between pin and ground: high = lit.
    #[default]
    ActiveHigh,
    /// LED between supply and pin: low = lit.
    ActiveLow,
}

impl Polarity {
    /// Pin level that shows `lit`.
    #[must_use]
    pub const fn level(self, lit: bool) -> PinState {
        match (self, lit) {
            (Self::ActiveHigh, true) | (Self::ActiveLow, false) => PinState::High,
            (Self::ActiveHigh, false) | (Self::ActiveLow, true) => PinState::Low,
        }
    }
}

/// One of the three indicator LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Led {
    /// Red LED
    Red,
    /// Green LED
    Green,
    /// Blue LED
    Blue,
}

impl Led {
    /// All LEDs in bank order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Short name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

/// Bank of indicator LEDs switched together or one at a time.
pub trait LedBank {
    /// Error type
    type Error: core::fmt::Debug;

    /// Invert one LED.
    fn toggle(&mut self, led: Led) -> Result<(), Self::Error>;

    /// Light (`true`) or extinguish (`false`) every LED.
    fn set_all(&mut self, lit: bool) -> Result<(), Self::Error>;
}

impl<T: LedBank + ?Sized> LedBank for &mut T {
    type Error = T::Error;

    fn toggle(&mut self, led: Led) -> Result<(), Self::Error> {
        T::toggle(self, led)
    }

    fn set_all(&mut self, lit: bool) -> Result<(), Self::Error> {
        T::set_all(self, lit)
    }
}

/// Error from one pin of an [`RgbLeds`] bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RgbError<R, G, B> {
    /// Red pin failed
    Red(R),
    /// Green pin failed
    Green(G),
    /// Blue pin failed
    Blue(B),
}

impl<R, G, B> RgbError<R, G, B> {
    /// Which LED failed.
    pub fn led(&self) -> Led {
        match self {
            Self::Red(_) => Led::Red,
            Self::Green(_) => Led::Green,
            Self::Blue(_) => Led::Blue,
        }
    }
}

/// Three output pins wired as a red/green/blue LED bank.
pub struct RgbLeds<R, G, B> {
    red: R,
    green: G,
    blue: B,
    polarity: Polarity,
}

impl<R, G, B> RgbLeds<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    /// Bundle three pins sharing one polarity.
    pub fn new(red: R, green: G, blue: B, polarity: Polarity) -> Self {
        Self {
            red,
            green,
            blue,
            polarity,
        }
    }

    /// LED polarity of this bank.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Give the pins back.
    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }

    /// Borrow the pins.
    pub fn pins(&self) -> (&R, &G, &B) {
        (&self.red, &self.green, &self.blue)
    }
}

impl<R, G, B> LedBank for RgbLeds<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    type Error = RgbError<R::Error, G::Error, B::Error>;

    fn toggle(&mut self, led: Led) -> Result<(), Self::Error> {
        match led {
            Led::Red => self.red.toggle().map_err(RgbError::Red),
            Led::Green => self.green.toggle().map_err(RgbError::Green),
            Led::Blue => self.blue.toggle().map_err(RgbError::Blue),
        }
    }

    fn set_all(&mut self, lit: bool) -> Result<(), Self::Error> {
        let level = self.polarity.level(lit);
        self.red.set_state(level).map_err(RgbError::Red)?;
        self.green.set_state(level).map_err(RgbError::Green)?;
        self.blue.set_state(level).map_err(RgbError::Blue)
    }
}

/// Adapter from an `embedded-hal` stateful output pin.
///
/// HAL pins (embassy-stm32 `Output`, mocks from `embedded-hal-mock`) implement
/// the `embedded_hal::digital` traits; this wraps them as an [`OutputPin`].
pub struct HalPin<P>(pub P);

impl<P> OutputPin for HalPin<P>
where
    P: embedded_hal::digital::StatefulOutputPin,
{
    type Error = P::Error;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        embedded_hal::digital::OutputPin::set_high(&mut self.0)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        embedded_hal::digital::OutputPin::set_low(&mut self.0)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        embedded_hal::digital::StatefulOutputPin::toggle(&mut self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_low_inverts_level() {
        assert_eq!(Polarity::ActiveLow.level(true), PinState::Low);
        assert_eq!(Polarity::ActiveLow.level(false), PinState::High);
        assert_eq!(Polarity::ActiveHigh.level(true), PinState::High);
        assert_eq!(Polarity::ActiveHigh.level(false), PinState::Low);
    }

    #[test]
    fn pin_state_bool_round_trip() {
        assert!(bool::from(PinState::from(true)));
        assert!(!bool::from(PinState::from(false)));
    }

    #[test]
    fn rgb_bank_active_low_lights_with_low_level() {
        use crate::mocks::MockPin;

        let mut leds = RgbLeds::new(
            MockPin::new(),
            MockPin::new(),
            MockPin::new(),
            Polarity::ActiveLow,
        );
        leds.set_all(true).unwrap();
        let (r, g, b) = leds.pins();
        assert_eq!(r.state(), PinState::Low);
        assert_eq!(g.state(), PinState::Low);
        assert_eq!(b.state(), PinState::Low);

        leds.set_all(false).unwrap();
        let (r, g, b) = leds.pins();
        assert_eq!(r.state(), PinState::High);
        assert_eq!(g.state(), PinState::High);
        assert_eq!(b.state(), PinState::High);
    }

    #[test]
    fn rgb_bank_toggles_only_the_named_led() {
        use crate::mocks::MockPin;

        let mut leds = RgbLeds::new(
            MockPin::new(),
            MockPin::new(),
            MockPin::new(),
            Polarity::ActiveHigh,
        );
        leds.toggle(Led::Green).unwrap();
        leds.toggle(Led::Blue).unwrap();
        leds.toggle(Led::Blue).unwrap();

        let (r, g, b) = leds.release();
        assert_eq!(r.toggles(), 0);
        assert_eq!(g.toggles(), 1);
        assert_eq!(b.toggles(), 2);
    }
}
