//! PWM audio output abstraction
//!
//! The speaker is driven by a free-running timer compared against a register
//! the firmware rewrites once per waveform sample. The average level of the
//! resulting square wave follows the sample value.

/// PWM output carrying the audio signal.
pub trait PwmOutput {
    /// Error type
    type Error: core::fmt::Debug;

    /// Write one 8-bit waveform sample to the compare register.
    fn set_compare(&mut self, sample: u8) -> Result<(), Self::Error>;
}

impl<T: PwmOutput + ?Sized> PwmOutput for &mut T {
    type Error = T::Error;

    fn set_compare(&mut self, sample: u8) -> Result<(), Self::Error> {
        T::set_compare(self, sample)
    }
}

/// Counter waveform generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmMode {
    /// Count bottom → top, wrap to bottom (edge-aligned, "fast" PWM).
    Fast,
    /// Count up then down (centre-aligned, phase-correct).
    PhaseCorrect,
}

/// What the compare match does to the output pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompareOutput {
    /// Clear on compare match, set at counter rollover (non-inverting).
    ClearOnMatch,
    /// Set on compare match, clear at counter rollover (inverting).
    SetOnMatch,
}

/// Timer clock prescaler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    /// Timer runs at the peripheral clock.
    Div1,
    /// Peripheral clock / 8.
    Div8,
    /// Peripheral clock / 64.
    Div64,
}

impl Prescaler {
    /// Division factor.
    #[must_use]
    pub const fn divisor(self) -> u32 {
        match self {
            Self::Div1 => 1,
            Self::Div8 => 8,
            Self::Div64 => 64,
        }
    }
}

/// Audio PWM timer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmConfig {
    /// Counter mode
    pub mode: PwmMode,
    /// Output behaviour on compare match
    pub compare_output: CompareOutput,
    /// Timer prescaler
    pub prescaler: Prescaler,
    /// Counter top value (period - 1)
    pub top: u16,
}

impl PwmConfig {
    /// Fast PWM, no prescaling, non-inverting, 8-bit counter.
    ///
    /// The sample value is the compare value directly.
    pub const AUDIO_8_BIT: Self = Self {
        mode: PwmMode::Fast,
        compare_output: CompareOutput::ClearOnMatch,
        prescaler: Prescaler::Div1,
        top: 0xFF,
    };

    /// Carrier (counter rollover) frequency for a given timer input clock.
    ///
    /// Fast mode: `clk / (prescaler * (top + 1))`.
    /// Phase-correct mode counts up and down, halving the rate.
    #[must_use]
    pub const fn carrier_hz(&self, timer_clock_hz: u32) -> u32 {
        let period = (self.top as u32)
            .saturating_add(1)
            .saturating_mul(self.prescaler.divisor());
        let fast = match timer_clock_hz.checked_div(period) {
            Some(hz) => hz,
            None => 0,
        };
        match self.mode {
            PwmMode::Fast => fast,
            PwmMode::PhaseCorrect => fast.saturating_div(2),
        }
    }
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self::AUDIO_8_BIT
    }
}
