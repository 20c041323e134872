//! TIM3 PWM carrier calculations for the speaker output.
//!
//! The tone is an 8-bit sample stream written to a PWM compare register. The
//! reference 8-bit timer ran straight off a 9.6 MHz oscillator, so the counter
//! rolled over at 37.5 kHz. TIM3 is reproduced at the same carrier and the
//! sample is scaled onto its wider period.
//!
//! # Clock Tree
//!
//!   HSI (64 MHz) -> PLL1M (div 4) -> VCO_IN (16 MHz)
//!                                  -> VCO_OUT (x50 = 800 MHz)
//!                                    -> PLL1P (div 2) = 400 MHz  SYSCLK
//!                                       -> AHB (div 2) = 200 MHz
//!                                          -> APB1 (div 2) = 100 MHz
//!                                             -> TIM3 kernel (x2) = 200 MHz
//!
//! RM0433 S8.5.11: timers on an APB bus with a prescaler other than 1 are
//! clocked at twice the bus frequency.
//!
//! # Carrier
//!
//!   period  = TIM3_CLOCK / CARRIER_TARGET = 200 000 000 / 37 500 = 5333
//!   carrier = 200 000 000 / 5333 = 37 502 Hz  (2 Hz above target)
//!
//! 5333 steps is a little over 12 bits of duty resolution, so every 8-bit
//! sample maps to a distinct duty.

use platform::pwm::{CompareOutput, PwmConfig, PwmMode, Prescaler};

/// HSI oscillator frequency (Hz).
pub const HSI_HZ: u32 = 64_000_000;

/// PLL1 M predivider (`PllPreDiv::DIV4`).
pub const PLL1_M: u32 = 4;

/// PLL1 N multiplier (`PllMul::MUL50`).
pub const PLL1_N: u32 = 50;

/// PLL1 P divider (`PllDiv::DIV2`).
pub const PLL1_P: u32 = 2;

/// System clock: 400 MHz.
pub const SYSCLK_HZ: u32 = HSI_HZ / PLL1_M * PLL1_N / PLL1_P;

/// AHB prescaler (`AHBPrescaler::DIV2`).
pub const AHB_DIV: u32 = 2;

/// APB1 prescaler (`APBPrescaler::DIV2`).
pub const APB1_DIV: u32 = 2;

/// TIM3 kernel clock: APB1 x2 because the APB1 prescaler is not 1.
pub const TIM3_CLOCK_HZ: u32 = SYSCLK_HZ / AHB_DIV / APB1_DIV * 2;

/// Clock of the reference 8-bit timer (internal RC oscillator, no prescaler).
pub const REFERENCE_CLOCK_HZ: u32 = 9_600_000;

/// Carrier of the reference 8-bit fast PWM: 37.5 kHz.
pub const REFERENCE_CARRIER_HZ: u32 = PwmConfig::AUDIO_8_BIT.carrier_hz(REFERENCE_CLOCK_HZ);

/// Carrier TIM3 is configured for.
pub const CARRIER_TARGET_HZ: u32 = REFERENCE_CARRIER_HZ;

/// Timer period (ARR + 1) giving `carrier_hz` from `timer_clock_hz`.
///
/// Zero when `carrier_hz` is zero.
#[must_use]
pub const fn timer_period(timer_clock_hz: u32, carrier_hz: u32) -> u32 {
    match timer_clock_hz.checked_div(carrier_hz) {
        Some(period) => period,
        None => 0,
    }
}

/// TIM3 period in counter steps.
pub const PWM_PERIOD: u32 = timer_period(TIM3_CLOCK_HZ, CARRIER_TARGET_HZ);

/// Speaker timer setup: edge-aligned, cleared on compare match, no prescaler.
// PWM_PERIOD is checked to fit 16 bits in tests
#[allow(clippy::cast_possible_truncation)]
pub const SPEAKER_PWM: PwmConfig = PwmConfig {
    mode: PwmMode::Fast,
    compare_output: CompareOutput::ClearOnMatch,
    prescaler: Prescaler::Div1,
    top: (PWM_PERIOD - 1) as u16,
};

/// Carrier TIM3 actually produces.
pub const CARRIER_HZ: u32 = SPEAKER_PWM.carrier_hz(TIM3_CLOCK_HZ);

/// Maximum allowed carrier error (Hz). 0.1 % of the target.
pub const CARRIER_MAX_ERROR_HZ: u32 = 38;

/// Whole bits of duty resolution at `period` steps.
#[must_use]
pub const fn duty_resolution_bits(period: u32) -> u32 {
    match period.checked_ilog2() {
        Some(bits) => bits,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RM0433 S8.7.14: VCO input must be in range 1-16 MHz.
    #[test]
    fn pll1_m_divider_gives_valid_vco_input() {
        let vco_input = HSI_HZ / PLL1_M;
        assert!((1_000_000..=16_000_000).contains(&vco_input), "VCO input {vco_input} Hz");
    }

    /// RM0433 S8.7.14: wide-range VCO output must be in range 192-836 MHz.
    #[test]
    fn pll1_n_gives_valid_vco_output() {
        let vco_output = HSI_HZ / PLL1_M * PLL1_N;
        assert!(
            (192_000_000..=836_000_000).contains(&vco_output),
            "VCO output {vco_output} Hz"
        );
    }

    #[test]
    fn sysclk_is_400mhz() {
        assert_eq!(SYSCLK_HZ, 400_000_000);
        assert_eq!(TIM3_CLOCK_HZ, 200_000_000);
    }

    #[test]
    fn reference_carrier_is_37_5_khz() {
        assert_eq!(REFERENCE_CARRIER_HZ, 37_500);
    }

    /// TIM3 is a 16-bit timer: ARR must fit.
    #[test]
    fn period_fits_16_bit_timer() {
        assert!(PWM_PERIOD >= 2);
        assert!(PWM_PERIOD <= 0x1_0000, "period {PWM_PERIOD} overflows ARR");
        assert_eq!(u32::from(SPEAKER_PWM.top) + 1, PWM_PERIOD);
    }

    #[test]
    fn carrier_within_tolerance() {
        let diff = i64::from(CARRIER_HZ) - i64::from(CARRIER_TARGET_HZ);
        assert!(
            diff.unsigned_abs() <= u64::from(CARRIER_MAX_ERROR_HZ),
            "carrier {CARRIER_HZ} Hz differs from {CARRIER_TARGET_HZ} Hz by {diff} Hz"
        );
        assert_eq!(CARRIER_HZ, 37_502);
    }

    /// Every 8-bit sample must land on its own duty step.
    #[test]
    fn at_least_eight_bits_of_duty_resolution() {
        assert!(duty_resolution_bits(PWM_PERIOD) >= 8);
        assert_eq!(duty_resolution_bits(PWM_PERIOD), 12);
    }

    /// The carrier must stay above the audible band.
    #[test]
    fn carrier_is_ultrasonic() {
        assert!(CARRIER_HZ > 20_000);
    }

    #[test]
    fn zero_carrier_gives_zero_period() {
        assert_eq!(timer_period(TIM3_CLOCK_HZ, 0), 0);
        assert_eq!(duty_resolution_bits(0), 0);
    }
}
