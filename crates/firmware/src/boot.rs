//! Board bring-up for the STM32H743ZI Nucleo-144.
//!
//! Initialization order:
//!   1. RCC: HSI -> PLL1 -> 400 MHz SYSCLK (fixes the TIM3 kernel clock)
//!   2. Embassy init: TIM2 time driver at 1 MHz
//!   3. LED pins as push-pull outputs, dark
//!   4. TIM3 CH1 PWM on PA6 at the speaker carrier
//!   5. Startup blink
//!   6. IWDG armed, petted once per pass
//!   7. Sequencer loop
//!
//! Everything here except [`build_embassy_config`] is plain data so the pin
//! map and timing budget are checked by host tests.

use platform::delay::ONE_SEC;
use platform::gpio::{Led, Polarity};
use playback::{BlinkPattern, Song};

use crate::audio::clock_math::{CARRIER_HZ, TIM3_CLOCK_HZ};

/// Ordered boot steps, logged at startup and checked by tests.
pub const BOOT_SEQUENCE_STEPS: &[&str] = &[
    "1. RCC: PLL1 400 MHz SYSCLK, APB1 timers at 200 MHz",
    "2. Embassy: init HAL, TIM2 time driver at 1 MHz",
    "3. GPIO: LEDs PB14/PB0/PE1 push-pull, dark",
    "4. PWM: TIM3 CH1 on PA6, edge-aligned, sample 0",
    "5. Blink: startup indication on all LEDs",
    "6. IWDG: arm watchdog, pet once per pass",
    "7. Sequencer: play passes forever",
];

/// One board signal and where it is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    /// What the pin carries
    pub signal: &'static str,
    /// MCU pin name
    pub pin: &'static str,
    /// Peripheral driving it
    pub peripheral: &'static str,
}

/// Speaker output: PA6, TIM3 channel 1 (Arduino header D12).
pub const SPEAKER_PIN: PinAssignment = PinAssignment {
    signal: "speaker",
    pin: "PA6",
    peripheral: "TIM3_CH1",
};

/// Red LED: LD3.
pub const RED_LED_PIN: PinAssignment = PinAssignment {
    signal: "red",
    pin: "PB14",
    peripheral: "GPIO",
};

/// Green LED: LD1.
pub const GREEN_LED_PIN: PinAssignment = PinAssignment {
    signal: "green",
    pin: "PB0",
    peripheral: "GPIO",
};

/// Blue indicator: LD2 (yellow on the Nucleo board).
pub const BLUE_LED_PIN: PinAssignment = PinAssignment {
    signal: "blue",
    pin: "PE1",
    peripheral: "GPIO",
};

/// Every signal the firmware drives.
pub const PIN_MAP: [PinAssignment; 4] = [SPEAKER_PIN, RED_LED_PIN, GREEN_LED_PIN, BLUE_LED_PIN];

/// Pin assignment of an indicator LED.
pub const fn led_pin(led: Led) -> PinAssignment {
    match led {
        Led::Red => RED_LED_PIN,
        Led::Green => GREEN_LED_PIN,
        Led::Blue => BLUE_LED_PIN,
    }
}

/// Nucleo user LEDs sit between the pin and ground.
///
/// The capsule board wires its LEDs to the supply rail instead; build for it
/// with [`Polarity::ActiveLow`].
pub const LED_POLARITY: Polarity = Polarity::ActiveHigh;

/// Power-on indication: 1 s of 100 ms flashes with 150 ms gaps.
pub const STARTUP_BLINK: BlinkPattern = BlinkPattern::new(ONE_SEC, 1_000, 1_500);

/// LSI clock feeding the IWDG (Hz).
pub const LSI_HZ: u32 = 32_000;

/// Longest IWDG timeout: prescaler 256, 12-bit reload (microseconds).
#[allow(clippy::cast_possible_truncation)] // 32_768_000 fits in u32
pub const IWDG_MAX_TIMEOUT_US: u32 = match (256u64 * 4096 * 1_000_000).checked_div(LSI_HZ as u64) {
    Some(us) => us as u32,
    None => 0,
};

/// IWDG timeout. The watchdog is fed once per pass, so this must exceed
/// the longest pass.
pub const WATCHDOG_TIMEOUT_US: u32 = 30_000_000;

/// `true` if one pass of `song` finishes within the watchdog timeout.
///
/// Sample delays dominate a pass; LED and PWM writes take well under a
/// microsecond each, so [`Song::pass_time_nanos`] is the budget that counts.
pub fn pass_fits_watchdog(song: &Song<'_>) -> bool {
    song.pass_time_nanos() < u64::from(WATCHDOG_TIMEOUT_US).saturating_mul(1_000)
}

/// Timer kernel clock and resulting carrier, for the boot log.
pub const fn pwm_clocks() -> (u32, u32) {
    (TIM3_CLOCK_HZ, CARRIER_HZ)
}

// ── RCC clock configuration ───────────────────────────────────────────────────

/// Build the `embassy_stm32::Config` with the clock tree of
/// [`crate::audio::clock_math`].
///
/// # Clock Tree (HSI -> 400 MHz core)
///
/// HSI (64 MHz) -> PLL1 (prediv=4, mul=50) -> PLL1_P = 400 MHz (sys)
/// AHB prescaler: DIV2 -> 200 MHz
/// APB1/2/3/4:    DIV2 -> 100 MHz (timers x2 = 200 MHz)
///
/// Always pass this to `embassy_stm32::init`; `Config::default()` runs the
/// core from raw HSI and TIM3 would miss the carrier.
#[cfg(feature = "hardware")]
pub fn build_embassy_config() -> embassy_stm32::Config {
    use embassy_stm32::rcc::*;

    let mut config = embassy_stm32::Config::default();

    config.rcc.hsi = Some(HSIPrescaler::DIV1);
    config.rcc.csi = true;

    config.rcc.pll1 = Some(Pll {
        source: PllSource::HSI,
        prediv: PllPreDiv::DIV4,
        mul: PllMul::MUL50,
        divp: Some(PllDiv::DIV2), // 400 MHz - system clock
        divq: None,
        divr: None,
    });

    config.rcc.sys = Sysclk::PLL1_P;
    config.rcc.ahb_pre = AHBPrescaler::DIV2;
    config.rcc.apb1_pre = APBPrescaler::DIV2;
    config.rcc.apb2_pre = APBPrescaler::DIV2;
    config.rcc.apb3_pre = APBPrescaler::DIV2;
    config.rcc.apb4_pre = APBPrescaler::DIV2;
    config.rcc.voltage_scale = VoltageScale::Scale1;

    config
}

// ─── Tests ────────────────────────────────────────────────────────────────────
