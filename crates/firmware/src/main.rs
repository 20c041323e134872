//! Gumball Sound firmware - Main Entry Point
//!
//! Hardware-only entry point for STM32H743ZI.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::wdg::IndependentWatchdog;
use platform::config::{banner, APP_NAME, APP_VERSION};
use platform::MonotonicDelay;
use playback::{blink_leds, Outputs, Sequencer, GUMBALL};

use firmware::boot::{self, LED_POLARITY, PIN_MAP, STARTUP_BLINK, WATCHDOG_TIMEOUT_US};
use firmware::hal::{board_leds, led_pin, LED_INITIAL_LEVEL};
use firmware::SpeakerPwm;

use defmt_rtt as _;
use panic_probe as _;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    defmt::info!("{=str} v{=str}", APP_NAME, APP_VERSION);
    defmt::info!("{=str}", banner());
    for step in boot::BOOT_SEQUENCE_STEPS {
        defmt::debug!("boot: {=str}", *step);
    }

    // Step 1 + 2: clocks, then the HAL and the TIM2 time driver.
    let p = embassy_stm32::init(boot::build_embassy_config());

    for pin in PIN_MAP {
        defmt::info!("{=str} -> {=str} ({=str})", pin.signal, pin.pin, pin.peripheral);
    }

    // Step 3: LEDs dark before anything toggles them.
    let mut leds = board_leds(
        led_pin(p.PB14, LED_INITIAL_LEVEL),
        led_pin(p.PB0, LED_INITIAL_LEVEL),
        led_pin(p.PE1, LED_INITIAL_LEVEL),
        LED_POLARITY,
    );

    // Step 4: speaker carrier.
    let speaker = SpeakerPwm::new(p.TIM3, p.PA6);
    let (timer_hz, carrier_hz) = boot::pwm_clocks();
    defmt::info!(
        "PWM: TIM3 kernel {=u32} Hz, carrier {=u32} Hz, max duty {=u16}",
        timer_hz,
        carrier_hz,
        speaker.max_duty()
    );

    // Step 5: power-on blink.
    let mut delay = MonotonicDelay::new();
    if let Err(e) = blink_leds(&mut leds, &mut delay, STARTUP_BLINK) {
        defmt::warn!("startup blink failed: {}", e);
    }

    // Step 6: watchdog, fed once per pass.
    if !boot::pass_fits_watchdog(&GUMBALL) {
        defmt::warn!("one pass outlasts the {=u32} us watchdog", WATCHDOG_TIMEOUT_US);
    }
    let mut watchdog = IndependentWatchdog::new(p.IWDG1, WATCHDOG_TIMEOUT_US);
    watchdog.unleash();

    defmt::info!(
        "tune: {=usize} entries, {=u64} samples, ~{=u64} ms per pass",
        GUMBALL.playable_len(),
        GUMBALL.pass_samples(),
        GUMBALL.pass_time_nanos().saturating_div(1_000_000)
    );

    // Step 7: the sequencer never yields; nothing else runs on this executor.
    let mut outputs = Outputs::new(speaker, leds, delay);
    let mut sequencer = Sequencer::new(GUMBALL);
    let mut passes = 0u32;
    let result = sequencer.run_with(&mut outputs, |summary| {
        watchdog.pet();
        passes = passes.wrapping_add(1);
        defmt::info!(
            "pass {=u32}: {=u64} samples, {=u64} wraps, toggles r{=u64} g{=u64} b{=u64}",
            passes,
            summary.samples,
            summary.wraps,
            summary.red_toggles,
            summary.green_toggles,
            summary.blue_toggles
        );
    });

    // Only an output failure gets here; the HAL outputs are infallible.
    if let Err(e) = result {
        defmt::error!("playback stopped: {}", e);
    }
    loop {
        cortex_m::asm::wfi();
    }
}
