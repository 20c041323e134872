//! Host emulator: play the gumball tune through tracing sinks.
//!
//! ```bash
//! cargo run -p firmware --example emulator --features emulator -- [PASSES] [--realtime]
//! ```
//!
//! Without `--realtime` sample delays are only accounted, not waited, so a
//! pass finishes in milliseconds. `RUST_LOG=debug` shows LED changes,
//! `RUST_LOG=trace` every PWM write.
#![allow(clippy::print_stdout)]

use std::process::ExitCode;

use firmware::boot::{LED_POLARITY, STARTUP_BLINK};
use firmware::emulator::{emulator_outputs, init_tracing, EmulatorOutputs};
use platform::config::{banner, APP_NAME, APP_VERSION};
use platform::delay::DelayUnits;
use platform::mocks::MockDelay;
use platform::MonotonicDelay;
use playback::{blink_leds, PlaybackError, Sequencer, GUMBALL};
use tracing::{error, info};

fn play<D: DelayUnits>(hw: &mut EmulatorOutputs<D>, passes: u32) -> Result<(), PlaybackError> {
    blink_leds(&mut hw.leds, &mut hw.delay, STARTUP_BLINK)?;
    info!(periods = STARTUP_BLINK.periods(), "startup blink done");

    let mut sequencer = Sequencer::new(GUMBALL);
    for pass in 1..=passes {
        let summary = sequencer.play_pass(hw)?;
        info!(
            pass,
            entries = summary.entries,
            samples = summary.samples,
            wraps = summary.wraps,
            red = summary.red_toggles,
            green = summary.green_toggles,
            blue = summary.blue_toggles,
            "pass complete"
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let mut passes = 1u32;
    let mut realtime = false;
    for arg in std::env::args().skip(1) {
        if arg == "--realtime" {
            realtime = true;
        } else if let Ok(n) = arg.parse() {
            passes = n;
        } else {
            error!(%arg, "expected a pass count or --realtime");
            return ExitCode::FAILURE;
        }
    }

    info!("{APP_NAME} v{APP_VERSION}: {}", banner());
    info!(
        entries = GUMBALL.playable_len(),
        samples = GUMBALL.pass_samples(),
        ms = GUMBALL.pass_time_nanos().saturating_div(1_000_000),
        "tune loaded"
    );

    let result = if realtime {
        play(&mut emulator_outputs(MonotonicDelay::new(), LED_POLARITY), passes)
    } else {
        let mut hw = emulator_outputs(MockDelay::new(), LED_POLARITY);
        let result = play(&mut hw, passes);
        info!(
            simulated_ms = hw.delay.total_nanos().saturating_div(1_000_000),
            pwm_writes = hw.speaker.writes(),
            "simulated run"
        );
        result
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "playback stopped");
            ExitCode::FAILURE
        }
    }
}
