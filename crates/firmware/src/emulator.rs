//! Host emulator sinks.
//!
//! Stand-ins for the speaker and LEDs that report through `tracing` instead
//! of driving pins: PWM writes at `trace`, LED changes at `debug`. Pair them
//! with [`platform::MonotonicDelay`] for real-time playback or with
//! [`platform::mocks::MockDelay`] to run passes as fast as the host allows.

use core::convert::Infallible;

use platform::gpio::{Led, OutputPin, PinState, Polarity, RgbLeds};
use platform::PwmOutput;
use playback::Outputs;
use tracing::{debug, trace};

/// Speaker sink logging every compare value.
#[derive(Debug, Default)]
pub struct TracePwm {
    writes: u64,
    last: Option<u8>,
}

impl TracePwm {
    /// Fresh sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare writes so far.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Last compare value.
    pub fn last(&self) -> Option<u8> {
        self.last
    }
}

impl PwmOutput for TracePwm {
    type Error = Infallible;

    fn set_compare(&mut self, sample: u8) -> Result<(), Self::Error> {
        self.writes = self.writes.saturating_add(1);
        self.last = Some(sample);
        trace!(sample, n = self.writes, "pwm");
        Ok(())
    }
}

/// One LED pin logging its level changes.
#[derive(Debug)]
pub struct TracePin {
    led: Led,
    polarity: Polarity,
    state: PinState,
}

impl TracePin {
    /// Dark pin for `led` under `polarity`.
    pub fn new(led: Led, polarity: Polarity) -> Self {
        Self {
            led,
            polarity,
            state: polarity.level(false),
        }
    }

    /// Current pin level.
    pub fn state(&self) -> PinState {
        self.state
    }

    /// `true` if the LED is lit.
    pub fn is_lit(&self) -> bool {
        self.state == self.polarity.level(true)
    }

    fn set(&mut self, state: PinState) {
        self.state = state;
        debug!(led = self.led.name(), lit = self.is_lit(), "led");
    }
}

impl OutputPin for TracePin {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(PinState::High);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(PinState::Low);
        Ok(())
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        let next = match self.state {
            PinState::High => PinState::Low,
            PinState::Low => PinState::High,
        };
        self.set(next);
        Ok(())
    }
}

/// Emulated LED bank.
pub type TraceLeds = RgbLeds<TracePin, TracePin, TracePin>;

/// Emulated board with delay source `D`.
pub type EmulatorOutputs<D> = Outputs<TracePwm, TraceLeds, D>;

/// Dark LED bank under `polarity`.
pub fn trace_leds(polarity: Polarity) -> TraceLeds {
    RgbLeds::new(
        TracePin::new(Led::Red, polarity),
        TracePin::new(Led::Green, polarity),
        TracePin::new(Led::Blue, polarity),
        polarity,
    )
}

/// Emulated board around `delay`.
pub fn emulator_outputs<D>(delay: D, polarity: Polarity) -> EmulatorOutputs<D> {
    Outputs::new(TracePwm::new(), trace_leds(polarity), delay)
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
