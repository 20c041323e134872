//! Busy-wait delay primitive
//!
//! The playback timing model counts delays in *units* of *ticks*. One tick is
//! one pass of the reference inner spin loop; [`TENTH_MS`] ticks make a unit
//! of 1/10 ms. Each unit spins `ticks + 1` iterations (the loop runs over
//! `0..=ticks`), so the model is:
//!
//! ```text
//! nanos = units * (ticks + 1) * 100_000 / (TENTH_MS + 1)
//! ```
//!
//! Cycle-counted spin loops are not portable across cores and clocks, so
//! [`MonotonicDelay`] realises the model with a monotonic-time wait instead.

use embassy_time::{block_for, Duration};

/// Ticks per unit that make one unit last 1/10 ms.
pub const TENTH_MS: u32 = 112;

/// Ticks per unit used between waveform samples.
pub const SAMP: u32 = 10;

/// Units of [`TENTH_MS`] that make one second.
pub const ONE_SEC: u32 = 10_000;

/// Nanoseconds taken by `TENTH_MS + 1` spin iterations.
const TENTH_MS_NANOS: u64 = 100_000;

/// Delay in nanoseconds for `units` repetitions of `ticks_per_unit` ticks.
///
/// Zero when `units == 0`; strictly increasing in both arguments otherwise.
/// Saturates at `u64::MAX` (unreachable for `u32` inputs).
#[must_use]
pub const fn delay_nanos(units: u32, ticks_per_unit: u32) -> u64 {
    let iterations = (units as u64).saturating_mul((ticks_per_unit as u64).saturating_add(1));
    match iterations
        .saturating_mul(TENTH_MS_NANOS)
        .checked_div(TENTH_MS as u64 + 1)
    {
        Some(nanos) => nanos,
        None => 0,
    }
}

/// Blocking delay counted in units of ticks.
///
/// Implementations must not return early and must not be elided by the
/// optimiser. There is no cancellation.
pub trait DelayUnits {
    /// Block for `units` repetitions of `ticks_per_unit` ticks.
    fn delay_units(&mut self, units: u32, ticks_per_unit: u32);

    /// Block for `units` tenths of a millisecond.
    fn delay_tenth_ms(&mut self, units: u32) {
        self.delay_units(units, TENTH_MS);
    }
}

impl<T: DelayUnits + ?Sized> DelayUnits for &mut T {
    fn delay_units(&mut self, units: u32, ticks_per_unit: u32) {
        T::delay_units(self, units, ticks_per_unit);
    }
}

/// [`DelayUnits`] backed by the embassy-time monotonic clock.
///
/// Spins on `embassy_time::Instant::now()` through [`block_for`]; it never
/// yields to the executor. Resolution is one embassy-time tick, so the firmware
/// runs the time driver at 1 MHz.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicDelay;

impl MonotonicDelay {
    /// Create a delay source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The `Duration` waited for `units` of `ticks_per_unit`.
    #[must_use]
    pub fn duration(units: u32, ticks_per_unit: u32) -> Duration {
        Duration::from_nanos(delay_nanos(units, ticks_per_unit))
    }
}

impl DelayUnits for MonotonicDelay {
    fn delay_units(&mut self, units: u32, ticks_per_unit: u32) {
        if units == 0 {
            return;
        }
        block_for(Self::duration(units, ticks_per_unit));
    }
}
