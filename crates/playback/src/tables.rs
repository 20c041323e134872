//! Waveform and pitch tables.
//!
//! A [`Song`] pairs one cycle of waveform samples with a sentinel-terminated
//! pitch table. Both live in flash as `static` data; a `Song` only borrows
//! them, so nothing is copied per access.

use platform::audio_types::PitchRate;
use platform::delay::{delay_nanos, SAMP};
use thiserror::Error;

/// One pitch-table record: play the waveform at `pitch` for `duration` samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PitchEntry {
    /// Per-sample delay in [`SAMP`] units; 0 ends the table.
    pub pitch: u8,
    /// Number of samples to emit.
    pub duration: u16,
}

impl PitchEntry {
    /// The terminating record. Never played.
    pub const SENTINEL: Self = Self::new(0, 0);

    /// Build a record.
    #[must_use]
    pub const fn new(pitch: u8, duration: u16) -> Self {
        Self { pitch, duration }
    }

    /// `true` for the end-of-table marker (pitch 0, any duration).
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        self.pitch == 0
    }

    /// Playback rate, `None` for the sentinel.
    #[must_use]
    pub const fn rate(&self) -> Option<PitchRate> {
        PitchRate::new(self.pitch)
    }

    /// Delay between two samples of this entry, in nanoseconds.
    #[must_use]
    pub const fn sample_nanos(&self) -> u64 {
        delay_nanos(self.pitch as u32, SAMP)
    }

    /// Time spent in sample delays while playing this entry, in nanoseconds.
    ///
    /// Lower notes (larger `pitch`) take longer for the same `duration`.
    #[must_use]
    pub const fn play_time_nanos(&self) -> u64 {
        self.sample_nanos().saturating_mul(self.duration as u64)
    }
}

/// Reasons a pair of tables cannot be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// The waveform has no samples.
    #[error("waveform table is empty")]
    EmptyWaveform,
    /// No pitch record has pitch 0.
    #[error("pitch table has no sentinel entry")]
    MissingSentinel,
}

/// A validated waveform + pitch table pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Song<'a> {
    wave: &'a [u8],
    pitches: &'a [PitchEntry],
    playable: usize,
}

impl<'a> Song<'a> {
    /// Pair a waveform with a pitch table.
    ///
    /// Usable in `const` items so built-in tables are checked at compile time.
    ///
    /// # Errors
    ///
    /// [`TableError::EmptyWaveform`] if `wave` is empty,
    /// [`TableError::MissingSentinel`] if no entry of `pitches` has pitch 0.
    // slice::get is not const; the loop bound keeps `i` in range
    #[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
    pub const fn new(wave: &'a [u8], pitches: &'a [PitchEntry]) -> Result<Self, TableError> {
        if wave.is_empty() {
            return Err(TableError::EmptyWaveform);
        }
        let mut i = 0;
        while i < pitches.len() {
            if pitches[i].is_sentinel() {
                return Ok(Self {
                    wave,
                    pitches,
                    playable: i,
                });
            }
            i += 1;
        }
        Err(TableError::MissingSentinel)
    }

    /// Waveform samples.
    #[must_use]
    pub const fn wave(&self) -> &'a [u8] {
        self.wave
    }

    /// Number of samples in one waveform cycle.
    #[must_use]
    pub const fn wave_len(&self) -> usize {
        self.wave.len()
    }

    /// The full pitch table, sentinel and anything after it included.
    #[must_use]
    pub const fn pitches(&self) -> &'a [PitchEntry] {
        self.pitches
    }

    /// Entry at `index`, `None` at or past the sentinel.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<PitchEntry> {
        if index < self.playable {
            self.pitches.get(index).copied()
        } else {
            None
        }
    }

    /// Entries played in one pass (everything before the first sentinel).
    pub fn entries(&self) -> impl Iterator<Item = PitchEntry> + 'a {
        self.pitches.iter().take(self.playable).copied()
    }

    /// Number of entries played in one pass; also the sentinel's index.
    #[must_use]
    pub const fn playable_len(&self) -> usize {
        self.playable
    }

    /// Samples emitted in one pass.
    #[must_use]
    pub fn pass_samples(&self) -> u64 {
        self.entries()
            .map(|entry| u64::from(entry.duration))
            .fold(0, u64::saturating_add)
    }

    /// Waveform wraparounds in one pass.
    ///
    /// The waveform index carries over between entries and only resets at the
    /// start of a pass, so this is the pass sample count over the cycle length.
    #[must_use]
    pub fn pass_wraps(&self) -> u64 {
        let len = u64::try_from(self.wave_len()).unwrap_or(u64::MAX);
        self.pass_samples().checked_div(len).unwrap_or(0)
    }

    /// Time spent in sample delays over one pass, in nanoseconds.
    #[must_use]
    pub fn pass_time_nanos(&self) -> u64 {
        self.entries()
            .map(|entry| entry.play_time_nanos())
            .fold(0, u64::saturating_add)
    }
}
