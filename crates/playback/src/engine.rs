//! Tone sequencer.
//!
//! [`Sequencer`] walks a [`Song`]: for every pitch entry it emits `duration`
//! waveform samples to the PWM output, waiting `pitch` units of [`SAMP`]
//! between samples. LEDs flicker as a side effect of the walk:
//!
//! - red/green may flip each time the waveform index wraps to zero
//!   (see [`wrap_toggles`]);
//! - blue flips once after every entry.
//!
//! The sequencer owns only its cursor. Hardware is borrowed per call through
//! [`Outputs`], so host tests drive it with `platform::mocks` and the firmware
//! with the Embassy adapters.

use core::convert::Infallible;

use platform::audio_types::PitchRate;
use platform::delay::{DelayUnits, SAMP};
use platform::gpio::{Led, LedBank};
use platform::pwm::PwmOutput;

use crate::flicker::{wrap_toggles, WrapToggles};
use crate::tables::{PitchEntry, Song};
use crate::PlaybackError;

/// The three outputs the sequencer drives.
#[derive(Debug)]
pub struct Outputs<P, L, D> {
    /// Speaker PWM
    pub speaker: P,
    /// Indicator LEDs
    pub leds: L,
    /// Sample-rate delay
    pub delay: D,
}

impl<P, L, D> Outputs<P, L, D> {
    /// Bundle the outputs.
    pub const fn new(speaker: P, leds: L, delay: D) -> Self {
        Self {
            speaker,
            leds,
            delay,
        }
    }
}

/// Position within the waveform and the pitch table.
///
/// `wave_index` stays below the waveform length. `pitch_index` reaches the
/// sentinel's index only once the pass is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    /// Next waveform sample to emit
    pub wave_index: usize,
    /// Pitch entry being played
    pub pitch_index: usize,
}

/// What happened during one emitted sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleEvent {
    /// Compare value written
    pub sample: u8,
    /// The waveform index wrapped back to 0 after this sample
    pub wrapped: bool,
    /// LEDs flipped by the wrap (all false when `wrapped` is false)
    pub toggles: WrapToggles,
}

/// Outcome of one played pitch entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EntrySummary {
    /// The entry that was played
    pub entry: PitchEntry,
    /// Waveform wraparounds while playing it
    pub wraps: u32,
    /// Red flips while playing it
    pub red_toggles: u32,
    /// Green flips while playing it
    pub green_toggles: u32,
}

/// Counters for one full pass over the pitch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PassSummary {
    /// Entries played (sentinel excluded)
    pub entries: u32,
    /// Samples written to the PWM output
    pub samples: u64,
    /// Waveform wraparounds
    pub wraps: u64,
    /// Red flips
    pub red_toggles: u64,
    /// Green flips
    pub green_toggles: u64,
    /// Blue flips, one per entry
    pub blue_toggles: u64,
}

impl PassSummary {
    fn record(&mut self, played: &EntrySummary) {
        self.entries = self.entries.saturating_add(1);
        self.samples = self.samples.saturating_add(u64::from(played.entry.duration));
        self.wraps = self.wraps.saturating_add(u64::from(played.wraps));
        self.red_toggles = self.red_toggles.saturating_add(u64::from(played.red_toggles));
        self.green_toggles = self
            .green_toggles
            .saturating_add(u64::from(played.green_toggles));
        self.blue_toggles = self.blue_toggles.saturating_add(1);
    }
}

/// Plays a [`Song`] forever, one pass at a time.
#[derive(Debug, Clone)]
pub struct Sequencer<'a> {
    song: Song<'a>,
    cursor: Cursor,
}

impl<'a> Sequencer<'a> {
    /// Sequencer positioned at the start of `song`.
    #[must_use]
    pub const fn new(song: Song<'a>) -> Self {
        Self {
            song,
            cursor: Cursor {
                wave_index: 0,
                pitch_index: 0,
            },
        }
    }

    /// The song being played.
    #[must_use]
    pub const fn song(&self) -> &Song<'a> {
        &self.song
    }

    /// Rewind to the first sample of the first entry.
    pub fn reset(&mut self) {
        self.cursor = Cursor::default();
    }

    /// Current position.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Entry under the cursor, `None` once the sentinel is reached.
    #[must_use]
    pub fn current_entry(&self) -> Option<PitchEntry> {
        self.song.entry(self.cursor.pitch_index)
    }

    /// Emit one waveform sample at `rate`.
    ///
    /// Writes the sample under the cursor, waits `rate` units of [`SAMP`],
    /// then advances the waveform index. On wraparound the red/green flicker
    /// rule for `rate` is applied.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::Pwm`] or [`PlaybackError::Led`] if an output write
    /// fails. The cursor is left unchanged on a PWM failure.
    pub fn emit_sample<P, L, D>(
        &mut self,
        hw: &mut Outputs<P, L, D>,
        rate: PitchRate,
    ) -> Result<SampleEvent, PlaybackError>
    where
        P: PwmOutput,
        L: LedBank,
        D: DelayUnits,
    {
        let sample = self
            .song
            .wave()
            .get(self.cursor.wave_index)
            .copied()
            .unwrap_or_default();
        hw.speaker
            .set_compare(sample)
            .map_err(|_| PlaybackError::Pwm)?;
        hw.delay.delay_units(u32::from(rate.get()), SAMP);

        let next = self.cursor.wave_index.saturating_add(1);
        if next < self.song.wave_len() {
            self.cursor.wave_index = next;
            return Ok(SampleEvent {
                sample,
                wrapped: false,
                toggles: WrapToggles::NONE,
            });
        }

        self.cursor.wave_index = 0;
        let toggles = wrap_toggles(rate);
        if toggles.red {
            toggle(&mut hw.leds, Led::Red)?;
        }
        if toggles.green {
            toggle(&mut hw.leds, Led::Green)?;
        }
        Ok(SampleEvent {
            sample,
            wrapped: true,
            toggles,
        })
    }

    /// Play the entry under the cursor, flip blue and move to the next entry.
    ///
    /// Returns `Ok(None)` without touching any output when the cursor is on
    /// the sentinel. An entry with duration 0 emits no samples but still
    /// flips blue.
    ///
    /// # Errors
    ///
    /// Propagates the first output failure.
    pub fn play_entry<P, L, D>(
        &mut self,
        hw: &mut Outputs<P, L, D>,
    ) -> Result<Option<EntrySummary>, PlaybackError>
    where
        P: PwmOutput,
        L: LedBank,
        D: DelayUnits,
    {
        let Some(entry) = self.current_entry() else {
            return Ok(None);
        };
        let Some(rate) = entry.rate() else {
            return Ok(None);
        };

        let mut played = EntrySummary {
            entry,
            wraps: 0,
            red_toggles: 0,
            green_toggles: 0,
        };
        for _ in 0..entry.duration {
            let event = self.emit_sample(hw, rate)?;
            if event.wrapped {
                played.wraps = played.wraps.saturating_add(1);
                played.red_toggles = played.red_toggles.saturating_add(u32::from(event.toggles.red));
                played.green_toggles = played
                    .green_toggles
                    .saturating_add(u32::from(event.toggles.green));
            }
        }

        self.cursor.pitch_index = self.cursor.pitch_index.saturating_add(1);
        toggle(&mut hw.leds, Led::Blue)?;
        Ok(Some(played))
    }

    /// Rewind and play every entry up to the sentinel.
    ///
    /// # Errors
    ///
    /// Propagates the first output failure; the pass is abandoned there.
    pub fn play_pass<P, L, D>(
        &mut self,
        hw: &mut Outputs<P, L, D>,
    ) -> Result<PassSummary, PlaybackError>
    where
        P: PwmOutput,
        L: LedBank,
        D: DelayUnits,
    {
        self.reset();
        let mut summary = PassSummary::default();
        while let Some(played) = self.play_entry(hw)? {
            summary.record(&played);
        }
        Ok(summary)
    }

    /// Play passes forever.
    ///
    /// # Errors
    ///
    /// Returns only when an output fails.
    pub fn run<P, L, D>(&mut self, hw: &mut Outputs<P, L, D>) -> Result<Infallible, PlaybackError>
    where
        P: PwmOutput,
        L: LedBank,
        D: DelayUnits,
    {
        self.run_with(hw, |_| {})
    }

    /// Play passes forever, handing each finished pass to `on_pass`.
    ///
    /// # Errors
    ///
    /// Returns only when an output fails.
    pub fn run_with<P, L, D, F>(
        &mut self,
        hw: &mut Outputs<P, L, D>,
        mut on_pass: F,
    ) -> Result<Infallible, PlaybackError>
    where
        P: PwmOutput,
        L: LedBank,
        D: DelayUnits,
        F: FnMut(&PassSummary),
    {
        loop {
            let summary = self.play_pass(hw)?;
            on_pass(&summary);
        }
    }
}

fn toggle<L: LedBank>(leds: &mut L, led: Led) -> Result<(), PlaybackError> {
    leds.toggle(led).map_err(|_| PlaybackError::Led(led))
}
