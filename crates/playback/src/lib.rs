//! Tone sequencer core: waveform/pitch tables, the playback cursor, LED
//! flicker rules and the blink helper.
//!
//! Everything here is `no_std`, allocation-free and generic over the
//! `platform` output traits.
#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod blink;
pub mod engine;
pub mod flicker;
pub mod gumball;
pub mod tables;

use platform::gpio::Led;
use thiserror::Error;

pub use blink::{blink_leds, BlinkPattern};
pub use engine::{Cursor, EntrySummary, Outputs, PassSummary, SampleEvent, Sequencer};
pub use flicker::{wrap_toggles, WrapToggles};
pub use gumball::GUMBALL;
pub use tables::{PitchEntry, Song, TableError};

/// An output refused a write while playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackError {
    /// Compare-register write failed.
    #[error("PWM compare write failed")]
    Pwm,
    /// Toggling one LED failed.
    #[error("{} LED toggle failed", .0.name())]
    Led(Led),
    /// Setting the whole LED bank failed.
    #[error("LED bank write failed")]
    Leds,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use platform::gpio::{PinState, Polarity, RgbLeds};
    use platform::mocks::{MockDelay, MockPin, MockPwm};

    type MockLeds = RgbLeds<MockPin, MockPin, MockPin>;
    type MockOutputs = crate::Outputs<MockPwm, MockLeds, MockDelay>;

    fn mock_outputs() -> MockOutputs {
        crate::Outputs::new(
            MockPwm::new(),
            RgbLeds::new(MockPin::new(), MockPin::new(), MockPin::new(), Polarity::ActiveLow),
            MockDelay::new(),
        )
    }

    fn led_toggles(hw: &MockOutputs) -> (usize, usize, usize) {
        let (r, g, b) = hw.leds.pins();
        (r.toggles(), g.toggles(), b.toggles())
    }

    /// Table validation tests
    mod table_tests {
        use crate::tables::{PitchEntry, Song, TableError};
        use crate::GUMBALL;

        #[test]
        fn test_empty_wave_rejected() {
            let pitches = [PitchEntry::SENTINEL];
            assert_eq!(Song::new(&[], &pitches), Err(TableError::EmptyWaveform));
        }

        #[test]
        fn test_missing_sentinel_rejected() {
            let pitches = [PitchEntry::new(10, 5)];
            assert_eq!(Song::new(&[1, 2], &pitches), Err(TableError::MissingSentinel));
        }

        #[test]
        fn test_sentinel_with_nonzero_duration_still_ends_table() {
            let pitches = [PitchEntry::new(30, 4), PitchEntry::new(0, 999), PitchEntry::new(40, 4)];
            let song = Song::new(&[1, 2, 3], &pitches).expect("valid tables");
            assert_eq!(song.playable_len(), 1);
            assert_eq!(song.entry(1), None);
            assert_eq!(song.entry(2), None, "entries past the sentinel are unreachable");
            assert_eq!(song.entries().count(), 1);
        }

        #[test]
        fn test_gumball_tables_shape() {
            assert_eq!(GUMBALL.wave_len(), 92);
            assert_eq!(GUMBALL.playable_len(), 72);
            assert_eq!(GUMBALL.pitches().len(), 73);
            assert!(GUMBALL.pitches()[72].is_sentinel());
            assert!(GUMBALL.entries().all(|e| e.pitch >= 10));
        }

        #[test]
        fn test_gumball_pass_totals() {
            assert_eq!(GUMBALL.pass_samples(), 18_007);
            assert_eq!(GUMBALL.pass_wraps(), 195);
            assert_eq!(GUMBALL.pass_time_nanos(), 15_814_681_186);
        }

        #[test]
        fn test_lower_note_plays_longer() {
            let high = PitchEntry::new(10, 1000);
            let low = PitchEntry::new(200, 1000);
            assert!(low.play_time_nanos() > high.play_time_nanos());
        }
    }

    /// Flicker rule tests
    mod flicker_tests {
        use crate::flicker::{wrap_toggles, WrapToggles};
        use platform::audio_types::PitchRate;

        fn at(rate: u8) -> WrapToggles {
            wrap_toggles(PitchRate::new(rate).expect("non-zero"))
        }

        #[test]
        fn test_pitch_20_flips_both() {
            assert_eq!(at(20), WrapToggles { red: true, green: true });
        }

        #[test]
        fn test_pitch_7_flips_neither() {
            assert_eq!(at(7), WrapToggles::NONE);
            assert!(!at(7).any());
        }

        #[test]
        fn test_pitch_50_flips_both() {
            // 50 is a multiple of 50 (red) and of 10 (green)
            assert_eq!(at(50), WrapToggles { red: true, green: true });
        }

        #[test]
        fn test_pitch_30_flips_green_only() {
            assert_eq!(at(30), WrapToggles { red: false, green: true });
        }

        #[test]
        fn test_red_implies_green() {
            for rate in 1..=u8::MAX {
                let t = at(rate);
                assert!(!t.red || t.green, "rate {rate}");
            }
        }
    }

    /// Sequencer tests
    mod engine_tests {
        use super::{led_toggles, mock_outputs};
        use crate::engine::{Cursor, Sequencer};
        use crate::tables::{PitchEntry, Song};
        use crate::PlaybackError;
        use platform::audio_types::PitchRate;
        use platform::delay::SAMP;

        const WAVE: [u8; 4] = [10, 20, 30, 40];

        #[test]
        fn test_sequencer_starts_at_origin() {
            let pitches = [PitchEntry::new(100, 5), PitchEntry::SENTINEL];
            let seq = Sequencer::new(Song::new(&WAVE, &pitches).unwrap());
            assert_eq!(seq.cursor(), Cursor::default());
            assert_eq!(seq.current_entry(), Some(PitchEntry::new(100, 5)));
        }

        #[test]
        fn test_two_entry_pass() {
            let pitches = [PitchEntry::new(100, 5), PitchEntry::new(50, 3), PitchEntry::SENTINEL];
            let mut seq = Sequencer::new(Song::new(&WAVE, &pitches).unwrap());
            let mut hw = mock_outputs();

            let summary = seq.play_pass(&mut hw).unwrap();

            assert_eq!(summary.entries, 2);
            assert_eq!(summary.samples, 8);
            assert_eq!(summary.blue_toggles, 2);
            assert_eq!(hw.speaker.writes(), 8);
            assert_eq!(hw.speaker.history(), &[10, 20, 30, 40, 10, 20, 30, 40]);
            assert_eq!(hw.delay.calls(), 8);
            assert_eq!(hw.delay.last(), Some((50, SAMP)));
            assert_eq!(seq.current_entry(), None);
        }

        #[test]
        fn test_wave_index_carries_across_entries() {
            let pitches = [PitchEntry::new(7, 3), PitchEntry::new(7, 3), PitchEntry::SENTINEL];
            let mut seq = Sequencer::new(Song::new(&WAVE, &pitches).unwrap());
            let mut hw = mock_outputs();

            seq.play_entry(&mut hw).unwrap();
            assert_eq!(seq.cursor(), Cursor { wave_index: 3, pitch_index: 1 });
            seq.play_entry(&mut hw).unwrap();
            assert_eq!(seq.cursor(), Cursor { wave_index: 2, pitch_index: 2 });
            assert_eq!(hw.speaker.history(), &[10, 20, 30, 40, 10, 20]);
        }

        #[test]
        fn test_wrap_flicker_counts() {
            // 9 samples over a 4-sample wave wrap twice; pitch 20 flips red and green
            let pitches = [PitchEntry::new(20, 9), PitchEntry::SENTINEL];
            let mut seq = Sequencer::new(Song::new(&WAVE, &pitches).unwrap());
            let mut hw = mock_outputs();

            let played = seq.play_entry(&mut hw).unwrap().expect("one entry");
            assert_eq!(played.wraps, 2);
            assert_eq!(played.red_toggles, 2);
            assert_eq!(played.green_toggles, 2);
            assert_eq!(led_toggles(&hw), (2, 2, 1));
        }

        #[test]
        fn test_pitch_7_never_flickers() {
            let pitches = [PitchEntry::new(7, 40), PitchEntry::SENTINEL];
            let mut seq = Sequencer::new(Song::new(&WAVE, &pitches).unwrap());
            let mut hw = mock_outputs();

            let summary = seq.play_pass(&mut hw).unwrap();
            assert_eq!(summary.wraps, 10);
            assert_eq!(led_toggles(&hw), (0, 0, 1));
        }

        #[test]
        fn test_emit_sample_reports_wrap() {
            let pitches = [PitchEntry::new(30, 4), PitchEntry::SENTINEL];
            let mut seq = Sequencer::new(Song::new(&WAVE, &pitches).unwrap());
            let mut hw = mock_outputs();
            let rate = PitchRate::new(30).unwrap();

            for expected in [10, 20, 30] {
                let ev = seq.emit_sample(&mut hw, rate).unwrap();
                assert_eq!(ev.sample, expected);
                assert!(!ev.wrapped);
            }
            let ev = seq.emit_sample(&mut hw, rate).unwrap();
            assert_eq!(ev.sample, 40);
            assert!(ev.wrapped);
            assert!(!ev.toggles.red);
            assert!(ev.toggles.green);
            assert_eq!(seq.cursor().wave_index, 0);
        }

        #[test]
        fn test_zero_duration_entry_still_flips_blue() {
            let pitches = [PitchEntry::new(10, 0), PitchEntry::SENTINEL];
            let mut seq = Sequencer::new(Song::new(&WAVE, &pitches).unwrap());
            let mut hw = mock_outputs();

            let summary = seq.play_pass(&mut hw).unwrap();
            assert_eq!(summary.samples, 0);
            assert_eq!(summary.blue_toggles, 1);
            assert_eq!(hw.speaker.writes(), 0);
        }

        #[test]
        fn test_sentinel_only_table_plays_nothing() {
            let pitches = [PitchEntry::SENTINEL];
            let mut seq = Sequencer::new(Song::new(&WAVE, &pitches).unwrap());
            let mut hw = mock_outputs();

            assert_eq!(seq.play_entry(&mut hw).unwrap(), None);
            let summary = seq.play_pass(&mut hw).unwrap();
            assert_eq!(summary.entries, 0);
            assert_eq!(led_toggles(&hw), (0, 0, 0));
        }

        #[test]
        fn test_next_pass_restarts_at_origin() {
            let pitches = [PitchEntry::new(10, 3), PitchEntry::SENTINEL];
            let mut seq = Sequencer::new(Song::new(&WAVE, &pitches).unwrap());
            let mut hw = mock_outputs();

            seq.play_pass(&mut hw).unwrap();
            seq.play_pass(&mut hw).unwrap();
            assert_eq!(hw.speaker.history(), &[10, 20, 30, 10, 20, 30]);
        }

        #[test]
        fn test_pwm_failure_stops_run() {
            struct BrokenPwm;
            impl platform::PwmOutput for BrokenPwm {
                type Error = ();
                fn set_compare(&mut self, _: u8) -> Result<(), ()> {
                    Err(())
                }
            }

            let pitches = [PitchEntry::new(10, 3), PitchEntry::SENTINEL];
            let mut seq = Sequencer::new(Song::new(&WAVE, &pitches).unwrap());
            let mut hw = crate::Outputs::new(BrokenPwm, super::mock_outputs().leds, platform::mocks::MockDelay::new());

            let err = seq.run(&mut hw).unwrap_err();
            assert_eq!(err, PlaybackError::Pwm);
            assert_eq!(seq.cursor(), Cursor::default());
        }

        #[test]
        fn test_run_with_reports_each_pass() {
            struct FlakyPin(u32);
            impl platform::OutputPin for FlakyPin {
                type Error = ();
                fn set_high(&mut self) -> Result<(), ()> {
                    Ok(())
                }
                fn set_low(&mut self) -> Result<(), ()> {
                    Ok(())
                }
                fn toggle(&mut self) -> Result<(), ()> {
                    self.0 = self.0.checked_sub(1).ok_or(())?;
                    Ok(())
                }
            }

            // Blue may flip three times, so the fourth pass fails
            let pitches = [PitchEntry::new(7, 2), PitchEntry::SENTINEL];
            let mut seq = Sequencer::new(Song::new(&WAVE, &pitches).unwrap());
            let leds = platform::RgbLeds::new(
                FlakyPin(u32::MAX),
                FlakyPin(u32::MAX),
                FlakyPin(3),
                platform::Polarity::ActiveHigh,
            );
            let mut hw = crate::Outputs::new(
                platform::mocks::MockPwm::new(),
                leds,
                platform::mocks::MockDelay::new(),
            );

            let mut passes = 0;
            let err = seq.run_with(&mut hw, |s| {
                assert_eq!(s.samples, 2);
                passes += 1;
            });
            assert_eq!(err.unwrap_err(), PlaybackError::Led(platform::Led::Blue));
            assert_eq!(passes, 3);
        }
    }

    /// Blink helper tests
    mod blink_tests {
        use super::{mock_outputs, PinState};
        use crate::blink::{blink_leds, BlinkPattern};
        use platform::delay::TENTH_MS;

        #[test]
        fn test_blink_periods_truncate() {
            assert_eq!(BlinkPattern::new(1000, 300, 300).periods(), 1);
            assert_eq!(BlinkPattern::new(1200, 300, 300).periods(), 2);
            assert_eq!(BlinkPattern::new(100, 300, 300).periods(), 0);
        }

        #[test]
        fn test_zero_period_plays_nothing() {
            assert_eq!(BlinkPattern::new(1000, 0, 0).periods(), 0);
        }

        #[test]
        fn test_blink_ends_dark_and_waits_on_off() {
            let mut hw = mock_outputs();
            blink_leds(&mut hw.leds, &mut hw.delay, BlinkPattern::new(10_000, 1_000, 1_500)).unwrap();

            // 4 periods, each one on and one off delay
            assert_eq!(hw.delay.calls(), 8);
            assert_eq!(hw.delay.last(), Some((1_500, TENTH_MS)));
            let (r, g, b) = hw.leds.pins();
            // active-low bank: dark means high
            assert_eq!(r.state(), PinState::High);
            assert_eq!(g.state(), PinState::High);
            assert_eq!(b.state(), PinState::High);
            assert_eq!(r.writes(), 8);
        }
    }
}
