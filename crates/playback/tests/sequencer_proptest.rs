//! Property-based tests for the sequencer.
//! Random waveform lengths and pitch tables, checked against the counting rules.
#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::indexing_slicing)]

use platform::audio_types::PitchRate;
use platform::gpio::{Polarity, RgbLeds};
use platform::mocks::{MockDelay, MockPin, MockPwm};
use playback::{wrap_toggles, Outputs, PitchEntry, Sequencer, Song};
use proptest::prelude::*;

type Hw = Outputs<MockPwm, RgbLeds<MockPin, MockPin, MockPin>, MockDelay>;

fn outputs() -> Hw {
    Outputs::new(
        MockPwm::new(),
        RgbLeds::new(MockPin::new(), MockPin::new(), MockPin::new(), Polarity::ActiveLow),
        MockDelay::new(),
    )
}

fn entries() -> impl Strategy<Value = Vec<PitchEntry>> {
    prop::collection::vec((1u8..=255, 0u16..300), 0..12)
        .prop_map(|v| v.into_iter().map(|(p, d)| PitchEntry::new(p, d)).collect())
}

proptest! {
    /// Every entry emits exactly `duration` samples and one blue flip.
    #[test]
    fn pass_emits_every_duration(wave_len in 1usize..120, mut table in entries()) {
        let wave: Vec<u8> = (0..wave_len).map(|i| i as u8).collect();
        table.push(PitchEntry::SENTINEL);
        let song = Song::new(&wave, &table).unwrap();
        let mut seq = Sequencer::new(song);
        let mut hw = outputs();

        let summary = seq.play_pass(&mut hw).unwrap();

        let expected: u64 = table.iter().map(|e| u64::from(e.duration)).sum();
        prop_assert_eq!(summary.samples, expected);
        prop_assert_eq!(hw.speaker.writes() as u64, expected);
        prop_assert_eq!(summary.entries as usize, table.len() - 1);
        prop_assert_eq!(hw.leds.pins().2.toggles(), table.len() - 1);
        prop_assert_eq!(summary.samples, song.pass_samples());
        prop_assert_eq!(summary.wraps, song.pass_wraps());
    }

    /// The waveform index wraps to 0 exactly every `wave_len` samples.
    #[test]
    fn wave_index_stays_in_range(wave_len in 1usize..50, rate in 1u8..=255, count in 0usize..400) {
        let wave: Vec<u8> = (0..wave_len).map(|i| i as u8).collect();
        let table = [PitchEntry::SENTINEL];
        let mut seq = Sequencer::new(Song::new(&wave, &table).unwrap());
        let mut hw = outputs();
        let rate = PitchRate::new(rate).unwrap();

        for n in 1..=count {
            let ev = seq.emit_sample(&mut hw, rate).unwrap();
            prop_assert!(seq.cursor().wave_index < wave_len);
            prop_assert_eq!(ev.wrapped, n % wave_len == 0);
            prop_assert_eq!(ev.sample, ((n - 1) % wave_len) as u8);
        }
    }

    /// Red and green flips per pass match the flicker rule times the wraps.
    #[test]
    fn flicker_counts_follow_rule(wave_len in 1usize..30, rate in 1u8..=255, duration in 0u16..500) {
        let wave = vec![0x80u8; wave_len];
        let table = [PitchEntry::new(rate, duration), PitchEntry::SENTINEL];
        let mut seq = Sequencer::new(Song::new(&wave, &table).unwrap());
        let mut hw = outputs();

        let summary = seq.play_pass(&mut hw).unwrap();
        let rule = wrap_toggles(PitchRate::new(rate).unwrap());
        let wraps = u64::from(duration) / wave_len as u64;

        prop_assert_eq!(summary.wraps, wraps);
        prop_assert_eq!(summary.red_toggles, if rule.red { wraps } else { 0 });
        prop_assert_eq!(summary.green_toggles, if rule.green { wraps } else { 0 });
        let (r, g, _) = hw.leds.pins();
        prop_assert_eq!(r.toggles() as u64, summary.red_toggles);
        prop_assert_eq!(g.toggles() as u64, summary.green_toggles);
    }

    /// Sample delays always use the entry's pitch in SAMP units.
    #[test]
    fn delay_time_matches_estimate(mut table in entries()) {
        let wave = [1u8, 2, 3];
        table.push(PitchEntry::SENTINEL);
        let song = Song::new(&wave, &table).unwrap();
        let mut seq = Sequencer::new(song);
        let mut hw = outputs();

        seq.play_pass(&mut hw).unwrap();
        prop_assert_eq!(hw.delay.total_nanos(), song.pass_time_nanos());
    }
}
