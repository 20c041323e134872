//! Built-in gumball tune.
//!
//! One cycle of a recorded waveform and the pitch sequence that sweeps it
//! from a wandering melody into a rising then falling glide.

use crate::tables::{PitchEntry, Song};

/// Waveform samples, one cycle.
const GUMBALL_WAVE: [u8; 92] = [
    0x8a, 0xb1, 0x55, 0x4d, 0xb2, 0x90, 0x43, 0x8f, 0xb7, 0x4f, 0x54, 0xbd,
    0x8c, 0x35, 0x98, 0xb8, 0x3a, 0x70, 0xcb, 0x4c, 0x51, 0xd7, 0x5d, 0x47,
    0xd2, 0x69, 0x3a, 0xde, 0x54, 0x4c, 0xe4, 0x30, 0x7b, 0xcf, 0x0f, 0xc5,
    0x82, 0x2e, 0xf3, 0x13, 0xb2, 0x91, 0x2c, 0xf5, 0x01, 0xe0, 0x45, 0x83,
    0xa8, 0x2e, 0xe9, 0x05, 0xf6, 0x13, 0xd3, 0x47, 0x96, 0x80, 0x61, 0xac,
    0x3e, 0xc9, 0x26, 0xdc, 0x1d, 0xdc, 0x27, 0xc6, 0x43, 0xa8, 0x60, 0x89,
    0x83, 0x65, 0xac, 0x40, 0xc6, 0x30, 0xc2, 0x45, 0xa0, 0x74, 0x6e, 0xa5,
    0x46, 0xba, 0x4b, 0x94, 0x89, 0x56, 0xb7, 0x59,
];

/// Pitch sequence. Pitch 10 is the highest note, 255 the lowest; a given
/// duration lasts longer on a lower note.
const GUMBALL_PITCHES: [PitchEntry; 73] = [
    PitchEntry::new(100, 280), PitchEntry::new(150, 250), PitchEntry::new(180, 300),
    PitchEntry::new(90, 800), PitchEntry::new(120, 500), PitchEntry::new(200, 50),
    PitchEntry::new(120, 280), PitchEntry::new(95, 282), PitchEntry::new(90, 285),
    PitchEntry::new(180, 350), PitchEntry::new(150, 380), PitchEntry::new(120, 280),
    PitchEntry::new(95, 410), PitchEntry::new(90, 285), PitchEntry::new(70, 500),
    PitchEntry::new(200, 50), PitchEntry::new(70, 180), PitchEntry::new(65, 1000),
    PitchEntry::new(70, 150), PitchEntry::new(80, 180), PitchEntry::new(90, 285),
    PitchEntry::new(80, 270), PitchEntry::new(12, 50), PitchEntry::new(50, 2000),
    PitchEntry::new(200, 500), PitchEntry::new(80, 500), PitchEntry::new(100, 500),
    PitchEntry::new(255, 800), PitchEntry::new(100, 100), PitchEntry::new(96, 100),
    PitchEntry::new(92, 100), PitchEntry::new(88, 200), PitchEntry::new(84, 250),
    PitchEntry::new(80, 300), PitchEntry::new(77, 350), PitchEntry::new(74, 400),
    PitchEntry::new(71, 200), PitchEntry::new(68, 200), PitchEntry::new(65, 200),
    PitchEntry::new(62, 200), PitchEntry::new(59, 190), PitchEntry::new(56, 180),
    PitchEntry::new(53, 170), PitchEntry::new(53, 160), PitchEntry::new(50, 150),
    PitchEntry::new(48, 140), PitchEntry::new(46, 130), PitchEntry::new(44, 120),
    PitchEntry::new(42, 110), PitchEntry::new(40, 100), PitchEntry::new(38, 100),
    PitchEntry::new(36, 100), PitchEntry::new(34, 100), PitchEntry::new(32, 100),
    PitchEntry::new(30, 100), PitchEntry::new(28, 100), PitchEntry::new(26, 100),
    PitchEntry::new(24, 100), PitchEntry::new(22, 90), PitchEntry::new(20, 70),
    PitchEntry::new(18, 60), PitchEntry::new(16, 50), PitchEntry::new(14, 40),
    PitchEntry::new(10, 100), PitchEntry::new(16, 50), PitchEntry::new(20, 70),
    PitchEntry::new(36, 100), PitchEntry::new(50, 150), PitchEntry::new(62, 200),
    PitchEntry::new(71, 200), PitchEntry::new(80, 150), PitchEntry::new(92, 130),
    PitchEntry::SENTINEL,
];

/// The gumball tune, validated at compile time.
#[allow(clippy::panic)] // const evaluation only: a malformed table fails the build
pub static GUMBALL: Song<'static> = match Song::new(&GUMBALL_WAVE, &GUMBALL_PITCHES) {
    Ok(song) => song,
    Err(_) => panic!("built-in gumball tables are malformed"),
};
