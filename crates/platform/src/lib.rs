//! Hardware Abstraction Layer (HAL) for Gumball Sound
//!
//! This crate provides trait-based abstractions for the three hardware
//! concerns of the tone sequencer, enabling development and testing without
//! physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate)
//!         ↓
//! Feature Layer (playback: tables + sequencer)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (Embassy HAL + PAC)
//! ```
//!
//! # Abstractions
//!
//! - [`PwmOutput`] - audio sample output through a PWM compare register
//! - [`LedBank`] / [`OutputPin`] - red, green and blue indicator LEDs
//! - [`DelayUnits`] - calibrated blocking delay
//!
//! # Features
//!
//! - `std`: Enable the [`mocks`] module outside this crate's own tests
//! - `defmt`: Enable `defmt::Format` derives
//!
//! # Example
//!
//! ```
//! use platform::{DelayUnits, PwmOutput};
//!
//! fn emit<P: PwmOutput, D: DelayUnits>(pwm: &mut P, delay: &mut D, sample: u8, rate: u8)
//!     -> Result<(), P::Error>
//! {
//!     pwm.set_compare(sample)?;
//!     delay.delay_units(u32::from(rate), platform::delay::SAMP);
//!     Ok(())
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // library code never prints
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)] // accessors; callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod audio_types;
pub mod config;
pub mod delay;
pub mod gpio;
pub mod mocks;
pub mod pwm;

// Re-export main traits
pub use delay::{DelayUnits, MonotonicDelay};
pub use gpio::{HalPin, Led, LedBank, OutputPin, PinState, Polarity, RgbError, RgbLeds};
pub use pwm::{CompareOutput, PwmConfig, PwmMode, PwmOutput, Prescaler};

// Re-export newtypes
pub use audio_types::{scale_sample, OutOfRangeError, PitchRate};
