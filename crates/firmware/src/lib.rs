//! Gumball Sound firmware
//!
//! Plays the built-in gumball tune through a PWM speaker output while three
//! LEDs flicker along, on an STM32H743ZI Nucleo-144 board or in a host
//! emulator.
//!
//! # Architecture
//!
//! ```text
//! Application Layer (main.rs / examples/emulator.rs)
//!         ↓
//! Board adapters (hal, audio::speaker, emulator sinks)
//!         ↓
//! Sequencer core (playback crate)
//!         ↓
//! Platform HAL traits (platform crate)
//! ```
//!
//! # Features
//!
//! - `hardware` - Build for STM32H7 target (embassy, defmt over RTT)
//! - `emulator` - Build for desktop runs (tracing sinks)
//! - `std` - Enable standard library (for emulator and testing)
//!
//! # Examples
//!
//! ## Hardware Target
//!
//! ```bash
//! cargo run --release --target thumbv7em-none-eabihf --features hardware
//! ```
//!
//! ## Emulator Target
//!
//! ```bash
//! RUST_LOG=debug cargo run -p firmware --example emulator --features emulator -- 2
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod audio;
pub mod boot;
pub mod exception_handlers;
pub mod hal;

#[cfg(feature = "emulator")]
pub mod emulator;

pub use boot::{LED_POLARITY, PIN_MAP, STARTUP_BLINK};

#[cfg(feature = "hardware")]
pub use audio::SpeakerPwm;

#[cfg(feature = "hardware")]
pub use hal::{BoardLeds, BoardOutputs};
