//! Application configuration and constants
//!
//! Central identity values used across the workspace. Timing constants live
//! in [`crate::delay`].

/// The application name
pub const APP_NAME: &str = "Gumball Sound";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Boot banner
pub const fn banner() -> &'static str {
    "Gumball Sound - waveform sequencer"
}
