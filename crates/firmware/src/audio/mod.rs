//! Speaker output: carrier math and the TIM3 PWM adapter.
//!
//! - `clock_math` - pure clock tree / carrier arithmetic, host-testable
//! - `speaker` - [`platform::PwmOutput`] over embassy-stm32 `SimplePwm` (hardware only)

pub mod clock_math;

#[cfg(feature = "hardware")]
pub mod speaker;

#[cfg(feature = "hardware")]
pub use speaker::SpeakerPwm;
