//! TIM3 channel 1 as the speaker compare register.

use core::convert::Infallible;

use embassy_stm32::gpio::OutputType;
use embassy_stm32::peripherals::{PA6, TIM3};
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::{Channel, CountingMode};
use embassy_stm32::Peripheral;
use platform::audio_types::scale_sample;
use platform::PwmOutput;

use super::clock_math::CARRIER_TARGET_HZ;

/// Speaker PWM on PA6 / TIM3 CH1, edge-aligned.
///
/// An 8-bit sample is scaled onto the timer period, so 0 is always low and
/// 255 is always high whatever ARR the HAL picked.
pub struct SpeakerPwm<'d> {
    pwm: SimplePwm<'d, TIM3>,
    max_duty: u16,
}

impl<'d> SpeakerPwm<'d> {
    /// Configure TIM3 for the speaker carrier and start channel 1 at 0 duty.
    pub fn new(
        timer: impl Peripheral<P = TIM3> + 'd,
        pin: impl Peripheral<P = PA6> + 'd,
    ) -> Self {
        let ch1 = PwmPin::new_ch1(pin, OutputType::PushPull);
        let pwm = SimplePwm::new(
            timer,
            Some(ch1),
            None,
            None,
            None,
            Hertz(CARRIER_TARGET_HZ),
            CountingMode::EdgeAlignedUp,
        );
        Self::from_pwm(pwm)
    }

    /// Wrap an already configured timer, driving channel 1.
    pub fn from_pwm(mut pwm: SimplePwm<'d, TIM3>) -> Self {
        let max_duty = pwm.get_max_duty();
        pwm.set_duty(Channel::Ch1, 0);
        pwm.enable(Channel::Ch1);
        Self { pwm, max_duty }
    }

    /// Duty value of a fully-on output.
    pub fn max_duty(&self) -> u16 {
        self.max_duty
    }
}

impl PwmOutput for SpeakerPwm<'_> {
    type Error = Infallible;

    fn set_compare(&mut self, sample: u8) -> Result<(), Self::Error> {
        self.pwm
            .set_duty(Channel::Ch1, scale_sample(sample, self.max_duty));
        Ok(())
    }
}
