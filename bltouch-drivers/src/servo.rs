//! Servo pulse driver for the probe control wire
//!
//! This driver provides:
//! - Angle (0-180°) to pulse width mapping
//! - Pulse width to PWM duty conversion against the channel's resolution
//! - The [`ProbeActuator`] implementation used by the dispatcher
//!
//! # Usage
//!
//! The PWM channel must already run at the servo frame rate (50 Hz for the
//! default 20 ms frame). The driver only ever changes the duty cycle.
//!
//! ```ignore
//! let mut servo = Servo::new(pwm_channel, ServoConfig::default());
//! servo.set_angle(10)?; // BLTouch push-pin down
//! ```

use bltouch_core::config::MAX_ANGLE;
use bltouch_core::traits::ProbeActuator;
use embedded_hal::pwm::SetDutyCycle;

/// Servo pulse timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// Pulse width for 0°, in microseconds
    pub min_pulse_us: u32,
    /// Pulse width for 180°, in microseconds
    pub max_pulse_us: u32,
    /// Length of one PWM frame, in microseconds
    pub period_us: u32,
}

impl ServoConfig {
    /// PWM frame rate implied by the period, in Hz
    pub const fn frequency_hz(&self) -> u32 {
        1_000_000 / self.period_us
    }
}

impl Default for ServoConfig {
    /// Arduino `Servo` library timing, which BLTouch angle tables assume
    fn default() -> Self {
        Self {
            min_pulse_us: 544,
            max_pulse_us: 2400,
            period_us: 20_000,
        }
    }
}

/// Error from servo operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoError<E> {
    /// The PWM channel rejected the duty cycle
    Pwm(E),
}

/// Probe actuator driving a servo-style control wire
pub struct Servo<P> {
    pwm: P,
    config: ServoConfig,
    angle: Option<u8>,
}

impl<P: SetDutyCycle> Servo<P> {
    /// Create a new servo driver
    ///
    /// No pulse is emitted until the first [`ProbeActuator::set_angle`].
    pub fn new(pwm: P, config: ServoConfig) -> Self {
        Self {
            pwm,
            config,
            angle: None,
        }
    }

    /// Pulse width for an angle, clamped to 0-180°
    pub fn pulse_width_us(&self, degrees: u8) -> u32 {
        let degrees = degrees.min(MAX_ANGLE) as u32;
        let span = self.config.max_pulse_us - self.config.min_pulse_us;
        self.config.min_pulse_us + degrees * span / MAX_ANGLE as u32
    }

    /// Duty value for a pulse width on this channel
    pub fn duty_for_pulse(&self, pulse_us: u32) -> u16 {
        let max_duty = self.pwm.max_duty_cycle() as u32;
        let duty = pulse_us.min(self.config.period_us) * max_duty / self.config.period_us;
        duty as u16
    }
}

impl<P: SetDutyCycle> ProbeActuator for Servo<P> {
    type Error = ServoError<P::Error>;

    fn set_angle(&mut self, degrees: u8) -> Result<(), Self::Error> {
        let degrees = degrees.min(MAX_ANGLE);
        let duty = self.duty_for_pulse(self.pulse_width_us(degrees));
        self.pwm.set_duty_cycle(duty).map_err(ServoError::Pwm)?;
        self.angle = Some(degrees);
        Ok(())
    }

    fn angle(&self) -> Option<u8> {
        self.angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;

    /// RP2040 slice at 125 MHz / 64 with a 50 Hz wrap
    const RP_TOP: u16 = 39_062;

    struct MockPwm {
        max: u16,
        duty: u16,
        writes: usize,
    }

    impl MockPwm {
        fn new(max: u16) -> Self {
            Self {
                max,
                duty: 0,
                writes: 0,
            }
        }
    }

    impl ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            self.max
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_pulse_width_mapping() {
        let servo = Servo::new(MockPwm::new(RP_TOP), ServoConfig::default());

        assert_eq!(servo.pulse_width_us(0), 544);
        assert_eq!(servo.pulse_width_us(90), 1472);
        assert_eq!(servo.pulse_width_us(180), 2400);
        assert_eq!(servo.pulse_width_us(10), 647);
        assert_eq!(servo.pulse_width_us(160), 2193);
    }

    #[test]
    fn test_pulse_width_clamps_above_range() {
        let servo = Servo::new(MockPwm::new(RP_TOP), ServoConfig::default());
        assert_eq!(servo.pulse_width_us(255), 2400);
    }

    #[test]
    fn test_duty_scales_with_resolution() {
        let servo = Servo::new(MockPwm::new(20_000), ServoConfig::default());
        // One count per microsecond
        assert_eq!(servo.duty_for_pulse(1472), 1472);

        let servo = Servo::new(MockPwm::new(RP_TOP), ServoConfig::default());
        // 1472 / 20000 * 39062
        assert_eq!(servo.duty_for_pulse(1472), 2874);
    }

    #[test]
    fn test_set_angle_writes_duty() {
        let mut servo = Servo::new(MockPwm::new(20_000), ServoConfig::default());
        assert_eq!(servo.angle(), None);

        servo.set_angle(120).unwrap();
        assert_eq!(servo.angle(), Some(120));

        assert_eq!(servo.pwm.duty, 1781);
        assert_eq!(servo.pwm.writes, 1);
    }

    #[test]
    fn test_repeated_angle_rewrites_duty() {
        let mut servo = Servo::new(MockPwm::new(20_000), ServoConfig::default());
        servo.set_angle(10).unwrap();
        servo.set_angle(10).unwrap();
        assert_eq!(servo.pwm.writes, 2);
    }

    #[test]
    fn test_frequency() {
        assert_eq!(ServoConfig::default().frequency_hz(), 50);
    }
}
