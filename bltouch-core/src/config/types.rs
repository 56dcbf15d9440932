//! Probe configuration types
//!
//! All values are fixed for the lifetime of the firmware. They are grouped
//! into a single [`ProbeConfig`] that acts as the device context handed to
//! the dispatcher.

use core::fmt;

use bltouch_protocol::ProbeCommand;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest angle a hobby servo accepts, in degrees
pub const MAX_ANGLE: u8 = 180;

/// Host serial link settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct LinkConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
    /// End-of-line character completing an inbound command
    pub terminator: char,
}

impl LinkConfig {
    /// The terminator as a raw byte
    ///
    /// Only meaningful for an ASCII terminator, which [`ProbeConfig::validate`]
    /// guarantees.
    pub const fn terminator_byte(&self) -> u8 {
        self.terminator as u8
    }
}

/// GPIO numbers of the two probe wires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct PinAssignment {
    /// Servo control wire (PWM output)
    pub control: u8,
    /// Z-Min trigger signal (input, pulled up)
    pub z_min: u8,
}

/// Servo angle for each probe command, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct AngleTable {
    pub push_down: u8,
    pub push_up: u8,
    pub self_test: u8,
    pub alarm_release: u8,
}

impl AngleTable {
    /// Angle associated with a probe command
    pub const fn angle_for(&self, cmd: ProbeCommand) -> u8 {
        match cmd {
            ProbeCommand::PushDown => self.push_down,
            ProbeCommand::PushUp => self.push_up,
            ProbeCommand::SelfTest => self.self_test,
            ProbeCommand::AlarmRelease => self.alarm_release,
        }
    }
}

/// Complete probe configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct ProbeConfig {
    pub link: LinkConfig,
    pub pins: PinAssignment,
    pub angles: AngleTable,
}

impl ProbeConfig {
    /// Stock BLTouch angles on the SKR Pico servo and probe headers
    pub const DEFAULT: ProbeConfig = ProbeConfig {
        link: LinkConfig {
            baud_rate: 9600,
            terminator: '\n',
        },
        pins: PinAssignment {
            control: 29,
            z_min: 22,
        },
        angles: AngleTable {
            push_down: 10,
            push_up: 90,
            self_test: 120,
            alarm_release: 160,
        },
    };

    /// Check the configuration for values the firmware cannot honour
    ///
    /// Board-specific pin rules (which GPIOs exist, which are PWM capable)
    /// are left to the firmware build script.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.link.baud_rate == 0 {
            return Err(ConfigError::InvalidBaudRate);
        }

        if !self.link.terminator.is_ascii() {
            return Err(ConfigError::InvalidTerminator);
        }

        if self.pins.control == self.pins.z_min {
            return Err(ConfigError::PinConflict(self.pins.control));
        }

        for cmd in ProbeCommand::ALL {
            if self.angles.angle_for(cmd) > MAX_ANGLE {
                return Err(ConfigError::AngleOutOfRange(cmd));
            }
        }

        Ok(())
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Reasons a [`ProbeConfig`] is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Baud rate must be non-zero
    InvalidBaudRate,
    /// Terminator must be a single ASCII character
    InvalidTerminator,
    /// Control and Z-Min wires share a GPIO
    PinConflict(u8),
    /// Angle for the command exceeds [`MAX_ANGLE`]
    AngleOutOfRange(ProbeCommand),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaudRate => f.write_str("baud_rate must be greater than 0"),
            ConfigError::InvalidTerminator => {
                f.write_str("terminator must be a single ASCII character")
            }
            ConfigError::PinConflict(pin) => {
                write!(f, "control and z_min both use gpio{}", pin)
            }
            ConfigError::AngleOutOfRange(cmd) => {
                write!(f, "{} angle must be 0-{}", cmd.label(), MAX_ANGLE)
            }
        }
    }
}
