//! Console command dispatcher
//!
//! Turns one inbound line into exactly one action:
//!
//! ```text
//! line ──trim──► empty?  ──yes──► Ignored (no output)
//!                  │no
//!                  ▼
//!            truncated? ──yes──► unknown-command reply
//!                  │no
//!                  ▼
//!            Command::parse ──► Probe(cmd)   → status line, then set_angle
//!                           ──► PrintConfig  → configuration report
//!                           ──► PrintHelp    → usage listing
//!                           ──► None         → unknown-command reply
//! ```
//!
//! Handling is split in two so the reply can reach the host before the
//! probe moves: [`Dispatcher::respond`] renders the reply and
//! [`Dispatcher::execute`] performs the actuation it calls for.
//!
//! The dispatcher holds no state between lines apart from the actuator
//! itself, so repeating a command repeats the exact same output and
//! actuator call.

use core::fmt::{self, Write};

use bltouch_protocol::{
    Command, HelpText, Line, ProbeCommand, UnknownCommand, BANNER, NEWLINE,
};

use crate::config::{ConfigReport, ProbeConfig};
use crate::traits::ProbeActuator;

/// What a dispatched line resulted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Blank line, nothing emitted
    Ignored,
    /// Probe command to execute at the given angle
    Actuated { command: ProbeCommand, angle: u8 },
    /// Configuration report emitted
    PrintedConfig,
    /// Usage listing emitted
    PrintedHelp,
    /// Text matched no command, unknown-command reply emitted
    Unknown,
}

/// Command dispatcher bound to one probe
pub struct Dispatcher<'c, A> {
    config: &'c ProbeConfig,
    actuator: A,
}

impl<'c, A: ProbeActuator> Dispatcher<'c, A> {
    /// Create a dispatcher driving `actuator` with angles from `config`
    pub fn new(config: &'c ProbeConfig, actuator: A) -> Self {
        Self { config, actuator }
    }

    /// Write the startup banner followed by the usage listing
    pub fn greet<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "{}{}{}", BANNER, NEWLINE, HelpText)
    }

    /// Render the reply to one inbound line
    ///
    /// Nothing is actuated here. For a probe command the status line is
    /// written and the returned [`Outcome::Actuated`] is meant for
    /// [`Dispatcher::execute`]. A truncated line is not what the host sent,
    /// so it never matches a command and its kept text is echoed as unknown.
    pub fn respond<W: Write>(&self, line: &Line, out: &mut W) -> Result<Outcome, fmt::Error> {
        let text = line.as_str().trim();
        if text.is_empty() {
            return Ok(Outcome::Ignored);
        }

        let command = if line.is_truncated() {
            None
        } else {
            Command::parse(text)
        };

        match command {
            Some(Command::Probe(command)) => {
                write!(out, "{}{}", command.status(), NEWLINE)?;
                Ok(Outcome::Actuated {
                    command,
                    angle: self.config.angles.angle_for(command),
                })
            }
            Some(Command::PrintConfig) => {
                write!(out, "{}", ConfigReport(self.config))?;
                Ok(Outcome::PrintedConfig)
            }
            Some(Command::PrintHelp) => {
                write!(out, "{}", HelpText)?;
                Ok(Outcome::PrintedHelp)
            }
            None => {
                write!(out, "{}", UnknownCommand(text))?;
                Ok(Outcome::Unknown)
            }
        }
    }

    /// Perform the actuation an outcome calls for
    ///
    /// Only [`Outcome::Actuated`] drives the actuator; every other outcome
    /// is a no-op.
    pub fn execute(&mut self, outcome: Outcome) -> Result<(), A::Error> {
        if let Outcome::Actuated { angle, .. } = outcome {
            self.actuator.set_angle(angle)?;
        }
        Ok(())
    }
}
