//! BLTouch tester host console protocol
//!
//! This crate defines the text protocol spoken over the host serial link.
//! The protocol is line oriented and meant to be typed by hand in a
//! terminal:
//!
//! ```text
//! host ──► "d\n"                                   (one token per line)
//! host ◄── "Executing Push-pin Down / Probe start\r\n"
//! host ◄── "Z-Min is LOW\r\n"                      (asynchronous)
//! ```
//!
//! Inbound lines are framed by [`LineParser`], matched against the fixed
//! token vocabulary by [`Command::parse`], and every outbound text is a
//! `core::fmt::Display` type from [`messages`] so replies can be rendered
//! into a single bounded buffer.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod messages;

pub use command::{Command, ProbeCommand};
pub use line::{Line, LineParser, DEFAULT_TERMINATOR, MAX_LINE_LEN};
pub use messages::{
    HelpText, TriggerLevel, UnknownCommand, ZMinStatus, BANNER, HELP_TOKEN, NEWLINE,
};
