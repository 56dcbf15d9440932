//! Outbound console text
//!
//! Every reply is a `Display` type so the caller decides where it is
//! rendered (a `heapless::String`, a UART writer, a test buffer). Each
//! rendered line ends with [`NEWLINE`].

use core::fmt;

use crate::command::Command;

/// Line ending for all outbound text
pub const NEWLINE: &str = "\r\n";

/// Greeting printed once at startup, before the usage listing
pub const BANNER: &str = "==== BLTouch tester started ====";

/// Token the unknown-command reply points the user at
pub const HELP_TOKEN: &str = Command::PrintHelp.token();

/// The usage listing, one line per command, followed by a blank line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HelpText;

impl fmt::Display for HelpText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Usage:{}", NEWLINE)?;
        for cmd in Command::HELP_ORDER {
            write!(f, "\t'{}': {}{}", cmd.token(), cmd.description(), NEWLINE)?;
        }
        f.write_str(NEWLINE)
    }
}

/// Reply for text that matched no command
///
/// Echoes the trimmed text verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownCommand<'a>(pub &'a str);

impl fmt::Display for UnknownCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown command '{}'. Use '{}' for list of valid commands.{}",
            self.0, HELP_TOKEN, NEWLINE
        )
    }
}

/// Sampled level of the Z-Min trigger line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerLevel {
    Low,
    High,
}

impl From<bool> for TriggerLevel {
    fn from(high: bool) -> Self {
        if high {
            TriggerLevel::High
        } else {
            TriggerLevel::Low
        }
    }
}

impl fmt::Display for TriggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerLevel::Low => f.write_str("LOW"),
            TriggerLevel::High => f.write_str("HIGH"),
        }
    }
}

/// Asynchronous Z-Min status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ZMinStatus(pub TriggerLevel);

impl ZMinStatus {
    /// Longest rendered status line, terminator included
    pub const MAX_LEN: usize = "Z-Min is HIGH\r\n".len();
}

impl fmt::Display for ZMinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z-Min is {}{}", self.0, NEWLINE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    fn render<T: fmt::Display>(value: T) -> String<512> {
        let mut out = String::new();
        write!(out, "{}", value).unwrap();
        out
    }

    #[test]
    fn test_help_text() {
        let text = render(HelpText);
        assert_eq!(
            text.as_str(),
            "Usage:\r\n\
             \t'h': Print usage / list of valid commands.\r\n\
             \t'c': Print current configuration.\r\n\
             \t'd': Execute Push-pin Down / Probe start.\r\n\
             \t'u': Execute Push-pin Up / Probe finish.\r\n\
             \t't': Execute self-test.\r\n\
             \t'a': Execute Alarm Release & Push-pin UP.\r\n\
             \r\n"
        );
    }

    #[test]
    fn test_unknown_command_echoes_text() {
        let text = render(UnknownCommand("xyz"));
        assert_eq!(
            text.as_str(),
            "Unknown command 'xyz'. Use 'h' for list of valid commands.\r\n"
        );
    }

    #[test]
    fn test_z_min_status() {
        assert_eq!(
            render(ZMinStatus(TriggerLevel::High)).as_str(),
            "Z-Min is HIGH\r\n"
        );
        assert_eq!(
            render(ZMinStatus(TriggerLevel::Low)).as_str(),
            "Z-Min is LOW\r\n"
        );
        assert_eq!(
            render(ZMinStatus(TriggerLevel::High)).len(),
            ZMinStatus::MAX_LEN
        );
    }

    #[test]
    fn test_trigger_level_from_bool() {
        assert_eq!(TriggerLevel::from(true), TriggerLevel::High);
        assert_eq!(TriggerLevel::from(false), TriggerLevel::Low);
    }
}
