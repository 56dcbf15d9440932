//! Human-readable configuration report printed by the `c` command

use core::fmt;

use bltouch_protocol::{ProbeCommand, NEWLINE};

use super::types::ProbeConfig;

/// Labeled dump of every configured value, followed by a blank line
#[derive(Debug, Clone, Copy)]
pub struct ConfigReport<'a>(pub &'a ProbeConfig);

impl fmt::Display for ConfigReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.0;

        write!(f, "Current configuration:{}", NEWLINE)?;
        write!(f, "\tBaudrate: {} bps{}", config.link.baud_rate, NEWLINE)?;
        write!(
            f,
            "\tBLTouch control wire pin: {}{}",
            config.pins.control, NEWLINE
        )?;
        write!(f, "\tZ-Min signal pin: {}{}", config.pins.z_min, NEWLINE)?;

        for cmd in ProbeCommand::ALL {
            write!(
                f,
                "\t{}: {} deg{}",
                cmd.label(),
                config.angles.angle_for(cmd),
                NEWLINE
            )?;
        }

        f.write_str(NEWLINE)
    }
}
