//! Command tokens accepted on the host console
//!
//! Every command is a single ASCII letter, matched case-insensitively.
//! The vocabulary is fixed and the tokens are disjoint, so the match order
//! only matters for documentation and listing purposes.

/// Commands that move the probe by writing a servo angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeCommand {
    /// Deploy the push-pin (probe start)
    PushDown,
    /// Stow the push-pin (probe finished)
    PushUp,
    /// Run the built-in self-test cycle
    SelfTest,
    /// Clear the alarm state and stow the push-pin
    AlarmRelease,
}

impl ProbeCommand {
    /// All probe commands in match priority order
    pub const ALL: [ProbeCommand; 4] = [
        ProbeCommand::PushDown,
        ProbeCommand::PushUp,
        ProbeCommand::SelfTest,
        ProbeCommand::AlarmRelease,
    ];

    /// Status line printed before the servo is commanded
    pub const fn status(&self) -> &'static str {
        match self {
            ProbeCommand::PushDown => "Executing Push-pin Down / Probe start",
            ProbeCommand::PushUp => "Executing Push-pin Up / Probe finished",
            ProbeCommand::SelfTest => "Executing self-test",
            ProbeCommand::AlarmRelease => "Executing Alarm Release & Push-pin UP",
        }
    }

    /// Label used in the configuration report
    pub const fn label(&self) -> &'static str {
        match self {
            ProbeCommand::PushDown => "Push-pin Down",
            ProbeCommand::PushUp => "Push-pin Up",
            ProbeCommand::SelfTest => "Self test",
            ProbeCommand::AlarmRelease => "Alarm Release & Push-pin UP",
        }
    }
}

/// A recognised console command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Move the probe
    Probe(ProbeCommand),
    /// Print the current configuration
    PrintConfig,
    /// Print the usage listing
    PrintHelp,
}

impl Command {
    /// All commands in match priority order
    pub const PRIORITY: [Command; 6] = [
        Command::Probe(ProbeCommand::PushDown),
        Command::Probe(ProbeCommand::PushUp),
        Command::Probe(ProbeCommand::SelfTest),
        Command::Probe(ProbeCommand::AlarmRelease),
        Command::PrintConfig,
        Command::PrintHelp,
    ];

    /// All commands in the order the usage listing shows them
    pub const HELP_ORDER: [Command; 6] = [
        Command::PrintHelp,
        Command::PrintConfig,
        Command::Probe(ProbeCommand::PushDown),
        Command::Probe(ProbeCommand::PushUp),
        Command::Probe(ProbeCommand::SelfTest),
        Command::Probe(ProbeCommand::AlarmRelease),
    ];

    /// The canonical (lowercase) token for this command
    pub const fn token(&self) -> &'static str {
        match self {
            Command::Probe(ProbeCommand::PushDown) => "d",
            Command::Probe(ProbeCommand::PushUp) => "u",
            Command::Probe(ProbeCommand::SelfTest) => "t",
            Command::Probe(ProbeCommand::AlarmRelease) => "a",
            Command::PrintConfig => "c",
            Command::PrintHelp => "h",
        }
    }

    /// One-line description used in the usage listing
    pub const fn description(&self) -> &'static str {
        match self {
            Command::Probe(ProbeCommand::PushDown) => "Execute Push-pin Down / Probe start.",
            Command::Probe(ProbeCommand::PushUp) => "Execute Push-pin Up / Probe finish.",
            Command::Probe(ProbeCommand::SelfTest) => "Execute self-test.",
            Command::Probe(ProbeCommand::AlarmRelease) => {
                "Execute Alarm Release & Push-pin UP."
            }
            Command::PrintConfig => "Print current configuration.",
            Command::PrintHelp => "Print usage / list of valid commands.",
        }
    }

    /// Match already-trimmed text against the token table
    ///
    /// Returns the first command (in [`Command::PRIORITY`] order) whose token
    /// equals `text` ignoring ASCII case, or `None` if nothing matches.
    pub fn parse(text: &str) -> Option<Command> {
        Self::PRIORITY
            .iter()
            .copied()
            .find(|cmd| cmd.token().eq_ignore_ascii_case(text))
    }
}
