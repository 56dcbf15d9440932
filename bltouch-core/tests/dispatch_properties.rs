//! Property tests for the console dispatcher
//!
//! Lines go through the same framing as on the wire before being
//! dispatched.

use bltouch_core::{Dispatcher, Outcome, ProbeActuator, ProbeConfig};
use bltouch_protocol::{Command, Line, LineParser, ProbeCommand, MAX_LINE_LEN};
use proptest::prelude::*;

#[derive(Default)]
struct RecordingActuator {
    calls: Vec<u8>,
}

impl ProbeActuator for RecordingActuator {
    type Error = core::convert::Infallible;

    fn set_angle(&mut self, degrees: u8) -> Result<(), Self::Error> {
        self.calls.push(degrees);
        Ok(())
    }

    fn angle(&self) -> Option<u8> {
        self.calls.last().copied()
    }
}

/// Frame `bytes` as one terminated line
fn frame(bytes: &[u8]) -> Line {
    let mut parser = LineParser::new(b'\n');
    assert!(parser.feed_bytes(bytes).is_none(), "terminator inside test input");
    parser.feed(b'\n').expect("terminated line")
}

/// Reply, then actuate, the way the console task does
fn handle<A: ProbeActuator>(dispatcher: &mut Dispatcher<'_, A>, line: &Line, out: &mut String) -> Outcome
where
    A::Error: core::fmt::Debug,
{
    let outcome = dispatcher.respond(line, out).unwrap();
    dispatcher.execute(outcome).unwrap();
    outcome
}

fn dispatch_bytes(bytes: &[u8]) -> (Outcome, String, Vec<u8>) {
    let config = ProbeConfig::DEFAULT;
    let mut actuator = RecordingActuator::default();
    let mut dispatcher = Dispatcher::new(&config, &mut actuator);

    let mut out = String::new();
    let outcome = handle(&mut dispatcher, &frame(bytes), &mut out);
    (outcome, out, actuator.calls)
}

fn dispatch(text: &str) -> (Outcome, String, Vec<u8>) {
    dispatch_bytes(text.as_bytes())
}

fn padding() -> impl Strategy<Value = String> {
    "[ \t\r\x0b\x0c]{0,4}"
}

proptest! {
    #[test]
    fn any_casing_matches_lowercase(index in 0usize..6, upper in any::<bool>()) {
        let token = Command::PRIORITY[index].token();
        let variant = if upper { token.to_ascii_uppercase() } else { token.to_string() };

        prop_assert_eq!(dispatch(&variant), dispatch(token));
    }

    #[test]
    fn surrounding_whitespace_is_ignored(
        index in 0usize..6,
        before in padding(),
        after in padding(),
    ) {
        let token = Command::PRIORITY[index].token();
        let padded = format!("{before}{token}{after}");

        prop_assert_eq!(dispatch(&padded), dispatch(token));
    }

    #[test]
    fn long_padding_still_dispatches(
        index in 0usize..4,
        before in 0usize..200,
        after in 0usize..200,
    ) {
        let command = ProbeCommand::ALL[index];
        let token = Command::Probe(command).token();
        let padded = format!("{}{token}{}", " ".repeat(before), "\t".repeat(after));

        let (outcome, _, calls) = dispatch(&padded);
        let angle = ProbeConfig::DEFAULT.angles.angle_for(command);
        prop_assert_eq!(outcome, Outcome::Actuated { command, angle });
        prop_assert_eq!(calls, vec![angle]);
    }

    #[test]
    fn unknown_text_is_echoed_without_actuation(text in "[!-~][ -~]{0,30}[!-~]|[!-~]") {
        prop_assume!(Command::parse(&text).is_none());

        let (outcome, out, calls) = dispatch(&text);
        prop_assert_eq!(outcome, Outcome::Unknown);
        prop_assert!(calls.is_empty());
        let expected = format!("Unknown command '{text}'. Use 'h' for list of valid commands.\r\n");
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn unicode_text_is_echoed_verbatim(text in "\\PC{1,16}") {
        let trimmed = text.trim();
        prop_assume!(!trimmed.is_empty() && Command::parse(trimmed).is_none());

        let (outcome, out, calls) = dispatch(&text);
        prop_assert_eq!(outcome, Outcome::Unknown);
        prop_assert!(calls.is_empty());
        let expected = format!("Unknown command '{trimmed}'. Use 'h' for list of valid commands.\r\n");
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn overlong_text_never_actuates(
        index in 0usize..6,
        gap in MAX_LINE_LEN..200,
        tail in "[!-~]{1,16}",
    ) {
        // A token followed, past the cap, by more text is not that token
        let token = Command::PRIORITY[index].token();
        let text = format!("{token}{}{tail}", " ".repeat(gap));

        let (outcome, out, calls) = dispatch(&text);
        prop_assert_eq!(outcome, Outcome::Unknown);
        prop_assert!(calls.is_empty());
        let expected = format!("Unknown command '{token}'. Use 'h' for list of valid commands.\r\n");
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn whitespace_only_lines_do_nothing(text in "[ \t\r\x0b\x0c]{0,100}") {
        let (outcome, out, calls) = dispatch(&text);
        prop_assert_eq!(outcome, Outcome::Ignored);
        prop_assert!(out.is_empty());
        prop_assert!(calls.is_empty());
    }

    #[test]
    fn repeated_commands_repeat_exactly(index in 0usize..4, count in 1usize..10) {
        let command = ProbeCommand::ALL[index];
        let token = Command::Probe(command).token();
        let angle = ProbeConfig::DEFAULT.angles.angle_for(command);
        let line = frame(token.as_bytes());

        let config = ProbeConfig::DEFAULT;
        let mut actuator = RecordingActuator::default();
        let mut dispatcher = Dispatcher::new(&config, &mut actuator);
        let mut out = String::new();
        for _ in 0..count {
            let outcome = handle(&mut dispatcher, &line, &mut out);
            prop_assert_eq!(outcome, Outcome::Actuated { command, angle });
        }

        prop_assert_eq!(actuator.calls, vec![angle; count]);
        prop_assert_eq!(out, format!("{}\r\n", command.status()).repeat(count));
    }
}

#[test]
fn non_ascii_reply_is_not_mangled() {
    let (outcome, out, calls) = dispatch("héllo");
    assert_eq!(outcome, Outcome::Unknown);
    assert!(calls.is_empty());
    assert_eq!(
        out,
        "Unknown command 'héllo'. Use 'h' for list of valid commands.\r\n"
    );
}

#[test]
fn vertical_tab_padding_is_trimmed() {
    let (outcome, _, calls) = dispatch_bytes(b"d\x0b");
    assert_eq!(
        outcome,
        Outcome::Actuated {
            command: ProbeCommand::PushDown,
            angle: 10
        }
    );
    assert_eq!(calls, vec![10]);
}

#[test]
fn config_report_lists_every_value() {
    let (outcome, out, calls) = dispatch("c");
    let config = ProbeConfig::DEFAULT;

    assert_eq!(outcome, Outcome::PrintedConfig);
    assert!(calls.is_empty());
    for value in [
        config.link.baud_rate,
        config.pins.control as u32,
        config.pins.z_min as u32,
        config.angles.push_down as u32,
        config.angles.push_up as u32,
        config.angles.self_test as u32,
        config.angles.alarm_release as u32,
    ] {
        assert!(out.contains(&value.to_string()), "missing {value} in {out}");
    }
}

#[test]
fn startup_greeting_precedes_commands() {
    let config = ProbeConfig::DEFAULT;
    let mut actuator = RecordingActuator::default();
    let mut dispatcher = Dispatcher::new(&config, &mut actuator);

    let mut out = String::new();
    dispatcher.greet(&mut out).unwrap();
    let greeting_len = out.len();
    handle(&mut dispatcher, &frame(b"d"), &mut out);

    let (_, help, _) = dispatch("h");
    assert!(out.starts_with("==== BLTouch tester started ====\r\n"));
    assert_eq!(&out[..greeting_len], format!("==== BLTouch tester started ====\r\n{help}"));
    assert_eq!(&out[greeting_len..], "Executing Push-pin Down / Probe start\r\n");
}
