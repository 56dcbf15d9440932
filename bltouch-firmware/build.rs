//! Build script for bltouch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates probe.toml at compile time
//! - Generates the probe configuration constant and pin selection macros

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use bltouch_core::ProbeConfig;

/// Number of user GPIOs on the RP2040
const GPIO_COUNT: u8 = 30;

/// GPIOs taken by UART0 for the host link
const HOST_UART_PINS: [u8; 2] = [0, 1];

fn main() {
    setup_linker();
    let config = load_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read, parse and validate probe.toml
fn load_config() -> ProbeConfig {
    println!("cargo:rerun-if-changed=probe.toml");

    let config_path = Path::new("probe.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: probe.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a probe.toml configuration file.          ║\n\
            ║  Please create one in the bltouch-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read probe.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax, missing keys, unknown keys and values that overflow their
    // field (e.g. an angle of 300) are all reported here
    let config: ProbeConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid probe.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    if let Err(e) = config.validate() {
        errors.push(e.to_string());
    }
    errors.extend(validate_board_pins(&config));

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in probe.toml                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=probe.toml validated successfully");
    config
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// RP2040 pin rules: the GPIO must exist and must not collide with the
/// host UART. Every GPIO has a PWM channel, so no further check is needed
/// for the control wire.
fn validate_board_pins(config: &ProbeConfig) -> Vec<String> {
    let mut errors = Vec::new();

    for (name, pin) in [
        ("pins.control", config.pins.control),
        ("pins.z_min", config.pins.z_min),
    ] {
        if pin >= GPIO_COUNT {
            errors.push(format!(
                "{}: gpio{} does not exist (0-{})",
                name,
                pin,
                GPIO_COUNT - 1
            ));
        } else if HOST_UART_PINS.contains(&pin) {
            errors.push(format!("{}: gpio{} is used by the host UART", name, pin));
        }
    }

    errors
}

/// PWM slice and channel letter driving a GPIO
fn pwm_channel(pin: u8) -> (u8, char) {
    let slice = (pin / 2) % 8;
    let channel = if pin % 2 == 0 { 'a' } else { 'b' };
    (slice, channel)
}

/// Write `$OUT_DIR/probe_config.rs`
fn generate_config(config: &ProbeConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let (slice, channel) = pwm_channel(config.pins.control);

    let source = format!(
        "// Generated by build.rs from probe.toml\n\
        \n\
        /// Configuration compiled in from probe.toml\n\
        pub const PROBE_CONFIG: ProbeConfig = ProbeConfig {{\n\
        \x20   link: LinkConfig {{\n\
        \x20       baud_rate: {baud},\n\
        \x20       terminator: {terminator:?},\n\
        \x20   }},\n\
        \x20   pins: PinAssignment {{\n\
        \x20       control: {control},\n\
        \x20       z_min: {z_min},\n\
        \x20   }},\n\
        \x20   angles: AngleTable {{\n\
        \x20       push_down: {push_down},\n\
        \x20       push_up: {push_up},\n\
        \x20       self_test: {self_test},\n\
        \x20       alarm_release: {alarm_release},\n\
        \x20   }},\n\
        }};\n\
        \n\
        /// PWM output for the control wire (gpio{control}, slice {slice} channel {channel_upper})\n\
        macro_rules! control_pwm {{\n\
        \x20   ($p:ident, $config:expr) => {{\n\
        \x20       embassy_rp::pwm::Pwm::new_output_{channel}($p.PWM_SLICE{slice}, $p.PIN_{control}, $config)\n\
        \x20           .split()\n\
        \x20           .{output_index}\n\
        \x20   }};\n\
        }}\n\
        \n\
        /// Input pin for the Z-Min signal (gpio{z_min})\n\
        macro_rules! z_min_pin {{\n\
        \x20   ($p:ident) => {{\n\
        \x20       $p.PIN_{z_min}\n\
        \x20   }};\n\
        }}\n",
        baud = config.link.baud_rate,
        terminator = config.link.terminator,
        control = config.pins.control,
        z_min = config.pins.z_min,
        push_down = config.angles.push_down,
        push_up = config.angles.push_up,
        self_test = config.angles.self_test,
        alarm_release = config.angles.alarm_release,
        slice = slice,
        channel = channel,
        channel_upper = channel.to_ascii_uppercase(),
        output_index = if channel == 'a' { 0 } else { 1 },
    );

    let mut f = File::create(out_dir.join("probe_config.rs")).unwrap();
    f.write_all(source.as_bytes()).unwrap();
}
