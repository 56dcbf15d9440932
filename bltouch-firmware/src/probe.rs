//! Probe configuration compiled in from probe.toml
//!
//! build.rs validates probe.toml and generates `PROBE_CONFIG` together with
//! the `control_pwm!` and `z_min_pin!` macros that pick the matching
//! peripherals out of `embassy_rp::Peripherals`.

use bltouch_core::config::{AngleTable, LinkConfig, PinAssignment, ProbeConfig};

include!(concat!(env!("OUT_DIR"), "/probe_config.rs"));

/// Device context shared by every task
pub static PROBE: ProbeConfig = PROBE_CONFIG;
