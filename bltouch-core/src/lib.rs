//! Board-agnostic core logic for the BLTouch tester firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Probe configuration (link, pins, angle table) and its validation
//! - The probe actuator trait implemented by servo drivers
//! - The console command dispatcher
//! - The Z-Min trigger monitor

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod traits;
pub mod trigger;

pub use config::{AngleTable, ConfigError, ConfigReport, LinkConfig, PinAssignment, ProbeConfig};
pub use dispatch::{Dispatcher, Outcome};
pub use traits::ProbeActuator;
pub use trigger::TriggerMonitor;
