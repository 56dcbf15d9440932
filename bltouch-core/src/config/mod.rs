//! Configuration types
//!
//! Board-agnostic configuration structures. The firmware bakes one
//! [`ProbeConfig`] into the binary at build time from `probe.toml`.

pub mod report;
pub mod types;

pub use report::ConfigReport;
pub use types::*;
