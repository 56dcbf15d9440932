//! Z-Min monitor task
//!
//! Reports every edge on the probe's trigger wire to the host.

use core::fmt::Write;

use defmt::*;
use embassy_rp::gpio::Input;
use heapless::String;

use bltouch_core::TriggerMonitor;
use bltouch_protocol::ZMinStatus;

use crate::channels::HOST_TX;

/// Z-Min task - waits for trigger edges and queues a status line for each
#[embassy_executor::task]
pub async fn z_min_task(pin: Input<'static>) {
    info!("Z-Min monitor task started");

    let mut monitor = TriggerMonitor::new(pin);

    loop {
        match monitor.next_status().await {
            Ok(status) => report(status),
            Err(e) => match e {},
        }
    }
}

/// Queue a status line without waiting on the host
///
/// A report that does not fit the outbound pipe is dropped whole rather
/// than split.
fn report(status: ZMinStatus) {
    debug!("Z-Min edge: {}", status.0);

    let mut text: String<{ ZMinStatus::MAX_LEN }> = String::new();
    if write!(text, "{}", status).is_err() {
        return;
    }

    if HOST_TX.free_capacity() < text.len() {
        warn!("Host TX full, dropping Z-Min report");
        return;
    }

    if HOST_TX.try_write(text.as_bytes()).is_err() {
        warn!("Host TX full, dropping Z-Min report");
    }
}
