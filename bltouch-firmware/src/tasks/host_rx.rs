//! Host UART receive task
//!
//! Assembles command lines from the host and hands them to the console.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{with_timeout, Duration};
use embedded_io_async::Read;

use bltouch_protocol::{Line, LineParser};

use crate::channels::LINE_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Idle time after which a partial line is completed without a terminator
const LINE_IDLE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Host RX task - splits the byte stream into lines
#[embassy_executor::task]
pub async fn host_rx_task(mut rx: BufferedUartRx, terminator: u8) {
    info!("Host RX task started");

    let mut parser = LineParser::new(terminator);
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match with_timeout(LINE_IDLE_TIMEOUT, rx.read(&mut buf)).await {
            Ok(Ok(n)) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    if let Some(line) = parser.feed(byte) {
                        deliver(line).await;
                    }
                }
            }
            Ok(Ok(_)) => {
                // No bytes read, continue
            }
            Ok(Err(e)) => {
                warn!("UART read error: {:?}", e);
                parser.reset();
            }
            Err(_) => {
                // Host went quiet mid-line
                if let Some(line) = parser.take() {
                    debug!("Idle timeout, completing partial line");
                    deliver(line).await;
                }
            }
        }
    }
}

/// Pass a line on to the console task
async fn deliver(line: Line) {
    if line.is_truncated() {
        warn!("Line exceeded buffer, kept {} bytes, answering as unknown", line.len());
    }
    LINE_CHANNEL.send(line).await;
}
