//! Host UART transmit task
//!
//! Drains the outbound pipe into the UART.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::HOST_TX;

/// Chunk size moved from the pipe per write
const TX_CHUNK_SIZE: usize = 64;

/// Host TX task - forwards queued replies to the host
#[embassy_executor::task]
pub async fn host_tx_task(mut tx: BufferedUartTx) {
    info!("Host TX task started");

    let mut buf = [0u8; TX_CHUNK_SIZE];

    loop {
        let n = HOST_TX.read(&mut buf).await;
        if let Err(e) = tx.write_all(&buf[..n]).await {
            warn!("UART write error: {:?}", e);
        } else {
            trace!("TX: {} bytes", n);
        }
    }
}
