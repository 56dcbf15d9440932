//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::pipe::Pipe;

use bltouch_protocol::Line;

/// Channel capacity for complete command lines
const LINE_CHANNEL_SIZE: usize = 4;

/// Outbound byte buffer towards the host
///
/// Holds a full console reply plus a backlog of Z-Min reports.
const HOST_TX_SIZE: usize = 1024;

/// Command lines assembled by the host RX task
pub static LINE_CHANNEL: Channel<CriticalSectionRawMutex, Line, LINE_CHANNEL_SIZE> =
    Channel::new();

/// Bytes waiting to be written to the host UART
///
/// Console replies are written with `write_all` and always complete in order.
/// Z-Min reports use `try_write` and are dropped whole when they do not fit.
pub static HOST_TX: Pipe<CriticalSectionRawMutex, HOST_TX_SIZE> = Pipe::new();
