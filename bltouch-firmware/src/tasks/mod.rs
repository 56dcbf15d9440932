//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod console;
pub mod host_rx;
pub mod host_tx;
pub mod z_min;

pub use console::console_task;
pub use host_rx::host_rx_task;
pub use host_tx::host_tx_task;
pub use z_min::z_min_task;
