//! Z-Min trigger monitor
//!
//! Waits for any edge on the trigger input and reports the level sampled
//! right after it. The edge direction is not used: with a bouncing contact
//! the level may already have flipped back, and the report reflects what
//! the pin reads at handling time. No debouncing is applied.

use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use bltouch_protocol::{TriggerLevel, ZMinStatus};

/// Edge-driven monitor for the Z-Min signal line
pub struct TriggerMonitor<P> {
    pin: P,
}

impl<P> TriggerMonitor<P>
where
    P: InputPin + Wait,
{
    /// Wrap an input pin already configured with its pull-up
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Current level of the trigger line
    pub fn level(&mut self) -> Result<TriggerLevel, P::Error> {
        Ok(TriggerLevel::from(self.pin.is_high()?))
    }

    /// Wait for the next edge and return the status to report
    pub async fn next_status(&mut self) -> Result<ZMinStatus, P::Error> {
        self.pin.wait_for_any_edge().await?;
        Ok(ZMinStatus(self.level()?))
    }
}
