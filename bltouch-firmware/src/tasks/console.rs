//! Console task
//!
//! Greets the host, then runs every received line through the dispatcher.
//! Each reply is queued for the host in one piece before the servo is
//! commanded, so a probe command's status line precedes the movement it
//! announces.

use defmt::*;
use embassy_rp::pwm::PwmOutput;
use heapless::String;

use bltouch_core::{Dispatcher, Outcome};
use bltouch_drivers::servo::Servo;

use crate::channels::{HOST_TX, LINE_CHANNEL};

/// Largest single reply (configuration report or startup greeting)
const REPLY_CAPACITY: usize = 512;

/// Servo on the control wire's PWM channel
pub type ProbeServo = Servo<PwmOutput<'static>>;

/// Console task - executes host commands
#[embassy_executor::task]
pub async fn console_task(mut dispatcher: Dispatcher<'static, ProbeServo>) {
    info!("Console task started");

    let mut reply: String<REPLY_CAPACITY> = String::new();

    if dispatcher.greet(&mut reply).is_err() {
        error!("Greeting exceeds reply buffer");
    }
    HOST_TX.write_all(reply.as_bytes()).await;

    loop {
        let line = LINE_CHANNEL.receive().await;
        reply.clear();
        let outcome = match dispatcher.respond(&line, &mut reply) {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!("Reply to {} exceeds reply buffer", line);
                Outcome::Ignored
            }
        };

        HOST_TX.write_all(reply.as_bytes()).await;

        if let Err(e) = dispatcher.execute(outcome) {
            error!("Servo update failed: {}", Debug2Format(&e));
        }
        debug!("{} -> {}", line, outcome);
    }
}
