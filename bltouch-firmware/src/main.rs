//! BLTouch tester firmware
//!
//! Drives a BLTouch (or clone) probe from a host serial console on an
//! RP2040 board. Single-character commands move the push-pin through the
//! servo control wire, and every edge on the Z-Min signal wire is reported
//! back to the host.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::Config as PwmConfig;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use bltouch_core::Dispatcher;
use bltouch_drivers::servo::{Servo, ServoConfig};

#[macro_use]
mod probe;
mod channels;
mod tasks;

use crate::probe::PROBE;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// PWM clock divider; keeps a 50 Hz frame within the 16-bit counter
const PWM_DIVIDER: u8 = 64;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("BLTouch tester starting...");

    // build.rs already rejected invalid values; this only guards a
    // hand-edited generated file
    if let Err(e) = PROBE.validate() {
        error!("Invalid probe configuration: {}", e);
    }
    info!(
        "Config: {} bps, control=gpio{}, z_min=gpio{}",
        PROBE.link.baud_rate, PROBE.pins.control, PROBE.pins.z_min
    );

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup UART for the host console
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = PROBE.link.baud_rate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for host console");

    // Setup PWM for the servo control wire
    // Slice and channel follow the control pin chosen in probe.toml
    let servo_config = ServoConfig::default();
    let top = pwm_top(servo_config.frequency_hz());
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = PWM_DIVIDER.into();
    pwm_config.top = top;

    let pwm = unwrap!(control_pwm!(p, pwm_config));
    let servo = Servo::new(pwm, servo_config);
    let dispatcher = Dispatcher::new(&PROBE, servo);

    info!("Servo PWM initialized (top={})", top);

    // Setup Z-Min input
    // The probe output is open-drain, so the line idles high on the pull-up
    let z_min = Input::new(z_min_pin!(p), Pull::Up);

    // Spawn tasks
    spawner.spawn(tasks::host_tx_task(tx)).unwrap();
    spawner.spawn(tasks::host_rx_task(rx, PROBE.link.terminator_byte())).unwrap();
    spawner.spawn(tasks::console_task(dispatcher)).unwrap();
    spawner.spawn(tasks::z_min_task(z_min)).unwrap();

    info!("All tasks spawned");
}

/// Counter wrap value giving `frequency_hz` PWM frames
fn pwm_top(frequency_hz: u32) -> u16 {
    let counts = embassy_rp::clocks::clk_sys_freq() / PWM_DIVIDER as u32 / frequency_hz;
    counts.saturating_sub(1).min(u16::MAX as u32) as u16
}
