//! Runs the write-atomicity experiment on a Raspberry Pi 3.
//!
//! GPIO 4 on the header triggers the external cutter, the PL011 UART carries
//! the result lines, and the PMU cycle counter times the baseline write. The
//! card is stood in for by an in-memory image (see [`fake`]) so the whole
//! protocol can be exercised under QEMU's `raspi3b` machine:
//!
//! ```text
//! cargo run --release
//! ```
//!
//! A board with a real cutter swaps [`fake::FakeCard`] and
//! [`fake::FakeTable`] for an SD driver implementing
//! [`plugpull::SectorDevice`] and [`plugpull::PartitionTable`].
#![no_std]
#![no_main]

mod boot;
mod bsp;
mod fake;

use panic_halt as _;

/// Header pin driven high to signal the start of the armed write.
const SIGNAL_PIN: u32 = 4;

#[no_mangle]
pub extern "C" fn kmain() -> ! {
    let mut console = bsp::Uart::init();
    let mut counter = bsp::Cycles::init();
    let mut pin = bsp::Pin::output(SIGNAL_PIN);
    let mut card = fake::FakeCard::new();
    let mut table = fake::FakeTable;

    plugpull::protocol::run(&mut card, &mut table, &mut pin, &mut counter, &mut console)
}
