//! One boot worth of the experiment: classify, reset, arm, park.

use embedded_hal::digital::OutputPin;

use crate::arm::arm;
use crate::baseline::write_baseline;
use crate::classify::{classify, Classification};
use crate::locate::locate_test_sector;
use crate::{Console, CycleCounter, Error, PartitionTable, SectorDevice};

/// Runs the full protocol and never returns.
///
/// `pin` must arrive configured as an output and driven low. Setup and I/O
/// failures halt the boot with a diagnostic instead of a result line; a
/// partial protocol must not feed the external tally. After arming, the CPU
/// parks and waits for the power to go away. Recovery is implicit via
/// reboot.
pub fn run(
    device: &mut impl SectorDevice,
    table: &mut impl PartitionTable,
    pin: &mut impl OutputPin,
    counter: &mut impl CycleCounter,
    console: &mut impl Console,
) -> ! {
    console.line(format_args!("sdtest: starting SD card atomicity test"));

    if let Err(err) = boot_cycle(device, table, pin, counter, console) {
        console.line(format_args!("sdtest: fatal: {err}"));
    }

    park()
}

/// The protocol phases in order, separated from [`run`] so a whole boot can
/// be driven against mock hardware.
pub fn boot_cycle(
    device: &mut impl SectorDevice,
    table: &mut impl PartitionTable,
    pin: &mut impl OutputPin,
    counter: &mut impl CycleCounter,
    console: &mut impl Console,
) -> Result<Classification, Error> {
    let lba = locate_test_sector(table, console)?;
    let outcome = classify(device, console, lba)?;
    write_baseline(device, counter, console, lba)?;
    arm(device, pin, console, lba)?;
    Ok(outcome)
}

/// Absorbing state: hold still until the cutter removes power.
pub fn park() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
