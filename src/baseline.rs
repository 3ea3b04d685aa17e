//! Resets the test sector to the baseline payload and times the write.

use crate::pattern::OLD;
use crate::{Console, CycleCounter, Error, Lba, SectorDevice};

/// Writes `OLD` to the test sector and prints how many counter ticks the
/// write took.
///
/// The elapsed time bounds the window a cut can land in mid-write, and is the
/// proxy for how long the armed write will take. The subtraction wraps, so a
/// counter rollover between the two samples still yields the right distance.
/// The write must stick before the pin ever rises; a baseline that is not
/// durable would make the next boot's OLD reading ambiguous.
pub fn write_baseline(
    device: &mut impl SectorDevice,
    counter: &mut impl CycleCounter,
    console: &mut impl Console,
    lba: Lba,
) -> Result<(), Error> {
    let start = counter.read();
    device.write_sector(lba, &OLD)?;
    let end = counter.read();

    console.line(format_args!("SDTEST-TIME: {}", end.wrapping_sub(start)));
    Ok(())
}
