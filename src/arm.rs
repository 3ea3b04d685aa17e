//! The armed write: raise the trigger pin, then push `NEW` at the card.

use core::sync::atomic::{fence, Ordering};

use embedded_hal::digital::OutputPin;

use crate::pattern::NEW;
use crate::{Console, Error, Lba, SectorDevice};

/// Emits the end-of-log marker, raises the trigger pin and issues the `NEW`
/// write, in that exact order.
///
/// The marker goes out first so the log monitor detaches before arming;
/// console traffic after the edge could delay the cut. The fence keeps the
/// pin store architecturally committed before the driver puts the first
/// write command on the bus — if the write could start first, the cutter
/// would miss its window entirely.
///
/// The caller parks the CPU afterwards. If the cutter never fires, the write
/// completes, the sector is left as `NEW`, and the next boot classifies it
/// as such.
pub fn arm(
    device: &mut impl SectorDevice,
    pin: &mut impl OutputPin,
    console: &mut impl Console,
    lba: Lba,
) -> Result<(), Error> {
    console.line(format_args!("DONE!!!"));

    pin.set_high().map_err(|_| Error::Signal)?;
    fence(Ordering::SeqCst);

    device.write_sector(lba, &NEW)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Event, Rig, TEST_LBA};
    use crate::pattern::OLD;

    #[test]
    fn leaves_the_sector_at_the_armed_payload() {
        let mut rig = Rig::new();
        rig.card.set_sector(TEST_LBA, OLD);
        arm(&mut rig.card, &mut rig.pin, &mut rig.console, Lba(TEST_LBA)).unwrap();
        assert_eq!(rig.card.sector(TEST_LBA), NEW);
        assert!(rig.pin.high);
    }

    #[test]
    fn marker_then_edge_then_write() {
        let mut rig = Rig::new();
        arm(&mut rig.card, &mut rig.pin, &mut rig.console, Lba(TEST_LBA)).unwrap();

        let events = rig.events();
        let marker = events
            .iter()
            .position(|e| matches!(e, Event::Line(l) if l == "DONE!!!"))
            .unwrap();
        let edge = events.iter().position(|e| *e == Event::PinHigh).unwrap();
        let write = events
            .iter()
            .position(|e| *e == Event::Write(TEST_LBA))
            .unwrap();

        assert!(marker < edge);
        assert!(edge < write);
    }

    #[test]
    fn failed_write_is_fatal_with_the_pin_already_high() {
        let mut rig = Rig::new();
        rig.card.fail_writes = true;
        let err =
            arm(&mut rig.card, &mut rig.pin, &mut rig.console, Lba(TEST_LBA)).unwrap_err();
        assert_eq!(err, Error::Write(Lba(TEST_LBA)));
        assert!(rig.pin.high);
    }
}
