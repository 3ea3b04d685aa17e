//! Decides what the previous run left behind in the test sector.

use core::fmt;

use crate::pattern::{NEW, OLD};
use crate::{Console, Error, Lba, Sector, SectorDevice, SECTOR_LEN};

/// What the test sector held when this boot examined it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Classification {
    /// The sector equals the baseline payload byte for byte.
    Old,
    /// The sector equals the armed payload byte for byte.
    New,
    /// Anything else: a mixture left by an interrupted write, or stale
    /// content on a card that has not been through a run yet.
    Garbage,
}

impl Classification {
    /// Pure byte-wise comparison against the two canonical payloads.
    ///
    /// The payloads disagree in every byte, so at most one comparison can
    /// match.
    pub fn of(buf: &Sector) -> Classification {
        if *buf == OLD {
            Classification::Old
        } else if *buf == NEW {
            Classification::New
        } else {
            Classification::Garbage
        }
    }

    /// Stable tag used in the console protocol.
    pub fn tag(self) -> &'static str {
        match self {
            Classification::Old => "OLD",
            Classification::New => "NEW",
            Classification::Garbage => "GARBAGE",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Reads the test sector and reports what it holds.
///
/// Exactly one `SDTEST-RESULT:` line goes out per boot. A failed read aborts
/// before the line is printed; a guessed result would poison the external
/// tally. The sector is never written here.
pub fn classify(
    device: &mut impl SectorDevice,
    console: &mut impl Console,
    lba: Lba,
) -> Result<Classification, Error> {
    let mut buf = [0u8; SECTOR_LEN];
    device.read_sector(lba, &mut buf)?;

    let outcome = Classification::of(&buf);
    console.line(format_args!("SDTEST-RESULT: {outcome}"));
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;
    use crate::mock::{Rig, TEST_LBA};

    #[test]
    fn canonical_payloads_classify_as_themselves() {
        assert_eq!(Classification::of(&OLD), Classification::Old);
        assert_eq!(Classification::of(&NEW), Classification::New);
    }

    #[test]
    fn arbitrary_content_classifies_as_garbage() {
        assert_eq!(Classification::of(&[0x00; SECTOR_LEN]), Classification::Garbage);
        assert_eq!(Classification::of(&[0xff; SECTOR_LEN]), Classification::Garbage);
    }

    #[test]
    fn single_byte_flip_classifies_as_garbage() {
        let mut buf = OLD;
        buf[7] = 0x00;
        assert_eq!(Classification::of(&buf), Classification::Garbage);

        let mut buf = NEW;
        buf[511] ^= 0x01;
        assert_eq!(Classification::of(&buf), Classification::Garbage);
    }

    #[test]
    fn emits_exactly_one_result_line() {
        let mut rig = Rig::new();
        rig.card.set_sector(TEST_LBA, OLD);

        let outcome = classify(&mut rig.card, &mut rig.console, Lba(TEST_LBA)).unwrap();
        assert_eq!(outcome, Classification::Old);

        let results: Vec<_> = rig
            .lines()
            .into_iter()
            .filter(|l| l.starts_with("SDTEST-RESULT: "))
            .collect();
        assert_eq!(results, ["SDTEST-RESULT: OLD"]);
    }

    #[test]
    fn failed_read_aborts_without_a_result_line() {
        let mut rig = Rig::new();
        rig.card.fail_reads = true;

        let err = classify(&mut rig.card, &mut rig.console, Lba(TEST_LBA)).unwrap_err();
        assert_eq!(err, Error::Read(Lba(TEST_LBA)));
        assert!(rig.lines().is_empty());
    }
}
