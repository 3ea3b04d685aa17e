//! In-memory stand-in for the SD card, so the whole protocol runs end to end
//! under QEMU without an SD driver. Nothing here survives a power cycle,
//! which also means every boot starts from a freshly imaged card and the
//! classifier reports GARBAGE first.

use plugpull::{Error, Lba, PartitionEntry, PartitionTable, Sector, SectorDevice, SECTOR_LEN};

/// Where the fake layout puts the test partition.
const TEST_LBA: u32 = 2048;

/// A card image holding just the one sector the experiment touches.
pub struct FakeCard {
    test_sector: Sector,
}

impl FakeCard {
    pub fn new() -> FakeCard {
        // arbitrary stale content, matches neither canonical payload
        FakeCard { test_sector: [0xc3; SECTOR_LEN] }
    }
}

impl SectorDevice for FakeCard {
    fn read_sector(&mut self, lba: Lba, buf: &mut Sector) -> Result<(), Error> {
        if lba.0 != TEST_LBA {
            return Err(Error::Read(lba));
        }
        *buf = self.test_sector;
        Ok(())
    }

    fn write_sector(&mut self, lba: Lba, data: &Sector) -> Result<(), Error> {
        if lba.0 != TEST_LBA {
            return Err(Error::Write(lba));
        }
        self.test_sector = *data;
        Ok(())
    }
}

/// Partition table of the fake image: a boot partition and the unformatted
/// test partition behind it.
pub struct FakeTable;

impl PartitionTable for FakeTable {
    fn partition(&mut self, index: u8) -> Result<PartitionEntry, Error> {
        match index {
            0 => Ok(PartitionEntry { lba_start: 64, nsec: TEST_LBA - 64 }),
            1 => Ok(PartitionEntry { lba_start: TEST_LBA, nsec: 1 }),
            _ => Err(Error::PartitionTable),
        }
    }
}
