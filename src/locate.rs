//! Finds the one sector the experiment is allowed to clobber.

use crate::{Console, Error, Lba, PartitionTable};

/// Index of the partition sacrificed to the experiment.
///
/// Entry 0 carries the boot payload. Entry 1 must be left unformatted so no
/// other actor ever touches its first sector between runs.
pub const TEST_PARTITION: u8 = 1;

/// Looks up the test partition and returns the address of its first sector.
///
/// A missing or degenerate entry is a setup problem, not an experimental
/// outcome, and aborts the boot before any result line is printed.
pub fn locate_test_sector(
    table: &mut impl PartitionTable,
    console: &mut impl Console,
) -> Result<Lba, Error> {
    let entry = table.partition(TEST_PARTITION)?;
    console.line(format_args!(
        "sdtest: test partition: lba_start={} nsec={}",
        entry.lba_start, entry.nsec
    ));

    if entry.lba_start == 0 {
        return Err(Error::PartitionUnallocated);
    }
    if entry.nsec == 0 {
        return Err(Error::PartitionEmpty);
    }

    Ok(Lba(entry.lba_start))
}
