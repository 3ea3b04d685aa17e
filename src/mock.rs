//! Mock hardware for driving whole boots on the bench.
//!
//! All mocks share one [`Trace`] so tests can assert ordering across
//! collaborators — the edge-before-write guarantee is only checkable by
//! interleaving pin and card events in one timeline.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use core::convert::Infallible;
use core::fmt;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::{
    Console, CycleCounter, Error, Lba, PartitionEntry, PartitionTable, Sector, SectorDevice,
    SECTOR_LEN,
};

/// Where the mock layout puts the test partition.
pub const TEST_LBA: u32 = 2048;

/// What an untouched sector reads as. Arbitrary stale content, matching
/// neither canonical payload.
pub const FRESH: Sector = [0xb6; SECTOR_LEN];

/// Everything externally observable about a run, in program order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Event {
    Line(String),
    PinHigh,
    Read(u32),
    Write(u32),
}

type Trace = Rc<RefCell<Vec<Event>>>;

pub struct MockCard {
    sectors: BTreeMap<u32, Sector>,
    trace: Trace,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MockCard {
    fn new(trace: Trace) -> MockCard {
        MockCard {
            sectors: BTreeMap::new(),
            trace,
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// Current content of a sector; unwritten sectors read as [`FRESH`].
    pub fn sector(&self, lba: u32) -> Sector {
        self.sectors.get(&lba).copied().unwrap_or(FRESH)
    }

    pub fn set_sector(&mut self, lba: u32, data: Sector) {
        self.sectors.insert(lba, data);
    }
}

impl SectorDevice for MockCard {
    fn read_sector(&mut self, lba: Lba, buf: &mut Sector) -> Result<(), Error> {
        self.trace.borrow_mut().push(Event::Read(lba.0));
        if self.fail_reads {
            return Err(Error::Read(lba));
        }
        *buf = self.sector(lba.0);
        Ok(())
    }

    fn write_sector(&mut self, lba: Lba, data: &Sector) -> Result<(), Error> {
        self.trace.borrow_mut().push(Event::Write(lba.0));
        if self.fail_writes {
            return Err(Error::Write(lba));
        }
        self.sectors.insert(lba.0, *data);
        Ok(())
    }
}

pub struct MockPin {
    trace: Trace,
    pub high: bool,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        self.trace.borrow_mut().push(Event::PinHigh);
        Ok(())
    }
}

pub struct MockCycles {
    now: u32,
    step: u32,
}

impl MockCycles {
    /// Counter that starts at `now` and advances by `step` per sample.
    pub fn starting_at(now: u32, step: u32) -> MockCycles {
        MockCycles { now, step }
    }
}

impl CycleCounter for MockCycles {
    fn read(&mut self) -> u32 {
        let now = self.now;
        self.now = self.now.wrapping_add(self.step);
        now
    }
}

pub struct MockConsole {
    trace: Trace,
}

impl Console for MockConsole {
    fn line(&mut self, args: fmt::Arguments<'_>) {
        self.trace.borrow_mut().push(Event::Line(args.to_string()));
    }
}

pub struct MockTable {
    pub entries: [Option<PartitionEntry>; 4],
}

impl PartitionTable for MockTable {
    fn partition(&mut self, index: u8) -> Result<PartitionEntry, Error> {
        self.entries
            .get(usize::from(index))
            .copied()
            .flatten()
            .ok_or(Error::PartitionTable)
    }
}

/// A full bench: card, table, pin, counter and console sharing one trace.
///
/// The card starts freshly imaged — a boot partition in entry 0, the
/// unformatted test partition in entry 1, and stale content everywhere.
pub struct Rig {
    pub card: MockCard,
    pub table: MockTable,
    pub pin: MockPin,
    pub cycles: MockCycles,
    pub console: MockConsole,
    trace: Trace,
}

impl Rig {
    pub fn new() -> Rig {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        Rig {
            card: MockCard::new(trace.clone()),
            table: MockTable {
                entries: [
                    Some(PartitionEntry { lba_start: 64, nsec: TEST_LBA - 64 }),
                    Some(PartitionEntry { lba_start: TEST_LBA, nsec: 1 }),
                    None,
                    None,
                ],
            },
            pin: MockPin { trace: trace.clone(), high: false },
            cycles: MockCycles::starting_at(0, 1_000),
            console: MockConsole { trace: trace.clone() },
            trace,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.trace.borrow().clone()
    }

    /// Console output only, in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.trace
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Line(l) => Some(l.clone()),
                _ => None,
            })
            .collect()
    }
}
