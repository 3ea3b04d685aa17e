//! Sector access on top of byte-addressed [`embedded_storage`] backends.

use embedded_storage::Storage;

use crate::{Error, Lba, Sector, SectorDevice, SECTOR_LEN};

/// Adapter exposing any byte-addressed storage as a sector device.
///
/// Useful on the bench, and for cards whose driver already speaks
/// [`embedded_storage::Storage`]. Offsets are `lba * 512`, overflow-checked;
/// an address past the end of a 32-bit byte space fails like any other I/O
/// error.
pub struct StorageDevice<S> {
    inner: S,
}

impl<S> StorageDevice<S> {
    pub fn new(inner: S) -> StorageDevice<S> {
        StorageDevice { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

fn byte_offset(lba: Lba) -> Option<u32> {
    lba.0.checked_mul(SECTOR_LEN as u32)
}

impl<S: Storage> SectorDevice for StorageDevice<S> {
    fn read_sector(&mut self, lba: Lba, buf: &mut Sector) -> Result<(), Error> {
        let offset = byte_offset(lba).ok_or(Error::Read(lba))?;
        self.inner.read(offset, buf).map_err(|_| Error::Read(lba))
    }

    fn write_sector(&mut self, lba: Lba, data: &Sector) -> Result<(), Error> {
        let offset = byte_offset(lba).ok_or(Error::Write(lba))?;
        self.inner.write(offset, data).map_err(|_| Error::Write(lba))
    }
}
