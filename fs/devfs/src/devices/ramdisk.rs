//! TEAM_503: RAM disk behind /dev/initrd
//!
//! Fixed-size, zero-filled at creation. Accesses past the end are cut
//! short; an access starting at or past the end transfers nothing.

extern crate alloc;

use alloc::vec::Vec;
use spin::Mutex;

use los_vfs::{VfsError, VfsResult};

use super::BlockDevice;

pub struct RamDisk {
    data: Mutex<Vec<u8>>,
}

impl RamDisk {
    pub fn new(size: usize) -> Self {
        Self {
            data: Mutex::new(alloc::vec![0; size]),
        }
    }

    /// Disk with `image` as its initial contents
    pub fn from_image(image: &[u8]) -> VfsResult<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(image.len())
            .map_err(|_| VfsError::OutOfMemory)?;
        data.extend_from_slice(image);
        Ok(Self {
            data: Mutex::new(data),
        })
    }

    pub fn size(&self) -> usize {
        self.data.lock().len()
    }

    /// Byte range `[start, end)` an access of `len` bytes at `offset` covers
    fn span(size: usize, offset: u64, len: usize) -> (usize, usize) {
        let start = usize::try_from(offset).unwrap_or(usize::MAX).min(size);
        let end = start.saturating_add(len).min(size);
        (start, end)
    }
}

impl BlockDevice for RamDisk {
    fn read(&self, buf: &mut [u8], offset: u64) -> VfsResult<usize> {
        let data = self.data.lock();
        let (start, end) = Self::span(data.len(), offset, buf.len());
        let n = end - start;
        buf[..n].copy_from_slice(&data[start..end]);
        Ok(n)
    }

    fn write(&self, buf: &[u8], offset: u64) -> VfsResult<usize> {
        let mut data = self.data.lock();
        let (start, end) = Self::span(data.len(), offset, buf.len());
        let n = end - start;
        data[start..end].copy_from_slice(&buf[..n]);
        Ok(n)
    }
}
