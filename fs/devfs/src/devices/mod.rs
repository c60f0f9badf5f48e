//! TEAM_503: Drivers reachable through devfs
//!
//! devfs only calls the read/write entry points of its drivers. Stream
//! devices (console and TTY lines) take the device number and ignore the
//! offset; block devices (the RAM disk) are byte-addressed.

extern crate alloc;

pub mod ramdisk;
pub mod tty;

use alloc::sync::Arc;
use core::fmt;

use los_vfs::devno::known::*;
use los_vfs::{DeviceId, VfsResult};

use crate::config::DevfsConfig;

pub use ramdisk::RamDisk;
pub use tty::TtyLines;

/// Character stream driver, one instance serving several device numbers
pub trait StreamDevice: Send + Sync {
    /// Read up to `buf.len()` bytes from the line `dev`
    fn read(&self, dev: DeviceId, buf: &mut [u8]) -> VfsResult<usize>;

    /// Write `buf` to the line `dev`
    fn write(&self, dev: DeviceId, buf: &[u8]) -> VfsResult<usize>;
}

/// Byte-addressed storage driver
pub trait BlockDevice: Send + Sync {
    /// Read into `buf` starting at byte `offset`
    fn read(&self, buf: &mut [u8], offset: u64) -> VfsResult<usize>;

    /// Write `buf` starting at byte `offset`
    fn write(&self, buf: &[u8], offset: u64) -> VfsResult<usize>;
}

/// How a device number is served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// Console and TTY lines
    Stream,
    /// The RAM disk behind `initrd`
    Ramdisk,
    /// Endless source of zero bytes
    Zero,
    /// Discards writes, reads nothing
    Null,
}

impl DeviceClass {
    /// Class of `dev`, `None` for numbers devfs does not serve
    pub fn of(dev: DeviceId) -> Option<Self> {
        match dev {
            DEV_TTY | DEV_CONSOLE | DEV_CONSOLE1 | DEV_CONSOLE2 | DEV_CONSOLE3 | DEV_CONSOLE4 => {
                Some(Self::Stream)
            }
            DEV_INITRD => Some(Self::Ramdisk),
            DEV_ZERO => Some(Self::Zero),
            DEV_NULL => Some(Self::Null),
            _ => None,
        }
    }

    /// Block-addressed classes get a block-device node
    pub fn is_block(self) -> bool {
        self == Self::Ramdisk
    }
}

/// Driver handles a devfs instance dispatches to
#[derive(Clone)]
pub struct DeviceDrivers {
    pub tty: Arc<dyn StreamDevice>,
    pub ramdisk: Arc<dyn BlockDevice>,
}

impl DeviceDrivers {
    pub fn new(tty: Arc<dyn StreamDevice>, ramdisk: Arc<dyn BlockDevice>) -> Self {
        Self { tty, ramdisk }
    }

    /// The in-tree TTY and RAM disk drivers, sized from `config`
    pub fn builtin(config: &DevfsConfig) -> Self {
        Self {
            tty: Arc::new(TtyLines::new(config.tty_buffer_size)),
            ramdisk: Arc::new(RamDisk::new(config.ramdisk_size)),
        }
    }
}

impl fmt::Debug for DeviceDrivers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceDrivers").finish_non_exhaustive()
    }
}
