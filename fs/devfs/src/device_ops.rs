//! TEAM_503: Device node InodeOps and the read/write dispatcher
//!
//! Requests are routed by device number to the driver serving that class.
//! The dispatcher keeps no state of its own.

use los_vfs::inode::Inode;
use los_vfs::ops::InodeOps;
use los_vfs::{DeviceId, VfsError, VfsResult};

use crate::devices::{DeviceClass, DeviceDrivers};
use crate::superblock::Devfs;

/// Read `buf.len()` bytes from `dev` at `offset`
pub fn dispatch_read(
    drivers: &DeviceDrivers,
    dev: DeviceId,
    buf: &mut [u8],
    offset: u64,
) -> VfsResult<usize> {
    log::trace!("[DEVFS] read dev={} len={} off={}", dev, buf.len(), offset);
    match DeviceClass::of(dev).ok_or(VfsError::NoSuchDevice)? {
        DeviceClass::Stream => drivers.tty.read(dev, buf),
        DeviceClass::Ramdisk => drivers.ramdisk.read(buf, offset),
        DeviceClass::Zero => {
            buf.fill(0);
            Ok(buf.len())
        }
        // Reports the full length, leaves buf alone
        DeviceClass::Null => Ok(buf.len()),
    }
}

/// Write `buf` to `dev` at `offset`
pub fn dispatch_write(
    drivers: &DeviceDrivers,
    dev: DeviceId,
    buf: &[u8],
    offset: u64,
) -> VfsResult<usize> {
    log::trace!("[DEVFS] write dev={} len={} off={}", dev, buf.len(), offset);
    match DeviceClass::of(dev).ok_or(VfsError::NoSuchDevice)? {
        DeviceClass::Stream => drivers.tty.write(dev, buf),
        DeviceClass::Ramdisk => drivers.ramdisk.write(buf, offset),
        DeviceClass::Zero | DeviceClass::Null => Ok(buf.len()),
    }
}

/// InodeOps for device nodes
///
/// Recovers the owning `Devfs` through the inode's superblock and hands the
/// request to its drivers.
pub struct DevfsDeviceOps;

impl DevfsDeviceOps {
    fn bound_device(inode: &Inode) -> VfsResult<DeviceId> {
        inode.dev().ok_or(VfsError::NoSuchDevice)
    }
}

impl InodeOps for DevfsDeviceOps {
    fn read(&self, inode: &Inode, offset: u64, buf: &mut [u8]) -> VfsResult<usize> {
        let dev = Self::bound_device(inode)?;
        let sb = inode.superblock()?;
        let devfs = Devfs::downcast(&*sb)?;
        dispatch_read(devfs.drivers(), dev, buf, offset)
    }

    fn write(&self, inode: &Inode, offset: u64, buf: &[u8]) -> VfsResult<usize> {
        let dev = Self::bound_device(inode)?;
        let sb = inode.superblock()?;
        let devfs = Devfs::downcast(&*sb)?;
        dispatch_write(devfs.drivers(), dev, buf, offset)
    }
}

/// Static instance for use in inodes
pub static DEVFS_DEVICE_OPS: DevfsDeviceOps = DevfsDeviceOps;
