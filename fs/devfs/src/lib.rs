#![cfg_attr(not(test), no_std)]
//! TEAM_503: devfs: Device filesystem for LevitateOS.
//!
//! Makes devices addressable as nodes of a flat `/dev` directory:
//! - `/dev/tty`, `/dev/console` (5:0, 5:1) - stream devices
//! - `/dev/tty1`..`/dev/tty4` (4:1..4:4) - TTY lines
//! - `/dev/initrd` (1:250) - RAM disk
//! - `/dev/zero` (1:5) - Reads return zeros
//! - `/dev/null` (1:3) - Data sink
//!
//! Module structure:
//! - `registry.rs` - name to device number table
//! - `store.rs` - registered inodes and inode numbering
//! - `device_ops.rs` - read/write dispatch and InodeOps for device nodes
//! - `dir_ops.rs` - lookup and readdir for the root directory
//! - `superblock.rs` - Devfs struct, Superblock impl
//! - `devices/` - TTY and RAM disk drivers

extern crate alloc;

use alloc::sync::Arc;
use spin::Mutex;

use los_vfs::superblock::Superblock;
use los_vfs::{DeviceId, VfsError, VfsResult};

pub mod config;
mod device_ops;
pub mod devices;
mod dir_ops;
pub mod registry;
pub mod store;
mod superblock;

pub use config::DevfsConfig;
pub use device_ops::{dispatch_read, dispatch_write};
pub use devices::{BlockDevice, DeviceClass, DeviceDrivers, RamDisk, StreamDevice, TtyLines};
pub use superblock::Devfs;

/// TEAM_503: Global devfs instance
static DEVFS: Mutex<Option<Arc<Devfs>>> = Mutex::new(None);

/// Mount the process-wide devfs with default configuration and the
/// built-in drivers
pub fn create(mount_dev: DeviceId) -> VfsResult<Arc<Devfs>> {
    let config = DevfsConfig::default();
    create_with(mount_dev, config, DeviceDrivers::builtin(&config))
}

/// Mount the process-wide devfs. Fails if one is already mounted.
pub fn create_with(
    mount_dev: DeviceId,
    config: DevfsConfig,
    drivers: DeviceDrivers,
) -> VfsResult<Arc<Devfs>> {
    let mut slot = DEVFS.lock();
    if slot.is_some() {
        log::error!("[DEVFS] already mounted, refusing second instance on {}", mount_dev);
        return Err(VfsError::AlreadyExists);
    }
    let devfs = Devfs::new(mount_dev, config, drivers)?;
    *slot = Some(Arc::clone(&devfs));
    log::info!("[DEVFS] mounted on dev {}", mount_dev);
    Ok(devfs)
}

/// The process-wide devfs
pub fn get() -> VfsResult<Arc<Devfs>> {
    DEVFS.lock().clone().ok_or(VfsError::NotMounted)
}

/// Unmount the process-wide devfs. Outstanding references stay valid.
pub fn destroy() -> VfsResult<()> {
    let devfs = DEVFS.lock().take().ok_or(VfsError::NotMounted)?;
    log::info!("[DEVFS] unmounted from dev {}", devfs.id());
    Ok(())
}

/// TEAM_503: Mount devfs and create the standard device nodes
pub fn init(mount_dev: DeviceId) -> VfsResult<Arc<Devfs>> {
    let devfs = create(mount_dev)?;
    let created = devfs.populate()?;
    log::info!("[DEVFS] Initialized with {} device nodes", created);
    Ok(devfs)
}

/// Read from `dev` on the process-wide devfs
pub fn device_read(dev: DeviceId, buf: &mut [u8], offset: u64) -> VfsResult<usize> {
    get()?.device_read(dev, buf, offset)
}

/// Write to `dev` on the process-wide devfs
pub fn device_write(dev: DeviceId, buf: &[u8], offset: u64) -> VfsResult<usize> {
    get()?.device_write(dev, buf, offset)
}
