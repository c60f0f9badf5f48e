//! TEAM_502: In-memory inode record.
//!
//! The common part every filesystem shares: number, mode, bound device,
//! owning superblock and the operations table. Filesystems keep their own
//! bookkeeping (lists, trees) outside of this record.

extern crate alloc;

use alloc::sync::{Arc, Weak};
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::devno::{DeviceId, MAX_RAW};
use crate::error::{VfsError, VfsResult};
use crate::mode;
use crate::ops::InodeOps;
use crate::superblock::Superblock;

/// Shared reference to an inode
pub type InodeRef = Arc<Inode>;
/// Weak reference to an inode
pub type WeakInodeRef = Weak<Inode>;

// Stored in `dev` while nothing is bound. Above MAX_RAW, so no DeviceId maps to it.
const UNBOUND: u32 = u32::MAX;
const _: () = assert!(UNBOUND > MAX_RAW);

/// TEAM_502: VFS inode
pub struct Inode {
    /// Inode number, unique within the owning filesystem
    pub ino: u64,
    mode: AtomicU32,
    dev: AtomicU32,
    /// Owning filesystem
    pub sb: Weak<dyn Superblock>,
    /// Filesystem-specific operations
    pub ops: &'static dyn InodeOps,
}

impl Inode {
    /// Create an inode with no device bound
    pub fn new(
        ino: u64,
        mode: u32,
        sb: Weak<dyn Superblock>,
        ops: &'static dyn InodeOps,
    ) -> Self {
        Self {
            ino,
            mode: AtomicU32::new(mode),
            dev: AtomicU32::new(UNBOUND),
            sb,
            ops,
        }
    }

    pub fn mode(&self) -> u32 {
        self.mode.load(Ordering::Acquire)
    }

    pub fn set_mode(&self, mode: u32) {
        self.mode.store(mode, Ordering::Release);
    }

    /// Device this node stands for, if one has been bound
    pub fn dev(&self) -> Option<DeviceId> {
        match self.dev.load(Ordering::Acquire) {
            UNBOUND => None,
            raw => DeviceId::from_raw(raw),
        }
    }

    pub fn bind_device(&self, dev: DeviceId) {
        self.dev.store(dev.raw(), Ordering::Release);
    }

    pub fn is_dir(&self) -> bool {
        mode::is_dir(self.mode())
    }

    /// Upgrade the owning superblock
    pub fn superblock(&self) -> VfsResult<Arc<dyn Superblock>> {
        self.sb.upgrade().ok_or(VfsError::NotMounted)
    }

    pub fn read(&self, offset: u64, buf: &mut [u8]) -> VfsResult<usize> {
        self.ops.read(self, offset, buf)
    }

    pub fn write(&self, offset: u64, buf: &[u8]) -> VfsResult<usize> {
        self.ops.write(self, offset, buf)
    }
}

impl fmt::Debug for Inode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inode")
            .field("ino", &self.ino)
            .field("mode", &format_args!("{:o}", self.mode()))
            .field("dev", &self.dev())
            .finish()
    }
}

/// Look up `name` in directory `dir` through its filesystem
pub fn lookup(dir: &InodeRef, name: &str) -> VfsResult<InodeRef> {
    dir.ops.lookup(dir, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devno::makedev;
    use crate::testfs::{MemFs, MEMFS_OPS};

    #[test]
    fn test_new_inode_has_no_device() {
        let sb: Weak<MemFs> = Weak::new();
        let inode = Inode::new(7, mode::S_IFCHR | 0o600, sb, &MEMFS_OPS);
        assert_eq!(inode.dev(), None);
        assert!(!inode.is_dir());
    }

    #[test]
    fn test_bind_device_and_mode() {
        let sb: Weak<MemFs> = Weak::new();
        let inode = Inode::new(3, 0, sb, &MEMFS_OPS);
        inode.set_mode(mode::S_IFDIR | 0o755);
        inode.bind_device(makedev(1, 5));
        assert!(inode.is_dir());
        assert_eq!(inode.dev(), Some(makedev(1, 5)));
    }

    #[test]
    fn test_superblock_gone_is_not_mounted() {
        let sb: Weak<MemFs> = Weak::new();
        let inode = Inode::new(1, 0, sb, &MEMFS_OPS);
        assert_eq!(inode.superblock().err(), Some(VfsError::NotMounted));
    }
}
