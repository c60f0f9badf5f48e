//! TEAM_502: Superblock trait, one implementation per mounted filesystem.

extern crate alloc;

use alloc::sync::Arc;

use crate::dentry::DentryRef;
use crate::devno::DeviceId;
use crate::error::VfsResult;
use crate::inode::InodeRef;

/// Shared reference to a mounted filesystem
pub type SuperblockRef = Arc<dyn Superblock>;

pub trait Superblock: Send + Sync {
    /// Filesystem type name ("devfs", ...)
    fn fs_type(&self) -> &'static str;

    /// Device the filesystem was mounted from
    fn id(&self) -> DeviceId;

    /// Root directory entry
    fn root(&self) -> DentryRef;

    /// Allocate and register a fresh inode. Mode and device are left unset
    /// for the caller to fill in.
    fn inode_alloc(&self) -> VfsResult<InodeRef>;

    /// Unregister an inode. Its storage goes away with the last reference.
    fn inode_free(&self, inode: &InodeRef) -> VfsResult<()>;

    /// For downcasting to the concrete filesystem
    fn as_any(&self) -> &dyn core::any::Any;
}
