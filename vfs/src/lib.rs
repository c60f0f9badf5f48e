#![cfg_attr(not(test), no_std)]
//! TEAM_502: Virtual Filesystem (VFS) Core
//!
//! The contracts a filesystem implements to be mounted in the kernel
//! namespace, plus the generic machinery around them.
//!
//! ## Architecture
//!
//! ```text
//! +------------------+
//! |   System Calls   |
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   VFS Dispatch   |  vfs_read, vfs_write, vfs_readdir, vfs_mknod, vfs_unlink
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   Dentry Tree    |  Path -> Dentry resolution (named)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |     Inode        |  Number, mode, bound device
//! +------------------+
//!          |
//!          v
//! +------------------------------------+
//! | InodeOps / DentryOps / Superblock  |  Filesystem-specific operations
//! +------------------------------------+
//! ```

extern crate alloc;

pub mod dentry;
pub mod devno;
pub mod dispatch;
pub mod error;
pub mod inode;
pub mod mode;
pub mod ops;
pub mod path;
pub mod superblock;

#[cfg(test)]
mod testfs;

pub use dentry::{Dentry, DentryRef, ReadDir};
pub use devno::{makedev, DeviceId};
pub use error::{VfsError, VfsResult};
pub use inode::{Inode, InodeRef, WeakInodeRef};
pub use ops::{DentryOps, DirCursor, DirEntry, InodeOps};
pub use superblock::{Superblock, SuperblockRef};

pub use dispatch::{vfs_mknod, vfs_read, vfs_readdir, vfs_unlink, vfs_write};
pub use path::{named, split_path};
