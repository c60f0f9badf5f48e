//! TEAM_503: Devfs Directory Operations
//!
//! Implements lookup and readdir for the devfs root. The namespace is flat,
//! so `..` of the root is the root itself.

extern crate alloc;

use alloc::string::ToString;
use alloc::sync::Arc;

use los_vfs::dentry::Dentry;
use los_vfs::error::{VfsError, VfsResult};
use los_vfs::inode::Inode;
use los_vfs::mode;
use los_vfs::ops::{DentryOps, DirCursor, DirEntry, InodeOps};
use los_vfs::InodeRef;

use crate::registry;
use crate::superblock::Devfs;

/// TEAM_503: Devfs Directory Operations
pub struct DevfsDirOps;

impl InodeOps for DevfsDirOps {
    fn read(&self, _inode: &Inode, _offset: u64, _buf: &mut [u8]) -> VfsResult<usize> {
        Err(VfsError::IsADirectory)
    }

    fn write(&self, _inode: &Inode, _offset: u64, _buf: &[u8]) -> VfsResult<usize> {
        Err(VfsError::IsADirectory)
    }

    fn lookup(&self, dir: &InodeRef, name: &str) -> VfsResult<InodeRef> {
        if !dir.is_dir() {
            return Err(VfsError::NotADirectory);
        }
        if name == "." || name == ".." {
            return Ok(Arc::clone(dir));
        }

        let dev = registry::resolve(name).ok_or(VfsError::NotFound)?;
        let sb = dir.superblock()?;
        let devfs = Devfs::downcast(&*sb)?;
        let found = devfs.lookup_device(dev).ok_or(VfsError::NotFound)?;
        log::trace!("[DEVFS] lookup '{}' -> ino {}", name, found.ino);
        Ok(found)
    }
}

impl DentryOps for DevfsDirOps {
    fn readdir(&self, dir: &Dentry, index: usize, cursor: &mut DirCursor) -> VfsResult<DirEntry> {
        let inode = dir.inode();
        if !inode.is_dir() {
            return Err(VfsError::NotADirectory);
        }

        // offsets 0 and 1 are . and ..
        match index {
            0 => Ok(DirEntry {
                ino: inode.ino,
                name: ".".to_string(),
                file_type: mode::S_IFDIR,
            }),
            1 => Ok(DirEntry {
                ino: inode.ino,
                name: "..".to_string(),
                file_type: mode::S_IFDIR,
            }),
            _ => {
                if index == 2 {
                    cursor.rewind();
                }
                if cursor.is_finished() {
                    return Err(VfsError::EndOfDirectory);
                }
                let Some(child) = dir.next_child(cursor)? else {
                    cursor.finish();
                    return Err(VfsError::EndOfDirectory);
                };
                Ok(DirEntry {
                    ino: child.inode().ino,
                    name: child.name().to_string(),
                    file_type: mode::file_type(child.inode().mode()),
                })
            }
        }
    }
}

/// Static instance for the root inode and every devfs dentry
pub static DEVFS_DIR_OPS: DevfsDirOps = DevfsDirOps;
