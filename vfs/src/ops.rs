//! TEAM_502: Operation tables filesystems plug into the VFS.

extern crate alloc;

use alloc::string::String;
use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::ptr;

use crate::dentry::{Dentry, DentryRef};
use crate::error::{VfsError, VfsResult};
use crate::inode::{Inode, InodeRef};

/// Inode operations. Filesystems override what they support.
pub trait InodeOps: Send + Sync {
    /// Read from the object at `offset` into `buf`
    fn read(&self, _inode: &Inode, _offset: u64, _buf: &mut [u8]) -> VfsResult<usize> {
        Err(VfsError::InvalidArgument)
    }

    /// Write `buf` to the object at `offset`
    fn write(&self, _inode: &Inode, _offset: u64, _buf: &[u8]) -> VfsResult<usize> {
        Err(VfsError::InvalidArgument)
    }

    /// Resolve `name` inside directory `dir`
    fn lookup(&self, _dir: &InodeRef, _name: &str) -> VfsResult<InodeRef> {
        Err(VfsError::NotADirectory)
    }
}

/// One record produced by `readdir`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub ino: u64,
    pub name: String,
    /// File type bits (`S_IF*`) of the entry
    pub file_type: u32,
}

/// TEAM_502: Position of one directory scan.
///
/// Owned by whoever is scanning, so any number of scans can be in flight.
/// The cursor remembers which children it already produced, so removing a
/// child mid-scan neither skips nor repeats a live one. The synthetic `.`
/// and `..` entries are not tracked. A finished cursor stays finished until
/// it is rewound.
#[derive(Debug, Clone, Default)]
pub struct DirCursor {
    /// Children produced so far, oldest first
    produced: Vec<Weak<Dentry>>,
    exhausted: bool,
}

impl DirCursor {
    pub const fn new() -> Self {
        Self {
            produced: Vec::new(),
            exhausted: false,
        }
    }

    /// Back to the first child
    pub fn rewind(&mut self) {
        self.produced.clear();
        self.exhausted = false;
    }

    /// Number of children produced since the last rewind
    pub fn position(&self) -> usize {
        self.produced.len()
    }

    pub fn has_produced(&self, child: &DentryRef) -> bool {
        self.produced
            .iter()
            .any(|p| ptr::eq(p.as_ptr(), Arc::as_ptr(child)))
    }

    /// Record `child` as produced
    pub fn advance(&mut self, child: &DentryRef) -> VfsResult<()> {
        self.produced
            .try_reserve(1)
            .map_err(|_| VfsError::OutOfMemory)?;
        self.produced.push(Arc::downgrade(child));
        Ok(())
    }

    /// Mark the children walk as done
    pub fn finish(&mut self) {
        self.exhausted = true;
    }

    pub fn is_finished(&self) -> bool {
        self.exhausted
    }
}

/// Directory entry operations
pub trait DentryOps: Send + Sync {
    /// Produce the entry at `index`. 0 is `.`, 1 is `..`, 2 restarts the
    /// children walk held in `cursor`. Fails with `EndOfDirectory` when the
    /// children are exhausted.
    fn readdir(&self, dir: &Dentry, index: usize, cursor: &mut DirCursor) -> VfsResult<DirEntry>;
}
