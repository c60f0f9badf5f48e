//! TEAM_502: Directory entry tree.
//!
//! A dentry binds a name to an inode and keeps its children in insertion
//! order. Children are created by path lookup and by `vfs_mknod`, and
//! detached by `vfs_unlink`.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::fmt;
use spin::Mutex;

use crate::error::{VfsError, VfsResult};
use crate::inode::InodeRef;
use crate::ops::{DentryOps, DirCursor, DirEntry};

/// Shared reference to a dentry
pub type DentryRef = Arc<Dentry>;

pub struct Dentry {
    name: String,
    inode: InodeRef,
    parent: Weak<Dentry>,
    children: Mutex<Vec<DentryRef>>,
    ops: &'static dyn DentryOps,
}

impl Dentry {
    /// Create a dentry and, when `parent` is given, attach it as the
    /// parent's last child. Fails with `AlreadyExists` if the parent already
    /// has a child with that name.
    pub fn new(
        name: &str,
        inode: InodeRef,
        parent: Option<&DentryRef>,
        ops: &'static dyn DentryOps,
    ) -> VfsResult<DentryRef> {
        let dentry = Arc::new(Self {
            name: name.to_string(),
            inode,
            parent: parent.map(Arc::downgrade).unwrap_or_default(),
            children: Mutex::new(Vec::new()),
            ops,
        });

        if let Some(parent) = parent {
            let mut children = parent.children.lock();
            if children.iter().any(|c| c.name == name) {
                return Err(VfsError::AlreadyExists);
            }
            children
                .try_reserve(1)
                .map_err(|_| VfsError::OutOfMemory)?;
            children.push(Arc::clone(&dentry));
        }
        Ok(dentry)
    }

    /// Parentless dentry, the root of a mounted filesystem
    pub fn new_root(name: &str, inode: InodeRef, ops: &'static dyn DentryOps) -> DentryRef {
        Arc::new(Self {
            name: name.to_string(),
            inode,
            parent: Weak::new(),
            children: Mutex::new(Vec::new()),
            ops,
        })
    }

    /// Dentry attached as the last child of `parent`, inheriting its ops
    pub fn new_child(parent: &DentryRef, name: &str, inode: InodeRef) -> VfsResult<DentryRef> {
        Self::new(name, inode, Some(parent), parent.ops)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inode(&self) -> &InodeRef {
        &self.inode
    }

    pub fn ops(&self) -> &'static dyn DentryOps {
        self.ops
    }

    /// Parent dentry, `None` for a root
    pub fn parent(&self) -> Option<DentryRef> {
        self.parent.upgrade()
    }

    pub fn lookup_child(&self, name: &str) -> Option<DentryRef> {
        self.children
            .lock()
            .iter()
            .find(|c| c.name == name)
            .cloned()
    }

    /// First child `cursor` has not produced yet, recorded in the cursor.
    ///
    /// Children are only ever appended, so this is the child after the last
    /// one produced that is still attached.
    pub fn next_child(&self, cursor: &mut DirCursor) -> VfsResult<Option<DentryRef>> {
        let children = self.children.lock();
        let Some(child) = children.iter().find(|c| !cursor.has_produced(c)) else {
            return Ok(None);
        };
        cursor.advance(child)?;
        Ok(Some(Arc::clone(child)))
    }

    pub fn child_count(&self) -> usize {
        self.children.lock().len()
    }

    /// Snapshot of the children in insertion order
    pub fn children(&self) -> Vec<DentryRef> {
        self.children.lock().clone()
    }

    /// Detach the child called `name`
    pub fn remove_child(&self, name: &str) -> VfsResult<DentryRef> {
        let mut children = self.children.lock();
        let pos = children
            .iter()
            .position(|c| c.name == name)
            .ok_or(VfsError::NotFound)?;
        Ok(children.remove(pos))
    }

    /// One step of directory enumeration, see [`DentryOps::readdir`]
    pub fn readdir(&self, index: usize, cursor: &mut DirCursor) -> VfsResult<DirEntry> {
        self.ops.readdir(self, index, cursor)
    }

    /// Iterate every entry of this directory, `.` and `..` included
    pub fn read_dir(self: &Arc<Self>) -> ReadDir {
        ReadDir {
            dir: Arc::clone(self),
            index: 0,
            cursor: DirCursor::new(),
            done: false,
        }
    }
}

impl fmt::Debug for Dentry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dentry")
            .field("name", &self.name)
            .field("ino", &self.inode.ino)
            .field("children", &self.child_count())
            .finish()
    }
}

/// Iterator returned by [`Dentry::read_dir`]
pub struct ReadDir {
    dir: DentryRef,
    index: usize,
    cursor: DirCursor,
    done: bool,
}

impl Iterator for ReadDir {
    type Item = VfsResult<DirEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.dir.readdir(self.index, &mut self.cursor) {
            Ok(entry) => {
                self.index += 1;
                Some(Ok(entry))
            }
            Err(VfsError::EndOfDirectory) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
