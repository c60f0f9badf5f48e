//! TEAM_502: Flat in-memory filesystem used by the VFS unit tests.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

use crate::dentry::{Dentry, DentryRef};
use crate::devno::{makedev, DeviceId};
use crate::error::{VfsError, VfsResult};
use crate::inode::{Inode, InodeRef};
use crate::mode;
use crate::ops::{DentryOps, DirCursor, DirEntry, InodeOps};
use crate::superblock::Superblock;

pub struct MemFs {
    this: Weak<MemFs>,
    root: DentryRef,
    next_ino: AtomicU64,
    names: Mutex<Vec<(String, InodeRef)>>,
    /// Names that become visible on the next `inode_alloc`
    staged: Mutex<Vec<(String, InodeRef)>>,
    pub live: Mutex<Vec<InodeRef>>,
}

impl MemFs {
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<MemFs>| {
            let sb: Weak<dyn Superblock> = this.clone();
            let root_inode = Arc::new(Inode::new(1, mode::S_IFDIR | 0o755, sb, &MEMFS_OPS));
            let root = Dentry::new_root("/", root_inode, &MEMFS_DIR_OPS);
            Self {
                this: this.clone(),
                root,
                next_ino: AtomicU64::new(2),
                names: Mutex::new(Vec::new()),
                staged: Mutex::new(Vec::new()),
                live: Mutex::new(Vec::new()),
            }
        })
    }

    pub fn root_dentry(&self) -> DentryRef {
        Arc::clone(&self.root)
    }

    /// Make a character node reachable by `name` from the root
    pub fn file(&self, name: &str) -> InodeRef {
        let inode = self.inode_alloc().unwrap();
        inode.set_mode(mode::S_IFCHR | 0o644);
        self.names.lock().push((name.to_string(), Arc::clone(&inode)));
        inode
    }

    /// Like `file`, but `name` only resolves once the next inode has been
    /// allocated, as if another creator got there first
    pub fn file_on_next_alloc(&self, name: &str) -> InodeRef {
        let inode = self.inode_alloc().unwrap();
        inode.set_mode(mode::S_IFCHR | 0o644);
        self.staged.lock().push((name.to_string(), Arc::clone(&inode)));
        inode
    }
}

impl Superblock for MemFs {
    fn fs_type(&self) -> &'static str {
        "memfs"
    }

    fn id(&self) -> DeviceId {
        makedev(0, 1)
    }

    fn root(&self) -> DentryRef {
        Arc::clone(&self.root)
    }

    fn inode_alloc(&self) -> VfsResult<InodeRef> {
        let sb: Weak<dyn Superblock> = self.this.clone();
        let ino = self.next_ino.fetch_add(1, Ordering::SeqCst);
        let inode = Arc::new(Inode::new(ino, 0, sb, &MEMFS_OPS));
        self.live.lock().push(Arc::clone(&inode));
        self.names.lock().append(&mut self.staged.lock());
        Ok(inode)
    }

    fn inode_free(&self, inode: &InodeRef) -> VfsResult<()> {
        let mut live = self.live.lock();
        let pos = live
            .iter()
            .position(|i| Arc::ptr_eq(i, inode))
            .ok_or(VfsError::NotFound)?;
        live.remove(pos);
        Ok(())
    }

    fn as_any(&self) -> &dyn core::any::Any {
        self
    }
}

pub struct MemFsOps;

impl InodeOps for MemFsOps {
    fn read(&self, _inode: &Inode, offset: u64, buf: &mut [u8]) -> VfsResult<usize> {
        buf.fill(offset as u8);
        Ok(buf.len())
    }

    fn write(&self, _inode: &Inode, _offset: u64, buf: &[u8]) -> VfsResult<usize> {
        Ok(buf.len())
    }

    fn lookup(&self, dir: &InodeRef, name: &str) -> VfsResult<InodeRef> {
        if !dir.is_dir() {
            return Err(VfsError::NotADirectory);
        }
        let sb = dir.superblock()?;
        let fs = sb.as_any().downcast_ref::<MemFs>().ok_or(VfsError::IoError)?;
        let names = fs.names.lock();
        names
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, i)| Arc::clone(i))
            .ok_or(VfsError::NotFound)
    }
}

pub struct MemFsDirOps;

impl DentryOps for MemFsDirOps {
    fn readdir(&self, dir: &Dentry, index: usize, cursor: &mut DirCursor) -> VfsResult<DirEntry> {
        let ino = dir.inode().ino;
        match index {
            0 => Ok(DirEntry {
                ino,
                name: ".".to_string(),
                file_type: mode::S_IFDIR,
            }),
            1 => Ok(DirEntry {
                ino,
                name: "..".to_string(),
                file_type: mode::S_IFDIR,
            }),
            _ => {
                if index == 2 {
                    cursor.rewind();
                }
                let child = dir.next_child(cursor)?.ok_or(VfsError::EndOfDirectory)?;
                Ok(DirEntry {
                    ino: child.inode().ino,
                    name: child.name().to_string(),
                    file_type: mode::file_type(child.inode().mode()),
                })
            }
        }
    }
}

pub static MEMFS_OPS: MemFsOps = MemFsOps;
pub static MEMFS_DIR_OPS: MemFsDirOps = MemFsDirOps;
