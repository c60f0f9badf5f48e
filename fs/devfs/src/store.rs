//! TEAM_503: Registered devfs inodes
//!
//! Insertion order is enumeration order. The store owns one strong
//! reference to each node; removing the node drops it.

extern crate alloc;

use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;

use los_vfs::inode::Inode;
use los_vfs::ops::InodeOps;
use los_vfs::superblock::Superblock;
use los_vfs::{DeviceId, InodeRef, VfsError, VfsResult};

use crate::config::ROOT_INO;

/// TEAM_503: Active inode list plus the inode number counter
#[derive(Debug)]
pub struct InodeStore {
    nodes: Vec<InodeRef>,
    next_ino: u64,
    max_inodes: usize,
}

impl InodeStore {
    /// Empty store, the first allocation gets the root inode number
    pub fn new(max_inodes: usize) -> Self {
        Self {
            nodes: Vec::new(),
            next_ino: ROOT_INO,
            max_inodes,
        }
    }

    /// Store whose first registered node is `root`
    pub fn with_root(max_inodes: usize, root: InodeRef) -> Self {
        let next_ino = root.ino + 1;
        Self {
            nodes: alloc::vec![root],
            next_ino,
            max_inodes,
        }
    }

    /// Build an unregistered inode with the next number, mode 0 and no
    /// device. Fails without touching the store when the budget is spent.
    pub fn allocate(
        &mut self,
        sb: Weak<dyn Superblock>,
        ops: &'static dyn InodeOps,
    ) -> VfsResult<InodeRef> {
        if self.nodes.len() >= self.max_inodes {
            log::debug!("[DEVFS] inode budget of {} exhausted", self.max_inodes);
            return Err(VfsError::OutOfMemory);
        }
        self.nodes
            .try_reserve(1)
            .map_err(|_| VfsError::OutOfMemory)?;

        let ino = self.next_ino;
        self.next_ino += 1;
        Ok(Arc::new(Inode::new(ino, 0, sb, ops)))
    }

    /// Append `node`. The same node cannot be registered twice.
    pub fn insert(&mut self, node: InodeRef) -> VfsResult<()> {
        if self.contains(&node) {
            return Err(VfsError::AlreadyExists);
        }
        self.nodes
            .try_reserve(1)
            .map_err(|_| VfsError::OutOfMemory)?;
        self.nodes.push(node);
        Ok(())
    }

    /// Unregister `node`, returning the store's reference to it
    pub fn remove(&mut self, node: &InodeRef) -> VfsResult<InodeRef> {
        let pos = self
            .nodes
            .iter()
            .position(|n| Arc::ptr_eq(n, node))
            .ok_or(VfsError::NotFound)?;
        Ok(self.nodes.remove(pos))
    }

    /// First registered node bound to `dev`
    pub fn lookup_by_device(&self, dev: DeviceId) -> Option<InodeRef> {
        self.nodes.iter().find(|n| n.dev() == Some(dev)).cloned()
    }

    pub fn contains(&self, node: &InodeRef) -> bool {
        self.nodes.iter().any(|n| Arc::ptr_eq(n, node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Registered nodes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &InodeRef> {
        self.nodes.iter()
    }

    /// Number the next allocation will get
    pub fn next_ino(&self) -> u64 {
        self.next_ino
    }
}
