//! TEAM_503: Devfs Superblock
//!
//! Implements the Superblock trait for the device filesystem on top of the
//! inode store, and owns the root inode and root dentry.

extern crate alloc;

use alloc::format;
use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;
use core::fmt;
use spin::Mutex;

use los_vfs::dentry::{Dentry, DentryRef};
use los_vfs::inode::Inode;
use los_vfs::superblock::Superblock;
use los_vfs::{mode, vfs_mknod, DeviceId, InodeRef, VfsError, VfsResult};

use crate::config::{DevfsConfig, ROOT_INO};
use crate::device_ops::{dispatch_read, dispatch_write, DEVFS_DEVICE_OPS};
use crate::devices::{DeviceClass, DeviceDrivers};
use crate::dir_ops::DEVFS_DIR_OPS;
use crate::registry;
use crate::store::InodeStore;

/// TEAM_503: The devfs filesystem state
pub struct Devfs {
    /// Device the filesystem is mounted from
    id: DeviceId,
    config: DevfsConfig,
    /// Registered inodes, root first
    store: Mutex<InodeStore>,
    drivers: DeviceDrivers,
    root: DentryRef,
    this: Weak<Devfs>,
}

impl Devfs {
    /// Create a devfs instance with only its root directory.
    ///
    /// The root gets inode number 1, directory mode and `mount_dev` as its
    /// device. A budget too small to hold the root is rejected.
    pub fn new(
        mount_dev: DeviceId,
        config: DevfsConfig,
        drivers: DeviceDrivers,
    ) -> VfsResult<Arc<Self>> {
        if config.max_inodes == 0 {
            return Err(VfsError::InvalidArgument);
        }

        let devfs = Arc::new_cyclic(|this: &Weak<Devfs>| {
            let sb: Weak<dyn Superblock> = this.clone();
            let root_inode = Arc::new(Inode::new(
                ROOT_INO,
                mode::make_mode(mode::S_IFDIR, config.root_perms),
                sb,
                &DEVFS_DIR_OPS,
            ));
            root_inode.bind_device(mount_dev);

            Self {
                id: mount_dev,
                config,
                store: Mutex::new(InodeStore::with_root(
                    config.max_inodes,
                    Arc::clone(&root_inode),
                )),
                drivers,
                root: Dentry::new_root("/", root_inode, &DEVFS_DIR_OPS),
                this: this.clone(),
            }
        });

        log::debug!("[DEVFS] new instance on dev {}", mount_dev);
        Ok(devfs)
    }

    /// Recover the devfs behind a generic superblock
    pub fn downcast(sb: &dyn Superblock) -> VfsResult<&Devfs> {
        sb.as_any().downcast_ref::<Devfs>().ok_or(VfsError::IoError)
    }

    pub fn config(&self) -> &DevfsConfig {
        &self.config
    }

    pub fn drivers(&self) -> &DeviceDrivers {
        &self.drivers
    }

    /// Registered node bound to `dev`
    pub fn lookup_device(&self, dev: DeviceId) -> Option<InodeRef> {
        self.store.lock().lookup_by_device(dev)
    }

    /// Number of registered inodes, root included
    pub fn inode_count(&self) -> usize {
        self.store.lock().len()
    }

    /// Registered inodes in allocation order
    pub fn inodes(&self) -> Vec<InodeRef> {
        self.store.lock().iter().cloned().collect()
    }

    /// Read from `dev` without going through a path. The device must have
    /// a node in this filesystem.
    pub fn device_read(&self, dev: DeviceId, buf: &mut [u8], offset: u64) -> VfsResult<usize> {
        self.lookup_device(dev).ok_or(VfsError::NoSuchDevice)?;
        dispatch_read(&self.drivers, dev, buf, offset)
    }

    /// Write to `dev` without going through a path
    pub fn device_write(&self, dev: DeviceId, buf: &[u8], offset: u64) -> VfsResult<usize> {
        self.lookup_device(dev).ok_or(VfsError::NoSuchDevice)?;
        dispatch_write(&self.drivers, dev, buf, offset)
    }

    /// TEAM_503: Create a node for every device in the registry.
    ///
    /// Names that already resolve are left alone. Returns how many nodes
    /// were created.
    pub fn populate(&self) -> VfsResult<usize> {
        let mut created = 0;
        for (name, dev) in registry::entries() {
            let file_type = match DeviceClass::of(dev) {
                Some(class) if class.is_block() => mode::S_IFBLK,
                _ => mode::S_IFCHR,
            };
            let path = format!("/{}", name);
            let node_mode = mode::make_mode(file_type, self.config.device_perms);
            match vfs_mknod(&self.root, &path, node_mode, dev) {
                Ok(_) => created += 1,
                Err(VfsError::AlreadyExists) => {
                    log::warn!("[DEVFS] {} already present, skipped", path);
                }
                Err(e) => return Err(e),
            }
        }
        log::info!("[DEVFS] populated {} device nodes", created);
        Ok(created)
    }
}

impl Superblock for Devfs {
    fn fs_type(&self) -> &'static str {
        "devfs"
    }

    fn id(&self) -> DeviceId {
        self.id
    }

    fn root(&self) -> DentryRef {
        Arc::clone(&self.root)
    }

    fn inode_alloc(&self) -> VfsResult<InodeRef> {
        let sb: Weak<dyn Superblock> = self.this.clone();
        let mut store = self.store.lock();
        let inode = store.allocate(sb, &DEVFS_DEVICE_OPS)?;
        store.insert(Arc::clone(&inode))?;
        log::debug!("[DEVFS] alloc ino {}", inode.ino);
        Ok(inode)
    }

    fn inode_free(&self, inode: &InodeRef) -> VfsResult<()> {
        if Arc::ptr_eq(inode, self.root.inode()) {
            return Err(VfsError::Busy);
        }
        self.store.lock().remove(inode)?;
        log::debug!("[DEVFS] free ino {}", inode.ino);
        Ok(())
    }

    fn as_any(&self) -> &dyn core::any::Any {
        self
    }
}

impl fmt::Debug for Devfs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Devfs")
            .field("id", &self.id)
            .field("inodes", &self.inode_count())
            .field("config", &self.config)
            .finish()
    }
}
