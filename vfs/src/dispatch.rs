//! TEAM_502: VFS dispatch entry points used by the syscall layer.

extern crate alloc;

use alloc::sync::Arc;

use crate::dentry::{Dentry, DentryRef};
use crate::devno::DeviceId;
use crate::error::{VfsError, VfsResult};
use crate::inode::Inode;
use crate::mode;
use crate::ops::{DirCursor, DirEntry};
use crate::path::{named, split_path};

pub fn vfs_read(inode: &Inode, offset: u64, buf: &mut [u8]) -> VfsResult<usize> {
    inode.read(offset, buf)
}

pub fn vfs_write(inode: &Inode, offset: u64, buf: &[u8]) -> VfsResult<usize> {
    inode.write(offset, buf)
}

pub fn vfs_readdir(dir: &Dentry, index: usize, cursor: &mut DirCursor) -> VfsResult<DirEntry> {
    dir.readdir(index, cursor)
}

/// TEAM_502: Create a device node at `path` bound to `dev`.
///
/// The new inode comes from the parent directory's superblock. The node is
/// only kept if `path` resolves to it afterwards. Otherwise it is freed again
/// and the lookup error is returned, or `AlreadyExists` when the name now
/// resolves to a different inode.
pub fn vfs_mknod(root: &DentryRef, path: &str, mode: u32, dev: DeviceId) -> VfsResult<DentryRef> {
    if !mode::is_device(mode) {
        return Err(VfsError::InvalidArgument);
    }
    if named(root, path).is_ok() {
        return Err(VfsError::AlreadyExists);
    }

    let (parent, name) = split_path(path);
    if name == "." || name == ".." {
        return Err(VfsError::InvalidArgument);
    }
    let parent = named(root, parent)?;
    let dir = parent.inode();
    if !dir.is_dir() {
        return Err(VfsError::NotADirectory);
    }

    let sb = dir.superblock()?;
    let inode = sb.inode_alloc()?;
    inode.set_mode(mode);
    inode.bind_device(dev);
    log::debug!("[VFS] mknod {} dev={} ino={}", path, dev, inode.ino);

    match named(root, path) {
        Ok(dentry) if Arc::ptr_eq(dentry.inode(), &inode) => Ok(dentry),
        Ok(dentry) => {
            // someone else created the name after the existence check
            log::debug!(
                "[VFS] mknod {}: taken by ino {}, releasing ino {}",
                path,
                dentry.inode().ino,
                inode.ino
            );
            sb.inode_free(&inode)?;
            Err(VfsError::AlreadyExists)
        }
        Err(e) => {
            log::debug!(
                "[VFS] mknod {}: name does not resolve ({}), releasing ino {}",
                path,
                e,
                inode.ino
            );
            sb.inode_free(&inode)?;
            Err(e)
        }
    }
}

/// TEAM_502: Remove the device node at `path` and release its inode.
pub fn vfs_unlink(root: &DentryRef, path: &str) -> VfsResult<()> {
    let dentry = named(root, path)?;
    if dentry.inode().is_dir() {
        return Err(VfsError::IsADirectory);
    }
    let parent = dentry.parent().ok_or(VfsError::Busy)?;
    parent.remove_child(dentry.name())?;
    dentry.inode().superblock()?.inode_free(dentry.inode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devno::makedev;
    use crate::superblock::Superblock;
    use crate::testfs::MemFs;

    #[test]
    fn test_read_write_go_through_ops() {
        let fs = MemFs::new();
        let inode = fs.file("a");
        let mut buf = [0u8; 4];
        assert_eq!(vfs_read(&inode, 7, &mut buf), Ok(4));
        assert_eq!(buf, [7; 4]);
        assert_eq!(vfs_write(&inode, 0, &buf[..2]), Ok(2));
    }

    #[test]
    fn test_mknod_existing_path() {
        let fs = MemFs::new();
        let root = fs.root();
        fs.file("a");
        let res = vfs_mknod(&root, "/a", mode::S_IFCHR | 0o600, makedev(1, 3));
        assert_eq!(res.err(), Some(VfsError::AlreadyExists));
    }

    #[test]
    fn test_mknod_missing_parent() {
        let fs = MemFs::new();
        let root = fs.root();
        let res = vfs_mknod(&root, "/nodir/a", mode::S_IFCHR | 0o600, makedev(1, 3));
        assert_eq!(res.err(), Some(VfsError::NotFound));
        assert!(fs.live.lock().len() == 0);
    }

    #[test]
    fn test_mknod_rejects_non_device_mode() {
        let fs = MemFs::new();
        let root = fs.root();
        let res = vfs_mknod(&root, "/d", mode::S_IFDIR | 0o755, makedev(1, 3));
        assert_eq!(res.err(), Some(VfsError::InvalidArgument));
    }

    #[test]
    fn test_mknod_unresolvable_name_releases_inode() {
        let fs = MemFs::new();
        let root = fs.root();
        let res = vfs_mknod(&root, "/ghost", mode::S_IFCHR | 0o600, makedev(1, 3));
        assert_eq!(res.err(), Some(VfsError::NotFound));
        assert!(fs.live.lock().is_empty());
    }

    #[test]
    fn test_mknod_name_taken_while_allocating() {
        let fs = MemFs::new();
        let root = fs.root();
        let other = fs.file_on_next_alloc("a");

        let res = vfs_mknod(&root, "/a", mode::S_IFCHR | 0o600, makedev(1, 3));
        assert_eq!(res.err(), Some(VfsError::AlreadyExists));
        assert!(Arc::ptr_eq(named(&root, "/a").unwrap().inode(), &other));

        // only the other creator's inode is still allocated
        let live = fs.live.lock();
        assert_eq!(live.len(), 1);
        assert!(Arc::ptr_eq(&live[0], &other));
    }

    #[test]
    fn test_unlink_detaches_and_frees() {
        let fs = MemFs::new();
        let root = fs.root();
        fs.file("a");
        named(&root, "/a").unwrap();
        assert_eq!(fs.live.lock().len(), 1);

        vfs_unlink(&root, "/a").unwrap();
        assert!(root.lookup_child("a").is_none());
        assert!(fs.live.lock().is_empty());
        assert_eq!(vfs_unlink(&root, "/").err(), Some(VfsError::IsADirectory));
    }
}
