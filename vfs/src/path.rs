//! TEAM_502: Path resolution over the dentry tree.
//!
//! Components are looked up in the dentry cache first; on a miss the
//! directory's `InodeOps::lookup` is asked and the result is cached as a new
//! child dentry.

extern crate alloc;

use alloc::sync::Arc;

use crate::dentry::{Dentry, DentryRef};
use crate::error::{VfsError, VfsResult};
use crate::inode;

/// Split `path` into (parent, final component).
///
/// `"/dev/tty1"` gives `("/dev", "tty1")`, a bare `"tty1"` or `"/tty1"`
/// gives `("/", "tty1")`, and `"/"` gives `("/", ".")`. Trailing slashes are
/// ignored.
pub fn split_path(path: &str) -> (&str, &str) {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return ("/", ".");
    }
    match trimmed.rfind('/') {
        Some(0) => ("/", &trimmed[1..]),
        Some(i) => (&trimmed[..i], &trimmed[i + 1..]),
        None => ("/", trimmed),
    }
}

/// Resolve `path` starting at `root`. Relative paths are taken relative to
/// `root` as well; there is no per-process working directory here.
pub fn named(root: &DentryRef, path: &str) -> VfsResult<DentryRef> {
    let mut current = Arc::clone(root);
    for component in path.split('/').filter(|c| !c.is_empty()) {
        current = match component {
            "." => current,
            ".." => current.parent().unwrap_or(current),
            name => lookup_component(&current, name)?,
        };
    }
    Ok(current)
}

fn lookup_component(dir: &DentryRef, name: &str) -> VfsResult<DentryRef> {
    if let Some(child) = dir.lookup_child(name) {
        return Ok(child);
    }

    let inode = inode::lookup(dir.inode(), name)?;
    log::trace!("[VFS] caching dentry '{}' (ino {})", name, inode.ino);
    match Dentry::new_child(dir, name, inode) {
        Ok(child) => Ok(child),
        // Someone else cached it first
        Err(VfsError::AlreadyExists) => dir.lookup_child(name).ok_or(VfsError::NotFound),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testfs::MemFs;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/dev/tty1"), ("/dev", "tty1"));
        assert_eq!(split_path("/tty1"), ("/", "tty1"));
        assert_eq!(split_path("tty1"), ("/", "tty1"));
        assert_eq!(split_path("/"), ("/", "."));
        assert_eq!(split_path("/a/b/"), ("/a", "b"));
        assert_eq!(split_path("a/b"), ("a", "b"));
    }

    #[test]
    fn test_named_root_and_dots() {
        let fs = MemFs::new();
        let root = fs.root_dentry();
        assert!(Arc::ptr_eq(&named(&root, "/").unwrap(), &root));
        assert!(Arc::ptr_eq(&named(&root, "/./..").unwrap(), &root));
        assert!(Arc::ptr_eq(&named(&root, "").unwrap(), &root));
    }

    #[test]
    fn test_named_caches_dentry() {
        let fs = MemFs::new();
        let root = fs.root_dentry();
        let inode = fs.file("zero");

        let first = named(&root, "/zero").unwrap();
        assert!(Arc::ptr_eq(first.inode(), &inode));
        assert_eq!(root.child_count(), 1);

        let second = named(&root, "zero").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(root.child_count(), 1);
    }

    #[test]
    fn test_named_missing_and_through_file() {
        let fs = MemFs::new();
        let root = fs.root_dentry();
        fs.file("zero");
        assert_eq!(named(&root, "/nope").err(), Some(VfsError::NotFound));
        assert_eq!(named(&root, "/zero/x").err(), Some(VfsError::NotADirectory));
    }
}
