//! TEAM_502: File mode bits.
//!
//! Type bits come from linux-raw-sys so the values match the Linux ABI.
//! Permission bits are carried opaquely; the VFS never checks them.

pub use linux_raw_sys::general::{S_IFBLK, S_IFCHR, S_IFDIR, S_IFMT, S_IFREG};

/// Permission bits mask
pub const PERM_MASK: u32 = 0o7777;

/// Extract the file type bits
#[inline]
pub const fn file_type(mode: u32) -> u32 {
    mode & S_IFMT
}

/// Extract the permission bits
#[inline]
pub const fn permissions(mode: u32) -> u32 {
    mode & PERM_MASK
}

/// Combine a file type with permission bits
#[inline]
pub const fn make_mode(file_type: u32, perms: u32) -> u32 {
    (file_type & S_IFMT) | (perms & PERM_MASK)
}

#[inline]
pub const fn is_dir(mode: u32) -> bool {
    file_type(mode) == S_IFDIR
}

#[inline]
pub const fn is_chr(mode: u32) -> bool {
    file_type(mode) == S_IFCHR
}

#[inline]
pub const fn is_blk(mode: u32) -> bool {
    file_type(mode) == S_IFBLK
}

/// Character or block device node
#[inline]
pub const fn is_device(mode: u32) -> bool {
    is_chr(mode) || is_blk(mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_mode_splits_back() {
        let m = make_mode(S_IFCHR, 0o666);
        assert!(is_chr(m));
        assert!(is_device(m));
        assert!(!is_dir(m));
        assert_eq!(permissions(m), 0o666);
        assert_eq!(file_type(m), S_IFCHR);
    }

    #[test]
    fn test_make_mode_masks_stray_bits() {
        let m = make_mode(S_IFDIR | 0o777, 0o170755);
        assert_eq!(m, S_IFDIR | 0o755);
    }
}
