//! TEAM_503: Devfs configuration
//!
//! Compile-time defaults live in the const modules; `DevfsConfig` carries
//! the values a particular mount actually uses.

/// Resource limits
pub mod limits {
    /// Maximum number of registered inodes, root included
    pub const MAX_INODES: usize = 64;
    /// Size of the in-tree RAM disk backing `initrd` (256 KiB)
    pub const RAMDISK_SIZE: usize = 256 * 1024;
    /// Bytes buffered per TTY line before input is dropped
    pub const TTY_BUFFER_SIZE: usize = 4096;
}

/// Permission bits given to nodes
pub mod modes {
    /// Root directory
    pub const ROOT_PERMS: u32 = 0o755;
    /// Character and block nodes created by `populate`
    pub const DEVICE_PERMS: u32 = 0o666;
}

/// Inode number of the root directory
pub const ROOT_INO: u64 = 1;

/// TEAM_503: Per-mount configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevfsConfig {
    pub max_inodes: usize,
    pub ramdisk_size: usize,
    pub tty_buffer_size: usize,
    pub root_perms: u32,
    pub device_perms: u32,
}

impl DevfsConfig {
    pub const fn new() -> Self {
        Self {
            max_inodes: limits::MAX_INODES,
            ramdisk_size: limits::RAMDISK_SIZE,
            tty_buffer_size: limits::TTY_BUFFER_SIZE,
            root_perms: modes::ROOT_PERMS,
            device_perms: modes::DEVICE_PERMS,
        }
    }

    pub const fn with_max_inodes(mut self, max_inodes: usize) -> Self {
        self.max_inodes = max_inodes;
        self
    }

    pub const fn with_ramdisk_size(mut self, size: usize) -> Self {
        self.ramdisk_size = size;
        self
    }

    pub const fn with_tty_buffer_size(mut self, size: usize) -> Self {
        self.tty_buffer_size = size;
        self
    }

    pub const fn with_device_perms(mut self, perms: u32) -> Self {
        self.device_perms = perms;
        self
    }
}

impl Default for DevfsConfig {
    fn default() -> Self {
        Self::new()
    }
}
