//! TEAM_502: VFS error type shared by every filesystem.
//!
//! Follows the unified error plan: each variant has a stable numeric code
//! (0x06xx for the VFS range), a human readable name, and a Linux errno.

use linux_raw_sys::errno::{
    EBUSY, EEXIST, EINVAL, EIO, EISDIR, ENODEV, ENOENT, ENOMEM, ENOTDIR,
};

/// Result type for VFS operations
pub type VfsResult<T> = Result<T, VfsError>;

/// TEAM_502: Errors returned by VFS and filesystem operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VfsError {
    /// No entry with that name (0x0601)
    NotFound,
    /// Entry already exists (0x0602)
    AlreadyExists,
    /// Device identifier has no driver (0x0603)
    NoSuchDevice,
    /// Directory enumeration exhausted (0x0604)
    EndOfDirectory,
    /// Allocator could not satisfy the request (0x0605)
    OutOfMemory,
    /// Path component is not a directory (0x0606)
    NotADirectory,
    /// Operation not valid on a directory (0x0607)
    IsADirectory,
    /// Malformed argument (0x0608)
    InvalidArgument,
    /// Object is in use and cannot be released (0x0609)
    Busy,
    /// Filesystem instance not created yet (0x060A)
    NotMounted,
    /// Driver reported a failure (0x060B)
    IoError,
}

impl VfsError {
    /// TEAM_502: Numeric error code for debugging
    pub const fn code(&self) -> u16 {
        match self {
            Self::NotFound => 0x0601,
            Self::AlreadyExists => 0x0602,
            Self::NoSuchDevice => 0x0603,
            Self::EndOfDirectory => 0x0604,
            Self::OutOfMemory => 0x0605,
            Self::NotADirectory => 0x0606,
            Self::IsADirectory => 0x0607,
            Self::InvalidArgument => 0x0608,
            Self::Busy => 0x0609,
            Self::NotMounted => 0x060A,
            Self::IoError => 0x060B,
        }
    }

    /// TEAM_502: Error name for logging
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NotFound => "No such file or directory",
            Self::AlreadyExists => "File exists",
            Self::NoSuchDevice => "No such device",
            Self::EndOfDirectory => "End of directory",
            Self::OutOfMemory => "Out of memory",
            Self::NotADirectory => "Not a directory",
            Self::IsADirectory => "Is a directory",
            Self::InvalidArgument => "Invalid argument",
            Self::Busy => "Device or resource busy",
            Self::NotMounted => "Filesystem not mounted",
            Self::IoError => "I/O error",
        }
    }

    /// TEAM_502: Translate to a positive Linux errno for the syscall layer.
    ///
    /// `EndOfDirectory` never reaches userspace (getdents stops instead), it
    /// maps to `ENOENT` like a failed `readdir` would.
    pub const fn to_errno(&self) -> u32 {
        match self {
            Self::NotFound | Self::EndOfDirectory => ENOENT,
            Self::AlreadyExists => EEXIST,
            Self::NoSuchDevice | Self::NotMounted => ENODEV,
            Self::OutOfMemory => ENOMEM,
            Self::NotADirectory => ENOTDIR,
            Self::IsADirectory => EISDIR,
            Self::InvalidArgument => EINVAL,
            Self::Busy => EBUSY,
            Self::IoError => EIO,
        }
    }
}

impl core::fmt::Display for VfsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "E{:04X}: {}", self.code(), self.name())
    }
}

impl core::error::Error for VfsError {}
