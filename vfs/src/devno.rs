//! TEAM_502: Device numbers.
//!
//! A `DeviceId` packs major:minor Linux-style, `(major << 8) | minor`, with a
//! 12-bit major and an 8-bit minor. Every encodable value is a real device
//! number; absence is always spelled `Option<DeviceId>`.

use core::fmt;

/// Largest raw value `makedev` can produce
pub const MAX_RAW: u32 = 0x000F_FFFF;

/// TEAM_502: Device identifier (major:minor)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(u32);

impl DeviceId {
    /// Encode major:minor
    #[inline]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self(((major & 0xfff) << 8) | (minor & 0xff))
    }

    /// Wrap a raw value coming from userspace or another subsystem.
    ///
    /// Returns `None` for values outside the encodable range.
    #[inline]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        if raw > MAX_RAW {
            None
        } else {
            Some(Self(raw))
        }
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn major(self) -> u32 {
        (self.0 >> 8) & 0xfff
    }

    #[inline]
    pub const fn minor(self) -> u32 {
        self.0 & 0xff
    }
}

impl fmt::Debug for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeviceId({}:{})", self.major(), self.minor())
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}

/// Encode major:minor into a device identifier
#[inline]
pub const fn makedev(major: u32, minor: u32) -> DeviceId {
    DeviceId::new(major, minor)
}

/// Build-time device namespace of the kernel
pub mod known {
    use super::{makedev, DeviceId};

    /// Memory devices major number
    pub const MEM_MAJOR: u32 = 1;
    /// Virtual consoles major number
    pub const CONSOLE_MAJOR: u32 = 4;
    /// Controlling terminal / system console major number
    pub const TTY_MAJOR: u32 = 5;

    /// Controlling terminal of the calling process
    pub const DEV_TTY: DeviceId = makedev(TTY_MAJOR, 0);
    /// System console
    pub const DEV_CONSOLE: DeviceId = makedev(TTY_MAJOR, 1);
    pub const DEV_CONSOLE1: DeviceId = makedev(CONSOLE_MAJOR, 1);
    pub const DEV_CONSOLE2: DeviceId = makedev(CONSOLE_MAJOR, 2);
    pub const DEV_CONSOLE3: DeviceId = makedev(CONSOLE_MAJOR, 3);
    pub const DEV_CONSOLE4: DeviceId = makedev(CONSOLE_MAJOR, 4);
    /// Initial RAM disk
    pub const DEV_INITRD: DeviceId = makedev(MEM_MAJOR, 250);
    /// Data sink
    pub const DEV_NULL: DeviceId = makedev(MEM_MAJOR, 3);
    /// Zero source
    pub const DEV_ZERO: DeviceId = makedev(MEM_MAJOR, 5);
}
