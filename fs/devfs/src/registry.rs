//! TEAM_503: Device name table
//!
//! Fixed at build time. Adding a device class to `/dev` means adding a row
//! here and a class in `devices::classify`.

use los_vfs::devno::known::*;
use los_vfs::DeviceId;

/// (name, device) pairs, searched front to back
static DEVICE_NAMES: [(&str, DeviceId); 9] = [
    ("zero", DEV_ZERO),
    ("null", DEV_NULL),
    ("tty", DEV_TTY),
    ("console", DEV_CONSOLE),
    ("tty1", DEV_CONSOLE1),
    ("tty2", DEV_CONSOLE2),
    ("tty3", DEV_CONSOLE3),
    ("tty4", DEV_CONSOLE4),
    ("initrd", DEV_INITRD),
];

/// Device bound to `name`, first match wins
pub fn resolve(name: &str) -> Option<DeviceId> {
    DEVICE_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, dev)| dev)
}

/// Name the table gives to `dev`
pub fn name_of(dev: DeviceId) -> Option<&'static str> {
    DEVICE_NAMES
        .iter()
        .find(|(_, d)| *d == dev)
        .map(|&(name, _)| name)
}

/// Every row in declaration order
pub fn entries() -> impl Iterator<Item = (&'static str, DeviceId)> {
    DEVICE_NAMES.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_every_name() {
        assert_eq!(resolve("zero"), Some(DEV_ZERO));
        assert_eq!(resolve("null"), Some(DEV_NULL));
        assert_eq!(resolve("tty"), Some(DEV_TTY));
        assert_eq!(resolve("console"), Some(DEV_CONSOLE));
        assert_eq!(resolve("tty1"), Some(DEV_CONSOLE1));
        assert_eq!(resolve("tty2"), Some(DEV_CONSOLE2));
        assert_eq!(resolve("tty3"), Some(DEV_CONSOLE3));
        assert_eq!(resolve("tty4"), Some(DEV_CONSOLE4));
        assert_eq!(resolve("initrd"), Some(DEV_INITRD));
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(resolve("foo"), None);
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("ZERO"), None);
        assert_eq!(resolve("tty5"), None);
    }

    #[test]
    fn test_name_of_inverts_resolve() {
        for (name, dev) in entries() {
            assert_eq!(name_of(dev), Some(name));
            assert_eq!(resolve(name), Some(dev));
        }
        assert_eq!(entries().count(), 9);
    }
}
