//! TEAM_503: Console and TTY lines
//!
//! Every stream device number gets its own line with an input queue (what
//! a reader consumes) and an output queue (what was written to the line).
//! Lines are created the first time they are touched.
//! - read() drains pending input, 0 when none is pending
//! - write() appends to the output queue, oldest bytes fall off when full

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use spin::Mutex;

use los_vfs::{DeviceId, VfsError, VfsResult};

use super::{DeviceClass, StreamDevice};

/// TEAM_503: Buffered state of one line
#[derive(Debug, Default)]
struct TtyLine {
    /// Bytes waiting to be read
    input: VecDeque<u8>,
    /// Bytes written by the process
    output: VecDeque<u8>,
}

/// TEAM_503: The set of console/TTY lines
pub struct TtyLines {
    capacity: usize,
    lines: Mutex<Vec<(DeviceId, TtyLine)>>,
}

impl TtyLines {
    /// Lines buffering at most `capacity` bytes in each direction
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            lines: Mutex::new(Vec::new()),
        }
    }

    fn with_line<R>(&self, dev: DeviceId, f: impl FnOnce(&mut TtyLine) -> R) -> VfsResult<R> {
        if DeviceClass::of(dev) != Some(DeviceClass::Stream) {
            return Err(VfsError::NoSuchDevice);
        }
        let mut lines = self.lines.lock();
        let pos = match lines.iter().position(|(d, _)| *d == dev) {
            Some(pos) => pos,
            None => {
                lines.try_reserve(1).map_err(|_| VfsError::OutOfMemory)?;
                lines.push((dev, TtyLine::default()));
                lines.len() - 1
            }
        };
        Ok(f(&mut lines[pos].1))
    }

    /// Queue bytes as if typed on line `dev`. Returns how many were kept.
    pub fn push_input(&self, dev: DeviceId, bytes: &[u8]) -> VfsResult<usize> {
        let capacity = self.capacity;
        self.with_line(dev, |line| {
            let room = capacity.saturating_sub(line.input.len());
            let n = bytes.len().min(room);
            line.input.extend(&bytes[..n]);
            n
        })
    }

    /// Drain everything written to line `dev` so far
    pub fn take_output(&self, dev: DeviceId) -> VfsResult<Vec<u8>> {
        self.with_line(dev, |line| line.output.drain(..).collect())
    }
}

impl StreamDevice for TtyLines {
    fn read(&self, dev: DeviceId, buf: &mut [u8]) -> VfsResult<usize> {
        self.with_line(dev, |line| {
            let n = buf.len().min(line.input.len());
            for (dst, src) in buf.iter_mut().zip(line.input.drain(..n)) {
                *dst = src;
            }
            n
        })
    }

    fn write(&self, dev: DeviceId, buf: &[u8]) -> VfsResult<usize> {
        let capacity = self.capacity;
        self.with_line(dev, |line| {
            line.output.extend(buf);
            let excess = line.output.len().saturating_sub(capacity);
            line.output.drain(..excess);
            buf.len()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use los_vfs::devno::known::*;

    #[test]
    fn test_read_drains_input() {
        let tty = TtyLines::new(16);
        assert_eq!(tty.push_input(DEV_CONSOLE1, b"ls\n"), Ok(3));

        let mut buf = [0u8; 2];
        assert_eq!(tty.read(DEV_CONSOLE1, &mut buf), Ok(2));
        assert_eq!(&buf, b"ls");
        assert_eq!(tty.read(DEV_CONSOLE1, &mut buf), Ok(1));
        assert_eq!(buf[0], b'\n');
        assert_eq!(tty.read(DEV_CONSOLE1, &mut buf), Ok(0));
    }

    #[test]
    fn test_lines_are_independent() {
        let tty = TtyLines::new(16);
        tty.push_input(DEV_CONSOLE1, b"one").unwrap();
        tty.write(DEV_CONSOLE2, b"two").unwrap();

        let mut buf = [0u8; 8];
        assert_eq!(tty.read(DEV_CONSOLE2, &mut buf), Ok(0));
        assert_eq!(tty.take_output(DEV_CONSOLE1).unwrap(), b"");
        assert_eq!(tty.take_output(DEV_CONSOLE2).unwrap(), b"two");
        assert_eq!(tty.read(DEV_CONSOLE1, &mut buf), Ok(3));
    }

    #[test]
    fn test_buffers_are_bounded() {
        let tty = TtyLines::new(4);
        assert_eq!(tty.push_input(DEV_TTY, b"abcdef"), Ok(4));
        assert_eq!(tty.write(DEV_TTY, b"123456"), Ok(6));
        assert_eq!(tty.take_output(DEV_TTY).unwrap(), b"3456");
    }

    #[test]
    fn test_non_stream_device_rejected() {
        let tty = TtyLines::new(4);
        let mut buf = [0u8; 1];
        assert_eq!(tty.read(DEV_ZERO, &mut buf), Err(VfsError::NoSuchDevice));
        assert_eq!(tty.write(DEV_INITRD, b"x"), Err(VfsError::NoSuchDevice));
    }
}
