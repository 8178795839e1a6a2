//! In-memory output sink.
//!
//! `SharedBuffer` collects everything an indicator writes so the rendered
//! lines can be inspected afterwards. Clones share one buffer.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Cloneable `Write` sink backed by a shared byte vector
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Written text split into frames at every `'\r'` or `'\n'`
    pub fn frames(&self) -> Vec<String> {
        let contents = self.contents();
        let mut frames: Vec<String> = contents
            .split(|c| c == '\r' || c == '\n')
            .map(str::to_string)
            .collect();
        // split leaves an empty tail after the last terminator
        if frames.last().is_some_and(|f| f.is_empty()) {
            frames.pop();
        }
        frames
    }

    /// Number of carriage returns written (placeholder and in-place updates)
    pub fn carriage_returns(&self) -> usize {
        self.bytes.lock().iter().filter(|&&b| b == b'\r').count()
    }

    /// Number of newlines written (final lines)
    pub fn newlines(&self) -> usize {
        self.bytes.lock().iter().filter(|&&b| b == b'\n').count()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_contents() {
        let buffer = SharedBuffer::new();
        let mut writer = buffer.clone();

        write!(writer, "hello").unwrap();

        assert_eq!(buffer.contents(), "hello");
    }

    #[test]
    fn test_frames_split_on_terminators() {
        let buffer = SharedBuffer::new();
        let mut writer = buffer.clone();

        write!(writer, " ...\r 10%\r 20%\n").unwrap();

        assert_eq!(buffer.frames(), vec![" ...", " 10%", " 20%"]);
        assert_eq!(buffer.carriage_returns(), 2);
        assert_eq!(buffer.newlines(), 1);
    }
}
