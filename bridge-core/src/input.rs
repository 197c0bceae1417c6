//! Command source trait, line type, error types and the byte-to-line splitter.

use heapless::{String, Vec};

/// Capacity of one [`Line`] in bytes. Longer input lines arrive as several
/// consecutive segments.
pub const MAX_LINE_LENGTH: usize = 64;

/// One command line, or one segment of a line longer than [`MAX_LINE_LENGTH`].
pub type Line = String<MAX_LINE_LENGTH>;

/// Error type for line reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// UART/communication I/O error.
    Io,
    /// UART framing error.
    Framing,
    /// Receive FIFO overrun; bytes were lost.
    BufferOverflow,
}

/// Non-blocking provider of command lines.
///
/// Implementations return immediately: a complete line if one has arrived,
/// `None` otherwise. Transport errors are handled on the producing side and
/// never reach the dispatcher.
pub trait CommandSource {
    /// Take the next pending line, if any.
    fn next_line(&mut self) -> Option<Line>;
}

/// Splits a byte stream into [`Line`]s.
///
/// Lines end at `\n`. Surrounding whitespace (including a trailing `\r`) is
/// trimmed and blank lines produce nothing. Nothing is ever rejected:
///
/// - A line longer than [`MAX_LINE_LENGTH`] is emitted in full-buffer
///   segments, in order. Whitespace at segment boundaries is kept; only the
///   start of the first and the end of the last segment are trimmed.
/// - Invalid UTF-8 sequences are dropped and the valid text around them kept.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buffer: Vec<u8, MAX_LINE_LENGTH>,
    continued: bool,
}

impl LineAssembler {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            continued: false,
        }
    }

    /// Feed one byte. Returns a line or line segment when one is complete.
    pub fn push(&mut self, byte: u8) -> Option<Line> {
        if byte == b'\n' {
            let line = self.take_segment(true);
            self.continued = false;
            return line;
        }

        if self.buffer.is_full() {
            let segment = self.take_segment(false);
            // Buffer was just cleared
            let _ = self.buffer.push(byte);
            return segment;
        }
        let _ = self.buffer.push(byte);
        None
    }

    /// Drop the partially received line, e.g. after a transport error.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.continued = false;
    }

    fn take_segment(&mut self, last: bool) -> Option<Line> {
        let mut bytes: &[u8] = &self.buffer;
        if !self.continued {
            bytes = bytes.trim_ascii_start();
        }
        if last {
            bytes = bytes.trim_ascii_end();
        }
        let line = decode_lossy(bytes);
        self.buffer.clear();

        if line.is_empty() {
            return None;
        }
        self.continued = !last;
        Some(line)
    }
}

fn decode_lossy(bytes: &[u8]) -> Line {
    let mut line = Line::new();
    for chunk in bytes.utf8_chunks() {
        // Never longer than the source buffer
        let _ = line.push_str(chunk.valid());
    }
    line
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec::Vec;

    use super::*;

    fn split(raw: &[u8]) -> Vec<Line> {
        let mut assembler = LineAssembler::new();
        raw.iter().filter_map(|&b| assembler.push(b)).collect()
    }

    #[test]
    fn test_trims_whitespace_and_cr() {
        let lines = split(b"  MODE_MOUSE\r\n");
        assert_eq!(lines, [Line::try_from("MODE_MOUSE").unwrap()]);
    }

    #[test]
    fn test_blank_lines_produce_nothing() {
        assert!(split(b" \r\n\n\r\n").is_empty());
    }

    #[test]
    fn test_line_without_newline_is_pending() {
        let mut assembler = LineAssembler::new();
        assert!(b"MOUSE_UP".iter().all(|&b| assembler.push(b).is_none()));
        assert_eq!(assembler.push(b'\n').unwrap().as_str(), "MOUSE_UP");
    }

    #[test]
    fn test_invalid_bytes_are_dropped() {
        let lines = split(b"hello\xFFworld\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_str(), "helloworld");
    }

    #[test]
    fn test_long_line_is_split_not_rejected() {
        let text = "The quick brown fox jumps over the lazy dog while running far away";
        assert!(text.len() > MAX_LINE_LENGTH);
        let mut raw = std::string::String::from(text);
        raw.push_str("\r\n");

        let lines = split(raw.as_bytes());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), MAX_LINE_LENGTH);
        let joined: std::string::String = lines.iter().map(|l| l.as_str()).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_segment_boundary_whitespace_kept() {
        let mut raw = [b'a'; MAX_LINE_LENGTH + 3];
        raw[MAX_LINE_LENGTH] = b' ';
        raw[MAX_LINE_LENGTH + 2] = b'\n';
        let lines = split(&raw);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].as_str(), " a");
    }

    #[test]
    fn test_next_line_after_segments_is_trimmed_again() {
        let mut raw = std::vec![b'x'; MAX_LINE_LENGTH + 1];
        raw.extend_from_slice(b"\n  ok \n");
        let lines = split(&raw);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].as_str(), "x");
        assert_eq!(lines[2].as_str(), "ok");
    }

    #[test]
    fn test_reset_drops_partial_line() {
        let mut assembler = LineAssembler::new();
        for &b in b"garb" {
            assembler.push(b);
        }
        assembler.reset();
        for &b in b"BIOS_ESC" {
            assembler.push(b);
        }
        assert_eq!(assembler.push(b'\n').unwrap().as_str(), "BIOS_ESC");
    }

    #[test]
    fn test_inner_spaces_kept() {
        let lines = split(b"hello world\n");
        assert_eq!(lines[0].as_str(), "hello world");
    }
}
