//! Inbound line framing for the host console.
//!
//! Bytes are accumulated until the configured terminator arrives. The
//! terminator itself is not part of the line, and ASCII whitespace around
//! the text is dropped as it arrives, so padding never counts against
//! [`MAX_LINE_LEN`]. Text longer than that keeps its first `MAX_LINE_LEN`
//! bytes and drops the rest up to the terminator; the resulting [`Line`] is
//! flagged as truncated.
//!
//! Bytes are stored raw and decoded as UTF-8 when the line completes. Only
//! invalid sequences are replaced with `'?'`; a character cut in half by the
//! length cap is dropped.

use heapless::{String, Vec};

/// Maximum number of bytes kept per line
pub const MAX_LINE_LEN: usize = 64;

/// Default line terminator
pub const DEFAULT_TERMINATOR: u8 = b'\n';

/// Substitute for invalid UTF-8 sequences
const REPLACEMENT: char = '?';

/// A complete inbound line, terminator and surrounding whitespace stripped
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    text: String<MAX_LINE_LEN>,
    truncated: bool,
}

impl Line {
    /// The text of the line
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Whether bytes were dropped because the line was too long
    ///
    /// A truncated line is not the text the host sent and must not be
    /// matched against the command table.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Length of the kept text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether no text was kept
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Line {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.text.as_str());
        if self.truncated {
            defmt::write!(f, " (truncated)");
        }
    }
}

/// Byte-at-a-time line accumulator
#[derive(Debug, Clone)]
pub struct LineParser {
    buffer: Vec<u8, MAX_LINE_LEN>,
    /// Whitespace after the last kept byte, kept only if more text follows
    held: Vec<u8, MAX_LINE_LEN>,
    held_overflow: bool,
    terminator: u8,
    truncated: bool,
    /// Bytes received since the last completed line, including dropped ones
    pending: usize,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new(DEFAULT_TERMINATOR)
    }
}

impl LineParser {
    /// Create a new parser completing lines on `terminator`
    pub const fn new(terminator: u8) -> Self {
        Self {
            buffer: Vec::new(),
            held: Vec::new(),
            held_overflow: false,
            terminator,
            truncated: false,
            pending: 0,
        }
    }

    /// Whether any bytes of an unfinished line were received
    pub fn has_pending(&self) -> bool {
        self.pending > 0
    }

    /// Discard any partially received line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.held.clear();
        self.held_overflow = false;
        self.truncated = false;
        self.pending = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Some(line)` when `byte` is the terminator, `None` otherwise.
    /// A terminator on its own yields an empty line.
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        if byte == self.terminator {
            return Some(self.take_line());
        }
        self.push(byte);
        None
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete line found, if any.
    /// Remaining bytes after a complete line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<Line> {
        for &byte in bytes {
            if let Some(line) = self.feed(byte) {
                return Some(line);
            }
        }
        None
    }

    /// Complete the buffered partial line, if there is one
    ///
    /// Used when the link has gone idle without sending a terminator.
    pub fn take(&mut self) -> Option<Line> {
        if self.has_pending() {
            Some(self.take_line())
        } else {
            None
        }
    }

    fn push(&mut self, byte: u8) {
        self.pending = self.pending.saturating_add(1);

        if self.truncated {
            return;
        }

        if is_space(byte) {
            // Leading whitespace is dropped outright
            if !self.buffer.is_empty() && self.held.push(byte).is_err() {
                self.held_overflow = true;
            }
            return;
        }

        let kept = self.buffer.len();
        if self.held_overflow
            || self.buffer.extend_from_slice(&self.held).is_err()
            || self.buffer.push(byte).is_err()
        {
            self.buffer.truncate(kept);
            self.truncated = true;
            return;
        }
        self.held.clear();
    }

    fn take_line(&mut self) -> Line {
        let line = Line {
            text: decode(&self.buffer, self.truncated),
            truncated: self.truncated,
        };
        self.reset();
        line
    }
}

/// Whitespace as `str::trim` and C `isspace` see it in the ASCII range
fn is_space(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0b
}

/// Decode stored bytes, replacing each invalid sequence with one `'?'`
///
/// The output is never longer than the input, so pushes cannot fail.
fn decode(mut bytes: &[u8], truncated: bool) -> String<MAX_LINE_LEN> {
    let mut text = String::new();

    loop {
        match core::str::from_utf8(bytes) {
            Ok(valid) => {
                let _ = text.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                if let Ok(valid) = core::str::from_utf8(valid) {
                    let _ = text.push_str(valid);
                }

                match e.error_len() {
                    Some(len) => {
                        let _ = text.push(REPLACEMENT);
                        bytes = &rest[len..];
                    }
                    None => {
                        // Incomplete character at the end: cut by the cap,
                        // or sent that way by the host
                        if !truncated {
                            let _ = text.push(REPLACEMENT);
                        }
                        break;
                    }
                }
            }
        }
    }

    text
}
