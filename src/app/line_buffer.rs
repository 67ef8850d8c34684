//! CR/LF line accumulator for the command channel.

use heapless::Vec;

use crate::config::LINE_CAPACITY;

/// One complete command line, terminator stripped.
pub type Line = Vec<u8, LINE_CAPACITY>;

/// What a single byte did to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    /// Byte stored (or dropped past capacity); line still open.
    Pending,
    /// Terminator ended a non-empty line.
    Line(Line),
    /// Terminator ended a line that did not fit; `dropped` bytes were lost.
    Overflow { dropped: usize },
}

/// Accumulates bytes until `\r` or `\n`.
///
/// Whitespace before the first visible byte is never stored, and whitespace
/// arriving once the buffer is full is only counted as lost if something
/// visible follows it.  Padding on either side of a command therefore never
/// pushes it into overflow; only the trimmed body is bounded.
pub struct LineBuffer {
    buf: Line,
    dropped: usize,
    /// Leading whitespace was skipped on the current line.
    padded: bool,
    /// Whitespace seen after the buffer filled, not yet known to be trailing.
    held_blanks: usize,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            dropped: 0,
            padded: false,
            held_blanks: 0,
        }
    }

    /// Push one received byte.
    ///
    /// Either terminator closes the line; a terminator with nothing before
    /// it (including the second half of a CR LF pair) is swallowed.  A line
    /// of whitespace only still closes as an empty [`Feed::Line`].
    pub fn feed(&mut self, byte: u8) -> Feed {
        if byte == b'\r' || byte == b'\n' {
            let dropped = self.dropped;
            let had_input = self.padded || !self.buf.is_empty();
            let line = core::mem::take(&mut self.buf);
            self.clear();
            return match (dropped, had_input) {
                (0, false) => Feed::Pending,
                (0, true) => Feed::Line(line),
                (dropped, _) => Feed::Overflow { dropped },
            };
        }

        if byte.is_ascii_whitespace() {
            if self.buf.is_empty() {
                self.padded = true;
            } else if self.buf.push(byte).is_err() {
                self.held_blanks += 1;
            }
            return Feed::Pending;
        }

        let stored = self.held_blanks == 0 && self.buf.push(byte).is_ok();
        if !stored {
            self.dropped += self.held_blanks + 1;
            self.held_blanks = 0;
        }
        Feed::Pending
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.dropped = 0;
        self.padded = false;
        self.held_blanks = 0;
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty() && self.dropped == 0 && !self.padded && self.held_blanks == 0
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
