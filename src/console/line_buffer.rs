//! Line buffer for console input
//!
//! Holds at most `N - 1` characters so `buf[len]` is always a NUL byte. The
//! keystroke that would fill the last byte marks the line invalid instead;
//! an invalid line refuses edits until it is submitted or aborted.

/// Why a line stopped accepting input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFault {
    /// A character arrived with no room left for it
    Overflow,
    /// A byte the line cannot hold arrived (reduced mode)
    Corrupt,
}

/// Line input buffer with a cursor
pub struct LineBuffer<const N: usize> {
    buf: [u8; N],
    len: usize,
    cursor: usize,
    fault: Option<LineFault>,
}

impl<const N: usize> LineBuffer<N> {
    /// Create empty buffer
    pub const fn new() -> Self {
        assert!(N > 1, "Line buffer needs room for a character and NUL");
        Self {
            buf: [0u8; N],
            len: 0,
            cursor: 0,
            fault: None,
        }
    }

    /// Longest line the buffer accepts
    pub const fn max_len() -> usize {
        N - 1
    }

    /// Insert a character at the cursor, shifting the tail right.
    ///
    /// Returns `false` (and marks the line invalid) when the buffer is full,
    /// or when the line is already invalid.
    pub fn insert(&mut self, c: u8) -> bool {
        if self.fault.is_some() {
            return false;
        }
        if self.len + 1 >= N {
            self.fault = Some(LineFault::Overflow);
            return false;
        }
        self.buf.copy_within(self.cursor..self.len, self.cursor + 1);
        self.buf[self.cursor] = c;
        self.cursor += 1;
        self.len += 1;
        self.buf[self.len] = 0;
        true
    }

    /// Delete the character left of the cursor, shifting the tail left.
    ///
    /// Returns `false` if the cursor is at the start or the line is invalid.
    pub fn backspace(&mut self) -> bool {
        if self.fault.is_some() || self.cursor == 0 {
            return false;
        }
        self.buf.copy_within(self.cursor..self.len, self.cursor - 1);
        self.cursor -= 1;
        self.len -= 1;
        self.buf[self.len] = 0;
        true
    }

    /// Move cursor one left. Returns `false` at the start.
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Move cursor one right. Returns `false` at the end.
    pub fn move_right(&mut self) -> bool {
        if self.cursor == self.len {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Move cursor to the end of the line
    pub fn move_end(&mut self) {
        self.cursor = self.len;
    }

    /// Clear buffer and validity
    pub fn clear(&mut self) {
        self.len = 0;
        self.cursor = 0;
        self.fault = None;
        self.buf[0] = 0;
    }

    /// Replace contents, cursor at end. Input longer than the buffer
    /// allows is cut short.
    pub fn set(&mut self, s: &str) {
        let bytes = s.as_bytes();
        let copy_len = bytes.len().min(N - 1);
        self.buf[..copy_len].copy_from_slice(&bytes[..copy_len]);
        self.len = copy_len;
        self.cursor = copy_len;
        self.fault = None;
        self.buf[self.len] = 0;
    }

    /// Mark the line as corrupted. An earlier overflow is kept.
    pub fn invalidate(&mut self) {
        self.fault.get_or_insert(LineFault::Corrupt);
    }

    pub fn is_invalid(&self) -> bool {
        self.fault.is_some()
    }

    /// Why the line is invalid, if it is
    pub fn fault(&self) -> Option<LineFault> {
        self.fault
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Text from `start` to the end of the line
    pub fn tail(&self, start: usize) -> &str {
        let start = start.min(self.len);
        core::str::from_utf8(&self.buf[start..self.len]).unwrap_or("")
    }

    /// Character under the cursor
    pub fn at_cursor(&self) -> Option<u8> {
        if self.cursor < self.len {
            Some(self.buf[self.cursor])
        } else {
            None
        }
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Cursor position (0..=len)
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if cursor is at end of line
    pub fn at_end(&self) -> bool {
        self.cursor == self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
