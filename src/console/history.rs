//! Command history with ring buffer
//!
//! Static allocation, `DEPTH` entries of `LINE` bytes each. A depth of 0
//! turns history off: pushes are dropped and browsing finds nothing.

/// Command history ring buffer
pub struct History<const DEPTH: usize, const LINE: usize> {
    /// Ring buffer of command lines
    entries: [[u8; LINE]; DEPTH],
    /// Length of each entry
    lengths: [usize; DEPTH],
    /// Write index (next slot to write)
    write_idx: usize,
    /// Number of valid entries
    count: usize,
    /// Current browse position (None = editing a fresh line, 0 = newest)
    nav_pos: Option<usize>,
}

impl<const DEPTH: usize, const LINE: usize> History<DEPTH, LINE> {
    /// Create empty history
    pub const fn new() -> Self {
        Self {
            entries: [[0u8; LINE]; DEPTH],
            lengths: [0; DEPTH],
            write_idx: 0,
            count: 0,
            nav_pos: None,
        }
    }

    /// Save a committed line.
    ///
    /// A line identical to the newest entry is not stored again. When full,
    /// the oldest entry is overwritten. Browsing restarts from the newest.
    pub fn push(&mut self, line: &str) {
        self.nav_pos = None;
        if DEPTH == 0 || self.newest() == Some(line) {
            return;
        }

        let bytes = line.as_bytes();
        let len = bytes.len().min(LINE);

        self.entries[self.write_idx][..len].copy_from_slice(&bytes[..len]);
        self.lengths[self.write_idx] = len;

        self.write_idx = (self.write_idx + 1) % DEPTH;
        self.count = (self.count + 1).min(DEPTH);
    }

    /// Step to the previous (older) entry.
    ///
    /// Returns `None` without moving when already at the oldest entry.
    pub fn older(&mut self) -> Option<&str> {
        let pos = match self.nav_pos {
            None if self.count > 0 => 0,
            Some(p) if p + 1 < self.count => p + 1,
            _ => return None,
        };

        self.nav_pos = Some(pos);
        self.get(pos)
    }

    /// Step to the next (newer) entry.
    ///
    /// Stepping past the newest entry yields `Some("")`, the empty line the
    /// user started from. Returns `None` without moving when not browsing.
    pub fn newer(&mut self) -> Option<&str> {
        match self.nav_pos {
            None => None,
            Some(0) => {
                self.nav_pos = None;
                Some("")
            }
            Some(p) => {
                self.nav_pos = Some(p - 1);
                self.get(p - 1)
            }
        }
    }

    /// Reset browsing (call when a fresh line starts)
    pub fn reset_nav(&mut self) {
        self.nav_pos = None;
    }

    /// Current browse position, `None` when not browsing
    pub fn nav_pos(&self) -> Option<usize> {
        self.nav_pos
    }

    /// Number of stored lines
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Most recently stored line
    pub fn newest(&self) -> Option<&str> {
        self.get(0)
    }

    /// Entry by age (0 = newest)
    pub fn get(&self, age: usize) -> Option<&str> {
        if age >= self.count {
            return None;
        }

        // write_idx points to next write slot, so newest is at write_idx - 1
        let idx = (self.write_idx + DEPTH - 1 - age) % DEPTH;
        let len = self.lengths[idx];

        core::str::from_utf8(&self.entries[idx][..len]).ok()
    }

    /// Stored lines, newest first
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.count).filter_map(move |age| self.get(age))
    }
}

impl<const DEPTH: usize, const LINE: usize> Default for History<DEPTH, LINE> {
    fn default() -> Self {
        Self::new()
    }
}
