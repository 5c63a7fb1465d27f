use super::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Walks column pairs from the right edge, alternating upward and downward sweeps
/// and visiting the right module of each pair first. The vertical timing column
/// is never visited. Function modules are yielded too, callers skip them.
pub struct ZigZagIter {
    width: usize,
    // One past the right column of the current pair
    x: usize,
    // Rows visited so far in the current sweep
    i: usize,
    left: bool,
    upward: bool,
}

impl ZigZagIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width();
        Self { width: w, x: w, i: 0, left: false, upward: true }
    }
}

impl Iterator for ZigZagIter {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        if self.x == 0 {
            return None;
        }
        let r = if self.upward { self.width - 1 - self.i } else { self.i };
        let c = self.x - 1 - self.left as usize;

        self.left = !self.left;
        if !self.left {
            self.i += 1;
            if self.i == self.width {
                self.i = 0;
                self.upward = !self.upward;
                self.x -= 2;
                if self.x == VERT_TIMING_COL + 1 {
                    self.x -= 1;
                }
            }
        }
        Some((r, c))
    }
}


// Global constants
//------------------------------------------------------------------------------

pub const VERT_TIMING_COL: usize = 6;
