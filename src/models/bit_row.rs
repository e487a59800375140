/// Compact bit container for one scanline, true = black
///
/// Bits are packed LSB-first. Callers typically keep one row alive across
/// frames and hand it back for reuse, so `size` may exceed the width of the
/// image currently being binarized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitRow {
    size: usize,
    data: Vec<u8>,
}

impl BitRow {
    /// Create a new all-white row of `size` bits
    pub fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![0; size.div_ceil(8)],
        }
    }

    /// Number of addressable bits
    pub fn size(&self) -> usize {
        self.size
    }

    /// True when the row holds no bits
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Get bit at x; out-of-bounds reads return false
    pub fn get(&self, x: usize) -> bool {
        if x >= self.size {
            return false;
        }
        (self.data[x / 8] >> (x % 8)) & 1 == 1
    }

    /// Set bit at x; out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, value: bool) {
        if x >= self.size {
            return;
        }
        if value {
            self.data[x / 8] |= 1 << (x % 8);
        } else {
            self.data[x / 8] &= !(1 << (x % 8));
        }
    }

    /// Clear all bits to white
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

impl Default for BitRow {
    fn default() -> Self {
        Self::new(0)
    }
}
