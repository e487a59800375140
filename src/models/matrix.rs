/// Compact bit matrix for binary image data, true = black
///
/// Bits are packed LSB-first and every row starts on a byte boundary
/// (`row_stride` bytes per row). Rows never share a byte, which is what
/// lets the parallel binarization path hand each worker its own row
/// slices. Padding bits past `width` in a row stay zero.
#[derive(Debug, Clone)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    row_stride: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new all-white matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let row_stride = width.div_ceil(8);
        Self {
            width,
            height,
            row_stride,
            data: vec![0; row_stride * height],
        }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Packed bytes per row
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Get bit at (x, y); out-of-bounds reads return false
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte_index = y * self.row_stride + x / 8;
        (self.data[byte_index] >> (x % 8)) & 1 == 1
    }

    /// Set bit at (x, y); out-of-bounds writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let byte_index = y * self.row_stride + x / 8;
        if value {
            self.data[byte_index] |= 1 << (x % 8);
        } else {
            self.data[byte_index] &= !(1 << (x % 8));
        }
    }

    /// Clear all bits to white
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Get raw packed bytes, `row_stride` bytes per row
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable packed bytes for row-sliced fills
    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
