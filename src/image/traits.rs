//! Row-oriented access shared by every 2-D buffer in the crate.
//!
//! Buffers are row-major with `stride == width`; a row slice is always exactly
//! `width` samples long.

pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    /// `(height, width)`, i.e. `(rows, cols)`.
    fn dims(&self) -> (usize, usize) {
        (self.height(), self.width())
    }
}

pub trait ImageViewMut: ImageView {
    /// Mutable row-major storage, `width` samples per row.
    fn as_mut_slice(&mut self) -> &mut [Self::Pixel];
}
