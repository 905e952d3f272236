//! Owned single-channel planes in row-major layout.
//!
//! [`IntensityTensor`] is the 8-bit luminance grid every stage reads and
//! produces. [`ResponsePlane`] holds raw signed convolution sums before they
//! are narrowed back to 8 bits. Dimensions are fixed at construction; stages
//! allocate a fresh zero-initialised plane for their output instead of editing
//! their input.
use super::traits::{ImageView, ImageViewMut};
use std::ops::{Index, IndexMut};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane<T> {
    /// Width in samples (number of columns)
    pub w: usize,
    /// Height in samples (number of rows)
    pub h: usize,
    /// Row-major storage, `w * h` samples
    pub data: Vec<T>,
}

/// 8-bit luminance samples, one per pixel.
pub type IntensityTensor = Plane<u8>;

/// Wide signed accumulator output of a convolution pass.
pub type ResponsePlane = Plane<i64>;

impl<T: Copy + Default> Plane<T> {
    /// Zero-initialised plane of `h` rows by `w` columns.
    pub fn new(h: usize, w: usize) -> Self {
        Self {
            w,
            h,
            data: vec![T::default(); w * h],
        }
    }

    /// Plane with every cell set to `value`.
    pub fn filled(h: usize, w: usize, value: T) -> Self {
        Self {
            w,
            h,
            data: vec![value; w * h],
        }
    }

    /// Wrap existing row-major samples. Returns `None` when the length does not
    /// match `h * w`.
    pub fn from_raw(h: usize, w: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == w * h).then_some(Self { w, h, data })
    }

    /// Build from nested rows; all rows must share the first row's length.
    pub fn from_rows(rows: &[Vec<T>]) -> Option<Self> {
        let h = rows.len();
        let w = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != w) {
            return None;
        }
        let data = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Some(Self { w, h, data })
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        row * self.w + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: T) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    /// Same-sized plane produced by applying `f` to every sample.
    pub fn map<U: Copy + Default>(&self, f: impl Fn(T) -> U) -> Plane<U> {
        Plane {
            w: self.w,
            h: self.h,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

impl<T: Copy + Default + PartialEq> Plane<T> {
    /// Number of cells that differ from `T::default()`.
    pub fn count_nonzero(&self) -> usize {
        let zero = T::default();
        self.data.iter().filter(|&&v| v != zero).count()
    }
}

impl<T> Index<usize> for Plane<T> {
    type Output = [T];

    /// Row access, so cells read as `tensor[row][col]`.
    #[inline]
    fn index(&self, row: usize) -> &[T] {
        let start = row * self.w;
        &self.data[start..start + self.w]
    }
}

impl<T> IndexMut<usize> for Plane<T> {
    #[inline]
    fn index_mut(&mut self, row: usize) -> &mut [T] {
        let start = row * self.w;
        &mut self.data[start..start + self.w]
    }
}

impl<T: Copy> ImageView for Plane<T> {
    type Pixel = T;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[T] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

impl<T: Copy> ImageViewMut for Plane<T> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}
