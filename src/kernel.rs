//! Square, odd-sized convolution kernels.
//!
//! - [`Kernel`] stores weights row-major with a well-defined centre cell.
//! - Fixed 3×3 operators (Sobel pair, sharpening) are compile-time constants.
//! - [`gaussian`] synthesises normalised, fixed-point Gaussian kernels.

pub mod gaussian;

pub use gaussian::{GaussianKernel, GaussianParams, FIXED_POINT_SCALE, MAX_KERNEL_SIZE};

use crate::error::{PipelineError, Result};

pub type Kernel3 = [[i32; 3]; 3];

/// Sobel horizontal derivative.
pub const SOBEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
/// Sobel vertical derivative.
pub const SOBEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];
/// Laplacian-style sharpening, weights sum to 1.
pub const SHARPEN: Kernel3 = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];

#[derive(Clone, Debug, PartialEq)]
pub struct Kernel<T> {
    size: usize,
    weights: Vec<T>,
}

impl<T: Copy> Kernel<T> {
    /// Wrap `size × size` row-major weights. `size` must be odd.
    pub fn new(size: usize, weights: Vec<T>) -> Result<Self> {
        if size % 2 == 0 {
            return Err(PipelineError::InvalidKernelParameter(format!(
                "kernel size must be odd, got {size}"
            )));
        }
        if weights.len() != size * size {
            return Err(PipelineError::InvalidKernelParameter(format!(
                "expected {} weights for a {size}x{size} kernel, got {}",
                size * size,
                weights.len()
            )));
        }
        Ok(Self { size, weights })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Half-width, i.e. the offset of the centre cell.
    #[inline]
    pub fn half(&self) -> usize {
        self.size / 2
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        self.weights[row * self.size + col]
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.weights[row * self.size..(row + 1) * self.size]
    }

    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    pub fn center(&self) -> T {
        self.at(self.half(), self.half())
    }
}

impl<T: Copy + std::iter::Sum<T>> Kernel<T> {
    pub fn sum(&self) -> T {
        self.weights.iter().copied().sum()
    }
}

impl From<Kernel3> for Kernel<i32> {
    fn from(rows: Kernel3) -> Self {
        Self {
            size: 3,
            weights: rows.iter().flatten().copied().collect(),
        }
    }
}

pub fn sobel_x() -> Kernel<i32> {
    Kernel::from(SOBEL_X)
}

pub fn sobel_y() -> Kernel<i32> {
    Kernel::from(SOBEL_Y)
}

pub fn sharpen() -> Kernel<i32> {
    Kernel::from(SHARPEN)
}
