use canny_pipeline::image::IntensityTensor;

/// Generates a simple high-contrast checkerboard tensor.
pub fn checkerboard(height: usize, width: usize, cell: usize) -> IntensityTensor {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = IntensityTensor::new(height, width);
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            img[y][x] = if sum & 1 == 0 { 32 } else { 220 };
        }
    }
    img
}

/// Black field with a single bright sample at (row, col).
pub fn single_spot(height: usize, width: usize, row: usize, col: usize) -> IntensityTensor {
    let mut img = IntensityTensor::new(height, width);
    img[row][col] = 255;
    img
}

/// Chebyshev distance between two cells.
pub fn chebyshev(a: (usize, usize), b: (usize, usize)) -> usize {
    a.0.abs_diff(b.0).max(a.1.abs_diff(b.1))
}
