//! Generic 2-D convolution over [`IntensityTensor`]s with a fixed border.
//!
//! Only cells whose full kernel window lies inside the input are computed;
//! the `half`-wide frame on every side stays at its zero initialisation.
//! Sums accumulate in `i64` and are narrowed to 8 bits in a single step,
//! either by wrapping (the truncating cast) or by saturating.
//!
//! With the `parallel` feature, interior rows are filled concurrently. Each
//! output cell depends only on the shared input, so the result is identical.
use crate::image::{ImageView, ImageViewMut, IntensityTensor, ResponsePlane};
use crate::kernel::{GaussianKernel, Kernel};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How a wide sum becomes an 8-bit sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Narrowing {
    /// Keep the low 8 bits (`as u8`). Out-of-range sums wrap around.
    #[default]
    Wrap,
    /// Clamp into `[0, 255]`.
    Saturate,
}

#[inline]
pub fn narrow(v: i64, narrowing: Narrowing) -> u8 {
    match narrowing {
        Narrowing::Wrap => v as u8,
        Narrowing::Saturate => v.clamp(0, 255) as u8,
    }
}

/// Raw weighted sums, no normalization and no narrowing.
pub fn convolve_raw(src: &IntensityTensor, kernel: &Kernel<i32>) -> ResponsePlane {
    let mut out = ResponsePlane::new(src.h, src.w);
    let half = kernel.half();
    let (rows, cols) = match (interior(src.h, half), interior(src.w, half)) {
        (Some(rows), Some(cols)) => (rows, cols),
        _ => return out,
    };

    let w = src.w;
    for_each_row(out.as_mut_slice(), w, |r, out_row| {
        if !rows.contains(&r) {
            return;
        }
        for c in cols.clone() {
            let mut acc = 0i64;
            for i in 0..kernel.size() {
                let src_row = &src.row(r + i - half)[c - half..c + half + 1];
                for (&px, &k) in src_row.iter().zip(kernel.row(i)) {
                    acc += px as i64 * k as i64;
                }
            }
            out_row[c] = acc;
        }
    });
    out
}

/// Convolve, floor-divide by `divisor`, then narrow to 8 bits.
///
/// Pass [`NonZeroU32::MIN`] for kernels that need no rescaling.
pub fn convolve(
    src: &IntensityTensor,
    kernel: &Kernel<i32>,
    divisor: NonZeroU32,
    narrowing: Narrowing,
) -> IntensityTensor {
    let divisor = i64::from(divisor.get());
    convolve_raw(src, kernel).map(|v| narrow(v.div_euclid(divisor), narrowing))
}

/// Gaussian smoothing with the kernel's own normalization scalar.
pub fn smooth(
    src: &IntensityTensor,
    gaussian: &GaussianKernel,
    narrowing: Narrowing,
) -> IntensityTensor {
    convolve(
        src,
        gaussian.quantized(),
        gaussian.normalization(),
        narrowing,
    )
}

/// Index range `half..len-half`, or `None` when nothing is computable.
pub(crate) fn interior(len: usize, half: usize) -> Option<std::ops::Range<usize>> {
    (len > 2 * half).then(|| half..len - half)
}

/// Run `f(row_index, row)` over every `w`-wide row of `data`.
pub(crate) fn for_each_row<T, F>(data: &mut [T], w: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if w == 0 {
        return;
    }
    #[cfg(feature = "parallel")]
    {
        data.par_chunks_mut(w)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    }
    #[cfg(not(feature = "parallel"))]
    {
        data.chunks_mut(w)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    }
}
