//! Sobel gradient magnitude with a global threshold.
//!
//! The smoothed tensor is sharpened, convolved with `Gx` and `Gy` as raw
//! signed sums, and combined per cell as `ceil(sqrt(gx² + gy²))`. Magnitudes
//! at or below the threshold become 0; the rest clamp into `[0, 255]`.
//!
//! Borders compound: the sharpening pass and the Sobel pass each contribute
//! their half-width, so the output keeps a zero frame of `1 + 1` cells.
use crate::convolve::{self, convolve_raw, for_each_row, Narrowing};
use crate::error::{PipelineError, Result};
use crate::image::{ImageViewMut, IntensityTensor, ResponsePlane};
use crate::kernel::{sharpen, sobel_x, sobel_y};
use log::debug;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// `255 * 0.3`
pub const DEFAULT_GRADIENT_THRESHOLD: f64 = 255.0 * 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientParams {
    /// Magnitudes `<= threshold` are suppressed to 0.
    pub threshold: f64,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_GRADIENT_THRESHOLD,
        }
    }
}

impl GradientParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold.is_finite() && self.threshold >= 0.0) {
            return Err(PipelineError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

/// Intermediate buffers of the gradient stage.
#[derive(Clone, Debug)]
pub struct GradientField {
    /// Smoothed input after the sharpening pre-pass.
    pub sharpened: IntensityTensor,
    /// Horizontal derivative (raw `Gx` sums).
    pub gx: ResponsePlane,
    /// Vertical derivative (raw `Gy` sums).
    pub gy: ResponsePlane,
    /// Width of the zero frame around the magnitude map.
    pub frame: usize,
}

/// Sharpen, then run both Sobel passes.
pub fn directional_gradients(smoothed: &IntensityTensor, narrowing: Narrowing) -> GradientField {
    let sharpen = sharpen();
    let (gx_kernel, gy_kernel) = (sobel_x(), sobel_y());
    let sharpened = convolve::convolve(smoothed, &sharpen, NonZeroU32::MIN, narrowing);
    let gx = convolve_raw(&sharpened, &gx_kernel);
    let gy = convolve_raw(&sharpened, &gy_kernel);
    GradientField {
        sharpened,
        gx,
        gy,
        frame: sharpen.half() + gx_kernel.half().max(gy_kernel.half()),
    }
}

#[inline]
fn magnitude(gx: i64, gy: i64) -> u64 {
    let (sx, sy) = (gx.unsigned_abs() as f64, gy.unsigned_abs() as f64);
    (sx * sx + sy * sy).sqrt().ceil() as u64
}

/// Combine the directional responses and apply the global threshold.
///
/// Magnitude ignores [`Narrowing`]: surviving values are always clamped into
/// `[0, 255]`, never wrapped.
pub fn magnitude_map(field: &GradientField, threshold: f64) -> IntensityTensor {
    let (h, w) = (field.gx.h, field.gx.w);
    let mut out = IntensityTensor::new(h, w);
    let (rows, cols) = match (
        convolve::interior(h, field.frame),
        convolve::interior(w, field.frame),
    ) {
        (Some(rows), Some(cols)) => (rows, cols),
        _ => return out,
    };

    for_each_row(out.as_mut_slice(), w, |r, out_row| {
        if !rows.contains(&r) {
            return;
        }
        let (gx_row, gy_row) = (&field.gx[r], &field.gy[r]);
        for c in cols.clone() {
            let mag = magnitude(gx_row[c], gy_row[c]);
            out_row[c] = if mag as f64 <= threshold {
                0
            } else {
                mag.min(255) as u8
            };
        }
    });
    out
}

/// Full gradient stage: sharpen, `Gx`/`Gy`, magnitude, threshold.
pub fn compute_gradient_magnitude(
    smoothed: &IntensityTensor,
    params: &GradientParams,
    narrowing: Narrowing,
) -> IntensityTensor {
    let field = directional_gradients(smoothed, narrowing);
    let out = magnitude_map(&field, params.threshold);
    debug!(
        "gradient magnitude {}x{} threshold={:.1} edges={}",
        out.w,
        out.h,
        params.threshold,
        out.count_nonzero()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageView;

    fn step(h: usize, w: usize, split: usize, lo: u8, hi: u8) -> IntensityTensor {
        let mut t = IntensityTensor::filled(h, w, lo);
        for r in 0..h {
            for c in split..w {
                t[r][c] = hi;
            }
        }
        t
    }

    #[test]
    fn magnitude_rounds_up() {
        assert_eq!(magnitude(3, 4), 5);
        assert_eq!(magnitude(-1, 1), 2);
        assert_eq!(magnitude(0, 0), 0);
    }

    #[test]
    fn rejects_bad_threshold() {
        assert!(GradientParams { threshold: -1.0 }.validate().is_err());
        assert!(GradientParams { threshold: f64::NAN }.validate().is_err());
        assert!(GradientParams::default().validate().is_ok());
        assert!((DEFAULT_GRADIENT_THRESHOLD - 76.5).abs() < 1e-12);
    }

    #[test]
    fn vertical_step_produces_an_edge_column() {
        let t = step(10, 12, 6, 40, 80);
        let g = compute_gradient_magnitude(&t, &GradientParams::default(), Narrowing::Wrap);
        assert_eq!(g.dims(), (10, 12));
        for r in 2..8 {
            assert!(g[r][5] > 0 && g[r][6] > 0, "row {r}: {:?}", g.row(r));
            assert_eq!(g[r][3], 0);
            assert_eq!(g[r][8], 0);
        }
    }

    #[test]
    fn output_keeps_compounded_zero_frame() {
        let t = step(16, 16, 1, 0, 255);
        let field = directional_gradients(&t, Narrowing::Saturate);
        assert_eq!(field.frame, 2);
        let g = magnitude_map(&field, 0.0);
        for r in 0..16 {
            for c in 0..16 {
                if r < 2 || c < 2 || r >= 14 || c >= 14 {
                    assert_eq!(g[r][c], 0);
                }
            }
        }
    }

    #[test]
    fn raising_threshold_never_adds_edges() {
        let mut t = IntensityTensor::new(24, 24);
        for r in 0..24 {
            for c in 0..24 {
                let tile = if (r / 6 + c / 6) % 2 == 0 { 0 } else { 120 };
                t[r][c] = ((r * 7 + c * 13) % 97) as u8 + tile;
            }
        }
        let field = directional_gradients(&t, Narrowing::Wrap);
        let mut last = usize::MAX;
        for threshold in [0.0, 10.0, 50.0, 76.5, 120.0, 200.0, 254.0, 600.0, 1500.0] {
            let count = magnitude_map(&field, threshold).count_nonzero();
            assert!(count <= last, "threshold {threshold}: {count} > {last}");
            last = count;
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn magnitude_saturates_even_when_narrowing_wraps() {
        let mut gx = ResponsePlane::new(5, 5);
        gx[2][2] = 300;
        let field = GradientField {
            sharpened: IntensityTensor::new(5, 5),
            gx,
            gy: ResponsePlane::new(5, 5),
            frame: 2,
        };
        let g = magnitude_map(&field, DEFAULT_GRADIENT_THRESHOLD);
        assert_eq!(g[2][2], 255);
        assert_eq!(g.count_nonzero(), 1);
    }

    #[test]
    fn magnitude_map_matches_cell_by_cell_loop() {
        let mut t = IntensityTensor::new(29, 41);
        for r in 0..29 {
            for c in 0..41 {
                t[r][c] = ((r * 31 + c * 17 + r * c) % 251) as u8;
            }
        }
        let field = directional_gradients(&t, Narrowing::Wrap);
        let threshold = DEFAULT_GRADIENT_THRESHOLD;
        let g = magnitude_map(&field, threshold);
        for r in 0..29 {
            for c in 0..41 {
                let inside = r >= 2 && c >= 2 && r < 27 && c < 39;
                let mag = magnitude(field.gx[r][c], field.gy[r][c]);
                let expected = if !inside || mag as f64 <= threshold {
                    0
                } else {
                    mag.min(255) as u8
                };
                assert_eq!(g[r][c], expected, "cell ({r},{c})");
            }
        }
    }
}
