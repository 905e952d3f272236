//! Gaussian kernel synthesis by sampling the 1-D density.
//!
//! The 1-D density is sampled at integer offsets `-size/2..=size/2`, the 2-D
//! kernel is its outer product, and dividing by the summed outer product gives
//! real weights that add up to 1. For integer convolution the real weights are
//! scaled by [`FIXED_POINT_SCALE`] and floored. The normalization scalar is the
//! sum of the quantized weights, so dividing an integer convolution sum by it
//! maps the result back into the intensity domain and leaves constant fields
//! unchanged.
use super::Kernel;
use crate::error::{PipelineError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Fixed-point scale applied to the normalised real weights before flooring.
///
/// Flooring drops less than one unit per weight, so for every accepted size
/// the quantized weights keep more than 99% of this mass.
pub const FIXED_POINT_SCALE: f64 = 65536.0;

/// Largest accepted kernel side. `25² < 1%` of [`FIXED_POINT_SCALE`].
pub const MAX_KERNEL_SIZE: usize = 25;

/// Size and standard deviation of the smoothing kernel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianParams {
    /// Odd kernel side length in `3..=MAX_KERNEL_SIZE`.
    pub size: usize,
    /// Standard deviation in pixels, strictly positive.
    pub sigma: f64,
}

impl Default for GaussianParams {
    fn default() -> Self {
        Self {
            size: 5,
            sigma: 2.5,
        }
    }
}

impl GaussianParams {
    pub fn validate(&self) -> Result<()> {
        if self.size < 3 || self.size % 2 == 0 || self.size > MAX_KERNEL_SIZE {
            return Err(PipelineError::InvalidKernelParameter(format!(
                "gaussian size must be odd and in 3..={MAX_KERNEL_SIZE}, got {}",
                self.size
            )));
        }
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(PipelineError::InvalidKernelParameter(format!(
                "gaussian sigma must be finite and > 0, got {}",
                self.sigma
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct GaussianKernel {
    params: GaussianParams,
    /// Normalised real weights (sum == 1).
    real: Kernel<f64>,
    /// `floor(real * FIXED_POINT_SCALE)`
    quantized: Kernel<i32>,
    /// Sum of the quantized weights; divisor for integer convolution.
    normalization: NonZeroU32,
}

impl GaussianKernel {
    /// Build a `size × size` kernel with standard deviation `sigma`.
    pub fn synthesize(size: usize, sigma: f64) -> Result<Self> {
        Self::from_params(GaussianParams { size, sigma })
    }

    pub fn from_params(params: GaussianParams) -> Result<Self> {
        params.validate()?;
        let size = params.size;
        let k1 = sample_density(size, params.sigma);

        let mut outer = Vec::with_capacity(size * size);
        for &a in &k1 {
            for &b in &k1 {
                outer.push(a * b);
            }
        }
        let total: f64 = outer.iter().sum();

        let real: Vec<f64> = outer.iter().map(|&w| w / total).collect();
        let quantized: Vec<i32> = real
            .iter()
            .map(|&w| (w * FIXED_POINT_SCALE).floor() as i32)
            .collect();
        let total_q: i64 = quantized.iter().map(|&q| q as i64).sum();
        let normalization = u32::try_from(total_q)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| {
                PipelineError::InvalidKernelParameter(format!(
                    "gaussian {size}x{size} sigma={} quantizes to an all-zero kernel",
                    params.sigma
                ))
            })?;

        debug!(
            "GaussianKernel size={} sigma={} normalization={}",
            size, params.sigma, normalization
        );

        Ok(Self {
            params,
            real: Kernel::new(size, real)?,
            quantized: Kernel::new(size, quantized)?,
            normalization,
        })
    }

    pub fn params(&self) -> GaussianParams {
        self.params
    }

    pub fn real(&self) -> &Kernel<f64> {
        &self.real
    }

    pub fn quantized(&self) -> &Kernel<i32> {
        &self.quantized
    }

    pub fn normalization(&self) -> NonZeroU32 {
        self.normalization
    }

    /// Share of [`FIXED_POINT_SCALE`] that survived flooring.
    pub fn quantized_mass(&self) -> f64 {
        self.normalization.get() as f64 / FIXED_POINT_SCALE
    }
}

/// Unnormalised 1-D Gaussian sampled at integer offsets around 0.
///
/// The `1/(sqrt(2π)σ)` factor cancels in normalisation and is left out; it
/// would under- or overflow for extreme `sigma`. Dividing by `sigma` before
/// squaring keeps the centre sample at exactly 1.
fn sample_density(size: usize, sigma: f64) -> Vec<f64> {
    let half = (size / 2) as i64;
    (-half..=half)
        .map(|i| {
            let z = i as f64 / sigma;
            (-0.5 * z * z).exp()
        })
        .collect()
}
