//! Post-threshold edge thinning.
//!
//! A full Canny detector follows the global threshold with non-maximum
//! suppression, a strong/weak double threshold and hysteresis linking. None of
//! those stages exist yet; [`EdgeThinning`] is where they plug into
//! [`EdgePipeline`](crate::pipeline::EdgePipeline), and [`Passthrough`] is the
//! only implementation.
use crate::image::IntensityTensor;

pub trait EdgeThinning: Send + Sync {
    /// Short label used in logs and timing reports.
    fn name(&self) -> &'static str;

    /// Consume a thresholded magnitude map and return the thinned map.
    fn apply(&self, magnitude: IntensityTensor) -> IntensityTensor;
}

/// Returns the magnitude map unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl EdgeThinning for Passthrough {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn apply(&self, magnitude: IntensityTensor) -> IntensityTensor {
        magnitude
    }
}
