#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod pipeline;

// Numeric building blocks, usable on their own.
pub mod config;
pub mod convolve;
pub mod edges;
pub mod kernel;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{PipelineError, Result};
pub use crate::pipeline::{run_file, EdgePipeline, PipelineOutput, PipelineParams};

pub use crate::diagnostics::PipelineReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use canny_pipeline::prelude::*;
///
/// let mut tensor = IntensityTensor::new(20, 20);
/// tensor[10][10] = 255;
///
/// let pipeline = EdgePipeline::new(PipelineParams::default()).unwrap();
/// let output = pipeline.process_tensor(tensor);
/// assert_eq!((output.edges.h, output.edges.w), (20, 20));
/// ```
pub mod prelude {
    pub use crate::convolve::{convolve, convolve_raw, Narrowing};
    pub use crate::edges::{compute_gradient_magnitude, GradientParams};
    pub use crate::image::{from_color_image, to_color_image, ImageView, IntensityTensor};
    pub use crate::kernel::{GaussianKernel, GaussianParams, Kernel};
    pub use crate::{EdgePipeline, PipelineParams};
}
