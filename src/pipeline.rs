//! Pipeline driver: grayscale → tensor → Gaussian smoothing → thresholded
//! gradient magnitude → edge thinning → image.
//!
//! Every stage allocates its own output tensor and hands it to the next stage
//! by value; nothing is edited in place across stages.
//!
//! ```no_run
//! use canny_pipeline::{EdgePipeline, PipelineParams};
//! use canny_pipeline::image::io::load_color_image;
//! use std::path::Path;
//!
//! # fn main() -> canny_pipeline::Result<()> {
//! let pipeline = EdgePipeline::new(PipelineParams::default())?;
//! let image = load_color_image(Path::new("input.png"))?;
//! let output = pipeline.process(&image)?;
//! println!("edge pixels: {}", output.report.edge_pixels);
//! # Ok(())
//! # }
//! ```
use crate::convolve::{self, Narrowing};
use crate::diagnostics::{InputDescriptor, KernelDescriptor, PipelineReport, TimingBreakdown};
use crate::edges::{compute_gradient_magnitude, EdgeThinning, GradientParams, Passthrough};
use crate::error::Result;
use crate::image::io::{export_to_target, load_color_image, OutputTarget};
use crate::image::{from_color_image, to_color_image, IntensityTensor};
use crate::kernel::{GaussianKernel, GaussianParams};
use image::{DynamicImage, GrayImage};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Knobs for the whole pipeline. Defaults:
/// 5×5 Gaussian with sigma 2.5, threshold `255 * 0.3`, wrapping narrowing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub gaussian: GaussianParams,
    pub gradient: GradientParams,
    pub narrowing: Narrowing,
}

impl PipelineParams {
    pub fn validate(&self) -> Result<()> {
        self.gaussian.validate()?;
        self.gradient.validate()
    }
}

/// Tensors and report produced by one run.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// Gaussian-smoothed intensity.
    pub smoothed: IntensityTensor,
    /// Thresholded (and thinned) gradient magnitude.
    pub edges: IntensityTensor,
    pub report: PipelineReport,
}

impl PipelineOutput {
    pub fn edges_image(&self) -> GrayImage {
        to_color_image(&self.edges)
    }

    pub fn smoothed_image(&self) -> GrayImage {
        to_color_image(&self.smoothed)
    }
}

pub struct EdgePipeline {
    params: PipelineParams,
    gaussian: GaussianKernel,
    thinning: Box<dyn EdgeThinning>,
}

impl std::fmt::Debug for EdgePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgePipeline")
            .field("params", &self.params)
            .field("normalization", &self.gaussian.normalization())
            .field("thinning", &self.thinning.name())
            .finish()
    }
}

impl EdgePipeline {
    /// Validate parameters and synthesise the Gaussian kernel. Fails before
    /// any tensor work when the parameters are invalid.
    pub fn new(params: PipelineParams) -> Result<Self> {
        params.validate()?;
        let gaussian = GaussianKernel::from_params(params.gaussian)?;
        Ok(Self {
            params,
            gaussian,
            thinning: Box::new(Passthrough),
        })
    }

    /// Replace the edge-thinning stage.
    pub fn with_thinning(mut self, thinning: Box<dyn EdgeThinning>) -> Self {
        self.thinning = thinning;
        self
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    pub fn gaussian(&self) -> &GaussianKernel {
        &self.gaussian
    }

    pub fn smooth(&self, tensor: &IntensityTensor) -> IntensityTensor {
        convolve::smooth(tensor, &self.gaussian, self.params.narrowing)
    }

    /// Run the numeric stages on an already tensorized image.
    pub fn process_tensor(&self, tensor: IntensityTensor) -> PipelineOutput {
        self.run_stages(tensor, TimingBreakdown::default(), Instant::now())
    }

    /// Reduce a decoded image to grayscale and run every stage.
    pub fn process(&self, image: &DynamicImage) -> Result<PipelineOutput> {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        info!("converting {}x{} image to grayscale", image.width(), image.height());
        let start = Instant::now();
        let tensor = from_color_image(image)?;
        timings.push("grayscale", elapsed_ms(start));

        Ok(self.run_stages(tensor, timings, total_start))
    }

    fn run_stages(
        &self,
        tensor: IntensityTensor,
        mut timings: TimingBreakdown,
        total_start: Instant,
    ) -> PipelineOutput {
        let input = InputDescriptor {
            width: tensor.w,
            height: tensor.h,
        };
        debug!(
            "EdgePipeline start w={} h={} kernel={} sigma={}",
            input.width, input.height, self.params.gaussian.size, self.params.gaussian.sigma
        );

        info!("applying gaussian filter");
        let start = Instant::now();
        let smoothed = self.smooth(&tensor);
        drop(tensor);
        timings.push("smooth", elapsed_ms(start));

        info!("computing gradient magnitude");
        let start = Instant::now();
        let magnitude = compute_gradient_magnitude(
            &smoothed,
            &self.params.gradient,
            self.params.narrowing,
        );
        timings.push("gradient", elapsed_ms(start));

        let start = Instant::now();
        let edges = self.thinning.apply(magnitude);
        timings.push(self.thinning.name(), elapsed_ms(start));

        timings.total_ms = elapsed_ms(total_start);
        let report = PipelineReport {
            input,
            kernel: KernelDescriptor {
                size: self.params.gaussian.size,
                sigma: self.params.gaussian.sigma,
                normalization: self.gaussian.normalization().get(),
            },
            threshold: self.params.gradient.threshold,
            narrowing: self.params.narrowing,
            thinning: self.thinning.name().to_string(),
            edge_pixels: edges.count_nonzero(),
            timings,
        };
        debug!(
            "EdgePipeline done edges={} total_ms={:.3}",
            report.edge_pixels, report.timings.total_ms
        );

        PipelineOutput {
            smoothed,
            edges,
            report,
        }
    }
}

/// Decode `input`, run the pipeline and encode the edge map to `output`.
///
/// The output extension and the parameters are checked before the input is
/// read. Returns the report and the path actually written.
pub fn run_file(
    input: &Path,
    output: &Path,
    params: PipelineParams,
) -> Result<(PipelineReport, PathBuf)> {
    let target = OutputTarget::from_path(output)?;
    let pipeline = EdgePipeline::new(params)?;

    info!("loading image {}", input.display());
    let image = load_color_image(input)?;
    let result = pipeline.process(&image)?;

    info!("writing {}", target.path().display());
    let written = export_to_target(&result.edges_image(), &target)?;
    Ok((result.report, written))
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
