//! Gradient stage of the edge detector.
//!
//! - [`gradient`]: sharpening pre-pass, Sobel `Gx`/`Gy`, magnitude and a single
//!   global threshold.
//! - [`thinning`]: seam for the edge-thinning stages (non-maximum suppression,
//!   double threshold, hysteresis). Only a passthrough exists today.
//!
//! Each pass leaves a zero frame of its kernel's half-width, so the magnitude
//! map carries a two-cell dark border. The sharpening pass narrows according
//! to [`Narrowing`](crate::convolve::Narrowing); magnitude always clamps.

pub mod gradient;
pub mod thinning;

pub use gradient::{
    compute_gradient_magnitude, directional_gradients, magnitude_map, GradientField,
    GradientParams, DEFAULT_GRADIENT_THRESHOLD,
};
pub use thinning::{EdgeThinning, Passthrough};
