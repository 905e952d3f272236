//! Error taxonomy shared by the numeric core and the I/O adapters.
//!
//! Every failure is fatal for a run: nothing is retried or logged-and-continued.
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised anywhere between decoding the input and writing the output.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Even or too small kernel size, non-positive or non-finite sigma.
    #[error("invalid kernel parameter: {0}")]
    InvalidKernelParameter(String),
    #[error("invalid gradient threshold {0}: expected a finite, non-negative value")]
    InvalidThreshold(f64),
    #[error("image has empty dimensions ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    /// Internal invariant violation while reducing an image to grayscale.
    #[error("grayscale conversion failed: {0}")]
    ColorModel(String),
    #[error("output file extension '{0}' not allowed, use one of [\"png\", \"jpg\", \"jpeg\"]")]
    UnsupportedExtension(String),
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
