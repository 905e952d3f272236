//! Conversions between decoded raster images and [`IntensityTensor`].
//!
//! Cells are addressed as `tensor[row][col]` with `row == y` and `col == x` in
//! both directions, so an untouched tensor round-trips pixel-for-pixel.
use super::plane::IntensityTensor;
use crate::error::{PipelineError, Result};
use image::{DynamicImage, GrayImage, Luma};
use log::debug;

/// Reduce a decoded image to one luminance byte per pixel.
///
/// Luminance comes from the `image` crate's gray conversion (Rec. 709 luma
/// weights, alpha ignored), which is a fixed function of the RGBA samples.
pub fn from_color_image(image: &DynamicImage) -> Result<IntensityTensor> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(PipelineError::EmptyImage { width, height });
    }

    let gray = image.to_luma8();
    if gray.dimensions() != (width, height) {
        return Err(PipelineError::ColorModel(format!(
            "gray buffer is {}x{}, source is {width}x{height}",
            gray.width(),
            gray.height()
        )));
    }
    let (w, h) = (width as usize, height as usize);
    let tensor = IntensityTensor::from_raw(h, w, gray.into_raw()).ok_or_else(|| {
        PipelineError::ColorModel("gray buffer is not one byte per pixel".to_string())
    })?;
    debug!("from_color_image {}x{} -> tensor", w, h);
    Ok(tensor)
}

/// Expand a tensor back into a grayscale raster, one pixel per cell.
pub fn to_color_image(tensor: &IntensityTensor) -> GrayImage {
    GrayImage::from_fn(tensor.w as u32, tensor.h as u32, |x, y| {
        Luma([tensor[y as usize][x as usize]])
    })
}
