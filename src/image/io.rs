//! File adapters around the numeric core.
//!
//! - `load_color_image`: decode PNG/JPEG/etc. from disk.
//! - `export_image`: write a grayscale raster as PNG or JPEG (quality 100).
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::{PipelineError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, GrayImage};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const JPEG_QUALITY: u8 = 100;

/// Encoders accepted for the output file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Map a file extension (`png`, `jpg`, `jpeg`, any case) to an encoder.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(PipelineError::UnsupportedExtension(ext.to_string())),
        }
    }
}

/// Output location split into directory, base name and extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputTarget {
    pub dir: PathBuf,
    pub file_stem: String,
    pub extension: String,
    pub format: OutputFormat,
}

impl OutputTarget {
    /// Validate an output path. Fails on a missing or unsupported extension,
    /// which lets callers abort before decoding anything.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_string();
        let format = OutputFormat::from_extension(&extension)?;
        let file_stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                PipelineError::Config(format!("output path {} has no file name", path.display()))
            })?
            .to_string();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self {
            dir,
            file_stem,
            extension,
            format,
        })
    }

    pub fn path(&self) -> PathBuf {
        self.dir
            .join(format!("{}.{}", self.file_stem, self.extension))
    }
}

/// Decode an image file. A missing file is reported as a decode error.
pub fn load_color_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| PipelineError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `img` to `dest/<file_stem>.<extension>`, creating `dest` if needed.
pub fn export_image(
    img: &GrayImage,
    dest: &Path,
    file_stem: &str,
    extension: &str,
) -> Result<PathBuf> {
    let format = OutputFormat::from_extension(extension)?;
    let path = dest.join(format!("{file_stem}.{extension}"));
    ensure_dir(dest)?;

    let io_err = |source| PipelineError::Io {
        path: path.clone(),
        source,
    };
    let file = File::create(&path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    let encoded = match format {
        OutputFormat::Png => img.write_with_encoder(PngEncoder::new(&mut writer)),
        OutputFormat::Jpeg => {
            img.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY))
        }
    };
    encoded.map_err(|source| PipelineError::Encode {
        path: path.clone(),
        source,
    })?;
    writer.flush().map_err(io_err)?;
    Ok(path)
}

/// Export to a pre-validated target.
pub fn export_to_target(img: &GrayImage, target: &OutputTarget) -> Result<PathBuf> {
    export_image(img, &target.dir, &target.file_stem, &target.extension)
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        PipelineError::Config(format!("failed to serialize JSON for {}: {e}", path.display()))
    })?;
    fs::write(path, json).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| PipelineError::Io {
        path: dir.to_path_buf(),
        source,
    })
}
