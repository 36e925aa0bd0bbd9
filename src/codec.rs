//! File decode/encode collaborators around the `image` crate.
//!
//! The core engine only sees [`PixelBuffer`]s; everything that touches the
//! filesystem or an image container format lives here. Decoding converts
//! whatever the `image` crate can open into 8-bit Luma or Rgb samples,
//! encoding clamps the processed planes back to bytes and lets the `image`
//! crate pick the container from the output extension.

use std::path::{Path, PathBuf};

use error_diffusion::{BufferError, PixelBuffer, PixelMode};
use thiserror::Error;
use tracing::debug;

/// Errors from image file decode/encode.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input file could not be opened or decoded.
    #[error("failed to read image {path}: {source}")]
    Read {
        /// Input path as given on the command line.
        path: PathBuf,
        /// Underlying decoder error.
        source: image::ImageError,
    },

    /// The output file could not be encoded or written.
    #[error("failed to write image {path}: {source}")]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying encoder error.
        source: image::ImageError,
    },

    /// The decoded image produced an invalid pixel buffer.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Decode an image file into a [`PixelBuffer`] in the requested mode.
///
/// Any format the `image` crate is built with can be opened; the decoded
/// pixels are converted to 8-bit Luma or Rgb as selected. Zero-dimension
/// inputs are rejected by the buffer constructor.
///
/// # Errors
///
/// Returns [`CodecError::Read`] for open/decode failures and
/// [`CodecError::Buffer`] for invalid geometry.
pub fn decode(path: &Path, mode: PixelMode) -> Result<PixelBuffer, CodecError> {
    let img = image::open(path).map_err(|source| CodecError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?mode, "decoded image");

    let buffer = match mode {
        PixelMode::Grayscale => {
            let luma = img.to_luma8();
            let (width, height) = luma.dimensions();
            PixelBuffer::from_luma8(luma.as_raw(), width as usize, height as usize)?
        }
        PixelMode::Rgb => {
            let rgb = img.to_rgb8();
            let (width, height) = rgb.dimensions();
            PixelBuffer::from_rgb8(rgb.as_raw(), width as usize, height as usize)?
        }
    };
    Ok(buffer)
}

/// Encode a [`PixelBuffer`] to an image file.
///
/// The planes are clamped to bytes and handed to the `image` crate, which
/// selects the container format from the output extension (use `.png` for
/// lossless results).
///
/// # Errors
///
/// Returns [`CodecError::Write`] for encode/write failures.
pub fn encode(buffer: &PixelBuffer, path: &Path) -> Result<(), CodecError> {
    let bytes = buffer.to_bytes();
    let color = match buffer.mode() {
        PixelMode::Grayscale => image::ExtendedColorType::L8,
        PixelMode::Rgb => image::ExtendedColorType::Rgb8,
    };
    image::save_buffer(
        path,
        &bytes,
        buffer.width() as u32,
        buffer.height() as u32,
        color,
    )
    .map_err(|source| CodecError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "encoded image");
    Ok(())
}

/// Derive the default output path for an input file:
/// `<input-stem>-dithered.png` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}-dithered.png"))
}
