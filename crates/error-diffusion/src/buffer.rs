//! In-memory pixel buffer for the dithering pipeline.
//!
//! [`PixelBuffer`] owns one planar channel per color component, stored as
//! `i32` even though the samples are logically 8-bit. The widened type is
//! load-bearing: diffusion pushes accumulated values outside `[0, 255]`
//! before the owning pixel is quantized, and those intermediates must
//! survive unclamped.

use thiserror::Error;

/// Errors from pixel buffer construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    /// Width or height is zero. Rejected before anything is allocated.
    #[error("invalid buffer geometry: {width}x{height} (both dimensions must be non-zero)")]
    InvalidGeometry {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Sample slice length does not match `width * height * channels`.
    #[error("sample count mismatch: got {got}, expected {expected}")]
    SampleCountMismatch {
        /// Number of samples supplied.
        got: usize,
        /// Number of samples the geometry requires.
        expected: usize,
    },
}

/// Channel layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelMode {
    /// Single luminance channel.
    Grayscale,
    /// Red, green, and blue channels.
    Rgb,
}

impl PixelMode {
    /// Number of planes this mode carries.
    #[inline]
    pub fn channels(&self) -> usize {
        match self {
            PixelMode::Grayscale => 1,
            PixelMode::Rgb => 3,
        }
    }
}

/// Planar pixel storage with a widened working domain.
///
/// One `Vec<i32>` per channel, row-major, `width * height` samples each.
/// Values start as 8-bit samples but are free to leave `[0, 255]` while
/// diffusion error accumulates; export back to bytes clamps.
///
/// # Example
///
/// ```
/// use error_diffusion::{PixelBuffer, PixelMode};
///
/// let buffer = PixelBuffer::from_luma8(&[100, 200, 50, 150], 2, 2).unwrap();
/// assert_eq!(buffer.width(), 2);
/// assert_eq!(buffer.height(), 2);
/// assert_eq!(buffer.mode(), PixelMode::Grayscale);
/// assert_eq!(buffer.sample(1, 0, 0), 200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// One plane per channel, each `width * height` long.
    planes: Vec<Vec<i32>>,
    /// Width in pixels.
    width: usize,
    /// Height in pixels.
    height: usize,
    /// Channel layout.
    mode: PixelMode,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidGeometry`] if either dimension is zero.
    pub fn new(width: usize, height: usize, mode: PixelMode) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidGeometry { width, height });
        }
        let planes = (0..mode.channels())
            .map(|_| vec![0i32; width * height])
            .collect();
        Ok(Self {
            planes,
            width,
            height,
            mode,
        })
    }

    /// Build a grayscale buffer from 8-bit luminance samples in row-major
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidGeometry`] for zero dimensions and
    /// [`BufferError::SampleCountMismatch`] if `samples.len() != width * height`.
    pub fn from_luma8(samples: &[u8], width: usize, height: usize) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidGeometry { width, height });
        }
        let expected = width * height;
        if samples.len() != expected {
            return Err(BufferError::SampleCountMismatch {
                got: samples.len(),
                expected,
            });
        }
        let plane = samples.iter().map(|&s| s as i32).collect();
        Ok(Self {
            planes: vec![plane],
            width,
            height,
            mode: PixelMode::Grayscale,
        })
    }

    /// Build an RGB buffer from interleaved `[R, G, B, R, G, B, ...]`
    /// 8-bit samples in row-major order, de-interleaving into planes.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidGeometry`] for zero dimensions and
    /// [`BufferError::SampleCountMismatch`] if
    /// `samples.len() != width * height * 3`.
    pub fn from_rgb8(samples: &[u8], width: usize, height: usize) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidGeometry { width, height });
        }
        let pixels = width * height;
        let expected = pixels * 3;
        if samples.len() != expected {
            return Err(BufferError::SampleCountMismatch {
                got: samples.len(),
                expected,
            });
        }
        let mut planes = vec![Vec::with_capacity(pixels); 3];
        for rgb in samples.chunks_exact(3) {
            planes[0].push(rgb[0] as i32);
            planes[1].push(rgb[1] as i32);
            planes[2].push(rgb[2] as i32);
        }
        Ok(Self {
            planes,
            width,
            height,
            mode: PixelMode::Rgb,
        })
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the channel layout.
    #[inline]
    pub fn mode(&self) -> PixelMode {
        self.mode
    }

    /// Returns the number of channel planes.
    #[inline]
    pub fn channels(&self) -> usize {
        self.planes.len()
    }

    /// Returns one channel plane as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= self.channels()`.
    #[inline]
    pub fn plane(&self, channel: usize) -> &[i32] {
        &self.planes[channel]
    }

    /// Mutable access to all planes for the dithering scan.
    #[inline]
    pub(crate) fn planes_mut(&mut self) -> &mut [Vec<i32>] {
        &mut self.planes
    }

    /// Read one sample.
    ///
    /// # Panics
    ///
    /// Panics if `x`, `y`, or `channel` is out of range.
    #[inline]
    pub fn sample(&self, x: usize, y: usize, channel: usize) -> i32 {
        assert!(x < self.width && y < self.height, "coordinate out of range");
        self.planes[channel][y * self.width + x]
    }

    /// Export to interleaved 8-bit samples, clamping each value to
    /// `[0, 255]`. Grayscale yields one byte per pixel, RGB three.
    pub fn to_bytes(&self) -> Vec<u8> {
        let pixels = self.width * self.height;
        let mut bytes = Vec::with_capacity(pixels * self.planes.len());
        for i in 0..pixels {
            for plane in &self.planes {
                bytes.push(plane[i].clamp(0, 255) as u8);
            }
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_rejects_zero_width() {
        let err = PixelBuffer::new(0, 4, PixelMode::Grayscale).unwrap_err();
        assert_eq!(err, BufferError::InvalidGeometry { width: 0, height: 4 });
    }

    #[test]
    fn test_new_rejects_zero_height() {
        let err = PixelBuffer::new(4, 0, PixelMode::Rgb).unwrap_err();
        assert_eq!(err, BufferError::InvalidGeometry { width: 4, height: 0 });
    }

    #[test]
    fn test_new_allocates_per_mode() {
        let gray = PixelBuffer::new(3, 2, PixelMode::Grayscale).unwrap();
        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.plane(0).len(), 6);

        let rgb = PixelBuffer::new(3, 2, PixelMode::Rgb).unwrap();
        assert_eq!(rgb.channels(), 3);
        for c in 0..3 {
            assert_eq!(rgb.plane(c).len(), 6);
        }
    }

    #[test]
    fn test_from_luma8_row_major() {
        let buffer = PixelBuffer::from_luma8(&[10, 20, 30, 40, 50, 60], 3, 2).unwrap();
        assert_eq!(buffer.sample(0, 0, 0), 10);
        assert_eq!(buffer.sample(2, 0, 0), 30);
        assert_eq!(buffer.sample(0, 1, 0), 40);
        assert_eq!(buffer.sample(2, 1, 0), 60);
    }

    #[test]
    fn test_from_luma8_length_mismatch() {
        let err = PixelBuffer::from_luma8(&[1, 2, 3], 2, 2).unwrap_err();
        assert_eq!(
            err,
            BufferError::SampleCountMismatch {
                got: 3,
                expected: 4
            }
        );
    }

    #[test]
    fn test_from_rgb8_deinterleaves() {
        // Two pixels: (1, 2, 3) and (4, 5, 6)
        let buffer = PixelBuffer::from_rgb8(&[1, 2, 3, 4, 5, 6], 2, 1).unwrap();
        assert_eq!(buffer.plane(0), &[1, 4]);
        assert_eq!(buffer.plane(1), &[2, 5]);
        assert_eq!(buffer.plane(2), &[3, 6]);
    }

    #[test]
    fn test_from_rgb8_length_mismatch() {
        let err = PixelBuffer::from_rgb8(&[1, 2, 3, 4], 2, 1).unwrap_err();
        assert_eq!(
            err,
            BufferError::SampleCountMismatch {
                got: 4,
                expected: 6
            }
        );
    }

    #[test]
    fn test_to_bytes_round_trips_in_range_values() {
        let samples = [0u8, 128, 255, 42, 200, 7];
        let buffer = PixelBuffer::from_rgb8(&samples, 2, 1).unwrap();
        assert_eq!(buffer.to_bytes(), samples);
    }

    #[test]
    fn test_to_bytes_clamps_out_of_range() {
        let mut buffer = PixelBuffer::new(2, 1, PixelMode::Grayscale).unwrap();
        buffer.planes_mut()[0][0] = -40;
        buffer.planes_mut()[0][1] = 300;
        assert_eq!(buffer.to_bytes(), vec![0, 255]);
    }

    #[test]
    fn test_single_pixel_buffer() {
        let buffer = PixelBuffer::from_luma8(&[99], 1, 1).unwrap();
        assert_eq!(buffer.width(), 1);
        assert_eq!(buffer.height(), 1);
        assert_eq!(buffer.sample(0, 0, 0), 99);
    }
}
