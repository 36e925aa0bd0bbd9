//! Error diffusion scan.
//!
//! [`Disperser`] runs one Floyd-Steinberg raster scan over a
//! [`PixelBuffer`], channel by channel. Each channel is fully independent:
//! error diffused in the red plane never reaches green or blue, so RGB
//! planes can be processed on separate threads with output identical to a
//! sequential run.
//!
//! # Scan Contract
//!
//! Rows are visited top to bottom, pixels left to right within a row. At
//! each pixel the accumulated working value is quantized, the quantized
//! level becomes the pixel's final value, and the signed residual is
//! distributed to the kernel's unvisited neighbors. Neighbors outside the
//! buffer are skipped; their share of the error is lost, not renormalized.
//! Accumulated values are never clamped between visits.

use std::thread;

use thiserror::Error;
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::kernel::{Kernel, FLOYD_STEINBERG};
use crate::quantize::{Quantize, Quantizer};

/// Errors from a dithering run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DitherError {
    /// Number of configured policies does not match the buffer's channels.
    /// Raised before any pixel is touched.
    #[error("policy count mismatch: {policies} policies for {channels} channels")]
    ChannelMismatch {
        /// Number of configured quantization policies.
        policies: usize,
        /// Number of channels in the buffer.
        channels: usize,
    },
}

/// Per-channel policy configuration.
#[derive(Debug, Clone)]
enum Policies {
    /// One policy replicated across however many channels the buffer has.
    Replicated(Quantizer),
    /// An explicit policy per channel, fixed arity.
    PerChannel(Vec<Quantizer>),
}

/// Floyd-Steinberg error diffusion over a [`PixelBuffer`].
///
/// A `Disperser` holds quantization policies and a kernel; it borrows the
/// buffer only for the duration of one [`dither()`](Disperser::dither)
/// call and mutates it in place.
///
/// # Example
///
/// ```
/// use error_diffusion::{Disperser, PixelBuffer, Quantizer};
///
/// let mut buffer = PixelBuffer::from_luma8(&[100, 200, 50, 150], 2, 2).unwrap();
/// Disperser::new(Quantizer::Threshold).dither(&mut buffer).unwrap();
///
/// assert_eq!(buffer.plane(0), &[0, 255, 0, 255]);
/// ```
#[derive(Debug, Clone)]
pub struct Disperser {
    policies: Policies,
    kernel: Kernel,
}

impl Disperser {
    /// Create a disperser that applies one policy to every channel,
    /// whatever the buffer's channel count turns out to be.
    pub fn new(policy: Quantizer) -> Self {
        Self {
            policies: Policies::Replicated(policy),
            kernel: FLOYD_STEINBERG,
        }
    }

    /// Create a disperser with an explicit policy per channel.
    ///
    /// The arity is fixed: a later [`dither()`](Disperser::dither) call
    /// fails with [`DitherError::ChannelMismatch`] if the buffer's channel
    /// count differs from `policies.len()`.
    pub fn per_channel(policies: Vec<Quantizer>) -> Self {
        Self {
            policies: Policies::PerChannel(policies),
            kernel: FLOYD_STEINBERG,
        }
    }

    /// Run one full dithering scan over the buffer, in place.
    ///
    /// After a successful return every sample in the buffer is one of its
    /// channel policy's output levels. RGB buffers process their planes on
    /// scoped threads, one per channel; the result is bit-identical to a
    /// sequential scan because the planes share no state.
    ///
    /// # Errors
    ///
    /// Returns [`DitherError::ChannelMismatch`] if this disperser was built
    /// with [`per_channel()`](Disperser::per_channel) and the arity does
    /// not match the buffer. The buffer is untouched in that case.
    pub fn dither(&self, buffer: &mut PixelBuffer) -> Result<(), DitherError> {
        let channels = buffer.channels();
        let policies: Vec<Quantizer> = match &self.policies {
            Policies::Replicated(policy) => vec![*policy; channels],
            Policies::PerChannel(list) => {
                if list.len() != channels {
                    return Err(DitherError::ChannelMismatch {
                        policies: list.len(),
                        channels,
                    });
                }
                list.clone()
            }
        };

        let width = buffer.width();
        let height = buffer.height();
        debug!(width, height, channels, "dithering buffer");

        let planes = buffer.planes_mut();
        if channels == 1 {
            dither_plane(&mut planes[0], width, height, &policies[0], &self.kernel);
        } else {
            let kernel = self.kernel;
            thread::scope(|scope| {
                for (plane, policy) in planes.iter_mut().zip(&policies) {
                    scope.spawn(move || {
                        dither_plane(plane, width, height, policy, &kernel);
                    });
                }
            });
        }
        Ok(())
    }
}

/// Scan one channel plane, quantizing each pixel and diffusing the residual.
fn dither_plane(plane: &mut [i32], width: usize, height: usize, policy: &Quantizer, kernel: &Kernel) {
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let value = plane[idx];
            let quantized = policy.quantize(value);
            plane[idx] = quantized;

            let error = value - quantized;
            if error == 0 {
                continue;
            }
            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i32 + dx;
                if nx >= 0 && (nx as usize) < width {
                    let ny = y + dy as usize;
                    if ny < height {
                        plane[ny * width + nx as usize] +=
                            diffuse_share(error, weight, kernel.divisor);
                    }
                }
            }
        }
    }
}

/// Integer `error * weight / divisor` with round-half-away-from-zero.
///
/// Keeps the scan fully deterministic: the same rounding rule applies to
/// every neighbor regardless of sign.
#[inline]
fn diffuse_share(error: i32, weight: u8, divisor: u8) -> i32 {
    let n = error * weight as i32;
    let d = divisor as i32;
    if n >= 0 {
        (n + d / 2) / d
    } else {
        -((-n + d / 2) / d)
    }
}
