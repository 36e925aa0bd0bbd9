//! error-diffusion: Floyd-Steinberg error diffusion over pixel buffers
//!
//! This library quantizes 8-bit images to a reduced set of levels while
//! distributing the per-pixel quantization error to unprocessed neighbors,
//! the classic error diffusion technique.
//!
//! # Quick Start
//!
//! Build a [`PixelBuffer`] from raw samples, pick a [`Quantizer`], and run
//! a [`Disperser`] over it:
//!
//! ```
//! use error_diffusion::{Disperser, PixelBuffer, Quantizer};
//!
//! let mut buffer = PixelBuffer::from_luma8(&[100, 200, 50, 150], 2, 2).unwrap();
//! let disperser = Disperser::new(Quantizer::Threshold);
//! disperser.dither(&mut buffer).unwrap();
//!
//! // Every sample is now 0 or 255.
//! assert_eq!(buffer.plane(0), &[0, 255, 0, 255]);
//! ```
//!
//! # Working Domain
//!
//! Samples are logically 8-bit but stored as `i32` for the whole run.
//! Diffusion pushes accumulated values outside `[0, 255]`; only the owning
//! pixel's quantization brings them back into the level set, and only
//! [`PixelBuffer::to_bytes()`] clamps for export.
//!
//! # Channel Independence
//!
//! Channels never interact. An RGB buffer is three independent grayscale
//! problems, which is why [`Disperser::dither()`] runs the planes on
//! scoped threads without changing the result.

pub mod buffer;
pub mod dither;
pub mod kernel;
pub mod quantize;


pub use buffer::{BufferError, PixelBuffer, PixelMode};
pub use dither::{Disperser, DitherError};
pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use quantize::{Quantize, Quantizer, QuantizerError, Threshold, UniformLevels};
