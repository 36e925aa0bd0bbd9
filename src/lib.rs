//! Disperse - Floyd-Steinberg dithering for the command line
//!
//! Decodes an image file, runs error diffusion over it, and encodes the
//! result. This library exposes the codec module for integration testing.

pub mod codec;
