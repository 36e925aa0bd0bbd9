//! Quantization policies.
//!
//! A policy maps an accumulated working value to one of a fixed set of
//! output levels. Policies are pure and total: any `i32` input produces a
//! valid level, including values far outside `[0, 255]` that diffusion
//! legitimately creates.

use thiserror::Error;

/// Errors from quantizer construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuantizerError {
    /// Level count outside the supported `[2, 256]` range.
    #[error("invalid level count {0}: must be between 2 and 256")]
    InvalidLevelCount(u16),
}

/// A scalar quantization policy.
///
/// Implementations must be total over `i32` and must always return one of
/// the policy's output levels. They never panic; out-of-domain inputs map
/// to the nearest end of the level set.
pub trait Quantize {
    /// Map a working value to its output level.
    fn quantize(&self, value: i32) -> i32;
}

/// Binary threshold at the midpoint of the 8-bit range.
///
/// Values at or above 128 map to 255, everything below to 0. This is the
/// classic black-and-white dither target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Threshold;

impl Quantize for Threshold {
    #[inline]
    fn quantize(&self, value: i32) -> i32 {
        if value >= 128 {
            255
        } else {
            0
        }
    }
}

/// N equal bins over `[0, 255]`.
///
/// Constructed from a level count N in `[2, 256]`; the bin width is
/// `256 / N` and the representative level of a bin is its lower edge, so
/// the level set is `{0, step, 2*step, ..., step * (N - 1)}`. Inputs above
/// the top bin clamp to the top level, inputs below zero clamp to 0.
#[derive(Debug, Clone, Copy)]
pub struct UniformLevels {
    /// Bin width, `256 / levels`.
    step: i32,
    /// Highest representative level, `step * (levels - 1)`.
    top: i32,
}

impl UniformLevels {
    /// Create a uniform quantizer with `levels` output levels.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizerError::InvalidLevelCount`] if `levels` is outside
    /// `[2, 256]`.
    pub fn new(levels: u16) -> Result<Self, QuantizerError> {
        if !(2..=256).contains(&levels) {
            return Err(QuantizerError::InvalidLevelCount(levels));
        }
        let step = 256 / levels as i32;
        Ok(Self {
            step,
            top: step * (levels as i32 - 1),
        })
    }

    /// Bin width of this quantizer.
    #[inline]
    pub fn step(&self) -> i32 {
        self.step
    }
}

impl Quantize for UniformLevels {
    #[inline]
    fn quantize(&self, value: i32) -> i32 {
        if value <= 0 {
            return 0;
        }
        (self.step * (value / self.step)).min(self.top)
    }
}

/// The set of quantization policies the pipeline can be configured with.
///
/// Dispatches to the concrete [`Quantize`] implementations. Keeping the
/// set closed lets callers pass policies by value without trait objects.
#[derive(Debug, Clone, Copy)]
pub enum Quantizer {
    /// Binary midpoint threshold, levels `{0, 255}`.
    Threshold,
    /// N equal bins, levels `{0, step, ..., step * (N - 1)}`.
    Uniform(UniformLevels),
}

impl Quantizer {
    /// Convenience constructor for [`Quantizer::Uniform`].
    ///
    /// # Errors
    ///
    /// Returns [`QuantizerError::InvalidLevelCount`] if `levels` is outside
    /// `[2, 256]`.
    pub fn uniform(levels: u16) -> Result<Self, QuantizerError> {
        Ok(Quantizer::Uniform(UniformLevels::new(levels)?))
    }
}

impl Quantize for Quantizer {
    #[inline]
    fn quantize(&self, value: i32) -> i32 {
        match self {
            Quantizer::Threshold => Threshold.quantize(value),
            Quantizer::Uniform(uniform) => uniform.quantize(value),
        }
    }
}
