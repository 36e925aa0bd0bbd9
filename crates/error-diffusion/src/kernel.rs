//! Error diffusion kernel definition.
//!
//! A kernel specifies how quantization error is distributed to neighboring
//! pixels. Only Floyd-Steinberg is shipped; the diffusion loop reads the
//! kernel table rather than hardcoding offsets, so the constant stays
//! swappable.

/// An error diffusion kernel.
///
/// The kernel defines how quantization error is distributed to neighboring
/// pixels that haven't been processed yet. Each entry specifies an offset
/// (dx, dy) and a weight for that neighbor.
///
/// # Error Propagation
///
/// The total error propagated is `sum(weights) / divisor`. Floyd-Steinberg
/// propagates 100% of error (sum equals divisor); the only loss comes from
/// integer rounding and from entries that fall outside the buffer.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    ///
    /// - `dx`: horizontal offset (positive = right)
    /// - `dy`: vertical offset (always positive = below current row)
    /// - `weight`: fraction of error to diffuse (as numerator, divisor is separate)
    pub entries: &'static [(i32, i32, u8)],

    /// Total divisor for normalizing weights.
    ///
    /// Each neighbor receives `error * weight / divisor`.
    pub divisor: u8,
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
/// The most widely known error diffusion algorithm.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};
