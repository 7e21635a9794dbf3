//! Numeric constants for the metrics and interpolation kernels.

// ============================================================================
// Pixel Range
// ============================================================================

/// Peak value of an 8-bit channel.
pub const PEAK_VALUE: f64 = 255.0;

/// Number of color channels in a [`PixelBuffer`](crate::PixelBuffer).
pub const CHANNELS: usize = 3;

// ============================================================================
// SSIM Constants
// ============================================================================

/// Luminance stabilizer, `(0.01 * 255)^2`.
pub const SSIM_C1: f64 = 6.5025;

/// Contrast stabilizer, `(0.03 * 255)^2`.
pub const SSIM_C2: f64 = 58.5225;

/// Default Gaussian window length for SSIM.
pub const SSIM_WINDOW_SIZE: usize = 11;

/// Default Gaussian standard deviation for SSIM.
pub const SSIM_SIGMA: f64 = 1.5;

// ============================================================================
// Interpolation Constants
// ============================================================================

/// Free parameter of the Catmull-Rom cubic kernel.
pub const CATMULL_ROM_A: f64 = -0.5;
