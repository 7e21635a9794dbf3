//! Pixel-difference error: MSE and PSNR.

use crate::consts::{CHANNELS, PEAK_VALUE};
use crate::image::PixelBuffer;
use crate::{check_same_size, UpscaleError};

/// Mean squared error over every channel of every pixel.
///
/// `MSE = (1/N) * sum((a_c - b_c)^2)` with `N = width * height * 3`.
///
/// # Errors
/// Returns [`UpscaleError::DimensionMismatch`] if the buffers differ in size.
pub fn mse(a: &PixelBuffer, b: &PixelBuffer) -> Result<f64, UpscaleError> {
    check_same_size(a, b)?;

    let sum: u64 = a
        .pixels()
        .iter()
        .zip(b.pixels())
        .map(|(p, q)| {
            let dr = i64::from(p.r) - i64::from(q.r);
            let dg = i64::from(p.g) - i64::from(q.g);
            let db = i64::from(p.b) - i64::from(q.b);
            (dr * dr + dg * dg + db * db) as u64
        })
        .sum();

    let n = a.pixels().len() * CHANNELS;
    Ok(sum as f64 / n as f64)
}

/// Peak signal-to-noise ratio in dB, `10 * log10(255^2 / MSE)`.
///
/// Identical buffers have zero error and return `f64::INFINITY`; that is a
/// defined result, not an error.
///
/// # Errors
/// Returns [`UpscaleError::DimensionMismatch`] if the buffers differ in size.
pub fn psnr(a: &PixelBuffer, b: &PixelBuffer) -> Result<f64, UpscaleError> {
    let mse = mse(a, b)?;
    Ok(psnr_from_mse(mse))
}

/// Converts an MSE value to PSNR.
#[must_use]
pub fn psnr_from_mse(mse: f64) -> f64 {
    if mse == 0.0 {
        return f64::INFINITY;
    }
    10.0 * (PEAK_VALUE * PEAK_VALUE / mse).log10()
}
