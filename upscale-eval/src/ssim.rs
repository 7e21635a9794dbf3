//! Windowed structural similarity (SSIM).
//!
//! For each channel the five local moments `E[x]`, `E[y]`, `E[x^2]`, `E[y^2]`
//! and `E[xy]` are taken with the separable Gaussian filter, combined per
//! pixel into
//!
//! ```text
//!            (2 mu_x mu_y + C1) (2 sigma_xy + C2)
//! SSIM = -----------------------------------------------
//!        (mu_x^2 + mu_y^2 + C1) (sigma_x^2 + sigma_y^2 + C2)
//! ```
//!
//! and averaged over all pixel positions. When both buffers are grayscale a
//! single channel is scored; otherwise R, G and B are scored separately and
//! the three results averaged.

use crate::blur::{blur_scratch, GaussianKernel};
use crate::consts::{CHANNELS, SSIM_C1, SSIM_C2};
use crate::image::{PixelBuffer, Plane};
use crate::{check_same_size, UpscaleError};

/// One channel's intensities with their blurred first and second moments.
#[derive(Debug, Clone)]
pub(crate) struct ChannelStats {
    plane: Plane,
    mean: Plane,
    mean_sq: Plane,
}

impl ChannelStats {
    pub(crate) fn new(plane: Plane, kernel: &GaussianKernel) -> Self {
        let (width, height) = (plane.width(), plane.height());
        let mut scratch = Plane::new(height, width);

        let mut mean = Plane::new(width, height);
        blur_scratch(&plane, kernel, &mut scratch, &mut mean);

        let mut mean_sq = Plane::new(width, height);
        blur_scratch(&plane.square(), kernel, &mut scratch, &mut mean_sq);

        Self {
            plane,
            mean,
            mean_sq,
        }
    }
}

/// Mean SSIM of one channel pair.
pub(crate) fn compare_channels(x: &ChannelStats, y: &ChannelStats, kernel: &GaussianKernel) -> f64 {
    debug_assert!(x.plane.same_size(&y.plane));
    let (width, height) = (x.plane.width(), x.plane.height());

    let mut scratch = Plane::new(height, width);
    let mut mean_xy = Plane::new(width, height);
    blur_scratch(&x.plane.mul(&y.plane), kernel, &mut scratch, &mut mean_xy);

    let moments = x
        .mean
        .data()
        .iter()
        .zip(y.mean.data())
        .zip(x.mean_sq.data().iter().zip(y.mean_sq.data()))
        .zip(mean_xy.data());

    let mut total = 0.0;
    for (((&mu_x, &mu_y), (&e_xx, &e_yy)), &e_xy) in moments {
        let var_x = e_xx - mu_x * mu_x;
        let var_y = e_yy - mu_y * mu_y;
        let cov = e_xy - mu_x * mu_y;

        let numerator = (2.0 * mu_x * mu_y + SSIM_C1) * (2.0 * cov + SSIM_C2);
        let denominator = (mu_x * mu_x + mu_y * mu_y + SSIM_C1) * (var_x + var_y + SSIM_C2);
        total += numerator / denominator;
    }

    total / (width * height) as f64
}

/// Number of channels to score for a buffer pair.
pub(crate) fn scored_channels(a_gray: bool, b_gray: bool) -> usize {
    if a_gray && b_gray {
        1
    } else {
        CHANNELS
    }
}

/// SSIM between two equally sized buffers with the standard 11-tap, sigma 1.5 window.
///
/// # Errors
/// Returns [`UpscaleError::DimensionMismatch`] if the buffers differ in size.
pub fn ssim(a: &PixelBuffer, b: &PixelBuffer) -> Result<f64, UpscaleError> {
    ssim_with_kernel(a, b, GaussianKernel::standard())
}

/// SSIM with a caller-supplied Gaussian window.
///
/// # Errors
/// Returns [`UpscaleError::DimensionMismatch`] if the buffers differ in size.
pub fn ssim_with_kernel(
    a: &PixelBuffer,
    b: &PixelBuffer,
    kernel: &GaussianKernel,
) -> Result<f64, UpscaleError> {
    check_same_size(a, b)?;

    let channels = scored_channels(a.is_grayscale(), b.is_grayscale());
    log::trace!(
        "ssim {}x{} over {} channel(s)",
        a.width(),
        a.height(),
        channels
    );

    let mut sum = 0.0;
    for c in 0..channels {
        let x = ChannelStats::new(a.channel_plane(c), kernel);
        let y = ChannelStats::new(b.channel_plane(c), kernel);
        sum += compare_channels(&x, &y, kernel);
    }
    Ok(sum / channels as f64)
}
