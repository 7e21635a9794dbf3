//! Combined quality scoring: the `ComputeQuality` entry point.

use std::borrow::Cow;
use std::time::Duration;

use crate::blur::GaussianKernel;
use crate::consts::{SSIM_SIGMA, SSIM_WINDOW_SIZE};
use crate::image::PixelBuffer;
use crate::psnr::psnr;
use crate::ssim::ssim_with_kernel;
use crate::{check_same_size, UpscaleError};

/// Quality scoring parameters.
///
/// Use the builder pattern to construct:
/// ```rust
/// use upscale_eval::QualityParams;
///
/// let params = QualityParams::new()
///     .with_window_size(7)  // narrower SSIM window
///     .with_sigma(1.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QualityParams {
    window_size: usize,
    sigma: f64,
}

impl Default for QualityParams {
    fn default() -> Self {
        Self {
            window_size: SSIM_WINDOW_SIZE,
            sigma: SSIM_SIGMA,
        }
    }
}

impl QualityParams {
    /// Creates a new `QualityParams` with default values (11 taps, sigma 1.5).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the SSIM Gaussian window length (must be odd).
    #[must_use]
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Sets the SSIM Gaussian standard deviation.
    #[must_use]
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Returns the SSIM window length.
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns the SSIM Gaussian standard deviation.
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Checks the parameters, returning the Gaussian window they describe.
    ///
    /// The default window borrows the shared standard kernel.
    ///
    /// # Errors
    /// Returns [`UpscaleError::InvalidKernel`] for an even window or a
    /// non-positive sigma.
    pub fn validate(&self) -> Result<Cow<'static, GaussianKernel>, UpscaleError> {
        if self.window_size == SSIM_WINDOW_SIZE && self.sigma == SSIM_SIGMA {
            return Ok(Cow::Borrowed(GaussianKernel::standard()));
        }
        GaussianKernel::new(self.window_size, self.sigma).map(Cow::Owned)
    }
}

/// PSNR and SSIM of a candidate against a reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityScores {
    /// Peak signal-to-noise ratio in dB; infinite for identical buffers.
    pub psnr: f64,
    /// Mean structural similarity in `[-1, 1]`.
    pub ssim: f64,
}

/// Scores `candidate` against `reference` with default parameters.
///
/// # Errors
/// Returns [`UpscaleError::DimensionMismatch`] if the buffers differ in size.
///
/// # Example
/// ```rust
/// use upscale_eval::{compute_quality, PixelBuffer, RGB8};
///
/// let a = PixelBuffer::filled(8, 8, RGB8::new(100, 100, 100))?;
/// let b = PixelBuffer::filled(8, 8, RGB8::new(104, 100, 100))?;
/// let scores = compute_quality(&a, &b)?;
/// println!("PSNR {:.2} dB, SSIM {:.4}", scores.psnr, scores.ssim);
/// # Ok::<(), upscale_eval::UpscaleError>(())
/// ```
pub fn compute_quality(
    reference: &PixelBuffer,
    candidate: &PixelBuffer,
) -> Result<QualityScores, UpscaleError> {
    compute_quality_with(reference, candidate, &QualityParams::default())
}

/// Scores `candidate` against `reference` with explicit parameters.
///
/// # Errors
/// Returns [`UpscaleError::DimensionMismatch`] if the buffers differ in size,
/// or [`UpscaleError::InvalidKernel`] if `params` is invalid.
pub fn compute_quality_with(
    reference: &PixelBuffer,
    candidate: &PixelBuffer,
    params: &QualityParams,
) -> Result<QualityScores, UpscaleError> {
    // Reject everything before doing any work
    check_same_size(reference, candidate)?;
    let kernel = params.validate()?;

    log::debug!(
        "compute_quality {}x{} (window {}, sigma {})",
        reference.width(),
        reference.height(),
        kernel.len(),
        kernel.sigma()
    );

    Ok(QualityScores {
        psnr: psnr(reference, candidate)?,
        ssim: ssim_with_kernel(reference, candidate, &kernel)?,
    })
}

/// One row of a benchmark report.
///
/// Labels are whatever the caller assigns; the scores come from
/// [`compute_quality`] and `time` is the resample duration.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricResult {
    /// Source image name.
    pub filename: String,
    /// Upscaling method label.
    pub method: String,
    /// Integer scale factor.
    pub scale: usize,
    /// Peak signal-to-noise ratio in dB.
    pub psnr: f64,
    /// Mean structural similarity.
    pub ssim: f64,
    /// Time spent upscaling.
    pub time: Duration,
}

impl MetricResult {
    /// Labels `scores` with the image, method and scale they came from.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        method: impl Into<String>,
        scale: usize,
        scores: QualityScores,
        time: Duration,
    ) -> Self {
        Self {
            filename: filename.into(),
            method: method.into(),
            scale,
            psnr: scores.psnr,
            ssim: scores.ssim,
            time,
        }
    }

    /// The scores without labels.
    #[must_use]
    pub fn scores(&self) -> QualityScores {
        QualityScores {
            psnr: self.psnr,
            ssim: self.ssim,
        }
    }
}
