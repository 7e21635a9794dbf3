//! Precomputed reference data for fast repeated quality comparisons.
//!
//! A benchmark run scores every upscaling method against the same original.
//! The reference-side SSIM moments (`E[x]` and `E[x^2]` per channel) only
//! depend on the original, so they are computed once here and reused for
//! each candidate, saving two of the five blur passes per channel.
//!
//! # Example
//!
//! ```
//! use upscale_eval::{resample, Kernel, PixelBuffer, QualityParams, QualityReference, RGB8};
//!
//! let original = PixelBuffer::filled(32, 32, RGB8::new(90, 120, 30))?;
//! let low = resample(&original, 16, 16, &Kernel::Bicubic)?;
//!
//! let reference = QualityReference::new(&original, &QualityParams::default())?;
//! for kernel in Kernel::ALL {
//!     let candidate = resample(&low, 32, 32, &kernel)?;
//!     let scores = reference.compare(&candidate)?;
//!     println!("{kernel}: PSNR {:.2} dB, SSIM {:.4}", scores.psnr, scores.ssim);
//! }
//! # Ok::<(), upscale_eval::UpscaleError>(())
//! ```

use std::borrow::Cow;

use crate::blur::GaussianKernel;
use crate::consts::CHANNELS;
use crate::image::PixelBuffer;
use crate::psnr::psnr;
use crate::quality::{QualityParams, QualityScores};
use crate::ssim::{compare_channels, scored_channels, ChannelStats};
use crate::{check_same_size, UpscaleError};

/// Precomputed reference statistics for scoring many candidates.
///
/// Scores from [`compare`](Self::compare) are identical to
/// [`compute_quality_with`](crate::compute_quality_with) with the same
/// parameters.
#[derive(Debug, Clone)]
pub struct QualityReference {
    reference: PixelBuffer,
    kernel: Cow<'static, GaussianKernel>,
    /// Per-channel stats, always R, G, B
    channels: Vec<ChannelStats>,
}

impl QualityReference {
    /// Precompute reference data.
    ///
    /// # Errors
    /// Returns [`UpscaleError::InvalidKernel`] if `params` is invalid.
    pub fn new(reference: &PixelBuffer, params: &QualityParams) -> Result<Self, UpscaleError> {
        let kernel = params.validate()?;

        log::debug!(
            "precomputing reference {}x{} (grayscale: {})",
            reference.width(),
            reference.height(),
            reference.is_grayscale()
        );

        let channels = if reference.is_grayscale() {
            // All three channels carry the same plane
            let stats = ChannelStats::new(reference.channel_plane(0), &kernel);
            vec![stats; CHANNELS]
        } else {
            (0..CHANNELS)
                .map(|c| ChannelStats::new(reference.channel_plane(c), &kernel))
                .collect()
        };

        Ok(Self {
            reference: reference.clone(),
            kernel,
            channels,
        })
    }

    /// Reference width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.reference.width()
    }

    /// Reference height.
    #[must_use]
    pub fn height(&self) -> usize {
        self.reference.height()
    }

    /// Scores a candidate against the precomputed reference.
    ///
    /// # Errors
    /// Returns [`UpscaleError::DimensionMismatch`] if the candidate size differs.
    pub fn compare(&self, candidate: &PixelBuffer) -> Result<QualityScores, UpscaleError> {
        check_same_size(&self.reference, candidate)?;

        let channels = scored_channels(self.reference.is_grayscale(), candidate.is_grayscale());
        let mut sum = 0.0;
        for (c, reference) in self.channels.iter().take(channels).enumerate() {
            let stats = ChannelStats::new(candidate.channel_plane(c), &self.kernel);
            sum += compare_channels(reference, &stats, &self.kernel);
        }

        Ok(QualityScores {
            psnr: psnr(&self.reference, candidate)?,
            ssim: sum / channels as f64,
        })
    }
}
