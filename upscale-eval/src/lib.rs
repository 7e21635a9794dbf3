//! # upscale-eval
//!
//! Building blocks for comparing image upscaling methods: interpolation
//! kernels that resample an 8-bit RGB buffer to a new size, and fidelity
//! metrics that score the result against a reference.
//!
//! - Resampling uses inverse coordinate mapping (destination to source), so
//!   the same code path handles up- and down-scaling.
//! - Kernels: bilinear and Catmull-Rom bicubic (`a = -0.5`), both with
//!   clamp-to-edge boundary handling.
//! - Metrics: MSE/PSNR and windowed SSIM computed with an 11-tap separable
//!   Gaussian (sigma 1.5).
//!
//! ## Example
//!
//! ```rust
//! use upscale_eval::{compute_quality, resample, Kernel, PixelBuffer, RGB8};
//!
//! let reference = PixelBuffer::filled(16, 16, RGB8::new(100, 100, 100))?;
//! let low = resample(&reference, 8, 8, &Kernel::Bicubic)?;
//! let restored = resample(&low, 16, 16, &Kernel::Bilinear)?;
//!
//! let scores = compute_quality(&reference, &restored)?;
//! assert!(scores.psnr.is_infinite());
//! assert!((scores.ssim - 1.0).abs() < 1e-9);
//! # Ok::<(), upscale_eval::UpscaleError>(())
//! ```
//!
//! ## Features
//!
//! - **`parallel`** (default): resample destination rows on the rayon pool.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

pub mod blur;
pub mod consts;
pub mod image;
pub mod interpolate;
pub mod precompute;
pub mod psnr;
pub mod quality;
pub mod resample;
pub mod ssim;

pub use crate::blur::GaussianKernel;
pub use crate::image::{PixelBuffer, Plane};
pub use crate::interpolate::{Bicubic, Bilinear, Interpolator, Kernel};
pub use crate::precompute::QualityReference;
pub use crate::psnr::{mse, psnr};
pub use crate::quality::{
    compute_quality, compute_quality_with, MetricResult, QualityParams, QualityScores,
};
pub use crate::resample::{downscale_by, resample, scale_by};
pub use crate::ssim::{ssim, ssim_with_kernel};

// Re-export imgref and rgb types for convenience
pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb::RGB8;

/// Error type for resampling and metric operations.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum UpscaleError {
    /// A buffer or resample target has a zero dimension.
    InvalidDimensions {
        /// Width provided.
        width: usize,
        /// Height provided.
        height: usize,
    },
    /// Compared buffers have different sizes.
    DimensionMismatch {
        /// First buffer width.
        w1: usize,
        /// First buffer height.
        h1: usize,
        /// Second buffer width.
        w2: usize,
        /// Second buffer height.
        h2: usize,
    },
    /// Pixel data length doesn't match the declared dimensions.
    InvalidBufferSize {
        /// Expected number of elements.
        expected: usize,
        /// Actual number of elements.
        actual: usize,
    },
    /// Gaussian window size must be odd and sigma positive.
    InvalidKernel {
        /// Window size requested.
        size: usize,
        /// Sigma requested.
        sigma: f64,
    },
    /// Scale factor must be at least 1.
    InvalidScale {
        /// Factor requested.
        factor: usize,
    },
}

impl std::fmt::Display for UpscaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid dimensions: {width}x{height} (both must be > 0)")
            }
            Self::DimensionMismatch { w1, h1, w2, h2 } => {
                write!(f, "image dimensions don't match: {w1}x{h1} vs {w2}x{h2}")
            }
            Self::InvalidBufferSize { expected, actual } => {
                write!(
                    f,
                    "buffer size {actual} doesn't match expected size {expected}"
                )
            }
            Self::InvalidKernel { size, sigma } => {
                write!(
                    f,
                    "invalid gaussian kernel: size {size}, sigma {sigma} (size must be odd, sigma > 0)"
                )
            }
            Self::InvalidScale { factor } => {
                write!(
                    f,
                    "invalid scale factor: {factor} (must be >= 1 and keep the size representable)"
                )
            }
        }
    }
}

impl std::error::Error for UpscaleError {}

/// Fails with [`UpscaleError::DimensionMismatch`] unless both buffers have the same size.
pub(crate) fn check_same_size(a: &PixelBuffer, b: &PixelBuffer) -> Result<(), UpscaleError> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(UpscaleError::DimensionMismatch {
            w1: a.width(),
            h1: a.height(),
            w2: b.width(),
            h2: b.height(),
        });
    }
    Ok(())
}
