//! Separable Gaussian convolution.
//!
//! SSIM needs five local moments over the whole image, each a full 2D
//! Gaussian filter. The filter is applied as two 1D passes, which costs
//! `O(2K)` per pixel instead of `O(K^2)`.
//!
//! Boundary handling is clamp-to-edge: out-of-range taps read the nearest
//! edge pixel. Weights are never re-normalized at the border.
//!
//! Optimizations:
//! - Transpose during the horizontal pass so the vertical pass is also a
//!   cache-friendly row scan
//! - Separate fast path for interior pixels (no bounds checking)
//! - Explicit f64x4 SIMD on the interior
//!
//! [`blur_clamped`] runs every pixel through the clamped path and serves as
//! the reference the fast path must agree with.

use std::sync::LazyLock;

use wide::f64x4;

use crate::consts::{SSIM_SIGMA, SSIM_WINDOW_SIZE};
use crate::image::Plane;
use crate::UpscaleError;

/// Normalized, symmetric 1D Gaussian weights of odd length.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    weights: Vec<f64>,
    sigma: f64,
}

static STANDARD_KERNEL: LazyLock<GaussianKernel> =
    LazyLock::new(|| GaussianKernel::build(SSIM_WINDOW_SIZE, SSIM_SIGMA));

impl GaussianKernel {
    /// Builds a kernel of `size` taps with standard deviation `sigma`.
    ///
    /// # Errors
    /// Returns [`UpscaleError::InvalidKernel`] unless `size` is odd and
    /// `sigma` is finite and positive with a representable `2 * sigma^2`.
    pub fn new(size: usize, sigma: f64) -> Result<Self, UpscaleError> {
        // 2σ² must not underflow, or the exponent scale becomes -inf
        if size % 2 == 0
            || !sigma.is_finite()
            || sigma <= 0.0
            || 2.0 * sigma * sigma < f64::MIN_POSITIVE
        {
            return Err(UpscaleError::InvalidKernel { size, sigma });
        }
        Ok(Self::build(size, sigma))
    }

    /// The shared 11-tap, sigma 1.5 kernel used by SSIM.
    #[must_use]
    pub fn standard() -> &'static GaussianKernel {
        &STANDARD_KERNEL
    }

    fn build(size: usize, sigma: f64) -> Self {
        let center = (size / 2) as f64;
        let scaler = -1.0 / (2.0 * sigma * sigma);
        let mut weights: Vec<f64> = (0..size)
            .map(|i| {
                let d = i as f64 - center;
                (scaler * d * d).exp()
            })
            .collect();

        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Self { weights, sigma }
    }

    /// Kernel weights, center at `len() / 2`.
    #[inline]
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of taps.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false; kernels have at least one tap.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Taps on each side of the center.
    #[inline]
    #[must_use]
    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    /// Standard deviation the kernel was built with.
    #[inline]
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

/// Clamped convolution of one row at position `x`.
#[inline]
fn convolve_clamped_at(row: &[f64], kernel: &[f64], x: usize) -> f64 {
    let half = kernel.len() / 2;
    let last = row.len() - 1;
    let mut sum = 0.0;
    for (j, &k) in kernel.iter().enumerate() {
        let sx = (x + j).saturating_sub(half).min(last);
        sum += row[sx] * k;
    }
    sum
}

/// SIMD interior convolution of one row with transposed write.
///
/// Processes 4 x-positions at a time. Every tap in `lo..hi` is in range, so
/// no clamping is needed; accumulation order matches [`convolve_clamped_at`].
fn convolve_interior_row(
    row: &[f64],
    kernel: &[f64],
    lo: usize,
    hi: usize,
    y: usize,
    output: &mut Plane,
) {
    let half = kernel.len() / 2;
    let mut x = lo;

    while x + 4 <= hi {
        let d = x - half;
        let mut sum = f64x4::splat(0.0);
        for (j, &k) in kernel.iter().enumerate() {
            let s = &row[d + j..d + j + 4];
            sum += f64x4::from([s[0], s[1], s[2], s[3]]) * f64x4::splat(k);
        }
        for (i, v) in sum.to_array().into_iter().enumerate() {
            output.set(y, x + i, v);
        }
        x += 4;
    }

    // Scalar tail
    for x in x..hi {
        let d = x - half;
        let mut sum = 0.0;
        for (j, &k) in kernel.iter().enumerate() {
            sum += row[d + j] * k;
        }
        output.set(y, x, sum);
    }
}

/// Horizontal convolution with transpose (output is `height x width`).
fn convolve_horizontal_transpose_to(input: &Plane, kernel: &[f64], output: &mut Plane) {
    let width = input.width();
    let half = kernel.len() / 2;
    debug_assert_eq!(output.width(), input.height());
    debug_assert_eq!(output.height(), width);

    // Interior needs a full window on both sides
    let (lo, hi) = if width > 2 * half {
        (half, width - half)
    } else {
        (width, width)
    };

    for y in 0..input.height() {
        let row = input.row(y);
        for x in 0..lo {
            output.set(y, x, convolve_clamped_at(row, kernel, x));
        }
        convolve_interior_row(row, kernel, lo, hi, y, output);
        for x in hi..width {
            output.set(y, x, convolve_clamped_at(row, kernel, x));
        }
    }
}

/// Uniformly clamped horizontal pass with transpose.
fn convolve_clamped_transpose_to(input: &Plane, kernel: &[f64], output: &mut Plane) {
    for y in 0..input.height() {
        let row = input.row(y);
        for x in 0..input.width() {
            output.set(y, x, convolve_clamped_at(row, kernel, x));
        }
    }
}

/// Applies the 2D Gaussian filter to a plane.
///
/// Implemented as two separable 1D passes:
/// 1. Horizontal convolution with transpose
/// 2. Horizontal convolution on the transposed result (effectively vertical)
///    with transpose back
#[must_use]
pub fn blur(input: &Plane, kernel: &GaussianKernel) -> Plane {
    let mut scratch = Plane::new(input.height(), input.width());
    let mut output = Plane::new(input.width(), input.height());
    blur_scratch(input, kernel, &mut scratch, &mut output);
    output
}

/// Applies the 2D Gaussian filter using existing buffers.
///
/// `scratch` must be (height, width) - transposed dimensions.
/// `output` must be (width, height) - original dimensions.
pub fn blur_scratch(input: &Plane, kernel: &GaussianKernel, scratch: &mut Plane, output: &mut Plane) {
    assert_eq!((scratch.width(), scratch.height()), (input.height(), input.width()));
    assert!(output.same_size(input));
    convolve_horizontal_transpose_to(input, kernel.weights(), scratch);
    convolve_horizontal_transpose_to(scratch, kernel.weights(), output);
}

/// Applies the 2D Gaussian filter with clamped indexing everywhere.
#[must_use]
pub fn blur_clamped(input: &Plane, kernel: &GaussianKernel) -> Plane {
    let mut scratch = Plane::new(input.height(), input.width());
    let mut output = Plane::new(input.width(), input.height());
    convolve_clamped_transpose_to(input, kernel.weights(), &mut scratch);
    convolve_clamped_transpose_to(&scratch, kernel.weights(), &mut output);
    output
}
