//! Property-based tests for the resampling and metrics engines.
//!
//! Inputs are random buffers built from arbitrary bytes, so the properties
//! hold for every buffer, not just the handcrafted ones in the unit tests.

mod common;

use proptest::prelude::*;
use upscale_eval::interpolate::cubic_weight;
use upscale_eval::{
    compute_quality, psnr, resample, ssim, GaussianKernel, Interpolator, Kernel, PixelBuffer, RGB8,
};

/// Strategy for a random buffer up to `max` pixels per side.
fn any_buffer(max: usize) -> impl Strategy<Value = PixelBuffer> {
    (1..=max, 1..=max).prop_flat_map(|(w, h)| {
        prop::collection::vec(any::<u8>(), w * h * 3)
            .prop_map(move |bytes| common::buffer(&bytes, w, h))
    })
}

/// Strategy for two random buffers of the same size.
fn any_buffer_pair(max: usize) -> impl Strategy<Value = (PixelBuffer, PixelBuffer)> {
    (1..=max, 1..=max).prop_flat_map(|(w, h)| {
        let n = w * h * 3;
        (
            prop::collection::vec(any::<u8>(), n),
            prop::collection::vec(any::<u8>(), n),
        )
            .prop_map(move |(a, b)| (common::buffer(&a, w, h), common::buffer(&b, w, h)))
    })
}

fn any_kernel() -> impl Strategy<Value = Kernel> {
    prop_oneof![Just(Kernel::Bilinear), Just(Kernel::Bicubic)]
}

// ============================================================================
// Metrics
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A buffer compared with itself is perfect on both metrics.
    #[test]
    fn self_comparison_is_perfect(a in any_buffer(24)) {
        let scores = compute_quality(&a, &a).unwrap();
        prop_assert_eq!(scores.psnr, f64::INFINITY);
        prop_assert!((scores.ssim - 1.0).abs() < 1e-9, "ssim = {}", scores.ssim);
    }

    /// SSIM stays in [-1, 1]; PSNR is non-negative or infinite; neither is NaN.
    #[test]
    fn scores_are_bounded((a, b) in any_buffer_pair(24)) {
        let s = ssim(&a, &b).unwrap();
        prop_assert!(!s.is_nan());
        prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&s), "ssim = {}", s);

        let p = psnr(&a, &b).unwrap();
        prop_assert!(!p.is_nan());
        prop_assert!(p >= 0.0, "psnr = {}", p);
    }

    /// Both metrics are symmetric in their arguments.
    #[test]
    fn metrics_are_symmetric((a, b) in any_buffer_pair(16)) {
        prop_assert_eq!(psnr(&a, &b).unwrap(), psnr(&b, &a).unwrap());
        let (ab, ba) = (ssim(&a, &b).unwrap(), ssim(&b, &a).unwrap());
        prop_assert!((ab - ba).abs() < 1e-12, "{} vs {}", ab, ba);
    }
}

// ============================================================================
// Resampling
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Resampling to the source size reproduces it exactly with either kernel.
    #[test]
    fn same_size_resample_is_identity(src in any_buffer(20), kernel in any_kernel()) {
        let out = resample(&src, src.width(), src.height(), &kernel).unwrap();
        prop_assert_eq!(out, src);
    }

    /// Every destination pixel is the kernel sampled at the inverse-mapped
    /// coordinate, however rows are scheduled.
    #[test]
    fn resample_matches_per_pixel_mapping(
        src in any_buffer(12),
        new_w in 1usize..30,
        new_h in 1usize..30,
        kernel in any_kernel(),
    ) {
        let out = resample(&src, new_w, new_h, &kernel).unwrap();
        prop_assert_eq!((out.width(), out.height()), (new_w, new_h));

        let xr = src.width() as f32 / new_w as f32;
        let yr = src.height() as f32 / new_h as f32;
        for y in 0..new_h {
            for x in 0..new_w {
                let expected = kernel.interpolate(&src, x as f32 * xr, y as f32 * yr);
                prop_assert_eq!(out.get(x, y), expected, "at ({}, {})", x, y);
            }
        }
    }

    /// A flat buffer stays flat at any target size.
    #[test]
    fn flat_buffer_stays_flat(
        r in any::<u8>(), g in any::<u8>(), b in any::<u8>(),
        w in 1usize..10, h in 1usize..10,
        new_w in 1usize..40, new_h in 1usize..40,
        kernel in any_kernel(),
    ) {
        let color = RGB8::new(r, g, b);
        let src = PixelBuffer::filled(w, h, color).unwrap();
        let out = resample(&src, new_w, new_h, &kernel).unwrap();
        prop_assert!(out.pixels().iter().all(|&p| p == color));
    }
}

// ============================================================================
// Kernels
// ============================================================================

proptest! {
    /// Gaussian weights are non-negative, normalized and symmetric.
    #[test]
    fn gaussian_kernel_shape(half in 0usize..15, sigma in 0.1f64..10.0) {
        let size = half * 2 + 1;
        let kernel = GaussianKernel::new(size, sigma).unwrap();
        let w = kernel.weights();
        prop_assert_eq!(w.len(), size);

        let sum: f64 = w.iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-12, "sum = {}", sum);
        for i in 0..size {
            prop_assert!(w[i] >= 0.0);
            prop_assert_eq!(w[i], w[size - 1 - i]);
        }
    }

    /// Even window sizes are always rejected.
    #[test]
    fn gaussian_kernel_rejects_even(half in 0usize..15, sigma in 0.1f64..10.0) {
        prop_assert!(GaussianKernel::new(half * 2, sigma).is_err());
    }

    /// The four Catmull-Rom taps around any fractional offset sum to one.
    #[test]
    fn cubic_weights_partition_unity(t in 0.0f64..1.0) {
        let sum: f64 = [-1.0, 0.0, 1.0, 2.0].iter().map(|&o| cubic_weight(t - o)).sum();
        prop_assert!((sum - 1.0).abs() < 1e-12, "sum = {}", sum);
    }
}
