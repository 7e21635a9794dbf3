//! Times resampling and scoring on a synthetic image.
//!
//! Run with: cargo run --release --example bench

use std::time::Instant;
use upscale_eval::{compute_quality, downscale_by, resample, Kernel, PixelBuffer, RGB8};

fn main() {
    let width = 512;
    let height = 512;

    let pixels: Vec<RGB8> = (0..width * height)
        .map(|i| {
            let x = i % width;
            let y = i / width;
            let r = ((x * 255) / width) as u8;
            let g = ((y * 255) / height) as u8;
            let b = ((x ^ y) & 0xFF) as u8;
            RGB8::new(r, g, b)
        })
        .collect();
    let original = PixelBuffer::from_pixels(pixels, width, height).expect("valid dimensions");

    for scale in [2, 3, 4] {
        let low = downscale_by(&original, scale, &Kernel::Bicubic).expect("valid scale");

        for kernel in Kernel::ALL {
            // Warmup
            let _ = resample(&low, width, height, &kernel);

            let iterations = 10;
            let start = Instant::now();
            let mut upscaled = None;
            for _ in 0..iterations {
                upscaled = Some(resample(&low, width, height, &kernel).expect("valid target"));
            }
            let elapsed = start.elapsed();

            let upscaled = upscaled.expect("at least one iteration");
            let metric_start = Instant::now();
            let scores = compute_quality(&original, &upscaled).expect("same size");
            let metric_time = metric_start.elapsed();

            println!(
                "x{scale} {kernel:<8}: resample {:.2}ms, metrics {:.2}ms, PSNR {:.2} dB, SSIM {:.4}",
                elapsed.as_secs_f64() * 1000.0 / iterations as f64,
                metric_time.as_secs_f64() * 1000.0,
                scores.psnr,
                scores.ssim
            );
        }
    }
}
