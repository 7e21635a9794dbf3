//! Benchmark comparing precomputed reference vs full computation.
//!
//! Run with: cargo run --release --example precompute_bench

use std::time::Instant;
use upscale_eval::{
    compute_quality_with, PixelBuffer, QualityParams, QualityReference, RGB8,
};

fn main() {
    let width = 512;
    let height = 512;

    let reference_pixels: Vec<RGB8> = (0..width * height)
        .map(|i| {
            let x = i % width;
            let y = i / width;
            let r = ((x * 255) / width) as u8;
            let g = ((y * 255) / height) as u8;
            let b = (((x + y) * 127) / (width + height)) as u8;
            RGB8::new(r, g, b)
        })
        .collect();
    let reference =
        PixelBuffer::from_pixels(reference_pixels.clone(), width, height).expect("valid reference");

    // Create multiple distorted versions
    let num_distortions = 20;
    let distortions: Vec<PixelBuffer> = (1..=num_distortions)
        .map(|offset| {
            let pixels = reference_pixels
                .iter()
                .map(|px| {
                    RGB8::new(
                        px.r.saturating_add(offset as u8),
                        px.g,
                        px.b.saturating_sub(offset as u8),
                    )
                })
                .collect();
            PixelBuffer::from_pixels(pixels, width, height).expect("valid candidate")
        })
        .collect();

    let params = QualityParams::default();

    // Warm up
    let _ = compute_quality_with(&reference, &distortions[0], &params);

    let start = Instant::now();
    let full_scores: Vec<_> = distortions
        .iter()
        .map(|d| compute_quality_with(&reference, d, &params).expect("valid input"))
        .collect();
    let full_time = start.elapsed();

    let precompute_start = Instant::now();
    let precomputed = QualityReference::new(&reference, &params).expect("valid params");
    let precompute_time = precompute_start.elapsed();

    let compare_start = Instant::now();
    let precomputed_scores: Vec<_> = distortions
        .iter()
        .map(|d| precomputed.compare(d).expect("valid input"))
        .collect();
    let compare_time = compare_start.elapsed();

    assert_eq!(full_scores, precomputed_scores, "scores must match");

    println!("{num_distortions} comparisons at {width}x{height}:");
    println!(
        "  full:        {:.2}ms total, {:.2}ms each",
        full_time.as_secs_f64() * 1000.0,
        full_time.as_secs_f64() * 1000.0 / num_distortions as f64
    );
    println!(
        "  precomputed: {:.2}ms setup + {:.2}ms total, {:.2}ms each",
        precompute_time.as_secs_f64() * 1000.0,
        compare_time.as_secs_f64() * 1000.0,
        compare_time.as_secs_f64() * 1000.0 / num_distortions as f64
    );
    println!(
        "  speedup:     {:.2}x",
        full_time.as_secs_f64() / (precompute_time + compare_time).as_secs_f64()
    );
}
