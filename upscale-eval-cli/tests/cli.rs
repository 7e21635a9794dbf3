//! Integration tests for the upscale-eval CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::{Rgb, RgbImage};

/// Path to the upscale-eval binary built for this test run.
fn upscale_eval_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_upscale-eval"))
}

fn run(args: &[&str]) -> Output {
    Command::new(upscale_eval_bin())
        .args(args)
        .output()
        .expect("Failed to run upscale-eval")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

/// Create a PNG with a solid color.
fn create_solid_png(path: &Path, width: u32, height: u32, r: u8, g: u8, b: u8) {
    RgbImage::from_pixel(width, height, Rgb([r, g, b]))
        .save(path)
        .expect("Failed to write PNG");
}

/// Create a PNG with a smooth color gradient.
fn create_gradient_png(path: &Path, width: u32, height: u32) {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / (width - 1)) as u8,
            (y * 255 / (height - 1)) as u8,
            ((x + y) * 127 / (width + height - 2)) as u8,
        ])
    })
    .save(path)
    .expect("Failed to write PNG");
}

/// Create temp directory for test files.
fn temp_dir() -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir =
        std::env::temp_dir().join(format!("upscale-eval-test-{}-{}", std::process::id(), id));
    fs::create_dir_all(&dir).expect("Failed to create temp dir");
    dir
}

// ============================================================================
// upscale
// ============================================================================

#[test]
fn test_upscale_by_scale() {
    let dir = temp_dir();
    let input = dir.join("small.png");
    let output = dir.join("big.png");
    create_solid_png(&input, 4, 4, 100, 100, 100);

    let result = run(&[
        "upscale",
        path_str(&input),
        path_str(&output),
        "--scale",
        "2",
        "--color=never",
    ]);
    assert!(result.status.success(), "Exit code should be 0");

    let img = image::open(&output).expect("output written").to_rgb8();
    assert_eq!(img.dimensions(), (8, 8));
    assert!(img.pixels().all(|p| *p == Rgb([100, 100, 100])));

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Upscaled"), "Should report the resize");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_upscale_to_explicit_size() {
    let dir = temp_dir();
    let input = dir.join("src.png");
    let output = dir.join("dst.png");
    create_gradient_png(&input, 10, 6);

    let result = run(&[
        "upscale",
        path_str(&input),
        path_str(&output),
        "--kernel",
        "bilinear",
        "--width",
        "25",
        "--height",
        "9",
    ]);
    assert!(result.status.success());
    let img = image::open(&output).expect("output written");
    assert_eq!((img.width(), img.height()), (25, 9));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_upscale_unknown_kernel() {
    let result = run(&["upscale", "a.png", "b.png", "--scale", "2", "--kernel", "lanczos"]);
    assert_eq!(result.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("lanczos"), "Should name the bad kernel");
}

#[test]
fn test_upscale_zero_scale() {
    let dir = temp_dir();
    let input = dir.join("src.png");
    create_solid_png(&input, 4, 4, 1, 2, 3);

    let result = run(&[
        "upscale",
        path_str(&input),
        path_str(&dir.join("out.png")),
        "--scale",
        "0",
    ]);
    assert_eq!(result.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("scale"), "Should explain the bad factor");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_upscale_overflowing_scale() {
    let dir = temp_dir();
    let input = dir.join("src.png");
    create_solid_png(&input, 4, 4, 1, 2, 3);

    let result = run(&[
        "upscale",
        path_str(&input),
        path_str(&dir.join("out.png")),
        "--scale",
        "9223372036854775807",
    ]);
    assert_eq!(result.status.code(), Some(2), "Should fail cleanly, not panic");
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("scale"), "Should explain the bad factor");

    fs::remove_dir_all(&dir).ok();
}

// ============================================================================
// compare
// ============================================================================

#[test]
fn test_compare_identical_images() {
    let dir = temp_dir();
    let img1 = dir.join("img1.png");
    let img2 = dir.join("img2.png");
    create_solid_png(&img1, 16, 16, 128, 128, 128);
    create_solid_png(&img2, 16, 16, 128, 128, 128);

    let result = run(&["compare", "--color=never", path_str(&img1), path_str(&img2)]);
    assert!(result.status.success());

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("PSNR: inf dB"), "got: {stdout}");
    assert!(stdout.contains("SSIM: 1.0000"), "got: {stdout}");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_compare_quiet_mode() {
    let dir = temp_dir();
    let img1 = dir.join("a.png");
    let img2 = dir.join("b.png");
    create_solid_png(&img1, 8, 8, 100, 100, 100);
    create_solid_png(&img2, 8, 8, 101, 100, 100);

    let result = run(&["compare", "--quiet", path_str(&img1), path_str(&img2)]);
    assert!(result.status.success());

    let stdout = String::from_utf8_lossy(&result.stdout);
    let fields: Vec<f64> = stdout
        .split_whitespace()
        .map(|s| s.parse().expect("Should output numbers"))
        .collect();
    assert_eq!(fields.len(), 2);
    // One channel off by one everywhere: MSE = 1/3
    assert!((fields[0] - 10.0 * 195_075.0f64.log10()).abs() < 1e-5);
    assert!(fields[1] > 0.99 && fields[1] < 1.0);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_compare_threshold_pass() {
    let dir = temp_dir();
    let img1 = dir.join("a.png");
    let img2 = dir.join("b.png");
    create_solid_png(&img1, 16, 16, 128, 128, 128);
    create_solid_png(&img2, 16, 16, 128, 128, 128);

    let result = run(&[
        "compare",
        "--min-psnr",
        "40",
        "--min-ssim",
        "0.99",
        path_str(&img1),
        path_str(&img2),
    ]);
    assert!(result.status.success(), "Should pass above thresholds");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_compare_threshold_fail() {
    let dir = temp_dir();
    let img1 = dir.join("black.png");
    let img2 = dir.join("white.png");
    create_solid_png(&img1, 16, 16, 0, 0, 0);
    create_solid_png(&img2, 16, 16, 255, 255, 255);

    let result = run(&["compare", "--min-psnr", "10", path_str(&img1), path_str(&img2)]);
    assert_eq!(
        result.status.code(),
        Some(1),
        "Should exit with code 1 below the threshold"
    );

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_compare_json_output() {
    let dir = temp_dir();
    let img1 = dir.join("a.png");
    let img2 = dir.join("b.png");
    create_gradient_png(&img1, 20, 12);
    create_solid_png(&img2, 20, 12, 60, 60, 60);

    let result = run(&["compare", "--format", "json", path_str(&img1), path_str(&img2)]);
    assert!(result.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&result.stdout).expect("Should output valid JSON");
    assert_eq!(json["width"], 20);
    assert_eq!(json["height"], 12);
    assert_eq!(json["identical"], false);
    assert!(json["psnr"].as_f64().is_some());
    assert!(json["ssim"].as_f64().is_some());
    assert_eq!(json["params"]["window_size"], 11);
    assert!(json.get("threshold_failed").is_none());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_compare_dimension_mismatch() {
    let dir = temp_dir();
    let img1 = dir.join("a.png");
    let img2 = dir.join("b.png");
    create_solid_png(&img1, 16, 16, 1, 1, 1);
    create_solid_png(&img2, 8, 16, 1, 1, 1);

    let result = run(&["compare", path_str(&img1), path_str(&img2)]);
    assert_eq!(result.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("16x16 vs 8x16"), "got: {stderr}");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_compare_invalid_window() {
    let dir = temp_dir();
    let img = dir.join("a.png");
    create_solid_png(&img, 8, 8, 1, 1, 1);

    let result = run(&["compare", "--window-size", "4", path_str(&img), path_str(&img)]);
    assert_eq!(result.status.code(), Some(2));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_file() {
    let result = run(&["compare", "nonexistent1.png", "nonexistent2.png"]);
    assert_eq!(
        result.status.code(),
        Some(2),
        "Should exit with code 2 on error"
    );

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("error"), "Should print error message");
}

// ============================================================================
// bench
// ============================================================================

#[test]
fn test_bench_text_output() {
    let dir = temp_dir();
    let originals = dir.join("originals");
    fs::create_dir_all(&originals).unwrap();
    create_gradient_png(&originals.join("a.png"), 24, 24);
    create_solid_png(&originals.join("b.png"), 24, 24, 50, 90, 200);
    fs::write(originals.join("notes.txt"), "not an image").unwrap();

    let result = run(&["bench", "--color=never", "--scales", "2,3", path_str(&originals)]);
    assert!(result.status.success());

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("a.png"), "Should list a.png");
    assert!(stdout.contains("b.png"), "Should list b.png");
    assert!(!stdout.contains("notes.txt"));
    assert!(stdout.contains("bilinear") && stdout.contains("bicubic"));
    assert!(stdout.contains("Summary"), "Should show summary");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_bench_json_output() {
    let dir = temp_dir();
    let original = dir.join("photo.png");
    create_gradient_png(&original, 32, 20);

    let result = run(&[
        "bench",
        "--format",
        "json",
        "--scales",
        "2,4",
        "--kernels",
        "bicubic",
        path_str(&original),
    ]);
    assert!(result.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&result.stdout).expect("Should output valid JSON");
    let results = json["results"].as_array().expect("results array");
    assert_eq!(results.len(), 2);
    for row in results {
        assert_eq!(row["filename"], "photo.png");
        assert_eq!(row["method"], "bicubic");
        assert!(row["psnr"].as_f64().is_some_and(|p| p > 0.0));
        assert!(row["time_ms"].as_f64().is_some());
    }
    assert_eq!(results[0]["scale"], 2);
    assert_eq!(results[1]["scale"], 4);
    assert_eq!(json["summary"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["errors"].as_array().map(Vec::len), Some(0));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_bench_uses_downsampled_inputs() {
    let dir = temp_dir();
    let originals = dir.join("originals");
    let downsampled = dir.join("downsampled");
    let outputs = dir.join("out");
    fs::create_dir_all(&originals).unwrap();
    fs::create_dir_all(&downsampled).unwrap();

    // The original is flat; a flat downsampled file of the same color
    // upscales back to a perfect match
    create_solid_png(&originals.join("flat.png"), 16, 16, 70, 80, 90);
    create_solid_png(&downsampled.join("flat_x2.png"), 8, 8, 70, 80, 90);
    // x4 has a deliberately different color so a wrong pairing is visible
    create_solid_png(&downsampled.join("flat_x4.png"), 4, 4, 0, 0, 0);

    let result = run(&[
        "bench",
        "--format",
        "json",
        "--scales",
        "2,4",
        "--kernels",
        "bilinear",
        "--downsampled",
        path_str(&downsampled),
        "--output-dir",
        path_str(&outputs),
        path_str(&originals),
    ]);
    assert!(result.status.success());

    let json: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    // Infinite PSNR serializes as null
    assert!(results[0]["psnr"].is_null());
    assert!(results[1]["psnr"].as_f64().is_some_and(|p| p < 20.0));

    assert!(outputs.join("flat_x2_bilinear.png").is_file());
    let saved = image::open(outputs.join("flat_x4_bilinear.png")).unwrap();
    assert_eq!((saved.width(), saved.height()), (16, 16));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_bench_keep_going() {
    let dir = temp_dir();
    let originals = dir.join("originals");
    fs::create_dir_all(&originals).unwrap();
    create_gradient_png(&originals.join("good.png"), 16, 16);
    fs::write(originals.join("broken.png"), b"not a png").unwrap();

    let stop = run(&["bench", "--color=never", path_str(&originals)]);
    assert_eq!(stop.status.code(), Some(2));
    assert!(stop.stdout.is_empty(), "Should stop before printing results");

    let keep = run(&["bench", "--color=never", "--keep-going", path_str(&originals)]);
    assert_eq!(keep.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&keep.stdout);
    assert!(stdout.contains("good.png"));
    assert!(stdout.contains("ERROR"), "Should report the broken file");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_bench_empty_directory() {
    let dir = temp_dir();
    let result = run(&["bench", path_str(&dir)]);
    assert_eq!(result.status.code(), Some(2));

    fs::remove_dir_all(&dir).ok();
}

// ============================================================================
// general
// ============================================================================

#[test]
fn test_version() {
    let result = run(&["--version"]);
    assert!(result.status.success());

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("upscale-eval"), "Should show name");
    assert!(stdout.contains("0."), "Should show version");
}

#[test]
fn test_help() {
    let result = run(&["--help"]);
    assert!(result.status.success());

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("upscale"), "Should list upscale");
    assert!(stdout.contains("compare"), "Should list compare");
    assert!(stdout.contains("bench"), "Should list bench");
    assert!(stdout.contains("EXIT CODES"), "Should document exit codes");
}

#[test]
fn test_compare_help() {
    let result = run(&["compare", "--help"]);
    assert!(result.status.success());

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("REFERENCE"), "Should show REFERENCE arg");
    assert!(stdout.contains("CANDIDATE"), "Should show CANDIDATE arg");
    assert!(stdout.contains("--min-psnr"), "Should show --min-psnr");
}
