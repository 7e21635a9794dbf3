//! upscale-eval CLI - compare image upscaling kernels
//!
//! Upscale images, score a candidate against a reference with PSNR and SSIM,
//! or benchmark every kernel over a directory of originals.

use std::collections::BTreeMap;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{ArgAction, Args, ColorChoice, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use flexi_logger::{Logger, LoggerHandle};
use serde::Serialize;
use upscale_eval::{
    downscale_by, resample, scale_by, Interpolator, Kernel, MetricResult, PixelBuffer,
    QualityParams, QualityReference, QualityScores,
};

/// Image upscaling comparison tool
///
/// Resamples images with bilinear or Catmull-Rom bicubic interpolation and
/// scores the result against a reference with PSNR (dB, higher is better,
/// infinite for identical images) and SSIM (1.0 for identical images).
#[derive(Parser, Debug)]
#[command(name = "upscale-eval")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    Upscale an image 2x with bicubic interpolation:
        upscale-eval upscale small.png big.png --scale 2

    Compare an upscaled image against the original:
        upscale-eval compare original.png big.png

    CI mode - fail if quality drops below a threshold:
        upscale-eval compare --min-psnr 30 --min-ssim 0.9 original.png big.png

    Benchmark both kernels at 2x, 3x and 4x over a directory:
        upscale-eval bench originals/ --scales 2,3,4

    Use pre-downsampled inputs named <stem>_x<scale>.<ext>:
        upscale-eval bench originals/ --downsampled downsampled/

EXIT CODES:
    0 - Success (scores within thresholds if --min-psnr/--min-ssim specified)
    1 - Score below threshold
    2 - Error (file not found, invalid image, etc.)")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    color: ColorChoice,

    /// More log output on stderr (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode - only print results, no status or error messages
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resample an image to a new size
    Upscale(UpscaleArgs),
    /// Score a candidate image against a reference
    Compare(CompareArgs),
    /// Downscale originals, upscale them back with each kernel and score the results
    Bench(BenchArgs),
}

#[derive(Args, Debug)]
struct UpscaleArgs {
    /// Source image
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Destination image (format from extension)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Interpolation kernel (bilinear, bicubic)
    #[arg(short, long, default_value = "bicubic")]
    kernel: Kernel,

    /// Integer scale factor applied to both axes
    #[arg(
        short,
        long,
        conflicts_with_all = ["width", "height"],
        required_unless_present = "width"
    )]
    scale: Option<usize>,

    /// Target width in pixels
    #[arg(long, requires = "height")]
    width: Option<usize>,

    /// Target height in pixels
    #[arg(long, requires = "width")]
    height: Option<usize>,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Reference image (original)
    #[arg(value_name = "REFERENCE")]
    reference: PathBuf,

    /// Candidate image (upscaled)
    #[arg(value_name = "CANDIDATE")]
    candidate: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Minimum acceptable PSNR in dB (exit code 1 if below)
    #[arg(long, value_name = "DB")]
    min_psnr: Option<f64>,

    /// Minimum acceptable SSIM (exit code 1 if below)
    #[arg(long, value_name = "SSIM")]
    min_ssim: Option<f64>,

    /// SSIM Gaussian window length (odd)
    #[arg(long, default_value = "11", value_name = "TAPS")]
    window_size: usize,

    /// SSIM Gaussian standard deviation
    #[arg(long, default_value = "1.5")]
    sigma: f64,
}

#[derive(Args, Debug)]
struct BenchArgs {
    /// Original image or directory of originals
    #[arg(value_name = "ORIGINALS")]
    originals: PathBuf,

    /// Directory of pre-downsampled inputs named <stem>_x<scale>.<ext>
    ///
    /// Originals without a matching file are downscaled with bicubic
    /// interpolation instead.
    #[arg(short, long, value_name = "DIR")]
    downsampled: Option<PathBuf>,

    /// Scale factors to test (comma-separated)
    #[arg(long, default_value = "2,3,4", value_delimiter = ',')]
    scales: Vec<usize>,

    /// Kernels to test (comma-separated)
    #[arg(long, default_value = "bilinear,bicubic", value_delimiter = ',')]
    kernels: Vec<Kernel>,

    /// Save every upscaled result to this directory
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: BenchFormat,

    /// File extensions to include (comma-separated)
    #[arg(long, default_value = "png,jpg,jpeg,bmp", value_delimiter = ',')]
    extensions: Vec<String>,

    /// Continue with the next image on errors
    #[arg(long)]
    keep_going: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain text output with both scores
    Text,
    /// JSON output
    Json,
    /// Minimal - PSNR and SSIM on one line
    Score,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum BenchFormat {
    /// Table with a per-method summary
    Text,
    /// JSON output
    Json,
}

#[derive(Serialize)]
struct CompareJson {
    reference: String,
    candidate: String,
    width: usize,
    height: usize,
    /// `None` for identical images (infinite PSNR)
    psnr: Option<f64>,
    ssim: f64,
    identical: bool,
    params: JsonParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold_failed: Option<bool>,
}

#[derive(Serialize)]
struct JsonParams {
    window_size: usize,
    sigma: f64,
}

#[derive(Serialize)]
struct BenchJsonOutput {
    results: Vec<BenchRowJson>,
    summary: Vec<BenchSummary>,
    errors: Vec<BenchErrorJson>,
}

#[derive(Serialize)]
struct BenchRowJson {
    filename: String,
    method: String,
    scale: usize,
    psnr: Option<f64>,
    ssim: f64,
    time_ms: f64,
}

#[derive(Serialize)]
struct BenchErrorJson {
    filename: String,
    error: String,
}

/// Mean scores of one method at one scale.
#[derive(Serialize, Debug, PartialEq)]
struct BenchSummary {
    method: String,
    scale: usize,
    count: usize,
    /// Rows with infinite PSNR, left out of `mean_psnr`
    identical: usize,
    /// Mean over the finite rows; `None` when every row is identical
    mean_psnr: Option<f64>,
    mean_ssim: f64,
    mean_time_ms: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up color output
    setup_colors(&cli);

    // Keep the handle alive for the whole run
    let _logger = match setup_logging(&cli) {
        Ok(handle) => Some(handle),
        Err(e) => {
            if !cli.quiet {
                eprintln!("{}: failed to start logger: {}", "warning".yellow().bold(), e);
            }
            None
        }
    };

    match &cli.command {
        Command::Upscale(args) => run_upscale(&cli, args),
        Command::Compare(args) => run_compare(&cli, args),
        Command::Bench(args) => run_bench(&cli, args),
    }
}

fn setup_colors(cli: &Cli) {
    match cli.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {
            // Disable colors if not a terminal
            if !io::stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }
}

fn log_level(cli: &Cli) -> &'static str {
    if cli.quiet {
        return "error";
    }
    match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level.
fn setup_logging(cli: &Cli) -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    Logger::try_with_env_or_str(log_level(cli))?
        .log_to_stderr()
        .start()
}

fn report_error(cli: &Cli, message: &str) {
    if !cli.quiet {
        eprintln!("{}: {}", "error".red().bold(), message);
    }
}

fn load_image(path: &Path) -> Result<PixelBuffer, String> {
    let img =
        image::open(path).map_err(|e| format!("failed to load '{}': {}", path.display(), e))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    log::debug!("loaded {} ({}x{})", path.display(), width, height);
    PixelBuffer::from_rgb_bytes(rgb.as_raw(), width as usize, height as usize)
        .map_err(|e| format!("'{}': {}", path.display(), e))
}

fn save_image(buffer: &PixelBuffer, path: &Path) -> Result<(), String> {
    let width = u32::try_from(buffer.width())
        .map_err(|_| format!("width {} too large to save", buffer.width()))?;
    let height = u32::try_from(buffer.height())
        .map_err(|_| format!("height {} too large to save", buffer.height()))?;
    image::save_buffer(
        path,
        &buffer.to_rgb_bytes(),
        width,
        height,
        image::ColorType::Rgb8,
    )
    .map_err(|e| format!("failed to save '{}': {}", path.display(), e))
}

// ============================================================================
// upscale
// ============================================================================

fn run_upscale(cli: &Cli, args: &UpscaleArgs) -> ExitCode {
    match upscale_file(args) {
        Ok((src, dst, time)) => {
            if !cli.quiet {
                println!(
                    "{} {} ({}x{}) -> {} ({}x{}) with {} in {}",
                    "Upscaled".green().bold(),
                    args.input.display(),
                    src.0,
                    src.1,
                    args.output.display(),
                    dst.0,
                    dst.1,
                    args.kernel,
                    format_time(time)
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(cli, &e);
            ExitCode::from(2)
        }
    }
}

type Size = (usize, usize);

fn upscale_file(args: &UpscaleArgs) -> Result<(Size, Size, Duration), String> {
    let src = load_image(&args.input)?;

    let start = Instant::now();
    let result = match (args.scale, args.width, args.height) {
        (Some(factor), _, _) => scale_by(&src, factor, &args.kernel),
        (None, Some(width), Some(height)) => resample(&src, width, height, &args.kernel),
        _ => return Err("either --scale or both --width and --height are required".to_string()),
    };
    let upscaled = result.map_err(|e| format!("resample failed: {e}"))?;
    let time = start.elapsed();

    save_image(&upscaled, &args.output)?;
    Ok((
        (src.width(), src.height()),
        (upscaled.width(), upscaled.height()),
        time,
    ))
}

// ============================================================================
// compare
// ============================================================================

fn run_compare(cli: &Cli, args: &CompareArgs) -> ExitCode {
    match compare_files(args) {
        Ok((scores, width, height)) => {
            let failed = threshold_failed(args, &scores);

            if let Err(e) = output_compare_result(cli, args, &scores, width, height) {
                report_error(cli, &e);
                return ExitCode::from(2);
            }

            if failed == Some(true) {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            report_error(cli, &e);
            ExitCode::from(2)
        }
    }
}

fn quality_params(args: &CompareArgs) -> QualityParams {
    QualityParams::new()
        .with_window_size(args.window_size)
        .with_sigma(args.sigma)
}

fn compare_files(args: &CompareArgs) -> Result<(QualityScores, usize, usize), String> {
    let reference = load_image(&args.reference)?;
    let candidate = load_image(&args.candidate)?;

    let scores = upscale_eval::compute_quality_with(&reference, &candidate, &quality_params(args))
        .map_err(|e| e.to_string())?;
    Ok((scores, reference.width(), reference.height()))
}

/// `None` when no threshold was given.
fn threshold_failed(args: &CompareArgs, scores: &QualityScores) -> Option<bool> {
    if args.min_psnr.is_none() && args.min_ssim.is_none() {
        return None;
    }
    let psnr_low = args.min_psnr.is_some_and(|min| scores.psnr < min);
    let ssim_low = args.min_ssim.is_some_and(|min| scores.ssim < min);
    Some(psnr_low || ssim_low)
}

fn get_format(cli: &Cli, args: &CompareArgs) -> OutputFormat {
    if cli.quiet && args.format == OutputFormat::Text {
        OutputFormat::Score
    } else {
        args.format
    }
}

fn psnr_color(psnr: f64) -> colored::Color {
    use colored::Color;
    if psnr >= 40.0 {
        Color::Green
    } else if psnr >= 30.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn ssim_color(ssim: f64) -> colored::Color {
    use colored::Color;
    if ssim >= 0.95 {
        Color::Green
    } else if ssim >= 0.8 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn format_psnr(psnr: f64) -> String {
    if psnr.is_infinite() {
        "inf".to_string()
    } else {
        format!("{psnr:.2}")
    }
}

fn format_time(time: Duration) -> String {
    format!("{:.2}ms", time.as_secs_f64() * 1000.0)
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn output_compare_result(
    cli: &Cli,
    args: &CompareArgs,
    scores: &QualityScores,
    width: usize,
    height: usize,
) -> Result<(), String> {
    match get_format(cli, args) {
        OutputFormat::Score => {
            if scores.psnr.is_infinite() {
                println!("inf {:.6}", scores.ssim);
            } else {
                println!("{:.6} {:.6}", scores.psnr, scores.ssim);
            }
        }
        OutputFormat::Text => {
            println!(
                "PSNR: {} dB",
                format_psnr(scores.psnr).color(psnr_color(scores.psnr))
            );
            println!(
                "SSIM: {}",
                format!("{:.4}", scores.ssim).color(ssim_color(scores.ssim))
            );

            if let Some(min) = args.min_psnr {
                if scores.psnr < min {
                    println!("{}", format!("PSNR below threshold {min}").red().bold());
                }
            }
            if let Some(min) = args.min_ssim {
                if scores.ssim < min {
                    println!("{}", format!("SSIM below threshold {min}").red().bold());
                }
            }
        }
        OutputFormat::Json => {
            let output = CompareJson {
                reference: args.reference.display().to_string(),
                candidate: args.candidate.display().to_string(),
                width,
                height,
                psnr: finite(scores.psnr),
                ssim: scores.ssim,
                identical: scores.psnr.is_infinite(),
                params: JsonParams {
                    window_size: args.window_size,
                    sigma: args.sigma,
                },
                threshold_failed: threshold_failed(args, scores),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| format!("failed to serialize JSON: {e}"))?;
            println!("{json}");
        }
    }

    Ok(())
}

// ============================================================================
// bench
// ============================================================================

fn run_bench(cli: &Cli, args: &BenchArgs) -> ExitCode {
    let originals = match find_images(&args.originals, &args.extensions) {
        Ok(files) => files,
        Err(e) => {
            report_error(cli, &e);
            return ExitCode::from(2);
        }
    };

    if originals.is_empty() {
        if !cli.quiet {
            eprintln!("{}: no image files found", "warning".yellow().bold());
        }
        return ExitCode::from(2);
    }

    if let Some(dir) = &args.output_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            report_error(
                cli,
                &format!("failed to create '{}': {}", dir.display(), e),
            );
            return ExitCode::from(2);
        }
    }

    let mut results: Vec<MetricResult> = Vec::new();
    let mut errors: Vec<(String, String)> = Vec::new();

    for path in &originals {
        match bench_image(args, path) {
            Ok(rows) => results.extend(rows),
            Err(e) => {
                if !args.keep_going {
                    report_error(cli, &format!("{}: {}", path.display(), e));
                    return ExitCode::from(2);
                }
                log::warn!("skipping {}: {}", path.display(), e);
                errors.push((display_name(path), e));
            }
        }
    }

    if let Err(e) = output_bench_results(args, &results, &errors) {
        report_error(cli, &e);
        return ExitCode::from(2);
    }

    if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

/// A single file, or the matching files of a directory sorted by name.
fn find_images(path: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, String> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(format!("'{}' is not a file or directory", path.display()));
    }

    let extensions: Vec<String> = extensions.iter().map(|e| e.to_lowercase()).collect();
    let entries = std::fs::read_dir(path)
        .map_err(|e| format!("failed to read directory '{}': {}", path.display(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("failed to read directory entry: {e}"))?;
        let path = entry.path();
        if path.is_file() && has_extension(&path, &extensions) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    extensions.contains(&ext)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("?")
        .to_string()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image")
        .to_string()
}

/// Looks for `<stem>_x<scale>.<ext>` in the downsampled directory.
fn find_downsampled(dir: &Path, stem: &str, scale: usize, extensions: &[String]) -> Option<PathBuf> {
    extensions
        .iter()
        .map(|ext| dir.join(format!("{stem}_x{scale}.{ext}")))
        .find(|candidate| candidate.is_file())
}

fn low_res_input(
    args: &BenchArgs,
    path: &Path,
    original: &PixelBuffer,
    scale: usize,
) -> Result<PixelBuffer, String> {
    if let Some(dir) = &args.downsampled {
        if let Some(found) = find_downsampled(dir, &file_stem(path), scale, &args.extensions) {
            log::info!("using {} for x{}", found.display(), scale);
            return load_image(&found);
        }
        log::info!(
            "no downsampled x{} input for {}, downscaling",
            scale,
            path.display()
        );
    }
    downscale_by(original, scale, &Kernel::Bicubic).map_err(|e| e.to_string())
}

fn bench_image(args: &BenchArgs, path: &Path) -> Result<Vec<MetricResult>, String> {
    let original = load_image(path)?;
    let reference = QualityReference::new(&original, &QualityParams::default())
        .map_err(|e| e.to_string())?;
    let name = display_name(path);
    let stem = file_stem(path);

    let mut rows = Vec::with_capacity(args.scales.len() * args.kernels.len());
    for &scale in &args.scales {
        let low = low_res_input(args, path, &original, scale)?;

        for kernel in &args.kernels {
            let start = Instant::now();
            let upscaled = resample(&low, reference.width(), reference.height(), kernel)
                .map_err(|e| format!("resample failed: {e}"))?;
            let time = start.elapsed();

            let scores = reference.compare(&upscaled).map_err(|e| e.to_string())?;
            log::info!(
                "{} x{} {}: PSNR {} dB, SSIM {:.4}, {}",
                name,
                scale,
                kernel,
                format_psnr(scores.psnr),
                scores.ssim,
                format_time(time)
            );

            if let Some(dir) = &args.output_dir {
                save_image(&upscaled, &dir.join(format!("{stem}_x{scale}_{kernel}.png")))?;
            }

            rows.push(MetricResult::new(
                name.clone(),
                kernel.name(),
                scale,
                scores,
                time,
            ));
        }
    }

    Ok(rows)
}

/// Groups rows by method and scale, in first-seen order.
fn summarize(results: &[MetricResult]) -> Vec<BenchSummary> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut groups: BTreeMap<(String, usize), Vec<&MetricResult>> = BTreeMap::new();
    for row in results {
        let key = (row.method.clone(), row.scale);
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(row);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let rows = groups.remove(&key)?;
            let n = rows.len() as f64;
            let finite_psnr: Vec<f64> = rows
                .iter()
                .map(|r| r.psnr)
                .filter(|p| p.is_finite())
                .collect();
            let mean_psnr = (!finite_psnr.is_empty())
                .then(|| finite_psnr.iter().sum::<f64>() / finite_psnr.len() as f64);
            Some(BenchSummary {
                method: key.0,
                scale: key.1,
                count: rows.len(),
                identical: rows.len() - finite_psnr.len(),
                mean_psnr,
                mean_ssim: rows.iter().map(|r| r.ssim).sum::<f64>() / n,
                mean_time_ms: rows
                    .iter()
                    .map(|r| r.time.as_secs_f64() * 1000.0)
                    .sum::<f64>()
                    / n,
            })
        })
        .collect()
}

fn output_bench_results(
    args: &BenchArgs,
    results: &[MetricResult],
    errors: &[(String, String)],
) -> Result<(), String> {
    let summary = summarize(results);

    match args.format {
        BenchFormat::Json => {
            let output = BenchJsonOutput {
                results: results
                    .iter()
                    .map(|r| BenchRowJson {
                        filename: r.filename.clone(),
                        method: r.method.clone(),
                        scale: r.scale,
                        psnr: finite(r.psnr),
                        ssim: r.ssim,
                        time_ms: r.time.as_secs_f64() * 1000.0,
                    })
                    .collect(),
                summary,
                errors: errors
                    .iter()
                    .map(|(filename, error)| BenchErrorJson {
                        filename: filename.clone(),
                        error: error.clone(),
                    })
                    .collect(),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| format!("failed to serialize JSON: {e}"))?;
            println!("{json}");
        }
        BenchFormat::Text => {
            let name_width = results
                .iter()
                .map(|r| r.filename.len())
                .chain(errors.iter().map(|(f, _)| f.len()))
                .max()
                .unwrap_or(20)
                .max("FILE".len());

            println!(
                "{}",
                format!(
                    "{:name_width$}  {:<8}  {:>5}  {:>9}  {:>7}  {:>10}",
                    "FILE", "METHOD", "SCALE", "PSNR", "SSIM", "TIME"
                )
                .bold()
            );
            for r in results {
                println!(
                    "{:name_width$}  {:<8}  {:>5}  {:>9}  {:>7}  {:>10}",
                    r.filename,
                    r.method,
                    format!("x{}", r.scale),
                    format_psnr(r.psnr).color(psnr_color(r.psnr)),
                    format!("{:.4}", r.ssim).color(ssim_color(r.ssim)),
                    format_time(r.time)
                );
            }
            for (filename, error) in errors {
                println!(
                    "{:name_width$}  {}",
                    filename,
                    format!("ERROR: {error}").red()
                );
            }

            if !summary.is_empty() {
                println!();
                println!("{}", "Summary:".bold());
                for s in &summary {
                    let identical = if s.identical > 0 {
                        format!(", {} identical", s.identical)
                    } else {
                        String::new()
                    };
                    println!(
                        "  {:<8} x{}  PSNR {:>9} dB  SSIM {:.4}  time {:.2}ms  ({} images{})",
                        s.method,
                        s.scale,
                        s.mean_psnr.map_or_else(|| "inf".to_string(), |p| format!("{p:.2}")),
                        s.mean_ssim,
                        s.mean_time_ms,
                        s.count,
                        identical
                    );
                }
            }
        }
    }

    // Flush stdout
    let _ = io::stdout().flush();

    Ok(())
}
