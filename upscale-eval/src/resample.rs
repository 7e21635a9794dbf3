//! Generic scale transform driven by an [`Interpolator`].
//!
//! Every destination pixel `(x, y)` is mapped back to the source position
//! `(x * src_w / dst_w, y * src_h / dst_h)` and sampled with one kernel.
//! Inverse mapping means up- and down-scaling share the same code path.

use rgb::RGB8;

use crate::image::PixelBuffer;
use crate::interpolate::Interpolator;
use crate::UpscaleError;

/// Resamples `src` to `new_width x new_height`.
///
/// Output rows are independent; with the `parallel` feature they are
/// computed on the rayon pool, otherwise sequentially. Both produce the same
/// pixels.
///
/// # Errors
/// Returns [`UpscaleError::InvalidDimensions`] if a target dimension is zero
/// or the target pixel count overflows `usize`.
pub fn resample(
    src: &PixelBuffer,
    new_width: usize,
    new_height: usize,
    interpolator: &dyn Interpolator,
) -> Result<PixelBuffer, UpscaleError> {
    if new_width == 0 || new_height == 0 || new_width.checked_mul(new_height).is_none() {
        return Err(UpscaleError::InvalidDimensions {
            width: new_width,
            height: new_height,
        });
    }

    log::debug!(
        "resample {}x{} -> {}x{} ({})",
        src.width(),
        src.height(),
        new_width,
        new_height,
        interpolator.name()
    );

    let xr = src.width() as f32 / new_width as f32;
    let yr = src.height() as f32 / new_height as f32;

    let mut pixels = vec![RGB8::new(0, 0, 0); new_width * new_height];
    let fill_row = |y: usize, row: &mut [RGB8]| {
        let sy = y as f32 * yr;
        for (x, px) in row.iter_mut().enumerate() {
            *px = interpolator.interpolate(src, x as f32 * xr, sy);
        }
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        pixels
            .par_chunks_mut(new_width)
            .enumerate()
            .for_each(|(y, row)| fill_row(y, row));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (y, row) in pixels.chunks_mut(new_width).enumerate() {
            fill_row(y, row);
        }
    }

    Ok(PixelBuffer::from_vec_unchecked(pixels, new_width, new_height))
}

/// Resamples `src` to `factor` times its size on both axes.
///
/// # Errors
/// Returns [`UpscaleError::InvalidScale`] if `factor` is zero or the scaled
/// size overflows `usize`.
pub fn scale_by(
    src: &PixelBuffer,
    factor: usize,
    interpolator: &dyn Interpolator,
) -> Result<PixelBuffer, UpscaleError> {
    let scaled = |len: usize| len.checked_mul(factor).filter(|&n| n > 0);
    match (scaled(src.width()), scaled(src.height())) {
        (Some(width), Some(height)) if width.checked_mul(height).is_some() => {
            resample(src, width, height, interpolator)
        }
        _ => Err(UpscaleError::InvalidScale { factor }),
    }
}

/// Resamples `src` to `1/factor` of its size, never below one pixel.
///
/// This is how low-resolution inputs are produced for a benchmark run when
/// no pre-downsampled files exist.
///
/// # Errors
/// Returns [`UpscaleError::InvalidScale`] if `factor` is zero.
pub fn downscale_by(
    src: &PixelBuffer,
    factor: usize,
    interpolator: &dyn Interpolator,
) -> Result<PixelBuffer, UpscaleError> {
    if factor == 0 {
        return Err(UpscaleError::InvalidScale { factor });
    }
    resample(
        src,
        (src.width() / factor).max(1),
        (src.height() / factor).max(1),
        interpolator,
    )
}
