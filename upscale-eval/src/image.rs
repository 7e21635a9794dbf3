//! Image buffer types.
//!
//! [`PixelBuffer`] is the 8-bit RGB grid that resampling reads and writes and
//! that the metrics compare. [`Plane`] is a single-channel `f64` grid used for
//! the intermediate statistics of the metrics engine.

use std::ops::{Index, IndexMut};

use imgref::{ImgRef, ImgVec};
use rgb::RGB8;

use crate::UpscaleError;

#[inline]
fn is_gray(px: RGB8) -> bool {
    px.r == px.g && px.g == px.b
}

/// Row-major grid of 8-bit RGB pixels.
///
/// The buffer always holds exactly `width * height` pixels and both
/// dimensions are non-zero. It is never resized; resampling produces a new
/// buffer. Whether every pixel is gray (all three channels equal) is decided
/// at construction and tracked through [`set`](Self::set), so the metrics can
/// branch on it without rescanning.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    img: ImgVec<RGB8>,
    /// Number of pixels whose channels differ.
    non_gray: usize,
}

impl PixelBuffer {
    /// Creates a black buffer.
    ///
    /// # Errors
    /// Returns [`UpscaleError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, UpscaleError> {
        Self::filled(width, height, RGB8::new(0, 0, 0))
    }

    /// Creates a buffer where every pixel has the same value.
    ///
    /// # Errors
    /// Returns [`UpscaleError::InvalidDimensions`] if either dimension is zero.
    pub fn filled(width: usize, height: usize, value: RGB8) -> Result<Self, UpscaleError> {
        check_dimensions(width, height)?;
        Ok(Self::from_vec_unchecked(
            vec![value; width * height],
            width,
            height,
        ))
    }

    /// Creates a buffer from row-major pixels.
    ///
    /// # Errors
    /// Returns an error if a dimension is zero or `pixels.len() != width * height`.
    pub fn from_pixels(pixels: Vec<RGB8>, width: usize, height: usize) -> Result<Self, UpscaleError> {
        check_dimensions(width, height)?;
        let expected = width * height;
        if pixels.len() != expected {
            return Err(UpscaleError::InvalidBufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self::from_vec_unchecked(pixels, width, height))
    }

    /// Creates a buffer from interleaved `RGBRGB...` bytes.
    ///
    /// # Errors
    /// Returns an error if a dimension is zero or `rgb.len() != width * height * 3`.
    pub fn from_rgb_bytes(rgb: &[u8], width: usize, height: usize) -> Result<Self, UpscaleError> {
        check_dimensions(width, height)?;
        let expected = width * height * 3;
        if rgb.len() != expected {
            return Err(UpscaleError::InvalidBufferSize {
                expected,
                actual: rgb.len(),
            });
        }
        let pixels = rgb
            .chunks_exact(3)
            .map(|c| RGB8::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self::from_vec_unchecked(pixels, width, height))
    }

    /// Takes ownership of an `ImgVec`, dropping any row padding.
    ///
    /// # Errors
    /// Returns [`UpscaleError::InvalidDimensions`] if the image is empty.
    pub fn from_img(img: ImgVec<RGB8>) -> Result<Self, UpscaleError> {
        let (width, height) = (img.width(), img.height());
        check_dimensions(width, height)?;
        if img.stride() == width && img.buf().len() == width * height {
            let non_gray = count_non_gray(img.buf());
            return Ok(Self { img, non_gray });
        }
        let pixels: Vec<RGB8> = img.as_ref().rows().flatten().copied().collect();
        Ok(Self::from_vec_unchecked(pixels, width, height))
    }

    pub(crate) fn from_vec_unchecked(pixels: Vec<RGB8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        let non_gray = count_non_gray(&pixels);
        Self {
            img: ImgVec::new(pixels, width, height),
            non_gray,
        }
    }

    /// Buffer width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Buffer height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Gets the pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the buffer.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> RGB8 {
        assert!(x < self.width() && y < self.height());
        self.img.buf()[y * self.width() + x]
    }

    /// Sets the pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the buffer.
    pub fn set(&mut self, x: usize, y: usize, value: RGB8) {
        assert!(x < self.width() && y < self.height());
        let idx = y * self.width() + x;
        let old = self.img.buf()[idx];
        match (is_gray(old), is_gray(value)) {
            (true, false) => self.non_gray += 1,
            (false, true) => self.non_gray -= 1,
            _ => {}
        }
        self.img.buf_mut()[idx] = value;
    }

    /// Returns one row of pixels.
    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> &[RGB8] {
        let start = y * self.width();
        &self.img.buf()[start..start + self.width()]
    }

    /// All pixels in row-major order.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[RGB8] {
        self.img.buf()
    }

    /// Borrows the buffer as an `ImgRef`.
    #[must_use]
    pub fn as_img(&self) -> ImgRef<'_, RGB8> {
        self.img.as_ref()
    }

    /// Consumes the buffer, returning the underlying `ImgVec`.
    #[must_use]
    pub fn into_img(self) -> ImgVec<RGB8> {
        self.img
    }

    /// Interleaved `RGBRGB...` bytes, row-major.
    #[must_use]
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels().len() * 3);
        for px in self.pixels() {
            out.extend_from_slice(&[px.r, px.g, px.b]);
        }
        out
    }

    /// True when every pixel has equal R, G and B values.
    #[inline]
    #[must_use]
    pub fn is_grayscale(&self) -> bool {
        self.non_gray == 0
    }

    /// Extracts one channel (0 = R, 1 = G, 2 = B) as a floating-point plane.
    ///
    /// # Panics
    /// Panics if `channel > 2`.
    #[must_use]
    pub fn channel_plane(&self, channel: usize) -> Plane {
        let data = match channel {
            0 => self.pixels().iter().map(|p| f64::from(p.r)).collect(),
            1 => self.pixels().iter().map(|p| f64::from(p.g)).collect(),
            2 => self.pixels().iter().map(|p| f64::from(p.b)).collect(),
            _ => panic!("channel index {channel} out of range"),
        };
        Plane::from_vec(data, self.width(), self.height())
    }

    /// Checks if two buffers have the same dimensions.
    #[must_use]
    pub fn same_size(&self, other: &Self) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }
}

impl PartialEq for PixelBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.same_size(other) && self.pixels() == other.pixels()
    }
}

impl Eq for PixelBuffer {}

fn check_dimensions(width: usize, height: usize) -> Result<(), UpscaleError> {
    if width == 0 || height == 0 {
        return Err(UpscaleError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn count_non_gray(pixels: &[RGB8]) -> usize {
    pixels.iter().filter(|&&p| !is_gray(p)).count()
}

/// Single-channel floating point image.
///
/// Holds the per-pixel intensities and local moments the metrics work on.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    data: Vec<f64>,
    width: usize,
    height: usize,
}

impl Plane {
    /// Creates a new plane filled with zeros.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0.0)
    }

    /// Creates a plane filled with a constant value.
    #[must_use]
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Creates a plane from existing row-major data.
    ///
    /// # Panics
    /// Panics if data length doesn't match width * height.
    #[must_use]
    pub fn from_vec(data: Vec<f64>, width: usize, height: usize) -> Self {
        assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Plane width.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns a reference to a row.
    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> &[f64] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Returns a mutable reference to a row.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f64] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    /// Value at `(x, y)`.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    /// Overwrites the value at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.data[y * self.width + x] = value;
    }

    /// Returns the raw data as a slice.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Checks if two planes have the same dimensions.
    #[must_use]
    pub fn same_size(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Elementwise product of two planes.
    ///
    /// # Panics
    /// Panics if dimensions don't match.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        assert!(self.same_size(other));
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a * b)
            .collect();
        Self::from_vec(data, self.width, self.height)
    }

    /// Elementwise square.
    #[must_use]
    pub fn square(&self) -> Self {
        self.mul(self)
    }
}

impl Index<(usize, usize)> for Plane {
    type Output = f64;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.data[y * self.width + x]
    }
}

impl IndexMut<(usize, usize)> for Plane {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        &mut self.data[y * self.width + x]
    }
}
