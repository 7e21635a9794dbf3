//! Interpolation kernels.
//!
//! A kernel produces one output pixel from fractional source coordinates.
//! Coordinates may fall outside the source; kernels clamp every sample to
//! `[0, width-1] x [0, height-1]`, replicating the border pixel.

use std::fmt;
use std::str::FromStr;

use rgb::RGB8;

use crate::consts::CATMULL_ROM_A;
use crate::image::PixelBuffer;

/// Samples a [`PixelBuffer`] at fractional coordinates.
///
/// Implementations are stateless, so one instance can drive any number of
/// concurrent resamples.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated pixel at source position `(x, y)`.
    fn interpolate(&self, src: &PixelBuffer, x: f32, y: f32) -> RGB8;

    /// Short lowercase name used in reports.
    fn name(&self) -> &'static str;
}

/// Rounds and clamps a channel intensity to 8 bits.
#[inline]
fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Clamps a possibly out-of-range sample index to `[0, len-1]`.
#[inline]
fn clamp_index(i: i64, len: usize) -> usize {
    i.clamp(0, len as i64 - 1) as usize
}

/// Bilinear blend of the four nearest source pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bilinear;

impl Interpolator for Bilinear {
    fn interpolate(&self, src: &PixelBuffer, x: f32, y: f32) -> RGB8 {
        let max_x = (src.width() - 1) as f32;
        let max_y = (src.height() - 1) as f32;
        let x = x.clamp(0.0, max_x);
        let y = y.clamp(0.0, max_y);

        let x1 = x.floor() as usize;
        let y1 = y.floor() as usize;
        let x2 = (x1 + 1).min(src.width() - 1);
        let y2 = (y1 + 1).min(src.height() - 1);
        let dx = f64::from(x - x1 as f32);
        let dy = f64::from(y - y1 as f32);

        let p11 = src.get(x1, y1);
        let p21 = src.get(x2, y1);
        let p12 = src.get(x1, y2);
        let p22 = src.get(x2, y2);

        let w11 = (1.0 - dx) * (1.0 - dy);
        let w21 = dx * (1.0 - dy);
        let w12 = (1.0 - dx) * dy;
        let w22 = dx * dy;

        let blend = |c11: u8, c21: u8, c12: u8, c22: u8| {
            to_u8(
                f64::from(c11) * w11
                    + f64::from(c21) * w21
                    + f64::from(c12) * w12
                    + f64::from(c22) * w22,
            )
        };

        RGB8::new(
            blend(p11.r, p21.r, p12.r, p22.r),
            blend(p11.g, p21.g, p12.g, p22.g),
            blend(p11.b, p21.b, p12.b, p22.b),
        )
    }

    fn name(&self) -> &'static str {
        "bilinear"
    }
}

/// Catmull-Rom cubic weight (`a = -0.5`).
///
/// ```text
/// W(t) = (a+2)|t|^3 - (a+3)|t|^2 + 1         |t| <= 1
/// W(t) = a|t|^3 - 5a|t|^2 + 8a|t| - 4a       1 < |t| < 2
/// W(t) = 0                                   |t| >= 2
/// ```
#[must_use]
pub fn cubic_weight(t: f64) -> f64 {
    let a = CATMULL_ROM_A;
    let t = t.abs();
    if t <= 1.0 {
        (a + 2.0) * t * t * t - (a + 3.0) * t * t + 1.0
    } else if t < 2.0 {
        a * t * t * t - 5.0 * a * t * t + 8.0 * a * t - 4.0 * a
    } else {
        0.0
    }
}

/// Bicubic interpolation over a 4x4 neighborhood with the Catmull-Rom kernel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bicubic;

/// Neighborhood offsets relative to `floor(x)` / `floor(y)`.
const TAPS: [i64; 4] = [-1, 0, 1, 2];

impl Interpolator for Bicubic {
    fn interpolate(&self, src: &PixelBuffer, x: f32, y: f32) -> RGB8 {
        // Past two pixels beyond an edge every tap already lands on that edge
        let x = x.clamp(-2.0, src.width() as f32 + 1.0);
        let y = y.clamp(-2.0, src.height() as f32 + 1.0);
        let fx = x.floor();
        let fy = y.floor();
        let dx = f64::from(x - fx);
        let dy = f64::from(y - fy);
        let ix = fx as i64;
        let iy = fy as i64;

        // Per-axis weights and clamped sample positions
        let mut wx = [0.0f64; 4];
        let mut wy = [0.0f64; 4];
        let mut sx = [0usize; 4];
        let mut sy = [0usize; 4];
        for (k, &off) in TAPS.iter().enumerate() {
            wx[k] = cubic_weight(dx - off as f64);
            wy[k] = cubic_weight(dy - off as f64);
            sx[k] = clamp_index(ix + off, src.width());
            sy[k] = clamp_index(iy + off, src.height());
        }

        let mut sum = [0.0f64; 3];
        for i in 0..4 {
            let row = src.row(sy[i]);
            for j in 0..4 {
                let weight = wx[j] * wy[i];
                let p = row[sx[j]];
                sum[0] += f64::from(p.r) * weight;
                sum[1] += f64::from(p.g) * weight;
                sum[2] += f64::from(p.b) * weight;
            }
        }

        RGB8::new(to_u8(sum[0]), to_u8(sum[1]), to_u8(sum[2]))
    }

    fn name(&self) -> &'static str {
        "bicubic"
    }
}

/// Kernel selection as a plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    Bilinear,
    Bicubic,
}

impl Kernel {
    /// Every available kernel, in report order.
    pub const ALL: [Kernel; 2] = [Kernel::Bilinear, Kernel::Bicubic];
}

impl Interpolator for Kernel {
    #[inline]
    fn interpolate(&self, src: &PixelBuffer, x: f32, y: f32) -> RGB8 {
        match self {
            Kernel::Bilinear => Bilinear.interpolate(src, x, y),
            Kernel::Bicubic => Bicubic.interpolate(src, x, y),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Kernel::Bilinear => Bilinear.name(),
            Kernel::Bicubic => Bicubic.name(),
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kernel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bilinear" => Ok(Kernel::Bilinear),
            "bicubic" => Ok(Kernel::Bicubic),
            other => Err(format!(
                "unknown kernel '{other}' (expected bilinear or bicubic)"
            )),
        }
    }
}
