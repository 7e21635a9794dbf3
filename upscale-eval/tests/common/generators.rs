//! Shared image generation functions for upscale-eval tests.
//!
//! These produce deterministic synthetic images using an LCG PRNG,
//! ensuring identical test inputs across all platforms.

// ============================================================================
// LCG PRNG
// ============================================================================

/// LCG pseudo-random number generator (deterministic)
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u8(&mut self) -> u8 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.state >> 33) & 0xFF) as u8
    }
}

// ============================================================================
// Image Generation Functions
// ============================================================================

/// Generate uniform color image
pub fn gen_uniform(width: usize, height: usize, r: u8, g: u8, b: u8) -> Vec<u8> {
    [r, g, b].repeat(width * height)
}

/// Generate RGB color gradient (red along x, green along y)
pub fn gen_color_gradient(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let r = if width > 1 {
                (x * 255 / (width - 1)) as u8
            } else {
                128
            };
            let g = if height > 1 {
                (y * 255 / (height - 1)) as u8
            } else {
                128
            };
            data.extend_from_slice(&[r, g, 64]);
        }
    }
    data
}

/// Generate diagonal gradient (grayscale)
pub fn gen_gradient_diag(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    let max_dist = width + height - 2;
    for y in 0..height {
        for x in 0..width {
            let val = if max_dist > 0 {
                ((x + y) * 255 / max_dist) as u8
            } else {
                128
            };
            data.extend_from_slice(&[val, val, val]);
        }
    }
    data
}

/// Generate checkerboard pattern (grayscale)
pub fn gen_checkerboard(width: usize, height: usize, block_size: usize, lo: u8, hi: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let checker = ((x / block_size) + (y / block_size)) % 2 == 0;
            let val = if checker { hi } else { lo };
            data.extend_from_slice(&[val, val, val]);
        }
    }
    data
}

/// Generate random color noise
pub fn gen_noise(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = Lcg::new(seed);
    (0..width * height * 3).map(|_| rng.next_u8()).collect()
}

// ============================================================================
// Distortion Functions
// ============================================================================

/// Add a bounded random offset to every channel
pub fn add_noise(rgb: &[u8], amplitude: u8, seed: u64) -> Vec<u8> {
    let mut rng = Lcg::new(seed);
    let span = i16::from(amplitude) * 2 + 1;
    rgb.iter()
        .map(|&v| {
            let offset = i16::from(rng.next_u8()) % span - i16::from(amplitude);
            (i16::from(v) + offset).clamp(0, 255) as u8
        })
        .collect()
}

/// Shift all channels by a constant amount (clamped)
pub fn brighten(rgb: &[u8], amount: u8) -> Vec<u8> {
    rgb.iter().map(|&v| v.saturating_add(amount)).collect()
}
