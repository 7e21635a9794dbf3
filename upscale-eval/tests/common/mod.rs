//! Common test utilities for upscale-eval integration tests.

#![allow(dead_code)]

pub mod generators;

use upscale_eval::PixelBuffer;

/// Builds a buffer from generated RGB bytes.
///
/// # Panics
/// Panics if `rgb` doesn't hold `width * height` pixels.
#[track_caller]
pub fn buffer(rgb: &[u8], width: usize, height: usize) -> PixelBuffer {
    PixelBuffer::from_rgb_bytes(rgb, width, height)
        .unwrap_or_else(|e| panic!("bad test buffer {width}x{height}: {e}"))
}
