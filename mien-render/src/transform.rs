//! Rotate/zoom strip sampler
//!
//! Inverse-maps one 8-px destination strip back into the square
//! composite canvas: for each strip pixel, rotate by the negated angle
//! and divide by the scale to find the source sample (nearest neighbor).
//! The pivot is the composite center, shifted up by the strip's vertical
//! position so consecutive strips tile the full transformed image.
//!
//! Angles arrive in degrees and are converted to radians here, exactly
//! once in the whole pipeline.

use embedded_graphics::prelude::*;

use crate::canvas::Canvas;

/// Transform one strip of the composite into `strip`
///
/// `strip` is row-major `dim x strip_height` Rgb565, pre-cleared to the
/// background color; only pixels that sample inside the composite are
/// written. `strip_y` is the strip's vertical offset within the
/// destination placement. `scale` must be positive (the blitter rejects
/// degenerate transforms before calling).
pub fn rotate_zoom_strip(
    src: &Canvas,
    strip: &mut [u16],
    dim: u32,
    strip_height: u32,
    strip_y: u32,
    rotation_deg: f32,
    scale: f32,
) {
    let rad = rotation_deg.to_radians();
    let (sin, cos) = (libm::sinf(rad), libm::cosf(rad));
    let inv = 1.0 / scale;

    // Source pivot: composite center. Destination pivot: the same point,
    // raised by strip_y so row 0 of this strip continues where the
    // previous strip stopped.
    let center = dim as f32 * 0.5;
    let pivot_y = center - strip_y as f32;

    for dy in 0..strip_height {
        let vy = dy as f32 + 0.5 - pivot_y;
        for dx in 0..dim {
            let vx = dx as f32 + 0.5 - center;
            let sx = (cos * vx + sin * vy) * inv + center;
            let sy = (cos * vy - sin * vx) * inv + center;
            if sx < 0.0 || sy < 0.0 {
                continue;
            }
            if let Some(color) = src.get_pixel(sx as i32, sy as i32) {
                strip[(dy * dim + dx) as usize] = color.into_storage();
            }
        }
    }
}
