//! Strip transform blitter
//!
//! The device cannot hold two full frames (composite + transformed) at
//! once, so the final rotate/zoom happens in fixed-height horizontal
//! strips: transform one strip, start its transfer, let the DMA run
//! while yielding to other tasks, wait for completion, move on. Peak
//! transform memory is `dim x 8` pixels instead of a second `dim x dim`
//! frame.

use alloc::vec::Vec;

use embassy_time::Timer;
use embedded_graphics::prelude::*;

use mien_core::{DrawContext, Rect};

use crate::canvas::Canvas;
use crate::display::DisplayBackend;
use crate::transform::rotate_zoom_strip;
use crate::RenderError;

/// Strip height in pixels
pub const STRIP_HEIGHT: u32 = 8;

/// Owns the reusable strip buffer and streams transformed strips out
///
/// The strip is allocated lazily on first use and kept across frames in
/// the destination's native 16-bit depth, which is what the fast
/// transfer path wants.
pub struct StripBlitter {
    strip: Vec<u16>,
    strip_dim: u32,
}

impl StripBlitter {
    pub const fn new() -> Self {
        Self {
            strip: Vec::new(),
            strip_dim: 0,
        }
    }

    /// Ensure the strip buffer holds `dim x STRIP_HEIGHT` pixels
    fn reserve(&mut self, dim: u32) -> Result<(), RenderError> {
        let len = (dim * STRIP_HEIGHT) as usize;
        if self.strip_dim != dim {
            self.strip.clear();
            self.strip
                .try_reserve_exact(len)
                .map_err(|_| RenderError::OutOfMemory)?;
            self.strip.resize(len, 0);
            self.strip_dim = dim;
        }
        Ok(())
    }

    /// Transform the composite and present it on the display
    ///
    /// `bounding` provides the destination placement and size; the
    /// composite is the oversized `dim x dim` square, so each strip is
    /// pushed with a centering offset of `(dim - size) / 2` per axis.
    /// The final strip may overhang the bottom edge; the backend clips.
    pub async fn present<D: DisplayBackend>(
        &mut self,
        display: &mut D,
        composite: &Canvas,
        bounding: &Rect,
        ctx: &DrawContext,
    ) -> Result<(), RenderError> {
        if bounding.is_empty() {
            return Err(RenderError::EmptyBounds);
        }
        if !(ctx.scale > 0.0) {
            return Err(RenderError::BadTransform);
        }
        let dim = composite.width();
        self.reserve(dim)?;

        let background = ctx.palette.background().into_storage();
        let offset_x = bounding.left() + (dim.saturating_sub(bounding.width()) / 2) as i32;
        let offset_y = bounding.top() + (dim.saturating_sub(bounding.height()) / 2) as i32;

        let mut y = 0u32;
        while y < bounding.height() {
            self.strip.fill(background);
            rotate_zoom_strip(
                composite,
                &mut self.strip,
                dim,
                STRIP_HEIGHT,
                y,
                ctx.rotation,
                ctx.scale,
            );

            display
                .begin_write()
                .await
                .map_err(RenderError::Display)?;
            let pushed = display
                .push_strip(
                    offset_x,
                    offset_y + y as i32,
                    dim,
                    STRIP_HEIGHT,
                    &self.strip,
                )
                .await;
            // Let the transfer run while other tasks get CPU time.
            Timer::after_millis(1).await;
            let ended = display.end_write().await;

            pushed.map_err(RenderError::Display)?;
            ended.map_err(RenderError::Display)?;

            y += STRIP_HEIGHT;
        }
        Ok(())
    }

    /// Whether the lazily-created strip buffer currently exists
    pub fn has_buffer(&self) -> bool {
        !self.strip.is_empty()
    }
}

impl Default for StripBlitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DisplayError;
    use embassy_futures::block_on;
    use mien_core::{ColorDepth, ColorPalette};

    extern crate std;

    /// Records the transaction/strip sequence it is handed
    struct MockDisplay {
        strips: std::vec::Vec<(i32, i32, u32, u32)>,
        open: bool,
        begins: u32,
        ends: u32,
    }

    impl MockDisplay {
        fn new() -> Self {
            Self {
                strips: std::vec::Vec::new(),
                open: false,
                begins: 0,
                ends: 0,
            }
        }
    }

    impl DisplayBackend for MockDisplay {
        fn dimensions(&self) -> (u32, u32) {
            (320, 240)
        }

        async fn begin_write(&mut self) -> Result<(), DisplayError> {
            assert!(!self.open, "nested write transaction");
            self.open = true;
            self.begins += 1;
            Ok(())
        }

        async fn push_strip(
            &mut self,
            left: i32,
            top: i32,
            width: u32,
            height: u32,
            pixels: &[u16],
        ) -> Result<(), DisplayError> {
            assert!(self.open, "push outside transaction");
            assert_eq!(pixels.len(), (width * height) as usize);
            self.strips.push((left, top, width, height));
            Ok(())
        }

        async fn end_write(&mut self) -> Result<(), DisplayError> {
            assert!(self.open, "end without begin");
            self.open = false;
            self.ends += 1;
            Ok(())
        }
    }

    fn ctx() -> DrawContext {
        DrawContext::default()
    }

    #[test]
    fn test_strip_rows_cover_height() {
        let composite =
            Canvas::new(20, 20, ColorDepth::Mono1, ColorPalette::default()).unwrap();
        let bounding = Rect::new(0, 0, 20, 20);
        let mut blitter = StripBlitter::new();
        let mut display = MockDisplay::new();

        block_on(blitter.present(&mut display, &composite, &bounding, &ctx())).unwrap();

        // H=20 is not a multiple of 8: strips start at 0, 8, 16.
        let tops: std::vec::Vec<i32> = display.strips.iter().map(|s| s.1).collect();
        assert_eq!(tops, std::vec![0, 8, 16]);
        assert_eq!(display.begins, 3);
        assert_eq!(display.ends, 3);
    }

    #[test]
    fn test_exact_multiple_runs_h_over_8_strips() {
        let composite =
            Canvas::new(24, 24, ColorDepth::Mono1, ColorPalette::default()).unwrap();
        let bounding = Rect::new(0, 0, 24, 24);
        let mut blitter = StripBlitter::new();
        let mut display = MockDisplay::new();

        block_on(blitter.present(&mut display, &composite, &bounding, &ctx())).unwrap();
        assert_eq!(display.strips.len(), 3);
    }

    #[test]
    fn test_centering_offsets() {
        // 32x16 bounding => dim 32; vertical centering (32-16)/2 = 8.
        let composite =
            Canvas::new(32, 32, ColorDepth::Mono1, ColorPalette::default()).unwrap();
        let bounding = Rect::new(10, 5, 32, 16);
        let mut blitter = StripBlitter::new();
        let mut display = MockDisplay::new();

        block_on(blitter.present(&mut display, &composite, &bounding, &ctx())).unwrap();

        let (left, top, w, h) = display.strips[0];
        assert_eq!(left, 5);
        assert_eq!(top, 10 + 8);
        assert_eq!((w, h), (32, STRIP_HEIGHT));
    }

    #[test]
    fn test_empty_bounds_skips_everything() {
        let composite =
            Canvas::new(16, 16, ColorDepth::Mono1, ColorPalette::default()).unwrap();
        let bounding = Rect::new(0, 0, 0, 16);
        let mut blitter = StripBlitter::new();
        let mut display = MockDisplay::new();

        let r = block_on(blitter.present(&mut display, &composite, &bounding, &ctx()));
        assert_eq!(r, Err(RenderError::EmptyBounds));
        assert!(display.strips.is_empty());
        assert!(!blitter.has_buffer());
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        let composite =
            Canvas::new(16, 16, ColorDepth::Mono1, ColorPalette::default()).unwrap();
        let bounding = Rect::new(0, 0, 16, 16);
        let mut blitter = StripBlitter::new();
        let mut display = MockDisplay::new();

        let mut c = ctx();
        c.scale = 0.0;
        let r = block_on(blitter.present(&mut display, &composite, &bounding, &c));
        assert_eq!(r, Err(RenderError::BadTransform));
    }

    #[test]
    fn test_strip_buffer_reused_across_frames() {
        let composite =
            Canvas::new(16, 16, ColorDepth::Mono1, ColorPalette::default()).unwrap();
        let bounding = Rect::new(0, 0, 16, 16);
        let mut blitter = StripBlitter::new();
        let mut display = MockDisplay::new();

        block_on(blitter.present(&mut display, &composite, &bounding, &ctx())).unwrap();
        let ptr = blitter.strip.as_ptr();
        block_on(blitter.present(&mut display, &composite, &bounding, &ctx())).unwrap();
        assert_eq!(ptr, blitter.strip.as_ptr());
    }
}
