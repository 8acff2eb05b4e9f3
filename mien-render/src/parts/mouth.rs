//! Mouth drawable

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use mien_core::{DrawContext, Rect};

use embedded_graphics::Drawable as _;

use crate::canvas::Canvas;
use crate::parts::Drawable;

/// Mouth: a filled bar that widens and opens with `mouth_open`
///
/// Width and height interpolate linearly between the min and max
/// dimensions as the open ratio goes 0 -> 1. The anchor is the mouth
/// center.
pub struct Mouth {
    min_width: u32,
    max_width: u32,
    min_height: u32,
    max_height: u32,
}

impl Mouth {
    pub const fn new(min_width: u32, max_width: u32, min_height: u32, max_height: u32) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }
}

impl Drawable for Mouth {
    fn draw(&self, canvas: &mut Canvas, rect: Rect, ctx: &DrawContext) {
        let open = ctx.mouth_open;
        let w = self.min_width as f32 + self.max_width.saturating_sub(self.min_width) as f32 * open;
        let h =
            self.min_height as f32 + self.max_height.saturating_sub(self.min_height) as f32 * open;
        let (w, h) = (w as u32, h as u32);
        if w == 0 || h == 0 {
            return;
        }
        let x = rect.left() - (w / 2) as i32;
        let y = rect.top() - (h / 2) as i32;
        Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_fill(ctx.palette.primary()))
            .draw(canvas)
            .ok();
    }
}
