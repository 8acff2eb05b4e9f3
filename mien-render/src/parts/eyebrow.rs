//! Eyebrow drawable

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

use mien_core::{DrawContext, Expression, Rect};

use embedded_graphics::Drawable as _;

use crate::canvas::Canvas;
use crate::parts::Drawable;

/// Slant applied to the inner brow end for Angry/Sad, in pixels
const SLANT: i32 = 5;

/// Eyebrow: a horizontal bar, slanted by the expression
///
/// Angry drops the inner end (toward the nose) below the outer end; Sad
/// raises it. All other expressions draw a flat bar.
pub struct Eyebrow {
    width: u32,
    height: u32,
    is_left: bool,
}

impl Eyebrow {
    pub const fn new(width: u32, height: u32, is_left: bool) -> Self {
        Self {
            width,
            height,
            is_left,
        }
    }
}

impl Drawable for Eyebrow {
    fn draw(&self, canvas: &mut Canvas, rect: Rect, ctx: &DrawContext) {
        let x = rect.left();
        let y = rect.top();
        let half = (self.width / 2) as i32;

        let slant = match ctx.expression {
            Expression::Angry => SLANT,
            Expression::Sad => -SLANT,
            _ => 0,
        };

        if slant == 0 {
            Rectangle::new(
                Point::new(x - half, y - (self.height / 2) as i32),
                Size::new(self.width, self.height),
            )
            .into_styled(PrimitiveStyle::with_fill(ctx.palette.primary()))
            .draw(canvas)
            .ok();
            return;
        }

        // The nose-side end is the right end of the right brow and the
        // left end of the left brow.
        let (outer_dy, inner_dy) = (-slant / 2, slant / 2);
        let (left_dy, right_dy) = if self.is_left {
            (inner_dy, outer_dy)
        } else {
            (outer_dy, inner_dy)
        };
        Line::new(
            Point::new(x - half, y + left_dy),
            Point::new(x + half, y + right_dy),
        )
        .into_styled(PrimitiveStyle::with_stroke(
            ctx.palette.primary(),
            self.height,
        ))
        .draw(canvas)
        .ok();
    }
}
