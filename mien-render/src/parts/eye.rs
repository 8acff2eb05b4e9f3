//! Eye drawable

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle};

use mien_core::{DrawContext, Expression, Gaze, Rect};

use embedded_graphics::Drawable as _;

use crate::canvas::Canvas;
use crate::parts::Drawable;

/// Pixels of pupil travel per unit of gaze
const GAZE_TRAVEL: f32 = 3.0;

/// Eye: a filled circle that follows the gaze, or a thin bar when shut
pub struct Eye {
    radius: u32,
    is_left: bool,
}

impl Eye {
    pub const fn new(radius: u32, is_left: bool) -> Self {
        Self { radius, is_left }
    }

    fn gaze_of(&self, ctx: &DrawContext) -> Gaze {
        if self.is_left {
            ctx.left_gaze
        } else {
            ctx.right_gaze
        }
    }

    fn open_ratio_of(&self, ctx: &DrawContext) -> f32 {
        if self.is_left {
            ctx.left_eye_open
        } else {
            ctx.right_eye_open
        }
    }
}

impl Drawable for Eye {
    fn draw(&self, canvas: &mut Canvas, rect: Rect, ctx: &DrawContext) {
        let gaze = self.gaze_of(ctx);
        let x = rect.left() + (gaze.horizontal * GAZE_TRAVEL) as i32;
        let y = rect.top() + (gaze.vertical * GAZE_TRAVEL) as i32;

        // A sleepy face keeps its eyes shut no matter what the blink
        // driver last wrote.
        let open = self.open_ratio_of(ctx);
        let shut = open < 0.5 || ctx.expression == Expression::Sleepy;

        let style = PrimitiveStyle::with_fill(ctx.palette.primary());
        if shut {
            let w = self.radius * 2;
            Rectangle::new(Point::new(x - self.radius as i32, y - 2), Size::new(w, 4))
                .into_styled(style)
                .draw(canvas)
                .ok();
        } else {
            Circle::with_center(Point::new(x, y), self.radius * 2)
                .into_styled(style)
                .draw(canvas)
                .ok();
        }
    }
}
