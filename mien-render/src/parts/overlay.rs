//! Decorative overlays: speech balloon, expression effect, battery icon
//!
//! Overlays ignore the anchor rect they are handed (the compositor
//! passes a shared static reference rect) and position themselves from
//! the canvas dimensions.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle,
};
use embedded_graphics::text::{Baseline, Text};

use mien_core::{BatteryStatus, DrawContext, Expression, Rect};

use embedded_graphics::Drawable as _;

use crate::canvas::Canvas;
use crate::parts::Drawable;

/// Speech balloon along the bottom edge
///
/// Draws nothing while the speech text is empty. The balloon is filled
/// with the primary color and the text set in the background color, so
/// it reads as an inverted bubble in both color depths.
pub struct Balloon;

impl Drawable for Balloon {
    fn draw(&self, canvas: &mut Canvas, _rect: Rect, ctx: &DrawContext) {
        if ctx.speech_text.is_empty() {
            return;
        }
        let font = ctx.speech_font.unwrap_or(&FONT_6X10);
        let pad = 3i32;
        let cw = (font.character_size.width + font.character_spacing) as i32;
        let text_w = ctx.speech_text.len() as i32 * cw;
        let bw = text_w + 2 * pad;
        let bh = font.character_size.height as i32 + 2 * pad;
        let bx = (canvas.width() as i32 - bw) / 2;
        let by = canvas.height() as i32 - bh - 2;

        RoundedRectangle::with_equal_corners(
            Rectangle::new(Point::new(bx, by), Size::new(bw as u32, bh as u32)),
            Size::new(4, 4),
        )
        .into_styled(PrimitiveStyle::with_fill(ctx.palette.primary()))
        .draw(canvas)
        .ok();

        Text::with_baseline(
            &ctx.speech_text,
            Point::new(bx + pad, by + pad),
            MonoTextStyle::new(font, ctx.palette.background()),
            Baseline::Top,
        )
        .draw(canvas)
        .ok();
    }
}

/// Expression accent: anger mark, sweat drop, sleep dots
pub struct Effect;

impl Drawable for Effect {
    fn draw(&self, canvas: &mut Canvas, _rect: Rect, ctx: &DrawContext) {
        let w = canvas.width() as i32;
        let h = canvas.height() as i32;
        let style = PrimitiveStyle::with_stroke(ctx.palette.primary(), 2);

        match ctx.expression {
            Expression::Angry => {
                // Crossed throbbing-vein mark near the temple
                let (cx, cy) = (w * 3 / 4, h / 5);
                Line::new(Point::new(cx - 5, cy - 5), Point::new(cx + 5, cy + 5))
                    .into_styled(style)
                    .draw(canvas)
                    .ok();
                Line::new(Point::new(cx + 5, cy - 5), Point::new(cx - 5, cy + 5))
                    .into_styled(style)
                    .draw(canvas)
                    .ok();
            }
            Expression::Doubt => {
                // Sweat drop sliding down the other temple
                let (cx, cy) = (w / 5, h / 4);
                Circle::with_center(Point::new(cx, cy), 6)
                    .into_styled(PrimitiveStyle::with_fill(ctx.palette.primary()))
                    .draw(canvas)
                    .ok();
                Triangle::new(
                    Point::new(cx - 3, cy - 1),
                    Point::new(cx + 3, cy - 1),
                    Point::new(cx, cy - 8),
                )
                .into_styled(PrimitiveStyle::with_fill(ctx.palette.primary()))
                .draw(canvas)
                .ok();
            }
            Expression::Sleepy => {
                // Rising dots standing in for "zzz"
                for (i, r) in [(0, 2u32), (1, 3), (2, 4)] {
                    let p = Point::new(w * 3 / 4 + i * 8, h / 4 - i * 8);
                    Circle::with_center(p, r * 2)
                        .into_styled(PrimitiveStyle::with_fill(ctx.palette.primary()))
                        .draw(canvas)
                        .ok();
                }
            }
            _ => {}
        }
    }
}

/// Battery status icon in the top-right corner
///
/// Invisible status draws nothing; Unknown draws the outline only;
/// Charging and Discharging fill proportionally to the level (clamped
/// to 0..=100), with a bolt glyph while charging.
pub struct BatteryIcon;

const BODY_W: u32 = 24;
const BODY_H: u32 = 12;

impl Drawable for BatteryIcon {
    fn draw(&self, canvas: &mut Canvas, _rect: Rect, ctx: &DrawContext) {
        if ctx.battery_status == BatteryStatus::Invisible {
            return;
        }
        let x = canvas.width() as i32 - BODY_W as i32 - 6;
        let y = 4i32;
        let primary = ctx.palette.primary();

        Rectangle::new(Point::new(x, y), Size::new(BODY_W, BODY_H))
            .into_styled(PrimitiveStyle::with_stroke(primary, 1))
            .draw(canvas)
            .ok();
        // Terminal nub
        Rectangle::new(
            Point::new(x + BODY_W as i32, y + 3),
            Size::new(2, BODY_H - 6),
        )
        .into_styled(PrimitiveStyle::with_fill(primary))
        .draw(canvas)
        .ok();

        if ctx.battery_status == BatteryStatus::Unknown {
            return;
        }

        let level = ctx.battery_level.clamp(0, 100) as u32;
        let fill = (BODY_W - 4) * level / 100;
        if fill > 0 {
            Rectangle::new(Point::new(x + 2, y + 2), Size::new(fill, BODY_H - 4))
                .into_styled(PrimitiveStyle::with_fill(primary))
                .draw(canvas)
                .ok();
        }

        if ctx.battery_status == BatteryStatus::Charging {
            // Bolt in the background color so it shows over the fill
            let bolt = PrimitiveStyle::with_stroke(ctx.palette.background(), 1);
            let cx = x + BODY_W as i32 / 2;
            let cy = y + BODY_H as i32 / 2;
            Line::new(Point::new(cx + 2, cy - 4), Point::new(cx - 2, cy + 1))
                .into_styled(bolt)
                .draw(canvas)
                .ok();
            Line::new(Point::new(cx + 2, cy - 1), Point::new(cx - 2, cy + 4))
                .into_styled(bolt)
                .draw(canvas)
                .ok();
        }
    }
}
