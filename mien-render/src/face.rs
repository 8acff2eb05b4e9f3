//! Face compositor
//!
//! Owns the five part drawables, their anchor rects, and the strip
//! blitter. One frame = lay the parts out (shifted by the breathing
//! displacement), draw them into a fresh square composite canvas, draw
//! the overlays, then hand the composite to the blitter.
//!
//! The composite is square with side `max(width, height)` so an
//! arbitrary rotation can never clip the face; it is allocated per frame
//! and dropped when the frame is done, while the strip buffer persists
//! inside the blitter.

use alloc::boxed::Box;

use mien_core::{DrawContext, FaceConfig, FaceLayout, Rect};

use crate::blit::StripBlitter;
use crate::canvas::Canvas;
use crate::display::DisplayBackend;
use crate::parts::{Balloon, BatteryIcon, Drawable, Effect, Eye, Eyebrow, Mouth};
use crate::RenderError;

/// Shared static reference rect handed to the overlays
const OVERLAY_RECT: Rect = Rect::new(0, 0, 0, 0);

/// Vertical part displacement for a breath value, in pixels
///
/// Only the upper bound saturates; a negative breath pushes the parts
/// up unclamped.
pub fn breath_displacement(breath: f32) -> f32 {
    breath.min(1.0) * 3.0
}

/// The face: five parts, three overlays, a bounding rect, a blitter
pub struct Face {
    mouth: Box<dyn Drawable + Send>,
    right_eye: Box<dyn Drawable + Send>,
    left_eye: Box<dyn Drawable + Send>,
    right_eyebrow: Box<dyn Drawable + Send>,
    left_eyebrow: Box<dyn Drawable + Send>,
    balloon: Balloon,
    effect: Effect,
    battery: BatteryIcon,
    mouth_pos: Rect,
    right_eye_pos: Rect,
    left_eye_pos: Rect,
    right_eyebrow_pos: Rect,
    left_eyebrow_pos: Rect,
    bounding: Rect,
    blitter: StripBlitter,
}

impl Face {
    /// Build a face with the default part set for `config`
    pub fn new(config: FaceConfig) -> Self {
        let layout = config.build();
        Self {
            mouth: Box::new(Mouth::new(
                config.mouth_min_width,
                config.mouth_max_width,
                config.mouth_min_height,
                config.mouth_max_height,
            )),
            right_eye: Box::new(Eye::new(config.eye_radius, false)),
            left_eye: Box::new(Eye::new(config.eye_radius, true)),
            right_eyebrow: Box::new(Eyebrow::new(
                config.eyebrow_width,
                config.eyebrow_height,
                false,
            )),
            left_eyebrow: Box::new(Eyebrow::new(
                config.eyebrow_width,
                config.eyebrow_height,
                true,
            )),
            balloon: Balloon,
            effect: Effect,
            battery: BatteryIcon,
            mouth_pos: layout.mouth,
            right_eye_pos: layout.right_eye,
            left_eye_pos: layout.left_eye,
            right_eyebrow_pos: layout.right_eyebrow,
            left_eyebrow_pos: layout.left_eyebrow,
            bounding: layout.bounding,
            blitter: StripBlitter::new(),
        }
    }

    /// Build a face from a finished layout, keeping the default parts
    pub fn from_layout(layout: FaceLayout) -> Self {
        let mut face = Self::new(layout.config);
        face.mouth_pos = layout.mouth;
        face.right_eye_pos = layout.right_eye;
        face.left_eye_pos = layout.left_eye;
        face.right_eyebrow_pos = layout.right_eyebrow;
        face.left_eyebrow_pos = layout.left_eyebrow;
        face.bounding = layout.bounding;
        face
    }

    /// Replace the mouth drawable
    pub fn set_mouth(&mut self, mouth: Box<dyn Drawable + Send>) {
        self.mouth = mouth;
    }

    /// Replace the right eye drawable
    pub fn set_right_eye(&mut self, eye: Box<dyn Drawable + Send>) {
        self.right_eye = eye;
    }

    /// Replace the left eye drawable
    pub fn set_left_eye(&mut self, eye: Box<dyn Drawable + Send>) {
        self.left_eye = eye;
    }

    pub fn bounding_rect(&self) -> &Rect {
        &self.bounding
    }

    /// Move the face placement on the display
    pub fn set_position(&mut self, top: i32, left: i32) {
        self.bounding.set_position(top, left);
    }

    /// Record the display rotation on the bounding rect, degrees
    pub fn set_rotation(&mut self, degrees: f32) {
        self.bounding.set_rotation(degrees);
    }

    /// Draw one frame into a fresh composite canvas
    pub fn compose(&self, ctx: &DrawContext) -> Result<Canvas, RenderError> {
        if self.bounding.is_empty() {
            return Err(RenderError::EmptyBounds);
        }
        let dim = self.bounding.width().max(self.bounding.height());
        let mut canvas = Canvas::new(dim, dim, ctx.color_depth, ctx.palette)?;

        let lift = breath_displacement(ctx.breath);
        let place = |pos: &Rect| {
            let mut r = *pos;
            r.set_position((pos.top() as f32 + lift) as i32, pos.left());
            r
        };

        // Fixed order; later parts may overlap earlier ones.
        self.mouth.draw(&mut canvas, place(&self.mouth_pos), ctx);
        self.right_eye.draw(&mut canvas, place(&self.right_eye_pos), ctx);
        self.left_eye.draw(&mut canvas, place(&self.left_eye_pos), ctx);
        self.right_eyebrow
            .draw(&mut canvas, place(&self.right_eyebrow_pos), ctx);
        self.left_eyebrow
            .draw(&mut canvas, place(&self.left_eyebrow_pos), ctx);

        self.balloon.draw(&mut canvas, OVERLAY_RECT, ctx);
        self.effect.draw(&mut canvas, OVERLAY_RECT, ctx);
        self.battery.draw(&mut canvas, OVERLAY_RECT, ctx);
        Ok(canvas)
    }

    /// Compose and present one frame
    pub async fn draw<D: DisplayBackend>(
        &mut self,
        display: &mut D,
        ctx: &DrawContext,
    ) -> Result<(), RenderError> {
        let composite = self.compose(ctx)?;
        self.blitter
            .present(display, &composite, &self.bounding, ctx)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::RgbColor;
    use mien_core::{ColorDepth, ColorPalette};

    extern crate std;
    use std::sync::{Arc, Mutex};
    use std::vec::Vec;

    /// Test drawable that records the rect it was handed
    struct Probe {
        name: &'static str,
        log: Arc<Mutex<Vec<(&'static str, i32)>>>,
    }

    impl Drawable for Probe {
        fn draw(&self, _canvas: &mut Canvas, rect: Rect, _ctx: &DrawContext) {
            self.log.lock().unwrap().push((self.name, rect.top()));
        }
    }

    fn probed_face() -> (Face, Arc<Mutex<Vec<(&'static str, i32)>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut face = Face::new(FaceConfig::new(320, 240));
        let probe = |name| {
            Box::new(Probe {
                name,
                log: log.clone(),
            })
        };
        face.set_mouth(probe("mouth"));
        face.set_right_eye(probe("right_eye"));
        face.set_left_eye(probe("left_eye"));
        (face, log)
    }

    #[test]
    fn test_breath_displacement_saturates_upper_bound() {
        assert_eq!(breath_displacement(0.0), 0.0);
        assert_eq!(breath_displacement(0.5), 1.5);
        assert_eq!(breath_displacement(1.0), 3.0);
        assert_eq!(breath_displacement(2.5), 3.0);
        // Lower bound deliberately unclamped
        assert_eq!(breath_displacement(-1.0), -3.0);
    }

    #[test]
    fn test_compose_rejects_empty_bounds() {
        let mut face = Face::new(FaceConfig::new(320, 240));
        face.bounding.set_size(0, 240);
        assert!(matches!(
            face.compose(&DrawContext::default()),
            Err(RenderError::EmptyBounds)
        ));
    }

    #[test]
    fn test_empty_bounds_skips_part_draw() {
        let (mut face, log) = probed_face();
        face.bounding.set_size(320, 0);
        let _ = face.compose(&DrawContext::default());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_composite_is_square_of_max_dimension() {
        let face = Face::new(FaceConfig::new(320, 240));
        let canvas = face.compose(&DrawContext::default()).unwrap();
        assert_eq!(canvas.width(), 320);
        assert_eq!(canvas.height(), 320);
    }

    #[test]
    fn test_part_draw_order() {
        let (face, log) = probed_face();
        face.compose(&DrawContext::default()).unwrap();
        let names: Vec<&str> = log.lock().unwrap().iter().map(|e| e.0).collect();
        assert_eq!(names, ["mouth", "right_eye", "left_eye"]);
    }

    #[test]
    fn test_breath_shifts_part_anchors() {
        let (face, log) = probed_face();
        let mut ctx = DrawContext::default();
        ctx.breath = 1.0;
        face.compose(&ctx).unwrap();
        // Default mouth anchor top is 148; +3 px at full breath
        let tops = log.lock().unwrap();
        let mouth_top = tops.iter().find(|e| e.0 == "mouth").unwrap().1;
        assert_eq!(mouth_top, 151);
    }

    #[test]
    fn test_mono_composite_clears_to_background() {
        let face = Face::new(FaceConfig::new(32, 24));
        let mut ctx = DrawContext::default();
        ctx.color_depth = ColorDepth::Mono1;
        ctx.palette = ColorPalette::new(Rgb565::GREEN, Rgb565::RED);
        let canvas = face.compose(&ctx).unwrap();
        // An untouched corner reads back as the background entry
        assert_eq!(canvas.get_pixel(0, 0), Some(Rgb565::RED));
    }
}
