//! Face layout configuration
//!
//! Part sizes and anchor positions are designed against a 320x240
//! reference and scaled linearly to the target display
//! (`scale_x = width / 320`, `scale_y = height / 240`). `FaceConfig`
//! replaces the constructor delegation chains of older avatar libraries:
//! start from `FaceConfig::new(w, h)`, override what you need, `build()`.
//!
//! Part anchor rects are zero-sized; a part treats its anchor as the
//! center point and sizes itself from the dimension parameters.

use crate::geometry::Rect;

/// Reference design width the default layout was authored against
pub const BASE_WIDTH: u32 = 320;
/// Reference design height the default layout was authored against
pub const BASE_HEIGHT: u32 = 240;

/// Face layout configuration with 320x240-derived defaults
///
/// All dimension fields are in target-display pixels (already scaled).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceConfig {
    /// Display/bounding width in pixels
    pub width: u32,
    /// Display/bounding height in pixels
    pub height: u32,
    /// Mouth width at mouth_open 0.0 (default 50 * scale_x)
    pub mouth_min_width: u32,
    /// Mouth width at mouth_open 1.0 (default 90 * scale_x)
    pub mouth_max_width: u32,
    /// Mouth height at mouth_open 0.0 (default 4 * scale_y)
    pub mouth_min_height: u32,
    /// Mouth height at mouth_open 1.0 (default 60 * scale_y)
    pub mouth_max_height: u32,
    /// Open-eye radius (default 8 * scale_x)
    pub eye_radius: u32,
    /// Eyebrow bar width (default 32 * scale_x)
    pub eyebrow_width: u32,
    /// Eyebrow bar height (default 4 * scale_y)
    pub eyebrow_height: u32,
    /// Mouth anchor (default 148,163 scaled)
    pub mouth_pos: (i32, i32),
    /// Right eye anchor (default 93,90 scaled)
    pub right_eye_pos: (i32, i32),
    /// Left eye anchor (default 96,230 scaled)
    pub left_eye_pos: (i32, i32),
    /// Right eyebrow anchor (default 67,96 scaled)
    pub right_eyebrow_pos: (i32, i32),
    /// Left eyebrow anchor (default 72,230 scaled)
    pub left_eyebrow_pos: (i32, i32),
}

impl FaceConfig {
    /// Default layout for a `width` x `height` display
    pub fn new(width: u32, height: u32) -> Self {
        let sx = width as f32 / BASE_WIDTH as f32;
        let sy = height as f32 / BASE_HEIGHT as f32;
        let x = |v: i32| (v as f32 * sx) as i32;
        let y = |v: i32| (v as f32 * sy) as i32;
        Self {
            width,
            height,
            mouth_min_width: (50.0 * sx) as u32,
            mouth_max_width: (90.0 * sx) as u32,
            mouth_min_height: (4.0 * sy) as u32,
            mouth_max_height: (60.0 * sy) as u32,
            eye_radius: (8.0 * sx) as u32,
            eyebrow_width: (32.0 * sx) as u32,
            eyebrow_height: (4.0 * sy) as u32,
            mouth_pos: (y(148), x(163)),
            right_eye_pos: (y(93), x(90)),
            left_eye_pos: (y(96), x(230)),
            right_eyebrow_pos: (y(67), x(96)),
            left_eyebrow_pos: (y(72), x(230)),
        }
    }

    /// Finalize into the positioned rects the compositor consumes
    pub fn build(self) -> FaceLayout {
        FaceLayout {
            mouth: Rect::at(self.mouth_pos.0, self.mouth_pos.1),
            right_eye: Rect::at(self.right_eye_pos.0, self.right_eye_pos.1),
            left_eye: Rect::at(self.left_eye_pos.0, self.left_eye_pos.1),
            right_eyebrow: Rect::at(self.right_eyebrow_pos.0, self.right_eyebrow_pos.1),
            left_eyebrow: Rect::at(self.left_eyebrow_pos.0, self.left_eyebrow_pos.1),
            bounding: Rect::new(0, 0, self.width, self.height),
            config: self,
        }
    }
}

/// Positioned part rects plus the source configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceLayout {
    pub mouth: Rect,
    pub right_eye: Rect,
    pub left_eye: Rect,
    pub right_eyebrow: Rect,
    pub left_eyebrow: Rect,
    pub bounding: Rect,
    pub config: FaceConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scale_is_identity() {
        let c = FaceConfig::new(320, 240);
        assert_eq!(c.mouth_min_width, 50);
        assert_eq!(c.mouth_max_width, 90);
        assert_eq!(c.mouth_min_height, 4);
        assert_eq!(c.mouth_max_height, 60);
        assert_eq!(c.eye_radius, 8);
        assert_eq!(c.eyebrow_width, 32);
        assert_eq!(c.eyebrow_height, 4);
        assert_eq!(c.mouth_pos, (148, 163));
        assert_eq!(c.right_eye_pos, (93, 90));
        assert_eq!(c.left_eye_pos, (96, 230));
        assert_eq!(c.right_eyebrow_pos, (67, 96));
        assert_eq!(c.left_eyebrow_pos, (72, 230));
    }

    #[test]
    fn test_double_scale() {
        let c = FaceConfig::new(640, 480);
        assert_eq!(c.eye_radius, 16);
        assert_eq!(c.mouth_pos, (296, 326));
        assert_eq!(c.eyebrow_width, 64);
    }

    #[test]
    fn test_build_layout() {
        let l = FaceConfig::new(320, 240).build();
        assert_eq!(l.bounding.width(), 320);
        assert_eq!(l.bounding.height(), 240);
        assert!(l.mouth.is_empty()); // anchors carry position only
        assert_eq!(l.mouth.top(), 148);
        assert_eq!(l.mouth.left(), 163);
    }

    #[test]
    fn test_override_then_build() {
        let mut c = FaceConfig::new(320, 240);
        c.eye_radius = 20;
        c.left_eye_pos = (100, 200);
        let l = c.build();
        assert_eq!(l.config.eye_radius, 20);
        assert_eq!(l.left_eye.top(), 100);
        assert_eq!(l.left_eye.left(), 200);
    }
}
