//! Positioned rectangles
//!
//! A `Rect` places a face part (or the whole face) on the display: a
//! top/left anchor, a size, and a rotation angle in degrees. Parts are
//! laid out unrotated; the rotation on the face bounding rect is applied
//! by the strip transform at blit time.

/// Axis-aligned rectangle with a rotation angle (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    top: i32,
    left: i32,
    width: u32,
    height: u32,
    rotation: f32,
}

impl Rect {
    /// Create a positioned rect with zero size
    pub const fn at(top: i32, left: i32) -> Self {
        Self::new(top, left, 0, 0)
    }

    /// Create a positioned rect
    pub const fn new(top: i32, left: i32, width: u32, height: u32) -> Self {
        Self {
            top,
            left,
            width,
            height,
            rotation: 0.0,
        }
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn right(&self) -> i32 {
        self.left + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }

    pub fn center_x(&self) -> i32 {
        self.left + (self.width / 2) as i32
    }

    pub fn center_y(&self) -> i32 {
        self.top + (self.height / 2) as i32
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rotation in degrees
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_position(&mut self, top: i32, left: i32) {
        self.top = top;
        self.left = left;
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Set rotation in degrees
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    /// A rect with zero width or height draws nothing
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Copy of this rect shifted vertically (breath displacement)
    pub fn offset_top(&self, dy: i32) -> Self {
        let mut r = *self;
        r.top += dy;
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.right(), 50);
        assert_eq!(r.bottom(), 50);
        assert_eq!(r.center_x(), 35);
        assert_eq!(r.center_y(), 30);
    }

    #[test]
    fn test_empty() {
        assert!(Rect::new(0, 0, 0, 10).is_empty());
        assert!(Rect::new(0, 0, 10, 0).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
        assert!(Rect::at(5, 5).is_empty());
    }

    #[test]
    fn test_offset_top_leaves_original() {
        let r = Rect::new(10, 20, 30, 40);
        let shifted = r.offset_top(3);
        assert_eq!(shifted.top(), 13);
        assert_eq!(shifted.left(), 20);
        assert_eq!(r.top(), 10);
    }
}
