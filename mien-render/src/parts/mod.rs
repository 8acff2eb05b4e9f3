//! Face part drawables
//!
//! Every facial feature implements [`Drawable`]; the compositor only
//! knows the interface and the layout anchors. Part draw routines are
//! infallible - a part that cannot draw something sensible draws
//! nothing.

use mien_core::{DrawContext, Rect};

use crate::canvas::Canvas;

mod eye;
mod eyebrow;
mod mouth;
mod overlay;

pub use eye::Eye;
pub use eyebrow::Eyebrow;
pub use mouth::Mouth;
pub use overlay::{Balloon, BatteryIcon, Effect};

/// A drawable facial feature or overlay
///
/// `rect` is the part's anchor (zero-sized rects mark a center point);
/// overlays receive a shared static reference rect and position
/// themselves from the canvas dimensions instead.
pub trait Drawable {
    fn draw(&self, canvas: &mut Canvas, rect: Rect, ctx: &DrawContext);
}
