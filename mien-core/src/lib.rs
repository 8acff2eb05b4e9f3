//! Board-agnostic avatar face logic
//!
//! This crate contains everything the render pipeline needs that does not
//! touch a pixel buffer or a clock:
//!
//! - Positioned rectangles with rotation (face and part placement)
//! - The two-entry color palette
//! - Expression, battery and color-depth enums plus the per-frame
//!   draw-context snapshot
//! - Face layout configuration scaled from the 320x240 reference design
//! - The saccade/blink/breath animation state machines
//!
//! Angles are **degrees** everywhere in this workspace; the strip
//! transform converts to radians exactly once.

#![no_std]
#![deny(unsafe_code)]

pub mod anim;
pub mod context;
pub mod geometry;
pub mod layout;
pub mod palette;

// Re-export key types at crate root for convenience
pub use anim::{BlinkTimer, BreathCycle, SaccadeTimer};
pub use context::{BatteryStatus, ColorDepth, DrawContext, Expression, Gaze};
pub use geometry::Rect;
pub use layout::{FaceConfig, FaceLayout};
pub use palette::ColorPalette;
