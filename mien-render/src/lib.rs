//! Avatar render pipeline
//!
//! This crate turns a [`mien_core::DrawContext`] snapshot into pixels on
//! a physical display:
//!
//! - [`Canvas`] - off-screen buffer, 1-bit palette-indexed or 16-bit RGB
//! - [`parts`] - the polymorphic face part drawables and overlays
//! - [`Face`] - compositor: lays parts out and draws them into the canvas
//! - [`StripBlitter`] - rotates/scales the composite and streams it to
//!   the display in 8-px strips, bounding peak transform memory to one
//!   strip instead of a second full frame
//! - [`DisplayBackend`] - the trait concrete display drivers implement
//!
//! Failures (allocation, degenerate geometry) never escape a frame: the
//! avatar layer absorbs them, logs, and lets the next tick retry.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod blit;
pub mod canvas;
pub mod display;
pub mod face;
pub mod parts;
pub mod transform;

// Re-export key types at crate root for convenience
pub use blit::{StripBlitter, STRIP_HEIGHT};
pub use canvas::Canvas;
pub use display::{DisplayBackend, DisplayError};
pub use face::{breath_displacement, Face};
pub use parts::Drawable;

/// Render pipeline failures
///
/// All of these are absorbed at the frame boundary: the current frame is
/// skipped and the next scheduled frame retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Buffer reservation failed; no composite or strip this frame
    OutOfMemory,
    /// Bounding rect has zero width or height
    EmptyBounds,
    /// Non-positive scale factor, transform would be degenerate
    BadTransform,
    /// The display backend rejected a transaction
    Display(DisplayError),
}
