//! Animated avatar for embedded displays
//!
//! Ties the render pipeline to a pair of periodic animation drivers over
//! lock-free shared state:
//!
//! - [`Avatar`] - owns one face + display, exposes the mutator API
//! - `run_renderer` / `run_dynamics` - runner futures the application
//!   binds to its executor tasks
//!
//! # Usage
//!
//! ```ignore
//! static AVATAR: StaticCell<Avatar<Lcd>> = StaticCell::new();
//!
//! #[embassy_executor::task]
//! async fn render_task(avatar: &'static Avatar<Lcd>) {
//!     avatar.run_renderer().await;
//! }
//!
//! #[embassy_executor::task]
//! async fn dynamics_task(avatar: &'static Avatar<Lcd>) {
//!     avatar.run_dynamics().await;
//! }
//!
//! let avatar = AVATAR.init(Avatar::new(lcd, 320, 240));
//! avatar.start(ColorDepth::Mono1);
//! spawner.spawn(render_task(avatar)).unwrap();
//! spawner.spawn(dynamics_task(avatar)).unwrap();
//!
//! avatar.set_expression(Expression::Happy);
//! avatar.set_speech_text("hello");
//! ```
//!
//! # Consistency model
//!
//! Mutators are plain relaxed atomic writes; the renderer snapshots the
//! state once per frame. Single fields never tear, but no ordering is
//! promised *between* fields - a deliberate trade that keeps every
//! setter wait-free and the frame path stall-free.

#![no_std]
#![deny(unsafe_code)]

mod avatar;
mod drivers;
mod shared;

pub use avatar::Avatar;
pub use drivers::{DYNAMICS_INTERVAL_MS, FRAME_INTERVAL_MS};

// Re-export what callers need to talk to the API
pub use mien_core::{
    BatteryStatus, ColorDepth, ColorPalette, Expression, FaceConfig, Gaze, Rect,
};
pub use mien_render::{Canvas, DisplayBackend, DisplayError, Drawable, Face, RenderError};
