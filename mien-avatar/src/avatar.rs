//! The avatar: one face, one display, and its animation state
//!
//! All mutators are plain non-blocking writes into per-field atomics;
//! none of them validate numeric ranges (a caller passing a gaze of 7.3
//! gets a visually wrong but harmless face). The renderer picks changes
//! up at its next snapshot.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_graphics::mono_font::MonoFont;
use portable_atomic::AtomicBool;

use mien_core::{BatteryStatus, ColorDepth, ColorPalette, Expression, FaceConfig, Gaze};
use mien_render::{DisplayBackend, Face};

use crate::shared::SharedState;

pub(crate) struct FaceUnit<D> {
    pub face: Face,
    pub display: D,
}

/// Owner of one face, its display binding, and the driver state
pub struct Avatar<D: DisplayBackend> {
    pub(crate) state: SharedState,
    pub(crate) unit: Mutex<CriticalSectionRawMutex, FaceUnit<D>>,
    pub(crate) renderer_active: AtomicBool,
    pub(crate) dynamics_active: AtomicBool,
}

impl<D: DisplayBackend> Avatar<D> {
    /// Avatar with the default face layout for a `width` x `height` canvas
    pub fn new(display: D, width: u32, height: u32) -> Self {
        Self::with_face(Face::new(FaceConfig::new(width, height)), display)
    }

    /// Avatar around a custom face
    pub fn with_face(face: Face, display: D) -> Self {
        Self {
            state: SharedState::new(),
            unit: Mutex::new(FaceUnit { face, display }),
            renderer_active: AtomicBool::new(false),
            dynamics_active: AtomicBool::new(false),
        }
    }

    /// Enable drawing at the given color depth
    ///
    /// Idempotent: calling while already drawing just refreshes the
    /// depth. The runner futures do the actual work; spawn them once.
    pub fn start(&self, depth: ColorDepth) {
        self.state.set_color_depth(depth);
        self.state.set_drawing(true);
    }

    /// Request both drivers to stop
    ///
    /// Cooperative: each runner observes the flag within one of its tick
    /// periods and returns, finishing any in-flight frame first.
    pub fn stop(&self) {
        self.state.set_drawing(false);
    }

    /// Pause the renderer without stopping the drivers
    pub fn suspend(&self) {
        self.state.set_paused(true);
    }

    /// Resume a suspended renderer
    pub fn resume(&self) {
        self.state.set_paused(false);
    }

    pub fn is_drawing(&self) -> bool {
        self.state.is_drawing()
    }

    /// Set the facial expression
    ///
    /// A single atomic store: a frame in progress sees either the old or
    /// the new expression, never a torn value, and the renderer is not
    /// paused for it.
    pub fn set_expression(&self, expression: Expression) {
        self.state.set_expression(expression);
    }

    pub fn expression(&self) -> Expression {
        self.state.expression()
    }

    pub fn set_breath(&self, breath: f32) {
        self.state.set_breath(breath);
    }

    pub fn breath(&self) -> f32 {
        self.state.breath()
    }

    /// Set the final transform rotation, degrees
    pub fn set_rotation(&self, degrees: f32) {
        self.state.set_rotation(degrees);
    }

    pub fn rotation(&self) -> f32 {
        self.state.rotation()
    }

    /// Set the final transform scale factor
    pub fn set_scale(&self, scale: f32) {
        self.state.set_scale(scale);
    }

    /// Move the face placement; applied by the next frame
    pub fn set_position(&self, top: i32, left: i32) {
        self.state.set_position(top, left);
    }

    pub fn set_color_palette(&self, palette: ColorPalette) {
        self.state.set_palette(palette);
    }

    pub fn color_palette(&self) -> ColorPalette {
        self.state.palette()
    }

    pub fn set_mouth_open_ratio(&self, ratio: f32) {
        self.state.set_mouth_open(ratio);
    }

    /// Set both eyes' open ratio at once
    pub fn set_eye_open_ratio(&self, ratio: f32) {
        self.state.set_right_eye_open(ratio);
        self.state.set_left_eye_open(ratio);
    }

    pub fn set_right_eye_open_ratio(&self, ratio: f32) {
        self.state.set_right_eye_open(ratio);
    }

    pub fn right_eye_open_ratio(&self) -> f32 {
        self.state.right_eye_open()
    }

    pub fn set_left_eye_open_ratio(&self, ratio: f32) {
        self.state.set_left_eye_open(ratio);
    }

    pub fn left_eye_open_ratio(&self) -> f32 {
        self.state.left_eye_open()
    }

    pub fn set_is_auto_blink(&self, enabled: bool) {
        self.state.set_auto_blink(enabled);
    }

    pub fn is_auto_blink(&self) -> bool {
        self.state.auto_blink()
    }

    pub fn set_right_gaze(&self, vertical: f32, horizontal: f32) {
        self.state.set_right_gaze(Gaze::new(vertical, horizontal));
    }

    pub fn right_gaze(&self) -> Gaze {
        self.state.right_gaze()
    }

    pub fn set_left_gaze(&self, vertical: f32, horizontal: f32) {
        self.state.set_left_gaze(Gaze::new(vertical, horizontal));
    }

    pub fn left_gaze(&self) -> Gaze {
        self.state.left_gaze()
    }

    /// Averaged gaze of both eyes, for external introspection only
    pub fn gaze(&self) -> Gaze {
        let r = self.state.right_gaze();
        let l = self.state.left_gaze();
        Gaze::new(
            0.5 * l.vertical + 0.5 * r.vertical,
            0.5 * l.horizontal + 0.5 * r.horizontal,
        )
    }

    /// Set the speech balloon text; empty text hides the balloon
    pub fn set_speech_text(&self, text: &str) {
        self.state.set_speech_text(text);
    }

    pub fn set_speech_font(&self, font: Option<&'static MonoFont<'static>>) {
        self.state.set_speech_font(font);
    }

    /// Show or hide the battery icon
    pub fn set_battery_icon(&self, visible: bool) {
        self.state.set_battery_icon(visible);
    }

    /// Update charge state; no-op until the icon has been made visible
    pub fn set_battery_status(&self, charging: bool, level: i32) {
        self.state.set_battery_status(charging, level);
    }

    pub fn battery_status(&self) -> BatteryStatus {
        self.state.battery_status()
    }
}
