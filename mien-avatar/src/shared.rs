//! Lock-free shared animation state
//!
//! Every scalar field lives in its own relaxed atomic: the dynamics
//! driver and arbitrary caller threads write while the renderer reads,
//! with no cross-field transaction. A reader can see a gaze from one
//! tick combined with a breath from the next - that skew is invisible at
//! animation speed - but no single field can ever tear.
//!
//! The only non-scalar state (speech text and font) sits behind a short
//! critical-section mutex, taken for the few cycles a copy takes.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;
use portable_atomic::{AtomicBool, AtomicF32, AtomicI32, AtomicU16, AtomicU8, Ordering};

use mien_core::context::SPEECH_TEXT_CAPACITY;
use mien_core::{BatteryStatus, ColorDepth, ColorPalette, DrawContext, Expression, Gaze};

struct Speech {
    text: String<SPEECH_TEXT_CAPACITY>,
    font: Option<&'static MonoFont<'static>>,
}

/// The live animation state shared by drivers and callers
pub(crate) struct SharedState {
    expression: AtomicU8,
    breath: AtomicF32,
    right_eye_open: AtomicF32,
    left_eye_open: AtomicF32,
    right_gaze_v: AtomicF32,
    right_gaze_h: AtomicF32,
    left_gaze_v: AtomicF32,
    left_gaze_h: AtomicF32,
    auto_blink: AtomicBool,
    mouth_open: AtomicF32,
    rotation: AtomicF32,
    scale: AtomicF32,
    color_depth: AtomicU8,
    battery_status: AtomicU8,
    battery_level: AtomicI32,
    palette_primary: AtomicU16,
    palette_background: AtomicU16,
    drawing: AtomicBool,
    paused: AtomicBool,
    // Pending placement change, folded into the face by the renderer
    position_top: AtomicI32,
    position_left: AtomicI32,
    position_dirty: AtomicBool,
    speech: BlockingMutex<CriticalSectionRawMutex, RefCell<Speech>>,
}

impl SharedState {
    pub fn new() -> Self {
        let palette = ColorPalette::default();
        Self {
            expression: AtomicU8::new(Expression::Neutral as u8),
            breath: AtomicF32::new(0.0),
            right_eye_open: AtomicF32::new(1.0),
            left_eye_open: AtomicF32::new(1.0),
            right_gaze_v: AtomicF32::new(0.0),
            right_gaze_h: AtomicF32::new(0.0),
            left_gaze_v: AtomicF32::new(0.0),
            left_gaze_h: AtomicF32::new(0.0),
            auto_blink: AtomicBool::new(true),
            mouth_open: AtomicF32::new(0.0),
            rotation: AtomicF32::new(0.0),
            scale: AtomicF32::new(1.0),
            color_depth: AtomicU8::new(ColorDepth::Mono1 as u8),
            battery_status: AtomicU8::new(BatteryStatus::Invisible as u8),
            battery_level: AtomicI32::new(0),
            palette_primary: AtomicU16::new(palette.primary().into_storage()),
            palette_background: AtomicU16::new(palette.background().into_storage()),
            drawing: AtomicBool::new(false),
            paused: AtomicBool::new(false),
            position_top: AtomicI32::new(0),
            position_left: AtomicI32::new(0),
            position_dirty: AtomicBool::new(false),
            speech: BlockingMutex::new(RefCell::new(Speech {
                text: String::new(),
                font: None,
            })),
        }
    }

    /// Copy the live state into an immutable per-frame snapshot
    pub fn snapshot(&self) -> DrawContext {
        let (speech_text, speech_font) = self.speech.lock(|s| {
            let s = s.borrow();
            (s.text.clone(), s.font)
        });
        DrawContext {
            expression: Expression::from_u8(self.expression.load(Ordering::Relaxed)),
            breath: self.breath.load(Ordering::Relaxed),
            palette: self.palette(),
            right_gaze: Gaze::new(
                self.right_gaze_v.load(Ordering::Relaxed),
                self.right_gaze_h.load(Ordering::Relaxed),
            ),
            right_eye_open: self.right_eye_open.load(Ordering::Relaxed),
            left_gaze: Gaze::new(
                self.left_gaze_v.load(Ordering::Relaxed),
                self.left_gaze_h.load(Ordering::Relaxed),
            ),
            left_eye_open: self.left_eye_open.load(Ordering::Relaxed),
            mouth_open: self.mouth_open.load(Ordering::Relaxed),
            rotation: self.rotation.load(Ordering::Relaxed),
            scale: self.scale.load(Ordering::Relaxed),
            color_depth: ColorDepth::from_u8(self.color_depth.load(Ordering::Relaxed)),
            speech_text,
            speech_font,
            battery_status: BatteryStatus::from_u8(self.battery_status.load(Ordering::Relaxed)),
            battery_level: self.battery_level.load(Ordering::Relaxed),
        }
    }

    pub fn set_expression(&self, e: Expression) {
        self.expression.store(e as u8, Ordering::Relaxed);
    }

    pub fn expression(&self) -> Expression {
        Expression::from_u8(self.expression.load(Ordering::Relaxed))
    }

    pub fn set_breath(&self, v: f32) {
        self.breath.store(v, Ordering::Relaxed);
    }

    pub fn breath(&self) -> f32 {
        self.breath.load(Ordering::Relaxed)
    }

    pub fn set_right_eye_open(&self, v: f32) {
        self.right_eye_open.store(v, Ordering::Relaxed);
    }

    pub fn right_eye_open(&self) -> f32 {
        self.right_eye_open.load(Ordering::Relaxed)
    }

    pub fn set_left_eye_open(&self, v: f32) {
        self.left_eye_open.store(v, Ordering::Relaxed);
    }

    pub fn left_eye_open(&self) -> f32 {
        self.left_eye_open.load(Ordering::Relaxed)
    }

    pub fn set_right_gaze(&self, g: Gaze) {
        self.right_gaze_v.store(g.vertical, Ordering::Relaxed);
        self.right_gaze_h.store(g.horizontal, Ordering::Relaxed);
    }

    pub fn right_gaze(&self) -> Gaze {
        Gaze::new(
            self.right_gaze_v.load(Ordering::Relaxed),
            self.right_gaze_h.load(Ordering::Relaxed),
        )
    }

    pub fn set_left_gaze(&self, g: Gaze) {
        self.left_gaze_v.store(g.vertical, Ordering::Relaxed);
        self.left_gaze_h.store(g.horizontal, Ordering::Relaxed);
    }

    pub fn left_gaze(&self) -> Gaze {
        Gaze::new(
            self.left_gaze_v.load(Ordering::Relaxed),
            self.left_gaze_h.load(Ordering::Relaxed),
        )
    }

    pub fn set_auto_blink(&self, on: bool) {
        self.auto_blink.store(on, Ordering::Relaxed);
    }

    pub fn auto_blink(&self) -> bool {
        self.auto_blink.load(Ordering::Relaxed)
    }

    pub fn set_mouth_open(&self, v: f32) {
        self.mouth_open.store(v, Ordering::Relaxed);
    }

    pub fn set_rotation(&self, degrees: f32) {
        self.rotation.store(degrees, Ordering::Relaxed);
    }

    pub fn rotation(&self) -> f32 {
        self.rotation.load(Ordering::Relaxed)
    }

    pub fn set_scale(&self, scale: f32) {
        self.scale.store(scale, Ordering::Relaxed);
    }

    pub fn set_color_depth(&self, depth: ColorDepth) {
        self.color_depth.store(depth as u8, Ordering::Relaxed);
    }

    pub fn set_palette(&self, p: ColorPalette) {
        self.palette_primary
            .store(p.primary().into_storage(), Ordering::Relaxed);
        self.palette_background
            .store(p.background().into_storage(), Ordering::Relaxed);
    }

    pub fn palette(&self) -> ColorPalette {
        ColorPalette::new(
            Rgb565::from(RawU16::new(self.palette_primary.load(Ordering::Relaxed))),
            Rgb565::from(RawU16::new(self.palette_background.load(Ordering::Relaxed))),
        )
    }

    /// Make the battery icon visible (Unknown) or hide it
    pub fn set_battery_icon(&self, visible: bool) {
        let status = if visible {
            BatteryStatus::Unknown
        } else {
            BatteryStatus::Invisible
        };
        self.battery_status.store(status as u8, Ordering::Relaxed);
    }

    /// Update charge state; no-op while the icon is invisible
    pub fn set_battery_status(&self, charging: bool, level: i32) {
        if BatteryStatus::from_u8(self.battery_status.load(Ordering::Relaxed))
            == BatteryStatus::Invisible
        {
            return;
        }
        let status = if charging {
            BatteryStatus::Charging
        } else {
            BatteryStatus::Discharging
        };
        self.battery_status.store(status as u8, Ordering::Relaxed);
        self.battery_level.store(level, Ordering::Relaxed);
    }

    pub fn battery_status(&self) -> BatteryStatus {
        BatteryStatus::from_u8(self.battery_status.load(Ordering::Relaxed))
    }

    pub fn battery_level(&self) -> i32 {
        self.battery_level.load(Ordering::Relaxed)
    }

    pub fn set_speech_text(&self, text: &str) {
        self.speech.lock(|s| {
            let mut s = s.borrow_mut();
            s.text.clear();
            // Anything past the balloon capacity is dropped
            for ch in text.chars() {
                if s.text.push(ch).is_err() {
                    break;
                }
            }
        });
    }

    pub fn set_speech_font(&self, font: Option<&'static MonoFont<'static>>) {
        self.speech.lock(|s| s.borrow_mut().font = font);
    }

    pub fn set_drawing(&self, on: bool) {
        self.drawing.store(on, Ordering::Relaxed);
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing.load(Ordering::Relaxed)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    pub fn set_position(&self, top: i32, left: i32) {
        self.position_top.store(top, Ordering::Relaxed);
        self.position_left.store(left, Ordering::Relaxed);
        self.position_dirty.store(true, Ordering::Relaxed);
    }

    /// Consume a pending placement change, if any
    pub fn take_position(&self) -> Option<(i32, i32)> {
        if self.position_dirty.swap(false, Ordering::Relaxed) {
            Some((
                self.position_top.load(Ordering::Relaxed),
                self.position_left.load(Ordering::Relaxed),
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate std;

    #[test]
    fn test_defaults_match_fresh_face() {
        let s = SharedState::new();
        assert_eq!(s.expression(), Expression::Neutral);
        assert_eq!(s.right_eye_open(), 1.0);
        assert_eq!(s.left_eye_open(), 1.0);
        assert!(s.auto_blink());
        assert_eq!(s.battery_status(), BatteryStatus::Invisible);
        assert!(!s.is_drawing());
        let ctx = s.snapshot();
        assert_eq!(ctx.scale, 1.0);
        assert_eq!(ctx.color_depth, ColorDepth::Mono1);
        assert!(ctx.speech_text.is_empty());
    }

    #[test]
    fn test_battery_status_gated_by_visibility() {
        let s = SharedState::new();
        s.set_battery_status(true, 50);
        assert_eq!(s.battery_status(), BatteryStatus::Invisible);
        assert_eq!(s.battery_level(), 0);

        s.set_battery_icon(true);
        assert_eq!(s.battery_status(), BatteryStatus::Unknown);
        s.set_battery_status(true, 50);
        assert_eq!(s.battery_status(), BatteryStatus::Charging);
        assert_eq!(s.battery_level(), 50);

        s.set_battery_status(false, 49);
        assert_eq!(s.battery_status(), BatteryStatus::Discharging);
    }

    #[test]
    fn test_snapshot_reflects_writes() {
        let s = SharedState::new();
        s.set_expression(Expression::Happy);
        s.set_breath(0.25);
        s.set_right_gaze(Gaze::new(0.5, -0.5));
        s.set_mouth_open(0.75);
        s.set_speech_text("hello");

        let ctx = s.snapshot();
        assert_eq!(ctx.expression, Expression::Happy);
        assert_eq!(ctx.breath, 0.25);
        assert_eq!(ctx.right_gaze.vertical, 0.5);
        assert_eq!(ctx.mouth_open, 0.75);
        assert_eq!(ctx.speech_text.as_str(), "hello");
    }

    #[test]
    fn test_speech_text_truncates_to_capacity() {
        let s = SharedState::new();
        let long: std::string::String = core::iter::repeat('x').take(100).collect();
        s.set_speech_text(&long);
        assert_eq!(s.snapshot().speech_text.len(), SPEECH_TEXT_CAPACITY);
    }

    #[test]
    fn test_take_position_consumes_once() {
        let s = SharedState::new();
        assert_eq!(s.take_position(), None);
        s.set_position(12, 34);
        assert_eq!(s.take_position(), Some((12, 34)));
        assert_eq!(s.take_position(), None);
    }

    #[test]
    fn test_expression_reads_whole_under_contention() {
        // A snapshot taken while a writer hammers the expression cell
        // must always observe one of the values actually written.
        let s = SharedState::new();
        std::thread::scope(|scope| {
            let writer = scope.spawn(|| {
                for i in 0..10_000u32 {
                    s.set_expression(if i % 2 == 0 {
                        Expression::Happy
                    } else {
                        Expression::Sleepy
                    });
                }
            });
            for _ in 0..10_000 {
                let e = s.snapshot().expression;
                assert!(matches!(
                    e,
                    Expression::Neutral | Expression::Happy | Expression::Sleepy
                ));
            }
            writer.join().unwrap();
        });
    }
}
