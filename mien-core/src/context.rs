//! Per-frame draw context and the enums behind it
//!
//! The renderer snapshots the live animation state into a `DrawContext`
//! at the start of each frame. Parts only ever see the snapshot, so a
//! frame is internally consistent even while the dynamics driver and
//! caller threads keep mutating the live state.

use embedded_graphics::mono_font::MonoFont;
use heapless::String;

use crate::palette::ColorPalette;

/// Maximum speech balloon text length
pub const SPEECH_TEXT_CAPACITY: usize = 64;

/// Facial expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Expression {
    #[default]
    Neutral = 0,
    Happy = 1,
    Angry = 2,
    Sad = 3,
    Doubt = 4,
    Sleepy = 5,
}

impl Expression {
    /// Recover an expression from its atomic cell value
    pub fn from_u8(v: u8) -> Self {
        match v {
            1 => Expression::Happy,
            2 => Expression::Angry,
            3 => Expression::Sad,
            4 => Expression::Doubt,
            5 => Expression::Sleepy,
            _ => Expression::Neutral,
        }
    }
}

/// Battery icon state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BatteryStatus {
    /// Icon hidden; `set_battery_status` is a no-op in this state
    #[default]
    Invisible = 0,
    /// Icon shown but no charge information yet
    Unknown = 1,
    Charging = 2,
    Discharging = 3,
}

impl BatteryStatus {
    pub fn from_u8(v: u8) -> Self {
        match v {
            1 => BatteryStatus::Unknown,
            2 => BatteryStatus::Charging,
            3 => BatteryStatus::Discharging,
            _ => BatteryStatus::Invisible,
        }
    }
}

/// Composite buffer bit depth
///
/// 1-bit is the fast path: the composite stores palette indices and the
/// strip transform resolves them while copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ColorDepth {
    #[default]
    Mono1 = 1,
    Rgb16 = 16,
}

impl ColorDepth {
    pub fn from_u8(v: u8) -> Self {
        match v {
            16 => ColorDepth::Rgb16,
            _ => ColorDepth::Mono1,
        }
    }
}

/// Gaze direction, vertical/horizontal in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gaze {
    pub vertical: f32,
    pub horizontal: f32,
}

impl Gaze {
    pub const fn new(vertical: f32, horizontal: f32) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

/// Immutable snapshot of the animation state for one frame
#[derive(Clone)]
pub struct DrawContext {
    pub expression: Expression,
    pub breath: f32,
    pub palette: ColorPalette,
    pub right_gaze: Gaze,
    pub right_eye_open: f32,
    pub left_gaze: Gaze,
    pub left_eye_open: f32,
    pub mouth_open: f32,
    /// Final transform rotation, degrees
    pub rotation: f32,
    /// Final transform uniform scale factor
    pub scale: f32,
    pub color_depth: ColorDepth,
    pub speech_text: String<SPEECH_TEXT_CAPACITY>,
    pub speech_font: Option<&'static MonoFont<'static>>,
    pub battery_status: BatteryStatus,
    pub battery_level: i32,
}

impl Default for DrawContext {
    fn default() -> Self {
        Self {
            expression: Expression::Neutral,
            breath: 0.0,
            palette: ColorPalette::default(),
            right_gaze: Gaze::default(),
            right_eye_open: 1.0,
            left_gaze: Gaze::default(),
            left_eye_open: 1.0,
            mouth_open: 0.0,
            rotation: 0.0,
            scale: 1.0,
            color_depth: ColorDepth::Mono1,
            speech_text: String::new(),
            speech_font: None,
            battery_status: BatteryStatus::Invisible,
            battery_level: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_round_trip() {
        for e in [
            Expression::Neutral,
            Expression::Happy,
            Expression::Angry,
            Expression::Sad,
            Expression::Doubt,
            Expression::Sleepy,
        ] {
            assert_eq!(Expression::from_u8(e as u8), e);
        }
        // Out-of-range cell values degrade to Neutral
        assert_eq!(Expression::from_u8(200), Expression::Neutral);
    }

    #[test]
    fn test_battery_status_round_trip() {
        for s in [
            BatteryStatus::Invisible,
            BatteryStatus::Unknown,
            BatteryStatus::Charging,
            BatteryStatus::Discharging,
        ] {
            assert_eq!(BatteryStatus::from_u8(s as u8), s);
        }
    }

    #[test]
    fn test_color_depth_round_trip() {
        assert_eq!(ColorDepth::from_u8(1), ColorDepth::Mono1);
        assert_eq!(ColorDepth::from_u8(16), ColorDepth::Rgb16);
        // Anything unexpected falls back to the 1-bit path
        assert_eq!(ColorDepth::from_u8(8), ColorDepth::Mono1);
    }
}
