//! Face color palette
//!
//! Two entries: the primary (stroke/fill) color and the background. In
//! 1-bit mode the canvas stores palette indices and resolves them through
//! this table at blit time; in 16-bit mode parts draw the colors directly.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Palette slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PaletteKey {
    Primary,
    Background,
}

/// Two-entry color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    primary: Rgb565,
    background: Rgb565,
}

impl ColorPalette {
    pub const fn new(primary: Rgb565, background: Rgb565) -> Self {
        Self {
            primary,
            background,
        }
    }

    pub fn get(&self, key: PaletteKey) -> Rgb565 {
        match key {
            PaletteKey::Primary => self.primary,
            PaletteKey::Background => self.background,
        }
    }

    pub fn set(&mut self, key: PaletteKey, color: Rgb565) {
        match key {
            PaletteKey::Primary => self.primary = color,
            PaletteKey::Background => self.background = color,
        }
    }

    pub fn primary(&self) -> Rgb565 {
        self.primary
    }

    pub fn background(&self) -> Rgb565 {
        self.background
    }
}

impl Default for ColorPalette {
    /// White face on black background
    fn default() -> Self {
        Self::new(Rgb565::WHITE, Rgb565::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_white_on_black() {
        let p = ColorPalette::default();
        assert_eq!(p.get(PaletteKey::Primary), Rgb565::WHITE);
        assert_eq!(p.get(PaletteKey::Background), Rgb565::BLACK);
    }

    #[test]
    fn test_set_overrides_entry() {
        let mut p = ColorPalette::default();
        p.set(PaletteKey::Background, Rgb565::BLUE);
        assert_eq!(p.background(), Rgb565::BLUE);
        assert_eq!(p.primary(), Rgb565::WHITE);
    }
}
