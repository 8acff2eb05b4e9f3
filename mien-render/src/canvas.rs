//! Off-screen canvas
//!
//! The compositor draws into a `Canvas`, which stores pixels in one of
//! two formats:
//!
//! - `Mono1`: bit-packed palette indices, bit set = PRIMARY. This is the
//!   fast path for small RAM budgets; colors resolve through the palette
//!   when the strip transform reads the canvas back.
//! - `Rgb16`: raw Rgb565 words.
//!
//! Parts draw through the embedded-graphics `DrawTarget` interface in
//! either format. In `Mono1`, any drawn color other than the palette
//! background sets the bit - the bitmap foreground/background mapping of
//! classic 1-bit sprite canvases.

use alloc::vec::Vec;

use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::Pixel;

use mien_core::{ColorDepth, ColorPalette};

use crate::RenderError;

enum PixelBuf {
    /// Bit-packed rows, MSB-first, `(width + 7) / 8` bytes per row
    Mono1(Vec<u8>),
    /// Row-major raw Rgb565
    Rgb16(Vec<u16>),
}

/// Runtime-sized off-screen pixel buffer
pub struct Canvas {
    width: u32,
    height: u32,
    palette: ColorPalette,
    buf: PixelBuf,
}

impl Canvas {
    /// Allocate and clear a canvas
    ///
    /// `Mono1` clears to palette index 0 (background); `Rgb16` fills with
    /// the literal background color. Allocation is fallible: exhaustion
    /// returns [`RenderError::OutOfMemory`] instead of aborting, so a
    /// frame can be skipped and retried.
    pub fn new(
        width: u32,
        height: u32,
        depth: ColorDepth,
        palette: ColorPalette,
    ) -> Result<Self, RenderError> {
        let buf = match depth {
            ColorDepth::Mono1 => {
                let len = (Self::mono_stride(width) * height) as usize;
                let mut v = Vec::new();
                v.try_reserve_exact(len)
                    .map_err(|_| RenderError::OutOfMemory)?;
                v.resize(len, 0u8);
                PixelBuf::Mono1(v)
            }
            ColorDepth::Rgb16 => {
                let len = (width * height) as usize;
                let mut v = Vec::new();
                v.try_reserve_exact(len)
                    .map_err(|_| RenderError::OutOfMemory)?;
                v.resize(len, palette.background().into_storage());
                PixelBuf::Rgb16(v)
            }
        };
        Ok(Self {
            width,
            height,
            palette,
            buf,
        })
    }

    fn mono_stride(width: u32) -> u32 {
        (width + 7) / 8
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn depth(&self) -> ColorDepth {
        match self.buf {
            PixelBuf::Mono1(_) => ColorDepth::Mono1,
            PixelBuf::Rgb16(_) => ColorDepth::Rgb16,
        }
    }

    /// Write one pixel; out-of-bounds coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        match &mut self.buf {
            PixelBuf::Mono1(bits) => {
                let idx = (y * Self::mono_stride(self.width) + x / 8) as usize;
                let mask = 0x80u8 >> (x % 8);
                if color != self.palette.background() {
                    bits[idx] |= mask;
                } else {
                    bits[idx] &= !mask;
                }
            }
            PixelBuf::Rgb16(words) => {
                words[(y * self.width + x) as usize] = color.into_storage();
            }
        }
    }

    /// Read one pixel back as its display color
    ///
    /// `Mono1` indices resolve through the palette. Out-of-bounds reads
    /// return `None`; the strip transform leaves background there.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        Some(match &self.buf {
            PixelBuf::Mono1(bits) => {
                let idx = (y * Self::mono_stride(self.width) + x / 8) as usize;
                if bits[idx] & (0x80u8 >> (x % 8)) != 0 {
                    self.palette.primary()
                } else {
                    self.palette.background()
                }
            }
            PixelBuf::Rgb16(words) => {
                RawU16::new(words[(y * self.width + x) as usize]).into()
            }
        })
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }
}
