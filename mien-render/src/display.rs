//! Display backend trait
//!
//! Defines the interface between the strip blitter and a concrete
//! display driver. Implementations live in the embedding firmware
//! (SPI/parallel TFT drivers, simulator windows, test mocks).

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Strip-oriented display backend
///
/// The blitter brackets every strip in a `begin_write` / `end_write`
/// transaction and never overlaps transactions. `push_strip` is expected
/// to *start* the transfer (DMA where the hardware supports it) and may
/// return before the pixels have landed; `end_write` completes the
/// transaction and must not return until the transfer is done.
///
/// Strips may overhang the right or bottom display edge; implementations
/// must clip rather than fault.
#[allow(async_fn_in_trait)]
pub trait DisplayBackend {
    /// Display size in pixels (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// Open a write transaction
    async fn begin_write(&mut self) -> Result<(), DisplayError>;

    /// Start transferring one strip of raw Rgb565 pixels
    ///
    /// `pixels` is row-major `width * height` words; `(left, top)` is the
    /// destination position in display coordinates.
    async fn push_strip(
        &mut self,
        left: i32,
        top: i32,
        width: u32,
        height: u32,
        pixels: &[u16],
    ) -> Result<(), DisplayError>;

    /// Close the transaction, waiting for the in-flight transfer
    async fn end_write(&mut self) -> Result<(), DisplayError>;
}
