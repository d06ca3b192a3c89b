//! 16-bit panel pixel format
//!
//! The controller is put into 16-bit color mode during init, so every
//! framebuffer cell is one RGB565 word: 5 bits red, 6 bits green, 5 bits
//! blue. It goes onto the wire high byte first.

/// One pixel in the panel's native 5-6-5 encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);

    /// Pack 8-bit color components into the 5-6-5 encoding
    ///
    /// The low bits of each component are truncated, not rounded.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    /// Wrap an already-encoded 16-bit value
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw 16-bit encoding
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// High byte, transmitted first
    pub const fn high_byte(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Low byte, transmitted second
    pub const fn low_byte(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}
