//! RGB565 pixel values and byte-order handling.
//!
//! # Byte order (for beginners)
//!
//! An RGB565 pixel is a 16-bit word: 5 bits red, 6 bits green, 5 bits blue.
//! The protocol layer hands pixels over as 16-bit words in its own byte order,
//! while many SPI panels expect the high byte first.  When the two disagree,
//! every word must have its two bytes exchanged before it is drawn:
//!
//! ```text
//!   wire word  0x1234  ──swap──►  0x3412  surface word
//! ```
//!
//! Swapping twice restores the original value, so the same function converts
//! in both directions.

use thiserror::Error;

/// Errors when turning a raw pixel buffer into words.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PixelError {
    /// The buffer holds fewer bytes than `pixel_count * 2`.
    #[error("pixel buffer too short: need {needed} bytes, got {available}")]
    Truncated { needed: usize, available: usize },
}

/// Exchanges the two bytes of an RGB565 word.
#[inline]
pub const fn swap_rgb565(value: u16) -> u16 {
    value.swap_bytes()
}

/// A 16-bit RGB565 colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// Packs 8-bit channels, dropping the low bits.
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16 >> 3) << 11;
        let g = (g as u16 >> 2) << 5;
        let b = b as u16 >> 3;
        Self(r | g | b)
    }

    /// The same colour with its bytes exchanged.
    pub const fn swapped(self) -> Self {
        Self(swap_rgb565(self.0))
    }

    /// The word to write to a surface, swapping when `swap` is set.
    #[inline]
    pub const fn to_surface(self, swap: bool) -> u16 {
        if swap {
            swap_rgb565(self.0)
        } else {
            self.0
        }
    }
}

/// Reads `pixel_count` native-endian 16-bit words out of `bytes`.
///
/// Extra trailing bytes are ignored.
pub fn decode_pixels(bytes: &[u8], pixel_count: usize) -> Result<Vec<u16>, PixelError> {
    let needed = pixel_count.saturating_mul(2);
    if bytes.len() < needed {
        return Err(PixelError::Truncated { needed, available: bytes.len() });
    }
    Ok(bytes[..needed]
        .chunks_exact(2)
        .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
        .collect())
}

/// Named colours used by the status and overlay screens.
pub mod colors {
    use super::Rgb565;

    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const NAVY: Rgb565 = Rgb565(0x000F);
    pub const GREEN: Rgb565 = Rgb565(0x07E0);
    pub const CYAN: Rgb565 = Rgb565(0x07FF);
    pub const RED: Rgb565 = Rgb565(0xF800);
    pub const YELLOW: Rgb565 = Rgb565(0xFFE0);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const LIGHT_GREY: Rgb565 = Rgb565(0xD69A);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
