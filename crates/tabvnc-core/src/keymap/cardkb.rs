//! CardKB byte to X11 KeySym translation table.
//!
//! The CardKB is a small I2C keyboard that reports one byte per key press and
//! `0x00` when idle.  Printable keys report their ASCII value; editing and
//! arrow keys use the control range and a few vendor codes above 0x7F.

use super::keysym::Keysym;

/// Translates a raw CardKB byte to a [`Keysym`].
///
/// Returns [`Keysym::NONE`] for the idle byte and for every unmapped code.
pub fn byte_to_keysym(code: u8) -> Keysym {
    match code {
        // Printable ASCII maps 1:1 onto Latin-1 keysyms.
        0x20..=0x7E => Keysym(u32::from(code)),

        0x0A | 0x0D => Keysym::RETURN,
        0x08 => Keysym::BACKSPACE,
        0x09 => Keysym::TAB,
        0x1B => Keysym::ESCAPE,

        0xB4 => Keysym::LEFT,
        0xB5 => Keysym::UP,
        0xB6 => Keysym::DOWN,
        0xB7 => Keysym::RIGHT,

        0xFF => Keysym::DELETE,

        _ => Keysym::NONE,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
