//! Key code translation for peripheral keyboards.
//!
//! The canonical representation is the X11 [`Keysym`], which is what the RFB
//! `KeyEvent` message carries.  Device-specific byte codes are translated at
//! the input boundary.

pub mod cardkb;
pub mod keysym;

pub use keysym::Keysym;

/// Unified key mapper.
pub struct KeyMapper;

impl KeyMapper {
    /// Translates a raw CardKB byte to an X11 [`Keysym`].
    ///
    /// Returns [`Keysym::NONE`] if no mapping exists for `code`; the caller
    /// drops such keys.
    pub fn cardkb_to_keysym(code: u8) -> Keysym {
        cardkb::byte_to_keysym(code)
    }
}
