//! X11 KeySym values used by the RFB `KeyEvent` message.
//!
//! Values are defined in X11/keysymdef.h.
//!
//! # What is a KeySym? (for beginners)
//!
//! RFB does not send physical key positions; it sends X11 *KeySyms*, numbers
//! that name the symbol a key produces.  Printable Latin-1 characters use
//! their ASCII value (`'a'` is 0x0061), while editing and navigation keys live
//! in the 0xFF00 block (`XK_Return` is 0xFF0D).

use std::fmt;

/// An X11 KeySym.
///
/// The value 0 (`NoSymbol` in X11) is used as the "no mapping" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Keysym(pub u32);

impl Keysym {
    /// No symbol; callers drop keys that resolve to this.
    pub const NONE: Keysym = Keysym(0x0000);

    pub const BACKSPACE: Keysym = Keysym(0xFF08); // XK_BackSpace
    pub const TAB: Keysym = Keysym(0xFF09); // XK_Tab
    pub const RETURN: Keysym = Keysym(0xFF0D); // XK_Return
    pub const ESCAPE: Keysym = Keysym(0xFF1B); // XK_Escape
    pub const LEFT: Keysym = Keysym(0xFF51); // XK_Left
    pub const UP: Keysym = Keysym(0xFF52); // XK_Up
    pub const RIGHT: Keysym = Keysym(0xFF53); // XK_Right
    pub const DOWN: Keysym = Keysym(0xFF54); // XK_Down
    pub const DELETE: Keysym = Keysym(0xFFFF); // XK_Delete

    /// Returns `true` for the [`Keysym::NONE`] sentinel.
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    /// The raw 32-bit value carried on the wire.
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Keysym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl From<Keysym> for u32 {
    fn from(k: Keysym) -> u32 {
        k.0
    }
}
