//! RFB pointer button masks.
//!
//! A `PointerEvent` carries an 8-bit mask; bit *n* set means button *n+1* is
//! down.  Buttons 4 and 5 are the scroll wheel: a wheel step is sent as a
//! press immediately followed by a release.

use std::ops::BitOr;

use crate::domain::gesture::ScrollDirection;

/// Bitmask of pressed pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonMask(pub u8);

impl ButtonMask {
    /// No button pressed.
    pub const NONE: ButtonMask = ButtonMask(0b0000_0000);
    /// Button 1.
    pub const LEFT: ButtonMask = ButtonMask(0b0000_0001);
    /// Button 2.
    pub const MIDDLE: ButtonMask = ButtonMask(0b0000_0010);
    /// Button 3.
    pub const RIGHT: ButtonMask = ButtonMask(0b0000_0100);
    /// Button 4.
    pub const WHEEL_UP: ButtonMask = ButtonMask(0b0000_1000);
    /// Button 5.
    pub const WHEEL_DOWN: ButtonMask = ButtonMask(0b0001_0000);

    /// The wheel button for one scroll step.
    pub const fn wheel(direction: ScrollDirection) -> Self {
        match direction {
            ScrollDirection::Up => Self::WHEEL_UP,
            ScrollDirection::Down => Self::WHEEL_DOWN,
        }
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: ButtonMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ButtonMask {
    type Output = ButtonMask;

    fn bitor(self, rhs: ButtonMask) -> ButtonMask {
        ButtonMask(self.0 | rhs.0)
    }
}
