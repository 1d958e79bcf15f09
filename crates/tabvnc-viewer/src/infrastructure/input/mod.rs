//! Input device adapters.
//!
//! Touch controllers, I2C keyboards and hardware buttons are board-specific;
//! the viewer reaches them through the `TouchSource`, `KeyboardDevice` and
//! `ButtonPanel` ports.  The scripted sources in [`mock`] drive tests and let
//! the binary run without the hardware attached.

pub mod mock;

pub use mock::{ScriptedButtons, ScriptedKeyboard, ScriptedTouchSource};
