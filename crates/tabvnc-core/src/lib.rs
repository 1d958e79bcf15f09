//! # tabvnc-core
//!
//! Shared library for the TabVNC touch viewer containing the gesture
//! recognizer, the live/overlay session-view state machine, streaming-update
//! geometry, and the small protocol contracts (pixel byte order, pointer
//! button masks, key symbols) that the viewer exchanges with the remote
//! framebuffer session.
//!
//! It has zero dependencies on OS APIs, display drivers, or network sockets,
//! so every rule in here can be unit-tested on a desktop machine.
//!
//! # Architecture overview (for beginners)
//!
//! TabVNC turns a touch tablet into a VNC viewer.  The remote desktop streams
//! rectangles of pixels to the tablet, and the tablet sends pointer and key
//! events back.  This crate is the pure foundation:
//!
//! - **`domain`** – Business rules with no I/O.  The `GestureRecognizer`
//!   converts raw multi-touch samples into intents (drag, scroll, overlay
//!   toggle, swipe-down), `SessionView` tracks whether the live remote view or
//!   the local info overlay owns the screen, and `StreamingUpdateContext`
//!   turns a running pixel count into screen coordinates.
//!
//! - **`protocol`** – The values that cross the boundary with the remote
//!   framebuffer protocol layer: RGB565 byte order, pointer button masks, and
//!   the options negotiated when the session starts.
//!
//! - **`keymap`** – Translation from the bytes emitted by the peripheral
//!   keyboard to X11 KeySyms, the key representation used by RFB.

pub mod domain;
pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `tabvnc_core::GestureRecognizer` instead of the full module path.
pub use domain::gesture::{
    GestureConfig, GestureEvent, GestureRecognizer, ScrollDirection, TouchSample,
};
pub use domain::geometry::{Rect, StreamingUpdateContext};
pub use domain::session_view::{ScreenMode, SessionView};
pub use keymap::{KeyMapper, Keysym};
pub use protocol::pixel::{swap_rgb565, Rgb565};
pub use protocol::pointer::ButtonMask;
pub use protocol::options::SessionOptions;
