//! RemoteInput: turns gestures and key taps into RFB pointer and key events.
//!
//! | Intent            | RFB messages                                      |
//! |-------------------|---------------------------------------------------|
//! | pointer move      | `PointerEvent(x, y, LEFT)`                        |
//! | pointer release   | `PointerEvent(x, y, NONE)`                        |
//! | scroll step       | `PointerEvent(WHEEL_x)` then `PointerEvent(NONE)` |
//! | key tap           | `KeyEvent(down)` then `KeyEvent(up)`              |

use std::sync::Arc;

use tabvnc_core::{ButtonMask, GestureEvent, Keysym, ScrollDirection};
use tracing::trace;

use crate::application::orchestrate_session::{RemoteSession, SessionError};

/// Sends user input to the remote session.
#[derive(Clone)]
pub struct RemoteInput {
    session: Arc<dyn RemoteSession>,
}

impl RemoteInput {
    pub fn new(session: Arc<dyn RemoteSession>) -> Self {
        Self { session }
    }

    /// Pointer at (x, y) with the primary button held.
    pub async fn pointer_move(&self, x: i32, y: i32) -> Result<(), SessionError> {
        self.session.pointer_event(x, y, ButtonMask::LEFT).await
    }

    /// All buttons released at (x, y).
    pub async fn pointer_release(&self, x: i32, y: i32) -> Result<(), SessionError> {
        self.session.pointer_event(x, y, ButtonMask::NONE).await
    }

    /// One wheel step: a press of the wheel button immediately followed by a release.
    pub async fn scroll(&self, direction: ScrollDirection, x: i32, y: i32) -> Result<(), SessionError> {
        self.session.pointer_event(x, y, ButtonMask::wheel(direction)).await?;
        self.session.pointer_event(x, y, ButtonMask::NONE).await
    }

    /// A key press immediately followed by its release.
    pub async fn key_tap(&self, key: Keysym) -> Result<(), SessionError> {
        self.session.key_event(key, true).await?;
        self.session.key_event(key, false).await
    }

    /// Forwards a pointer-class gesture.  Screen-switch gestures are not
    /// remote input and are ignored here.
    pub async fn dispatch(&self, event: GestureEvent) -> Result<(), SessionError> {
        match event {
            GestureEvent::PointerMove { x, y } => self.pointer_move(x, y).await,
            GestureEvent::PointerRelease { x, y } => self.pointer_release(x, y).await,
            GestureEvent::Scroll { direction, x, y } => self.scroll(direction, x, y).await,
            GestureEvent::ToggleOverlay | GestureEvent::OpenOverlay => {
                trace!(?event, "not a remote input event");
                Ok(())
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
