//! ControlInputUseCase: the control context's polling step.
//!
//! Runs on its own context, independent of touch processing, and handles the
//! two slow input devices: the reconnect button and the peripheral keyboard.
//! It only *reads* the shared [`SessionState`]; all writes belong to the
//! session context.

use std::sync::Arc;

use tabvnc_core::KeyMapper;
use tracing::{info, trace, warn};

use crate::application::orchestrate_session::RemoteSession;
use crate::application::remote_input::RemoteInput;
use crate::application::session_state::SessionState;
use crate::application::status::{StatusLevel, StatusScreen};

/// A peripheral keyboard that reports one byte per key press.
#[cfg_attr(test, mockall::automock)]
pub trait KeyboardDevice: Send + Sync {
    /// Whether the keyboard answered on its bus.
    fn is_present(&self) -> bool;
    /// Reads one key byte; `0` means no key is pending.
    fn poll_key(&self) -> u8;
}

/// Hardware buttons on the device.
#[cfg_attr(test, mockall::automock)]
pub trait ButtonPanel: Send + Sync {
    /// `true` once per press of the reconnect button.
    fn reconnect_pressed(&self) -> bool;
}

/// What one [`ControlInputUseCase::poll_once`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlOutcome {
    pub reconnect_requested: bool,
    pub key_sent: bool,
}

/// The control context's use case.
pub struct ControlInputUseCase {
    keyboard: Arc<dyn KeyboardDevice>,
    buttons: Arc<dyn ButtonPanel>,
    session: Arc<dyn RemoteSession>,
    status: Arc<dyn StatusScreen>,
    state: Arc<SessionState>,
    input: RemoteInput,
    server_address: String,
}

impl ControlInputUseCase {
    pub fn new(
        keyboard: Arc<dyn KeyboardDevice>,
        buttons: Arc<dyn ButtonPanel>,
        session: Arc<dyn RemoteSession>,
        status: Arc<dyn StatusScreen>,
        state: Arc<SessionState>,
        server_address: String,
    ) -> Self {
        let input = RemoteInput::new(Arc::clone(&session));
        Self { keyboard, buttons, session, status, state, input, server_address }
    }

    /// Handles the reconnect button, then at most one key byte.
    pub async fn poll_once(&self) -> ControlOutcome {
        let mut outcome = ControlOutcome::default();

        if self.buttons.reconnect_pressed() && !self.state.session_up() {
            info!(server = %self.server_address, "manual reconnect requested");
            self.status.show_status("Reconnecting", &self.server_address, StatusLevel::Warning);
            if let Err(e) = self.session.reconnect().await {
                warn!(error = %e, "manual reconnect failed");
            }
            outcome.reconnect_requested = true;
        }

        if !self.keyboard.is_present() {
            return outcome;
        }
        let code = self.keyboard.poll_key();
        if code == 0 {
            return outcome;
        }
        let key = KeyMapper::cardkb_to_keysym(code);
        if key.is_none() {
            trace!(code, "unmapped key byte dropped");
            return outcome;
        }
        if !self.state.session_up() {
            trace!(%key, "key dropped: session not connected");
            return outcome;
        }
        match self.input.key_tap(key).await {
            Ok(()) => outcome.key_sent = true,
            Err(e) => warn!(error = %e, %key, "failed to send key"),
        }
        outcome
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
