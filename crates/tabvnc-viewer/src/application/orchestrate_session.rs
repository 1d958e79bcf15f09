//! SessionOrchestrator: the session context's per-quantum state machine.
//!
//! Every scheduling quantum the orchestrator:
//!
//! ```text
//!  link up? ──no──► poll touch, status "WiFi Disconnected", reconnect ──► link_backoff
//!     │yes
//!  pump session once (also while the overlay is shown)
//!     │
//!  session up? ──no──► poll touch, status "Connecting VNC" (unless overlay) ──► session_retry
//!     │yes
//!  poll touch ─► GestureRecognizer ─► screen switch / RemoteInput ──► session_quantum
//! ```
//!
//! Screen switching works on every branch.  Pointer input reaches the remote
//! desktop only while the session is up.
//!
//! # Screen switching
//!
//! Entering the overlay releases any held remote pointer, suspends the display
//! adapter, raises the transition guard, waits one quantum so an in-flight
//! update can finish, and only then draws the overlay.  Leaving it clears the
//! overlay, resumes the adapter and, if the session is up, asks the server for
//! exactly one full-frame update.
//!
//! This use case depends only on traits and core types.  All infrastructure
//! implementations are injected at construction time.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tabvnc_core::{
    ButtonMask, GestureConfig, GestureEvent, GestureRecognizer, Keysym, ScreenMode, SessionView,
    TouchSample,
};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::application::display_update::{DisplayControl, RedrawRequest};
use crate::application::remote_input::RemoteInput;
use crate::application::session_state::SessionState;
use crate::application::status::{OverlayInfo, StatusLevel, StatusScreen};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error type for remote session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is not connected")]
    NotConnected,
    #[error("transport error: {0}")]
    Transport(String),
}

/// Error type for network link operations.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("link reconnect failed: {0}")]
    Reconnect(String),
}

// ── Ports ─────────────────────────────────────────────────────────────────────

/// The remote framebuffer session, as seen by the viewer.
///
/// Shared by both contexts; implementations must serialise their own
/// outbound writes.
#[async_trait]
pub trait RemoteSession: Send + Sync {
    async fn is_connected(&self) -> bool;

    /// Processes pending server messages once, feeding any framebuffer
    /// updates to the display sink.
    async fn pump(&self) -> Result<(), SessionError>;

    async fn pointer_event(&self, x: i32, y: i32, buttons: ButtonMask) -> Result<(), SessionError>;

    async fn key_event(&self, key: Keysym, down: bool) -> Result<(), SessionError>;

    /// Requests a non-incremental update of the whole framebuffer.
    async fn force_full_update(&self) -> Result<(), SessionError>;

    async fn reconnect(&self) -> Result<(), SessionError>;
}

/// The network link the session runs over.
#[async_trait]
pub trait NetworkLink: Send + Sync {
    async fn is_up(&self) -> bool;
    async fn reconnect(&self) -> Result<(), LinkError>;
}

/// The touch controller.
pub trait TouchSource: Send + Sync {
    /// Reads the current touch state.  Never blocks.
    fn poll(&self) -> TouchSample;
}

// ── Settings ──────────────────────────────────────────────────────────────────

/// Addresses, labels and timing for the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorSettings {
    pub server_host: String,
    pub server_port: u16,
    /// Shown on the overlay only.
    pub network_name: String,
    pub link_backoff: Duration,
    pub session_retry: Duration,
    pub session_quantum: Duration,
    pub gestures: GestureConfig,
}

impl OrchestratorSettings {
    /// `host:port` as shown on status screens.
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            server_host: "192.168.1.100".to_string(),
            server_port: 5900,
            network_name: String::new(),
            link_backoff: Duration::from_millis(5000),
            session_retry: Duration::from_millis(3000),
            session_quantum: Duration::from_millis(1),
            gestures: GestureConfig::default(),
        }
    }
}

/// The collaborators of a [`SessionOrchestrator`].
pub struct OrchestratorPorts {
    pub session: Arc<dyn RemoteSession>,
    pub link: Arc<dyn NetworkLink>,
    pub touch: Arc<dyn TouchSource>,
    pub status: Arc<dyn StatusScreen>,
    pub display: Arc<DisplayControl>,
    pub state: Arc<SessionState>,
}

// ── Orchestrator ──────────────────────────────────────────────────────────────

/// Drives the session context.
pub struct SessionOrchestrator {
    session: Arc<dyn RemoteSession>,
    link: Arc<dyn NetworkLink>,
    touch: Arc<dyn TouchSource>,
    status: Arc<dyn StatusScreen>,
    display: Arc<DisplayControl>,
    state: Arc<SessionState>,
    input: RemoteInput,
    recognizer: GestureRecognizer,
    view: SessionView,
    settings: OrchestratorSettings,
}

impl SessionOrchestrator {
    pub fn new(ports: OrchestratorPorts, settings: OrchestratorSettings) -> Self {
        let input = RemoteInput::new(Arc::clone(&ports.session));
        Self {
            session: ports.session,
            link: ports.link,
            touch: ports.touch,
            status: ports.status,
            display: ports.display,
            state: ports.state,
            input,
            recognizer: GestureRecognizer::new(settings.gestures.clone()),
            view: SessionView::new(),
            settings,
        }
    }

    pub fn view(&self) -> &SessionView {
        &self.view
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    /// Runs one supervision quantum and returns the delay before the next one.
    ///
    /// Touch is sampled on every quantum, connected or not, so the overlay can
    /// be opened and closed while the link or the session is down.
    pub async fn run_quantum(&mut self) -> Duration {
        if !self.link.is_up().await {
            if self.state.set_link_up(false) {
                warn!("network link lost");
            }
            if self.state.set_session_up(false) {
                warn!("remote session lost with the link");
            }
            self.poll_touch().await;
            if self.view.mode() != ScreenMode::InfoOverlay {
                self.status.show_status("WiFi Disconnected", "Reconnecting...", StatusLevel::Error);
            }
            if let Err(e) = self.link.reconnect().await {
                warn!(error = %e, "link reconnect attempt failed");
            }
            return self.settings.link_backoff;
        }
        if !self.state.set_link_up(true) {
            info!("network link up");
        }

        if let Err(e) = self.session.pump().await {
            debug!(error = %e, "session pump failed");
        }

        if !self.session.is_connected().await {
            if self.state.set_session_up(false) {
                warn!(server = %self.settings.server_address(), "remote session lost");
            }
            self.poll_touch().await;
            if self.view.mode() != ScreenMode::InfoOverlay {
                self.status.show_status(
                    "Connecting VNC",
                    &self.settings.server_address(),
                    StatusLevel::Success,
                );
            }
            return self.settings.session_retry;
        }
        if !self.state.set_session_up(true) {
            info!(server = %self.settings.server_address(), "remote session connected");
        }

        self.poll_touch().await;
        self.settings.session_quantum
    }

    async fn poll_touch(&mut self) {
        let sample = self.touch.poll();
        self.handle_touch(sample).await;
    }

    /// Runs the recognizer on one sample and acts on its events.
    pub async fn handle_touch(&mut self, sample: TouchSample) {
        let guarded_at_start = self.view.is_guarded();
        let events = self.recognizer.process(sample);

        for event in events {
            match event {
                GestureEvent::ToggleOverlay => self.toggle_overlay().await,
                GestureEvent::OpenOverlay => {
                    if self.view.mode() == ScreenMode::Live {
                        self.enter_overlay().await;
                    } else {
                        trace!("swipe ignored: overlay already shown");
                    }
                }
                remote => {
                    if guarded_at_start
                        || !self.view.allows_remote_input()
                        || !self.state.session_up()
                    {
                        trace!(?remote, "remote input suppressed");
                        continue;
                    }
                    if let Err(e) = self.input.dispatch(remote).await {
                        warn!(error = %e, "failed to send pointer event");
                    }
                }
            }
        }

        if self.view.observe_touch_count(sample.active_count()) {
            debug!("transition guard cleared");
        }
    }

    async fn toggle_overlay(&mut self) {
        match self.view.mode() {
            ScreenMode::Live => self.enter_overlay().await,
            ScreenMode::InfoOverlay => self.exit_overlay().await,
        }
    }

    async fn enter_overlay(&mut self) {
        if self.recognizer.is_pointer_down() && self.state.session_up() {
            let (x, y) = self.recognizer.last_position();
            if let Err(e) = self.input.pointer_release(x, y).await {
                warn!(error = %e, "failed to release pointer before overlay");
            }
        }
        self.display.suspend();
        self.view.begin_transition(ScreenMode::InfoOverlay);

        // Let an in-flight update reach the suspended adapter before drawing.
        tokio::time::sleep(self.settings.session_quantum).await;

        self.status.show_overlay(&self.overlay_info());
        self.recognizer.reset();
        info!("info overlay shown");
    }

    async fn exit_overlay(&mut self) {
        self.status.clear_overlay();
        if self.display.resume(&self.state.connection()) == RedrawRequest::FullFrame {
            if let Err(e) = self.session.force_full_update().await {
                warn!(error = %e, "full-frame redraw request failed");
            }
        }
        self.view.begin_transition(ScreenMode::Live);
        self.recognizer.reset();
        info!("live view restored");
    }

    fn overlay_info(&self) -> OverlayInfo {
        let connection = self.state.connection();
        OverlayInfo {
            network_name: self.settings.network_name.clone(),
            server_host: self.settings.server_host.clone(),
            server_port: self.settings.server_port,
            link_up: connection.link_up,
            session_up: connection.session_up,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
