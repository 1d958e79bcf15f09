//! Mock remote session for tests and for running the viewer without a server.
//!
//! # Usage in tests
//!
//! ```ignore
//! let session = Arc::new(MockSession::connected());
//! let input = RemoteInput::new(session.clone());
//!
//! input.pointer_move(10, 20).await?;
//!
//! assert_eq!(session.calls(), vec![SessionCall::Pointer(10, 20, ButtonMask::LEFT)]);
//! ```
//!
//! # `fail_sends` flag
//!
//! Set with [`MockSession::set_fail_sends`] to make every pointer and key
//! event return `SessionError::Transport`, for testing error paths.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tabvnc_core::{ButtonMask, Keysym, Rect, SessionOptions};

use crate::application::display_update::FramebufferSink;
use crate::application::orchestrate_session::{RemoteSession, SessionError};

/// One outbound event recorded by [`MockSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCall {
    Pointer(i32, i32, ButtonMask),
    Key(Keysym, bool),
}

/// A framebuffer update replayed into the sink by `pump`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedUpdate {
    Area { rect: Rect, pixels: Vec<u16> },
    Fill { rect: Rect, color: u16 },
    Copy { src_x: u32, src_y: u32, dst: Rect },
    /// A streaming rectangle delivered in the given chunks.
    Stream { rect: Rect, chunks: Vec<Vec<u16>> },
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A session that records calls instead of talking to a server.
#[derive(Default)]
pub struct MockSession {
    connected: AtomicBool,
    fail_sends: AtomicBool,
    calls: Mutex<Vec<SessionCall>>,
    pumps: AtomicUsize,
    full_updates: AtomicUsize,
    reconnects: AtomicUsize,
    sink: Mutex<Option<Box<dyn FramebufferSink>>>,
    script: Mutex<VecDeque<ScriptedUpdate>>,
}

impl MockSession {
    /// A disconnected session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A connected session.
    pub fn connected() -> Self {
        let s = Self::default();
        s.set_connected(true);
        s
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Release);
    }

    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::Release);
    }

    /// Attaches the display sink and runs option negotiation against it.
    pub fn attach_sink(&self, mut sink: Box<dyn FramebufferSink>) -> SessionOptions {
        let mut options = SessionOptions::default();
        sink.override_options(&mut options);
        *lock(&self.sink) = Some(sink);
        options
    }

    /// Queues an update for a later `pump`.
    pub fn queue_update(&self, update: ScriptedUpdate) {
        lock(&self.script).push_back(update);
    }

    pub fn calls(&self) -> Vec<SessionCall> {
        lock(&self.calls).clone()
    }

    pub fn pump_count(&self) -> usize {
        self.pumps.load(Ordering::Acquire)
    }

    pub fn full_update_count(&self) -> usize {
        self.full_updates.load(Ordering::Acquire)
    }

    pub fn reconnect_count(&self) -> usize {
        self.reconnects.load(Ordering::Acquire)
    }

    fn record(&self, call: SessionCall) -> Result<(), SessionError> {
        if self.fail_sends.load(Ordering::Acquire) {
            return Err(SessionError::Transport("injected failure".to_string()));
        }
        if !self.connected.load(Ordering::Acquire) {
            return Err(SessionError::NotConnected);
        }
        lock(&self.calls).push(call);
        Ok(())
    }

    fn replay(sink: &mut dyn FramebufferSink, update: ScriptedUpdate) {
        match update {
            ScriptedUpdate::Area { rect, pixels } => sink.draw_area(rect, &pixels),
            ScriptedUpdate::Fill { rect, color } => sink.fill_rect(rect, color),
            ScriptedUpdate::Copy { src_x, src_y, dst } => sink.copy_rect(src_x, src_y, dst),
            ScriptedUpdate::Stream { rect, chunks } => {
                sink.begin_streaming_update(rect);
                for chunk in chunks {
                    let bytes: Vec<u8> = chunk.iter().flat_map(|w| w.to_ne_bytes()).collect();
                    sink.feed_streaming_update(&bytes, chunk.len());
                }
                sink.end_streaming_update();
            }
        }
    }
}

#[async_trait]
impl RemoteSession for MockSession {
    async fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Replays at most one queued update.
    async fn pump(&self) -> Result<(), SessionError> {
        self.pumps.fetch_add(1, Ordering::AcqRel);
        let Some(update) = lock(&self.script).pop_front() else {
            return Ok(());
        };
        if let Some(sink) = lock(&self.sink).as_mut() {
            Self::replay(&mut **sink, update);
        }
        Ok(())
    }

    async fn pointer_event(&self, x: i32, y: i32, buttons: ButtonMask) -> Result<(), SessionError> {
        self.record(SessionCall::Pointer(x, y, buttons))
    }

    async fn key_event(&self, key: Keysym, down: bool) -> Result<(), SessionError> {
        self.record(SessionCall::Key(key, down))
    }

    async fn force_full_update(&self) -> Result<(), SessionError> {
        self.full_updates.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    async fn reconnect(&self) -> Result<(), SessionError> {
        self.reconnects.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}
