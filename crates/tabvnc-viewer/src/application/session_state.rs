//! Connection flags shared between the two contexts.
//!
//! Context A (the session orchestrator) is the only writer.  Context B
//! (control input) only reads, so plain atomics are enough and no lock is
//! ever held across an await point.  The screen mode and transition guard
//! stay private to the orchestrator's `SessionView`.

use std::sync::atomic::{AtomicBool, Ordering};

/// Point-in-time view of the two connection flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionFlags {
    pub link_up: bool,
    pub session_up: bool,
}

/// Flags published by the session context.
#[derive(Debug, Default)]
pub struct SessionState {
    link_up: AtomicBool,
    session_up: AtomicBool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection(&self) -> ConnectionFlags {
        ConnectionFlags {
            link_up: self.link_up.load(Ordering::Acquire),
            session_up: self.session_up.load(Ordering::Acquire),
        }
    }

    pub fn link_up(&self) -> bool {
        self.link_up.load(Ordering::Acquire)
    }

    pub fn session_up(&self) -> bool {
        self.session_up.load(Ordering::Acquire)
    }

    // ── Writers (session context only) ────────────────────────────────────────

    /// Sets the link flag and returns its previous value.
    pub fn set_link_up(&self, up: bool) -> bool {
        self.link_up.swap(up, Ordering::AcqRel)
    }

    /// Sets the session flag and returns its previous value.
    pub fn set_session_up(&self, up: bool) -> bool {
        self.session_up.swap(up, Ordering::AcqRel)
    }
}
