//! Which screen owns the display, and whether touch input may reach the remote.
//!
//! The viewer has two screens: the live remote framebuffer and a locally drawn
//! info overlay.  Switching between them is triggered by a gesture, and the
//! fingers that performed the gesture are usually still on the glass when the
//! switch happens.  The *transition guard* makes sure those fingers do not leak
//! into the remote session as a stray click or drag: once a switch happens, all
//! gesture-derived remote input is dropped until the touch source reports zero
//! active touches.

/// The screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenMode {
    /// The remote framebuffer is rendered and touch input is forwarded.
    #[default]
    Live,
    /// The local diagnostics overlay owns the display.
    InfoOverlay,
}

impl ScreenMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ScreenMode::Live => ScreenMode::InfoOverlay,
            ScreenMode::InfoOverlay => ScreenMode::Live,
        }
    }
}

/// The current screen plus the transition guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionView {
    mode: ScreenMode,
    transition_guard: bool,
}

impl SessionView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ScreenMode {
        self.mode
    }

    /// `true` between a mode switch and the next tick with zero touches.
    pub fn is_guarded(&self) -> bool {
        self.transition_guard
    }

    /// Switches to `mode` and raises the guard.
    ///
    /// The guard is raised even when `mode` equals the current mode, since the
    /// gesture that asked for the switch is still in progress.
    pub fn begin_transition(&mut self, mode: ScreenMode) {
        self.mode = mode;
        self.transition_guard = true;
    }

    /// Records the active touch count of the current tick.
    ///
    /// Returns `true` if this call cleared the guard.
    pub fn observe_touch_count(&mut self, count: u8) -> bool {
        if self.transition_guard && count == 0 {
            self.transition_guard = false;
            return true;
        }
        false
    }

    /// Whether gesture-derived input may be sent to the remote session.
    pub fn allows_remote_input(&self) -> bool {
        self.mode == ScreenMode::Live && !self.transition_guard
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
