//! tabvnc-viewer library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the viewer do? (for beginners)
//!
//! The viewer turns a touch tablet into a window onto a remote desktop:
//!
//! 1. The remote framebuffer protocol layer decodes rectangles of pixels and
//!    hands them to the [`DisplayUpdateAdapter`](application::display_update::DisplayUpdateAdapter),
//!    which draws them on the local panel.
//! 2. Every scheduling quantum the
//!    [`SessionOrchestrator`](application::orchestrate_session::SessionOrchestrator)
//!    polls the touch controller, recognises gestures, and sends pointer
//!    events back to the remote desktop.
//! 3. A three-finger tap (or a swipe down from the top edge) pauses the
//!    remote view and shows a local "Connection Info" overlay instead.
//! 4. A second context polls the peripheral keyboard and the reconnect button
//!    independently of the touch loop.

/// Application layer: use cases and the ports they depend on.
pub mod application;

/// Infrastructure layer: surfaces, session/link adapters, input devices, config.
pub mod infrastructure;

/// Two-context runtime that drives the use cases.
pub mod runtime;
