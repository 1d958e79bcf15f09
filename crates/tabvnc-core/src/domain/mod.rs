//! Domain entities for TabVNC.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of the application holds the rules that make the
//! system what it is.  Domain code never talks to a display, a socket, or a
//! touch controller; it receives plain values (a touch sample, a pixel count)
//! and returns plain values (gesture events, screen coordinates).  That makes
//! every rule here testable with ordinary `#[test]` functions.
//!
//! Code in outer layers (the viewer's application and infrastructure) depends
//! on the domain, but the domain never depends on them.

/// Rectangles and the running state of one streaming pixel update.
pub mod geometry;

/// Multi-touch gesture recognition.
///
/// See [`gesture::GestureRecognizer`] for the main type.
pub mod gesture;

/// Live-view / info-overlay mode and the transition guard.
pub mod session_view;
