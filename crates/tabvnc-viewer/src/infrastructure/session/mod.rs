//! `RemoteSession` implementations.
//!
//! The RFB wire protocol (handshake, authentication, encoding negotiation,
//! rectangle decoding) lives in an external protocol crate; it reaches the
//! viewer through the `RemoteSession` port and renders through the
//! `FramebufferSink` callbacks of the display adapter.
//!
//! [`mock::MockSession`] records outbound events and replays scripted
//! framebuffer updates into an attached sink on every `pump`.

pub mod mock;

pub use mock::{MockSession, ScriptedUpdate, SessionCall};
