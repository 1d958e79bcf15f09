//! Application layer use cases for the viewer.
//!
//! # What use cases does the viewer have?
//!
//! - **`display_update`** – Receives the remote framebuffer's rendering
//!   callbacks and draws them on a `DrawSurface`, while honouring the
//!   suspend/resume switch used by the info overlay.
//!
//! - **`orchestrate_session`** – Context A.  Supervises the network link and
//!   the remote session, turns touch samples into gestures, and switches
//!   between the live view and the info overlay.
//!
//! - **`control_input`** – Context B.  Polls the peripheral keyboard and the
//!   reconnect button.
//!
//! - **`remote_input`** – Translates gesture events and key taps into RFB
//!   pointer and key messages.
//!
//! - **`session_state`** – Connection and mode flags shared between the two
//!   contexts.
//!
//! - **`status`** – The status/overlay screen port.

pub mod control_input;
pub mod display_update;
pub mod orchestrate_session;
pub mod remote_input;
pub mod session_state;
pub mod status;
