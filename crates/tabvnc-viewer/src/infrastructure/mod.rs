//! Infrastructure layer for the viewer.
//!
//! Contains the adapters behind the application ports: drawing surfaces, the
//! status/overlay renderer, the remote session, the network link probe, input
//! devices and TOML configuration storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `tabvnc_core`, but MUST NOT be imported by the `application` layer outside
//! of tests.
//!
//! # Sub-modules
//!
//! - **`surface`** – `DrawSurface` implementations: an in-memory RGB565
//!   framebuffer and a call recorder for tests.
//! - **`status_screen`** – Draws status messages and the "Connection Info"
//!   overlay on a shared surface.
//! - **`session`** – `RemoteSession` implementations.
//! - **`network`** – `NetworkLink` implementations.
//! - **`input`** – Touch, keyboard and button sources.
//! - **`storage`** – Configuration persistence.

pub mod input;
pub mod network;
pub mod session;
pub mod status_screen;
pub mod storage;
pub mod surface;
