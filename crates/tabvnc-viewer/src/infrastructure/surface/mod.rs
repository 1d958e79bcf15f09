//! `DrawSurface` implementations.
//!
//! - [`memory::MemorySurface`] keeps an RGB565 framebuffer in a `Vec`, the
//!   default target until a panel driver is wired in.
//! - [`mock::RecordingSurface`] records every call for assertions.

pub mod memory;
pub mod mock;

pub use memory::MemorySurface;
pub use mock::{RecordingSurface, SurfaceCall};
