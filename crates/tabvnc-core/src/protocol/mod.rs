//! Values exchanged with the remote framebuffer protocol layer.

pub mod options;
pub mod pixel;
pub mod pointer;

pub use options::SessionOptions;
pub use pixel::{decode_pixels, swap_rgb565, PixelError, Rgb565};
pub use pointer::ButtonMask;
