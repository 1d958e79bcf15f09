//! Options negotiated when a remote framebuffer session starts.

use serde::{Deserialize, Serialize};

/// Session options the viewer may adjust before the handshake completes.
///
/// The protocol layer builds the defaults and hands them to the display sink
/// once, at negotiation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Ask the server to keep other viewers connected.
    pub shared: bool,
    /// Advertise the CopyRect encoding.
    pub copy_rect: bool,
    /// Bits per pixel requested from the server.
    pub bits_per_pixel: u8,
    /// Ask for big-endian pixel words.
    pub big_endian: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { shared: true, copy_rect: false, bits_per_pixel: 16, big_endian: false }
    }
}
