//! Status and info-overlay screen port.

/// Severity of a status message; selects the message colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Data shown on the "Connection Info" overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayInfo {
    /// Wireless network name, as configured.
    pub network_name: String,
    pub server_host: String,
    pub server_port: u16,
    pub link_up: bool,
    pub session_up: bool,
}

/// Draws full-screen status messages and the info overlay.
///
/// Infrastructure implementation draws on the panel; test implementations
/// record calls.
pub trait StatusScreen: Send + Sync {
    /// Clears the screen and shows a centred title and message.
    ///
    /// Implementations skip drawing while the remote display is suspended.
    fn show_status(&self, title: &str, message: &str, level: StatusLevel);

    /// Draws the info overlay.  Called while the remote display is suspended.
    fn show_overlay(&self, info: &OverlayInfo);

    /// Removes the overlay before the remote display resumes.
    fn clear_overlay(&self);
}
