//! Status and "Connection Info" overlay rendering on a shared draw surface.
//!
//! # Layout
//!
//! ```text
//!  ┌────────────── Connection Info ──────────────┐  70px navy title bar
//!  │ WiFi Network      (cyan)                    │  y = 110
//!  │   <ssid>                                    │  y + 35
//!  │ VNC Server        (green)                   │  y + 80
//!  │   <host>                                    │
//!  │ Port              (yellow)                  │  y + 160
//!  │   <port>                                    │
//!  │        ● WiFi OK          ● VNC Connected   │  y + 260, dots at w/4 and 3w/4
//!  │                                             │
//!  │    Touch with 3 fingers to return to VNC    │  height - 30
//!  └─────────────────────────────────────────────┘
//! ```
//!
//! Text positions are top-left; centring uses a fixed per-character width
//! estimate because the surface has no font metrics.

use std::sync::Arc;

use tabvnc_core::protocol::pixel::colors;
use tabvnc_core::{Rect, Rgb565};

use crate::application::display_update::{lock_surface, DisplayControl, DrawSurface, SharedSurface};
use crate::application::status::{OverlayInfo, StatusLevel, StatusScreen};

/// Estimated glyph width at scale 1.
const CHAR_WIDTH_PX: i32 = 6;
/// Status messages are drawn at twice the base size (12px per character).
const STATUS_SCALE: u8 = 2;
const TITLE_BAR_HEIGHT: u32 = 70;
const CONTENT_TOP: i32 = 110;
const LINE_HEIGHT: i32 = 80;
const VALUE_OFFSET: i32 = 35;
const LABEL_X: i32 = 40;
const INDICATOR_RADIUS: u32 = 12;
const FOOTER: &str = "Touch with 3 fingers to return to VNC";

/// Renders status messages and the overlay on a [`DrawSurface`].
pub struct SurfaceStatusScreen<S: DrawSurface> {
    surface: SharedSurface<S>,
    display: Arc<DisplayControl>,
}

impl<S: DrawSurface> SurfaceStatusScreen<S> {
    pub fn new(surface: SharedSurface<S>, display: Arc<DisplayControl>) -> Self {
        Self { surface, display }
    }
}

fn level_color(level: StatusLevel) -> Rgb565 {
    match level {
        StatusLevel::Info => colors::WHITE,
        StatusLevel::Success => colors::GREEN,
        StatusLevel::Warning => colors::YELLOW,
        StatusLevel::Error => colors::RED,
    }
}

/// Left edge that centres `text` on `centre_x`, or `fallback` if it would not fit.
fn centred_x(surface_width: u32, centre_x: i32, text: &str, scale: u8, fallback: i32) -> i32 {
    let text_width = text.chars().count() as i32 * CHAR_WIDTH_PX * i32::from(scale);
    let x = centre_x - text_width / 2;
    if x < 0 || x + text_width > surface_width as i32 {
        fallback
    } else {
        x
    }
}

impl<S: DrawSurface> StatusScreen for SurfaceStatusScreen<S> {
    fn show_status(&self, title: &str, message: &str, level: StatusLevel) {
        if self.display.is_suspended() {
            return;
        }
        let mut s = lock_surface(&self.surface);
        let (w, h) = s.size();
        let (cx, cy) = (w as i32 / 2, h as i32 / 2);
        let color = level_color(level);

        s.fill_screen(colors::BLACK);
        s.draw_text(centred_x(w, cx, title, STATUS_SCALE, 10), cy - 30, title, color, STATUS_SCALE);
        s.draw_text(
            centred_x(w, cx, message, STATUS_SCALE, 10),
            cy + 10,
            message,
            color,
            STATUS_SCALE,
        );
    }

    fn show_overlay(&self, info: &OverlayInfo) {
        let mut s = lock_surface(&self.surface);
        let (w, h) = s.size();
        let width = w as i32;

        s.fill_screen(colors::BLACK);
        s.fill_rect(Rect::new(0, 0, w, TITLE_BAR_HEIGHT), colors::NAVY);
        let title = "Connection Info";
        s.draw_text(centred_x(w, width / 2, title, 3, 10), 20, title, colors::WHITE, 3);

        let port = info.server_port.to_string();
        let rows: [(&str, Rgb565, &str); 3] = [
            ("WiFi Network", colors::CYAN, info.network_name.as_str()),
            ("VNC Server", colors::GREEN, info.server_host.as_str()),
            ("Port", colors::YELLOW, port.as_str()),
        ];
        let mut y = CONTENT_TOP;
        for (label, color, value) in rows {
            s.draw_text(LABEL_X, y, label, color, 2);
            s.draw_text(LABEL_X, y + VALUE_OFFSET, value, colors::WHITE, 2);
            y += LINE_HEIGHT;
        }

        y += 20;
        let indicators = [
            (width / 4, info.link_up, "WiFi OK", "WiFi Disconnected"),
            (width * 3 / 4, info.session_up, "VNC Connected", "VNC Disconnected"),
        ];
        for (x, ok, up_label, down_label) in indicators {
            let (color, label) = if ok { (colors::GREEN, up_label) } else { (colors::RED, down_label) };
            s.fill_circle(x, y, INDICATOR_RADIUS, color);
            s.draw_text(centred_x(w, x, label, 1, x - 40), y + 28, label, color, 1);
        }

        s.draw_text(
            centred_x(w, width / 2, FOOTER, 2, 10),
            h as i32 - 30,
            FOOTER,
            colors::LIGHT_GREY,
            2,
        );
    }

    fn clear_overlay(&self) {
        lock_surface(&self.surface).fill_screen(colors::BLACK);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
