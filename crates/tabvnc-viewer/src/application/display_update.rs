//! DisplayUpdateAdapter: renders remote framebuffer updates on a local surface.
//!
//! The remote framebuffer protocol layer decodes rectangles and calls the
//! [`FramebufferSink`] methods implemented here.  The adapter converts pixel
//! byte order and forwards the drawing to a [`DrawSurface`].
//!
//! # Suspend / resume (for beginners)
//!
//! While the info overlay is shown the remote session keeps running: the
//! server still sends updates and the protocol parser must still consume
//! them, or its byte offsets would drift.  The adapter therefore keeps its
//! *accounting* (how many pixels of the current streaming rectangle have been
//! consumed) up to date, but draws nothing.
//!
//! Every draw path goes through [`RenderTarget`]: the surface lock is only
//! handed out as `RenderTarget::Live` when the display is not suspended, so a
//! suspended adapter has no way to reach the surface.
//!
//! When the overlay closes, [`DisplayControl::resume`] tells the caller
//! whether the session is up and a full-frame redraw must be requested to
//! replace whatever the overlay left on the panel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tabvnc_core::{Rect, Rgb565, SessionOptions, StreamingUpdateContext};
use tabvnc_core::protocol::decode_pixels;
use tracing::{debug, trace, warn};

use crate::application::session_state::ConnectionFlags;

// ── Ports ─────────────────────────────────────────────────────────────────────

/// Raw drawing primitives of the local panel.
///
/// Colours are logical RGB565 values; byte order is the adapter's concern.
pub trait DrawSurface: Send {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Starts a batched write (chip select held low on SPI panels).
    fn begin_write(&mut self);
    /// Ends a batched write.
    fn end_write(&mut self);
    /// Sets the address window that [`push_pixels`](DrawSurface::push_pixels) fills.
    fn set_window(&mut self, rect: Rect);
    /// Writes pixels into the current window in row-major order.
    fn push_pixels(&mut self, pixels: &[Rgb565]);

    fn write_pixel(&mut self, x: u32, y: u32, color: Rgb565);
    fn fill_rect(&mut self, rect: Rect, color: Rgb565);
    fn fill_screen(&mut self, color: Rgb565);
    /// Reads `rect` back into `out` (row-major, `out.len() >= rect.area()`).
    fn read_rect(&mut self, rect: Rect, out: &mut [Rgb565]);

    /// Draws `text` with its top-left corner at (x, y).  `scale` multiplies the base font size.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb565, scale: u8);
    fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgb565);

    fn set_brightness(&mut self, level: u8);
    fn set_rotation(&mut self, rotation: u8);
}

/// Rendering callbacks invoked by the remote framebuffer protocol layer.
pub trait FramebufferSink: Send {
    /// Static geometry of the render target.
    fn surface_size(&self) -> (u32, u32);
    /// Whether the CopyRect encoding may be advertised.
    fn supports_area_copy(&self) -> bool;
    /// Blits a fully specified rectangle.  `pixels` are in protocol byte order.
    fn draw_area(&mut self, rect: Rect, pixels: &[u16]);
    /// Fills a rectangle with one protocol-order colour.
    fn fill_rect(&mut self, rect: Rect, color: u16);
    /// Copies the `dst`-sized region at (`src_x`, `src_y`) to `dst`.
    fn copy_rect(&mut self, src_x: u32, src_y: u32, dst: Rect);
    /// Opens a rectangle whose pixels arrive in several chunks.
    fn begin_streaming_update(&mut self, rect: Rect);
    /// Consumes the next `pixel_count` pixels of the open rectangle.
    fn feed_streaming_update(&mut self, bytes: &[u8], pixel_count: usize);
    /// Closes the open rectangle.
    fn end_streaming_update(&mut self);
    /// Called once at negotiation time.
    fn override_options(&mut self, options: &mut SessionOptions);
}

/// A surface shared between the adapter and the status screen.
pub type SharedSurface<S> = Arc<Mutex<S>>;

/// Locks a shared surface, recovering the guard if another thread panicked
/// while holding it.
pub fn lock_surface<S>(surface: &Mutex<S>) -> MutexGuard<'_, S> {
    surface.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Display control ───────────────────────────────────────────────────────────

/// Whether remote updates reach the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Live,
    Suspended,
}

/// What the caller must do after resuming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawRequest {
    /// Nothing to do.
    None,
    /// Ask the session for exactly one full-frame update.
    FullFrame,
}

/// The suspend/resume switch, shared by the adapter and the orchestrator.
#[derive(Debug, Default)]
pub struct DisplayControl {
    suspended: AtomicBool,
}

impl DisplayControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DisplayMode {
        if self.is_suspended() {
            DisplayMode::Suspended
        } else {
            DisplayMode::Live
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::Acquire)
    }

    /// Stops drawing.  Returns `true` if the display was live.
    pub fn suspend(&self) -> bool {
        let was_live = !self.suspended.swap(true, Ordering::AcqRel);
        if was_live {
            debug!("display suspended");
        }
        was_live
    }

    /// Resumes drawing.
    ///
    /// Returns [`RedrawRequest::FullFrame`] only when this call ended a
    /// suspension and the remote session is up.
    pub fn resume(&self, connection: &ConnectionFlags) -> RedrawRequest {
        let was_suspended = self.suspended.swap(false, Ordering::AcqRel);
        if !was_suspended {
            return RedrawRequest::None;
        }
        debug!("display resumed");
        if connection.session_up {
            RedrawRequest::FullFrame
        } else {
            RedrawRequest::None
        }
    }
}

// ── Render gate ───────────────────────────────────────────────────────────────

/// Access to the surface, granted only while the display is live.
pub enum RenderTarget<'a, S> {
    Live(MutexGuard<'a, S>),
    Suspended,
}

fn render_target<'a, S>(surface: &'a Mutex<S>, control: &DisplayControl) -> RenderTarget<'a, S> {
    if control.is_suspended() {
        RenderTarget::Suspended
    } else {
        RenderTarget::Live(lock_surface(surface))
    }
}

// ── Adapter ───────────────────────────────────────────────────────────────────

/// Tunables for [`DisplayUpdateAdapter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterSettings {
    /// Byte-swap every protocol pixel before drawing.
    pub swap_bytes: bool,
    /// Largest copy-rect scratch buffer, in pixels.
    pub copy_scratch_limit_px: usize,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self { swap_bytes: true, copy_scratch_limit_px: 1280 * 720 }
    }
}

/// Renders remote framebuffer updates on a [`DrawSurface`].
pub struct DisplayUpdateAdapter<S: DrawSurface> {
    surface: SharedSurface<S>,
    control: Arc<DisplayControl>,
    settings: AdapterSettings,
    size: (u32, u32),
    stream: Option<StreamingUpdateContext>,
    /// A batched write window is open on the surface.
    window_open: bool,
}

impl<S: DrawSurface> DisplayUpdateAdapter<S> {
    /// Creates an adapter drawing on `surface`.
    pub fn new(surface: SharedSurface<S>, control: Arc<DisplayControl>, settings: AdapterSettings) -> Self {
        let size = lock_surface(&surface).size();
        Self { surface, control, settings, size, stream: None, window_open: false }
    }

    /// The streaming rectangle currently open, if any.
    pub fn streaming_context(&self) -> Option<&StreamingUpdateContext> {
        self.stream.as_ref()
    }

    /// Pixels consumed in the open streaming rectangle (0 when none is open).
    pub fn pixels_written(&self) -> u64 {
        self.stream.map_or(0, |ctx| ctx.pixels_written)
    }

    pub fn control(&self) -> &Arc<DisplayControl> {
        &self.control
    }

    fn convert(swap: bool, word: u16) -> Rgb565 {
        Rgb565(Rgb565(word).to_surface(swap))
    }

    /// Copies row by row, walking bottom-up when the destination lies below
    /// the source so overlapping regions are not overwritten before they are read.
    fn copy_rows(surface: &mut S, src_x: u32, src_y: u32, dst: Rect) -> bool {
        let mut row_buf: Vec<Rgb565> = Vec::new();
        if row_buf.try_reserve_exact(dst.width as usize).is_err() {
            return false;
        }
        row_buf.resize(dst.width as usize, Rgb565::default());

        let src = Rect::new(src_x, src_y, dst.width, dst.height);
        let rows: Box<dyn Iterator<Item = u32>> = if dst.y > src_y {
            Box::new((0..dst.height).rev())
        } else {
            Box::new(0..dst.height)
        };
        for r in rows {
            // Rows past the u32 coordinate edge do not exist on any surface.
            let (Some(src_row), Some(dst_row)) = (src.row(r), dst.row(r)) else {
                continue;
            };
            surface.read_rect(src_row, &mut row_buf);
            surface.set_window(dst_row);
            surface.push_pixels(&row_buf);
        }
        true
    }
}

impl<S: DrawSurface> FramebufferSink for DisplayUpdateAdapter<S> {
    fn surface_size(&self) -> (u32, u32) {
        self.size
    }

    fn supports_area_copy(&self) -> bool {
        true
    }

    fn draw_area(&mut self, rect: Rect, pixels: &[u16]) {
        let RenderTarget::Live(mut surface) = render_target(&self.surface, &self.control) else {
            return;
        };
        let count = usize::try_from(rect.area()).unwrap_or(usize::MAX).min(pixels.len());
        if count == 0 {
            return;
        }
        let swap = self.settings.swap_bytes;
        let converted: Vec<Rgb565> =
            pixels[..count].iter().map(|w| Self::convert(swap, *w)).collect();
        surface.begin_write();
        surface.set_window(rect);
        surface.push_pixels(&converted);
        surface.end_write();
    }

    fn fill_rect(&mut self, rect: Rect, color: u16) {
        if let RenderTarget::Live(mut surface) = render_target(&self.surface, &self.control) {
            surface.fill_rect(rect, Self::convert(self.settings.swap_bytes, color));
        }
    }

    fn copy_rect(&mut self, src_x: u32, src_y: u32, dst: Rect) {
        let RenderTarget::Live(mut surface) = render_target(&self.surface, &self.control) else {
            return;
        };
        if dst.is_empty() {
            return;
        }
        let src = Rect::new(src_x, src_y, dst.width, dst.height);
        let area = usize::try_from(dst.area()).unwrap_or(usize::MAX);

        // Scratch buffer lives only for this call.
        let mut scratch: Vec<Rgb565> = Vec::new();
        let have_scratch =
            area <= self.settings.copy_scratch_limit_px && scratch.try_reserve_exact(area).is_ok();

        surface.begin_write();
        if have_scratch {
            scratch.resize(area, Rgb565::default());
            surface.read_rect(src, &mut scratch);
            surface.set_window(dst);
            surface.push_pixels(&scratch);
        } else {
            trace!(area, "copy_rect scratch unavailable, copying row by row");
            if !Self::copy_rows(&mut surface, src_x, src_y, dst) {
                warn!(width = dst.width, "copy_rect skipped: no memory for a single row");
            }
        }
        surface.end_write();
    }

    fn begin_streaming_update(&mut self, rect: Rect) {
        let ctx = StreamingUpdateContext::new(rect);
        self.stream = Some(ctx);
        if ctx.is_degenerate() {
            trace!(?rect, "degenerate streaming update");
            return;
        }
        if let RenderTarget::Live(mut surface) = render_target(&self.surface, &self.control) {
            surface.begin_write();
            surface.set_window(rect);
            self.window_open = true;
        }
    }

    fn feed_streaming_update(&mut self, bytes: &[u8], pixel_count: usize) {
        let Some(ctx) = self.stream.as_mut() else {
            debug!(pixel_count, "streaming data without an open update, ignored");
            return;
        };
        let count = pixel_count as u64;
        if ctx.is_degenerate() {
            ctx.advance(count);
            return;
        }
        let RenderTarget::Live(mut surface) = render_target(&self.surface, &self.control) else {
            ctx.advance(count);
            return;
        };

        // Resumed mid-rectangle: the window was never opened.
        if !self.window_open {
            surface.begin_write();
            surface.set_window(ctx.rect());
            self.window_open = true;
        }

        let words = match decode_pixels(bytes, pixel_count) {
            Ok(words) => words,
            Err(e) => {
                warn!(error = %e, "short streaming chunk, drawing the pixels present");
                decode_pixels(bytes, bytes.len() / 2).unwrap_or_default()
            }
        };
        let swap = self.settings.swap_bytes;
        for (i, word) in words.iter().enumerate() {
            if let Some((x, y)) = ctx.position_of(i as u64) {
                surface.write_pixel(x, y, Self::convert(swap, *word));
            }
        }
        ctx.advance(count);
    }

    fn end_streaming_update(&mut self) {
        // Also closes a window opened before a mid-stream suspend.
        if self.window_open {
            lock_surface(&self.surface).end_write();
            self.window_open = false;
        }
        self.stream = None;
    }

    fn override_options(&mut self, options: &mut SessionOptions) {
        options.copy_rect = true;
        debug!(?options, "session options negotiated");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
