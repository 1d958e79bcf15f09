//! Recording draw surface for unit testing.
//!
//! `RecordingSurface` performs no drawing; it appends every call to `calls`
//! so tests can assert exactly what reached the panel and in what order.
//! `read_rect` fills the output with a deterministic pattern derived from the
//! coordinates so copy tests can tell pixels apart.

use tabvnc_core::{Rect, Rgb565};

use crate::application::display_update::DrawSurface;

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    BeginWrite,
    EndWrite,
    SetWindow(Rect),
    PushPixels(Vec<Rgb565>),
    WritePixel(u32, u32, Rgb565),
    FillRect(Rect, Rgb565),
    FillScreen(Rgb565),
    ReadRect(Rect),
    DrawText { x: i32, y: i32, text: String, color: Rgb565, scale: u8 },
    FillCircle { cx: i32, cy: i32, radius: u32, color: Rgb565 },
    SetBrightness(u8),
    SetRotation(u8),
}

impl SurfaceCall {
    /// Whether this call changes pixels on the panel.
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            SurfaceCall::PushPixels(_)
                | SurfaceCall::WritePixel(..)
                | SurfaceCall::FillRect(..)
                | SurfaceCall::FillScreen(_)
                | SurfaceCall::DrawText { .. }
                | SurfaceCall::FillCircle { .. }
        )
    }
}

/// A surface that records calls instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, calls: Vec::new() }
    }

    /// Number of calls that changed pixels.
    pub fn draw_calls(&self) -> usize {
        self.count(SurfaceCall::is_draw)
    }

    pub fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(*c)).count()
    }

    /// Total pixels pushed through write windows.
    pub fn pushed_pixel_count(&self) -> usize {
        self.calls
            .iter()
            .map(|c| match c {
                SurfaceCall::PushPixels(p) => p.len(),
                _ => 0,
            })
            .sum()
    }

    /// Every single-pixel write, in order.
    pub fn pixel_writes(&self) -> Vec<(u32, u32, Rgb565)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::WritePixel(x, y, color) => Some((*x, *y, *color)),
                _ => None,
            })
            .collect()
    }

    /// Every text string drawn, in order.
    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::DrawText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn begin_write(&mut self) {
        self.calls.push(SurfaceCall::BeginWrite);
    }

    fn end_write(&mut self) {
        self.calls.push(SurfaceCall::EndWrite);
    }

    fn set_window(&mut self, rect: Rect) {
        self.calls.push(SurfaceCall::SetWindow(rect));
    }

    fn push_pixels(&mut self, pixels: &[Rgb565]) {
        self.calls.push(SurfaceCall::PushPixels(pixels.to_vec()));
    }

    fn write_pixel(&mut self, x: u32, y: u32, color: Rgb565) {
        self.calls.push(SurfaceCall::WritePixel(x, y, color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb565) {
        self.calls.push(SurfaceCall::FillRect(rect, color));
    }

    fn fill_screen(&mut self, color: Rgb565) {
        self.calls.push(SurfaceCall::FillScreen(color));
    }

    fn read_rect(&mut self, rect: Rect, out: &mut [Rgb565]) {
        self.calls.push(SurfaceCall::ReadRect(rect));
        let width = rect.width.max(1) as usize;
        for (i, px) in out.iter_mut().enumerate() {
            let x = rect.x as usize + i % width;
            let y = rect.y as usize + i / width;
            *px = Rgb565(((y << 8) | (x & 0xFF)) as u16);
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb565, scale: u8) {
        self.calls.push(SurfaceCall::DrawText { x, y, text: text.to_string(), color, scale });
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgb565) {
        self.calls.push(SurfaceCall::FillCircle { cx, cy, radius, color });
    }

    fn set_brightness(&mut self, level: u8) {
        self.calls.push(SurfaceCall::SetBrightness(level));
    }

    fn set_rotation(&mut self, rotation: u8) {
        self.calls.push(SurfaceCall::SetRotation(rotation));
    }
}
