//! In-memory RGB565 framebuffer surface.
//!
//! Stores pixels in a row-major `Vec<Rgb565>` and keeps text draws in a log
//! (there is no font rasteriser).  Out-of-bounds writes are clipped.

use tabvnc_core::{Rect, Rgb565};

use crate::application::display_update::DrawSurface;

/// A text draw kept by [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: Rgb565,
    pub scale: u8,
}

/// A framebuffer held in memory.
#[derive(Debug)]
pub struct MemorySurface {
    width: u32,
    height: u32,
    pixels: Vec<Rgb565>,
    window: Rect,
    /// Next pixel inside `window` for `push_pixels`.
    cursor: u64,
    write_depth: u32,
    texts: Vec<TextItem>,
    brightness: u8,
    rotation: u8,
}

impl MemorySurface {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![Rgb565::default(); len],
            window: Rect::new(0, 0, width, height),
            cursor: 0,
            write_depth: 0,
            texts: Vec::new(),
            brightness: 0,
            rotation: 0,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb565> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// `true` while a `begin_write` has not been matched by `end_write`.
    pub fn in_write(&self) -> bool {
        self.write_depth > 0
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    fn set(&mut self, x: u32, y: u32, color: Rgb565) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn fill_span(&mut self, x0: i64, x1: i64, y: i64, color: Rgb565) {
        if y < 0 || y >= i64::from(self.height) {
            return;
        }
        let start = x0.max(0);
        let end = x1.min(i64::from(self.width) - 1);
        for x in start..=end {
            self.set(x as u32, y as u32, color);
        }
    }
}

impl DrawSurface for MemorySurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn begin_write(&mut self) {
        self.write_depth += 1;
    }

    fn end_write(&mut self) {
        self.write_depth = self.write_depth.saturating_sub(1);
    }

    fn set_window(&mut self, rect: Rect) {
        self.window = rect;
        self.cursor = 0;
    }

    fn push_pixels(&mut self, pixels: &[Rgb565]) {
        if self.window.is_empty() {
            return;
        }
        let w = u64::from(self.window.width);
        for px in pixels {
            if self.cursor >= self.window.area() {
                break;
            }
            let x = self.window.x.checked_add((self.cursor % w) as u32);
            let y = self.window.y.checked_add((self.cursor / w) as u32);
            if let (Some(x), Some(y)) = (x, y) {
                self.set(x, y, *px);
            }
            self.cursor += 1;
        }
    }

    fn write_pixel(&mut self, x: u32, y: u32, color: Rgb565) {
        self.set(x, y, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb565) {
        let x_end = rect.x.saturating_add(rect.width).min(self.width);
        let y_end = rect.y.saturating_add(rect.height).min(self.height);
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                self.set(x, y, color);
            }
        }
    }

    fn fill_screen(&mut self, color: Rgb565) {
        self.pixels.fill(color);
        self.texts.clear();
    }

    fn read_rect(&mut self, rect: Rect, out: &mut [Rgb565]) {
        let w = rect.width.max(1) as usize;
        for (i, px) in out.iter_mut().take(rect.area() as usize).enumerate() {
            let x = rect.x.checked_add((i % w) as u32);
            let y = rect.y.checked_add((i / w) as u32);
            *px = match (x, y) {
                (Some(x), Some(y)) => self.pixel(x, y).unwrap_or_default(),
                _ => Rgb565::default(),
            };
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb565, scale: u8) {
        self.texts.push(TextItem { x, y, text: text.to_string(), color, scale });
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgb565) {
        let r = i64::from(radius);
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        for dy in -r..=r {
            let half = ((r * r - dy * dy) as f64).sqrt() as i64;
            self.fill_span(cx - half, cx + half, cy + dy, color);
        }
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }

    fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation & 0x07;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pixels_fills_window_row_major() {
        // Arrange
        let mut s = MemorySurface::new(8, 8);

        // Act
        s.begin_write();
        s.set_window(Rect::new(2, 3, 2, 2));
        s.push_pixels(&[Rgb565(1), Rgb565(2), Rgb565(3), Rgb565(4), Rgb565(5)]);
        s.end_write();

        // Assert – the fifth pixel overflows the window and is dropped
        assert_eq!(s.pixel(2, 3), Some(Rgb565(1)));
        assert_eq!(s.pixel(3, 3), Some(Rgb565(2)));
        assert_eq!(s.pixel(2, 4), Some(Rgb565(3)));
        assert_eq!(s.pixel(3, 4), Some(Rgb565(4)));
        assert_eq!(s.pixel(4, 3), Some(Rgb565(0)));
        assert!(!s.in_write());
    }

    #[test]
    fn test_window_at_u32_edge_drops_pixels_without_wrapping() {
        // Arrange
        let mut s = MemorySurface::new(4, 4);
        let mut out = [Rgb565(1); 2];

        // Act
        s.set_window(Rect::new(u32::MAX, 0, 2, 2));
        s.push_pixels(&[Rgb565(5); 4]);
        s.read_rect(Rect::new(0, u32::MAX, 1, 2), &mut out);

        // Assert – nothing wrapped around to column or row 0
        assert_eq!(s.pixel(0, 0), Some(Rgb565(0)));
        assert_eq!(s.pixel(0, 1), Some(Rgb565(0)));
        assert_eq!(out, [Rgb565(0), Rgb565(0)]);
    }

    #[test]
    fn test_fill_rect_is_clipped_to_surface() {
        let mut s = MemorySurface::new(4, 4);

        s.fill_rect(Rect::new(2, 2, 10, 10), Rgb565(7));

        assert_eq!(s.pixel(3, 3), Some(Rgb565(7)));
        assert_eq!(s.pixel(1, 1), Some(Rgb565(0)));
    }

    #[test]
    fn test_read_rect_returns_written_pixels() {
        let mut s = MemorySurface::new(4, 4);
        s.write_pixel(1, 1, Rgb565(9));
        s.write_pixel(2, 1, Rgb565(8));
        let mut out = [Rgb565::default(); 2];

        s.read_rect(Rect::new(1, 1, 2, 1), &mut out);

        assert_eq!(out, [Rgb565(9), Rgb565(8)]);
    }

    #[test]
    fn test_fill_circle_covers_centre_not_corners() {
        let mut s = MemorySurface::new(21, 21);

        s.fill_circle(10, 10, 5, Rgb565(3));

        assert_eq!(s.pixel(10, 10), Some(Rgb565(3)));
        assert_eq!(s.pixel(10, 5), Some(Rgb565(3)));
        assert_eq!(s.pixel(5, 5), Some(Rgb565(0)));
    }

    #[test]
    fn test_fill_screen_clears_text_log() {
        let mut s = MemorySurface::new(4, 4);
        s.draw_text(0, 0, "hello", Rgb565(1), 2);

        s.fill_screen(Rgb565(0));

        assert!(s.texts().is_empty());
    }
}
