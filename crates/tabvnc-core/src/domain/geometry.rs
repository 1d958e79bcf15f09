//! Screen rectangles and streaming-update bookkeeping.
//!
//! A *streaming update* is one rectangle whose pixels arrive in several chunks
//! instead of a single call.  The protocol layer only tells us how many pixels
//! each chunk holds, so the receiver has to remember how many pixels it has
//! already consumed and derive each pixel's (x, y) from that running count.
//!
//! ```text
//!  origin ─► ┌───────────────┐
//!            │ 0  1  2  3  4 │   pos = pixels_written + i
//!            │ 5  6  7  8  9 │   x   = origin_x + pos % width
//!            │10 11 12 13 14 │   y   = origin_y + pos / width
//!            └───────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Number of pixels covered by the rectangle.
    ///
    /// Computed in `u64` so that a malformed 65535×65535 update cannot overflow.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Returns `true` if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The single-row rectangle at `row` (relative to the top edge).
    ///
    /// Returns `None` when the row's absolute `y` does not fit in `u32`.
    pub fn row(&self, row: u32) -> Option<Rect> {
        Some(Rect::new(self.x, self.y.checked_add(row)?, self.width, 1))
    }
}

/// State of one in-flight streaming update.
///
/// Created when the update begins, advanced on every data chunk, and discarded
/// when the update ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamingUpdateContext {
    pub origin_x: u32,
    pub origin_y: u32,
    pub width: u32,
    pub height: u32,
    /// Pixels consumed so far, whether or not they were drawn.
    pub pixels_written: u64,
}

impl StreamingUpdateContext {
    /// Opens a context for the rectangle `rect` with nothing consumed yet.
    pub fn new(rect: Rect) -> Self {
        Self {
            origin_x: rect.x,
            origin_y: rect.y,
            width: rect.width,
            height: rect.height,
            pixels_written: 0,
        }
    }

    /// The target rectangle of this update.
    pub fn rect(&self) -> Rect {
        Rect::new(self.origin_x, self.origin_y, self.width, self.height)
    }

    /// Returns `true` for zero-width or zero-height updates.
    ///
    /// Degenerate updates are accepted and accounted but never drawn; in
    /// particular a zero width must never reach the `pos / width` division.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Surface coordinates of the `index`-th pixel of the next chunk.
    ///
    /// Returns `None` for degenerate updates, for pixels past the end of the
    /// rectangle (a server that sends more pixels than it announced) and for
    /// pixels whose absolute coordinates do not fit in `u32`.
    pub fn position_of(&self, index: u64) -> Option<(u32, u32)> {
        if self.is_degenerate() {
            return None;
        }
        let pos = self.pixels_written + index;
        let width = u64::from(self.width);
        let row = pos / width;
        if row >= u64::from(self.height) {
            return None;
        }
        // Both values are bounded by width/height, which are u32.
        let x = self.origin_x.checked_add((pos % width) as u32)?;
        let y = self.origin_y.checked_add(row as u32)?;
        Some((x, y))
    }

    /// Advances the consumed-pixel counter by `count`.
    pub fn advance(&mut self, count: u64) {
        self.pixels_written = self.pixels_written.saturating_add(count);
    }

    /// Pixels still expected before the rectangle is complete.
    pub fn remaining(&self) -> u64 {
        self.rect().area().saturating_sub(self.pixels_written)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rect_area_uses_wide_arithmetic() {
        let r = Rect::new(0, 0, u32::MAX, 2);
        assert_eq!(r.area(), u64::from(u32::MAX) * 2);
    }

    #[test]
    fn test_rect_is_empty_for_zero_width_or_height() {
        assert!(Rect::new(5, 5, 0, 10).is_empty());
        assert!(Rect::new(5, 5, 10, 0).is_empty());
        assert!(!Rect::new(5, 5, 1, 1).is_empty());
    }

    #[test]
    fn test_position_of_first_pixel_is_origin() {
        // Arrange
        let ctx = StreamingUpdateContext::new(Rect::new(100, 40, 8, 4));

        // Act / Assert
        assert_eq!(ctx.position_of(0), Some((100, 40)));
    }

    #[test]
    fn test_position_of_wraps_to_next_row() {
        let ctx = StreamingUpdateContext::new(Rect::new(10, 20, 3, 3));
        assert_eq!(ctx.position_of(2), Some((12, 20)));
        assert_eq!(ctx.position_of(3), Some((10, 21)));
        assert_eq!(ctx.position_of(8), Some((12, 22)));
    }

    #[test]
    fn test_position_of_accounts_for_pixels_already_written() {
        // Arrange
        let mut ctx = StreamingUpdateContext::new(Rect::new(0, 0, 4, 4));

        // Act
        ctx.advance(5);

        // Assert – index 0 of the next chunk is the 6th pixel overall.
        assert_eq!(ctx.position_of(0), Some((1, 1)));
    }

    #[test]
    fn test_position_of_zero_width_returns_none_without_dividing() {
        let ctx = StreamingUpdateContext::new(Rect::new(0, 0, 0, 10));
        assert!(ctx.is_degenerate());
        assert_eq!(ctx.position_of(0), None);
    }

    #[test]
    fn test_position_of_past_end_of_rect_returns_none() {
        let ctx = StreamingUpdateContext::new(Rect::new(0, 0, 2, 2));
        assert_eq!(ctx.position_of(4), None);
    }

    #[test]
    fn test_position_of_beyond_u32_edge_returns_none() {
        // Arrange – rectangles that start at the edge of the coordinate space
        let wide = StreamingUpdateContext::new(Rect::new(u32::MAX, 0, 2, 1));
        let tall = StreamingUpdateContext::new(Rect::new(0, u32::MAX, 1, 2));

        // Act / Assert – the in-range pixel resolves, the next one does not
        assert_eq!(wide.position_of(0), Some((u32::MAX, 0)));
        assert_eq!(wide.position_of(1), None);
        assert_eq!(tall.position_of(0), Some((0, u32::MAX)));
        assert_eq!(tall.position_of(1), None);
    }

    #[test]
    fn test_row_past_u32_edge_is_none() {
        let r = Rect::new(4, u32::MAX - 1, 8, 3);
        assert_eq!(r.row(1), Some(Rect::new(4, u32::MAX, 8, 1)));
        assert_eq!(r.row(2), None);
    }

    #[test]
    fn test_chunked_positions_cover_rect_exactly_once_in_row_major_order() {
        // Arrange – 7×5 rect fed in uneven chunks summing to 35
        let rect = Rect::new(3, 9, 7, 5);
        let mut ctx = StreamingUpdateContext::new(rect);
        let chunks = [1u64, 6, 13, 2, 13];
        let mut seen = Vec::new();

        // Act
        for chunk in chunks {
            for i in 0..chunk {
                seen.push(ctx.position_of(i).expect("inside rect"));
            }
            ctx.advance(chunk);
        }

        // Assert – no duplicates, no gaps, row-major order
        let unique: HashSet<_> = seen.iter().copied().collect();
        assert_eq!(unique.len(), 35);
        let expected: Vec<(u32, u32)> = (9..14)
            .flat_map(|y| (3..10).map(move |x| (x, y)))
            .collect();
        assert_eq!(seen, expected);
        assert_eq!(ctx.remaining(), 0);
    }

    #[test]
    fn test_advance_saturates_instead_of_overflowing() {
        let mut ctx = StreamingUpdateContext::new(Rect::new(0, 0, 1, 1));
        ctx.advance(u64::MAX);
        ctx.advance(10);
        assert_eq!(ctx.pixels_written, u64::MAX);
    }
}
