//! Multi-touch gesture recognition.
//!
//! [`GestureRecognizer`] is a stateful processor that converts the raw touch
//! sample produced on every input tick into discrete [`GestureEvent`]s.
//!
//! # Touch shapes (for beginners)
//!
//! A touch controller reports how many fingers are on the glass plus the
//! position of the *primary* finger.  The recognizer picks a behaviour by the
//! finger count, the "shape" of the touch:
//!
//! | Shape              | Meaning                                           |
//! |--------------------|---------------------------------------------------|
//! | 1 finger           | Drag with the left button held (or a top swipe)   |
//! | 2 fingers          | Vertical scroll, one wheel click per threshold    |
//! | 3 or more fingers  | Toggle between the live view and the info overlay |
//!
//! # Invariants
//!
//! 1. A drag never bleeds into a scroll: entering the two-finger shape releases
//!    any held pointer before the first scroll tick.
//! 2. Exactly one `PointerRelease` is emitted per press.
//! 3. A top-edge swipe never emits a drag: the press that starts it is answered
//!    with a synthetic release, and single-pointer events stay suppressed until
//!    the finger lifts.
//! 4. When the finger count changes away from the shape a compound gesture
//!    needs, that gesture's state resets in the same tick.  The swipe is
//!    cancelled before any held pointer is released.
//! 5. [`GestureRecognizer::reset`] keeps the three-finger debounce timestamp so
//!    a reset cannot cause a second toggle inside the debounce window.

use serde::{Deserialize, Serialize};
use tracing::trace;

// ── Input sample ──────────────────────────────────────────────────────────────

/// One reading of the touch controller, taken once per input tick.
///
/// Samples are ephemeral: produced by the input source and consumed at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchSample {
    /// Number of fingers reported by the controller.
    pub count: u8,
    /// X of the primary finger in surface pixels.
    pub x: i32,
    /// Y of the primary finger in surface pixels.
    pub y: i32,
    /// Whether the primary finger is down.
    pub pressed: bool,
    /// Milliseconds on a monotonic clock.
    pub timestamp_ms: u64,
}

impl TouchSample {
    /// A sample with no finger on the glass.
    pub const fn released(timestamp_ms: u64) -> Self {
        Self { count: 0, x: 0, y: 0, pressed: false, timestamp_ms }
    }

    /// A single finger pressed at (x, y).
    pub const fn single(x: i32, y: i32, timestamp_ms: u64) -> Self {
        Self { count: 1, x, y, pressed: true, timestamp_ms }
    }

    /// `count` fingers down with the primary finger at (x, y).
    pub const fn fingers(count: u8, x: i32, y: i32, timestamp_ms: u64) -> Self {
        Self { count, x, y, pressed: count > 0, timestamp_ms }
    }

    /// The number of fingers that actually count as touching.
    ///
    /// A sample whose primary finger is not pressed has no active touches,
    /// whatever the raw count says.
    pub fn active_count(&self) -> u8 {
        if self.pressed {
            self.count.max(1)
        } else {
            0
        }
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Thresholds and timeouts for gesture recognition.
///
/// These are policy values; every field has a default so a partial
/// `[gestures]` table in the config file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Minimum time between two overlay toggles (default: 500ms).
    pub three_finger_debounce_ms: u64,
    /// Vertical travel needed for one scroll tick (default: 50px).
    pub scroll_threshold_px: i32,
    /// Minimum time between two scroll ticks (default: 100ms).
    pub scroll_interval_ms: u64,
    /// Height of the band at the top edge where a swipe may start (default: 50px).
    pub swipe_edge_band_px: i32,
    /// Downward travel that completes a swipe; also the maximum sideways drift (default: 100px).
    pub swipe_min_distance_px: i32,
    /// A swipe must complete within this time (default: 1000ms).
    pub swipe_timeout_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            three_finger_debounce_ms: 500,
            scroll_threshold_px: 50,
            scroll_interval_ms: 100,
            swipe_edge_band_px: 50,
            swipe_min_distance_px: 100,
            swipe_timeout_ms: 1000,
        }
    }
}

// ── Output events ─────────────────────────────────────────────────────────────

/// Direction of one discrete wheel step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// A disambiguated user intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// The pointer is at (x, y) with the primary button held.
    PointerMove { x: i32, y: i32 },
    /// The primary button was released at (x, y).
    PointerRelease { x: i32, y: i32 },
    /// One wheel step at (x, y).
    Scroll { direction: ScrollDirection, x: i32, y: i32 },
    /// Switch between the live view and the info overlay.
    ToggleOverlay,
    /// Show the info overlay (top-edge swipe completed).
    OpenOverlay,
}

// ── Internal state ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct ScrollState {
    anchor_y: i32,
    /// `None` until the first tick of this gesture has been emitted.
    last_tick_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwipePhase {
    Tracking,
    /// Completed or timed out; the finger is still down.
    Spent,
}

#[derive(Debug, Clone, Copy)]
struct SwipeState {
    start_x: i32,
    start_y: i32,
    start_ms: u64,
    phase: SwipePhase,
}

// ── GestureRecognizer ─────────────────────────────────────────────────────────

/// Stateful gesture recognizer.
///
/// Call [`process`](GestureRecognizer::process) once per input tick.
pub struct GestureRecognizer {
    config: GestureConfig,
    last_pos: (i32, i32),
    pointer_down: bool,
    scroll: Option<ScrollState>,
    swipe: Option<SwipeState>,
    last_toggle_ms: Option<u64>,
    previous_count: u8,
}

impl GestureRecognizer {
    /// Creates an idle recognizer.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            last_pos: (0, 0),
            pointer_down: false,
            scroll: None,
            swipe: None,
            last_toggle_ms: None,
            previous_count: 0,
        }
    }

    /// The thresholds this recognizer was built with.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Returns `true` while a single-pointer drag holds the primary button.
    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Last position reported by a single-pointer event.
    pub fn last_position(&self) -> (i32, i32) {
        self.last_pos
    }

    /// Returns `true` while a two-finger scroll is in progress.
    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_some()
    }

    /// Returns `true` while a top-edge swipe owns the single pointer.
    pub fn is_swiping(&self) -> bool {
        self.swipe.is_some()
    }

    /// Drops every in-progress gesture without emitting events.
    ///
    /// The three-finger debounce timestamp and the last observed finger count
    /// survive, so fingers still resting on the glass do not re-trigger a toggle.
    pub fn reset(&mut self) {
        self.pointer_down = false;
        self.scroll = None;
        self.swipe = None;
    }

    /// Feeds one touch sample and returns the events it produced, in order.
    pub fn process(&mut self, sample: TouchSample) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        let count = sample.active_count();

        if count != 1 && self.swipe.take().is_some() {
            trace!("swipe cancelled: touch count changed to {count}");
        }
        if count != 2 && self.scroll.take().is_some() {
            trace!("scroll ended: touch count changed to {count}");
        }

        match count {
            0 => self.release_pointer(&mut events),
            1 => self.on_single(sample, &mut events),
            2 => self.on_double(sample, &mut events),
            _ => self.on_multi(sample, &mut events),
        }

        self.previous_count = count;
        if !events.is_empty() {
            trace!(?events, "gesture events");
        }
        events
    }

    // ── Per-shape handlers ────────────────────────────────────────────────────

    fn release_pointer(&mut self, events: &mut Vec<GestureEvent>) {
        if self.pointer_down {
            let (x, y) = self.last_pos;
            events.push(GestureEvent::PointerRelease { x, y });
            self.pointer_down = false;
        }
    }

    fn on_single(&mut self, sample: TouchSample, events: &mut Vec<GestureEvent>) {
        let (x, y) = (sample.x, sample.y);

        if let Some(swipe) = self.swipe.as_mut() {
            if swipe.phase == SwipePhase::Tracking {
                let elapsed = sample.timestamp_ms.saturating_sub(swipe.start_ms);
                let travel = y - swipe.start_y;
                let drift = (x - swipe.start_x).abs();
                if elapsed > self.config.swipe_timeout_ms {
                    trace!(elapsed, "swipe cancelled: timeout");
                    swipe.phase = SwipePhase::Spent;
                } else if travel >= self.config.swipe_min_distance_px
                    && drift < self.config.swipe_min_distance_px
                {
                    swipe.phase = SwipePhase::Spent;
                    events.push(GestureEvent::OpenOverlay);
                }
            }
            return;
        }

        let fresh_press = !self.pointer_down && self.previous_count == 0;
        if fresh_press && y < self.config.swipe_edge_band_px {
            self.swipe = Some(SwipeState {
                start_x: x,
                start_y: y,
                start_ms: sample.timestamp_ms,
                phase: SwipePhase::Tracking,
            });
            self.last_pos = (x, y);
            events.push(GestureEvent::PointerRelease { x, y });
            return;
        }

        if !self.pointer_down || self.last_pos != (x, y) {
            events.push(GestureEvent::PointerMove { x, y });
            self.last_pos = (x, y);
            self.pointer_down = true;
        }
    }

    fn on_double(&mut self, sample: TouchSample, events: &mut Vec<GestureEvent>) {
        let Some(scroll) = self.scroll.as_mut() else {
            self.release_pointer(events);
            self.scroll = Some(ScrollState { anchor_y: sample.y, last_tick_ms: None });
            return;
        };

        // Inverted: fingers moving up (smaller y) scroll up.
        let delta_y = scroll.anchor_y - sample.y;
        let interval_elapsed = scroll.last_tick_ms.map_or(true, |last| {
            sample.timestamp_ms.saturating_sub(last) >= self.config.scroll_interval_ms
        });

        if delta_y.abs() >= self.config.scroll_threshold_px && interval_elapsed {
            let direction = if delta_y > 0 { ScrollDirection::Up } else { ScrollDirection::Down };
            events.push(GestureEvent::Scroll { direction, x: sample.x, y: sample.y });
            scroll.anchor_y = sample.y;
            scroll.last_tick_ms = Some(sample.timestamp_ms);
        }
    }

    fn on_multi(&mut self, sample: TouchSample, events: &mut Vec<GestureEvent>) {
        // Edge-triggered: only the tick on which three fingers first appear.
        if self.previous_count >= 3 {
            return;
        }
        let due = self.last_toggle_ms.map_or(true, |last| {
            sample.timestamp_ms.saturating_sub(last) > self.config.three_finger_debounce_ms
        });
        if due {
            self.last_toggle_ms = Some(sample.timestamp_ms);
            events.push(GestureEvent::ToggleOverlay);
        } else {
            trace!("overlay toggle debounced");
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn recognizer() -> GestureRecognizer {
        GestureRecognizer::default()
    }

    fn feed(r: &mut GestureRecognizer, samples: &[TouchSample]) -> Vec<GestureEvent> {
        samples.iter().flat_map(|s| r.process(*s)).collect()
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    #[test]
    fn test_gesture_config_defaults_match_policy_values() {
        let cfg = GestureConfig::default();
        assert_eq!(cfg.three_finger_debounce_ms, 500);
        assert_eq!(cfg.scroll_threshold_px, 50);
        assert_eq!(cfg.scroll_interval_ms, 100);
        assert_eq!(cfg.swipe_edge_band_px, 50);
        assert_eq!(cfg.swipe_min_distance_px, 100);
        assert_eq!(cfg.swipe_timeout_ms, 1000);
    }

    #[test]
    fn test_active_count_is_zero_when_primary_not_pressed() {
        let s = TouchSample { count: 2, x: 0, y: 0, pressed: false, timestamp_ms: 0 };
        assert_eq!(s.active_count(), 0);
    }

    // ── Single pointer ────────────────────────────────────────────────────────

    #[test]
    fn test_first_press_emits_pointer_move() {
        // Arrange
        let mut r = recognizer();

        // Act
        let events = r.process(TouchSample::single(300, 400, 0));

        // Assert
        assert_eq!(events, vec![GestureEvent::PointerMove { x: 300, y: 400 }]);
        assert!(r.is_pointer_down());
    }

    #[test]
    fn test_stationary_finger_emits_nothing_after_first_move() {
        let mut r = recognizer();
        r.process(TouchSample::single(300, 400, 0));

        let events = r.process(TouchSample::single(300, 400, 10));

        assert!(events.is_empty());
    }

    #[test]
    fn test_moving_finger_emits_move_per_position_change() {
        let mut r = recognizer();
        let events = feed(
            &mut r,
            &[
                TouchSample::single(300, 400, 0),
                TouchSample::single(305, 400, 10),
                TouchSample::single(305, 410, 20),
            ],
        );
        assert_eq!(events.len(), 3);
        assert_eq!(r.last_position(), (305, 410));
    }

    #[test]
    fn test_release_emits_single_pointer_release_at_last_position() {
        // Arrange
        let mut r = recognizer();
        r.process(TouchSample::single(300, 400, 0));

        // Act – two consecutive empty samples
        let first = r.process(TouchSample::released(10));
        let second = r.process(TouchSample::released(20));

        // Assert – exactly once
        assert_eq!(first, vec![GestureEvent::PointerRelease { x: 300, y: 400 }]);
        assert!(second.is_empty());
        assert!(!r.is_pointer_down());
    }

    #[test]
    fn test_count_one_without_pressed_counts_as_release() {
        let mut r = recognizer();
        r.process(TouchSample::single(300, 400, 0));

        let events = r.process(TouchSample { count: 1, x: 0, y: 0, pressed: false, timestamp_ms: 5 });

        assert_eq!(events, vec![GestureEvent::PointerRelease { x: 300, y: 400 }]);
    }

    // ── Two-finger scroll ─────────────────────────────────────────────────────

    #[test]
    fn test_two_fingers_release_held_pointer_before_scrolling() {
        // Arrange – a drag is in progress
        let mut r = recognizer();
        r.process(TouchSample::single(300, 400, 0));

        // Act
        let events = r.process(TouchSample::fingers(2, 300, 400, 10));

        // Assert
        assert_eq!(events, vec![GestureEvent::PointerRelease { x: 300, y: 400 }]);
        assert!(r.is_scrolling());
        assert!(!r.is_pointer_down());
    }

    #[test]
    fn test_scroll_below_threshold_emits_nothing() {
        let mut r = recognizer();
        let events = feed(
            &mut r,
            &[TouchSample::fingers(2, 300, 400, 0), TouchSample::fingers(2, 300, 351, 200)],
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_fingers_moving_up_scroll_up() {
        let mut r = recognizer();
        let events = feed(
            &mut r,
            &[TouchSample::fingers(2, 300, 400, 0), TouchSample::fingers(2, 300, 340, 10)],
        );
        assert_eq!(
            events,
            vec![GestureEvent::Scroll { direction: ScrollDirection::Up, x: 300, y: 340 }]
        );
    }

    #[test]
    fn test_fingers_moving_down_scroll_down() {
        let mut r = recognizer();
        let events = feed(
            &mut r,
            &[TouchSample::fingers(2, 300, 400, 0), TouchSample::fingers(2, 300, 460, 10)],
        );
        assert_eq!(
            events,
            vec![GestureEvent::Scroll { direction: ScrollDirection::Down, x: 300, y: 460 }]
        );
    }

    #[test]
    fn test_fast_scroll_is_gated_by_interval_not_distance() {
        // Arrange – 200px of upward travel within 50ms
        let mut r = recognizer();
        let fast: Vec<TouchSample> = (0..=5)
            .map(|i| TouchSample::fingers(2, 300, 300 - i * 40, (i * 10) as u64))
            .collect();

        // Act
        let burst = feed(&mut r, &fast);

        // Assert – the interval has not elapsed after the first tick
        assert_eq!(burst.len(), 1);

        // Act – fingers rest; once 100ms have passed the accumulated delta fires
        let later = r.process(TouchSample::fingers(2, 300, 100, 130));

        // Assert
        assert_eq!(later.len(), 1);
    }

    #[test]
    fn test_scroll_anchor_resets_after_each_tick() {
        let mut r = recognizer();
        let events = feed(
            &mut r,
            &[
                TouchSample::fingers(2, 0, 400, 0),
                TouchSample::fingers(2, 0, 340, 0),   // tick, anchor = 340
                TouchSample::fingers(2, 0, 320, 200), // only 20px since anchor
            ],
        );
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_dropping_to_one_finger_ends_scroll() {
        let mut r = recognizer();
        feed(&mut r, &[TouchSample::fingers(2, 0, 400, 0)]);

        r.process(TouchSample::single(10, 400, 10));

        assert!(!r.is_scrolling());
    }

    // ── Three-finger toggle ───────────────────────────────────────────────────

    #[test]
    fn test_three_fingers_emit_toggle_once_per_placement() {
        let mut r = recognizer();
        let events = feed(
            &mut r,
            &[
                TouchSample::fingers(3, 0, 0, 0),
                TouchSample::fingers(3, 0, 0, 600),
                TouchSample::fingers(4, 0, 0, 1200),
            ],
        );
        assert_eq!(events, vec![GestureEvent::ToggleOverlay]);
    }

    #[test]
    fn test_three_finger_toggle_within_debounce_is_ignored() {
        let mut r = recognizer();
        let events = feed(
            &mut r,
            &[
                TouchSample::fingers(3, 0, 0, 1000),
                TouchSample::released(1100),
                TouchSample::fingers(3, 0, 0, 1300),
            ],
        );
        assert_eq!(events, vec![GestureEvent::ToggleOverlay]);
    }

    #[test]
    fn test_three_finger_toggle_after_debounce_fires_again() {
        let mut r = recognizer();
        let events = feed(
            &mut r,
            &[
                TouchSample::fingers(3, 0, 0, 1000),
                TouchSample::released(1100),
                TouchSample::fingers(3, 0, 0, 1501),
            ],
        );
        assert_eq!(events, vec![GestureEvent::ToggleOverlay, GestureEvent::ToggleOverlay]);
    }

    #[test]
    fn test_reset_keeps_debounce_timestamp() {
        let mut r = recognizer();
        r.process(TouchSample::fingers(3, 0, 0, 1000));
        r.process(TouchSample::released(1050));

        r.reset();
        let events = r.process(TouchSample::fingers(3, 0, 0, 1200));

        assert!(events.is_empty());
    }

    // ── Top-edge swipe ────────────────────────────────────────────────────────

    #[test]
    fn test_swipe_start_emits_synthetic_release() {
        let mut r = recognizer();

        let events = r.process(TouchSample::single(400, 10, 0));

        assert_eq!(events, vec![GestureEvent::PointerRelease { x: 400, y: 10 }]);
        assert!(r.is_swiping());
        assert!(!r.is_pointer_down());
    }

    #[test]
    fn test_swipe_within_limits_opens_overlay() {
        let mut r = recognizer();
        let events = feed(
            &mut r,
            &[
                TouchSample::single(400, 10, 0),
                TouchSample::single(410, 80, 200),
                TouchSample::single(420, 150, 400),
            ],
        );
        assert_eq!(
            events,
            vec![GestureEvent::PointerRelease { x: 400, y: 10 }, GestureEvent::OpenOverlay]
        );
    }

    #[test]
    fn test_slow_swipe_does_not_open_overlay() {
        let mut r = recognizer();
        let events = feed(
            &mut r,
            &[TouchSample::single(400, 10, 0), TouchSample::single(420, 150, 1200)],
        );
        assert!(!events.contains(&GestureEvent::OpenOverlay));
    }

    #[test]
    fn test_swipe_with_large_horizontal_drift_does_not_complete() {
        let mut r = recognizer();
        let events = feed(
            &mut r,
            &[TouchSample::single(400, 10, 0), TouchSample::single(520, 150, 300)],
        );
        assert!(!events.contains(&GestureEvent::OpenOverlay));
    }

    #[test]
    fn test_swipe_suppresses_drag_events_until_release() {
        let mut r = recognizer();
        let events = feed(
            &mut r,
            &[
                TouchSample::single(400, 10, 0),
                TouchSample::single(400, 30, 50),
                TouchSample::single(400, 150, 100), // completes
                TouchSample::single(400, 300, 150), // still suppressed
                TouchSample::released(200),
            ],
        );
        assert!(events.iter().all(|e| !matches!(e, GestureEvent::PointerMove { .. })));
        assert_eq!(events.iter().filter(|e| **e == GestureEvent::OpenOverlay).count(), 1);
    }

    #[test]
    fn test_swipe_released_early_cancels_without_event() {
        let mut r = recognizer();
        r.process(TouchSample::single(400, 10, 0));
        r.process(TouchSample::single(400, 60, 100));

        let events = r.process(TouchSample::released(150));

        assert!(events.is_empty());
        assert!(!r.is_swiping());
    }

    #[test]
    fn test_second_finger_cancels_swipe() {
        let mut r = recognizer();
        r.process(TouchSample::single(400, 10, 0));

        r.process(TouchSample::fingers(2, 400, 60, 100));

        assert!(!r.is_swiping());
        assert!(r.is_scrolling());
    }

    #[test]
    fn test_press_below_band_starts_drag_not_swipe() {
        let mut r = recognizer();

        let events = r.process(TouchSample::single(400, 50, 0));

        assert_eq!(events, vec![GestureEvent::PointerMove { x: 400, y: 50 }]);
        assert!(!r.is_swiping());
    }

    #[test]
    fn test_drag_entering_top_band_does_not_start_swipe() {
        let mut r = recognizer();
        r.process(TouchSample::single(400, 200, 0));

        let events = r.process(TouchSample::single(400, 5, 10));

        assert_eq!(events, vec![GestureEvent::PointerMove { x: 400, y: 5 }]);
    }
}
