//! Integration tests for the tabvnc-core gesture pipeline.
//!
//! These tests drive the recognizer and the session view together through
//! the public API, the way the viewer's session context does on every tick,
//! and check the end-to-end touch scenarios a user actually performs.

use tabvnc_core::{
    ButtonMask, GestureConfig, GestureEvent, GestureRecognizer, ScreenMode, ScrollDirection,
    SessionView, TouchSample,
};

/// Runs one tick the way the orchestrator does and returns the events that
/// would reach the remote session.
fn tick(
    recognizer: &mut GestureRecognizer,
    view: &mut SessionView,
    sample: TouchSample,
) -> Vec<GestureEvent> {
    let guarded_at_start = view.is_guarded();
    let events = recognizer.process(sample);
    let mut forwarded = Vec::new();
    for event in events {
        match event {
            GestureEvent::ToggleOverlay => view.begin_transition(view.mode().toggled()),
            GestureEvent::OpenOverlay if view.mode() == ScreenMode::Live => {
                view.begin_transition(ScreenMode::InfoOverlay)
            }
            GestureEvent::OpenOverlay => {}
            other if !guarded_at_start && view.allows_remote_input() => forwarded.push(other),
            _ => {}
        }
    }
    view.observe_touch_count(sample.active_count());
    forwarded
}

#[test]
fn test_tap_produces_press_then_release() {
    let mut r = GestureRecognizer::default();
    let mut v = SessionView::new();

    let mut out = tick(&mut r, &mut v, TouchSample::single(640, 360, 0));
    out.extend(tick(&mut r, &mut v, TouchSample::released(40)));

    assert_eq!(
        out,
        vec![
            GestureEvent::PointerMove { x: 640, y: 360 },
            GestureEvent::PointerRelease { x: 640, y: 360 },
        ]
    );
}

#[test]
fn test_drag_into_scroll_releases_before_first_wheel_step() {
    let mut r = GestureRecognizer::default();
    let mut v = SessionView::new();
    let samples = [
        TouchSample::single(500, 500, 0),
        TouchSample::single(500, 480, 10),
        TouchSample::fingers(2, 500, 480, 20),
        TouchSample::fingers(2, 500, 400, 30),
        TouchSample::released(40),
    ];

    let out: Vec<_> = samples.into_iter().flat_map(|s| tick(&mut r, &mut v, s)).collect();

    let release = out
        .iter()
        .position(|e| matches!(e, GestureEvent::PointerRelease { .. }))
        .expect("release emitted");
    let scroll = out
        .iter()
        .position(|e| matches!(e, GestureEvent::Scroll { .. }))
        .expect("scroll emitted");
    assert!(release < scroll);
    assert_eq!(
        out.iter().filter(|e| matches!(e, GestureEvent::PointerRelease { .. })).count(),
        1
    );
    assert_eq!(
        ButtonMask::wheel(ScrollDirection::Up),
        ButtonMask::WHEEL_UP,
        "upward finger travel maps to button 4"
    );
}

#[test]
fn test_three_finger_toggle_suppresses_input_until_all_fingers_lift() {
    let mut r = GestureRecognizer::default();
    let mut v = SessionView::new();

    // Toggle to the overlay and back, lifting in between.
    tick(&mut r, &mut v, TouchSample::fingers(3, 600, 300, 0));
    assert_eq!(v.mode(), ScreenMode::InfoOverlay);
    tick(&mut r, &mut v, TouchSample::released(100));
    tick(&mut r, &mut v, TouchSample::fingers(3, 600, 300, 700));
    assert_eq!(v.mode(), ScreenMode::Live);

    // Fingers drop one by one; the remaining finger must not drag.
    let out = tick(&mut r, &mut v, TouchSample::single(610, 320, 720));
    assert!(out.is_empty());
    let out = tick(&mut r, &mut v, TouchSample::released(740));
    assert!(out.is_empty(), "events of the clearing tick are dropped");
    assert!(v.allows_remote_input());

    // A fresh tap goes through.
    let out = tick(&mut r, &mut v, TouchSample::single(200, 200, 800));
    assert_eq!(out, vec![GestureEvent::PointerMove { x: 200, y: 200 }]);
}

#[test]
fn test_swipe_down_opens_overlay_only_when_fast_enough() {
    for (duration, expect_overlay) in [(400u64, true), (1200u64, false)] {
        let mut r = GestureRecognizer::default();
        let mut v = SessionView::new();
        // The finger hesitates near the edge, then finishes the pull.
        tick(&mut r, &mut v, TouchSample::single(400, 10, 0));
        tick(&mut r, &mut v, TouchSample::single(405, 40, duration / 2));
        tick(&mut r, &mut v, TouchSample::single(420, 150, duration));
        tick(&mut r, &mut v, TouchSample::released(duration + 10));

        assert_eq!(
            v.mode() == ScreenMode::InfoOverlay,
            expect_overlay,
            "swipe lasting {duration}ms"
        );
    }
}

#[test]
fn test_gesture_config_parses_partial_toml_table() {
    let cfg: GestureConfig = toml::from_str("scroll_threshold_px = 80\n").expect("valid toml");

    assert_eq!(cfg.scroll_threshold_px, 80);
    assert_eq!(cfg.three_finger_debounce_ms, 500);
    assert_eq!(cfg.swipe_timeout_ms, 1000);
}
